use crate::Tree;

/// A cursor over the direct children of a node, in order.
///
/// The cursor reads the node's live child list on every step, so it sees
/// removals made through [`Children::remove`]. Any other change to the same
/// node's children while a cursor is in use leaves the rest of the iteration
/// unspecified (though never unsafe).
pub struct Children<V> {
    parent: Tree<V>,
    next: usize,
    last: Option<usize>,
}

impl<V> Children<V> {
    pub(crate) fn new(parent: Tree<V>) -> Self {
        Self {
            parent,
            next: 0,
            last: None,
        }
    }

    /// Removes the child most recently returned by [`Iterator::next`] from
    /// the node and returns it. Iteration continues with the child that
    /// followed it.
    ///
    /// Returns `None` if `next` has not returned anything yet, or if that
    /// child has already been removed.
    pub fn remove(&mut self) -> Option<Tree<V>> {
        let index = self.last.take()?;

        let mut node = self.parent.inner.write();
        if index >= node.children.len() {
            return None;
        }
        self.next = index;

        Some(node.children.remove(index))
    }
}

impl<V> Iterator for Children<V> {
    type Item = Tree<V>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.parent.inner.read_recursive();
        let child = node.children.get(self.next)?.clone();
        self.last = Some(self.next);
        self.next += 1;

        Some(child)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self
            .parent
            .number_of_children()
            .saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use crate::Tree;

    fn setup_tree() -> (Tree<&'static str>, Tree<&'static str>, Tree<&'static str>) {
        let b = Tree::new("B");
        let c = Tree::new("C");
        let a = Tree::with_children("A", [b.clone(), c.clone()]);
        (a, b, c)
    }

    #[test]
    fn iterates_in_order() {
        let (a, b, c) = setup_tree();

        let mut iter = a.children();
        assert!(iter.next().is_some_and(|n| n.ptr_eq(&b)));
        assert!(iter.next().is_some_and(|n| n.ptr_eq(&c)));
        assert!(iter.next().is_none());
        assert!(iter.next().is_none());
    }

    #[test]
    fn restarts_on_each_call() {
        let (a, _, _) = setup_tree();

        assert_eq!(a.children().count(), 2);
        assert_eq!(a.children().count(), 2);
        assert_eq!(Tree::new("leaf").children().count(), 0);
    }

    #[test]
    fn removes_last_returned() -> Result<(), Box<dyn Error>> {
        let (a, _, c) = setup_tree();

        let mut iter = a.children();
        iter.next();
        assert!(iter.remove().is_some_and(|n| *n.value() == "B"));

        assert_eq!(a.number_of_children(), 1);
        assert!(a.child(0)?.ptr_eq(&c));

        // iteration carries on with the child after the removed one
        assert!(iter.next().is_some_and(|n| n.ptr_eq(&c)));
        assert!(iter.next().is_none());

        Ok(())
    }

    #[test]
    fn remove_needs_a_returned_child() {
        let (a, _, _) = setup_tree();

        let mut iter = a.children();
        assert!(iter.remove().is_none());

        iter.next();
        assert!(iter.remove().is_some());
        assert!(iter.remove().is_none());
        assert_eq!(a.number_of_children(), 1);
    }

    #[test]
    fn filters_while_iterating() -> Result<(), Box<dyn Error>> {
        let root = Tree::with_children(
            0,
            [1, 2, 3, 4, 5, 6].into_iter().map(Tree::new).collect::<Vec<_>>(),
        );

        let mut iter = root.children();
        while let Some(child) = iter.next() {
            if *child.value() % 2 == 0 {
                iter.remove();
            }
        }

        let values = root.children().map(|n| *n.value()).collect::<Vec<_>>();
        assert_eq!(values, vec![1, 3, 5]);

        Ok(())
    }

    #[test]
    fn removing_the_last_child_ends_iteration() {
        let (a, _, _) = setup_tree();

        let mut iter = a.children();
        iter.next();
        iter.next();
        iter.remove();
        assert!(iter.next().is_none());
        assert_eq!(a.number_of_children(), 1);
    }

    #[test]
    fn size_hint_tracks_position() {
        let (a, _, _) = setup_tree();

        let mut iter = a.children();
        assert_eq!(iter.size_hint(), (2, Some(2)));
        iter.next();
        assert_eq!(iter.size_hint(), (1, Some(1)));
        iter.remove();
        assert_eq!(iter.size_hint(), (1, Some(1)));
    }
}
