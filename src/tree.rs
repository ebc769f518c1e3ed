use std::{borrow::Borrow, collections::HashSet, fmt, sync::Arc};

use parking_lot::{
    MappedRwLockReadGuard, MappedRwLockWriteGuard, RwLock, RwLockReadGuard, RwLockWriteGuard,
};

use crate::{iter::Children, node::NodeId, Result, TreeError};

pub(crate) struct TreeNode<V> {
    pub value: V,
    pub children: Vec<Tree<V>>,
}

// Unlinks descendants iteratively so dropping a deep chain does not recurse
// once per level.
impl<V> Drop for TreeNode<V> {
    fn drop(&mut self) {
        let mut stack = std::mem::take(&mut self.children);
        while let Some(child) = stack.pop() {
            if let Some(lock) = Arc::into_inner(child.inner) {
                stack.append(&mut lock.into_inner().children);
            }
        }
    }
}

/// A shared handle to a node of a mutable N-ary tree.
///
/// Cloning a `Tree` does not copy the node; it produces another reference to
/// the same node. That is how a subtree gets shared between several parents:
/// add the same handle (or a clone of it) as a child of each of them. Changes
/// made to a shared node are visible through every parent that holds it.
///
/// Child links only ever point downwards and every structural mutation checks
/// that it would not make a node reachable from itself, so the nodes always
/// form a directed acyclic graph.
///
/// ```
/// use shared_tree::Tree;
///
/// let root = Tree::with_children("A", [Tree::new("B"), Tree::new("C")]);
/// root.child(0)?.add_child(&Tree::new("D"))?;
///
/// assert_eq!(root.to_string(), "A\n  B\n    D\n  C\n");
/// # Ok::<(), shared_tree::TreeError>(())
/// ```
pub struct Tree<V> {
    id: NodeId,
    pub(crate) inner: Arc<RwLock<TreeNode<V>>>,
}

impl<V> Clone for Tree<V> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            inner: self.inner.clone(),
        }
    }
}

impl<V> Tree<V> {
    /// Creates a leaf node holding `value`.
    pub fn new(value: V) -> Self {
        Self::with_children(value, Vec::new())
    }

    /// Creates a node holding `value` whose children are the given nodes, in
    /// order. The children are shared, not copied.
    ///
    /// No cycle check is performed here; a freshly created node cannot be
    /// reachable from any of its children.
    pub fn with_children(value: V, children: impl IntoIterator<Item = Tree<V>>) -> Self {
        Self {
            id: NodeId::new(),
            inner: Arc::new(RwLock::new(TreeNode {
                value,
                children: children.into_iter().collect(),
            })),
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Returns true if both handles refer to the very same node.
    pub fn ptr_eq(&self, other: &Tree<V>) -> bool {
        self.id == other.id
    }

    /// Borrows the node's value.
    ///
    /// The returned guard keeps the node read-locked; drop it before mutating
    /// this node through any handle. Rendering or comparing an ancestor also
    /// locks this node, so the guard must not be held across that either.
    pub fn value(&self) -> MappedRwLockReadGuard<'_, V> {
        RwLockReadGuard::map(self.inner.read_recursive(), |node| &node.value)
    }

    /// Mutably borrows the node's value.
    ///
    /// The returned guard keeps the node write-locked; drop it before touching
    /// this node through any other handle, including rendering, comparing or
    /// cycle-checking an ancestor.
    pub fn value_mut(&self) -> MappedRwLockWriteGuard<'_, V> {
        RwLockWriteGuard::map(self.inner.write(), |node| &mut node.value)
    }

    /// Replaces the node's value, returning the previous one.
    pub fn set_value(&self, value: V) -> V {
        std::mem::replace(&mut self.inner.write().value, value)
    }

    pub fn first_child(&self) -> Option<Tree<V>> {
        self.inner.read_recursive().children.first().cloned()
    }

    pub fn last_child(&self) -> Option<Tree<V>> {
        self.inner.read_recursive().children.last().cloned()
    }

    /// The number of direct children of this node.
    pub fn number_of_children(&self) -> usize {
        self.inner.read_recursive().children.len()
    }

    pub fn is_leaf(&self) -> bool {
        self.number_of_children() == 0
    }

    /// Returns the child at `index`.
    pub fn child(&self, index: usize) -> Result<Tree<V>> {
        let node = self.inner.read_recursive();
        node.children
            .get(index)
            .cloned()
            .ok_or(TreeError::IndexOutOfRange {
                index,
                len: node.children.len(),
            })
    }

    /// Returns a cursor over the direct children of this node, in order.
    ///
    /// Each call starts a new iteration. See [`Children::remove`] for removing
    /// children while iterating.
    pub fn children(&self) -> Children<V> {
        Children::new(self.clone())
    }

    /// Appends `child` to the end of this node's children.
    ///
    /// Fails with [`TreeError::Cycle`] if this node is reachable from `child`
    /// (including `child` being this node); the children are left untouched.
    pub fn add_child(&self, child: &Tree<V>) -> Result<()> {
        self.check_acyclic(child)?;
        self.inner.write().children.push(child.clone());
        Ok(())
    }

    /// Inserts `child` at `index`, shifting later children to the right.
    /// `index` may equal the number of children, which appends.
    ///
    /// Fails with [`TreeError::Cycle`] under the same condition as
    /// [`Tree::add_child`], or with [`TreeError::IndexOutOfRange`] if `index`
    /// is past the end. Nothing is inserted on failure.
    pub fn insert_child(&self, index: usize, child: &Tree<V>) -> Result<()> {
        self.check_acyclic(child)?;

        let mut node = self.inner.write();
        if index > node.children.len() {
            return Err(TreeError::IndexOutOfRange {
                index,
                len: node.children.len(),
            });
        }
        node.children.insert(index, child.clone());

        Ok(())
    }

    /// Appends each of `children` in order.
    ///
    /// Children are checked and appended one at a time. On the first one that
    /// would create a cycle the call stops with [`TreeError::Cycle`]; children
    /// appended before it stay appended, later ones are never looked at.
    pub fn add_children<I>(&self, children: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: Borrow<Tree<V>>,
    {
        for child in children {
            self.add_child(child.borrow())?;
        }

        Ok(())
    }

    /// Removes and returns the child at `index`, shifting later children to
    /// the left.
    pub fn remove_child(&self, index: usize) -> Result<Tree<V>> {
        let mut node = self.inner.write();
        if index >= node.children.len() {
            return Err(TreeError::IndexOutOfRange {
                index,
                len: node.children.len(),
            });
        }

        Ok(node.children.remove(index))
    }

    fn check_acyclic(&self, child: &Tree<V>) -> Result<()> {
        if child.reaches(self.id) {
            return Err(TreeError::Cycle(child.id, self.id));
        }

        Ok(())
    }

    /// Depth-first search for `target` among this node and its descendants,
    /// by identity. Shared subtrees are only walked once.
    fn reaches(&self, target: NodeId) -> bool {
        let mut visited = HashSet::new();
        let mut stack = vec![self.clone()];

        while let Some(node) = stack.pop() {
            if node.id == target {
                return true;
            }
            if !visited.insert(node.id) {
                continue;
            }
            stack.extend(node.inner.read_recursive().children.iter().rev().cloned());
        }

        false
    }
}

impl<V: fmt::Display> Tree<V> {
    fn render(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        let node = self.inner.read_recursive();
        writeln!(f, "{:indent$}{}", "", node.value, indent = depth * 2)?;
        for child in node.children.iter() {
            child.render(f, depth + 1)?;
        }

        Ok(())
    }
}

impl<V> From<V> for Tree<V> {
    fn from(value: V) -> Self {
        Self::new(value)
    }
}

impl<V: Default> Default for Tree<V> {
    fn default() -> Self {
        Self::new(V::default())
    }
}

/// Structural equality: equal values and pairwise equal children, in order.
/// Whether children are shared or merely equal does not matter.
impl<V: PartialEq> PartialEq for Tree<V> {
    fn eq(&self, other: &Self) -> bool {
        if self.ptr_eq(other) {
            return true;
        }

        let this = self.inner.read_recursive();
        let that = other.inner.read_recursive();

        this.value == that.value
            && this.children.len() == that.children.len()
            && this
                .children
                .iter()
                .zip(that.children.iter())
                .all(|(a, b)| a == b)
    }
}

impl<V: Eq> Eq for Tree<V> {}

/// Renders the value, then each child on its own lines indented two spaces
/// per level, depth first.
impl<V: fmt::Display> fmt::Display for Tree<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.render(f, 0)
    }
}

impl<V: fmt::Debug> fmt::Debug for Tree<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let node = self.inner.read_recursive();
        f.debug_struct("Tree")
            .field("id", &self.id)
            .field("value", &node.value)
            .field("children", &node.children.len())
            .finish()
    }
}
