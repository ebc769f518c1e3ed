use std::error::Error;

use shared_tree::Tree;

fn main() -> Result<(), Box<dyn Error>> {
    let leaf = Tree::new(String::from("leaf"));
    let left = Tree::with_children(String::from("left"), [leaf.clone()]);
    let right = Tree::with_children(String::from("right"), [leaf.clone()]);
    let root = Tree::with_children(String::from("root"), [left.clone(), right.clone()]);
    print!("{}", root);

    println!("Rename the shared leaf");
    leaf.value_mut().push_str(" (shared)");
    print!("{}", root);

    println!("Drop every child of root whose name starts with 'l'");
    let mut children = root.children();
    while let Some(child) = children.next() {
        if child.value().starts_with('l') {
            children.remove();
        }
    }
    print!("{}", root);

    let copy = Tree::with_children(
        String::from("root"),
        [Tree::with_children(
            String::from("right"),
            [Tree::new(String::from("leaf (shared)"))],
        )],
    );
    println!("Equal to an unshared copy: {}", root == copy);

    Ok(())
}
