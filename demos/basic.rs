use std::error::Error;

use shared_tree::Tree;

fn main() -> Result<(), Box<dyn Error>> {
    let b = Tree::new("B");
    let c = Tree::new("C");
    let a = Tree::with_children("A", [b.clone(), c.clone()]);
    print!("{}", a);

    println!("Add D to B, E to C");
    b.add_child(&Tree::new("D"))?;
    c.add_child(&Tree::new("E"))?;
    print!("{}", a);

    println!("Insert F at the front of A");
    a.insert_child(0, &Tree::new("F"))?;
    print!("{}", a);

    println!("Try to add A under C");
    if let Err(err) = c.add_child(&a) {
        println!("Rejected: {}", err);
    }

    println!("Remove child 1 of A");
    let removed = a.remove_child(1)?;
    println!("Removed: {}", *removed.value());
    print!("{}", a);

    println!("Rename A to Root");
    a.set_value("Root");
    print!("{}", a);

    Ok(())
}
