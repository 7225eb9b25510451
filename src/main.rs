use skip_list::skiplist::SkipList;
use std::time::Instant;

fn demonstrate_basic_operations() {
    println!("=== Basic operations ===");

    let mut list = SkipList::new();
    for key in vec![10, 20, 5, 15, 25] {
        list.insert(key);
    }

    println!("list size: {}", list.len());
    print!("elements:");
    for value in &list {
        print!(" {}", value);
    }
    println!();

    if let Some(value) = list.find(&15).get() {
        println!("found element: {}", value);
    }

    match list.lower_bound(&12).get() {
        Some(value) => println!("lower_bound(12): {}", value),
        None => println!("lower_bound(12): end"),
    }
    match list.upper_bound(&12).get() {
        Some(value) => println!("upper_bound(12): {}", value),
        None => println!("upper_bound(12): end"),
    }
}

fn demonstrate_custom_comparator() {
    println!("\n=== Custom comparator ===");

    let mut list = SkipList::with_comparator(|lhs: &u32, rhs: &u32| rhs.cmp(lhs));
    for key in vec![10, 20, 5, 15] {
        list.insert(key);
    }

    print!("descending order:");
    for value in &list {
        print!(" {}", value);
    }
    println!();
}

fn demonstrate_string_keys() {
    println!("\n=== String keys ===");

    let mut list = SkipList::new();
    for word in vec!["pear", "apple", "orange", "banana"] {
        list.insert(String::from(word));
    }

    print!("alphabetical order:");
    for word in &list {
        print!(" {}", word);
    }
    println!();
}

fn demonstrate_cursors() {
    println!("\n=== Cursors ===");

    let list = (1..=10).collect::<SkipList<u32>>();

    print!("forward traversal:");
    let mut cursor = list.begin();
    while let Some(value) = cursor.get() {
        print!(" {}", value);
        cursor.advance();
    }
    println!();

    println!("end dereference: {:?}", list.end().value());
}

fn demonstrate_performance() {
    println!("\n=== Performance ===");

    let num_elements = 10_000;
    let mut list = SkipList::new();

    let start = Instant::now();
    for key in 0..num_elements {
        list.insert(key);
    }
    println!("inserting {} elements: {:?}", num_elements, start.elapsed());

    let start = Instant::now();
    for key in (0..num_elements).step_by(100) {
        list.find(&key);
    }
    println!(
        "searching {} elements: {:?}",
        num_elements / 100,
        start.elapsed()
    );
}

fn main() {
    demonstrate_basic_operations();
    demonstrate_custom_comparator();
    demonstrate_string_keys();
    demonstrate_cursors();
    demonstrate_performance();
}
