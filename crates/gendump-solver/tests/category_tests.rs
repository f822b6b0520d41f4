use super::*;
use crate::test_fixtures::MockRegistry;

fn ids(entries: &[FlatEntry]) -> Vec<TypeId> {
    entries.iter().map(|e| e.ty).collect()
}

#[test]
fn test_build_creates_intermediate_categories() {
    let tree = CategoryTree::build([("A/B/C", TypeId(1)), ("A", TypeId(2))]);

    let a = tree.subcategory("A").expect("A exists");
    assert_eq!(a.elements(), &[TypeId(2)]);
    let c = tree.subcategory("A/B/C").expect("A/B/C exists");
    assert_eq!(c.name(), "C");
    assert_eq!(c.elements(), &[TypeId(1)]);
    assert_eq!(tree.subcategory("A/B").unwrap().elements(), &[] as &[TypeId]);
    assert_eq!(tree.len(), 2);
}

#[test]
fn test_subcategory_ignores_empty_segments() {
    let tree = CategoryTree::build([("A/B", TypeId(0))]);
    assert!(tree.subcategory("/A//B/").is_some());
    assert_eq!(tree.subcategory("").map(|n| n.len()), Some(1));
    assert!(tree.subcategory("A/X").is_none());
}

#[test]
fn test_build_keeps_first_placement_of_duplicates() {
    let tree = CategoryTree::build([("A", TypeId(7)), ("B", TypeId(7))]);
    assert_eq!(tree.subcategory("A").unwrap().elements(), &[TypeId(7)]);
    assert!(tree.subcategory("B").is_none());
    assert_eq!(tree.len(), 1);
}

#[test]
fn test_children_keep_first_seen_order() {
    let tree = CategoryTree::build([("Z", TypeId(0)), ("A", TypeId(1)), ("M", TypeId(2))]);
    let names: Vec<&str> = tree.root().subcategories().map(|c| c.name()).collect();
    assert_eq!(names, ["Z", "A", "M"]);
}

#[test]
fn test_flatten_visits_children_before_own_elements() {
    let mut registry = MockRegistry::new();
    let own = registry.closed("Own");
    let deep = registry.closed("Deep");
    let first = registry.open("First");
    let second = registry.closed("Second");

    let tree = CategoryTree::build([
        ("Root", own),
        ("Root/One/Deep", deep),
        ("Root/One", first),
        ("Root/Two", second),
    ]);

    let flat = flatten_category(tree.subcategory("Root"), &[], &registry);
    assert_eq!(ids(&flat), vec![deep, first, second, own]);
    assert_eq!(
        flat.iter().map(|e| e.is_open_generic).collect::<Vec<_>>(),
        vec![false, true, false, false]
    );
}

#[test]
fn test_flatten_reaches_every_type_exactly_once() {
    let mut registry = MockRegistry::new();
    let types: Vec<TypeId> = (0..12).map(|i| registry.closed(&format!("T{i}"))).collect();
    let paths = ["N", "N/A", "N/A/B", "N/C"];
    let tree = CategoryTree::build(
        types
            .iter()
            .enumerate()
            .map(|(i, &ty)| (paths[i % paths.len()], ty)),
    );

    let mut flat = ids(&flatten_category(tree.subcategory("N"), &[], &registry));
    assert_eq!(flat.len(), types.len());
    flat.sort();
    flat.dedup();
    assert_eq!(flat.len(), types.len());
}

#[test]
fn test_flatten_without_root_classifies_whole_catalog() {
    let mut registry = MockRegistry::new();
    let a = registry.closed("A");
    let b = registry.open("B");
    let catalog = [b, a];

    let flat = flatten_category(None, &catalog, &registry);
    assert_eq!(flat, vec![FlatEntry::new(b, true), FlatEntry::new(a, false)]);
}

#[test]
fn test_flatten_empty_node_is_empty() {
    let registry = MockRegistry::new();
    let node = CategoryNode::new("Empty");
    assert!(node.is_empty());
    assert!(flatten_category(Some(&node), &[TypeId(0)], &registry).is_empty());
}
