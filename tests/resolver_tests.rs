mod common;

use common::table;
use xmlrecords::resolver::Resolver;
use xmlrecords::types::ResolvedLabel;
use xmlrecords::xml_path::XmlPath;
use xmlrecords::MappingTable;

fn resolved(label: &str, header: Option<&str>, header_changed: bool) -> ResolvedLabel {
    ResolvedLabel {
        label: label.to_string(),
        header: header.map(str::to_string),
        header_changed,
    }
}

#[test]
fn unmapped_path_falls_back_to_trimmed_leaf() {
    let table = MappingTable::empty();
    let mut resolver = Resolver::new(&table);

    let path = XmlPath::from_segments(["a", " b "]);
    assert_eq!(resolver.resolve(&path), resolved("b", None, false));
}

#[test]
fn mapped_label_and_changed_header() {
    let table = table(&[("a->b", "x->y->b", "Name")]);
    let mut resolver = Resolver::new(&table);

    assert_eq!(
        resolver.resolve(&XmlPath::parse("a->b")),
        resolved("Name", Some("y"), true)
    );
}

#[test]
fn top_level_field_never_gets_a_header() {
    let table = table(&[("a", "x->y->a", "Root")]);
    let mut resolver = Resolver::new(&table);

    assert_eq!(
        resolver.resolve(&XmlPath::parse("a")),
        resolved("Root", None, false)
    );
}

#[test]
fn repeated_path_is_numbered_from_the_second_value() {
    let table = table(&[("a->b", "", "Name")]);
    let mut resolver = Resolver::new(&table);
    let path = XmlPath::parse("a->b");

    let labels: Vec<String> = (0..4).map(|_| resolver.resolve(&path).label).collect();
    assert_eq!(labels, ["Name", "Name 2", "Name 3", "Name 4"]);

    let other = XmlPath::parse("a->c");
    assert_eq!(resolver.resolve(&other).label, "c");
}

#[test]
fn fresh_resolver_starts_counting_again() {
    let table = MappingTable::empty();
    let path = XmlPath::parse("a->b");

    let mut first = Resolver::new(&table);
    first.resolve(&path);
    assert_eq!(first.resolve(&path).label, "b 2");

    let mut second = Resolver::new(&table);
    assert_eq!(second.resolve(&path).label, "b");
}

#[test]
fn header_matching_parent_is_suppressed_at_depth_two() {
    let table = table(&[("a->b", "x->a->b", "B"), ("a->c", "x->q->c", "C")]);
    let mut resolver = Resolver::new(&table);

    assert_eq!(
        resolver.resolve(&XmlPath::parse("a->b")),
        resolved("B", Some("a"), false)
    );
    assert_eq!(
        resolver.resolve(&XmlPath::parse("a->c")),
        resolved("C", Some("q"), true)
    );
}

#[test]
fn header_compares_against_parent_at_depth_three() {
    let table = table(&[
        ("a->g->f", "x->g->f", "F"),
        ("a->g->h", "x->a->h", "H"),
    ]);
    let mut resolver = Resolver::new(&table);

    assert_eq!(
        resolver.resolve(&XmlPath::parse("a->g->f")),
        resolved("F", Some("g"), false)
    );
    // The grandparent does not own the group; only the parent does.
    assert_eq!(
        resolver.resolve(&XmlPath::parse("a->g->h")),
        resolved("H", Some("a"), true)
    );
}

#[test]
fn header_compares_against_parent_at_depth_four() {
    let table = table(&[
        ("a->b->g->f", "x->g->f", "F"),
        ("a->b->g->h", "x->b->h", "H"),
    ]);
    let mut resolver = Resolver::new(&table);

    assert_eq!(
        resolver.resolve(&XmlPath::parse("a->b->g->f")),
        resolved("F", Some("g"), false)
    );
    assert_eq!(
        resolver.resolve(&XmlPath::parse("a->b->g->h")),
        resolved("H", Some("b"), true)
    );
}

#[test]
fn header_comparison_uses_exact_case() {
    let table = table(&[("a->seller->name", "x->Seller->name", "Name")]);
    let mut resolver = Resolver::new(&table);

    assert_eq!(
        resolver.resolve(&XmlPath::parse("a->seller->name")),
        resolved("Name", Some("Seller"), true)
    );
}
