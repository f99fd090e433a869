//! Integration tests for ancestor materialization and arrival order.
//!
//! The record stream must list every forwarded folder before anything it
//! contains, forward each folder once, and reach the same set of forwarded
//! paths whatever order the enumerator reports items in.

use filters::{
    AncestorMaterializer, EnumeratedItem, FilterOptions, FilterPass, FilterRecord, FilterSet,
    OperationKind, RelativePath,
};
use proptest::prelude::*;
use std::collections::{BTreeSet, HashSet};
use std::time::SystemTime;

fn sample_items() -> Vec<EnumeratedItem> {
    let now = SystemTime::UNIX_EPOCH;
    vec![
        EnumeratedItem::folder("", now),
        EnumeratedItem::folder("a", now),
        EnumeratedItem::folder("a/b", now),
        EnumeratedItem::file("a/b/keep.txt", now, 1),
        EnumeratedItem::file("a/b/drop.bin", now, 1),
        EnumeratedItem::folder("a/c", now),
        EnumeratedItem::file("a/c/drop.bin", now, 1),
        EnumeratedItem::file("top.txt", now, 1),
        EnumeratedItem::file("x/y/z/deep.txt", now, 1),
    ]
}

fn txt_only() -> FilterSet {
    FilterSet::from_options(
        &FilterOptions::new(OperationKind::Copy)
            .recursive(true)
            .include_pattern("*.txt"),
    )
    .expect("filters compile")
}

fn collect(items: Vec<EnumeratedItem>) -> Vec<FilterRecord> {
    let mut records = Vec::new();
    FilterPass::new(txt_only())
        .run(items, |record| records.push(record))
        .expect("pass completes");
    records
}

fn assert_parents_first(records: &[FilterRecord]) {
    let mut seen: HashSet<RelativePath> = HashSet::new();
    for record in records.iter().filter(|r| r.is_accepted()) {
        for ancestor in record.path().ancestors() {
            assert!(
                seen.contains(&ancestor),
                "{} arrived before its ancestor {}",
                record.path(),
                ancestor
            );
        }
        assert!(
            seen.insert(record.path().clone()),
            "{} forwarded twice",
            record.path()
        );
    }
}

#[test]
fn forwarded_folders_precede_contents() {
    let records = collect(sample_items());
    assert_parents_first(&records);

    let forwarded: Vec<String> = records
        .iter()
        .filter(|r| r.is_accepted())
        .map(|r| r.path().to_string())
        .collect();
    assert_eq!(
        forwarded,
        ["a", "a/b", "a/b/keep.txt", "top.txt", "x", "x/y", "x/y/z", "x/y/z/deep.txt"]
    );
}

#[test]
fn unreported_ancestors_are_marked_synthesized() {
    let records = collect(sample_items());
    let synthesized: Vec<String> = records
        .iter()
        .filter(|r| r.is_synthesized())
        .map(|r| r.path().to_string())
        .collect();
    assert_eq!(synthesized, ["x", "x/y", "x/y/z"]);
}

#[test]
fn folders_without_accepted_descendants_stay_ignored() {
    let records = collect(sample_items());
    let ignored: BTreeSet<String> = records
        .iter()
        .filter(|r| !r.is_accepted() && r.is_folder())
        .map(|r| r.path().to_string())
        .collect();
    assert_eq!(ignored, BTreeSet::from([String::new(), "a/c".to_owned()]));
}

#[test]
fn materializer_work_stops_at_forwarded_ancestor() {
    let mut materializer = AncestorMaterializer::new();
    let accept = txt_only().decide(&EnumeratedItem::file("a.txt", SystemTime::UNIX_EPOCH, 1));

    let deep = "d1/d2/d3/d4/d5/d6/d7/d8";
    let first = materializer
        .observe(
            &EnumeratedItem::file(format!("{deep}/one.txt").as_str(), SystemTime::UNIX_EPOCH, 1),
            accept,
        )
        .expect("observe");
    let second = materializer
        .observe(
            &EnumeratedItem::file(format!("{deep}/two.txt").as_str(), SystemTime::UNIX_EPOCH, 1),
            accept,
        )
        .expect("observe");

    assert_eq!(first.len(), 9);
    assert_eq!(second.len(), 1);
}

proptest! {
    #[test]
    fn forwarded_set_independent_of_arrival_order(
        shuffled in Just(sample_items()).prop_shuffle()
    ) {
        let baseline: BTreeSet<String> = collect(sample_items())
            .iter()
            .filter(|r| r.is_accepted())
            .map(|r| r.path().to_string())
            .collect();

        let records = collect(shuffled);
        assert_parents_first(&records);
        let forwarded: BTreeSet<String> = records
            .iter()
            .filter(|r| r.is_accepted())
            .map(|r| r.path().to_string())
            .collect();
        prop_assert_eq!(forwarded, baseline);
    }
}
