//! Snapshot tests for path construction

use propwatch_object::{PropertyKey, Symbol, WellKnownSymbol};
use propwatch_path::{build_path, child_prefix, is_index_like};

#[test]
fn test_root_key() {
    propwatch_testhelpers::setup();

    insta::assert_snapshot!(build_path("", &"foo".into(), true), @"foo");
}

#[test]
fn test_nested_key() {
    propwatch_testhelpers::setup();

    let prefix = child_prefix(&build_path("", &"foo".into(), true));
    let path = build_path(&prefix, &"bar".into(), true);
    insta::assert_snapshot!(path, @"foo.bar");
    insta::assert_snapshot!(child_prefix(&path), @"foo.bar.");
}

#[test]
fn test_compact_index_drops_separator() {
    propwatch_testhelpers::setup();

    insta::assert_snapshot!(build_path("list.", &PropertyKey::from(0usize), true), @"list[]");
    insta::assert_snapshot!(build_path("list.", &PropertyKey::from(2usize), true), @"list[]");
}

#[test]
fn test_literal_index() {
    propwatch_testhelpers::setup();

    insta::assert_snapshot!(build_path("list.", &PropertyKey::from(2usize), false), @"list[2]");
    insta::assert_snapshot!(build_path("grid[1].", &"3".into(), false), @"grid[1][3]");
    insta::assert_snapshot!(build_path("list.", &"1.5".into(), false), @"list[1.5]");
}

#[test]
fn test_index_at_root() {
    propwatch_testhelpers::setup();

    insta::assert_snapshot!(build_path("", &PropertyKey::from(0usize), true), @"[]");
    insta::assert_snapshot!(build_path("", &PropertyKey::from(0usize), false), @"[0]");
}

#[test]
fn test_index_after_index() {
    propwatch_testhelpers::setup();

    let outer = build_path("matrix.", &PropertyKey::from(1usize), true);
    let inner = build_path(&child_prefix(&outer), &PropertyKey::from(4usize), true);
    insta::assert_snapshot!(inner, @"matrix[][]");
}

#[test]
fn test_symbol_key() {
    propwatch_testhelpers::setup();

    let key = PropertyKey::from(WellKnownSymbol::ToStringTag);
    insta::assert_snapshot!(build_path("foo.", &key, true), @"foo.Symbol(Symbol.toStringTag)");

    let key = PropertyKey::from(Symbol::new(Some("secret")));
    insta::assert_snapshot!(build_path("", &key, true), @"Symbol(secret)");
    assert!(!is_index_like(&key));
}

#[test]
fn test_non_numeric_keys_keep_separator() {
    propwatch_testhelpers::setup();

    insta::assert_snapshot!(build_path("list.", &"length".into(), true), @"list.length");
    insta::assert_snapshot!(build_path("list.", &"12abc".into(), true), @"list.12abc");
    insta::assert_snapshot!(build_path("list.", &"Infinity".into(), true), @"list.Infinity");
}

#[test]
fn test_dotted_key_is_not_escaped() {
    propwatch_testhelpers::setup();

    let nested = build_path(&child_prefix("a"), &"b".into(), true);
    let flat = build_path("", &"a.b".into(), true);
    assert_eq!(nested, flat);
}

#[test]
fn test_name_and_index_stay_distinct() {
    propwatch_testhelpers::setup();

    let by_name = build_path("list.", &"first".into(), true);
    let by_index = build_path("list.", &PropertyKey::from(0usize), true);
    assert_ne!(by_name, by_index);
}
