//! Tests for KeyCodec
//!
//! These tests verify:
//! - Composite keys are deterministic and tag-prefixed
//! - Nested namespaces never share keys with their parent
//! - Empty element keys are rejected
//! - Element keys are recovered from composite keys

use colite::key::{create_composite_key, split_composite_key, KeyCodec};
use colite::{CollectionError, MemoryStore};

fn ns(segments: &[&str]) -> Vec<String> {
    segments.iter().map(|s| s.to_string()).collect()
}

// =============================================================================
// Compose Tests
// =============================================================================

#[test]
fn test_default_tag() {
    assert_eq!(KeyCodec::default().tag(), "_COLITE");
}

#[test]
fn test_compose_matches_store_encoding() {
    let store = MemoryStore::new();
    let codec = KeyCodec::default();

    let key = codec.compose(&store, &ns(&["data"]), &["k"]).unwrap();

    assert_eq!(key, create_composite_key("_COLITE", &["1", "data", "k"]).unwrap());
}

#[test]
fn test_compose_separates_nested_namespaces() {
    let store = MemoryStore::new();
    let codec = KeyCodec::default();

    let nested = codec.compose(&store, &ns(&["a", "x"]), &["k"]).unwrap();
    let outer = codec.compose(&store, &ns(&["a"]), &["x", "k"]).unwrap();

    assert_ne!(nested, outer);
    assert_eq!(split_composite_key(&nested).unwrap().1, vec!["2", "a", "x", "k"]);
    assert_eq!(split_composite_key(&outer).unwrap().1, vec!["1", "a", "x", "k"]);
}

#[test]
fn test_compose_is_deterministic() {
    let store = MemoryStore::new();
    let codec = KeyCodec::new("_T");

    let first = codec.compose(&store, &ns(&["a", "b"]), &["x", "y"]).unwrap();
    let second = codec.compose(&store, &ns(&["a", "b"]), &["x", "y"]).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_compose_distinguishes_tag_namespace_and_key() {
    let store = MemoryStore::new();
    let base = KeyCodec::new("_T").compose(&store, &ns(&["n"]), &["k"]).unwrap();

    let other_tag = KeyCodec::new("_U").compose(&store, &ns(&["n"]), &["k"]).unwrap();
    let other_ns = KeyCodec::new("_T").compose(&store, &ns(&["m"]), &["k"]).unwrap();
    let other_key = KeyCodec::new("_T").compose(&store, &ns(&["n"]), &["j"]).unwrap();

    assert_ne!(base, other_tag);
    assert_ne!(base, other_ns);
    assert_ne!(base, other_key);
}

#[test]
fn test_compose_rejects_empty_element_key() {
    let store = MemoryStore::new();
    let empty: [&str; 0] = [];

    let err = KeyCodec::default().compose(&store, &ns(&["data"]), &empty).unwrap_err();

    assert!(matches!(err, CollectionError::InvalidKey(_)));
}

#[test]
fn test_compose_reports_reserved_characters() {
    let store = MemoryStore::new();

    let err = KeyCodec::default()
        .compose(&store, &ns(&["data"]), &["a\u{0}b"])
        .unwrap_err();

    assert!(err.is_store());
}

// =============================================================================
// Element Key Tests
// =============================================================================

#[test]
fn test_element_key_strips_namespace() {
    let store = MemoryStore::new();
    let codec = KeyCodec::default();
    let namespace = ns(&["orders", "eu"]);

    let key = codec.compose(&store, &namespace, &["2024", "7"]).unwrap();

    assert_eq!(
        codec.element_key(&store, &namespace, &key).unwrap(),
        vec!["2024".to_string(), "7".to_string()]
    );
}

#[test]
fn test_element_key_rejects_foreign_keys() {
    let store = MemoryStore::new();
    let codec = KeyCodec::default();

    let foreign_tag = create_composite_key("_OTHER", &["1", "data", "k"]).unwrap();
    let foreign_ns = create_composite_key("_COLITE", &["1", "other", "k"]).unwrap();
    let namespace_only = create_composite_key("_COLITE", &["1", "data"]).unwrap();
    let nested = create_composite_key("_COLITE", &["2", "data", "x", "k"]).unwrap();
    let no_arity = create_composite_key("_COLITE", &["data", "k"]).unwrap();

    for key in [foreign_tag, foreign_ns, namespace_only, nested, no_arity] {
        let err = codec.element_key(&store, &ns(&["data"]), &key).unwrap_err();
        assert!(err.is_invalid_key(), "{:?} accepted", key);
    }
}

#[test]
fn test_element_key_rejects_plain_key() {
    let store = MemoryStore::new();
    let err = KeyCodec::default()
        .element_key(&store, &ns(&["data"]), "plain")
        .unwrap_err();
    assert!(err.is_store());
}

#[test]
fn test_split_round_trip_through_public_helpers() {
    let key = create_composite_key("_COLITE", &["data", "k"]).unwrap();
    let (tag, segments) = split_composite_key(&key).unwrap();
    assert_eq!(tag, "_COLITE");
    assert_eq!(segments, vec!["data", "k"]);
}
