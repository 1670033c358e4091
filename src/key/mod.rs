//! Key Codec Module
//!
//! Maps (namespace, element key) pairs onto physical store keys.
//!
//! ## Responsibilities
//! - Reject empty element keys before any store call
//! - Prefix every key with a reserved object type so collection keys never
//!   collide with keys written outside this layer
//! - Record the namespace arity as the first segment, so a nested namespace
//!   never shares a range prefix with its parent
//! - Delegate the byte-level encoding to the store, which owns the canonical
//!   composite-key rule its range scans understand
//!
//! ## Key Layout
//! ```text
//! \0 <tag> \0 <n> \0 <ns_1> \0 ... <ns_n> \0 <key_1> \0 ... <key_m> \0
//! ```

mod composite;

pub use composite::{
    create_composite_key, range_end, split_composite_key, CompositeKeyError, DELIMITER, MAX_RUNE,
};

use crate::config::DEFAULT_OBJECT_TYPE;
use crate::error::{describe_key, CollectionError, Result};
use crate::store::KeyValueStore;

/// Composes and splits composite keys under one reserved object type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyCodec {
    object_type: String,
}

impl KeyCodec {
    pub fn new(object_type: impl Into<String>) -> Self {
        Self {
            object_type: object_type.into(),
        }
    }

    /// The reserved object type
    pub fn tag(&self) -> &str {
        &self.object_type
    }

    /// Build the store key for `element_key` inside `namespace`
    pub fn compose<S, K>(&self, store: &S, namespace: &[String], element_key: &[K]) -> Result<String>
    where
        S: KeyValueStore + ?Sized,
        K: AsRef<str>,
    {
        if element_key.is_empty() {
            return Err(CollectionError::InvalidKey(
                "element key can not be empty".to_string(),
            ));
        }

        let arity = namespace.len().to_string();
        let segments: Vec<&str> = std::iter::once(arity.as_str())
            .chain(namespace.iter().map(String::as_str))
            .chain(element_key.iter().map(AsRef::as_ref))
            .collect();

        store
            .compose_key(&self.object_type, &segments)
            .map_err(|e| CollectionError::store("compose-key", describe_key(element_key), e))
    }

    /// Open a cursor over every key stored under `namespace`
    pub fn open_range<S>(&self, store: &S, namespace: &[String]) -> Result<S::Cursor>
    where
        S: KeyValueStore + ?Sized,
    {
        let arity = namespace.len().to_string();
        let prefix: Vec<&str> = std::iter::once(arity.as_str())
            .chain(namespace.iter().map(String::as_str))
            .collect();
        store
            .open_range_by_prefix(&self.object_type, &prefix)
            .map_err(|e| CollectionError::store("range-open", describe_key(namespace), e))
    }

    /// Recover the element key from a composite key found under `namespace`
    pub fn element_key<S>(&self, store: &S, namespace: &[String], key: &str) -> Result<Vec<String>>
    where
        S: KeyValueStore + ?Sized,
    {
        let (object_type, mut segments) = store
            .split_key(key)
            .map_err(|e| CollectionError::store("split-key", format!("{:?}", key), e))?;

        let header = namespace.len() + 1;
        let in_namespace = object_type == self.object_type
            && segments.len() > header
            && segments[0] == namespace.len().to_string()
            && segments[1..header] == *namespace;
        if !in_namespace {
            return Err(CollectionError::InvalidKey(format!(
                "key {:?} is not an element of {}",
                key,
                describe_key(namespace)
            )));
        }

        Ok(segments.split_off(header))
    }
}

impl Default for KeyCodec {
    fn default() -> Self {
        Self::new(DEFAULT_OBJECT_TYPE)
    }
}
