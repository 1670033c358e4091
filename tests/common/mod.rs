//! Shared fixtures for integration tests

#![allow(dead_code)]

use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};

use colite::key::{create_composite_key, split_composite_key};
use colite::{KeyValueStore, MemoryStore, Record, StateCursor};
use serde::{Deserialize, Serialize};

// =============================================================================
// Logging
// =============================================================================

/// Route `tracing` output through the test harness (RUST_LOG=colite=trace)
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

// =============================================================================
// Records
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Data {
    pub name: String,
    pub age: i32,
}

impl Data {
    pub fn new(name: &str, age: i32) -> Self {
        Self {
            name: name.to_string(),
            age,
        }
    }
}

impl Record for Data {}

// =============================================================================
// Stores
// =============================================================================

/// A MemoryStore pre-loaded with `(segments, value)` pairs under `tag`
pub fn seeded_store(tag: &str, entries: &[(&[&str], &[u8])]) -> MemoryStore {
    let store = MemoryStore::new();
    for (segments, value) in entries {
        let key = create_composite_key(tag, *segments).unwrap();
        store.put(&key, value).unwrap();
    }
    store
}

/// Which store call a [`FailingStore`] should fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailOn {
    Get,
    Put,
    Delete,
    OpenRange,
    Next,
    Close,
}

/// Store whose chosen operation always fails with an I/O error
pub struct FailingStore {
    pub fail_on: FailOn,
    pub entries: Vec<(String, Vec<u8>)>,
    pub calls: AtomicUsize,
}

impl FailingStore {
    pub fn new(fail_on: FailOn) -> Self {
        Self {
            fail_on,
            entries: Vec::new(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_entry(mut self, tag: &str, segments: &[&str], value: &[u8]) -> Self {
        let key = create_composite_key(tag, segments).unwrap();
        self.entries.push((key, value.to_vec()));
        self
    }

    fn check(&self, op: FailOn) -> io::Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_on == op {
            Err(io::Error::new(io::ErrorKind::Other, format!("{:?} failed", op)))
        } else {
            Ok(())
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

pub struct FailingCursor {
    entries: Vec<(String, Vec<u8>)>,
    fail_on: FailOn,
}

impl StateCursor for FailingCursor {
    type Error = io::Error;

    fn has_next(&self) -> bool {
        !self.entries.is_empty()
    }

    fn next(&mut self) -> Result<(String, Vec<u8>), Self::Error> {
        if self.fail_on == FailOn::Next {
            return Err(io::Error::new(io::ErrorKind::Other, "Next failed"));
        }
        if self.entries.is_empty() {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "no more items"));
        }
        Ok(self.entries.remove(0))
    }

    fn close(&mut self) -> Result<(), Self::Error> {
        if self.fail_on == FailOn::Close {
            return Err(io::Error::new(io::ErrorKind::Other, "Close failed"));
        }
        Ok(())
    }
}

impl KeyValueStore for FailingStore {
    type Error = io::Error;
    type Cursor = FailingCursor;

    fn compose_key(&self, object_type: &str, segments: &[&str]) -> Result<String, Self::Error> {
        create_composite_key(object_type, segments)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))
    }

    fn split_key(&self, key: &str) -> Result<(String, Vec<String>), Self::Error> {
        split_composite_key(key).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, Self::Error> {
        self.check(FailOn::Get)?;
        Ok(self
            .entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone()))
    }

    fn put(&self, _key: &str, _value: &[u8]) -> Result<(), Self::Error> {
        self.check(FailOn::Put)
    }

    fn delete(&self, _key: &str) -> Result<(), Self::Error> {
        self.check(FailOn::Delete)
    }

    fn open_range_by_prefix(
        &self,
        object_type: &str,
        prefix: &[&str],
    ) -> Result<Self::Cursor, Self::Error> {
        self.check(FailOn::OpenRange)?;
        let start = self.compose_key(object_type, prefix)?;
        Ok(FailingCursor {
            entries: self
                .entries
                .iter()
                .filter(|(k, _)| k.starts_with(&start))
                .cloned()
                .collect(),
            fail_on: self.fail_on,
        })
    }
}
