//! In-memory store
//!
//! BTreeMap-based store with RwLock for concurrency. Stands in for a host
//! ledger in tests, benchmarks and embedded use.

use std::collections::{BTreeMap, VecDeque};
use std::ops::Bound;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use thiserror::Error;

use crate::key::{create_composite_key, range_end, split_composite_key, CompositeKeyError};

use super::{KeyValueStore, StateCursor};

/// Errors raised by [`MemoryStore`] and its cursors
#[derive(Debug, Error)]
pub enum MemoryStoreError {
    #[error("invalid composite key: {0}")]
    Key(#[from] CompositeKeyError),

    #[error("cursor exhausted")]
    CursorExhausted,

    #[error("cursor closed")]
    CursorClosed,
}

/// Ordered in-memory key-value store
///
/// ## Concurrency:
/// - `data`: Protected by RwLock (many concurrent readers, exclusive writer)
/// - Counters are atomic and lock-free
/// - All methods use `&self`
#[derive(Default)]
pub struct MemoryStore {
    data: RwLock<BTreeMap<String, Vec<u8>>>,

    /// Cursors opened and not yet closed (shared with each cursor)
    open_cursors: Arc<AtomicUsize>,

    /// Number of successful puts and deletes
    writes: AtomicU64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys
    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.read().is_empty()
    }

    /// Snapshot of every stored key, in order
    pub fn keys(&self) -> Vec<String> {
        self.data.read().keys().cloned().collect()
    }

    /// Cursors that were opened and never closed
    pub fn open_cursors(&self) -> usize {
        self.open_cursors.load(Ordering::Acquire)
    }

    /// Total puts and deletes applied
    pub fn write_count(&self) -> u64 {
        self.writes.load(Ordering::Relaxed)
    }
}

impl KeyValueStore for MemoryStore {
    type Error = MemoryStoreError;
    type Cursor = MemoryCursor;

    fn compose_key(&self, object_type: &str, segments: &[&str]) -> Result<String, Self::Error> {
        Ok(create_composite_key(object_type, segments)?)
    }

    fn split_key(&self, key: &str) -> Result<(String, Vec<String>), Self::Error> {
        Ok(split_composite_key(key)?)
    }

    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, Self::Error> {
        Ok(self.data.read().get(key).cloned())
    }

    fn put(&self, key: &str, value: &[u8]) -> Result<(), Self::Error> {
        self.data.write().insert(key.to_string(), value.to_vec());
        self.writes.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), Self::Error> {
        self.data.write().remove(key);
        self.writes.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    fn open_range_by_prefix(
        &self,
        object_type: &str,
        prefix: &[&str],
    ) -> Result<Self::Cursor, Self::Error> {
        let start = create_composite_key(object_type, prefix)?;
        let end = range_end(&start);

        // Snapshot the range so the read lock is not held across cursor use
        let entries: VecDeque<(String, Vec<u8>)> = self
            .data
            .read()
            .range::<str, _>((Bound::Included(start.as_str()), Bound::Excluded(end.as_str())))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        self.open_cursors.fetch_add(1, Ordering::AcqRel);
        Ok(MemoryCursor {
            entries,
            closed: false,
            open_cursors: Arc::clone(&self.open_cursors),
        })
    }
}

/// Cursor over a snapshot of a [`MemoryStore`] range
pub struct MemoryCursor {
    entries: VecDeque<(String, Vec<u8>)>,
    closed: bool,
    open_cursors: Arc<AtomicUsize>,
}

impl MemoryCursor {
    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

impl StateCursor for MemoryCursor {
    type Error = MemoryStoreError;

    fn has_next(&self) -> bool {
        !self.closed && !self.entries.is_empty()
    }

    fn next(&mut self) -> Result<(String, Vec<u8>), Self::Error> {
        if self.closed {
            return Err(MemoryStoreError::CursorClosed);
        }
        self.entries.pop_front().ok_or(MemoryStoreError::CursorExhausted)
    }

    fn close(&mut self) -> Result<(), Self::Error> {
        if !self.closed {
            self.closed = true;
            self.entries.clear();
            self.open_cursors.fetch_sub(1, Ordering::AcqRel);
        }
        Ok(())
    }
}
