//! Store Module
//!
//! The narrow interface through which collections reach the external
//! key-value state store.
//!
//! ## Responsibilities
//! - Canonical composite-key encoding (the store defines it, since its range
//!   scans must agree with it)
//! - Point reads, upserts and deletes
//! - Prefix range cursors in the store's native key order
//!
//! A store handle represents one unit of work (typically one transaction).
//! Transaction boundaries belong to the host; nothing here begins or commits.

mod memory;

pub use memory::{MemoryCursor, MemoryStore, MemoryStoreError};

/// Handle to an external key-value state store
pub trait KeyValueStore {
    /// Failure raised by the store itself
    type Error: std::error::Error + Send + Sync + 'static;

    /// Cursor returned by prefix range scans
    type Cursor: StateCursor<Error = Self::Error>;

    /// Encode `object_type` and `segments` into a single store key.
    ///
    /// Keys that share the same leading segments must be contiguous in the
    /// store's key order.
    fn compose_key(&self, object_type: &str, segments: &[&str]) -> Result<String, Self::Error>;

    /// Inverse of [`compose_key`](Self::compose_key)
    fn split_key(&self, key: &str) -> Result<(String, Vec<String>), Self::Error>;

    /// Read a value. `Ok(None)` means the key is unset.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, Self::Error>;

    /// Write a value, replacing any previous one
    fn put(&self, key: &str, value: &[u8]) -> Result<(), Self::Error>;

    /// Delete a key. Deleting an unset key succeeds.
    fn delete(&self, key: &str) -> Result<(), Self::Error>;

    /// Open a cursor over every key composed from `object_type` and a
    /// segment list starting with `prefix`
    fn open_range_by_prefix(
        &self,
        object_type: &str,
        prefix: &[&str],
    ) -> Result<Self::Cursor, Self::Error>;
}

/// Forward-only cursor over a store range
pub trait StateCursor {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Whether an unconsumed entry remains
    fn has_next(&self) -> bool;

    /// Advance and return the next (key, value) pair
    fn next(&mut self) -> Result<(String, Vec<u8>), Self::Error>;

    /// Release the cursor
    fn close(&mut self) -> Result<(), Self::Error>;
}
