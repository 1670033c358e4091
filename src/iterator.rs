//! Collection Iterator
//!
//! Lazy, single-pass iteration over every record in one namespace.
//!
//! ## States
//! ```text
//!   Unopened ──has_next/next_*──▶ Open ──close / exhaustion──▶ Closed
//!       │                                                        ▲
//!       └─────────────────────────close──────────────────────────┘
//! ```
//!
//! The store cursor is acquired on first use. When `has_next` reports
//! exhaustion the cursor is released immediately, unless the collection was
//! configured with `close_on_exhaust(false)`. A partially consumed iterator
//! holds its cursor until `close()` or drop.

use std::mem;

use tracing::{debug, warn};

use crate::collection::Collection;
use crate::error::{describe_key, CollectionError, Result};
use crate::marshal::{Marshaller, Record};
use crate::store::{KeyValueStore, StateCursor};

/// Observable lifecycle of a [`CollectionIterator`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IteratorState {
    /// Constructed, no cursor acquired yet
    Unopened,
    /// Cursor acquired
    Open,
    /// Cursor released; terminal
    Closed,
}

/// A stored record together with its element key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Element key segments, without the namespace
    pub key: Vec<String>,
    pub value: Vec<u8>,
}

enum CursorSlot<C> {
    Unopened,
    Open(C),
    Closed,
}

/// Forward-only iterator over a collection's records, in store key order
pub struct CollectionIterator<'a, S: KeyValueStore, M> {
    store: &'a S,
    collection: &'a Collection<M>,
    cursor: CursorSlot<S::Cursor>,
}

impl<'a, S: KeyValueStore, M: Marshaller> CollectionIterator<'a, S, M> {
    pub(crate) fn new(store: &'a S, collection: &'a Collection<M>) -> Self {
        Self {
            store,
            collection,
            cursor: CursorSlot::Unopened,
        }
    }

    pub fn state(&self) -> IteratorState {
        match self.cursor {
            CursorSlot::Unopened => IteratorState::Unopened,
            CursorSlot::Open(_) => IteratorState::Open,
            CursorSlot::Closed => IteratorState::Closed,
        }
    }

    /// Open the cursor if needed. `None` once closed.
    fn cursor(&mut self) -> Result<Option<&mut S::Cursor>> {
        if let CursorSlot::Unopened = self.cursor {
            let namespace = self.collection.namespace();
            let cursor = self.collection.key_codec().open_range(self.store, namespace)?;
            debug!(namespace = ?namespace, "opened collection cursor");
            self.cursor = CursorSlot::Open(cursor);
        }

        match &mut self.cursor {
            CursorSlot::Open(cursor) => Ok(Some(cursor)),
            _ => Ok(None),
        }
    }

    /// Whether another record remains.
    ///
    /// Always `Ok(false)` once the iterator is closed.
    pub fn has_next(&mut self) -> Result<bool> {
        let more = match self.cursor()? {
            Some(cursor) => cursor.has_next(),
            None => return Ok(false),
        };

        if !more && self.collection.close_on_exhaust() {
            self.close()?;
        }
        Ok(more)
    }

    fn advance(&mut self) -> Result<(String, Vec<u8>)> {
        let collection = self.collection;
        let cursor = self.cursor()?.ok_or(CollectionError::IteratorClosed)?;
        cursor.next().map_err(|e| {
            CollectionError::store("range-next", describe_key(collection.namespace()), e)
        })
    }

    /// Advance and return the next record's raw bytes.
    ///
    /// Must follow a `has_next` that returned true; otherwise the cursor's
    /// own error is returned. With `close_on_exhaust` (the default), a
    /// `has_next` that returned false has already closed the iterator, so
    /// this returns `IteratorClosed` instead.
    pub fn next_bytes(&mut self) -> Result<Vec<u8>> {
        self.advance().map(|(_, value)| value)
    }

    /// Advance and return the next record with its element key
    pub fn next_entry(&mut self) -> Result<Entry> {
        let (composite, value) = self.advance()?;
        let key = self.collection.key_codec().element_key(
            self.store,
            self.collection.namespace(),
            &composite,
        )?;
        Ok(Entry { key, value })
    }

    /// Advance and decode the next record into `target`
    pub fn next_value<T: Record>(&mut self, target: &mut T) -> Result<()> {
        let marshaller = self.collection.require_marshaller()?;
        let bytes = self.next_bytes()?;
        marshaller.unmarshal(&bytes, target)
    }

    /// Drain every remaining record as raw bytes.
    ///
    /// Stops at the first error; partial results are discarded.
    pub fn to_byte_arrays(&mut self) -> Result<Vec<Vec<u8>>> {
        let mut values = Vec::new();
        while self.has_next()? {
            values.push(self.next_bytes()?);
        }
        Ok(values)
    }

    /// Drain and decode every remaining record, each into a fresh `T::default()`
    pub fn to_array<T: Record + Default>(&mut self) -> Result<Vec<T>> {
        self.to_array_with(T::default)
    }

    /// Drain and decode every remaining record into targets built by `factory`
    pub fn to_array_with<T, F>(&mut self, mut factory: F) -> Result<Vec<T>>
    where
        T: Record,
        F: FnMut() -> T,
    {
        let marshaller = self.collection.require_marshaller()?;
        let mut values = Vec::new();
        while self.has_next()? {
            let bytes = self.next_bytes()?;
            let mut value = factory();
            marshaller.unmarshal(&bytes, &mut value)?;
            values.push(value);
        }
        Ok(values)
    }

    /// Release the cursor. A no-op when never opened or already closed.
    pub fn close(&mut self) -> Result<()> {
        match mem::replace(&mut self.cursor, CursorSlot::Closed) {
            CursorSlot::Open(mut cursor) => {
                cursor.close().map_err(|e| {
                    CollectionError::store(
                        "range-close",
                        describe_key(self.collection.namespace()),
                        e,
                    )
                })?;
                debug!(namespace = ?self.collection.namespace(), "closed collection cursor");
                Ok(())
            }
            CursorSlot::Unopened | CursorSlot::Closed => Ok(()),
        }
    }

    /// Close after a failed step so the std iterator stays fused
    fn close_after_error(&mut self) {
        if let Err(e) = self.close() {
            warn!(error = %e, "failed to close collection cursor after error");
        }
    }
}

impl<'a, S: KeyValueStore, M: Marshaller> Iterator for CollectionIterator<'a, S, M> {
    /// Raw value bytes, in store key order
    type Item = Result<Vec<u8>>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.has_next() {
            Ok(true) => {}
            Ok(false) => return None,
            Err(e) => {
                self.close_after_error();
                return Some(Err(e));
            }
        }

        match self.next_bytes() {
            Ok(bytes) => Some(Ok(bytes)),
            Err(e) => {
                self.close_after_error();
                Some(Err(e))
            }
        }
    }
}

impl<'a, S: KeyValueStore, M> Drop for CollectionIterator<'a, S, M> {
    fn drop(&mut self) {
        if let CursorSlot::Open(cursor) = &mut self.cursor {
            if let Err(e) = cursor.close() {
                warn!(error = %e, "failed to close collection cursor on drop");
            }
        }
    }
}
