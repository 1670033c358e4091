//! # colite
//!
//! Namespaced collections over a flat key-value state store:
//! - Composite keys that keep each collection apart from every other key
//! - Byte-level and typed CRUD through short-lived accessors
//! - Lazy prefix iteration over every record in a collection
//! - Pluggable value codecs (JSON, bincode, or a record's own encoding)
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │              Collection (namespace + marshaller)             │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ accessor(&store)
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                Accessor (one unit of work)                   │
//! │        get / put / remove  ·  iterator()                     │
//! └──────────┬──────────────────────────────┬───────────────────┘
//!            │                              │
//!            ▼                              ▼
//!   ┌─────────────────┐            ┌─────────────────┐
//!   │    Key Codec    │            │   Marshaller    │
//!   │ (tag+ns+element)│            │ (JSON/bincode)  │
//!   └────────┬────────┘            └─────────────────┘
//!            │
//!            ▼
//!   ┌─────────────────────────────────────────────┐
//!   │ KeyValueStore (host-provided, or MemoryStore)│
//!   └─────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use colite::{Collection, JsonMarshaller, MemoryStore};
//!
//! let store = MemoryStore::new();
//! let people = Collection::new(&["people"], JsonMarshaller).unwrap();
//! let accessor = people.accessor(&store);
//!
//! accessor.put(&["pedro"], &20u32).unwrap();
//! let mut age = 0u32;
//! assert!(accessor.get(&["pedro"], &mut age).unwrap());
//! assert_eq!(age, 20);
//!
//! let ages: Vec<u32> = accessor.iterator().to_array().unwrap();
//! assert_eq!(ages, vec![20]);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod key;
pub mod marshal;
pub mod store;
pub mod collection;
pub mod iterator;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{CollectionError, Result};
pub use config::Config;
pub use key::KeyCodec;
pub use marshal::{BincodeMarshaller, JsonMarshaller, Marshaller, Record, SelfMarshaller};
pub use store::{KeyValueStore, MemoryStore, StateCursor};
pub use collection::{Accessor, Collection};
pub use iterator::{CollectionIterator, Entry, IteratorState};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of colite
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
