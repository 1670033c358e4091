//! Error types for colite
//!
//! Provides a unified error type for all collection operations.

use thiserror::Error;

/// Result type alias using CollectionError
pub type Result<T> = std::result::Result<T, CollectionError>;

/// Boxed error raised by the underlying store
pub type StoreSource = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Unified error type for colite operations
#[derive(Debug, Error)]
pub enum CollectionError {
    // -------------------------------------------------------------------------
    // Key Errors
    // -------------------------------------------------------------------------
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    #[error("Invalid namespace: namespace must have at least one segment")]
    InvalidNamespace,

    // -------------------------------------------------------------------------
    // Codec Errors
    // -------------------------------------------------------------------------
    #[error("Marshaller not set")]
    MarshallerMissing,

    #[error("Encode error: {0}")]
    Encode(String),

    #[error("Decode error: {0}")]
    Decode(String),

    // -------------------------------------------------------------------------
    // Store Errors
    // -------------------------------------------------------------------------
    /// A call into the external store failed. `op` names the store call and
    /// `key` the element key (or namespace, for range operations) involved.
    #[error("Store error during {op} for {key}: {source}")]
    Store {
        op: &'static str,
        key: String,
        #[source]
        source: StoreSource,
    },

    // -------------------------------------------------------------------------
    // Iterator Errors
    // -------------------------------------------------------------------------
    #[error("Iterator already closed")]
    IteratorClosed,

    // -------------------------------------------------------------------------
    // Capability Errors
    // -------------------------------------------------------------------------
    #[error("Not implemented: {0}")]
    NotImplemented(&'static str),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl CollectionError {
    /// Wrap a store failure with the operation name and key it concerned
    pub fn store<E>(op: &'static str, key: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        CollectionError::Store {
            op,
            key: key.into(),
            source: Box::new(source),
        }
    }

    /// True for `InvalidKey`
    pub fn is_invalid_key(&self) -> bool {
        matches!(self, CollectionError::InvalidKey(_))
    }

    /// True for `Store { .. }`
    pub fn is_store(&self) -> bool {
        matches!(self, CollectionError::Store { .. })
    }
}

/// Render a key (or namespace) for error context: `["a", "b"]`
pub(crate) fn describe_key<K: AsRef<str>>(segments: &[K]) -> String {
    let parts: Vec<&str> = segments.iter().map(AsRef::as_ref).collect();
    format!("{:?}", parts)
}
