//! Collection Module
//!
//! A collection binds a namespace and a value codec; an accessor binds a
//! collection to one store handle for one unit of work.
//!
//! ## Responsibilities
//! - Validate element keys before any store call
//! - Byte-level and typed CRUD under one namespace
//! - Hand out lazy iterators over the namespace
//!
//! ## Lifetimes
//! ```text
//!   Collection (long-lived, shareable)
//!        │ accessor(&store)
//!        ▼
//!   Accessor<'a>  ── borrows collection + store handle
//!        │ iterator()
//!        ▼
//!   CollectionIterator<'a>  ── owns the store cursor once opened
//! ```

use tracing::{debug, trace};

use crate::config::Config;
use crate::error::{describe_key, CollectionError, Result};
use crate::iterator::CollectionIterator;
use crate::key::KeyCodec;
use crate::marshal::{JsonMarshaller, Marshaller, Record};
use crate::store::KeyValueStore;

/// A namespace of records with a fixed value codec
#[derive(Debug, Clone)]
pub struct Collection<M = JsonMarshaller> {
    namespace: Vec<String>,
    marshaller: Option<M>,
    key_codec: KeyCodec,
    close_on_exhaust: bool,
}

impl<M: Marshaller> Collection<M> {
    /// Create a collection with the default configuration
    pub fn new<N: AsRef<str>>(namespace: &[N], marshaller: M) -> Result<Self> {
        Self::with_config(namespace, Some(marshaller), &Config::default())
    }

    /// Create a collection with a custom tag and drain policy.
    ///
    /// Passing `None` as the marshaller leaves only the byte-level
    /// operations usable.
    pub fn with_config<N: AsRef<str>>(
        namespace: &[N],
        marshaller: Option<M>,
        config: &Config,
    ) -> Result<Self> {
        if namespace.is_empty() {
            return Err(CollectionError::InvalidNamespace);
        }
        config.validate()?;

        Ok(Self {
            namespace: namespace.iter().map(|s| s.as_ref().to_string()).collect(),
            marshaller,
            key_codec: KeyCodec::new(config.object_type.clone()),
            close_on_exhaust: config.close_on_exhaust,
        })
    }

    /// Bind this collection to a store handle
    pub fn accessor<'a, S: KeyValueStore>(&'a self, store: &'a S) -> Accessor<'a, S, M> {
        Accessor {
            store,
            collection: self,
        }
    }

    pub fn namespace(&self) -> &[String] {
        &self.namespace
    }

    pub fn marshaller(&self) -> Option<&M> {
        self.marshaller.as_ref()
    }

    pub fn key_codec(&self) -> &KeyCodec {
        &self.key_codec
    }

    pub fn close_on_exhaust(&self) -> bool {
        self.close_on_exhaust
    }

    /// The configured codec, or `MarshallerMissing`
    pub(crate) fn require_marshaller(&self) -> Result<&M> {
        self.marshaller.as_ref().ok_or(CollectionError::MarshallerMissing)
    }
}

impl Collection<JsonMarshaller> {
    /// Create a collection with no value codec
    pub fn bytes_only<N: AsRef<str>>(namespace: &[N]) -> Result<Self> {
        Self::with_config(namespace, None, &Config::default())
    }
}

/// CRUD over one namespace through one store handle
pub struct Accessor<'a, S: KeyValueStore, M> {
    store: &'a S,
    collection: &'a Collection<M>,
}

impl<'a, S: KeyValueStore, M: Marshaller> Accessor<'a, S, M> {
    fn compose<K: AsRef<str>>(&self, key: &[K]) -> Result<String> {
        self.collection
            .key_codec
            .compose(self.store, &self.collection.namespace, key)
    }

    /// Read the raw bytes stored under `key`.
    ///
    /// `Ok(None)` means never written (or removed); `Ok(Some(vec![]))` means
    /// written as empty bytes.
    pub fn get_bytes<K: AsRef<str>>(&self, key: &[K]) -> Result<Option<Vec<u8>>> {
        let composite = self.compose(key)?;
        let value = self
            .store
            .get(&composite)
            .map_err(|e| CollectionError::store("get", describe_key(key), e))?;

        trace!(
            namespace = ?self.collection.namespace,
            key = %describe_key(key),
            found = value.is_some(),
            "get_bytes"
        );
        Ok(value)
    }

    /// Decode the record under `key` into `target`.
    ///
    /// Returns `Ok(false)` without touching `target` when the key is unset.
    pub fn get<K: AsRef<str>, T: Record>(&self, key: &[K], target: &mut T) -> Result<bool> {
        let bytes = match self.get_bytes(key)? {
            Some(bytes) => bytes,
            None => return Ok(false),
        };

        let marshaller = self.collection.require_marshaller()?;
        marshaller.unmarshal(&bytes, target).map_err(|e| match e {
            CollectionError::Decode(msg) => {
                CollectionError::Decode(format!("element {}: {}", describe_key(key), msg))
            }
            other => other,
        })?;
        Ok(true)
    }

    /// Decode the record under `key` into a fresh value
    pub fn get_value<K: AsRef<str>, T: Record + Default>(&self, key: &[K]) -> Result<Option<T>> {
        let mut value = T::default();
        Ok(self.get(key, &mut value)?.then_some(value))
    }

    /// Whether anything (including empty bytes) is stored under `key`
    pub fn contains<K: AsRef<str>>(&self, key: &[K]) -> Result<bool> {
        Ok(self.get_bytes(key)?.is_some())
    }

    /// Store raw bytes under `key`, replacing any previous value
    pub fn put_bytes<K: AsRef<str>>(&self, key: &[K], bytes: &[u8]) -> Result<()> {
        let composite = self.compose(key)?;
        self.store
            .put(&composite, bytes)
            .map_err(|e| CollectionError::store("put", describe_key(key), e))?;

        trace!(
            namespace = ?self.collection.namespace,
            key = %describe_key(key),
            len = bytes.len(),
            "put_bytes"
        );
        Ok(())
    }

    /// Encode `value` and store it under `key`.
    ///
    /// Nothing is written if encoding fails.
    pub fn put<K: AsRef<str>, T: Record>(&self, key: &[K], value: &T) -> Result<()> {
        let marshaller = self.collection.require_marshaller()?;
        let bytes = marshaller.marshal(value)?;
        debug!(
            namespace = ?self.collection.namespace,
            key = %describe_key(key),
            codec = marshaller.name(),
            "put"
        );
        self.put_bytes(key, &bytes)
    }

    /// Delete the value under `key`; removing an unset key succeeds
    pub fn remove<K: AsRef<str>>(&self, key: &[K]) -> Result<()> {
        let composite = self.compose(key)?;
        self.store
            .delete(&composite)
            .map_err(|e| CollectionError::store("delete", describe_key(key), e))?;

        debug!(namespace = ?self.collection.namespace, key = %describe_key(key), "remove");
        Ok(())
    }

    /// A lazy iterator over every record in this namespace.
    ///
    /// No store call happens until the iterator is first used.
    pub fn iterator(&self) -> CollectionIterator<'a, S, M> {
        CollectionIterator::new(self.store, self.collection)
    }

    pub fn namespace(&self) -> &[String] {
        &self.collection.namespace
    }

    pub fn collection(&self) -> &'a Collection<M> {
        self.collection
    }
}
