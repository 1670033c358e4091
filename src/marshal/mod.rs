//! Marshal Module
//!
//! Pluggable value codecs between typed records and stored bytes.
//!
//! ## Responsibilities
//! - Generic structural encoding via serde (JSON by default, bincode on request)
//! - Deferring to a record's own encoding when it exposes [`SelfMarshaller`]
//! - Decoding into a caller-provided target, overwriting it in place
//!
//! Codecs are stateless and `Send + Sync`; one instance can serve any number
//! of collections and threads.

mod bincode_marshaller;
mod json_marshaller;

pub use bincode_marshaller::BincodeMarshaller;
pub use json_marshaller::JsonMarshaller;

use std::collections::{BTreeMap, HashMap};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{CollectionError, Result};

/// Serialize/deserialize capability between records and bytes
pub trait Marshaller: Send + Sync {
    /// Short codec name, used in log fields
    fn name(&self) -> &'static str;

    fn marshal<T: Record>(&self, value: &T) -> Result<Vec<u8>>;

    /// Decode `bytes` into `target`, replacing its previous contents
    fn unmarshal<T: Record>(&self, bytes: &[u8], target: &mut T) -> Result<()>;
}

/// A value that can be stored in a collection.
///
/// Any serde type opts in with an empty impl. Types that want their own wire
/// representation also return themselves from the two capability hooks:
///
/// ```rust
/// use colite::{Record, Result, SelfMarshaller};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Default, Serialize, Deserialize)]
/// struct Cents(u64);
///
/// impl SelfMarshaller for Cents {
///     fn marshal_self(&self) -> Result<Vec<u8>> {
///         Ok(self.0.to_string().into_bytes())
///     }
/// }
///
/// impl Record for Cents {
///     fn self_marshaller(&self) -> Option<&dyn SelfMarshaller> {
///         Some(self)
///     }
/// }
/// ```
pub trait Record: Serialize + DeserializeOwned {
    /// Custom encoder, if this record overrides the generic encoding
    fn self_marshaller(&self) -> Option<&dyn SelfMarshaller> {
        None
    }

    /// Custom decoder, if this record overrides the generic encoding
    fn self_marshaller_mut(&mut self) -> Option<&mut dyn SelfMarshaller> {
        None
    }
}

/// Optional capability: a record that encodes and decodes itself
pub trait SelfMarshaller {
    fn marshal_self(&self) -> Result<Vec<u8>>;

    fn unmarshal_self(&mut self, _bytes: &[u8]) -> Result<()> {
        Err(CollectionError::NotImplemented("unmarshal_self"))
    }
}

/// Encode through the record's own capability, else through `generic`
pub(crate) fn marshal_with<T, F>(value: &T, generic: F) -> Result<Vec<u8>>
where
    T: Record,
    F: FnOnce(&T) -> Result<Vec<u8>>,
{
    match value.self_marshaller() {
        Some(custom) => custom.marshal_self(),
        None => generic(value),
    }
}

/// Decode through the record's own capability, else through `generic`
pub(crate) fn unmarshal_with<T, F>(bytes: &[u8], target: &mut T, generic: F) -> Result<()>
where
    T: Record,
    F: FnOnce(&[u8]) -> Result<T>,
{
    match target.self_marshaller_mut() {
        Some(custom) => custom.unmarshal_self(bytes),
        None => {
            *target = generic(bytes)?;
            Ok(())
        }
    }
}

// =============================================================================
// Record impls for common value types
// =============================================================================

macro_rules! impl_record {
    ($($ty:ty),* $(,)?) => {
        $(impl Record for $ty {})*
    };
}

impl_record!(
    (), bool, char, u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, f32, f64,
    String, serde_json::Value,
);

impl<T: Record> Record for Vec<T> {}
impl<T: Record> Record for Option<T> {}
impl<T: Record> Record for Box<T> {}
impl<T: Record> Record for BTreeMap<String, T> {}
impl<T: Record> Record for HashMap<String, T> {}
impl<A: Record, B: Record> Record for (A, B) {}
