//! Bincode value codec
//!
//! Compact binary encoding. Field order is significant, so records stored
//! with this codec must keep their field layout stable.

use crate::error::{CollectionError, Result};

use super::{marshal_with, unmarshal_with, Marshaller, Record};

/// Encodes records with bincode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BincodeMarshaller;

impl BincodeMarshaller {
    pub fn new() -> Self {
        Self
    }
}

impl Marshaller for BincodeMarshaller {
    fn name(&self) -> &'static str {
        "bincode"
    }

    fn marshal<T: Record>(&self, value: &T) -> Result<Vec<u8>> {
        marshal_with(value, |v| {
            bincode::serialize(v).map_err(|e| CollectionError::Encode(e.to_string()))
        })
    }

    fn unmarshal<T: Record>(&self, bytes: &[u8], target: &mut T) -> Result<()> {
        unmarshal_with(bytes, target, |b| {
            bincode::deserialize(b).map_err(|e| CollectionError::Decode(e.to_string()))
        })
    }
}
