//! JSON value codec
//!
//! The default codec: human-readable, and tolerant of records gaining
//! optional fields over time.

use crate::error::{CollectionError, Result};

use super::{marshal_with, unmarshal_with, Marshaller, Record};

/// Encodes records as JSON via serde_json
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JsonMarshaller;

impl JsonMarshaller {
    pub fn new() -> Self {
        Self
    }
}

impl Marshaller for JsonMarshaller {
    fn name(&self) -> &'static str {
        "json"
    }

    fn marshal<T: Record>(&self, value: &T) -> Result<Vec<u8>> {
        marshal_with(value, |v| {
            serde_json::to_vec(v).map_err(|e| CollectionError::Encode(e.to_string()))
        })
    }

    fn unmarshal<T: Record>(&self, bytes: &[u8], target: &mut T) -> Result<()> {
        unmarshal_with(bytes, target, |b| {
            serde_json::from_slice(b).map_err(|e| CollectionError::Decode(e.to_string()))
        })
    }
}
