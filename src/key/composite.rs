//! Composite key encoding
//!
//! Canonical encoding shared by stores that do not define their own.
//!
//! ## Layout
//! ```text
//! ┌──────┬─────────────┬──────┬──────────┬──────┬──────────┬──────┐
//! │ 0x00 │ object type │ 0x00 │ segment1 │ 0x00 │ segment2 │ 0x00 │ ...
//! └──────┴─────────────┴──────┴──────────┴──────┴──────────┴──────┘
//! ```
//!
//! Every segment is terminated, so a partial key built from a prefix of the
//! segments is a byte prefix of exactly the keys that extend it: `["a"]`
//! never matches keys under `["ab"]`.

use thiserror::Error;

/// Leading marker and segment terminator
pub const DELIMITER: char = '\u{0}';

/// Highest code point; reserved as the exclusive upper bound of a range scan
pub const MAX_RUNE: char = char::MAX;

/// Errors produced while building or splitting composite keys
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompositeKeyError {
    #[error("segment {segment:?} contains reserved character U+{code:04X}")]
    ReservedCharacter { segment: String, code: u32 },

    #[error("malformed composite key {0:?}")]
    Malformed(String),
}

fn validate_segment(segment: &str) -> Result<(), CompositeKeyError> {
    match segment.chars().find(|&c| c == DELIMITER || c == MAX_RUNE) {
        Some(c) => Err(CompositeKeyError::ReservedCharacter {
            segment: segment.to_string(),
            code: c as u32,
        }),
        None => Ok(()),
    }
}

/// Build a composite key from an object type and its attribute segments.
///
/// Also used with a leading subset of the segments to build the prefix of a
/// partial-key range scan.
pub fn create_composite_key<S: AsRef<str>>(
    object_type: &str,
    segments: &[S],
) -> Result<String, CompositeKeyError> {
    validate_segment(object_type)?;

    let capacity = 2 + object_type.len()
        + segments.iter().map(|s| s.as_ref().len() + 1).sum::<usize>();
    let mut key = String::with_capacity(capacity);
    key.push(DELIMITER);
    key.push_str(object_type);
    key.push(DELIMITER);

    for segment in segments {
        let segment = segment.as_ref();
        validate_segment(segment)?;
        key.push_str(segment);
        key.push(DELIMITER);
    }

    Ok(key)
}

/// Exclusive upper bound of the range holding every key under `prefix`
pub fn range_end(prefix: &str) -> String {
    let mut end = String::with_capacity(prefix.len() + MAX_RUNE.len_utf8());
    end.push_str(prefix);
    end.push(MAX_RUNE);
    end
}

/// Split a composite key back into its object type and segments
pub fn split_composite_key(key: &str) -> Result<(String, Vec<String>), CompositeKeyError> {
    let body = key
        .strip_prefix(DELIMITER)
        .and_then(|rest| rest.strip_suffix(DELIMITER))
        .ok_or_else(|| CompositeKeyError::Malformed(key.to_string()))?;

    let mut parts = body.split(DELIMITER).map(str::to_string);
    // `split` always yields at least one item
    let object_type = parts.next().unwrap_or_default();
    Ok((object_type, parts.collect()))
}
