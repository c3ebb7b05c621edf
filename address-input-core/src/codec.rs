//! Translation between the opaque string value of the form
//! and the structured [`AddressRecord`].
//!
//! This is the only place that knows about the shape of the value.

use address_input_boundary as b;
use thiserror::Error;

use crate::entities::AddressRecord;

/// The value handed in from outside cannot be read.
///
/// There is no safe default for such a value, so it
/// is never treated as if it were empty.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FatalInputError {
    #[error("Malformed address value: {0}")]
    Malformed(String),
    #[error(transparent)]
    Shape(#[from] b::ConversionError),
}

/// Read a serialized value.
///
/// The empty string means that no address has been selected
/// and results in `None`.
pub fn decode(serialized: &str) -> Result<Option<AddressRecord>, FatalInputError> {
    if serialized.is_empty() {
        return Ok(None);
    }
    let record: b::AddressRecord = serde_json::from_str(serialized)
        .map_err(|err| FatalInputError::Malformed(err.to_string()))?;
    Ok(Some(record.try_into()?))
}

/// Write a record with all four keys, `null` included.
#[must_use]
pub fn encode(record: &AddressRecord) -> String {
    let record = b::AddressRecord::from(record.clone());
    serde_json::to_string(&record)
        .expect("A record of strings, finite floats and options always serializes")
}
