use std::fmt;
use thiserror::Error;

use crate::wire::ValueKind;

/// What the codec expected at the position where decoding failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expected {
    /// An RLP list
    List,
    /// An RLP byte string of any length
    Bytes,
    /// An RLP byte string of exactly 20 bytes
    Address,
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::List => f.write_str("list"),
            Self::Bytes => f.write_str("byte string"),
            Self::Address => f.write_str("20-byte address"),
        }
    }
}

/// Location and shape of a type mismatch inside the extra record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodingMismatch {
    /// Top-level element index (0 = validators, 1 = seal, 2 = committed seals)
    pub element: usize,
    /// Entry index within a list element, if the mismatch is nested
    pub entry: Option<usize>,
    /// What was expected
    pub expected: Expected,
    /// What was found
    pub found: ValueKind,
}

impl EncodingMismatch {
    pub(crate) fn element(element: usize, expected: Expected, found: ValueKind) -> Self {
        Self { element, entry: None, expected, found }
    }

    pub(crate) fn entry(element: usize, entry: usize, expected: Expected, found: ValueKind) -> Self {
        Self { element, entry: Some(entry), expected, found }
    }
}

impl fmt::Display for EncodingMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "element {}", self.element)?;
        if let Some(entry) = self.entry {
            write!(f, " entry {entry}")?;
        }
        write!(f, ": expected {}, found {}", self.expected, self.found)
    }
}

/// Istanbul extra-data errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IstanbulExtraError {
    /// Extra data is shorter than the vanity prefix
    #[error("Extra data too short: expected at least {expected} bytes, got {got}")]
    ExtraTooShort {
        /// Required minimum length
        expected: usize,
        /// Actual length
        got: usize,
    },

    /// Record does not have exactly three top-level elements
    #[error("Malformed istanbul extra: expected {expected} elements, found {got}")]
    MalformedRecord {
        /// Required element count
        expected: usize,
        /// Decoded element count
        got: usize,
    },

    /// Validators element is not a list of 20-byte addresses
    #[error("Invalid validator encoding: {0}")]
    InvalidValidatorEncoding(EncodingMismatch),

    /// Seal element is not a byte string
    #[error("Invalid seal encoding: {0}")]
    InvalidSealEncoding(EncodingMismatch),

    /// Committed seals element is not a list of byte strings
    #[error("Invalid committed seal encoding: {0}")]
    InvalidCommittedSealEncoding(EncodingMismatch),

    /// Bytes remain after the record
    #[error("{0} trailing bytes after istanbul extra record")]
    TrailingBytes(usize),

    /// Lower-level RLP failure
    #[error("RLP decode error: {0}")]
    WireCodec(#[from] alloy_rlp::Error),
}

impl IstanbulExtraError {
    /// Static description used when the error must cross an `alloy_rlp::Decodable` boundary
    pub fn as_static_str(&self) -> &'static str {
        match self {
            Self::ExtraTooShort { .. } => "istanbul extra too short",
            Self::MalformedRecord { .. } => "istanbul extra must have 3 elements",
            Self::InvalidValidatorEncoding(_) => "invalid istanbul validator encoding",
            Self::InvalidSealEncoding(_) => "invalid istanbul seal encoding",
            Self::InvalidCommittedSealEncoding(_) => "invalid istanbul committed seal encoding",
            Self::TrailingBytes(_) => "trailing bytes after istanbul extra",
            Self::WireCodec(_) => "istanbul extra rlp error",
        }
    }
}

impl From<IstanbulExtraError> for alloy_rlp::Error {
    fn from(err: IstanbulExtraError) -> Self {
        match err {
            IstanbulExtraError::WireCodec(inner) => inner,
            other => alloy_rlp::Error::Custom(other.as_static_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mismatch_reports_failing_element() {
        let err = IstanbulExtraError::InvalidCommittedSealEncoding(EncodingMismatch::element(
            2,
            Expected::List,
            ValueKind::String(3),
        ));
        assert_eq!(
            err.to_string(),
            "Invalid committed seal encoding: element 2: expected list, found 3-byte string"
        );
    }

    #[test]
    fn test_mismatch_reports_entry() {
        let mismatch = EncodingMismatch::entry(0, 1, Expected::Address, ValueKind::String(19));
        assert_eq!(
            mismatch.to_string(),
            "element 0 entry 1: expected 20-byte address, found 19-byte string"
        );
    }

    #[test]
    fn test_wire_error_passes_through_rlp_boundary() {
        let err = IstanbulExtraError::from(alloy_rlp::Error::InputTooShort);
        assert_eq!(alloy_rlp::Error::from(err), alloy_rlp::Error::InputTooShort);
    }

    #[test]
    fn test_typed_error_becomes_custom() {
        let err = IstanbulExtraError::MalformedRecord { expected: 3, got: 2 };
        assert_eq!(
            alloy_rlp::Error::from(err),
            alloy_rlp::Error::Custom("istanbul extra must have 3 elements")
        );
    }
}
