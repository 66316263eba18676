//! Istanbul BFT extra-data record
//!
//! The header's `extra_data` carries a 32-byte vanity prefix followed by the
//! RLP encoding of a three-element record:
//!
//! ```text
//! extra_data := vanity(32) || rlp([validators], seal, [committed seals])
//!
//!   [0] list of 20-byte validator addresses
//!   [1] proposer seal bytes, or null when unsigned
//!   [2] list of committed seals (empty entries as null), or null array when none
//! ```

pub mod errors;
pub mod vanity;

pub use errors::{EncodingMismatch, Expected, IstanbulExtraError};
pub use vanity::{normalize_vanity, split_extra, Vanity};

use crate::constants::{ISTANBUL_EXTRA_FIELDS, ISTANBUL_EXTRA_VANITY};
use crate::wire::{ListEncoder, RlpValue};
use alloy_primitives::{Address, Bytes};
use alloy_rlp::{BufMut, Decodable, Encodable};
use serde::{Deserialize, Serialize};

const VALIDATORS_INDEX: usize = 0;
const SEAL_INDEX: usize = 1;
const COMMITTED_SEALS_INDEX: usize = 2;

/// Decoded consensus record stored in a header's extra data
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IstanbulExtra {
    /// Ordered validator set. Order defines proposer rotation.
    pub validators: Vec<Address>,
    /// Proposer signature over the seal hash. Empty when unsigned.
    pub seal: Bytes,
    /// Committer signatures over the seal hash. Entries may be empty placeholders.
    pub committed_seals: Vec<Bytes>,
}

impl IstanbulExtra {
    /// Create an unsealed record for the given validator set
    pub fn new(validators: Vec<Address>) -> Self {
        Self { validators, seal: Bytes::new(), committed_seals: Vec::new() }
    }

    /// Returns whether the proposer seal is present
    pub fn is_sealed(&self) -> bool {
        !self.seal.is_empty()
    }

    /// Number of non-empty committed seals
    pub fn committed_count(&self) -> usize {
        self.committed_seals.iter().filter(|seal| !seal.is_empty()).count()
    }

    fn to_list(&self) -> ListEncoder {
        let mut record = ListEncoder::new();

        let mut validators = ListEncoder::new();
        for validator in &self.validators {
            validators.append_bytes(validator.as_slice());
        }
        record.append_list(&validators);

        if self.seal.is_empty() {
            record.append_null();
        } else {
            record.append_bytes(&self.seal);
        }

        if self.committed_seals.is_empty() {
            record.append_null_array();
        } else {
            let mut committed = ListEncoder::new();
            for seal in &self.committed_seals {
                // Empty entries stay in place inside the committed list
                if seal.is_empty() {
                    committed.append_null();
                } else {
                    committed.append_bytes(seal);
                }
            }
            record.append_list(&committed);
        }

        record
    }

    /// RLP payload without the vanity prefix
    pub fn encode_payload(&self) -> Vec<u8> {
        let record = self.to_list();
        let mut out = Vec::with_capacity(record.length());
        record.encode(&mut out);
        out
    }

    /// Full extra-data field: vanity derived from `existing`, then the payload.
    pub fn to_extra_data(&self, existing: &[u8]) -> Bytes {
        let record = self.to_list();
        let mut out = Vec::with_capacity(ISTANBUL_EXTRA_VANITY + record.length());
        out.extend_from_slice(&normalize_vanity(existing));
        record.encode(&mut out);
        out.into()
    }

    /// Decode a payload that must contain exactly one record and nothing else.
    pub fn decode_payload(payload: &[u8]) -> Result<Self, IstanbulExtraError> {
        let mut buf = payload;
        let record = RlpValue::parse(&mut buf)?;
        if !buf.is_empty() {
            return Err(IstanbulExtraError::TrailingBytes(buf.len()));
        }
        Self::from_value(&record)
    }

    /// Split off the vanity prefix and decode the payload.
    pub fn from_extra_data(extra: &[u8]) -> Result<Self, IstanbulExtraError> {
        let (_, payload) = split_extra(extra)?;
        Self::decode_payload(payload)
    }

    fn from_value(record: &RlpValue<'_>) -> Result<Self, IstanbulExtraError> {
        let elements = record.elements().ok_or(alloy_rlp::Error::UnexpectedString)??;

        if elements.len() != ISTANBUL_EXTRA_FIELDS {
            return Err(IstanbulExtraError::MalformedRecord {
                expected: ISTANBUL_EXTRA_FIELDS,
                got: elements.len(),
            });
        }

        Ok(Self {
            validators: decode_validators(&elements[VALIDATORS_INDEX])?,
            seal: decode_seal(&elements[SEAL_INDEX])?,
            committed_seals: decode_committed_seals(&elements[COMMITTED_SEALS_INDEX])?,
        })
    }
}

fn decode_validators(value: &RlpValue<'_>) -> Result<Vec<Address>, IstanbulExtraError> {
    let entries = value.elements().ok_or_else(|| {
        IstanbulExtraError::InvalidValidatorEncoding(EncodingMismatch::element(
            VALIDATORS_INDEX,
            Expected::List,
            value.kind(),
        ))
    })??;

    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            entry.fixed_address().ok_or_else(|| {
                IstanbulExtraError::InvalidValidatorEncoding(EncodingMismatch::entry(
                    VALIDATORS_INDEX,
                    index,
                    Expected::Address,
                    entry.kind(),
                ))
            })
        })
        .collect()
}

fn decode_seal(value: &RlpValue<'_>) -> Result<Bytes, IstanbulExtraError> {
    value.bytes().map(Bytes::copy_from_slice).ok_or_else(|| {
        IstanbulExtraError::InvalidSealEncoding(EncodingMismatch::element(
            SEAL_INDEX,
            Expected::Bytes,
            value.kind(),
        ))
    })
}

fn decode_committed_seals(value: &RlpValue<'_>) -> Result<Vec<Bytes>, IstanbulExtraError> {
    let entries = value.elements().ok_or_else(|| {
        IstanbulExtraError::InvalidCommittedSealEncoding(EncodingMismatch::element(
            COMMITTED_SEALS_INDEX,
            Expected::List,
            value.kind(),
        ))
    })??;

    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            entry.bytes().map(Bytes::copy_from_slice).ok_or_else(|| {
                IstanbulExtraError::InvalidCommittedSealEncoding(EncodingMismatch::entry(
                    COMMITTED_SEALS_INDEX,
                    index,
                    Expected::Bytes,
                    entry.kind(),
                ))
            })
        })
        .collect()
}

impl Encodable for IstanbulExtra {
    fn encode(&self, out: &mut dyn BufMut) {
        self.to_list().encode(out);
    }

    fn length(&self) -> usize {
        self.to_list().length()
    }
}

impl Decodable for IstanbulExtra {
    fn decode(buf: &mut &[u8]) -> alloy_rlp::Result<Self> {
        let record = RlpValue::parse(buf)?;
        Ok(Self::from_value(&record)?)
    }
}
