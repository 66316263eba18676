//! Read and write the Istanbul extra record inside a block header.
//!
//! Every mutation is a full read-decode-mutate-encode-write cycle through
//! [`update_extra`]. A field that fails to decode is left untouched.

use crate::constants::ISTANBUL_DIGEST;
use crate::extra::{IstanbulExtra, IstanbulExtraError};
use alloy_consensus::Header;
use alloy_primitives::{keccak256, Address, Bytes, B256};
use tracing::{debug, trace};

/// A header-like value that owns an extra-data byte field.
pub trait ExtensionField {
    /// Current extra-data bytes
    fn extension(&self) -> &[u8];

    /// Replace the extra-data bytes
    fn set_extension(&mut self, extension: Bytes);
}

impl ExtensionField for Header {
    fn extension(&self) -> &[u8] {
        &self.extra_data
    }

    fn set_extension(&mut self, extension: Bytes) {
        self.extra_data = extension;
    }
}

impl ExtensionField for Bytes {
    fn extension(&self) -> &[u8] {
        self
    }

    fn set_extension(&mut self, extension: Bytes) {
        *self = extension;
    }
}

/// Write an unsealed record for `validators`, keeping the existing vanity.
pub fn init_extra<H: ExtensionField>(
    header: &mut H,
    validators: Vec<Address>,
) -> Result<(), IstanbulExtraError> {
    put_extra(header, &IstanbulExtra::new(validators))
}

/// Encode `extra` into the header, normalizing the vanity from the current field.
pub fn put_extra<H: ExtensionField>(
    header: &mut H,
    extra: &IstanbulExtra,
) -> Result<(), IstanbulExtraError> {
    let encoded = extra.to_extra_data(header.extension());
    debug!(
        target: "ibft::extra",
        validators = extra.validators.len(),
        sealed = extra.is_sealed(),
        committed = extra.committed_seals.len(),
        len = encoded.len(),
        "Writing istanbul extra"
    );
    header.set_extension(encoded);
    Ok(())
}

/// Decode the record stored in the header
pub fn get_extra<H: ExtensionField>(header: &H) -> Result<IstanbulExtra, IstanbulExtraError> {
    IstanbulExtra::from_extra_data(header.extension()).inspect_err(|err| {
        debug!(target: "ibft::extra", %err, len = header.extension().len(), "Failed to decode istanbul extra");
    })
}

/// Validator set from the header's extra data
pub fn get_validators<H: ExtensionField>(header: &H) -> Result<Vec<Address>, IstanbulExtraError> {
    get_extra(header).map(|extra| extra.validators)
}

/// Proposer seal from the header's extra data
pub fn get_seal<H: ExtensionField>(header: &H) -> Result<Bytes, IstanbulExtraError> {
    get_extra(header).map(|extra| extra.seal)
}

/// Committed seals from the header's extra data
pub fn get_committed_seals<H: ExtensionField>(header: &H) -> Result<Vec<Bytes>, IstanbulExtraError> {
    get_extra(header).map(|extra| extra.committed_seals)
}

/// Read the record, apply `mutate`, and write it back.
///
/// On a decode failure the error is returned unchanged and the header is not
/// written.
pub fn update_extra<H, F>(header: &mut H, mutate: F) -> Result<(), IstanbulExtraError>
where
    H: ExtensionField,
    F: FnOnce(&mut IstanbulExtra),
{
    let mut extra = get_extra(header)?;
    mutate(&mut extra);
    put_extra(header, &extra)
}

/// Replace the proposer seal
pub fn put_seal<H: ExtensionField>(
    header: &mut H,
    seal: impl Into<Bytes>,
) -> Result<(), IstanbulExtraError> {
    let seal = seal.into();
    trace!(target: "ibft::extra", len = seal.len(), "Packing proposer seal");
    update_extra(header, |extra| extra.seal = seal)
}

/// Replace the committed seals wholesale
pub fn put_committed_seals<H: ExtensionField>(
    header: &mut H,
    seals: Vec<Bytes>,
) -> Result<(), IstanbulExtraError> {
    trace!(target: "ibft::extra", count = seals.len(), "Packing committed seals");
    update_extra(header, |extra| extra.committed_seals = seals)
}

/// Strip the seal and committed seals so the header can be hashed for signing.
///
/// Destroys seal data; verifiers should call this on a copy or use
/// [`filtered_extra`] / [`seal_hash`].
pub fn filter_extra_for_hash<H: ExtensionField>(header: &mut H) -> Result<(), IstanbulExtraError> {
    let extra = get_extra(header)?;
    trace!(target: "ibft::extra", validators = extra.validators.len(), "Filtering istanbul extra for hash");
    init_extra(header, extra.validators)
}

/// Canonical extra data for hashing, without modifying `header`.
pub fn filtered_extra<H: ExtensionField>(header: &H) -> Result<Bytes, IstanbulExtraError> {
    let extra = get_extra(header)?;
    Ok(IstanbulExtra::new(extra.validators).to_extra_data(header.extension()))
}

/// Hash signed by the proposer and committers: keccak256 of the RLP header with
/// seals stripped from its extra data.
pub fn seal_hash(header: &Header) -> Result<B256, IstanbulExtraError> {
    let mut header_for_hash = header.clone();
    filter_extra_for_hash(&mut header_for_hash)?;
    Ok(keccak256(alloy_rlp::encode(&header_for_hash)))
}

/// Mark the header as produced by the Istanbul engine
pub fn stamp_istanbul_digest(header: &mut Header) {
    header.mix_hash = ISTANBUL_DIGEST;
}

/// Returns whether the header carries the Istanbul digest
pub fn has_istanbul_digest(header: &Header) -> bool {
    header.mix_hash == ISTANBUL_DIGEST
}
