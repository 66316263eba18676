//! Fixed-width vanity prefix of the extra-data field.

use super::errors::IstanbulExtraError;
use crate::constants::ISTANBUL_EXTRA_VANITY;

/// Vanity prefix of exactly [`ISTANBUL_EXTRA_VANITY`] bytes
pub type Vanity = [u8; ISTANBUL_EXTRA_VANITY];

/// Derive the vanity prefix from whatever extra data is already present.
///
/// Shorter input is right-padded with zeros. Longer input is truncated to the
/// first 32 bytes, dropping any previous payload.
pub fn normalize_vanity(existing: &[u8]) -> Vanity {
    let mut vanity = [0u8; ISTANBUL_EXTRA_VANITY];
    let len = existing.len().min(ISTANBUL_EXTRA_VANITY);
    vanity[..len].copy_from_slice(&existing[..len]);
    vanity
}

/// Split extra data into its vanity prefix and encoded payload.
pub fn split_extra(extra: &[u8]) -> Result<(&Vanity, &[u8]), IstanbulExtraError> {
    extra
        .split_first_chunk::<ISTANBUL_EXTRA_VANITY>()
        .ok_or(IstanbulExtraError::ExtraTooShort {
            expected: ISTANBUL_EXTRA_VANITY,
            got: extra.len(),
        })
}
