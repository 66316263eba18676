use alloy_primitives::{b256, B256};

/// Hash of "Istanbul practical byzantine fault tolerance".
/// Stored in `mix_hash` to identify blocks produced by the Istanbul engine.
pub const ISTANBUL_DIGEST: B256 =
    b256!("63746963616c2062797a616e74696e65206661756c7420746f6c6572616e6365");
/// Extra data structure for Istanbul blocks
/// Format: [vanity (32 bytes)][rlp([validators], seal, [committed seals])]
pub const ISTANBUL_EXTRA_VANITY: usize = 32;
/// Expected proposer seal length (65 bytes: r=32, s=32, v=1). Advisory only.
pub const ISTANBUL_EXTRA_SEAL: usize = 65;
/// Validator address length (20 bytes)
pub const ADDRESS_LENGTH: usize = 20;
/// Number of top-level elements in the encoded extra record
pub const ISTANBUL_EXTRA_FIELDS: usize = 3;
