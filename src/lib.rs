//! # ibft-extra - Istanbul BFT header extra-data codec
//!
//! Packs the consensus record (ordered validator set, proposer seal and
//! committed seals) into a block header's `extra_data`, reads it back, and
//! derives the seal-stripped form of the header that proposers and committers
//! sign.

pub mod config;
pub mod constants;
pub mod extra;
pub mod header;
pub mod wire;

pub use config::IstanbulExtraConfig;
pub use extra::{IstanbulExtra, IstanbulExtraError};
pub use header::{
    filter_extra_for_hash, filtered_extra, get_committed_seals, get_extra, get_seal,
    get_validators, has_istanbul_digest, init_extra, put_committed_seals, put_extra, put_seal,
    seal_hash, stamp_istanbul_digest, update_extra, ExtensionField,
};
