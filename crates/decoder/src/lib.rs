#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), no_std)]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

extern crate alloc;

/// Re-export commonly used types and functions.
pub mod prelude {
    pub use crate::{
        batch::{decode_batch, decode_forced_batch, Batch, ForcedBatch, L2Block},
        encode::{encode_batch, encode_forced_batch},
        errors::{DecodeError, EncodeError, TxConversionError},
        rlp::rlp_list_length,
        transaction::{decode_transaction, L2Transaction, LegacyTransaction, TxPayload},
    };
}

pub mod batch;
pub mod constants;
pub mod encode;
pub mod errors;
pub mod rlp;
pub mod transaction;

#[cfg(test)]
mod test_utils;
