//! Error types for decoding and encoding batches.

use alloy_primitives::U256;
use thiserror::Error;

/// An error encountered while decoding a batch.
///
/// Every variant is terminal: decoding never recovers partially.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// The batch starts with a well-formed RLP list instead of a change L2 block marker. The
    /// data is most likely a forced batch or a pre-Etrog batch.
    #[error("Missing change L2 block marker, found an RLP list at offset {offset}")]
    MissingLeadingMarker {
        /// Offset of the RLP list.
        offset: usize,
    },
    /// The buffer ends inside a block header.
    #[error("Truncated block header at offset {offset}: {available} of {needed} bytes available")]
    TruncatedHeader {
        /// Offset of the block marker.
        offset: usize,
        /// Bytes required after the marker.
        needed: usize,
        /// Bytes left after the marker.
        available: usize,
    },
    /// The buffer ends inside an RLP list header.
    #[error("Truncated RLP length at offset {offset}: {available} of {needed} bytes available")]
    TruncatedLength {
        /// Offset of the RLP prefix.
        offset: usize,
        /// Bytes required for the full header.
        needed: usize,
        /// Bytes left from the prefix on.
        available: usize,
    },
    /// The buffer ends before the transaction's RLP body and its trailing bytes.
    #[error("Truncated transaction at offset {offset}: ends at {end}, buffer length is {len}")]
    TruncatedTransaction {
        /// Offset of the transaction.
        offset: usize,
        /// Computed end offset of the transaction.
        end: usize,
        /// Length of the buffer.
        len: usize,
    },
    /// The byte at the offset is below the RLP list prefix floor.
    #[error("Expected an RLP list at offset {offset}, found prefix {prefix:#04x}")]
    NotAList {
        /// Offset of the prefix.
        offset: usize,
        /// The offending prefix byte.
        prefix: u8,
    },
    /// The long-form RLP length does not fit the address space.
    #[error("RLP list length at offset {offset} overflows")]
    LengthOverflow {
        /// Offset of the RLP prefix.
        offset: usize,
    },
    /// The transaction's RLP field list failed to decode.
    #[error("Invalid RLP at offset {offset}: {err}")]
    InvalidRlp {
        /// Offset of the transaction.
        offset: usize,
        /// The underlying RLP error.
        err: alloy_rlp::Error,
    },
    /// The transaction has fewer fields than a legacy transaction.
    #[error("Unsupported transaction at offset {offset}: {fields} RLP fields, expected at least 6")]
    UnsupportedTxShape {
        /// Offset of the transaction.
        offset: usize,
        /// Number of decoded fields.
        fields: usize,
    },
    /// An integer field is wider than its type.
    #[error("Transaction field `{field}` at offset {offset} overflows")]
    IntegerOverflow {
        /// Offset of the transaction.
        offset: usize,
        /// Name of the field.
        field: &'static str,
    },
    /// The `to` field is neither empty nor an address.
    #[error("Invalid `to` address at offset {offset}: {len} bytes")]
    InvalidAddress {
        /// Offset of the transaction.
        offset: usize,
        /// Length of the field.
        len: usize,
    },
    /// The bytes at the offset are neither a block marker nor a transaction.
    #[error("Malformed batch at offset {offset}: no block marker or transaction")]
    MalformedBatch {
        /// Offset of the unrecognized bytes.
        offset: usize,
    },
}

impl DecodeError {
    /// Returns the offset into the batch at which the error occurred.
    pub const fn offset(&self) -> usize {
        match self {
            Self::MissingLeadingMarker { offset } |
            Self::TruncatedHeader { offset, .. } |
            Self::TruncatedLength { offset, .. } |
            Self::TruncatedTransaction { offset, .. } |
            Self::NotAList { offset, .. } |
            Self::LengthOverflow { offset } |
            Self::InvalidRlp { offset, .. } |
            Self::UnsupportedTxShape { offset, .. } |
            Self::IntegerOverflow { offset, .. } |
            Self::InvalidAddress { offset, .. } |
            Self::MalformedBatch { offset } => *offset,
        }
    }
}

/// An error encountered while encoding a batch.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodeError {
    /// The transaction's `v` does not fold back into a single raw byte.
    #[error("Signature value v={v} does not fit the one byte encoding (chain id {chain_id:?})")]
    VOutOfRange {
        /// The transaction's `v`.
        v: U256,
        /// The transaction's chain id.
        chain_id: Option<u64>,
    },
}

/// An error converting a reconstructed transaction into an [alloy_consensus::TxLegacy].
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxConversionError {
    /// The gas price does not fit in a `u128`.
    #[error("Gas price {0} does not fit in a u128")]
    GasPriceOverflow(U256),
    /// The signature value is not a legacy or EIP-155 recovery value.
    #[error("Invalid signature value v={0}")]
    InvalidV(U256),
}
