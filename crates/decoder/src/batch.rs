//! This module contains the batch types: [Batch], made of [L2Block]s, and [ForcedBatch].

use crate::{
    constants::{BLOCK_HEADER_LEN, CHANGE_L2_BLOCK_MARKER, U32_FIELD_LEN},
    errors::DecodeError,
    rlp::is_rlp_list,
    transaction::{decode_transaction, L2Transaction},
};
use alloc::vec::Vec;
use core::mem;

/// An L2 block inside a [Batch].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct L2Block {
    /// Seconds elapsed since the previous L2 block.
    pub delta_timestamp: u32,
    /// Index of the L1 info tree leaf the block refers to.
    pub index_l1_info_tree: u32,
    /// The block transactions, in batch order.
    pub transactions: Vec<L2Transaction>,
}

impl L2Block {
    /// Creates an empty block from its header fields.
    pub const fn new(delta_timestamp: u32, index_l1_info_tree: u32) -> Self {
        Self { delta_timestamp, index_l1_info_tree, transactions: Vec::new() }
    }

    /// Reads the header following the change L2 block marker at `offset`.
    ///
    /// Returns an empty block and the offset of the first byte following the header.
    fn decode_header(buf: &[u8], offset: usize) -> Result<(Self, usize), DecodeError> {
        let start = offset + 1;
        let header = buf.get(start..start + BLOCK_HEADER_LEN).ok_or(
            DecodeError::TruncatedHeader {
                offset,
                needed: BLOCK_HEADER_LEN,
                available: buf.len() - start,
            },
        )?;

        let (delta_timestamp, index_l1_info_tree) = header.split_at(U32_FIELD_LEN);
        let block = Self::new(be_u32(delta_timestamp), be_u32(index_l1_info_tree));
        Ok((block, start + BLOCK_HEADER_LEN))
    }
}

/// A batch of L2 blocks.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Batch {
    /// The blocks, in batch order.
    pub blocks: Vec<L2Block>,
}

impl Batch {
    /// Decodes a batch. See [decode_batch].
    pub fn decode(buf: &[u8]) -> Result<Self, DecodeError> {
        let mut blocks = Vec::new();
        let mut state = FramerState::NoActiveBlock;
        let mut cursor = 0;

        while cursor < buf.len() {
            if buf[cursor] == CHANGE_L2_BLOCK_MARKER {
                let (block, next) = L2Block::decode_header(buf, cursor)?;
                if let FramerState::InBlock(sealed) =
                    mem::replace(&mut state, FramerState::InBlock(block))
                {
                    blocks.push(sealed);
                }
                cursor = next;
                continue;
            }

            // A transaction never starts with the marker byte, it is always an RLP list.
            let FramerState::InBlock(block) = &mut state else {
                return Err(if is_rlp_list(buf, cursor) {
                    DecodeError::MissingLeadingMarker { offset: cursor }
                } else {
                    DecodeError::MalformedBatch { offset: cursor }
                });
            };
            let (tx, next) = decode_transaction(buf, cursor)?;
            block.transactions.push(tx);
            cursor = next;
        }

        if let FramerState::InBlock(sealed) = state {
            blocks.push(sealed);
        }
        Ok(Self { blocks })
    }

    /// Returns the number of transactions across all blocks.
    pub fn tx_count(&self) -> usize {
        self.blocks.iter().map(|block| block.transactions.len()).sum()
    }

    /// Returns an iterator over all transactions, in batch order.
    pub fn transactions(&self) -> impl Iterator<Item = &L2Transaction> {
        self.blocks.iter().flat_map(|block| block.transactions.iter())
    }
}

/// A forced batch: transactions forced through L1, without block markers.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ForcedBatch {
    /// The transactions, in batch order.
    pub transactions: Vec<L2Transaction>,
}

impl ForcedBatch {
    /// Decodes a forced batch. See [decode_forced_batch].
    pub fn decode(buf: &[u8]) -> Result<Self, DecodeError> {
        let mut transactions = Vec::new();
        let mut cursor = 0;
        while cursor < buf.len() {
            let (tx, next) = decode_transaction(buf, cursor)?;
            transactions.push(tx);
            cursor = next;
        }
        Ok(Self { transactions })
    }
}

/// The state of the framer while walking a batch.
#[derive(Debug)]
enum FramerState {
    /// No change L2 block marker has been read yet.
    NoActiveBlock,
    /// Transactions are appended to this block until the next marker.
    InBlock(L2Block),
}

/// Decodes a batch into its [L2Block]s.
///
/// The batch must start with a change L2 block marker. An empty buffer is an empty batch.
pub fn decode_batch(buf: &[u8]) -> Result<Batch, DecodeError> {
    Batch::decode(buf)
}

/// Decodes a forced batch into its transactions.
pub fn decode_forced_batch(buf: &[u8]) -> Result<ForcedBatch, DecodeError> {
    ForcedBatch::decode(buf)
}

fn be_u32(bytes: &[u8]) -> u32 {
    bytes.iter().fold(0u32, |acc, b| (acc << 8) | u32::from(*b))
}
