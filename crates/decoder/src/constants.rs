//! Byte-layout constants of the Etrog batch format.

/// Marks the start of a new L2 block (a "change L2 block" entry).
pub const CHANGE_L2_BLOCK_MARKER: u8 = 0x0b;

/// Size of each big-endian `u32` field of a block header.
pub const U32_FIELD_LEN: usize = 4;

/// Size of the block header that follows a [CHANGE_L2_BLOCK_MARKER]: the delta timestamp and the
/// L1 info tree index.
pub const BLOCK_HEADER_LEN: usize = 2 * U32_FIELD_LEN;

/// The smallest RLP prefix byte that denotes a list.
pub const RLP_LIST_OFFSET: u8 = 0xc0;

/// The largest list payload whose length fits in the prefix byte itself.
pub const RLP_MAX_SHORT_LIST_LEN: u8 = 55;

/// The prefix of the largest short-form list, `0xc0 + 55`. Prefixes above it carry
/// `prefix - 0xf7` big-endian length bytes.
pub const RLP_LONG_LIST_OFFSET: u8 = RLP_LIST_OFFSET + RLP_MAX_SHORT_LIST_LEN;

/// Size of the RLP prefix byte.
pub const RLP_PREFIX_LEN: usize = 1;

/// Size of the raw `r` signature value trailing each transaction.
pub const R_LEN: usize = 32;

/// Size of the raw `s` signature value trailing each transaction.
pub const S_LEN: usize = 32;

/// Size of the raw, pre EIP-155, `v` value trailing each transaction.
pub const V_LEN: usize = 1;

/// Size of the efficiency percentage trailing each transaction.
pub const EFFICIENCY_PERCENTAGE_LEN: usize = 1;

/// Bytes that follow the RLP body of every transaction.
pub const TX_TRAILER_LEN: usize = R_LEN + S_LEN + V_LEN + EFFICIENCY_PERCENTAGE_LEN;

/// Offset of a pre EIP-155 recovery value (27 or 28).
pub const LEGACY_V_OFFSET: u64 = 27;

/// Offset added to `chain_id * 2` by EIP-155.
pub const EIP155_V_OFFSET: u64 = 35;

/// Size of an address.
pub const ADDRESS_LEN: usize = 20;
