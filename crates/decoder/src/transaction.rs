//! This module contains the [L2Transaction] type and the logic reconstructing legacy
//! transactions from their batch encoding.
//!
//! A transaction in a batch is an RLP list of the legacy fields `[nonce, gasPrice, gasLimit, to,
//! value, data]`, optionally followed by `chainId`, and then the raw, non-RLP, trailer:
//!
//! ```text
//! | rlp list | r (32) | s (32) | v (1) | efficiency percentage (1) |
//! ```

use crate::{
    constants::{
        ADDRESS_LEN, EIP155_V_OFFSET, LEGACY_V_OFFSET, R_LEN, S_LEN, TX_TRAILER_LEN, V_LEN,
    },
    errors::{DecodeError, TxConversionError},
    rlp::rlp_list_length,
};
use alloc::vec::Vec;
use alloy_consensus::{SignableTransaction, Signed, TxLegacy};
use alloy_primitives::{Address, Bytes, Signature, TxKind, B256, U256};
use alloy_rlp::Decodable;

/// A transaction inside an L2 block of a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct L2Transaction {
    /// The effective gas price percentage granted to the transaction, over 255.
    pub efficiency_percentage: u8,
    /// Whether the payload is kept in its encoded form ([TxPayload::Raw]).
    pub encoded: bool,
    /// The transaction itself.
    pub payload: TxPayload,
}

impl L2Transaction {
    /// Creates a transaction from a reconstructed [LegacyTransaction].
    pub const fn legacy(tx: LegacyTransaction, efficiency_percentage: u8) -> Self {
        Self { efficiency_percentage, encoded: false, payload: TxPayload::Legacy(tx) }
    }

    /// Creates a transaction from its already encoded bytes: the RLP body and the signature
    /// trailer, without the efficiency percentage.
    pub const fn raw(bytes: Bytes, efficiency_percentage: u8) -> Self {
        Self { efficiency_percentage, encoded: true, payload: TxPayload::Raw(bytes) }
    }

    /// Returns the reconstructed legacy transaction, if the payload is not kept encoded.
    pub const fn as_legacy(&self) -> Option<&LegacyTransaction> {
        match &self.payload {
            TxPayload::Legacy(tx) => Some(tx),
            TxPayload::Raw(_) => None,
        }
    }
}

/// The payload of an [L2Transaction].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[allow(clippy::large_enum_variant)]
pub enum TxPayload {
    /// A legacy transaction reconstructed from the batch.
    Legacy(LegacyTransaction),
    /// Already encoded transaction bytes.
    Raw(Bytes),
}

/// A signed legacy transaction reconstructed from a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct LegacyTransaction {
    /// The sender's nonce.
    pub nonce: u64,
    /// The gas price.
    pub gas_price: U256,
    /// The gas limit.
    pub gas_limit: u64,
    /// The recipient, `None` for contract creations.
    pub to: Option<Address>,
    /// The ETH value transferred.
    pub value: U256,
    /// Transaction calldata.
    pub data: Bytes,
    /// The chain id, when the transaction carries one.
    pub chain_id: Option<u64>,
    /// The signature recovery value, EIP-155 adjusted when a chain id is present.
    pub v: U256,
    /// The signature `r` value.
    pub r: B256,
    /// The signature `s` value.
    pub s: B256,
}

impl LegacyTransaction {
    /// Rebuilds a transaction from its decoded RLP `fields` and raw signature trailer.
    ///
    /// `offset` is the position of the transaction in the batch, used for error reporting.
    pub fn from_fields(
        fields: &[Bytes],
        r: B256,
        s: B256,
        v: u8,
        offset: usize,
    ) -> Result<Self, DecodeError> {
        let [nonce, gas_price, gas_limit, to, value, data, rest @ ..] = fields else {
            return Err(DecodeError::UnsupportedTxShape { offset, fields: fields.len() });
        };

        let overflow = |field| DecodeError::IntegerOverflow { offset, field };
        let chain_id =
            rest.first().map(|id| be_u64(id).ok_or_else(|| overflow("chainId"))).transpose()?;
        let to = match to.len() {
            0 => None,
            ADDRESS_LEN => Some(Address::from_slice(to)),
            len => return Err(DecodeError::InvalidAddress { offset, len }),
        };

        Ok(Self {
            nonce: be_u64(nonce).ok_or_else(|| overflow("nonce"))?,
            gas_price: U256::try_from_be_slice(gas_price).ok_or_else(|| overflow("gasPrice"))?,
            gas_limit: be_u64(gas_limit).ok_or_else(|| overflow("gasLimit"))?,
            to,
            value: U256::try_from_be_slice(value).ok_or_else(|| overflow("value"))?,
            data: data.clone(),
            chain_id,
            v: recover_v(v, chain_id),
            r,
            s,
        })
    }

    /// Converts the transaction into an [alloy_consensus::Signed] [TxLegacy].
    pub fn to_signed(&self) -> Result<Signed<TxLegacy>, TxConversionError> {
        let gas_price = u128::try_from(self.gas_price)
            .map_err(|_| TxConversionError::GasPriceOverflow(self.gas_price))?;
        let v = u64::try_from(self.v).map_err(|_| TxConversionError::InvalidV(self.v))?;
        let signature = Signature::from_rs_and_parity(
            U256::from_be_bytes(self.r.0),
            U256::from_be_bytes(self.s.0),
            v,
        )
        .map_err(|_| TxConversionError::InvalidV(self.v))?;

        let tx = TxLegacy {
            chain_id: self.chain_id,
            nonce: self.nonce,
            gas_price,
            gas_limit: self.gas_limit,
            to: self.to.map_or(TxKind::Create, TxKind::Call),
            value: self.value,
            input: self.data.clone(),
        };
        Ok(tx.into_signed(signature))
    }

    /// Returns the hash of the signed transaction.
    pub fn hash(&self) -> Result<B256, TxConversionError> {
        self.to_signed().map(|signed| *signed.hash())
    }
}

/// Decodes the transaction starting at `offset`.
///
/// Returns the transaction and the offset of the first byte following it.
pub fn decode_transaction(
    buf: &[u8],
    offset: usize,
) -> Result<(L2Transaction, usize), DecodeError> {
    let span = rlp_list_length(buf, offset)?;
    let body_end = offset.checked_add(span).ok_or(DecodeError::LengthOverflow { offset })?;
    let end =
        body_end.checked_add(TX_TRAILER_LEN).ok_or(DecodeError::LengthOverflow { offset })?;
    if end > buf.len() {
        return Err(DecodeError::TruncatedTransaction { offset, end, len: buf.len() });
    }

    let fields = decode_fields(&buf[offset..body_end], offset)?;

    let (r, trailer) = buf[body_end..end].split_at(R_LEN);
    let (s, trailer) = trailer.split_at(S_LEN);
    let (v, efficiency_percentage) = (trailer[0], trailer[V_LEN]);

    let (r, s) = (B256::from_slice(r), B256::from_slice(s));
    let tx = LegacyTransaction::from_fields(&fields, r, s, v, offset)?;
    Ok((L2Transaction::legacy(tx, efficiency_percentage), end))
}

/// Decodes an RLP list item into its byte string fields.
fn decode_fields(mut item: &[u8], offset: usize) -> Result<Vec<Bytes>, DecodeError> {
    Vec::<Bytes>::decode(&mut item).map_err(|err| DecodeError::InvalidRlp { offset, err })
}

/// Applies EIP-155 to the raw recovery value when the transaction has a chain id:
/// `v = (v_raw - 27) + (chain_id * 2 + 35)`.
fn recover_v(v_raw: u8, chain_id: Option<u64>) -> U256 {
    match chain_id {
        Some(chain_id) => {
            U256::from(chain_id) * U256::from(2) +
                U256::from(u64::from(v_raw) + EIP155_V_OFFSET - LEGACY_V_OFFSET)
        }
        None => U256::from(v_raw),
    }
}

/// Reads a big-endian integer of at most 8 bytes. Empty is zero.
fn be_u64(bytes: &[u8]) -> Option<u64> {
    (bytes.len() <= 8).then(|| bytes.iter().fold(0u64, |acc, b| (acc << 8) | u64::from(*b)))
}
