//! Encoding of batches and forced batches, the inverse of [crate::batch::decode_batch] and
//! [crate::batch::decode_forced_batch].

use crate::{
    batch::{Batch, ForcedBatch, L2Block},
    constants::{CHANGE_L2_BLOCK_MARKER, EIP155_V_OFFSET, LEGACY_V_OFFSET},
    errors::EncodeError,
    transaction::{L2Transaction, LegacyTransaction, TxPayload},
};
use alloc::vec::Vec;
use alloy_primitives::U256;
use alloy_rlp::{BufMut, Encodable, Header, EMPTY_STRING_CODE};

/// Encodes a [Batch] into its byte representation.
pub fn encode_batch(batch: &Batch) -> Result<Vec<u8>, EncodeError> {
    let mut out = Vec::new();
    batch.encode(&mut out)?;
    Ok(out)
}

/// Encodes a [ForcedBatch] into its byte representation.
pub fn encode_forced_batch(batch: &ForcedBatch) -> Result<Vec<u8>, EncodeError> {
    let mut out = Vec::new();
    batch.encode(&mut out)?;
    Ok(out)
}

impl Batch {
    /// Encodes the batch into `out`.
    pub fn encode(&self, out: &mut Vec<u8>) -> Result<(), EncodeError> {
        self.blocks.iter().try_for_each(|block| block.encode(out))
    }
}

impl ForcedBatch {
    /// Encodes the forced batch into `out`.
    pub fn encode(&self, out: &mut Vec<u8>) -> Result<(), EncodeError> {
        self.transactions.iter().try_for_each(|tx| tx.encode(out))
    }
}

impl L2Block {
    /// Encodes the change L2 block marker, the block header and the block transactions.
    pub fn encode(&self, out: &mut Vec<u8>) -> Result<(), EncodeError> {
        out.push(CHANGE_L2_BLOCK_MARKER);
        out.extend_from_slice(&self.delta_timestamp.to_be_bytes());
        out.extend_from_slice(&self.index_l1_info_tree.to_be_bytes());
        self.transactions.iter().try_for_each(|tx| tx.encode(out))
    }
}

impl L2Transaction {
    /// Encodes the transaction followed by its efficiency percentage.
    ///
    /// [TxPayload::Raw] bytes are written verbatim.
    pub fn encode(&self, out: &mut Vec<u8>) -> Result<(), EncodeError> {
        match &self.payload {
            TxPayload::Legacy(tx) => tx.encode(out)?,
            TxPayload::Raw(bytes) => out.extend_from_slice(bytes),
        }
        out.push(self.efficiency_percentage);
        Ok(())
    }
}

impl LegacyTransaction {
    /// Encodes the RLP body and the `r`, `s`, raw `v` trailer.
    ///
    /// A transaction with a chain id is encoded as `[nonce, gasPrice, gasLimit, to, value, data,
    /// chainId, 0, 0]`, the form sequencers sign over.
    pub fn encode(&self, out: &mut Vec<u8>) -> Result<(), EncodeError> {
        let v = self.raw_v()?;

        let header = Header { list: true, payload_length: self.fields_len() };
        header.encode(out);
        self.nonce.encode(out);
        self.gas_price.encode(out);
        self.gas_limit.encode(out);
        match &self.to {
            Some(to) => to.encode(out),
            None => out.put_u8(EMPTY_STRING_CODE),
        }
        self.value.encode(out);
        self.data.encode(out);
        if let Some(chain_id) = self.chain_id {
            chain_id.encode(out);
            out.put_u8(EMPTY_STRING_CODE);
            out.put_u8(EMPTY_STRING_CODE);
        }

        out.extend_from_slice(self.r.as_slice());
        out.extend_from_slice(self.s.as_slice());
        out.push(v);
        Ok(())
    }

    /// Length of the RLP list payload.
    fn fields_len(&self) -> usize {
        let mut len = self.nonce.length() +
            self.gas_price.length() +
            self.gas_limit.length() +
            self.to.as_ref().map_or(1, Encodable::length) +
            self.value.length() +
            self.data.length();
        if let Some(chain_id) = self.chain_id {
            len += chain_id.length() + 2;
        }
        len
    }

    /// Folds `v` back into its single byte, pre EIP-155, form.
    fn raw_v(&self) -> Result<u8, EncodeError> {
        let out_of_range = EncodeError::VOutOfRange { v: self.v, chain_id: self.chain_id };
        let raw = match self.chain_id {
            Some(chain_id) => {
                let eip155 = U256::from(chain_id) * U256::from(2) + U256::from(EIP155_V_OFFSET);
                self.v.checked_add(U256::from(LEGACY_V_OFFSET)).and_then(|v| v.checked_sub(eip155))
            }
            None => Some(self.v),
        };
        raw.and_then(|raw| u8::try_from(raw).ok()).ok_or(out_of_range)
    }
}
