//! Helpers for assembling batch bytes by hand in tests.

use crate::constants::{
    CHANGE_L2_BLOCK_MARKER, RLP_LIST_OFFSET, RLP_LONG_LIST_OFFSET, RLP_MAX_SHORT_LIST_LEN,
};

/// Wraps `payload` in an RLP list header. Supports payloads up to 255 bytes.
pub(crate) fn rlp_list(payload: &[u8]) -> Vec<u8> {
    let mut out = if payload.len() <= RLP_MAX_SHORT_LIST_LEN as usize {
        vec![RLP_LIST_OFFSET + payload.len() as u8]
    } else {
        vec![RLP_LONG_LIST_OFFSET + 1, u8::try_from(payload.len()).unwrap()]
    };
    out.extend_from_slice(payload);
    out
}

/// The RLP fields of a plain transfer: `nonce=0, gasPrice=0, gasLimit=21000, to=0x00..00,
/// value=0`, followed by the already RLP encoded `data` field.
pub(crate) fn transfer_fields(data: &[u8]) -> Vec<u8> {
    let mut fields = vec![0x80, 0x80, 0x82, 0x52, 0x08, 0x94];
    fields.extend_from_slice(&[0u8; 20]);
    fields.push(0x80);
    fields.extend_from_slice(data);
    fields
}

/// The RLP body of a plain transfer with empty data and an optional single byte chain id.
pub(crate) fn transfer_rlp(chain_id: Option<u8>) -> Vec<u8> {
    let mut fields = transfer_fields(&[0x80]);
    if let Some(chain_id) = chain_id {
        assert!(chain_id > 0 && chain_id < 0x80, "single byte chain ids only");
        fields.push(chain_id);
    }
    rlp_list(&fields)
}

/// Appends zeroed `r` and `s`, the raw `v` and the efficiency percentage to an RLP body.
pub(crate) fn with_trailer(mut rlp: Vec<u8>, v: u8, efficiency_percentage: u8) -> Vec<u8> {
    rlp.extend_from_slice(&[0u8; 64]);
    rlp.push(v);
    rlp.push(efficiency_percentage);
    rlp
}

/// A full plain transfer transaction.
pub(crate) fn transfer_tx(chain_id: Option<u8>, v: u8, efficiency_percentage: u8) -> Vec<u8> {
    with_trailer(transfer_rlp(chain_id), v, efficiency_percentage)
}

/// A change L2 block marker and its header.
pub(crate) fn block_header(delta_timestamp: u32, index_l1_info_tree: u32) -> Vec<u8> {
    let mut out = vec![CHANGE_L2_BLOCK_MARKER];
    out.extend_from_slice(&delta_timestamp.to_be_bytes());
    out.extend_from_slice(&index_l1_info_tree.to_be_bytes());
    out
}
