//! Reads RLP list headers directly from a batch buffer.

use crate::{
    constants::{RLP_LIST_OFFSET, RLP_LONG_LIST_OFFSET, RLP_PREFIX_LEN},
    errors::DecodeError,
};
use alloy_rlp::Header;

/// Returns the number of bytes occupied by the RLP list starting at `offset`, header included.
///
/// Only the list header is read: the payload is not required to be present in `buf`.
///
/// ```text
/// 0xc0                 -> 1 byte (empty list)
/// 0xc3 .. .. ..        -> 4 bytes
/// 0xf8 0x38 <56 bytes> -> 58 bytes
/// ```
pub fn rlp_list_length(buf: &[u8], offset: usize) -> Result<usize, DecodeError> {
    let prefix = *buf.get(offset).ok_or(DecodeError::TruncatedLength {
        offset,
        needed: RLP_PREFIX_LEN,
        available: 0,
    })?;

    if prefix < RLP_LIST_OFFSET {
        return Err(DecodeError::NotAList { offset, prefix });
    }

    if prefix <= RLP_LONG_LIST_OFFSET {
        return Ok(RLP_PREFIX_LEN + (prefix - RLP_LIST_OFFSET) as usize);
    }

    // Long form: the prefix counts the big-endian length bytes that follow it. At most 8.
    let len_of_len = (prefix - RLP_LONG_LIST_OFFSET) as usize;
    let start = offset + RLP_PREFIX_LEN;
    let len_bytes = buf.get(start..start + len_of_len).ok_or(DecodeError::TruncatedLength {
        offset,
        needed: RLP_PREFIX_LEN + len_of_len,
        available: buf.len() - offset,
    })?;
    let payload_len = len_bytes.iter().fold(0u64, |acc, b| (acc << 8) | u64::from(*b));

    usize::try_from(payload_len)
        .ok()
        .and_then(|len| len.checked_add(RLP_PREFIX_LEN + len_of_len))
        .ok_or(DecodeError::LengthOverflow { offset })
}

/// Returns whether a complete RLP list item starts at `offset`.
///
/// The header must be canonical and the whole payload must be present. The payload items are not
/// inspected, so nested lists are accepted.
pub(crate) fn is_rlp_list(buf: &[u8], offset: usize) -> bool {
    let Some(mut rest) = buf.get(offset..) else {
        return false;
    };
    Header::decode(&mut rest)
        .is_ok_and(|header| header.list && header.payload_length <= rest.len())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test_utils::transfer_tx;
    use alloy_primitives::hex;
    use proptest::{collection::vec, prelude::any, proptest};

    #[test]
    fn test_rlp_list_length_empty_list() {
        assert_eq!(rlp_list_length(&[0xc0], 0), Ok(1));
    }

    #[test]
    fn test_rlp_list_length_short_form() {
        assert_eq!(rlp_list_length(&hex!("c3010203"), 0), Ok(4));
        // The largest short-form list.
        assert_eq!(rlp_list_length(&[0xf7], 0), Ok(56));
    }

    #[test]
    fn test_rlp_list_length_ignores_payload_presence() {
        assert_eq!(rlp_list_length(&[0xc5], 0), Ok(6));
    }

    #[test]
    fn test_rlp_list_length_long_form_one_byte() {
        let mut buf = vec![0xf8, 0x38];
        buf.extend_from_slice(&[0u8; 56]);
        assert_eq!(rlp_list_length(&buf, 0), Ok(1 + 1 + 56));
    }

    #[test]
    fn test_rlp_list_length_long_form_header_bytes() {
        // A 56 byte payload is the first to need a length byte.
        let mut header = Vec::new();
        Header { list: true, payload_length: 56 }.encode(&mut header);
        assert_eq!(header, [0xf8, 0x38]);
    }

    #[test]
    fn test_rlp_list_length_long_form_two_bytes() {
        assert_eq!(rlp_list_length(&hex!("f90100"), 0), Ok(1 + 2 + 256));
        assert_eq!(rlp_list_length(&hex!("f9ffff"), 0), Ok(1 + 2 + 0xffff));
    }

    #[test]
    fn test_rlp_list_length_at_offset() {
        assert_eq!(rlp_list_length(&hex!("0b0000c2ffff"), 3), Ok(3));
        assert_eq!(rlp_list_length(&hex!("0000f840"), 2), Ok(1 + 1 + 0x40));
    }

    #[test]
    fn test_rlp_list_length_not_a_list() {
        for prefix in [0x00, 0x0b, 0x80, 0xb8, 0xbf] {
            let err = DecodeError::NotAList { offset: 0, prefix };
            assert_eq!(rlp_list_length(&[prefix], 0), Err(err));
        }
    }

    #[test]
    fn test_rlp_list_length_truncated() {
        assert_eq!(
            rlp_list_length(&[], 0),
            Err(DecodeError::TruncatedLength { offset: 0, needed: 1, available: 0 })
        );
        assert_eq!(
            rlp_list_length(&[0xf8], 0),
            Err(DecodeError::TruncatedLength { offset: 0, needed: 2, available: 1 })
        );
        assert_eq!(
            rlp_list_length(&hex!("00fa0102"), 1),
            Err(DecodeError::TruncatedLength { offset: 1, needed: 4, available: 3 })
        );
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn test_rlp_list_length_overflow() {
        assert_eq!(
            rlp_list_length(&hex!("ffffffffffffffffff"), 0),
            Err(DecodeError::LengthOverflow { offset: 0 })
        );
    }

    #[test]
    fn test_is_rlp_list() {
        assert!(is_rlp_list(&[0xc0], 0));
        assert!(is_rlp_list(&transfer_tx(None, 27, 0), 0));
        assert!(is_rlp_list(&hex!("0b0000c0"), 3));
        // Only the list item itself has to be complete.
        assert!(is_rlp_list(&hex!("c18001"), 0));
    }

    #[test]
    fn test_is_rlp_list_nested() {
        assert!(is_rlp_list(&hex!("c1c0"), 0));
        assert!(is_rlp_list(&hex!("c3c28080"), 0));
    }

    #[test]
    fn test_is_rlp_list_rejects() {
        // Truncated payload.
        assert!(!is_rlp_list(&hex!("c580"), 0));
        // Not a list.
        assert!(!is_rlp_list(&[0x01], 0));
        assert!(!is_rlp_list(&hex!("820102"), 0));
        // Non-canonical long form for a short payload.
        assert!(!is_rlp_list(&hex!("f80180"), 0));
        // Truncated long-form length.
        assert!(!is_rlp_list(&[0xf9, 0x01], 0));
        // Out of bounds.
        assert!(!is_rlp_list(&[], 0));
        assert!(!is_rlp_list(&[0xc0], 2));
    }

    proptest! {
        #[test]
        fn test_rlp_list_length_matches_alloy_header(payload_length in 0usize..1 << 24) {
            let mut encoded = Vec::new();
            Header { list: true, payload_length }.encode(&mut encoded);
            assert_eq!(rlp_list_length(&encoded, 0).unwrap(), encoded.len() + payload_length);
        }

        #[test]
        fn test_rlp_list_length_never_panics(buf in vec(any::<u8>(), 0..16), offset in 0usize..16) {
            let _ = rlp_list_length(&buf, offset);
        }
    }
}
