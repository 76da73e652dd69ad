//! Byte, RLP, and hashing primitives shared by the account and address
//! components.
//!
//! Reference: devp2p-dpt data model, component A.

use primitive_types::U256;
use sha3::{Digest, Keccak256};

/// keccak-256 hash of the empty byte string, `keccak256("")`.
pub const KECCAK256_NULL: [u8; 32] = [
    0xc5, 0xd2, 0x46, 0x01, 0x86, 0xf7, 0x23, 0x3c, 0x92, 0x7e, 0x7d, 0xb2, 0xdc, 0xc7, 0x03, 0xc0,
    0xe5, 0x00, 0xb6, 0x53, 0xca, 0x82, 0x27, 0x3b, 0x7b, 0xfa, 0xd8, 0x04, 0x5d, 0x85, 0xa4, 0x70,
];

/// keccak-256 hash of the RLP encoding of an empty trie, `keccak256(rlp(""))`.
pub const KECCAK256_RLP: [u8; 32] = [
    0x56, 0xe8, 0x1f, 0x17, 0x1b, 0xcc, 0x55, 0xa6, 0xff, 0x83, 0x45, 0xe6, 0x92, 0xc0, 0xf8, 0x6e,
    0x5b, 0x48, 0xe0, 0x1b, 0x99, 0x6c, 0xad, 0xc0, 0x01, 0x62, 0x2f, 0xb5, 0xe3, 0x63, 0xb4, 0x21,
];

/// keccak-256 of an arbitrary byte slice.
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Encode a `U256` as big-endian bytes with no leading zero byte. Zero
/// encodes as the empty slice, matching RLP's canonical integer encoding.
pub fn unpadded_be_bytes(value: U256) -> Vec<u8> {
    if value.is_zero() {
        return Vec::new();
    }
    let mut buf = [0u8; 32];
    value.to_big_endian(&mut buf);
    let first_nonzero = buf.iter().position(|&b| b != 0).unwrap_or(32);
    buf[first_nonzero..].to_vec()
}

/// Decode unpadded big-endian bytes (as produced by [`unpadded_be_bytes`])
/// back into a `U256`. The empty slice decodes to zero.
pub fn u256_from_unpadded_be(bytes: &[u8]) -> U256 {
    U256::from_big_endian(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keccak256_null_matches_known_constant() {
        assert_eq!(keccak256(&[]), KECCAK256_NULL);
    }

    #[test]
    fn zero_encodes_as_empty_slice() {
        assert!(unpadded_be_bytes(U256::zero()).is_empty());
        assert_eq!(u256_from_unpadded_be(&[]), U256::zero());
    }

    #[test]
    fn round_trips_arbitrary_values() {
        let v = U256::from(0x01ff_u64);
        let bytes = unpadded_be_bytes(v);
        assert_eq!(bytes, vec![0x01, 0xff]);
        assert_eq!(u256_from_unpadded_be(&bytes), v);
    }
}
