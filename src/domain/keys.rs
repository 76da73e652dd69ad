//! secp256k1 key validity and the public-key/address derivations that
//! give a node its identity.

use secp256k1::{PublicKey as Secp256k1PublicKey, Secp256k1, SecretKey};
use thiserror::Error;

use crate::domain::address::{Address, AddressError};
use crate::domain::primitives::keccak256;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyError {
    #[error("private key is not a valid secp256k1 scalar")]
    InvalidPrivateKey,
    #[error("public key does not lie on the secp256k1 curve")]
    InvalidPublicKey,
    #[error(transparent)]
    Address(#[from] AddressError),
}

/// A 64-byte uncompressed public key with the leading `0x04` tag stripped
/// — the wire form used throughout the discovery protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PublicKey(pub [u8; 64]);

impl PublicKey {
    pub fn as_bytes(&self) -> &[u8; 64] {
        &self.0
    }

    fn to_tagged(self) -> [u8; 65] {
        let mut tagged = [0u8; 65];
        tagged[0] = 0x04;
        tagged[1..].copy_from_slice(&self.0);
        tagged
    }
}

/// `true` iff `key` is exactly 32 bytes and within the secp256k1 group
/// order (i.e. a valid private scalar).
pub fn is_valid_private(key: &[u8]) -> bool {
    key.len() == 32 && SecretKey::from_slice(key).is_ok()
}

/// `true` iff `pub_bytes` is 64 bytes and the corresponding point (with
/// an implicit `0x04` tag) lies on the secp256k1 curve. When `sanitize`
/// is set and the input is not 64 bytes, it is parsed directly instead
/// (accepting compressed or explicitly tagged uncompressed forms).
pub fn is_valid_public(pub_bytes: &[u8], sanitize: bool) -> bool {
    if pub_bytes.len() == 64 {
        let mut tagged = [0u8; 65];
        tagged[0] = 0x04;
        tagged[1..].copy_from_slice(pub_bytes);
        return Secp256k1PublicKey::from_slice(&tagged).is_ok();
    }
    sanitize && Secp256k1PublicKey::from_slice(pub_bytes).is_ok()
}

/// Normalize any accepted public-key encoding into the 64-byte tag-less
/// wire form.
pub fn import_public(pub_bytes: &[u8], sanitize: bool) -> Result<PublicKey, KeyError> {
    if pub_bytes.len() == 64 {
        if !is_valid_public(pub_bytes, false) {
            return Err(KeyError::InvalidPublicKey);
        }
        let mut out = [0u8; 64];
        out.copy_from_slice(pub_bytes);
        return Ok(PublicKey(out));
    }
    if !sanitize {
        return Err(KeyError::InvalidPublicKey);
    }
    let parsed =
        Secp256k1PublicKey::from_slice(pub_bytes).map_err(|_| KeyError::InvalidPublicKey)?;
    let uncompressed = parsed.serialize_uncompressed();
    let mut out = [0u8; 64];
    out.copy_from_slice(&uncompressed[1..]);
    Ok(PublicKey(out))
}

/// `keccak256(pub64)` truncated to its low 20 bytes, per Ethereum's
/// address derivation.
pub fn pub_to_address(pub_bytes: &[u8], sanitize: bool) -> Result<Address, KeyError> {
    let public_key = import_public(pub_bytes, sanitize)?;
    let hash = keccak256(&public_key.0);
    Address::from_slice(&hash[12..]).map_err(KeyError::from)
}

/// Derive the uncompressed, tag-less public key for a private key.
pub fn private_to_public(private_key: &[u8]) -> Result<PublicKey, KeyError> {
    let secret = SecretKey::from_slice(private_key).map_err(|_| KeyError::InvalidPrivateKey)?;
    let secp = Secp256k1::new();
    let public = Secp256k1PublicKey::from_secret_key(&secp, &secret);
    let uncompressed = public.serialize_uncompressed();
    let mut out = [0u8; 64];
    out.copy_from_slice(&uncompressed[1..]);
    Ok(PublicKey(out))
}

/// `pub_to_address(private_to_public(private_key))`.
pub fn private_to_address(private_key: &[u8]) -> Result<Address, KeyError> {
    let public = private_to_public(private_key)?;
    pub_to_address(&public.0, false)
}

/// Derive the 256-bit node identifier used as the k-bucket metric space
/// key from a public key: `keccak256(pub64)`, distinct from the 20-byte
/// Ethereum address derived from the same hash.
pub fn node_id_from_public(public_key: &PublicKey) -> [u8; 32] {
    keccak256(&public_key.0)
}

#[allow(dead_code)]
fn tagged_form(public_key: PublicKey) -> [u8; 65] {
    public_key.to_tagged()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_private_key() -> [u8; 32] {
        let mut key = [0u8; 32];
        key[31] = 1;
        key
    }

    #[test]
    fn valid_private_key_accepted() {
        assert!(is_valid_private(&sample_private_key()));
    }

    #[test]
    fn zero_private_key_rejected() {
        assert!(!is_valid_private(&[0u8; 32]));
    }

    #[test]
    fn private_to_address_matches_pub_to_address() {
        let key = sample_private_key();
        let public = private_to_public(&key).unwrap();
        let addr_via_pub = pub_to_address(&public.0, false).unwrap();
        let addr_direct = private_to_address(&key).unwrap();
        assert_eq!(addr_via_pub, addr_direct);
        assert_eq!(addr_direct.as_bytes().len(), 20);
    }

    #[test]
    fn off_curve_public_key_rejected() {
        let garbage = [0xAAu8; 64];
        assert!(!is_valid_public(&garbage, false));
    }

    #[test]
    fn import_public_normalizes_64_byte_form() {
        let key = sample_private_key();
        let public = private_to_public(&key).unwrap();
        let imported = import_public(&public.0, false).unwrap();
        assert_eq!(imported, public);
    }

    #[test]
    fn node_id_differs_from_address_but_is_deterministic() {
        let key = sample_private_key();
        let public = private_to_public(&key).unwrap();
        let node_id = node_id_from_public(&public);
        let node_id_again = node_id_from_public(&public);
        assert_eq!(node_id, node_id_again);
        assert_eq!(node_id.len(), 32);
    }
}
