//! 20-byte Ethereum addresses and their EIP-55 / EIP-1191 checksummed
//! string representation.

use thiserror::Error;

use crate::domain::primitives::keccak256;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    #[error("address must be exactly 20 bytes, got {0}")]
    LengthError(usize),
    #[error("string is not a well-formed 0x-prefixed 40-hex-digit address")]
    InvalidFormat,
}

/// A 20-byte Ethereum address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Address([u8; 20]);

impl Address {
    pub fn from_slice(bytes: &[u8]) -> Result<Self, AddressError> {
        if bytes.len() != 20 {
            return Err(AddressError::LengthError(bytes.len()));
        }
        let mut out = [0u8; 20];
        out.copy_from_slice(bytes);
        Ok(Self(out))
    }

    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Parse a `0x`-prefixed 40-hex-digit string, case-insensitively.
    /// Does not validate a checksum; use [`is_valid_checksum`] for that.
    pub fn from_hex(s: &str) -> Result<Self, AddressError> {
        let stripped = s.strip_prefix("0x").ok_or(AddressError::InvalidFormat)?;
        if stripped.len() != 40 || !stripped.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(AddressError::InvalidFormat);
        }
        let bytes = hex::decode(stripped).map_err(|_| AddressError::InvalidFormat)?;
        Self::from_slice(&bytes)
    }

    /// Lowercase `0x`-prefixed hex representation.
    pub fn to_lower_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }

    /// EIP-55 (or, with `chain_id`, EIP-1191) checksummed representation.
    pub fn to_checksum_hex(&self, chain_id: Option<u64>) -> String {
        to_checksum_address(&self.to_lower_hex(), chain_id)
            .expect("lowercase hex produced by this type is always well-formed")
    }
}

/// Matches `^0x[0-9a-fA-F]{40}$`.
pub fn is_valid_address(s: &str) -> bool {
    s.strip_prefix("0x")
        .map(|hex| hex.len() == 40 && hex.bytes().all(|b| b.is_ascii_hexdigit()))
        .unwrap_or(false)
}

/// Apply the EIP-55 / EIP-1191 checksum-case rule to a validly formatted
/// address string. `chain_id` selects EIP-1191 mode; `None` is plain
/// EIP-55. Rejects strings that are not a well-formed hex address (case
/// is irrelevant on input — the address is lowercased before hashing).
pub fn to_checksum_address(address: &str, chain_id: Option<u64>) -> Result<String, AddressError> {
    if !is_valid_address(address) {
        return Err(AddressError::InvalidFormat);
    }
    let addr_lower = address[2..].to_ascii_lowercase();

    let mut preimage = String::new();
    if let Some(id) = chain_id {
        preimage.push_str(&id.to_string());
        preimage.push_str("0x");
    }
    preimage.push_str(&addr_lower);

    let hash = keccak256(preimage.as_bytes());
    let hash_hex = hex::encode(hash);

    let mut out = String::with_capacity(42);
    out.push_str("0x");
    for (i, c) in addr_lower.chars().enumerate() {
        if c.is_ascii_digit() {
            out.push(c);
            continue;
        }
        let nibble = hash_hex.as_bytes()[i];
        let nibble_value = (nibble as char).to_digit(16).unwrap_or(0);
        if nibble_value >= 8 {
            out.push(c.to_ascii_uppercase());
        } else {
            out.push(c);
        }
    }
    Ok(out)
}

/// `true` iff `s` is a well-formed address whose case matches the
/// checksum for `chain_id`.
pub fn is_valid_checksum(s: &str, chain_id: Option<u64>) -> bool {
    if !is_valid_address(s) {
        return false;
    }
    match to_checksum_address(s, chain_id) {
        Ok(checksummed) => checksummed == s,
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eip55_known_vector() {
        let checksummed =
            to_checksum_address("0xfb6916095ca1df60bb79ce92ce3ea74c37c5d359", None).unwrap();
        assert_eq!(checksummed, "0xfB6916095ca1df60bB79Ce92cE3Ea74c37c5d359");
        assert!(is_valid_checksum(&checksummed, None));
    }

    #[test]
    fn eip1191_differs_from_eip55() {
        let addr = "0xfb6916095ca1df60bb79ce92ce3ea74c37c5d359";
        let eip55 = to_checksum_address(addr, None).unwrap();
        let eip1191 = to_checksum_address(addr, Some(30)).unwrap();
        assert_ne!(eip55, eip1191);
        assert!(is_valid_checksum(&eip1191, Some(30)));
        assert!(!is_valid_checksum(&eip1191, None));
    }

    #[test]
    fn checksum_is_idempotent() {
        let once = to_checksum_address("0xfb6916095ca1df60bb79ce92ce3ea74c37c5d359", None).unwrap();
        let twice = to_checksum_address(&once, None).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn rejects_malformed_strings() {
        assert!(!is_valid_address("0xdead"));
        assert!(!is_valid_address("fb6916095ca1df60bb79ce92ce3ea74c37c5d359"));
        assert!(to_checksum_address("not-an-address", None).is_err());
    }

    #[test]
    fn from_hex_rejects_wrong_length() {
        assert!(matches!(
            Address::from_hex("0xdead"),
            Err(AddressError::InvalidFormat)
        ));
    }
}
