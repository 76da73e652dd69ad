//! CREATE and CREATE2 contract address derivation (EIP-1014).

use rlp::RlpStream;

use crate::domain::address::{Address, AddressError};
use crate::domain::primitives::keccak256;

/// `keccak256(rlp([from, nonce]))`, truncated to the low 20 bytes.
/// `nonce` is unpadded big-endian; zero encodes as the empty byte string,
/// matching RLP canonical form.
pub fn generate_address(from: &Address, nonce: &[u8]) -> Address {
    let mut stream = RlpStream::new_list(2);
    stream.append(&from.as_bytes().as_slice());
    stream.append(&nonce);
    let hash = keccak256(&stream.out());
    Address::from_slice(&hash[12..]).expect("low 20 bytes of a 32-byte hash is always 20 bytes")
}

/// `keccak256(0xff ‖ from ‖ salt ‖ keccak256(init_code))`, truncated to
/// the low 20 bytes.
pub fn generate_address2(
    from: &Address,
    salt: &[u8],
    init_code: &[u8],
) -> Result<Address, AddressError> {
    if salt.len() != 32 {
        return Err(AddressError::LengthError(salt.len()));
    }
    let init_code_hash = keccak256(init_code);

    let mut preimage = Vec::with_capacity(1 + 20 + 32 + 32);
    preimage.push(0xff);
    preimage.extend_from_slice(from.as_bytes());
    preimage.extend_from_slice(salt);
    preimage.extend_from_slice(&init_code_hash);

    let hash = keccak256(&preimage);
    Ok(Address::from_slice(&hash[12..]).expect("low 20 bytes of a 32-byte hash is always 20 bytes"))
}
