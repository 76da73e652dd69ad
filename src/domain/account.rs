//! Ethereum account model: RLP-encoded state, EIP-161 emptiness, and the
//! slim/full body conversion used by state-sync wire formats.

use primitive_types::U256;
use rlp::{Rlp, RlpStream};
use thiserror::Error;

use crate::domain::primitives::{
    u256_from_unpadded_be, unpadded_be_bytes, KECCAK256_NULL, KECCAK256_RLP,
};

/// Errors raised while constructing or decoding an [`Account`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccountError {
    #[error("account RLP is not a well-formed 4-element list")]
    MalformedAccount,
    #[error("account field violates an invariant: {0}")]
    InvalidAccount(&'static str),
}

/// The state trie leaf value for an Ethereum account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    nonce: U256,
    balance: U256,
    storage_root: [u8; 32],
    code_hash: [u8; 32],
}

/// Four-element body used on the wire, where either root MAY be empty to
/// mean "use the default value" instead of repeating 32 zero bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlimAccountBody {
    pub nonce: Vec<u8>,
    pub balance: Vec<u8>,
    pub storage_root: Vec<u8>,
    pub code_hash: Vec<u8>,
}

impl Account {
    /// Build an account from optional fields; omitted fields take their
    /// EIP-161 defaults.
    pub fn from_fields(
        nonce: Option<U256>,
        balance: Option<U256>,
        storage_root: Option<[u8; 32]>,
        code_hash: Option<[u8; 32]>,
    ) -> Result<Self, AccountError> {
        let account = Self {
            nonce: nonce.unwrap_or_default(),
            balance: balance.unwrap_or_default(),
            storage_root: storage_root.unwrap_or(KECCAK256_RLP),
            code_hash: code_hash.unwrap_or(KECCAK256_NULL),
        };
        account.validate()?;
        Ok(account)
    }

    fn validate(&self) -> Result<(), AccountError> {
        // U256 is unsigned, so nonce/balance are always non-negative; the
        // invariant worth checking is the hash widths, which the [u8; 32]
        // type already guarantees at compile time.
        Ok(())
    }

    pub fn nonce(&self) -> U256 {
        self.nonce
    }

    pub fn balance(&self) -> U256 {
        self.balance
    }

    pub fn storage_root(&self) -> &[u8; 32] {
        &self.storage_root
    }

    pub fn code_hash(&self) -> &[u8; 32] {
        &self.code_hash
    }

    /// `true` iff the account has deployed code (EIP-161 definition).
    pub fn is_contract(&self) -> bool {
        self.code_hash != KECCAK256_NULL
    }

    /// `true` iff the account is empty per EIP-161: zero nonce, zero
    /// balance, no code. Note storage is not part of the predicate.
    pub fn is_empty(&self) -> bool {
        self.nonce.is_zero() && self.balance.is_zero() && self.code_hash == KECCAK256_NULL
    }

    /// The four-element `[nonce, balance, storageRoot, codeHash]` form,
    /// with nonce/balance unpadded big-endian.
    pub fn raw(&self) -> [Vec<u8>; 4] {
        [
            unpadded_be_bytes(self.nonce),
            unpadded_be_bytes(self.balance),
            self.storage_root.to_vec(),
            self.code_hash.to_vec(),
        ]
    }

    /// RLP-encode the account.
    pub fn serialize(&self) -> Vec<u8> {
        let raw = self.raw();
        let mut stream = RlpStream::new_list(4);
        for field in &raw {
            stream.append(field);
        }
        stream.out().to_vec()
    }

    /// Decode an RLP-encoded account body.
    pub fn from_rlp(bytes: &[u8]) -> Result<Self, AccountError> {
        let rlp = Rlp::new(bytes);
        if !rlp.is_list() || rlp.item_count().map_err(|_| AccountError::MalformedAccount)? != 4 {
            return Err(AccountError::MalformedAccount);
        }

        let nonce_bytes: Vec<u8> = rlp
            .at(0)
            .and_then(|r| r.data().map(|d| d.to_vec()))
            .map_err(|_| AccountError::MalformedAccount)?;
        let balance_bytes: Vec<u8> = rlp
            .at(1)
            .and_then(|r| r.data().map(|d| d.to_vec()))
            .map_err(|_| AccountError::MalformedAccount)?;
        let storage_root_bytes: Vec<u8> = rlp
            .at(2)
            .and_then(|r| r.data().map(|d| d.to_vec()))
            .map_err(|_| AccountError::MalformedAccount)?;
        let code_hash_bytes: Vec<u8> = rlp
            .at(3)
            .and_then(|r| r.data().map(|d| d.to_vec()))
            .map_err(|_| AccountError::MalformedAccount)?;

        let storage_root = bytes32_or_default(&storage_root_bytes, KECCAK256_RLP)?;
        let code_hash = bytes32_or_default(&code_hash_bytes, KECCAK256_NULL)?;

        Self::from_fields(
            Some(u256_from_unpadded_be(&nonce_bytes)),
            Some(u256_from_unpadded_be(&balance_bytes)),
            Some(storage_root),
            Some(code_hash),
        )
    }
}

impl Default for Account {
    fn default() -> Self {
        Self::from_fields(None, None, None, None).expect("defaults satisfy all invariants")
    }
}

fn bytes32_or_default(bytes: &[u8], default: [u8; 32]) -> Result<[u8; 32], AccountError> {
    if bytes.is_empty() {
        return Ok(default);
    }
    if bytes.len() != 32 {
        return Err(AccountError::InvalidAccount("root/hash field must be 32 bytes or empty"));
    }
    let mut out = [0u8; 32];
    out.copy_from_slice(bytes);
    Ok(out)
}

/// Convert a stored account into its slim wire body, collapsing default
/// roots down to the empty byte string.
pub fn account_to_slim(account: &Account) -> SlimAccountBody {
    let raw = account.raw();
    SlimAccountBody {
        nonce: raw[0].clone(),
        balance: raw[1].clone(),
        storage_root: if account.storage_root == KECCAK256_RLP {
            Vec::new()
        } else {
            raw[2].clone()
        },
        code_hash: if account.code_hash == KECCAK256_NULL {
            Vec::new()
        } else {
            raw[3].clone()
        },
    }
}

/// Inflate a slim wire body back into a full [`Account`], restoring
/// defaults for empty root fields.
pub fn account_from_slim(body: &SlimAccountBody) -> Result<Account, AccountError> {
    let storage_root = bytes32_or_default(&body.storage_root, KECCAK256_RLP)?;
    let code_hash = bytes32_or_default(&body.code_hash, KECCAK256_NULL)?;
    Account::from_fields(
        Some(u256_from_unpadded_be(&body.nonce)),
        Some(u256_from_unpadded_be(&body.balance)),
        Some(storage_root),
        Some(code_hash),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_account_matches_eip161_defaults() {
        let account = Account::default();
        assert_eq!(account.nonce(), U256::zero());
        assert_eq!(account.balance(), U256::zero());
        assert_eq!(account.storage_root(), &KECCAK256_RLP);
        assert_eq!(account.code_hash(), &KECCAK256_NULL);
        assert!(account.is_empty());
        assert!(!account.is_contract());
    }

    #[test]
    fn default_raw_matches_spec_vector() {
        let account = Account::default();
        let raw = account.raw();
        assert!(raw[0].is_empty());
        assert!(raw[1].is_empty());
        assert_eq!(raw[2], KECCAK256_RLP.to_vec());
        assert_eq!(raw[3], KECCAK256_NULL.to_vec());
    }

    #[test]
    fn nonzero_code_hash_marks_contract() {
        let account = Account::from_fields(None, None, None, Some([7u8; 32])).unwrap();
        assert!(account.is_contract());
        assert!(!account.is_empty());
    }

    #[test]
    fn rlp_round_trips() {
        let account = Account::from_fields(
            Some(U256::from(42)),
            Some(U256::from(1_000_000u64)),
            Some([9u8; 32]),
            Some([8u8; 32]),
        )
        .unwrap();
        let encoded = account.serialize();
        let decoded = Account::from_rlp(&encoded).unwrap();
        assert_eq!(account, decoded);
    }

    #[test]
    fn from_rlp_rejects_wrong_element_count() {
        let mut stream = RlpStream::new_list(3);
        stream.append(&0u8).append(&0u8).append(&0u8);
        let err = Account::from_rlp(&stream.out()).unwrap_err();
        assert_eq!(err, AccountError::MalformedAccount);
    }

    #[test]
    fn slim_round_trips_through_defaults() {
        let account = Account::default();
        let slim = account_to_slim(&account);
        assert!(slim.storage_root.is_empty());
        assert!(slim.code_hash.is_empty());
        let restored = account_from_slim(&slim).unwrap();
        assert_eq!(account, restored);
    }

    #[test]
    fn slim_round_trips_non_default_roots() {
        let account =
            Account::from_fields(Some(U256::from(3)), None, Some([1u8; 32]), Some([2u8; 32]))
                .unwrap();
        let slim = account_to_slim(&account);
        assert_eq!(slim.storage_root, account.storage_root().to_vec());
        let restored = account_from_slim(&slim).unwrap();
        assert_eq!(account, restored);
    }
}
