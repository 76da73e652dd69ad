//! Domain layer: pure Kademlia routing logic plus the Ethereum account
//! and address model the coordinator uses to derive its own identity.

pub mod account;
pub mod address;
pub mod ban_list;
pub mod contract_address;
pub mod entities;
pub mod errors;
pub mod keys;
pub mod primitives;
pub mod routing_table;
pub mod services;
pub mod value_objects;

pub use account::{account_from_slim, account_to_slim, Account, AccountError, SlimAccountBody};
pub use address::{is_valid_address, is_valid_checksum, to_checksum_address, Address, AddressError};
pub use ban_list::{BanList, DEFAULT_BAN_DURATION_MS};
pub use contract_address::{generate_address, generate_address2};
pub use entities::{NodeId, PeerInfo, Timestamp};
pub use errors::DptError;
pub use keys::{
    import_public, is_valid_private, is_valid_public, node_id_from_public, private_to_address,
    private_to_public, pub_to_address, KeyError, PublicKey,
};
pub use primitives::{keccak256, u256_from_unpadded_be, unpadded_be_bytes, KECCAK256_NULL, KECCAK256_RLP};
pub use routing_table::{AddOutcome, PeerRef, RoutingTable, DEFAULT_K, NUM_BUCKETS};
pub use services::{calculate_bucket_index, find_k_closest, sort_peers_by_distance, xor_distance};
pub use value_objects::Distance;
