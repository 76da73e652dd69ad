//! # Distributed Peer Table
//!
//! A devp2p-style Kademlia peer table: an Ethereum account/address model
//! (EIP-55/EIP-1191 checksums, CREATE/CREATE2 contract address
//! derivation, secp256k1 key derivation), a time-bounded ban list, and a
//! k-bucket routing table wired up behind a coordinator that admits
//! peers, evicts unreachable ones, and periodically refreshes itself
//! against a UDP transport and an optional DNS peer source.
//!
//! ## Architecture
//!
//! Hexagonal: the `domain` module is pure logic with no I/O, `ports`
//! defines the driven traits (`Server`, `DnsProvider`, `EventSink`,
//! `TimeSource`) a host application implements, and `service::Dpt` is
//! the coordinator that ties them together.
//!
//! ## Example
//!
//! ```rust
//! use devp2p_dpt::{Dpt, DptConfig, NoOpEventSink};
//! use devp2p_dpt::ports::{DnsProvider, Server, TransportError};
//! use devp2p_dpt::domain::{NodeId, PeerInfo};
//! use async_trait::async_trait;
//!
//! struct NullServer;
//!
//! #[async_trait]
//! impl Server for NullServer {
//!     async fn bind(&self) -> Result<(), TransportError> { Ok(()) }
//!     async fn ping(&self, peer: &PeerInfo) -> Result<PeerInfo, TransportError> {
//!         Ok(peer.clone())
//!     }
//!     async fn find_neighbours(&self, _peer: &PeerInfo, _target: NodeId) -> Result<(), TransportError> {
//!         Ok(())
//!     }
//! }
//!
//! struct NullDns;
//!
//! #[async_trait]
//! impl DnsProvider for NullDns {
//!     async fn get_peers(&self, _count: usize, _networks: &[String]) -> Result<Vec<PeerInfo>, TransportError> {
//!         Ok(Vec::new())
//!     }
//! }
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let private_key = [1u8; 32];
//! let dpt = Dpt::new(&private_key, DptConfig::default(), NullServer, None::<NullDns>, NoOpEventSink)?;
//! dpt.bind().await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod domain;
pub mod ports;
pub mod service;

pub use config::DptConfig;

pub use domain::{
    account_from_slim, account_to_slim, calculate_bucket_index, find_k_closest,
    generate_address, generate_address2, import_public, is_valid_address, is_valid_checksum,
    is_valid_private, is_valid_public, keccak256, node_id_from_public, private_to_address,
    private_to_public, pub_to_address, sort_peers_by_distance, to_checksum_address,
    u256_from_unpadded_be, unpadded_be_bytes, xor_distance, Account, AccountError, AddOutcome,
    Address, AddressError, BanList, Distance, DptError, KeyError, NodeId, PeerInfo, PeerRef,
    PublicKey, RoutingTable, SlimAccountBody, Timestamp, DEFAULT_BAN_DURATION_MS, DEFAULT_K,
    KECCAK256_NULL, KECCAK256_RLP, NUM_BUCKETS,
};

pub use ports::{DnsProvider, EventSink, NoOpEventSink, Server, SystemTimeSource, TimeSource, TransportError};

pub use service::Dpt;
