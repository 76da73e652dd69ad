//! Core entities shared by the routing table and the coordinator: node
//! identity and the peer record stored in a k-bucket.

use std::hash::Hash;

use crate::domain::keys::PublicKey;

/// 256-bit node identifier: `keccak256` of a peer's 64-byte public key.
/// Distinct from the raw wire public key — the k-bucket's metric space
/// is fixed-width 256 bits regardless of the key encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub [u8; 32]);

impl NodeId {
    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn zero() -> Self {
        Self([0u8; 32])
    }

    pub fn from_public_key(public_key: &PublicKey) -> Self {
        Self(crate::domain::keys::node_id_from_public(public_key))
    }
}

impl AsRef<[u8]> for NodeId {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Unix timestamp in milliseconds, matching the coordinator's
/// millisecond-granularity refresh scheduling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(pub u64);

impl Timestamp {
    pub fn new(millis: u64) -> Self {
        Self(millis)
    }

    pub fn as_millis(&self) -> u64 {
        self.0
    }

    pub fn add_millis(&self, millis: u64) -> Self {
        Self(self.0.saturating_add(millis))
    }
}

/// Identity record for a remote node as known to the DPT. `id` is the
/// uncompressed, tag-less public key and may be absent before the first
/// successful liveness probe; `address`/`udp_port`/`tcp_port` are learned
/// incrementally as the peer is contacted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeerInfo {
    pub id: Option<PublicKey>,
    pub address: String,
    pub udp_port: Option<u16>,
    pub tcp_port: Option<u16>,
    pub last_seen: Timestamp,
}

impl PeerInfo {
    pub fn new(address: impl Into<String>, udp_port: Option<u16>) -> Self {
        Self {
            id: None,
            address: address.into(),
            udp_port,
            tcp_port: None,
            last_seen: Timestamp::new(0),
        }
    }

    pub fn with_id(mut self, id: PublicKey) -> Self {
        self.id = Some(id);
        self
    }

    /// A peer is identified by its id when present, else by
    /// `(address, udp_port)`. Two peers are equivalent when any
    /// identifier matches.
    pub fn matches(&self, other: &PeerInfo) -> bool {
        if let (Some(a), Some(b)) = (&self.id, &other.id) {
            if a == b {
                return true;
            }
        }
        self.address == other.address && self.udp_port == other.udp_port
    }

    /// The string key this peer would be found under when looked up by
    /// `address:udpPort` (used by the ban list's secondary index).
    pub fn address_port_key(&self) -> Option<String> {
        self.udp_port.map(|port| format!("{}:{}", self.address, port))
    }
}
