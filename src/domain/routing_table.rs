//! Kademlia-style k-bucket routing table.
//!
//! Buckets are realized as `NUM_BUCKETS` fixed slots indexed by
//! common-prefix length with the local id rather than a dynamic split
//! tree: since only the bucket containing the local id is ever eligible
//! to split in canonical Kademlia, a fixed array indexed by prefix
//! length converges to exactly the same partition.

use crate::domain::entities::{NodeId, PeerInfo};
use crate::domain::services::calculate_bucket_index;
use crate::domain::value_objects::Distance;

/// One bucket per possible common-prefix length with the local id,
/// including the degenerate "identical id" slot.
pub const NUM_BUCKETS: usize = 257;

/// Default maximum peers held per bucket.
pub const DEFAULT_K: usize = 16;

/// A reference used to look a peer up in the table: by id, by bare
/// address, or by `(address, udp_port)`.
#[derive(Debug, Clone)]
pub enum PeerRef<'a> {
    Id(NodeId),
    Address(&'a str),
    AddressPort(&'a str, u16),
}

/// Outcome of [`RoutingTable::add`].
#[derive(Debug, Clone)]
pub enum AddOutcome {
    /// The peer was inserted directly; there was room in its bucket.
    Inserted,
    /// The peer was already present and its `last_seen` was refreshed.
    AlreadyPresent,
    /// The target bucket is full. The coordinator must resolve this by
    /// pinging `old_peers` and deciding, per the ping-eviction policy,
    /// whether to admit `new_peer`.
    Full {
        old_peers: Vec<PeerInfo>,
        new_peer: PeerInfo,
    },
}

#[derive(Debug, Clone, Default)]
struct Bucket {
    peers: Vec<(NodeId, PeerInfo)>,
}

impl Bucket {
    fn is_full(&self, k: usize) -> bool {
        self.peers.len() >= k
    }

    fn position(&self, id: &NodeId) -> Option<usize> {
        self.peers.iter().position(|(stored_id, _)| stored_id == id)
    }
}

/// The Kademlia routing table owned by a single [`crate::service::Dpt`]
/// coordinator.
#[derive(Debug, Clone)]
pub struct RoutingTable {
    local_id: NodeId,
    k: usize,
    buckets: Vec<Bucket>,
}

impl RoutingTable {
    pub fn new(local_id: NodeId, k: usize) -> Self {
        Self {
            local_id,
            k,
            buckets: (0..NUM_BUCKETS).map(|_| Bucket::default()).collect(),
        }
    }

    pub fn local_id(&self) -> NodeId {
        self.local_id
    }

    fn bucket_index(&self, id: &NodeId) -> usize {
        calculate_bucket_index(&self.local_id, id).min(NUM_BUCKETS - 1)
    }

    /// Insert `peer` (which must already have an `id`). If the target
    /// bucket has room, it is inserted immediately; if the peer is
    /// already present, its `last_seen` is refreshed; otherwise a `Full`
    /// outcome is returned for the coordinator to resolve.
    pub fn add(&mut self, id: NodeId, peer: PeerInfo) -> AddOutcome {
        let idx = self.bucket_index(&id);
        let bucket = &mut self.buckets[idx];

        if let Some(pos) = bucket.position(&id) {
            bucket.peers[pos].1 = peer;
            return AddOutcome::AlreadyPresent;
        }

        if !bucket.is_full(self.k) {
            bucket.peers.push((id, peer));
            return AddOutcome::Inserted;
        }

        AddOutcome::Full {
            old_peers: bucket.peers.iter().map(|(_, p)| p.clone()).collect(),
            new_peer: peer,
        }
    }

    pub fn get_by_id(&self, id: &NodeId) -> Option<&PeerInfo> {
        let idx = self.bucket_index(id);
        self.buckets[idx]
            .peers
            .iter()
            .find(|(stored_id, _)| stored_id == id)
            .map(|(_, p)| p)
    }

    pub fn get_by_address(&self, address: &str) -> Option<&PeerInfo> {
        self.buckets
            .iter()
            .flat_map(|b| b.peers.iter())
            .find(|(_, p)| p.address == address)
            .map(|(_, p)| p)
    }

    pub fn get_by_address_port(&self, address: &str, udp_port: u16) -> Option<&PeerInfo> {
        self.buckets
            .iter()
            .flat_map(|b| b.peers.iter())
            .find(|(_, p)| p.address == address && p.udp_port == Some(udp_port))
            .map(|(_, p)| p)
    }

    pub fn get(&self, reference: PeerRef<'_>) -> Option<&PeerInfo> {
        match reference {
            PeerRef::Id(id) => self.get_by_id(&id),
            PeerRef::Address(address) => self.get_by_address(address),
            PeerRef::AddressPort(address, port) => self.get_by_address_port(address, port),
        }
    }

    pub fn remove(&mut self, id: &NodeId) -> Option<PeerInfo> {
        let idx = self.bucket_index(id);
        let bucket = &mut self.buckets[idx];
        bucket.position(id).map(|pos| bucket.peers.remove(pos).1)
    }

    /// Up to `k` peers closest to `target`, ascending by XOR distance.
    pub fn closest(&self, target: &NodeId, k: usize) -> Vec<PeerInfo> {
        let mut all: Vec<(Distance, &PeerInfo)> = self
            .buckets
            .iter()
            .flat_map(|b| b.peers.iter())
            .map(|(id, p)| (Distance::between(id, target), p))
            .collect();
        all.sort_by(|a, b| a.0.cmp(&b.0));
        all.into_iter().take(k).map(|(_, p)| p.clone()).collect()
    }

    pub fn get_all(&self) -> Vec<PeerInfo> {
        self.buckets
            .iter()
            .flat_map(|b| b.peers.iter().map(|(_, p)| p.clone()))
            .collect()
    }

    pub fn total_peer_count(&self) -> usize {
        self.buckets.iter().map(|b| b.peers.len()).sum()
    }
}
