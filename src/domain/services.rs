//! Pure domain functions over the routing table's data types: distance,
//! bucket placement, and nearest-neighbour sorting.

use crate::domain::entities::{NodeId, PeerInfo};
use crate::domain::routing_table::NUM_BUCKETS;
use crate::domain::value_objects::Distance;

/// The XOR distance between two node ids.
pub fn xor_distance(a: &NodeId, b: &NodeId) -> Distance {
    Distance::between(a, b)
}

/// The k-bucket index a remote node falls into relative to `local`,
/// clamped to `NUM_BUCKETS - 1` for the (impossible outside tests)
/// identical-id case.
pub fn calculate_bucket_index(local: &NodeId, remote: &NodeId) -> usize {
    xor_distance(local, remote)
        .common_prefix_len()
        .min(NUM_BUCKETS - 1)
}

/// Sort peers by ascending XOR distance from `target` (closest first).
pub fn sort_peers_by_distance(
    peers: &[PeerInfo],
    target: &NodeId,
    id_of: impl Fn(&PeerInfo) -> NodeId,
) -> Vec<PeerInfo> {
    let mut indexed: Vec<(Distance, PeerInfo)> = peers
        .iter()
        .map(|p| (xor_distance(&id_of(p), target), p.clone()))
        .collect();
    indexed.sort_by(|a, b| a.0.cmp(&b.0));
    indexed.into_iter().map(|(_, p)| p).collect()
}

/// The `k` closest peers to `target`, ascending by distance.
pub fn find_k_closest(
    peers: &[PeerInfo],
    target: &NodeId,
    k: usize,
    id_of: impl Fn(&PeerInfo) -> NodeId,
) -> Vec<PeerInfo> {
    sort_peers_by_distance(peers, target, id_of)
        .into_iter()
        .take(k)
        .collect()
}
