//! Time-bounded ban list keyed by any of a peer's identifiers.

use std::collections::HashMap;

use crate::domain::entities::{NodeId, PeerInfo, Timestamp};

/// Default ban duration applied by `addPeer` failures and ping-eviction
/// losers when the caller does not specify one explicitly.
pub const DEFAULT_BAN_DURATION_MS: u64 = 5 * 60 * 1000;

#[derive(Debug, Clone, Default)]
pub struct BanList {
    by_id: HashMap<NodeId, Timestamp>,
    by_addr: HashMap<String, Timestamp>,
    by_addr_port: HashMap<String, Timestamp>,
}

impl BanList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ban every identifier a peer currently presents, for `duration_ms`
    /// from `now`.
    pub fn add(&mut self, peer: &PeerInfo, duration_ms: u64, now: Timestamp) {
        let expires_at = now.add_millis(duration_ms);
        if let Some(public) = &peer.id {
            self.by_id
                .insert(NodeId::from_public_key(public), expires_at);
        }
        self.by_addr.insert(peer.address.clone(), expires_at);
        if let Some(key) = peer.address_port_key() {
            self.by_addr_port.insert(key, expires_at);
        }
    }

    /// `true` iff any identifier of `peer` is covered by a non-expired
    /// ban.
    pub fn has(&self, peer: &PeerInfo, now: Timestamp) -> bool {
        if let Some(public) = &peer.id {
            if let Some(expires) = self.by_id.get(&NodeId::from_public_key(public)) {
                if *expires > now {
                    return true;
                }
            }
        }
        if let Some(expires) = self.by_addr.get(&peer.address) {
            if *expires > now {
                return true;
            }
        }
        if let Some(key) = peer.address_port_key() {
            if let Some(expires) = self.by_addr_port.get(&key) {
                if *expires > now {
                    return true;
                }
            }
        }
        false
    }

    /// Drop every entry whose expiry has passed. Returns the number
    /// removed, summed across all three indexes.
    pub fn gc_expired(&mut self, now: Timestamp) -> usize {
        let before = self.by_id.len() + self.by_addr.len() + self.by_addr_port.len();
        self.by_id.retain(|_, expires| *expires > now);
        self.by_addr.retain(|_, expires| *expires > now);
        self.by_addr_port.retain(|_, expires| *expires > now);
        before - (self.by_id.len() + self.by_addr.len() + self.by_addr_port.len())
    }
}
