use crate::domain::entities::{NodeId, PeerInfo};
use crate::domain::errors::DptError;
use crate::domain::routing_table::{AddOutcome, PeerRef};
use crate::ports::outbound::{DnsProvider, EventSink, Server};
use crate::service::core::Dpt;

impl<S: Server, D: DnsProvider, E: EventSink> Dpt<S, D, E> {
    /// Add a peer to the routing table.
    ///
    /// Bans take priority over everything else. An already-known peer is
    /// returned as-is. A genuinely new peer is probed with `server.ping`
    /// before being admitted: on success it is inserted (or handed to the
    /// ping-eviction resolver if its bucket is full); on failure the peer
    /// is banned for the configured duration and the error propagates.
    pub async fn add_peer(&self, peer: PeerInfo) -> Result<PeerInfo, DptError> {
        self.require_alive()?;

        let now = self.time.now();
        {
            let state = self.state.lock().await;
            if state.bans.has(&peer, now) {
                let id = Self::peer_node_id(&peer).unwrap_or(NodeId::zero());
                return Err(DptError::Banned(id));
            }
            if let Some(existing) = Self::lookup(&state.table, &peer) {
                return Ok(existing.clone());
            }
        }

        let pinged = match self.server.ping(&peer).await {
            Ok(confirmed) => confirmed,
            Err(err) => {
                let mut state = self.state.lock().await;
                state.bans.add(&peer, self.config.ban_duration_ms, now);
                return Err(DptError::PingFailed(err));
            }
        };

        let id = Self::peer_node_id(&pinged).ok_or(DptError::PeerNotFound)?;
        self.events.on_peer_new(&pinged);

        let mut state = self.state.lock().await;
        match state.table.add(id, pinged.clone()) {
            AddOutcome::Inserted => {
                drop(state);
                self.events.on_peer_added(&pinged);
                Ok(pinged)
            }
            AddOutcome::AlreadyPresent => Ok(pinged),
            AddOutcome::Full { old_peers, new_peer } => {
                drop(state);
                self.resolve_ping_eviction(old_peers, new_peer.clone()).await?;
                Ok(new_peer)
            }
        }
    }

    pub async fn get_peer(&self, id: NodeId) -> Option<PeerInfo> {
        let state = self.state.lock().await;
        state.table.get(PeerRef::Id(id)).cloned()
    }

    pub async fn get_peers(&self) -> Vec<PeerInfo> {
        let state = self.state.lock().await;
        state.table.get_all()
    }

    pub async fn get_closest_peers(&self, target: NodeId, count: usize) -> Vec<PeerInfo> {
        let state = self.state.lock().await;
        state.table.closest(&target, count)
    }

    pub async fn remove_peer(&self, id: NodeId) -> Option<PeerInfo> {
        let mut state = self.state.lock().await;
        let removed = state.table.remove(&id);
        if let Some(peer) = &removed {
            let peer = peer.clone();
            drop(state);
            self.events.on_peer_removed(&peer);
        }
        removed
    }

    /// Ban a peer for the configured default duration and remove it from
    /// the table if present.
    pub async fn ban_peer(&self, peer: &PeerInfo) {
        let now = self.time.now();
        let mut state = self.state.lock().await;
        state.bans.add(peer, self.config.ban_duration_ms, now);
        if let Some(id) = Self::peer_node_id(peer) {
            state.table.remove(&id);
        }
        tracing::warn!(address = %peer.address, "peer banned");
    }

    pub async fn is_banned(&self, peer: &PeerInfo) -> bool {
        let now = self.time.now();
        let state = self.state.lock().await;
        state.bans.has(peer, now)
    }

    fn lookup<'a>(
        table: &'a crate::domain::routing_table::RoutingTable,
        peer: &PeerInfo,
    ) -> Option<&'a PeerInfo> {
        if let Some(id) = Self::peer_node_id(peer) {
            if let Some(found) = table.get(PeerRef::Id(id)) {
                return Some(found);
            }
        }
        peer.udp_port
            .and_then(|port| table.get_by_address_port(&peer.address, port))
    }
}
