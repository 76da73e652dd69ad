use std::time::Duration;

use futures::future::join_all;

use crate::domain::entities::PeerInfo;
use crate::domain::errors::DptError;
use crate::domain::routing_table::AddOutcome;
use crate::ports::outbound::{DnsProvider, EventSink, Server};
use crate::service::core::Dpt;

/// Delay between successive peer admissions in a batch ingest (DNS
/// results or a server `peers` event), throttling how fast the UDP
/// server gets hit with pings.
const STAGED_INGEST_DELAY: Duration = Duration::from_millis(200);

impl<S: Server, D: DnsProvider, E: EventSink> Dpt<S, D, E> {
    /// Resolve a k-bucket `ping` event: probe every old candidate
    /// concurrently, evict any that fail, and admit `new_peer` only if at
    /// least one old candidate turned out to be dead. If every old
    /// candidate is alive, `new_peer` is banned instead and the bucket is
    /// left untouched.
    pub(crate) async fn resolve_ping_eviction(
        &self,
        old_peers: Vec<PeerInfo>,
        new_peer: PeerInfo,
    ) -> Result<(), DptError> {
        let now = self.time.now();
        {
            let state = self.state.lock().await;
            if state.bans.has(&new_peer, now) {
                return Ok(());
            }
        }

        let probes = old_peers.iter().map(|peer| {
            let server = &self.server;
            async move { (peer.clone(), server.ping(peer).await) }
        });
        let results = join_all(probes).await;

        let mut any_dead = false;
        let mut first_error = None;
        for (old_peer, result) in &results {
            if let Err(err) = result {
                any_dead = true;
                if first_error.is_none() {
                    first_error = Some(err.clone());
                }
                tracing::debug!(address = %old_peer.address, "peer failed liveness probe, evicting");
                let mut state = self.state.lock().await;
                state.bans.add(old_peer, self.config.ban_duration_ms, now);
                if let Some(id) = Self::peer_node_id(old_peer) {
                    let removed = state.table.remove(&id).is_some();
                    drop(state);
                    if removed {
                        self.events.on_peer_removed(old_peer);
                    }
                }
            }
        }

        if any_dead {
            if let Some(new_id) = Self::peer_node_id(&new_peer) {
                // The dead-peer removal loop above already freed a slot,
                // unless a concurrent admission raced in and took it first.
                let mut state = self.state.lock().await;
                let outcome = state.table.add(new_id, new_peer.clone());
                drop(state);
                if matches!(outcome, AddOutcome::Inserted) {
                    self.events.on_peer_added(&new_peer);
                }
            }
        } else {
            let mut state = self.state.lock().await;
            state.bans.add(&new_peer, self.config.ban_duration_ms, now);
        }

        if let Some(err) = first_error {
            self.events.on_error(&DptError::PingFailed(err));
        }
        Ok(())
    }

    /// Ingest a batch of peers (from a DNS refresh or a server `peers`
    /// event) with a spacing delay between each `add_peer` call so the
    /// server is never hit with a burst of simultaneous pings. Errors are
    /// reported on the event sink; the batch never short-circuits.
    pub async fn ingest_peers(&self, peers: Vec<PeerInfo>) {
        for (i, peer) in peers.into_iter().enumerate() {
            if i > 0 {
                tokio::time::sleep(STAGED_INGEST_DELAY).await;
            }
            if let Err(err) = self.add_peer(peer).await {
                self.events.on_error(&err);
            }
        }
    }

    /// Ingest a batch of peers handed over by the server's `peers`
    /// event. Only done when `shouldFindNeighbours` is set, since
    /// otherwise duplicate lookups against the same targets are likely.
    pub async fn ingest_server_peers(&self, peers: Vec<PeerInfo>) {
        if !self.config.should_find_neighbours {
            return;
        }
        self.ingest_peers(peers).await;
    }
}
