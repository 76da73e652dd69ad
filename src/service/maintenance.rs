use std::sync::atomic::Ordering;

use rand::RngCore;

use crate::domain::entities::{NodeId, PeerInfo};
use crate::domain::errors::DptError;
use crate::ports::outbound::{DnsProvider, EventSink, Server};
use crate::service::core::Dpt;

impl<S: Server, D: DnsProvider, E: EventSink> Dpt<S, D, E> {
    /// Add `peer` and, if it succeeds and `shouldFindNeighbours` is set,
    /// seed the table by querying it for our own neighbourhood. Errors
    /// are reported on the event sink rather than returned: a failed
    /// bootstrap target should never block startup.
    pub async fn bootstrap(&self, peer: PeerInfo) {
        match self.add_peer(peer).await {
            Ok(added) => {
                if self.config.should_find_neighbours {
                    if let Err(err) = self.server.find_neighbours(&added, self.local_id).await {
                        self.events.on_error(&DptError::Transport(err));
                    }
                }
            }
            Err(err) => self.events.on_error(&err),
        }
    }

    /// Fetch a batch of peers from the configured DNS provider and stage
    /// them into the table with the standard inter-arrival delay.
    pub async fn get_dns_peers(&self) {
        if !self.config.should_get_dns_peers {
            return;
        }
        let Some(dns) = self.dns.as_ref() else { return };
        let quantity = self.config.dns_peers_per_tick();
        match dns.get_peers(quantity, &self.config.dns_networks).await {
            Ok(peers) => self.ingest_peers(peers).await,
            Err(err) => self.events.on_error(&DptError::Transport(err)),
        }
    }

    /// Run one refresh tick: advance the rotating 10-slot counter, probe
    /// every table peer whose `id[0] mod 10` matches the current slot
    /// with a `findneighbours` query at a random target, and pull a DNS
    /// batch if configured. Meant to be called every
    /// `refreshInterval / 10` milliseconds.
    pub async fn refresh(&self) {
        if self.require_alive().is_err() {
            return;
        }

        let slot = {
            let mut state = self.state.lock().await;
            let slot = state.refresh_slot;
            state.refresh_slot = (state.refresh_slot + 1) % 10;
            slot
        };
        tracing::trace!(slot, "refresh tick");

        if self.config.should_find_neighbours {
            for peer in self.get_peers().await {
                let Some(id) = Self::peer_node_id(&peer) else { continue };
                if id.as_bytes()[0] % 10 != slot {
                    continue;
                }
                let target = random_node_id();
                if let Err(err) = self.server.find_neighbours(&peer, target).await {
                    self.events.on_error(&DptError::Transport(err));
                }
            }
        }

        self.get_dns_peers().await;
    }

    /// Spawn a task that calls `refresh()` every `refreshInterval / 10`
    /// milliseconds until `destroy()` is called.
    pub fn spawn_refresh_loop(&self) -> tokio::task::JoinHandle<()>
    where
        S: 'static,
        D: 'static,
        E: 'static,
    {
        let coordinator = self.clone();
        let interval_ms = self.config.refresh_tick_interval_ms().max(1);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(std::time::Duration::from_millis(interval_ms));
            loop {
                ticker.tick().await;
                if !coordinator.alive.load(Ordering::SeqCst) {
                    break;
                }
                coordinator.refresh().await;
            }
        })
    }
}

fn random_node_id() -> NodeId {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    NodeId::new(bytes)
}
