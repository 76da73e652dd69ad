use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::config::DptConfig;
use crate::domain::entities::{NodeId, PeerInfo};
use crate::domain::keys::{private_to_public, KeyError};
use crate::domain::routing_table::RoutingTable;
use crate::domain::ban_list::BanList;
use crate::ports::outbound::{DnsProvider, EventSink, Server, SystemTimeSource, TimeSource};

/// Mutable coordinator state, held behind a single lock. Single-threaded
/// cooperative scheduling maps onto tokio by serializing every state
/// mutation through this mutex; only I/O (pings, DNS lookups) runs
/// concurrently.
pub(crate) struct DptState {
    pub(crate) table: RoutingTable,
    pub(crate) bans: BanList,
    pub(crate) refresh_slot: u8,
}

/// The Distributed Peer Table coordinator.
///
/// Owns a Kademlia routing table and a ban list, derives its own
/// identity from a secp256k1 private key, and drives peer admission,
/// ping-based eviction, and periodic refresh against a `Server` and an
/// optional `DnsProvider`.
pub struct Dpt<S: Server, D: DnsProvider, E: EventSink> {
    pub(crate) local_id: NodeId,
    pub(crate) config: DptConfig,
    pub(crate) state: Arc<Mutex<DptState>>,
    pub(crate) alive: Arc<AtomicBool>,
    pub(crate) server: Arc<S>,
    pub(crate) dns: Option<Arc<D>>,
    pub(crate) events: Arc<E>,
    pub(crate) time: Arc<dyn TimeSource>,
}

impl<S: Server, D: DnsProvider, E: EventSink> Clone for Dpt<S, D, E> {
    fn clone(&self) -> Self {
        Self {
            local_id: self.local_id,
            config: self.config.clone(),
            state: Arc::clone(&self.state),
            alive: Arc::clone(&self.alive),
            server: Arc::clone(&self.server),
            dns: self.dns.clone(),
            events: Arc::clone(&self.events),
            time: Arc::clone(&self.time),
        }
    }
}

impl<S: Server, D: DnsProvider, E: EventSink> Dpt<S, D, E> {
    /// Construct a coordinator from a 32-byte secp256k1 private key. The
    /// node's identity (and therefore every XOR distance in the table)
    /// is derived from this key via `keccak256(pub64)`.
    pub fn new(
        private_key: &[u8],
        config: DptConfig,
        server: S,
        dns: Option<D>,
        events: E,
    ) -> Result<Self, KeyError> {
        let public = private_to_public(private_key)?;
        let local_id = NodeId::from_public_key(&public);
        let table = RoutingTable::new(local_id, config.bucket_size);

        Ok(Self {
            local_id,
            config,
            state: Arc::new(Mutex::new(DptState {
                table,
                bans: BanList::new(),
                refresh_slot: 0,
            })),
            alive: Arc::new(AtomicBool::new(false)),
            server: Arc::new(server),
            dns: dns.map(Arc::new),
            events: Arc::new(events),
            time: Arc::new(SystemTimeSource),
        })
    }

    /// Override the time source (used by tests to drive ban expiry and
    /// refresh scheduling deterministically).
    pub fn with_time_source(mut self, time: Arc<dyn TimeSource>) -> Self {
        self.time = time;
        self
    }

    pub fn local_id(&self) -> NodeId {
        self.local_id
    }

    pub fn config(&self) -> &DptConfig {
        &self.config
    }

    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::SeqCst)
    }

    /// Bind the underlying UDP server and mark the coordinator alive.
    /// Must be called before `bootstrap`, `add_peer`, or `refresh`.
    pub async fn bind(&self) -> Result<(), crate::domain::errors::DptError> {
        self.server
            .bind()
            .await
            .map_err(crate::domain::errors::DptError::Transport)?;
        self.alive.store(true, Ordering::SeqCst);
        self.events.on_listening();
        tracing::info!(node_id = ?self.local_id, "dpt bound");
        Ok(())
    }

    /// Tear down the coordinator. In-flight operations started before
    /// this call may still complete, but `alive` being false prevents
    /// them from mutating the table afterward (checked at every state
    /// mutation entry point).
    pub fn destroy(&self) {
        self.alive.store(false, Ordering::SeqCst);
        self.events.on_close();
        tracing::info!("dpt destroyed");
    }

    pub(crate) fn require_alive(&self) -> Result<(), crate::domain::errors::DptError> {
        if self.alive.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(crate::domain::errors::DptError::NotAlive)
        }
    }

    pub(crate) fn peer_node_id(peer: &PeerInfo) -> Option<NodeId> {
        peer.id.as_ref().map(NodeId::from_public_key)
    }
}
