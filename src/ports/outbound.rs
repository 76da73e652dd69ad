//! Driven ports: the UDP discovery server and the DNS peer provider the
//! coordinator requires the host application to supply.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::entities::{NodeId, PeerInfo, Timestamp};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("operation timed out")]
    Timeout,
    #[error("remote peer refused connection")]
    ConnectionRefused,
    #[error("invalid socket address: {0}")]
    InvalidAddress(String),
    #[error("transport I/O error: {0}")]
    Io(String),
}

/// The UDP discovery wire protocol, consumed by the coordinator for
/// liveness probing and neighbour discovery. The wire codec itself is
/// outside this crate's scope.
#[async_trait]
pub trait Server: Send + Sync {
    /// Bind the local UDP socket.
    async fn bind(&self) -> Result<(), TransportError>;

    /// Ping `peer` and await a pong. On success, returns a `PeerInfo`
    /// with `id` populated (filled in if it was previously unknown).
    async fn ping(&self, peer: &PeerInfo) -> Result<PeerInfo, TransportError>;

    /// Fire a `findneighbours` query at `peer` for `target_id`. Results
    /// surface asynchronously; this method does not wait for them.
    async fn find_neighbours(&self, peer: &PeerInfo, target_id: NodeId) -> Result<(), TransportError>;
}

/// A signed ENR-tree (EIP-1459) peer source, consumed during DNS-based
/// refresh ingest. Record verification is outside this crate's scope.
#[async_trait]
pub trait DnsProvider: Send + Sync {
    async fn get_peers(
        &self,
        count: usize,
        networks: &[String],
    ) -> Result<Vec<PeerInfo>, TransportError>;
}

/// Lifecycle and topology notifications emitted by the coordinator.
/// All methods default to no-ops so implementers only override what
/// they need.
pub trait EventSink: Send + Sync {
    fn on_listening(&self) {}
    fn on_close(&self) {}
    fn on_error(&self, _err: &crate::domain::errors::DptError) {}
    fn on_peer_added(&self, _peer: &PeerInfo) {}
    fn on_peer_removed(&self, _peer: &PeerInfo) {}
    /// Fired once per peer, at first successful liveness confirmation,
    /// before it is inserted into the routing table.
    fn on_peer_new(&self, _peer: &PeerInfo) {}
}

/// An `EventSink` that drops every notification; the default when a
/// caller has no observer to wire up.
pub struct NoOpEventSink;

impl EventSink for NoOpEventSink {}

/// Abstracts "the current time" so the coordinator's ban expiry and
/// refresh scheduling can be driven deterministically in tests.
pub trait TimeSource: Send + Sync {
    fn now(&self) -> Timestamp;
}

/// Production time source backed by the system clock.
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now(&self) -> Timestamp {
        let millis = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64;
        Timestamp::new(millis)
    }
}
