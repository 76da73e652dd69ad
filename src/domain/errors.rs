//! Coordinator-level error taxonomy.

use thiserror::Error;

use crate::domain::entities::NodeId;
use crate::domain::keys::KeyError;
use crate::ports::outbound::TransportError;

/// Errors surfaced by [`crate::service::Dpt`] operations.
#[derive(Debug, Clone, Error)]
pub enum DptError {
    #[error("peer {0:?} is banned")]
    Banned(NodeId),
    #[error("liveness probe failed: {0}")]
    PingFailed(TransportError),
    #[error("underlying transport error: {0}")]
    Transport(#[from] TransportError),
    #[error(transparent)]
    InvalidKey(#[from] KeyError),
    #[error("peer not found in routing table")]
    PeerNotFound,
    #[error("coordinator is not bound; call bind() first")]
    NotAlive,
}
