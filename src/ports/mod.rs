//! Hexagonal architecture boundary: the driven ports (outbound SPIs) a
//! host application implements to plug real UDP and DNS transports, and
//! an event sink for lifecycle notifications.

pub mod outbound;

pub use outbound::{
    DnsProvider, EventSink, NoOpEventSink, Server, SystemTimeSource, TimeSource, TransportError,
};
