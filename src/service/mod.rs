//! The DPT coordinator: a Kademlia routing table and ban list driven by
//! a `Server`/`DnsProvider` pair, exposed as a single cloneable handle.
//!
//! Split into semantic submodules: `core` (construction, bind/destroy,
//! shared state), `api` (peer admission and table queries), `events`
//! (ping-based eviction and staged ingest), and `maintenance`
//! (bootstrap and the periodic refresh loop).

mod api;
mod core;
mod events;
mod maintenance;

pub use core::Dpt;
