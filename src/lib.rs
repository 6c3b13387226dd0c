//! Zoneup
//!
//! A small self-hosted HTTP endpoint that provisions or updates A records
//! (hostname → IPv4) in a single authoritative DNS zone.
//!
//! One `POST` reconciles a `(subdomain, address)` pair into the zone:
//! a missing record is created, a stale one is updated in place, a matching
//! one is left alone. The zone is reached through a narrow management
//! contract ([`zone_store::ZoneStore`]) with in-memory, JSON-file, and
//! [RFC 2136][RFC-2136] dynamic-update backends, so the same core works
//! against a lab store or a real authoritative server (BIND et al.).
//!
//! Records are never deleted here, and only A records are managed.
//!
//! [RFC-2136]: https://www.rfc-editor.org/rfc/rfc2136
//!
#![warn(clippy::pedantic)]

pub mod api;
pub mod config;
pub mod engine;
pub mod error;
pub mod host_addr;
pub mod zone_store;

use crate::zone_store::{file, memory, rfc2136};
pub use api::new as new_http;
pub use config::{Config, SharedConfig};
pub use engine::{sanitize_subdomain, UpsertEngine};
pub use file::FileZoneStore;
pub use host_addr::{HostAddrSource, InterfaceAddrSource};
pub use memory::MemoryZoneStore;
pub use rfc2136::Rfc2136ZoneStore;
pub use zone_store::{ARecord, DynZoneStore, ZoneStore};
