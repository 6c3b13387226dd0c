//! A-record storage behind the DNS management contract.
//!
//! The upsert engine never talks to a DNS server directly. It goes through
//! [`ZoneStore`], a four-operation contract (connect, query-by-owner-name,
//! create, modify) that any management integration can satisfy.
//!
//! Three implementations are provided. [`memory::MemoryZoneStore`] keeps
//! records in-process and is not durable across restarts.
//! [`file::FileZoneStore`] writes its state to a JSON file for each update and
//! loads this state again on startup. [`rfc2136::Rfc2136ZoneStore`] reconciles
//! records into an external authoritative server over RFC 2136 dynamic update
//! and is the backend a real deployment wants.

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::net::Ipv4Addr;
use std::sync::Arc;
use tokio::sync::RwLock;
use trust_dns_client::rr::LowerName;

pub mod file;
pub mod memory;
pub mod rfc2136;

#[allow(clippy::module_name_repetitions)]
pub use file::FileZoneStore;
#[allow(clippy::module_name_repetitions)]
pub use memory::MemoryZoneStore;
#[allow(clippy::module_name_repetitions)]
pub use rfc2136::Rfc2136ZoneStore;

/// `DynZoneStore` is a type alias for a [`ZoneStore`] that can be used by
/// multiple read/write consumers that coordinate through an [`Arc`] and a
/// [`RwLock`] wrapping the [`ZoneStore`].
#[allow(clippy::module_name_repetitions)]
pub type DynZoneStore = Arc<RwLock<dyn ZoneStore + Send + Sync>>;

/// One A record as held by the managed zone: owner name, IPv4 address, TTL.
///
/// The owner name is a [`LowerName`] so lookups and comparisons are
/// case-insensitive everywhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ARecord {
    pub owner: LowerName,
    pub addr: Ipv4Addr,
    pub ttl: u32,
}

/// An async trait describing the management interface of a single
/// authoritative zone, reduced to the operations A-record reconciliation
/// needs.
///
/// Callers that intend to mutate should hold the write half of a
/// [`DynZoneStore`] across the query and the mutation, so that
/// query-then-decide sequences for the same owner name serialize in-process.
#[async_trait::async_trait]
pub trait ZoneStore {
    /// Establish (or refresh) the management session. Must be called before
    /// the other operations; backends without a session return `Ok(())`.
    async fn connect(&mut self) -> Result<(), Error>;

    /// All A records whose owner name exactly equals `owner`. No wildcard or
    /// prefix matching. An owner name with no records yields an empty `Vec`,
    /// not an error.
    async fn query_a(&self, owner: &LowerName) -> Result<Vec<ARecord>, Error>;

    /// Add an A record for an owner name that has none.
    async fn create_a(&mut self, owner: LowerName, addr: Ipv4Addr, ttl: u32) -> Result<(), Error>;

    /// Point `existing` at `addr`, leaving its owner name and TTL alone.
    async fn modify_a(&mut self, existing: &ARecord, addr: Ipv4Addr) -> Result<(), Error>;
}
