//! The A-record upsert engine.
//!
//! One request reconciles a `(subdomain, IPv4 address)` pair into the
//! configured zone: sanitize the label, settle on a target address, derive
//! the owner name, then query the zone and create, update, or leave the
//! record alone depending on what is already there. The zone is only ever
//! reached through the [`ZoneStore`][crate::zone_store::ZoneStore] contract.
//!
//! At most one A record may exist per owner name. A zone that already
//! violates that (a manual edit, a race with another tool) makes the engine
//! refuse with [`Error::AmbiguousRecord`] rather than guess which record to
//! touch. No failure is retried here.

use crate::config::SharedConfig;
use crate::error::Error;
use crate::host_addr::HostAddrSource;
use crate::zone_store::DynZoneStore;
use std::net::Ipv4Addr;
use std::str::FromStr;
use std::sync::Arc;
use trust_dns_client::rr::{LowerName, Name};

/// Reconciles requested `(subdomain, IPv4 address)` pairs into the configured
/// zone. Holds no per-request state; all durable state lives in the zone
/// behind the store.
#[derive(Clone)]
pub struct UpsertEngine {
    config: SharedConfig,
    zone_store: DynZoneStore,
    host_addrs: Arc<dyn HostAddrSource>,
}

impl UpsertEngine {
    pub fn new(
        config: SharedConfig,
        zone_store: DynZoneStore,
        host_addrs: Arc<dyn HostAddrSource>,
    ) -> Self {
        Self {
            config,
            zone_store,
            host_addrs,
        }
    }

    /// Create or update the A record for `<subdomain>.<zone>`, returning the
    /// owner name (FQDN) on success. `addr` of `None` points the record at
    /// this host's own first IPv4 address.
    ///
    /// A record that already holds the target address is left untouched and
    /// reported as success, so the operation is idempotent.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] for an unusable subdomain,
    /// [`Error::NoAddressAvailable`] when no target address can be determined,
    /// and the typed connect/create/update/ambiguity failures from the store.
    pub async fn upsert(&self, subdomain: &str, addr: Option<Ipv4Addr>) -> Result<Name, Error> {
        let label = sanitize_subdomain(subdomain)?;
        let addr = match addr {
            Some(addr) => addr,
            None => self.host_addrs.first_ipv4()?,
        };
        let owner = self.owner_name(&label)?;

        // Hold the write half across query + decide + mutate so concurrent
        // upserts for the same owner name serialize in-process. Nothing below
        // this point runs if the request future was dropped earlier.
        let mut store = self.zone_store.write().await;
        store.connect().await?;

        let existing = store.query_a(&owner).await?;
        match existing.as_slice() {
            [] => {
                store
                    .create_a(owner.clone(), addr, self.config.record_ttl)
                    .await?;
                tracing::info!("created A record \"{owner}\" -> {addr}");
            }
            [record] if record.addr == addr => {
                tracing::debug!("A record \"{owner}\" already points at {addr}");
            }
            [record] => {
                let previous = record.addr;
                store.modify_a(record, addr).await?;
                tracing::info!("updated A record \"{owner}\": {previous} -> {addr}");
            }
            records => {
                return Err(Error::AmbiguousRecord {
                    owner,
                    count: records.len(),
                });
            }
        }

        Ok(Name::from(&owner))
    }

    fn owner_name(&self, label: &str) -> Result<LowerName, Error> {
        let label = Name::from_str(label)
            .map_err(|_| Error::InvalidInput(format!("\"{label}\" is not a valid DNS label")))?;
        let fqdn = label.append_domain(&Name::from(&self.config.zone))?;
        Ok(fqdn.into())
    }
}

/// Normalize a requested subdomain label: trim surrounding whitespace and
/// trailing dots, then lowercase. Owner names are case-insensitive;
/// normalizing up front keeps lookups deterministic and repeated requests
/// idempotent.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] if nothing remains after trimming, or if
/// the trimmed label still contains whitespace.
pub fn sanitize_subdomain(raw: &str) -> Result<String, Error> {
    let trimmed = raw.trim().trim_end_matches('.');
    if trimmed.is_empty() {
        return Err(Error::InvalidInput(
            "subdomain is empty after trimming whitespace and trailing dots".to_string(),
        ));
    }
    if trimmed.chars().any(char::is_whitespace) {
        return Err(Error::InvalidInput(
            "subdomain contains whitespace".to_string(),
        ));
    }
    Ok(trimmed.to_lowercase())
}
