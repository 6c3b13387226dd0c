//! Test doubles and helpers for the upsert contract tests.
//!
//! `CountingZoneStore` implements the management contract by delegating to
//! the real in-memory store while recording every call, so tests can assert
//! exactly which operations a request issued.

use async_trait::async_trait;
use std::net::Ipv4Addr;
use std::str::FromStr;
use std::sync::atomic::AtomicUsize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use trust_dns_client::rr::LowerName;
use zoneup::error::Error;
use zoneup::{ARecord, Config, DynZoneStore, HostAddrSource, MemoryZoneStore, SharedConfig, ZoneStore};

/// Call counters shared between a `CountingZoneStore` and the test body.
#[derive(Default)]
pub struct StoreCounters {
    pub connect: AtomicUsize,
    pub query: AtomicUsize,
    pub create: AtomicUsize,
    pub modify: AtomicUsize,
}

/// A zone store that counts contract calls. `fail_connect` makes `connect`
/// report an unreachable management interface.
pub struct CountingZoneStore {
    inner: MemoryZoneStore,
    counters: Arc<StoreCounters>,
    fail_connect: bool,
}

impl CountingZoneStore {
    pub fn new() -> (DynZoneStore, Arc<StoreCounters>) {
        Self::build(MemoryZoneStore::default(), false)
    }

    /// A store whose zone already holds `records`, guard or no guard.
    pub fn seeded(records: Vec<ARecord>) -> (DynZoneStore, Arc<StoreCounters>) {
        let mut inner = MemoryZoneStore::default();
        for record in records {
            inner.insert_unchecked(record);
        }
        Self::build(inner, false)
    }

    pub fn unreachable() -> (DynZoneStore, Arc<StoreCounters>) {
        Self::build(MemoryZoneStore::default(), true)
    }

    fn build(inner: MemoryZoneStore, fail_connect: bool) -> (DynZoneStore, Arc<StoreCounters>) {
        let counters = Arc::new(StoreCounters::default());
        let store: DynZoneStore = Arc::new(RwLock::new(CountingZoneStore {
            inner,
            counters: counters.clone(),
            fail_connect,
        }));
        (store, counters)
    }

    fn count(counter: &AtomicUsize) {
        counter.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
    }
}

#[async_trait]
impl ZoneStore for CountingZoneStore {
    async fn connect(&mut self) -> Result<(), Error> {
        Self::count(&self.counters.connect);
        if self.fail_connect {
            return Err(Error::ConnectionFailed {
                server: "fake".to_string(),
                source: "injected connect failure".into(),
            });
        }
        self.inner.connect().await
    }

    async fn query_a(&self, owner: &LowerName) -> Result<Vec<ARecord>, Error> {
        Self::count(&self.counters.query);
        self.inner.query_a(owner).await
    }

    async fn create_a(&mut self, owner: LowerName, addr: Ipv4Addr, ttl: u32) -> Result<(), Error> {
        Self::count(&self.counters.create);
        self.inner.create_a(owner, addr, ttl).await
    }

    async fn modify_a(&mut self, existing: &ARecord, addr: Ipv4Addr) -> Result<(), Error> {
        Self::count(&self.counters.modify);
        self.inner.modify_a(existing, addr).await
    }
}

/// A host that always reports the given IPv4 address.
pub struct FixedHostAddr(pub Ipv4Addr);

impl HostAddrSource for FixedHostAddr {
    fn first_ipv4(&self) -> Result<Ipv4Addr, Error> {
        Ok(self.0)
    }
}

/// A host with no usable IPv4 address at all.
pub struct NoHostAddr;

impl HostAddrSource for NoHostAddr {
    fn first_ipv4(&self) -> Result<Ipv4Addr, Error> {
        Err(Error::NoAddressAvailable)
    }
}

pub fn test_config(zone: &str) -> SharedConfig {
    Arc::new(Config {
        zone: LowerName::from_str(zone).unwrap(),
        api_bind_addr: "127.0.0.1:0".parse().unwrap(),
        api_timeout: Duration::from_secs(5),
        record_ttl: 3600,
        zone_store_state_path: None,
        dns_server_addr: None,
    })
}

pub fn owner(name: &str) -> LowerName {
    LowerName::from_str(name).unwrap()
}

pub fn a_record(owner_name: &str, addr: Ipv4Addr) -> ARecord {
    ARecord {
        owner: owner(owner_name),
        addr,
        ttl: 3600,
    }
}
