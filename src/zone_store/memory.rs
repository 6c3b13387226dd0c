use crate::error::Error;
use crate::zone_store::{ARecord, ZoneStore};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::net::Ipv4Addr;
use trust_dns_client::rr::LowerName;

#[derive(Default, Debug, Clone, Serialize, Deserialize)]
#[allow(clippy::module_name_repetitions)]
pub struct MemoryZoneStore {
    a_records: HashMap<LowerName, Vec<ARecord>>,
}

impl MemoryZoneStore {
    /// Insert a record without the duplicate-owner guard that
    /// [`ZoneStore::create_a`] applies, mirroring state that appeared in the
    /// zone outside this interface (manual edits, another tool). Tests use
    /// this to model an invariant-breaking zone.
    pub fn insert_unchecked(&mut self, record: ARecord) {
        self.a_records
            .entry(record.owner.clone())
            .or_default()
            .push(record);
    }
}

#[async_trait::async_trait]
impl ZoneStore for MemoryZoneStore {
    async fn connect(&mut self) -> Result<(), Error> {
        // No session to establish.
        Ok(())
    }

    async fn query_a(&self, owner: &LowerName) -> Result<Vec<ARecord>, Error> {
        Ok(self.a_records.get(owner).cloned().unwrap_or_default())
    }

    async fn create_a(&mut self, owner: LowerName, addr: Ipv4Addr, ttl: u32) -> Result<(), Error> {
        let records = self.a_records.entry(owner.clone()).or_default();
        if !records.is_empty() {
            return Err(Error::CreateFailed {
                owner,
                source: "an A record already exists for this owner name".into(),
            });
        }
        records.push(ARecord { owner, addr, ttl });
        Ok(())
    }

    async fn modify_a(&mut self, existing: &ARecord, addr: Ipv4Addr) -> Result<(), Error> {
        let stored = self
            .a_records
            .get_mut(&existing.owner)
            .and_then(|records| {
                records
                    .iter_mut()
                    .find(|record| record.addr == existing.addr)
            })
            .ok_or_else(|| Error::UpdateFailed {
                owner: existing.owner.clone(),
                source: "no record matches the one being modified".into(),
            })?;
        stored.addr = addr;
        Ok(())
    }
}
