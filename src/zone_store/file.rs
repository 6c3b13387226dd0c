//! A JSON file-backed implementation of the [`ZoneStore`][super::ZoneStore] trait.
//!
//! Wraps a [`MemoryZoneStore`][super::memory::MemoryZoneStore] instance,
//! persisting updates to a JSON file on disk that can be reloaded across
//! restarts.
use crate::error::Error;
use crate::zone_store::memory::MemoryZoneStore;
use crate::zone_store::{ARecord, ZoneStore};
use std::io::ErrorKind;
use std::net::Ipv4Addr;
use tokio::fs::File;
use tokio::io;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use trust_dns_client::rr::LowerName;

/// A file-backed implementation of the zone store. After each mutation a JSON
/// file on disk is updated with the new data. This file can be reloaded across
/// restarts to avoid losing state.
///
/// Wraps a [`MemoryZoneStore`][super::memory::MemoryZoneStore], operating the
/// same way except for maintaining state beyond in-memory.
#[derive(Default, Debug, Clone)]
#[allow(clippy::module_name_repetitions)]
pub struct FileZoneStore {
    zone_store: MemoryZoneStore,
    path: String,
}

impl FileZoneStore {
    /// Save the state of the zone store as JSON to the store's configured
    /// path, or return an Error.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidJSON`] if a record in the store can't be
    /// serialized to JSON.
    ///
    /// Returns [`Error::IO`] if the serialized state can't be written to the
    /// backing file path.
    pub async fn save(&self) -> Result<(), Error> {
        let data = serde_json::to_string_pretty(&self.zone_store)?;
        let mut output_file = File::create(&self.path).await?;
        output_file.write_all(data.as_bytes()).await?;
        output_file.flush().await?;
        Ok(())
    }

    /// Load a [`FileZoneStore`] from the JSON record state located at the
    /// given path, or return an Error. A missing file is created empty rather
    /// than treated as an error.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidJSON`] if the JSON state file is invalid.
    ///
    /// Returns [`Error::IO`] if the path can't be opened or read.
    pub async fn try_from_file(p: &str) -> Result<Self, Error> {
        let contents = match File::open(p).await {
            Ok(mut f) => {
                let mut buf = vec![];
                f.read_to_end(&mut buf).await?;
                buf
            }
            Err(err) => match err.kind() {
                ErrorKind::NotFound => Self::write_empty_state(File::create(&p).await?).await?,
                _ => return Err(Error::IO(err)),
            },
        };

        let zone_store: MemoryZoneStore = serde_json::from_slice(&contents)?;
        Ok(Self {
            path: p.to_string(),
            zone_store,
        })
    }

    async fn write_empty_state(mut f: File) -> io::Result<Vec<u8>> {
        let default_data = serde_json::to_string_pretty(&MemoryZoneStore::default())?;
        let default_bytes = default_data.as_bytes();
        f.write_all(default_bytes).await?;
        f.flush().await?;
        Ok(default_bytes.to_vec())
    }
}

#[async_trait::async_trait]
impl ZoneStore for FileZoneStore {
    async fn connect(&mut self) -> Result<(), Error> {
        self.zone_store.connect().await
    }

    async fn query_a(&self, owner: &LowerName) -> Result<Vec<ARecord>, Error> {
        self.zone_store.query_a(owner).await
    }

    async fn create_a(&mut self, owner: LowerName, addr: Ipv4Addr, ttl: u32) -> Result<(), Error> {
        self.zone_store.create_a(owner, addr, ttl).await?;
        self.save().await?;
        Ok(())
    }

    async fn modify_a(&mut self, existing: &ARecord, addr: Ipv4Addr) -> Result<(), Error> {
        self.zone_store.modify_a(existing, addr).await?;
        self.save().await?;
        Ok(())
    }
}
