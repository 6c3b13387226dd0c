use crate::error::Error;
use crate::zone_store::{DynZoneStore, FileZoneStore, MemoryZoneStore, Rfc2136ZoneStore};
use ipnetwork::IpNetwork;
use lazy_static::lazy_static;
use serde::Deserialize;
use serde_with::{serde_as, DurationSeconds};
use std::fs::File;
use std::io::BufReader;
use std::net::{IpAddr, SocketAddr};
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use trust_dns_client::rr::LowerName;

pub type SharedConfig = Arc<Config>;

#[serde_as]
#[derive(Deserialize, Debug, Clone)]
pub struct Config {
    /// The authoritative zone all A records are created under. Fixed for the
    /// lifetime of the process; requests carry only the subdomain label.
    pub zone: LowerName,
    pub api_bind_addr: SocketAddr,
    #[serde_as(as = "DurationSeconds<u64>")]
    pub api_timeout: Duration,
    /// TTL applied when a record is created. Not renegotiated on update.
    #[serde(default = "default_record_ttl")]
    pub record_ttl: u32,
    #[serde(default)]
    pub zone_store_state_path: Option<String>,
    /// Management endpoint of the authoritative DNS server. When set, records
    /// are reconciled into that server over RFC 2136 dynamic update and
    /// `zone_store_state_path` is ignored.
    #[serde(default)]
    pub dns_server_addr: Option<SocketAddr>,
}

fn default_record_ttl() -> u32 {
    3600
}

lazy_static! {
    // NOTE(XXX): Once the "ip" feature has stabilized we can use Ipv6Addr.is_unique_local[0].
    //            Presently this feature is unstable so we home-roll. See also RFC 4193[1].
    // [0]: https://doc.rust-lang.org/std/net/struct.Ipv6Addr.html#method.is_unique_local
    // [1]: https://www.rfc-editor.org/rfc/rfc4193.html
    static ref IPV6_UNIQUE_LOCAL_NETWORK: IpNetwork = IpNetwork::from_str("fc00::/7").unwrap();
}

impl Config {
    /// Load a `Config` from the JSON file at the given path, or return an Error.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IO`] if the path can't be opened, [`Error::InvalidJSON`]
    /// if its content doesn't deserialize, and [`Error::InsecureAPIBind`] if the
    /// configured API bind address is public.
    pub fn try_from_file(p: impl AsRef<Path>) -> Result<Self, Error> {
        let f = File::open(p)?;
        let reader = BufReader::new(f);
        let conf: Config = serde_json::from_reader(reader)?;
        conf.bind_addr_is_secure()?;
        Ok(conf)
    }

    /// Construct the zone store backend this configuration asks for: RFC 2136
    /// against `dns_server_addr` when set, otherwise a JSON-file-backed store
    /// when `zone_store_state_path` is set, otherwise an ephemeral in-memory
    /// store.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IO`] or [`Error::InvalidJSON`] if file-backed state
    /// can't be loaded.
    pub async fn zone_store(&self) -> Result<DynZoneStore, Error> {
        if let Some(server_addr) = self.dns_server_addr {
            return Ok(Arc::new(RwLock::new(Rfc2136ZoneStore::new(
                server_addr,
                &self.zone,
            ))));
        }
        Ok(match &self.zone_store_state_path {
            Some(path) => Arc::new(RwLock::new(FileZoneStore::try_from_file(path).await?)),
            None => Arc::new(RwLock::new(MemoryZoneStore::default())),
        })
    }

    fn bind_addr_is_secure(&self) -> Result<(), Error> {
        match self.api_bind_addr {
            SocketAddr::V4(v4_addr) => {
                let ip = v4_addr.ip();
                if !ip.is_loopback() && !ip.is_private() {
                    return Err(Error::InsecureAPIBind(IpAddr::V4(*ip)));
                }
                Ok(())
            }
            SocketAddr::V6(v6_addr) => {
                let ip = v6_addr.ip();
                if !ip.is_loopback() && !IPV6_UNIQUE_LOCAL_NETWORK.contains(IpAddr::V6(*ip)) {
                    return Err(Error::InsecureAPIBind(IpAddr::V6(*ip)));
                }
                Ok(())
            }
        }
    }
}
