use serde::{Deserialize, Serialize};
use std::net::Ipv4Addr;

#[derive(Deserialize, Debug, Clone, Default, Ord, PartialOrd, Eq, PartialEq)]
pub(super) struct UpsertRecordRequest {
    pub subdomain: String,
    /// Target address; `None` points the record at this host.
    #[serde(default)]
    pub ip: Option<Ipv4Addr>,
}

#[derive(Serialize, Debug, Clone, Default, Ord, PartialOrd, Eq, PartialEq)]
pub(super) struct UpsertRecordResult {
    pub fqdn: String,
}
