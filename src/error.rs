//! Error types.

use axum::extract::rejection::JsonRejection;
use std::net::IpAddr;
use trust_dns_client::rr::LowerName;
use trust_dns_proto::error::ProtoError;

/// The cause a DNS management operation failed with. Kept boxed so store
/// backends can surface transport errors, server response codes, or plain
/// descriptions through the same variants.
pub type Cause = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Error enumerates the possible zoneup error states.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Returned when a requested subdomain label is empty after trimming
    /// surrounding whitespace and trailing dots, contains embedded whitespace,
    /// or doesn't parse as a DNS label.
    #[error("invalid subdomain: {0}")]
    InvalidInput(String),

    /// Returned when the client supplied no target address and no IPv4 address
    /// is bound to any of the host's usable network interfaces.
    #[error("no IPv4 address is bound to this host")]
    NoAddressAvailable,

    /// Returned when a management session to the authoritative server can't be
    /// established. Never retried here; retry policy belongs to the caller.
    #[error("failed to connect to DNS management interface \"{server}\"")]
    ConnectionFailed {
        server: String,
        #[source]
        source: Cause,
    },

    /// Returned when the management interface rejects a record creation.
    #[error("failed to create A record \"{owner}\"")]
    CreateFailed {
        owner: LowerName,
        #[source]
        source: Cause,
    },

    /// Returned when the management interface rejects a record modification.
    #[error("failed to update A record \"{owner}\"")]
    UpdateFailed {
        owner: LowerName,
        #[source]
        source: Cause,
    },

    /// Returned when the zone holds more than one A record for an owner name
    /// that should have at most one. Something outside this process (a manual
    /// edit, another tool) broke the one-record invariant; mutating blind could
    /// corrupt the zone, so the request is refused instead.
    #[error("{count} A records exist for \"{owner}\"; refusing to guess which to update")]
    AmbiguousRecord { owner: LowerName, count: usize },

    /// Returned when clients `POST` invalid JSON.
    #[error(transparent)]
    JsonExtractorRejection(#[from] JsonRejection),

    /// Returned when the [`Config::api_bind_addr`][`crate::config::Config::api_bind_addr`] is
    /// not a loopback address, or an address within a private network space. The
    /// zoneup HTTP API mutates an authoritative zone and is only intended to be
    /// reachable from private networks.
    #[error("API bind address ({0}) must be a loopback or private IP")]
    InsecureAPIBind(IpAddr),

    /// Returned when a generic IO error occurs.
    #[error("an IO error occurred")]
    IO(#[from] std::io::Error),

    /// Returned when processing JSON from disk (e.g.
    /// [trying to load a `Config`][crate::config::Config::try_from_file], or
    /// [trying to load a `FileZoneStore`][crate::zone_store::file::FileZoneStore::try_from_file])
    /// fails due to invalid JSON content.
    #[error("invalid JSON")]
    InvalidJSON(#[from] serde_json::Error),

    /// Returned when a DNS name can't be assembled or a DNS message can't be
    /// exchanged with the authoritative server.
    #[error("DNS error")]
    DNSError(#[from] ProtoError),
}
