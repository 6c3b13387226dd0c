//! An RFC 2136 dynamic-update implementation of the
//! [`ZoneStore`][super::ZoneStore] trait.
//!
//! Reconciles A records into an external authoritative server (BIND, Knot,
//! anything speaking [RFC 2136]) through a [`trust_dns_client::client::AsyncClient`]
//! over UDP. Creates use an UPDATE with the new record; modifications use
//! compare-and-swap against the record observed by the preceding query, so a
//! record that changed underneath the request makes the server reject the
//! update instead of clobbering it.
//!
//! [RFC 2136]: https://www.rfc-editor.org/rfc/rfc2136

use crate::error::Error;
use crate::zone_store::{ARecord, ZoneStore};
use std::net::{Ipv4Addr, SocketAddr};
use tokio::net::UdpSocket;
use trust_dns_client::client::{AsyncClient, ClientHandle};
use trust_dns_client::op::ResponseCode;
use trust_dns_client::rr::{DNSClass, LowerName, Name, RData, Record, RecordType};
use trust_dns_client::udp::UdpClientStream;

/// A zone store backed by an external authoritative DNS server's dynamic
/// update interface.
///
/// [`connect`][ZoneStore::connect] must succeed before the query and mutation
/// operations are usable; each call dials a fresh client session to the
/// configured server.
#[allow(clippy::module_name_repetitions)]
pub struct Rfc2136ZoneStore {
    server_addr: SocketAddr,
    zone: Name,
    client: Option<AsyncClient>,
}

impl Rfc2136ZoneStore {
    pub fn new(server_addr: SocketAddr, zone: &LowerName) -> Self {
        Self {
            server_addr,
            zone: zone.into(),
            client: None,
        }
    }

    fn client(&self) -> Result<AsyncClient, Error> {
        // AsyncClient is a cheap handle over the exchange; clone per operation.
        self.client.clone().ok_or_else(|| Error::ConnectionFailed {
            server: self.server_addr.to_string(),
            source: "management session not connected".into(),
        })
    }

    fn ensure_no_error(
        response_code: ResponseCode,
        on_err: impl FnOnce(ResponseCode) -> Error,
    ) -> Result<(), Error> {
        if response_code == ResponseCode::NoError {
            Ok(())
        } else {
            Err(on_err(response_code))
        }
    }
}

#[async_trait::async_trait]
impl ZoneStore for Rfc2136ZoneStore {
    async fn connect(&mut self) -> Result<(), Error> {
        let stream = UdpClientStream::<UdpSocket>::new(self.server_addr);
        let (client, exchange) =
            AsyncClient::connect(stream)
                .await
                .map_err(|err| Error::ConnectionFailed {
                    server: self.server_addr.to_string(),
                    source: err.into(),
                })?;
        // The exchange drives request/response plumbing and resolves once the
        // last clone of the client is dropped.
        tokio::spawn(exchange);
        self.client = Some(client);
        Ok(())
    }

    async fn query_a(&self, owner: &LowerName) -> Result<Vec<ARecord>, Error> {
        let mut client = self.client()?;
        let response = client
            .query(owner.into(), DNSClass::IN, RecordType::A)
            .await
            .map_err(|err| Error::ConnectionFailed {
                server: self.server_addr.to_string(),
                source: err.into(),
            })?;
        Ok(response
            .answers()
            .iter()
            .filter(|record| &LowerName::from(record.name()) == owner)
            .filter_map(|record| match record.data() {
                Some(RData::A(addr)) => Some(ARecord {
                    owner: owner.clone(),
                    addr: *addr,
                    ttl: record.ttl(),
                }),
                _ => None,
            })
            .collect())
    }

    async fn create_a(&mut self, owner: LowerName, addr: Ipv4Addr, ttl: u32) -> Result<(), Error> {
        let mut client = self.client()?;
        let record = Record::from_rdata(Name::from(&owner), ttl, RData::A(addr));
        let response = client
            .create(record, self.zone.clone())
            .await
            .map_err(|err| Error::CreateFailed {
                owner: owner.clone(),
                source: err.into(),
            })?;
        Self::ensure_no_error(response.response_code(), |code| Error::CreateFailed {
            owner,
            source: format!("server answered {code}").into(),
        })
    }

    async fn modify_a(&mut self, existing: &ARecord, addr: Ipv4Addr) -> Result<(), Error> {
        let mut client = self.client()?;
        let owner_name = Name::from(&existing.owner);
        let current = Record::from_rdata(owner_name.clone(), existing.ttl, RData::A(existing.addr));
        let new = Record::from_rdata(owner_name, existing.ttl, RData::A(addr));
        let response = client
            .compare_and_swap(current, new, self.zone.clone())
            .await
            .map_err(|err| Error::UpdateFailed {
                owner: existing.owner.clone(),
                source: err.into(),
            })?;
        Self::ensure_no_error(response.response_code(), |code| Error::UpdateFailed {
            owner: existing.owner.clone(),
            source: format!("server answered {code}").into(),
        })
    }
}
