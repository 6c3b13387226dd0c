//! Local host address discovery.
//!
//! When a request doesn't carry a target address, the record points at the
//! host running this service. This module answers "what is this host's IPv4
//! address" by enumerating network interfaces; the trait seam exists so the
//! engine can be exercised without real interfaces.

use crate::error::Error;
use pnet::datalink;
use pnet::ipnetwork::IpNetwork;
use std::net::Ipv4Addr;

/// Where the upsert engine gets the host's own IPv4 address when a request
/// doesn't supply one.
pub trait HostAddrSource: Send + Sync {
    /// The first usable IPv4 address bound to this host.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoAddressAvailable`] if no address qualifies.
    fn first_ipv4(&self) -> Result<Ipv4Addr, Error>;
}

/// Enumerates the host's network interfaces, yielding the first IPv4 address
/// bound to an interface that is up and not loopback.
#[derive(Default, Debug, Clone, Copy)]
pub struct InterfaceAddrSource;

impl HostAddrSource for InterfaceAddrSource {
    fn first_ipv4(&self) -> Result<Ipv4Addr, Error> {
        datalink::interfaces()
            .iter()
            .filter(|iface| iface.is_up() && !iface.is_loopback())
            .flat_map(|iface| iface.ips.iter())
            .find_map(|network| match network {
                IpNetwork::V4(v4) => Some(v4.ip()),
                IpNetwork::V6(_) => None,
            })
            .ok_or(Error::NoAddressAvailable)
    }
}
