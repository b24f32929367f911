//! Address-family genericity.
//!
//! One trait carries everything that differs between the IPv4 and IPv6
//! reconciliation paths so the address and neighbor logic is written once.

use std::fmt::Debug;
use std::net::{Ipv4Addr, Ipv6Addr};

/// Per-family constants and conversions.
pub trait AddrFamily: 'static {
    type Addr: Copy + Eq + Debug + Send + Sync;

    /// Prefix length assumed when no address exists yet.
    const DEFAULT_PREFIX: u8;

    /// Size of the address on the wire, in bytes.
    const WIRE_SIZE: usize;

    /// Protocol identifier used by the network service.
    const PROTOCOL: &'static str;

    /// Name of the default gateway property for this family.
    const GATEWAY_PROPERTY: &'static str;

    fn parse(s: &str) -> Option<Self::Addr>;

    fn format(addr: &Self::Addr) -> String;

    fn octets(addr: &Self::Addr) -> Vec<u8>;
}

/// IPv4 marker.
pub struct Ipv4;

impl AddrFamily for Ipv4 {
    type Addr = Ipv4Addr;

    const DEFAULT_PREFIX: u8 = 32;
    const WIRE_SIZE: usize = 4;
    const PROTOCOL: &'static str = "xyz.openbmc_project.Network.IP.Protocol.IPv4";
    const GATEWAY_PROPERTY: &'static str = "DefaultGateway";

    fn parse(s: &str) -> Option<Ipv4Addr> {
        s.parse().ok()
    }

    fn format(addr: &Ipv4Addr) -> String {
        addr.to_string()
    }

    fn octets(addr: &Ipv4Addr) -> Vec<u8> {
        addr.octets().to_vec()
    }
}

/// IPv6 marker.
pub struct Ipv6;

impl AddrFamily for Ipv6 {
    type Addr = Ipv6Addr;

    const DEFAULT_PREFIX: u8 = 128;
    const WIRE_SIZE: usize = 16;
    const PROTOCOL: &'static str = "xyz.openbmc_project.Network.IP.Protocol.IPv6";
    const GATEWAY_PROPERTY: &'static str = "DefaultGateway6";

    fn parse(s: &str) -> Option<Ipv6Addr> {
        s.parse().ok()
    }

    fn format(addr: &Ipv6Addr) -> String {
        addr.to_string()
    }

    fn octets(addr: &Ipv6Addr) -> Vec<u8> {
        addr.octets().to_vec()
    }
}
