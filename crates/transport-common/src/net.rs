//! MAC address and netmask/prefix primitives.

use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

/// An Ethernet hardware address.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct MacAddr(pub [u8; 6]);

impl MacAddr {
    pub fn octets(&self) -> [u8; 6] {
        self.0
    }

    /// Only nonzero unicast addresses may be assigned. The least
    /// significant bit of the first octet marks a multicast address.
    pub fn is_valid(&self) -> bool {
        if self.0 == [0; 6] {
            return false;
        }
        self.0[0] & 1 == 0
    }
}

impl From<[u8; 6]> for MacAddr {
    fn from(octets: [u8; 6]) -> Self {
        MacAddr(octets)
    }
}

impl fmt::Display for MacAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let o = &self.0;
        write!(
            f,
            "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}",
            o[0], o[1], o[2], o[3], o[4], o[5]
        )
    }
}

/// Parse error for [`MacAddr`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidMacAddr;

impl FromStr for MacAddr {
    type Err = InvalidMacAddr;

    /// Accepts six colon-separated hex octets of one or two digits.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut octets = [0u8; 6];
        let mut parts = s.split(':');
        for octet in octets.iter_mut() {
            let part = parts.next().ok_or(InvalidMacAddr)?;
            if part.is_empty() || part.len() > 2 {
                return Err(InvalidMacAddr);
            }
            *octet = u8::from_str_radix(part, 16).map_err(|_| InvalidMacAddr)?;
        }
        if parts.next().is_some() {
            return Err(InvalidMacAddr);
        }
        Ok(MacAddr(octets))
    }
}

/// Turns a prefix length into an IPv4 netmask.
///
/// Prefix 0 is handled explicitly to avoid a 32-bit shift by 32.
pub fn prefix_to_netmask(prefix: u8) -> Option<Ipv4Addr> {
    if prefix > 32 {
        return None;
    }
    if prefix == 0 {
        return Some(Ipv4Addr::UNSPECIFIED);
    }
    Some(Ipv4Addr::from(!0u32 << (32 - prefix)))
}

/// Turns an IPv4 netmask into a prefix length.
///
/// The mask must be a left-aligned run of one bits.
pub fn netmask_to_prefix(netmask: Ipv4Addr) -> Option<u8> {
    let x = u32::from(netmask);
    if (!x & (!x).wrapping_add(1)) != 0 {
        return None;
    }
    if x == 0 {
        Some(0)
    } else {
        Some(32 - x.trailing_zeros() as u8)
    }
}
