//! LAN configuration parameter definitions.

/// Parameter revision returned in every Get response.
pub const LAN_PARAM_REVISION: u8 = 0x11;

/// 12-bit VLAN id mask; the all-ones value is reserved.
pub const VLAN_VALUE_MASK: u16 = 0x0FFF;

/// Enable flag OR'd into the VLAN id on reads.
pub const VLAN_ENABLE_FLAG: u16 = 0x8000;

/// Fixed capacity of the IPv6 static address slot array.
pub const MAX_IPV6_STATIC_ADDRESSES: u8 = 15;

/// Reported capacity for dynamically assigned IPv6 addresses.
pub const MAX_IPV6_DYNAMIC_ADDRESSES: u8 = 16;

/// Number of cipher suite privilege records.
pub const MAX_CS_RECORDS: usize = 16;

/// First and last parameter ids delegated to the OEM extension handler.
pub const OEM_PARAM_START: u8 = 192;
pub const OEM_PARAM_END: u8 = 255;

/// LAN configuration parameter selectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum LanParam {
    SetStatus = 0,
    AuthSupport = 1,
    AuthEnables = 2,
    Ip = 3,
    IpSrc = 4,
    Mac = 5,
    SubnetMask = 6,
    Gateway1 = 12,
    Gateway1Mac = 13,
    VlanId = 20,
    CiphersuiteSupport = 22,
    CiphersuiteEntries = 23,
    CipherSuitePrivilegeLevels = 24,
    IpFamilySupport = 50,
    IpFamilyEnables = 51,
    Ipv6Status = 55,
    Ipv6StaticAddresses = 56,
    Ipv6DynamicAddresses = 59,
    Ipv6RouterControl = 64,
    Ipv6StaticRouter1Ip = 65,
    Ipv6StaticRouter1Mac = 66,
    Ipv6StaticRouter1PrefixLength = 67,
    Ipv6StaticRouter1PrefixValue = 68,
}

impl TryFrom<u8> for LanParam {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, u8> {
        use LanParam::*;
        Ok(match value {
            0 => SetStatus,
            1 => AuthSupport,
            2 => AuthEnables,
            3 => Ip,
            4 => IpSrc,
            5 => Mac,
            6 => SubnetMask,
            12 => Gateway1,
            13 => Gateway1Mac,
            20 => VlanId,
            22 => CiphersuiteSupport,
            23 => CiphersuiteEntries,
            24 => CipherSuitePrivilegeLevels,
            50 => IpFamilySupport,
            51 => IpFamilyEnables,
            55 => Ipv6Status,
            56 => Ipv6StaticAddresses,
            59 => Ipv6DynamicAddresses,
            64 => Ipv6RouterControl,
            65 => Ipv6StaticRouter1Ip,
            66 => Ipv6StaticRouter1Mac,
            67 => Ipv6StaticRouter1PrefixLength,
            68 => Ipv6StaticRouter1PrefixValue,
            other => return Err(other),
        })
    }
}

/// The "set in progress" latch state of a channel.
///
/// Volatile by design; the protocol defines it as transient and it resets
/// on process restart. Commit is a logical transition only: writes apply
/// immediately, so committing merely asserts a session was open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum SetStatus {
    Complete = 0,
    InProgress = 1,
    Commit = 2,
}

impl TryFrom<u8> for SetStatus {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, u8> {
        match value {
            0 => Ok(SetStatus::Complete),
            1 => Ok(SetStatus::InProgress),
            2 => Ok(SetStatus::Commit),
            other => Err(other),
        }
    }
}

/// IPv4 address source selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum IpSrc {
    Unspecified = 0,
    Static = 1,
    Dhcp = 2,
    Bios = 3,
    Bmc = 4,
}

impl TryFrom<u8> for IpSrc {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, u8> {
        match value {
            0 => Ok(IpSrc::Unspecified),
            1 => Ok(IpSrc::Static),
            2 => Ok(IpSrc::Dhcp),
            3 => Ok(IpSrc::Bios),
            4 => Ok(IpSrc::Bmc),
            other => Err(other),
        }
    }
}

/// Wire encoding of an IPv6 address source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Ipv6Source {
    Static = 0,
    Slaac = 1,
    Dhcp = 2,
}

/// Wire encoding of an IPv6 address slot status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Ipv6AddressStatus {
    Active = 0,
    Disabled = 1,
}

/// IP family enablement selector (parameter 51).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum IpFamilyEnables {
    Ipv4Only = 0,
    Ipv6Only = 1,
    DualStack = 2,
}

impl TryFrom<u8> for IpFamilyEnables {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, u8> {
        match value {
            0 => Ok(IpFamilyEnables::Ipv4Only),
            1 => Ok(IpFamilyEnables::Ipv6Only),
            2 => Ok(IpFamilyEnables::DualStack),
            other => Err(other),
        }
    }
}

/// Bit positions within the IP family support bitset (parameter 50).
pub mod ip_family_support_flag {
    pub const IPV6_ONLY: u8 = 0;
    pub const DUAL_STACK: u8 = 1;
    pub const IPV6_ALERTS: u8 = 2;
}

/// Bit positions within the IPv6 status bitset (parameter 55).
pub mod ipv6_status_flag {
    pub const DHCP: u8 = 0;
    pub const SLAAC: u8 = 1;
}

/// Bit positions within the IPv6 router control bitset (parameter 64).
pub mod ipv6_router_control_flag {
    pub const STATIC: u8 = 0;
    pub const DYNAMIC: u8 = 1;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lan_param_roundtrip() {
        for id in [0u8, 3, 6, 12, 20, 24, 50, 56, 68] {
            let param = LanParam::try_from(id).unwrap();
            assert_eq!(param as u8, id);
        }
    }

    #[test]
    fn test_lan_param_unknown() {
        assert_eq!(LanParam::try_from(7), Err(7));
        assert_eq!(LanParam::try_from(192), Err(192));
    }

    #[test]
    fn test_set_status_values() {
        assert_eq!(SetStatus::try_from(1), Ok(SetStatus::InProgress));
        assert_eq!(SetStatus::try_from(3), Err(3));
    }
}
