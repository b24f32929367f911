//! IPv4/IPv6 address, gateway, and neighbor reconciliation.
//!
//! Addresses are never edited in place: the current object is deleted and
//! a replacement created, with prior values as fallback for unsupplied
//! fields. IPv6 static addresses are addressed by enumeration-order slot,
//! not by identity.

use ipmi_transport_common::{
    delete_object_if_exists, MacAddr, ObjectBroker, TransportError, TransportResult, Value,
};
use tracing::instrument;

use crate::cache::ObjectLookupCache;
use crate::channel::ChannelParams;
use crate::family::{AddrFamily, Ipv4, Ipv6};
use crate::paths::{INTF_IP, INTF_MAC, INTF_NEIGHBOR, INTF_SYSTEMCONFIG, PATH_SYSTEMCONFIG};

/// Where an address came from, as reported by the network service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressOrigin {
    Static,
    Dhcp,
    Slaac,
    LinkLocal,
}

impl AddressOrigin {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "xyz.openbmc_project.Network.IP.AddressOrigin.Static" => Some(AddressOrigin::Static),
            "xyz.openbmc_project.Network.IP.AddressOrigin.DHCP" => Some(AddressOrigin::Dhcp),
            "xyz.openbmc_project.Network.IP.AddressOrigin.SLAAC" => Some(AddressOrigin::Slaac),
            "xyz.openbmc_project.Network.IP.AddressOrigin.LinkLocal" => {
                Some(AddressOrigin::LinkLocal)
            }
            _ => None,
        }
    }
}

/// Origins that count as "the" IPv4 address of an interface.
pub const ORIGINS_V4: &[AddressOrigin] = &[AddressOrigin::Static, AddressOrigin::Dhcp];

/// Origins visible through the IPv6 static slot array.
pub const ORIGINS_V6_STATIC: &[AddressOrigin] = &[AddressOrigin::Static];

/// Origins visible through the IPv6 dynamic address array.
pub const ORIGINS_V6_DYNAMIC: &[AddressOrigin] = &[AddressOrigin::Dhcp, AddressOrigin::Slaac];

/// A configured address on an interface.
#[derive(Debug, Clone)]
pub struct IfAddr<F: AddrFamily> {
    pub path: String,
    pub address: F::Addr,
    pub origin: AddressOrigin,
    pub prefix: u8,
}

/// A static neighbor (gateway MAC) entry on an interface.
#[derive(Debug, Clone)]
pub struct IfNeigh<F: AddrFamily> {
    pub path: String,
    pub ip: F::Addr,
    pub mac: MacAddr,
}

/// Finds the `idx`-th address of the family in enumeration order whose
/// origin is in `origins`.
pub async fn find_if_addr<F: AddrFamily>(
    idx: u8,
    origins: &[AddressOrigin],
    ips: &mut ObjectLookupCache<'_>,
) -> TransportResult<Option<IfAddr<F>>> {
    let mut matched = 0u8;
    for path in ips.paths() {
        let props = ips.get_all(&path).await?;
        let protocol = match props.get("Type") {
            Some(v) => v.as_str()?.to_string(),
            None => continue,
        };
        if protocol != F::PROTOCOL {
            continue;
        }
        let origin_str = props
            .get("Origin")
            .ok_or_else(|| TransportError::invalid_value(format!("{path} has no Origin")))?
            .as_str()?;
        let origin = AddressOrigin::from_str(origin_str)
            .ok_or_else(|| TransportError::invalid_value(format!("unknown origin {origin_str}")))?;
        if !origins.contains(&origin) {
            continue;
        }
        if matched < idx {
            matched += 1;
            continue;
        }
        let addr_str = props
            .get("Address")
            .ok_or_else(|| TransportError::invalid_value(format!("{path} has no Address")))?
            .as_str()?
            .to_string();
        let address = F::parse(&addr_str).ok_or_else(|| {
            TransportError::invalid_value(format!("unparseable address {addr_str}"))
        })?;
        let prefix = props
            .get("PrefixLength")
            .ok_or_else(|| TransportError::invalid_value(format!("{path} has no PrefixLength")))?
            .as_u8()?;
        return Ok(Some(IfAddr {
            path,
            address,
            origin,
            prefix,
        }));
    }
    Ok(None)
}

/// Slot lookup with its own enumeration.
pub async fn get_if_addr<F: AddrFamily>(
    broker: &dyn ObjectBroker,
    params: &ChannelParams,
    idx: u8,
    origins: &[AddressOrigin],
) -> TransportResult<Option<IfAddr<F>>> {
    let mut ips = ObjectLookupCache::new(broker, params, INTF_IP).await?;
    find_if_addr::<F>(idx, origins, &mut ips).await
}

/// The IPv4 address of the interface, honoring only Static/DHCP origins.
pub async fn get_if_addr4(
    broker: &dyn ObjectBroker,
    params: &ChannelParams,
) -> TransportResult<Option<IfAddr<Ipv4>>> {
    get_if_addr::<Ipv4>(broker, params, 0, ORIGINS_V4).await
}

/// Creates a new address object on the channel's logical interface.
pub async fn create_if_addr<F: AddrFamily>(
    broker: &dyn ObjectBroker,
    params: &ChannelParams,
    address: &F::Addr,
    prefix: u8,
) -> TransportResult<()> {
    broker
        .create_ip(
            &params.service,
            &params.logical_path,
            F::PROTOCOL,
            &F::format(address),
            prefix,
            "",
        )
        .await
}

/// Replaces the IPv4 address, falling back to the prior address or prefix
/// for whichever field was not supplied.
#[instrument(skip(broker, params), fields(channel = params.id))]
pub async fn reconfigure_if_addr4(
    broker: &dyn ObjectBroker,
    params: &ChannelParams,
    address: Option<std::net::Ipv4Addr>,
    prefix: Option<u8>,
) -> TransportResult<()> {
    let ifaddr = get_if_addr4(broker, params).await?;
    let address = match (address, &ifaddr) {
        (Some(addr), _) => addr,
        (None, Some(ifaddr)) => ifaddr.address,
        (None, None) => {
            return Err(TransportError::internal(
                "missing address for IPv4 assignment",
            ))
        }
    };
    let mut fallback_prefix = Ipv4::DEFAULT_PREFIX;
    if let Some(ifaddr) = &ifaddr {
        fallback_prefix = ifaddr.prefix;
        delete_object_if_exists(broker, &params.service, &ifaddr.path).await?;
    }
    create_if_addr::<Ipv4>(broker, params, &address, prefix.unwrap_or(fallback_prefix)).await
}

/// Deletes the static IPv6 address at slot `idx`, if one exists.
#[instrument(skip(broker, params), fields(channel = params.id))]
pub async fn deconfigure_if_addr6(
    broker: &dyn ObjectBroker,
    params: &ChannelParams,
    idx: u8,
) -> TransportResult<()> {
    if let Some(ifaddr) = get_if_addr::<Ipv6>(broker, params, idx, ORIGINS_V6_STATIC).await? {
        delete_object_if_exists(broker, &params.service, &ifaddr.path).await?;
    }
    Ok(())
}

/// Replaces the static IPv6 address at slot `idx` unconditionally.
#[instrument(skip(broker, params, address), fields(channel = params.id))]
pub async fn reconfigure_if_addr6(
    broker: &dyn ObjectBroker,
    params: &ChannelParams,
    idx: u8,
    address: &std::net::Ipv6Addr,
    prefix: u8,
) -> TransportResult<()> {
    deconfigure_if_addr6(broker, params, idx).await?;
    create_if_addr::<Ipv6>(broker, params, address, prefix).await
}

/// Reads the default gateway for the family. Empty or unparseable values
/// read as absent.
pub async fn get_gateway<F: AddrFamily>(
    broker: &dyn ObjectBroker,
    params: &ChannelParams,
) -> TransportResult<Option<F::Addr>> {
    let value = broker
        .get_property(
            &params.service,
            PATH_SYSTEMCONFIG,
            INTF_SYSTEMCONFIG,
            F::GATEWAY_PROPERTY,
        )
        .await?;
    Ok(F::parse(value.as_str()?))
}

/// Writes the default gateway for the family.
pub async fn set_gateway<F: AddrFamily>(
    broker: &dyn ObjectBroker,
    params: &ChannelParams,
    gateway: &F::Addr,
) -> TransportResult<()> {
    broker
        .set_property(
            &params.service,
            PATH_SYSTEMCONFIG,
            INTF_SYSTEMCONFIG,
            F::GATEWAY_PROPERTY,
            Value::from(F::format(gateway)),
        )
        .await
}

/// Finds the permanent neighbor entry for `ip`, if one exists.
pub async fn find_static_neighbor<F: AddrFamily>(
    ip: &F::Addr,
    neighbors: &mut ObjectLookupCache<'_>,
) -> TransportResult<Option<IfNeigh<F>>> {
    const STATE_PERMANENT: &str = "xyz.openbmc_project.Network.Neighbor.State.Permanent";
    for path in neighbors.paths() {
        let props = neighbors.get_all(&path).await?;
        let state = match props.get("State") {
            Some(v) => v.as_str()?.to_string(),
            None => continue,
        };
        if state != STATE_PERMANENT {
            continue;
        }
        let ip_str = props
            .get("IPAddress")
            .ok_or_else(|| TransportError::invalid_value(format!("{path} has no IPAddress")))?
            .as_str()?
            .to_string();
        let neigh_ip = match F::parse(&ip_str) {
            Some(addr) => addr,
            None => continue, // other family
        };
        if neigh_ip != *ip {
            continue;
        }
        let mac_str = props
            .get("MACAddress")
            .ok_or_else(|| TransportError::invalid_value(format!("{path} has no MACAddress")))?
            .as_str()?
            .to_string();
        let mac = mac_str
            .parse()
            .map_err(|_| TransportError::invalid_value(format!("unparseable MAC {mac_str}")))?;
        return Ok(Some(IfNeigh {
            path,
            ip: neigh_ip,
            mac,
        }));
    }
    Ok(None)
}

/// Creates a permanent neighbor entry on the channel's logical interface.
pub async fn create_neighbor<F: AddrFamily>(
    broker: &dyn ObjectBroker,
    params: &ChannelParams,
    ip: &F::Addr,
    mac: &MacAddr,
) -> TransportResult<()> {
    broker
        .create_neighbor(
            &params.service,
            &params.logical_path,
            &F::format(ip),
            &mac.to_string(),
        )
        .await
}

/// The neighbor entry for the configured gateway, through a shared cache.
pub async fn find_gateway_neighbor<F: AddrFamily>(
    broker: &dyn ObjectBroker,
    params: &ChannelParams,
    neighbors: &mut ObjectLookupCache<'_>,
) -> TransportResult<Option<IfNeigh<F>>> {
    let gateway = match get_gateway::<F>(broker, params).await? {
        Some(gw) => gw,
        None => return Ok(None),
    };
    find_static_neighbor::<F>(&gateway, neighbors).await
}

/// The neighbor entry for the configured gateway.
pub async fn get_gateway_neighbor<F: AddrFamily>(
    broker: &dyn ObjectBroker,
    params: &ChannelParams,
) -> TransportResult<Option<IfNeigh<F>>> {
    let mut neighbors = ObjectLookupCache::new(broker, params, INTF_NEIGHBOR).await?;
    find_gateway_neighbor::<F>(broker, params, &mut neighbors).await
}

/// Replaces the gateway's MAC entry. A gateway must already be set.
#[instrument(skip(broker, params), fields(channel = params.id))]
pub async fn reconfigure_gateway_mac<F: AddrFamily>(
    broker: &dyn ObjectBroker,
    params: &ChannelParams,
    mac: &MacAddr,
) -> TransportResult<()> {
    let gateway = get_gateway::<F>(broker, params).await?.ok_or_else(|| {
        TransportError::internal("tried to set gateway MAC without a gateway")
    })?;
    let mut neighbors = ObjectLookupCache::new(broker, params, INTF_NEIGHBOR).await?;
    if let Some(neighbor) = find_static_neighbor::<F>(&gateway, &mut neighbors).await? {
        delete_object_if_exists(broker, &params.service, &neighbor.path).await?;
    }
    create_neighbor::<F>(broker, params, &gateway, mac).await
}

/// Reads the hardware address of the physical interface.
pub async fn get_mac_property(
    broker: &dyn ObjectBroker,
    params: &ChannelParams,
) -> TransportResult<MacAddr> {
    let value = broker
        .get_property(&params.service, &params.if_path, INTF_MAC, "MACAddress")
        .await?;
    let mac_str = value.as_str()?;
    mac_str
        .parse()
        .map_err(|_| TransportError::invalid_value(format!("unparseable MAC {mac_str}")))
}

/// Writes the hardware address of the physical interface.
pub async fn set_mac_property(
    broker: &dyn ObjectBroker,
    params: &ChannelParams,
    mac: &MacAddr,
) -> TransportResult<()> {
    broker
        .set_property(
            &params.service,
            &params.if_path,
            INTF_MAC,
            "MACAddress",
            Value::from(mac.to_string()),
        )
        .await
}
