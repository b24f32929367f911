//! VLAN device lifecycle.
//!
//! The network service cannot migrate interface customizations onto a new
//! VLAN device, so changing the VLAN id snapshots the old configuration,
//! tears the channel down, creates the new device, and replays the saved
//! settings. There is no rollback if a restore step fails.

use ipmi_transport_common::{
    delete_object_if_exists, ObjectBroker, TransportError, TransportResult,
};
use tracing::{error, info, instrument};

use crate::addr::{
    create_if_addr, create_neighbor, find_gateway_neighbor, find_if_addr, IfAddr, IfNeigh,
    ORIGINS_V4, ORIGINS_V6_STATIC,
};
use crate::cache::ObjectLookupCache;
use crate::channel::ChannelParams;
use crate::dhcp::{get_dhcp_property, set_dhcp_v6_property, DhcpConf};
use crate::family::{Ipv4, Ipv6};
use crate::paths::{INTF_DELETE, INTF_IP, INTF_NEIGHBOR, INTF_VLAN, PATH_ROOT};
use crate::types::{MAX_IPV6_STATIC_ADDRESSES, VLAN_VALUE_MASK};

/// The VLAN id configured on the channel, or 0 for none.
pub async fn get_vlan_property(
    broker: &dyn ObjectBroker,
    params: &ChannelParams,
) -> TransportResult<u16> {
    // VLAN devices always have a separate logical object
    if params.if_path == params.logical_path {
        return Ok(0);
    }
    let vlan = broker
        .get_property(&params.service, &params.logical_path, INTF_VLAN, "Id")
        .await?
        .as_u32()?;
    if (vlan & u32::from(VLAN_VALUE_MASK)) != vlan {
        error!(channel = params.id, vlan, "network service returned an invalid vlan");
        return Err(TransportError::invalid_value(format!(
            "vlan id {vlan} out of range"
        )));
    }
    Ok(vlan as u16)
}

/// Deletes every deletable object associated with the channel's interface
/// and clears DHCP on the lower physical interface.
pub async fn deconfigure_channel(
    broker: &dyn ObjectBroker,
    params: &mut ChannelParams,
) -> TransportResult<()> {
    let objs = broker.get_subtree(PATH_ROOT, &[INTF_DELETE]).await?;
    for (path, impls) in &objs {
        if !path.contains(&params.ifname) {
            continue;
        }
        for (service, _) in impls {
            delete_object_if_exists(broker, service, path).await?;
        }
        // Reflect the deletion of the vlan device
        if *path == params.logical_path {
            params.logical_path = params.if_path.clone();
        }
    }
    set_dhcp_v6_property(broker, params, DhcpConf::None, false).await
}

/// Creates a new VLAN device on the channel's physical interface.
///
/// An id of 0 means no device; the call is a no-op.
pub async fn create_vlan(
    broker: &dyn ObjectBroker,
    params: &mut ChannelParams,
    vlan: u16,
) -> TransportResult<()> {
    if vlan == 0 {
        return Ok(());
    }
    let new_path = broker
        .create_vlan(&params.service, &params.ifname, u32::from(vlan))
        .await?;
    params.logical_path = new_path;
    Ok(())
}

/// Saved channel configuration replayed after a VLAN change.
struct ChannelSnapshot {
    dhcp: DhcpConf,
    ifaddr4: Option<IfAddr<Ipv4>>,
    ifaddrs6: Vec<IfAddr<Ipv6>>,
    neighbor4: Option<IfNeigh<Ipv4>>,
    neighbor6: Option<IfNeigh<Ipv6>>,
}

async fn snapshot_channel(
    broker: &dyn ObjectBroker,
    params: &ChannelParams,
) -> TransportResult<ChannelSnapshot> {
    let mut ips = ObjectLookupCache::new(broker, params, INTF_IP).await?;
    let ifaddr4 = find_if_addr::<Ipv4>(0, ORIGINS_V4, &mut ips).await?;
    let mut ifaddrs6 = Vec::new();
    for i in 0..MAX_IPV6_STATIC_ADDRESSES {
        match find_if_addr::<Ipv6>(i, ORIGINS_V6_STATIC, &mut ips).await? {
            Some(ifaddr) => ifaddrs6.push(ifaddr),
            None => break,
        }
    }
    let dhcp = get_dhcp_property(broker, params).await?;
    let mut neighbors = ObjectLookupCache::new(broker, params, INTF_NEIGHBOR).await?;
    let neighbor4 = find_gateway_neighbor::<Ipv4>(broker, params, &mut neighbors).await?;
    let neighbor6 = find_gateway_neighbor::<Ipv6>(broker, params, &mut neighbors).await?;
    Ok(ChannelSnapshot {
        dhcp,
        ifaddr4,
        ifaddrs6,
        neighbor4,
        neighbor6,
    })
}

/// Moves the channel onto a new VLAN id, carrying over addresses, DHCP
/// mode, and gateway neighbors.
#[instrument(skip(broker, params), fields(channel = params.id))]
pub async fn reconfigure_vlan(
    broker: &dyn ObjectBroker,
    params: &mut ChannelParams,
    vlan: u16,
) -> TransportResult<()> {
    let saved = snapshot_channel(broker, params).await?;

    deconfigure_channel(broker, params).await?;
    create_vlan(broker, params, vlan).await?;
    info!(channel = params.id, vlan, "recreated channel on new vlan");

    // Re-establish the saved settings
    set_dhcp_v6_property(broker, params, saved.dhcp, false).await?;
    if let Some(ifaddr4) = &saved.ifaddr4 {
        create_if_addr::<Ipv4>(broker, params, &ifaddr4.address, ifaddr4.prefix).await?;
    }
    for ifaddr6 in &saved.ifaddrs6 {
        create_if_addr::<Ipv6>(broker, params, &ifaddr6.address, ifaddr6.prefix).await?;
    }
    if let Some(neighbor4) = &saved.neighbor4 {
        create_neighbor::<Ipv4>(broker, params, &neighbor4.ip, &neighbor4.mac).await?;
    }
    if let Some(neighbor6) = &saved.neighbor6 {
        create_neighbor::<Ipv6>(broker, params, &neighbor6.ip, &neighbor6.mac).await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::addr::{
        get_gateway_neighbor, get_if_addr, get_if_addr4, reconfigure_gateway_mac, set_gateway,
    };
    use crate::testutil::{registry_with_eth1, MockBroker};
    use ipmi_transport_common::MacAddr;
    use std::net::{Ipv4Addr, Ipv6Addr};

    async fn params(broker: &MockBroker) -> ChannelParams {
        crate::channel::channel_params(broker, &registry_with_eth1(), 1)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_vlan_property_absent() {
        let broker = MockBroker::with_eth1();
        let p = params(&broker).await;
        assert_eq!(get_vlan_property(&broker, &p).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_vlan_property_present() {
        let broker = MockBroker::with_eth1();
        broker.add_vlan_object("eth1", 100);
        let p = params(&broker).await;
        assert_eq!(get_vlan_property(&broker, &p).await.unwrap(), 100);
    }

    #[tokio::test]
    async fn test_create_vlan_updates_logical_path() {
        let broker = MockBroker::with_eth1();
        let mut p = params(&broker).await;
        create_vlan(&broker, &mut p, 100).await.unwrap();
        assert_eq!(p.logical_path, "/xyz/openbmc_project/network/eth1_100");
    }

    #[tokio::test]
    async fn test_create_vlan_zero_is_noop() {
        let broker = MockBroker::with_eth1();
        let mut p = params(&broker).await;
        create_vlan(&broker, &mut p, 0).await.unwrap();
        assert_eq!(p.logical_path, p.if_path);
    }

    #[tokio::test]
    async fn test_deconfigure_resets_logical_path() {
        let broker = MockBroker::with_eth1();
        broker.add_vlan_object("eth1", 100);
        let mut p = params(&broker).await;
        assert_ne!(p.logical_path, p.if_path);
        deconfigure_channel(&broker, &mut p).await.unwrap();
        assert_eq!(p.logical_path, p.if_path);
        assert_eq!(get_vlan_property(&broker, &p).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_reconfigure_carries_settings() {
        let broker = MockBroker::with_eth1();
        broker.add_ip_object("eth1", "10.0.0.1", 24, "Static", true);
        broker.add_ip_object("eth1", "fd00::1", 64, "Static", false);
        let mut p = params(&broker).await;
        let gw = Ipv4Addr::new(10, 0, 0, 254);
        set_gateway::<Ipv4>(&broker, &p, &gw).await.unwrap();
        reconfigure_gateway_mac::<Ipv4>(&broker, &p, &"02:00:00:00:00:01".parse().unwrap())
            .await
            .unwrap();

        reconfigure_vlan(&broker, &mut p, 200).await.unwrap();

        assert_eq!(p.logical_path, "/xyz/openbmc_project/network/eth1_200");
        assert_eq!(get_vlan_property(&broker, &p).await.unwrap(), 200);
        let addr4 = get_if_addr4(&broker, &p).await.unwrap().unwrap();
        assert_eq!(addr4.address, Ipv4Addr::new(10, 0, 0, 1));
        let addr6 = get_if_addr::<Ipv6>(&broker, &p, 0, ORIGINS_V6_STATIC)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(addr6.prefix, 64);
        let neigh = get_gateway_neighbor::<Ipv4>(&broker, &p)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(neigh.ip, gw);
    }

    #[tokio::test]
    async fn test_reconfigure_carries_dhcp_both_and_every_slot() {
        let broker = MockBroker::with_eth1();
        broker.add_ip_object("eth1", "10.0.0.1", 24, "Static", true);
        broker.add_ip_object("eth1", "fd00::1", 64, "Static", false);
        broker.add_ip_object("eth1", "fd00::2", 80, "Static", false);
        let mut p = params(&broker).await;
        set_dhcp_v6_property(&broker, &p, DhcpConf::Both, false)
            .await
            .unwrap();
        set_gateway::<Ipv4>(&broker, &p, &Ipv4Addr::new(10, 0, 0, 254))
            .await
            .unwrap();
        let gw6: Ipv6Addr = "fd00::ff".parse().unwrap();
        set_gateway::<Ipv6>(&broker, &p, &gw6).await.unwrap();
        let mac4: MacAddr = "02:00:00:00:00:01".parse().unwrap();
        let mac6: MacAddr = "02:00:00:00:00:02".parse().unwrap();
        reconfigure_gateway_mac::<Ipv4>(&broker, &p, &mac4).await.unwrap();
        reconfigure_gateway_mac::<Ipv6>(&broker, &p, &mac6).await.unwrap();

        reconfigure_vlan(&broker, &mut p, 300).await.unwrap();

        assert_eq!(p.logical_path, "/xyz/openbmc_project/network/eth1_300");
        assert_eq!(get_vlan_property(&broker, &p).await.unwrap(), 300);
        // The combined DHCP mode survives onto the new logical interface
        assert_eq!(
            get_dhcp_property(&broker, &p).await.unwrap(),
            DhcpConf::Both
        );
        let addr4 = get_if_addr4(&broker, &p).await.unwrap().unwrap();
        assert_eq!(addr4.address, Ipv4Addr::new(10, 0, 0, 1));
        assert_eq!(addr4.prefix, 24);
        // Both static slots come back in their original order
        let slot0 = get_if_addr::<Ipv6>(&broker, &p, 0, ORIGINS_V6_STATIC)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(slot0.address, "fd00::1".parse::<Ipv6Addr>().unwrap());
        assert_eq!(slot0.prefix, 64);
        let slot1 = get_if_addr::<Ipv6>(&broker, &p, 1, ORIGINS_V6_STATIC)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(slot1.address, "fd00::2".parse::<Ipv6Addr>().unwrap());
        assert_eq!(slot1.prefix, 80);
        let neigh4 = get_gateway_neighbor::<Ipv4>(&broker, &p)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(neigh4.mac, mac4);
        let neigh6 = get_gateway_neighbor::<Ipv6>(&broker, &p)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(neigh6.ip, gw6);
        assert_eq!(neigh6.mac, mac6);
        assert_eq!(broker.neighbor_count(), 2);
    }

    #[tokio::test]
    async fn test_reconfigure_to_zero_removes_device() {
        let broker = MockBroker::with_eth1();
        broker.add_vlan_object("eth1", 100);
        let mut p = params(&broker).await;
        reconfigure_vlan(&broker, &mut p, 0).await.unwrap();
        assert_eq!(p.logical_path, p.if_path);
        assert_eq!(get_vlan_property(&broker, &p).await.unwrap(), 0);
    }
}
