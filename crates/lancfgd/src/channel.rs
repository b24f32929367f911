//! Channel resolution to a concrete network interface topology.

use ipmi_transport_common::{ChannelRegistry, ObjectBroker, TransportError, TransportResult};
use tracing::warn;

use crate::paths::{INTF_ETHERNET, INTF_VLAN, PATH_ROOT};

/// The interface topology a channel resolves to for one request.
///
/// Never persisted; `logical_path` equals `if_path` when no VLAN device
/// is layered on the physical interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelParams {
    /// Channel id.
    pub id: u8,
    /// Interface name the channel is bound to.
    pub ifname: String,
    /// Service owning the interface objects.
    pub service: String,
    /// Path of the physical (or bonded) interface object.
    pub if_path: String,
    /// Path of the VLAN device if one exists, else `if_path`.
    pub logical_path: String,
}

/// Resolves a channel to its interface topology, if it has one.
pub async fn maybe_channel_params(
    broker: &dyn ObjectBroker,
    registry: &ChannelRegistry,
    channel: u8,
) -> TransportResult<Option<ChannelParams>> {
    let ifname = match registry.name(channel) {
        Some(name) => name.to_string(),
        None => return Ok(None),
    };

    // Enumerate all VLAN + Ethernet interface objects
    let objs = broker
        .get_subtree(PATH_ROOT, &[INTF_VLAN, INTF_ETHERNET])
        .await?;

    let mut service = String::new();
    let mut if_path = String::new();
    let mut logical_path = String::new();
    for (path, impls) in &objs {
        if !path.contains(&ifname) {
            continue;
        }
        for (owner, intfs) in impls {
            let vlan = intfs.iter().any(|i| i == INTF_VLAN);
            let ethernet = intfs.iter().any(|i| i == INTF_ETHERNET);
            if service.is_empty() && (vlan || ethernet) {
                service = owner.clone();
            }
            if if_path.is_empty() && !vlan && ethernet {
                if_path = path.clone();
            }
            if logical_path.is_empty() && vlan {
                logical_path = path.clone();
            }
        }
    }

    // We must have a path for the underlying interface
    if if_path.is_empty() {
        return Ok(None);
    }
    // We don't have a VLAN so the logical path is the same
    if logical_path.is_empty() {
        logical_path = if_path.clone();
    }

    Ok(Some(ChannelParams {
        id: channel,
        ifname,
        service,
        if_path,
        logical_path,
    }))
}

/// Resolves a channel, treating a missing interface as a backend error.
pub async fn channel_params(
    broker: &dyn ObjectBroker,
    registry: &ChannelRegistry,
    channel: u8,
) -> TransportResult<ChannelParams> {
    match maybe_channel_params(broker, registry, channel).await? {
        Some(params) => Ok(params),
        None => {
            warn!(channel, "failed to resolve channel to an interface");
            Err(TransportError::ChannelNotFound { channel })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{registry_with_eth1, MockBroker};

    #[tokio::test]
    async fn test_resolve_physical_only() {
        let broker = MockBroker::with_eth1();
        let params = channel_params(&broker, &registry_with_eth1(), 1)
            .await
            .unwrap();
        assert_eq!(params.ifname, "eth1");
        assert_eq!(params.if_path, "/xyz/openbmc_project/network/eth1");
        assert_eq!(params.logical_path, params.if_path);
        assert!(!params.service.is_empty());
    }

    #[tokio::test]
    async fn test_resolve_with_vlan() {
        let broker = MockBroker::with_eth1();
        broker.add_vlan_object("eth1", 100);
        let params = channel_params(&broker, &registry_with_eth1(), 1)
            .await
            .unwrap();
        assert_eq!(params.if_path, "/xyz/openbmc_project/network/eth1");
        assert_eq!(params.logical_path, "/xyz/openbmc_project/network/eth1_100");
    }

    #[tokio::test]
    async fn test_unknown_channel() {
        let broker = MockBroker::with_eth1();
        let err = channel_params(&broker, &registry_with_eth1(), 9)
            .await
            .unwrap_err();
        assert!(matches!(err, TransportError::ChannelNotFound { channel: 9 }));
    }
}
