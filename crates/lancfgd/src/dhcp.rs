//! Combined DHCP mode reconciliation.
//!
//! The network service exposes one joint enablement property for both IP
//! families. Toggling one family must recompute the combined value so the
//! other family's state survives the write.

use ipmi_transport_common::{ObjectBroker, TransportError, TransportResult, Value};
use tracing::instrument;

use crate::channel::ChannelParams;
use crate::paths::INTF_ETHERNET;

/// Joint DHCP enablement state of an interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DhcpConf {
    None,
    V4,
    V6,
    Both,
}

impl DhcpConf {
    /// String form used by the network service.
    pub fn as_str(&self) -> &'static str {
        match self {
            DhcpConf::None => "xyz.openbmc_project.Network.EthernetInterface.DHCPConf.none",
            DhcpConf::V4 => "xyz.openbmc_project.Network.EthernetInterface.DHCPConf.v4",
            DhcpConf::V6 => "xyz.openbmc_project.Network.EthernetInterface.DHCPConf.v6",
            DhcpConf::Both => "xyz.openbmc_project.Network.EthernetInterface.DHCPConf.both",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "xyz.openbmc_project.Network.EthernetInterface.DHCPConf.none" => Some(DhcpConf::None),
            "xyz.openbmc_project.Network.EthernetInterface.DHCPConf.v4" => Some(DhcpConf::V4),
            "xyz.openbmc_project.Network.EthernetInterface.DHCPConf.v6" => Some(DhcpConf::V6),
            "xyz.openbmc_project.Network.EthernetInterface.DHCPConf.both" => Some(DhcpConf::Both),
            _ => None,
        }
    }

    /// True when DHCPv4 is active.
    pub fn v4_enabled(&self) -> bool {
        matches!(self, DhcpConf::V4 | DhcpConf::Both)
    }

    /// True when DHCPv6 is active.
    pub fn v6_enabled(&self) -> bool {
        matches!(self, DhcpConf::V6 | DhcpConf::Both)
    }
}

/// Next combined mode when the IPv4 side is toggled.
///
/// `requested` carries only the v4 intent: `V4` to enable, `None` to
/// disable. Any other combination leaves the mode unchanged.
pub fn next_dhcp_v4(current: DhcpConf, requested: DhcpConf) -> DhcpConf {
    match (current, requested) {
        (DhcpConf::V6, DhcpConf::V4) => DhcpConf::Both,
        (DhcpConf::None, DhcpConf::V4) => DhcpConf::V4,
        (DhcpConf::Both, DhcpConf::None) => DhcpConf::V6,
        (DhcpConf::V4, DhcpConf::None) => DhcpConf::None,
        _ => current,
    }
}

/// Next combined mode when the IPv6 side is toggled.
///
/// With `default_mode` false the requested value is assigned verbatim;
/// channel deconfiguration uses this to force a full state.
pub fn next_dhcp_v6(current: DhcpConf, requested: DhcpConf, default_mode: bool) -> DhcpConf {
    if !default_mode {
        // allow the v6 call to set any value
        return requested;
    }
    match (current, requested) {
        (DhcpConf::V4, DhcpConf::V6) => DhcpConf::Both,
        (DhcpConf::None, DhcpConf::V6) => DhcpConf::V6,
        (DhcpConf::Both, DhcpConf::None) => DhcpConf::V4,
        (DhcpConf::V6, DhcpConf::None) => DhcpConf::None,
        _ => current,
    }
}

/// Reads the combined DHCP mode of the channel's logical interface.
pub async fn get_dhcp_property(
    broker: &dyn ObjectBroker,
    params: &ChannelParams,
) -> TransportResult<DhcpConf> {
    let value = broker
        .get_property(
            &params.service,
            &params.logical_path,
            INTF_ETHERNET,
            "DHCPEnabled",
        )
        .await?;
    DhcpConf::from_str(value.as_str()?)
        .ok_or_else(|| TransportError::invalid_value(format!("unknown DHCP mode {value:?}")))
}

async fn write_dhcp(
    broker: &dyn ObjectBroker,
    params: &ChannelParams,
    next: DhcpConf,
) -> TransportResult<()> {
    broker
        .set_property(
            &params.service,
            &params.logical_path,
            INTF_ETHERNET,
            "DHCPEnabled",
            Value::from(next.as_str()),
        )
        .await
}

/// Applies an IPv4-side DHCP toggle as one combined property write.
#[instrument(skip(broker, params), fields(channel = params.id))]
pub async fn set_dhcp_v4_property(
    broker: &dyn ObjectBroker,
    params: &ChannelParams,
    requested: DhcpConf,
) -> TransportResult<()> {
    let current = get_dhcp_property(broker, params).await?;
    write_dhcp(broker, params, next_dhcp_v4(current, requested)).await
}

/// Applies an IPv6-side DHCP toggle as one combined property write.
#[instrument(skip(broker, params), fields(channel = params.id))]
pub async fn set_dhcp_v6_property(
    broker: &dyn ObjectBroker,
    params: &ChannelParams,
    requested: DhcpConf,
    default_mode: bool,
) -> TransportResult<()> {
    let current = get_dhcp_property(broker, params).await?;
    write_dhcp(broker, params, next_dhcp_v6(current, requested, default_mode)).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_v4_toggle_table() {
        assert_eq!(next_dhcp_v4(DhcpConf::V6, DhcpConf::V4), DhcpConf::Both);
        assert_eq!(next_dhcp_v4(DhcpConf::None, DhcpConf::V4), DhcpConf::V4);
        assert_eq!(next_dhcp_v4(DhcpConf::Both, DhcpConf::None), DhcpConf::V6);
        assert_eq!(next_dhcp_v4(DhcpConf::V4, DhcpConf::None), DhcpConf::None);
        // Redundant requests leave the other family alone.
        assert_eq!(next_dhcp_v4(DhcpConf::V4, DhcpConf::V4), DhcpConf::V4);
        assert_eq!(next_dhcp_v4(DhcpConf::Both, DhcpConf::V4), DhcpConf::Both);
        assert_eq!(next_dhcp_v4(DhcpConf::V6, DhcpConf::None), DhcpConf::V6);
    }

    #[test]
    fn test_v6_toggle_table() {
        assert_eq!(
            next_dhcp_v6(DhcpConf::V4, DhcpConf::V6, true),
            DhcpConf::Both
        );
        assert_eq!(next_dhcp_v6(DhcpConf::None, DhcpConf::V6, true), DhcpConf::V6);
        assert_eq!(next_dhcp_v6(DhcpConf::Both, DhcpConf::None, true), DhcpConf::V4);
        assert_eq!(next_dhcp_v6(DhcpConf::V6, DhcpConf::None, true), DhcpConf::None);
        assert_eq!(next_dhcp_v6(DhcpConf::V6, DhcpConf::V6, true), DhcpConf::V6);
        assert_eq!(next_dhcp_v6(DhcpConf::V4, DhcpConf::None, true), DhcpConf::V4);
    }

    #[test]
    fn test_v6_verbatim_mode() {
        assert_eq!(
            next_dhcp_v6(DhcpConf::Both, DhcpConf::None, false),
            DhcpConf::None
        );
        assert_eq!(
            next_dhcp_v6(DhcpConf::None, DhcpConf::Both, false),
            DhcpConf::Both
        );
    }

    #[test]
    fn test_string_roundtrip() {
        for conf in [DhcpConf::None, DhcpConf::V4, DhcpConf::V6, DhcpConf::Both] {
            assert_eq!(DhcpConf::from_str(conf.as_str()), Some(conf));
        }
        assert_eq!(DhcpConf::from_str("bogus"), None);
    }
}
