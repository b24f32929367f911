//! Object paths and capability interface names on the network service.

/// Root of the network object tree.
pub const PATH_ROOT: &str = "/xyz/openbmc_project/network";

/// System-wide network configuration object (default gateways).
pub const PATH_SYSTEMCONFIG: &str = "/xyz/openbmc_project/network/config";

pub const INTF_SYSTEMCONFIG: &str = "xyz.openbmc_project.Network.SystemConfiguration";
pub const INTF_ETHERNET: &str = "xyz.openbmc_project.Network.EthernetInterface";
pub const INTF_VLAN: &str = "xyz.openbmc_project.Network.VLAN";
pub const INTF_IP: &str = "xyz.openbmc_project.Network.IP";
pub const INTF_MAC: &str = "xyz.openbmc_project.Network.MACAddress";
pub const INTF_NEIGHBOR: &str = "xyz.openbmc_project.Network.Neighbor";

/// Marker interface implemented by every deletable object.
pub const INTF_DELETE: &str = "xyz.openbmc_project.Object.Delete";
