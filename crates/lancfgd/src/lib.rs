//! LAN Configuration Parameter Daemon - IPMI network parameter engine
//!
//! lancfgd implements Get/Set LAN Configuration Parameters on top of the
//! platform network-management service:
//! - Channel to interface/VLAN topology resolution
//! - Combined DHCP mode transitions per IP family
//! - IPv4 address read-modify-write, slotted IPv6 static addresses
//! - Gateway and gateway-MAC (static neighbor) reconciliation
//! - VLAN recreation with configuration snapshot and replay
//! - RMCP+ cipher suite list and privilege policy
//! - OEM parameter range delegation

pub mod addr;
pub mod cache;
pub mod channel;
pub mod cipher;
pub mod dhcp;
pub mod family;
pub mod lan_mgr;
pub mod oem;
pub mod paths;
pub mod types;
pub mod vlan;

#[cfg(test)]
mod testutil;

pub use cipher::{CipherList, CipherPolicy, FileCipherPolicy};
pub use lan_mgr::LanMgr;
pub use oem::{NoOemSupport, OemHandler};
pub use types::{LanParam, SetStatus, LAN_PARAM_REVISION};
