//! Get/Set LAN Configuration Parameters engine.
//!
//! Decodes parameter payloads, validates every field, and drives the
//! reconciliation modules. Completion codes distinguish malformed client
//! input from backend failure; backend failure always reads as the
//! unspecified-error code with no partial response data.

use std::collections::HashMap;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::sync::Arc;

use ipmi_transport_common::net::{netmask_to_prefix, prefix_to_netmask};
use ipmi_transport_common::{
    ChannelRegistry, CompletionCode, MacAddr, ObjectBroker, Payload, Response, SessionSupport,
    TransportError, TransportResult,
};
use tracing::{error, instrument};

use crate::addr::{
    deconfigure_if_addr6, get_gateway, get_gateway_neighbor, get_if_addr, get_if_addr4,
    get_mac_property, reconfigure_gateway_mac, reconfigure_if_addr4, reconfigure_if_addr6,
    set_gateway, set_mac_property, AddressOrigin, ORIGINS_V6_DYNAMIC, ORIGINS_V6_STATIC,
};
use crate::channel::{channel_params, ChannelParams};
use crate::cipher::{
    CipherList, CipherPolicy, FileCipherPolicy, CIPHER_LIST_FILE, CS_PRIV_DEFAULT_FILE,
    CS_PRIV_FILE,
};
use crate::dhcp::{get_dhcp_property, set_dhcp_v4_property, DhcpConf};
use crate::family::{AddrFamily, Ipv4, Ipv6};
use crate::oem::{NoOemSupport, OemHandler};
use crate::types::{
    ip_family_support_flag, ipv6_router_control_flag, ipv6_status_flag, IpFamilyEnables, IpSrc,
    Ipv6AddressStatus, Ipv6Source, LanParam, SetStatus, LAN_PARAM_REVISION,
    MAX_CS_RECORDS, MAX_IPV6_DYNAMIC_ADDRESSES, MAX_IPV6_STATIC_ADDRESSES, OEM_PARAM_END,
    OEM_PARAM_START, VLAN_ENABLE_FLAG, VLAN_VALUE_MASK,
};
use crate::vlan::{get_vlan_property, reconfigure_vlan};

/// Short or trailing request data.
macro_rules! unpack {
    ($expr:expr) => {
        match $expr {
            Ok(v) => v,
            Err(_) => return Ok(Response::code(CompletionCode::ReqDataLenInvalid)),
        }
    };
}

fn origin_to_source(origin: AddressOrigin) -> TransportResult<Ipv6Source> {
    match origin {
        AddressOrigin::Static => Ok(Ipv6Source::Static),
        AddressOrigin::Dhcp => Ok(Ipv6Source::Dhcp),
        AddressOrigin::Slaac => Ok(Ipv6Source::Slaac),
        AddressOrigin::LinkLocal => Err(TransportError::internal(
            "no wire representation for link-local origin",
        )),
    }
}

/// The LAN configuration parameter engine.
///
/// Owns the transient per-channel state the protocol requires: the
/// set-in-progress latch and the last disabled VLAN id. Everything else
/// is re-derived from the network service per request.
pub struct LanMgr {
    broker: Arc<dyn ObjectBroker>,
    registry: ChannelRegistry,
    set_status: HashMap<u8, SetStatus>,
    last_disabled_vlan: HashMap<u8, u16>,
    cipher_list: CipherList,
    cipher_policy: Box<dyn CipherPolicy>,
    oem: Box<dyn OemHandler>,
}

impl LanMgr {
    pub fn new(broker: Arc<dyn ObjectBroker>, registry: ChannelRegistry) -> Self {
        Self {
            broker,
            registry,
            set_status: HashMap::new(),
            last_disabled_vlan: HashMap::new(),
            cipher_list: CipherList::new(CIPHER_LIST_FILE),
            cipher_policy: Box::new(FileCipherPolicy::new(CS_PRIV_FILE, CS_PRIV_DEFAULT_FILE)),
            oem: Box::new(NoOemSupport),
        }
    }

    pub fn with_cipher_list(mut self, list: CipherList) -> Self {
        self.cipher_list = list;
        self
    }

    pub fn with_cipher_policy(mut self, policy: Box<dyn CipherPolicy>) -> Self {
        self.cipher_policy = policy;
        self
    }

    pub fn with_oem_handler(mut self, oem: Box<dyn OemHandler>) -> Self {
        self.oem = oem;
        self
    }

    async fn params(&self, channel: u8) -> TransportResult<ChannelParams> {
        channel_params(self.broker.as_ref(), &self.registry, channel).await
    }

    fn set_status(&self, channel: u8) -> SetStatus {
        self.set_status
            .get(&channel)
            .copied()
            .unwrap_or(SetStatus::Complete)
    }

    /// Set LAN Configuration Parameters.
    #[instrument(skip(self, req))]
    pub async fn set_lan(
        &mut self,
        ctx_channel: u8,
        channel_bits: u8,
        reserved: u8,
        parameter: u8,
        mut req: Payload,
    ) -> Response {
        let channel = self.registry.resolve_current(channel_bits, ctx_channel);
        if reserved != 0 || !self.registry.is_valid(channel) {
            error!(channel, "set lan: invalid field in request");
            return Response::code(CompletionCode::InvalidFieldRequest);
        }
        match self.set_lan_inner(channel, parameter, &mut req).await {
            Ok(rsp) => rsp,
            Err(err) => {
                error!(channel, parameter, %err, "set lan failed");
                Response::code(CompletionCode::UnspecifiedError)
            }
        }
    }

    async fn set_lan_inner(
        &mut self,
        channel: u8,
        parameter: u8,
        req: &mut Payload,
    ) -> TransportResult<Response> {
        let param = match LanParam::try_from(parameter) {
            Ok(param) => param,
            Err(_) => {
                if (OEM_PARAM_START..=OEM_PARAM_END).contains(&parameter) {
                    return Ok(self.oem.set_lan(channel, parameter, req).await);
                }
                req.trailing_ok = true;
                return Ok(Response::code(CompletionCode::ParamNotSupported));
            }
        };

        match param {
            LanParam::SetStatus => {
                let flag = unpack!(req.unpack_bits(2));
                let rsvd = unpack!(req.unpack_bits(6));
                unpack!(req.finish());
                if rsvd != 0 {
                    return Ok(Response::code(CompletionCode::InvalidFieldRequest));
                }
                let status = match SetStatus::try_from(flag as u8) {
                    Ok(status) => status,
                    Err(_) => return Ok(Response::code(CompletionCode::ParamNotSupported)),
                };
                match status {
                    SetStatus::Complete => {
                        self.set_status.insert(channel, SetStatus::Complete);
                        Ok(Response::success(Vec::new()))
                    }
                    SetStatus::InProgress => {
                        if self.set_status(channel) == SetStatus::InProgress {
                            return Ok(Response::code(CompletionCode::SetInProgressActive));
                        }
                        self.set_status.insert(channel, SetStatus::InProgress);
                        Ok(Response::success(Vec::new()))
                    }
                    SetStatus::Commit => {
                        // Writes apply immediately; commit only asserts a
                        // session was open.
                        if self.set_status(channel) != SetStatus::InProgress {
                            return Ok(Response::code(CompletionCode::InvalidFieldRequest));
                        }
                        Ok(Response::success(Vec::new()))
                    }
                }
            }
            LanParam::AuthSupport | LanParam::AuthEnables => {
                req.trailing_ok = true;
                Ok(Response::code(CompletionCode::ParamReadOnly))
            }
            LanParam::Ip => {
                let params = self.params(channel).await?;
                let dhcp = get_dhcp_property(self.broker.as_ref(), &params).await?;
                if dhcp.v4_enabled() {
                    return Ok(Response::code(CompletionCode::CommandNotAvailable));
                }
                let bytes: [u8; 4] = unpack!(req.unpack_array());
                unpack!(req.finish());
                reconfigure_if_addr4(
                    self.broker.as_ref(),
                    &params,
                    Some(Ipv4Addr::from(bytes)),
                    None,
                )
                .await?;
                Ok(Response::success(Vec::new()))
            }
            LanParam::IpSrc => {
                let flag = unpack!(req.unpack_bits(4));
                let rsvd = unpack!(req.unpack_bits(4));
                unpack!(req.finish());
                if rsvd != 0 {
                    return Ok(Response::code(CompletionCode::InvalidFieldRequest));
                }
                let src = match IpSrc::try_from(flag as u8) {
                    Ok(src) => src,
                    Err(_) => return Ok(Response::code(CompletionCode::ParamNotSupported)),
                };
                match src {
                    IpSrc::Dhcp => {
                        // This selector only manages IPv4; IPv6 state is
                        // driven by its own parameters.
                        let params = self.params(channel).await?;
                        set_dhcp_v4_property(self.broker.as_ref(), &params, DhcpConf::V4).await?;
                        Ok(Response::success(Vec::new()))
                    }
                    IpSrc::Unspecified | IpSrc::Static => {
                        let params = self.params(channel).await?;
                        set_dhcp_v4_property(self.broker.as_ref(), &params, DhcpConf::None)
                            .await?;
                        Ok(Response::success(Vec::new()))
                    }
                    IpSrc::Bios | IpSrc::Bmc => {
                        Ok(Response::code(CompletionCode::InvalidFieldRequest))
                    }
                }
            }
            LanParam::Mac => {
                let bytes: [u8; 6] = unpack!(req.unpack_array());
                unpack!(req.finish());
                let mac = MacAddr(bytes);
                if !mac.is_valid() {
                    return Ok(Response::code(CompletionCode::InvalidFieldRequest));
                }
                let params = self.params(channel).await?;
                set_mac_property(self.broker.as_ref(), &params, &mac).await?;
                Ok(Response::success(Vec::new()))
            }
            LanParam::SubnetMask => {
                let params = self.params(channel).await?;
                let dhcp = get_dhcp_property(self.broker.as_ref(), &params).await?;
                if dhcp.v4_enabled() {
                    return Ok(Response::code(CompletionCode::CommandNotAvailable));
                }
                let bytes: [u8; 4] = unpack!(req.unpack_array());
                unpack!(req.finish());
                let netmask = Ipv4Addr::from(bytes);
                let prefix = netmask_to_prefix(netmask).ok_or_else(|| {
                    TransportError::invalid_value(format!("invalid netmask {netmask}"))
                })?;
                reconfigure_if_addr4(self.broker.as_ref(), &params, None, Some(prefix)).await?;
                Ok(Response::success(Vec::new()))
            }
            LanParam::Gateway1 => {
                let params = self.params(channel).await?;
                let dhcp = get_dhcp_property(self.broker.as_ref(), &params).await?;
                if dhcp.v4_enabled() {
                    return Ok(Response::code(CompletionCode::CommandNotAvailable));
                }
                let bytes: [u8; 4] = unpack!(req.unpack_array());
                unpack!(req.finish());
                set_gateway::<Ipv4>(self.broker.as_ref(), &params, &Ipv4Addr::from(bytes))
                    .await?;
                Ok(Response::success(Vec::new()))
            }
            LanParam::Gateway1Mac => {
                let bytes: [u8; 6] = unpack!(req.unpack_array());
                unpack!(req.finish());
                let params = self.params(channel).await?;
                reconfigure_gateway_mac::<Ipv4>(self.broker.as_ref(), &params, &MacAddr(bytes))
                    .await?;
                Ok(Response::success(Vec::new()))
            }
            LanParam::VlanId => {
                let vlan_data = unpack!(req.unpack_bits(12));
                let rsvd = unpack!(req.unpack_bits(3));
                let enable = unpack!(req.unpack_bool());
                unpack!(req.finish());
                if rsvd != 0 {
                    return Ok(Response::code(CompletionCode::InvalidFieldRequest));
                }
                let mut vlan = vlan_data as u16;
                if !enable {
                    self.last_disabled_vlan.insert(channel, vlan);
                    vlan = 0;
                } else if vlan == 0 || vlan == VLAN_VALUE_MASK {
                    return Ok(Response::code(CompletionCode::InvalidFieldRequest));
                }
                let mut params = self.params(channel).await?;
                reconfigure_vlan(self.broker.as_ref(), &mut params, vlan).await?;
                Ok(Response::success(Vec::new()))
            }
            LanParam::CiphersuiteSupport
            | LanParam::CiphersuiteEntries
            | LanParam::IpFamilySupport
            | LanParam::Ipv6Status
            | LanParam::Ipv6DynamicAddresses => {
                req.trailing_ok = true;
                Ok(Response::code(CompletionCode::ParamReadOnly))
            }
            LanParam::IpFamilyEnables => {
                let enables = unpack!(req.unpack_u8());
                unpack!(req.finish());
                match IpFamilyEnables::try_from(enables) {
                    Ok(IpFamilyEnables::DualStack) => Ok(Response::success(Vec::new())),
                    _ => Ok(Response::code(CompletionCode::ParamNotSupported)),
                }
            }
            LanParam::Ipv6StaticAddresses => {
                let set = unpack!(req.unpack_u8());
                let rsvd = unpack!(req.unpack_bits(7));
                let enabled = unpack!(req.unpack_bool());
                let bytes: [u8; 16] = unpack!(req.unpack_array());
                let prefix = unpack!(req.unpack_u8());
                let _status = unpack!(req.unpack_u8());
                unpack!(req.finish());
                if rsvd != 0 {
                    return Ok(Response::code(CompletionCode::InvalidFieldRequest));
                }
                if set >= MAX_IPV6_STATIC_ADDRESSES {
                    return Ok(Response::code(CompletionCode::ParamOutOfRange));
                }
                let params = self.params(channel).await?;
                if enabled {
                    reconfigure_if_addr6(
                        self.broker.as_ref(),
                        &params,
                        set,
                        &Ipv6Addr::from(bytes),
                        prefix,
                    )
                    .await?;
                } else {
                    deconfigure_if_addr6(self.broker.as_ref(), &params, set).await?;
                }
                Ok(Response::success(Vec::new()))
            }
            LanParam::Ipv6RouterControl => {
                let control = unpack!(req.unpack_u8());
                unpack!(req.finish());
                let params = self.params(channel).await?;
                let dhcp = get_dhcp_property(self.broker.as_ref(), &params).await?;
                let expected = if dhcp.v6_enabled() {
                    1u8 << ipv6_router_control_flag::DYNAMIC
                } else {
                    1u8 << ipv6_router_control_flag::STATIC
                };
                if control != expected {
                    return Ok(Response::code(CompletionCode::InvalidFieldRequest));
                }
                Ok(Response::success(Vec::new()))
            }
            LanParam::Ipv6StaticRouter1Ip => {
                let bytes: [u8; 16] = unpack!(req.unpack_array());
                unpack!(req.finish());
                let params = self.params(channel).await?;
                set_gateway::<Ipv6>(self.broker.as_ref(), &params, &Ipv6Addr::from(bytes))
                    .await?;
                Ok(Response::success(Vec::new()))
            }
            LanParam::Ipv6StaticRouter1Mac => {
                let bytes: [u8; 6] = unpack!(req.unpack_array());
                unpack!(req.finish());
                let params = self.params(channel).await?;
                reconfigure_gateway_mac::<Ipv6>(self.broker.as_ref(), &params, &MacAddr(bytes))
                    .await?;
                Ok(Response::success(Vec::new()))
            }
            LanParam::Ipv6StaticRouter1PrefixLength => {
                let prefix = unpack!(req.unpack_u8());
                unpack!(req.finish());
                // Our router prefix length is always zero
                if prefix != 0 {
                    return Ok(Response::code(CompletionCode::InvalidFieldRequest));
                }
                Ok(Response::success(Vec::new()))
            }
            LanParam::Ipv6StaticRouter1PrefixValue => {
                let _bytes: [u8; 16] = unpack!(req.unpack_array());
                unpack!(req.finish());
                // Any value is accepted since the prefix length is zero
                Ok(Response::success(Vec::new()))
            }
            LanParam::CipherSuitePrivilegeLevels => {
                let reserved = unpack!(req.unpack_u8());
                let mut levels = [0u8; MAX_CS_RECORDS];
                for level in levels.iter_mut() {
                    *level = unpack!(req.unpack_bits(4)) as u8;
                }
                unpack!(req.finish());
                if reserved != 0 {
                    return Ok(Response::code(CompletionCode::InvalidFieldRequest));
                }
                match self.cipher_policy.set_levels(channel, &levels) {
                    Ok(()) => Ok(Response::success(Vec::new())),
                    Err(err) => {
                        error!(channel, %err, "storing cipher suite privileges failed");
                        req.trailing_ok = true;
                        Ok(Response::code(CompletionCode::UnspecifiedError))
                    }
                }
            }
        }
    }

    /// Get LAN Configuration Parameters.
    #[instrument(skip(self))]
    pub async fn get_lan(
        &mut self,
        ctx_channel: u8,
        channel_bits: u8,
        reserved: u8,
        rev_only: bool,
        parameter: u8,
        set: u8,
        block: u8,
    ) -> Response {
        if rev_only {
            return Response::success(vec![LAN_PARAM_REVISION]);
        }
        let channel = self.registry.resolve_current(channel_bits, ctx_channel);
        if reserved != 0 || !self.registry.is_valid(channel) {
            error!(channel, "get lan: invalid field in request");
            return Response::code(CompletionCode::InvalidFieldRequest);
        }
        match self.get_lan_inner(channel, parameter, set, block).await {
            Ok(rsp) => rsp,
            Err(err) => {
                error!(channel, parameter, %err, "get lan failed");
                Response::code(CompletionCode::UnspecifiedError)
            }
        }
    }

    async fn get_lan_inner(
        &mut self,
        channel: u8,
        parameter: u8,
        set: u8,
        block: u8,
    ) -> TransportResult<Response> {
        let mut ret = Payload::new();
        ret.pack_u8(LAN_PARAM_REVISION);

        let param = match LanParam::try_from(parameter) {
            Ok(param) => param,
            Err(_) => {
                if (OEM_PARAM_START..=OEM_PARAM_END).contains(&parameter) {
                    return Ok(self.oem.get_lan(channel, parameter, set, block).await);
                }
                return Ok(Response::code(CompletionCode::ParamNotSupported));
            }
        };

        match param {
            LanParam::SetStatus => {
                let status = self.set_status(channel);
                ret.pack_bits(2, status as u32);
                ret.pack_bits(6, 0);
            }
            LanParam::AuthSupport => {
                // No authentication types supported
                ret.pack_u8(0);
            }
            LanParam::AuthEnables => {
                // Callback, User, Operator, Admin, OEM
                ret.pack_bytes(&[0; 5]);
            }
            LanParam::Ip => {
                let params = self.params(channel).await?;
                let addr = get_if_addr4(self.broker.as_ref(), &params)
                    .await?
                    .map(|ifaddr| ifaddr.address)
                    .unwrap_or(Ipv4Addr::UNSPECIFIED);
                ret.pack_bytes(&addr.octets());
            }
            LanParam::IpSrc => {
                let params = self.params(channel).await?;
                let dhcp = get_dhcp_property(self.broker.as_ref(), &params).await?;
                let src = if dhcp.v4_enabled() {
                    IpSrc::Dhcp
                } else {
                    IpSrc::Static
                };
                ret.pack_bits(4, src as u32);
                ret.pack_bits(4, 0);
            }
            LanParam::Mac => {
                let params = self.params(channel).await?;
                let mac = get_mac_property(self.broker.as_ref(), &params).await?;
                ret.pack_bytes(&mac.octets());
            }
            LanParam::SubnetMask => {
                let params = self.params(channel).await?;
                let prefix = get_if_addr4(self.broker.as_ref(), &params)
                    .await?
                    .map(|ifaddr| ifaddr.prefix)
                    .unwrap_or(Ipv4::DEFAULT_PREFIX);
                let netmask = prefix_to_netmask(prefix).ok_or_else(|| {
                    TransportError::invalid_value(format!("invalid prefix {prefix}"))
                })?;
                ret.pack_bytes(&netmask.octets());
            }
            LanParam::Gateway1 => {
                let params = self.params(channel).await?;
                let gateway = get_gateway::<Ipv4>(self.broker.as_ref(), &params)
                    .await?
                    .unwrap_or(Ipv4Addr::UNSPECIFIED);
                ret.pack_bytes(&gateway.octets());
            }
            LanParam::Gateway1Mac => {
                let params = self.params(channel).await?;
                let mac = get_gateway_neighbor::<Ipv4>(self.broker.as_ref(), &params)
                    .await?
                    .map(|neighbor| neighbor.mac)
                    .unwrap_or(MacAddr([0; 6]));
                ret.pack_bytes(&mac.octets());
            }
            LanParam::VlanId => {
                let params = self.params(channel).await?;
                let mut vlan = get_vlan_property(self.broker.as_ref(), &params).await?;
                if vlan != 0 {
                    vlan |= VLAN_ENABLE_FLAG;
                } else {
                    // Clients verify a disable against the id they sent
                    vlan = self.last_disabled_vlan.get(&channel).copied().unwrap_or(0);
                }
                ret.pack_u16_le(vlan);
            }
            LanParam::CiphersuiteSupport => {
                if self.registry.session_support(channel) == SessionSupport::None {
                    return Ok(Response::code(CompletionCode::InvalidFieldRequest));
                }
                let list = match self.cipher_list.get() {
                    Some(list) => list,
                    None => return Ok(Response::code(CompletionCode::UnspecifiedError)),
                };
                ret.pack_u8((list.len() - 1) as u8);
            }
            LanParam::CiphersuiteEntries => {
                if self.registry.session_support(channel) == SessionSupport::None {
                    return Ok(Response::code(CompletionCode::InvalidFieldRequest));
                }
                let list = match self.cipher_list.get() {
                    Some(list) => list.to_vec(),
                    None => return Ok(Response::code(CompletionCode::UnspecifiedError)),
                };
                ret.pack_bytes(&list);
            }
            LanParam::CipherSuitePrivilegeLevels => {
                let levels = match self.cipher_policy.get_levels(channel) {
                    Ok(levels) => levels,
                    Err(err) => {
                        error!(channel, %err, "reading cipher suite privileges failed");
                        return Ok(Response::code(CompletionCode::UnspecifiedError));
                    }
                };
                ret.pack_u8(0);
                for level in levels {
                    ret.pack_bits(4, u32::from(level));
                }
            }
            LanParam::IpFamilySupport => {
                let support = (1u8 << ip_family_support_flag::DUAL_STACK)
                    | (1u8 << ip_family_support_flag::IPV6_ALERTS);
                ret.pack_u8(support);
            }
            LanParam::IpFamilyEnables => {
                ret.pack_u8(IpFamilyEnables::DualStack as u8);
            }
            LanParam::Ipv6Status => {
                ret.pack_u8(MAX_IPV6_STATIC_ADDRESSES);
                ret.pack_u8(MAX_IPV6_DYNAMIC_ADDRESSES);
                let support =
                    (1u8 << ipv6_status_flag::DHCP) | (1u8 << ipv6_status_flag::SLAAC);
                ret.pack_u8(support);
            }
            LanParam::Ipv6StaticAddresses => {
                if set >= MAX_IPV6_STATIC_ADDRESSES {
                    return Ok(Response::code(CompletionCode::ParamOutOfRange));
                }
                self.pack_ipv6_slot(&mut ret, channel, set, ORIGINS_V6_STATIC)
                    .await?;
            }
            LanParam::Ipv6DynamicAddresses => {
                if set >= MAX_IPV6_DYNAMIC_ADDRESSES {
                    return Ok(Response::code(CompletionCode::ParamOutOfRange));
                }
                self.pack_ipv6_slot(&mut ret, channel, set, ORIGINS_V6_DYNAMIC)
                    .await?;
            }
            LanParam::Ipv6RouterControl => {
                let params = self.params(channel).await?;
                let dhcp = get_dhcp_property(self.broker.as_ref(), &params).await?;
                let control = if dhcp.v6_enabled() {
                    1u8 << ipv6_router_control_flag::DYNAMIC
                } else {
                    1u8 << ipv6_router_control_flag::STATIC
                };
                ret.pack_u8(control);
            }
            LanParam::Ipv6StaticRouter1Ip => {
                let params = self.params(channel).await?;
                let dhcp = get_dhcp_property(self.broker.as_ref(), &params).await?;
                let mut gateway = Ipv6Addr::UNSPECIFIED;
                if !dhcp.v6_enabled() {
                    gateway = get_gateway::<Ipv6>(self.broker.as_ref(), &params)
                        .await?
                        .unwrap_or(Ipv6Addr::UNSPECIFIED);
                }
                ret.pack_bytes(&gateway.octets());
            }
            LanParam::Ipv6StaticRouter1Mac => {
                let params = self.params(channel).await?;
                let mac = get_gateway_neighbor::<Ipv6>(self.broker.as_ref(), &params)
                    .await?
                    .map(|neighbor| neighbor.mac)
                    .unwrap_or(MacAddr([0; 6]));
                ret.pack_bytes(&mac.octets());
            }
            LanParam::Ipv6StaticRouter1PrefixLength => {
                ret.pack_u8(0);
            }
            LanParam::Ipv6StaticRouter1PrefixValue => {
                ret.pack_bytes(&[0; 16]);
            }
        }
        Ok(Response::success(ret.into_bytes()))
    }

    async fn pack_ipv6_slot(
        &self,
        ret: &mut Payload,
        channel: u8,
        set: u8,
        origins: &[AddressOrigin],
    ) -> TransportResult<()> {
        let params = self.params(channel).await?;
        let ifaddr =
            get_if_addr::<Ipv6>(self.broker.as_ref(), &params, set, origins).await?;
        let (source, enabled, addr, prefix, status) = match &ifaddr {
            Some(ifaddr) => (
                origin_to_source(ifaddr.origin)?,
                true,
                ifaddr.address,
                ifaddr.prefix,
                Ipv6AddressStatus::Active,
            ),
            None => (
                Ipv6Source::Static,
                false,
                Ipv6Addr::UNSPECIFIED,
                Ipv6::DEFAULT_PREFIX,
                Ipv6AddressStatus::Disabled,
            ),
        };
        ret.pack_u8(set);
        ret.pack_bits(4, source as u32);
        ret.pack_bits(3, 0);
        ret.pack_bits(1, u32::from(enabled));
        ret.pack_bytes(&addr.octets());
        ret.pack_u8(prefix);
        ret.pack_u8(status as u8);
        Ok(())
    }
}
