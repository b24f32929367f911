//! In-memory object broker for tests.

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;
use ipmi_transport_common::{
    ChannelInfo, ChannelRegistry, ObjectBroker, ObjectTree, PropertyMap, TransportError,
    TransportResult, Value,
};

use crate::paths::{
    INTF_DELETE, INTF_ETHERNET, INTF_IP, INTF_MAC, INTF_NEIGHBOR, INTF_SYSTEMCONFIG, INTF_VLAN,
    PATH_ROOT, PATH_SYSTEMCONFIG,
};

const SERVICE: &str = "xyz.openbmc_project.Network";
const DHCP_NONE: &str = "xyz.openbmc_project.Network.EthernetInterface.DHCPConf.none";
const ORIGIN_PREFIX: &str = "xyz.openbmc_project.Network.IP.AddressOrigin.";
const STATE_PERMANENT: &str = "xyz.openbmc_project.Network.Neighbor.State.Permanent";
const PROTO_V4: &str = "xyz.openbmc_project.Network.IP.Protocol.IPv4";
const PROTO_V6: &str = "xyz.openbmc_project.Network.IP.Protocol.IPv6";

#[derive(Debug, Clone)]
struct MockObject {
    interfaces: Vec<&'static str>,
    props: PropertyMap,
}

#[derive(Default)]
struct State {
    objects: BTreeMap<String, MockObject>,
    seq: u32,
    get_all_calls: usize,
}

/// An in-memory model of the network service's object tree.
pub struct MockBroker {
    state: Mutex<State>,
}

/// A registry with channel 1 bound to `eth1`.
pub fn registry_with_eth1() -> ChannelRegistry {
    ChannelRegistry::new().with_channel(1, ChannelInfo::lan("eth1"))
}

impl MockBroker {
    pub fn new() -> Self {
        let broker = Self {
            state: Mutex::new(State::default()),
        };
        broker.insert(
            PATH_SYSTEMCONFIG.to_string(),
            vec![INTF_SYSTEMCONFIG],
            [
                ("DefaultGateway".to_string(), Value::from("")),
                ("DefaultGateway6".to_string(), Value::from("")),
            ]
            .into_iter()
            .collect(),
        );
        broker
    }

    pub fn with_eth1() -> Self {
        let broker = Self::new();
        broker.add_eth("eth1");
        broker
    }

    fn insert(&self, path: String, interfaces: Vec<&'static str>, props: PropertyMap) {
        self.state
            .lock()
            .unwrap()
            .objects
            .insert(path, MockObject { interfaces, props });
    }

    pub fn add_eth(&self, name: &str) {
        self.insert(
            format!("{PATH_ROOT}/{name}"),
            vec![INTF_ETHERNET, INTF_MAC],
            [
                ("DHCPEnabled".to_string(), Value::from(DHCP_NONE)),
                ("MACAddress".to_string(), Value::from("00:00:5e:00:01:01")),
            ]
            .into_iter()
            .collect(),
        );
    }

    pub fn add_vlan_object(&self, ifname: &str, id: u32) -> String {
        let path = format!("{PATH_ROOT}/{ifname}_{id}");
        self.insert(
            path.clone(),
            vec![INTF_VLAN, INTF_ETHERNET, INTF_DELETE],
            [
                ("Id".to_string(), Value::U32(id)),
                ("DHCPEnabled".to_string(), Value::from(DHCP_NONE)),
            ]
            .into_iter()
            .collect(),
        );
        path
    }

    pub fn add_ip_object(&self, ifname: &str, address: &str, prefix: u8, origin: &str, v4: bool) {
        let seq = {
            let mut state = self.state.lock().unwrap();
            state.seq += 1;
            state.seq
        };
        let family = if v4 { "ipv4" } else { "ipv6" };
        let protocol = if v4 { PROTO_V4 } else { PROTO_V6 };
        self.insert(
            format!("{PATH_ROOT}/{ifname}/{family}/{seq}"),
            vec![INTF_IP, INTF_DELETE],
            [
                ("Type".to_string(), Value::from(protocol)),
                ("Address".to_string(), Value::from(address)),
                ("PrefixLength".to_string(), Value::U8(prefix)),
                (
                    "Origin".to_string(),
                    Value::from(format!("{ORIGIN_PREFIX}{origin}")),
                ),
            ]
            .into_iter()
            .collect(),
        );
    }

    pub fn get_all_calls(&self) -> usize {
        self.state.lock().unwrap().get_all_calls
    }

    pub fn neighbor_count(&self) -> usize {
        self.state
            .lock()
            .unwrap()
            .objects
            .values()
            .filter(|obj| obj.interfaces.contains(&INTF_NEIGHBOR))
            .count()
    }
}

#[async_trait]
impl ObjectBroker for MockBroker {
    async fn get_subtree(&self, _root: &str, interfaces: &[&str]) -> TransportResult<ObjectTree> {
        let state = self.state.lock().unwrap();
        Ok(state
            .objects
            .iter()
            .filter(|(_, obj)| obj.interfaces.iter().any(|i| interfaces.contains(i)))
            .map(|(path, obj)| {
                let impls = obj.interfaces.iter().map(|i| i.to_string()).collect();
                (path.clone(), vec![(SERVICE.to_string(), impls)])
            })
            .collect())
    }

    async fn get_service(&self, _interface: &str, path: &str) -> TransportResult<String> {
        let state = self.state.lock().unwrap();
        if state.objects.contains_key(path) {
            Ok(SERVICE.to_string())
        } else {
            Err(TransportError::unknown_object(path))
        }
    }

    async fn get_property(
        &self,
        _service: &str,
        path: &str,
        _interface: &str,
        property: &str,
    ) -> TransportResult<Value> {
        let state = self.state.lock().unwrap();
        let obj = state
            .objects
            .get(path)
            .ok_or_else(|| TransportError::unknown_object(path))?;
        obj.props
            .get(property)
            .cloned()
            .ok_or_else(|| TransportError::backend("Get", format!("no property {property}")))
    }

    async fn set_property(
        &self,
        _service: &str,
        path: &str,
        _interface: &str,
        property: &str,
        value: Value,
    ) -> TransportResult<()> {
        let mut state = self.state.lock().unwrap();
        let obj = state
            .objects
            .get_mut(path)
            .ok_or_else(|| TransportError::unknown_object(path))?;
        obj.props.insert(property.to_string(), value);
        Ok(())
    }

    async fn get_all_properties(
        &self,
        _service: &str,
        path: &str,
        _interface: &str,
    ) -> TransportResult<PropertyMap> {
        let mut state = self.state.lock().unwrap();
        state.get_all_calls += 1;
        state
            .objects
            .get(path)
            .map(|obj| obj.props.clone())
            .ok_or_else(|| TransportError::unknown_object(path))
    }

    async fn create_ip(
        &self,
        _service: &str,
        path: &str,
        protocol: &str,
        address: &str,
        prefix: u8,
        _gateway: &str,
    ) -> TransportResult<()> {
        let v4 = protocol == PROTO_V4;
        let seq = {
            let mut state = self.state.lock().unwrap();
            state.seq += 1;
            state.seq
        };
        let family = if v4 { "ipv4" } else { "ipv6" };
        self.insert(
            format!("{path}/{family}/{seq}"),
            vec![INTF_IP, INTF_DELETE],
            [
                ("Type".to_string(), Value::from(protocol)),
                ("Address".to_string(), Value::from(address)),
                ("PrefixLength".to_string(), Value::U8(prefix)),
                (
                    "Origin".to_string(),
                    Value::from(format!("{ORIGIN_PREFIX}Static")),
                ),
            ]
            .into_iter()
            .collect(),
        );
        Ok(())
    }

    async fn create_vlan(&self, _service: &str, ifname: &str, id: u32) -> TransportResult<String> {
        Ok(self.add_vlan_object(ifname, id))
    }

    async fn create_neighbor(
        &self,
        _service: &str,
        path: &str,
        ip: &str,
        mac: &str,
    ) -> TransportResult<()> {
        let seq = {
            let mut state = self.state.lock().unwrap();
            state.seq += 1;
            state.seq
        };
        self.insert(
            format!("{path}/static_neighbor/{seq}"),
            vec![INTF_NEIGHBOR, INTF_DELETE],
            [
                ("IPAddress".to_string(), Value::from(ip)),
                ("MACAddress".to_string(), Value::from(mac)),
                ("State".to_string(), Value::from(STATE_PERMANENT)),
            ]
            .into_iter()
            .collect(),
        );
        Ok(())
    }

    async fn delete_object(&self, _service: &str, path: &str) -> TransportResult<()> {
        let mut state = self.state.lock().unwrap();
        state
            .objects
            .remove(path)
            .map(|_| ())
            .ok_or_else(|| TransportError::unknown_object(path))
    }
}
