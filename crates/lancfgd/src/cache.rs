//! Batched object lookup for per-slot queries.

use std::collections::HashMap;

use ipmi_transport_common::{ObjectBroker, PropertyMap, TransportResult};

use crate::channel::ChannelParams;
use crate::paths::PATH_ROOT;

/// One subtree enumeration per (interface, capability) per request.
///
/// Slot lookups walk the object list repeatedly; without this cache every
/// IPv6 slot read would re-enumerate the service. Property maps are
/// fetched lazily per object and cached for the life of the request.
pub struct ObjectLookupCache<'a> {
    broker: &'a dyn ObjectBroker,
    service: String,
    interface: &'static str,
    paths: Vec<String>,
    props: HashMap<String, PropertyMap>,
}

impl<'a> ObjectLookupCache<'a> {
    /// Enumerates the objects under the channel's interface implementing
    /// `interface`.
    pub async fn new(
        broker: &'a dyn ObjectBroker,
        params: &ChannelParams,
        interface: &'static str,
    ) -> TransportResult<Self> {
        let objs = broker.get_subtree(PATH_ROOT, &[interface]).await?;
        let paths = objs
            .into_iter()
            .filter(|(path, _)| path.contains(&params.ifname))
            .map(|(path, _)| path)
            .collect();
        Ok(Self {
            broker,
            service: params.service.clone(),
            interface,
            paths,
            props: HashMap::new(),
        })
    }

    /// Object paths in enumeration order.
    pub fn paths(&self) -> Vec<String> {
        self.paths.clone()
    }

    /// Properties of one object, fetched at most once.
    pub async fn get_all(&mut self, path: &str) -> TransportResult<PropertyMap> {
        if let Some(props) = self.props.get(path) {
            return Ok(props.clone());
        }
        let props = self
            .broker
            .get_all_properties(&self.service, path, self.interface)
            .await?;
        self.props.insert(path.to_string(), props.clone());
        Ok(props)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paths::INTF_IP;
    use crate::testutil::{registry_with_eth1, MockBroker};

    #[tokio::test]
    async fn test_cache_scopes_to_interface_name() {
        let broker = MockBroker::with_eth1();
        broker.add_eth("eth2");
        broker.add_ip_object("eth1", "10.0.0.1", 24, "Static", true);
        broker.add_ip_object("eth2", "10.0.0.2", 24, "Static", true);

        let params = crate::channel::channel_params(&broker, &registry_with_eth1(), 1)
            .await
            .unwrap();
        let cache = ObjectLookupCache::new(&broker, &params, INTF_IP)
            .await
            .unwrap();
        let paths = cache.paths();
        assert_eq!(paths.len(), 1);
        assert!(paths[0].contains("eth1"));
    }

    #[tokio::test]
    async fn test_property_fetch_is_batched() {
        let broker = MockBroker::with_eth1();
        broker.add_ip_object("eth1", "10.0.0.1", 24, "Static", true);

        let params = crate::channel::channel_params(&broker, &registry_with_eth1(), 1)
            .await
            .unwrap();
        let mut cache = ObjectLookupCache::new(&broker, &params, INTF_IP)
            .await
            .unwrap();
        let path = cache.paths()[0].clone();
        cache.get_all(&path).await.unwrap();
        let before = broker.get_all_calls();
        cache.get_all(&path).await.unwrap();
        assert_eq!(broker.get_all_calls(), before);
    }
}
