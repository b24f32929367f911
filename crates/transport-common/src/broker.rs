//! Access to the network-management object service.
//!
//! The daemons never own network state; they read and direct it through
//! this trait. A production implementation speaks D-Bus to the network
//! daemon and the object mapper; tests substitute an in-memory model.

use async_trait::async_trait;

use crate::error::TransportResult;
use crate::value::{ObjectTree, PropertyMap, Value};

/// Typed object and property access on the platform object bus.
#[async_trait]
pub trait ObjectBroker: Send + Sync {
    /// Enumerates objects under `root` implementing any of `interfaces`.
    async fn get_subtree(&self, root: &str, interfaces: &[&str]) -> TransportResult<ObjectTree>;

    /// Resolves the service owning `interface` on `path`.
    async fn get_service(&self, interface: &str, path: &str) -> TransportResult<String>;

    /// Reads one property.
    async fn get_property(
        &self,
        service: &str,
        path: &str,
        interface: &str,
        property: &str,
    ) -> TransportResult<Value>;

    /// Writes one property.
    async fn set_property(
        &self,
        service: &str,
        path: &str,
        interface: &str,
        property: &str,
        value: Value,
    ) -> TransportResult<()>;

    /// Reads every property of `interface` on `path`.
    async fn get_all_properties(
        &self,
        service: &str,
        path: &str,
        interface: &str,
    ) -> TransportResult<PropertyMap>;

    /// Creates an IP address object on the interface at `path`.
    async fn create_ip(
        &self,
        service: &str,
        path: &str,
        protocol: &str,
        address: &str,
        prefix: u8,
        gateway: &str,
    ) -> TransportResult<()>;

    /// Creates a VLAN device on `ifname`, returning the new object path.
    async fn create_vlan(&self, service: &str, ifname: &str, id: u32) -> TransportResult<String>;

    /// Creates a static neighbor entry on the interface at `path`.
    async fn create_neighbor(
        &self,
        service: &str,
        path: &str,
        ip: &str,
        mac: &str,
    ) -> TransportResult<()>;

    /// Deletes the object at `path`. Errors if it does not exist.
    async fn delete_object(&self, service: &str, path: &str) -> TransportResult<()>;
}

/// Deletes an object, tolerating "already gone" and generic backend
/// failure. Deletion is idempotent from the caller's perspective; any
/// other error is re-raised.
pub async fn delete_object_if_exists(
    broker: &dyn ObjectBroker,
    service: &str,
    path: &str,
) -> TransportResult<()> {
    if path.is_empty() {
        return Ok(());
    }
    match broker.delete_object(service, path).await {
        Ok(()) => Ok(()),
        Err(err) if err.is_ignorable_on_delete() => Ok(()),
        Err(err) => Err(err),
    }
}
