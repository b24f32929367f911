//! Common infrastructure for the IPMI transport configuration daemons.
//!
//! This crate provides shared functionality for the transport netfn
//! daemons (lancfgd, solcfgd):
//!
//! - [`payload`]: LSB-first bit-exact packing/unpacking of parameter data
//! - [`cc`]: IPMI completion codes and command responses
//! - [`broker`]: Typed access to the network-management object service
//! - [`channels`]: Channel id to interface mapping
//! - [`net`]: MAC and netmask/prefix primitives
//! - [`error`]: Error types for backend operations
//!
//! # Architecture
//!
//! Transport configuration daemons follow this pattern:
//!
//! 1. Decode the parameter selector and binary payload of a request
//! 2. Resolve the channel to a concrete interface topology
//! 3. Reconcile the request against live state owned by the
//!    network-management service through the [`broker::ObjectBroker`] trait
//! 4. Encode a byte-exact response with an IPMI completion code

pub mod broker;
pub mod cc;
pub mod channels;
pub mod error;
pub mod net;
pub mod payload;
pub mod value;

// Re-export commonly used items at crate root
pub use broker::{delete_object_if_exists, ObjectBroker};
pub use cc::{CompletionCode, Response};
pub use channels::{ChannelInfo, ChannelMedium, ChannelRegistry, SessionSupport};
pub use error::{TransportError, TransportResult};
pub use net::MacAddr;
pub use payload::Payload;
pub use value::{ObjectTree, PropertyMap, Value};
