//! OEM extension hook for parameters 192-255.

use async_trait::async_trait;
use ipmi_transport_common::{CompletionCode, Payload, Response};

/// Vendor hook for the OEM parameter range, injected into the engine at
/// composition time.
#[async_trait]
pub trait OemHandler: Send + Sync {
    async fn set_lan(&self, channel: u8, parameter: u8, req: &mut Payload) -> Response;

    async fn get_lan(&self, channel: u8, parameter: u8, set: u8, block: u8) -> Response;
}

/// Stock behavior: no OEM parameters exist.
pub struct NoOemSupport;

#[async_trait]
impl OemHandler for NoOemSupport {
    async fn set_lan(&self, _channel: u8, _parameter: u8, req: &mut Payload) -> Response {
        req.trailing_ok = true;
        Response::code(CompletionCode::ParamNotSupported)
    }

    async fn get_lan(&self, _channel: u8, _parameter: u8, _set: u8, _block: u8) -> Response {
        Response::code(CompletionCode::ParamNotSupported)
    }
}
