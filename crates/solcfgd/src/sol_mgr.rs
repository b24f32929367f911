//! Get/Set SOL Configuration Parameters engine.
//!
//! SOL settings are plain properties on the serial-over-LAN backend
//! object for the channel's interface; no multi-step reconciliation is
//! needed. The bit rate parameters read through to the console service's
//! configured baud rate.

use std::sync::Arc;

use ipmi_transport_common::{
    ChannelMedium, ChannelRegistry, CompletionCode, ObjectBroker, Response, SessionSupport,
    TransportResult, Value,
};
use tracing::{error, instrument};

/// Parameter revision returned in every Get response.
pub const SOL_PARAM_REVISION: u8 = 0x11;

/// Fixed RMCP+ payload port.
pub const IPMI_STD_PORT: u16 = 623;

pub const SOL_INTERFACE: &str = "xyz.openbmc_project.Ipmi.SOL";
pub const SOL_PATH_PREFIX: &str = "/xyz/openbmc_project/ipmi/sol/";

pub const CONSOLE_SERVICE: &str = "xyz.openbmc_project.console";
pub const CONSOLE_PATH: &str = "/xyz/openbmc_project/console";
pub const CONSOLE_INTERFACE: &str = "xyz.openbmc_project.console";

const PROGRESS_MASK: u8 = 0x03;
const ENABLE_MASK: u8 = 0x01;
const RETRY_MASK: u8 = 0x07;
const PRIVILEGE_MASK: u8 = 0x0F;

/// SOL configuration parameter selectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum SolParam {
    Progress = 0,
    Enable = 1,
    Authentication = 2,
    Accumulate = 3,
    Retry = 4,
    NvBitRate = 5,
    VBitRate = 6,
    Channel = 7,
    Port = 8,
}

impl TryFrom<u8> for SolParam {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, u8> {
        use SolParam::*;
        Ok(match value {
            0 => Progress,
            1 => Enable,
            2 => Authentication,
            3 => Accumulate,
            4 => Retry,
            5 => NvBitRate,
            6 => VBitRate,
            7 => Channel,
            8 => Port,
            other => return Err(other),
        })
    }
}

/// SOL session privilege levels (parameter 2 low nibble).
mod privilege {
    pub const USER: u8 = 2;
    pub const OEM: u8 = 5;
}

/// Maps a console baud rate to its wire encoding; unknown rates read 0.
fn baud_to_bit_rate(baud: u32) -> u8 {
    match baud {
        9600 => 0x06,
        19200 => 0x07,
        38400 => 0x08,
        57600 => 0x09,
        115200 => 0x0a,
        _ => 0,
    }
}

/// The SOL configuration parameter engine.
pub struct SolMgr {
    broker: Arc<dyn ObjectBroker>,
    registry: ChannelRegistry,
}

impl SolMgr {
    pub fn new(broker: Arc<dyn ObjectBroker>, registry: ChannelRegistry) -> Self {
        Self { broker, registry }
    }

    fn sol_path(&self, channel: u8) -> String {
        let ifname = self.registry.name(channel).unwrap_or_default();
        format!("{SOL_PATH_PREFIX}{ifname}")
    }

    async fn get_sol_property(&self, channel: u8, property: &str) -> TransportResult<Value> {
        let path = self.sol_path(channel);
        let service = self.broker.get_service(SOL_INTERFACE, &path).await?;
        self.broker
            .get_property(&service, &path, SOL_INTERFACE, property)
            .await
    }

    async fn set_sol_property(
        &self,
        channel: u8,
        property: &str,
        value: Value,
    ) -> TransportResult<()> {
        let path = self.sol_path(channel);
        let service = self.broker.get_service(SOL_INTERFACE, &path).await?;
        self.broker
            .set_property(&service, &path, SOL_INTERFACE, property, value)
            .await
    }

    async fn get_baud_rate(&self) -> TransportResult<u32> {
        self.broker
            .get_property(CONSOLE_SERVICE, CONSOLE_PATH, CONSOLE_INTERFACE, "baudrate")
            .await?
            .as_u32()
    }

    /// Set SOL Configuration Parameters.
    #[instrument(skip(self))]
    pub async fn set_sol(
        &self,
        ctx_channel: u8,
        channel_bits: u8,
        reserved: u8,
        param_selector: u8,
        data1: u8,
        data2: Option<u8>,
    ) -> Response {
        let channel = self.registry.resolve_current(channel_bits, ctx_channel);
        if reserved != 0
            || !self.registry.is_valid(channel)
            || self.registry.medium(channel) != ChannelMedium::Lan8032
        {
            return Response::code(CompletionCode::InvalidFieldRequest);
        }
        match self.set_sol_inner(channel, param_selector, data1, data2).await {
            Ok(rsp) => rsp,
            Err(err) => {
                error!(channel, param_selector, %err, "set sol failed");
                Response::code(CompletionCode::UnspecifiedError)
            }
        }
    }

    async fn set_sol_inner(
        &self,
        channel: u8,
        param_selector: u8,
        data1: u8,
        data2: Option<u8>,
    ) -> TransportResult<Response> {
        let param = match SolParam::try_from(param_selector) {
            Ok(param) => param,
            Err(_) => return Ok(Response::code(CompletionCode::ParamNotSupported)),
        };
        match param {
            SolParam::Progress => {
                if data2.is_some() {
                    return Ok(Response::code(CompletionCode::ReqDataLenInvalid));
                }
                let progress = data1 & PROGRESS_MASK;
                let current = self.get_sol_property(channel, "Progress").await?.as_u8()?;
                if current == 1 && progress == 1 {
                    return Ok(Response::code(CompletionCode::SetInProgressActive));
                }
                self.set_sol_property(channel, "Progress", Value::U8(progress))
                    .await?;
            }
            SolParam::Enable => {
                if data2.is_some() {
                    return Ok(Response::code(CompletionCode::ReqDataLenInvalid));
                }
                let enable = data1 & ENABLE_MASK != 0;
                self.set_sol_property(channel, "Enable", Value::Bool(enable))
                    .await?;
            }
            SolParam::Authentication => {
                if data2.is_some() {
                    return Ok(Response::code(CompletionCode::ReqDataLenInvalid));
                }
                // Only the privilege nibble is enforced
                let level = data1 & PRIVILEGE_MASK;
                if !(privilege::USER..=privilege::OEM).contains(&level) {
                    return Ok(Response::code(CompletionCode::InvalidFieldRequest));
                }
                self.set_sol_property(channel, "Privilege", Value::U8(level))
                    .await?;
            }
            SolParam::Accumulate => {
                let threshold = match data2 {
                    Some(threshold) => threshold,
                    None => return Ok(Response::code(CompletionCode::ReqDataLenInvalid)),
                };
                if threshold == 0 {
                    return Ok(Response::code(CompletionCode::InvalidFieldRequest));
                }
                self.set_sol_property(channel, "AccumulateIntervalMS", Value::U8(data1))
                    .await?;
                self.set_sol_property(channel, "Threshold", Value::U8(threshold))
                    .await?;
            }
            SolParam::Retry => {
                let interval = match data2 {
                    Some(interval) => interval,
                    None => return Ok(Response::code(CompletionCode::ReqDataLenInvalid)),
                };
                self.set_sol_property(channel, "RetryCount", Value::U8(data1 & RETRY_MASK))
                    .await?;
                self.set_sol_property(channel, "RetryIntervalMS", Value::U8(interval))
                    .await?;
            }
            SolParam::Port => {
                return Ok(Response::code(CompletionCode::ParamReadOnly));
            }
            SolParam::NvBitRate | SolParam::VBitRate | SolParam::Channel => {
                return Ok(Response::code(CompletionCode::ParamNotSupported));
            }
        }
        Ok(Response::success(Vec::new()))
    }

    /// Get SOL Configuration Parameters.
    #[instrument(skip(self))]
    pub async fn get_sol(
        &self,
        ctx_channel: u8,
        channel_bits: u8,
        reserved: u8,
        rev_only: bool,
        param_selector: u8,
        _set: u8,
        _block: u8,
    ) -> Response {
        let channel = self.registry.resolve_current(channel_bits, ctx_channel);
        if reserved != 0
            || !self.registry.is_valid(channel)
            || self.registry.session_support(channel) == SessionSupport::None
            || self.registry.medium(channel) != ChannelMedium::Lan8032
        {
            return Response::code(CompletionCode::InvalidFieldRequest);
        }
        if rev_only {
            return Response::success(vec![SOL_PARAM_REVISION]);
        }
        match self.get_sol_inner(channel, param_selector).await {
            Ok(rsp) => rsp,
            Err(err) => {
                error!(channel, param_selector, %err, "get sol failed");
                Response::code(CompletionCode::UnspecifiedError)
            }
        }
    }

    async fn get_sol_inner(&self, channel: u8, param_selector: u8) -> TransportResult<Response> {
        let param = match SolParam::try_from(param_selector) {
            Ok(param) => param,
            Err(_) => return Ok(Response::code(CompletionCode::ParamNotSupported)),
        };
        let mut data = vec![SOL_PARAM_REVISION];
        match param {
            SolParam::Progress => {
                data.push(self.get_sol_property(channel, "Progress").await?.as_u8()?);
            }
            SolParam::Enable => {
                let enable = self.get_sol_property(channel, "Enable").await?.as_bool()?;
                data.push(u8::from(enable));
            }
            SolParam::Authentication => {
                let level = self.get_sol_property(channel, "Privilege").await?.as_u8()?;
                let mut authentication = level & PRIVILEGE_MASK;
                let force_auth = self
                    .get_sol_property(channel, "ForceAuthentication")
                    .await?
                    .as_bool()?;
                authentication |= u8::from(force_auth) << 6;
                let force_encrypt = self
                    .get_sol_property(channel, "ForceEncryption")
                    .await?
                    .as_bool()?;
                authentication |= u8::from(force_encrypt) << 7;
                data.push(authentication);
            }
            SolParam::Accumulate => {
                data.push(
                    self.get_sol_property(channel, "AccumulateIntervalMS")
                        .await?
                        .as_u8()?,
                );
                data.push(self.get_sol_property(channel, "Threshold").await?.as_u8()?);
            }
            SolParam::Retry => {
                let count = self.get_sol_property(channel, "RetryCount").await?.as_u8()?;
                data.push(count & RETRY_MASK);
                data.push(
                    self.get_sol_property(channel, "RetryIntervalMS")
                        .await?
                        .as_u8()?,
                );
            }
            SolParam::Channel => {
                data.push(channel);
            }
            SolParam::Port => {
                data.extend_from_slice(&IPMI_STD_PORT.to_le_bytes());
            }
            SolParam::NvBitRate | SolParam::VBitRate => {
                data.push(baud_to_bit_rate(self.get_baud_rate().await?));
            }
        }
        Ok(Response::success(data))
    }
}
