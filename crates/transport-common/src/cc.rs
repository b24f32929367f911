//! IPMI completion codes and command responses.

/// Completion codes returned by the transport parameter commands.
///
/// The 0x80..0x82 range is command-specific per the IPMI spec: for the
/// configuration parameter commands they mean parameter-not-supported,
/// set-in-progress conflict, and read-only parameter respectively.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum CompletionCode {
    /// Command completed normally.
    Success = 0x00,
    /// Parameter not supported.
    ParamNotSupported = 0x80,
    /// Attempt to set the "set in progress" latch while it is active.
    SetInProgressActive = 0x81,
    /// Attempt to write a read-only parameter.
    ParamReadOnly = 0x82,
    /// Request data length invalid.
    ReqDataLenInvalid = 0xC7,
    /// Parameter (set selector) out of range.
    ParamOutOfRange = 0xC9,
    /// Invalid data field in request.
    InvalidFieldRequest = 0xCC,
    /// Command not supported in present state.
    CommandNotAvailable = 0xD5,
    /// Unspecified error (backend failure).
    UnspecifiedError = 0xFF,
}

/// A completed command: completion code plus response parameter data.
///
/// The data bytes are empty for every non-success response; a failed
/// parameter command never carries partial output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub cc: CompletionCode,
    pub data: Vec<u8>,
}

impl Response {
    /// A successful response carrying parameter data.
    pub fn success(data: Vec<u8>) -> Self {
        Self {
            cc: CompletionCode::Success,
            data,
        }
    }

    /// A failure response with no data.
    pub fn code(cc: CompletionCode) -> Self {
        Self { cc, data: Vec::new() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_values() {
        assert_eq!(CompletionCode::Success as u8, 0x00);
        assert_eq!(CompletionCode::ParamNotSupported as u8, 0x80);
        assert_eq!(CompletionCode::SetInProgressActive as u8, 0x81);
        assert_eq!(CompletionCode::ParamReadOnly as u8, 0x82);
        assert_eq!(CompletionCode::ReqDataLenInvalid as u8, 0xC7);
        assert_eq!(CompletionCode::ParamOutOfRange as u8, 0xC9);
        assert_eq!(CompletionCode::InvalidFieldRequest as u8, 0xCC);
        assert_eq!(CompletionCode::CommandNotAvailable as u8, 0xD5);
        assert_eq!(CompletionCode::UnspecifiedError as u8, 0xFF);
    }

    #[test]
    fn test_failure_carries_no_data() {
        let rsp = Response::code(CompletionCode::InvalidFieldRequest);
        assert!(rsp.data.is_empty());
    }
}
