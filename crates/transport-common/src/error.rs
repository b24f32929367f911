//! Error types for transport configuration operations.
//!
//! All errors implement `std::error::Error` via `thiserror`. Two classes
//! exist: backend failures from the network-management service, and
//! internal invariant violations. Protocol-level failures never appear
//! here; they are expressed directly as completion codes.

use thiserror::Error;

/// Result type alias for transport configuration operations.
pub type TransportResult<T> = Result<T, TransportError>;

/// Errors that can occur while reconciling against the backend services.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Generic failure reported by the backend service.
    #[error("Backend call failed: {operation}: {message}")]
    Backend {
        /// The call that failed (e.g., "GetSubTree", "Delete").
        operation: String,
        /// Error message from the service.
        message: String,
    },

    /// The referenced object does not exist on the backend.
    #[error("Unknown object: {path}")]
    UnknownObject {
        /// The object path.
        path: String,
    },

    /// The backend returned a value we cannot represent.
    #[error("Invalid value from backend: {message}")]
    InvalidBackendValue {
        /// What was wrong with the value.
        message: String,
    },

    /// A channel could not be resolved to a network interface.
    #[error("Channel {channel} has no usable interface")]
    ChannelNotFound {
        /// The channel id.
        channel: u8,
    },

    /// A configuration file could not be read or parsed.
    #[error("Config file {path}: {message}")]
    Config {
        /// Path of the offending file.
        path: String,
        /// Error message.
        message: String,
    },

    /// Internal error (violated invariant, unexpected state).
    #[error("Internal error: {message}")]
    Internal {
        /// Error message.
        message: String,
    },
}

impl TransportError {
    /// Creates a backend error.
    pub fn backend(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Backend {
            operation: operation.into(),
            message: message.into(),
        }
    }

    /// Creates an unknown-object error.
    pub fn unknown_object(path: impl Into<String>) -> Self {
        Self::UnknownObject { path: path.into() }
    }

    /// Creates an invalid-backend-value error.
    pub fn invalid_value(message: impl Into<String>) -> Self {
        Self::InvalidBackendValue {
            message: message.into(),
        }
    }

    /// Creates a config file error.
    pub fn config(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Config {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Returns true if this error may be swallowed by idempotent deletion.
    ///
    /// Object deletion tolerates "already gone" and generic backend
    /// failure; everything else is re-raised.
    pub fn is_ignorable_on_delete(&self) -> bool {
        matches!(
            self,
            TransportError::UnknownObject { .. } | TransportError::Backend { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TransportError::ChannelNotFound { channel: 3 };
        assert_eq!(err.to_string(), "Channel 3 has no usable interface");
    }

    #[test]
    fn test_backend_error() {
        let err = TransportError::backend("GetSubTree", "connection reset");
        assert_eq!(
            err.to_string(),
            "Backend call failed: GetSubTree: connection reset"
        );
    }

    #[test]
    fn test_is_ignorable_on_delete() {
        assert!(TransportError::unknown_object("/a/b").is_ignorable_on_delete());
        assert!(TransportError::backend("Delete", "busy").is_ignorable_on_delete());
        assert!(!TransportError::internal("bug").is_ignorable_on_delete());
        assert!(!TransportError::invalid_value("bad origin").is_ignorable_on_delete());
    }
}
