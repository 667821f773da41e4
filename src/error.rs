//! Error types for the FINS protocol.

use std::io;
use thiserror::Error;

/// Result type alias for FINS operations.
pub type Result<T> = std::result::Result<T, FinsError>;

/// Errors that can occur during FINS communication.
#[derive(Debug, Error)]
pub enum FinsError {
    /// The connection to the PLC is not open.
    #[error("PLC is not connected")]
    NotConnected,

    /// I/O error during communication.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Communication timeout.
    #[error("Communication timeout")]
    Timeout,

    /// Malformed frame received from the PLC (bad magic, short header, etc.).
    #[error("Invalid frame: {reason}")]
    Frame {
        /// Description of the framing error.
        reason: String,
    },

    /// Error code reported by the PLC, resolved via the response code table.
    #[error("PLC error 0x{code:02X}: {message}")]
    Plc {
        /// End code byte from the PLC response.
        code: u8,
        /// Message associated with the code.
        message: &'static str,
    },

    /// Service ID mismatch between request and response.
    #[error("SID mismatch: expected 0x{expected:02X}, received 0x{received:02X}")]
    SidMismatch {
        /// SID sent with the request.
        expected: u8,
        /// SID echoed in the response.
        received: u8,
    },

    /// The PLC returned more payload bytes than the requested type occupies.
    #[error("Received too much data: expected {expected} bytes, got {actual}")]
    TooMuchData {
        /// Byte count implied by the requested type.
        expected: usize,
        /// Byte count actually received.
        actual: usize,
    },

    /// The PLC returned fewer payload bytes than the requested type occupies.
    #[error("Not enough data received: expected {expected} bytes, got {actual}")]
    NotEnoughData {
        /// Byte count implied by the requested type.
        expected: usize,
        /// Byte count actually received.
        actual: usize,
    },

    /// Invalid parameter provided by the caller.
    #[error("Invalid parameter '{parameter}': {reason}")]
    InvalidParameter {
        /// Name of the invalid parameter.
        parameter: String,
        /// Description of why the parameter is invalid.
        reason: String,
    },
}

impl FinsError {
    /// Creates a new `Frame` error.
    pub fn frame(reason: impl Into<String>) -> Self {
        Self::Frame {
            reason: reason.into(),
        }
    }

    /// Creates a new `InvalidParameter` error.
    pub fn invalid_parameter(parameter: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            parameter: parameter.into(),
            reason: reason.into(),
        }
    }
}
