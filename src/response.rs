//! FINS response parsing.
//!
//! Every FINS response starts with the echoed 12-byte header followed by a
//! two-byte end code (main, sub). Anything after the end code is the
//! command payload.

use crate::codes;
use crate::error::{FinsError, Result};
use crate::header::{FinsHeader, FINS_HEADER_SIZE};

/// Minimum size of a FINS response: header plus end code.
pub const FINS_RESPONSE_MIN_SIZE: usize = FINS_HEADER_SIZE + 2;

/// The two-byte completion status returned with every response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndCode {
    /// Main response code (MRES).
    pub main: u8,
    /// Sub response code (SRES).
    pub sub: u8,
}

impl EndCode {
    /// Returns `true` when neither byte reports an error condition.
    ///
    /// Non-zero codes that are informational, such as `0x40` (PLC in Run
    /// mode), do not make a response unsuccessful.
    pub fn is_ok(self) -> bool {
        !codes::is_error(self.main) && !codes::is_error(self.sub)
    }

    /// Returns `true` only when both bytes are zero, i.e. the PLC reported
    /// a plain normal completion with nothing informational attached.
    pub fn is_normal_completion(self) -> bool {
        self.main == 0x00 && self.sub == 0x00
    }

    /// Describes the end code, checking the main byte first.
    ///
    /// A byte only contributes its description when non-zero, so a response
    /// of `(0x00, 0x40)` reports the sub code's message.
    pub fn message(self) -> &'static str {
        if self.main != 0x00 {
            codes::message(self.main)
        } else if self.sub != 0x00 {
            codes::message(self.sub)
        } else {
            codes::message(0x00)
        }
    }
}

impl std::fmt::Display for EndCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02X}:{:02X} ({})", self.main, self.sub, self.message())
    }
}

/// A parsed FINS response.
#[derive(Debug, Clone)]
pub struct FinsResponse {
    /// Echoed command header.
    pub header: FinsHeader,
    /// Completion status.
    pub end_code: EndCode,
    /// Payload bytes following the end code.
    pub data: Vec<u8>,
}

impl FinsResponse {
    /// Parses a response from the raw bytes following any transport framing.
    ///
    /// # Errors
    ///
    /// Returns [`FinsError::Frame`] if fewer than 14 bytes are present.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < FINS_RESPONSE_MIN_SIZE {
            return Err(FinsError::frame(format!(
                "response too short: expected at least {} bytes, got {}",
                FINS_RESPONSE_MIN_SIZE,
                bytes.len()
            )));
        }

        let header = FinsHeader::from_bytes(&bytes[..FINS_HEADER_SIZE])?;
        let end_code = EndCode {
            main: bytes[FINS_HEADER_SIZE],
            sub: bytes[FINS_HEADER_SIZE + 1],
        };

        Ok(Self {
            header,
            end_code,
            data: bytes[FINS_RESPONSE_MIN_SIZE..].to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response_bytes(main: u8, sub: u8, data: &[u8]) -> Vec<u8> {
        let mut bytes = vec![
            0xC0, 0x00, 0x02, 0x00, 0x01, 0x00, 0x00, 0x0A, 0x00, 0x07, 0x01, 0x01,
        ];
        bytes.push(main);
        bytes.push(sub);
        bytes.extend_from_slice(data);
        bytes
    }

    #[test]
    fn test_parse_read_response() {
        let response = FinsResponse::from_bytes(&response_bytes(0x00, 0x00, &[0x00, 0x2A])).unwrap();

        assert_eq!(response.header.sid, 0x07);
        assert!(response.end_code.is_ok());
        assert!(response.end_code.is_normal_completion());
        assert_eq!(response.data, vec![0x00, 0x2A]);
    }

    #[test]
    fn test_parse_empty_payload() {
        let response = FinsResponse::from_bytes(&response_bytes(0x00, 0x00, &[])).unwrap();
        assert!(response.data.is_empty());
    }

    #[test]
    fn test_too_short_is_frame_error() {
        let result = FinsResponse::from_bytes(&[0xC0, 0x00, 0x02]);
        assert!(matches!(result, Err(FinsError::Frame { .. })));
    }

    #[test]
    fn test_end_code_error() {
        let end_code = EndCode {
            main: 0x26,
            sub: 0x00,
        };
        assert!(!end_code.is_ok());
        assert_eq!(end_code.message(), "Command is too long");
    }

    #[test]
    fn test_end_code_run_mode_is_not_an_error() {
        let end_code = EndCode {
            main: 0x40,
            sub: 0x00,
        };
        assert!(end_code.is_ok());
        assert!(!end_code.is_normal_completion());
        assert_eq!(end_code.message(), "PLC is in Run mode");
    }

    #[test]
    fn test_end_code_sub_byte_checked_when_main_is_zero() {
        let end_code = EndCode {
            main: 0x00,
            sub: 0x40,
        };
        assert!(end_code.is_ok());
        assert_eq!(end_code.message(), "PLC is in Run mode");
    }

    #[test]
    fn test_unknown_code_fails_closed() {
        let end_code = EndCode {
            main: 0xFF,
            sub: 0x00,
        };
        assert!(!end_code.is_ok());
        assert_eq!(end_code.message(), "Code not found");
    }

    #[test]
    fn test_display() {
        let end_code = EndCode {
            main: 0x26,
            sub: 0x00,
        };
        assert_eq!(end_code.to_string(), "26:00 (Command is too long)");
    }
}
