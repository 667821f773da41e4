//! FINS frame construction and TCP wrapper handling.
//!
//! A FINS command frame is the 12-byte header followed by command-specific
//! parameters and an optional data payload. Over UDP the frame is sent
//! as-is; over TCP it is preceded by a 16-byte wrapper:
//!
//! | Bytes | Field |
//! |-------|-------|
//! | 0-3 | ASCII `FINS` magic |
//! | 4-7 | Big-endian length of everything after this field |
//! | 8-11 | Frame kind (0 = client handshake, 1 = PLC handshake, 2 = FINS command) |
//! | 12-15 | Error field (zero on send) |
//!
//! The TCP connection handshake uses the same wrapper but omits the FINS
//! header; its parameters carry the node negotiation payload.

use crate::error::{FinsError, Result};
use crate::header::{FinsHeader, FINS_HEADER_SIZE};

/// Magic bytes opening every TCP wrapper.
pub const TCP_MAGIC: [u8; 4] = *b"FINS";

/// TCP wrapper size in bytes (magic + length + kind + error field).
pub const TCP_WRAPPER_SIZE: usize = 16;

/// Length of the wrapper tail counted by the length field (kind + error field).
const TCP_TAIL_SIZE: usize = 8;

/// Frame kinds carried in the TCP wrapper.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TcpFrameKind {
    /// Client-to-PLC node negotiation request.
    ClientToPlc,
    /// PLC-to-client node negotiation reply.
    PlcToClient,
    /// Standard FINS command frame.
    Fins,
}

impl TcpFrameKind {
    /// Returns the wire value of this frame kind.
    pub fn code(self) -> u32 {
        match self {
            TcpFrameKind::ClientToPlc => 0,
            TcpFrameKind::PlcToClient => 1,
            TcpFrameKind::Fins => 2,
        }
    }
}

/// A FINS command frame: header plus command parameters and payload.
///
/// Constructed per command invocation, serialized once, then discarded.
#[derive(Debug, Clone)]
pub struct FinsFrame {
    /// Command header.
    pub header: FinsHeader,
    /// Command-specific addressing parameters.
    pub parameters: Vec<u8>,
    /// Payload bytes (write data; empty for reads).
    pub data: Vec<u8>,
}

impl FinsFrame {
    /// Creates a command frame.
    pub fn new(header: FinsHeader, parameters: Vec<u8>, data: Vec<u8>) -> Self {
        Self {
            header,
            parameters,
            data,
        }
    }

    /// Serializes the frame for UDP transmission (no wrapper).
    pub fn udp_bytes(&self) -> Vec<u8> {
        let mut bytes =
            Vec::with_capacity(FINS_HEADER_SIZE + self.parameters.len() + self.data.len());
        bytes.extend_from_slice(&self.header.to_bytes());
        bytes.extend_from_slice(&self.parameters);
        bytes.extend_from_slice(&self.data);
        bytes
    }

    /// Serializes the frame for TCP transmission, prefixed with the wrapper.
    ///
    /// The wrapper length field counts the wrapper tail (8 bytes), the FINS
    /// header, the parameters and the payload.
    pub fn tcp_bytes(&self) -> Vec<u8> {
        let length = TCP_TAIL_SIZE + FINS_HEADER_SIZE + self.parameters.len() + self.data.len();
        let mut bytes = Vec::with_capacity(TCP_WRAPPER_SIZE + length - TCP_TAIL_SIZE);
        bytes.extend_from_slice(&TCP_MAGIC);
        bytes.extend_from_slice(&(length as u32).to_be_bytes());
        bytes.extend_from_slice(&TcpFrameKind::Fins.code().to_be_bytes());
        bytes.extend_from_slice(&[0x00; 4]);
        bytes.extend_from_slice(&self.header.to_bytes());
        bytes.extend_from_slice(&self.parameters);
        bytes.extend_from_slice(&self.data);
        bytes
    }
}

/// Builds the client-to-PLC handshake frame for TCP node negotiation.
///
/// The frame carries the wrapper followed by a 4-byte zeroed parameter
/// block (node 0 requests automatic allocation); no FINS header is present.
pub fn handshake_request() -> Vec<u8> {
    let parameters = [0x00u8; 4];
    let length = TCP_TAIL_SIZE + parameters.len();
    let mut bytes = Vec::with_capacity(TCP_WRAPPER_SIZE + parameters.len());
    bytes.extend_from_slice(&TCP_MAGIC);
    bytes.extend_from_slice(&(length as u32).to_be_bytes());
    bytes.extend_from_slice(&TcpFrameKind::ClientToPlc.code().to_be_bytes());
    bytes.extend_from_slice(&[0x00; 4]);
    bytes.extend_from_slice(&parameters);
    bytes
}

/// Validates a received 16-byte TCP wrapper and returns the number of
/// frame bytes that follow it on the stream.
///
/// # Errors
///
/// Returns [`FinsError::Frame`] if the wrapper is short, the magic is not
/// `FINS`, or the length field does not cover the wrapper tail.
pub fn parse_tcp_wrapper(wrapper: &[u8]) -> Result<usize> {
    if wrapper.len() < TCP_WRAPPER_SIZE {
        return Err(FinsError::frame(format!(
            "TCP wrapper too short: expected {} bytes, got {}",
            TCP_WRAPPER_SIZE,
            wrapper.len()
        )));
    }
    if wrapper[0..4] != TCP_MAGIC {
        return Err(FinsError::frame(format!(
            "bad TCP magic: expected FINS, got {:02X?}",
            &wrapper[0..4]
        )));
    }

    let length = u32::from_be_bytes([wrapper[4], wrapper[5], wrapper[6], wrapper[7]]) as usize;
    if length < TCP_TAIL_SIZE {
        return Err(FinsError::frame(format!(
            "TCP length field too small: {length}"
        )));
    }

    // The length field counts from byte 8 onward; the wrapper read already
    // consumed 8 of those bytes.
    Ok(length - TCP_TAIL_SIZE)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(parameters: Vec<u8>, data: Vec<u8>) -> FinsFrame {
        FinsFrame::new(
            FinsHeader::command(0x0A, 0x01, 0x05, 0x01, 0x01),
            parameters,
            data,
        )
    }

    #[test]
    fn test_udp_bytes_start_with_header() {
        let bytes = frame(vec![0x82, 0x00, 0x64, 0x00, 0x00, 0x01], vec![]).udp_bytes();

        assert_eq!(bytes.len(), 18);
        assert_eq!(bytes[0], 0x80); // ICF, not a TCP wrapper
        assert_eq!(bytes[9], 0x05); // SID
        assert_eq!(bytes[12], 0x82); // first parameter byte
    }

    #[test]
    fn test_tcp_bytes_wrapper() {
        let parameters = vec![0x82, 0x00, 0x64, 0x00, 0x00, 0x01];
        let bytes = frame(parameters.clone(), vec![]).tcp_bytes();

        assert_eq!(&bytes[0..4], b"FINS");
        let length = u32::from_be_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]);
        assert_eq!(length as usize, 8 + 12 + parameters.len());
        assert_eq!(&bytes[8..12], &[0x00, 0x00, 0x00, 0x02]); // FINS command kind
        assert_eq!(&bytes[12..16], &[0x00; 4]); // error field
        assert_eq!(bytes[16], 0x80); // header starts after the wrapper
        assert_eq!(bytes.len(), TCP_WRAPPER_SIZE + 12 + parameters.len());
    }

    #[test]
    fn test_tcp_length_includes_payload() {
        let parameters = vec![0x82, 0x00, 0x32, 0x00, 0x00, 0x01];
        let data = vec![0x00, 0x01];
        let bytes = frame(parameters.clone(), data.clone()).tcp_bytes();

        let length = u32::from_be_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]);
        assert_eq!(length as usize, 8 + 12 + parameters.len() + data.len());
    }

    #[test]
    fn test_handshake_request_bytes() {
        let bytes = handshake_request();
        assert_eq!(
            bytes,
            hex::decode("46494e53 0000000c 00000000 00000000 00000000".replace(' ', "")).unwrap()
        );
    }

    #[test]
    fn test_parse_tcp_wrapper() {
        let mut wrapper = Vec::new();
        wrapper.extend_from_slice(b"FINS");
        wrapper.extend_from_slice(&22u32.to_be_bytes());
        wrapper.extend_from_slice(&2u32.to_be_bytes());
        wrapper.extend_from_slice(&[0x00; 4]);

        // 22 counted bytes minus the 8 already read with the wrapper
        assert_eq!(parse_tcp_wrapper(&wrapper).unwrap(), 14);
    }

    #[test]
    fn test_parse_tcp_wrapper_bad_magic() {
        let mut wrapper = vec![0x46, 0x49, 0x4E, 0x00]; // "FIN\0"
        wrapper.extend_from_slice(&[0x00; 12]);
        assert!(parse_tcp_wrapper(&wrapper).is_err());
    }

    #[test]
    fn test_parse_tcp_wrapper_short() {
        assert!(parse_tcp_wrapper(b"FINS").is_err());
    }

    #[test]
    fn test_frame_kind_codes() {
        assert_eq!(TcpFrameKind::ClientToPlc.code(), 0);
        assert_eq!(TcpFrameKind::PlcToClient.code(), 1);
        assert_eq!(TcpFrameKind::Fins.code(), 2);
    }
}
