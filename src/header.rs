//! FINS command header structure and serialization.
//!
//! Every FINS command and response starts with a fixed 12-byte header:
//!
//! | Byte | Field | Description |
//! |------|-------|-------------|
//! | 0 | ICF | Information Control Field (0x80 = command frame) |
//! | 1 | RSV | Reserved (always 0x00) |
//! | 2 | GCT | Gateway Count (hop budget, 0x02) |
//! | 3 | DNA | Destination Network Address (0 = local network) |
//! | 4 | DA1 | Destination Node Address |
//! | 5 | DA2 | Destination Unit Address |
//! | 6 | SNA | Source Network Address |
//! | 7 | SA1 | Source Node Address |
//! | 8 | SA2 | Source Unit Address |
//! | 9 | SID | Service ID (request/response correlation) |
//! | 10 | MC | Main command code |
//! | 11 | SC | Subcommand code |
//!
//! Responses echo the same 12 bytes followed by a 2-byte end code.

use crate::error::{FinsError, Result};

/// FINS header size in bytes.
pub const FINS_HEADER_SIZE: usize = 12;

/// FINS command/response header (12 bytes).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FinsHeader {
    /// Information Control Field (0x80 for a command requiring a response).
    pub icf: u8,
    /// Reserved byte (always 0x00).
    pub rsv: u8,
    /// Gateway Count (number of bridges allowed, 0x02).
    pub gct: u8,
    /// Destination Network Address (0 = local network).
    pub dna: u8,
    /// Destination Node Address (the PLC).
    pub da1: u8,
    /// Destination Unit Address (0 = CPU unit).
    pub da2: u8,
    /// Source Network Address (0 = local network).
    pub sna: u8,
    /// Source Node Address (this client).
    pub sa1: u8,
    /// Source Unit Address.
    pub sa2: u8,
    /// Service ID, echoed by the PLC in the response.
    pub sid: u8,
    /// Main command code.
    pub mc: u8,
    /// Subcommand code.
    pub sc: u8,
}

impl FinsHeader {
    /// Creates a command header addressed from the local node to the remote node.
    ///
    /// # Example
    ///
    /// ```
    /// use plc_omron::FinsHeader;
    ///
    /// let header = FinsHeader::command(10, 1, 0x05, 0x01, 0x01);
    /// assert_eq!(header.icf, 0x80);
    /// assert_eq!(header.da1, 10);
    /// assert_eq!(header.sa1, 1);
    /// ```
    pub fn command(remote_node: u8, local_node: u8, sid: u8, mc: u8, sc: u8) -> Self {
        Self {
            icf: 0x80,
            rsv: 0x00,
            gct: 0x02,
            dna: 0x00,
            da1: remote_node,
            da2: 0x00,
            sna: 0x00,
            sa1: local_node,
            sa2: 0x00,
            sid,
            mc,
            sc,
        }
    }

    /// Serializes the header in wire order.
    pub fn to_bytes(self) -> [u8; FINS_HEADER_SIZE] {
        [
            self.icf, self.rsv, self.gct, self.dna, self.da1, self.da2, self.sna, self.sa1,
            self.sa2, self.sid, self.mc, self.sc,
        ]
    }

    /// Parses a header from the first 12 bytes of a frame.
    ///
    /// # Errors
    ///
    /// Returns [`FinsError::Frame`] if the slice is shorter than 12 bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if data.len() < FINS_HEADER_SIZE {
            return Err(FinsError::frame(format!(
                "header too short: expected {} bytes, got {}",
                FINS_HEADER_SIZE,
                data.len()
            )));
        }

        Ok(Self {
            icf: data[0],
            rsv: data[1],
            gct: data[2],
            dna: data[3],
            da1: data[4],
            da2: data[5],
            sna: data[6],
            sa1: data[7],
            sa2: data[8],
            sid: data[9],
            mc: data[10],
            sc: data[11],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_command_defaults() {
        let header = FinsHeader::command(10, 1, 0x42, 0x01, 0x02);

        assert_eq!(header.icf, 0x80);
        assert_eq!(header.rsv, 0x00);
        assert_eq!(header.gct, 0x02);
        assert_eq!(header.dna, 0x00);
        assert_eq!(header.da1, 10);
        assert_eq!(header.da2, 0x00);
        assert_eq!(header.sna, 0x00);
        assert_eq!(header.sa1, 1);
        assert_eq!(header.sa2, 0x00);
        assert_eq!(header.sid, 0x42);
        assert_eq!(header.mc, 0x01);
        assert_eq!(header.sc, 0x02);
    }

    #[test]
    fn test_header_to_bytes_order() {
        let header = FinsHeader::command(0x0A, 0x01, 0x01, 0x01, 0x01);
        assert_eq!(
            header.to_bytes(),
            [0x80, 0x00, 0x02, 0x00, 0x0A, 0x00, 0x00, 0x01, 0x00, 0x01, 0x01, 0x01]
        );
    }

    #[test]
    fn test_header_from_bytes() {
        let bytes = [
            0xC0, 0x00, 0x02, 0x00, 0x01, 0x00, 0x00, 0x0A, 0x00, 0x05, 0x01, 0x02,
        ];
        let header = FinsHeader::from_bytes(&bytes).unwrap();

        assert_eq!(header.icf, 0xC0);
        assert_eq!(header.da1, 0x01);
        assert_eq!(header.sa1, 0x0A);
        assert_eq!(header.sid, 0x05);
        assert_eq!(header.mc, 0x01);
        assert_eq!(header.sc, 0x02);
    }

    #[test]
    fn test_header_from_bytes_too_short() {
        let bytes = [0xC0, 0x00, 0x02];
        assert!(FinsHeader::from_bytes(&bytes).is_err());
    }

    #[test]
    fn test_header_roundtrip() {
        let original = FinsHeader::command(20, 30, 0xFF, 0x01, 0x01);
        let parsed = FinsHeader::from_bytes(&original.to_bytes()).unwrap();
        assert_eq!(original, parsed);
    }
}
