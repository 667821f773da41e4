//! FINS command execution.
//!
//! This module assembles memory-area read/write commands, runs the
//! request/response exchange over a [`Connection`] and validates the
//! result. It is the only place that knows how responses are framed per
//! transport: FINS/TCP responses arrive behind the 16-byte wrapper,
//! FINS/UDP responses arrive as one bare datagram.

use log::{debug, warn};

use crate::codes;
use crate::connection::{Connection, TransportKind};
use crate::error::{FinsError, Result};
use crate::frame::{self, FinsFrame, TCP_WRAPPER_SIZE};
use crate::header::FinsHeader;
use crate::memory::{MemoryArea, Subfunction, MEMORY_AREA_COMMAND};
use crate::response::{EndCode, FinsResponse};

/// Outcome of a memory-area read.
///
/// Reads are best effort: a classified end-code error does not abort the
/// read, because the payload may still be partially valid. The end code
/// travels with the data so callers can inspect it, and
/// [`warning`](ReadResult::warning) exposes the diagnostic message for any
/// non-zero code. Only connection and framing failures fail a read.
#[derive(Debug, Clone)]
pub struct ReadResult {
    /// Payload bytes following the end code.
    pub data: Vec<u8>,
    /// Completion status reported by the PLC.
    pub end_code: EndCode,
}

impl ReadResult {
    /// Returns the registry message for the end code when it is anything
    /// other than a normal completion.
    pub fn warning(&self) -> Option<&'static str> {
        if self.end_code.is_normal_completion() {
            None
        } else {
            Some(self.end_code.message())
        }
    }
}

/// Addressing parameters shared by memory-area read and write.
fn memory_area_params(area: MemoryArea, address: u16, position: u8, count: u16) -> Vec<u8> {
    let address = address.to_be_bytes();
    let count = count.to_be_bytes();
    vec![
        area.code(),
        address[0],
        address[1],
        position,
        count[0],
        count[1],
    ]
}

fn plc_error(end_code: EndCode) -> FinsError {
    let code = if codes::is_error(end_code.main) {
        end_code.main
    } else {
        end_code.sub
    };
    FinsError::Plc {
        code,
        message: codes::message(code),
    }
}

/// Runs one request/response exchange and returns the validated response.
fn exchange(
    connection: &mut dyn Connection,
    subfunction: Subfunction,
    parameters: Vec<u8>,
    data: Vec<u8>,
) -> Result<FinsResponse> {
    if !connection.is_connected() {
        return Err(FinsError::NotConnected);
    }

    let sid = connection.next_sid();
    let header = FinsHeader::command(
        connection.remote_node(),
        connection.local_node(),
        sid,
        MEMORY_AREA_COMMAND,
        subfunction.code(),
    );
    let request = FinsFrame::new(header, parameters, data);

    let body = match connection.transport() {
        TransportKind::Tcp => {
            connection.send(&request.tcp_bytes())?;
            let wrapper = connection.receive(TCP_WRAPPER_SIZE)?;
            let remaining = frame::parse_tcp_wrapper(&wrapper)?;
            connection.receive(remaining)?
        }
        TransportKind::Udp => {
            connection.send(&request.udp_bytes())?;
            connection.receive(0)?
        }
    };

    let response = FinsResponse::from_bytes(&body)?;
    debug!(
        "SID {:#04X}: end code {}, {} payload byte(s)",
        sid,
        response.end_code,
        response.data.len()
    );

    if response.header.sid != sid {
        return Err(FinsError::SidMismatch {
            expected: sid,
            received: response.header.sid,
        });
    }

    Ok(response)
}

/// Reads `count` words from a PLC memory area.
///
/// `position` is the sub-word start index within the first addressed word.
///
/// A classified end-code error does not fail the read; the diagnostic is
/// logged and whatever payload followed the end code is returned, since it
/// may be partially valid.
///
/// # Errors
///
/// Fails only on connection and framing problems (not connected, timeout,
/// short or malformed response, SID mismatch).
pub fn memory_area_read(
    connection: &mut dyn Connection,
    area: MemoryArea,
    address: u16,
    position: u8,
    count: u16,
) -> Result<ReadResult> {
    let parameters = memory_area_params(area, address, position, count);
    let response = exchange(connection, Subfunction::Read, parameters, Vec::new())?;

    if !response.end_code.is_normal_completion() {
        warn!(
            "read of {} words from {}{} completed with end code {}",
            count, area, address, response.end_code
        );
    }

    Ok(ReadResult {
        data: response.data,
        end_code: response.end_code,
    })
}

/// Writes `count` words of `data` to a PLC memory area.
///
/// # Errors
///
/// Fails with [`FinsError::Plc`] when the end code reports an error, and
/// with [`FinsError::InvalidParameter`] when `data` is empty.
pub fn memory_area_write(
    connection: &mut dyn Connection,
    area: MemoryArea,
    address: u16,
    position: u8,
    count: u16,
    data: &[u8],
) -> Result<()> {
    if data.is_empty() {
        return Err(FinsError::invalid_parameter(
            "data",
            "a write needs at least one byte",
        ));
    }

    let parameters = memory_area_params(area, address, position, count);
    let response = exchange(connection, Subfunction::Write, parameters, data.to_vec())?;

    if !response.end_code.is_ok() {
        return Err(plc_error(response.end_code));
    }
    Ok(())
}
