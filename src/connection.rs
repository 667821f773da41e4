//! Transport connections for FINS communication.
//!
//! This module provides the [`Connection`] trait and its two
//! implementations, [`TcpConnection`] and [`UdpConnection`]. The connection
//! layer owns the socket, the negotiated node addresses and the service ID
//! counter; it knows nothing about command semantics.
//!
//! # Design
//!
//! - **Synchronous** - Blocking send/receive with configurable timeout
//! - **Explicit lifecycle** - `connect` and `disconnect` are idempotent;
//!   nothing happens implicitly on drop beyond closing the descriptor
//! - **One command in flight** - All operations take `&mut self`, so a
//!   connection never interleaves requests
//!
//! # Constants
//!
//! - [`DEFAULT_FINS_PORT`] - Default FINS port (9600), shared by TCP and UDP
//! - [`DEFAULT_TIMEOUT`] - Default timeout (2 seconds)
//! - [`MAX_PACKET_SIZE`] - Maximum UDP datagram size (2048 bytes)

use std::io::{ErrorKind, Read, Write};
use std::net::{SocketAddr, TcpStream, UdpSocket};
use std::time::Duration;

use log::debug;

use crate::error::{FinsError, Result};
use crate::frame;

/// Default FINS port, shared by TCP and UDP.
pub const DEFAULT_FINS_PORT: u16 = 9600;

/// Default timeout for socket operations.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(2);

/// Maximum UDP datagram size for FINS.
pub const MAX_PACKET_SIZE: usize = 2048;

/// Size of the PLC's TCP handshake reply.
const HANDSHAKE_REPLY_SIZE: usize = 24;

/// Which transport a connection runs over.
///
/// The command layer uses this to decide how responses are framed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportKind {
    /// FINS/TCP with the 16-byte wrapper around each frame.
    Tcp,
    /// FINS/UDP with bare frames, one per datagram.
    Udp,
}

/// A transport-level link to a PLC.
///
/// Implementations own the socket, the node addresses and the service ID
/// counter. [`send`](Connection::send) and [`receive`](Connection::receive)
/// move raw bytes; framing is the command layer's business.
pub trait Connection {
    /// Opens the link. A no-op if already connected.
    fn connect(&mut self) -> Result<()>;

    /// Closes the link. Safe to call repeatedly or while disconnected.
    fn disconnect(&mut self);

    /// Returns `true` while the link is open.
    fn is_connected(&self) -> bool;

    /// Sends raw bytes to the PLC.
    fn send(&mut self, bytes: &[u8]) -> Result<()>;

    /// Receives bytes from the PLC.
    ///
    /// For TCP this reads exactly `len` bytes from the stream. For UDP it
    /// receives one whole datagram and `len` is ignored.
    fn receive(&mut self, len: usize) -> Result<Vec<u8>>;

    /// The transport this connection runs over.
    fn transport(&self) -> TransportKind;

    /// Our FINS node number (SA1).
    fn local_node(&self) -> u8;

    /// The PLC's FINS node number (DA1).
    fn remote_node(&self) -> u8;

    /// Advances and returns the service ID for the next command.
    fn next_sid(&mut self) -> u8;
}

fn map_timeout(e: std::io::Error) -> FinsError {
    match e.kind() {
        ErrorKind::WouldBlock | ErrorKind::TimedOut => FinsError::Timeout,
        _ => FinsError::Io(e),
    }
}

/// FINS/TCP connection.
///
/// Node numbers are negotiated with the PLC during
/// [`connect`](Connection::connect); until then both report 0.
pub struct TcpConnection {
    plc_addr: SocketAddr,
    timeout: Duration,
    stream: Option<TcpStream>,
    local_node: u8,
    remote_node: u8,
    sid: u8,
}

impl TcpConnection {
    /// Creates a disconnected TCP connection to the given PLC address.
    pub fn new(plc_addr: SocketAddr, timeout: Duration) -> Self {
        Self {
            plc_addr,
            timeout,
            stream: None,
            local_node: 0,
            remote_node: 0,
            sid: 0,
        }
    }

    fn stream(&mut self) -> Result<&mut TcpStream> {
        self.stream.as_mut().ok_or(FinsError::NotConnected)
    }

    /// Performs the FINS/TCP node negotiation on a fresh stream.
    ///
    /// The PLC's 24-byte reply carries our allocated node number at byte 19
    /// and its own at byte 23.
    fn handshake(stream: &mut TcpStream) -> Result<(u8, u8)> {
        stream
            .write_all(&frame::handshake_request())
            .map_err(map_timeout)?;

        let mut reply = [0u8; HANDSHAKE_REPLY_SIZE];
        stream.read_exact(&mut reply).map_err(map_timeout)?;

        if reply[0..4] != frame::TCP_MAGIC {
            return Err(FinsError::frame(format!(
                "bad handshake magic: {:02X?}",
                &reply[0..4]
            )));
        }

        let kind = u32::from_be_bytes([reply[8], reply[9], reply[10], reply[11]]);
        if kind != frame::TcpFrameKind::PlcToClient.code() {
            return Err(FinsError::frame(format!(
                "unexpected handshake frame kind: {kind}"
            )));
        }

        Ok((reply[19], reply[23]))
    }
}

impl Connection for TcpConnection {
    fn connect(&mut self) -> Result<()> {
        if self.stream.is_some() {
            return Ok(());
        }

        let mut stream =
            TcpStream::connect_timeout(&self.plc_addr, self.timeout).map_err(map_timeout)?;
        stream.set_read_timeout(Some(self.timeout))?;
        stream.set_write_timeout(Some(self.timeout))?;

        let (local_node, remote_node) = Self::handshake(&mut stream)?;
        debug!("TCP handshake complete: local node {local_node}, remote node {remote_node}");

        self.local_node = local_node;
        self.remote_node = remote_node;
        self.stream = Some(stream);
        Ok(())
    }

    fn disconnect(&mut self) {
        if let Some(stream) = self.stream.take() {
            let _ = stream.shutdown(std::net::Shutdown::Both);
        }
    }

    fn is_connected(&self) -> bool {
        self.stream.is_some()
    }

    fn send(&mut self, bytes: &[u8]) -> Result<()> {
        self.stream()?.write_all(bytes).map_err(map_timeout)
    }

    fn receive(&mut self, len: usize) -> Result<Vec<u8>> {
        let mut buffer = vec![0u8; len];
        self.stream()?
            .read_exact(&mut buffer)
            .map_err(map_timeout)?;
        Ok(buffer)
    }

    fn transport(&self) -> TransportKind {
        TransportKind::Tcp
    }

    fn local_node(&self) -> u8 {
        self.local_node
    }

    fn remote_node(&self) -> u8 {
        self.remote_node
    }

    fn next_sid(&mut self) -> u8 {
        self.sid = self.sid.wrapping_add(1);
        self.sid
    }
}

impl std::fmt::Debug for TcpConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TcpConnection")
            .field("plc_addr", &self.plc_addr)
            .field("connected", &self.stream.is_some())
            .field("local_node", &self.local_node)
            .field("remote_node", &self.remote_node)
            .finish()
    }
}

/// FINS/UDP connection.
///
/// UDP has no node negotiation, so both node numbers must be supplied up
/// front and must be non-zero.
pub struct UdpConnection {
    plc_addr: SocketAddr,
    timeout: Duration,
    socket: Option<UdpSocket>,
    local_node: u8,
    remote_node: u8,
    sid: u8,
}

impl UdpConnection {
    /// Creates a disconnected UDP connection to the given PLC address.
    pub fn new(plc_addr: SocketAddr, timeout: Duration, local_node: u8, remote_node: u8) -> Self {
        Self {
            plc_addr,
            timeout,
            socket: None,
            local_node,
            remote_node,
            sid: 0,
        }
    }

    fn socket(&mut self) -> Result<&mut UdpSocket> {
        self.socket.as_mut().ok_or(FinsError::NotConnected)
    }
}

impl Connection for UdpConnection {
    fn connect(&mut self) -> Result<()> {
        if self.socket.is_some() {
            return Ok(());
        }

        // Bind to any available local port, then fix the peer address.
        let socket = UdpSocket::bind("0.0.0.0:0")?;
        socket.connect(self.plc_addr)?;
        socket.set_read_timeout(Some(self.timeout))?;
        socket.set_write_timeout(Some(self.timeout))?;

        debug!("UDP socket bound for PLC at {}", self.plc_addr);
        self.socket = Some(socket);
        Ok(())
    }

    fn disconnect(&mut self) {
        self.socket = None;
    }

    fn is_connected(&self) -> bool {
        self.socket.is_some()
    }

    fn send(&mut self, bytes: &[u8]) -> Result<()> {
        self.socket()?.send(bytes).map_err(map_timeout)?;
        Ok(())
    }

    fn receive(&mut self, _len: usize) -> Result<Vec<u8>> {
        let mut buffer = vec![0u8; MAX_PACKET_SIZE];
        let size = self.socket()?.recv(&mut buffer).map_err(map_timeout)?;
        buffer.truncate(size);
        Ok(buffer)
    }

    fn transport(&self) -> TransportKind {
        TransportKind::Udp
    }

    fn local_node(&self) -> u8 {
        self.local_node
    }

    fn remote_node(&self) -> u8 {
        self.remote_node
    }

    fn next_sid(&mut self) -> u8 {
        self.sid = self.sid.wrapping_add(1);
        self.sid
    }
}

impl std::fmt::Debug for UdpConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UdpConnection")
            .field("plc_addr", &self.plc_addr)
            .field("connected", &self.socket.is_some())
            .field("local_node", &self.local_node)
            .field("remote_node", &self.remote_node)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_constants() {
        assert_eq!(DEFAULT_FINS_PORT, 9600);
        assert_eq!(DEFAULT_TIMEOUT, Duration::from_secs(2));
        assert_eq!(MAX_PACKET_SIZE, 2048);
    }

    #[test]
    fn test_udp_connect_and_disconnect() {
        let addr: SocketAddr = "127.0.0.1:9600".parse().unwrap();
        let mut conn = UdpConnection::new(addr, Duration::from_millis(100), 0x01, 0x0A);

        assert!(!conn.is_connected());
        conn.connect().unwrap();
        assert!(conn.is_connected());

        // connect while connected is a no-op
        conn.connect().unwrap();
        assert!(conn.is_connected());

        conn.disconnect();
        assert!(!conn.is_connected());
        // disconnect is idempotent
        conn.disconnect();
    }

    #[test]
    fn test_udp_send_without_connect() {
        let addr: SocketAddr = "127.0.0.1:9600".parse().unwrap();
        let mut conn = UdpConnection::new(addr, Duration::from_millis(100), 0x01, 0x0A);
        assert!(matches!(conn.send(&[0x80]), Err(FinsError::NotConnected)));
    }

    #[test]
    fn test_udp_receive_timeout() {
        let addr: SocketAddr = "127.0.0.1:1".parse().unwrap();
        let mut conn = UdpConnection::new(addr, Duration::from_millis(50), 0x01, 0x0A);
        conn.connect().unwrap();
        assert!(matches!(conn.receive(14), Err(FinsError::Timeout)));
    }

    #[test]
    fn test_sid_wraps() {
        let addr: SocketAddr = "127.0.0.1:9600".parse().unwrap();
        let mut conn = UdpConnection::new(addr, Duration::from_millis(100), 0x01, 0x0A);

        assert_eq!(conn.next_sid(), 1);
        assert_eq!(conn.next_sid(), 2);
        for _ in 0..253 {
            conn.next_sid();
        }
        assert_eq!(conn.next_sid(), 0);
        assert_eq!(conn.next_sid(), 1);
    }

    #[test]
    fn test_tcp_nodes_default_to_zero() {
        let addr: SocketAddr = "127.0.0.1:9600".parse().unwrap();
        let conn = TcpConnection::new(addr, Duration::from_millis(100));
        assert_eq!(conn.local_node(), 0);
        assert_eq!(conn.remote_node(), 0);
        assert!(!conn.is_connected());
    }

    #[test]
    fn test_debug_output() {
        let addr: SocketAddr = "127.0.0.1:9600".parse().unwrap();
        let conn = UdpConnection::new(addr, Duration::from_millis(100), 0x01, 0x0A);
        let debug_str = format!("{conn:?}");
        assert!(debug_str.contains("UdpConnection"));
        assert!(debug_str.contains("127.0.0.1:9600"));
    }
}
