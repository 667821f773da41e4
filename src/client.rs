//! High-level FINS client for communicating with Omron PLCs.
//!
//! This module provides the [`Client`] struct, which is the primary
//! interface for reading and writing PLC memory over FINS/TCP or FINS/UDP.
//!
//! # Overview
//!
//! The client handles:
//! - Connection lifecycle, including the FINS/TCP node negotiation
//! - Command construction and request/response correlation via Service ID
//! - Response parsing and end-code checking
//! - Typed conversion helpers (bool, i16, u16, i32, u32, f32, String)
//!
//! # Example
//!
//! ```no_run
//! use plc_omron::{Client, ClientConfig, MemoryArea, TransportKind};
//!
//! let config = ClientConfig::new("192.168.1.250", TransportKind::Tcp);
//! let mut client = Client::new(config)?;
//! client.connect()?;
//!
//! // Read and write typed values
//! let temperature: f32 = client.read_f32(MemoryArea::DataMemory, 100)?;
//! client.write_u16(MemoryArea::DataMemory, 200, 42)?;
//!
//! client.disconnect();
//! # Ok::<(), plc_omron::FinsError>(())
//! ```
//!
//! # Configuration
//!
//! The [`ClientConfig`] struct allows customization of:
//! - PLC host and port
//! - Transport (TCP with node negotiation, or UDP with fixed nodes)
//! - Communication timeout
//!
//! # Concurrency
//!
//! Every operation takes `&mut self`, so one client runs one command at a
//! time. Use one client per PLC connection.

use std::net::{SocketAddr, ToSocketAddrs};
use std::time::Duration;

use crate::codec;
use crate::command::{self, ReadResult};
use crate::connection::{
    Connection, TcpConnection, TransportKind, UdpConnection, DEFAULT_FINS_PORT, DEFAULT_TIMEOUT,
};
use crate::error::{FinsError, Result};
use crate::memory::MemoryArea;

/// Configuration for creating a FINS client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// PLC hostname or IP address.
    pub host: String,
    /// PLC port (default 9600).
    pub port: u16,
    /// Transport to run FINS over.
    pub transport: TransportKind,
    /// Our node number (SA1). Negotiated automatically on TCP; required
    /// non-zero on UDP.
    pub local_node: u8,
    /// The PLC's node number (DA1). Negotiated automatically on TCP;
    /// required non-zero on UDP.
    pub remote_node: u8,
    /// Communication timeout.
    pub timeout: Duration,
}

impl ClientConfig {
    /// Creates a configuration with the default port, timeout and node
    /// numbers.
    ///
    /// # Example
    ///
    /// ```
    /// use plc_omron::{ClientConfig, TransportKind};
    ///
    /// let config = ClientConfig::new("192.168.1.250", TransportKind::Tcp);
    /// ```
    pub fn new(host: impl Into<String>, transport: TransportKind) -> Self {
        Self {
            host: host.into(),
            port: DEFAULT_FINS_PORT,
            transport,
            local_node: 0,
            remote_node: 0,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Sets a custom PLC port (default is 9600).
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Sets a custom timeout (default is 2 seconds).
    ///
    /// # Example
    ///
    /// ```
    /// use plc_omron::{ClientConfig, TransportKind};
    /// use std::time::Duration;
    ///
    /// let config = ClientConfig::new("192.168.1.250", TransportKind::Udp)
    ///     .with_timeout(Duration::from_secs(5));
    /// ```
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets our node number. Required non-zero for UDP; ignored on TCP,
    /// where the handshake allocates it.
    pub fn with_local_node(mut self, node: u8) -> Self {
        self.local_node = node;
        self
    }

    /// Sets the PLC's node number. Required non-zero for UDP; ignored on
    /// TCP, where the handshake reports it.
    pub fn with_remote_node(mut self, node: u8) -> Self {
        self.remote_node = node;
        self
    }

    fn resolve(&self) -> Result<SocketAddr> {
        (self.host.as_str(), self.port)
            .to_socket_addrs()
            .map_err(FinsError::Io)?
            .next()
            .ok_or_else(|| {
                FinsError::invalid_parameter(
                    "host",
                    format!("{} does not resolve to an address", self.host),
                )
            })
    }
}

/// FINS client for communicating with Omron PLCs.
///
/// Each operation produces exactly one request and one response. No
/// automatic retries, caching, or reconnection.
///
/// # Example
///
/// ```no_run
/// use plc_omron::{Client, ClientConfig, MemoryArea, TransportKind};
///
/// let config = ClientConfig::new("192.168.1.250", TransportKind::Udp)
///     .with_local_node(1)
///     .with_remote_node(10);
/// let mut client = Client::new(config)?;
/// client.connect()?;
///
/// // Read 10 raw words from DM100
/// let words = client.read(MemoryArea::DataMemory, 100, 0, 10)?;
///
/// // Read an i16 array of 5 elements from DM200
/// let values = client.read_i16_array(MemoryArea::DataMemory, 200, 5, 0)?;
/// # Ok::<(), plc_omron::FinsError>(())
/// ```
pub struct Client {
    connection: Box<dyn Connection>,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("transport", &self.connection.transport())
            .field("connected", &self.connection.is_connected())
            .finish()
    }
}

impl Client {
    /// Creates a client from the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`FinsError::InvalidParameter`] if the host does not resolve
    /// or if a UDP configuration carries a zero node number.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let plc_addr = config.resolve()?;

        let connection: Box<dyn Connection> = match config.transport {
            TransportKind::Tcp => Box::new(TcpConnection::new(plc_addr, config.timeout)),
            TransportKind::Udp => {
                if config.local_node == 0 {
                    return Err(FinsError::invalid_parameter(
                        "local_node",
                        "UDP requires a non-zero local node number",
                    ));
                }
                if config.remote_node == 0 {
                    return Err(FinsError::invalid_parameter(
                        "remote_node",
                        "UDP requires a non-zero remote node number",
                    ));
                }
                Box::new(UdpConnection::new(
                    plc_addr,
                    config.timeout,
                    config.local_node,
                    config.remote_node,
                ))
            }
        };

        Ok(Self { connection })
    }

    /// Opens the connection, performing the node negotiation on TCP.
    ///
    /// A no-op when already connected.
    pub fn connect(&mut self) -> Result<()> {
        self.connection.connect()
    }

    /// Closes the connection. Safe to call repeatedly.
    pub fn disconnect(&mut self) {
        self.connection.disconnect();
    }

    /// Returns `true` while the connection is open.
    pub fn is_connected(&self) -> bool {
        self.connection.is_connected()
    }

    /// Reads `count` raw words starting at `position` within the addressed
    /// word.
    pub fn read(
        &mut self,
        area: MemoryArea,
        address: u16,
        position: u8,
        count: u16,
    ) -> Result<Vec<u8>> {
        self.read_result(area, address, position, count)
            .map(|result| result.data)
    }

    /// Reads raw words and returns the payload together with the end code.
    pub fn read_result(
        &mut self,
        area: MemoryArea,
        address: u16,
        position: u8,
        count: u16,
    ) -> Result<ReadResult> {
        command::memory_area_read(self.connection.as_mut(), area, address, position, count)
    }

    /// Writes raw bytes as `count` words starting at `position`.
    pub fn write(
        &mut self,
        area: MemoryArea,
        address: u16,
        position: u8,
        count: u16,
        data: &[u8],
    ) -> Result<()> {
        command::memory_area_write(self.connection.as_mut(), area, address, position, count, data)
    }

    fn word_count(words: usize) -> Result<u16> {
        u16::try_from(words).map_err(|_| {
            FinsError::invalid_parameter("count", "word count exceeds the u16 count field")
        })
    }

    fn double_words(items: u16) -> Result<u16> {
        items.checked_mul(2).ok_or_else(|| {
            FinsError::invalid_parameter("items", "item count exceeds the u16 count field")
        })
    }

    /// Reads one register as a boolean.
    pub fn read_bool(&mut self, area: MemoryArea, address: u16) -> Result<bool> {
        codec::decode_bool(&self.read(area, address, 0, 1)?)
    }

    /// Reads one register as a signed 16-bit value.
    pub fn read_i16(&mut self, area: MemoryArea, address: u16) -> Result<i16> {
        codec::decode_i16(&self.read(area, address, 0, 1)?)
    }

    /// Reads one register as an unsigned 16-bit value.
    pub fn read_u16(&mut self, area: MemoryArea, address: u16) -> Result<u16> {
        codec::decode_u16(&self.read(area, address, 0, 1)?)
    }

    /// Reads two registers as a signed 32-bit value.
    pub fn read_i32(&mut self, area: MemoryArea, address: u16) -> Result<i32> {
        codec::decode_i32(&self.read(area, address, 0, 2)?)
    }

    /// Reads two registers as an unsigned 32-bit value.
    pub fn read_u32(&mut self, area: MemoryArea, address: u16) -> Result<u32> {
        codec::decode_u32(&self.read(area, address, 0, 2)?)
    }

    /// Reads two registers as an IEEE 754 single-precision float.
    pub fn read_f32(&mut self, area: MemoryArea, address: u16) -> Result<f32> {
        codec::decode_f32(&self.read(area, address, 0, 2)?)
    }

    /// Reads `words` registers as ASCII text.
    pub fn read_string(&mut self, area: MemoryArea, address: u16, words: u16) -> Result<String> {
        codec::decode_string(&self.read(area, address, 0, words)?)
    }

    /// Reads `items` registers as booleans.
    pub fn read_bool_array(
        &mut self,
        area: MemoryArea,
        address: u16,
        items: u16,
        position: u8,
    ) -> Result<Vec<bool>> {
        codec::decode_bool_array(&self.read(area, address, position, items)?, false)
    }

    /// Reads `items` registers as signed 16-bit values.
    pub fn read_i16_array(
        &mut self,
        area: MemoryArea,
        address: u16,
        items: u16,
        position: u8,
    ) -> Result<Vec<i16>> {
        codec::decode_i16_array(&self.read(area, address, position, items)?, false)
    }

    /// Reads `items` registers as unsigned 16-bit values.
    pub fn read_u16_array(
        &mut self,
        area: MemoryArea,
        address: u16,
        items: u16,
        position: u8,
    ) -> Result<Vec<u16>> {
        codec::decode_u16_array(&self.read(area, address, position, items)?, false)
    }

    /// Reads `items` two-register values as signed 32-bit values.
    pub fn read_i32_array(
        &mut self,
        area: MemoryArea,
        address: u16,
        items: u16,
        position: u8,
    ) -> Result<Vec<i32>> {
        let count = Self::double_words(items)?;
        codec::decode_i32_array(&self.read(area, address, position, count)?, false)
    }

    /// Reads `items` two-register values as unsigned 32-bit values.
    pub fn read_u32_array(
        &mut self,
        area: MemoryArea,
        address: u16,
        items: u16,
        position: u8,
    ) -> Result<Vec<u32>> {
        let count = Self::double_words(items)?;
        codec::decode_u32_array(&self.read(area, address, position, count)?, false)
    }

    /// Reads `items` two-register values as single-precision floats.
    pub fn read_f32_array(
        &mut self,
        area: MemoryArea,
        address: u16,
        items: u16,
        position: u8,
    ) -> Result<Vec<f32>> {
        let count = Self::double_words(items)?;
        codec::decode_f32_array(&self.read(area, address, position, count)?, false)
    }

    /// Reads `words` registers as ASCII text split on line separators.
    pub fn read_string_array(
        &mut self,
        area: MemoryArea,
        address: u16,
        words: u16,
        position: u8,
    ) -> Result<Vec<String>> {
        codec::decode_string_array(&self.read(area, address, position, words)?)
    }

    /// Writes a boolean to one register.
    pub fn write_bool(&mut self, area: MemoryArea, address: u16, value: bool) -> Result<()> {
        self.write(area, address, 0, 1, &codec::encode_bool(value))
    }

    /// Writes a signed 16-bit value to one register.
    pub fn write_i16(&mut self, area: MemoryArea, address: u16, value: i16) -> Result<()> {
        self.write(area, address, 0, 1, &codec::encode_i16(value))
    }

    /// Writes an unsigned 16-bit value to one register.
    pub fn write_u16(&mut self, area: MemoryArea, address: u16, value: u16) -> Result<()> {
        self.write(area, address, 0, 1, &codec::encode_u16(value))
    }

    /// Writes a signed 32-bit value to two registers.
    pub fn write_i32(&mut self, area: MemoryArea, address: u16, value: i32) -> Result<()> {
        self.write(area, address, 0, 2, &codec::encode_i32(value))
    }

    /// Writes an unsigned 32-bit value to two registers.
    pub fn write_u32(&mut self, area: MemoryArea, address: u16, value: u32) -> Result<()> {
        self.write(area, address, 0, 2, &codec::encode_u32(value))
    }

    /// Writes a single-precision float to two registers.
    pub fn write_f32(&mut self, area: MemoryArea, address: u16, value: f32) -> Result<()> {
        self.write(area, address, 0, 2, &codec::encode_f32(value))
    }

    /// Writes ASCII text, zero-padded to a whole number of registers.
    pub fn write_string(&mut self, area: MemoryArea, address: u16, value: &str) -> Result<()> {
        let data = codec::encode_string(value)?;
        let count = Self::word_count(data.len() / codec::WORD_SIZE)?;
        self.write(area, address, 0, count, &data)
    }

    /// Writes booleans to consecutive registers.
    pub fn write_bool_array(
        &mut self,
        area: MemoryArea,
        address: u16,
        values: &[bool],
        position: u8,
    ) -> Result<()> {
        let data = codec::encode_all(values, codec::encode_bool);
        let count = Self::word_count(values.len())?;
        self.write(area, address, position, count, &data)
    }

    /// Writes signed 16-bit values to consecutive registers.
    pub fn write_i16_array(
        &mut self,
        area: MemoryArea,
        address: u16,
        values: &[i16],
        position: u8,
    ) -> Result<()> {
        let data = codec::encode_all(values, codec::encode_i16);
        let count = Self::word_count(values.len())?;
        self.write(area, address, position, count, &data)
    }

    /// Writes unsigned 16-bit values to consecutive registers.
    pub fn write_u16_array(
        &mut self,
        area: MemoryArea,
        address: u16,
        values: &[u16],
        position: u8,
    ) -> Result<()> {
        let data = codec::encode_all(values, codec::encode_u16);
        let count = Self::word_count(values.len())?;
        self.write(area, address, position, count, &data)
    }

    /// Writes signed 32-bit values, two registers per element.
    pub fn write_i32_array(
        &mut self,
        area: MemoryArea,
        address: u16,
        values: &[i32],
        position: u8,
    ) -> Result<()> {
        let data = codec::encode_all(values, codec::encode_i32);
        let count = Self::word_count(values.len() * 2)?;
        self.write(area, address, position, count, &data)
    }

    /// Writes unsigned 32-bit values, two registers per element.
    pub fn write_u32_array(
        &mut self,
        area: MemoryArea,
        address: u16,
        values: &[u32],
        position: u8,
    ) -> Result<()> {
        let data = codec::encode_all(values, codec::encode_u32);
        let count = Self::word_count(values.len() * 2)?;
        self.write(area, address, position, count, &data)
    }

    /// Writes single-precision floats, two registers per element.
    pub fn write_f32_array(
        &mut self,
        area: MemoryArea,
        address: u16,
        values: &[f32],
        position: u8,
    ) -> Result<()> {
        let data = codec::encode_all(values, codec::encode_f32);
        let count = Self::word_count(values.len() * 2)?;
        self.write(area, address, position, count, &data)
    }

    /// Writes ASCII strings joined with `"\r\n"` line separators, so a
    /// matching `read_string_array` splits them back apart.
    pub fn write_string_array(
        &mut self,
        area: MemoryArea,
        address: u16,
        values: &[&str],
        position: u8,
    ) -> Result<()> {
        let data = codec::encode_string(&values.join("\r\n"))?;
        let count = Self::word_count(data.len() / codec::WORD_SIZE)?;
        self.write(area, address, position, count, &data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = ClientConfig::new("192.168.1.250", TransportKind::Tcp);
        assert_eq!(config.port, DEFAULT_FINS_PORT);
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
        assert_eq!(config.local_node, 0);
        assert_eq!(config.remote_node, 0);
    }

    #[test]
    fn test_config_builders() {
        let config = ClientConfig::new("192.168.1.250", TransportKind::Udp)
            .with_port(9601)
            .with_timeout(Duration::from_secs(5))
            .with_local_node(1)
            .with_remote_node(10);

        assert_eq!(config.port, 9601);
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.local_node, 1);
        assert_eq!(config.remote_node, 10);
    }

    #[test]
    fn test_tcp_client_allows_zero_nodes() {
        let config = ClientConfig::new("127.0.0.1", TransportKind::Tcp);
        let client = Client::new(config).unwrap();
        assert!(!client.is_connected());
    }

    #[test]
    fn test_udp_client_rejects_zero_nodes() {
        let config = ClientConfig::new("127.0.0.1", TransportKind::Udp);
        assert!(matches!(
            Client::new(config),
            Err(FinsError::InvalidParameter { .. })
        ));

        let config = ClientConfig::new("127.0.0.1", TransportKind::Udp).with_local_node(1);
        assert!(matches!(
            Client::new(config),
            Err(FinsError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_udp_client_with_nodes() {
        let config = ClientConfig::new("127.0.0.1", TransportKind::Udp)
            .with_local_node(1)
            .with_remote_node(10);
        let mut client = Client::new(config).unwrap();

        client.connect().unwrap();
        assert!(client.is_connected());
        client.disconnect();
        assert!(!client.is_connected());
    }

    #[test]
    fn test_unresolvable_host() {
        let config = ClientConfig::new("not a hostname", TransportKind::Tcp);
        assert!(Client::new(config).is_err());
    }

    #[test]
    fn test_32bit_array_read_count_overflow_is_rejected() {
        let config = ClientConfig::new("127.0.0.1", TransportKind::Tcp);
        let mut client = Client::new(config).unwrap();

        // 40_000 items need 80_000 words, past the u16 count field
        assert!(matches!(
            client.read_i32_array(MemoryArea::DataMemory, 0, 40_000, 0),
            Err(FinsError::InvalidParameter { .. })
        ));
        assert!(matches!(
            client.read_u32_array(MemoryArea::DataMemory, 0, 40_000, 0),
            Err(FinsError::InvalidParameter { .. })
        ));
        assert!(matches!(
            client.read_f32_array(MemoryArea::DataMemory, 0, 40_000, 0),
            Err(FinsError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_array_write_count_overflow_is_rejected() {
        let config = ClientConfig::new("127.0.0.1", TransportKind::Tcp);
        let mut client = Client::new(config).unwrap();

        let doubles = vec![0i32; 40_000];
        assert!(matches!(
            client.write_i32_array(MemoryArea::DataMemory, 0, &doubles, 0),
            Err(FinsError::InvalidParameter { .. })
        ));

        let singles = vec![0u16; 70_000];
        assert!(matches!(
            client.write_u16_array(MemoryArea::DataMemory, 0, &singles, 0),
            Err(FinsError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_operations_require_connection() {
        let config = ClientConfig::new("127.0.0.1", TransportKind::Tcp);
        let mut client = Client::new(config).unwrap();

        assert!(matches!(
            client.read_u16(MemoryArea::DataMemory, 100),
            Err(FinsError::NotConnected)
        ));
        assert!(matches!(
            client.write_u16(MemoryArea::DataMemory, 100, 1),
            Err(FinsError::NotConnected)
        ));
    }
}
