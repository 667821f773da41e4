//! # Omron FINS PLC Client
//!
//! A Rust library for reading and writing Omron PLC memory using the FINS
//! (Factory Interface Network Service) protocol over TCP or UDP.
//!
//! This is a **protocol-only** library—no business logic, polling,
//! schedulers, or application-level features. Each call produces exactly
//! 1 request and 1 response. No automatic retries, caching, or reconnection.
//!
//! ## Features
//!
//! - **Two transports** — FINS/TCP with automatic node negotiation, or
//!   FINS/UDP with explicitly configured node numbers
//! - **Typed access** — bool, i16, u16, i32, u32, f32 and ASCII strings,
//!   as scalars and arrays, on top of raw word read/write
//! - **Deterministic** — each call produces exactly 1 request and 1 response
//! - **No panics** — all errors returned as `Result<T, FinsError>`
//! - **Full end-code registry** — every PLC completion code mapped to a
//!   message and an error/informational classification
//!
//! ## Quick Start
//!
//! ```no_run
//! use plc_omron::{Client, ClientConfig, MemoryArea, TransportKind};
//!
//! fn main() -> plc_omron::Result<()> {
//!     // Connect to a PLC at the factory default IP over TCP;
//!     // node numbers are negotiated during connect()
//!     let config = ClientConfig::new("192.168.1.250", TransportKind::Tcp);
//!     let mut client = Client::new(config)?;
//!     client.connect()?;
//!
//!     // Read 10 raw words from DM100
//!     let data = client.read(MemoryArea::DataMemory, 100, 0, 10)?;
//!     println!("DM100-109: {:?}", data);
//!
//!     // Typed access
//!     let temperature: f32 = client.read_f32(MemoryArea::DataMemory, 100)?;
//!     client.write_u16(MemoryArea::DataMemory, 200, 42)?;
//!     client.write_string(MemoryArea::DataMemory, 300, "PRODUCT-001")?;
//!
//!     client.disconnect();
//!     Ok(())
//! }
//! ```
//!
//! ## Memory Areas
//!
//! | Area | Description |
//! |------|-------------|
//! | [`MemoryArea::CommonIo`] | Core I/O - inputs, outputs, internal relays |
//! | [`MemoryArea::Work`] | Work area - temporary work bits/words |
//! | [`MemoryArea::Holding`] | Holding area - retentive bits/words |
//! | [`MemoryArea::DataMemory`] | Data Memory - numeric data storage |
//! | [`MemoryArea::Auxiliary`] | Auxiliary Relay - system status/control |
//!
//! ## Transports
//!
//! Over TCP every frame travels behind a 16-byte `FINS` wrapper, and
//! `connect()` runs the node negotiation handshake that allocates the
//! client's node number. Over UDP frames travel bare, one per datagram,
//! and both node numbers must be configured up front:
//!
//! ```no_run
//! use plc_omron::{Client, ClientConfig, TransportKind};
//!
//! let config = ClientConfig::new("192.168.1.250", TransportKind::Udp)
//!     .with_local_node(1)
//!     .with_remote_node(10);
//! let mut client = Client::new(config)?;
//! client.connect()?;
//! # Ok::<(), plc_omron::FinsError>(())
//! ```
//!
//! ## Error Handling
//!
//! All operations return [`Result<T, FinsError>`]. The library never
//! panics in public code.
//!
//! ```no_run
//! use plc_omron::{Client, ClientConfig, FinsError, MemoryArea, TransportKind};
//!
//! let config = ClientConfig::new("192.168.1.250", TransportKind::Tcp);
//! let mut client = Client::new(config)?;
//! client.connect()?;
//!
//! match client.write_u16(MemoryArea::DataMemory, 100, 42) {
//!     Ok(()) => println!("Written"),
//!     Err(FinsError::Timeout) => println!("Communication timeout"),
//!     Err(FinsError::Plc { code, message }) => {
//!         println!("PLC error 0x{:02X}: {}", code, message);
//!     }
//!     Err(e) => println!("Error: {}", e),
//! }
//!
//! // Reads are best effort: a classified end-code error is reported with
//! // the result instead of failing the read
//! let result = client.read_result(MemoryArea::DataMemory, 100, 0, 10)?;
//! if let Some(message) = result.warning() {
//!     println!("PLC reported: {message}");
//! }
//! println!("Data: {:?}", result.data);
//! # Ok::<(), FinsError>(())
//! ```
//!
//! ## Design Philosophy
//!
//! This library follows the principle of **determinism over abstraction**:
//!
//! 1. Each operation does exactly what it says
//! 2. No magic or implicit behavior
//! 3. The application has full control over retry, caching, and reconnection
//! 4. Errors are always explicit and descriptive

#![warn(clippy::all)]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

mod client;
mod codec;
pub mod codes;
mod command;
mod connection;
mod error;
mod frame;
mod header;
mod memory;
mod response;

// Public re-exports
pub use client::{Client, ClientConfig};
pub use command::{memory_area_read, memory_area_write, ReadResult};
pub use connection::{
    Connection, TcpConnection, TransportKind, UdpConnection, DEFAULT_FINS_PORT, DEFAULT_TIMEOUT,
    MAX_PACKET_SIZE,
};
pub use error::{FinsError, Result};
pub use frame::{FinsFrame, TcpFrameKind, TCP_MAGIC, TCP_WRAPPER_SIZE};
pub use header::{FinsHeader, FINS_HEADER_SIZE};
pub use memory::{MemoryArea, Subfunction, MEMORY_AREA_COMMAND};
pub use response::{EndCode, FinsResponse, FINS_RESPONSE_MIN_SIZE};
