//! Memory area and command code definitions for the FINS protocol.
//!
//! Omron PLCs expose several word-oriented register spaces. Each space is
//! identified on the wire by a one-byte area code; the operation within the
//! memory-area command family is selected by a one-byte subfunction.

/// Main command code for the memory-area command family.
pub const MEMORY_AREA_COMMAND: u8 = 0x01;

/// Memory areas available on Omron PLCs.
///
/// Every area is word addressed (16 bits per register). The area code is
/// the first parameter byte of a memory-area read or write.
///
/// # Example
///
/// ```
/// use plc_omron::MemoryArea;
///
/// assert_eq!(MemoryArea::DataMemory.code(), 0x82);
/// assert_eq!(MemoryArea::DataMemory.to_string(), "DM");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemoryArea {
    /// DM (Data Memory) area - numeric data storage.
    DataMemory,
    /// CIO (Common I/O) area - inputs, outputs, internal relays.
    CommonIo,
    /// WR (Work) area - temporary work bits/words.
    Work,
    /// HR (Holding) area - retentive bits/words.
    Holding,
    /// AR (Auxiliary Relay) area - system status and control.
    Auxiliary,
}

impl MemoryArea {
    /// Returns the FINS area code for this memory area.
    pub fn code(self) -> u8 {
        match self {
            MemoryArea::DataMemory => 0x82,
            MemoryArea::CommonIo => 0x30,
            MemoryArea::Work => 0x31,
            MemoryArea::Holding => 0x32,
            MemoryArea::Auxiliary => 0x33,
        }
    }
}

impl std::fmt::Display for MemoryArea {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MemoryArea::DataMemory => write!(f, "DM"),
            MemoryArea::CommonIo => write!(f, "CIO"),
            MemoryArea::Work => write!(f, "WR"),
            MemoryArea::Holding => write!(f, "HR"),
            MemoryArea::Auxiliary => write!(f, "AR"),
        }
    }
}

/// Subfunctions of the memory-area command family.
///
/// Only read and write are issued by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subfunction {
    /// Memory area read.
    Read,
    /// Memory area write.
    Write,
}

impl Subfunction {
    /// Returns the FINS subcommand code.
    pub fn code(self) -> u8 {
        match self {
            Subfunction::Read => 0x01,
            Subfunction::Write => 0x02,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_area_codes() {
        assert_eq!(MemoryArea::DataMemory.code(), 0x82);
        assert_eq!(MemoryArea::CommonIo.code(), 0x30);
        assert_eq!(MemoryArea::Work.code(), 0x31);
        assert_eq!(MemoryArea::Holding.code(), 0x32);
        assert_eq!(MemoryArea::Auxiliary.code(), 0x33);
    }

    #[test]
    fn test_subfunction_codes() {
        assert_eq!(Subfunction::Read.code(), 0x01);
        assert_eq!(Subfunction::Write.code(), 0x02);
    }

    #[test]
    fn test_display() {
        assert_eq!(MemoryArea::DataMemory.to_string(), "DM");
        assert_eq!(MemoryArea::CommonIo.to_string(), "CIO");
        assert_eq!(MemoryArea::Work.to_string(), "WR");
        assert_eq!(MemoryArea::Holding.to_string(), "HR");
        assert_eq!(MemoryArea::Auxiliary.to_string(), "AR");
    }
}
