//! Response code registry for PLC end codes.
//!
//! The PLC closes every response with a 2-byte end code (main, sub). Each
//! byte is classified here against a static table of known codes. Codes
//! absent from the table are treated as errors with a "Code not found"
//! message, so an unrecognized code from a PLC can never pass as success.

/// Known response codes, indexed by code value (0x00..=0x63).
///
/// Entries are `(message, is_error)`. Several codes are reserved and carry
/// an empty message without signaling an error.
const RESPONSE_CODES: [(&str, bool); 100] = [
    ("Ok", false),                                                   // 0x00
    ("Invalid memory address parameter", true),                      // 0x01
    ("Invalid or illegal command parameter", true),                  // 0x02
    ("Response SID did not match", true),                            // 0x03
    ("NSB did not respond to send request", true),                   // 0x04
    ("Timed out no response", true),                                 // 0x05
    ("Timed out waiting for response", true),                        // 0x06
    ("Bad received CRC", true),                                      // 0x07
    ("Unmatched message IDs", true),                                 // 0x08
    ("Unmatched command or response", true),                         // 0x09
    ("", false),                                                     // 0x0A
    ("Network address out of range", true),                          // 0x0B
    ("Node address out of range", true),                             // 0x0C
    ("Unit address out of range", true),                             // 0x0D
    ("Invalid address parameter", true),                             // 0x0E
    ("Timed out waiting for echo", true),                            // 0x0F
    ("Bad received FCS", true),                                      // 0x10
    ("Response from different host link unit", true),                // 0x11
    ("No valid response code", true),                                // 0x12
    ("No FINS response packet", true),                               // 0x13
    ("", false),                                                     // 0x14
    ("Local node not part of network", true),                        // 0x15
    ("Token timeout, node number too high", true),                   // 0x16
    ("Number of transmit retries exceeded", true),                   // 0x17
    ("Max number of frames exceeded", true),                         // 0x18
    ("Node number setting error", true),                             // 0x19
    ("Node number duplication error", true),                         // 0x1A
    ("Destination node not part of network", true),                  // 0x1B
    ("No node with node number specified", true),                    // 0x1C
    ("Third node not part of network", true),                        // 0x1D
    ("Busy error, destination node busy", true),                     // 0x1E
    ("Response timeout, noise or watchdog", true),                   // 0x1F
    ("Error in communication controller", true),                     // 0x20
    ("PLC error in destination node", true),                         // 0x21
    ("", false),                                                     // 0x22
    ("Undefined command used", true),                                // 0x23
    ("Cannot process command", true),                                // 0x24
    ("Routing error", true),                                         // 0x25
    ("Command is too long", true),                                   // 0x26
    ("Command is too short", true),                                  // 0x27
    ("Specified data items differ from actual", true),               // 0x28
    ("Incorrect command format", true),                              // 0x29
    ("Incorrect header", true),                                      // 0x2A
    ("Memory area code error", true),                                // 0x2B
    ("Access size specified is wrong", true),                        // 0x2C
    ("First address is inaccessible", true),                         // 0x2D
    ("Address range exceeded", true),                                // 0x2E
    ("", false),                                                     // 0x2F
    ("Non-existent program number specified", true),                 // 0x30
    ("", false),                                                     // 0x31
    ("", false),                                                     // 0x32
    ("Data size in command is wrong", true),                         // 0x33
    ("", false),                                                     // 0x34
    ("Response block too long", true),                               // 0x35
    ("Incorrect parameter code", true),                              // 0x36
    ("Program area protected", true),                                // 0x37
    ("Registered table error", true),                                // 0x38
    ("Area read-only or write protected", true),                     // 0x39
    ("", false),                                                     // 0x3A
    ("Mode is wrong", true),                                         // 0x3B
    ("Mode is wrong (Running)", true),                               // 0x3C
    ("PLC is in Program mode", true),                                // 0x3D
    ("PLC is in Debug mode", true),                                  // 0x3E
    ("PLC is in Monitor mode", true),                                // 0x3F
    ("PLC is in Run mode", false),                                   // 0x40
    ("Specified node is not control node", true),                    // 0x41
    ("Specified memory does not exist", true),                       // 0x42
    ("No clock exists", true),                                       // 0x43
    ("Data link table error", true),                                 // 0x44
    ("Unit error", true),                                            // 0x45
    ("Command error", true),                                         // 0x46
    ("Destination address setting error", true),                     // 0x47
    ("No routing tables", true),                                     // 0x48
    ("Routing table error", true),                                   // 0x49
    ("Too many relays", true),                                       // 0x4A
    ("The header is not FINS", true),                                // 0x4B
    ("The data length is too long", true),                           // 0x4C
    ("The command is not supported", true),                          // 0x4D
    ("", false),                                                     // 0x4E
    ("", false),                                                     // 0x4F
    ("Timed out waiting for port semaphore", true),                  // 0x50
    ("", false),                                                     // 0x51
    ("", false),                                                     // 0x52
    ("", false),                                                     // 0x53
    ("", false),                                                     // 0x54
    ("", false),                                                     // 0x55
    ("", false),                                                     // 0x56
    ("", false),                                                     // 0x57
    ("", false),                                                     // 0x58
    ("", false),                                                     // 0x59
    ("", false),                                                     // 0x5A
    ("", false),                                                     // 0x5B
    ("", false),                                                     // 0x5C
    ("", false),                                                     // 0x5D
    ("All connections are in use", true),                            // 0x5E
    ("The specified node is already connected", true),               // 0x5F
    ("Attempt to access protected node from unspecified IP", true),  // 0x60
    ("The client FINS node address is out of range", true),          // 0x61
    ("Same FINS node address is being used by client and server", true), // 0x62
    ("No node addresses are available to allocate", true),           // 0x63
];

/// Returns the message associated with a response code.
///
/// Unknown codes return `"Code not found"`.
///
/// # Example
///
/// ```
/// use plc_omron::codes;
///
/// assert_eq!(codes::message(0x00), "Ok");
/// assert_eq!(codes::message(0x26), "Command is too long");
/// assert_eq!(codes::message(0xFF), "Code not found");
/// ```
pub fn message(code: u8) -> &'static str {
    match RESPONSE_CODES.get(code as usize) {
        Some((message, _)) => message,
        None => "Code not found",
    }
}

/// Returns whether a response code represents an error.
///
/// Unknown codes are treated as errors.
///
/// # Example
///
/// ```
/// use plc_omron::codes;
///
/// assert!(!codes::is_error(0x00));
/// assert!(codes::is_error(0x26));
/// assert!(codes::is_error(0xFF));
/// ```
pub fn is_error(code: u8) -> bool {
    match RESPONSE_CODES.get(code as usize) {
        Some((_, is_error)) => *is_error,
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_code() {
        assert_eq!(message(0x00), "Ok");
        assert!(!is_error(0x00));
    }

    #[test]
    fn test_known_errors() {
        assert_eq!(message(0x01), "Invalid memory address parameter");
        assert!(is_error(0x01));
        assert_eq!(message(0x26), "Command is too long");
        assert!(is_error(0x26));
        assert_eq!(message(0x63), "No node addresses are available to allocate");
        assert!(is_error(0x63));
    }

    #[test]
    fn test_run_mode_is_not_an_error() {
        assert_eq!(message(0x40), "PLC is in Run mode");
        assert!(!is_error(0x40));
    }

    #[test]
    fn test_reserved_codes_are_not_errors() {
        assert_eq!(message(0x0A), "");
        assert!(!is_error(0x0A));
        assert_eq!(message(0x5D), "");
        assert!(!is_error(0x5D));
    }

    #[test]
    fn test_unknown_code_fails_closed() {
        assert_eq!(message(0x64), "Code not found");
        assert!(is_error(0x64));
        assert_eq!(message(0xFF), "Code not found");
        assert!(is_error(0xFF));
    }
}
