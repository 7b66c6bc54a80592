// passive-reader/src/constants.rs
//! Common protocol constants used across the crate

/// Marker of a reader command frame / command answer: `$:`
pub const COMMAND_MARKER: &str = "$:";

/// Marker of a transparent (Zhaga pass-through) frame / answer: `Z:`
pub const TRANSPARENT_MARKER: &str = "Z:";

/// Marker of a plain ISO15693 tunnel frame / answer: `#:`
pub const TUNNEL_MARKER: &str = "#:";

/// Marker of an encrypted ISO15693 tunnel frame / answer: `%:`
pub const ENCRYPTED_TUNNEL_MARKER: &str = "%:";

/// Marker of an asynchronous device event line: `I:`
pub const EVENT_MARKER: &str = "I:";

/// Every marker is one character followed by a colon.
pub const MARKER_LEN: usize = 2;

/// Line terminator appended to every frame written to the transport.
pub const LINE_TERMINATOR: &str = "\r\n";

/// Minimal answer body: length(2) + sequence(2) + return code(2)
pub const ANSWER_MIN_LEN: usize = 6;

/// Minimal event body: length(2) + number(2) + event code(2) + feature code(2)
pub const EVENT_MIN_LEN: usize = 8;

/// Largest value the two-hex-digit length field can carry.
pub const MAX_LENGTH_FIELD: usize = 0xFF;

/// Return code of a successful answer.
pub const RETURN_CODE_SUCCESS: u8 = 0x00;

/// First data byte of the identification answer for HF (ISO15693/ISO14443A) readers
pub const STANDARD_HF: u8 = 0x01;

/// First data byte of the identification answer for UHF (EPC Gen2) readers
pub const STANDARD_UHF: u8 = 0x02;

/// Volts per ADC unit of the battery level answer.
pub const BATTERY_LEVEL_SCALE: f32 = 6.6 / 4096.0;

/// Milliseconds per unit of the BLE connection interval answer.
pub const CONNECTION_INTERVAL_UNIT_MS: f32 = 1.25;

/// Length of a BLE MAC address
pub const MAC_ADDRESS_LEN: usize = 6;

/// Size of one user-memory block of the reader
pub const USER_MEMORY_BLOCK_LEN: usize = 64;

/// Number of hex characters of the EPC protocol-control word
pub const PC_HEX_LEN: usize = 4;

/// Minimal inventory body (hex chars) when no RSSI suffix is present:
/// the body must be strictly longer than this.
pub const INVENTORY_MIN_BODY: usize = 4;

/// Minimal inventory body (hex chars) when an RSSI suffix is present:
/// the body must be strictly longer than this.
pub const INVENTORY_MIN_BODY_WITH_RSSI: usize = 7;

/// Separator between an inventory body and its RSSI suffix
pub const RSSI_SEPARATOR: char = ' ';
