// passive-reader/src/error.rs

use thiserror::Error;

use crate::reader::link::LinkStatus;
use crate::transport::TransportError;

/// Flat result-code space shared by all three listener families.
///
/// The space is partitioned by numeric range; see [`ErrorKind::of`].
pub mod codes {
    /// Operation completed successfully.
    pub const NO_ERROR: u16 = 0x0000;

    /// Upper bound of the device return codes passed through verbatim for
    /// reader-level commands.
    pub const DEVICE_ERROR_LAST: u16 = 0x00FF;

    /// A command was issued while the link was not `Ready`.
    pub const WRONG_STATUS_ERROR: u16 = 0x0100;
    /// A caller-supplied value was out of range.
    pub const WRONG_PARAMETER_ERROR: u16 = 0x0101;
    /// The answer line was malformed (length field, payload layout, type).
    pub const ANSWER_WRONG_FORMAT_ERROR: u16 = 0x0102;
    /// The answer carried a sequence number other than the one expected.
    pub const ANSWER_MISMATCH_ERROR: u16 = 0x0103;
    /// The identification answer carried a non-zero return code.
    pub const DEVICE_RETURNED_ERROR: u16 = 0x0104;
    /// The command is not available on the connected device family.
    pub const COMMAND_NOT_SUPPORTED_ERROR: u16 = 0x0105;
    /// The transport could not be switched back to stream mode after a
    /// legacy command.
    pub const MODE_CHANGE_FAILED_ERROR: u16 = 0x0106;

    pub const CONNECT_ERROR: u16 = 0x0200;
    pub const CONNECT_TIMEOUT_ERROR: u16 = 0x0201;
    pub const WRITE_ERROR: u16 = 0x0202;
    pub const WRITE_TIMEOUT_ERROR: u16 = 0x0203;
    pub const READ_ERROR: u16 = 0x0204;
    pub const READ_TIMEOUT_ERROR: u16 = 0x0205;
    pub const MODE_ERROR: u16 = 0x0206;
    pub const MODE_TIMEOUT_ERROR: u16 = 0x0207;
    pub const SERVICE_DISCOVERY_ERROR: u16 = 0x0208;

    /// Tag-operation errors are `TAG_ERROR_BASE + device return code`.
    pub const TAG_ERROR_BASE: u16 = 0x0300;
    pub const TAG_NOT_RESPONDING_ERROR: u16 = TAG_ERROR_BASE + 0x01;
    pub const TAG_MEMORY_LOCKED_ERROR: u16 = TAG_ERROR_BASE + 0x02;
    pub const TAG_INVALID_MEMORY_ERROR: u16 = TAG_ERROR_BASE + 0x03;
    pub const TAG_WRONG_PASSWORD_ERROR: u16 = TAG_ERROR_BASE + 0x04;
    pub const TAG_INSUFFICIENT_POWER_ERROR: u16 = TAG_ERROR_BASE + 0x05;
    pub const TAG_ERROR_LAST: u16 = 0x03FF;
}

/// Which part of the stack a flat result code originates from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum ErrorKind {
    #[display(fmt = "success")]
    Success,
    #[display(fmt = "device")]
    Device,
    #[display(fmt = "protocol")]
    Protocol,
    #[display(fmt = "transport")]
    Transport,
    #[display(fmt = "tag")]
    Tag,
    #[display(fmt = "unknown")]
    Unknown,
}

impl ErrorKind {
    /// Classify a result code by its numeric range.
    pub fn of(code: u16) -> Self {
        match code {
            codes::NO_ERROR => Self::Success,
            0x0001..=codes::DEVICE_ERROR_LAST => Self::Device,
            0x0100..=0x01FF => Self::Protocol,
            0x0200..=0x02FF => Self::Transport,
            codes::TAG_ERROR_BASE..=codes::TAG_ERROR_LAST => Self::Tag,
            _ => Self::Unknown,
        }
    }
}

/// Common error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("reader is not ready: status is {0}")]
    WrongStatus(LinkStatus),

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("invalid length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("frame format error: {0}")]
    FrameFormat(String),

    #[error("sequence mismatch: expected {expected:#04x}, got {actual:#04x}")]
    SequenceMismatch { expected: u8, actual: u8 },

    #[error("device returned error code {0:#04x}")]
    DeviceStatus(u8),

    #[error("identification answer carried error code {0:#04x}")]
    DeviceReturned(u8),

    #[error("tag operation failed with device code {0:#04x}")]
    TagStatus(u8),

    #[error("answer does not match the pending command: {0}")]
    UnexpectedAnswer(String),

    #[error("could not switch the transport back to stream mode")]
    ModeChangeFailed,

    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),
}

impl Error {
    /// Flat result code reported to listeners for this error.
    pub fn code(&self) -> u16 {
        match self {
            Error::WrongStatus(_) => codes::WRONG_STATUS_ERROR,
            Error::InvalidParameter(_) => codes::WRONG_PARAMETER_ERROR,
            Error::InvalidLength { .. } | Error::FrameFormat(_) => {
                codes::ANSWER_WRONG_FORMAT_ERROR
            }
            Error::SequenceMismatch { .. } => codes::ANSWER_MISMATCH_ERROR,
            Error::DeviceStatus(rc) => *rc as u16,
            Error::DeviceReturned(_) => codes::DEVICE_RETURNED_ERROR,
            Error::TagStatus(rc) => codes::TAG_ERROR_BASE + *rc as u16,
            Error::UnexpectedAnswer(_) => codes::ANSWER_MISMATCH_ERROR,
            Error::ModeChangeFailed => codes::MODE_CHANGE_FAILED_ERROR,
            Error::Transport(e) => e.code(),
            Error::UnsupportedOperation(_) => codes::COMMAND_NOT_SUPPORTED_ERROR,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
