// passive-reader/src/transport/traits.rs

use thiserror::Error;

use crate::error::codes;

/// Failures reported by the low-level link, remapped into the transport
/// range of the result-code space.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportError {
    #[error("connection failed")]
    ConnectFailed,
    #[error("connection timed out")]
    ConnectTimeout,
    #[error("write failed")]
    WriteFailed,
    #[error("write timed out")]
    WriteTimeout,
    #[error("read failed")]
    ReadFailed,
    #[error("read timed out")]
    ReadTimeout,
    #[error("transfer mode change failed")]
    ModeChangeFailed,
    #[error("transfer mode change timed out")]
    ModeChangeTimeout,
    #[error("service discovery failed")]
    ServiceDiscoveryFailed,
}

impl TransportError {
    pub fn code(&self) -> u16 {
        match self {
            TransportError::ConnectFailed => codes::CONNECT_ERROR,
            TransportError::ConnectTimeout => codes::CONNECT_TIMEOUT_ERROR,
            TransportError::WriteFailed => codes::WRITE_ERROR,
            TransportError::WriteTimeout => codes::WRITE_TIMEOUT_ERROR,
            TransportError::ReadFailed => codes::READ_ERROR,
            TransportError::ReadTimeout => codes::READ_TIMEOUT_ERROR,
            TransportError::ModeChangeFailed => codes::MODE_ERROR,
            TransportError::ModeChangeTimeout => codes::MODE_TIMEOUT_ERROR,
            TransportError::ServiceDiscoveryFailed => codes::SERVICE_DISCOVERY_ERROR,
        }
    }

    pub fn is_mode_change(&self) -> bool {
        matches!(
            self,
            TransportError::ModeChangeFailed | TransportError::ModeChangeTimeout
        )
    }
}

pub type TransportResult<T> = std::result::Result<T, TransportError>;

/// Operating mode of the transport's data channel. Legacy readers only
/// accept some configuration commands in `Command` mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum TransferMode {
    #[display(fmt = "stream")]
    Stream,
    #[display(fmt = "command")]
    Command,
}

/// Transport trait abstracts the link away from protocol logic.
///
/// Writes and mode changes are fire-and-forget from the engine's point of
/// view: an `Err` means the request could not even be issued. Completions
/// that arrive later are reported by calling the matching `Reader::on_*`
/// method. Implementations must not call back into the reader from inside
/// `write` or `set_transfer_mode`. `disconnect` runs without the reader's
/// lock and may report `Reader::on_disconnected()` directly.
pub trait Transport: Send {
    /// Send one frame. The line terminator is already appended.
    fn write(&mut self, frame: &str) -> TransportResult<()>;

    /// Request a transfer mode change.
    fn set_transfer_mode(&mut self, mode: TransferMode) -> TransportResult<()>;

    /// Tear down the link. May call `Reader::on_disconnected()` before
    /// returning.
    fn disconnect(&mut self) -> TransportResult<()>;

    /// Whether the connected device is the legacy variant that needs
    /// transfer mode switches and skips identification.
    fn is_legacy(&self) -> bool {
        false
    }
}
