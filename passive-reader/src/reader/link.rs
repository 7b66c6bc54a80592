// passive-reader/src/reader/link.rs

//! Session status of one reader connection.

use crate::protocol::commands::CommandCode;
use crate::protocol::sequence::SequenceCounter;
use crate::types::ExtendedTagId;
use crate::{Error, Result};

/// The command waiting for its answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingCommand {
    pub code: CommandCode,
    /// Target of a tag operation
    pub tag: Option<ExtendedTagId>,
}

impl PendingCommand {
    pub fn new(code: CommandCode, tag: Option<ExtendedTagId>) -> Self {
        Self { code, tag }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum LinkStatus {
    /// No link, or the link was torn down
    #[display(fmt = "not initialized")]
    NotInitialized,
    /// Connected, waiting for the identification answer
    #[display(fmt = "uninitialized")]
    Uninitialized,
    #[display(fmt = "ready")]
    Ready,
    #[display(fmt = "pending command {}", "_0.code")]
    PendingCommand(PendingCommand),
    /// Connection or identification failed
    #[display(fmt = "error")]
    Error,
}

/// Transfer-mode handshake of legacy devices, only meaningful while
/// connected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum ModeSubstatus {
    #[display(fmt = "stream")]
    Stream,
    #[display(fmt = "setting command mode")]
    SettingCommandMode,
    #[display(fmt = "command mode active")]
    CommandModeActive,
    #[display(fmt = "setting stream mode")]
    SettingStreamMode,
}

/// Status, mode and sequence counter of a connection. All transitions go
/// through these methods.
#[derive(Debug, Clone)]
pub struct Link {
    status: LinkStatus,
    mode: ModeSubstatus,
    sequence: SequenceCounter,
}

impl Default for Link {
    fn default() -> Self {
        Self::new()
    }
}

impl Link {
    pub fn new() -> Self {
        Self {
            status: LinkStatus::NotInitialized,
            mode: ModeSubstatus::Stream,
            sequence: SequenceCounter::new(),
        }
    }

    pub fn status(&self) -> &LinkStatus {
        &self.status
    }

    pub fn mode(&self) -> ModeSubstatus {
        self.mode
    }

    pub fn set_mode(&mut self, mode: ModeSubstatus) {
        self.mode = mode;
    }

    pub fn sequence(&self) -> SequenceCounter {
        self.sequence
    }

    pub fn sequence_mut(&mut self) -> &mut SequenceCounter {
        &mut self.sequence
    }

    /// Adopt a counter that was advanced on a scratch copy.
    pub fn commit_sequence(&mut self, sequence: SequenceCounter) {
        self.sequence = sequence;
    }

    pub fn pending(&self) -> Option<&PendingCommand> {
        match &self.status {
            LinkStatus::PendingCommand(p) => Some(p),
            _ => None,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == LinkStatus::Ready
    }

    /// Fresh connection: new counter, stream mode.
    pub fn connected(&mut self, identified: bool) {
        self.sequence = SequenceCounter::new();
        self.mode = ModeSubstatus::Stream;
        self.status = if identified {
            LinkStatus::Ready
        } else {
            LinkStatus::Uninitialized
        };
    }

    /// Identification answer accepted.
    pub fn identified(&mut self) {
        self.status = LinkStatus::Ready;
    }

    pub fn fail(&mut self) {
        self.status = LinkStatus::Error;
        self.mode = ModeSubstatus::Stream;
    }

    /// Torn down; unconditional.
    pub fn reset(&mut self) {
        self.status = LinkStatus::NotInitialized;
        self.mode = ModeSubstatus::Stream;
    }

    /// Guard for command entry points.
    pub fn ensure_ready(&self) -> Result<()> {
        if self.is_ready() {
            Ok(())
        } else {
            Err(Error::WrongStatus(self.status.clone()))
        }
    }

    /// `Ready → PendingCommand`
    pub fn begin(&mut self, pending: PendingCommand) -> Result<()> {
        self.ensure_ready()?;
        self.status = LinkStatus::PendingCommand(pending);
        Ok(())
    }

    /// `PendingCommand → Ready`, handing back the completed command.
    pub fn complete(&mut self) -> Option<PendingCommand> {
        match std::mem::replace(&mut self.status, LinkStatus::Ready) {
            LinkStatus::PendingCommand(p) => {
                self.mode = ModeSubstatus::Stream;
                Some(p)
            }
            other => {
                self.status = other;
                None
            }
        }
    }
}
