// passive-reader/src/lib.rs

//! passive-reader
//!
//! Protocol engine for line-oriented passive RFID/NFC readers (HF
//! ISO15693/ISO14443A and UHF EPC Gen2): frame codec, inventory decoding,
//! link state machine, answer routing and tag operation builders.
//!
//! The crate performs no I/O of its own. A [`transport::Transport`]
//! carries frames, and the host feeds transport completions back through
//! the `on_*` methods of [`reader::Reader`].

pub mod constants;
pub mod error;
pub mod prelude;
pub mod protocol;
pub mod reader;
pub mod tag;
pub mod test_support;
pub mod transport;
pub mod types;
pub mod utils;

// Re-export common types at crate root so `crate::Error`, `crate::Result`
// and the value types are available to consumers.
pub use crate::error::*;
pub use crate::types::*;

pub use prelude::*;
