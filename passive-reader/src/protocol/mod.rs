// passive-reader/src/protocol/mod.rs

pub mod codec;
pub mod commands;
pub mod frame;
pub mod inventory;
pub mod parser;
pub mod responses;
pub mod sequence;

pub use commands::{Command, CommandCode, Route};
pub use frame::{Answer, Event, LineKind};
pub use inventory::InventoryContext;
pub use responses::Response;
pub use sequence::SequenceCounter;
