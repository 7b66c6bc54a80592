// passive-reader/src/reader/mod.rs

pub mod builder;
mod commands;
pub mod config;
pub mod handle;
pub mod link;
pub mod listener;
pub mod router;
mod zhaga;

pub use builder::ReaderBuilder;
pub use config::ReaderConfig;
pub use handle::Reader;
pub use link::{LinkStatus, ModeSubstatus, PendingCommand};
pub use listener::{ReaderListener, ResponseListener, ZhagaListener};
