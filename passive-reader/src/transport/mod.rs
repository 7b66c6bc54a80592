// passive-reader/src/transport/mod.rs

pub mod mock;
pub mod traits;

pub use mock::MockTransport;
pub use traits::{TransferMode, Transport, TransportError, TransportResult};
