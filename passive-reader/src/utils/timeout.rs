//! Timeout defaults used by [`ReaderConfig`](crate::reader::ReaderConfig).
//!
//! The engine never sleeps or arms timers itself; these values tell the
//! host how long to wait before calling `Reader::on_timeout()`.

use std::time::Duration;

/// Default wait for the answer of a reader-level command.
pub const DEFAULT_COMMAND_TIMEOUT_MS: u64 = 2000;

/// Default wait for the end of an inventory round.
pub const DEFAULT_INVENTORY_TIMEOUT_MS: u64 = 5000;

/// Default wait for the answer of a tag memory operation.
pub const DEFAULT_TAG_OPERATION_TIMEOUT_MS: u64 = 3000;

/// Default wait for a transport transfer-mode switch.
pub const DEFAULT_MODE_CHANGE_TIMEOUT_MS: u64 = 1000;

/// Convert milliseconds to Duration.
pub fn ms(ms: u64) -> Duration {
    Duration::from_millis(ms)
}
