//! Small, reusable helpers: hex conversion for the wire format and the
//! default timeout values handed to the host's timer.

pub mod hex;
pub mod timeout;

pub use self::hex::*;
pub use self::timeout::*;
