// passive-reader/src/prelude.rs

pub use crate::protocol::{Command, CommandCode, Response};
pub use crate::reader::{
    LinkStatus, Reader, ReaderBuilder, ReaderConfig, ReaderListener, ResponseListener,
    ZhagaListener,
};
pub use crate::tag::{EpcSimpleTag, EpcTag, Iso14443aTag, Iso15693Tag, Tag};
pub use crate::transport::{TransferMode, Transport, TransportError};
pub use crate::{
    DeviceFamily, Error, ErrorKind, ExtendedTagId, HmiTrigger, InventoryFormat, InventoryMode,
    LedSettings, Result, SoundSettings, VibrationSettings,
};

// Re-export small utilities for convenience
pub use crate::utils::{bytes_to_hex, ms, parse_hex};
