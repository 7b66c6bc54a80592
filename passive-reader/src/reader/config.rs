// passive-reader/src/reader/config.rs

use std::time::Duration;

use crate::protocol::commands::CommandCode;
use crate::types::DeviceFamily;
use crate::utils::timeout::{
    ms, DEFAULT_COMMAND_TIMEOUT_MS, DEFAULT_INVENTORY_TIMEOUT_MS, DEFAULT_MODE_CHANGE_TIMEOUT_MS,
    DEFAULT_TAG_OPERATION_TIMEOUT_MS,
};

/// Per-connection settings.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReaderConfig {
    pub command_timeout: Duration,
    pub inventory_timeout: Duration,
    pub tag_operation_timeout: Duration,
    /// Applies to each leg of a legacy transfer-mode switch.
    pub mode_change_timeout: Duration,
    /// Accept read answers whose length field is one short.
    pub odd_length_fix: bool,
    /// Family assumed for legacy devices, which skip identification.
    pub legacy_family: DeviceFamily,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            command_timeout: ms(DEFAULT_COMMAND_TIMEOUT_MS),
            inventory_timeout: ms(DEFAULT_INVENTORY_TIMEOUT_MS),
            tag_operation_timeout: ms(DEFAULT_TAG_OPERATION_TIMEOUT_MS),
            mode_change_timeout: ms(DEFAULT_MODE_CHANGE_TIMEOUT_MS),
            odd_length_fix: true,
            legacy_family: DeviceFamily::default(),
        }
    }
}

impl ReaderConfig {
    /// How long the host should wait for the answer to `code` before
    /// calling `Reader::on_timeout`.
    pub fn timeout_for(&self, code: CommandCode) -> Duration {
        if code == CommandCode::DoInventory {
            self.inventory_timeout
        } else if code.is_tag_operation() {
            self.tag_operation_timeout
        } else {
            self.command_timeout
        }
    }
}
