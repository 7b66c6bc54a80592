// passive-reader/src/reader/listener.rs

//! Callback interfaces through which command outcomes are reported.
//!
//! Every method has an empty default so implementors only override what
//! they care about. `error` arguments are flat result codes from
//! [`crate::error::codes`]; `0` means success.

use crate::protocol::commands::CommandCode;
use crate::protocol::frame::Event;
use crate::tag::Tag;
use crate::types::{
    ExtendedTagId, HmiTrigger, InventoryFormat, InventoryMode, LedSettings, SoundSettings,
    VibrationSettings,
};

/// Reader configuration and status callbacks.
#[allow(unused_variables)]
pub trait ReaderListener: Send + Sync {
    fn connection_success_event(&self) {}
    fn connection_failure_event(&self, error: u16) {}
    fn disconnection_event(&self) {}

    /// Outcome of a command without a typed result, or of any failed
    /// command.
    fn result_event(&self, command: CommandCode, error: u16) {}

    fn shutdown_time_event(&self, seconds: u16) {}
    fn rf_power_event(&self, level: u8, mode: u8) {}
    fn inventory_mode_event(&self, mode: InventoryMode) {}
    fn inventory_format_event(&self, format: InventoryFormat) {}
    fn iso15693_option_bits_event(&self, bits: u8) {}
    fn iso15693_extension_flag_event(&self, flag: bool, permanent: bool) {}
    fn iso15693_bitrate_event(&self, bitrate: u8, permanent: bool) {}
    fn epc_frequency_event(&self, frequency: u8) {}
    fn rf_for_iso15693_tunnel_event(&self, delay: u8, timeout: u8) {}
    fn firmware_version_event(&self, major: u8, minor: u8) {}
    fn battery_status_event(&self, status: u8) {}
    fn battery_level_event(&self, volts: f32) {}
    fn tunnel_event(&self, data: &[u8]) {}
    fn security_level_event(&self, level: u8) {}
    fn name_event(&self, name: &str) {}
    fn advertising_interval_event(&self, interval_ms: u16) {}
    fn ble_power_event(&self, power: u8) {}
    fn connection_interval_event(&self, min_ms: f32, max_ms: f32) {}
    fn connection_interval_and_mtu_event(&self, interval_ms: f32, mtu: u16) {}
    fn mac_address_event(&self, mac: &[u8; 6]) {}
    fn slave_latency_event(&self, latency: u16) {}
    fn supervision_timeout_event(&self, timeout_ms: u16) {}
    fn ble_firmware_version_event(&self, major: u8, minor: u8) {}
    fn user_memory_event(&self, data: &[u8]) {}
}

/// Device-feature ("Zhaga") callbacks.
#[allow(unused_variables)]
pub trait ZhagaListener: Send + Sync {
    fn connection_success_event(&self) {}
    fn connection_failure_event(&self, error: u16) {}
    fn disconnection_event(&self) {}

    fn result_event(&self, command: CommandCode, error: u16) {}

    fn rf_on_off_event(&self, on_time_s: u16, timeout_s: u16, off_time_s: u16) {}
    fn auto_off_event(&self, enabled: bool, timeout_s: u16) {}
    fn sound_event(&self, trigger: HmiTrigger, settings: &SoundSettings) {}
    fn led_event(&self, trigger: HmiTrigger, settings: &LedSettings) {}
    fn vibration_event(&self, trigger: HmiTrigger, settings: &VibrationSettings) {}
    fn activated_button_event(&self, button: u8) {}
    fn transparent_event(&self, data: &[u8]) {}
    /// Asynchronous `I:` event from the device.
    fn device_event(&self, event: &Event) {}
}

/// Inventory and tag operation callbacks.
#[allow(unused_variables)]
pub trait ResponseListener: Send + Sync {
    /// Outcome of `do_inventory`; the tags themselves arrive through
    /// `inventory_event`.
    fn result_event(&self, command: CommandCode, error: u16) {}
    fn inventory_event(&self, tag: &Tag) {}

    fn read_event(&self, tag: &ExtendedTagId, error: u16, data: Option<&[u8]>) {}
    fn write_event(&self, tag: &ExtendedTagId, error: u16) {}
    fn lock_event(&self, tag: &ExtendedTagId, error: u16) {}
    fn kill_event(&self, tag: &ExtendedTagId, error: u16) {}
    fn write_id_event(&self, tag: &ExtendedTagId, error: u16) {}
    fn read_tid_event(&self, tag: &ExtendedTagId, error: u16, data: Option<&[u8]>) {}
    fn write_password_event(&self, tag: &ExtendedTagId, error: u16) {}
}
