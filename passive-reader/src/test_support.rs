// passive-reader/src/test_support.rs

//! Test support helpers intended for use by unit and integration tests.
//!
//! These helpers centralize reader setup over a [`MockTransport`] and a
//! listener that records every callback as a short string, so tests
//! across the crate and the tests/ directory can assert on the exact
//! sequence of notifications.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use crate::protocol::commands::CommandCode;
use crate::protocol::frame::Event;
use crate::reader::router::Listeners;
use crate::reader::{Reader, ReaderConfig, ReaderListener, ResponseListener, ZhagaListener};
use crate::tag::Tag;
use crate::transport::MockTransport;
use crate::types::{
    DeviceFamily, ExtendedTagId, HmiTrigger, InventoryFormat, InventoryMode, LedSettings,
    SoundSettings, VibrationSettings,
};
use crate::utils::bytes_to_hex;

/// Listener recording every callback it receives, for all three listener
/// families. Reader callbacks are prefixed `reader:`, device-feature
/// callbacks `zhaga:` and tag callbacks `tag:`.
#[doc(hidden)]
#[derive(Debug, Default)]
pub struct RecordingListener {
    events: Mutex<Vec<String>>,
}

impl RecordingListener {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn clear(&self) {
        self.events.lock().unwrap_or_else(|e| e.into_inner()).clear();
    }

    fn push(&self, event: String) {
        self.events
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(event);
    }
}

fn opt_hex(data: Option<&[u8]>) -> Option<String> {
    data.map(bytes_to_hex)
}

impl ReaderListener for RecordingListener {
    fn connection_success_event(&self) {
        self.push("reader:connected".into());
    }
    fn connection_failure_event(&self, error: u16) {
        self.push(format!("reader:connection_failure {:#06x}", error));
    }
    fn disconnection_event(&self) {
        self.push("reader:disconnected".into());
    }
    fn result_event(&self, command: CommandCode, error: u16) {
        self.push(format!("reader:result {} {:#06x}", command, error));
    }
    fn shutdown_time_event(&self, seconds: u16) {
        self.push(format!("reader:shutdown_time {}", seconds));
    }
    fn rf_power_event(&self, level: u8, mode: u8) {
        self.push(format!("reader:rf_power {} {}", level, mode));
    }
    fn inventory_mode_event(&self, mode: InventoryMode) {
        self.push(format!("reader:inventory_mode {:?}", mode));
    }
    fn inventory_format_event(&self, format: InventoryFormat) {
        self.push(format!("reader:inventory_format {:?}", format));
    }
    fn iso15693_option_bits_event(&self, bits: u8) {
        self.push(format!("reader:iso15693_option_bits {:#04x}", bits));
    }
    fn iso15693_extension_flag_event(&self, flag: bool, permanent: bool) {
        self.push(format!("reader:iso15693_extension_flag {} {}", flag, permanent));
    }
    fn iso15693_bitrate_event(&self, bitrate: u8, permanent: bool) {
        self.push(format!("reader:iso15693_bitrate {} {}", bitrate, permanent));
    }
    fn epc_frequency_event(&self, frequency: u8) {
        self.push(format!("reader:epc_frequency {}", frequency));
    }
    fn rf_for_iso15693_tunnel_event(&self, delay: u8, timeout: u8) {
        self.push(format!("reader:rf_for_iso15693_tunnel {} {}", delay, timeout));
    }
    fn firmware_version_event(&self, major: u8, minor: u8) {
        self.push(format!("reader:firmware {}.{}", major, minor));
    }
    fn battery_status_event(&self, status: u8) {
        self.push(format!("reader:battery_status {}", status));
    }
    fn battery_level_event(&self, volts: f32) {
        self.push(format!("reader:battery_level {:.2}", volts));
    }
    fn tunnel_event(&self, data: &[u8]) {
        self.push(format!("reader:tunnel {}", bytes_to_hex(data)));
    }
    fn security_level_event(&self, level: u8) {
        self.push(format!("reader:security_level {}", level));
    }
    fn name_event(&self, name: &str) {
        self.push(format!("reader:name {}", name));
    }
    fn advertising_interval_event(&self, interval_ms: u16) {
        self.push(format!("reader:advertising_interval {}", interval_ms));
    }
    fn ble_power_event(&self, power: u8) {
        self.push(format!("reader:ble_power {}", power));
    }
    fn connection_interval_event(&self, min_ms: f32, max_ms: f32) {
        self.push(format!("reader:connection_interval {} {}", min_ms, max_ms));
    }
    fn connection_interval_and_mtu_event(&self, interval_ms: f32, mtu: u16) {
        self.push(format!("reader:connection_interval_and_mtu {} {}", interval_ms, mtu));
    }
    fn mac_address_event(&self, mac: &[u8; 6]) {
        self.push(format!("reader:mac {}", bytes_to_hex(mac)));
    }
    fn slave_latency_event(&self, latency: u16) {
        self.push(format!("reader:slave_latency {}", latency));
    }
    fn supervision_timeout_event(&self, timeout_ms: u16) {
        self.push(format!("reader:supervision_timeout {}", timeout_ms));
    }
    fn ble_firmware_version_event(&self, major: u8, minor: u8) {
        self.push(format!("reader:ble_firmware {}.{}", major, minor));
    }
    fn user_memory_event(&self, data: &[u8]) {
        self.push(format!("reader:user_memory {}", bytes_to_hex(data)));
    }
}

impl ZhagaListener for RecordingListener {
    fn connection_success_event(&self) {
        self.push("zhaga:connected".into());
    }
    fn connection_failure_event(&self, error: u16) {
        self.push(format!("zhaga:connection_failure {:#06x}", error));
    }
    fn disconnection_event(&self) {
        self.push("zhaga:disconnected".into());
    }
    fn result_event(&self, command: CommandCode, error: u16) {
        self.push(format!("zhaga:result {} {:#06x}", command, error));
    }
    fn rf_on_off_event(&self, on_time_s: u16, timeout_s: u16, off_time_s: u16) {
        self.push(format!("zhaga:rf_on_off {} {} {}", on_time_s, timeout_s, off_time_s));
    }
    fn auto_off_event(&self, enabled: bool, timeout_s: u16) {
        self.push(format!("zhaga:auto_off {} {}", enabled, timeout_s));
    }
    fn sound_event(&self, trigger: HmiTrigger, settings: &SoundSettings) {
        self.push(format!(
            "zhaga:sound {:?} {}",
            trigger,
            bytes_to_hex(&settings.encode())
        ));
    }
    fn led_event(&self, trigger: HmiTrigger, settings: &LedSettings) {
        self.push(format!(
            "zhaga:led {:?} {}",
            trigger,
            bytes_to_hex(&settings.encode())
        ));
    }
    fn vibration_event(&self, trigger: HmiTrigger, settings: &VibrationSettings) {
        self.push(format!(
            "zhaga:vibration {:?} {}",
            trigger,
            bytes_to_hex(&settings.encode())
        ));
    }
    fn activated_button_event(&self, button: u8) {
        self.push(format!("zhaga:activated_button {}", button));
    }
    fn transparent_event(&self, data: &[u8]) {
        self.push(format!("zhaga:transparent {}", bytes_to_hex(data)));
    }
    fn device_event(&self, event: &Event) {
        self.push(format!(
            "zhaga:event {:02X} {:02X} {:02X} {}",
            event.number,
            event.event_code,
            event.feature_code,
            bytes_to_hex(&event.data)
        ));
    }
}

impl ResponseListener for RecordingListener {
    fn result_event(&self, command: CommandCode, error: u16) {
        self.push(format!("tag:result {} {:#06x}", command, error));
    }
    fn inventory_event(&self, tag: &Tag) {
        self.push(format!("tag:inventory {} {:?}", tag.extended_id(), tag.rssi()));
    }
    fn read_event(&self, tag: &ExtendedTagId, error: u16, data: Option<&[u8]>) {
        self.push(format!("tag:read {} {:#06x} {:?}", tag, error, opt_hex(data)));
    }
    fn write_event(&self, tag: &ExtendedTagId, error: u16) {
        self.push(format!("tag:write {} {:#06x}", tag, error));
    }
    fn lock_event(&self, tag: &ExtendedTagId, error: u16) {
        self.push(format!("tag:lock {} {:#06x}", tag, error));
    }
    fn kill_event(&self, tag: &ExtendedTagId, error: u16) {
        self.push(format!("tag:kill {} {:#06x}", tag, error));
    }
    fn write_id_event(&self, tag: &ExtendedTagId, error: u16) {
        self.push(format!("tag:write_id {} {:#06x}", tag, error));
    }
    fn read_tid_event(&self, tag: &ExtendedTagId, error: u16, data: Option<&[u8]>) {
        self.push(format!("tag:read_tid {} {:#06x} {:?}", tag, error, opt_hex(data)));
    }
    fn write_password_event(&self, tag: &ExtendedTagId, error: u16) {
        self.push(format!("tag:write_password {} {:#06x}", tag, error));
    }
}

/// A `$:` answer line with a correct length field.
#[doc(hidden)]
pub fn answer_line(sequence: u8, return_code: u8, data: &[u8]) -> String {
    let body = format!("{:02X}{:02X}{}", sequence, return_code, bytes_to_hex(data));
    format!("$:{:02X}{}", body.len(), body)
}

/// An `I:` event line with a correct length field.
#[doc(hidden)]
pub fn event_line(number: u8, event_code: u8, feature_code: u8, data: &[u8]) -> String {
    let body = format!(
        "{:02X}{:02X}{:02X}{}",
        number,
        event_code,
        feature_code,
        bytes_to_hex(data)
    );
    format!("I:{:02X}{}", body.len(), body)
}

/// Build a reader over a fresh MockTransport with one RecordingListener
/// registered for all three listener families. The reader is not
/// connected yet.
#[doc(hidden)]
pub fn mock_reader(mock: &MockTransport) -> (Reader, Arc<RecordingListener>) {
    reader_with_config(mock, ReaderConfig::default())
}

fn reader_with_config(mock: &MockTransport, config: ReaderConfig) -> (Reader, Arc<RecordingListener>) {
    let rec = RecordingListener::new();
    let listeners = Listeners {
        reader: Some(rec.clone()),
        zhaga: Some(rec.clone()),
        response: Some(rec.clone()),
    };
    (Reader::new(Box::new(mock.clone()), listeners, config), rec)
}

/// Connect and identify a reader of `family`. On return the
/// identification frame is the only one written, the next frame carries
/// sequence 1, and the listener has seen the connection events.
#[doc(hidden)]
pub fn ready_reader(family: DeviceFamily) -> (Reader, MockTransport, Arc<RecordingListener>) {
    let mock = MockTransport::new();
    let (reader, rec) = mock_reader(&mock);
    reader.on_connected();
    let standard = match family {
        DeviceFamily::Hf => crate::constants::STANDARD_HF,
        DeviceFamily::Uhf => crate::constants::STANDARD_UHF,
    };
    reader.on_data_received(&answer_line(0x00, 0x00, &[standard]));
    (reader, mock, rec)
}

/// Connect a reader over a legacy MockTransport. Legacy readers skip
/// identification and use the configured family.
#[doc(hidden)]
pub fn legacy_reader(family: DeviceFamily) -> (Reader, MockTransport, Arc<RecordingListener>) {
    let mock = MockTransport::legacy();
    let config = ReaderConfig {
        legacy_family: family,
        ..ReaderConfig::default()
    };
    let (reader, rec) = reader_with_config(&mock, config);
    reader.on_connected();
    (reader, mock, rec)
}
