// passive-reader/src/protocol/responses/reader.rs

use crate::constants::{BATTERY_LEVEL_SCALE, CONNECTION_INTERVAL_UNIT_MS, MAC_ADDRESS_LEN};
use crate::protocol::parser::{array_at, be_u16_at, byte_at, ensure_len, flag_at};
use crate::types::DeviceFamily;
use crate::{Error, Result};

/// Firmware version byte: high nibble major, low nibble minor.
pub fn decode_firmware_version(data: &[u8]) -> Result<(u8, u8)> {
    let b = byte_at(data, 0)?;
    Ok((b >> 4, b & 0x0F))
}

/// Battery level in volts.
pub fn decode_battery_level(data: &[u8]) -> Result<f32> {
    Ok(be_u16_at(data, 0)? as f32 * BATTERY_LEVEL_SCALE)
}

pub fn decode_rf_power(data: &[u8]) -> Result<(u8, u8)> {
    Ok((byte_at(data, 0)?, byte_at(data, 1)?))
}

/// `(value, permanent)` pairs used by the ISO15693 extension flag and
/// bitrate answers.
pub fn decode_value_and_permanence(data: &[u8]) -> Result<(u8, bool)> {
    Ok((byte_at(data, 0)?, flag_at(data, 1)?))
}

/// Minimum and maximum connection interval, in milliseconds.
pub fn decode_connection_interval(data: &[u8]) -> Result<(f32, f32)> {
    let min = be_u16_at(data, 0)? as f32 * CONNECTION_INTERVAL_UNIT_MS;
    let max = be_u16_at(data, 2)? as f32 * CONNECTION_INTERVAL_UNIT_MS;
    Ok((min, max))
}

/// Negotiated connection interval (ms) and MTU.
pub fn decode_connection_interval_and_mtu(data: &[u8]) -> Result<(f32, u16)> {
    let interval = be_u16_at(data, 0)? as f32 * CONNECTION_INTERVAL_UNIT_MS;
    Ok((interval, be_u16_at(data, 2)?))
}

pub fn decode_mac_address(data: &[u8]) -> Result<[u8; MAC_ADDRESS_LEN]> {
    array_at(data, 0)
}

/// Reader name. Trailing NUL padding is dropped.
pub fn decode_name(data: &[u8]) -> Result<String> {
    let end = data.iter().position(|&b| b == 0).unwrap_or(data.len());
    let raw = &data[..end];
    if !raw.is_ascii() {
        return Err(Error::FrameFormat("reader name is not ASCII".into()));
    }
    Ok(String::from_utf8_lossy(raw).into_owned())
}

pub fn decode_standard(data: &[u8]) -> Result<DeviceFamily> {
    let b = byte_at(data, 0)?;
    DeviceFamily::from_standard(b)
        .ok_or_else(|| Error::FrameFormat(format!("unknown standard {:#04x}", b)))
}

pub fn decode_user_memory(data: &[u8]) -> Result<Vec<u8>> {
    ensure_len(data, 1)?;
    Ok(data.to_vec())
}
