// passive-reader/src/protocol/responses/zhaga.rs

use std::convert::TryFrom;

use crate::protocol::parser::{be_u16_at, byte_at, flag_at, slice_at};
use crate::types::{HmiTrigger, LedSettings, SoundSettings, VibrationSettings};
use crate::Result;

/// RF on-time, timeout and off-time, in seconds.
pub fn decode_rf_on_off(data: &[u8]) -> Result<(u16, u16, u16)> {
    Ok((be_u16_at(data, 0)?, be_u16_at(data, 2)?, be_u16_at(data, 4)?))
}

pub fn decode_auto_off(data: &[u8]) -> Result<(bool, u16)> {
    Ok((flag_at(data, 0)?, be_u16_at(data, 1)?))
}

fn trigger(data: &[u8]) -> Result<HmiTrigger> {
    HmiTrigger::try_from(byte_at(data, 0)?)
}

pub fn decode_sound(data: &[u8]) -> Result<(HmiTrigger, SoundSettings)> {
    let t = trigger(data)?;
    let body = slice_at(data, 1, SoundSettings::ENCODED_LEN)?;
    Ok((t, SoundSettings::decode(body)?))
}

pub fn decode_led(data: &[u8]) -> Result<(HmiTrigger, LedSettings)> {
    let t = trigger(data)?;
    let body = slice_at(data, 1, LedSettings::ENCODED_LEN)?;
    Ok((t, LedSettings::decode(body)?))
}

pub fn decode_vibration(data: &[u8]) -> Result<(HmiTrigger, VibrationSettings)> {
    let t = trigger(data)?;
    let body = slice_at(data, 1, VibrationSettings::ENCODED_LEN)?;
    Ok((t, VibrationSettings::decode(body)?))
}
