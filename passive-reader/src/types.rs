// passive-reader/src/types.rs

use std::convert::TryFrom;
use std::fmt;

use crate::protocol::parser;
use crate::{Error, Result};

/// Extended tag identifier: PC‖ID for EPC tags, the bare ID otherwise.
///
/// Tag operations are keyed by this value so answers can be echoed back to
/// the caller with the identity of the tag they were issued for.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExtendedTagId(Vec<u8>);

impl ExtendedTagId {
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        crate::utils::bytes_to_hex(self.as_bytes())
    }
}

impl From<&[u8]> for ExtendedTagId {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }
}

impl fmt::Display for ExtendedTagId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Radio family of the connected reader, learned from the identification
/// answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DeviceFamily {
    /// ISO15693 / ISO14443A
    #[display(fmt = "HF")]
    Hf,
    /// EPC Gen2
    #[display(fmt = "UHF")]
    Uhf,
}

impl DeviceFamily {
    pub fn from_standard(byte: u8) -> Option<Self> {
        match byte {
            crate::constants::STANDARD_HF => Some(Self::Hf),
            crate::constants::STANDARD_UHF => Some(Self::Uhf),
            _ => None,
        }
    }
}

impl Default for DeviceFamily {
    fn default() -> Self {
        // Legacy readers are all HF units.
        DeviceFamily::Hf
    }
}

/// How a UHF reader reports inventoried tags.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InventoryFormat {
    /// Only the EPC identifier
    #[display(fmt = "EPC only")]
    EpcOnly = 0x01,
    /// Four hex digits of PC followed by the EPC identifier
    #[display(fmt = "EPC and PC")]
    EpcAndPc = 0x02,
}

impl TryFrom<u8> for InventoryFormat {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0x01 => Ok(Self::EpcOnly),
            0x02 => Ok(Self::EpcAndPc),
            other => Err(Error::FrameFormat(format!(
                "unknown inventory format {:#04x}",
                other
            ))),
        }
    }
}

impl Default for InventoryFormat {
    fn default() -> Self {
        InventoryFormat::EpcAndPc
    }
}

/// Whether inventories run on demand or continuously.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InventoryMode {
    #[display(fmt = "normal")]
    Normal = 0x00,
    #[display(fmt = "scan")]
    Scan = 0x01,
}

impl TryFrom<u8> for InventoryMode {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0x00 => Ok(Self::Normal),
            0x01 => Ok(Self::Scan),
            other => Err(Error::FrameFormat(format!(
                "unknown inventory mode {:#04x}",
                other
            ))),
        }
    }
}

impl Default for InventoryMode {
    fn default() -> Self {
        InventoryMode::Normal
    }
}

/// Situation a Zhaga HMI feedback (sound, LED, vibration) is bound to.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HmiTrigger {
    #[display(fmt = "inventory")]
    Inventory = 0x00,
    #[display(fmt = "command")]
    Command = 0x01,
    #[display(fmt = "error")]
    Error = 0x02,
}

impl TryFrom<u8> for HmiTrigger {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0x00 => Ok(Self::Inventory),
            0x01 => Ok(Self::Command),
            0x02 => Ok(Self::Error),
            other => Err(Error::FrameFormat(format!(
                "unknown HMI trigger {:#04x}",
                other
            ))),
        }
    }
}

/// Buzzer pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SoundSettings {
    /// Start frequency in Hz (40–20000)
    pub frequency: u16,
    /// Frequency step per repetition in Hz
    pub step: u16,
    pub duration_ms: u16,
    pub interval_ms: u16,
    pub repetition: u16,
}

impl SoundSettings {
    pub const ENCODED_LEN: usize = 10;

    pub fn validate(&self) -> Result<()> {
        if !(40..=20000).contains(&self.frequency) {
            return Err(Error::InvalidParameter(format!(
                "sound frequency {} out of range 40..=20000",
                self.frequency
            )));
        }
        if self.duration_ms == 0 {
            return Err(Error::InvalidParameter("sound duration must be non-zero".into()));
        }
        Ok(())
    }

    pub fn encode(&self) -> [u8; Self::ENCODED_LEN] {
        let mut out = [0u8; Self::ENCODED_LEN];
        out[0..2].copy_from_slice(&self.frequency.to_be_bytes());
        out[2..4].copy_from_slice(&self.step.to_be_bytes());
        out[4..6].copy_from_slice(&self.duration_ms.to_be_bytes());
        out[6..8].copy_from_slice(&self.interval_ms.to_be_bytes());
        out[8..10].copy_from_slice(&self.repetition.to_be_bytes());
        out
    }

    pub fn decode(data: &[u8]) -> Result<Self> {
        parser::ensure_len(data, Self::ENCODED_LEN)?;
        Ok(Self {
            frequency: parser::be_u16_at(data, 0)?,
            step: parser::be_u16_at(data, 2)?,
            duration_ms: parser::be_u16_at(data, 4)?,
            interval_ms: parser::be_u16_at(data, 6)?,
            repetition: parser::be_u16_at(data, 8)?,
        })
    }
}

/// LED pattern; `color` is an RGB bit mask (bit 0 red, bit 1 green, bit 2 blue).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LedSettings {
    pub color: u8,
    pub on_time_ms: u16,
    pub off_time_ms: u16,
    pub repetition: u8,
}

impl LedSettings {
    pub const ENCODED_LEN: usize = 6;

    pub fn validate(&self) -> Result<()> {
        if self.color > 0x07 {
            return Err(Error::InvalidParameter(format!(
                "LED color mask {:#04x} out of range",
                self.color
            )));
        }
        Ok(())
    }

    pub fn encode(&self) -> [u8; Self::ENCODED_LEN] {
        let on = self.on_time_ms.to_be_bytes();
        let off = self.off_time_ms.to_be_bytes();
        [self.color, on[0], on[1], off[0], off[1], self.repetition]
    }

    pub fn decode(data: &[u8]) -> Result<Self> {
        parser::ensure_len(data, Self::ENCODED_LEN)?;
        Ok(Self {
            color: parser::byte_at(data, 0)?,
            on_time_ms: parser::be_u16_at(data, 1)?,
            off_time_ms: parser::be_u16_at(data, 3)?,
            repetition: parser::byte_at(data, 5)?,
        })
    }
}

/// Vibration motor pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VibrationSettings {
    pub on_time_ms: u16,
    pub off_time_ms: u16,
    pub repetition: u8,
}

impl VibrationSettings {
    pub const ENCODED_LEN: usize = 5;

    pub fn encode(&self) -> [u8; Self::ENCODED_LEN] {
        let on = self.on_time_ms.to_be_bytes();
        let off = self.off_time_ms.to_be_bytes();
        [on[0], on[1], off[0], off[1], self.repetition]
    }

    pub fn decode(data: &[u8]) -> Result<Self> {
        parser::ensure_len(data, Self::ENCODED_LEN)?;
        Ok(Self {
            on_time_ms: parser::be_u16_at(data, 0)?,
            off_time_ms: parser::be_u16_at(data, 2)?,
            repetition: parser::byte_at(data, 4)?,
        })
    }
}

/// A configuration value the engine depends on, split into the value the
/// device has confirmed and the one sent but not yet acknowledged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Staged<T> {
    current: T,
    proposed: Option<T>,
}

impl<T: Copy> Staged<T> {
    pub fn new(current: T) -> Self {
        Self {
            current,
            proposed: None,
        }
    }

    pub fn current(&self) -> T {
        self.current
    }

    pub fn proposed(&self) -> Option<T> {
        self.proposed
    }

    pub fn propose(&mut self, value: T) {
        self.proposed = Some(value);
    }

    /// Apply the proposed value, if any, and return the current one.
    pub fn commit(&mut self) -> T {
        if let Some(value) = self.proposed.take() {
            self.current = value;
        }
        self.current
    }

    pub fn discard(&mut self) {
        self.proposed = None;
    }

    /// Overwrite the confirmed value with one reported by the device.
    pub fn confirm(&mut self, value: T) {
        self.current = value;
        self.proposed = None;
    }
}
