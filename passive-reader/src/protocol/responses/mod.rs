// passive-reader/src/protocol/responses/mod.rs

pub mod reader;
pub mod zhaga;

use std::convert::TryFrom;

use crate::constants::MAC_ADDRESS_LEN;
use crate::protocol::commands::{CommandCode, TagOperation};
use crate::protocol::parser::{be_u16_at, byte_at};
use crate::types::{
    DeviceFamily, HmiTrigger, InventoryFormat, InventoryMode, LedSettings, SoundSettings,
    VibrationSettings,
};

/// Typed payload of a successful answer. Per-family decoders live in
/// `protocol::responses::<family>.rs` and are dispatched here.
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    /// Successful answer without a payload worth decoding
    Ack,
    ShutdownTime(u16),
    RfPower { level: u8, mode: u8 },
    InventoryMode(InventoryMode),
    InventoryFormat(InventoryFormat),
    Iso15693OptionBits(u8),
    Iso15693ExtensionFlag { flag: bool, permanent: bool },
    Iso15693Bitrate { bitrate: u8, permanent: bool },
    EpcFrequency(u8),
    RfForIso15693Tunnel { delay: u8, timeout: u8 },
    FirmwareVersion { major: u8, minor: u8 },
    BatteryStatus(u8),
    /// Volts
    BatteryLevel(f32),
    SecurityLevel(u8),
    Name(String),
    AdvertisingInterval(u16),
    BlePower(u8),
    ConnectionInterval { min_ms: f32, max_ms: f32 },
    ConnectionIntervalAndMtu { interval_ms: f32, mtu: u16 },
    MacAddress([u8; MAC_ADDRESS_LEN]),
    SlaveLatency(u16),
    SupervisionTimeout(u16),
    BleFirmwareVersion { major: u8, minor: u8 },
    UserMemory(Vec<u8>),
    Standard(DeviceFamily),
    Tunnel(Vec<u8>),
    Transparent(Vec<u8>),

    RfOnOff { on_time_s: u16, timeout_s: u16, off_time_s: u16 },
    AutoOff { enabled: bool, timeout_s: u16 },
    Sound { trigger: HmiTrigger, settings: SoundSettings },
    Led { trigger: HmiTrigger, settings: LedSettings },
    Vibration { trigger: HmiTrigger, settings: VibrationSettings },
    ActivatedButton(u8),

    /// Memory read back from a tag (read and read-TID operations)
    TagData(Vec<u8>),
}

impl Response {
    /// Decode the payload of a successful answer to `code`.
    pub fn decode(code: CommandCode, data: &[u8]) -> crate::Result<Self> {
        use CommandCode as K;

        if let Some(op) = code.tag_operation() {
            return Ok(match op {
                TagOperation::Read | TagOperation::ReadTid => Self::TagData(data.to_vec()),
                _ => Self::Ack,
            });
        }

        let response = match code {
            K::GetShutdownTime => Self::ShutdownTime(be_u16_at(data, 0)?),
            K::GetRfPower => {
                let (level, mode) = reader::decode_rf_power(data)?;
                Self::RfPower { level, mode }
            }
            K::GetInventoryMode => Self::InventoryMode(InventoryMode::try_from(byte_at(data, 0)?)?),
            K::GetInventoryFormat => {
                Self::InventoryFormat(InventoryFormat::try_from(byte_at(data, 0)?)?)
            }
            K::GetIso15693OptionBits => Self::Iso15693OptionBits(byte_at(data, 0)?),
            K::GetIso15693ExtensionFlag => {
                let (flag, permanent) = reader::decode_value_and_permanence(data)?;
                Self::Iso15693ExtensionFlag {
                    flag: flag != 0,
                    permanent,
                }
            }
            K::GetIso15693Bitrate => {
                let (bitrate, permanent) = reader::decode_value_and_permanence(data)?;
                Self::Iso15693Bitrate { bitrate, permanent }
            }
            K::GetEpcFrequency => Self::EpcFrequency(byte_at(data, 0)?),
            K::GetRfForIso15693Tunnel => Self::RfForIso15693Tunnel {
                delay: byte_at(data, 0)?,
                timeout: byte_at(data, 1)?,
            },
            K::GetFirmwareVersion => {
                let (major, minor) = reader::decode_firmware_version(data)?;
                Self::FirmwareVersion { major, minor }
            }
            K::GetBatteryStatus => Self::BatteryStatus(byte_at(data, 0)?),
            K::GetBatteryLevel => Self::BatteryLevel(reader::decode_battery_level(data)?),
            K::GetSecurityLevel => Self::SecurityLevel(byte_at(data, 0)?),
            K::GetName => Self::Name(reader::decode_name(data)?),
            K::GetAdvertisingInterval => Self::AdvertisingInterval(be_u16_at(data, 0)?),
            K::GetBlePower => Self::BlePower(byte_at(data, 0)?),
            K::GetConnectionInterval => {
                let (min_ms, max_ms) = reader::decode_connection_interval(data)?;
                Self::ConnectionInterval { min_ms, max_ms }
            }
            K::GetConnectionIntervalAndMtu => {
                let (interval_ms, mtu) = reader::decode_connection_interval_and_mtu(data)?;
                Self::ConnectionIntervalAndMtu { interval_ms, mtu }
            }
            K::GetMacAddress => Self::MacAddress(reader::decode_mac_address(data)?),
            K::GetSlaveLatency => Self::SlaveLatency(be_u16_at(data, 0)?),
            K::GetSupervisionTimeout => Self::SupervisionTimeout(be_u16_at(data, 0)?),
            K::GetBleFirmwareVersion => Self::BleFirmwareVersion {
                major: byte_at(data, 0)?,
                minor: byte_at(data, 1)?,
            },
            K::ReadUserMemory => Self::UserMemory(reader::decode_user_memory(data)?),
            K::GetStandard => Self::Standard(reader::decode_standard(data)?),
            K::Iso15693Tunnel | K::Iso15693EncryptedTunnel => Self::Tunnel(data.to_vec()),
            K::Transparent => Self::Transparent(data.to_vec()),
            K::GetRfOnOff => {
                let (on_time_s, timeout_s, off_time_s) = zhaga::decode_rf_on_off(data)?;
                Self::RfOnOff {
                    on_time_s,
                    timeout_s,
                    off_time_s,
                }
            }
            K::GetAutoOff => {
                let (enabled, timeout_s) = zhaga::decode_auto_off(data)?;
                Self::AutoOff { enabled, timeout_s }
            }
            K::GetSound => {
                let (trigger, settings) = zhaga::decode_sound(data)?;
                Self::Sound { trigger, settings }
            }
            K::GetLed => {
                let (trigger, settings) = zhaga::decode_led(data)?;
                Self::Led { trigger, settings }
            }
            K::GetVibration => {
                let (trigger, settings) = zhaga::decode_vibration(data)?;
                Self::Vibration { trigger, settings }
            }
            K::GetActivatedButton => Self::ActivatedButton(byte_at(data, 0)?),
            _ => Self::Ack,
        };
        Ok(response)
    }
}
