// passive-reader/src/protocol/commands/request.rs

use crate::constants::{CONNECTION_INTERVAL_UNIT_MS, USER_MEMORY_BLOCK_LEN};
use crate::protocol::codec::{encode_command, encode_transparent, encode_tunnel};
use crate::protocol::sequence::SequenceCounter;
use crate::types::{
    HmiTrigger, InventoryFormat, InventoryMode, LedSettings, SoundSettings, VibrationSettings,
};
use crate::{Error, Result};

use super::CommandCode;

pub const SHUTDOWN_TIME_RANGE_S: std::ops::RangeInclusive<u32> = 10..=64800;
pub const RF_POWER_LEVEL_MAX: u8 = 0x1F;
pub const RF_POWER_MODE_MAX: u8 = 0x02;
pub const ISO15693_BITRATE_MAX: u8 = 0x03;
pub const EPC_FREQUENCY_MAX: u8 = 0x0F;
pub const SECURITY_LEVEL_MAX: u8 = 0x02;
pub const NAME_MAX_LEN: usize = 20;
pub const ADVERTISING_INTERVAL_RANGE_MS: std::ops::RangeInclusive<u16> = 20..=10240;
pub const BLE_POWER_MAX: u8 = 0x04;
pub const CONNECTION_INTERVAL_MIN_MS: f32 = 7.5;
pub const CONNECTION_INTERVAL_MAX_MS: f32 = 4000.0;
pub const SLAVE_LATENCY_MAX: u16 = 499;
pub const SUPERVISION_TIMEOUT_RANGE_MS: std::ops::RangeInclusive<u16> = 100..=32000;
pub const DEFAULT_BLE_CONFIGURATION_MAX: u8 = 0x01;
pub const BUTTON_MAX: u8 = 0x03;

/// Reader-level and device-feature requests.
///
/// Tag memory operations are built by the `tag` module because their
/// frames are assembled in several appended parts.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    TestAvailability,
    Sound(SoundSettings),
    Light(LedSettings),
    SetShutdownTime { seconds: u32 },
    GetShutdownTime,
    SetRfPower { level: u8, mode: u8 },
    GetRfPower,
    SetInventoryMode(InventoryMode),
    GetInventoryMode,
    SetInventoryFormat(InventoryFormat),
    GetInventoryFormat,
    SetIso15693OptionBits(u8),
    GetIso15693OptionBits,
    SetIso15693ExtensionFlag { flag: bool, permanent: bool },
    GetIso15693ExtensionFlag,
    SetIso15693Bitrate { bitrate: u8, permanent: bool },
    GetIso15693Bitrate,
    SetEpcFrequency(u8),
    GetEpcFrequency,
    /// Delay and timeout (in reader ticks) applied around tunnelled frames.
    SetRfForIso15693Tunnel { delay: u8, timeout: u8 },
    GetRfForIso15693Tunnel,
    GetFirmwareVersion,
    GetBatteryStatus,
    GetBatteryLevel,
    DoInventory,
    Iso15693Tunnel { payload: Vec<u8> },
    Iso15693EncryptedTunnel { payload: Vec<u8> },
    SetSecurityLevel(u8),
    GetSecurityLevel,
    SetName(String),
    GetName,
    SetAdvertisingInterval { interval_ms: u16 },
    GetAdvertisingInterval,
    SetBlePower(u8),
    GetBlePower,
    SetConnectionInterval { min_ms: f32, max_ms: f32 },
    GetConnectionInterval,
    GetConnectionIntervalAndMtu,
    GetMacAddress,
    SetSlaveLatency(u16),
    GetSlaveLatency,
    SetSupervisionTimeout { timeout_ms: u16 },
    GetSupervisionTimeout,
    GetBleFirmwareVersion,
    ReadUserMemory { block: u16 },
    WriteUserMemory { block: u16, data: Vec<u8> },
    DefaultBleConfiguration { mode: u8 },
    GetStandard,

    DefaultSetup,
    SetRfOnOff { on_time_s: u16, timeout_s: u16, off_time_s: u16 },
    GetRfOnOff,
    SetAutoOff { enabled: bool, timeout_s: u16 },
    GetAutoOff,
    SetSound { trigger: HmiTrigger, settings: SoundSettings },
    GetSound(HmiTrigger),
    SetLed { trigger: HmiTrigger, settings: LedSettings },
    GetLed(HmiTrigger),
    SetVibration { trigger: HmiTrigger, settings: VibrationSettings },
    GetVibration(HmiTrigger),
    ActivateButton(u8),
    GetActivatedButton,
    Transparent { payload: Vec<u8> },
}

fn check(ok: bool, what: impl FnOnce() -> String) -> Result<()> {
    if ok {
        Ok(())
    } else {
        Err(Error::InvalidParameter(what()))
    }
}

fn interval_units(ms: f32) -> [u8; 2] {
    ((ms / CONNECTION_INTERVAL_UNIT_MS).round() as u16).to_be_bytes()
}

impl Command {
    pub fn code(&self) -> CommandCode {
        use Command as C;
        use CommandCode as K;
        match self {
            C::TestAvailability => K::TestAvailability,
            C::Sound(_) => K::Sound,
            C::Light(_) => K::Light,
            C::SetShutdownTime { .. } => K::SetShutdownTime,
            C::GetShutdownTime => K::GetShutdownTime,
            C::SetRfPower { .. } => K::SetRfPower,
            C::GetRfPower => K::GetRfPower,
            C::SetInventoryMode(_) => K::SetInventoryMode,
            C::GetInventoryMode => K::GetInventoryMode,
            C::SetInventoryFormat(_) => K::SetInventoryFormat,
            C::GetInventoryFormat => K::GetInventoryFormat,
            C::SetIso15693OptionBits(_) => K::SetIso15693OptionBits,
            C::GetIso15693OptionBits => K::GetIso15693OptionBits,
            C::SetIso15693ExtensionFlag { .. } => K::SetIso15693ExtensionFlag,
            C::GetIso15693ExtensionFlag => K::GetIso15693ExtensionFlag,
            C::SetIso15693Bitrate { .. } => K::SetIso15693Bitrate,
            C::GetIso15693Bitrate => K::GetIso15693Bitrate,
            C::SetEpcFrequency(_) => K::SetEpcFrequency,
            C::GetEpcFrequency => K::GetEpcFrequency,
            C::SetRfForIso15693Tunnel { .. } => K::SetRfForIso15693Tunnel,
            C::GetRfForIso15693Tunnel => K::GetRfForIso15693Tunnel,
            C::GetFirmwareVersion => K::GetFirmwareVersion,
            C::GetBatteryStatus => K::GetBatteryStatus,
            C::GetBatteryLevel => K::GetBatteryLevel,
            C::DoInventory => K::DoInventory,
            C::Iso15693Tunnel { .. } => K::Iso15693Tunnel,
            C::Iso15693EncryptedTunnel { .. } => K::Iso15693EncryptedTunnel,
            C::SetSecurityLevel(_) => K::SetSecurityLevel,
            C::GetSecurityLevel => K::GetSecurityLevel,
            C::SetName(_) => K::SetName,
            C::GetName => K::GetName,
            C::SetAdvertisingInterval { .. } => K::SetAdvertisingInterval,
            C::GetAdvertisingInterval => K::GetAdvertisingInterval,
            C::SetBlePower(_) => K::SetBlePower,
            C::GetBlePower => K::GetBlePower,
            C::SetConnectionInterval { .. } => K::SetConnectionInterval,
            C::GetConnectionInterval => K::GetConnectionInterval,
            C::GetConnectionIntervalAndMtu => K::GetConnectionIntervalAndMtu,
            C::GetMacAddress => K::GetMacAddress,
            C::SetSlaveLatency(_) => K::SetSlaveLatency,
            C::GetSlaveLatency => K::GetSlaveLatency,
            C::SetSupervisionTimeout { .. } => K::SetSupervisionTimeout,
            C::GetSupervisionTimeout => K::GetSupervisionTimeout,
            C::GetBleFirmwareVersion => K::GetBleFirmwareVersion,
            C::ReadUserMemory { .. } => K::ReadUserMemory,
            C::WriteUserMemory { .. } => K::WriteUserMemory,
            C::DefaultBleConfiguration { .. } => K::DefaultBleConfiguration,
            C::GetStandard => K::GetStandard,
            C::DefaultSetup => K::DefaultSetup,
            C::SetRfOnOff { .. } => K::SetRfOnOff,
            C::GetRfOnOff => K::GetRfOnOff,
            C::SetAutoOff { .. } => K::SetAutoOff,
            C::GetAutoOff => K::GetAutoOff,
            C::SetSound { .. } => K::SetSound,
            C::GetSound(_) => K::GetSound,
            C::SetLed { .. } => K::SetLed,
            C::GetLed(_) => K::GetLed,
            C::SetVibration { .. } => K::SetVibration,
            C::GetVibration(_) => K::GetVibration,
            C::ActivateButton(_) => K::ActivateButton,
            C::GetActivatedButton => K::GetActivatedButton,
            C::Transparent { .. } => K::Transparent,
        }
    }

    /// Validate the request and return its parameter bytes.
    ///
    /// For tunnel and transparent requests this is the raw pass-through
    /// payload.
    pub fn params(&self) -> Result<Vec<u8>> {
        use Command as C;
        let bytes = match self {
            C::Sound(s) => {
                s.validate()?;
                s.encode().to_vec()
            }
            C::Light(l) => {
                l.validate()?;
                l.encode().to_vec()
            }
            C::SetShutdownTime { seconds } => {
                check(SHUTDOWN_TIME_RANGE_S.contains(seconds), || {
                    format!("shutdown time {} s out of range 10..=64800", seconds)
                })?;
                (*seconds as u16).to_be_bytes().to_vec()
            }
            C::SetRfPower { level, mode } => {
                check(*level <= RF_POWER_LEVEL_MAX, || {
                    format!("RF power level {:#04x} above {:#04x}", level, RF_POWER_LEVEL_MAX)
                })?;
                check(*mode <= RF_POWER_MODE_MAX, || {
                    format!("RF power mode {} above {}", mode, RF_POWER_MODE_MAX)
                })?;
                vec![*level, *mode]
            }
            C::SetInventoryMode(mode) => vec![*mode as u8],
            C::SetInventoryFormat(format) => vec![*format as u8],
            C::SetIso15693OptionBits(bits) => vec![*bits],
            C::SetIso15693ExtensionFlag { flag, permanent } => {
                vec![u8::from(*flag), u8::from(*permanent)]
            }
            C::SetIso15693Bitrate { bitrate, permanent } => {
                check(*bitrate <= ISO15693_BITRATE_MAX, || {
                    format!("ISO15693 bitrate {} above {}", bitrate, ISO15693_BITRATE_MAX)
                })?;
                vec![*bitrate, u8::from(*permanent)]
            }
            C::SetEpcFrequency(frequency) => {
                check(*frequency <= EPC_FREQUENCY_MAX, || {
                    format!("EPC frequency plan {:#04x} above {:#04x}", frequency, EPC_FREQUENCY_MAX)
                })?;
                vec![*frequency]
            }
            C::SetRfForIso15693Tunnel { delay, timeout } => {
                check(*timeout >= 1, || "tunnel timeout must be at least 1".into())?;
                vec![*delay, *timeout]
            }
            C::Iso15693Tunnel { payload } | C::Iso15693EncryptedTunnel { payload } => {
                check(!payload.is_empty(), || "tunnel payload is empty".into())?;
                payload.clone()
            }
            C::SetSecurityLevel(level) => {
                check(*level <= SECURITY_LEVEL_MAX, || {
                    format!("security level {} above {}", level, SECURITY_LEVEL_MAX)
                })?;
                vec![*level]
            }
            C::SetName(name) => {
                check(
                    !name.is_empty() && name.len() <= NAME_MAX_LEN && name.is_ascii(),
                    || format!("name '{}' must be 1..=20 ASCII characters", name),
                )?;
                name.as_bytes().to_vec()
            }
            C::SetAdvertisingInterval { interval_ms } => {
                check(ADVERTISING_INTERVAL_RANGE_MS.contains(interval_ms), || {
                    format!("advertising interval {} ms out of range 20..=10240", interval_ms)
                })?;
                interval_ms.to_be_bytes().to_vec()
            }
            C::SetBlePower(power) => {
                check(*power <= BLE_POWER_MAX, || {
                    format!("BLE power {} above {}", power, BLE_POWER_MAX)
                })?;
                vec![*power]
            }
            C::SetConnectionInterval { min_ms, max_ms } => {
                let range = CONNECTION_INTERVAL_MIN_MS..=CONNECTION_INTERVAL_MAX_MS;
                check(
                    range.contains(min_ms) && range.contains(max_ms) && min_ms <= max_ms,
                    || {
                        format!(
                            "connection interval {}..{} ms invalid (7.5..=4000, min <= max)",
                            min_ms, max_ms
                        )
                    },
                )?;
                let mut out = interval_units(*min_ms).to_vec();
                out.extend_from_slice(&interval_units(*max_ms));
                out
            }
            C::SetSlaveLatency(latency) => {
                check(*latency <= SLAVE_LATENCY_MAX, || {
                    format!("slave latency {} above {}", latency, SLAVE_LATENCY_MAX)
                })?;
                latency.to_be_bytes().to_vec()
            }
            C::SetSupervisionTimeout { timeout_ms } => {
                check(SUPERVISION_TIMEOUT_RANGE_MS.contains(timeout_ms), || {
                    format!("supervision timeout {} ms out of range 100..=32000", timeout_ms)
                })?;
                timeout_ms.to_be_bytes().to_vec()
            }
            C::ReadUserMemory { block } => vec![Self::user_block(*block)?],
            C::WriteUserMemory { block, data } => {
                let block = Self::user_block(*block)?;
                check(data.len() == USER_MEMORY_BLOCK_LEN, || {
                    format!(
                        "user memory block must be exactly {} bytes, got {}",
                        USER_MEMORY_BLOCK_LEN,
                        data.len()
                    )
                })?;
                let mut out = Vec::with_capacity(1 + data.len());
                out.push(block);
                out.extend_from_slice(data);
                out
            }
            C::DefaultBleConfiguration { mode } => {
                check(*mode <= DEFAULT_BLE_CONFIGURATION_MAX, || {
                    format!("default BLE configuration mode {} above 1", mode)
                })?;
                vec![*mode]
            }
            C::SetRfOnOff {
                on_time_s,
                timeout_s,
                off_time_s,
            } => {
                let mut out = on_time_s.to_be_bytes().to_vec();
                out.extend_from_slice(&timeout_s.to_be_bytes());
                out.extend_from_slice(&off_time_s.to_be_bytes());
                out
            }
            C::SetAutoOff { enabled, timeout_s } => {
                let t = timeout_s.to_be_bytes();
                vec![u8::from(*enabled), t[0], t[1]]
            }
            C::SetSound { trigger, settings } => {
                settings.validate()?;
                let mut out = vec![*trigger as u8];
                out.extend_from_slice(&settings.encode());
                out
            }
            C::SetLed { trigger, settings } => {
                settings.validate()?;
                let mut out = vec![*trigger as u8];
                out.extend_from_slice(&settings.encode());
                out
            }
            C::SetVibration { trigger, settings } => {
                let mut out = vec![*trigger as u8];
                out.extend_from_slice(&settings.encode());
                out
            }
            C::GetSound(trigger) | C::GetLed(trigger) | C::GetVibration(trigger) => {
                vec![*trigger as u8]
            }
            C::ActivateButton(button) => {
                check(*button <= BUTTON_MAX, || {
                    format!("button {} above {}", button, BUTTON_MAX)
                })?;
                vec![*button]
            }
            C::Transparent { payload } => {
                check(!payload.is_empty(), || "transparent payload is empty".into())?;
                payload.clone()
            }
            C::TestAvailability
            | C::GetShutdownTime
            | C::GetRfPower
            | C::GetInventoryMode
            | C::GetInventoryFormat
            | C::GetIso15693OptionBits
            | C::GetIso15693ExtensionFlag
            | C::GetIso15693Bitrate
            | C::GetEpcFrequency
            | C::GetRfForIso15693Tunnel
            | C::GetFirmwareVersion
            | C::GetBatteryStatus
            | C::GetBatteryLevel
            | C::DoInventory
            | C::GetSecurityLevel
            | C::GetName
            | C::GetAdvertisingInterval
            | C::GetBlePower
            | C::GetConnectionInterval
            | C::GetConnectionIntervalAndMtu
            | C::GetMacAddress
            | C::GetSlaveLatency
            | C::GetSupervisionTimeout
            | C::GetBleFirmwareVersion
            | C::GetStandard
            | C::DefaultSetup
            | C::GetRfOnOff
            | C::GetAutoOff
            | C::GetActivatedButton => Vec::new(),
        };
        Ok(bytes)
    }

    fn user_block(block: u16) -> Result<u8> {
        u8::try_from(block)
            .map_err(|_| Error::InvalidParameter(format!("user memory block {} above 255", block)))
    }

    /// Validate and encode into a wire frame (without line terminator).
    ///
    /// The sequence counter is only advanced once validation passed and
    /// only for `$:`/`Z:` frames.
    pub fn encode(&self, sequence: &mut SequenceCounter) -> Result<String> {
        let params = self.params()?;
        match self {
            Command::Iso15693Tunnel { .. } => Ok(encode_tunnel(false, &params)),
            Command::Iso15693EncryptedTunnel { .. } => Ok(encode_tunnel(true, &params)),
            Command::Transparent { .. } => encode_transparent(sequence, &params),
            _ => encode_command(sequence, self.code().as_u8(), &params),
        }
    }
}
