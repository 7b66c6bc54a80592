// passive-reader/src/protocol/commands/mod.rs

pub mod request;

pub use request::Command;

use std::fmt;

use crate::types::DeviceFamily;

/// Command codes understood by the readers.
///
/// Codes `0x60..=0x7F` are tag memory operations; their failures are
/// reported through the tag-specific listener events rather than
/// `result_event`.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandCode {
    TestAvailability = 0x01,
    Sound = 0x02,
    Light = 0x03,
    SetShutdownTime = 0x04,
    GetShutdownTime = 0x05,
    SetRfPower = 0x06,
    GetRfPower = 0x07,
    SetInventoryMode = 0x08,
    GetInventoryMode = 0x09,
    SetInventoryFormat = 0x0A,
    GetInventoryFormat = 0x0B,
    SetIso15693OptionBits = 0x0C,
    GetIso15693OptionBits = 0x0D,
    SetIso15693ExtensionFlag = 0x0E,
    GetIso15693ExtensionFlag = 0x0F,
    SetIso15693Bitrate = 0x10,
    GetIso15693Bitrate = 0x11,
    SetEpcFrequency = 0x12,
    GetEpcFrequency = 0x13,
    SetRfForIso15693Tunnel = 0x14,
    GetRfForIso15693Tunnel = 0x15,
    GetFirmwareVersion = 0x16,
    GetBatteryStatus = 0x17,
    GetBatteryLevel = 0x18,
    DoInventory = 0x19,
    Iso15693Tunnel = 0x1A,
    Iso15693EncryptedTunnel = 0x1B,
    SetSecurityLevel = 0x1C,
    GetSecurityLevel = 0x1D,
    SetName = 0x1E,
    GetName = 0x1F,
    SetAdvertisingInterval = 0x20,
    GetAdvertisingInterval = 0x21,
    SetBlePower = 0x22,
    GetBlePower = 0x23,
    SetConnectionInterval = 0x24,
    GetConnectionInterval = 0x25,
    GetConnectionIntervalAndMtu = 0x26,
    GetMacAddress = 0x27,
    SetSlaveLatency = 0x28,
    GetSlaveLatency = 0x29,
    SetSupervisionTimeout = 0x2A,
    GetSupervisionTimeout = 0x2B,
    GetBleFirmwareVersion = 0x2C,
    ReadUserMemory = 0x2D,
    WriteUserMemory = 0x2E,
    DefaultBleConfiguration = 0x2F,
    GetStandard = 0x30,

    DefaultSetup = 0x40,
    SetRfOnOff = 0x41,
    GetRfOnOff = 0x42,
    SetAutoOff = 0x43,
    GetAutoOff = 0x44,
    SetSound = 0x45,
    GetSound = 0x46,
    SetLed = 0x47,
    GetLed = 0x48,
    SetVibration = 0x49,
    GetVibration = 0x4A,
    ActivateButton = 0x4B,
    GetActivatedButton = 0x4C,
    Transparent = 0x4D,

    EpcRead = 0x60,
    EpcWrite = 0x61,
    EpcLock = 0x62,
    EpcKill = 0x63,
    EpcWriteId = 0x64,
    EpcReadTid = 0x65,
    EpcWriteKillPassword = 0x66,
    EpcWriteAccessPassword = 0x67,
    EpcSimpleRead = 0x68,
    EpcSimpleWrite = 0x69,
    EpcSimpleLock = 0x6A,
    EpcSimpleKill = 0x6B,
    EpcSimpleWriteId = 0x6C,
    EpcSimpleReadTid = 0x6D,
    EpcSimpleWriteKillPassword = 0x6E,
    EpcSimpleWriteAccessPassword = 0x6F,
    Iso15693Read = 0x70,
    Iso15693Write = 0x71,
    Iso15693Lock = 0x72,
    Iso14443aRead = 0x78,
    Iso14443aWrite = 0x79,
}

/// Which listener(s) hear about a command's outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Reader-configuration listener
    Reader,
    /// Device-feature (Zhaga) listener
    Zhaga,
    /// Both the reader and the Zhaga listener
    Both,
    /// Tag operation / inventory listener
    Tag,
}

/// Tag-level operation a tag command code performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagOperation {
    Read,
    Write,
    Lock,
    Kill,
    WriteId,
    ReadTid,
    WritePassword,
}

/// Kind of line that answers a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerKind {
    /// `$:` answer
    Command,
    /// `#:` / `%:` tunnel answer
    Tunnel,
    /// `Z:` answer
    Transparent,
}

/// Command code → routing policy. Every code appears exactly once.
pub const ROUTING_TABLE: &[(CommandCode, Route)] = &[
    (CommandCode::TestAvailability, Route::Reader),
    (CommandCode::Sound, Route::Both),
    (CommandCode::Light, Route::Both),
    (CommandCode::SetShutdownTime, Route::Reader),
    (CommandCode::GetShutdownTime, Route::Reader),
    (CommandCode::SetRfPower, Route::Reader),
    (CommandCode::GetRfPower, Route::Reader),
    (CommandCode::SetInventoryMode, Route::Reader),
    (CommandCode::GetInventoryMode, Route::Reader),
    (CommandCode::SetInventoryFormat, Route::Reader),
    (CommandCode::GetInventoryFormat, Route::Reader),
    (CommandCode::SetIso15693OptionBits, Route::Reader),
    (CommandCode::GetIso15693OptionBits, Route::Reader),
    (CommandCode::SetIso15693ExtensionFlag, Route::Reader),
    (CommandCode::GetIso15693ExtensionFlag, Route::Reader),
    (CommandCode::SetIso15693Bitrate, Route::Reader),
    (CommandCode::GetIso15693Bitrate, Route::Reader),
    (CommandCode::SetEpcFrequency, Route::Reader),
    (CommandCode::GetEpcFrequency, Route::Reader),
    (CommandCode::SetRfForIso15693Tunnel, Route::Reader),
    (CommandCode::GetRfForIso15693Tunnel, Route::Reader),
    (CommandCode::GetFirmwareVersion, Route::Reader),
    (CommandCode::GetBatteryStatus, Route::Reader),
    (CommandCode::GetBatteryLevel, Route::Reader),
    (CommandCode::DoInventory, Route::Tag),
    (CommandCode::Iso15693Tunnel, Route::Reader),
    (CommandCode::Iso15693EncryptedTunnel, Route::Reader),
    (CommandCode::SetSecurityLevel, Route::Reader),
    (CommandCode::GetSecurityLevel, Route::Reader),
    (CommandCode::SetName, Route::Reader),
    (CommandCode::GetName, Route::Reader),
    (CommandCode::SetAdvertisingInterval, Route::Reader),
    (CommandCode::GetAdvertisingInterval, Route::Reader),
    (CommandCode::SetBlePower, Route::Reader),
    (CommandCode::GetBlePower, Route::Reader),
    (CommandCode::SetConnectionInterval, Route::Reader),
    (CommandCode::GetConnectionInterval, Route::Reader),
    (CommandCode::GetConnectionIntervalAndMtu, Route::Reader),
    (CommandCode::GetMacAddress, Route::Reader),
    (CommandCode::SetSlaveLatency, Route::Reader),
    (CommandCode::GetSlaveLatency, Route::Reader),
    (CommandCode::SetSupervisionTimeout, Route::Reader),
    (CommandCode::GetSupervisionTimeout, Route::Reader),
    (CommandCode::GetBleFirmwareVersion, Route::Reader),
    (CommandCode::ReadUserMemory, Route::Reader),
    (CommandCode::WriteUserMemory, Route::Reader),
    (CommandCode::DefaultBleConfiguration, Route::Reader),
    (CommandCode::GetStandard, Route::Reader),
    (CommandCode::DefaultSetup, Route::Both),
    (CommandCode::SetRfOnOff, Route::Zhaga),
    (CommandCode::GetRfOnOff, Route::Zhaga),
    (CommandCode::SetAutoOff, Route::Zhaga),
    (CommandCode::GetAutoOff, Route::Zhaga),
    (CommandCode::SetSound, Route::Zhaga),
    (CommandCode::GetSound, Route::Zhaga),
    (CommandCode::SetLed, Route::Zhaga),
    (CommandCode::GetLed, Route::Zhaga),
    (CommandCode::SetVibration, Route::Zhaga),
    (CommandCode::GetVibration, Route::Zhaga),
    (CommandCode::ActivateButton, Route::Zhaga),
    (CommandCode::GetActivatedButton, Route::Zhaga),
    (CommandCode::Transparent, Route::Zhaga),
    (CommandCode::EpcRead, Route::Tag),
    (CommandCode::EpcWrite, Route::Tag),
    (CommandCode::EpcLock, Route::Tag),
    (CommandCode::EpcKill, Route::Tag),
    (CommandCode::EpcWriteId, Route::Tag),
    (CommandCode::EpcReadTid, Route::Tag),
    (CommandCode::EpcWriteKillPassword, Route::Tag),
    (CommandCode::EpcWriteAccessPassword, Route::Tag),
    (CommandCode::EpcSimpleRead, Route::Tag),
    (CommandCode::EpcSimpleWrite, Route::Tag),
    (CommandCode::EpcSimpleLock, Route::Tag),
    (CommandCode::EpcSimpleKill, Route::Tag),
    (CommandCode::EpcSimpleWriteId, Route::Tag),
    (CommandCode::EpcSimpleReadTid, Route::Tag),
    (CommandCode::EpcSimpleWriteKillPassword, Route::Tag),
    (CommandCode::EpcSimpleWriteAccessPassword, Route::Tag),
    (CommandCode::Iso15693Read, Route::Tag),
    (CommandCode::Iso15693Write, Route::Tag),
    (CommandCode::Iso15693Lock, Route::Tag),
    (CommandCode::Iso14443aRead, Route::Tag),
    (CommandCode::Iso14443aWrite, Route::Tag),
];

/// First code of the tag memory operation range.
pub const TAG_OPERATION_FIRST: u8 = 0x60;
/// Last code of the tag memory operation range.
pub const TAG_OPERATION_LAST: u8 = 0x7F;

impl CommandCode {
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    pub fn from_u8(code: u8) -> Option<Self> {
        ROUTING_TABLE
            .iter()
            .map(|(c, _)| *c)
            .find(|c| c.as_u8() == code)
    }

    /// Routing policy of this command, looked up in [`ROUTING_TABLE`].
    pub fn route(self) -> Route {
        ROUTING_TABLE
            .iter()
            .find(|(c, _)| *c == self)
            .map(|(_, r)| *r)
            .unwrap_or(Route::Reader)
    }

    /// True for tag memory operations, decided by the code range alone.
    pub fn is_tag_operation(self) -> bool {
        (TAG_OPERATION_FIRST..=TAG_OPERATION_LAST).contains(&self.as_u8())
    }

    pub fn tag_operation(self) -> Option<TagOperation> {
        use CommandCode::*;
        match self {
            EpcRead | EpcSimpleRead | Iso15693Read | Iso14443aRead => Some(TagOperation::Read),
            EpcWrite | EpcSimpleWrite | Iso15693Write | Iso14443aWrite => {
                Some(TagOperation::Write)
            }
            EpcLock | EpcSimpleLock | Iso15693Lock => Some(TagOperation::Lock),
            EpcKill | EpcSimpleKill => Some(TagOperation::Kill),
            EpcWriteId | EpcSimpleWriteId => Some(TagOperation::WriteId),
            EpcReadTid | EpcSimpleReadTid => Some(TagOperation::ReadTid),
            EpcWriteKillPassword
            | EpcWriteAccessPassword
            | EpcSimpleWriteKillPassword
            | EpcSimpleWriteAccessPassword => Some(TagOperation::WritePassword),
            _ => None,
        }
    }

    /// Commands whose answers get the odd-length correction.
    pub fn is_read_type(self) -> bool {
        matches!(
            self.tag_operation(),
            Some(TagOperation::Read) | Some(TagOperation::ReadTid)
        ) || self == CommandCode::ReadUserMemory
    }

    pub fn answer_kind(self) -> AnswerKind {
        match self {
            CommandCode::Iso15693Tunnel | CommandCode::Iso15693EncryptedTunnel => {
                AnswerKind::Tunnel
            }
            CommandCode::Transparent => AnswerKind::Transparent,
            _ => AnswerKind::Command,
        }
    }

    /// Device family a command is restricted to, if any.
    pub fn required_family(self) -> Option<DeviceFamily> {
        use CommandCode::*;
        match self {
            SetIso15693OptionBits
            | GetIso15693OptionBits
            | SetIso15693ExtensionFlag
            | GetIso15693ExtensionFlag
            | SetIso15693Bitrate
            | GetIso15693Bitrate
            | SetRfForIso15693Tunnel
            | GetRfForIso15693Tunnel
            | Iso15693Tunnel
            | Iso15693EncryptedTunnel
            | Iso15693Read
            | Iso15693Write
            | Iso15693Lock
            | Iso14443aRead
            | Iso14443aWrite => Some(DeviceFamily::Hf),
            SetEpcFrequency | GetEpcFrequency | SetInventoryFormat | GetInventoryFormat => {
                Some(DeviceFamily::Uhf)
            }
            c if c.is_tag_operation() => Some(DeviceFamily::Uhf),
            _ => None,
        }
    }

    /// Commands that legacy devices only accept with the transport switched
    /// to command mode.
    pub fn needs_command_mode(self) -> bool {
        matches!(self, CommandCode::SetName | CommandCode::GetName)
    }
}

impl fmt::Display for CommandCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({:#04x})", self, self.as_u8())
    }
}
