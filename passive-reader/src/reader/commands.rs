// passive-reader/src/reader/commands.rs

//! Reader-level command surface. Each method validates its arguments,
//! sends the frame and returns; the answer arrives through the
//! [`ReaderListener`](super::ReaderListener) (or the
//! [`ResponseListener`](super::ResponseListener) for `do_inventory`).

use crate::protocol::commands::Command;
use crate::types::{InventoryFormat, InventoryMode, LedSettings, SoundSettings};
use crate::Result;

use super::handle::Reader;

impl Reader {
    pub fn test_availability(&self) -> Result<()> {
        self.send(Command::TestAvailability)
    }

    /// Play a buzzer pattern once.
    pub fn sound(&self, settings: SoundSettings) -> Result<()> {
        self.send(Command::Sound(settings))
    }

    /// Show an LED pattern once.
    pub fn light(&self, settings: LedSettings) -> Result<()> {
        self.send(Command::Light(settings))
    }

    /// Idle time before the reader powers itself off, 10–64800 s.
    pub fn set_shutdown_time(&self, seconds: u32) -> Result<()> {
        self.send(Command::SetShutdownTime { seconds })
    }

    pub fn get_shutdown_time(&self) -> Result<()> {
        self.send(Command::GetShutdownTime)
    }

    pub fn set_rf_power(&self, level: u8, mode: u8) -> Result<()> {
        self.send(Command::SetRfPower { level, mode })
    }

    pub fn get_rf_power(&self) -> Result<()> {
        self.send(Command::GetRfPower)
    }

    /// The new mode is used by the engine once the reader acknowledged it.
    pub fn set_inventory_mode(&self, mode: InventoryMode) -> Result<()> {
        self.send(Command::SetInventoryMode(mode))
    }

    pub fn get_inventory_mode(&self) -> Result<()> {
        self.send(Command::GetInventoryMode)
    }

    /// The new format is used to decode inventories once the reader
    /// acknowledged it.
    pub fn set_inventory_format(&self, format: InventoryFormat) -> Result<()> {
        self.send(Command::SetInventoryFormat(format))
    }

    pub fn get_inventory_format(&self) -> Result<()> {
        self.send(Command::GetInventoryFormat)
    }

    pub fn set_iso15693_option_bits(&self, bits: u8) -> Result<()> {
        self.send(Command::SetIso15693OptionBits(bits))
    }

    pub fn get_iso15693_option_bits(&self) -> Result<()> {
        self.send(Command::GetIso15693OptionBits)
    }

    pub fn set_iso15693_extension_flag(&self, flag: bool, permanent: bool) -> Result<()> {
        self.send(Command::SetIso15693ExtensionFlag { flag, permanent })
    }

    pub fn get_iso15693_extension_flag(&self) -> Result<()> {
        self.send(Command::GetIso15693ExtensionFlag)
    }

    pub fn set_iso15693_bitrate(&self, bitrate: u8, permanent: bool) -> Result<()> {
        self.send(Command::SetIso15693Bitrate { bitrate, permanent })
    }

    pub fn get_iso15693_bitrate(&self) -> Result<()> {
        self.send(Command::GetIso15693Bitrate)
    }

    pub fn set_epc_frequency(&self, frequency: u8) -> Result<()> {
        self.send(Command::SetEpcFrequency(frequency))
    }

    pub fn get_epc_frequency(&self) -> Result<()> {
        self.send(Command::GetEpcFrequency)
    }

    pub fn set_rf_for_iso15693_tunnel(&self, delay: u8, timeout: u8) -> Result<()> {
        self.send(Command::SetRfForIso15693Tunnel { delay, timeout })
    }

    pub fn get_rf_for_iso15693_tunnel(&self) -> Result<()> {
        self.send(Command::GetRfForIso15693Tunnel)
    }

    pub fn get_firmware_version(&self) -> Result<()> {
        self.send(Command::GetFirmwareVersion)
    }

    pub fn get_battery_status(&self) -> Result<()> {
        self.send(Command::GetBatteryStatus)
    }

    pub fn get_battery_level(&self) -> Result<()> {
        self.send(Command::GetBatteryLevel)
    }

    /// Start an inventory round. Tags are reported through
    /// `inventory_event` as they arrive.
    pub fn do_inventory(&self) -> Result<()> {
        self.send(Command::DoInventory)
    }

    /// Pass raw ISO15693 bytes to the tag in the field.
    pub fn iso15693_tunnel(&self, payload: &[u8]) -> Result<()> {
        self.send(Command::Iso15693Tunnel {
            payload: payload.to_vec(),
        })
    }

    pub fn iso15693_encrypted_tunnel(&self, payload: &[u8]) -> Result<()> {
        self.send(Command::Iso15693EncryptedTunnel {
            payload: payload.to_vec(),
        })
    }

    pub fn set_security_level(&self, level: u8) -> Result<()> {
        self.send(Command::SetSecurityLevel(level))
    }

    pub fn get_security_level(&self) -> Result<()> {
        self.send(Command::GetSecurityLevel)
    }

    /// Legacy readers switch the transport to command mode for this one.
    pub fn set_name(&self, name: &str) -> Result<()> {
        self.send(Command::SetName(name.to_string()))
    }

    pub fn get_name(&self) -> Result<()> {
        self.send(Command::GetName)
    }

    pub fn set_advertising_interval(&self, interval_ms: u16) -> Result<()> {
        self.send(Command::SetAdvertisingInterval { interval_ms })
    }

    pub fn get_advertising_interval(&self) -> Result<()> {
        self.send(Command::GetAdvertisingInterval)
    }

    pub fn set_ble_power(&self, power: u8) -> Result<()> {
        self.send(Command::SetBlePower(power))
    }

    pub fn get_ble_power(&self) -> Result<()> {
        self.send(Command::GetBlePower)
    }

    pub fn set_connection_interval(&self, min_ms: f32, max_ms: f32) -> Result<()> {
        self.send(Command::SetConnectionInterval { min_ms, max_ms })
    }

    pub fn get_connection_interval(&self) -> Result<()> {
        self.send(Command::GetConnectionInterval)
    }

    pub fn get_connection_interval_and_mtu(&self) -> Result<()> {
        self.send(Command::GetConnectionIntervalAndMtu)
    }

    pub fn get_mac_address(&self) -> Result<()> {
        self.send(Command::GetMacAddress)
    }

    pub fn set_slave_latency(&self, latency: u16) -> Result<()> {
        self.send(Command::SetSlaveLatency(latency))
    }

    pub fn get_slave_latency(&self) -> Result<()> {
        self.send(Command::GetSlaveLatency)
    }

    pub fn set_supervision_timeout(&self, timeout_ms: u16) -> Result<()> {
        self.send(Command::SetSupervisionTimeout { timeout_ms })
    }

    pub fn get_supervision_timeout(&self) -> Result<()> {
        self.send(Command::GetSupervisionTimeout)
    }

    pub fn get_ble_firmware_version(&self) -> Result<()> {
        self.send(Command::GetBleFirmwareVersion)
    }

    pub fn read_user_memory(&self, block: u16) -> Result<()> {
        self.send(Command::ReadUserMemory { block })
    }

    /// `data` must be exactly one 64-byte block.
    pub fn write_user_memory(&self, block: u16, data: &[u8]) -> Result<()> {
        self.send(Command::WriteUserMemory {
            block,
            data: data.to_vec(),
        })
    }

    pub fn default_ble_configuration(&self, mode: u8) -> Result<()> {
        self.send(Command::DefaultBleConfiguration { mode })
    }
}
