// passive-reader/src/reader/zhaga.rs

//! Device-feature ("Zhaga") command surface. Outcomes arrive through the
//! [`ZhagaListener`](super::ZhagaListener).

use crate::protocol::commands::Command;
use crate::types::{HmiTrigger, LedSettings, SoundSettings, VibrationSettings};
use crate::Result;

use super::handle::Reader;

impl Reader {
    /// Restore factory settings; reported to both listeners.
    pub fn default_setup(&self) -> Result<()> {
        self.send(Command::DefaultSetup)
    }

    /// RF field schedule: on for `on_time_s`, then off for `off_time_s`
    /// once `timeout_s` passed without a tag.
    pub fn set_rf_on_off(&self, on_time_s: u16, timeout_s: u16, off_time_s: u16) -> Result<()> {
        self.send(Command::SetRfOnOff {
            on_time_s,
            timeout_s,
            off_time_s,
        })
    }

    pub fn get_rf_on_off(&self) -> Result<()> {
        self.send(Command::GetRfOnOff)
    }

    pub fn set_auto_off(&self, enabled: bool, timeout_s: u16) -> Result<()> {
        self.send(Command::SetAutoOff { enabled, timeout_s })
    }

    pub fn get_auto_off(&self) -> Result<()> {
        self.send(Command::GetAutoOff)
    }

    pub fn set_sound(&self, trigger: HmiTrigger, settings: SoundSettings) -> Result<()> {
        self.send(Command::SetSound { trigger, settings })
    }

    pub fn get_sound(&self, trigger: HmiTrigger) -> Result<()> {
        self.send(Command::GetSound(trigger))
    }

    pub fn set_led(&self, trigger: HmiTrigger, settings: LedSettings) -> Result<()> {
        self.send(Command::SetLed { trigger, settings })
    }

    pub fn get_led(&self, trigger: HmiTrigger) -> Result<()> {
        self.send(Command::GetLed(trigger))
    }

    pub fn set_vibration(&self, trigger: HmiTrigger, settings: VibrationSettings) -> Result<()> {
        self.send(Command::SetVibration { trigger, settings })
    }

    pub fn get_vibration(&self, trigger: HmiTrigger) -> Result<()> {
        self.send(Command::GetVibration(trigger))
    }

    pub fn activate_button(&self, button: u8) -> Result<()> {
        self.send(Command::ActivateButton(button))
    }

    pub fn get_activated_button(&self) -> Result<()> {
        self.send(Command::GetActivatedButton)
    }

    /// Forward `payload` untouched to the device behind the reader.
    pub fn transparent(&self, payload: &[u8]) -> Result<()> {
        self.send(Command::Transparent {
            payload: payload.to_vec(),
        })
    }
}
