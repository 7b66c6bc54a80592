// passive-reader/src/reader/router.rs

//! Delivery of outcomes to listeners, following
//! [`ROUTING_TABLE`](crate::protocol::commands::ROUTING_TABLE).
//!
//! Deliveries are collected while the session lock is held and handed to
//! [`Listeners::deliver`] after it is released.

use std::sync::Arc;

use log::trace;

use crate::error::codes::NO_ERROR;
use crate::protocol::commands::{CommandCode, Route, TagOperation};
use crate::protocol::frame::Event;
use crate::protocol::responses::Response;
use crate::tag::Tag;
use crate::types::ExtendedTagId;
use crate::Error;

use super::listener::{ReaderListener, ResponseListener, ZhagaListener};

/// Something a listener must hear about.
#[derive(Debug, Clone, PartialEq)]
pub enum Delivery {
    ConnectionSuccess,
    ConnectionFailure(u16),
    Disconnection,
    Completed {
        code: CommandCode,
        tag: Option<ExtendedTagId>,
        outcome: Result<Response, Error>,
    },
    Inventory(Tag),
    Event(Event),
}

impl Delivery {
    pub fn failed(code: CommandCode, tag: Option<ExtendedTagId>, error: Error) -> Self {
        Delivery::Completed {
            code,
            tag,
            outcome: Err(error),
        }
    }
}

/// The listeners registered on a reader.
#[derive(Clone, Default)]
pub struct Listeners {
    pub reader: Option<Arc<dyn ReaderListener>>,
    pub zhaga: Option<Arc<dyn ZhagaListener>>,
    pub response: Option<Arc<dyn ResponseListener>>,
}

impl std::fmt::Debug for Listeners {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Listeners")
            .field("reader", &self.reader.is_some())
            .field("zhaga", &self.zhaga.is_some())
            .field("response", &self.response.is_some())
            .finish()
    }
}

impl Listeners {
    pub fn deliver_all(&self, deliveries: Vec<Delivery>) {
        for d in deliveries {
            self.deliver(d);
        }
    }

    pub fn deliver(&self, delivery: Delivery) {
        trace!("deliver {:?}", delivery);
        match delivery {
            Delivery::ConnectionSuccess => {
                if let Some(l) = &self.reader {
                    l.connection_success_event();
                }
                if let Some(l) = &self.zhaga {
                    l.connection_success_event();
                }
            }
            Delivery::ConnectionFailure(error) => {
                if let Some(l) = &self.reader {
                    l.connection_failure_event(error);
                }
                if let Some(l) = &self.zhaga {
                    l.connection_failure_event(error);
                }
            }
            Delivery::Disconnection => {
                if let Some(l) = &self.reader {
                    l.disconnection_event();
                }
                if let Some(l) = &self.zhaga {
                    l.disconnection_event();
                }
            }
            Delivery::Completed { code, tag, outcome } => self.completed(code, tag, outcome),
            Delivery::Inventory(tag) => {
                if let Some(l) = &self.response {
                    l.inventory_event(&tag);
                }
            }
            Delivery::Event(event) => {
                if let Some(l) = &self.zhaga {
                    l.device_event(&event);
                }
            }
        }
    }

    fn completed(&self, code: CommandCode, tag: Option<ExtendedTagId>, outcome: Result<Response, Error>) {
        match code.route() {
            Route::Tag => {
                if let Some(l) = &self.response {
                    match code.tag_operation() {
                        Some(op) => tag_event(l.as_ref(), op, &tag.unwrap_or_default(), outcome),
                        None => l.result_event(code, error_code(&outcome)),
                    }
                }
            }
            Route::Reader => {
                if let Some(l) = &self.reader {
                    reader_event(l.as_ref(), code, &outcome);
                }
            }
            Route::Zhaga => {
                if let Some(l) = &self.zhaga {
                    zhaga_event(l.as_ref(), code, &outcome);
                }
            }
            Route::Both => {
                if let Some(l) = &self.reader {
                    reader_event(l.as_ref(), code, &outcome);
                }
                if let Some(l) = &self.zhaga {
                    zhaga_event(l.as_ref(), code, &outcome);
                }
            }
        }
    }
}

fn error_code(outcome: &Result<Response, Error>) -> u16 {
    match outcome {
        Ok(_) => NO_ERROR,
        Err(e) => e.code(),
    }
}

fn tag_event(
    l: &dyn ResponseListener,
    op: TagOperation,
    id: &ExtendedTagId,
    outcome: Result<Response, Error>,
) {
    let error = error_code(&outcome);
    let data = match &outcome {
        Ok(Response::TagData(d)) => Some(d.as_slice()),
        _ => None,
    };
    match op {
        TagOperation::Read => l.read_event(id, error, data),
        TagOperation::ReadTid => l.read_tid_event(id, error, data),
        TagOperation::Write => l.write_event(id, error),
        TagOperation::Lock => l.lock_event(id, error),
        TagOperation::Kill => l.kill_event(id, error),
        TagOperation::WriteId => l.write_id_event(id, error),
        TagOperation::WritePassword => l.write_password_event(id, error),
    }
}

fn reader_event(l: &dyn ReaderListener, code: CommandCode, outcome: &Result<Response, Error>) {
    let response = match outcome {
        Ok(r) => r,
        Err(e) => return l.result_event(code, e.code()),
    };
    match response {
        Response::ShutdownTime(s) => l.shutdown_time_event(*s),
        Response::RfPower { level, mode } => l.rf_power_event(*level, *mode),
        Response::InventoryMode(m) => l.inventory_mode_event(*m),
        Response::InventoryFormat(f) => l.inventory_format_event(*f),
        Response::Iso15693OptionBits(b) => l.iso15693_option_bits_event(*b),
        Response::Iso15693ExtensionFlag { flag, permanent } => {
            l.iso15693_extension_flag_event(*flag, *permanent)
        }
        Response::Iso15693Bitrate { bitrate, permanent } => {
            l.iso15693_bitrate_event(*bitrate, *permanent)
        }
        Response::EpcFrequency(f) => l.epc_frequency_event(*f),
        Response::RfForIso15693Tunnel { delay, timeout } => {
            l.rf_for_iso15693_tunnel_event(*delay, *timeout)
        }
        Response::FirmwareVersion { major, minor } => l.firmware_version_event(*major, *minor),
        Response::BatteryStatus(s) => l.battery_status_event(*s),
        Response::BatteryLevel(v) => l.battery_level_event(*v),
        Response::Tunnel(d) => l.tunnel_event(d),
        Response::SecurityLevel(s) => l.security_level_event(*s),
        Response::Name(n) => l.name_event(n),
        Response::AdvertisingInterval(i) => l.advertising_interval_event(*i),
        Response::BlePower(p) => l.ble_power_event(*p),
        Response::ConnectionInterval { min_ms, max_ms } => {
            l.connection_interval_event(*min_ms, *max_ms)
        }
        Response::ConnectionIntervalAndMtu { interval_ms, mtu } => {
            l.connection_interval_and_mtu_event(*interval_ms, *mtu)
        }
        Response::MacAddress(mac) => l.mac_address_event(mac),
        Response::SlaveLatency(s) => l.slave_latency_event(*s),
        Response::SupervisionTimeout(t) => l.supervision_timeout_event(*t),
        Response::BleFirmwareVersion { major, minor } => {
            l.ble_firmware_version_event(*major, *minor)
        }
        Response::UserMemory(d) => l.user_memory_event(d),
        _ => l.result_event(code, NO_ERROR),
    }
}

fn zhaga_event(l: &dyn ZhagaListener, code: CommandCode, outcome: &Result<Response, Error>) {
    let response = match outcome {
        Ok(r) => r,
        Err(e) => return l.result_event(code, e.code()),
    };
    match response {
        Response::RfOnOff {
            on_time_s,
            timeout_s,
            off_time_s,
        } => l.rf_on_off_event(*on_time_s, *timeout_s, *off_time_s),
        Response::AutoOff { enabled, timeout_s } => l.auto_off_event(*enabled, *timeout_s),
        Response::Sound { trigger, settings } => l.sound_event(*trigger, settings),
        Response::Led { trigger, settings } => l.led_event(*trigger, settings),
        Response::Vibration { trigger, settings } => l.vibration_event(*trigger, settings),
        Response::ActivatedButton(b) => l.activated_button_event(*b),
        Response::Transparent(d) => l.transparent_event(d),
        _ => l.result_event(code, NO_ERROR),
    }
}
