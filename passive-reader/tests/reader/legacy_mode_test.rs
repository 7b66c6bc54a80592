#[path = "../common/mod.rs"]
mod common;

use common::{answer_line, legacy_reader};
use passive_reader::error::codes;
use passive_reader::prelude::*;
use passive_reader::reader::ModeSubstatus;

#[test]
fn legacy_reader_skips_identification() {
    let (reader, mock, rec) = legacy_reader(DeviceFamily::Uhf);
    assert_eq!(reader.status(), LinkStatus::Ready);
    assert_eq!(reader.device_family(), DeviceFamily::Uhf);
    assert_eq!(mock.write_count(), 0);
    assert_eq!(
        rec.events(),
        vec!["reader:connected".to_string(), "zhaga:connected".to_string()]
    );
}

#[test]
fn name_query_switches_modes_around_the_command() {
    let (reader, mock, rec) = legacy_reader(DeviceFamily::Hf);
    rec.clear();

    reader.get_name().unwrap();
    assert_eq!(reader.mode(), ModeSubstatus::SettingCommandMode);
    assert_eq!(mock.mode_requests(), vec![TransferMode::Command]);
    assert_eq!(mock.write_count(), 0);
    assert_eq!(reader.pending_timeout(), Some(reader.config().mode_change_timeout));

    reader.on_transfer_mode_changed(TransferMode::Command);
    assert_eq!(reader.mode(), ModeSubstatus::CommandModeActive);
    assert_eq!(mock.last_frame().as_deref(), Some("$:04001F"));

    reader.on_data_received(&answer_line(0x00, 0x00, b"DESK-01\0"));
    assert_eq!(reader.mode(), ModeSubstatus::SettingStreamMode);
    assert_eq!(
        mock.mode_requests(),
        vec![TransferMode::Command, TransferMode::Stream]
    );
    assert!(matches!(reader.status(), LinkStatus::PendingCommand(_)));
    assert!(rec.events().is_empty());

    reader.on_transfer_mode_changed(TransferMode::Stream);
    assert_eq!(reader.status(), LinkStatus::Ready);
    assert_eq!(reader.mode(), ModeSubstatus::Stream);
    assert_eq!(rec.events(), vec!["reader:name DESK-01".to_string()]);
}

#[test]
fn other_commands_stay_in_stream_mode() {
    let (reader, mock, _rec) = legacy_reader(DeviceFamily::Uhf);
    reader.get_battery_level().unwrap();
    assert!(mock.mode_requests().is_empty());
    assert_eq!(mock.last_frame().as_deref(), Some("$:040018"));
}

#[test]
fn failing_to_return_to_stream_mode() {
    let (reader, mock, rec) = legacy_reader(DeviceFamily::Uhf);
    rec.clear();
    reader.set_name("DESK-02").unwrap();
    reader.on_transfer_mode_changed(TransferMode::Command);

    mock.fail_next_mode_change(TransportError::ModeChangeFailed);
    reader.on_data_received(&answer_line(0x00, 0x00, &[]));

    assert_eq!(reader.status(), LinkStatus::Ready);
    assert_eq!(
        rec.events(),
        vec![format!(
            "reader:result {} {:#06x}",
            CommandCode::SetName,
            codes::MODE_CHANGE_FAILED_ERROR
        )]
    );
}

#[test]
fn stream_mode_never_confirmed() {
    let (reader, _mock, rec) = legacy_reader(DeviceFamily::Uhf);
    rec.clear();
    reader.get_name().unwrap();
    reader.on_transfer_mode_changed(TransferMode::Command);
    reader.on_data_received(&answer_line(0x00, 0x00, b"X"));
    reader.on_timeout();
    assert_eq!(reader.status(), LinkStatus::Ready);
    assert_eq!(
        rec.events(),
        vec![format!(
            "reader:result {} {:#06x}",
            CommandCode::GetName,
            codes::MODE_CHANGE_FAILED_ERROR
        )]
    );
}

#[test]
fn command_mode_never_reached() {
    let (reader, mock, rec) = legacy_reader(DeviceFamily::Uhf);
    rec.clear();
    reader.get_name().unwrap();
    reader.on_timeout();
    assert_eq!(reader.status(), LinkStatus::Ready);
    assert_eq!(mock.write_count(), 0);
    assert_eq!(
        rec.events(),
        vec![format!(
            "reader:result {} {:#06x}",
            CommandCode::GetName,
            codes::MODE_TIMEOUT_ERROR
        )]
    );
}

#[test]
fn refused_command_mode_request() {
    let (reader, mock, rec) = legacy_reader(DeviceFamily::Uhf);
    rec.clear();
    mock.fail_next_mode_change(TransportError::ModeChangeFailed);
    let err = reader.get_name().unwrap_err();
    assert_eq!(err.code(), codes::MODE_ERROR);
    assert_eq!(reader.status(), LinkStatus::Ready);
    assert_eq!(rec.events().len(), 1);
}
