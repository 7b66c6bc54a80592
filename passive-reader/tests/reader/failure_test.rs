#[path = "../common/mod.rs"]
mod common;

use common::{answer_line, mock_reader, ready_reader};
use passive_reader::error::codes;
use passive_reader::prelude::*;
use passive_reader::transport::MockTransport;

fn result(code: CommandCode, error: u16) -> String {
    format!("reader:result {} {:#06x}", code, error)
}

#[test]
fn commands_before_connection_are_rejected() {
    let mock = MockTransport::new();
    let (reader, rec) = mock_reader(&mock);
    let err = reader.get_battery_level().unwrap_err();
    assert!(matches!(err, Error::WrongStatus(LinkStatus::NotInitialized)));
    assert_eq!(mock.write_count(), 0);
    assert_eq!(
        rec.events(),
        vec![result(CommandCode::GetBatteryLevel, codes::WRONG_STATUS_ERROR)]
    );
}

#[test]
fn parameter_errors_are_returned_and_reported() {
    let (reader, mock, rec) = ready_reader(DeviceFamily::Uhf);
    rec.clear();
    let err = reader.set_shutdown_time(5).unwrap_err();
    assert_eq!(err.code(), codes::WRONG_PARAMETER_ERROR);
    assert_eq!(mock.write_count(), 1);
    assert_eq!(reader.status(), LinkStatus::Ready);
    assert_eq!(
        rec.events(),
        vec![result(CommandCode::SetShutdownTime, codes::WRONG_PARAMETER_ERROR)]
    );

    // The rejected command did not take a sequence number.
    reader.get_battery_level().unwrap();
    assert_eq!(mock.last_frame().as_deref(), Some("$:040118"));
}

#[test]
fn family_specific_commands() {
    let (reader, mock, rec) = ready_reader(DeviceFamily::Hf);
    rec.clear();
    let err = reader.set_epc_frequency(1).unwrap_err();
    assert_eq!(err.code(), codes::COMMAND_NOT_SUPPORTED_ERROR);
    assert_eq!(mock.write_count(), 1);
    assert_eq!(
        rec.events(),
        vec![result(CommandCode::SetEpcFrequency, codes::COMMAND_NOT_SUPPORTED_ERROR)]
    );
}

#[test]
fn write_failure_returns_to_ready() {
    let (reader, mock, rec) = ready_reader(DeviceFamily::Uhf);
    rec.clear();
    mock.fail_next_write(TransportError::WriteFailed);
    let err = reader.get_battery_level().unwrap_err();
    assert_eq!(err, Error::Transport(TransportError::WriteFailed));
    assert_eq!(reader.status(), LinkStatus::Ready);
    assert_eq!(
        rec.events(),
        vec![result(CommandCode::GetBatteryLevel, codes::WRITE_ERROR)]
    );
}

#[test]
fn transport_error_and_timeout_complete_the_pending_command() {
    let (reader, _mock, rec) = ready_reader(DeviceFamily::Uhf);
    rec.clear();

    reader.get_battery_level().unwrap();
    reader.on_transport_error(TransportError::ReadFailed);
    assert_eq!(reader.status(), LinkStatus::Ready);

    reader.get_ble_power().unwrap();
    assert_eq!(
        reader.pending_timeout(),
        Some(reader.config().command_timeout)
    );
    reader.on_timeout();
    assert_eq!(reader.status(), LinkStatus::Ready);
    assert_eq!(reader.pending_timeout(), None);

    assert_eq!(
        rec.events(),
        vec![
            result(CommandCode::GetBatteryLevel, codes::READ_ERROR),
            result(CommandCode::GetBlePower, codes::READ_TIMEOUT_ERROR),
        ]
    );
}

#[test]
fn late_answer_after_timeout_is_dropped() {
    let (reader, _mock, rec) = ready_reader(DeviceFamily::Uhf);
    reader.get_battery_level().unwrap();
    reader.on_timeout();
    rec.clear();
    reader.on_data_received(&answer_line(0x01, 0x00, &[0x08, 0x00]));
    assert!(rec.events().is_empty());
    assert_eq!(reader.status(), LinkStatus::Ready);
}

#[test]
fn connection_failures() {
    let mock = MockTransport::new();
    let (reader, rec) = mock_reader(&mock);
    reader.on_connect_failed(TransportError::ConnectTimeout);
    assert_eq!(reader.status(), LinkStatus::Error);
    assert_eq!(
        rec.events(),
        vec![
            format!("reader:connection_failure {:#06x}", codes::CONNECT_TIMEOUT_ERROR),
            format!("zhaga:connection_failure {:#06x}", codes::CONNECT_TIMEOUT_ERROR),
        ]
    );

    let mock = MockTransport::new();
    let (reader, rec) = mock_reader(&mock);
    reader.on_connected();
    reader.on_timeout();
    assert_eq!(reader.status(), LinkStatus::Error);
    assert_eq!(
        rec.events().first().cloned(),
        Some(format!("reader:connection_failure {:#06x}", codes::READ_TIMEOUT_ERROR))
    );
}

#[test]
fn answer_errors() {
    let (reader, _mock, rec) = ready_reader(DeviceFamily::Uhf);
    rec.clear();

    reader.get_battery_level().unwrap();
    reader.on_data_received(&answer_line(0x05, 0x00, &[0x08, 0x00]));

    reader.get_battery_level().unwrap();
    reader.on_data_received(&answer_line(0x02, 0x12, &[]));

    reader.get_battery_level().unwrap();
    reader.on_data_received("$:0703000800\r\n");

    assert_eq!(
        rec.events(),
        vec![
            result(CommandCode::GetBatteryLevel, codes::ANSWER_MISMATCH_ERROR),
            result(CommandCode::GetBatteryLevel, 0x0012),
            result(CommandCode::GetBatteryLevel, codes::ANSWER_WRONG_FORMAT_ERROR),
        ]
    );
    assert_eq!(reader.status(), LinkStatus::Ready);
}

#[test]
fn empty_notification_abandons_the_command_silently() {
    let (reader, _mock, rec) = ready_reader(DeviceFamily::Uhf);
    reader.get_battery_level().unwrap();
    rec.clear();
    reader.on_data_received("");
    assert_eq!(reader.status(), LinkStatus::Ready);
    assert!(rec.events().is_empty());
}

#[test]
fn tunnel_answer_type_must_match() {
    let (reader, _mock, rec) = ready_reader(DeviceFamily::Hf);
    rec.clear();

    // Command answer to a tunnel request
    reader.iso15693_tunnel(&[0x02, 0x20, 0x00]).unwrap();
    reader.on_data_received("$:040100\r\n");

    // Non-zero command answer to a tunnel request carries the device code
    reader.iso15693_tunnel(&[0x02, 0x20, 0x00]).unwrap();
    reader.on_data_received("$:040105\r\n");

    // Tunnel answer to a command request
    reader.get_battery_level().unwrap();
    reader.on_data_received("#:0011\r\n");

    assert_eq!(
        rec.events(),
        vec![
            result(CommandCode::Iso15693Tunnel, codes::ANSWER_MISMATCH_ERROR),
            result(CommandCode::Iso15693Tunnel, 0x0005),
            result(CommandCode::GetBatteryLevel, codes::ANSWER_MISMATCH_ERROR),
        ]
    );
}

#[test]
fn tunnel_answer_must_match_encryption() {
    let (reader, _mock, rec) = ready_reader(DeviceFamily::Hf);
    rec.clear();

    reader.iso15693_tunnel(&[0x02, 0x20, 0x00]).unwrap();
    reader.on_data_received("%:0011\r\n");
    assert_eq!(reader.status(), LinkStatus::Ready);

    reader.iso15693_encrypted_tunnel(&[0x02, 0x20, 0x00]).unwrap();
    reader.on_data_received("#:0011\r\n");

    reader.iso15693_encrypted_tunnel(&[0x02, 0x20, 0x00]).unwrap();
    reader.on_data_received("%:0011\r\n");

    assert_eq!(
        rec.events(),
        vec![
            result(CommandCode::Iso15693Tunnel, codes::ANSWER_MISMATCH_ERROR),
            result(CommandCode::Iso15693EncryptedTunnel, codes::ANSWER_MISMATCH_ERROR),
            "reader:tunnel 0011".to_string(),
        ]
    );
}

#[test]
fn staged_mode_is_discarded_on_failure() {
    let (reader, _mock, _rec) = ready_reader(DeviceFamily::Uhf);
    reader.set_inventory_mode(InventoryMode::Scan).unwrap();
    reader.on_timeout();
    assert_eq!(reader.inventory_mode(), InventoryMode::Normal);

    reader.set_inventory_mode(InventoryMode::Scan).unwrap();
    reader.on_data_received(&answer_line(0x02, 0x00, &[]));
    assert_eq!(reader.inventory_mode(), InventoryMode::Scan);
}
