use passive_reader::error::codes;
use passive_reader::protocol::{CommandCode, Response};
use passive_reader::types::{HmiTrigger, LedSettings};

#[test]
fn battery_level_is_scaled_to_volts() {
    match Response::decode(CommandCode::GetBatteryLevel, &[0x08, 0x00]).unwrap() {
        Response::BatteryLevel(v) => assert!((v - 3.3).abs() < 1e-4),
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn connection_interval_in_milliseconds() {
    let r = Response::decode(CommandCode::GetConnectionInterval, &[0x00, 0x06, 0x00, 0x18]).unwrap();
    assert_eq!(
        r,
        Response::ConnectionInterval {
            min_ms: 7.5,
            max_ms: 30.0
        }
    );
}

#[test]
fn name_drops_nul_padding() {
    let r = Response::decode(CommandCode::GetName, b"DESK-01\0\0\0").unwrap();
    assert_eq!(r, Response::Name("DESK-01".into()));
}

#[test]
fn mac_address_needs_six_bytes() {
    let r = Response::decode(CommandCode::GetMacAddress, &[1, 2, 3, 4, 5, 6]).unwrap();
    assert_eq!(r, Response::MacAddress([1, 2, 3, 4, 5, 6]));
    let err = Response::decode(CommandCode::GetMacAddress, &[1, 2, 3]).unwrap_err();
    assert_eq!(err.code(), codes::ANSWER_WRONG_FORMAT_ERROR);
}

#[test]
fn led_settings_for_trigger() {
    let r = Response::decode(CommandCode::GetLed, &[0x01, 0x02, 0x00, 0x0A, 0x00, 0x05, 0x03]).unwrap();
    match r {
        Response::Led { trigger, settings } => {
            assert_eq!(trigger, HmiTrigger::Command);
            assert_eq!(LedSettings::decode(&settings.encode()).unwrap(), settings);
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn set_commands_decode_to_ack() {
    for code in [
        CommandCode::SetShutdownTime,
        CommandCode::DefaultSetup,
        CommandCode::SetAutoOff,
    ] {
        assert_eq!(Response::decode(code, &[]).unwrap(), Response::Ack);
    }
}

#[test]
fn tag_reads_carry_memory() {
    assert_eq!(
        Response::decode(CommandCode::EpcRead, &[0xDE, 0xAD]).unwrap(),
        Response::TagData(vec![0xDE, 0xAD])
    );
    assert_eq!(
        Response::decode(CommandCode::EpcKill, &[]).unwrap(),
        Response::Ack
    );
}
