use passive_reader::error::codes;
use passive_reader::protocol::codec::{append_payload, decode_answer, decode_event, encode_command};
use passive_reader::protocol::{Command, SequenceCounter};
use passive_reader::types::HmiTrigger;
use proptest::prelude::*;

#[test]
fn identification_frame() {
    let mut seq = SequenceCounter::new();
    assert_eq!(Command::GetStandard.encode(&mut seq).unwrap(), "$:040030");
    assert_eq!(seq.peek(), 1);
}

#[test]
fn frames_take_consecutive_sequences() {
    let mut seq = SequenceCounter::new();
    let frames: Vec<String> = [
        Command::GetFirmwareVersion,
        Command::GetAutoOff,
        Command::GetSound(HmiTrigger::Error),
    ]
    .iter()
    .map(|c| c.encode(&mut seq).unwrap())
    .collect();
    assert_eq!(frames, vec!["$:040016", "$:040144", "$:06024602"]);
}

#[test]
fn tunnel_frames_carry_no_sequence() {
    let mut seq = SequenceCounter::new();
    let plain = Command::Iso15693Tunnel {
        payload: vec![0x02, 0x20, 0x00],
    };
    let encrypted = Command::Iso15693EncryptedTunnel {
        payload: vec![0xAB],
    };
    assert_eq!(plain.encode(&mut seq).unwrap(), "#:022000");
    assert_eq!(encrypted.encode(&mut seq).unwrap(), "%:AB");
    assert_eq!(seq.peek(), 0);
}

#[test]
fn transparent_frame_has_no_command_code() {
    let mut seq = SequenceCounter::new();
    let frame = Command::Transparent {
        payload: vec![0x10, 0x20],
    }
    .encode(&mut seq)
    .unwrap();
    assert_eq!(frame, "Z:06001020");
}

#[test]
fn invalid_parameters_are_rejected_before_encoding() {
    let mut seq = SequenceCounter::new();
    let bad = [
        Command::SetShutdownTime { seconds: 9 },
        Command::SetShutdownTime { seconds: 64801 },
        Command::SetName(String::new()),
        Command::SetConnectionInterval {
            min_ms: 30.0,
            max_ms: 7.5,
        },
        Command::WriteUserMemory {
            block: 0,
            data: vec![0; 63],
        },
        Command::Iso15693Tunnel { payload: vec![] },
    ];
    for command in bad {
        let err = command.encode(&mut seq).unwrap_err();
        assert_eq!(err.code(), codes::WRONG_PARAMETER_ERROR, "{:?}", command);
    }
}

#[test]
fn append_rewrites_length_only() {
    let mut seq = SequenceCounter::new();
    let frame = encode_command(&mut seq, 0x60, &[0x30, 0x00]).unwrap();
    assert_eq!(frame, "$:0800603000");
    let frame = append_payload(&frame, &[0xE2, 0x00]).unwrap();
    assert_eq!(frame, "$:0C00603000E200");
    assert!(append_payload("#:AB", &[0x01]).is_err());
}

#[test]
fn odd_length_answers() {
    // The reader under-reports the length of some read answers by one.
    let body = "0B0100AABBCCDD";
    assert!(decode_answer(body, false).is_none());
    let answer = decode_answer(body, true).unwrap();
    assert_eq!(answer.sequence, 0x01);
    assert_eq!(answer.data, vec![0xAA, 0xBB, 0xCC, 0xDD]);
}

#[test]
fn short_lines_are_not_answers_or_events() {
    assert!(decode_answer("0401", false).is_none());
    assert!(decode_event("060102").is_none());
    let event = decode_event("0A01020304AB").unwrap();
    assert_eq!(
        (event.number, event.event_code, event.feature_code),
        (0x01, 0x02, 0x03)
    );
    assert_eq!(event.data, vec![0x04, 0xAB]);
}

proptest! {
    #[test]
    fn length_field_counts_following_characters(
        start in any::<u8>(),
        code in any::<u8>(),
        params in proptest::collection::vec(any::<u8>(), 0..100),
    ) {
        let mut seq = SequenceCounter::new();
        for _ in 0..start {
            seq.next();
        }
        let frame = encode_command(&mut seq, code, &params).unwrap();
        let declared = usize::from_str_radix(&frame[2..4], 16).unwrap();
        prop_assert_eq!(declared, frame.len() - 4);
        prop_assert_eq!(u8::from_str_radix(&frame[4..6], 16).unwrap(), start);
    }
}
