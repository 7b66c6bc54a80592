#[path = "../common/mod.rs"]
mod common;

use common::{answer_line, ready_reader};
use passive_reader::error::codes;
use passive_reader::prelude::*;
use passive_reader::tag::{epc, iso15693};

#[test]
fn every_epc_operation_reports_to_its_callback() {
    let (reader, _mock, rec) = ready_reader(DeviceFamily::Uhf);
    let t = common::fixtures::sample_epc_tag();
    let id = t.extended_id();
    let pw: &[u8] = &[0x11, 0x22, 0x33, 0x44];
    rec.clear();

    let mut seq = 0x01;
    let mut answer = |rc: u8, data: &[u8]| {
        reader.on_data_received(&answer_line(seq, rc, data));
        seq += 1;
    };

    epc::write(&reader, &t, epc::MemoryBank::User, 0, &[0xAB, 0xCD], None).unwrap();
    answer(0x00, &[]);
    epc::lock(&reader, &t, epc::LockTarget::Epc, epc::LockAction::Lock, Some(pw)).unwrap();
    answer(0x02, &[]);
    epc::kill(&reader, &t, pw).unwrap();
    answer(0x00, &[]);
    epc::write_id(&reader, &t, &[0xAA; 12], Some(pw)).unwrap();
    answer(0x00, &[]);
    epc::read_tid(&reader, &t, 2, None).unwrap();
    answer(0x00, &[0xE2, 0x80, 0x11, 0x60]);
    epc::write_kill_password(&reader, &t, pw, None).unwrap();
    answer(0x00, &[]);
    epc::write_access_password(&reader, &t, pw, Some(pw)).unwrap();
    answer(0x04, &[]);

    assert_eq!(
        rec.events(),
        vec![
            format!("tag:write {} 0x0000", id),
            format!("tag:lock {} {:#06x}", id, codes::TAG_MEMORY_LOCKED_ERROR),
            format!("tag:kill {} 0x0000", id),
            format!("tag:write_id {} 0x0000", id),
            format!("tag:read_tid {} 0x0000 Some(\"E2801160\")", id),
            format!("tag:write_password {} 0x0000", id),
            format!("tag:write_password {} {:#06x}", id, codes::TAG_WRONG_PASSWORD_ERROR),
        ]
    );
}

#[test]
fn iso15693_lock_and_write() {
    let (reader, mock, rec) = ready_reader(DeviceFamily::Hf);
    let t = common::fixtures::sample_iso15693_tag();
    rec.clear();
    iso15693::write(&reader, &t, 1, &[0xCA, 0xFE, 0xBA, 0xBE]).unwrap();
    assert!(mock.last_frame().unwrap().ends_with("0101CAFEBABE"));
    reader.on_data_received(&answer_line(0x01, 0x00, &[]));
    iso15693::lock(&reader, &t, 1).unwrap();
    reader.on_data_received(&answer_line(0x02, 0x00, &[]));
    assert_eq!(
        rec.events(),
        vec![
            format!("tag:write {} 0x0000", t.extended_id()),
            format!("tag:lock {} 0x0000", t.extended_id()),
        ]
    );
}
