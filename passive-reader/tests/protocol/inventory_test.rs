#[path = "../common/mod.rs"]
mod common;

use passive_reader::protocol::inventory::{decode_chunk, decode_line, InventoryContext};
use passive_reader::tag::Tag;
use passive_reader::types::{DeviceFamily, InventoryFormat};

fn uhf(format: InventoryFormat) -> InventoryContext {
    InventoryContext::new(DeviceFamily::Uhf, format)
}

fn hf() -> InventoryContext {
    InventoryContext::new(DeviceFamily::Hf, InventoryFormat::default())
}

#[test]
fn uhf_line_with_pc_and_rssi() {
    let line = common::fixtures::uhf_inventory_line();
    match decode_line(&line, uhf(InventoryFormat::EpcAndPc)) {
        Some(Tag::Epc(t)) => {
            assert_eq!(t, common::fixtures::sample_epc_tag());
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn uhf_line_without_pc_keeps_whole_identifier() {
    let line = common::fixtures::uhf_inventory_line();
    let tag = decode_line(&line, uhf(InventoryFormat::EpcOnly)).unwrap();
    match tag {
        Tag::EpcSimple(t) => {
            assert_eq!(&t.id[..2], &[0x30, 0x00]);
            assert_eq!(t.rssi, Some(-52));
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn hf_lines_are_told_apart_by_length() {
    let iso15693 = decode_line(&common::fixtures::hf_inventory_line(), hf()).unwrap();
    assert!(matches!(iso15693, Tag::Iso15693(_)));
    assert_eq!(iso15693.rssi(), None);

    let iso14443a = decode_line("045A6B12345680", hf()).unwrap();
    assert_eq!(
        iso14443a,
        Tag::Iso14443a(common::fixtures::sample_iso14443a_tag())
    );
}

#[test]
fn malformed_lines_are_dropped() {
    let ctx = uhf(InventoryFormat::EpcAndPc);
    for line in ["", "3000", "3000E2001", "3000XYZ0", "3000E200 C", "3000E200 ZZ"] {
        assert_eq!(decode_line(line, ctx), None, "{:?}", line);
    }
}

#[test]
fn chunk_skips_prefixed_lines_and_keeps_order() {
    let text = format!(
        "{}\r\n$:0400000\r\nI:080102030\r\n3000AAAA BBBB\r\n3000E2000001 10\r\n",
        common::fixtures::uhf_inventory_line()
    );
    let tags = decode_chunk(&text, uhf(InventoryFormat::EpcAndPc));
    assert_eq!(tags.len(), 2);
    assert_eq!(tags[0], Tag::Epc(common::fixtures::sample_epc_tag()));
    assert_eq!(tags[1].id(), &[0xE2, 0x00, 0x00, 0x01]);
    assert_eq!(tags[1].rssi(), Some(0x10));
}
