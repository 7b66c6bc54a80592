// Commonly used tags and wire lines.

use passive_reader::tag::{EpcSimpleTag, EpcTag, Iso14443aTag, Iso15693Tag};

pub fn sample_epc_id() -> Vec<u8> {
    hex::decode("E2801160600002054E2A1C31").unwrap()
}

pub fn sample_epc_tag() -> EpcTag {
    EpcTag {
        pc: 0x3000,
        id: sample_epc_id(),
        rssi: Some(-52),
    }
}

pub fn sample_epc_simple_tag() -> EpcSimpleTag {
    EpcSimpleTag {
        id: sample_epc_id(),
        rssi: None,
    }
}

pub fn sample_iso15693_tag() -> Iso15693Tag {
    Iso15693Tag {
        id: [0xE0, 0x04, 0x01, 0x50, 0x8A, 0x2B, 0x3C, 0x4D],
    }
}

pub fn sample_iso14443a_tag() -> Iso14443aTag {
    Iso14443aTag {
        id: vec![0x04, 0x5A, 0x6B, 0x12, 0x34, 0x56, 0x80],
    }
}

/// UHF inventory line, PC then EPC, with an RSSI of -52 (0xCC).
pub fn uhf_inventory_line() -> String {
    format!("3000{} CC", hex::encode_upper(sample_epc_id()))
}

pub fn hf_inventory_line() -> String {
    hex::encode_upper(sample_iso15693_tag().id)
}
