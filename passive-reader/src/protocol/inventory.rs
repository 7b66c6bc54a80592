// passive-reader/src/protocol/inventory.rs

//! Decoding of the raw tag-inventory stream.
//!
//! Inventory lines carry no marker: they are the tag identifier in hex,
//! optionally followed by a space and a two-digit RSSI on UHF readers.

use crate::constants::{
    INVENTORY_MIN_BODY, INVENTORY_MIN_BODY_WITH_RSSI, PC_HEX_LEN, RSSI_SEPARATOR,
};
use crate::protocol::frame::{classify_line, split_lines, LineKind};
use crate::tag::{EpcSimpleTag, EpcTag, Iso14443aTag, Iso15693Tag, Tag};
use crate::types::{DeviceFamily, InventoryFormat};
use crate::utils::{hex_byte_at, hex_to_bytes, is_hex};

const ISO15693_ID_LEN: usize = 8;
const RSSI_HEX_LEN: usize = 2;

/// What the decoder needs to know about the reader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InventoryContext {
    pub family: DeviceFamily,
    pub format: InventoryFormat,
}

impl InventoryContext {
    pub fn new(family: DeviceFamily, format: InventoryFormat) -> Self {
        Self { family, format }
    }
}

fn split_rssi(line: &str) -> (&str, Option<&str>) {
    match line.split_once(RSSI_SEPARATOR) {
        Some((body, suffix)) => (body, Some(suffix)),
        None => (line, None),
    }
}

fn decode_hf(body: &str) -> Option<Tag> {
    if body.is_empty() || body.len() % 2 != 0 {
        return None;
    }
    let id = hex_to_bytes(body);
    if id.len() == ISO15693_ID_LEN {
        let mut fixed = [0u8; ISO15693_ID_LEN];
        fixed.copy_from_slice(&id);
        Some(Tag::Iso15693(Iso15693Tag { id: fixed }))
    } else {
        Some(Tag::Iso14443a(Iso14443aTag { id }))
    }
}

fn decode_uhf(body: &str, rssi: Option<i8>, format: InventoryFormat) -> Option<Tag> {
    let min = if rssi.is_some() {
        INVENTORY_MIN_BODY_WITH_RSSI
    } else {
        INVENTORY_MIN_BODY
    };
    if body.len() <= min || body.len() % 2 != 0 {
        return None;
    }
    match format {
        InventoryFormat::EpcAndPc => {
            let pc = u16::from_be_bytes([hex_byte_at(body, 0), hex_byte_at(body, 2)]);
            let id = hex_to_bytes(&body[PC_HEX_LEN..]);
            Some(Tag::Epc(EpcTag { pc, id, rssi }))
        }
        InventoryFormat::EpcOnly => Some(Tag::EpcSimple(EpcSimpleTag {
            id: hex_to_bytes(body),
            rssi,
        })),
    }
}

/// Decode one unprefixed inventory line. Returns `None` when the line is
/// not a valid tag report for this reader.
pub fn decode_line(line: &str, ctx: InventoryContext) -> Option<Tag> {
    let (body, suffix) = split_rssi(line.trim());
    if !is_hex(body) {
        return None;
    }
    match ctx.family {
        DeviceFamily::Hf => decode_hf(body),
        DeviceFamily::Uhf => {
            let rssi = match suffix {
                None => None,
                Some(s) if s.len() == RSSI_HEX_LEN && is_hex(s) => Some(hex_byte_at(s, 0) as i8),
                Some(_) => return None,
            };
            decode_uhf(body, rssi, ctx.format)
        }
    }
}

/// Decode every inventory line of a notification, in stream order.
///
/// Prefixed lines (answers, tunnel answers, events) are skipped; a line
/// that fails validation is dropped without affecting the others.
pub fn decode_chunk(text: &str, ctx: InventoryContext) -> Vec<Tag> {
    split_lines(text)
        .filter_map(|line| match classify_line(line) {
            LineKind::Inventory(body) => decode_line(body, ctx),
            _ => None,
        })
        .collect()
}
