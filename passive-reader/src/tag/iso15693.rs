// passive-reader/src/tag/iso15693.rs

//! ISO15693 (HF vicinity) tag operations. Tags are addressed by their
//! 8-byte UID, blocks are 4 bytes.

use crate::protocol::codec::{append_payload, encode_command};
use crate::protocol::commands::CommandCode;
use crate::reader::Reader;
use crate::Result;

use super::validate;
use super::Iso15693Tag;

pub const BLOCK_LEN: usize = 4;

fn params(tag: &Iso15693Tag, descriptor: &[u8]) -> Vec<u8> {
    let mut p = Vec::with_capacity(tag.id.len() + descriptor.len());
    p.extend_from_slice(&tag.id);
    p.extend_from_slice(descriptor);
    p
}

pub fn read(reader: &Reader, tag: &Iso15693Tag, address: u16, blocks: u8) -> Result<()> {
    let code = CommandCode::Iso15693Read;
    reader.send_tag_operation(code, tag.extended_id(), |seq| {
        let address = validate::address(address)?;
        let blocks = validate::blocks(blocks)?;
        encode_command(seq, code.as_u8(), &params(tag, &[address, blocks]))
    })
}

/// Write `data`, a whole number of blocks, starting at block `address`.
pub fn write(reader: &Reader, tag: &Iso15693Tag, address: u16, data: &[u8]) -> Result<()> {
    let code = CommandCode::Iso15693Write;
    reader.send_tag_operation(code, tag.extended_id(), |seq| {
        let address = validate::address(address)?;
        validate::write_data(data, BLOCK_LEN)?;
        let blocks = (data.len() / BLOCK_LEN) as u8;
        let frame = encode_command(seq, code.as_u8(), &params(tag, &[address, blocks]))?;
        append_payload(&frame, data)
    })
}

/// Lock one block. Irreversible on the tag.
pub fn lock(reader: &Reader, tag: &Iso15693Tag, address: u16) -> Result<()> {
    let code = CommandCode::Iso15693Lock;
    reader.send_tag_operation(code, tag.extended_id(), |seq| {
        let address = validate::address(address)?;
        encode_command(seq, code.as_u8(), &params(tag, &[address]))
    })
}
