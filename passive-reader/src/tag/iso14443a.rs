// passive-reader/src/tag/iso14443a.rs

//! ISO14443A (HF proximity) tag operations on 4-byte pages.

use crate::protocol::codec::{append_payload, encode_command};
use crate::protocol::commands::CommandCode;
use crate::reader::Reader;
use crate::{Error, Result};

use super::validate;
use super::Iso14443aTag;

pub const PAGE_LEN: usize = 4;

fn header(
    seq: &mut crate::protocol::sequence::SequenceCounter,
    code: CommandCode,
    tag: &Iso14443aTag,
    descriptor: &[u8],
) -> Result<String> {
    let len = u8::try_from(tag.id.len())
        .map_err(|_| Error::InvalidParameter(format!("tag ID of {} bytes", tag.id.len())))?;
    let frame = encode_command(seq, code.as_u8(), &[len])?;
    let frame = append_payload(&frame, &tag.id)?;
    append_payload(&frame, descriptor)
}

pub fn read(reader: &Reader, tag: &Iso14443aTag, address: u16, blocks: u8) -> Result<()> {
    let code = CommandCode::Iso14443aRead;
    reader.send_tag_operation(code, tag.extended_id(), |seq| {
        let address = validate::address(address)?;
        let blocks = validate::blocks(blocks)?;
        header(seq, code, tag, &[address, blocks])
    })
}

pub fn write(reader: &Reader, tag: &Iso14443aTag, address: u16, data: &[u8]) -> Result<()> {
    let code = CommandCode::Iso14443aWrite;
    reader.send_tag_operation(code, tag.extended_id(), |seq| {
        let address = validate::address(address)?;
        validate::write_data(data, PAGE_LEN)?;
        let pages = (data.len() / PAGE_LEN) as u8;
        let frame = header(seq, code, tag, &[address, pages])?;
        append_payload(&frame, data)
    })
}
