// passive-reader/src/tag/epc.rs

//! EPC Gen2 (UHF) tag operations.
//!
//! Every operation exists in two flavors: tags inventoried with their PC
//! word ([`EpcTag`]) are addressed by PC‖ID, tags inventoried without
//! it ([`EpcSimpleTag`]) by ID length‖ID. Both are accepted through
//! [`EpcRef`].

use crate::protocol::codec::{append_payload, encode_command};
use crate::protocol::commands::CommandCode;
use crate::protocol::sequence::SequenceCounter;
use crate::reader::Reader;
use crate::types::ExtendedTagId;
use crate::{Error, Result};

use super::validate;
use super::{EpcSimpleTag, EpcTag};

/// EPC Gen2 memory banks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum MemoryBank {
    /// Kill and access passwords
    #[display(fmt = "reserved")]
    Reserved = 0x00,
    #[display(fmt = "EPC")]
    Epc = 0x01,
    #[display(fmt = "TID")]
    Tid = 0x02,
    #[display(fmt = "user")]
    User = 0x03,
}

/// Memory area a lock applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum LockTarget {
    KillPassword = 0x00,
    AccessPassword = 0x01,
    Epc = 0x02,
    Tid = 0x03,
    User = 0x04,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum LockAction {
    Unlock = 0x00,
    Lock = 0x01,
    PermanentUnlock = 0x02,
    PermanentLock = 0x03,
}

/// Borrowed EPC tag of either inventory format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EpcRef<'a> {
    Full(&'a EpcTag),
    Simple(&'a EpcSimpleTag),
}

impl<'a> From<&'a EpcTag> for EpcRef<'a> {
    fn from(tag: &'a EpcTag) -> Self {
        EpcRef::Full(tag)
    }
}

impl<'a> From<&'a EpcSimpleTag> for EpcRef<'a> {
    fn from(tag: &'a EpcSimpleTag) -> Self {
        EpcRef::Simple(tag)
    }
}

impl EpcRef<'_> {
    pub fn id(&self) -> &[u8] {
        match self {
            EpcRef::Full(t) => &t.id,
            EpcRef::Simple(t) => &t.id,
        }
    }

    pub fn extended_id(&self) -> ExtendedTagId {
        match self {
            EpcRef::Full(t) => t.extended_id(),
            EpcRef::Simple(t) => t.extended_id(),
        }
    }

    fn pick(&self, full: CommandCode, simple: CommandCode) -> CommandCode {
        match self {
            EpcRef::Full(_) => full,
            EpcRef::Simple(_) => simple,
        }
    }

    /// Command header addressing this tag: code, then PC or ID length,
    /// then the ID.
    fn header(&self, sequence: &mut SequenceCounter, code: CommandCode) -> Result<String> {
        let frame = match self {
            EpcRef::Full(t) => encode_command(sequence, code.as_u8(), &t.pc.to_be_bytes())?,
            EpcRef::Simple(t) => {
                let len = u8::try_from(t.id.len()).map_err(|_| {
                    Error::InvalidParameter(format!("tag ID of {} bytes", t.id.len()))
                })?;
                encode_command(sequence, code.as_u8(), &[len])?
            }
        };
        append_payload(&frame, self.id())
    }
}

/// Header, then each part appended in turn.
fn build(
    tag: EpcRef<'_>,
    sequence: &mut SequenceCounter,
    code: CommandCode,
    parts: &[&[u8]],
) -> Result<String> {
    let mut frame = tag.header(sequence, code)?;
    for part in parts {
        if !part.is_empty() {
            frame = append_payload(&frame, part)?;
        }
    }
    Ok(frame)
}

/// Read `blocks` 16-bit words of `bank` starting at word `address`.
pub fn read<'a>(
    reader: &Reader,
    tag: impl Into<EpcRef<'a>>,
    bank: MemoryBank,
    address: u16,
    blocks: u8,
    password: Option<&[u8]>,
) -> Result<()> {
    let tag = tag.into();
    let code = tag.pick(CommandCode::EpcRead, CommandCode::EpcSimpleRead);
    reader.send_tag_operation(code, tag.extended_id(), |seq| {
        let address = validate::address(address)?;
        let blocks = validate::blocks(blocks)?;
        let password = validate::optional_password(password)?;
        build(tag, seq, code, &[&[bank as u8, address, blocks], password])
    })
}

/// Write whole words of `data` into `bank` starting at word `address`.
pub fn write<'a>(
    reader: &Reader,
    tag: impl Into<EpcRef<'a>>,
    bank: MemoryBank,
    address: u16,
    data: &[u8],
    password: Option<&[u8]>,
) -> Result<()> {
    let tag = tag.into();
    let code = tag.pick(CommandCode::EpcWrite, CommandCode::EpcSimpleWrite);
    reader.send_tag_operation(code, tag.extended_id(), |seq| {
        let address = validate::address(address)?;
        validate::write_data(data, 2)?;
        let password = validate::optional_password(password)?;
        let words = (data.len() / 2) as u8;
        build(tag, seq, code, &[&[bank as u8, address, words], data, password])
    })
}

pub fn lock<'a>(
    reader: &Reader,
    tag: impl Into<EpcRef<'a>>,
    target: LockTarget,
    action: LockAction,
    password: Option<&[u8]>,
) -> Result<()> {
    let tag = tag.into();
    let code = tag.pick(CommandCode::EpcLock, CommandCode::EpcSimpleLock);
    reader.send_tag_operation(code, tag.extended_id(), |seq| {
        let password = validate::optional_password(password)?;
        build(tag, seq, code, &[&[target as u8, action as u8], password])
    })
}

/// Permanently disable the tag. A kill always needs the 4-byte kill
/// password.
pub fn kill<'a>(reader: &Reader, tag: impl Into<EpcRef<'a>>, password: &[u8]) -> Result<()> {
    let tag = tag.into();
    let code = tag.pick(CommandCode::EpcKill, CommandCode::EpcSimpleKill);
    reader.send_tag_operation(code, tag.extended_id(), |seq| {
        validate::password(password)?;
        build(tag, seq, code, &[password])
    })
}

/// Replace the tag's EPC with `new_id`.
pub fn write_id<'a>(
    reader: &Reader,
    tag: impl Into<EpcRef<'a>>,
    new_id: &[u8],
    password: Option<&[u8]>,
) -> Result<()> {
    let tag = tag.into();
    let code = tag.pick(CommandCode::EpcWriteId, CommandCode::EpcSimpleWriteId);
    reader.send_tag_operation(code, tag.extended_id(), |seq| {
        validate::new_id(new_id)?;
        let password = validate::optional_password(password)?;
        build(tag, seq, code, &[&[new_id.len() as u8], new_id, password])
    })
}

/// Read `blocks` words of the TID bank.
pub fn read_tid<'a>(
    reader: &Reader,
    tag: impl Into<EpcRef<'a>>,
    blocks: u8,
    password: Option<&[u8]>,
) -> Result<()> {
    let tag = tag.into();
    let code = tag.pick(CommandCode::EpcReadTid, CommandCode::EpcSimpleReadTid);
    reader.send_tag_operation(code, tag.extended_id(), |seq| {
        let blocks = validate::blocks(blocks)?;
        let password = validate::optional_password(password)?;
        build(tag, seq, code, &[&[blocks], password])
    })
}

pub fn write_kill_password<'a>(
    reader: &Reader,
    tag: impl Into<EpcRef<'a>>,
    new_password: &[u8],
    access_password: Option<&[u8]>,
) -> Result<()> {
    let tag = tag.into();
    let code = tag.pick(
        CommandCode::EpcWriteKillPassword,
        CommandCode::EpcSimpleWriteKillPassword,
    );
    write_password(reader, tag, code, new_password, access_password)
}

pub fn write_access_password<'a>(
    reader: &Reader,
    tag: impl Into<EpcRef<'a>>,
    new_password: &[u8],
    access_password: Option<&[u8]>,
) -> Result<()> {
    let tag = tag.into();
    let code = tag.pick(
        CommandCode::EpcWriteAccessPassword,
        CommandCode::EpcSimpleWriteAccessPassword,
    );
    write_password(reader, tag, code, new_password, access_password)
}

fn write_password(
    reader: &Reader,
    tag: EpcRef<'_>,
    code: CommandCode,
    new_password: &[u8],
    access_password: Option<&[u8]>,
) -> Result<()> {
    reader.send_tag_operation(code, tag.extended_id(), |seq| {
        validate::password(new_password)?;
        let access = validate::optional_password(access_password)?;
        build(tag, seq, code, &[new_password, access])
    })
}
