// passive-reader/src/tag/mod.rs

//! Tag records produced by inventories, and the memory operations that
//! can be launched on them.
//!
//! Tags are plain values. Operations are free functions taking the
//! [`Reader`] the tag was seen by; outcomes arrive through the reader's
//! [`ResponseListener`](crate::reader::ResponseListener), keyed by the
//! tag's [`ExtendedTagId`].

pub mod epc;
pub mod iso14443a;
pub mod iso15693;
mod validate;

use crate::reader::Reader;
use crate::types::{DeviceFamily, ExtendedTagId};
use crate::Result;

/// EPC Gen2 tag inventoried with its protocol-control word.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EpcTag {
    pub pc: u16,
    pub id: Vec<u8>,
    pub rssi: Option<i8>,
}

/// EPC Gen2 tag inventoried without PC.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EpcSimpleTag {
    pub id: Vec<u8>,
    pub rssi: Option<i8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Iso15693Tag {
    pub id: [u8; 8],
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Iso14443aTag {
    pub id: Vec<u8>,
}

/// A tag seen during an inventory.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Tag {
    Epc(EpcTag),
    EpcSimple(EpcSimpleTag),
    Iso15693(Iso15693Tag),
    Iso14443a(Iso14443aTag),
}

impl EpcTag {
    /// PC‖ID
    pub fn extended_id(&self) -> ExtendedTagId {
        let mut bytes = self.pc.to_be_bytes().to_vec();
        bytes.extend_from_slice(&self.id);
        ExtendedTagId::from_bytes(bytes)
    }
}

impl EpcSimpleTag {
    pub fn extended_id(&self) -> ExtendedTagId {
        ExtendedTagId::from(self.id.as_slice())
    }
}

impl Iso15693Tag {
    pub fn extended_id(&self) -> ExtendedTagId {
        ExtendedTagId::from(&self.id[..])
    }
}

impl Iso14443aTag {
    pub fn extended_id(&self) -> ExtendedTagId {
        ExtendedTagId::from(self.id.as_slice())
    }
}

impl Tag {
    /// Key under which operation results for this tag are reported.
    pub fn extended_id(&self) -> ExtendedTagId {
        match self {
            Tag::Epc(t) => t.extended_id(),
            Tag::EpcSimple(t) => t.extended_id(),
            Tag::Iso15693(t) => t.extended_id(),
            Tag::Iso14443a(t) => t.extended_id(),
        }
    }

    /// Identifier without PC.
    pub fn id(&self) -> &[u8] {
        match self {
            Tag::Epc(t) => &t.id,
            Tag::EpcSimple(t) => &t.id,
            Tag::Iso15693(t) => &t.id,
            Tag::Iso14443a(t) => &t.id,
        }
    }

    /// Signal strength; HF readers do not report it.
    pub fn rssi(&self) -> Option<i8> {
        match self {
            Tag::Epc(t) => t.rssi,
            Tag::EpcSimple(t) => t.rssi,
            Tag::Iso15693(_) | Tag::Iso14443a(_) => None,
        }
    }

    pub fn family(&self) -> DeviceFamily {
        match self {
            Tag::Epc(_) | Tag::EpcSimple(_) => DeviceFamily::Uhf,
            Tag::Iso15693(_) | Tag::Iso14443a(_) => DeviceFamily::Hf,
        }
    }
}

/// Read `blocks` blocks starting at `address`, whatever the tag family.
///
/// EPC tags are read from their user memory bank without password.
pub fn read(reader: &Reader, tag: &Tag, address: u16, blocks: u8) -> Result<()> {
    match tag {
        Tag::Epc(t) => epc::read(reader, t, epc::MemoryBank::User, address, blocks, None),
        Tag::EpcSimple(t) => epc::read(reader, t, epc::MemoryBank::User, address, blocks, None),
        Tag::Iso15693(t) => iso15693::read(reader, t, address, blocks),
        Tag::Iso14443a(t) => iso14443a::read(reader, t, address, blocks),
    }
}

/// Write `data` starting at `address`, whatever the tag family.
///
/// EPC tags are written to their user memory bank without password.
pub fn write(reader: &Reader, tag: &Tag, address: u16, data: &[u8]) -> Result<()> {
    match tag {
        Tag::Epc(t) => epc::write(reader, t, epc::MemoryBank::User, address, data, None),
        Tag::EpcSimple(t) => epc::write(reader, t, epc::MemoryBank::User, address, data, None),
        Tag::Iso15693(t) => iso15693::write(reader, t, address, data),
        Tag::Iso14443a(t) => iso14443a::write(reader, t, address, data),
    }
}
