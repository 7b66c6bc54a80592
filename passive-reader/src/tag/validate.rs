// passive-reader/src/tag/validate.rs

use crate::{Error, Result};

pub const ADDRESS_MAX: u16 = 255;
pub const BLOCKS_MAX: u8 = 50;
pub const PASSWORD_LEN: usize = 4;
pub const NEW_ID_MIN_LEN: usize = 12;
pub const NEW_ID_MAX_LEN: usize = 30;
pub const WRITE_DATA_MAX_LEN: usize = 64;

pub fn address(address: u16) -> Result<u8> {
    u8::try_from(address).map_err(|_| {
        Error::InvalidParameter(format!(
            "memory address {} above {}",
            address, ADDRESS_MAX
        ))
    })
}

pub fn blocks(blocks: u8) -> Result<u8> {
    if blocks > BLOCKS_MAX {
        return Err(Error::InvalidParameter(format!(
            "block count {} above {}",
            blocks, BLOCKS_MAX
        )));
    }
    Ok(blocks)
}

pub fn password(password: &[u8]) -> Result<()> {
    if password.len() != PASSWORD_LEN {
        return Err(Error::InvalidParameter(format!(
            "password must be {} bytes, got {}",
            PASSWORD_LEN,
            password.len()
        )));
    }
    Ok(())
}

pub fn optional_password(password: Option<&[u8]>) -> Result<&[u8]> {
    match password {
        Some(p) => {
            self::password(p)?;
            Ok(p)
        }
        None => Ok(&[]),
    }
}

pub fn new_id(id: &[u8]) -> Result<()> {
    if !(NEW_ID_MIN_LEN..=NEW_ID_MAX_LEN).contains(&id.len()) || id.len() % 2 != 0 {
        return Err(Error::InvalidParameter(format!(
            "new ID must be an even length in {}..={} bytes, got {}",
            NEW_ID_MIN_LEN,
            NEW_ID_MAX_LEN,
            id.len()
        )));
    }
    Ok(())
}

/// Write payloads are whole units of `granularity` bytes (2 for EPC words,
/// 4 for HF blocks) and at most 64 bytes.
pub fn write_data(data: &[u8], granularity: usize) -> Result<()> {
    if data.is_empty() || data.len() > WRITE_DATA_MAX_LEN || data.len() % granularity != 0 {
        return Err(Error::InvalidParameter(format!(
            "write data must be 1..={} bytes in units of {}, got {}",
            WRITE_DATA_MAX_LEN,
            granularity,
            data.len()
        )));
    }
    Ok(())
}
