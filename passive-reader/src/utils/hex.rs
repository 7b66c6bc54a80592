//! Hexadecimal helpers for the ASCII-hex wire format.
//!
//! Frames are written with upper-case digits. Decoding comes in two
//! flavours: the lenient per-pair decoder used on received lines (a bad
//! pair reads as `0`, frame validity is decided by the length field) and a
//! strict parser for caller-supplied strings.

/// Convert a byte slice to an upper-case hex string without separators.
///
/// Example: `&[0xde, 0xad]` -> `"DEAD"`
pub fn bytes_to_hex(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        use std::fmt::Write;
        // write! never fails writing to a String
        let _ = write!(&mut s, "{:02X}", b);
    }
    s
}

fn nibble(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

/// Decode one hex pair. A malformed pair decodes to `0` instead of failing.
pub fn hex_to_byte(hi: u8, lo: u8) -> u8 {
    match (nibble(hi), nibble(lo)) {
        (Some(h), Some(l)) => (h << 4) | l,
        _ => 0,
    }
}

/// Decode the pair starting at byte offset `idx` of `s`, leniently.
/// Out-of-range offsets decode to `0`.
pub fn hex_byte_at(s: &str, idx: usize) -> u8 {
    let b = s.as_bytes();
    match (b.get(idx), b.get(idx + 1)) {
        (Some(&hi), Some(&lo)) => hex_to_byte(hi, lo),
        _ => 0,
    }
}

/// Leniently decode a hex string pair by pair. A trailing odd digit is
/// ignored.
pub fn hex_to_bytes(s: &str) -> Vec<u8> {
    s.as_bytes()
        .chunks_exact(2)
        .map(|pair| hex_to_byte(pair[0], pair[1]))
        .collect()
}

/// True when `s` is non-empty and every character is an ASCII hex digit.
pub fn is_hex(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|c| c.is_ascii_hexdigit())
}

/// Parse a hex string into bytes.
///
/// Accepts strings with or without ASCII whitespace. Returns an error message
/// string on parse failure.
pub fn parse_hex(s: &str) -> Result<Vec<u8>, String> {
    let cleaned: Vec<u8> = s.bytes().filter(|c| !c.is_ascii_whitespace()).collect();

    if cleaned.len() % 2 != 0 {
        return Err("hex string has odd length".to_string());
    }

    cleaned
        .chunks_exact(2)
        .map(|pair| match (nibble(pair[0]), nibble(pair[1])) {
            (Some(h), Some(l)) => Ok((h << 4) | l),
            _ => Err(format!(
                "invalid hex pair '{}'",
                String::from_utf8_lossy(pair)
            )),
        })
        .collect()
}
