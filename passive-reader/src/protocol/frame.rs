// passive-reader/src/protocol/frame.rs

use crate::constants::{
    ANSWER_MIN_LEN, COMMAND_MARKER, ENCRYPTED_TUNNEL_MARKER, EVENT_MARKER, EVENT_MIN_LEN,
    MARKER_LEN, TRANSPARENT_MARKER, TUNNEL_MARKER,
};
use crate::utils::{hex_byte_at, hex_to_bytes};

/// Decoded answer line.
///
/// Body layout (after the two-character marker):
/// `LL SS RR D*`: length, sequence, return code, payload, all hex pairs.
/// `LL` counts the characters that follow it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    pub length: u8,
    pub sequence: u8,
    pub return_code: u8,
    pub data: Vec<u8>,
}

impl Answer {
    /// Decode an answer body. Returns `None` unless the body is at least six
    /// characters long and its length field matches. With `odd_length_fix`
    /// an odd declared length is bumped by one before the comparison.
    pub fn decode(body: &str, odd_length_fix: bool) -> Option<Self> {
        if body.len() < ANSWER_MIN_LEN {
            return None;
        }
        let declared = hex_byte_at(body, 0);
        let mut expected = declared as usize;
        if odd_length_fix && expected % 2 == 1 {
            expected += 1;
        }
        if expected != body.len() - 2 {
            return None;
        }
        Some(Self {
            length: declared,
            sequence: hex_byte_at(body, 2),
            return_code: hex_byte_at(body, 4),
            data: hex_to_bytes(body.get(ANSWER_MIN_LEN..).unwrap_or("")),
        })
    }

    pub fn is_success(&self) -> bool {
        self.return_code == crate::constants::RETURN_CODE_SUCCESS
    }
}

/// Decoded asynchronous event line.
///
/// Body layout: `LL NN EE FF D*`: length, event number, event code,
/// feature code, payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub number: u8,
    pub event_code: u8,
    pub feature_code: u8,
    pub data: Vec<u8>,
}

impl Event {
    pub fn decode(body: &str) -> Option<Self> {
        if body.len() < EVENT_MIN_LEN {
            return None;
        }
        if hex_byte_at(body, 0) as usize != body.len() - 2 {
            return None;
        }
        Some(Self {
            number: hex_byte_at(body, 2),
            event_code: hex_byte_at(body, 4),
            feature_code: hex_byte_at(body, 6),
            data: hex_to_bytes(body.get(EVENT_MIN_LEN..).unwrap_or("")),
        })
    }
}

/// What a received line is, judged by its marker. Each variant carries
/// the body that follows the marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    Answer(&'a str),
    Transparent(&'a str),
    Tunnel { encrypted: bool, body: &'a str },
    Event(&'a str),
    Inventory(&'a str),
}

/// Classify a single received line (without its terminator).
pub fn classify_line(line: &str) -> LineKind<'_> {
    let body = || line.get(MARKER_LEN..).unwrap_or("");
    if line.starts_with(COMMAND_MARKER) {
        LineKind::Answer(body())
    } else if line.starts_with(TRANSPARENT_MARKER) {
        LineKind::Transparent(body())
    } else if line.starts_with(TUNNEL_MARKER) {
        LineKind::Tunnel {
            encrypted: false,
            body: body(),
        }
    } else if line.starts_with(ENCRYPTED_TUNNEL_MARKER) {
        LineKind::Tunnel {
            encrypted: true,
            body: body(),
        }
    } else if line.starts_with(EVENT_MARKER) {
        LineKind::Event(body())
    } else {
        LineKind::Inventory(line)
    }
}

/// Split a transport notification into non-empty lines.
pub fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split(['\r', '\n']).map(str::trim).filter(|l| !l.is_empty())
}
