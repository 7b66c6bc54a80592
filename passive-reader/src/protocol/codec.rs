// passive-reader/src/protocol/codec.rs

use crate::constants::{
    COMMAND_MARKER, ENCRYPTED_TUNNEL_MARKER, MARKER_LEN, MAX_LENGTH_FIELD, TRANSPARENT_MARKER,
    TUNNEL_MARKER,
};
use crate::utils::bytes_to_hex;
use crate::{Error, Result};

use super::frame::{Answer, Event};
use super::sequence::SequenceCounter;

/// Write the length field for a frame whose body after the length field
/// is `following` characters long.
fn length_field(following: usize) -> Result<String> {
    if following > MAX_LENGTH_FIELD {
        return Err(Error::InvalidLength {
            expected: MAX_LENGTH_FIELD,
            actual: following,
        });
    }
    Ok(format!("{:02X}", following))
}

fn framed(marker: &str, rest: &str) -> Result<String> {
    let mut out = String::with_capacity(MARKER_LEN + 2 + rest.len());
    out.push_str(marker);
    out.push_str(&length_field(rest.len())?);
    out.push_str(rest);
    Ok(out)
}

/// Encode a reader command: `$:` LL SS CC hex(params).
///
/// Takes the next value of `sequence`, even when the frame turns out too
/// long; callers validate parameter sizes first.
pub fn encode_command(sequence: &mut SequenceCounter, code: u8, params: &[u8]) -> Result<String> {
    let rest = format!(
        "{:02X}{:02X}{}",
        sequence.next(),
        code,
        bytes_to_hex(params)
    );
    framed(COMMAND_MARKER, &rest)
}

/// Append more bytes to an already built `$:`/`Z:` frame and rewrite its
/// length field. The sequence and code are left untouched.
pub fn append_payload(frame: &str, data: &[u8]) -> Result<String> {
    let header = MARKER_LEN + 2;
    let (marker, rest) = match (frame.get(..MARKER_LEN), frame.get(header..)) {
        (Some(m), Some(r)) => (m, r),
        _ => {
            return Err(Error::FrameFormat(format!(
                "cannot append to frame '{}'",
                frame
            )));
        }
    };
    if marker != COMMAND_MARKER && marker != TRANSPARENT_MARKER {
        return Err(Error::FrameFormat(format!(
            "cannot append to frame with marker '{}'",
            marker
        )));
    }
    let mut extended = String::with_capacity(rest.len() + data.len() * 2);
    extended.push_str(rest);
    extended.push_str(&bytes_to_hex(data));
    framed(marker, &extended)
}

/// Encode an ISO15693 tunnel frame: `#:` (plain) or `%:` (encrypted)
/// followed by hex(payload). Tunnel frames carry no length or sequence.
pub fn encode_tunnel(encrypted: bool, payload: &[u8]) -> String {
    let marker = if encrypted {
        ENCRYPTED_TUNNEL_MARKER
    } else {
        TUNNEL_MARKER
    };
    format!("{}{}", marker, bytes_to_hex(payload))
}

/// Encode a transparent frame: `Z:` LL SS hex(payload).
pub fn encode_transparent(sequence: &mut SequenceCounter, payload: &[u8]) -> Result<String> {
    let rest = format!("{:02X}{}", sequence.next(), bytes_to_hex(payload));
    framed(TRANSPARENT_MARKER, &rest)
}

/// Decode an answer body (the text after `$:` or `Z:`).
pub fn decode_answer(body: &str, odd_length_fix: bool) -> Option<Answer> {
    Answer::decode(body, odd_length_fix)
}

/// Decode an event body (the text after `I:`).
pub fn decode_event(body: &str) -> Option<Event> {
    Event::decode(body)
}
