//! UTF-8 Codepoint Decoder
//!
//! Splits the UTF-8 payload an input method attaches to a key event into
//! individual code points, one per encoded key-event record. Decoding is
//! limited to code points representable in a single 16-bit code unit; 4-byte
//! sequences are reported as "no code point" rather than widened, since the
//! `KEY_EVENT_RECORD` Unicode field is a UCS-2 code unit.

use crate::error::{InputError, Result};

/// One decoded code point and the bytes it consumed.
///
/// `consumed == 0` means "no code point available": the payload is exhausted
/// or the next sequence is not representable. Callers stop decoding and emit
/// a best-effort record instead of dropping the keystroke.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Decoded {
    /// Code point value as a 16-bit code unit
    pub codepoint: u16,
    /// Number of payload bytes consumed
    pub consumed: usize,
}

impl Decoded {
    /// The "no code point available" sentinel.
    pub const NONE: Decoded = Decoded {
        codepoint: 0,
        consumed: 0,
    };
}

/// Decode one UTF-8 code point from the front of `buf`.
///
/// Lenient by contract: continuation bytes are masked and consumed
/// positionally without validating their high bits, matching the behavior
/// existing consumers rely on. Sequences that run past the end of the buffer
/// and ≥4-byte lead patterns yield [`Decoded::NONE`].
pub fn decode_codepoint(buf: &[u8]) -> Decoded {
    let Some(&b0) = buf.first() else {
        return Decoded::NONE;
    };

    if b0 & 0x80 == 0 {
        // 0xxxxxxx
        Decoded {
            codepoint: b0 as u16,
            consumed: 1,
        }
    } else if b0 & 0xE0 == 0xC0 {
        // 110xxxxx 10xxxxxx
        match buf.get(1) {
            Some(&b1) => Decoded {
                codepoint: ((b0 as u16 & 0x1F) << 6) | (b1 as u16 & 0x3F),
                consumed: 2,
            },
            None => Decoded::NONE,
        }
    } else if b0 & 0xF0 == 0xE0 {
        // 1110xxxx 10xxxxxx 10xxxxxx
        match (buf.get(1), buf.get(2)) {
            (Some(&b1), Some(&b2)) => Decoded {
                codepoint: ((b0 as u16 & 0x0F) << 12)
                    | ((b1 as u16 & 0x3F) << 6)
                    | (b2 as u16 & 0x3F),
                consumed: 3,
            },
            _ => Decoded::NONE,
        }
    } else {
        // 4-byte lead or stray continuation byte: outside the UCS-2 range
        Decoded::NONE
    }
}

/// Decode one UTF-8 code point, validating the encoding.
///
/// Strict variant of [`decode_codepoint`]: malformed continuation bytes,
/// truncated sequences, and out-of-range lead bytes are reported as distinct
/// errors instead of being masked or collapsed into the sentinel. An empty
/// buffer still yields `Ok(Decoded::NONE)`.
pub fn decode_codepoint_strict(buf: &[u8]) -> Result<Decoded> {
    let Some(&b0) = buf.first() else {
        return Ok(Decoded::NONE);
    };

    let needed = if b0 & 0x80 == 0 {
        return Ok(Decoded {
            codepoint: b0 as u16,
            consumed: 1,
        });
    } else if b0 & 0xE0 == 0xC0 {
        2
    } else if b0 & 0xF0 == 0xE0 {
        3
    } else {
        return Err(InputError::UnrepresentableCodepoint(b0));
    };

    if buf.len() < needed {
        return Err(InputError::TruncatedSequence {
            needed,
            available: buf.len(),
        });
    }

    let mut codepoint = (b0 as u16) & (0x3Fu16 >> (needed - 1));
    for (i, &b) in buf[1..needed].iter().enumerate() {
        if b & 0xC0 != 0x80 {
            return Err(InputError::InvalidContinuation {
                byte: b,
                offset: i + 1,
            });
        }
        codepoint = (codepoint << 6) | (b as u16 & 0x3F);
    }

    Ok(Decoded {
        codepoint,
        consumed: needed,
    })
}
