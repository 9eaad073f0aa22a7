//! Input Translation Error Types
//!
//! The translation core itself is total: unmapped keysyms and unrepresentable
//! code points come back as sentinel values, never as errors, so that a
//! physical keystroke is never dropped. These types exist for the explicit
//! API surface (`WinKeyMap::lookup`, `decode_codepoint_strict`) where callers
//! opt in to distinguishing failure from the sentinel.

use thiserror::Error;

/// Result type for input translation operations
pub type Result<T> = std::result::Result<T, InputError>;

/// Input translation error types
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputError {
    /// Keysym has no entry in the translation table
    #[error("no Windows key mapping for keysym 0x{0:04X}")]
    UnmappedKeysym(u32),

    /// Continuation byte does not match the 10xxxxxx pattern
    #[error("invalid UTF-8 continuation byte 0x{byte:02X} at offset {offset}")]
    InvalidContinuation {
        /// Offending byte value
        byte: u8,
        /// Byte offset within the payload
        offset: usize,
    },

    /// Lead byte starts a sequence longer than UCS-2 can represent
    #[error("code point outside the 16-bit range (lead byte 0x{0:02X})")]
    UnrepresentableCodepoint(u8),

    /// Payload ends in the middle of a multi-byte sequence
    #[error("truncated UTF-8 sequence: need {needed} bytes, have {available}")]
    TruncatedSequence {
        /// Bytes the lead byte announced
        needed: usize,
        /// Bytes remaining in the payload
        available: usize,
    },
}
