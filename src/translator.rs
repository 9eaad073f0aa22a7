//! Key Event Translator
//!
//! Top-level coordinator for one input session: feeds each raw X11 key event
//! through modifier tracking, keysym translation, and payload decoding, and
//! assembles the win32-input-mode key event records.
//!
//! # Collaborator contract
//!
//! The keysym fed here must be resolved against a reference US layout, and
//! Shift key presses must be excluded from the layout state used for that
//! resolution, so that non-alphabetic keys keep their lower-case keysyms.
//! Character case is carried by the UTF-8 payload, not the keysym.

use crate::decode::decode_codepoint;
use crate::keymap::WinKeyMap;
use crate::modifiers::{lock_state, ControlKeyState, ModifierTracker, XModifierMask};
use std::fmt::Write;
use tracing::{debug, trace};

/// One raw key event from the display layer.
#[derive(Debug, Clone, Copy)]
pub struct RawKeyEvent<'a> {
    /// X11 keysym resolved against the reference US layout
    pub keysym: u32,
    /// Key pressed (true) or released (false)
    pub pressed: bool,
    /// Ambient modifier mask delivered with the event
    pub state: XModifierMask,
    /// UTF-8 string the input method produced for this event, if any
    pub utf8: Option<&'a [u8]>,
}

/// One win32-input-mode key event record.
///
/// Serializes as six integers in fixed order: virtual-key code, virtual-scan
/// code, Unicode code point, key-down flag, control-key state, repeat count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodedKeyEvent {
    /// Windows virtual-key code
    pub virtual_key: u8,
    /// Windows virtual-scan code
    pub scan_code: u8,
    /// Unicode code point as a 16-bit code unit, 0 if none
    pub unicode_char: u16,
    /// Key pressed (true) or released (false)
    pub key_down: bool,
    /// Modifier and lock-key state bits
    pub control_key_state: ControlKeyState,
    /// Repeat count, always 1 for translated events
    pub repeat_count: u16,
}

impl EncodedKeyEvent {
    /// The six wire integers in protocol order.
    pub fn sequence_params(&self) -> [u32; 6] {
        [
            self.virtual_key as u32,
            self.scan_code as u32,
            self.unicode_char as u32,
            self.key_down as u32,
            self.control_key_state.bits() as u32,
            self.repeat_count as u32,
        ]
    }

    /// Render the full win32-input-mode escape sequence for this record.
    pub fn to_sequence(&self) -> String {
        let [vk, sc, uc, kd, cks, rc] = self.sequence_params();
        let mut seq = String::with_capacity(24);
        // Infallible for String, but write! keeps the formatting in one place
        let _ = write!(seq, "\x1b[{vk};{sc};{uc};{kd};{cks};{rc}_");
        seq
    }
}

/// Translator configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TranslatorConfig {
    /// Ambient mask group that carries AltGr on this host
    pub altgr_mask: XModifierMask,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            altgr_mask: XModifierMask::MOD5,
        }
    }
}

/// Per-session key event translator.
///
/// Owns the modifier state for one physical keyboard session; create one
/// instance per session and feed it events in order. The keysym table is
/// built once at construction.
pub struct KeyEventTranslator {
    /// Keysym to Windows key identity table
    keymap: WinKeyMap,

    /// Modifier state for this session
    tracker: ModifierTracker,

    /// Total events processed
    events_processed: u64,
}

impl KeyEventTranslator {
    /// Create a translator with the default configuration.
    pub fn new() -> Self {
        Self::with_config(TranslatorConfig::default())
    }

    /// Create a translator with an explicit configuration.
    pub fn with_config(config: TranslatorConfig) -> Self {
        Self {
            keymap: WinKeyMap::new(),
            tracker: ModifierTracker::with_altgr_mask(config.altgr_mask),
            events_processed: 0,
        }
    }

    /// Translate one physical key event into its encoded records.
    ///
    /// Always returns at least one record. If the event carries a UTF-8
    /// payload with several code points, one record is emitted per code
    /// point, identical except for `unicode_char`. A keystroke is never
    /// dropped: unmapped keysyms emit a record with zero key codes, and an
    /// undecodable payload emits a record without a character.
    pub fn handle_event(&mut self, event: RawKeyEvent<'_>) -> Vec<EncodedKeyEvent> {
        self.events_processed += 1;

        let tracked = self
            .tracker
            .update(event.keysym, event.pressed, event.state);
        let mapping = self.keymap.translate(event.keysym);

        let mut control_key_state = tracked | lock_state(event.state);
        if mapping.enhanced {
            control_key_state |= ControlKeyState::ENHANCED_KEY;
        }

        trace!(
            "Key event: keysym=0x{:04X} pressed={} vk={} scan={} state={:?}",
            event.keysym,
            event.pressed,
            mapping.virtual_key,
            mapping.scan_code,
            control_key_state
        );

        let record = |unicode_char: u16| EncodedKeyEvent {
            virtual_key: mapping.virtual_key,
            scan_code: mapping.scan_code,
            unicode_char,
            key_down: event.pressed,
            control_key_state,
            repeat_count: 1,
        };

        let mut records = Vec::with_capacity(1);
        let payload = event.utf8.unwrap_or(&[]);
        let mut offset = 0;
        loop {
            let decoded = decode_codepoint(&payload[offset..]);
            if decoded.consumed == 0 {
                // No code point available; the first record still goes out
                // so the keystroke is not lost.
                if records.is_empty() {
                    records.push(record(0));
                }
                break;
            }
            records.push(record(decoded.codepoint));
            offset += decoded.consumed;
        }

        if records.len() > 1 {
            debug!(
                "Multi-codepoint payload: {} records for keysym 0x{:04X}",
                records.len(),
                event.keysym
            );
        }
        records
    }

    /// Currently tracked modifier bits.
    pub fn modifiers(&self) -> ControlKeyState {
        self.tracker.pressed_modifiers()
    }

    /// Check whether a keysym has a table entry.
    pub fn is_mapped(&self, keysym: u32) -> bool {
        self.keymap.is_mapped(keysym)
    }

    /// Total events processed by this session.
    pub fn events_processed(&self) -> u64 {
        self.events_processed
    }

    /// Reset session state (release all tracked modifiers).
    pub fn reset(&mut self) {
        self.tracker.reset();
        debug!("Key event translator reset");
    }
}

impl Default for KeyEventTranslator {
    fn default() -> Self {
        Self::new()
    }
}
