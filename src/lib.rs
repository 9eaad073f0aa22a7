//! # termwin-input
//!
//! Translates raw X11/XKB key events into the key-event records used by
//! win32-input-mode terminal protocols, so a terminal emulator or multiplexer
//! on *nix can feed applications that expect Windows `KEY_EVENT_RECORD`
//! shaped input, regardless of the keyboard layout active on the host.
//!
//! # Architecture
//!
//! ```text
//! X11 Key Event                 KeyEventTranslator              Consumer
//! ━━━━━━━━━━━━━                 ━━━━━━━━━━━━━━━━━━              ━━━━━━━━
//!
//! keysym, pressed ────────────> ModifierTracker
//! ambient mask                        │ reconcile + edge transitions
//!                                     │
//!                               WinKeyMap
//!                                     │ keysym → (vk, scan, enhanced)
//!                                     │
//! UTF-8 payload ──────────────> decode_codepoint
//!                                     │ one code point per record
//!                                     ▼
//!                               EncodedKeyEvent ──────────────> ^[[Vk;Sc;Uc;Kd;Cs;Rc_
//! ```
//!
//! The crate is the translation core only. Opening the display connection,
//! selecting input events, querying lock-key LEDs, and running the input
//! method that produces UTF-8 strings are the caller's plumbing; the core
//! consumes a keysym, a key state, an X11 modifier mask, and an optional
//! decoded byte string per event.
//!
//! # Usage
//!
//! ```
//! use termwin_input::{KeyEventTranslator, RawKeyEvent, XModifierMask};
//! use termwin_input::keymap::keysyms;
//!
//! let mut translator = KeyEventTranslator::new();
//!
//! let records = translator.handle_event(RawKeyEvent {
//!     keysym: keysyms::KEY_RETURN,
//!     pressed: true,
//!     state: XModifierMask::empty(),
//!     utf8: None,
//! });
//!
//! assert_eq!(records.len(), 1);
//! assert_eq!(records[0].virtual_key, 13);
//! print!("{}", records[0].to_sequence());
//! ```
//!
//! One [`KeyEventTranslator`] per input session: it owns the modifier state
//! and must see that session's events in order. [`WinKeyMap`] and the
//! decoder are stateless and safe to share across sessions.

#![warn(missing_docs)]
#![warn(clippy::all)]

/// UTF-8 code point decoding for key event payloads
pub mod decode;

/// Error types for the explicit/strict API surface
pub mod error;

/// Keysym constants and the keysym → Windows key identity table
pub mod keymap;

/// Modifier state tracking and control-key-state bit layout
pub mod modifiers;

/// Per-session event assembly
pub mod translator;

pub use decode::{decode_codepoint, decode_codepoint_strict, Decoded};
pub use error::{InputError, Result};
pub use keymap::{KeyCodeMapping, WinKeyMap};
pub use modifiers::{lock_state, ControlKeyState, ModifierTracker, XModifierMask};
pub use translator::{EncodedKeyEvent, KeyEventTranslator, RawKeyEvent, TranslatorConfig};
