//! Keysym Translation Table
//!
//! Maps X11/XKB keysyms to Windows virtual-key code, virtual-scan code, and
//! the enhanced-key flag used by win32-input-mode terminal protocols.
//!
//! The table assumes keysyms resolved against a reference US layout, so one
//! entry covers a key regardless of the layout active on the host. Lookups
//! are total: a keysym without an entry yields [`KeyCodeMapping::UNMAPPED`]
//! rather than an error, because text-producing keys still need an event
//! emitted for their Unicode payload.

use crate::error::{InputError, Result};
use std::collections::HashMap;

/// X11 keysym values, as defined in `X11/keysymdef.h`.
pub mod keysyms {
    // Control keys
    pub const KEY_BACKSPACE: u32 = 0xff08;
    pub const KEY_TAB: u32 = 0xff09;
    pub const KEY_RETURN: u32 = 0xff0d;
    pub const KEY_ESCAPE: u32 = 0xff1b;
    pub const KEY_DELETE: u32 = 0xffff;

    // Navigation cluster
    pub const KEY_HOME: u32 = 0xff50;
    pub const KEY_LEFT: u32 = 0xff51;
    pub const KEY_UP: u32 = 0xff52;
    pub const KEY_RIGHT: u32 = 0xff53;
    pub const KEY_DOWN: u32 = 0xff54;
    pub const KEY_PAGE_UP: u32 = 0xff55;
    pub const KEY_PAGE_DOWN: u32 = 0xff56;
    pub const KEY_END: u32 = 0xff57;
    pub const KEY_PRINT: u32 = 0xff61;
    pub const KEY_INSERT: u32 = 0xff63;
    pub const KEY_MENU: u32 = 0xff67;

    // Lock keys
    pub const KEY_NUM_LOCK: u32 = 0xff7f;
    pub const KEY_CAPS_LOCK: u32 = 0xffe5;

    // Modifier keys
    pub const KEY_SHIFT_L: u32 = 0xffe1;
    pub const KEY_SHIFT_R: u32 = 0xffe2;
    pub const KEY_CONTROL_L: u32 = 0xffe3;
    pub const KEY_CONTROL_R: u32 = 0xffe4;
    pub const KEY_ALT_L: u32 = 0xffe9;
    pub const KEY_ALT_R: u32 = 0xffea;
    pub const KEY_SUPER_L: u32 = 0xffeb;
    pub const KEY_SUPER_R: u32 = 0xffec;

    // Numeric keypad
    pub const KEY_KP_ENTER: u32 = 0xff8d;
    pub const KEY_KP_HOME: u32 = 0xff95;
    pub const KEY_KP_LEFT: u32 = 0xff96;
    pub const KEY_KP_UP: u32 = 0xff97;
    pub const KEY_KP_RIGHT: u32 = 0xff98;
    pub const KEY_KP_DOWN: u32 = 0xff99;
    pub const KEY_KP_PAGE_UP: u32 = 0xff9a;
    pub const KEY_KP_PAGE_DOWN: u32 = 0xff9b;
    pub const KEY_KP_END: u32 = 0xff9c;
    pub const KEY_KP_BEGIN: u32 = 0xff9d;
    pub const KEY_KP_INSERT: u32 = 0xff9e;
    pub const KEY_KP_DELETE: u32 = 0xff9f;
    pub const KEY_KP_MULTIPLY: u32 = 0xffaa;
    pub const KEY_KP_ADD: u32 = 0xffab;
    pub const KEY_KP_SUBTRACT: u32 = 0xffad;
    pub const KEY_KP_DECIMAL: u32 = 0xffae;
    pub const KEY_KP_DIVIDE: u32 = 0xffaf;
    pub const KEY_KP_0: u32 = 0xffb0;
    pub const KEY_KP_1: u32 = 0xffb1;
    pub const KEY_KP_2: u32 = 0xffb2;
    pub const KEY_KP_3: u32 = 0xffb3;
    pub const KEY_KP_4: u32 = 0xffb4;
    pub const KEY_KP_5: u32 = 0xffb5;
    pub const KEY_KP_6: u32 = 0xffb6;
    pub const KEY_KP_7: u32 = 0xffb7;
    pub const KEY_KP_8: u32 = 0xffb8;
    pub const KEY_KP_9: u32 = 0xffb9;

    // Function keys
    pub const KEY_F1: u32 = 0xffbe;
    pub const KEY_F2: u32 = 0xffbf;
    pub const KEY_F3: u32 = 0xffc0;
    pub const KEY_F4: u32 = 0xffc1;
    pub const KEY_F5: u32 = 0xffc2;
    pub const KEY_F6: u32 = 0xffc3;
    pub const KEY_F7: u32 = 0xffc4;
    pub const KEY_F8: u32 = 0xffc5;
    pub const KEY_F9: u32 = 0xffc6;
    pub const KEY_F10: u32 = 0xffc7;
    pub const KEY_F11: u32 = 0xffc8;
    pub const KEY_F12: u32 = 0xffc9;

    // Latin-1 block (keysym value == codepoint)
    pub const KEY_SPACE: u32 = 0x0020;
    pub const KEY_APOSTROPHE: u32 = 0x0027;
    pub const KEY_COMMA: u32 = 0x002c;
    pub const KEY_MINUS: u32 = 0x002d;
    pub const KEY_PERIOD: u32 = 0x002e;
    pub const KEY_SLASH: u32 = 0x002f;
    pub const KEY_0: u32 = 0x0030;
    pub const KEY_1: u32 = 0x0031;
    pub const KEY_2: u32 = 0x0032;
    pub const KEY_3: u32 = 0x0033;
    pub const KEY_4: u32 = 0x0034;
    pub const KEY_5: u32 = 0x0035;
    pub const KEY_6: u32 = 0x0036;
    pub const KEY_7: u32 = 0x0037;
    pub const KEY_8: u32 = 0x0038;
    pub const KEY_9: u32 = 0x0039;
    pub const KEY_SEMICOLON: u32 = 0x003b;
    pub const KEY_EQUAL: u32 = 0x003d;
    pub const KEY_A: u32 = 0x0041;
    pub const KEY_B: u32 = 0x0042;
    pub const KEY_C: u32 = 0x0043;
    pub const KEY_D: u32 = 0x0044;
    pub const KEY_E: u32 = 0x0045;
    pub const KEY_F: u32 = 0x0046;
    pub const KEY_G: u32 = 0x0047;
    pub const KEY_H: u32 = 0x0048;
    pub const KEY_I: u32 = 0x0049;
    pub const KEY_J: u32 = 0x004a;
    pub const KEY_K: u32 = 0x004b;
    pub const KEY_L: u32 = 0x004c;
    pub const KEY_M: u32 = 0x004d;
    pub const KEY_N: u32 = 0x004e;
    pub const KEY_O: u32 = 0x004f;
    pub const KEY_P: u32 = 0x0050;
    pub const KEY_Q: u32 = 0x0051;
    pub const KEY_R: u32 = 0x0052;
    pub const KEY_S: u32 = 0x0053;
    pub const KEY_T: u32 = 0x0054;
    pub const KEY_U: u32 = 0x0055;
    pub const KEY_V: u32 = 0x0056;
    pub const KEY_W: u32 = 0x0057;
    pub const KEY_X: u32 = 0x0058;
    pub const KEY_Y: u32 = 0x0059;
    pub const KEY_Z: u32 = 0x005a;
    pub const KEY_BRACKET_LEFT: u32 = 0x005b;
    pub const KEY_BACKSLASH: u32 = 0x005c;
    pub const KEY_BRACKET_RIGHT: u32 = 0x005d;
    pub const KEY_GRAVE: u32 = 0x0060;
}

use keysyms::*;

/// Windows key identity for one keysym.
///
/// `virtual_key` and `scan_code` are the `wVirtualKeyCode` / `wVirtualScanCode`
/// bytes of a `KEY_EVENT_RECORD`; `enhanced` feeds the ENHANCED_KEY bit of
/// `dwControlKeyState`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyCodeMapping {
    /// Windows virtual-key code (position independent)
    pub virtual_key: u8,
    /// Windows virtual-scan code (position dependent)
    pub scan_code: u8,
    /// Enhanced-key flag (navigation cluster vs numeric pad)
    pub enhanced: bool,
}

impl KeyCodeMapping {
    /// Sentinel returned for keysyms without a table entry.
    pub const UNMAPPED: KeyCodeMapping = KeyCodeMapping {
        virtual_key: 0,
        scan_code: 0,
        enhanced: false,
    };

    /// Whether this mapping carries a real virtual-key identity.
    pub fn is_mapped(&self) -> bool {
        *self != Self::UNMAPPED
    }
}

/// Golden reference data: (keysym, virtual key, scan code, enhanced).
///
/// Byte values must match existing win32-input-mode consumers exactly; they
/// are interoperability constants, not derivable from the keysym.
const TABLE: &[(u32, u8, u8, bool)] = &[
    (KEY_BACKSPACE, 8, 14, false),       // VK_BACK
    (KEY_TAB, 9, 15, false),             // VK_TAB
    (KEY_KP_BEGIN, 12, 76, false),       // VK_CLEAR
    (KEY_RETURN, 13, 28, false),         // VK_RETURN
    (KEY_KP_ENTER, 13, 28, true),        // VK_RETURN
    (KEY_SHIFT_L, 16, 42, false),        // VK_SHIFT
    (KEY_SHIFT_R, 16, 54, false),        // VK_SHIFT
    (KEY_CONTROL_L, 17, 29, false),      // VK_CONTROL
    (KEY_CONTROL_R, 17, 29, true),       // VK_CONTROL
    (KEY_ALT_L, 18, 56, false),          // VK_MENU
    (KEY_ALT_R, 18, 56, true),           // VK_MENU
    (KEY_CAPS_LOCK, 20, 58, false),      // VK_CAPITAL
    (KEY_ESCAPE, 27, 1, false),          // VK_ESCAPE
    (KEY_SPACE, 32, 57, false),          // VK_SPACE
    (KEY_PAGE_UP, 33, 73, true),         // VK_PRIOR
    (KEY_KP_PAGE_UP, 33, 73, false),     // VK_PRIOR
    (KEY_PAGE_DOWN, 34, 81, true),       // VK_NEXT
    (KEY_KP_PAGE_DOWN, 34, 81, false),   // VK_NEXT
    (KEY_END, 35, 79, true),             // VK_END
    (KEY_KP_END, 35, 79, false),         // VK_END
    (KEY_HOME, 36, 71, true),            // VK_HOME
    (KEY_KP_HOME, 36, 71, false),        // VK_HOME
    (KEY_LEFT, 37, 75, true),            // VK_LEFT
    (KEY_KP_LEFT, 37, 75, false),        // VK_LEFT
    (KEY_UP, 38, 72, true),              // VK_UP
    (KEY_KP_UP, 38, 72, false),          // VK_UP
    (KEY_RIGHT, 39, 77, true),           // VK_RIGHT
    (KEY_KP_RIGHT, 39, 77, false),       // VK_RIGHT
    (KEY_DOWN, 40, 80, true),            // VK_DOWN
    (KEY_KP_DOWN, 40, 80, false),        // VK_DOWN
    (KEY_PRINT, 44, 55, true),           // VK_SNAPSHOT
    (KEY_INSERT, 45, 82, true),          // VK_INSERT
    (KEY_KP_INSERT, 45, 82, false),      // VK_INSERT
    (KEY_DELETE, 46, 83, true),          // VK_DELETE
    (KEY_KP_DELETE, 46, 83, false),      // VK_DELETE
    (KEY_0, 48, 11, false),
    (KEY_1, 49, 2, false),
    (KEY_2, 50, 3, false),
    (KEY_3, 51, 4, false),
    (KEY_4, 52, 5, false),
    (KEY_5, 53, 6, false),
    (KEY_6, 54, 7, false),
    (KEY_7, 55, 8, false),
    (KEY_8, 56, 9, false),
    (KEY_9, 57, 10, false),
    (KEY_A, 65, 108, false),
    (KEY_B, 66, 124, false),
    (KEY_C, 67, 122, false),
    (KEY_D, 68, 110, false),
    (KEY_E, 69, 98, false),
    (KEY_F, 70, 111, false),
    (KEY_G, 71, 112, false),
    (KEY_H, 72, 113, false),
    (KEY_I, 73, 103, false),
    (KEY_J, 74, 114, false),
    (KEY_K, 75, 115, false),
    (KEY_L, 76, 116, false),
    (KEY_M, 77, 126, false),
    (KEY_N, 78, 125, false),
    (KEY_O, 79, 104, false),
    (KEY_P, 80, 105, false),
    (KEY_Q, 81, 96, false),
    (KEY_R, 82, 99, false),
    (KEY_S, 83, 109, false),
    (KEY_T, 84, 100, false),
    (KEY_U, 85, 102, false),
    (KEY_V, 86, 123, false),
    (KEY_W, 87, 97, false),
    (KEY_X, 88, 121, false),
    (KEY_Y, 89, 101, false),
    (KEY_Z, 90, 120, false),
    (KEY_SUPER_L, 91, 91, true),         // VK_LWIN
    (KEY_SUPER_R, 92, 92, true),         // VK_RWIN
    (KEY_MENU, 93, 93, true),            // VK_APPS
    (KEY_KP_0, 96, 82, false),           // VK_NUMPAD0
    (KEY_KP_1, 97, 79, false),           // VK_NUMPAD1
    (KEY_KP_2, 98, 80, false),           // VK_NUMPAD2
    (KEY_KP_3, 99, 81, false),           // VK_NUMPAD3
    (KEY_KP_4, 100, 75, false),          // VK_NUMPAD4
    (KEY_KP_5, 101, 76, false),          // VK_NUMPAD5
    (KEY_KP_6, 102, 77, false),          // VK_NUMPAD6
    (KEY_KP_7, 103, 71, false),          // VK_NUMPAD7
    (KEY_KP_8, 104, 72, false),          // VK_NUMPAD8
    (KEY_KP_9, 105, 73, false),          // VK_NUMPAD9
    (KEY_KP_MULTIPLY, 106, 55, false),   // VK_MULTIPLY
    (KEY_KP_ADD, 107, 78, false),        // VK_ADD
    (KEY_KP_SUBTRACT, 109, 74, false),   // VK_SUBTRACT
    (KEY_KP_DECIMAL, 110, 83, false),    // VK_DECIMAL
    (KEY_KP_DIVIDE, 111, 53, true),      // VK_DIVIDE
    (KEY_F1, 112, 59, false),
    (KEY_F2, 113, 60, false),
    (KEY_F3, 114, 61, false),
    (KEY_F4, 115, 62, false),
    (KEY_F5, 116, 63, false),
    (KEY_F6, 117, 64, false),
    (KEY_F7, 118, 65, false),
    (KEY_F8, 119, 66, false),
    (KEY_F9, 120, 67, false),
    (KEY_F10, 121, 68, false),
    (KEY_F11, 122, 87, false),
    (KEY_F12, 123, 88, false),
    (KEY_NUM_LOCK, 144, 69, true),       // VK_NUMLOCK
    (KEY_SEMICOLON, 186, 117, false),    // VK_OEM_1
    (KEY_EQUAL, 187, 13, false),         // VK_OEM_PLUS
    (KEY_COMMA, 188, 127, false),        // VK_OEM_COMMA
    (KEY_MINUS, 189, 12, false),         // VK_OEM_MINUS
    (KEY_PERIOD, 190, 128, false),       // VK_OEM_PERIOD
    (KEY_SLASH, 191, 53, false),         // VK_OEM_2
    (KEY_GRAVE, 192, 119, false),        // VK_OEM_3
    (KEY_BRACKET_LEFT, 219, 106, false), // VK_OEM_4
    (KEY_BACKSLASH, 220, 43, false),     // VK_OEM_5
    (KEY_BRACKET_RIGHT, 221, 107, false), // VK_OEM_6
    (KEY_APOSTROPHE, 222, 118, false),   // VK_OEM_7
];

/// Keysym to Windows key identity lookup table.
///
/// Built once at construction; stateless afterwards, so one instance can be
/// shared across independent sessions.
pub struct WinKeyMap {
    map: HashMap<u32, KeyCodeMapping>,
}

impl WinKeyMap {
    /// Build the lookup table from the golden reference data.
    pub fn new() -> Self {
        let mut map = HashMap::with_capacity(TABLE.len());
        for &(keysym, virtual_key, scan_code, enhanced) in TABLE {
            map.insert(
                keysym,
                KeyCodeMapping {
                    virtual_key,
                    scan_code,
                    enhanced,
                },
            );
        }
        Self { map }
    }

    /// Fold ASCII lowercase letter keysyms to uppercase.
    ///
    /// Keeps one table entry per letter; the Unicode payload carries the
    /// actual case.
    fn normalize(keysym: u32) -> u32 {
        if keysym < 128 && (keysym as u8).is_ascii_lowercase() {
            keysym - 0x20
        } else {
            keysym
        }
    }

    /// Translate a keysym to its Windows key identity.
    ///
    /// Total: keysyms without an entry yield [`KeyCodeMapping::UNMAPPED`].
    pub fn translate(&self, keysym: u32) -> KeyCodeMapping {
        self.map
            .get(&Self::normalize(keysym))
            .copied()
            .unwrap_or(KeyCodeMapping::UNMAPPED)
    }

    /// Translate a keysym, erroring on keysyms without a table entry.
    ///
    /// For callers that want to distinguish "unmapped" from the all-zero
    /// sentinel instead of emitting a best-effort event.
    pub fn lookup(&self, keysym: u32) -> Result<KeyCodeMapping> {
        self.map
            .get(&Self::normalize(keysym))
            .copied()
            .ok_or(InputError::UnmappedKeysym(keysym))
    }

    /// Check whether a keysym has a table entry.
    pub fn is_mapped(&self, keysym: u32) -> bool {
        self.map.contains_key(&Self::normalize(keysym))
    }

    /// Total number of table entries.
    pub fn mapped_key_count(&self) -> usize {
        self.map.len()
    }
}

impl Default for WinKeyMap {
    fn default() -> Self {
        Self::new()
    }
}
