//! Modifier State Tracking
//!
//! Reconstructs the left/right-distinguishing modifier bits of the Windows
//! `dwControlKeyState` field from X11 key events. The X11 event mask says
//! "some Shift is down" but not which side; the tracker recovers the side
//! from the Shift_L/Shift_R (and Ctrl/Alt) press and release edges, and
//! reconciles against the ambient mask every event so that a lost release
//! (focus change, grab) cannot leave a modifier latched forever.

use crate::keymap::keysyms;
use bitflags::bitflags;
use tracing::debug;

bitflags! {
    /// `dwControlKeyState` bits of a Windows `KEY_EVENT_RECORD`.
    ///
    /// Bit values are wire constants shared with every win32-input-mode
    /// consumer; the LEFT/RIGHT shift bits are the proposed extension codes
    /// carried by far2l-compatible terminals.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    pub struct ControlKeyState: u16 {
        /// The right Alt key is pressed
        const RIGHT_ALT_PRESSED = 0x0001;
        /// The left Alt key is pressed
        const LEFT_ALT_PRESSED = 0x0002;
        /// The right Ctrl key is pressed
        const RIGHT_CTRL_PRESSED = 0x0004;
        /// The left Ctrl key is pressed
        const LEFT_CTRL_PRESSED = 0x0008;
        /// A Shift key is pressed (either side)
        const SHIFT_PRESSED = 0x0010;
        /// The NumLock light is on
        const NUMLOCK_ON = 0x0020;
        /// The ScrollLock light is on
        const SCROLLLOCK_ON = 0x0040;
        /// The CapsLock light is on
        const CAPSLOCK_ON = 0x0080;
        /// The key is enhanced (navigation cluster, right-side modifiers)
        const ENHANCED_KEY = 0x0100;
        /// The left Shift key is pressed (extension)
        const LEFT_SHIFT_PRESSED = 0x0200;
        /// The right Shift key is pressed (extension)
        const RIGHT_SHIFT_PRESSED = 0x0400;
    }

    /// X11 event state mask, as delivered in `XKeyEvent::state`.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    pub struct XModifierMask: u32 {
        /// Shift family
        const SHIFT = 1 << 0;
        /// Caps Lock
        const LOCK = 1 << 1;
        /// Ctrl family
        const CONTROL = 1 << 2;
        /// Mod1, conventionally Alt
        const MOD1 = 1 << 3;
        /// Mod2, conventionally Num Lock
        const MOD2 = 1 << 4;
        /// Mod3, conventionally Scroll Lock
        const MOD3 = 1 << 5;
        /// Mod4, conventionally Super
        const MOD4 = 1 << 6;
        /// Mod5, where some hosts report AltGr
        const MOD5 = 1 << 7;
    }
}

/// Lock-key bits derived from the ambient mask.
///
/// Lock state is never tracked; the mask reflects the hardware lights and is
/// copied into every record as-is.
pub fn lock_state(ambient: XModifierMask) -> ControlKeyState {
    let mut locks = ControlKeyState::empty();
    if ambient.contains(XModifierMask::LOCK) {
        locks |= ControlKeyState::CAPSLOCK_ON;
    }
    if ambient.contains(XModifierMask::MOD2) {
        locks |= ControlKeyState::NUMLOCK_ON;
    }
    if ambient.contains(XModifierMask::MOD3) {
        locks |= ControlKeyState::SCROLLLOCK_ON;
    }
    locks
}

/// Tracks the six left/right modifier bits for one input session.
///
/// Owned by exactly one session; transitions read-then-write the flag set
/// non-atomically, so sharing across threads needs external synchronization.
pub struct ModifierTracker {
    /// Currently asserted modifier bits (the six sides plus aggregate shift)
    pressed: ControlKeyState,

    /// Ambient mask group that carries AltGr on this host
    altgr_mask: XModifierMask,
}

impl ModifierTracker {
    /// Create a tracker with AltGr reported via Mod5, the common host setup.
    pub fn new() -> Self {
        Self::with_altgr_mask(XModifierMask::MOD5)
    }

    /// Create a tracker for hosts that report AltGr via a different group.
    pub fn with_altgr_mask(altgr_mask: XModifierMask) -> Self {
        Self {
            pressed: ControlKeyState::empty(),
            altgr_mask,
        }
    }

    /// Process one key event and return the tracked modifier bits.
    ///
    /// Runs mask reconciliation first, then the press/release edge for the
    /// six modifier keysyms. The returned state carries only tracked bits;
    /// enhanced and lock bits are added during event assembly.
    pub fn update(&mut self, keysym: u32, pressed: bool, ambient: XModifierMask) -> ControlKeyState {
        self.reconcile(ambient);
        self.apply_edge(keysym, pressed);
        self.pressed
    }

    /// Clear sides whose modifier family the ambient mask no longer asserts.
    ///
    /// Guards against a release event lost to a focus change leaving a
    /// modifier permanently stuck.
    fn reconcile(&mut self, ambient: XModifierMask) {
        let before = self.pressed;

        if !ambient.contains(XModifierMask::SHIFT) {
            self.pressed.remove(
                ControlKeyState::LEFT_SHIFT_PRESSED
                    | ControlKeyState::RIGHT_SHIFT_PRESSED
                    | ControlKeyState::SHIFT_PRESSED,
            );
        }
        if !ambient.contains(XModifierMask::CONTROL) {
            self.pressed.remove(
                ControlKeyState::LEFT_CTRL_PRESSED | ControlKeyState::RIGHT_CTRL_PRESSED,
            );
        }
        if !ambient.contains(XModifierMask::MOD1) && !ambient.intersects(self.altgr_mask) {
            self.pressed
                .remove(ControlKeyState::LEFT_ALT_PRESSED | ControlKeyState::RIGHT_ALT_PRESSED);
        }

        if self.pressed != before {
            debug!(
                "Reconciled stale modifiers: {:?} -> {:?} (ambient {:?})",
                before, self.pressed, ambient
            );
        }
    }

    /// Apply the press/release edge for a modifier keysym.
    fn apply_edge(&mut self, keysym: u32, pressed: bool) {
        let bits = match keysym {
            keysyms::KEY_SHIFT_L => {
                ControlKeyState::LEFT_SHIFT_PRESSED | ControlKeyState::SHIFT_PRESSED
            }
            keysyms::KEY_SHIFT_R => {
                ControlKeyState::RIGHT_SHIFT_PRESSED | ControlKeyState::SHIFT_PRESSED
            }
            keysyms::KEY_CONTROL_L => ControlKeyState::LEFT_CTRL_PRESSED,
            keysyms::KEY_CONTROL_R => ControlKeyState::RIGHT_CTRL_PRESSED,
            keysyms::KEY_ALT_L => ControlKeyState::LEFT_ALT_PRESSED,
            keysyms::KEY_ALT_R => ControlKeyState::RIGHT_ALT_PRESSED,
            _ => return,
        };

        self.pressed.set(bits, pressed);
        debug!(
            "Modifier edge: keysym=0x{:04X} pressed={} state={:?}",
            keysym, pressed, self.pressed
        );
    }

    /// Currently tracked modifier bits.
    pub fn pressed_modifiers(&self) -> ControlKeyState {
        self.pressed
    }

    /// Ambient mask group treated as AltGr.
    pub fn altgr_mask(&self) -> XModifierMask {
        self.altgr_mask
    }

    /// Release all tracked modifiers.
    pub fn reset(&mut self) {
        self.pressed = ControlKeyState::empty();
        debug!("Modifier state reset");
    }
}

impl Default for ModifierTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keymap::keysyms::*;

    #[test]
    fn test_tracker_starts_clear() {
        let tracker = ModifierTracker::new();
        assert!(tracker.pressed_modifiers().is_empty());
    }

    #[test]
    fn test_shift_press_sets_side_and_aggregate() {
        let mut tracker = ModifierTracker::new();

        let state = tracker.update(KEY_SHIFT_L, true, XModifierMask::empty());
        assert!(state.contains(ControlKeyState::LEFT_SHIFT_PRESSED));
        assert!(state.contains(ControlKeyState::SHIFT_PRESSED));
        assert!(!state.contains(ControlKeyState::RIGHT_SHIFT_PRESSED));
    }

    #[test]
    fn test_shift_release_clears_both_bits() {
        let mut tracker = ModifierTracker::new();

        tracker.update(KEY_SHIFT_L, true, XModifierMask::empty());
        let state = tracker.update(KEY_SHIFT_L, false, XModifierMask::SHIFT);
        assert!(!state.contains(ControlKeyState::LEFT_SHIFT_PRESSED));
        assert!(!state.contains(ControlKeyState::SHIFT_PRESSED));
    }

    #[test]
    fn test_left_right_ctrl_tracked_separately() {
        let mut tracker = ModifierTracker::new();

        tracker.update(KEY_CONTROL_L, true, XModifierMask::empty());
        let state = tracker.update(KEY_CONTROL_R, true, XModifierMask::CONTROL);
        assert!(state.contains(ControlKeyState::LEFT_CTRL_PRESSED));
        assert!(state.contains(ControlKeyState::RIGHT_CTRL_PRESSED));

        let state = tracker.update(KEY_CONTROL_L, false, XModifierMask::CONTROL);
        assert!(!state.contains(ControlKeyState::LEFT_CTRL_PRESSED));
        assert!(state.contains(ControlKeyState::RIGHT_CTRL_PRESSED));
    }

    #[test]
    fn test_self_heal_lost_ctrl_release() {
        let mut tracker = ModifierTracker::new();

        tracker.update(KEY_CONTROL_L, true, XModifierMask::empty());
        assert!(tracker
            .pressed_modifiers()
            .contains(ControlKeyState::LEFT_CTRL_PRESSED));

        // Unrelated event whose ambient mask no longer asserts Ctrl: the
        // stale bit must clear without an explicit release.
        let state = tracker.update(KEY_A, true, XModifierMask::empty());
        assert!(!state.contains(ControlKeyState::LEFT_CTRL_PRESSED));
    }

    #[test]
    fn test_ambient_mask_preserves_held_modifiers() {
        let mut tracker = ModifierTracker::new();

        tracker.update(KEY_SHIFT_L, true, XModifierMask::empty());

        // Shift still asserted in the mask: tracked bits survive
        let state = tracker.update(KEY_A, true, XModifierMask::SHIFT);
        assert!(state.contains(ControlKeyState::LEFT_SHIFT_PRESSED));
        assert!(state.contains(ControlKeyState::SHIFT_PRESSED));
    }

    #[test]
    fn test_altgr_via_mod5_keeps_alt_asserted() {
        let mut tracker = ModifierTracker::new();

        tracker.update(KEY_ALT_R, true, XModifierMask::empty());

        // AltGr reported through Mod5 only, Mod1 clear: Alt must survive
        let state = tracker.update(KEY_A, true, XModifierMask::MOD5);
        assert!(state.contains(ControlKeyState::RIGHT_ALT_PRESSED));

        // Neither Mod1 nor Mod5: Alt clears
        let state = tracker.update(KEY_A, true, XModifierMask::empty());
        assert!(!state.contains(ControlKeyState::RIGHT_ALT_PRESSED));
    }

    #[test]
    fn test_configurable_altgr_group() {
        let mut tracker = ModifierTracker::with_altgr_mask(XModifierMask::MOD4);
        assert_eq!(tracker.altgr_mask(), XModifierMask::MOD4);

        tracker.update(KEY_ALT_R, true, XModifierMask::empty());

        // Mod5 is not the configured AltGr group on this host
        let state = tracker.update(KEY_A, true, XModifierMask::MOD5);
        assert!(!state.contains(ControlKeyState::RIGHT_ALT_PRESSED));

        tracker.update(KEY_ALT_R, true, XModifierMask::empty());
        let state = tracker.update(KEY_A, true, XModifierMask::MOD4);
        assert!(state.contains(ControlKeyState::RIGHT_ALT_PRESSED));
    }

    #[test]
    fn test_non_modifier_keysym_leaves_state_alone() {
        let mut tracker = ModifierTracker::new();

        tracker.update(KEY_SHIFT_R, true, XModifierMask::empty());
        let before = tracker.pressed_modifiers();

        tracker.update(KEY_F5, true, XModifierMask::SHIFT);
        tracker.update(KEY_F5, false, XModifierMask::SHIFT);
        assert_eq!(tracker.pressed_modifiers(), before);
    }

    #[test]
    fn test_lock_state_from_ambient_mask() {
        assert_eq!(lock_state(XModifierMask::empty()), ControlKeyState::empty());
        assert_eq!(
            lock_state(XModifierMask::LOCK),
            ControlKeyState::CAPSLOCK_ON
        );
        assert_eq!(lock_state(XModifierMask::MOD2), ControlKeyState::NUMLOCK_ON);
        assert_eq!(
            lock_state(XModifierMask::MOD3),
            ControlKeyState::SCROLLLOCK_ON
        );
        assert_eq!(
            lock_state(XModifierMask::LOCK | XModifierMask::MOD2 | XModifierMask::MOD3),
            ControlKeyState::CAPSLOCK_ON
                | ControlKeyState::NUMLOCK_ON
                | ControlKeyState::SCROLLLOCK_ON
        );
    }

    #[test]
    fn test_reset() {
        let mut tracker = ModifierTracker::new();

        tracker.update(KEY_SHIFT_L, true, XModifierMask::empty());
        tracker.update(KEY_CONTROL_R, true, XModifierMask::SHIFT);
        assert!(!tracker.pressed_modifiers().is_empty());

        tracker.reset();
        assert!(tracker.pressed_modifiers().is_empty());
    }

    #[test]
    fn test_control_key_state_wire_values() {
        assert_eq!(ControlKeyState::RIGHT_ALT_PRESSED.bits(), 0x0001);
        assert_eq!(ControlKeyState::LEFT_ALT_PRESSED.bits(), 0x0002);
        assert_eq!(ControlKeyState::RIGHT_CTRL_PRESSED.bits(), 0x0004);
        assert_eq!(ControlKeyState::LEFT_CTRL_PRESSED.bits(), 0x0008);
        assert_eq!(ControlKeyState::SHIFT_PRESSED.bits(), 0x0010);
        assert_eq!(ControlKeyState::NUMLOCK_ON.bits(), 0x0020);
        assert_eq!(ControlKeyState::SCROLLLOCK_ON.bits(), 0x0040);
        assert_eq!(ControlKeyState::CAPSLOCK_ON.bits(), 0x0080);
        assert_eq!(ControlKeyState::ENHANCED_KEY.bits(), 0x0100);
        assert_eq!(ControlKeyState::LEFT_SHIFT_PRESSED.bits(), 0x0200);
        assert_eq!(ControlKeyState::RIGHT_SHIFT_PRESSED.bits(), 0x0400);
    }
}
