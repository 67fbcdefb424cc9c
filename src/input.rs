//! Input aggregation
//!
//! Keyboard keys (tracked as a held set) and on-screen touch buttons are
//! merged into one `TickInput` per tick. Sources are ORed; nothing is
//! debounced or consumed.

use std::collections::HashSet;

use crate::settings::KeyBindings;
use crate::sim::TickInput;

/// On-screen touch buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TouchButton {
    Left,
    Right,
    Jump,
}

impl TouchButton {
    /// Parse a button name as used by the page ("left", "right", "jump")
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "left" => Some(TouchButton::Left),
            "right" => Some(TouchButton::Right),
            "jump" => Some(TouchButton::Jump),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct TouchState {
    left: bool,
    right: bool,
    jump: bool,
}

/// Merges every input source into directional/jump intent
#[derive(Debug, Clone)]
pub struct InputAggregator {
    bindings: KeyBindings,
    held: HashSet<String>,
    touch: TouchState,
}

impl InputAggregator {
    pub fn new(bindings: KeyBindings) -> Self {
        Self {
            bindings,
            held: HashSet::new(),
            touch: TouchState::default(),
        }
    }

    /// Record a key press. Returns true for jump keys so the page can
    /// suppress scrolling.
    pub fn key_down(&mut self, key: &str) -> bool {
        self.held.insert(key.to_string());
        self.bindings.jump.iter().any(|k| k == key)
    }

    pub fn key_up(&mut self, key: &str) {
        self.held.remove(key);
    }

    pub fn set_touch(&mut self, button: TouchButton, pressed: bool) {
        match button {
            TouchButton::Left => self.touch.left = pressed,
            TouchButton::Right => self.touch.right = pressed,
            TouchButton::Jump => self.touch.jump = pressed,
        }
    }

    /// Forget held keys (touch buttons report their own releases)
    pub fn clear_keyboard(&mut self) {
        self.held.clear();
    }

    /// Forget everything, e.g. when the page loses focus
    pub fn release_all(&mut self) {
        self.held.clear();
        self.touch = TouchState::default();
    }

    fn any_held(&self, keys: &[String]) -> bool {
        keys.iter().any(|k| self.held.contains(k))
    }

    /// Current intent
    pub fn sample(&self) -> TickInput {
        TickInput {
            move_left: self.touch.left || self.any_held(&self.bindings.left),
            move_right: self.touch.right || self.any_held(&self.bindings.right),
            jump: self.touch.jump || self.any_held(&self.bindings.jump),
        }
    }
}

impl Default for InputAggregator {
    fn default() -> Self {
        Self::new(KeyBindings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_by_default() {
        assert_eq!(InputAggregator::default().sample(), TickInput::default());
    }

    #[test]
    fn test_alternate_bindings_map_to_same_signal() {
        let mut input = InputAggregator::default();
        input.key_down("d");
        assert!(input.sample().move_right);
        input.key_up("d");
        input.key_down("ArrowRight");
        assert!(input.sample().move_right);
    }

    #[test]
    fn test_sources_are_ored() {
        let mut input = InputAggregator::default();
        input.key_down("w");
        input.set_touch(TouchButton::Jump, true);
        input.key_up("w");
        assert!(input.sample().jump);
        input.set_touch(TouchButton::Jump, false);
        assert!(!input.sample().jump);
    }

    #[test]
    fn test_held_until_released() {
        let mut input = InputAggregator::default();
        input.key_down("a");
        for _ in 0..10 {
            assert!(input.sample().move_left);
        }
        input.key_up("a");
        assert!(!input.sample().move_left);
    }

    #[test]
    fn test_both_directions_reported() {
        let mut input = InputAggregator::default();
        input.key_down("a");
        input.set_touch(TouchButton::Right, true);
        let sample = input.sample();
        assert!(sample.move_left && sample.move_right);
    }

    #[test]
    fn test_key_down_flags_jump_keys() {
        let mut input = InputAggregator::default();
        assert!(input.key_down(" "));
        assert!(input.key_down("ArrowUp"));
        assert!(!input.key_down("ArrowLeft"));
        assert!(!input.key_down("x"));
    }

    #[test]
    fn test_unbound_keys_ignored() {
        let mut input = InputAggregator::default();
        input.key_down("q");
        assert_eq!(input.sample(), TickInput::default());
    }

    #[test]
    fn test_clear_keyboard_keeps_touch() {
        let mut input = InputAggregator::default();
        input.key_down("d");
        input.set_touch(TouchButton::Left, true);
        input.clear_keyboard();
        let sample = input.sample();
        assert!(!sample.move_right);
        assert!(sample.move_left);

        input.release_all();
        assert_eq!(input.sample(), TickInput::default());
    }

    #[test]
    fn test_custom_bindings() {
        let bindings = KeyBindings {
            left: vec!["j".into()],
            right: vec!["l".into()],
            jump: vec!["k".into()],
        };
        let mut input = InputAggregator::new(bindings);
        input.key_down("ArrowRight");
        assert!(!input.sample().move_right);
        assert!(input.key_down("k"));
        assert!(input.sample().jump);
    }

    #[test]
    fn test_touch_button_names() {
        assert_eq!(TouchButton::from_name("jump"), Some(TouchButton::Jump));
        assert_eq!(TouchButton::from_name("up"), None);
    }
}
