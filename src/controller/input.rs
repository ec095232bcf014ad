/// Platform-agnostic input handling
use std::collections::HashSet;

use super::targeting::EditAction;
use crate::model::MoveIntent;

/// Platform-independent input events
#[derive(Debug, Clone)]
pub enum InputEvent {
    // Keyboard events
    KeyDown(String),
    KeyUp(String),

    // Mouse events
    MouseMove { dx: f32, dy: f32 },
    MouseClick { button: MouseButton, is_down: bool },

    // Window events
    FocusLost,
    PointerLockChanged { locked: bool },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

impl MouseButton {
    pub fn from_web_button(button: i16) -> Self {
        match button {
            0 => MouseButton::Left,
            1 => MouseButton::Middle,
            2 => MouseButton::Right,
            _ => MouseButton::Left,
        }
    }
}

/// Key mapping configuration. Each action accepts any of its keys.
#[derive(Clone, Debug)]
pub struct KeyBindings {
    pub forward: Vec<String>,
    pub backward: Vec<String>,
    pub left: Vec<String>,
    pub right: Vec<String>,
    pub jump: Vec<String>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        let keys = |k: &[&str]| k.iter().map(|s| s.to_string()).collect();
        Self {
            forward: keys(&["KeyW", "ArrowUp"]),
            backward: keys(&["KeyS", "ArrowDown"]),
            left: keys(&["KeyA", "ArrowLeft"]),
            right: keys(&["KeyD", "ArrowRight"]),
            jump: keys(&["Space"]),
        }
    }
}

/// Held keys, pointer lock and pending clicks, accumulated between ticks.
pub struct InputState {
    pub pressed_keys: HashSet<String>,
    pub look_delta: (f32, f32),
    pub pointer_locked: bool,
    pending_action: Option<EditAction>,
    bindings: KeyBindings,
}

impl Default for InputState {
    fn default() -> Self {
        Self::new(KeyBindings::default())
    }
}

impl InputState {
    pub fn new(bindings: KeyBindings) -> Self {
        Self {
            pressed_keys: HashSet::new(),
            look_delta: (0.0, 0.0),
            pointer_locked: false,
            pending_action: None,
            bindings,
        }
    }

    /// Process an input event and update state
    pub fn process_event(&mut self, event: &InputEvent) {
        match event {
            InputEvent::KeyDown(key) => {
                self.pressed_keys.insert(key.clone());
            }
            InputEvent::KeyUp(key) => {
                self.pressed_keys.remove(key.as_str());
            }
            InputEvent::MouseMove { dx, dy } => {
                if self.pointer_locked {
                    self.look_delta.0 += dx;
                    self.look_delta.1 += dy;
                }
            }
            InputEvent::MouseClick { button, is_down: true } => {
                // a click while unlocked only acquires the lock
                if !self.pointer_locked {
                    return;
                }
                match button {
                    MouseButton::Left => self.pending_action = Some(EditAction::Remove),
                    MouseButton::Right => self.pending_action = Some(EditAction::Place),
                    MouseButton::Middle => {}
                }
            }
            InputEvent::MouseClick { is_down: false, .. } => {}
            InputEvent::FocusLost => {
                self.clear_keys();
            }
            InputEvent::PointerLockChanged { locked } => {
                self.pointer_locked = *locked;
                if !locked {
                    self.clear_keys();
                    self.pending_action = None;
                }
            }
        }
    }

    pub fn is_key_pressed(&self, key: &str) -> bool {
        self.pressed_keys.contains(key)
    }

    fn any_pressed(&self, keys: &[String]) -> bool {
        keys.iter().any(|k| self.is_key_pressed(k))
    }

    pub fn clear_keys(&mut self) {
        self.pressed_keys.clear();
    }

    pub fn consume_look(&mut self) -> (f32, f32) {
        let result = self.look_delta;
        self.look_delta = (0.0, 0.0);
        result
    }

    /// Snapshot of movement input for one tick.
    pub fn intent(&self) -> MoveIntent {
        MoveIntent {
            forward: self.any_pressed(&self.bindings.forward),
            backward: self.any_pressed(&self.bindings.backward),
            left: self.any_pressed(&self.bindings.left),
            right: self.any_pressed(&self.bindings.right),
            jump_requested: self.any_pressed(&self.bindings.jump),
        }
    }

    /// At most one edit per tick; the latest click wins.
    pub fn take_action(&mut self) -> Option<EditAction> {
        self.pending_action.take()
    }
}
