//! Driver input
//!
//! The host polls its keyboard/touch layer and hands an [`InputState`]
//! snapshot to the simulation every frame. [`KeyTracker`] builds that
//! snapshot from browser key events.

use serde::{Deserialize, Serialize};

/// Controls held during one tick
///
/// Any combination is legal; forward and backward together both apply.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputState {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    pub brake: bool,
}

impl InputState {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// True if nothing is held
    pub fn is_idle(&self) -> bool {
        *self == Self::default()
    }

    fn set(&mut self, key: DriveKey, held: bool) {
        match key {
            DriveKey::Forward => self.forward = held,
            DriveKey::Backward => self.backward = held,
            DriveKey::Left => self.left = held,
            DriveKey::Right => self.right = held,
            DriveKey::Brake => self.brake = held,
        }
    }
}

/// A driving control bound to one or more keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DriveKey {
    Forward,
    Backward,
    Left,
    Right,
    Brake,
}

impl DriveKey {
    /// Map a `KeyboardEvent.key` value to a control (WASD, arrows, space)
    pub fn from_key(key: &str) -> Option<Self> {
        match key.to_lowercase().as_str() {
            "w" | "arrowup" => Some(DriveKey::Forward),
            "s" | "arrowdown" => Some(DriveKey::Backward),
            "a" | "arrowleft" => Some(DriveKey::Left),
            "d" | "arrowright" => Some(DriveKey::Right),
            " " => Some(DriveKey::Brake),
            _ => None,
        }
    }
}

/// Tracks held keys between frames
#[derive(Debug, Clone, Default)]
pub struct KeyTracker {
    state: InputState,
    accepting: bool,
}

impl KeyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start/stop accepting key presses (releases always apply)
    pub fn set_accepting(&mut self, accepting: bool) {
        self.accepting = accepting;
    }

    /// Handle a key-down event. Returns true if the key is a driving control.
    pub fn key_down(&mut self, key: &str) -> bool {
        match DriveKey::from_key(key) {
            Some(control) => {
                if self.accepting {
                    self.state.set(control, true);
                }
                true
            }
            None => false,
        }
    }

    /// Handle a key-up event. Returns true if the key is a driving control.
    pub fn key_up(&mut self, key: &str) -> bool {
        match DriveKey::from_key(key) {
            Some(control) => {
                self.state.set(control, false);
                true
            }
            None => false,
        }
    }

    /// Drop every held key (focus lost, tab hidden)
    pub fn release_all(&mut self) {
        self.state.clear();
    }

    /// Snapshot for this frame
    pub fn snapshot(&self) -> InputState {
        self.state
    }
}
