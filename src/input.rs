//! Keyboard mapping
//!
//! The frame loop polls a snapshot of held keys; each tank maps that snapshot
//! to its own `TankControls` through a configurable binding table.

use std::collections::HashSet;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Logical keys the game understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    W,
    A,
    S,
    D,
    R,
    Space,
    Enter,
    Escape,
    Backspace,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    /// Any other printable character
    Char(char),
}

impl Key {
    pub fn label(&self) -> String {
        match self {
            Key::W => "W".to_string(),
            Key::A => "A".to_string(),
            Key::S => "S".to_string(),
            Key::D => "D".to_string(),
            Key::R => "R".to_string(),
            Key::Space => "Space".to_string(),
            Key::Enter => "Enter".to_string(),
            Key::Escape => "Esc".to_string(),
            Key::Backspace => "Backspace".to_string(),
            Key::ArrowUp => "Up".to_string(),
            Key::ArrowDown => "Down".to_string(),
            Key::ArrowLeft => "Left".to_string(),
            Key::ArrowRight => "Right".to_string(),
            Key::Char(c) => c.to_uppercase().to_string(),
        }
    }

    /// Character this key types into a text field, if any
    pub fn as_char(&self) -> Option<char> {
        match self {
            Key::W => Some('w'),
            Key::A => Some('a'),
            Key::S => Some('s'),
            Key::D => Some('d'),
            Key::R => Some('r'),
            Key::Space => Some(' '),
            Key::Char(c) => Some(*c),
            _ => None,
        }
    }
}

/// Snapshot of keys held during one frame
pub type PressedKeys = HashSet<Key>;

/// Movement and fire intent of a single tank for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TankControls {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub shoot: bool,
}

impl TankControls {
    /// Raw (un-normalized) movement vector in screen space
    pub fn movement(&self) -> Vec2 {
        let mut v = Vec2::ZERO;
        if self.left {
            v.x -= 1.0;
        }
        if self.right {
            v.x += 1.0;
        }
        if self.up {
            v.y -= 1.0;
        }
        if self.down {
            v.y += 1.0;
        }
        v
    }

    /// Controls that steer along `dir` (8-way), optionally firing
    pub fn toward(dir: Vec2, shoot: bool) -> Self {
        // Ignore small components so the tank does not zig-zag on an axis
        let dead = 0.38;
        Self {
            up: dir.y < -dead,
            down: dir.y > dead,
            left: dir.x < -dead,
            right: dir.x > dead,
            shoot,
        }
    }
}

/// Key binding table for one tank
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyBindings {
    pub up: Key,
    pub down: Key,
    pub left: Key,
    pub right: Key,
    pub shoot: Key,
}

impl KeyBindings {
    /// Blue tank: WASD + Space
    pub fn player_one() -> Self {
        Self {
            up: Key::W,
            down: Key::S,
            left: Key::A,
            right: Key::D,
            shoot: Key::Space,
        }
    }

    /// Green tank: arrows + Enter
    pub fn player_two() -> Self {
        Self {
            up: Key::ArrowUp,
            down: Key::ArrowDown,
            left: Key::ArrowLeft,
            right: Key::ArrowRight,
            shoot: Key::Enter,
        }
    }

    /// Map a pressed-key snapshot to tank controls
    pub fn controls(&self, pressed: &PressedKeys) -> TankControls {
        TankControls {
            up: pressed.contains(&self.up),
            down: pressed.contains(&self.down),
            left: pressed.contains(&self.left),
            right: pressed.contains(&self.right),
            shoot: pressed.contains(&self.shoot),
        }
    }

    /// True if two bindings share any key
    pub fn conflicts_with(&self, other: &KeyBindings) -> bool {
        let mine = [self.up, self.down, self.left, self.right, self.shoot];
        let theirs = [other.up, other.down, other.left, other.right, other.shoot];
        mine.iter().any(|k| theirs.contains(k))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bindings_map_snapshot() {
        let pressed: PressedKeys = [Key::W, Key::D, Key::Enter].into_iter().collect();
        let blue = KeyBindings::player_one().controls(&pressed);
        let green = KeyBindings::player_two().controls(&pressed);

        assert!(blue.up && blue.right && !blue.shoot);
        assert!(green.shoot && !green.up);
    }

    #[test]
    fn test_opposite_keys_cancel() {
        let controls = TankControls {
            left: true,
            right: true,
            ..Default::default()
        };
        assert_eq!(controls.movement(), Vec2::ZERO);
    }

    #[test]
    fn test_default_bindings_do_not_conflict() {
        assert!(!KeyBindings::player_one().conflicts_with(&KeyBindings::player_two()));
        assert!(KeyBindings::player_one().conflicts_with(&KeyBindings::player_one()));
    }

    #[test]
    fn test_toward_diagonal() {
        let c = TankControls::toward(Vec2::new(0.7, -0.7), true);
        assert!(c.up && c.right && c.shoot);
        assert!(!c.down && !c.left);
    }
}
