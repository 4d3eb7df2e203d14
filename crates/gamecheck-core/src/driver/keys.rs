//! Keyboard controls the game binds, mapped to CDP key event fields.
//!
//! `Input.dispatchKeyEvent` needs matching `key`, `code`, and virtual
//! key code values for the engine's keyboard plugin to recognize the
//! event, plus `text` on key-down for printable keys.

use serde::{Deserialize, Serialize};

/// A control the game responds to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameKey {
    /// Enter: starts a level from the main menu
    Start,
    /// `d`: moves the player right
    MoveRight,
    /// `i`: fires the equipped weapon
    Fire,
}

impl GameKey {
    /// DOM `KeyboardEvent.key` value
    pub fn dom_key(&self) -> &'static str {
        match self {
            GameKey::Start => "Enter",
            GameKey::MoveRight => "d",
            GameKey::Fire => "i",
        }
    }

    /// DOM `KeyboardEvent.code` value
    pub fn dom_code(&self) -> &'static str {
        match self {
            GameKey::Start => "Enter",
            GameKey::MoveRight => "KeyD",
            GameKey::Fire => "KeyI",
        }
    }

    /// Windows virtual key code, which keyboard plugins key off
    pub fn virtual_key_code(&self) -> i64 {
        match self {
            GameKey::Start => 13,
            GameKey::MoveRight => 68,
            GameKey::Fire => 73,
        }
    }

    /// Text produced by the key, sent with key-down events
    pub fn text(&self) -> &'static str {
        match self {
            GameKey::Start => "\r",
            GameKey::MoveRight => "d",
            GameKey::Fire => "i",
        }
    }
}

impl std::fmt::Display for GameKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.dom_key())
    }
}
