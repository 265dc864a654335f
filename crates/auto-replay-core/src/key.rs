//! Symbolic key identities for playback and the auto-hotkey.
//!
//! Recorded key events carry integer key codes in the legacy DOM `keyCode`
//! convention (the space browsers and most hook libraries agree on). Playback
//! resolves codes back to symbolic keys through [`ReplayKey::from_code`];
//! codes outside the supported set stay recorded but are skipped when played.

use std::fmt;

/// A key the engine can press, hold, or tap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplayKey {
    /// The backspace key.
    Backspace,
    /// The tab key.
    Tab,
    /// The enter / return key.
    Enter,
    /// Either shift key.
    Shift,
    /// Either control key.
    Control,
    /// Either alt key.
    Alt,
    /// The escape key.
    Escape,
    /// The space bar.
    Space,
    /// The left arrow key.
    Left,
    /// The up arrow key.
    Up,
    /// The right arrow key.
    Right,
    /// The down arrow key.
    Down,
    /// A letter `a`-`z` (always lowercase) or digit `0`-`9`.
    Char(char),
}

impl ReplayKey {
    /// Resolve a DOM-convention key code to a symbolic key.
    ///
    /// Letters resolve to their lowercase form. Returns `None` for any code
    /// outside the supported set; callers decide whether that is an error
    /// (auto-hotkey) or a skip (playback).
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            8 => Some(Self::Backspace),
            9 => Some(Self::Tab),
            13 => Some(Self::Enter),
            16 => Some(Self::Shift),
            17 => Some(Self::Control),
            18 => Some(Self::Alt),
            27 => Some(Self::Escape),
            32 => Some(Self::Space),
            37 => Some(Self::Left),
            38 => Some(Self::Up),
            39 => Some(Self::Right),
            40 => Some(Self::Down),
            // Digits 0-9.
            48..=57 => Some(Self::Char((b'0' + (code - 48) as u8) as char)),
            // Letters A-Z, resolved to lowercase.
            65..=90 => Some(Self::Char((b'a' + (code - 65) as u8) as char)),
            _ => None,
        }
    }

    /// Parse a key name as received from the control surface.
    ///
    /// Accepts the named keys (`"enter"`, `"space"`, ...) case-insensitively
    /// and single letters or digits (`"f"`, `"7"`). Returns `None` for
    /// anything else.
    pub fn from_name(name: &str) -> Option<Self> {
        let normalized = name.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "backspace" => Some(Self::Backspace),
            "tab" => Some(Self::Tab),
            "enter" => Some(Self::Enter),
            "shift" => Some(Self::Shift),
            "control" => Some(Self::Control),
            "alt" => Some(Self::Alt),
            "escape" => Some(Self::Escape),
            "space" => Some(Self::Space),
            "left" => Some(Self::Left),
            "up" => Some(Self::Up),
            "right" => Some(Self::Right),
            "down" => Some(Self::Down),
            single => {
                let mut chars = single.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if c.is_ascii_lowercase() || c.is_ascii_digit() => {
                        Some(Self::Char(c))
                    }
                    _ => None,
                }
            }
        }
    }
}

impl fmt::Display for ReplayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Backspace => f.write_str("backspace"),
            Self::Tab => f.write_str("tab"),
            Self::Enter => f.write_str("enter"),
            Self::Shift => f.write_str("shift"),
            Self::Control => f.write_str("control"),
            Self::Alt => f.write_str("alt"),
            Self::Escape => f.write_str("escape"),
            Self::Space => f.write_str("space"),
            Self::Left => f.write_str("left"),
            Self::Up => f.write_str("up"),
            Self::Right => f.write_str("right"),
            Self::Down => f.write_str("down"),
            Self::Char(c) => write!(f, "{c}"),
        }
    }
}
