//! Wire types for the HTTP control surface.
//!
//! Every request field carries a serde default matching the documented
//! operation defaults, so clients may send `{}` or omit the body entirely.
//! Responses always carry `success` and `message`; `actionCount` appears
//! only where an operation reports one.

use auto_replay_core::{HotkeyMode, MouseButton, Repeat};

use std::fmt::Display;

use serde::{Deserialize, Serialize};

fn default_speed() -> f64 {
    1.0
}

fn default_times() -> i64 {
    1
}

fn default_clicker_cps() -> f64 {
    1.0
}

fn default_hotkey_key() -> String {
    "f".to_owned()
}

fn default_hotkey_mode() -> HotkeyMode {
    HotkeyMode::Continuous
}

fn default_hotkey_cps() -> f64 {
    10.0
}

fn default_button() -> MouseButton {
    MouseButton::Primary
}

/// Body of `POST /api/macro/play`.
#[derive(Debug, Clone, Copy, Deserialize)]
pub(crate) struct PlayMacroRequest {
    /// Timing multiplier: 2.0 replays twice as fast, 0.5 at half speed.
    #[serde(default = "default_speed")]
    pub speed: f64,
    /// How many times to play the log; `-1` plays until stopped.
    #[serde(default = "default_times")]
    pub times: i64,
}

impl PlayMacroRequest {
    /// The requested repetition policy. Any negative count means forever.
    pub(crate) fn repeat(&self) -> Repeat {
        if self.times < 0 {
            Repeat::Forever
        } else {
            Repeat::Times(u32::try_from(self.times).unwrap_or(u32::MAX))
        }
    }
}

impl Default for PlayMacroRequest {
    fn default() -> Self {
        Self {
            speed: default_speed(),
            times: default_times(),
        }
    }
}

/// Body of `POST /api/clicker/start`.
#[derive(Debug, Clone, Copy, Deserialize)]
pub(crate) struct StartClickerRequest {
    /// Clicks per second.
    #[serde(default = "default_clicker_cps")]
    pub cps: f64,
    /// Which button to click.
    #[serde(default = "default_button")]
    pub button: MouseButton,
}

impl Default for StartClickerRequest {
    fn default() -> Self {
        Self {
            cps: default_clicker_cps(),
            button: default_button(),
        }
    }
}

/// Body of `POST /api/hotkey/start`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct StartHotkeyRequest {
    /// Key name: the documented named keys or a single letter or digit.
    #[serde(default = "default_hotkey_key")]
    pub key: String,
    /// Hold the key down or tap it continuously.
    #[serde(default = "default_hotkey_mode")]
    pub mode: HotkeyMode,
    /// Taps per second; only meaningful in continuous mode.
    #[serde(default = "default_hotkey_cps")]
    pub cps: f64,
}

impl Default for StartHotkeyRequest {
    fn default() -> Self {
        Self {
            key: default_hotkey_key(),
            mode: default_hotkey_mode(),
            cps: default_hotkey_cps(),
        }
    }
}

/// Body of `POST /api/hotkey/stop`.
///
/// The fields are accepted for interface compatibility but ignored: the
/// engine remembers what `start` set up and undoes exactly that, so a
/// caller supplying the wrong key here can no longer leave it held.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct StopHotkeyRequest {
    /// Ignored; the engine releases the key it actually holds.
    #[serde(default)]
    pub key: Option<String>,
    /// Ignored; the engine stops the mode it actually started.
    #[serde(default)]
    pub mode: Option<HotkeyMode>,
}

/// Uniform response body for every control-surface operation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ApiResponse {
    /// Whether the operation took effect.
    pub success: bool,
    /// Human-readable outcome, shown verbatim by shells.
    pub message: String,
    /// Number of recorded actions; present only on `stopRecording`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_count: Option<usize>,
}

impl ApiResponse {
    /// A successful response with the given message.
    pub(crate) fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            action_count: None,
        }
    }

    /// A successful response reporting a recorded-action count.
    pub(crate) fn ok_with_count(message: impl Into<String>, action_count: usize) -> Self {
        Self {
            success: true,
            message: message.into(),
            action_count: Some(action_count),
        }
    }

    /// A failed response carrying the error as its message.
    pub(crate) fn failure(error: &impl Display) -> Self {
        Self {
            success: false,
            message: error.to_string(),
            action_count: None,
        }
    }
}
