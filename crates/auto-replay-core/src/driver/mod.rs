//! Input driver boundary: global hooks in, synthetic input out.
//!
//! The session engine never talks to the platform directly. Everything it
//! needs — observing real input while recording, synthesizing input while
//! playing — goes through [`InputDriver`], so the engine can be exercised
//! against a fake driver in tests and the platform backend swapped without
//! touching session logic.

mod desktop;
mod keycode;

pub use desktop::DesktopDriver;

use crate::{DriverResult, ReplayKey};

use serde::{Deserialize, Serialize};

/// Mouse button identity for recorded clicks and the auto-clicker.
///
/// Wire names follow the left/right/middle convention used by the control
/// surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MouseButton {
    /// The primary (usually left) button.
    #[serde(rename = "left")]
    Primary,
    /// The secondary (usually right) button.
    #[serde(rename = "right")]
    Secondary,
    /// The middle button; also where unrecognized buttons land.
    #[serde(rename = "middle")]
    Middle,
}

/// A single event observed by the global input hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookEvent {
    /// A mouse button was pressed at the given absolute screen position.
    MouseClick {
        /// Horizontal screen coordinate in pixels.
        x: i32,
        /// Vertical screen coordinate in pixels.
        y: i32,
        /// Which button was pressed.
        button: MouseButton,
    },
    /// A key went down, identified by its DOM-convention key code.
    KeyDown {
        /// The key code; may be outside the replayable set.
        key_code: u32,
    },
}

/// Callback invoked by the driver for every hook event while the hook is
/// active. Runs on the driver's hook thread, so it must not block.
pub type HookSink = Box<dyn Fn(HookEvent) + Send + Sync>;

/// Platform capability injected into the session engine.
///
/// Implementations must tolerate `hook_stop` on an already-inactive hook.
/// Synthesis methods act at the current pointer position unless the method
/// takes coordinates.
pub trait InputDriver: Send + Sync {
    /// Install `sink` and activate the global input hook.
    fn hook_start(&self, sink: HookSink) -> DriverResult<()>;

    /// Deactivate the global input hook and drop the installed sink.
    fn hook_stop(&self) -> DriverResult<()>;

    /// Move the pointer to absolute screen coordinates.
    fn pointer_move(&self, x: i32, y: i32) -> DriverResult<()>;

    /// Click a mouse button at the current pointer position.
    fn click(&self, button: MouseButton) -> DriverResult<()>;

    /// Tap a key: press and release.
    fn key_tap(&self, key: ReplayKey) -> DriverResult<()>;

    /// Press a key and leave it held.
    fn key_down(&self, key: ReplayKey) -> DriverResult<()>;

    /// Release a previously held key.
    fn key_up(&self, key: ReplayKey) -> DriverResult<()>;
}
