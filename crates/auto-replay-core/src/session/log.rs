//! The ordered log of captured input actions.

use crate::driver::MouseButton;

use std::sync::Arc;

/// A single captured input action with its capture timestamp.
///
/// Timestamps are milliseconds since the Unix epoch, stamped when the action
/// was appended. Playback only ever uses differences between consecutive
/// stamps, so the absolute base does not matter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordedAction {
    /// A mouse click at an absolute screen position.
    Click {
        /// Horizontal screen coordinate in pixels.
        x: i32,
        /// Vertical screen coordinate in pixels.
        y: i32,
        /// Which button was clicked.
        button: MouseButton,
        /// Capture time in milliseconds since the Unix epoch.
        timestamp_ms: u64,
    },
    /// A key press identified by its DOM-convention key code.
    ///
    /// Key releases are not captured; playback replays presses as taps.
    KeyDown {
        /// The key code; may be outside the replayable set.
        key_code: u32,
        /// Capture time in milliseconds since the Unix epoch.
        timestamp_ms: u64,
    },
}

impl RecordedAction {
    /// Capture timestamp in milliseconds since the Unix epoch.
    pub fn timestamp_ms(&self) -> u64 {
        match self {
            Self::Click { timestamp_ms, .. } | Self::KeyDown { timestamp_ms, .. } => *timestamp_ms,
        }
    }
}

/// Append-only, chronologically ordered log of recorded actions.
///
/// The log survives across sessions: stopping a recording leaves it intact
/// for playback, and only the next recording start clears it.
#[derive(Debug, Default)]
pub struct ActionLog {
    actions: Vec<RecordedAction>,
}

impl ActionLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an action to the end of the log.
    pub fn append(&mut self, action: RecordedAction) {
        self.actions.push(action);
    }

    /// Discard all recorded actions.
    pub fn clear(&mut self) {
        self.actions.clear();
    }

    /// Number of recorded actions.
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Whether the log holds no actions.
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// The recorded actions in capture order.
    pub fn actions(&self) -> &[RecordedAction] {
        &self.actions
    }

    /// Immutable snapshot for a playback run.
    ///
    /// Playback works off a snapshot so a later recording cannot mutate the
    /// sequence out from under an in-flight run.
    pub fn snapshot(&self) -> Arc<[RecordedAction]> {
        self.actions.iter().copied().collect()
    }
}
