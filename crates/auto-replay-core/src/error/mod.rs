use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

/// Failure reported by a platform input driver.
///
/// Drivers wrap whatever their platform backend returns (hook registration,
/// event synthesis) into a single displayable reason.
#[derive(Error, Debug)]
#[error("{reason}")]
pub struct DriverError {
    /// Human-readable description of the platform failure.
    pub reason: String,
}

impl DriverError {
    /// Create a driver error from any displayable platform failure.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Convenience type alias for Results using [`DriverError`].
pub type DriverResult<T> = std::result::Result<T, DriverError>;

/// Session engine errors with source location tracking.
///
/// Precondition violations are part of normal operation (the control surface
/// reports them as failed requests); only [`EngineError::Driver`] indicates a
/// platform problem.
#[derive(Error, Debug)]
pub enum EngineError {
    /// A recording session is already active.
    #[error("Already recording {location}")]
    AlreadyRecording {
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// No recording session is active.
    #[error("Not recording {location}")]
    NotRecording {
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Recording cannot start while playback is running, otherwise the
    /// recorder would capture the session's own synthetic input.
    #[error("Macro playback in progress {location}")]
    PlaybackInProgress {
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// A playback run is already active.
    #[error("Macro already playing {location}")]
    AlreadyPlaying {
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The action log holds nothing to play.
    #[error("No recorded actions to play {location}")]
    EmptyLog {
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The named periodic activity is already running.
    #[error("{activity} already running {location}")]
    AlreadyRunning {
        /// Display name of the activity, e.g. "Auto clicker".
        activity: &'static str,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The named periodic activity is not running.
    #[error("{activity} not running {location}")]
    NotRunning {
        /// Display name of the activity, e.g. "Auto hotkey".
        activity: &'static str,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// A key name could not be resolved to a supported key.
    #[error("Unsupported key: {name:?} {location}")]
    InvalidKey {
        /// The key name as received from the caller.
        name: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// A speed or clicks-per-second value was not a positive finite number.
    #[error("Rate must be a positive number, got {value} {location}")]
    InvalidRate {
        /// The rejected value.
        value: f64,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The platform input driver failed.
    #[error("Input driver failure: {source} {location}")]
    Driver {
        /// The underlying driver error.
        #[source]
        source: DriverError,
        /// Source location where error occurred.
        location: ErrorLocation,
    },
}

// Manual From<DriverError> with location tracking.
// Cannot use #[from] because it does not support extra fields.
impl From<DriverError> for EngineError {
    #[track_caller]
    fn from(source: DriverError) -> Self {
        EngineError::Driver {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

/// Result type alias using [`EngineError`].
pub type Result<T> = std::result::Result<T, EngineError>;
