//! The session controller: single entry point for every session request.

use crate::{
    EngineError, EngineResult,
    driver::{InputDriver, MouseButton},
    key::ReplayKey,
    session::{
        AutoClicker, AutoHotkey, HotkeyMode, Recorder,
        player::{Player, Repeat},
    },
};

use std::{panic::Location, sync::Arc};

use error_location::ErrorLocation;
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{info, instrument};

/// Read-only snapshot of the session flags and log size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStatus {
    /// Whether a recording session is active.
    pub recording: bool,
    /// Whether a playback run is active.
    pub playing: bool,
    /// Whether the auto-clicker is running.
    pub clicker_running: bool,
    /// Whether the auto-hotkey is holding or tapping.
    pub hotkey_active: bool,
    /// Number of actions currently in the log.
    pub action_count: usize,
}

/// All mutable activity state, behind one lock so every request observes
/// and mutates a consistent whole.
struct Activities {
    recorder: Recorder,
    player: Player,
    clicker: AutoClicker,
    hotkey: AutoHotkey,
}

/// Serializes session requests over the four activities.
///
/// Requests take the internal lock only long enough to check preconditions
/// and flip state; activity loops run on spawned tasks holding clones of
/// their own flags, so they never contend with requests.
pub struct SessionController {
    driver: Arc<dyn InputDriver>,
    activities: Mutex<Activities>,
}

impl SessionController {
    /// Create a controller driving all activities through `driver`.
    pub fn new(driver: Arc<dyn InputDriver>) -> Self {
        Self {
            driver,
            activities: Mutex::new(Activities {
                recorder: Recorder::new(),
                player: Player::new(),
                clicker: AutoClicker::new(),
                hotkey: AutoHotkey::new(),
            }),
        }
    }

    /// Start recording global input into a fresh log.
    ///
    /// Rejected while playback runs: the hook would capture the session's
    /// own synthetic input straight back into the log.
    #[instrument(skip(self))]
    pub async fn start_recording(&self) -> EngineResult<()> {
        let activities = self.activities.lock().await;
        if activities.player.is_playing() {
            return Err(EngineError::PlaybackInProgress {
                location: ErrorLocation::from(Location::caller()),
            });
        }
        activities.recorder.start(self.driver.as_ref())
    }

    /// Stop recording and return the number of captured actions.
    #[instrument(skip(self))]
    pub async fn stop_recording(&self) -> EngineResult<usize> {
        let activities = self.activities.lock().await;
        activities.recorder.stop(self.driver.as_ref())
    }

    /// Play the recorded log at `speed`, repeating per `repeat`.
    #[instrument(skip(self))]
    pub async fn play_macro(&self, speed: f64, repeat: Repeat) -> EngineResult<()> {
        let mut activities = self.activities.lock().await;
        let actions = activities.recorder.snapshot();
        activities
            .player
            .start(Arc::clone(&self.driver), actions, speed, repeat)
    }

    /// Stop playback. Succeeds even when nothing is playing.
    #[instrument(skip(self))]
    pub async fn stop_macro(&self) {
        self.activities.lock().await.player.stop();
    }

    /// Start the auto-clicker on `button` at `clicks_per_second`.
    #[instrument(skip(self))]
    pub async fn start_auto_clicker(
        &self,
        clicks_per_second: f64,
        button: MouseButton,
    ) -> EngineResult<()> {
        let mut activities = self.activities.lock().await;
        activities
            .clicker
            .start(Arc::clone(&self.driver), clicks_per_second, button)
    }

    /// Stop the auto-clicker.
    #[instrument(skip(self))]
    pub async fn stop_auto_clicker(&self) -> EngineResult<()> {
        self.activities.lock().await.clicker.stop()
    }

    /// Start the auto-hotkey for the named key.
    ///
    /// `key_name` accepts the documented key names or a single letter or
    /// digit; anything else is [`EngineError::InvalidKey`].
    #[instrument(skip(self))]
    pub async fn start_auto_hotkey(
        &self,
        key_name: &str,
        mode: HotkeyMode,
        taps_per_second: f64,
    ) -> EngineResult<()> {
        let key = ReplayKey::from_name(key_name).ok_or_else(|| EngineError::InvalidKey {
            name: key_name.to_owned(),
            location: ErrorLocation::from(Location::caller()),
        })?;
        let mut activities = self.activities.lock().await;
        activities
            .hotkey
            .start(&self.driver, key, mode, taps_per_second)
    }

    /// Stop the auto-hotkey, releasing a held key if there is one.
    #[instrument(skip(self))]
    pub async fn stop_auto_hotkey(&self) -> EngineResult<()> {
        let mut activities = self.activities.lock().await;
        activities.hotkey.stop(self.driver.as_ref())
    }

    /// Snapshot the session flags and log size.
    pub async fn status(&self) -> SessionStatus {
        let activities = self.activities.lock().await;
        SessionStatus {
            recording: activities.recorder.is_recording(),
            playing: activities.player.is_playing(),
            clicker_running: activities.clicker.is_running(),
            hotkey_active: activities.hotkey.is_active(),
            action_count: activities.recorder.action_count(),
        }
    }

    /// Stop everything: playback, clicker, hotkey, recording.
    ///
    /// Safe to call in any state and any number of times; a held hotkey is
    /// released and the input hook deactivated best-effort.
    #[instrument(skip(self))]
    pub async fn shutdown_all(&self) {
        let mut activities = self.activities.lock().await;
        activities.player.stop();
        activities.clicker.shutdown();
        activities.hotkey.shutdown(self.driver.as_ref());
        activities.recorder.shutdown(self.driver.as_ref());
        info!("All session activities shut down");
    }
}
