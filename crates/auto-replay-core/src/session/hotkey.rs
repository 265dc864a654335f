//! The auto-hotkey: holding a key down or tapping it at a fixed rate.

use crate::{EngineError, EngineResult, ReplayKey, driver::InputDriver};

use std::{
    panic::Location,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};

use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Display name used in this activity's errors.
const ACTIVITY: &str = "Auto hotkey";

/// Auto-hotkey operating mode. Wire names are `"hold"` and `"continuous"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HotkeyMode {
    /// Press the key once and keep it held until stopped.
    #[serde(rename = "hold")]
    Hold,
    /// Tap the key at a fixed rate until stopped.
    #[serde(rename = "continuous")]
    Continuous,
}

/// What the running hotkey set up, and therefore what stop must undo.
///
/// Remembering the key here is what lets `stop` release the right key
/// without the caller repeating it.
enum HotkeyRun {
    /// The key is physically held; stop releases it.
    Held { key: ReplayKey },
    /// A tap loop is running; stop cancels it.
    Tapping { active: Arc<AtomicBool> },
}

/// Owns the auto-hotkey lifecycle.
pub struct AutoHotkey {
    run: Option<HotkeyRun>,
}

impl AutoHotkey {
    pub(crate) fn new() -> Self {
        Self { run: None }
    }

    /// Whether the hotkey is currently holding or tapping.
    pub(crate) fn is_active(&self) -> bool {
        self.run.is_some()
    }

    /// Start holding or tapping `key`.
    ///
    /// `taps_per_second` only applies to [`HotkeyMode::Continuous`] and must
    /// be a positive finite number there.
    #[track_caller]
    #[instrument(skip(self, driver))]
    pub(crate) fn start(
        &mut self,
        driver: &Arc<dyn InputDriver>,
        key: ReplayKey,
        mode: HotkeyMode,
        taps_per_second: f64,
    ) -> EngineResult<()> {
        if self.run.is_some() {
            return Err(EngineError::AlreadyRunning {
                activity: ACTIVITY,
                location: ErrorLocation::from(Location::caller()),
            });
        }

        match mode {
            HotkeyMode::Hold => {
                // Surfaced, not swallowed: a failed press means nothing is
                // held, and the activity must not report itself active.
                driver.key_down(key)?;
                self.run = Some(HotkeyRun::Held { key });
                info!(key = %key, "Auto hotkey holding key");
            }
            HotkeyMode::Continuous => {
                if !(taps_per_second.is_finite() && taps_per_second > 0.0) {
                    return Err(EngineError::InvalidRate {
                        value: taps_per_second,
                        location: ErrorLocation::from(Location::caller()),
                    });
                }
                let period = Duration::from_secs_f64(1.0 / taps_per_second);
                let active = Arc::new(AtomicBool::new(true));

                tokio::spawn(run_tapper(
                    Arc::clone(driver),
                    key,
                    period,
                    Arc::clone(&active),
                ));

                self.run = Some(HotkeyRun::Tapping { active });
                info!(key = %key, taps_per_second, "Auto hotkey tapping key");
            }
        }

        Ok(())
    }

    /// Stop the hotkey, undoing whatever start set up: release the held key
    /// or cancel the tap loop.
    #[track_caller]
    pub(crate) fn stop(&mut self, driver: &dyn InputDriver) -> EngineResult<()> {
        match self.run.take() {
            None => Err(EngineError::NotRunning {
                activity: ACTIVITY,
                location: ErrorLocation::from(Location::caller()),
            }),
            Some(HotkeyRun::Held { key }) => {
                // The activity still counts as stopped if the release fails;
                // there is nothing left that could retry it.
                if let Err(e) = driver.key_up(key) {
                    warn!(key = %key, error = %e, "Failed to release held key");
                }
                info!(key = %key, "Auto hotkey released key");
                Ok(())
            }
            Some(HotkeyRun::Tapping { active }) => {
                active.store(false, Ordering::Release);
                info!("Auto hotkey stopped");
                Ok(())
            }
        }
    }

    /// Best-effort stop for shutdown; never leaves a key held.
    pub(crate) fn shutdown(&mut self, driver: &dyn InputDriver) {
        match self.run.take() {
            Some(HotkeyRun::Held { key }) => {
                if let Err(e) = driver.key_up(key) {
                    warn!(key = %key, error = %e, "Failed to release held key during shutdown");
                }
            }
            Some(HotkeyRun::Tapping { active }) => {
                active.store(false, Ordering::Release);
            }
            None => {}
        }
    }
}

async fn run_tapper(
    driver: Arc<dyn InputDriver>,
    key: ReplayKey,
    period: Duration,
    active: Arc<AtomicBool>,
) {
    loop {
        tokio::time::sleep(period).await;
        if !active.load(Ordering::Acquire) {
            break;
        }
        if let Err(e) = driver.key_tap(key) {
            warn!(key = %key, error = %e, "Auto hotkey tap failed, continuing");
        }
    }
    debug!(key = %key, "Auto hotkey loop exited");
}
