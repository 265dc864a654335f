//! Macro playback: replays the action log with speed-scaled timing.

use crate::{
    EngineError, EngineResult, ReplayKey,
    driver::InputDriver,
    session::log::RecordedAction,
};

use std::{
    panic::Location,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};

use error_location::ErrorLocation;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

/// Repeat policy for a playback run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Repeat {
    /// Play the log this many times. Zero completes immediately.
    Times(u32),
    /// Play until stopped.
    Forever,
}

/// Pause between repetitions, letting the desktop settle before the
/// sequence starts over.
const REPETITION_SETTLE_DELAY: Duration = Duration::from_millis(100);

/// Floor for inter-action delays in milliseconds. Zero-length recorded gaps
/// still yield to the scheduler so a stop request can interleave.
const MIN_ACTION_DELAY_MS: u64 = 1;

/// Owns the lifecycle of playback runs.
///
/// A run is a spawned task working off a log snapshot. The stored flag is
/// both status and cancellation: `stop` flips it, the task observes it
/// before every dispatch and exits without dispatching again.
pub struct Player {
    run: Option<Arc<AtomicBool>>,
}

impl Player {
    pub(crate) fn new() -> Self {
        Self { run: None }
    }

    /// Whether a playback run is currently active.
    pub(crate) fn is_playing(&self) -> bool {
        self.run
            .as_ref()
            .is_some_and(|active| active.load(Ordering::Acquire))
    }

    /// Start a playback run over `actions`.
    ///
    /// `speed` scales recorded gaps (2.0 plays twice as fast) and must be a
    /// positive finite number. The first action dispatches immediately.
    #[track_caller]
    #[instrument(skip(self, driver, actions))]
    pub(crate) fn start(
        &mut self,
        driver: Arc<dyn InputDriver>,
        actions: Arc<[RecordedAction]>,
        speed: f64,
        repeat: Repeat,
    ) -> EngineResult<()> {
        if self.is_playing() {
            return Err(EngineError::AlreadyPlaying {
                location: ErrorLocation::from(Location::caller()),
            });
        }
        if !(speed.is_finite() && speed > 0.0) {
            return Err(EngineError::InvalidRate {
                value: speed,
                location: ErrorLocation::from(Location::caller()),
            });
        }
        if actions.is_empty() {
            return Err(EngineError::EmptyLog {
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let active = Arc::new(AtomicBool::new(true));
        let run_id = Uuid::new_v4();

        info!(
            run_id = %run_id,
            action_count = actions.len(),
            speed,
            ?repeat,
            "Macro playback started"
        );

        tokio::spawn(run_playback(
            driver,
            actions,
            speed,
            repeat,
            Arc::clone(&active),
            run_id,
        ));

        self.run = Some(active);
        Ok(())
    }

    /// Request the current run to stop. Succeeds regardless of state.
    ///
    /// The playing flag drops immediately; at most the in-flight delay
    /// elapses before the run task exits, and nothing dispatches after it.
    pub(crate) fn stop(&mut self) {
        if let Some(active) = &self.run {
            if active.swap(false, Ordering::AcqRel) {
                info!("Macro playback stop requested");
            }
        }
    }
}

async fn run_playback(
    driver: Arc<dyn InputDriver>,
    actions: Arc<[RecordedAction]>,
    speed: f64,
    repeat: Repeat,
    active: Arc<AtomicBool>,
    run_id: Uuid,
) {
    let mut completed: u64 = 0;

    'run: while !repeat_done(repeat, completed) {
        if !active.load(Ordering::Acquire) {
            break;
        }

        for (index, action) in actions.iter().enumerate() {
            if !active.load(Ordering::Acquire) {
                break 'run;
            }

            dispatch(driver.as_ref(), action);

            // Wait out the recorded gap to the next action, scaled by speed.
            // The last action of a repetition has no successor and no wait.
            if let Some(next) = actions.get(index + 1) {
                let gap_ms = next.timestamp_ms().saturating_sub(action.timestamp_ms());
                tokio::time::sleep(scaled_delay(gap_ms, speed)).await;
            }
        }

        completed += 1;
        if repeat_done(repeat, completed) {
            break;
        }
        tokio::time::sleep(REPETITION_SETTLE_DELAY).await;
    }

    // At a natural end the flag is still set; a stopped run already dropped
    // it. The swap distinguishes the two for the log line.
    let cancelled = !active.swap(false, Ordering::AcqRel);
    info!(
        run_id = %run_id,
        repetitions = completed,
        cancelled,
        "Macro playback finished"
    );
}

fn repeat_done(repeat: Repeat, completed: u64) -> bool {
    match repeat {
        Repeat::Times(times) => completed >= u64::from(times),
        Repeat::Forever => false,
    }
}

/// Dispatch one action, resolving key codes and reporting failures without
/// aborting the run.
fn dispatch(driver: &dyn InputDriver, action: &RecordedAction) {
    let outcome = match *action {
        RecordedAction::Click { x, y, button, .. } => {
            driver.pointer_move(x, y).and_then(|()| driver.click(button))
        }
        RecordedAction::KeyDown { key_code, .. } => match ReplayKey::from_code(key_code) {
            Some(key) => driver.key_tap(key),
            None => {
                // Recorded from a key outside the replayable set.
                debug!(key_code, "Skipping unreplayable key code");
                Ok(())
            }
        },
    };

    if let Err(e) = outcome {
        warn!(error = %e, "Failed to dispatch action, continuing playback");
    }
}

/// Delay between two consecutive actions: the recorded gap divided by the
/// speed multiplier, floored at [`MIN_ACTION_DELAY_MS`].
pub(crate) fn scaled_delay(gap_ms: u64, speed: f64) -> Duration {
    // speed is validated positive and finite before a run starts; the cast
    // saturates for absurdly large gaps.
    let scaled = (gap_ms as f64 / speed) as u64;
    Duration::from_millis(scaled.max(MIN_ACTION_DELAY_MS))
}
