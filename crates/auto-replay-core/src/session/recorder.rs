//! Capture of global input into the action log.

use crate::{
    EngineError, EngineResult,
    driver::{HookEvent, HookSink, InputDriver},
    session::log::{ActionLog, RecordedAction},
};

use std::{
    panic::Location,
    sync::{
        Arc, Mutex, MutexGuard,
        atomic::{AtomicBool, Ordering},
    },
    time::{SystemTime, UNIX_EPOCH},
};

use error_location::ErrorLocation;
use tracing::{debug, error, info, instrument, warn};

/// Records hook events into the action log, stamping each on arrival.
///
/// The log lives behind a `std::sync::Mutex` because appends happen on the
/// driver's hook thread while reads happen on async tasks; every critical
/// section is a few instructions, so blocking is never meaningful.
pub struct Recorder {
    log: Arc<Mutex<ActionLog>>,
    /// Gates the hook sink. Checked before taking the log lock so events
    /// delivered after `stop` never reach the log.
    active: Arc<AtomicBool>,
}

impl Recorder {
    pub(crate) fn new() -> Self {
        Self {
            log: Arc::new(Mutex::new(ActionLog::new())),
            active: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Whether a recording session is currently active.
    pub(crate) fn is_recording(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    /// Number of actions currently in the log.
    pub(crate) fn action_count(&self) -> usize {
        self.lock_log().len()
    }

    /// Immutable snapshot of the log for playback.
    pub(crate) fn snapshot(&self) -> Arc<[RecordedAction]> {
        self.lock_log().snapshot()
    }

    /// Start a new recording session.
    ///
    /// Clears the previous log, installs the hook sink, and activates the
    /// global hook. Fails with [`EngineError::AlreadyRecording`] if a session
    /// is active; the existing session and its log are left untouched.
    #[track_caller]
    #[instrument(skip(self, driver))]
    pub(crate) fn start(&self, driver: &dyn InputDriver) -> EngineResult<()> {
        if self.active.load(Ordering::Acquire) {
            return Err(EngineError::AlreadyRecording {
                location: ErrorLocation::from(Location::caller()),
            });
        }

        // A new session replaces the previous log entirely.
        self.lock_log().clear();

        // Activate before hooking: the hook may deliver immediately, and an
        // event arriving between hook_start and the flag flip would be lost.
        self.active.store(true, Ordering::Release);

        let log = Arc::clone(&self.log);
        let active = Arc::clone(&self.active);
        let sink: HookSink = Box::new(move |event| {
            if !active.load(Ordering::Acquire) {
                return;
            }
            let action = action_from_event(event, now_ms());
            // A poisoned mutex means a previous holder panicked, but the
            // log data is still valid and usable.
            let mut log = log.lock().unwrap_or_else(|e| {
                error!("Action log lock poisoned, recovering: {}", e);
                e.into_inner()
            });
            log.append(action);
        });

        if let Err(e) = driver.hook_start(sink) {
            self.active.store(false, Ordering::Release);
            return Err(e.into());
        }

        info!("Macro recording started");
        Ok(())
    }

    /// Stop the active recording session and return the action count.
    ///
    /// The hook is deactivated best-effort: a platform failure to unhook is
    /// logged, not surfaced, because the captured log is intact either way.
    #[track_caller]
    #[instrument(skip(self, driver))]
    pub(crate) fn stop(&self, driver: &dyn InputDriver) -> EngineResult<usize> {
        if !self.active.load(Ordering::Acquire) {
            return Err(EngineError::NotRecording {
                location: ErrorLocation::from(Location::caller()),
            });
        }

        // Flag first: the sink stops appending even if the unhook fails.
        self.active.store(false, Ordering::Release);

        if let Err(e) = driver.hook_stop() {
            warn!(error = %e, "Failed to deactivate input hook, continuing");
        }

        let count = self.lock_log().len();
        info!(action_count = count, "Macro recording stopped");
        Ok(count)
    }

    /// Best-effort teardown for shutdown: deactivate regardless of state.
    pub(crate) fn shutdown(&self, driver: &dyn InputDriver) {
        self.active.store(false, Ordering::Release);
        if let Err(e) = driver.hook_stop() {
            debug!(error = %e, "Input hook teardown failed during shutdown");
        }
    }

    fn lock_log(&self) -> MutexGuard<'_, ActionLog> {
        self.log.lock().unwrap_or_else(|e| {
            error!("Action log lock poisoned, recovering: {}", e);
            e.into_inner()
        })
    }
}

fn action_from_event(event: HookEvent, timestamp_ms: u64) -> RecordedAction {
    match event {
        HookEvent::MouseClick { x, y, button } => RecordedAction::Click {
            x,
            y,
            button,
            timestamp_ms,
        },
        HookEvent::KeyDown { key_code } => RecordedAction::KeyDown {
            key_code,
            timestamp_ms,
        },
    }
}

/// Milliseconds since the Unix epoch, clamped to zero for a pre-epoch clock.
fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
