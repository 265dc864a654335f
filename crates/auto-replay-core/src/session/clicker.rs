//! The auto-clicker: fixed-rate clicking of one mouse button.

use crate::{
    EngineError, EngineResult,
    driver::{InputDriver, MouseButton},
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

/// Display name used in this activity's errors.
const ACTIVITY: &str = "Auto clicker";

/// Owns the click-loop lifecycle. Same flag scheme as playback: the stored
/// atomic is both status and cancellation.
pub struct AutoClicker {
    run: Option<Arc<AtomicBool>>,
}

impl AutoClicker {
    pub(crate) fn new() -> Self {
        Self { run: None }
    }

    /// Whether the click loop is currently running.
    pub(crate) fn is_running(&self) -> bool {
        self.run
            .as_ref()
            .is_some_and(|active| active.load(Ordering::Acquire))
    }

    /// Start clicking `button` at `clicks_per_second`.
    ///
    /// The rate must be a positive finite number; the click period is its
    /// reciprocal, so 0.5 clicks once every two seconds.
    #[track_caller]
    #[instrument(skip(self, driver))]
    pub(crate) fn start(
        &mut self,
        driver: Arc<dyn InputDriver>,
        clicks_per_second: f64,
        button: MouseButton,
    ) -> EngineResult<()> {
        if self.is_running() {
            return Err(EngineError::AlreadyRunning {
                activity: ACTIVITY,
                location: ErrorLocation::from(Location::caller()),
            });
        }
        if !(clicks_per_second.is_finite() && clicks_per_second > 0.0) {
            return Err(EngineError::InvalidRate {
                value: clicks_per_second,
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let period = Duration::from_secs_f64(1.0 / clicks_per_second);
        let active = Arc::new(AtomicBool::new(true));

        info!(
            clicks_per_second,
            ?button,
            period_ms = period.as_millis() as u64,
            "Auto clicker started"
        );

        tokio::spawn(run_clicker(driver, button, period, Arc::clone(&active)));

        self.run = Some(active);
        Ok(())
    }

    /// Stop the click loop.
    #[track_caller]
    pub(crate) fn stop(&mut self) -> EngineResult<()> {
        match self.run.take() {
            Some(active) => {
                active.store(false, Ordering::Release);
                info!("Auto clicker stopped");
                Ok(())
            }
            None => Err(EngineError::NotRunning {
                activity: ACTIVITY,
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }

    /// Best-effort stop for shutdown.
    pub(crate) fn shutdown(&mut self) {
        if let Some(active) = self.run.take() {
            active.store(false, Ordering::Release);
            debug!("Auto clicker cancelled during shutdown");
        }
    }
}

/// Click loop: the first click lands one period after start, matching an
/// interval timer.
async fn run_clicker(
    driver: Arc<dyn InputDriver>,
    button: MouseButton,
    period: Duration,
    active: Arc<AtomicBool>,
) {
    loop {
        tokio::time::sleep(period).await;
        if !active.load(Ordering::Acquire) {
            break;
        }
        if let Err(e) = driver.click(button) {
            warn!(error = %e, "Auto-click failed, continuing");
        }
    }
    debug!("Auto clicker loop exited");
}
