//! Auto-replay Core Library
//!
//! Input-automation engine: records global mouse and keyboard activity into
//! an action log, replays the log with speed-scaled timing, and drives
//! fixed-rate click and key-press loops. All platform access goes through
//! the [`InputDriver`] seam, backed by rdev and enigo in [`DesktopDriver`].
//!
//! # Example
//!
//! ```no_run
//! use auto_replay_core::{DesktopDriver, EngineResult, Repeat, SessionController};
//!
//! use std::{sync::Arc, time::Duration};
//!
//! #[tokio::main]
//! async fn main() -> EngineResult<()> {
//!     let driver = Arc::new(DesktopDriver::new()?);
//!     let session = SessionController::new(driver);
//!
//!     session.start_recording().await?;
//!     tokio::time::sleep(Duration::from_secs(3)).await;
//!     let count = session.stop_recording().await?;
//!
//!     println!("Recorded {} actions", count);
//!     session.play_macro(1.0, Repeat::Times(1)).await?;
//!     Ok(())
//! }
//! ```

mod driver;
mod error;
mod key;
mod session;

pub use {
    driver::{DesktopDriver, HookEvent, HookSink, InputDriver, MouseButton},
    error::{DriverError, DriverResult, EngineError, Result as EngineResult},
    key::ReplayKey,
    session::{ActionLog, HotkeyMode, RecordedAction, Repeat, SessionController, SessionStatus},
};
