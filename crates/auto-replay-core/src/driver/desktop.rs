//! Real desktop input driver: rdev for the global hook, enigo for synthesis.

use crate::{
    DriverError, DriverResult, ReplayKey,
    driver::{HookEvent, HookSink, InputDriver, MouseButton, keycode},
};

use std::sync::{
    Arc, Mutex, Once,
    atomic::{AtomicBool, Ordering},
};

use enigo::{Coordinate, Direction, Enigo, Keyboard, Mouse, Settings};
use rdev::EventType;
use tracing::{debug, error, info};

/// Production [`InputDriver`] backed by the OS.
///
/// Observation uses an rdev hook listener. rdev's `listen` blocks its thread
/// forever and offers no teardown, so the listener thread is started at most
/// once per process and event delivery is gated by an atomic flag instead of
/// unhooking. Synthesis goes through enigo with a fresh instance per call:
/// `Enigo` is not `Send`, so it cannot be stored in a driver shared across
/// tasks, and construction is cheap.
pub struct DesktopDriver {
    /// Gates delivery from the hook thread to the installed sink.
    hook_active: Arc<AtomicBool>,
    /// Sink installed by `hook_start`, consumed on the hook thread.
    sink: Arc<Mutex<Option<HookSink>>>,
    /// Ensures the listener thread is spawned exactly once.
    listener: Once,
}

impl DesktopDriver {
    /// Create the driver and verify the platform can synthesize input.
    ///
    /// Constructing a throwaway `Enigo` up front surfaces missing permissions
    /// or a missing display server at startup instead of on the first replay.
    pub fn new() -> DriverResult<Self> {
        Enigo::new(&Settings::default()).map_err(|e| {
            DriverError::new(format!("Failed to initialize input synthesis: {}", e))
        })?;

        info!("Desktop input driver initialized");

        Ok(Self {
            hook_active: Arc::new(AtomicBool::new(false)),
            sink: Arc::new(Mutex::new(None)),
            listener: Once::new(),
        })
    }

    fn synthesizer(&self) -> DriverResult<Enigo> {
        Enigo::new(&Settings::default())
            .map_err(|e| DriverError::new(format!("Failed to initialize input synthesis: {}", e)))
    }

    fn install_sink(&self, sink: Option<HookSink>) {
        // A poisoned mutex means a previous holder panicked, but the
        // slot itself is still valid and usable.
        let mut slot = self.sink.lock().unwrap_or_else(|e| {
            error!("Hook sink lock poisoned, recovering: {}", e);
            e.into_inner()
        });
        *slot = sink;
    }
}

impl InputDriver for DesktopDriver {
    fn hook_start(&self, sink: HookSink) -> DriverResult<()> {
        self.install_sink(Some(sink));

        let active = Arc::clone(&self.hook_active);
        let slot = Arc::clone(&self.sink);
        self.listener.call_once(|| spawn_hook_listener(active, slot));

        self.hook_active.store(true, Ordering::Release);
        debug!("Global input hook activated");
        Ok(())
    }

    fn hook_stop(&self) -> DriverResult<()> {
        // Tolerates an already-inactive hook: flag and sink just reset.
        self.hook_active.store(false, Ordering::Release);
        self.install_sink(None);
        debug!("Global input hook deactivated");
        Ok(())
    }

    fn pointer_move(&self, x: i32, y: i32) -> DriverResult<()> {
        self.synthesizer()?
            .move_mouse(x, y, Coordinate::Abs)
            .map_err(|e| DriverError::new(format!("Failed to move pointer: {}", e)))
    }

    fn click(&self, button: MouseButton) -> DriverResult<()> {
        self.synthesizer()?
            .button(synth_button(button), Direction::Click)
            .map_err(|e| DriverError::new(format!("Failed to click {:?}: {}", button, e)))
    }

    fn key_tap(&self, key: ReplayKey) -> DriverResult<()> {
        self.synthesizer()?
            .key(synth_key(key), Direction::Click)
            .map_err(|e| DriverError::new(format!("Failed to tap key {}: {}", key, e)))
    }

    fn key_down(&self, key: ReplayKey) -> DriverResult<()> {
        self.synthesizer()?
            .key(synth_key(key), Direction::Press)
            .map_err(|e| DriverError::new(format!("Failed to press key {}: {}", key, e)))
    }

    fn key_up(&self, key: ReplayKey) -> DriverResult<()> {
        self.synthesizer()?
            .key(synth_key(key), Direction::Release)
            .map_err(|e| DriverError::new(format!("Failed to release key {}: {}", key, e)))
    }
}

/// Spawn the process-wide hook listener thread.
fn spawn_hook_listener(active: Arc<AtomicBool>, sink: Arc<Mutex<Option<HookSink>>>) {
    std::thread::spawn(move || {
        // Pointer position is tracked even while delivery is inactive so the
        // first click of a recording carries real coordinates. rdev reports
        // button presses without a position; the last observed move supplies
        // it.
        let mut pointer = (0i32, 0i32);

        let listen_result = rdev::listen(move |event| match event.event_type {
            EventType::MouseMove { x, y } => {
                pointer = (x as i32, y as i32);
            }
            EventType::ButtonPress(button) => {
                if active.load(Ordering::Acquire) {
                    deliver(
                        &sink,
                        HookEvent::MouseClick {
                            x: pointer.0,
                            y: pointer.1,
                            button: keycode::button_identity(button),
                        },
                    );
                }
            }
            EventType::KeyPress(key) => {
                if active.load(Ordering::Acquire)
                    && let Some(key_code) = keycode::key_code(key)
                {
                    deliver(&sink, HookEvent::KeyDown { key_code });
                }
            }
            _ => {}
        });

        // listen() only returns on registration failure (missing accessibility
        // permission on macOS, no X11 on Linux).
        if let Err(e) = listen_result {
            error!(error = ?e, "Global input hook listener failed");
        }
    });
}

fn deliver(sink: &Mutex<Option<HookSink>>, event: HookEvent) {
    let slot = sink.lock().unwrap_or_else(|e| {
        error!("Hook sink lock poisoned, recovering: {}", e);
        e.into_inner()
    });
    if let Some(sink) = slot.as_ref() {
        sink(event);
    }
}

fn synth_button(button: MouseButton) -> enigo::Button {
    match button {
        MouseButton::Primary => enigo::Button::Left,
        MouseButton::Secondary => enigo::Button::Right,
        MouseButton::Middle => enigo::Button::Middle,
    }
}

fn synth_key(key: ReplayKey) -> enigo::Key {
    match key {
        ReplayKey::Backspace => enigo::Key::Backspace,
        ReplayKey::Tab => enigo::Key::Tab,
        ReplayKey::Enter => enigo::Key::Return,
        ReplayKey::Shift => enigo::Key::Shift,
        ReplayKey::Control => enigo::Key::Control,
        ReplayKey::Alt => enigo::Key::Alt,
        ReplayKey::Escape => enigo::Key::Escape,
        ReplayKey::Space => enigo::Key::Space,
        ReplayKey::Left => enigo::Key::LeftArrow,
        ReplayKey::Up => enigo::Key::UpArrow,
        ReplayKey::Right => enigo::Key::RightArrow,
        ReplayKey::Down => enigo::Key::DownArrow,
        ReplayKey::Char(c) => enigo::Key::Unicode(c),
    }
}
