mod clicker;
mod controller;
mod hotkey;
mod log;
pub(crate) mod player;
mod recorder;

pub(crate) use {clicker::AutoClicker, hotkey::AutoHotkey, recorder::Recorder};

pub use {
    controller::{SessionController, SessionStatus},
    hotkey::HotkeyMode,
    log::{ActionLog, RecordedAction},
    player::Repeat,
};
