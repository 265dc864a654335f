use crate::{
    EngineError, HookEvent, MouseButton, RecordedAction, session::Recorder,
    tests::fake_driver::FakeDriver,
};

use std::time::Duration;

/// WHAT: Hook events land in the log in arrival order
/// WHY: Playback replays the log front to back; order is the recording
#[test]
fn given_active_recording_when_hook_events_arrive_then_log_grows_in_order() {
    // Given: An active recording session
    let fake = FakeDriver::new();
    let recorder = Recorder::new();
    assert!(recorder.start(fake.as_ref()).is_ok());
    assert!(recorder.is_recording());
    assert!(fake.hook_active());

    // When: The hook delivers a click, a key, and another click
    fake.emit(HookEvent::MouseClick {
        x: 10,
        y: 20,
        button: MouseButton::Primary,
    });
    fake.emit(HookEvent::KeyDown { key_code: 65 });
    fake.emit(HookEvent::MouseClick {
        x: 30,
        y: 40,
        button: MouseButton::Secondary,
    });

    // Then: Stop reports three actions and the snapshot preserves order
    let count = recorder.stop(fake.as_ref());
    assert!(matches!(count, Ok(3)));

    let actions = recorder.snapshot();
    assert_eq!(actions.len(), 3);
    assert!(matches!(
        actions[0],
        RecordedAction::Click {
            x: 10,
            y: 20,
            button: MouseButton::Primary,
            ..
        }
    ));
    assert!(matches!(actions[1], RecordedAction::KeyDown { key_code: 65, .. }));
    assert!(matches!(
        actions[2],
        RecordedAction::Click {
            x: 30,
            y: 40,
            button: MouseButton::Secondary,
            ..
        }
    ));
}

/// WHAT: Stopping without an active session is an error
/// WHY: The control surface reports "not recording" instead of lying
#[test]
fn given_no_recording_when_stopping_then_not_recording_error() {
    let fake = FakeDriver::new();
    let recorder = Recorder::new();

    let result = recorder.stop(fake.as_ref());
    assert!(matches!(result, Err(EngineError::NotRecording { .. })));
}

/// WHAT: A second start is rejected and the running session is untouched
/// WHY: Double-start must not clear or duplicate the in-progress log
#[test]
fn given_active_recording_when_starting_again_then_already_recording_and_log_intact() {
    // Given: A session that has already captured two events
    let fake = FakeDriver::new();
    let recorder = Recorder::new();
    assert!(recorder.start(fake.as_ref()).is_ok());
    fake.emit(HookEvent::KeyDown { key_code: 65 });
    fake.emit(HookEvent::KeyDown { key_code: 66 });

    // When: Starting again
    let result = recorder.start(fake.as_ref());

    // Then: Rejected, still recording, log intact
    assert!(matches!(result, Err(EngineError::AlreadyRecording { .. })));
    assert!(recorder.is_recording());
    assert_eq!(recorder.action_count(), 2);
}

/// WHAT: A new session clears the previous log
/// WHY: Each recording replaces the last; stale actions must not replay
#[test]
fn given_previous_log_when_new_recording_starts_then_log_cleared() {
    // Given: A finished session with two actions
    let fake = FakeDriver::new();
    let recorder = Recorder::new();
    assert!(recorder.start(fake.as_ref()).is_ok());
    fake.emit(HookEvent::KeyDown { key_code: 65 });
    fake.emit(HookEvent::KeyDown { key_code: 66 });
    assert!(matches!(recorder.stop(fake.as_ref()), Ok(2)));

    // When: Starting a new session and capturing one event
    assert!(recorder.start(fake.as_ref()).is_ok());
    assert_eq!(recorder.action_count(), 0);
    fake.emit(HookEvent::KeyDown { key_code: 67 });

    // Then: Only the new event is in the log
    assert!(matches!(recorder.stop(fake.as_ref()), Ok(1)));
}

/// WHAT: Events delivered after stop never reach the log
/// WHY: The session boundary is the stop request, not hook teardown timing
#[test]
fn given_stopped_recording_when_events_arrive_then_ignored() {
    let fake = FakeDriver::new();
    let recorder = Recorder::new();
    assert!(recorder.start(fake.as_ref()).is_ok());
    fake.emit(HookEvent::KeyDown { key_code: 65 });
    assert!(matches!(recorder.stop(fake.as_ref()), Ok(1)));

    fake.emit(HookEvent::KeyDown { key_code: 66 });
    fake.emit(HookEvent::MouseClick {
        x: 1,
        y: 2,
        button: MouseButton::Middle,
    });

    assert_eq!(recorder.action_count(), 1);
}

/// WHAT: Stop succeeds when the platform unhook fails, and a stuck hook
///       cannot append afterwards
/// WHY: The captured log is intact either way; the recorder's own gate
///      drops late deliveries
#[test]
fn given_failing_unhook_when_stopping_then_stop_succeeds_and_late_events_dropped() {
    // Given: An active session whose driver refuses to unhook
    let fake = FakeDriver::new();
    let recorder = Recorder::new();
    assert!(recorder.start(fake.as_ref()).is_ok());
    fake.emit(HookEvent::KeyDown { key_code: 65 });
    fake.fail_hook_stop(true);

    // When: Stopping anyway
    let result = recorder.stop(fake.as_ref());

    // Then: Stop reports the count, and the still-installed sink drops events
    assert!(matches!(result, Ok(1)));
    assert!(!recorder.is_recording());
    fake.emit(HookEvent::KeyDown { key_code: 66 });
    assert_eq!(recorder.action_count(), 1);
}

/// WHAT: A failed hook activation leaves the recorder inactive and retryable
/// WHY: Reporting "recording" with no hook installed would capture nothing
#[test]
fn given_hook_start_failure_when_starting_then_inactive_and_retryable() {
    let fake = FakeDriver::new();
    let recorder = Recorder::new();
    fake.fail_hook_start(true);

    let result = recorder.start(fake.as_ref());
    assert!(matches!(result, Err(EngineError::Driver { .. })));
    assert!(!recorder.is_recording());

    // Recovery: the next start succeeds once the platform cooperates
    fake.fail_hook_start(false);
    assert!(recorder.start(fake.as_ref()).is_ok());
    assert!(recorder.is_recording());
}

/// WHAT: Capture timestamps never decrease
/// WHY: Playback derives delays from consecutive differences
#[test]
fn given_spaced_events_when_recorded_then_timestamps_non_decreasing() {
    let fake = FakeDriver::new();
    let recorder = Recorder::new();
    assert!(recorder.start(fake.as_ref()).is_ok());

    for code in [65, 66, 67] {
        fake.emit(HookEvent::KeyDown { key_code: code });
        std::thread::sleep(Duration::from_millis(2));
    }
    assert!(matches!(recorder.stop(fake.as_ref()), Ok(3)));

    let actions = recorder.snapshot();
    for pair in actions.windows(2) {
        assert!(pair[0].timestamp_ms() <= pair[1].timestamp_ms());
    }
}
