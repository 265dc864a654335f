use crate::{
    EngineError, HookEvent, HotkeyMode, MouseButton, Repeat, ReplayKey, SessionController,
    tests::fake_driver::{DriverCall, FakeDriver},
};

use std::{sync::Arc, time::Duration};

fn session_with_fake() -> (Arc<FakeDriver>, SessionController) {
    let fake = FakeDriver::new();
    let session = SessionController::new(fake.clone());
    (fake, session)
}

/// WHAT: A recording session reports the number of captured actions
/// WHY: The count is the caller's only confirmation the capture worked
#[tokio::test]
async fn given_recording_session_when_events_captured_then_count_reported() {
    let (fake, session) = session_with_fake();

    assert!(session.start_recording().await.is_ok());
    assert!(session.status().await.recording);

    fake.emit(HookEvent::KeyDown { key_code: 65 });
    fake.emit(HookEvent::MouseClick {
        x: 3,
        y: 4,
        button: MouseButton::Primary,
    });
    fake.emit(HookEvent::KeyDown { key_code: 66 });

    let count = session.stop_recording().await;
    assert!(matches!(count, Ok(3)));

    let status = session.status().await;
    assert!(!status.recording);
    assert_eq!(status.action_count, 3);
}

/// WHAT: Recording is rejected while playback runs
/// WHY: The hook would capture the session's own synthetic input back
///      into the log
#[tokio::test]
async fn given_playback_in_progress_when_recording_requested_then_rejected() {
    let (fake, session) = session_with_fake();

    // Given: A one-action log and an endless run over it
    assert!(session.start_recording().await.is_ok());
    fake.emit(HookEvent::KeyDown { key_code: 65 });
    assert!(matches!(session.stop_recording().await, Ok(1)));
    assert!(session.play_macro(1.0, Repeat::Forever).await.is_ok());
    assert!(session.status().await.playing);

    // When/Then: Recording is rejected while the run is live
    let result = session.start_recording().await;
    assert!(matches!(result, Err(EngineError::PlaybackInProgress { .. })));
    assert!(!session.status().await.recording);

    session.stop_macro().await;
}

/// WHAT: A recorded session replays through the driver in capture order
/// WHY: The controller wires recorder snapshots into playback
#[tokio::test]
async fn given_recorded_actions_when_played_then_dispatched_through_driver() {
    let (fake, session) = session_with_fake();

    assert!(session.start_recording().await.is_ok());
    fake.emit(HookEvent::MouseClick {
        x: 7,
        y: 8,
        button: MouseButton::Primary,
    });
    fake.emit(HookEvent::KeyDown { key_code: 72 });
    assert!(matches!(session.stop_recording().await, Ok(2)));

    assert!(session.play_macro(1.0, Repeat::Times(1)).await.is_ok());
    for _ in 0..100 {
        if !session.status().await.playing {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert!(!session.status().await.playing);

    assert_eq!(fake.calls(), vec![
        DriverCall::PointerMove { x: 7, y: 8 },
        DriverCall::Click {
            button: MouseButton::Primary
        },
        DriverCall::KeyTap {
            key: ReplayKey::Char('h')
        },
    ]);
}

/// WHAT: Playing with nothing recorded is rejected
/// WHY: The failure names the real problem instead of replaying nothing
#[tokio::test]
async fn given_empty_log_when_playing_through_controller_then_empty_log_error() {
    let (_fake, session) = session_with_fake();

    let result = session.play_macro(1.0, Repeat::Times(1)).await;
    assert!(matches!(result, Err(EngineError::EmptyLog { .. })));
    assert!(!session.status().await.playing);
}

/// WHAT: Stopping idle playback succeeds and changes nothing
/// WHY: Stop requests race natural completion; both orders must be fine
#[tokio::test]
async fn given_idle_session_when_stopping_playback_then_succeeds() {
    let (_fake, session) = session_with_fake();

    session.stop_macro().await;

    let status = session.status().await;
    assert!(!status.playing);
    assert!(!status.recording);
}

/// WHAT: Clicker and hotkey run and stop independently
/// WHY: The activities share a controller but not a lifecycle
#[tokio::test]
async fn given_independent_activities_when_both_running_then_status_tracks_each() {
    let (fake, session) = session_with_fake();

    assert!(
        session
            .start_auto_clicker(50.0, MouseButton::Primary)
            .await
            .is_ok()
    );
    assert!(
        session
            .start_auto_hotkey("f", HotkeyMode::Continuous, 50.0)
            .await
            .is_ok()
    );

    let status = session.status().await;
    assert!(status.clicker_running);
    assert!(status.hotkey_active);
    assert!(!status.playing);
    assert!(!status.recording);

    tokio::time::sleep(Duration::from_millis(120)).await;
    let calls = fake.calls();
    assert!(calls.iter().any(|c| matches!(c, DriverCall::Click { .. })));
    assert!(calls.iter().any(|c| matches!(c, DriverCall::KeyTap { .. })));

    // Stopping one leaves the other running
    assert!(session.stop_auto_clicker().await.is_ok());
    let status = session.status().await;
    assert!(!status.clicker_running);
    assert!(status.hotkey_active);
    assert!(session.stop_auto_hotkey().await.is_ok());
}

/// WHAT: Unknown key names fail hotkey start cleanly
/// WHY: Pressing a guessed key would be worse than refusing
#[tokio::test]
async fn given_unknown_key_name_when_starting_hotkey_then_invalid_key_error() {
    let (_fake, session) = session_with_fake();

    let result = session
        .start_auto_hotkey("volumeup", HotkeyMode::Hold, 10.0)
        .await;
    assert!(matches!(result, Err(EngineError::InvalidKey { .. })));
    assert!(!session.status().await.hotkey_active);
}

/// WHAT: shutdown_all stops everything and may be called repeatedly
/// WHY: Shutdown paths overlap (signal, request, exit); each must be safe
#[tokio::test]
async fn given_running_activities_when_shutdown_all_then_everything_stops_idempotently() {
    let (fake, session) = session_with_fake();

    // Given: Recording, clicker, and a held hotkey all active
    assert!(session.start_recording().await.is_ok());
    assert!(
        session
            .start_auto_clicker(20.0, MouseButton::Primary)
            .await
            .is_ok()
    );
    assert!(
        session
            .start_auto_hotkey("f", HotkeyMode::Hold, 10.0)
            .await
            .is_ok()
    );

    // When: Shutting everything down twice
    session.shutdown_all().await;
    session.shutdown_all().await;

    // Then: All flags inactive, hook down, held key released exactly once
    let status = session.status().await;
    assert!(!status.recording);
    assert!(!status.playing);
    assert!(!status.clicker_running);
    assert!(!status.hotkey_active);
    assert!(!fake.hook_active());

    let key_ups = fake
        .calls()
        .iter()
        .filter(|c| {
            matches!(c, DriverCall::KeyUp {
                key: ReplayKey::Char('f')
            })
        })
        .count();
    assert_eq!(key_ups, 1);
}
