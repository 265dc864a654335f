//! The HTTP control surface: one route per session operation.
//!
//! Precondition violations come back as HTTP 200 with `success: false` —
//! they are normal outcomes of the request/response protocol, not transport
//! errors. Only malformed requests get a 4xx from the extractor layer.

use crate::wire::{
    ApiResponse, PlayMacroRequest, StartClickerRequest, StartHotkeyRequest, StopHotkeyRequest,
};

use std::sync::Arc;

use auto_replay_core::{HotkeyMode, SessionController, SessionStatus};
use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};
use tokio::sync::watch;
use tower_http::cors::CorsLayer;
use tracing::{debug, info};

/// Shared state handed to every route handler.
#[derive(Clone)]
pub(crate) struct AppState {
    /// The session engine all operations dispatch to.
    pub(crate) session: Arc<SessionController>,
    /// Flipped by the shutdown endpoint to end the process gracefully.
    pub(crate) shutdown_tx: watch::Sender<bool>,
}

/// Build the control-surface router.
///
/// CORS is permissive so a browser-based shell can call the API directly.
pub(crate) fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/macro/record/start", post(start_recording))
        .route("/api/macro/record/stop", post(stop_recording))
        .route("/api/macro/play", post(play_macro))
        .route("/api/macro/stop", post(stop_macro))
        .route("/api/clicker/start", post(start_auto_clicker))
        .route("/api/clicker/stop", post(stop_auto_clicker))
        .route("/api/hotkey/start", post(start_auto_hotkey))
        .route("/api/hotkey/stop", post(stop_auto_hotkey))
        .route("/api/status", get(status))
        .route("/api/shutdown", post(shutdown))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn start_recording(State(state): State<AppState>) -> Json<ApiResponse> {
    match state.session.start_recording().await {
        Ok(()) => Json(ApiResponse::ok("Macro recording started")),
        Err(e) => Json(ApiResponse::failure(&e)),
    }
}

async fn stop_recording(State(state): State<AppState>) -> Json<ApiResponse> {
    match state.session.stop_recording().await {
        Ok(count) => Json(ApiResponse::ok_with_count(
            format!("Macro recording stopped. Recorded {} actions", count),
            count,
        )),
        Err(e) => Json(ApiResponse::failure(&e)),
    }
}

async fn play_macro(
    State(state): State<AppState>,
    body: Option<Json<PlayMacroRequest>>,
) -> Json<ApiResponse> {
    let request = body.map(|Json(r)| r).unwrap_or_default();
    match state
        .session
        .play_macro(request.speed, request.repeat())
        .await
    {
        Ok(()) => Json(ApiResponse::ok("Macro playback started")),
        Err(e) => Json(ApiResponse::failure(&e)),
    }
}

async fn stop_macro(State(state): State<AppState>) -> Json<ApiResponse> {
    state.session.stop_macro().await;
    Json(ApiResponse::ok("Macro playback stopped"))
}

async fn start_auto_clicker(
    State(state): State<AppState>,
    body: Option<Json<StartClickerRequest>>,
) -> Json<ApiResponse> {
    let request = body.map(|Json(r)| r).unwrap_or_default();
    match state
        .session
        .start_auto_clicker(request.cps, request.button)
        .await
    {
        Ok(()) => Json(ApiResponse::ok(format!(
            "Auto clicker started at {} CPS",
            request.cps
        ))),
        Err(e) => Json(ApiResponse::failure(&e)),
    }
}

async fn stop_auto_clicker(State(state): State<AppState>) -> Json<ApiResponse> {
    match state.session.stop_auto_clicker().await {
        Ok(()) => Json(ApiResponse::ok("Auto clicker stopped")),
        Err(e) => Json(ApiResponse::failure(&e)),
    }
}

async fn start_auto_hotkey(
    State(state): State<AppState>,
    body: Option<Json<StartHotkeyRequest>>,
) -> Json<ApiResponse> {
    let request = body.map(|Json(r)| r).unwrap_or_default();
    match state
        .session
        .start_auto_hotkey(&request.key, request.mode, request.cps)
        .await
    {
        Ok(()) => Json(ApiResponse::ok(match request.mode {
            HotkeyMode::Hold => format!("Holding down key: {}", request.key),
            HotkeyMode::Continuous => format!(
                "Auto hotkey started: {} at {} per second",
                request.key, request.cps
            ),
        })),
        Err(e) => Json(ApiResponse::failure(&e)),
    }
}

async fn stop_auto_hotkey(
    State(state): State<AppState>,
    body: Option<Json<StopHotkeyRequest>>,
) -> Json<ApiResponse> {
    if let Some(Json(request)) = body
        && (request.key.is_some() || request.mode.is_some())
    {
        // The engine undoes what it actually started, whatever the caller
        // believes is running.
        debug!(
            key = ?request.key,
            mode = ?request.mode,
            "Ignoring caller-supplied hotkey stop arguments"
        );
    }
    match state.session.stop_auto_hotkey().await {
        Ok(()) => Json(ApiResponse::ok("Auto hotkey stopped")),
        Err(e) => Json(ApiResponse::failure(&e)),
    }
}

async fn status(State(state): State<AppState>) -> Json<SessionStatus> {
    Json(state.session.status().await)
}

async fn shutdown(State(state): State<AppState>) -> Json<ApiResponse> {
    info!("Shutdown requested over the control surface");
    // Err means every receiver is gone, so shutdown is already under way.
    let _ = state.shutdown_tx.send(true);
    Json(ApiResponse::ok("Shutting down"))
}
