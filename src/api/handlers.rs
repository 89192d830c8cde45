//! HTTP request handlers
//!
//! Every mutating endpoint delegates to the [`SessionManager`] and returns
//! the resulting session snapshot. The page itself renders from the SSE
//! stream; the response bodies serve direct API callers and tests.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::api::server::AppContext;
use crate::catalog;
use crate::error::Result;
use crate::session::{Mode, SessionView};

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: String,
    service: String,
    version: String,
}

#[derive(Debug, Serialize)]
pub struct BuildInfo {
    version: String,
    git_hash: String,
    build_timestamp: String,
    build_profile: String,
}

#[derive(Debug, Serialize)]
pub struct CatalogResponse {
    languages: &'static [&'static str],
    moods: &'static [&'static str],
}

#[derive(Debug, Deserialize)]
pub struct SetLanguageRequest {
    language: String,
}

#[derive(Debug, Deserialize)]
pub struct SetModeRequest {
    mode: Mode,
}

#[derive(Debug, Deserialize)]
pub struct SetMoodRequest {
    mood: String,
}

#[derive(Debug, Deserialize)]
pub struct DetectRequest {
    image_base64: String,
}

#[derive(Debug, Deserialize)]
pub struct CameraStatusRequest {
    active: bool,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SelectRequest {
    index: usize,
}

#[derive(Debug, Deserialize)]
pub struct EndedRequest {
    generation: Uuid,
}

// ============================================================================
// Service Endpoints
// ============================================================================

/// GET /health - Health check endpoint
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        service: "moodtunes".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// GET /build_info - Build identification
///
/// Values are captured at compile time by build.rs.
pub async fn get_build_info() -> Json<BuildInfo> {
    Json(BuildInfo {
        version: env!("CARGO_PKG_VERSION").to_string(),
        git_hash: env!("GIT_HASH").to_string(),
        build_timestamp: env!("BUILD_TIMESTAMP").to_string(),
        build_profile: env!("BUILD_PROFILE").to_string(),
    })
}

/// GET /catalog - Selectable languages and moods
pub async fn get_catalog() -> Json<CatalogResponse> {
    Json(CatalogResponse {
        languages: catalog::LANGUAGES,
        moods: catalog::MOODS,
    })
}

// ============================================================================
// Session Endpoints
// ============================================================================

/// GET /session - Current session snapshot
pub async fn get_session(State(ctx): State<AppContext>) -> Json<SessionView> {
    Json(ctx.manager.snapshot().await)
}

/// POST /session/language - Change the playlist language
pub async fn set_language(
    State(ctx): State<AppContext>,
    Json(request): Json<SetLanguageRequest>,
) -> Result<Json<SessionView>> {
    Ok(Json(ctx.manager.set_language(&request.language).await?))
}

/// POST /session/mode - Switch between webcam and manual mood selection
pub async fn set_mode(
    State(ctx): State<AppContext>,
    Json(request): Json<SetModeRequest>,
) -> Result<Json<SessionView>> {
    Ok(Json(ctx.manager.set_mode(request.mode).await?))
}

/// POST /session/mood - Select a mood by hand (manual mode only)
pub async fn set_manual_mood(
    State(ctx): State<AppContext>,
    Json(request): Json<SetMoodRequest>,
) -> Result<Json<SessionView>> {
    Ok(Json(ctx.manager.set_manual_mood(&request.mood).await?))
}

/// POST /session/detect - Detect mood from a captured webcam frame
pub async fn detect_mood(
    State(ctx): State<AppContext>,
    Json(request): Json<DetectRequest>,
) -> Result<Json<SessionView>> {
    debug!(payload_bytes = request.image_base64.len(), "Detect request received");
    Ok(Json(ctx.manager.detect_mood(&request.image_base64).await?))
}

/// POST /session/camera - Page reports webcam acquisition result
pub async fn camera_status(
    State(ctx): State<AppContext>,
    Json(request): Json<CameraStatusRequest>,
) -> Result<Json<SessionView>> {
    Ok(Json(
        ctx.manager
            .camera_status(request.active, request.message)
            .await?,
    ))
}

/// POST /session/playlist - Fetch a playlist for the current mood/language
pub async fn request_playlist(State(ctx): State<AppContext>) -> Result<Json<SessionView>> {
    Ok(Json(ctx.manager.request_playlist().await?))
}

// ============================================================================
// Playback Endpoints
// ============================================================================

/// POST /playback/next - Advance to the next playlist item
pub async fn next(State(ctx): State<AppContext>) -> Result<Json<SessionView>> {
    Ok(Json(ctx.manager.next().await?))
}

/// POST /playback/previous - Step back to the previous playlist item
pub async fn previous(State(ctx): State<AppContext>) -> Result<Json<SessionView>> {
    Ok(Json(ctx.manager.previous().await?))
}

/// POST /playback/select - Jump to a playlist item by index
pub async fn select_index(
    State(ctx): State<AppContext>,
    Json(request): Json<SelectRequest>,
) -> Result<Json<SessionView>> {
    Ok(Json(ctx.manager.select_index(request.index).await?))
}

/// POST /playback/ended - Page reports the embedded player finished an item
pub async fn item_ended(
    State(ctx): State<AppContext>,
    Json(request): Json<EndedRequest>,
) -> Result<Json<SessionView>> {
    Ok(Json(ctx.manager.item_ended(request.generation).await?))
}

/// POST /playback/update - Fetch a fresh playlist without leaving playback
pub async fn update_playlist(State(ctx): State<AppContext>) -> Result<Json<SessionView>> {
    Ok(Json(ctx.manager.update_playlist().await?))
}

/// POST /playback/reset - Return to the selection screen
pub async fn reset(State(ctx): State<AppContext>) -> Result<Json<SessionView>> {
    Ok(Json(ctx.manager.reset().await?))
}
