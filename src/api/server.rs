//! HTTP server setup and routing
//!
//! Sets up the Axum HTTP server with routes for session control, playback
//! control, SSE, and the embedded UI. The server binds to loopback only;
//! the page it serves is the sole intended client.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::session::SessionManager;

/// Shared application context passed to all handlers
///
/// AppContext implements Clone, which gives us `FromRef<AppContext>` for
/// free via Axum's blanket implementation.
#[derive(Clone)]
pub struct AppContext {
    pub manager: Arc<SessionManager>,
}

/// Build the application router
pub fn build_router(ctx: AppContext) -> Router {
    Router::new()
        // Embedded UI
        .route("/", get(super::ui::serve_index))
        .route("/app.js", get(super::ui::serve_app_js))
        // Health and build identification
        .route("/health", get(super::handlers::health))
        .route("/build_info", get(super::handlers::get_build_info))
        // Selection catalog (languages and moods)
        .route("/catalog", get(super::handlers::get_catalog))
        // Session state and control
        .route("/session", get(super::handlers::get_session))
        .route("/session/language", post(super::handlers::set_language))
        .route("/session/mode", post(super::handlers::set_mode))
        .route("/session/mood", post(super::handlers::set_manual_mood))
        .route("/session/detect", post(super::handlers::detect_mood))
        .route("/session/camera", post(super::handlers::camera_status))
        .route("/session/playlist", post(super::handlers::request_playlist))
        // Playback control
        .route("/playback/next", post(super::handlers::next))
        .route("/playback/previous", post(super::handlers::previous))
        .route("/playback/select", post(super::handlers::select_index))
        .route("/playback/ended", post(super::handlers::item_ended))
        .route("/playback/update", post(super::handlers::update_playlist))
        .route("/playback/reset", post(super::handlers::reset))
        // SSE event stream
        .route("/events", get(super::sse::event_stream))
        // Attach application context
        .with_state(ctx)
        // CORS for local access
        .layer(CorsLayer::permissive())
}

/// Run the HTTP API server until the shutdown future resolves.
pub async fn run<F>(config: &Config, manager: Arc<SessionManager>, shutdown: F) -> Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    let ctx = AppContext { manager };
    let app = build_router(ctx);

    // Loopback only: the embedded page is the only client
    let addr = SocketAddr::from(([127, 0, 0, 1], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| Error::Http(format!("failed to bind to {}: {}", addr, e)))?;

    info!("listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| Error::Http(format!("server error: {}", e)))?;

    Ok(())
}
