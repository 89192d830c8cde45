//! In-process stand-in for the remote gateway
//!
//! Serves the same two POST endpoints the deployed gateway exposes, with
//! the response body JSON-encoded into a string the way the gateway wraps
//! it. Responses are reconfigurable per test and every hit is counted, so
//! tests can prove that a rejected request never reached the wire.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde_json::{json, Value};

/// What a mock endpoint should send back
#[derive(Clone)]
pub enum MockResponse {
    /// 200 with the body JSON-encoded into a string, as the gateway does
    Body(Value),
    /// 200 with the body object inlined (the gateway's alternate shape)
    InlineBody(Value),
    /// A bare HTTP status with no usable body
    Status(u16),
}

struct MockState {
    detect: Mutex<MockResponse>,
    playlist: Mutex<MockResponse>,
    detect_hits: AtomicUsize,
    playlist_hits: AtomicUsize,
}

/// Handle to a running mock gateway
pub struct MockBackend {
    pub detect_url: String,
    pub playlist_url: String,
    state: Arc<MockState>,
}

impl MockBackend {
    /// Start the mock on an ephemeral loopback port.
    ///
    /// Defaults: detection returns HAPPY and the playlist endpoint returns
    /// the three items from [`MockBackend::default_items`].
    pub async fn start() -> Self {
        let state = Arc::new(MockState {
            detect: Mutex::new(MockResponse::Body(json!({ "emotion": "HAPPY" }))),
            playlist: Mutex::new(MockResponse::Body(json!({
                "playlist": Self::default_items()
            }))),
            detect_hits: AtomicUsize::new(0),
            playlist_hits: AtomicUsize::new(0),
        });

        let router = Router::new()
            .route("/detect-emotion", post(detect))
            .route("/get-playlist", post(playlist))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock backend");
        let addr = listener.local_addr().expect("Mock backend has no address");

        tokio::spawn(async move {
            axum::serve(listener, router)
                .await
                .expect("Mock backend stopped unexpectedly");
        });

        MockBackend {
            detect_url: format!("http://{}/detect-emotion", addr),
            playlist_url: format!("http://{}/get-playlist", addr),
            state,
        }
    }

    /// The items the playlist endpoint serves unless reconfigured
    pub fn default_items() -> Value {
        json!([
            { "id": "vid-aaa", "title": "First Song", "thumbnail": "http://img.example/aaa.jpg" },
            { "id": "vid-bbb", "title": "Second Song", "thumbnail": "http://img.example/bbb.jpg" },
            { "id": "vid-ccc", "title": "Third Song", "thumbnail": "http://img.example/ccc.jpg" },
        ])
    }

    pub fn set_detect(&self, response: MockResponse) {
        *self.state.detect.lock().unwrap() = response;
    }

    pub fn set_playlist(&self, response: MockResponse) {
        *self.state.playlist.lock().unwrap() = response;
    }

    pub fn detect_hits(&self) -> usize {
        self.state.detect_hits.load(Ordering::SeqCst)
    }

    pub fn playlist_hits(&self) -> usize {
        self.state.playlist_hits.load(Ordering::SeqCst)
    }
}

async fn detect(State(state): State<Arc<MockState>>) -> Response {
    state.detect_hits.fetch_add(1, Ordering::SeqCst);
    let response = state.detect.lock().unwrap().clone();
    render(response)
}

async fn playlist(State(state): State<Arc<MockState>>) -> Response {
    state.playlist_hits.fetch_add(1, Ordering::SeqCst);
    let response = state.playlist.lock().unwrap().clone();
    render(response)
}

fn render(response: MockResponse) -> Response {
    match response {
        MockResponse::Body(inner) => Json(json!({ "body": inner.to_string() })).into_response(),
        MockResponse::InlineBody(inner) => Json(json!({ "body": inner })).into_response(),
        MockResponse::Status(code) => StatusCode::from_u16(code)
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            .into_response(),
    }
}
