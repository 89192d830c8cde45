//! Test server wrapper for integration tests
//!
//! Drives a fully wired moodtunes instance through its router without
//! binding a listener, with the remote gateway replaced by a
//! [`MockBackend`].

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::http::StatusCode;
use axum::Router;
use serde_json::Value;
use tokio::sync::broadcast;

use moodtunes::api::{build_router, AppContext};
use moodtunes::events::SessionEvent;
use moodtunes::remote::{DetectionClient, PlaylistClient};
use moodtunes::session::SessionManager;

use super::mock_backend::MockBackend;

/// Test server instance with the full router and a mock gateway
pub struct TestServer {
    router: Router,
    manager: Arc<SessionManager>,
    pub backend: MockBackend,
}

impl TestServer {
    /// Start a test server backed by a fresh mock gateway
    pub async fn start() -> Self {
        let backend = MockBackend::start().await;

        let detection = DetectionClient::new(backend.detect_url.clone())
            .expect("Failed to build detection client");
        let playlists = PlaylistClient::new(backend.playlist_url.clone())
            .expect("Failed to build playlist client");
        let manager = Arc::new(SessionManager::new(detection, playlists));

        let router = build_router(AppContext {
            manager: Arc::clone(&manager),
        });

        TestServer {
            router,
            manager,
            backend,
        }
    }

    /// Subscribe to session events
    pub fn subscribe_events(&self) -> EventStream {
        EventStream {
            receiver: self.manager.subscribe(),
        }
    }

    /// Make an HTTP request to the test server
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
    ) -> (StatusCode, Option<Value>) {
        use axum::body::Body;
        use axum::http::{Method, Request};
        use tower::ServiceExt;

        let method = match method {
            "GET" => Method::GET,
            "POST" => Method::POST,
            _ => panic!("Unsupported method: {}", method),
        };

        let mut builder = Request::builder().method(method).uri(path);
        if body.is_some() {
            builder = builder.header("content-type", "application/json");
        }

        let request = if let Some(json_body) = body {
            builder.body(Body::from(json_body.to_string())).unwrap()
        } else {
            builder.body(Body::empty()).unwrap()
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json_body = if bytes.is_empty() {
            None
        } else {
            serde_json::from_slice(&bytes).ok()
        };

        (status, json_body)
    }

    /// GET returning the raw body and content-type (for the UI routes)
    pub async fn get_raw(&self, path: &str) -> (StatusCode, Option<String>, String) {
        use axum::body::Body;
        use axum::http::Request;
        use tower::ServiceExt;

        let request = Request::builder()
            .method("GET")
            .uri(path)
            .body(Body::empty())
            .unwrap();

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let content_type = response
            .headers()
            .get("content-type")
            .map(|v| v.to_str().unwrap().to_string());

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        (status, content_type, String::from_utf8(bytes.to_vec()).unwrap())
    }

    /// POST expecting success, returning the session snapshot body
    pub async fn post_ok(&self, path: &str, body: Option<Value>) -> Value {
        let (status, body) = self.request("POST", path, body).await;
        assert!(
            status.is_success(),
            "POST {} failed with {}: {:?}",
            path,
            status,
            body
        );
        body.expect("Expected session snapshot body")
    }

    /// Current session snapshot via GET /session
    pub async fn session(&self) -> Value {
        let (status, body) = self.request("GET", "/session", None).await;
        assert_eq!(status, StatusCode::OK);
        body.expect("Expected session body")
    }
}

/// Event stream wrapper with timeout helpers
pub struct EventStream {
    pub receiver: broadcast::Receiver<SessionEvent>,
}

impl EventStream {
    /// Wait for the next event with a timeout
    pub async fn next_timeout(&mut self, timeout: Duration) -> Option<SessionEvent> {
        tokio::time::timeout(timeout, self.receiver.recv())
            .await
            .ok()
            .and_then(|r| r.ok())
    }

    /// Wait for the next event of a specific type, discarding others
    pub async fn wait_for(&mut self, event_type: &str, timeout: Duration) -> Option<SessionEvent> {
        let deadline = Instant::now() + timeout;

        loop {
            if Instant::now() > deadline {
                return None;
            }

            let remaining = deadline.duration_since(Instant::now());
            if let Some(event) = self.next_timeout(remaining).await {
                if event.event_type() == event_type {
                    return Some(event);
                }
            } else {
                return None;
            }
        }
    }
}
