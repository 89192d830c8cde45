//! Server-Sent Events (SSE) broadcaster
//!
//! Streams session events to connected pages. Each connection first
//! receives a `SessionChanged` snapshot of the current state, then relays
//! the live event bus.

use std::convert::Infallible;
use std::time::Duration;

use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
};
use futures::stream::Stream;
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, warn};

use crate::api::server::AppContext;
use crate::events::SessionEvent;

/// GET /events - SSE event stream
pub async fn event_stream(
    State(ctx): State<AppContext>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    debug!("New SSE client connected");

    // Subscribe before snapshotting so no transition lands in the gap
    let mut rx = ctx.manager.subscribe();
    let initial = SessionEvent::SessionChanged {
        session: ctx.manager.snapshot().await,
        timestamp: chrono::Utc::now(),
    };

    let stream = async_stream::stream! {
        // A fresh page starts from the current state
        if let Some(event) = encode(&initial) {
            yield Ok(event);
        }

        loop {
            match rx.recv().await {
                Ok(event) => {
                    if let Some(event) = encode(&event) {
                        yield Ok(event);
                    }
                }
                Err(RecvError::Lagged(missed)) => {
                    // Keep relaying; the next SessionChanged carries the
                    // full state and resyncs the page
                    warn!("SSE subscriber lagged, skipped {} events", missed);
                }
                Err(RecvError::Closed) => break,
            }
        }
    };

    Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("keep-alive"),
    )
}

/// Serialize an event into an SSE frame named after its variant
fn encode(event: &SessionEvent) -> Option<Event> {
    match serde_json::to_string(event) {
        Ok(json) => {
            debug!("Broadcasting SSE event: {}", event.event_type());
            Some(Event::default().event(event.event_type()).data(json))
        }
        Err(e) => {
            warn!("Failed to serialize event: {}", e);
            None
        }
    }
}
