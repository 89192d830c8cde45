//! Event types for the moodtunes event system
//!
//! Every applied session transition and every page-directed side effect is
//! broadcast as a [`SessionEvent`] via the [`EventBus`], then relayed to
//! connected pages over SSE.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::session::model::SessionView;

/// Session event types
///
/// Events are broadcast via EventBus and can be serialized for SSE
/// transmission. All state reaches pages through these events; the page
/// never polls.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SessionEvent {
    /// Session state after an applied transition
    ///
    /// Triggers:
    /// - SSE: Re-render the page from the snapshot
    ///
    /// Also sent once on SSE connection so a fresh page starts from the
    /// current state.
    SessionChanged {
        /// Full session snapshot
        session: SessionView,
        /// When the transition was applied
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// Replace the embedded player with a new instance
    ///
    /// Emitted only when the active item's id changes; cursor moves that
    /// stay on the same item emit nothing.
    ///
    /// Triggers:
    /// - Page: destroy the old player, create one for `item_id`
    PlayerLoad {
        /// External video identifier to load
        item_id: String,
        /// Instance token; ended-notifications must echo it
        generation: Uuid,
        /// Start playback immediately
        autoplay: bool,
        /// When the instance was created
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// Tear down the embedded player with nothing replacing it
    ///
    /// Triggers:
    /// - Page: destroy the player (reset path)
    PlayerUnload {
        /// When teardown was decided
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// The page should open or close its camera stream
    ///
    /// Sent whenever the desired camera state flips: acquire on entering
    /// webcam-mode selection, release on leaving it.
    CameraDirective {
        /// true = open the stream, false = stop all tracks
        acquire: bool,
        /// When the desired state changed
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// A recoverable failure to surface as a blocking notification
    ///
    /// Triggers:
    /// - Page: alert the user; prior state is unchanged
    SessionError {
        /// Stable error code (matches the HTTP error body codes)
        kind: String,
        /// Human-readable detail
        message: String,
        /// When the failure occurred
        timestamp: chrono::DateTime<chrono::Utc>,
    },
}

impl SessionEvent {
    /// Get event type as string for SSE event naming and filtering
    pub fn event_type(&self) -> &str {
        match self {
            SessionEvent::SessionChanged { .. } => "SessionChanged",
            SessionEvent::PlayerLoad { .. } => "PlayerLoad",
            SessionEvent::PlayerUnload { .. } => "PlayerUnload",
            SessionEvent::CameraDirective { .. } => "CameraDirective",
            SessionEvent::SessionError { .. } => "SessionError",
        }
    }
}

/// Central event distribution bus
///
/// Wraps tokio::broadcast, providing:
/// - Non-blocking publish (slow subscribers don't block producers)
/// - Multiple concurrent subscribers
/// - Automatic cleanup when subscribers drop
#[derive(Clone)]
pub struct EventBus {
    tx: broadcast::Sender<SessionEvent>,
    capacity: usize,
}

impl EventBus {
    /// Creates a new EventBus with the specified channel capacity
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx, capacity }
    }

    /// Subscribe to all future events
    ///
    /// Events emitted before subscription are not received.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.tx.subscribe()
    }

    /// Emit an event, ignoring whether anyone is listening
    ///
    /// A session with no connected pages is still valid; events simply
    /// have no audience until a page connects and receives the initial
    /// snapshot.
    pub fn emit_lossy(&self, event: SessionEvent) {
        let _ = self.tx.send(event);
    }

    /// Current number of active subscribers
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }

    /// Configured channel capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
