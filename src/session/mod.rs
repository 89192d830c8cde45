//! Session management
//!
//! [`SessionManager`] owns the canonical [`Session`] value, the remote
//! clients, and the live player handle. Every operation has the same
//! shape: clone the current session, apply a pure transition, store the
//! result, then reconcile side channels (player handle, camera directive)
//! and broadcast events. A failed transition leaves the stored session
//! untouched; the error is returned to the caller and broadcast as a
//! `SessionError` so every connected page can surface it.

pub mod model;
pub mod playlist;

use tokio::sync::{broadcast, RwLock};
use uuid::Uuid;

use crate::catalog::Language;
use crate::error::{Error, Result};
use crate::events::{EventBus, SessionEvent};
use crate::player::{reconcile, PlayerChange, PlayerHandle};
use crate::remote::{DetectionClient, PlaylistClient};

pub use model::{Mode, Session, SessionView};
pub use playlist::{Playlist, PlaylistItem};

/// Event channel capacity; ample for a handful of connected pages
const EVENT_CAPACITY: usize = 256;

/// Owner of the session state machine.
///
/// Lock order is session before player; nothing acquires them the other
/// way around.
pub struct SessionManager {
    session: RwLock<Session>,
    player: RwLock<Option<PlayerHandle>>,
    events: EventBus,
    detection: DetectionClient,
    playlists: PlaylistClient,
}

impl SessionManager {
    pub fn new(detection: DetectionClient, playlists: PlaylistClient) -> Self {
        Self {
            session: RwLock::new(Session::new()),
            player: RwLock::new(None),
            events: EventBus::new(EVENT_CAPACITY),
            detection,
            playlists,
        }
    }

    /// Current state snapshot
    pub async fn snapshot(&self) -> SessionView {
        self.session.read().await.view()
    }

    /// Subscribe to the event stream (SSE relay, tests)
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    /// Change the language selection.
    pub async fn set_language(&self, label: &str) -> Result<SessionView> {
        self.apply(move |s| Ok(s.with_language(Language::parse(label)?)))
            .await
    }

    /// Switch between webcam and manual mood acquisition.
    ///
    /// The camera directive emitted by the transition tells the page to
    /// open or close its stream.
    pub async fn set_mode(&self, mode: Mode) -> Result<SessionView> {
        self.apply(move |s| Ok(s.with_mode(mode))).await
    }

    /// Set the mood from the manual selector.
    pub async fn set_manual_mood(&self, label: &str) -> Result<SessionView> {
        self.apply(move |s| s.with_manual_mood(label)).await
    }

    /// Record the camera status reported by the page.
    ///
    /// A failed acquisition (permission denied, no device) arrives as
    /// `active: false` with a message and is surfaced to every page.
    pub async fn camera_status(&self, active: bool, message: Option<String>) -> Result<SessionView> {
        let view = self.apply(move |s| Ok(s.with_camera(active))).await?;
        if !active {
            if let Some(message) = message {
                self.broadcast_error(Error::ResourceUnavailable(message));
            }
        }
        Ok(view)
    }

    /// Run a captured frame through the detection service and store the
    /// resulting mood.
    ///
    /// Valid only in webcam mode with an active stream. On failure the
    /// mood is left exactly as it was.
    pub async fn detect_mood(&self, image_base64: &str) -> Result<SessionView> {
        {
            let session = self.session.read().await;
            if session.mode != Mode::Webcam {
                return Err(self.broadcast_error(Error::InvalidState(
                    "capture requires webcam mode".to_string(),
                )));
            }
            if !session.camera_active {
                return Err(self.broadcast_error(Error::ResourceUnavailable(
                    "no active camera stream".to_string(),
                )));
            }
        }

        let image = strip_data_url_prefix(image_base64);
        if image.is_empty() {
            return Err(self.broadcast_error(Error::Validation("empty image payload".to_string())));
        }

        self.set_loading(true).await;
        match self.detection.detect(image).await {
            Ok(label) => {
                self.apply(move |s| Ok(s.with_mood(label).with_loading(false)))
                    .await
            }
            Err(err) => {
                self.set_loading(false).await;
                Err(self.broadcast_error(err))
            }
        }
    }

    /// Fetch a playlist for the current mood/language and enter playback.
    ///
    /// Preconditions are checked before any network call goes out; an
    /// unset mood never reaches the wire. On any failure (including an
    /// empty result) the prior phase and playlist are unchanged.
    pub async fn request_playlist(&self) -> Result<SessionView> {
        let (mood, language) = {
            let session = self.session.read().await;
            match session.fetch_params() {
                Ok(params) => params,
                Err(err) => return Err(self.broadcast_error(err)),
            }
        };

        self.set_loading(true).await;
        let fetched = self
            .playlists
            .fetch(&mood, &language)
            .await
            .and_then(Playlist::new);

        match fetched {
            Ok(playlist) => {
                self.apply(move |s| Ok(s.begin_playback(playlist).with_loading(false)))
                    .await
            }
            Err(err) => {
                self.set_loading(false).await;
                Err(self.broadcast_error(err))
            }
        }
    }

    /// Re-fetch the playlist without leaving playback.
    pub async fn update_playlist(&self) -> Result<SessionView> {
        {
            let session = self.session.read().await;
            if session.playlist().is_none() {
                return Err(self.broadcast_error(Error::InvalidState(
                    "no active playlist to update".to_string(),
                )));
            }
        }
        self.request_playlist().await
    }

    /// Advance to the next item (circular).
    pub async fn next(&self) -> Result<SessionView> {
        self.apply(|s| s.next_item()).await
    }

    /// Step back to the previous item (circular).
    pub async fn previous(&self) -> Result<SessionView> {
        self.apply(|s| s.previous_item()).await
    }

    /// Jump directly to an item by index.
    pub async fn select_index(&self, index: usize) -> Result<SessionView> {
        self.apply(move |s| s.select_index(index)).await
    }

    /// Handle an ended-notification from the embedded player.
    ///
    /// Notifications carry the generation of the instance that emitted
    /// them; one from a superseded player is obsolete and ignored.
    pub async fn item_ended(&self, generation: Uuid) -> Result<SessionView> {
        let current = {
            let player = self.player.read().await;
            player.as_ref().map(|h| h.generation() == generation)
        };
        match current {
            Some(true) => {
                tracing::info!("Current item ended, advancing");
                self.next().await
            }
            _ => {
                tracing::debug!(
                    generation = %generation,
                    "Ignoring ended notification from superseded player"
                );
                Ok(self.snapshot().await)
            }
        }
    }

    /// Discard the playlist and return to the selection screen.
    pub async fn reset(&self) -> Result<SessionView> {
        self.apply(|s| Ok(s.reset())).await
    }

    /// Apply a pure transition to the canonical session.
    ///
    /// On success the result is stored and broadcast, then the player
    /// handle and camera directive are reconciled against the new state.
    /// On failure nothing is stored and the error is broadcast.
    async fn apply<F>(&self, transition: F) -> Result<SessionView>
    where
        F: FnOnce(Session) -> Result<Session>,
    {
        let mut session = self.session.write().await;
        let before = session.clone();
        let next = match transition(before.clone()) {
            Ok(next) => next,
            Err(err) => {
                drop(session);
                return Err(self.broadcast_error(err));
            }
        };
        *session = next.clone();

        self.events.emit_lossy(SessionEvent::SessionChanged {
            session: next.view(),
            timestamp: chrono::Utc::now(),
        });

        self.reconcile_player(&next).await;

        if before.wants_camera() != next.wants_camera() {
            self.events.emit_lossy(SessionEvent::CameraDirective {
                acquire: next.wants_camera(),
                timestamp: chrono::Utc::now(),
            });
        }

        Ok(next.view())
    }

    /// Replace or drop the player handle when the active item changed.
    async fn reconcile_player(&self, session: &Session) {
        let active_item = session.current_item().map(|item| item.id.clone());
        let mut player = self.player.write().await;
        match reconcile(player.as_ref(), active_item.as_deref()) {
            Some(PlayerChange::Load(handle)) => {
                tracing::info!(item_id = %handle.item_id(), "Loading player instance");
                self.events.emit_lossy(SessionEvent::PlayerLoad {
                    item_id: handle.item_id().to_string(),
                    generation: handle.generation(),
                    autoplay: true,
                    timestamp: chrono::Utc::now(),
                });
                *player = Some(handle);
            }
            Some(PlayerChange::Unload) => {
                tracing::info!("Unloading player instance");
                self.events.emit_lossy(SessionEvent::PlayerUnload {
                    timestamp: chrono::Utc::now(),
                });
                *player = None;
            }
            None => {}
        }
    }

    async fn set_loading(&self, loading: bool) {
        // Infallible transition; the returned view is not needed here
        let _ = self.apply(move |s| Ok(s.with_loading(loading))).await;
    }

    /// Log and fan out a recoverable failure, returning it for `?`-style
    /// call sites.
    fn broadcast_error(&self, err: Error) -> Error {
        tracing::error!(code = err.code(), "{}", err);
        self.events.emit_lossy(SessionEvent::SessionError {
            kind: err.code().to_string(),
            message: err.to_string(),
            timestamp: chrono::Utc::now(),
        });
        err
    }
}

/// Drop a `data:image/...;base64,` prefix if the page sent one.
fn strip_data_url_prefix(payload: &str) -> &str {
    match payload.split_once("base64,") {
        Some((_, rest)) => rest,
        None => payload,
    }
}
