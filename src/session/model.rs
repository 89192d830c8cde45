//! Session state and pure transitions.
//!
//! [`Session`] is an explicit value: every operation consumes a session and
//! returns the next one (or an error, leaving the caller's copy untouched).
//! The manager clones the canonical value, applies a transition, and stores
//! the result only on success, so observers never see a half-applied
//! update.
//!
//! The `Playing` phase carries the playlist, which cannot be constructed
//! empty. A playing session therefore always has a current item.

use serde::{Deserialize, Serialize};

use crate::catalog::{is_known_mood, Language};
use crate::error::{Error, Result};
use crate::session::playlist::{Playlist, PlaylistItem};

/// Mood acquisition mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Mood comes from a captured webcam frame via the detection service
    Webcam,
    /// Mood comes from the enumerated manual selector
    Manual,
}

/// Lifecycle phase. `Playing` owns the playlist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    /// Gathering mood and language; no playlist exists
    Selecting,
    /// A playlist is active and the cursor is valid
    Playing(Playlist),
}

/// Complete session state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Current mood label, if one has been chosen or detected
    pub mood: Option<String>,
    /// Current language selection
    pub language: Language,
    /// How mood is acquired
    pub mode: Mode,
    /// Where the session is in its lifecycle
    pub phase: Phase,
    /// A detection or playlist call is in flight; the UI disables the
    /// triggering controls while set
    pub loading: bool,
    /// The page has reported an active camera stream
    pub camera_active: bool,
}

impl Session {
    /// Fresh session: default language, webcam mode, no mood, selecting.
    pub fn new() -> Self {
        Session {
            mood: None,
            language: Language::default(),
            mode: Mode::Webcam,
            phase: Phase::Selecting,
            loading: false,
            camera_active: false,
        }
    }

    /// Change the language selection.
    pub fn with_language(mut self, language: Language) -> Session {
        self.language = language;
        self
    }

    /// Switch the mood acquisition mode.
    pub fn with_mode(mut self, mode: Mode) -> Session {
        self.mode = mode;
        self
    }

    /// Store a mood label verbatim (detection result).
    pub fn with_mood(mut self, label: String) -> Session {
        self.mood = Some(label);
        self
    }

    /// Set the mood from the manual selector.
    ///
    /// Manual input originates from our own enumerated widget, so an
    /// unknown label is a malformed request rather than a new mood.
    pub fn with_manual_mood(mut self, label: &str) -> Result<Session> {
        if self.mode != Mode::Manual {
            return Err(Error::InvalidState(
                "manual mood selection requires manual mode".to_string(),
            ));
        }
        if !is_known_mood(label) {
            return Err(Error::Validation(format!("unknown mood: {}", label)));
        }
        self.mood = Some(label.to_string());
        Ok(self)
    }

    /// Set or clear the in-flight flag.
    pub fn with_loading(mut self, loading: bool) -> Session {
        self.loading = loading;
        self
    }

    /// Record the camera status reported by the page.
    pub fn with_camera(mut self, active: bool) -> Session {
        self.camera_active = active;
        self
    }

    /// Mood and language for a playlist fetch.
    ///
    /// Checked before any network call is issued; an unset mood fails
    /// validation here and no request goes out.
    pub fn fetch_params(&self) -> Result<(String, String)> {
        let mood = self
            .mood
            .as_deref()
            .filter(|m| !m.is_empty())
            .ok_or_else(|| Error::Validation("mood is not set".to_string()))?;
        Ok((mood.to_string(), self.language.as_str().to_string()))
    }

    /// Enter (or re-enter) playback with a freshly fetched list.
    ///
    /// The cursor starts at the first item regardless of any prior
    /// position; [`Playlist::new`] already guarantees the list is
    /// non-empty.
    pub fn begin_playback(mut self, playlist: Playlist) -> Session {
        self.phase = Phase::Playing(playlist);
        self
    }

    /// Advance the cursor to the next item (circular).
    pub fn next_item(mut self) -> Result<Session> {
        match &mut self.phase {
            Phase::Playing(playlist) => {
                playlist.next();
                Ok(self)
            }
            Phase::Selecting => Err(Error::InvalidState("no active playlist".to_string())),
        }
    }

    /// Step the cursor back to the previous item (circular).
    pub fn previous_item(mut self) -> Result<Session> {
        match &mut self.phase {
            Phase::Playing(playlist) => {
                playlist.previous();
                Ok(self)
            }
            Phase::Selecting => Err(Error::InvalidState("no active playlist".to_string())),
        }
    }

    /// Jump the cursor directly to `index`.
    pub fn select_index(mut self, index: usize) -> Result<Session> {
        match &mut self.phase {
            Phase::Playing(playlist) => {
                playlist.select(index)?;
                Ok(self)
            }
            Phase::Selecting => Err(Error::InvalidState("no active playlist".to_string())),
        }
    }

    /// Discard the playlist and return to the selection screen.
    ///
    /// Mood, language and mode survive, so the selection screen comes back
    /// pre-filled.
    pub fn reset(mut self) -> Session {
        self.phase = Phase::Selecting;
        self
    }

    /// The active playlist, when playing.
    pub fn playlist(&self) -> Option<&Playlist> {
        match &self.phase {
            Phase::Playing(playlist) => Some(playlist),
            Phase::Selecting => None,
        }
    }

    /// The item that should currently be playing.
    pub fn current_item(&self) -> Option<&PlaylistItem> {
        self.playlist().map(|p| p.current())
    }

    /// Whether the page should hold an open camera stream right now.
    ///
    /// Acquired for webcam-mode selection, released everywhere else.
    pub fn wants_camera(&self) -> bool {
        self.mode == Mode::Webcam && matches!(self.phase, Phase::Selecting)
    }

    /// JSON-facing snapshot.
    pub fn view(&self) -> SessionView {
        let (phase, playlist, cursor) = match &self.phase {
            Phase::Selecting => ("selecting", Vec::new(), None),
            Phase::Playing(pl) => ("playing", pl.items().to_vec(), Some(pl.cursor())),
        };
        SessionView {
            mood: self.mood.clone(),
            language: self.language.as_str().to_string(),
            mode: self.mode,
            phase: phase.to_string(),
            loading: self.loading,
            camera_active: self.camera_active,
            playlist,
            cursor,
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// Serializable snapshot of a [`Session`], sent to pages in responses and
/// `SessionChanged` events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionView {
    pub mood: Option<String>,
    pub language: String,
    pub mode: Mode,
    /// "selecting" or "playing"
    pub phase: String,
    pub loading: bool,
    pub camera_active: bool,
    /// Empty while selecting
    pub playlist: Vec<PlaylistItem>,
    /// None while selecting
    pub cursor: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(n: usize) -> Vec<PlaylistItem> {
        (0..n)
            .map(|i| PlaylistItem {
                id: format!("vid{}", i),
                title: format!("Song {}", i),
                thumbnail: format!("https://img.example/{}.jpg", i),
            })
            .collect()
    }

    fn playing_session(n: usize) -> Session {
        Session::new()
            .with_mood("HAPPY".to_string())
            .begin_playback(Playlist::new(items(n)).unwrap())
    }

    #[test]
    fn new_session_defaults() {
        let s = Session::new();
        assert_eq!(s.mood, None);
        assert_eq!(s.language.as_str(), "English");
        assert_eq!(s.mode, Mode::Webcam);
        assert_eq!(s.phase, Phase::Selecting);
        assert!(!s.loading);
        assert!(!s.camera_active);
    }

    #[test]
    fn manual_mood_requires_manual_mode() {
        let s = Session::new();
        let err = s.with_manual_mood("HAPPY").unwrap_err();
        assert!(matches!(err, Error::InvalidState(_)));
    }

    #[test]
    fn manual_mood_rejects_unknown_label() {
        let s = Session::new().with_mode(Mode::Manual);
        let err = s.with_manual_mood("ECSTATIC").unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn manual_mood_accepts_catalog_label() {
        let s = Session::new()
            .with_mode(Mode::Manual)
            .with_manual_mood("Romantic")
            .unwrap();
        assert_eq!(s.mood.as_deref(), Some("Romantic"));
    }

    #[test]
    fn detected_mood_is_stored_verbatim() {
        // Detection labels are not clamped to the manual catalog
        let s = Session::new().with_mood("slightly bemused".to_string());
        assert_eq!(s.mood.as_deref(), Some("slightly bemused"));
    }

    #[test]
    fn fetch_params_reject_missing_mood() {
        let s = Session::new();
        let err = s.fetch_params().unwrap_err();
        assert!(matches!(err, Error::Validation(_)));

        let s = Session::new().with_mood(String::new());
        assert!(s.fetch_params().is_err());
    }

    #[test]
    fn fetch_params_carry_mood_and_language() {
        let s = Session::new()
            .with_mood("HAPPY".to_string())
            .with_language(Language::parse("Hindi").unwrap());
        let (mood, language) = s.fetch_params().unwrap();
        assert_eq!(mood, "HAPPY");
        assert_eq!(language, "Hindi");
    }

    #[test]
    fn begin_playback_resets_cursor() {
        let s = playing_session(5).select_index(3).unwrap();
        assert_eq!(s.playlist().unwrap().cursor(), 3);
        // A re-fetch lands on the first item again
        let s = s.begin_playback(Playlist::new(items(4)).unwrap());
        assert_eq!(s.playlist().unwrap().cursor(), 0);
        assert_eq!(s.playlist().unwrap().len(), 4);
    }

    #[test]
    fn three_item_scenario_wraps() {
        let s = playing_session(3);
        assert_eq!(s.playlist().unwrap().cursor(), 0);
        let s = s.next_item().unwrap();
        assert_eq!(s.playlist().unwrap().cursor(), 1);
        let s = s.next_item().unwrap();
        assert_eq!(s.playlist().unwrap().cursor(), 2);
        let s = s.next_item().unwrap();
        assert_eq!(s.playlist().unwrap().cursor(), 0);
    }

    #[test]
    fn navigation_requires_playing_phase() {
        assert!(Session::new().next_item().is_err());
        assert!(Session::new().previous_item().is_err());
        assert!(Session::new().select_index(0).is_err());
    }

    #[test]
    fn select_out_of_range_is_rejected() {
        let err = playing_session(3).select_index(7).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn reset_returns_to_selection_and_keeps_choices() {
        let s = playing_session(3)
            .with_language(Language::parse("Tamil").unwrap())
            .reset();
        assert_eq!(s.phase, Phase::Selecting);
        assert!(s.playlist().is_none());
        assert_eq!(s.mood.as_deref(), Some("HAPPY"));
        assert_eq!(s.language.as_str(), "Tamil");
    }

    #[test]
    fn reset_from_any_state_yields_selecting() {
        assert_eq!(Session::new().reset().phase, Phase::Selecting);
        assert_eq!(playing_session(1).reset().phase, Phase::Selecting);
        assert_eq!(
            playing_session(4).next_item().unwrap().reset().phase,
            Phase::Selecting
        );
    }

    #[test]
    fn camera_wanted_only_for_webcam_selection() {
        let s = Session::new();
        assert!(s.wants_camera());
        let s = s.with_mode(Mode::Manual);
        assert!(!s.wants_camera());
        let s = playing_session(2);
        assert!(!s.wants_camera());
    }

    #[test]
    fn current_item_follows_cursor() {
        let s = playing_session(3).next_item().unwrap();
        assert_eq!(s.current_item().unwrap().id, "vid1");
        assert_eq!(Session::new().current_item(), None);
    }

    #[test]
    fn view_reflects_phase() {
        let v = Session::new().view();
        assert_eq!(v.phase, "selecting");
        assert!(v.playlist.is_empty());
        assert_eq!(v.cursor, None);

        let v = playing_session(2).next_item().unwrap().view();
        assert_eq!(v.phase, "playing");
        assert_eq!(v.playlist.len(), 2);
        assert_eq!(v.cursor, Some(1));
    }
}
