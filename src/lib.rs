//! # MoodTunes (moodtunes)
//!
//! Emotion-driven music player service.
//!
//! **Purpose:** Own the mood/language/playback session, call the remote
//! emotion-detection and playlist services, and drive a browser page over
//! HTTP/SSE. The page keeps only what a server cannot hold: the webcam
//! stream and the embedded YouTube player.
//!
//! **Architecture:** Single-session state machine behind an Axum HTTP
//! server, with all transitions applied atomically and broadcast as events.

pub mod api;
pub mod catalog;
pub mod config;
pub mod error;
pub mod events;
pub mod player;
pub mod remote;
pub mod session;

pub use error::{Error, Result};
pub use session::SessionManager;
