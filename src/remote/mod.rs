//! Clients for the two remote endpoints
//!
//! Both calls are single-attempt POSTs through an API gateway whose
//! responses need a second decode (see [`envelope`]). No retry or backoff;
//! a failed call surfaces to the user and waits for an explicit re-trigger.

pub mod detection;
pub mod envelope;
pub mod playlist;

pub use detection::DetectionClient;
pub use playlist::PlaylistClient;

/// User agent sent on every remote call
pub const USER_AGENT: &str = concat!("moodtunes/", env!("CARGO_PKG_VERSION"));

/// Client-level timeout, bounding how long the UI's loading flag can stay
/// set on a hung call
pub const REQUEST_TIMEOUT_SECS: u64 = 30;
