//! Test helper modules for MoodTunes integration tests
//!
//! Provides reusable test infrastructure components:
//! - MockBackend: In-process stand-in for the remote detection/playlist
//!   gateway, with configurable responses and hit counters
//! - TestServer: Fully wired service instance driven through its router
//! - EventStream: Event subscription with timeout helpers

pub mod mock_backend;
pub mod test_server;

pub use mock_backend::{MockBackend, MockResponse};
pub use test_server::{EventStream, TestServer};
