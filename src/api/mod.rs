//! HTTP API for moodtunes
//!
//! Route handlers, SSE streaming, and embedded UI serving. All state
//! mutation goes through the [`SessionManager`](crate::session::SessionManager)
//! held in [`AppContext`].

pub mod handlers;
pub mod server;
pub mod sse;
pub mod ui;

pub use server::{build_router, run, AppContext};
