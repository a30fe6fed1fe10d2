//! jotbin-server: Request routing and resource handlers for the Jotbin
//! note service.
//!
//! This crate provides:
//! - The canonical request/response envelopes
//! - The exact-match request router over `(method, path template)` pairs
//! - Notebook, note, and pastebin resource handlers
//! - HTTP transport glue (Axum) and the server binary
//!
//! # Architecture
//!
//! Transport event → envelope extraction → router match → handler → one or
//! more store-adapter calls → response envelope back up the chain. Each
//! invocation is stateless; the store is the only shared mutable resource.
//!
//! # Usage
//!
//! ```rust,ignore
//! use jotbin_server::{router, state::AppState};
//!
//! let outcome = router::dispatch(&state, event).await;
//! match outcome {
//!     None => { /* no registered (method, template) pair matched */ }
//!     Some(Ok(response)) => { /* handler response */ }
//!     Some(Err(e)) => { /* failed invocation, propagated unhandled */ }
//! }
//! ```

pub mod config;
pub mod envelope;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;
pub mod transport;

// Re-exports for convenience
pub use config::{ConfigError, ServerConfig};
pub use envelope::{RequestEvent, Response};
pub use error::{ApiError, ApiResult};
pub use state::AppState;

// Re-export dependent crates
pub use jotbin_core;
pub use jotbin_store;
