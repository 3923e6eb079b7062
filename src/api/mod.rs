//! # API Module
//!
//! HTTP handlers served by the short-lived local server that receives the
//! OAuth redirect during `intune auth`.
//!
//! ## Endpoints
//!
//! - [`callback`] - Receives the authorization code (or the provider error)
//!   and hands it to the waiting auth flow through a one-shot channel kept in
//!   router state.
//! - [`health`] - Reports status and version.
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use axum::{Router, routing::get};
//! use intune::api::{CallbackState, callback, health};
//!
//! let (state, outcome) = CallbackState::new(Some(csrf_state));
//! let app = Router::new()
//!     .route("/callback", get(callback))
//!     .route("/health", get(health))
//!     .with_state(state);
//! ```

mod callback;
mod health;

pub use callback::{CallbackOutcome, CallbackState, callback};
pub use health::health;
