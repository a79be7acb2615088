//! Cineshelf HTTP server.
//!
//! Public catalog browsing, session-gated watchlists, and the admin panel,
//! wired onto the repositories and services in `cineshelf-core`.

pub mod api;
pub mod auth;
pub mod errors;
pub mod handlers;
pub mod infra;
pub mod media_store;
pub mod routes;

pub use infra::{app_state::AppState, config::Config};
pub use routes::build_router;
