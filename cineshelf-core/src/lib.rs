//! Core library for the Cineshelf content catalog.
//!
//! Houses everything below the HTTP surface: the Postgres repositories for
//! movies, shows, episodes, watchlists, users, and sessions; credential and
//! session handling; admin form validation; and live-search query shaping.

pub mod auth;
pub mod database;
pub mod error;
pub mod search;
pub mod validate;

pub use auth::{AuthService, IssuedSession};
pub use database::{
    MIGRATOR, MovieRepository, SessionRepository, ShowRepository,
    UserRepository, WatchlistRepository, connect,
};
pub use error::{CatalogError, Result, ValidationErrors};
