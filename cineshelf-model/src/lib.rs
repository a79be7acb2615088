//! Core data model definitions shared across Cineshelf crates.

pub mod catalog;
pub mod search;
pub mod user;
pub mod watchlist;

// Intentionally curated re-exports for downstream consumers.
pub use catalog::{
    CatalogShelves, Episode, MediaKind, Movie, NewCatalogItem, NewEpisode,
    TvShow,
};
pub use search::SearchHit;
pub use user::{RoleClaim, User};
pub use watchlist::{ToggleOutcome, WatchTarget, WatchlistItem};
