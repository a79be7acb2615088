//! Catalog entities: movies, TV shows, and their episodes.
//!
//! Movies and shows share the same attribute shape; shows additionally own
//! an ordered set of episodes. All media columns hold relative URL paths
//! under the server's media root.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which side of the catalog an item lives on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Movie,
    Show,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Movie {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub poster: String,
    pub banner: Option<String>,
    pub video: Option<String>,
    pub trailer: Option<String>,
    pub release_year: i32,
    pub language: String,
    pub is_trending: bool,
    pub is_hindi: bool,
    pub is_english: bool,
    /// Position in the top-ten shelf; `None` keeps the item off the shelf.
    pub top_rank: Option<i32>,
    pub watch_link: Option<String>,
    pub more_info_link: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct TvShow {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub poster: String,
    pub banner: Option<String>,
    pub video: Option<String>,
    pub trailer: Option<String>,
    pub release_year: i32,
    pub language: String,
    pub is_trending: bool,
    pub is_hindi: bool,
    pub is_english: bool,
    pub top_rank: Option<i32>,
    pub watch_link: Option<String>,
    pub more_info_link: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A single episode of a show.
///
/// The (tvshow_id, season, episode_number) triple is unique; default
/// ordering is season then episode number, ascending.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Episode {
    pub id: i64,
    pub tvshow_id: i64,
    pub season: i32,
    pub episode_number: i32,
    pub title: String,
    pub description: String,
    pub video: String,
    pub thumbnail: Option<String>,
}

/// Four-way split the listing pages are built from.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogShelves<T> {
    pub trending: Vec<T>,
    pub hindi: Vec<T>,
    pub english: Vec<T>,
    /// At most ten items, ascending by `top_rank`.
    pub top: Vec<T>,
}

/// Validated field set for inserting a movie or a show.
#[derive(Debug, Clone)]
pub struct NewCatalogItem {
    pub title: String,
    pub description: String,
    pub poster: String,
    pub banner: Option<String>,
    pub video: Option<String>,
    pub trailer: Option<String>,
    pub release_year: i32,
    pub language: String,
    pub is_trending: bool,
    pub is_hindi: bool,
    pub is_english: bool,
    pub top_rank: Option<i32>,
    pub watch_link: Option<String>,
    pub more_info_link: Option<String>,
}

/// Validated field set for inserting an episode.
#[derive(Debug, Clone)]
pub struct NewEpisode {
    pub tvshow_id: i64,
    pub season: i32,
    pub episode_number: i32,
    pub title: String,
    pub description: String,
    pub video: String,
    pub thumbnail: Option<String>,
}
