//! Public catalog pages: listings, detail views, watch pages, live search.

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use cineshelf_core::search::normalized_query;
use cineshelf_model::{
    CatalogShelves, Episode, Movie, SearchHit, TvShow, User, WatchTarget,
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::api::ApiResponse;
use crate::errors::AppResult;
use crate::infra::app_state::AppState;

#[derive(Debug, Serialize)]
pub struct HomeView {
    pub user: User,
}

#[derive(Debug, Serialize)]
pub struct MovieDetailView {
    pub movie: Movie,
    pub related_movies: Vec<Movie>,
    pub in_watchlist: bool,
}

#[derive(Debug, Serialize)]
pub struct ShowDetailView {
    pub show: TvShow,
    pub episodes: Vec<Episode>,
    pub related_shows: Vec<TvShow>,
    pub in_watchlist: bool,
}

#[derive(Debug, Serialize)]
pub struct EpisodeDetailView {
    pub episode: Episode,
    pub show: TvShow,
    pub related_episodes: Vec<Episode>,
    pub related_shows: Vec<TvShow>,
    pub in_watchlist: bool,
}

#[derive(Debug, Serialize)]
pub struct WatchMovieView {
    pub movie: Movie,
}

#[derive(Debug, Serialize)]
pub struct WatchEpisodeView {
    pub episode: Episode,
    pub show: TvShow,
}

/// GET /home - the only public page that requires a session.
pub async fn home(Extension(user): Extension<User>) -> Json<ApiResponse<HomeView>> {
    Json(ApiResponse::success(HomeView { user }))
}

/// GET /about.
pub async fn about() -> Json<ApiResponse<Value>> {
    Json(ApiResponse::success(json!({
        "page": "about",
        "description": "Cineshelf is a catalog of movies and TV shows.",
    })))
}

/// GET /contact.
pub async fn contact() -> Json<ApiResponse<Value>> {
    Json(ApiResponse::success(json!({
        "page": "contact",
        "email": "hello@cineshelf.example",
    })))
}

/// GET /movies - the four-way shelf split.
pub async fn movies_index(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<CatalogShelves<Movie>>>> {
    let shelves = state.movies.shelves().await?;
    Ok(Json(ApiResponse::success(shelves)))
}

/// GET /tv-shows.
pub async fn shows_index(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<CatalogShelves<TvShow>>>> {
    let shelves = state.shows.shelves().await?;
    Ok(Json(ApiResponse::success(shelves)))
}

/// GET /movie/{id}.
pub async fn movie_detail(
    State(state): State<AppState>,
    user: Option<Extension<User>>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<MovieDetailView>>> {
    let movie = state.movies.get(id).await?;
    let related_movies = state.movies.related(id).await?;

    let in_watchlist = match user {
        Some(Extension(user)) => {
            state
                .watchlist
                .contains(user.id, WatchTarget::Movie(id))
                .await?
        }
        None => false,
    };

    Ok(Json(ApiResponse::success(MovieDetailView {
        movie,
        related_movies,
        in_watchlist,
    })))
}

/// GET /show/{id} - eagerly loads the show's episodes.
pub async fn show_detail(
    State(state): State<AppState>,
    user: Option<Extension<User>>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<ShowDetailView>>> {
    let (show, episodes) = state.shows.get_with_episodes(id).await?;
    let related_shows = state.shows.related(id).await?;

    let in_watchlist = match user {
        Some(Extension(user)) => {
            state
                .watchlist
                .contains(user.id, WatchTarget::Show(id))
                .await?
        }
        None => false,
    };

    Ok(Json(ApiResponse::success(ShowDetailView {
        show,
        episodes,
        related_shows,
        in_watchlist,
    })))
}

/// GET /episode/{id} - eagerly loads the parent show.
pub async fn episode_detail(
    State(state): State<AppState>,
    user: Option<Extension<User>>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<EpisodeDetailView>>> {
    let (episode, show) = state.shows.get_episode(id).await?;
    let related_episodes = state.shows.sibling_episodes(show.id, episode.id).await?;
    let related_shows = state.shows.related(show.id).await?;

    let in_watchlist = match user {
        Some(Extension(user)) => {
            state
                .watchlist
                .contains(user.id, WatchTarget::Show(show.id))
                .await?
        }
        None => false,
    };

    Ok(Json(ApiResponse::success(EpisodeDetailView {
        episode,
        show,
        related_episodes,
        related_shows,
        in_watchlist,
    })))
}

/// GET /watch/{id}.
pub async fn watch_movie(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<WatchMovieView>>> {
    let movie = state.movies.get(id).await?;
    Ok(Json(ApiResponse::success(WatchMovieView { movie })))
}

/// GET /watch-episode/{id}.
pub async fn watch_episode(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<WatchEpisodeView>>> {
    let (episode, show) = state.shows.get_episode(id).await?;
    Ok(Json(ApiResponse::success(WatchEpisodeView {
        episode,
        show,
    })))
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

/// GET /live-search?q=... - bare JSON array, movies first then shows.
///
/// A blank query returns an empty array without touching the database.
pub async fn live_search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<Vec<SearchHit>>> {
    let Some(query) = normalized_query(params.q.as_deref()) else {
        return Ok(Json(Vec::new()));
    };

    let mut results = state.movies.search_titles(&query).await?;
    results.extend(state.shows.search_titles(&query).await?);
    Ok(Json(results))
}
