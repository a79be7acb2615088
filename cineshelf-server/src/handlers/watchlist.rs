//! Watchlist toggles and the my-watchlist page. All routes here sit behind
//! the page auth guard.

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::{HeaderMap, header},
    response::Redirect,
};
use cineshelf_model::{User, WatchTarget, WatchlistItem};

use crate::api::ApiResponse;
use crate::errors::AppResult;
use crate::infra::app_state::AppState;

/// POST /watchlist/{movie_id} - strict toggle, then back to the movie's
/// detail page.
pub async fn toggle_movie(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(movie_id): Path<i64>,
) -> AppResult<Redirect> {
    state
        .watchlist
        .toggle(user.id, WatchTarget::Movie(movie_id))
        .await?;
    Ok(Redirect::to(&format!("/movie/{movie_id}")))
}

/// POST /watchlist-show/{show_id} - strict toggle, then back to wherever
/// the visitor came from (home when the Referer is missing).
pub async fn toggle_show(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    headers: HeaderMap,
    Path(show_id): Path<i64>,
) -> AppResult<Redirect> {
    state
        .watchlist
        .toggle(user.id, WatchTarget::Show(show_id))
        .await?;

    let back = headers
        .get(header::REFERER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("/home");
    Ok(Redirect::to(back))
}

/// GET /my-watchlist - the user's entries, most recently added first.
pub async fn my_watchlist(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
) -> AppResult<Json<ApiResponse<Vec<WatchlistItem>>>> {
    let items = state.watchlist.list(user.id).await?;
    Ok(Json(ApiResponse::success(items)))
}
