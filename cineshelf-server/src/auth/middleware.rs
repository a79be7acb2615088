//! Route guards.
//!
//! Guards are composable `route_layer`s, never per-handler checks: a route
//! mounted in a guarded group cannot be accidentally left open. Page routes
//! redirect anonymous visitors to the login form; the admin group answers
//! with a hard 401/403 instead.

use axum::{
    Json,
    extract::{Request, State},
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use cineshelf_core::{CatalogError, Result};
use cineshelf_model::User;

use crate::api::ApiResponse;
use crate::errors::AppError;
use crate::infra::app_state::AppState;

pub const SESSION_COOKIE: &str = "cineshelf_session";

/// Resolve the session cookie to a user. `Ok(None)` means anonymous;
/// `Err` means the store itself failed.
async fn session_user(state: &AppState, headers: &HeaderMap) -> Result<Option<User>> {
    let jar = CookieJar::from_headers(headers);
    let Some(cookie) = jar.get(SESSION_COOKIE) else {
        return Ok(None);
    };
    state.auth.resolve(cookie.value()).await
}

/// Auth gate for browsing pages: anonymous requests are sent to the login
/// form rather than refused.
pub async fn require_user_page(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    match session_user(&state, request.headers()).await {
        Ok(Some(user)) => {
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Ok(None) => Redirect::to("/login").into_response(),
        Err(err) => AppError::from(err).into_response(),
    }
}

/// Auth gate for the admin group: anonymous requests get a 401, not a
/// redirect. Runs before [`require_admin`] in the stack.
pub async fn require_user_api(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    match session_user(&state, request.headers()).await {
        Ok(Some(user)) => {
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Ok(None) => AppError::from(CatalogError::Unauthenticated).into_response(),
        Err(err) => AppError::from(err).into_response(),
    }
}

/// Admin flag check. Relies on the user extension installed by
/// [`require_user_api`]; an authenticated non-admin gets a hard 403.
pub async fn require_admin(request: Request, next: Next) -> Response {
    let Some(user) = request.extensions().get::<User>() else {
        return (
            StatusCode::UNAUTHORIZED,
            Json(ApiResponse::<()>::error("authentication required")),
        )
            .into_response();
    };

    if !user.is_admin {
        return (
            StatusCode::FORBIDDEN,
            Json(ApiResponse::<()>::error("admin access required")),
        )
            .into_response();
    }

    next.run(request).await
}

/// Detail and search pages work anonymously but show watchlist state for a
/// logged-in visitor; a broken session cookie just means anonymous here.
pub async fn optional_user(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    if let Ok(Some(user)) = session_user(&state, request.headers()).await {
        request.extensions_mut().insert(user);
    }
    next.run(request).await
}
