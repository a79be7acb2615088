//! Login, logout, and the role-selection entry point.

use axum::{
    Form, Json,
    extract::State,
    response::Redirect,
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use cineshelf_model::RoleClaim;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use super::middleware::SESSION_COOKIE;
use crate::api::ApiResponse;
use crate::errors::AppResult;
use crate::infra::app_state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    /// Role selected on the form; checked once at login, never stored.
    pub role: RoleClaim,
}

#[derive(Debug, Serialize)]
pub struct LoginView {
    pub roles: [&'static str; 2],
}

/// GET /select-role - the role-selection entry point.
pub async fn select_role() -> Json<ApiResponse<Value>> {
    Json(ApiResponse::success(json!({
        "roles": ["user", "admin"],
        "login": "/login",
    })))
}

/// GET /login - the login form descriptor.
pub async fn login_form() -> Json<ApiResponse<LoginView>> {
    Json(ApiResponse::success(LoginView {
        roles: ["user", "admin"],
    }))
}

/// POST /login.
///
/// Credential check first, then the role-claim gate; the two failures keep
/// their distinct messages ("invalid credentials" vs "not authorized as
/// admin"). Success opens a session and lands on the home page.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(request): Form<LoginRequest>,
) -> AppResult<(CookieJar, Redirect)> {
    let (_, session) = state
        .auth
        .login(&request.email, &request.password, request.role)
        .await?;

    let cookie = Cookie::build((SESSION_COOKIE, session.token))
        .path("/")
        .http_only(true)
        .build();

    Ok((jar.add(cookie), Redirect::to("/home")))
}

/// POST /logout (GET works too): revoke the session, clear the cookie, and
/// return to role selection.
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> AppResult<(CookieJar, Redirect)> {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        state.auth.logout(cookie.value()).await?;
    }

    let jar = jar.remove(Cookie::build((SESSION_COOKIE, "")).path("/").build());
    Ok((jar, Redirect::to("/select-role")))
}
