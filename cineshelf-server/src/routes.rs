//! Route table.
//!
//! Routes are grouped by guard, not by feature: a handler mounted in the
//! wrong group fails loudly in review, and no admin route can ship without
//! the admin layer. Layer stacking note: the last `route_layer` added is
//! the outermost, so the session resolver is added after the admin check
//! to run before it.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::HeaderValue,
    middleware,
    routing::{get, post},
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::auth::{handlers as auth_handlers, middleware as guards};
use crate::handlers::{admin, catalog, watchlist};
use crate::infra::app_state::AppState;

pub fn build_router(state: AppState) -> Router {
    let media_root = state.config.media_root.clone();

    let allowed_origins: Vec<HeaderValue> = state
        .config
        .cors_allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed_origins))
        .allow_methods(Any)
        .allow_headers(Any);

    let public = Router::new()
        .route("/select-role", get(auth_handlers::select_role))
        .route(
            "/login",
            get(auth_handlers::login_form).post(auth_handlers::login),
        )
        .route(
            "/logout",
            get(auth_handlers::logout).post(auth_handlers::logout),
        )
        .route("/about", get(catalog::about))
        .route("/contact", get(catalog::contact))
        .route("/movies", get(catalog::movies_index))
        .route("/tv-shows", get(catalog::shows_index))
        .route("/movie/{id}", get(catalog::movie_detail))
        .route("/show/{id}", get(catalog::show_detail))
        .route("/episode/{id}", get(catalog::episode_detail))
        .route("/watch/{id}", get(catalog::watch_movie))
        .route("/watch-episode/{id}", get(catalog::watch_episode))
        .route("/live-search", get(catalog::live_search))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            guards::optional_user,
        ));

    let pages = Router::new()
        .route("/home", get(catalog::home))
        .route("/my-watchlist", get(watchlist::my_watchlist))
        .route("/watchlist/{movie_id}", post(watchlist::toggle_movie))
        .route("/watchlist-show/{show_id}", post(watchlist::toggle_show))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            guards::require_user_page,
        ));

    let admin_panel = Router::new()
        .route("/admin-panel", get(admin::dashboard))
        .route("/admin-panel/movies", get(admin::movies_list))
        .route("/admin-panel/shows", get(admin::shows_list))
        .route(
            "/admin-panel/add-movie",
            get(admin::add_movie_form).post(admin::add_movie),
        )
        .route(
            "/admin-panel/add-show",
            get(admin::add_show_form).post(admin::add_show),
        )
        .route(
            "/admin-panel/add-episode",
            get(admin::add_episode_form).post(admin::add_episode),
        )
        .route_layer(middleware::from_fn(guards::require_admin))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            guards::require_user_api,
        ))
        // Media uploads blow past the default body cap.
        .layer(DefaultBodyLimit::max(admin::MAX_UPLOAD_BYTES));

    Router::new()
        .merge(public)
        .merge(pages)
        .merge(admin_panel)
        .nest_service("/media", ServeDir::new(media_root))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
