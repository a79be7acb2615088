use std::{fmt, sync::Arc};

use cineshelf_core::{
    AuthService, MovieRepository, ShowRepository, WatchlistRepository,
};
use sqlx::PgPool;

use crate::infra::config::Config;
use crate::media_store::MediaStore;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub movies: MovieRepository,
    pub shows: ShowRepository,
    pub watchlist: WatchlistRepository,
    pub auth: AuthService,
    pub media: MediaStore,
}

impl AppState {
    pub fn new(config: Arc<Config>, pool: PgPool) -> Self {
        Self {
            movies: MovieRepository::new(pool.clone()),
            shows: ShowRepository::new(pool.clone()),
            watchlist: WatchlistRepository::new(pool.clone()),
            auth: AuthService::new(pool, config.session_ttl_days),
            media: MediaStore::new(config.media_root.clone()),
            config,
        }
    }
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}
