//! Postgres persistence layer.
//!
//! One repository per aggregate, each a thin `PgPool` wrapper. Queries are
//! built at runtime so the crate compiles without a live database.

pub mod movies;
pub mod sessions;
pub mod shows;
pub mod users;
pub mod watchlist;

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use crate::error::Result;

pub use movies::MovieRepository;
pub use sessions::SessionRepository;
pub use shows::ShowRepository;
pub use users::UserRepository;
pub use watchlist::WatchlistRepository;

/// Embedded schema migrations, applied once at startup.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!();

pub async fn connect(database_url: &str) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;
    Ok(pool)
}
