use cineshelf_model::{ToggleOutcome, WatchTarget, WatchlistItem};
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::error::{CatalogError, Result};

/// Per-user watchlist membership.
///
/// The only write path is [`WatchlistRepository::toggle`]; catalog rows are
/// never touched from here.
#[derive(Clone, Debug)]
pub struct WatchlistRepository {
    pool: PgPool,
}

impl WatchlistRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Strict toggle: delete the entry if present, create it otherwise.
    ///
    /// Two concurrent toggles can race. The delete path is naturally a no-op
    /// when the row is already gone; the insert path leans on the unique
    /// constraint (`ON CONFLICT DO NOTHING`) so a losing create is absorbed
    /// rather than surfaced.
    pub async fn toggle(
        &self,
        user_id: Uuid,
        target: WatchTarget,
    ) -> Result<ToggleOutcome> {
        self.ensure_target_exists(target).await?;

        let column = match target {
            WatchTarget::Movie(_) => "movie_id",
            WatchTarget::Show(_) => "tvshow_id",
        };

        let deleted = sqlx::query(&format!(
            "DELETE FROM watchlist_entries WHERE user_id = $1 AND {column} = $2"
        ))
        .bind(user_id)
        .bind(target.id())
        .execute(&self.pool)
        .await?
        .rows_affected();

        if deleted > 0 {
            return Ok(ToggleOutcome::Removed);
        }

        sqlx::query(&format!(
            "INSERT INTO watchlist_entries (user_id, {column}) VALUES ($1, $2) \
             ON CONFLICT (user_id, {column}) DO NOTHING"
        ))
        .bind(user_id)
        .bind(target.id())
        .execute(&self.pool)
        .await?;

        Ok(ToggleOutcome::Added)
    }

    pub async fn contains(&self, user_id: Uuid, target: WatchTarget) -> Result<bool> {
        let column = match target {
            WatchTarget::Movie(_) => "movie_id",
            WatchTarget::Show(_) => "tvshow_id",
        };

        let exists: bool = sqlx::query_scalar(&format!(
            "SELECT EXISTS (SELECT 1 FROM watchlist_entries \
             WHERE user_id = $1 AND {column} = $2)"
        ))
        .bind(user_id)
        .bind(target.id())
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    /// All of a user's entries, most recently added first, hydrated with the
    /// target's title and poster.
    pub async fn list(&self, user_id: Uuid) -> Result<Vec<WatchlistItem>> {
        let rows = sqlx::query(
            "SELECT w.id, w.movie_id, w.tvshow_id, w.added_on, \
                    COALESCE(m.title, s.title) AS title, \
                    COALESCE(m.poster, s.poster) AS poster \
             FROM watchlist_entries w \
             LEFT JOIN movies m ON m.id = w.movie_id \
             LEFT JOIN tv_shows s ON s.id = w.tvshow_id \
             WHERE w.user_id = $1 \
             ORDER BY w.added_on DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|row| {
                let movie_id: Option<i64> = row.try_get("movie_id")?;
                let tvshow_id: Option<i64> = row.try_get("tvshow_id")?;
                let target = match (movie_id, tvshow_id) {
                    (Some(id), None) => WatchTarget::Movie(id),
                    (None, Some(id)) => WatchTarget::Show(id),
                    // Unreachable while the CHECK constraint holds.
                    _ => {
                        return Err(CatalogError::Internal(
                            "watchlist entry without a single target".into(),
                        ));
                    }
                };

                Ok(WatchlistItem {
                    id: row.try_get("id")?,
                    target,
                    title: row.try_get("title")?,
                    poster: row.try_get("poster")?,
                    added_on: row.try_get("added_on")?,
                })
            })
            .collect()
    }

    async fn ensure_target_exists(&self, target: WatchTarget) -> Result<()> {
        let (table, label) = match target {
            WatchTarget::Movie(_) => ("movies", "movie"),
            WatchTarget::Show(_) => ("tv_shows", "show"),
        };

        let exists: bool = sqlx::query_scalar(&format!(
            "SELECT EXISTS (SELECT 1 FROM {table} WHERE id = $1)"
        ))
        .bind(target.id())
        .fetch_one(&self.pool)
        .await?;

        if exists {
            Ok(())
        } else {
            Err(CatalogError::not_found(format!("{label} {}", target.id())))
        }
    }
}
