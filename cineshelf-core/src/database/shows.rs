use cineshelf_model::{
    CatalogShelves, Episode, MediaKind, NewCatalogItem, NewEpisode, SearchHit,
    TvShow,
};
use sqlx::{PgPool, Row};

use crate::error::{CatalogError, Result};
use crate::search;

const SHOW_COLUMNS: &str = "id, title, description, poster, banner, video, trailer, \
     release_year, language, is_trending, is_hindi, is_english, top_rank, \
     watch_link, more_info_link, created_at";

const EPISODE_COLUMNS: &str =
    "id, tvshow_id, season, episode_number, title, description, video, thumbnail";

/// Shows and the episodes they own.
#[derive(Clone, Debug)]
pub struct ShowRepository {
    pool: PgPool,
}

impl ShowRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn shelves(&self) -> Result<CatalogShelves<TvShow>> {
        let trending = self.filtered("is_trending").await?;
        let hindi = self.filtered("is_hindi").await?;
        let english = self.filtered("is_english").await?;

        let top = sqlx::query_as::<_, TvShow>(&format!(
            "SELECT {SHOW_COLUMNS} FROM tv_shows \
             WHERE top_rank IS NOT NULL ORDER BY top_rank ASC LIMIT 10"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(CatalogShelves {
            trending,
            hindi,
            english,
            top,
        })
    }

    async fn filtered(&self, flag: &str) -> Result<Vec<TvShow>> {
        let shows = sqlx::query_as::<_, TvShow>(&format!(
            "SELECT {SHOW_COLUMNS} FROM tv_shows WHERE {flag} ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(shows)
    }

    pub async fn get(&self, id: i64) -> Result<TvShow> {
        sqlx::query_as::<_, TvShow>(&format!(
            "SELECT {SHOW_COLUMNS} FROM tv_shows WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| CatalogError::not_found(format!("show {id}")))
    }

    /// Show detail fetch: the show plus its episodes in watch order.
    pub async fn get_with_episodes(&self, id: i64) -> Result<(TvShow, Vec<Episode>)> {
        let show = self.get(id).await?;
        let episodes = self.episodes_of(id).await?;
        Ok((show, episodes))
    }

    pub async fn episodes_of(&self, show_id: i64) -> Result<Vec<Episode>> {
        let episodes = sqlx::query_as::<_, Episode>(&format!(
            "SELECT {EPISODE_COLUMNS} FROM episodes WHERE tvshow_id = $1 \
             ORDER BY season ASC, episode_number ASC"
        ))
        .bind(show_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(episodes)
    }

    /// Episode detail fetch: the episode plus its parent show.
    pub async fn get_episode(&self, id: i64) -> Result<(Episode, TvShow)> {
        let episode = sqlx::query_as::<_, Episode>(&format!(
            "SELECT {EPISODE_COLUMNS} FROM episodes WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| CatalogError::not_found(format!("episode {id}")))?;

        let show = self.get(episode.tvshow_id).await?;
        Ok((episode, show))
    }

    /// Other episodes of the same show, for the episode detail page.
    pub async fn sibling_episodes(
        &self,
        show_id: i64,
        exclude_id: i64,
    ) -> Result<Vec<Episode>> {
        let episodes = sqlx::query_as::<_, Episode>(&format!(
            "SELECT {EPISODE_COLUMNS} FROM episodes \
             WHERE tvshow_id = $1 AND id <> $2 \
             ORDER BY season ASC, episode_number ASC"
        ))
        .bind(show_id)
        .bind(exclude_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(episodes)
    }

    pub async fn related(&self, exclude_id: i64) -> Result<Vec<TvShow>> {
        let shows = sqlx::query_as::<_, TvShow>(&format!(
            "SELECT {SHOW_COLUMNS} FROM tv_shows WHERE id <> $1 \
             ORDER BY created_at DESC LIMIT 10"
        ))
        .bind(exclude_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(shows)
    }

    pub async fn list_all(&self) -> Result<Vec<TvShow>> {
        let shows = sqlx::query_as::<_, TvShow>(&format!(
            "SELECT {SHOW_COLUMNS} FROM tv_shows ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(shows)
    }

    pub async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tv_shows")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    pub async fn count_episodes(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM episodes")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    pub async fn insert(&self, item: &NewCatalogItem) -> Result<TvShow> {
        let show = sqlx::query_as::<_, TvShow>(&format!(
            "INSERT INTO tv_shows \
             (title, description, poster, banner, video, trailer, release_year, \
              language, is_trending, is_hindi, is_english, top_rank, watch_link, \
              more_info_link) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14) \
             RETURNING {SHOW_COLUMNS}"
        ))
        .bind(&item.title)
        .bind(&item.description)
        .bind(&item.poster)
        .bind(&item.banner)
        .bind(&item.video)
        .bind(&item.trailer)
        .bind(item.release_year)
        .bind(&item.language)
        .bind(item.is_trending)
        .bind(item.is_hindi)
        .bind(item.is_english)
        .bind(item.top_rank)
        .bind(&item.watch_link)
        .bind(&item.more_info_link)
        .fetch_one(&self.pool)
        .await?;
        Ok(show)
    }

    /// Insert an episode, enforcing the (show, season, episode) uniqueness
    /// invariant. The unique constraint backstops the pre-check, so a
    /// concurrent duplicate still comes back as a validation failure.
    pub async fn insert_episode(&self, episode: &NewEpisode) -> Result<Episode> {
        self.get(episode.tvshow_id).await.map_err(|err| match err {
            CatalogError::NotFound(_) => {
                CatalogError::invalid_field("tvshow", "show does not exist")
            }
            other => other,
        })?;

        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM episodes \
             WHERE tvshow_id = $1 AND season = $2 AND episode_number = $3)",
        )
        .bind(episode.tvshow_id)
        .bind(episode.season)
        .bind(episode.episode_number)
        .fetch_one(&self.pool)
        .await?;

        if exists {
            return Err(duplicate_episode_error());
        }

        let inserted = sqlx::query_as::<_, Episode>(&format!(
            "INSERT INTO episodes \
             (tvshow_id, season, episode_number, title, description, video, thumbnail) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {EPISODE_COLUMNS}"
        ))
        .bind(episode.tvshow_id)
        .bind(episode.season)
        .bind(episode.episode_number)
        .bind(&episode.title)
        .bind(&episode.description)
        .bind(&episode.video)
        .bind(&episode.thumbnail)
        .fetch_one(&self.pool)
        .await
        .map_err(|err| match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                duplicate_episode_error()
            }
            _ => CatalogError::from(err),
        })?;

        Ok(inserted)
    }

    pub async fn search_titles(&self, query: &str) -> Result<Vec<SearchHit>> {
        let pattern = search::contains_pattern(query);
        let rows = sqlx::query(
            "SELECT id, title, poster FROM tv_shows \
             WHERE title ILIKE $1 ESCAPE '\\' ORDER BY created_at DESC LIMIT 8",
        )
        .bind(pattern)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|row| {
                Ok(SearchHit {
                    id: row.try_get("id")?,
                    title: row.try_get("title")?,
                    poster: row.try_get("poster")?,
                    kind: MediaKind::Show,
                })
            })
            .collect()
    }
}

fn duplicate_episode_error() -> CatalogError {
    CatalogError::invalid_field(
        "episode_number",
        "an episode with this season and number already exists for the show",
    )
}
