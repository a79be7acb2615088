use cineshelf_model::{CatalogShelves, MediaKind, Movie, NewCatalogItem, SearchHit};
use sqlx::{PgPool, Row};

use crate::error::{CatalogError, Result};
use crate::search;

const MOVIE_COLUMNS: &str = "id, title, description, poster, banner, video, trailer, \
     release_year, language, is_trending, is_hindi, is_english, top_rank, \
     watch_link, more_info_link, created_at";

#[derive(Clone, Debug)]
pub struct MovieRepository {
    pool: PgPool,
}

impl MovieRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The four shelves the public movies page is built from.
    pub async fn shelves(&self) -> Result<CatalogShelves<Movie>> {
        let trending = self.filtered("is_trending").await?;
        let hindi = self.filtered("is_hindi").await?;
        let english = self.filtered("is_english").await?;

        let top = sqlx::query_as::<_, Movie>(&format!(
            "SELECT {MOVIE_COLUMNS} FROM movies \
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

    async fn filtered(&self, flag: &str) -> Result<Vec<Movie>> {
        // `flag` is one of our own column names, never user input.
        let movies = sqlx::query_as::<_, Movie>(&format!(
            "SELECT {MOVIE_COLUMNS} FROM movies WHERE {flag} ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(movies)
    }

    pub async fn get(&self, id: i64) -> Result<Movie> {
        sqlx::query_as::<_, Movie>(&format!(
            "SELECT {MOVIE_COLUMNS} FROM movies WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| CatalogError::not_found(format!("movie {id}")))
    }

    /// Up to ten other movies for a detail page, newest first.
    pub async fn related(&self, exclude_id: i64) -> Result<Vec<Movie>> {
        let movies = sqlx::query_as::<_, Movie>(&format!(
            "SELECT {MOVIE_COLUMNS} FROM movies WHERE id <> $1 \
             ORDER BY created_at DESC LIMIT 10"
        ))
        .bind(exclude_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(movies)
    }

    /// Admin view: every movie, newest first.
    pub async fn list_all(&self) -> Result<Vec<Movie>> {
        let movies = sqlx::query_as::<_, Movie>(&format!(
            "SELECT {MOVIE_COLUMNS} FROM movies ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(movies)
    }

    pub async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM movies")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    pub async fn insert(&self, item: &NewCatalogItem) -> Result<Movie> {
        let movie = sqlx::query_as::<_, Movie>(&format!(
            "INSERT INTO movies \
             (title, description, poster, banner, video, trailer, release_year, \
              language, is_trending, is_hindi, is_english, top_rank, watch_link, \
              more_info_link) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14) \
             RETURNING {MOVIE_COLUMNS}"
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
        Ok(movie)
    }

    /// Case-insensitive title substring match, capped at eight hits.
    pub async fn search_titles(&self, query: &str) -> Result<Vec<SearchHit>> {
        let pattern = search::contains_pattern(query);
        let rows = sqlx::query(
            "SELECT id, title, poster FROM movies \
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
                    kind: MediaKind::Movie,
                })
            })
            .collect()
    }
}
