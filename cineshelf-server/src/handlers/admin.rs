//! Admin panel: dashboard counts, unfiltered catalog lists, and the three
//! create forms. Every route here sits behind the auth + admin guards.

use std::collections::BTreeMap;

use axum::{
    Json,
    body::Bytes,
    extract::{Multipart, State, multipart::MultipartError},
    response::Redirect,
};
use cineshelf_core::validate::{
    FormFields, validate_catalog_item, validate_episode,
};
use cineshelf_model::{Movie, TvShow};
use serde::Serialize;
use serde_json::{Value, json};

use crate::api::ApiResponse;
use crate::errors::{AppError, AppResult};
use crate::infra::app_state::AppState;
use crate::media_store::MediaStore;

/// Body cap for the admin multipart routes. Sized for full-length video
/// uploads; everything else on the server keeps the default limit.
pub const MAX_UPLOAD_BYTES: usize = 2 * 1024 * 1024 * 1024;

#[derive(Debug, Serialize)]
pub struct DashboardView {
    pub total_movies: i64,
    pub total_shows: i64,
    pub total_episodes: i64,
}

/// GET /admin-panel.
pub async fn dashboard(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<DashboardView>>> {
    Ok(Json(ApiResponse::success(DashboardView {
        total_movies: state.movies.count().await?,
        total_shows: state.shows.count().await?,
        total_episodes: state.shows.count_episodes().await?,
    })))
}

/// GET /admin-panel/movies - every movie, newest first.
pub async fn movies_list(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<Movie>>>> {
    Ok(Json(ApiResponse::success(state.movies.list_all().await?)))
}

/// GET /admin-panel/shows.
pub async fn shows_list(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<TvShow>>>> {
    Ok(Json(ApiResponse::success(state.shows.list_all().await?)))
}

/// GET /admin-panel/add-movie - form descriptor.
pub async fn add_movie_form() -> Json<ApiResponse<Value>> {
    Json(ApiResponse::success(catalog_form_descriptor("movie")))
}

/// GET /admin-panel/add-show.
pub async fn add_show_form() -> Json<ApiResponse<Value>> {
    Json(ApiResponse::success(catalog_form_descriptor("show")))
}

/// GET /admin-panel/add-episode - form descriptor plus the shows the
/// episode can belong to.
pub async fn add_episode_form(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Value>>> {
    let shows: Vec<Value> = state
        .shows
        .list_all()
        .await?
        .into_iter()
        .map(|show| json!({ "id": show.id, "title": show.title }))
        .collect();

    Ok(Json(ApiResponse::success(json!({
        "kind": "episode",
        "required": ["tvshow", "episode_number", "title", "description", "video"],
        "optional": ["season", "thumbnail"],
        "shows": shows,
    }))))
}

/// POST /admin-panel/add-movie (multipart).
pub async fn add_movie(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<Redirect> {
    let (item, batch) = build_catalog_item(&state.media, multipart).await?;
    match state.movies.insert(&item).await {
        Ok(_) => Ok(Redirect::to("/admin-panel/movies")),
        Err(err) => {
            batch.discard().await;
            Err(err.into())
        }
    }
}

/// POST /admin-panel/add-show (multipart).
pub async fn add_show(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<Redirect> {
    let (item, batch) = build_catalog_item(&state.media, multipart).await?;
    match state.shows.insert(&item).await {
        Ok(_) => Ok(Redirect::to("/admin-panel/shows")),
        Err(err) => {
            batch.discard().await;
            Err(err.into())
        }
    }
}

/// POST /admin-panel/add-episode (multipart). A duplicate
/// (show, season, episode) triple comes back as a field error on
/// `episode_number` and persists nothing.
pub async fn add_episode(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<Redirect> {
    let form = collect_multipart(multipart).await?;
    let fields = validate_episode(&form.fields, form.uploads.contains_key("video"))
        .map_err(AppError::validation)?;

    let mut batch = UploadBatch::new(&state.media);
    let (video, thumbnail) = match stage_episode_uploads(&mut batch, &form).await {
        Ok(staged) => staged,
        Err(err) => {
            batch.discard().await;
            return Err(err);
        }
    };

    let episode = fields.into_new_episode(video, thumbnail);
    match state.shows.insert_episode(&episode).await {
        Ok(_) => Ok(Redirect::to("/admin-panel/shows")),
        Err(err) => {
            batch.discard().await;
            Err(err.into())
        }
    }
}

fn catalog_form_descriptor(kind: &str) -> Value {
    json!({
        "kind": kind,
        "required": ["title", "description", "release_year", "language", "poster"],
        "optional": [
            "banner", "video", "trailer", "is_trending", "is_hindi",
            "is_english", "top_rank", "watch_link", "more_info_link",
        ],
    })
}

/// Shared movie/show create path: validate the text fields, then store the
/// uploads and assemble the insertable item. The returned batch lets the
/// caller discard the stored files if the insert fails afterwards.
async fn build_catalog_item<'a>(
    media: &'a MediaStore,
    multipart: Multipart,
) -> AppResult<(cineshelf_model::NewCatalogItem, UploadBatch<'a>)> {
    let form = collect_multipart(multipart).await?;
    let fields = validate_catalog_item(&form.fields, form.uploads.contains_key("poster"))
        .map_err(AppError::validation)?;

    let mut batch = UploadBatch::new(media);
    match stage_catalog_uploads(&mut batch, &form).await {
        Ok((poster, banner, video, trailer)) => {
            Ok((fields.into_new_item(poster, banner, video, trailer), batch))
        }
        Err(err) => {
            batch.discard().await;
            Err(err)
        }
    }
}

async fn stage_catalog_uploads(
    batch: &mut UploadBatch<'_>,
    form: &SubmittedForm,
) -> AppResult<(String, Option<String>, Option<String>, Option<String>)> {
    let poster = batch.save(form, "poster", "posters").await?;
    let banner = batch.save_optional(form, "banner", "banners").await?;
    let video = batch.save_optional(form, "video", "videos").await?;
    let trailer = batch.save_optional(form, "trailer", "trailers").await?;
    Ok((poster, banner, video, trailer))
}

async fn stage_episode_uploads(
    batch: &mut UploadBatch<'_>,
    form: &SubmittedForm,
) -> AppResult<(String, Option<String>)> {
    let video = batch.save(form, "video", "episodes").await?;
    let thumbnail = batch
        .save_optional(form, "thumbnail", "episode_thumbnails")
        .await?;
    Ok((video, thumbnail))
}

/// Uploads stored for one request. Any failure after the first write calls
/// [`UploadBatch::discard`] so a rejected create leaves nothing on disk.
struct UploadBatch<'a> {
    media: &'a MediaStore,
    saved: Vec<String>,
}

impl<'a> UploadBatch<'a> {
    fn new(media: &'a MediaStore) -> Self {
        Self {
            media,
            saved: Vec::new(),
        }
    }

    /// Presence was already validated; a missing part here is a programming
    /// error, reported as such rather than panicking.
    async fn save(
        &mut self,
        form: &SubmittedForm,
        part: &str,
        subdir: &str,
    ) -> AppResult<String> {
        let upload = form
            .uploads
            .get(part)
            .ok_or_else(|| AppError::internal(format!("upload `{part}` vanished")))?;
        let path = self.media.save(subdir, &upload.filename, &upload.bytes).await?;
        self.saved.push(path.clone());
        Ok(path)
    }

    async fn save_optional(
        &mut self,
        form: &SubmittedForm,
        part: &str,
        subdir: &str,
    ) -> AppResult<Option<String>> {
        match form.uploads.get(part) {
            Some(upload) => {
                let path =
                    self.media.save(subdir, &upload.filename, &upload.bytes).await?;
                self.saved.push(path.clone());
                Ok(Some(path))
            }
            None => Ok(None),
        }
    }

    /// Best-effort removal of everything stored so far.
    async fn discard(self) {
        for path in &self.saved {
            self.media.remove(path).await;
        }
    }
}

#[derive(Debug)]
struct UploadedFile {
    filename: String,
    bytes: Bytes,
}

#[derive(Debug, Default)]
struct SubmittedForm {
    fields: FormFields,
    uploads: BTreeMap<String, UploadedFile>,
}

/// Drain a multipart body into text fields and uploads. Empty file parts
/// (an unfilled file input) are treated as absent.
async fn collect_multipart(mut multipart: Multipart) -> AppResult<SubmittedForm> {
    let mut form = SubmittedForm::default();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        if let Some(filename) = field.file_name().map(str::to_string) {
            let bytes = field.bytes().await.map_err(multipart_error)?;
            if !filename.is_empty() && !bytes.is_empty() {
                form.uploads.insert(name, UploadedFile { filename, bytes });
            }
        } else {
            let text = field.text().await.map_err(multipart_error)?;
            form.fields.insert(name, text);
        }
    }

    Ok(form)
}

/// A bad multipart body is the client's fault: keep the 4xx status the
/// extractor assigns (413 for an oversized body, 400 otherwise).
fn multipart_error(err: MultipartError) -> AppError {
    AppError::new(err.status(), err.body_text())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Router,
        body::Body,
        extract::DefaultBodyLimit,
        http::{Request, StatusCode, header},
        routing::post,
    };
    use tempfile::tempdir;
    use tower::ServiceExt;

    async fn accept_upload(multipart: Multipart) -> AppResult<&'static str> {
        collect_multipart(multipart).await?;
        Ok("ok")
    }

    fn upload_request(boundary: &str, payload: &[u8]) -> Request<Body> {
        let mut body = Vec::new();
        body.extend_from_slice(
            format!(
                "--{boundary}\r\nContent-Disposition: form-data; \
                 name=\"poster\"; filename=\"poster.jpg\"\r\n\
                 Content-Type: image/jpeg\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(payload);
        body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

        Request::builder()
            .method("POST")
            .uri("/upload")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn oversized_upload_is_too_large_not_a_server_error() {
        let router = Router::new()
            .route("/upload", post(accept_upload))
            .layer(DefaultBodyLimit::max(256));

        let response = router
            .oneshot(upload_request("cineshelf-boundary", &[0u8; 4096]))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn upload_under_the_limit_is_accepted() {
        let router = Router::new()
            .route("/upload", post(accept_upload))
            .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES));

        let response = router
            .oneshot(upload_request("cineshelf-boundary", b"jpeg-bytes"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn failed_later_save_discards_earlier_files() {
        let dir = tempdir().unwrap();
        // A plain file where the banners directory should go makes the
        // second save fail.
        std::fs::write(dir.path().join("banners"), b"in the way").unwrap();
        let store = MediaStore::new(dir.path().to_path_buf());

        let mut form = SubmittedForm::default();
        form.uploads.insert(
            "poster".to_string(),
            UploadedFile {
                filename: "poster.jpg".to_string(),
                bytes: Bytes::from_static(b"jpg"),
            },
        );
        form.uploads.insert(
            "banner".to_string(),
            UploadedFile {
                filename: "banner.png".to_string(),
                bytes: Bytes::from_static(b"png"),
            },
        );

        let mut batch = UploadBatch::new(&store);
        let staged = stage_catalog_uploads(&mut batch, &form).await;
        assert!(staged.is_err());
        batch.discard().await;

        let leftovers: Vec<_> = std::fs::read_dir(dir.path().join("posters"))
            .unwrap()
            .collect();
        assert!(leftovers.is_empty());
    }
}
