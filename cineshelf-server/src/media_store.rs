//! Upload storage under the media root.
//!
//! Files are written with a UUID-prefixed name so concurrent uploads of the
//! same filename never collide; records store the returned relative URL.

use std::path::{Path, PathBuf};

use cineshelf_core::{CatalogError, Result};
use uuid::Uuid;

#[derive(Clone, Debug)]
pub struct MediaStore {
    root: PathBuf,
}

impl MediaStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Store upload bytes under `subdir`, returning the relative URL path
    /// (`/media/<subdir>/<uuid>-<name>`) to persist on the record.
    pub async fn save(
        &self,
        subdir: &str,
        original_name: &str,
        bytes: &[u8],
    ) -> Result<String> {
        let name = format!("{}-{}", Uuid::new_v4(), sanitize_filename(original_name));
        let dir = self.root.join(subdir);
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| CatalogError::Internal(format!("media dir: {e}")))?;
        tokio::fs::write(dir.join(&name), bytes)
            .await
            .map_err(|e| CatalogError::Internal(format!("media write: {e}")))?;
        Ok(format!("/media/{subdir}/{name}"))
    }

    /// Best-effort cleanup of a file saved earlier in a request that later
    /// failed validation.
    pub async fn remove(&self, url_path: &str) {
        if let Some(relative) = url_path.strip_prefix("/media/") {
            let _ = tokio::fs::remove_file(self.root.join(relative)).await;
        }
    }
}

/// Keep only the final path component and drop characters that would need
/// escaping in a URL or shell.
fn sanitize_filename(name: &str) -> String {
    let base = Path::new(name)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("upload");

    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();

    if cleaned.trim_matches('_').is_empty() {
        "upload".to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn filenames_are_sanitized() {
        assert_eq!(sanitize_filename("poster.jpg"), "poster.jpg");
        assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_filename("a movie (1).mp4"), "a_movie__1_.mp4");
        assert_eq!(sanitize_filename("???"), "upload");
    }

    #[tokio::test]
    async fn save_writes_bytes_and_returns_media_url() {
        let dir = tempdir().unwrap();
        let store = MediaStore::new(dir.path().to_path_buf());

        let url = store.save("posters", "poster.jpg", b"jpeg-bytes").await.unwrap();
        assert!(url.starts_with("/media/posters/"));
        assert!(url.ends_with("-poster.jpg"));

        let on_disk = dir.path().join(url.strip_prefix("/media/").unwrap());
        assert_eq!(tokio::fs::read(on_disk).await.unwrap(), b"jpeg-bytes");
    }

    #[tokio::test]
    async fn same_filename_never_collides() {
        let dir = tempdir().unwrap();
        let store = MediaStore::new(dir.path().to_path_buf());

        let first = store.save("posters", "poster.jpg", b"a").await.unwrap();
        let second = store.save("posters", "poster.jpg", b"b").await.unwrap();
        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn remove_deletes_a_stored_file() {
        let dir = tempdir().unwrap();
        let store = MediaStore::new(dir.path().to_path_buf());

        let url = store.save("banners", "banner.png", b"png").await.unwrap();
        store.remove(&url).await;

        let on_disk = dir.path().join(url.strip_prefix("/media/").unwrap());
        assert!(!on_disk.exists());
    }
}
