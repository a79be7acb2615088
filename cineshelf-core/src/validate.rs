//! Admin form validation.
//!
//! Multipart text fields arrive as a flat string map; uploads are reported
//! by presence only (the server stores the bytes after validation passes).
//! Validation either yields a fully typed field set or a per-field error
//! map for the form to redisplay. Nothing is persisted on failure.

use std::collections::BTreeMap;

use cineshelf_model::{NewCatalogItem, NewEpisode};

use crate::error::ValidationErrors;

pub type FormFields = BTreeMap<String, String>;

/// Typed fields for a movie or show form, minus the media paths that only
/// exist once the uploads are stored.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogFields {
    pub title: String,
    pub description: String,
    pub release_year: i32,
    pub language: String,
    pub is_trending: bool,
    pub is_hindi: bool,
    pub is_english: bool,
    pub top_rank: Option<i32>,
    pub watch_link: Option<String>,
    pub more_info_link: Option<String>,
}

impl CatalogFields {
    pub fn into_new_item(
        self,
        poster: String,
        banner: Option<String>,
        video: Option<String>,
        trailer: Option<String>,
    ) -> NewCatalogItem {
        NewCatalogItem {
            title: self.title,
            description: self.description,
            poster,
            banner,
            video,
            trailer,
            release_year: self.release_year,
            language: self.language,
            is_trending: self.is_trending,
            is_hindi: self.is_hindi,
            is_english: self.is_english,
            top_rank: self.top_rank,
            watch_link: self.watch_link,
            more_info_link: self.more_info_link,
        }
    }
}

/// Typed fields for an episode form, minus the stored media paths.
#[derive(Debug, Clone, PartialEq)]
pub struct EpisodeFields {
    pub tvshow_id: i64,
    pub season: i32,
    pub episode_number: i32,
    pub title: String,
    pub description: String,
}

impl EpisodeFields {
    pub fn into_new_episode(
        self,
        video: String,
        thumbnail: Option<String>,
    ) -> NewEpisode {
        NewEpisode {
            tvshow_id: self.tvshow_id,
            season: self.season,
            episode_number: self.episode_number,
            title: self.title,
            description: self.description,
            video,
            thumbnail,
        }
    }
}

pub fn validate_catalog_item(
    fields: &FormFields,
    has_poster: bool,
) -> Result<CatalogFields, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let title = required(fields, "title", &mut errors);
    let description = required(fields, "description", &mut errors);
    let language = required(fields, "language", &mut errors);
    let release_year = required_int::<i32>(fields, "release_year", &mut errors);
    let top_rank = optional_int::<i32>(fields, "top_rank", &mut errors);

    if !has_poster {
        errors.push("poster", "a poster image is required");
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(CatalogFields {
        title: title.unwrap_or_default(),
        description: description.unwrap_or_default(),
        release_year: release_year.unwrap_or_default(),
        language: language.unwrap_or_default(),
        is_trending: checkbox(fields, "is_trending"),
        is_hindi: checkbox(fields, "is_hindi"),
        is_english: checkbox(fields, "is_english"),
        top_rank,
        watch_link: optional(fields, "watch_link"),
        more_info_link: optional(fields, "more_info_link"),
    })
}

pub fn validate_episode(
    fields: &FormFields,
    has_video: bool,
) -> Result<EpisodeFields, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let tvshow_id = required_int::<i64>(fields, "tvshow", &mut errors);
    let episode_number = required_int::<i32>(fields, "episode_number", &mut errors);
    let title = required(fields, "title", &mut errors);
    let description = required(fields, "description", &mut errors);

    // Season defaults to 1 when left blank, mirroring the column default.
    let season = match optional(fields, "season") {
        None => Some(1),
        Some(raw) => match raw.parse::<i32>() {
            Ok(value) => Some(value),
            Err(_) => {
                errors.push("season", "must be a whole number");
                None
            }
        },
    };

    if !has_video {
        errors.push("video", "an episode video is required");
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(EpisodeFields {
        tvshow_id: tvshow_id.unwrap_or_default(),
        season: season.unwrap_or(1),
        episode_number: episode_number.unwrap_or_default(),
        title: title.unwrap_or_default(),
        description: description.unwrap_or_default(),
    })
}

fn required(
    fields: &FormFields,
    name: &str,
    errors: &mut ValidationErrors,
) -> Option<String> {
    match optional(fields, name) {
        Some(value) => Some(value),
        None => {
            errors.push(name, "this field is required");
            None
        }
    }
}

fn required_int<T: std::str::FromStr>(
    fields: &FormFields,
    name: &str,
    errors: &mut ValidationErrors,
) -> Option<T> {
    let raw = required(fields, name, errors)?;
    match raw.parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            errors.push(name, "must be a whole number");
            None
        }
    }
}

fn optional_int<T: std::str::FromStr>(
    fields: &FormFields,
    name: &str,
    errors: &mut ValidationErrors,
) -> Option<T> {
    let raw = optional(fields, name)?;
    match raw.parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            errors.push(name, "must be a whole number");
            None
        }
    }
}

fn optional(fields: &FormFields, name: &str) -> Option<String> {
    fields
        .get(name)
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

/// HTML checkboxes post "on" when ticked and nothing otherwise.
fn checkbox(fields: &FormFields, name: &str) -> bool {
    matches!(
        fields.get(name).map(|value| value.trim()),
        Some("on" | "true" | "1")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog_form() -> FormFields {
        FormFields::from([
            ("title".to_string(), "Night Train".to_string()),
            ("description".to_string(), "A slow ride north.".to_string()),
            ("release_year".to_string(), "2019".to_string()),
            ("language".to_string(), "English".to_string()),
            ("is_english".to_string(), "on".to_string()),
            ("top_rank".to_string(), "3".to_string()),
        ])
    }

    #[test]
    fn valid_catalog_form_produces_typed_fields() {
        let fields = validate_catalog_item(&catalog_form(), true).unwrap();
        assert_eq!(fields.title, "Night Train");
        assert_eq!(fields.release_year, 2019);
        assert!(fields.is_english);
        assert!(!fields.is_hindi);
        assert_eq!(fields.top_rank, Some(3));
        assert_eq!(fields.watch_link, None);
    }

    #[test]
    fn missing_required_fields_are_reported_per_field() {
        let errors = validate_catalog_item(&FormFields::new(), false).unwrap_err();
        assert_eq!(errors.field("title"), Some("this field is required"));
        assert_eq!(errors.field("description"), Some("this field is required"));
        assert_eq!(errors.field("release_year"), Some("this field is required"));
        assert_eq!(errors.field("language"), Some("this field is required"));
        assert_eq!(errors.field("poster"), Some("a poster image is required"));
    }

    #[test]
    fn non_numeric_year_and_rank_are_rejected() {
        let mut form = catalog_form();
        form.insert("release_year".into(), "soon".into());
        form.insert("top_rank".into(), "first".into());

        let errors = validate_catalog_item(&form, true).unwrap_err();
        assert_eq!(errors.field("release_year"), Some("must be a whole number"));
        assert_eq!(errors.field("top_rank"), Some("must be a whole number"));
    }

    #[test]
    fn blank_optional_fields_collapse_to_none() {
        let mut form = catalog_form();
        form.insert("watch_link".into(), "   ".into());
        form.remove("top_rank");

        let fields = validate_catalog_item(&form, true).unwrap();
        assert_eq!(fields.watch_link, None);
        assert_eq!(fields.top_rank, None);
    }

    #[test]
    fn episode_season_defaults_to_one() {
        let form = FormFields::from([
            ("tvshow".to_string(), "5".to_string()),
            ("episode_number".to_string(), "2".to_string()),
            ("title".to_string(), "Pilot, Part Two".to_string()),
            ("description".to_string(), "It continues.".to_string()),
        ]);

        let fields = validate_episode(&form, true).unwrap();
        assert_eq!(fields.season, 1);
        assert_eq!(fields.tvshow_id, 5);
        assert_eq!(fields.episode_number, 2);
    }

    #[test]
    fn episode_requires_show_number_and_video() {
        let errors = validate_episode(&FormFields::new(), false).unwrap_err();
        assert_eq!(errors.field("tvshow"), Some("this field is required"));
        assert_eq!(errors.field("episode_number"), Some("this field is required"));
        assert_eq!(errors.field("video"), Some("an episode video is required"));
    }
}
