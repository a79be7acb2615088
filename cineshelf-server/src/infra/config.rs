use std::{env, path::PathBuf};

use serde::Deserialize;

/// Server configuration loaded from environment variables (with `.env`
/// support for development).
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // Server settings
    pub server_host: String,
    pub server_port: u16,

    // Database settings
    pub database_url: String,

    // Media settings
    pub media_root: PathBuf,

    // Session settings
    pub session_ttl_days: i64,

    // CORS settings
    pub cors_allowed_origins: Vec<String>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL")
            .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))?;

        Ok(Self {
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            server_port: parse_or_default("SERVER_PORT", env::var("SERVER_PORT").ok(), 3000)?,

            database_url,

            media_root: env::var("MEDIA_ROOT")
                .unwrap_or_else(|_| "./media".to_string())
                .into(),

            session_ttl_days: parse_or_default(
                "SESSION_TTL_DAYS",
                env::var("SESSION_TTL_DAYS").ok(),
                30,
            )?,

            cors_allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                .unwrap_or_else(|_| "http://localhost:3000".to_string())
                .split(',')
                .map(|s| s.trim().to_string())
                .collect(),
        })
    }

    /// Create the media directories uploads land in. Called once during
    /// startup so handlers can assume they exist.
    pub fn ensure_directories(&self) -> anyhow::Result<()> {
        for subdir in [
            "posters",
            "banners",
            "videos",
            "trailers",
            "episodes",
            "episode_thumbnails",
        ] {
            std::fs::create_dir_all(self.media_root.join(subdir))?;
        }
        Ok(())
    }
}

/// An unset variable takes the default; a set but unparseable one is a
/// startup error, not a silent fallback.
fn parse_or_default<T>(name: &str, raw: Option<String>, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        Some(raw) => raw
            .parse()
            .map_err(|err| anyhow::anyhow!("invalid {name} `{raw}`: {err}")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_values_take_the_default() {
        assert_eq!(parse_or_default::<u16>("SERVER_PORT", None, 3000).unwrap(), 3000);
    }

    #[test]
    fn set_values_are_parsed() {
        let port =
            parse_or_default::<u16>("SERVER_PORT", Some("8000".to_string()), 3000);
        assert_eq!(port.unwrap(), 8000);
    }

    #[test]
    fn malformed_values_fail_instead_of_falling_back() {
        let err = parse_or_default::<u16>("SERVER_PORT", Some("eight".to_string()), 3000)
            .unwrap_err();
        assert!(err.to_string().contains("SERVER_PORT"));

        let err =
            parse_or_default::<i64>("SESSION_TTL_DAYS", Some("4.5".to_string()), 30)
                .unwrap_err();
        assert!(err.to_string().contains("SESSION_TTL_DAYS"));
    }
}
