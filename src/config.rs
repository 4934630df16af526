use anyhow::{bail, Context, Result};
use dotenvy::dotenv;
use std::env;
use std::time::Duration;

pub const DEFAULT_PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/300";
pub const DEFAULT_CATEGORY_SLUG: &str = "geral";
pub const DEFAULT_STATE: &str = "SC";
pub const DEFAULT_LISTINGS_TABLE: &str = "listings";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Connection settings for the hosted listings backend
#[derive(Debug, Clone)]
pub struct BackendConfig {
    pub url: String,
    pub api_key: String,
    pub listings_table: String,
    pub request_timeout: Duration,
}

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub backend: Option<BackendConfig>,
    pub placeholder_image: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let backend = match (lookup("BACKEND_URL"), lookup("BACKEND_API_KEY")) {
            (Some(url), Some(api_key)) => Some(BackendConfig {
                url,
                api_key,
                listings_table: lookup("LISTINGS_TABLE")
                    .unwrap_or_else(|| DEFAULT_LISTINGS_TABLE.to_string()),
                request_timeout: Duration::from_secs(
                    lookup("REQUEST_TIMEOUT_SECS")
                        .unwrap_or_else(|| DEFAULT_REQUEST_TIMEOUT_SECS.to_string())
                        .parse()
                        .context("REQUEST_TIMEOUT_SECS must be a valid number")?,
                ),
            }),
            (None, None) => None,
            (Some(_), None) => bail!("BACKEND_API_KEY must be set when BACKEND_URL is set"),
            (None, Some(_)) => bail!("BACKEND_URL must be set when BACKEND_API_KEY is set"),
        };

        Ok(Self {
            backend,
            placeholder_image: lookup("PLACEHOLDER_IMAGE_URL")
                .unwrap_or_else(|| DEFAULT_PLACEHOLDER_IMAGE.to_string()),
        })
    }

    /// Backend settings, required when talking to the hosted store
    pub fn backend(&self) -> Result<&BackendConfig> {
        self.backend
            .as_ref()
            .context("BACKEND_URL and BACKEND_API_KEY must be set")
    }
}
