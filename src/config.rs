use anyhow::{Context, Result};
use std::env;
use std::time::Duration;

use crate::omdb::MediaType;

pub const DEFAULT_BASE_URL: &str = "https://www.omdbapi.com/";
pub const DEFAULT_BROWSE_TERM: &str = "batman";

/// Fetch settings shared by every screen. Built once and handed to the client.
#[derive(Debug, Clone)]
pub struct OmdbConfig {
    pub base_url: String,
    pub api_key: String,
    /// Fixed topic the browse list pages through.
    pub browse_term: String,
    /// `type` filter sent with free-text searches.
    pub search_media_type: Option<MediaType>,
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl OmdbConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
            browse_term: DEFAULT_BROWSE_TERM.to_string(),
            search_media_type: Some(MediaType::Movie),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(5),
        }
    }

    /// Reads `OMDB_API_KEY` (required), `OMDB_BASE_URL` and `CINESCOPE_BROWSE_TERM`.
    pub fn from_env() -> Result<Self> {
        let api_key = env::var("OMDB_API_KEY")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .context("OMDB_API_KEY not set")?;
        let mut config = Self::new(api_key);
        if let Some(url) = env::var("OMDB_BASE_URL").ok().filter(|s| !s.is_empty()) {
            config.base_url = url;
        }
        if let Some(term) = env::var("CINESCOPE_BROWSE_TERM")
            .ok()
            .filter(|s| !s.trim().is_empty())
        {
            config.browse_term = term.trim().to_string();
        }
        Ok(config)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_browse_term(mut self, term: impl Into<String>) -> Self {
        self.browse_term = term.into();
        self
    }

    pub fn with_search_media_type(mut self, media_type: Option<MediaType>) -> Self {
        self.search_media_type = media_type;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
