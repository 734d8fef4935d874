use anyhow::{bail, Result};

use super::MediaType;

/// The two request shapes the provider understands.
#[derive(Debug, Clone, PartialEq)]
pub enum MovieQuery {
    Search {
        term: String,
        page: u32,
        media_type: Option<MediaType>,
    },
    ById {
        identifier: String,
    },
}

impl MovieQuery {
    pub fn search(term: impl Into<String>, page: u32) -> Self {
        MovieQuery::Search {
            term: term.into(),
            page,
            media_type: None,
        }
    }

    pub fn by_id(identifier: impl Into<String>) -> Self {
        MovieQuery::ById {
            identifier: identifier.into(),
        }
    }

    pub fn with_media_type(self, media_type: Option<MediaType>) -> Self {
        match self {
            MovieQuery::Search { term, page, .. } => MovieQuery::Search {
                term,
                page,
                media_type,
            },
            other => other,
        }
    }

    pub fn validate(&self) -> Result<()> {
        match self {
            MovieQuery::Search { term, page, .. } => {
                if term.trim().is_empty() {
                    bail!("search term must not be empty");
                }
                if *page == 0 {
                    bail!("page must be at least 1");
                }
            }
            MovieQuery::ById { identifier } => {
                if identifier.trim().is_empty() {
                    bail!("identifier must not be empty");
                }
            }
        }
        Ok(())
    }

    /// Query string (without the leading `?`) for this request.
    pub fn to_query_string(&self, api_key: &str) -> String {
        let key = urlencoding::encode(api_key);
        match self {
            MovieQuery::Search {
                term,
                page,
                media_type,
            } => {
                let mut qs = format!(
                    "apikey={key}&s={}&page={page}",
                    urlencoding::encode(term.trim())
                );
                if let Some(kind) = media_type {
                    qs.push_str("&type=");
                    qs.push_str(&urlencoding::encode(kind.as_str()));
                }
                qs
            }
            MovieQuery::ById { identifier } => {
                format!("apikey={key}&i={}", urlencoding::encode(identifier.trim()))
            }
        }
    }
}
