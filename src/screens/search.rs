use std::sync::{Arc, Mutex};
use tracing::{debug, info, warn};

use super::lock;
use super::sequence::RequestSequence;
use crate::config::OmdbConfig;
use crate::omdb::{MediaType, MovieSummary, OmdbApi, QueryResult};

#[derive(Debug, Clone, PartialEq)]
pub enum SearchState {
    NotSearched,
    Searching,
    ResultsReady(Vec<MovieSummary>),
    ResultsEmpty,
    Failed(String),
}

#[derive(Debug)]
struct Inner {
    query: String,
    state: SearchState,
    sequence: RequestSequence,
}

pub struct SearchViewModel {
    api: Arc<dyn OmdbApi>,
    media_type: Option<MediaType>,
    inner: Mutex<Inner>,
}

/// Keeps movies whose title contains `query`, ignoring case. Order is preserved.
pub fn filter_by_title(
    movies: impl IntoIterator<Item = MovieSummary>,
    query: &str,
) -> Vec<MovieSummary> {
    let needle = query.to_lowercase();
    movies
        .into_iter()
        .filter(|m| m.title.to_lowercase().contains(&needle))
        .collect()
}

impl SearchViewModel {
    pub fn new(api: Arc<dyn OmdbApi>, config: &OmdbConfig) -> Self {
        Self {
            api,
            media_type: config.search_media_type.clone(),
            inner: Mutex::new(Inner {
                query: String::new(),
                state: SearchState::NotSearched,
                sequence: RequestSequence::default(),
            }),
        }
    }

    pub fn state(&self) -> SearchState {
        lock(&self.inner).state.clone()
    }

    pub fn query(&self) -> String {
        lock(&self.inner).query.clone()
    }

    pub fn has_searched(&self) -> bool {
        !matches!(lock(&self.inner).state, SearchState::NotSearched)
    }

    /// Local edit only; nothing is fetched until `submit`.
    pub fn set_query(&self, text: impl Into<String>) {
        lock(&self.inner).query = text.into();
    }

    pub async fn submit(&self) {
        let (ticket, term) = {
            let mut inner = lock(&self.inner);
            let term = inner.query.trim().to_string();
            if term.is_empty() {
                return;
            }
            inner.state = SearchState::Searching;
            (inner.sequence.issue(), term)
        };

        debug!("Searching for '{}'", term);
        let outcome = self.api.search(&term, 1, self.media_type.clone()).await;

        let mut inner = lock(&self.inner);
        if !inner.sequence.is_current(ticket) {
            debug!("Discarding stale search response for '{}'", term);
            return;
        }
        inner.state = match outcome {
            QueryResult::Success(page) => {
                let matches = filter_by_title(page.movies, &term);
                info!("Search '{}' kept {} matches", term, matches.len());
                if matches.is_empty() {
                    SearchState::ResultsEmpty
                } else {
                    SearchState::ResultsReady(matches)
                }
            }
            QueryResult::NotFound => SearchState::ResultsEmpty,
            QueryResult::TransportError(message) => {
                warn!("Search '{}' failed: {}", term, message);
                SearchState::Failed(message)
            }
        };
    }

    /// Back to a blank screen; any in-flight response is ignored.
    pub fn clear(&self) {
        let mut inner = lock(&self.inner);
        inner.query.clear();
        inner.state = SearchState::NotSearched;
        inner.sequence.invalidate();
    }
}
