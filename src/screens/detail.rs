use std::sync::{Arc, Mutex};
use tracing::{debug, info, warn};

use super::lock;
use super::sequence::RequestSequence;
use crate::omdb::{MovieDetail, OmdbApi, QueryResult};

#[derive(Debug, Clone, PartialEq)]
pub enum DetailState {
    Loading,
    Found(Box<MovieDetail>),
    NotFound,
    Error(String),
}

#[derive(Debug)]
struct Inner {
    identifier: Option<String>,
    state: DetailState,
    sequence: RequestSequence,
}

pub struct DetailViewModel {
    api: Arc<dyn OmdbApi>,
    inner: Mutex<Inner>,
}

impl DetailViewModel {
    pub fn new(api: Arc<dyn OmdbApi>) -> Self {
        Self {
            api,
            inner: Mutex::new(Inner {
                identifier: None,
                state: DetailState::Loading,
                sequence: RequestSequence::default(),
            }),
        }
    }

    pub fn state(&self) -> DetailState {
        lock(&self.inner).state.clone()
    }

    pub fn identifier(&self) -> Option<String> {
        lock(&self.inner).identifier.clone()
    }

    /// Loads the record for `identifier`. Repeating the current identifier does nothing.
    pub async fn show(&self, identifier: &str) {
        let identifier = identifier.trim().to_string();
        let ticket = {
            let mut inner = lock(&self.inner);
            if inner.identifier.as_deref() == Some(identifier.as_str()) {
                return;
            }
            inner.identifier = Some(identifier.clone());
            let ticket = inner.sequence.issue();
            if identifier.is_empty() {
                inner.state = DetailState::NotFound;
                return;
            }
            inner.state = DetailState::Loading;
            ticket
        };

        debug!("Loading detail for {}", identifier);
        let outcome = self.api.by_id(&identifier).await;

        let mut inner = lock(&self.inner);
        if !inner.sequence.is_current(ticket) {
            debug!("Discarding stale detail response for {}", identifier);
            return;
        }
        inner.state = match outcome {
            QueryResult::Success(detail) if detail.is_valid() => {
                info!("Loaded '{}' ({})", detail.title, identifier);
                DetailState::Found(Box::new(detail))
            }
            QueryResult::Success(_) | QueryResult::NotFound => DetailState::NotFound,
            QueryResult::TransportError(message) => {
                warn!("Detail for {} failed: {}", identifier, message);
                DetailState::Error(message)
            }
        };
    }
}
