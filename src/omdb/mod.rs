use async_trait::async_trait;

mod client;
mod model;
mod query;

pub use client::OmdbClient;
pub use model::{
    MediaType, MovieDetail, MovieSummary, Rating, SearchPage, RESULTS_PER_PAGE,
};
pub use query::MovieQuery;

/// Outcome of one provider call. Failures are values, never panics or errors.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryResult<T> {
    Success(T),
    /// The provider answered but matched nothing.
    NotFound,
    /// Network, HTTP status or JSON failure, rendered for display.
    TransportError(String),
}

impl<T> QueryResult<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> QueryResult<U> {
        match self {
            QueryResult::Success(v) => QueryResult::Success(f(v)),
            QueryResult::NotFound => QueryResult::NotFound,
            QueryResult::TransportError(e) => QueryResult::TransportError(e),
        }
    }
}

#[async_trait]
pub trait OmdbApi: Send + Sync {
    async fn search(
        &self,
        term: &str,
        page: u32,
        media_type: Option<MediaType>,
    ) -> QueryResult<SearchPage>;
    async fn by_id(&self, identifier: &str) -> QueryResult<MovieDetail>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_keeps_failure_variants() {
        let ok: QueryResult<u32> = QueryResult::Success(2);
        assert_eq!(ok.map(|n| n * 2), QueryResult::Success(4));
        let missing: QueryResult<u32> = QueryResult::NotFound;
        assert_eq!(missing.map(|n| n * 2), QueryResult::NotFound);
        let failed: QueryResult<u32> = QueryResult::TransportError("boom".to_string());
        assert_eq!(
            failed.map(|n| n * 2),
            QueryResult::TransportError("boom".to_string())
        );
    }
}
