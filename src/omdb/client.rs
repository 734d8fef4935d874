use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use super::model::{Envelope, SearchEnvelope};
use super::{MediaType, MovieDetail, MovieQuery, OmdbApi, QueryResult, SearchPage};
use crate::config::OmdbConfig;

#[derive(Debug, Clone)]
pub struct OmdbClient {
    client: Client,
    config: OmdbConfig,
}

impl OmdbClient {
    pub fn new(config: OmdbConfig) -> Result<Self> {
        let user_agent = format!("cinescope/{}", env!("CARGO_PKG_VERSION"));
        let client = Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.timeout)
            .user_agent(user_agent)
            .build()
            .context("Failed to build OMDb HTTP client")?;
        Ok(Self { client, config })
    }

    pub fn from_env() -> Result<Self> {
        Self::new(OmdbConfig::from_env()?)
    }

    pub fn config(&self) -> &OmdbConfig {
        &self.config
    }

    /// Runs one request. `None` means the provider reported no match.
    pub async fn execute<T: DeserializeOwned>(&self, query: &MovieQuery) -> QueryResult<T> {
        match self.fetch(query).await {
            Ok(Some(v)) => QueryResult::Success(v),
            Ok(None) => QueryResult::NotFound,
            Err(e) => {
                warn!("OMDb request failed: {:#}", e);
                QueryResult::TransportError(format!("{:#}", e))
            }
        }
    }

    async fn fetch<T: DeserializeOwned>(&self, query: &MovieQuery) -> Result<Option<T>> {
        query.validate().context("refusing to send request")?;
        let value = self.get_json(&self.url_for(query)).await?;
        let envelope: Envelope = serde_json::from_value(value.clone())
            .context("OMDb response has no Response flag")?;
        if !envelope.response {
            debug!(
                "OMDb reported no match: {}",
                envelope.error.as_deref().unwrap_or("no error message")
            );
            return Ok(None);
        }
        let parsed = serde_json::from_value(value).context("JSON parse failed")?;
        Ok(Some(parsed))
    }

    fn url_for(&self, query: &MovieQuery) -> String {
        let base = self.config.base_url.trim_end_matches('?');
        format!("{base}?{}", query.to_query_string(&self.config.api_key))
    }

    async fn get_json(&self, url: &str) -> Result<Value> {
        debug!("GET {}", redact_key(url));
        let res = self
            .client
            .get(url)
            .send()
            .await
            .context("request failed")?;
        let status = res.status();
        let text = res.text().await.context("reading body failed")?;
        if !status.is_success() {
            return Err(anyhow!("OMDb HTTP error (status {}): {}", status, text));
        }
        let parsed: Value = serde_json::from_str(&text).context("JSON parse failed")?;
        Ok(parsed)
    }
}

#[async_trait]
impl OmdbApi for OmdbClient {
    async fn search(
        &self,
        term: &str,
        page: u32,
        media_type: Option<MediaType>,
    ) -> QueryResult<SearchPage> {
        let query = MovieQuery::search(term, page).with_media_type(media_type);
        self.execute::<SearchEnvelope>(&query)
            .await
            .map(SearchEnvelope::into_page)
    }

    async fn by_id(&self, identifier: &str) -> QueryResult<MovieDetail> {
        let query = MovieQuery::by_id(identifier);
        self.execute::<MovieDetail>(&query).await
    }
}

fn redact_key(url: &str) -> String {
    let Some(start) = url.find("apikey=") else {
        return url.to_string();
    };
    let value_start = start + "apikey=".len();
    let value_end = url[value_start..]
        .find('&')
        .map(|i| value_start + i)
        .unwrap_or(url.len());
    format!("{}***{}", &url[..value_start], &url[value_end..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_base_and_query() {
        let client = OmdbClient::new(OmdbConfig::new("abc").with_base_url("http://localhost:1/"))
            .expect("client");
        assert_eq!(
            client.url_for(&MovieQuery::by_id("tt1")),
            "http://localhost:1/?apikey=abc&i=tt1"
        );
    }

    #[test]
    fn api_key_is_redacted_in_logs() {
        assert_eq!(
            redact_key("https://x/?apikey=secret&s=batman"),
            "https://x/?apikey=***&s=batman"
        );
        assert_eq!(redact_key("https://x/?i=tt1&apikey=secret"), "https://x/?i=tt1&apikey=***");
        assert_eq!(redact_key("https://x/"), "https://x/");
    }

    #[tokio::test]
    async fn invalid_request_never_reaches_the_network() {
        // Port 9 is discard; a real request would fail with a connect error instead.
        let client = OmdbClient::new(OmdbConfig::new("abc").with_base_url("http://127.0.0.1:9/"))
            .expect("client");
        match client.search("   ", 1, None).await {
            QueryResult::TransportError(msg) => {
                assert!(msg.contains("search term must not be empty"), "{msg}")
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
