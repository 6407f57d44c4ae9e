//! TMDB v3 HTTP client.

use super::MetadataProvider;
use async_trait::async_trait;
use reelcache_config::ProviderConfig;
use reelcache_core::{MovieRecord, MovieSummary, ReelError, ReelResult};
use reqwest::{Client, Response, StatusCode, Url};
use serde_json::Value;
use shaku::Component;
use std::time::Duration;
use tracing::{debug, warn};

/// HTTP client for The Movie Database API.
#[derive(Component)]
#[shaku(interface = MetadataProvider)]
pub struct TmdbClient {
    client: Client,
    base_url: String,
    api_key: String,
    language: String,
}

impl TmdbClient {
    /// Creates a client from the provider configuration.
    pub fn new(config: &ProviderConfig) -> ReelResult<Self> {
        Ok(Self {
            client: build_client(config.request_timeout())?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            language: config.language.clone(),
        })
    }

    /// Points the client at another server, e.g. a local mock.
    #[must_use]
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Replaces the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> ReelResult<Self> {
        self.client = build_client(timeout)?;
        Ok(self)
    }

    /// Converts the client into shaku component parameters.
    #[must_use]
    pub fn into_parameters(self) -> TmdbClientParameters {
        TmdbClientParameters {
            client: self.client,
            base_url: self.base_url,
            api_key: self.api_key,
            language: self.language,
        }
    }

    /// Appends `segments` to the base URL, each as one percent-encoded segment.
    fn url(&self, segments: &[&str]) -> ReelResult<Url> {
        let mut url = Url::parse(&self.base_url).map_err(|e| {
            ReelError::Configuration(format!("Invalid provider base URL '{}': {}", self.base_url, e))
        })?;
        url.path_segments_mut()
            .map_err(|()| {
                ReelError::Configuration(format!(
                    "Provider base URL '{}' cannot carry a path",
                    self.base_url
                ))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get(&self, segments: &[&str], extra: &[(&str, &str)]) -> ReelResult<Response> {
        let url = self.url(segments)?;
        let path = url.path().to_string();
        let response = self
            .client
            .get(url)
            .query(&[("api_key", self.api_key.as_str()), ("language", self.language.as_str())])
            .query(extra)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if status != StatusCode::OK {
            warn!("Provider returned {} for {}", status, path);
            return Err(ReelError::provider(
                Some(status.as_u16()),
                format!("Provider returned {} for {}", status, path),
            ));
        }

        Ok(response)
    }
}

impl std::fmt::Debug for TmdbClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TmdbClient")
            .field("base_url", &self.base_url)
            .field("language", &self.language)
            .finish_non_exhaustive()
    }
}

fn build_client(timeout: Duration) -> ReelResult<Client> {
    Client::builder()
        .timeout(timeout)
        .pool_idle_timeout(Duration::from_secs(90))
        .build()
        .map_err(|e| ReelError::Internal(format!("Failed to create HTTP client: {}", e)))
}

fn transport_error(err: reqwest::Error) -> ReelError {
    if err.is_timeout() {
        ReelError::Timeout(format!("Provider request timed out: {}", err))
    } else {
        ReelError::provider(err.status().map(|s| s.as_u16()), format!("HTTP error: {}", err))
    }
}

#[async_trait]
impl MetadataProvider for TmdbClient {
    async fn fetch_details(&self, movie_id: &str) -> ReelResult<MovieRecord> {
        debug!("Fetching details for movie {}", movie_id);

        let response = self.get(&["movie", movie_id], &[]).await?;
        let body = response.text().await.map_err(transport_error)?;

        let value: Value = serde_json::from_str(&body)?;
        MovieRecord::try_from(value)
    }

    async fn fetch_popular(&self) -> ReelResult<Vec<MovieSummary>> {
        debug!("Fetching popular movies");

        let response = self.get(&["movie", "popular"], &[("page", "1")]).await?;
        let body = response.text().await.map_err(transport_error)?;
        let value: Value = serde_json::from_str(&body)?;

        let movies = value
            .get("results")
            .and_then(Value::as_array)
            .map(|results| results.iter().filter_map(MovieSummary::from_listing).collect())
            .unwrap_or_default();

        Ok(movies)
    }
}
