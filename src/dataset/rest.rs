//! Hosted table source
//!
//! Talks to a PostgREST-style endpoint (`{url}/rest/v1/{table}`) with an API
//! key sent both as `apikey` and as a bearer token. Configuration is
//! validated when the source is built, so a missing credential is an error
//! value rather than a request that fails later.

use super::{DatasetSource, LoadError, SourceConfigError};
use crate::models::Destination;
use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::{Client, Url};
use serde::Serialize;
use tracing::{debug, warn};

/// Default table holding the catalog
pub const DEFAULT_TABLE: &str = "destinations";

/// Validated endpoint settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestSourceConfig {
    base_url: Url,
    api_key: String,
    table: String,
}

impl RestSourceConfig {
    /// Validate raw endpoint settings
    ///
    /// # Errors
    ///
    /// Returns `SourceConfigError` if the URL is missing or not an absolute
    /// http(s) URL, the API key is missing or blank, or the table is blank.
    pub fn new(
        url: Option<&str>,
        api_key: Option<&str>,
        table: &str,
    ) -> Result<Self, SourceConfigError> {
        let url = url
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .ok_or(SourceConfigError::MissingUrl)?;

        let base_url = Url::parse(url)
            .map_err(|e| SourceConfigError::InvalidUrl(url.to_string(), e.to_string()))?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(SourceConfigError::InvalidUrl(
                url.to_string(),
                format!("unsupported scheme '{}'", base_url.scheme()),
            ));
        }

        let api_key = api_key
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or(SourceConfigError::MissingApiKey)?
            .to_string();

        let table = table.trim();
        if table.is_empty() {
            return Err(SourceConfigError::MissingTable);
        }

        Ok(Self {
            base_url,
            api_key,
            table: table.to_string(),
        })
    }

    /// Endpoint of the table
    ///
    /// # Errors
    ///
    /// Returns `SourceConfigError::InvalidUrl` if the table path cannot be joined.
    pub fn table_url(&self) -> Result<Url, SourceConfigError> {
        let mut base = self.base_url.clone();
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        base.join(&format!("rest/v1/{}", self.table))
            .map_err(|e| SourceConfigError::InvalidUrl(self.base_url.to_string(), e.to_string()))
    }

    fn headers(&self) -> Result<HeaderMap, SourceConfigError> {
        let key = HeaderValue::from_str(&self.api_key)
            .map_err(|e| SourceConfigError::Client(format!("invalid API key header: {e}")))?;
        let bearer = HeaderValue::from_str(&format!("Bearer {}", self.api_key))
            .map_err(|e| SourceConfigError::Client(format!("invalid API key header: {e}")))?;

        let mut headers = HeaderMap::new();
        headers.insert("apikey", key);
        headers.insert(AUTHORIZATION, bearer);
        Ok(headers)
    }
}

/// Dataset read from a hosted table
#[derive(Debug, Clone)]
pub struct RestSource {
    client: Client,
    endpoint: Url,
}

impl RestSource {
    /// Build a source with an HTTP client carrying the credential headers
    ///
    /// # Errors
    ///
    /// Returns `SourceConfigError` if the endpoint cannot be formed or the
    /// client cannot be created.
    pub fn new(config: &RestSourceConfig) -> Result<Self, SourceConfigError> {
        let endpoint = config.table_url()?;
        let client = Client::builder()
            .default_headers(config.headers()?)
            .build()
            .map_err(|e| SourceConfigError::Client(e.to_string()))?;

        Ok(Self { client, endpoint })
    }

    #[must_use]
    pub const fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Insert or update rows in the table
    ///
    /// Returns the number of rows the endpoint echoed back.
    ///
    /// # Errors
    ///
    /// Returns `LoadError` on transport failure or a non-success status.
    pub async fn upsert<T: Serialize + Sync>(&self, rows: &[T]) -> Result<usize, LoadError> {
        if rows.is_empty() {
            warn!("No rows to upload, skipping upsert");
            return Ok(0);
        }

        debug!(endpoint = %self.endpoint, count = rows.len(), "Upserting rows");
        let response = self
            .client
            .post(self.endpoint.clone())
            .header("Prefer", "resolution=merge-duplicates,return=representation")
            .json(rows)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LoadError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let echoed: Vec<serde_json::Value> = response.json().await.unwrap_or_default();
        Ok(echoed.len())
    }
}

#[async_trait]
impl DatasetSource for RestSource {
    fn describe(&self) -> String {
        format!("endpoint {}", self.endpoint)
    }

    async fn fetch(&self) -> Result<Vec<Destination>, LoadError> {
        let response = self
            .client
            .get(self.endpoint.clone())
            .query(&[("select", "*")])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LoadError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json().await?)
    }
}
