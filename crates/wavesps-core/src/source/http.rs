//! HTTP JSON data source

use async_trait::async_trait;
use std::time::Duration;

use super::{DataSource, SourceError};
use crate::snapshot::MetricsSnapshot;

/// Default per-request timeout
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(3);

/// Fetches snapshots with an HTTP GET to a fixed URL
pub struct HttpDataSource {
    /// HTTP client, usually shared with other feeds
    client: reqwest::Client,
    url: String,
    timeout: Duration,
}

impl HttpDataSource {
    /// Create a source for `base_url` + `path` on an existing client
    pub fn new(client: reqwest::Client, base_url: &str, path: &str, timeout: Duration) -> Self {
        Self {
            client,
            url: join_url(base_url, path),
            timeout,
        }
    }

    /// Create a source with its own client
    pub fn from_url(url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(crate::USER_AGENT)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            url: url.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Full endpoint URL
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl DataSource for HttpDataSource {
    async fn fetch(&self) -> Result<MetricsSnapshot, SourceError> {
        let response = self
            .client
            .get(&self.url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(SourceError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status(status.as_u16()));
        }

        let body = response.bytes().await.map_err(SourceError::Transport)?;
        MetricsSnapshot::from_json(&body).map_err(SourceError::Decode)
    }

    fn describe(&self) -> String {
        self.url().to_string()
    }
}

/// Join a base URL and an absolute path without doubling the slash
pub(crate) fn join_url(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
