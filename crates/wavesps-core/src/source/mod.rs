//! Metrics Data Sources
//!
//! A data source produces one [`MetricsSnapshot`] per call. The HTTP source
//! talks to the dashboard backend; the demo source simulates readings for
//! running without one.

mod demo;
mod http;

pub use demo::DemoSource;
pub use http::HttpDataSource;
pub(crate) use http::join_url;

use async_trait::async_trait;
use thiserror::Error;

use crate::snapshot::MetricsSnapshot;

/// Errors that can occur while fetching a snapshot
#[derive(Error, Debug)]
pub enum SourceError {
    /// Connection, timeout or body read failure
    #[error("Transport error: {0}")]
    Transport(#[source] reqwest::Error),

    /// Non-success HTTP status
    #[error("Endpoint returned HTTP {0}")]
    Status(u16),

    /// Body is not a valid snapshot
    #[error("Malformed snapshot: {0}")]
    Decode(#[source] serde_json::Error),
}

/// Provider of metrics snapshots
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Fetch the latest snapshot
    async fn fetch(&self) -> Result<MetricsSnapshot, SourceError>;

    /// Human readable description for logs (usually the URL)
    fn describe(&self) -> String;
}
