//! Application context
//!
//! Built once at startup from a [`DashboardConfig`] and handed to everything
//! that needs the backend: one shared HTTP client, the feed definitions and
//! the preference store location.

use std::sync::Arc;

use crate::chart::ChartSpec;
use crate::config::{DashboardConfig, FeedConfig};
use crate::error::Result;
use crate::forms::FormClient;
use crate::sink::{BindingTable, DisplaySink};
use crate::source::{DataSource, DemoSource, HttpDataSource};
use crate::synchronizer::{MetricsSynchronizer, SyncHandle};
use crate::theme::{PreferenceStore, ThemePreference};

/// Where feeds get their snapshots from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SourceMode {
    /// Poll the configured backend
    #[default]
    Http,
    /// Simulated readings, no backend needed
    Demo,
}

/// Shared application state
pub struct AppContext {
    config: DashboardConfig,
    client: reqwest::Client,
}

impl AppContext {
    /// Validate the config and build the shared HTTP client
    pub fn new(config: DashboardConfig) -> Result<Self> {
        config.validate()?;

        let client = reqwest::Client::builder()
            .user_agent(crate::USER_AGENT)
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self { config, client })
    }

    /// Validated configuration
    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// Build the synchronizer for one feed without starting it
    pub fn synchronizer(
        &self,
        feed: &FeedConfig,
        sink: Arc<dyn DisplaySink>,
        mode: SourceMode,
    ) -> MetricsSynchronizer {
        let source: Arc<dyn DataSource> = match mode {
            SourceMode::Http => Arc::new(HttpDataSource::new(
                self.client.clone(),
                &self.config.base_url,
                &feed.path,
                self.config.request_timeout(),
            )),
            SourceMode::Demo => Arc::new(DemoSource::new()),
        };

        let bindings = BindingTable::resolve(
            feed.bindings.iter().map(|(field, id)| (*field, id.as_str())),
            sink.as_ref(),
        );

        let mut sync = MetricsSynchronizer::new(feed.name.clone(), source, sink, bindings);
        for (field, rule) in &feed.thresholds {
            sync = sync.with_rule(*field, rule.clone());
        }
        if let Some(series) = &feed.series {
            sync = sync.with_series(series.build_binding());
        }
        sync
    }

    /// Start one synchronizer per configured feed
    ///
    /// Must be called from within a tokio runtime. Feeds run independently,
    /// each on its own cadence.
    pub fn start_feeds(&self, sink: Arc<dyn DisplaySink>, mode: SourceMode) -> Vec<SyncHandle> {
        self.config
            .feeds
            .iter()
            .map(|feed| {
                self.synchronizer(feed, Arc::clone(&sink), mode)
                    .start(feed.interval())
            })
            .collect()
    }

    /// Form client on the shared HTTP client
    pub fn forms(&self) -> FormClient {
        FormClient::new(
            self.client.clone(),
            self.config.base_url.clone(),
            self.config.request_timeout(),
        )
    }

    /// Initial chart descriptions, keyed by element id
    pub fn charts(&self) -> Vec<(String, ChartSpec)> {
        self.config
            .feeds
            .iter()
            .filter_map(|feed| feed.series.as_ref())
            .map(|series| (series.target.clone(), series.build_chart()))
            .collect()
    }

    /// Open the preference store
    pub fn preferences(&self) -> Result<PreferenceStore> {
        let path = match &self.config.preferences_path {
            Some(path) => path.clone(),
            None => ThemePreference::default_path()?,
        };
        Ok(PreferenceStore::load(path)?)
    }
}
