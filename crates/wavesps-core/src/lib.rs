//! # WaveSPS Core Library
//!
//! Live metrics synchronization for the WaveSPS smart city dashboard.

#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

//!
//! This library provides:
//! - Polling of metrics endpoints on a fixed cadence ([`synchronizer`])
//! - Publishing of traffic, air quality and energy readings to display targets
//! - Threshold-based emphasis and rolling chart series
//! - Dashboard configuration, theme preference and form submission helpers
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use wavesps_core::prelude::*;
//!
//! let ctx = AppContext::new(DashboardConfig::default())?;
//! let sink = Arc::new(MemorySink::with_targets(["trafficValue", "aqiValue", "energyValue"]));
//!
//! // One synchronizer per configured feed, each on its own timer
//! let handles = ctx.start_feeds(sink.clone(), SourceMode::Http);
//!
//! // ... later
//! for handle in handles {
//!     handle.shutdown().await;
//! }
//! ```

pub mod chart;
pub mod config;
pub mod context;
pub mod error;
pub mod format;
pub mod forms;
pub mod series;
pub mod sink;
pub mod snapshot;
pub mod source;
pub mod synchronizer;
pub mod theme;
pub mod threshold;

pub use error::{Error, Result};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::chart::{ChartKind, ChartSpec, Legend, Palette};
    pub use crate::config::{DashboardConfig, FeedConfig, SeriesConfig};
    pub use crate::context::{AppContext, SourceMode};
    pub use crate::forms::{ContactRequest, FormClient, FormOutcome, LoginRequest, SignupRequest};
    pub use crate::series::RollingSeries;
    pub use crate::sink::{BindingTable, DisplaySink, LogSink, MemorySink, TargetId};
    pub use crate::snapshot::{Field, MetricsSnapshot};
    pub use crate::source::{DataSource, DemoSource, HttpDataSource, SourceError};
    pub use crate::synchronizer::{CycleOutcome, MetricsSynchronizer, SeriesBinding, SyncHandle};
    pub use crate::theme::{PreferenceStore, Theme, ThemePreference};
    pub use crate::threshold::{Emphasis, Style, ThresholdRule};
}

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// User agent sent with every request
pub const USER_AGENT: &str = concat!("WaveSPS/", env!("CARGO_PKG_VERSION"));
