//! Dashboard configuration
//!
//! Stored as JSON. Describes the backend location and one entry per polled
//! feed: endpoint path, cadence, which element shows which field, threshold
//! styling and an optional rolling chart.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::chart::{ChartKind, ChartSpec, Legend, Palette};
use crate::series::RollingSeries;
use crate::snapshot::Field;
use crate::synchronizer::SeriesBinding;
use crate::threshold::ThresholdRule;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file could not be read or written
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Config file is not valid JSON
    #[error("Invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A feed polls every 0 ms
    #[error("Feed '{0}' has a zero polling interval")]
    ZeroInterval(String),

    /// A chart keeps no points
    #[error("Feed '{0}' has a chart series with zero capacity")]
    ZeroCapacity(String),

    /// Chart seed labels and values differ in length
    #[error("Feed '{feed}' chart has {labels} seed labels but {values} seed values")]
    SeedMismatch {
        /// Feed name
        feed: String,
        /// Number of seed labels
        labels: usize,
        /// Number of seed values
        values: usize,
    },

    /// Two feeds share a name
    #[error("Duplicate feed name '{0}'")]
    DuplicateFeed(String),

    #[error("Target '{target}' is written by both '{first}' and '{second}'")]
    /// Two feeds write the same element
    DuplicateTarget {
        /// Element id
        target: String,
        /// Feed that claimed it first
        first: String,
        /// Feed that claimed it again
        second: String,
    },

    #[error("Feed '{feed}' path '{path}' must start with '/'")]
    /// Endpoint path is not absolute
    InvalidPath {
        /// Feed name
        feed: String,
        /// Offending path
        path: String,
    },
}

/// Top-level dashboard configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Config version for migrations
    pub version: String,

    /// Backend root, e.g. `http://127.0.0.1:5000`
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in milliseconds
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,

    /// Polled feeds
    #[serde(default)]
    pub feeds: Vec<FeedConfig>,

    /// Where the theme preference is stored (platform config dir if unset)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferences_path: Option<PathBuf>,
}

fn default_base_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

fn default_request_timeout_ms() -> u64 {
    3000
}

/// One polled endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedConfig {
    /// Feed name used in logs
    pub name: String,

    /// Endpoint path, e.g. `/api/live-prediction`
    pub path: String,

    /// Polling interval in milliseconds
    pub interval_ms: u64,

    /// Field -> element id
    #[serde(default)]
    pub bindings: BTreeMap<Field, String>,

    /// Field -> threshold styling
    #[serde(default)]
    pub thresholds: BTreeMap<Field, ThresholdRule>,

    /// Rolling chart fed by this feed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub series: Option<SeriesConfig>,
}

impl FeedConfig {
    /// Polling interval
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    /// Element ids written by this feed
    pub fn targets(&self) -> impl Iterator<Item = &str> {
        self.bindings
            .values()
            .map(String::as_str)
            .chain(self.series.iter().map(|s| s.target.as_str()))
    }
}

/// Rolling chart settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesConfig {
    /// Field plotted on the chart
    pub field: Field,

    /// Element id of the chart
    pub target: String,

    /// Number of visible points
    #[serde(default = "default_capacity")]
    pub capacity: usize,

    /// Dataset label
    #[serde(default)]
    pub title: String,

    /// Labels of the static points shown before live data arrives
    #[serde(default)]
    pub seed_labels: Vec<String>,

    /// Values of the static points
    #[serde(default)]
    pub seed_values: Vec<f64>,

    /// Chart type
    #[serde(default = "default_chart_kind")]
    pub chart: ChartKind,

    /// Dataset colors
    #[serde(default = "default_palette")]
    pub palette: Palette,

    /// Legend placement
    #[serde(default = "default_legend")]
    pub legend: Legend,
}

fn default_capacity() -> usize {
    6
}

fn default_chart_kind() -> ChartKind {
    ChartKind::Line
}

fn default_palette() -> Palette {
    Palette::Accent
}

fn default_legend() -> Legend {
    Legend::Hidden
}

impl SeriesConfig {
    /// Seeded series for this chart
    pub fn build_series(&self) -> RollingSeries {
        RollingSeries::with_seed(self.capacity, self.seed_labels.as_slice(), &self.seed_values)
    }

    /// Chart description filled with the seed points
    pub fn build_chart(&self) -> ChartSpec {
        ChartSpec::build(self.chart, self.palette, self.legend, &self.title)
            .with_series(&self.build_series())
    }

    /// Binding handed to the synchronizer
    pub fn build_binding(&self) -> SeriesBinding {
        SeriesBinding {
            field: self.field,
            target: self.target.clone(),
            series: self.build_series(),
            chart: ChartSpec::build(self.chart, self.palette, self.legend, &self.title),
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            base_url: default_base_url(),
            request_timeout_ms: default_request_timeout_ms(),
            feeds: vec![Self::live_prediction_feed()],
            preferences_path: None,
        }
    }
}

impl DashboardConfig {
    /// Model-backed prediction feed with threshold colors and a traffic chart
    pub fn live_prediction_feed() -> FeedConfig {
        let thresholds = Field::ALL
            .into_iter()
            .filter_map(|field| ThresholdRule::default_for(field).map(|rule| (field, rule)))
            .collect();

        FeedConfig {
            name: "live-prediction".to_string(),
            path: "/api/live-prediction".to_string(),
            interval_ms: 5000,
            bindings: default_bindings(),
            thresholds,
            series: Some(SeriesConfig {
                field: Field::Traffic,
                target: "trafficChart".to_string(),
                capacity: 6,
                title: "Prediction".to_string(),
                seed_labels: ["10:00", "11:00", "12:00", "13:00", "14:00", "15:00"]
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
                seed_values: vec![1200.0, 1350.0, 1100.0, 1400.0, 1600.0, 1550.0],
                chart: ChartKind::Line,
                palette: Palette::Accent,
                legend: Legend::Hidden,
            }),
        }
    }

    /// Plain metrics feed without styling or chart
    ///
    /// Binds the same elements as the prediction feed, so the two cannot be
    /// configured together.
    pub fn metrics_feed() -> FeedConfig {
        FeedConfig {
            name: "metrics".to_string(),
            path: "/api/metrics".to_string(),
            interval_ms: 4000,
            bindings: default_bindings(),
            thresholds: BTreeMap::new(),
            series: None,
        }
    }

    /// Load configuration from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration as pretty JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Request timeout
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// Find a feed by name
    pub fn feed(&self, name: &str) -> Option<&FeedConfig> {
        self.feeds.iter().find(|f| f.name == name)
    }

    /// Check intervals, paths, chart seeds and target ownership
    ///
    /// Every element id may be written by at most one feed.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut names = HashSet::new();
        let mut owners: BTreeMap<&str, &str> = BTreeMap::new();

        for feed in &self.feeds {
            if !names.insert(feed.name.as_str()) {
                return Err(ConfigError::DuplicateFeed(feed.name.clone()));
            }
            if feed.interval_ms == 0 {
                return Err(ConfigError::ZeroInterval(feed.name.clone()));
            }
            if !feed.path.starts_with('/') {
                return Err(ConfigError::InvalidPath {
                    feed: feed.name.clone(),
                    path: feed.path.clone(),
                });
            }
            if let Some(series) = &feed.series {
                if series.capacity == 0 {
                    return Err(ConfigError::ZeroCapacity(feed.name.clone()));
                }
                if series.seed_labels.len() != series.seed_values.len() {
                    return Err(ConfigError::SeedMismatch {
                        feed: feed.name.clone(),
                        labels: series.seed_labels.len(),
                        values: series.seed_values.len(),
                    });
                }
            }

            for target in feed.targets() {
                if let Some(first) = owners.insert(target, feed.name.as_str()) {
                    return Err(ConfigError::DuplicateTarget {
                        target: target.to_string(),
                        first: first.to_string(),
                        second: feed.name.clone(),
                    });
                }
            }
        }

        Ok(())
    }
}

fn default_bindings() -> BTreeMap<Field, String> {
    BTreeMap::from([
        (Field::Traffic, "trafficValue".to_string()),
        (Field::Aqi, "aqiValue".to_string()),
        (Field::Energy, "energyValue".to_string()),
    ])
}
