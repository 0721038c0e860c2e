//! Metrics Synchronizer
//!
//! Keeps display targets approximately consistent with a remote data source.
//! Each cycle fetches one snapshot and publishes every present field to its
//! bound target. A failed cycle is logged and dropped; the timer keeps going
//! and the targets keep their previous values.
//!
//! ## Usage
//!
//! ```ignore
//! let sink = Arc::new(MemorySink::with_targets(["trafficValue", "aqiValue"]));
//! let source = Arc::new(HttpDataSource::from_url("http://127.0.0.1:5000/api/metrics"));
//! let bindings = BindingTable::resolve(
//!     [(Field::Traffic, "trafficValue"), (Field::Aqi, "aqiValue")],
//!     sink.as_ref(),
//! );
//!
//! let handle = MetricsSynchronizer::new("metrics", source, sink, bindings)
//!     .with_styling_defaults()
//!     .start(Duration::from_millis(4000));
//!
//! // ... later
//! handle.shutdown().await;
//! ```

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::chart::ChartSpec;
use crate::format::format_value;
use crate::series::RollingSeries;
use crate::sink::{BindingTable, DisplaySink, TargetId};
use crate::snapshot::{Field, MetricsSnapshot};
use crate::source::DataSource;
use crate::threshold::ThresholdRule;

/// Shortest accepted polling interval
const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// Result of one fetch-and-publish cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Snapshot fetched; `fields` targets received new text
    Published {
        /// Number of targets written
        fields: usize,
    },
    /// Fetch or decode failed; nothing was written
    Failed,
}

/// Chart fed by one field of every snapshot
#[derive(Debug, Clone)]
pub struct SeriesBinding {
    /// Plotted field
    pub field: Field,
    /// Element id of the chart
    pub target: String,
    /// Initial points
    pub series: RollingSeries,
    /// Chart options
    pub chart: ChartSpec,
}

struct ActiveSeries {
    field: Field,
    target: Option<TargetId>,
    series: RollingSeries,
    chart: ChartSpec,
}

/// Polls one data source and publishes to one display sink
pub struct MetricsSynchronizer {
    name: String,
    source: Arc<dyn DataSource>,
    sink: Arc<dyn DisplaySink>,
    bindings: BindingTable,
    rules: BTreeMap<Field, ThresholdRule>,
    series: Option<ActiveSeries>,
}

impl MetricsSynchronizer {
    /// Create a synchronizer for one feed
    pub fn new(
        name: impl Into<String>,
        source: Arc<dyn DataSource>,
        sink: Arc<dyn DisplaySink>,
        bindings: BindingTable,
    ) -> Self {
        Self {
            name: name.into(),
            source,
            sink,
            bindings,
            rules: BTreeMap::new(),
            series: None,
        }
    }

    /// Style a field by threshold
    pub fn with_rule(mut self, field: Field, rule: ThresholdRule) -> Self {
        self.rules.insert(field, rule);
        self
    }

    /// Apply the default threshold rules for traffic and AQI
    pub fn with_styling_defaults(mut self) -> Self {
        for field in Field::ALL {
            if let Some(rule) = ThresholdRule::default_for(field) {
                self.rules.insert(field, rule);
            }
        }
        self
    }

    /// Feed a rolling chart from one field
    ///
    /// The chart target is resolved now; if it is missing the series is still
    /// maintained but never drawn.
    pub fn with_series(mut self, binding: SeriesBinding) -> Self {
        let target = self.sink.resolve(&binding.target);
        if target.is_none() {
            tracing::debug!(feed = %self.name, id = %binding.target, "chart target not found, redraws will be skipped");
        }
        let chart = binding.chart.with_series(&binding.series);
        self.series = Some(ActiveSeries {
            field: binding.field,
            target,
            series: binding.series,
            chart,
        });
        self
    }

    /// Feed name used in logs
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current chart series, if one is bound
    pub fn series(&self) -> Option<&RollingSeries> {
        self.series.as_ref().map(|s| &s.series)
    }

    /// Run one fetch-and-publish cycle
    ///
    /// Never fails: errors are logged and reported as [`CycleOutcome::Failed`].
    pub async fn run_cycle(&mut self) -> CycleOutcome {
        match self.source.fetch().await {
            Ok(snapshot) => {
                let fields = self.publish(&snapshot);
                tracing::debug!(
                    feed = %self.name,
                    fields,
                    hour = ?snapshot.hour,
                    status = ?snapshot.status,
                    "metrics published"
                );
                CycleOutcome::Published { fields }
            }
            Err(e) => {
                tracing::warn!(
                    feed = %self.name,
                    url = %self.source.describe(),
                    error = %e,
                    "metrics cycle failed"
                );
                CycleOutcome::Failed
            }
        }
    }

    fn publish(&mut self, snapshot: &MetricsSnapshot) -> usize {
        let mut published = 0;

        for (field, target) in self.bindings.iter() {
            let Some(text) = format_value(field, snapshot) else {
                continue;
            };
            self.sink.set_text(target, &text);

            if let (Some(rule), Some(value)) = (self.rules.get(&field), snapshot.value(field)) {
                self.sink.set_style(target, &rule.style(value));
            }
            published += 1;
        }

        // Push before redraw so the chart always shows the latest window
        if let Some(active) = self.series.as_mut() {
            if let Some(value) = snapshot.value(active.field) {
                active.series.push(point_label(snapshot), value);
                active.chart.update_from(&active.series);
                if let Some(target) = &active.target {
                    self.sink.redraw_chart(target, &active.chart);
                }
            }
        }

        published
    }

    /// Run one cycle now, then repeat every `interval` until stopped
    ///
    /// Cycles never overlap: a slow fetch delays the next tick instead of
    /// stacking up missed ones.
    pub fn start(mut self, interval: Duration) -> SyncHandle {
        let interval = interval.max(MIN_INTERVAL);
        let cancel = CancellationToken::new();
        let stats = Arc::new(SyncStats::default());
        let name = self.name.clone();

        let token = cancel.clone();
        let counters = Arc::clone(&stats);

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            tracing::info!(
                feed = %self.name,
                url = %self.source.describe(),
                interval_ms = interval.as_millis() as u64,
                "metrics synchronizer started"
            );

            loop {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => break,
                    _ = ticker.tick() => {}
                }

                let outcome = tokio::select! {
                    biased;
                    _ = token.cancelled() => break,
                    outcome = self.run_cycle() => outcome,
                };
                counters.record(outcome);
            }

            tracing::info!(feed = %self.name, "metrics synchronizer stopped");
        });

        SyncHandle {
            name,
            cancel,
            task: Some(task),
            stats,
        }
    }
}

/// Label for a new chart point
fn point_label(snapshot: &MetricsSnapshot) -> String {
    match snapshot.hour {
        Some(hour) => format!("{:02}:00", hour),
        None => chrono::Local::now().format("%H:%M:%S").to_string(),
    }
}

/// Cycle counters of a running synchronizer
#[derive(Debug, Default)]
struct SyncStats {
    succeeded: AtomicU64,
    failed: AtomicU64,
}

impl SyncStats {
    fn record(&self, outcome: CycleOutcome) {
        let counter = match outcome {
            CycleOutcome::Published { .. } => &self.succeeded,
            CycleOutcome::Failed => &self.failed,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }
}

/// Point-in-time copy of the cycle counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleStats {
    /// Cycles that published a snapshot
    pub succeeded: u64,
    /// Cycles whose fetch failed
    pub failed: u64,
}

impl CycleStats {
    /// Total cycles run
    pub fn total(&self) -> u64 {
        self.succeeded + self.failed
    }
}

/// Owner of a running synchronizer
///
/// Dropping the handle stops the polling loop.
pub struct SyncHandle {
    name: String,
    cancel: CancellationToken,
    task: Option<JoinHandle<()>>,
    stats: Arc<SyncStats>,
}

impl SyncHandle {
    /// Feed name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Request the loop to stop (also aborts an in-flight fetch)
    pub fn stop(&self) {
        self.cancel.cancel();
    }

    /// Stop the loop and wait for it to exit
    pub async fn shutdown(mut self) {
        self.cancel.cancel();
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                tracing::warn!(feed = %self.name, error = %e, "metrics synchronizer task ended abnormally");
            }
        }
    }

    /// Whether the loop is still running
    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Cycle counters so far
    pub fn stats(&self) -> CycleStats {
        CycleStats {
            succeeded: self.stats.succeeded.load(Ordering::Relaxed),
            failed: self.stats.failed.load(Ordering::Relaxed),
        }
    }
}

impl Drop for SyncHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
