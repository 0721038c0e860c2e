//! Display sink that reports every update through `tracing`

use super::{DisplaySink, TargetId};
use crate::chart::ChartSpec;
use crate::threshold::Style;

/// Headless sink for monitoring a feed from a terminal
///
/// Every identifier resolves, so all configured bindings are kept.
#[derive(Debug, Clone, Default)]
pub struct LogSink;

impl LogSink {
    /// Create a log sink
    pub fn new() -> Self {
        Self
    }
}

impl DisplaySink for LogSink {
    fn resolve(&self, id: &str) -> Option<TargetId> {
        Some(TargetId::new(id))
    }

    fn set_text(&self, target: &TargetId, text: &str) {
        tracing::info!(target_id = %target, text, "display updated");
    }

    fn set_style(&self, target: &TargetId, style: &Style) {
        tracing::debug!(target_id = %target, emphasis = ?style.emphasis, color = %style.color, "style updated");
    }

    fn redraw_chart(&self, target: &TargetId, chart: &ChartSpec) {
        let points = chart
            .datasets
            .first()
            .map(|d| d.data.as_slice())
            .unwrap_or_default();
        tracing::info!(target_id = %target, ?points, "chart redrawn");
    }
}
