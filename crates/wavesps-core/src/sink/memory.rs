//! In-memory display sink
//!
//! Keeps the latest text, style and chart of every known target. Clones share
//! the same state, so a test can hand one clone to a synchronizer and inspect
//! the other.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::{DisplaySink, TargetId};
use crate::chart::ChartSpec;
use crate::threshold::Style;

/// Current contents of one target
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TargetState {
    /// Latest text
    pub text: Option<String>,
    /// Latest style
    pub style: Option<Style>,
    /// Latest chart
    pub chart: Option<ChartSpec>,
    /// Number of writes of any kind
    pub writes: u64,
}

#[derive(Debug, Default)]
struct Inner {
    known: BTreeSet<String>,
    targets: BTreeMap<String, TargetState>,
}

/// Shared in-memory sink
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    inner: Arc<Mutex<Inner>>,
}

impl MemorySink {
    /// Create a sink that knows the given element ids
    pub fn with_targets<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let known = ids.into_iter().map(Into::into).collect();
        Self {
            inner: Arc::new(Mutex::new(Inner {
                known,
                targets: BTreeMap::new(),
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Snapshot of a target's state
    pub fn target(&self, id: &str) -> TargetState {
        self.lock().targets.get(id).cloned().unwrap_or_default()
    }

    /// Latest text of a target
    pub fn text(&self, id: &str) -> Option<String> {
        self.target(id).text
    }

    /// Latest style of a target
    pub fn style(&self, id: &str) -> Option<Style> {
        self.target(id).style
    }

    /// Latest chart drawn on a target
    pub fn chart(&self, id: &str) -> Option<ChartSpec> {
        self.target(id).chart
    }

    /// Total writes across all targets
    pub fn total_writes(&self) -> u64 {
        self.lock().targets.values().map(|t| t.writes).sum()
    }

    fn update<F: FnOnce(&mut TargetState)>(&self, target: &TargetId, f: F) {
        let mut inner = self.lock();
        let state = inner
            .targets
            .entry(target.as_str().to_string())
            .or_default();
        f(state);
        state.writes += 1;
    }
}

impl DisplaySink for MemorySink {
    fn resolve(&self, id: &str) -> Option<TargetId> {
        self.lock().known.contains(id).then(|| TargetId::new(id))
    }

    fn set_text(&self, target: &TargetId, text: &str) {
        self.update(target, |state| state.text = Some(text.to_string()));
    }

    fn set_style(&self, target: &TargetId, style: &Style) {
        self.update(target, |state| state.style = Some(style.clone()));
    }

    fn redraw_chart(&self, target: &TargetId, chart: &ChartSpec) {
        self.update(target, |state| state.chart = Some(chart.clone()));
    }
}
