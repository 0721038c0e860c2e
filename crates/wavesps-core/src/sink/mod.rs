//! Display Sinks
//!
//! Write targets for published metrics. A sink addresses its targets by
//! stable identifiers (element ids on a web page). Targets are resolved once
//! at startup into a [`BindingTable`]; fields whose target could not be
//! resolved are skipped on every publish.

mod log;
mod memory;

pub use log::LogSink;
pub use memory::{MemorySink, TargetState};

use std::collections::BTreeMap;
use std::fmt;

use crate::chart::ChartSpec;
use crate::snapshot::Field;
use crate::threshold::Style;

/// Resolved handle to a display target
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TargetId(String);

impl TargetId {
    /// Wrap an element id
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The element id
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Something that can show metric values
///
/// Writes are fire-and-forget: a sink never reports failure back to the
/// synchronizer.
pub trait DisplaySink: Send + Sync {
    /// Look up a target by identifier
    fn resolve(&self, id: &str) -> Option<TargetId>;

    /// Replace the text of a target
    fn set_text(&self, target: &TargetId, text: &str);

    /// Apply a style to a target
    fn set_style(&self, target: &TargetId, style: &Style);

    /// Redraw a chart target with new data
    fn redraw_chart(&self, target: &TargetId, chart: &ChartSpec);
}

/// Field to target mapping, built once at startup
#[derive(Debug, Clone, Default)]
pub struct BindingTable {
    targets: BTreeMap<Field, TargetId>,
}

impl BindingTable {
    /// Resolve requested `(field, element id)` pairs against a sink
    ///
    /// Unresolvable ids are dropped; updates for those fields are skipped.
    pub fn resolve<'a, I>(requests: I, sink: &dyn DisplaySink) -> Self
    where
        I: IntoIterator<Item = (Field, &'a str)>,
    {
        let mut targets = BTreeMap::new();
        for (field, id) in requests {
            match sink.resolve(id) {
                Some(target) => {
                    targets.insert(field, target);
                }
                None => {
                    tracing::debug!(%field, id, "display target not found, updates will be skipped");
                }
            }
        }
        Self { targets }
    }

    /// Target bound to a field
    pub fn get(&self, field: Field) -> Option<&TargetId> {
        self.targets.get(&field)
    }

    /// All bound fields and their targets
    pub fn iter(&self) -> impl Iterator<Item = (Field, &TargetId)> {
        self.targets.iter().map(|(field, target)| (*field, target))
    }

    /// Number of bound fields
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    /// Whether no field is bound
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binding_table_drops_missing_targets() {
        let sink = MemorySink::with_targets(["trafficValue", "aqiValue"]);
        let table = BindingTable::resolve(
            [
                (Field::Traffic, "trafficValue"),
                (Field::Aqi, "aqiValue"),
                (Field::Energy, "energyValue"),
            ],
            &sink,
        );

        assert_eq!(table.len(), 2);
        assert_eq!(table.get(Field::Traffic).unwrap().as_str(), "trafficValue");
        assert!(table.get(Field::Energy).is_none());
    }
}
