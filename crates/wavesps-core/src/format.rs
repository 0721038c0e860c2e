//! Display formatting for metric values

use crate::snapshot::{Field, MetricsSnapshot};

/// Format a number the way the dashboard shows it
///
/// Whole numbers print without a decimal point, everything else uses the
/// shortest representation that round-trips.
pub fn format_number(value: f64) -> String {
    format!("{}", value)
}

/// Format a field of a snapshot with its unit suffix, e.g. `"1450 veh/hr"`
pub fn format_value(field: Field, snapshot: &MetricsSnapshot) -> Option<String> {
    let number = match field {
        Field::Traffic => snapshot.traffic?.to_string(),
        Field::Aqi => snapshot.aqi?.to_string(),
        Field::Energy => format_number(snapshot.energy?),
    };
    Some(format!("{} {}", number, field.unit()))
}
