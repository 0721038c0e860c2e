//! Metrics Snapshot
//!
//! One JSON record fetched from a metrics endpoint. Every field is optional:
//! a feed may report only a subset of the readings and the synchronizer
//! publishes whatever is present.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A displayable metrics field
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    /// Vehicles per hour
    Traffic,
    /// Air quality index
    Aqi,
    /// Grid load in megawatts
    Energy,
}

impl Field {
    /// All displayable fields, in publishing order
    pub const ALL: [Field; 3] = [Field::Traffic, Field::Aqi, Field::Energy];

    /// Unit suffix shown after the value
    pub fn unit(&self) -> &'static str {
        match self {
            Field::Traffic => "veh/hr",
            Field::Aqi => "AQI",
            Field::Energy => "MW",
        }
    }

    /// JSON key of the field
    pub fn key(&self) -> &'static str {
        match self {
            Field::Traffic => "traffic",
            Field::Aqi => "aqi",
            Field::Energy => "energy",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// One fetched reading of the city sensors
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    /// Traffic density in vehicles/hour
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub traffic: Option<i64>,

    /// Air quality index
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aqi: Option<i64>,

    /// Energy load in megawatts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub energy: Option<f64>,

    /// Hour of day the prediction refers to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hour: Option<u32>,

    /// Feed label reported by the backend (e.g. "AI Live")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl MetricsSnapshot {
    /// Decode a snapshot from a JSON body
    ///
    /// Unknown keys are ignored; a field of the wrong type is an error.
    pub fn from_json(body: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(body)
    }

    /// Get a field as a number, if present
    pub fn value(&self, field: Field) -> Option<f64> {
        match field {
            Field::Traffic => self.traffic.map(|v| v as f64),
            Field::Aqi => self.aqi.map(|v| v as f64),
            Field::Energy => self.energy,
        }
    }

    /// Fields present in this snapshot
    pub fn present_fields(&self) -> impl Iterator<Item = Field> + '_ {
        Field::ALL
            .into_iter()
            .filter(move |field| self.value(*field).is_some())
    }
}
