//! Demo Mode - simulated city sensor readings
//!
//! Generates plausible snapshots for UI testing without a running backend:
//! moderate traffic, good air quality and a steady grid load.

use async_trait::async_trait;
use chrono::Timelike;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::{Mutex, PoisonError};

use super::{DataSource, SourceError};
use crate::snapshot::MetricsSnapshot;

/// Simulated data source
pub struct DemoSource {
    /// Random number generator (shared across fetches)
    rng: Mutex<StdRng>,
}

impl Default for DemoSource {
    fn default() -> Self {
        Self::new()
    }
}

impl DemoSource {
    /// Create a demo source seeded from entropy
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Create a deterministic demo source
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// Generate one snapshot
    pub fn generate(&self) -> MetricsSnapshot {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);

        let traffic = rng.gen_range(1000..1500);
        let aqi = rng.gen_range(50..100);
        // One decimal, like the grid telemetry
        let energy = (rng.gen_range(50.0..60.0_f64) * 10.0).round() / 10.0;

        MetricsSnapshot {
            traffic: Some(traffic),
            aqi: Some(aqi),
            energy: Some(energy),
            hour: Some(chrono::Local::now().hour()),
            status: Some("Demo".to_string()),
        }
    }
}

#[async_trait]
impl DataSource for DemoSource {
    async fn fetch(&self) -> Result<MetricsSnapshot, SourceError> {
        Ok(self.generate())
    }

    fn describe(&self) -> String {
        "demo".to_string()
    }
}
