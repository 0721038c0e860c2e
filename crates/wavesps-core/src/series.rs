//! Rolling chart series
//!
//! Fixed-capacity FIFO buffer backing a time-series chart. Each new point
//! evicts the oldest one once the series is full.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// A single chart point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    /// X-axis label (e.g. "14:00")
    pub label: String,
    /// Y value
    pub value: f64,
}

/// Bounded series of the most recent points, oldest first
#[derive(Debug, Clone)]
pub struct RollingSeries {
    capacity: usize,
    points: VecDeque<SeriesPoint>,
}

impl RollingSeries {
    /// Create an empty series (capacity is at least 1)
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            points: VecDeque::with_capacity(capacity),
        }
    }

    /// Create a series pre-filled with seed points
    ///
    /// Labels and values are paired up; extra entries on either side are ignored.
    pub fn with_seed<L: AsRef<str>>(capacity: usize, labels: &[L], values: &[f64]) -> Self {
        let mut series = Self::new(capacity);
        for (label, value) in labels.iter().zip(values) {
            series.push(label.as_ref(), *value);
        }
        series
    }

    /// Append a point, evicting the oldest if the series is full
    pub fn push(&mut self, label: impl Into<String>, value: f64) {
        if self.points.len() >= self.capacity {
            self.points.pop_front();
        }
        self.points.push_back(SeriesPoint {
            label: label.into(),
            value,
        });
    }

    /// Maximum number of points kept
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of points
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the series has no points
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Points in arrival order
    pub fn points(&self) -> impl Iterator<Item = &SeriesPoint> {
        self.points.iter()
    }

    /// Values in arrival order
    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }

    /// Labels in arrival order
    pub fn labels(&self) -> Vec<String> {
        self.points.iter().map(|p| p.label.clone()).collect()
    }

    /// Most recent point
    pub fn latest(&self) -> Option<&SeriesPoint> {
        self.points.back()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_below_capacity() {
        let mut series = RollingSeries::new(6);
        series.push("10:00", 1200.0);
        series.push("11:00", 1350.0);

        assert_eq!(series.len(), 2);
        assert_eq!(series.values(), vec![1200.0, 1350.0]);
    }

    #[test]
    fn test_evicts_oldest_at_capacity() {
        let mut series = RollingSeries::new(3);
        for i in 0..10 {
            series.push(format!("t{}", i), i as f64);
            assert!(series.len() <= 3);
        }

        assert_eq!(series.values(), vec![7.0, 8.0, 9.0]);
        assert_eq!(series.labels(), vec!["t7", "t8", "t9"]);
        assert_eq!(series.latest().unwrap().value, 9.0);
    }

    #[test]
    fn test_seed_keeps_last_points() {
        let labels = ["10:00", "11:00", "12:00", "13:00"];
        let series = RollingSeries::with_seed(3, &labels, &[1.0, 2.0, 3.0, 4.0]);

        assert_eq!(series.values(), vec![2.0, 3.0, 4.0]);
        assert_eq!(series.labels(), vec!["11:00", "12:00", "13:00"]);
    }

    #[test]
    fn test_zero_capacity_is_clamped() {
        let mut series = RollingSeries::new(0);
        series.push("a", 1.0);
        series.push("b", 2.0);

        assert_eq!(series.capacity(), 1);
        assert_eq!(series.values(), vec![2.0]);
    }
}
