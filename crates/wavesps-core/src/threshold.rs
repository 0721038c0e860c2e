//! Threshold styling
//!
//! A published value above its field's threshold is drawn with high emphasis.
//! The check is a pure function of the value, recomputed on every cycle.

use serde::{Deserialize, Serialize};

use crate::snapshot::Field;

/// Visual emphasis for a displayed value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emphasis {
    /// Value at or below the threshold
    Normal,
    /// Value above the threshold
    High,
}

/// Style written to a display target
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Style {
    /// Emphasis level
    pub emphasis: Emphasis,
    /// CSS color for the value text
    pub color: String,
}

/// Threshold rule for one field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdRule {
    /// Values strictly above this are high
    pub threshold: f64,

    /// Color used when the value is high
    pub high_color: String,

    /// Color used otherwise
    pub normal_color: String,
}

impl ThresholdRule {
    /// Create a new rule
    pub fn new(
        threshold: f64,
        high_color: impl Into<String>,
        normal_color: impl Into<String>,
    ) -> Self {
        Self {
            threshold,
            high_color: high_color.into(),
            normal_color: normal_color.into(),
        }
    }

    /// Default rule for a field, if the dashboard styles it
    pub fn default_for(field: Field) -> Option<Self> {
        match field {
            Field::Traffic => Some(Self::new(1600.0, "#ef4444", "#10b981")),
            Field::Aqi => Some(Self::new(150.0, "#f59e0b", "#34d399")),
            Field::Energy => None,
        }
    }

    /// Classify a value (boundary is exclusive)
    pub fn classify(&self, value: f64) -> Emphasis {
        if value > self.threshold {
            Emphasis::High
        } else {
            Emphasis::Normal
        }
    }

    /// Style for a value
    pub fn style(&self, value: f64) -> Style {
        let emphasis = self.classify(value);
        let color = match emphasis {
            Emphasis::High => self.high_color.clone(),
            Emphasis::Normal => self.normal_color.clone(),
        };
        Style { emphasis, color }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aqi_boundary_is_exclusive() {
        let rule = ThresholdRule::default_for(Field::Aqi).unwrap();
        assert_eq!(rule.classify(150.0), Emphasis::Normal);
        assert_eq!(rule.classify(151.0), Emphasis::High);
    }

    #[test]
    fn test_traffic_boundary_is_exclusive() {
        let rule = ThresholdRule::default_for(Field::Traffic).unwrap();
        assert_eq!(rule.classify(1600.0), Emphasis::Normal);
        assert_eq!(rule.classify(1601.0), Emphasis::High);
    }

    #[test]
    fn test_style_colors() {
        let rule = ThresholdRule::default_for(Field::Aqi).unwrap();
        assert_eq!(rule.style(210.0).color, "#f59e0b");
        assert_eq!(rule.style(90.0).color, "#34d399");
    }

    #[test]
    fn test_energy_has_no_default_rule() {
        assert!(ThresholdRule::default_for(Field::Energy).is_none());
    }
}
