//! Chart Factory
//!
//! Builds renderer-neutral chart descriptions from a small set of options.
//! A frontend turns a [`ChartSpec`] into an actual drawing; the synchronizer
//! only refreshes the data of the first dataset.

use serde::{Deserialize, Serialize};

use crate::series::RollingSeries;

/// Axis and legend text color
const TEXT_COLOR: &str = "#94a3b8";
/// Horizontal grid line color
const GRID_COLOR: &str = "rgba(255,255,255,0.05)";

/// Chart types used by the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    /// Smoothed, filled line
    Line,
    /// Rounded bars
    Bar,
    /// Doughnut without axes
    Doughnut,
}

/// Color palettes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Palette {
    /// Single blue accent with a translucent fill
    Accent,
    /// One color per data point
    Categorical,
}

impl Palette {
    /// Border colors for the dataset
    pub fn border_colors(&self) -> Vec<String> {
        match self {
            Palette::Accent => vec!["#3b82f6".to_string()],
            Palette::Categorical => vec![
                "#3b82f6".to_string(),
                "#10b981".to_string(),
                "#fbbf24".to_string(),
                "#ef4444".to_string(),
            ],
        }
    }

    /// Fill colors for the dataset
    pub fn fill_colors(&self) -> Vec<String> {
        match self {
            Palette::Accent => vec!["rgba(59, 130, 246, 0.1)".to_string()],
            Palette::Categorical => self.border_colors(),
        }
    }
}

/// Legend placement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Legend {
    /// No legend
    Hidden,
    /// Above the plot
    Top,
    /// Below the plot
    Bottom,
}

/// One dataset of a chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    /// Dataset name
    pub label: String,
    /// Plotted values
    pub data: Vec<f64>,
    /// Line or border colors
    pub border_color: Vec<String>,
    /// Fill colors
    pub background_color: Vec<String>,
    /// Fill the area under a line
    pub fill: bool,
    /// Line smoothing (0 = straight segments)
    pub tension: f64,
    /// Bar corner radius
    pub border_radius: u32,
    /// Line width
    pub border_width: u32,
}

/// Axis styling; doughnut charts have none
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisStyle {
    /// Tick label color
    pub tick_color: String,
    /// Grid line color; `None` hides the grid
    pub grid_color: Option<String>,
}

/// Complete chart description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    /// Chart type
    pub kind: ChartKind,
    /// X-axis labels
    pub labels: Vec<String>,
    /// Datasets; the first one carries live data
    pub datasets: Vec<Dataset>,
    /// Legend placement
    pub legend: Legend,
    /// Legend text color
    pub legend_color: String,
    /// X-axis styling
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_axis: Option<AxisStyle>,
    /// Y-axis styling
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y_axis: Option<AxisStyle>,
    /// Resize with the container
    pub responsive: bool,
    /// Keep the aspect ratio when resizing
    pub maintain_aspect_ratio: bool,
}

impl ChartSpec {
    /// Build a chart description with a single empty dataset
    pub fn build(kind: ChartKind, palette: Palette, legend: Legend, title: &str) -> Self {
        let (fill, tension, border_radius, border_width) = match kind {
            ChartKind::Line => (true, 0.4, 0, 2),
            ChartKind::Bar => (false, 0.0, 4, 0),
            ChartKind::Doughnut => (false, 0.0, 0, 0),
        };

        let (x_axis, y_axis) = match kind {
            ChartKind::Doughnut => (None, None),
            ChartKind::Line | ChartKind::Bar => (
                Some(AxisStyle {
                    tick_color: TEXT_COLOR.to_string(),
                    grid_color: None,
                }),
                Some(AxisStyle {
                    tick_color: TEXT_COLOR.to_string(),
                    grid_color: Some(GRID_COLOR.to_string()),
                }),
            ),
        };

        Self {
            kind,
            labels: Vec::new(),
            datasets: vec![Dataset {
                label: title.to_string(),
                data: Vec::new(),
                border_color: palette.border_colors(),
                background_color: palette.fill_colors(),
                fill,
                tension,
                border_radius,
                border_width,
            }],
            legend,
            legend_color: TEXT_COLOR.to_string(),
            x_axis,
            y_axis,
            responsive: true,
            maintain_aspect_ratio: false,
        }
    }

    /// Replace labels and first-dataset data with the series contents
    pub fn with_series(mut self, series: &RollingSeries) -> Self {
        self.update_from(series);
        self
    }

    /// In-place variant of [`ChartSpec::with_series`]
    pub fn update_from(&mut self, series: &RollingSeries) {
        self.labels = series.labels();
        if let Some(dataset) = self.datasets.first_mut() {
            dataset.data = series.values();
        }
    }

    /// Serialize for a frontend renderer
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_chart_defaults() {
        let chart = ChartSpec::build(ChartKind::Line, Palette::Accent, Legend::Hidden, "Prediction");
        let dataset = &chart.datasets[0];

        assert!(dataset.fill);
        assert_eq!(dataset.tension, 0.4);
        assert_eq!(dataset.border_color, vec!["#3b82f6"]);
        assert!(chart.y_axis.as_ref().unwrap().grid_color.is_some());
        assert!(chart.x_axis.as_ref().unwrap().grid_color.is_none());
    }

    #[test]
    fn test_doughnut_has_no_axes() {
        let chart = ChartSpec::build(
            ChartKind::Doughnut,
            Palette::Categorical,
            Legend::Bottom,
            "Energy Mix",
        );

        assert!(chart.x_axis.is_none());
        assert!(chart.y_axis.is_none());
        assert_eq!(chart.datasets[0].border_width, 0);
        assert_eq!(chart.datasets[0].background_color.len(), 4);
    }

    #[test]
    fn test_with_series_copies_points() {
        let series = RollingSeries::with_seed(6, &["10:00", "11:00"], &[1200.0, 1350.0]);
        let chart = ChartSpec::build(ChartKind::Line, Palette::Accent, Legend::Hidden, "Prediction")
            .with_series(&series);

        assert_eq!(chart.labels, vec!["10:00", "11:00"]);
        assert_eq!(chart.datasets[0].data, vec![1200.0, 1350.0]);
    }

    #[test]
    fn test_to_json_uses_lowercase_kind() {
        let chart = ChartSpec::build(ChartKind::Bar, Palette::Categorical, Legend::Hidden, "PM2.5");
        let json = chart.to_json().unwrap();

        assert!(json.contains("\"kind\":\"bar\""));
        assert!(json.contains("\"legend\":\"hidden\""));
    }
}
