use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Scatter plot of one numeric column against another.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationalChart {
    pub x: String,
    pub y: String,
    /// Optional column used to colour the points.
    #[serde(default)]
    pub hue: Option<String>,
}

/// Bar chart of the mean of `value` for each `category`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoricalChart {
    pub category: String,
    pub value: String,
}

/// The third chart: a distribution of one column, or its trend over a key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DistributionChart {
    Histogram {
        column: String,
        #[serde(default = "default_bins")]
        bins: usize,
        #[serde(default = "default_true")]
        kde: bool,
    },
    Trend {
        column: String,
        by: String,
    },
}

impl DistributionChart {
    pub fn column(&self) -> &str {
        match self {
            DistributionChart::Histogram { column, .. } | DistributionChart::Trend { column, .. } => {
                column
            }
        }
    }
}

fn default_bins() -> usize {
    30
}

fn default_true() -> bool {
    true
}

/// Everything an analysis run needs. Defaults describe the global water
/// consumption dataset; other schemas are described in a JSON file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub input: PathBuf,
    pub output_dir: PathBuf,
    /// Columns moved into the (possibly composite) row index.
    pub index: Vec<String>,
    /// Rows shown in the exploration preview.
    pub head_rows: usize,
    pub relational: RelationalChart,
    pub categorical: CategoricalChart,
    pub distribution: DistributionChart,
    /// Column whose moments are reported.
    pub moments_column: String,
    /// Chart width and height in pixels.
    pub chart_size: (u32, u32),
}

pub const PER_CAPITA_USE: &str = "Per Capita Water Use (L/Day)";

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("data.csv"),
            output_dir: PathBuf::from("."),
            index: vec!["Year".to_string()],
            head_rows: 5,
            relational: RelationalChart {
                x: "Rainfall Impact (mm)".to_string(),
                y: "Groundwater Depletion Rate (%)".to_string(),
                hue: Some("Water Scarcity Level".to_string()),
            },
            categorical: CategoricalChart {
                category: "Water Scarcity Level".to_string(),
                value: "Total Water Consumption (Billion m3)".to_string(),
            },
            distribution: DistributionChart::Histogram {
                column: PER_CAPITA_USE.to_string(),
                bins: default_bins(),
                kde: true,
            },
            moments_column: PER_CAPITA_USE.to_string(),
            chart_size: (800, 600),
        }
    }
}

impl AnalysisConfig {
    /// Read a JSON configuration. Omitted fields keep their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: AnalysisConfig = serde_json::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        log::debug!("Loaded config from {}: {config:?}", path.display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config: AnalysisConfig = serde_json::from_str(
            r#"{
                "input": "pizza_sales.csv",
                "index": ["pizza_name", "year"],
                "distribution": { "kind": "trend", "column": "total_price", "by": "year" },
                "moments_column": "total_price"
            }"#,
        )
        .unwrap();

        assert_eq!(config.input, PathBuf::from("pizza_sales.csv"));
        assert_eq!(config.index, vec!["pizza_name", "year"]);
        assert_eq!(config.head_rows, 5);
        assert_eq!(config.chart_size, (800, 600));
        assert_eq!(config.relational, AnalysisConfig::default().relational);
        assert_eq!(config.distribution.column(), "total_price");
    }

    #[test]
    fn histogram_defaults_to_thirty_bins_with_kde() {
        let chart: DistributionChart =
            serde_json::from_str(r#"{ "kind": "histogram", "column": "x" }"#).unwrap();
        assert_eq!(
            chart,
            DistributionChart::Histogram {
                column: "x".to_string(),
                bins: 30,
                kde: true,
            }
        );
    }

    #[test]
    fn reads_config_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("analysis.json");
        std::fs::write(&path, r#"{ "moments_column": "Rainfall Impact (mm)" }"#).unwrap();
        let config = AnalysisConfig::from_json_file(&path).unwrap();
        assert_eq!(config.moments_column, "Rainfall Impact (mm)");

        std::fs::write(&path, "{ not json").unwrap();
        assert!(AnalysisConfig::from_json_file(&path).is_err());
    }
}
