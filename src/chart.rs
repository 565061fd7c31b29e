//! Indexing Chart
//!
//! Doughnut chart model for the results and report pages. The page carries
//! the counts as two data attributes on `#indexingChart`; this module turns
//! them into segment geometry that a canvas renderer can draw directly.

use serde::Serialize;
use std::f64::consts::PI;
use thiserror::Error;

/// Element the chart is drawn on
pub const CHART_ELEMENT_ID: &str = "indexingChart";
/// Data attribute holding the indexed count
pub const DATA_INDEXED: &str = "data-indexed";
/// Data attribute holding the not-indexed count
pub const DATA_NOT_INDEXED: &str = "data-not-indexed";

/// Inner radius as a fraction of the outer radius
pub const CUTOUT_RATIO: f64 = 0.6;

const INDEXED_COLOR: &str = "#28a745";
const NOT_INDEXED_COLOR: &str = "#dc3545";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChartError {
    #[error("Missing chart attribute: {0}")]
    MissingAttribute(&'static str),

    #[error("Invalid value for {attribute}: {value:?}")]
    InvalidValue {
        attribute: &'static str,
        value: String,
    },
}

/// Indexed vs. not-indexed counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct IndexingSummary {
    pub indexed: u64,
    pub not_indexed: u64,
}

/// One arc of the doughnut
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DoughnutSegment {
    pub label: &'static str,
    pub value: u64,
    pub color: &'static str,
    pub percentage: f64,
    /// Radians, clockwise from 12 o'clock
    pub start_angle: f64,
    pub end_angle: f64,
}

impl DoughnutSegment {
    pub fn legend(&self) -> String {
        format!("{}: {} ({:.1}%)", self.label, self.value, self.percentage)
    }
}

impl IndexingSummary {
    pub fn new(indexed: u64, not_indexed: u64) -> Self {
        Self {
            indexed,
            not_indexed,
        }
    }

    /// Build from the chart element's data attributes
    pub fn from_attributes(
        indexed: Option<&str>,
        not_indexed: Option<&str>,
    ) -> Result<Self, ChartError> {
        Ok(Self {
            indexed: parse_count(DATA_INDEXED, indexed)?,
            not_indexed: parse_count(DATA_NOT_INDEXED, not_indexed)?,
        })
    }

    pub fn total(&self) -> u64 {
        self.indexed + self.not_indexed
    }

    /// Percentage of indexed URLs, 0 when nothing was checked
    pub fn index_rate(&self) -> f64 {
        match self.total() {
            0 => 0.0,
            total => self.indexed as f64 / total as f64 * 100.0,
        }
    }

    /// Segments in drawing order; empty when there is nothing to draw
    pub fn segments(&self) -> Vec<DoughnutSegment> {
        let total = self.total();
        if total == 0 {
            return Vec::new();
        }

        let parts = [
            ("Indexed", self.indexed, INDEXED_COLOR),
            ("Not Indexed", self.not_indexed, NOT_INDEXED_COLOR),
        ];

        let mut angle = -PI / 2.0;
        parts
            .into_iter()
            .map(|(label, value, color)| {
                let fraction = value as f64 / total as f64;
                let start = angle;
                angle += fraction * 2.0 * PI;
                DoughnutSegment {
                    label,
                    value,
                    color,
                    percentage: fraction * 100.0,
                    start_angle: start,
                    end_angle: angle,
                }
            })
            .collect()
    }
}

fn parse_count(attribute: &'static str, raw: Option<&str>) -> Result<u64, ChartError> {
    let raw = raw.ok_or(ChartError::MissingAttribute(attribute))?;
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }

    trimmed
        .parse::<u64>()
        .or_else(|_| {
            // Templates sometimes render counts as floats
            trimmed
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite() && *v >= 0.0)
                .map(|v| v.round() as u64)
                .ok_or(())
        })
        .map_err(|_| ChartError::InvalidValue {
            attribute,
            value: raw.to_string(),
        })
}
