//! Typed aggregate results handed to the presentation layer.
//!
//! All values here are pure derived data: recomputed on demand from a
//! filtered view, never persisted. They derive `Serialize` so a dashboard
//! frontend can ship them straight into its charting layer.

use crate::error::AerostatError;
use crate::types::pollution_level::PollutionLevel;
use crate::types::season::Season;
use serde::Serialize;
use std::fmt;

/// Distribution summary of the pollutant column, pandas-`describe` shaped.
///
/// Statistics are computed at full precision with missing values ignored;
/// the `Display` impl rounds to two decimals for on-screen tables. When the
/// view is empty, `count` is 0 and every statistic is `None`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistributionSummary {
    pub count: u32,
    pub mean: Option<f64>,
    pub std_dev: Option<f64>,
    pub min: Option<f64>,
    pub p25: Option<f64>,
    pub median: Option<f64>,
    pub p75: Option<f64>,
    pub max: Option<f64>,
}

impl DistributionSummary {
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// The median for use as a chart annotation (histogram median line).
    ///
    /// Unlike the other accessors this fails with
    /// [`AerostatError::EmptySeries`] when the view held no observations,
    /// since a median line over nothing cannot be drawn.
    pub fn median_line(&self) -> Result<f64, AerostatError> {
        self.median.ok_or(AerostatError::EmptySeries)
    }
}

fn fmt_stat(f: &mut fmt::Formatter<'_>, name: &str, value: Option<f64>) -> fmt::Result {
    match value {
        Some(v) => writeln!(f, "{:<5} {:.2}", name, v),
        None => writeln!(f, "{:<5} null", name),
    }
}

impl fmt::Display for DistributionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:<5} {}", "count", self.count)?;
        fmt_stat(f, "mean", self.mean)?;
        fmt_stat(f, "std", self.std_dev)?;
        fmt_stat(f, "min", self.min)?;
        fmt_stat(f, "25%", self.p25)?;
        fmt_stat(f, "50%", self.median)?;
        fmt_stat(f, "75%", self.p75)?;
        fmt_stat(f, "max", self.max)
    }
}

/// One entry of a top-N categorical frequency ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub value: String,
    pub count: u32,
}

/// Mean pollutant concentration for one hour of the day (0-23).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourlyMean {
    pub hour: u32,
    pub mean: f64,
}

/// Mean pollutant concentration for one year-month bucket.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyMean {
    pub year: i32,
    pub month: u32,
    pub mean: f64,
}

/// Per-season statistics of the pollutant column.
///
/// A season with zero observations keeps `count == 0` and all statistics
/// `None`; it is still reported so the output always carries exactly four
/// entries in canonical order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonSummary {
    pub season: Season,
    pub count: u32,
    pub mean: Option<f64>,
    pub median: Option<f64>,
    pub std_dev: Option<f64>,
}

impl SeasonSummary {
    pub(crate) fn empty(season: Season) -> Self {
        Self {
            season,
            count: 0,
            mean: None,
            median: None,
            std_dev: None,
        }
    }
}

/// Symmetric Pearson correlation matrix over a fixed set of numeric columns.
///
/// Missing values are excluded pairwise, the diagonal is 1.0 and degenerate
/// pairs (fewer than two complete observations, or zero variance) are `NaN`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    columns: Vec<String>,
    values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    pub(crate) fn new(columns: Vec<String>, values: Vec<Vec<f64>>) -> Self {
        Self { columns, values }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn values(&self) -> &[Vec<f64>] {
        &self.values
    }

    /// Coefficient at row `i`, column `j`.
    pub fn at(&self, i: usize, j: usize) -> f64 {
        self.values[i][j]
    }

    /// Coefficient for a pair of columns looked up by name.
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.columns.iter().position(|c| c == a)?;
        let j = self.columns.iter().position(|c| c == b)?;
        Some(self.values[i][j])
    }
}

/// A station's mean pollutant concentration with its derived category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationLevel {
    pub station: String,
    pub mean: f64,
    pub level: PollutionLevel,
}
