//! Discrete pollution-level labels derived from mean pollutant concentrations.

use crate::error::AerostatError;
use serde::Serialize;
use std::fmt;

/// Mean concentrations at or below this value classify as [`PollutionLevel::Low`].
pub const LOW_THRESHOLD: f64 = 70.0;
/// Mean concentrations above this value classify as [`PollutionLevel::High`].
pub const HIGH_THRESHOLD: f64 = 90.0;

/// Pollution-level category for a station's mean pollutant concentration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PollutionLevel {
    Low,
    Medium,
    High,
}

impl PollutionLevel {
    pub fn label(&self) -> &'static str {
        match self {
            PollutionLevel::Low => "Low",
            PollutionLevel::Medium => "Medium",
            PollutionLevel::High => "High",
        }
    }
}

impl fmt::Display for PollutionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Classifies a mean pollutant value against the fixed thresholds.
///
/// The boundaries are exact: `> 90.0` is High, `(70.0, 90.0]` is Medium and
/// `<= 70.0` is Low. Non-finite input is a caller bug (stations with no data
/// must be filtered out upstream) and fails with
/// [`AerostatError::InvalidInput`].
///
/// # Examples
///
/// ```
/// use aerostat::{categorize, PollutionLevel};
///
/// assert_eq!(categorize(95.0).unwrap(), PollutionLevel::High);
/// assert_eq!(categorize(90.0).unwrap(), PollutionLevel::Medium);
/// assert_eq!(categorize(70.0).unwrap(), PollutionLevel::Low);
/// assert!(categorize(f64::NAN).is_err());
/// ```
pub fn categorize(mean_value: f64) -> Result<PollutionLevel, AerostatError> {
    if !mean_value.is_finite() {
        return Err(AerostatError::InvalidInput(mean_value));
    }
    Ok(if mean_value > HIGH_THRESHOLD {
        PollutionLevel::High
    } else if mean_value > LOW_THRESHOLD {
        PollutionLevel::Medium
    } else {
        PollutionLevel::Low
    })
}
