//! Fixed three-month groupings of the calendar year.

use serde::Serialize;
use std::fmt;

/// A meteorological season, mapped from calendar months.
///
/// The mapping is fixed: Spring covers months 3-5, Summer 6-8, Autumn 9-11
/// and Winter 12, 1 and 2. Seasonal aggregates always report all four
/// seasons in the order of [`Season::ALL`], present in the data or not.
///
/// # Examples
///
/// ```
/// use aerostat::Season;
///
/// assert_eq!(Season::from_month(4), Some(Season::Spring));
/// assert_eq!(Season::from_month(12), Some(Season::Winter));
/// assert_eq!(Season::from_month(13), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Season {
    Spring,
    Summer,
    Autumn,
    Winter,
}

impl Season {
    /// Canonical display order, independent of which seasons the data covers.
    pub const ALL: [Season; 4] = [Season::Spring, Season::Summer, Season::Autumn, Season::Winter];

    /// Maps a calendar month (1-12) onto its season. Returns `None` for any
    /// other value.
    pub fn from_month(month: u32) -> Option<Season> {
        match month {
            3..=5 => Some(Season::Spring),
            6..=8 => Some(Season::Summer),
            9..=11 => Some(Season::Autumn),
            12 | 1 | 2 => Some(Season::Winter),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Season::Spring => "Spring",
            Season::Summer => "Summer",
            Season::Autumn => "Autumn",
            Season::Winter => "Winter",
        }
    }

    pub(crate) fn from_name(name: &str) -> Option<Season> {
        match name {
            "Spring" => Some(Season::Spring),
            "Summer" => Some(Season::Summer),
            "Autumn" => Some(Season::Autumn),
            "Winter" => Some(Season::Winter),
            _ => None,
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
