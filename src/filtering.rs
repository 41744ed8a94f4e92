//! Filter criteria restricting a dataset to stations and a closed date range.

use crate::error::AerostatError;
use crate::types::schema::SchemaConfig;
use chrono::NaiveDate;
use polars::prelude::{col, lit, DataType, Expr};
use std::collections::HashSet;

/// The value side of a filter request: which stations, over which dates.
///
/// This is the explicit, immutable request state of one render cycle; the
/// presentation layer owns widget state and hands a `FilterCriteria` into the
/// pipeline whenever it changes.
///
/// # Examples
///
/// ```
/// use aerostat::FilterCriteria;
/// use chrono::NaiveDate;
///
/// let criteria = FilterCriteria::new(
///     ["Aotizhongxin", "Huairou"],
///     NaiveDate::from_ymd_opt(2015, 1, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2015, 12, 31).unwrap(),
/// );
/// assert_eq!(criteria.stations().len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCriteria {
    stations: HashSet<String>,
    start: NaiveDate,
    end: NaiveDate,
}

impl FilterCriteria {
    /// Builds criteria from a station selection and a closed date interval.
    pub fn new(
        stations: impl IntoIterator<Item = impl Into<String>>,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Self {
        Self {
            stations: stations.into_iter().map(Into::into).collect(),
            start,
            end,
        }
    }

    pub fn stations(&self) -> &HashSet<String> {
        &self.stations
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub(crate) fn validate(&self) -> Result<(), AerostatError> {
        if self.start > self.end {
            return Err(AerostatError::InvalidRange {
                start: self.start,
                end: self.end,
            });
        }
        Ok(())
    }

    /// Builds the row predicate: station selected AND timestamp's date inside
    /// `[start, end]`. An empty station selection matches nothing.
    pub(crate) fn predicate(&self, schema: &SchemaConfig) -> Expr {
        let mut names: Vec<&String> = self.stations.iter().collect();
        names.sort();

        let station_pred = names
            .into_iter()
            .map(|name| col(schema.station()).eq(lit(name.clone())))
            .reduce(|acc, expr| acc.or(expr))
            .unwrap_or_else(|| lit(false));

        // Closed interval on the date component: comparing the timestamp cast
        // to a date keeps any time of day on the end date, sub-second stamps
        // included.
        let date = || col(schema.datetime()).cast(DataType::Date);
        let date_pred = date()
            .gt_eq(lit(self.start))
            .and(date().lt_eq(lit(self.end)));

        station_pred.and(date_pred)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn valid_range_passes() {
        let criteria = FilterCriteria::new(["A"], date(2015, 1, 1), date(2015, 6, 1));
        assert!(criteria.validate().is_ok());
    }

    #[test]
    fn single_day_range_is_valid() {
        let criteria = FilterCriteria::new(["A"], date(2015, 6, 1), date(2015, 6, 1));
        assert!(criteria.validate().is_ok());
    }

    #[test]
    fn inverted_range_is_rejected() {
        let criteria = FilterCriteria::new(["A"], date(2015, 6, 1), date(2015, 1, 1));
        assert!(matches!(
            criteria.validate(),
            Err(AerostatError::InvalidRange { .. })
        ));
    }

    #[test]
    fn duplicate_stations_collapse() {
        let criteria = FilterCriteria::new(["A", "A", "B"], date(2015, 1, 1), date(2015, 1, 2));
        assert_eq!(criteria.stations().len(), 2);
    }
}
