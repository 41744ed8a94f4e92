//! The filtered, read-only view that every aggregate is computed from.

use crate::aggregate::correlation::correlation_matrix;
use crate::aggregate::distribution::distribution_summary;
use crate::aggregate::levels::station_levels;
use crate::aggregate::ranking::top_categories;
use crate::aggregate::temporal::{hourly_mean, monthly_mean, seasonal_summary};
use crate::error::AerostatError;
use crate::filtering::FilterCriteria;
use crate::types::schema::SchemaConfig;
use crate::types::summaries::{
    CategoryCount, CorrelationMatrix, DistributionSummary, HourlyMean, MonthlyMean, SeasonSummary,
    StationLevel,
};
use polars::prelude::{DataFrame, Expr, LazyFrame};

/// A derived, possibly empty, read-only subset of a [`crate::Dataset`].
///
/// Produced by [`crate::Dataset::filter`] and recomputed whenever the filter
/// criteria change. All aggregate methods are pure and evaluate on demand;
/// nothing here holds state between calls, so a view can be shared freely.
#[derive(Clone)]
pub struct FilteredView {
    frame: LazyFrame,
    schema: SchemaConfig,
}

impl FilteredView {
    pub(crate) fn new(frame: LazyFrame, schema: SchemaConfig) -> Self {
        Self { frame, schema }
    }

    pub fn schema(&self) -> &SchemaConfig {
        &self.schema
    }

    /// A lazy handle on the filtered rows, for callers that need operations
    /// beyond the built-in aggregates.
    pub fn lazy(&self) -> LazyFrame {
        self.frame.clone()
    }

    /// Narrows the view with an arbitrary Polars predicate.
    pub fn filter_expr(&self, predicate: Expr) -> FilteredView {
        FilteredView::new(self.frame.clone().filter(predicate), self.schema.clone())
    }

    /// Re-applies filter criteria to this view. Filtering with the same
    /// criteria twice yields an identical view.
    pub fn filter(&self, criteria: &FilterCriteria) -> Result<FilteredView, AerostatError> {
        criteria.validate()?;
        Ok(self.filter_expr(criteria.predicate(&self.schema)))
    }

    /// Materializes the filtered rows.
    pub fn collect(&self) -> Result<DataFrame, AerostatError> {
        Ok(self.frame.clone().collect()?)
    }

    /// Distribution summary of the pollutant column.
    pub fn distribution_summary(&self) -> Result<DistributionSummary, AerostatError> {
        distribution_summary(self.frame.clone(), &self.schema)
    }

    /// Top-N frequency ranking of an arbitrary categorical column.
    pub fn top_categories(
        &self,
        column: &str,
        n: usize,
    ) -> Result<Vec<CategoryCount>, AerostatError> {
        top_categories(self.frame.clone(), column, n)
    }

    /// Top-N dominant wind directions, the ranking the dashboard's wind rose
    /// is drawn from.
    pub fn dominant_wind_directions(&self, n: usize) -> Result<Vec<CategoryCount>, AerostatError> {
        let column = self.schema.wind_direction().to_string();
        self.top_categories(&column, n)
    }

    /// Mean pollutant concentration per hour of the day.
    pub fn hourly_mean(&self) -> Result<Vec<HourlyMean>, AerostatError> {
        hourly_mean(self.frame.clone(), &self.schema)
    }

    /// Mean pollutant concentration per year-month bucket, chronological.
    pub fn monthly_mean(&self) -> Result<Vec<MonthlyMean>, AerostatError> {
        monthly_mean(self.frame.clone(), &self.schema)
    }

    /// Seasonal statistics, always four entries in canonical order.
    pub fn seasonal_summary(&self) -> Result<Vec<SeasonSummary>, AerostatError> {
        seasonal_summary(self.frame.clone(), &self.schema)
    }

    /// Pearson correlation matrix over pollutant, wind speed and temperature.
    pub fn correlation_matrix(&self) -> Result<CorrelationMatrix, AerostatError> {
        correlation_matrix(self.frame.clone(), &self.schema)
    }

    /// Per-station mean concentration with its pollution-level category.
    pub fn station_levels(&self) -> Result<Vec<StationLevel>, AerostatError> {
        station_levels(self.frame.clone(), &self.schema)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Dataset;
    use chrono::{Duration, NaiveDate, NaiveDateTime};
    use polars::prelude::*;

    /// Two stations, hourly readings over 2015-2016, with values that make
    /// cross-station contamination obvious (one station sits two orders of
    /// magnitude above the other).
    fn two_station_two_year_dataset() -> Dataset {
        let start = NaiveDate::from_ymd_opt(2015, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let end = NaiveDate::from_ymd_opt(2017, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();

        let mut stations = Vec::new();
        let mut datetimes: Vec<NaiveDateTime> = Vec::new();
        let mut pm25 = Vec::new();
        let mut ts = start;
        while ts < end {
            for (station, base) in [("Aotizhongxin", 10.0), ("Huairou", 1000.0)] {
                stations.push(station);
                datetimes.push(ts);
                pm25.push(Some(base + (ts.and_utc().timestamp() % 7) as f64));
            }
            ts += Duration::hours(1);
        }

        let df = DataFrame::new(vec![
            Column::new("station".into(), stations),
            Column::new("datetime".into(), datetimes),
            Column::new("PM2.5".into(), pm25),
        ])
        .unwrap();
        Dataset::from_frame(df, SchemaConfig::default())
    }

    #[test]
    fn one_station_one_year_yields_twelve_clean_monthly_buckets() {
        let dataset = two_station_two_year_dataset();
        let criteria = FilterCriteria::new(
            ["Aotizhongxin"],
            NaiveDate::from_ymd_opt(2015, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2015, 12, 31).unwrap(),
        );
        let view = dataset.filter(&criteria).unwrap();
        let monthly = view.monthly_mean().unwrap();

        assert_eq!(monthly.len(), 12);
        let buckets: Vec<(i32, u32)> = monthly.iter().map(|m| (m.year, m.month)).collect();
        let expected: Vec<(i32, u32)> = (1..=12).map(|m| (2015, m)).collect();
        assert_eq!(buckets, expected);

        // Aotizhongxin values stay near 10; any Huairou bleed-through (near
        // 1000) would blow the means up.
        assert!(monthly.iter().all(|m| m.mean < 20.0));
    }

    #[test]
    fn hourly_profile_covers_the_full_clock_for_dense_data() {
        let dataset = two_station_two_year_dataset();
        let criteria = FilterCriteria::new(
            ["Huairou"],
            NaiveDate::from_ymd_opt(2016, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2016, 12, 31).unwrap(),
        );
        let view = dataset.filter(&criteria).unwrap();
        let hourly = view.hourly_mean().unwrap();

        assert_eq!(hourly.len(), 24);
        let hours: Vec<u32> = hourly.iter().map(|h| h.hour).collect();
        assert_eq!(hours, (0..24).collect::<Vec<u32>>());
    }

    #[test]
    fn station_levels_reflect_the_filtered_subset() {
        let dataset = two_station_two_year_dataset();
        let criteria = FilterCriteria::new(
            ["Aotizhongxin", "Huairou"],
            NaiveDate::from_ymd_opt(2015, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2016, 12, 31).unwrap(),
        );
        let view = dataset.filter(&criteria).unwrap();
        let levels = view.station_levels().unwrap();

        assert_eq!(levels.len(), 2);
        assert_eq!(levels[0].station, "Aotizhongxin");
        assert_eq!(levels[0].level, crate::PollutionLevel::Low);
        assert_eq!(levels[1].station, "Huairou");
        assert_eq!(levels[1].level, crate::PollutionLevel::High);
    }

    #[test]
    fn aggregates_on_an_empty_view_degrade_gracefully() {
        let dataset = two_station_two_year_dataset();
        let criteria = FilterCriteria::new(
            Vec::<String>::new(),
            NaiveDate::from_ymd_opt(2015, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2015, 12, 31).unwrap(),
        );
        let view = dataset.filter(&criteria).unwrap();

        assert!(view.distribution_summary().unwrap().is_empty());
        assert!(view.hourly_mean().unwrap().is_empty());
        assert!(view.monthly_mean().unwrap().is_empty());
        assert_eq!(view.seasonal_summary().unwrap().len(), 4);
        assert!(view.station_levels().unwrap().is_empty());
    }
}
