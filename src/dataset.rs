//! The loaded, immutable table of station readings.

use crate::error::AerostatError;
use crate::filtering::FilterCriteria;
use crate::types::schema::SchemaConfig;
use crate::view::FilteredView;
use chrono::{DateTime, NaiveDate};
use polars::prelude::*;

/// An ordered, read-only collection of station readings.
///
/// Loaded once per process lifetime (see [`crate::Aerostat`]) and never
/// mutated afterwards; every downstream value is a pure function of a
/// [`FilteredView`] derived from it. Cloning a `Dataset` clones a lazy
/// handle, not the data.
#[derive(Clone)]
pub struct Dataset {
    frame: LazyFrame,
    schema: SchemaConfig,
}

impl Dataset {
    /// Wraps an already-loaded lazy frame.
    ///
    /// The timestamp column is normalized to millisecond precision so that
    /// date arithmetic behaves identically whatever the source encoded.
    pub fn new(frame: LazyFrame, schema: SchemaConfig) -> Self {
        let frame = frame.with_columns([col(schema.datetime())
            .cast(DataType::Datetime(TimeUnit::Milliseconds, None))]);
        Self { frame, schema }
    }

    /// Builds a dataset from an in-memory frame. Useful for tests and for
    /// embedders that already hold the table.
    pub fn from_frame(frame: DataFrame, schema: SchemaConfig) -> Self {
        Self::new(frame.lazy(), schema)
    }

    pub fn schema(&self) -> &SchemaConfig {
        &self.schema
    }

    /// A lazy handle on the underlying table.
    pub fn lazy(&self) -> LazyFrame {
        self.frame.clone()
    }

    /// Restricts the dataset to the stations and closed date interval of
    /// `criteria`.
    ///
    /// Fails with [`AerostatError::InvalidRange`] when `start > end`. An
    /// empty station selection produces an empty view, not an error. The
    /// dataset itself is never mutated.
    pub fn filter(&self, criteria: &FilterCriteria) -> Result<FilteredView, AerostatError> {
        criteria.validate()?;
        Ok(FilteredView::new(
            self.frame.clone().filter(criteria.predicate(&self.schema)),
            self.schema.clone(),
        ))
    }

    /// Distinct station identifiers in first-encountered order, for
    /// populating a station selector.
    pub fn stations(&self) -> Result<Vec<String>, AerostatError> {
        let df = self
            .frame
            .clone()
            .select([col(self.schema.station())])
            .collect()?;
        let ca = df.column(self.schema.station())?.str()?;

        let mut seen = std::collections::HashSet::new();
        let mut stations = Vec::new();
        for value in ca.into_iter().flatten() {
            if seen.insert(value.to_string()) {
                stations.push(value.to_string());
            }
        }
        Ok(stations)
    }

    /// The date span covered by the data, `None` when the table is empty.
    /// Used to seed a date-range widget.
    pub fn date_range(&self) -> Result<Option<(NaiveDate, NaiveDate)>, AerostatError> {
        let dt = self.schema.datetime();
        let df = self
            .frame
            .clone()
            .select([
                col(dt).min().alias("min"),
                col(dt).max().alias("max"),
            ])
            .collect()?;

        let min_ms = df.column("min")?.datetime()?.get(0);
        let max_ms = df.column("max")?.datetime()?.get(0);
        Ok(match (min_ms, max_ms) {
            (Some(min), Some(max)) => {
                let to_date = |ms: i64| DateTime::from_timestamp_millis(ms).map(|d| d.date_naive());
                match (to_date(min), to_date(max)) {
                    (Some(lo), Some(hi)) => Some((lo, hi)),
                    _ => None,
                }
            }
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn dt(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    fn sample_dataset() -> Dataset {
        let stations = ["Huairou", "Aotizhongxin", "Huairou", "Aotizhongxin"];
        let datetimes = vec![
            dt(2015, 1, 1, 0),
            dt(2015, 1, 1, 1),
            dt(2015, 6, 30, 12),
            dt(2016, 12, 31, 23),
        ];
        let pm25 = [Some(10.0), Some(20.0), None, Some(40.0)];

        let df = DataFrame::new(vec![
            Column::new("station".into(), stations.as_slice()),
            Column::new("datetime".into(), datetimes),
            Column::new("PM2.5".into(), pm25.as_slice()),
        ])
        .unwrap();
        Dataset::from_frame(df, SchemaConfig::default())
    }

    #[test]
    fn stations_are_unique_in_first_encountered_order() {
        let dataset = sample_dataset();
        assert_eq!(
            dataset.stations().unwrap(),
            vec!["Huairou".to_string(), "Aotizhongxin".to_string()]
        );
    }

    #[test]
    fn date_range_spans_the_data() {
        let dataset = sample_dataset();
        let (lo, hi) = dataset.date_range().unwrap().unwrap();
        assert_eq!(lo, NaiveDate::from_ymd_opt(2015, 1, 1).unwrap());
        assert_eq!(hi, NaiveDate::from_ymd_opt(2016, 12, 31).unwrap());
    }

    #[test]
    fn date_range_of_empty_table_is_none() {
        let df = DataFrame::new(vec![
            Column::new("station".into(), Vec::<String>::new()),
            Column::new("datetime".into(), Vec::<NaiveDateTime>::new()),
            Column::new("PM2.5".into(), Vec::<Option<f64>>::new()),
        ])
        .unwrap();
        let dataset = Dataset::from_frame(df, SchemaConfig::default());
        assert_eq!(dataset.date_range().unwrap(), None);
    }

    #[test]
    fn filter_rejects_inverted_range() {
        let dataset = sample_dataset();
        let criteria = FilterCriteria::new(
            ["Huairou"],
            NaiveDate::from_ymd_opt(2015, 6, 1).unwrap(),
            NaiveDate::from_ymd_opt(2015, 1, 1).unwrap(),
        );
        assert!(matches!(
            dataset.filter(&criteria),
            Err(AerostatError::InvalidRange { .. })
        ));
    }

    #[test]
    fn filter_keeps_only_selected_stations_and_dates() {
        let dataset = sample_dataset();
        let criteria = FilterCriteria::new(
            ["Aotizhongxin"],
            NaiveDate::from_ymd_opt(2015, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2015, 12, 31).unwrap(),
        );
        let view = dataset.filter(&criteria).unwrap();
        let df = view.collect().unwrap();
        assert_eq!(df.height(), 1);
        let station = df.column("station").unwrap().str().unwrap().get(0).unwrap();
        assert_eq!(station, "Aotizhongxin");
    }

    #[test]
    fn empty_station_set_yields_empty_view_for_any_range() {
        let dataset = sample_dataset();
        let criteria = FilterCriteria::new(
            Vec::<String>::new(),
            NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2030, 1, 1).unwrap(),
        );
        let view = dataset.filter(&criteria).unwrap();
        assert_eq!(view.collect().unwrap().height(), 0);
    }

    #[test]
    fn filter_is_idempotent() {
        let dataset = sample_dataset();
        let criteria = FilterCriteria::new(
            ["Huairou"],
            NaiveDate::from_ymd_opt(2015, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2015, 12, 31).unwrap(),
        );
        let once = dataset.filter(&criteria).unwrap();
        let twice = once.filter(&criteria).unwrap();
        assert!(once.collect().unwrap().equals_missing(&twice.collect().unwrap()));
    }

    #[test]
    fn end_day_subsecond_timestamps_stay_in_range() {
        let late = NaiveDate::from_ymd_opt(2015, 12, 31)
            .unwrap()
            .and_hms_milli_opt(23, 59, 59, 500)
            .unwrap();
        let df = DataFrame::new(vec![
            Column::new("station".into(), ["Huairou"].as_slice()),
            Column::new("datetime".into(), vec![late]),
            Column::new("PM2.5".into(), [Some(12.0)].as_slice()),
        ])
        .unwrap();
        let dataset = Dataset::from_frame(df, SchemaConfig::default());

        let view = dataset
            .filter(&FilterCriteria::new(
                ["Huairou"],
                NaiveDate::from_ymd_opt(2015, 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(2015, 12, 31).unwrap(),
            ))
            .unwrap();
        assert_eq!(view.collect().unwrap().height(), 1);
    }

    #[test]
    fn closed_interval_includes_both_endpoint_days() {
        let dataset = sample_dataset();
        let criteria = FilterCriteria::new(
            ["Huairou", "Aotizhongxin"],
            NaiveDate::from_ymd_opt(2015, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2016, 12, 31).unwrap(),
        );
        let view = dataset.filter(&criteria).unwrap();
        // 2015-01-01 00:00 and 2016-12-31 23:00 both survive.
        assert_eq!(view.collect().unwrap().height(), 4);
    }
}
