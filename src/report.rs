//! Declarative selection of the views a dashboard variant renders.
//!
//! The original dashboards were near-duplicates differing only in which
//! charts they showed. Instead of duplicating pipelines, a variant declares
//! its charts as a list of [`ViewSpec`]s and renders the matching fields of
//! the resulting [`Report`].

use crate::error::AerostatError;
use crate::types::summaries::{
    CategoryCount, CorrelationMatrix, DistributionSummary, HourlyMean, MonthlyMean, SeasonSummary,
    StationLevel,
};
use crate::view::FilteredView;
use serde::Serialize;

/// One chart/table a dashboard variant wants rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ViewSpec {
    /// Histogram + descriptive statistics of the pollutant column.
    Distribution,
    /// Pie/donut of the `top_n` dominant wind directions.
    WindRose { top_n: usize },
    /// Line chart of mean concentration per hour of the day.
    HourlyTrend,
    /// Line chart of mean concentration per year-month bucket.
    MonthlyTrend,
    /// Grouped bar chart comparing the four seasons.
    SeasonalComparison,
    /// Heatmap of the pollutant/wind-speed/temperature correlations.
    CorrelationHeatmap,
    /// Table of per-station means and pollution-level labels.
    StationLevels,
}

/// Aggregate outputs for one render cycle; only requested views are filled.
///
/// Degenerate inputs (an empty view, a season with no data) surface as empty
/// collections or `None` statistics inside the affected field, so one blank
/// chart never takes the rest of the page down.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Report {
    pub distribution: Option<DistributionSummary>,
    pub wind_rose: Option<Vec<CategoryCount>>,
    pub hourly_trend: Option<Vec<HourlyMean>>,
    pub monthly_trend: Option<Vec<MonthlyMean>>,
    pub seasonal_comparison: Option<Vec<SeasonSummary>>,
    pub correlation_heatmap: Option<CorrelationMatrix>,
    pub station_levels: Option<Vec<StationLevel>>,
}

/// Runs exactly the aggregates named in `specs` against the view.
///
/// Loader and filter failures abort the render cycle before this point;
/// here, only genuine computation errors (e.g. a column missing for a
/// requested view) propagate.
pub fn render_report(view: &FilteredView, specs: &[ViewSpec]) -> Result<Report, AerostatError> {
    let mut report = Report::default();
    for spec in specs {
        match *spec {
            ViewSpec::Distribution => {
                report.distribution = Some(view.distribution_summary()?);
            }
            ViewSpec::WindRose { top_n } => {
                report.wind_rose = Some(view.dominant_wind_directions(top_n)?);
            }
            ViewSpec::HourlyTrend => {
                report.hourly_trend = Some(view.hourly_mean()?);
            }
            ViewSpec::MonthlyTrend => {
                report.monthly_trend = Some(view.monthly_mean()?);
            }
            ViewSpec::SeasonalComparison => {
                report.seasonal_comparison = Some(view.seasonal_summary()?);
            }
            ViewSpec::CorrelationHeatmap => {
                report.correlation_heatmap = Some(view.correlation_matrix()?);
            }
            ViewSpec::StationLevels => {
                report.station_levels = Some(view.station_levels()?);
            }
        }
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Dataset;
    use crate::filtering::FilterCriteria;
    use crate::types::schema::SchemaConfig;
    use chrono::{NaiveDate, NaiveDateTime};
    use polars::prelude::*;

    fn dt(m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2015, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    fn sample_view() -> crate::view::FilteredView {
        let datetimes = vec![dt(3, 1, 0), dt(3, 1, 1), dt(7, 10, 12), dt(12, 24, 23)];
        let df = DataFrame::new(vec![
            Column::new("station".into(), ["Changping"; 4].as_slice()),
            Column::new("datetime".into(), datetimes),
            Column::new(
                "PM2.5".into(),
                [Some(12.0), Some(80.0), None, Some(130.0)].as_slice(),
            ),
            Column::new(
                "wd".into(),
                [Some("N"), Some("N"), Some("SE"), None].as_slice(),
            ),
            Column::new(
                "WSPM".into(),
                [Some(1.0), Some(2.0), Some(3.0), Some(4.0)].as_slice(),
            ),
            Column::new(
                "TEMP".into(),
                [Some(-2.0), Some(5.0), Some(28.0), Some(0.5)].as_slice(),
            ),
        ])
        .unwrap();

        let dataset = Dataset::from_frame(df, SchemaConfig::default());
        dataset
            .filter(&FilterCriteria::new(
                ["Changping"],
                NaiveDate::from_ymd_opt(2015, 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(2015, 12, 31).unwrap(),
            ))
            .unwrap()
    }

    #[test]
    fn only_requested_views_are_rendered() {
        let view = sample_view();
        let report = render_report(
            &view,
            &[ViewSpec::Distribution, ViewSpec::WindRose { top_n: 5 }],
        )
        .unwrap();

        assert!(report.distribution.is_some());
        assert!(report.wind_rose.is_some());
        assert!(report.hourly_trend.is_none());
        assert!(report.monthly_trend.is_none());
        assert!(report.correlation_heatmap.is_none());
    }

    #[test]
    fn full_report_renders_every_view() {
        let view = sample_view();
        let report = render_report(
            &view,
            &[
                ViewSpec::Distribution,
                ViewSpec::WindRose { top_n: 3 },
                ViewSpec::HourlyTrend,
                ViewSpec::MonthlyTrend,
                ViewSpec::SeasonalComparison,
                ViewSpec::CorrelationHeatmap,
                ViewSpec::StationLevels,
            ],
        )
        .unwrap();

        assert_eq!(report.distribution.as_ref().unwrap().count, 3);
        assert_eq!(report.wind_rose.as_ref().unwrap()[0].value, "N");
        assert_eq!(report.seasonal_comparison.as_ref().unwrap().len(), 4);
        assert_eq!(report.station_levels.as_ref().unwrap().len(), 1);
        let monthly = report.monthly_trend.as_ref().unwrap();
        // July's only reading is missing, so its bucket is omitted.
        assert_eq!(monthly.len(), 2);
        assert!(monthly.windows(2).all(|w| (w[0].year, w[0].month) < (w[1].year, w[1].month)));
    }

    #[test]
    fn empty_view_produces_placeholder_outputs_not_errors() {
        let view = sample_view();
        let empty = view
            .filter(&FilterCriteria::new(
                Vec::<String>::new(),
                NaiveDate::from_ymd_opt(2015, 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(2015, 12, 31).unwrap(),
            ))
            .unwrap();

        let report = render_report(
            &empty,
            &[
                ViewSpec::Distribution,
                ViewSpec::WindRose { top_n: 5 },
                ViewSpec::SeasonalComparison,
            ],
        )
        .unwrap();

        assert!(report.distribution.unwrap().is_empty());
        assert!(report.wind_rose.unwrap().is_empty());
        assert_eq!(report.seasonal_comparison.unwrap().len(), 4);
    }
}
