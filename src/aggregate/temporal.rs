//! Hour-of-day, year-month and seasonal aggregations of the pollutant column.

use crate::error::AerostatError;
use crate::types::schema::SchemaConfig;
use crate::types::season::Season;
use crate::types::summaries::{HourlyMean, MonthlyMean, SeasonSummary};
use polars::prelude::*;

fn value_expr(schema: &SchemaConfig) -> Expr {
    col(schema.pollutant()).cast(DataType::Float64).alias("value")
}

/// Mean pollutant concentration per hour of the day (0-23), ascending by
/// hour. Hours with no observations are omitted, not zero-filled.
pub fn hourly_mean(
    frame: LazyFrame,
    schema: &SchemaConfig,
) -> Result<Vec<HourlyMean>, AerostatError> {
    let df = frame
        .select([
            col(schema.datetime())
                .dt()
                .hour()
                .cast(DataType::UInt32)
                .alias("hour"),
            value_expr(schema),
        ])
        .group_by([col("hour")])
        .agg([col("value").mean().alias("mean")])
        .sort(["hour"], SortMultipleOptions::default())
        .collect()?;

    let hours = df.column("hour")?.u32()?;
    let means = df.column("mean")?.f64()?;

    let mut out = Vec::with_capacity(df.height());
    for (hour, mean) in hours.into_iter().zip(means.into_iter()) {
        // A group whose values were all missing has no defined mean; drop it
        // like an absent hour.
        if let (Some(hour), Some(mean)) = (hour, mean) {
            out.push(HourlyMean { hour, mean });
        }
    }
    Ok(out)
}

/// Mean pollutant concentration per year-month bucket, chronological.
///
/// The bucket deliberately combines year and month: twelve-bucket
/// month-of-year cycles collapse different years together and hide trends.
pub fn monthly_mean(
    frame: LazyFrame,
    schema: &SchemaConfig,
) -> Result<Vec<MonthlyMean>, AerostatError> {
    let df = frame
        .select([
            col(schema.datetime()).dt().year().alias("year"),
            col(schema.datetime())
                .dt()
                .month()
                .cast(DataType::UInt32)
                .alias("month"),
            value_expr(schema),
        ])
        .group_by([col("year"), col("month")])
        .agg([col("value").mean().alias("mean")])
        .sort(["year", "month"], SortMultipleOptions::default())
        .collect()?;

    let years = df.column("year")?.i32()?;
    let months = df.column("month")?.u32()?;
    let means = df.column("mean")?.f64()?;

    let mut out = Vec::with_capacity(df.height());
    for i in 0..df.height() {
        if let (Some(year), Some(month), Some(mean)) =
            (years.get(i), months.get(i), means.get(i))
        {
            out.push(MonthlyMean { year, month, mean });
        }
    }
    Ok(out)
}

/// Per-season mean/median/std/count of the pollutant column.
///
/// Always returns exactly four entries in the canonical order
/// Spring, Summer, Autumn, Winter; a season absent from the view (or with
/// only missing values) reports `count == 0` and undefined statistics.
pub fn seasonal_summary(
    frame: LazyFrame,
    schema: &SchemaConfig,
) -> Result<Vec<SeasonSummary>, AerostatError> {
    let month = || col(schema.datetime()).dt().month().cast(DataType::UInt32);
    let season = when(month().gt_eq(lit(3u32)).and(month().lt_eq(lit(5u32))))
        .then(lit(Season::Spring.name()))
        .when(month().gt_eq(lit(6u32)).and(month().lt_eq(lit(8u32))))
        .then(lit(Season::Summer.name()))
        .when(month().gt_eq(lit(9u32)).and(month().lt_eq(lit(11u32))))
        .then(lit(Season::Autumn.name()))
        .when(month().eq(lit(12u32)).or(month().lt_eq(lit(2u32))))
        .then(lit(Season::Winter.name()))
        // A null timestamp has no month and belongs to no season.
        .otherwise(lit(NULL))
        .alias("season");

    let df = frame
        .select([season, value_expr(schema)])
        .group_by([col("season")])
        .agg([
            col("value").count().alias("count"),
            col("value").mean().alias("mean"),
            col("value").median().alias("median"),
            col("value").std(1).alias("std"),
        ])
        .collect()?;

    let labels = df.column("season")?.str()?;
    let counts = df.column("count")?.u32()?;
    let means = df.column("mean")?.f64()?;
    let medians = df.column("median")?.f64()?;
    let stds = df.column("std")?.f64()?;

    let mut out: Vec<SeasonSummary> = Season::ALL.iter().map(|&s| SeasonSummary::empty(s)).collect();
    for i in 0..df.height() {
        let Some(season) = labels.get(i).and_then(Season::from_name) else {
            continue;
        };
        let count = counts.get(i).unwrap_or(0);
        if count == 0 {
            continue;
        }
        if let Some(slot) = out.iter_mut().find(|summary| summary.season == season) {
            slot.count = count;
            slot.mean = means.get(i);
            slot.median = medians.get(i);
            slot.std_dev = stds.get(i);
        }
    }
    Ok(out)
}
