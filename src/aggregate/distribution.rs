//! Distribution summary of the pollutant column.

use crate::error::AerostatError;
use crate::types::schema::SchemaConfig;
use crate::types::summaries::DistributionSummary;
use polars::prelude::*;

/// Computes count, mean, standard deviation (ddof 1) and the min/quartile/max
/// spread of the pollutant column, ignoring missing values. An empty view
/// yields `count == 0` with every statistic `None`.
///
/// Quantiles use linear interpolation, matching the `describe` output the
/// dashboard tables were built around.
pub fn distribution_summary(
    frame: LazyFrame,
    schema: &SchemaConfig,
) -> Result<DistributionSummary, AerostatError> {
    let value = || col(schema.pollutant()).cast(DataType::Float64);

    let df = frame
        .select([
            value().count().alias("count"),
            value().mean().alias("mean"),
            value().std(1).alias("std"),
            value().min().alias("min"),
            value()
                .quantile(lit(0.25), QuantileMethod::Linear)
                .alias("p25"),
            value()
                .quantile(lit(0.5), QuantileMethod::Linear)
                .alias("median"),
            value()
                .quantile(lit(0.75), QuantileMethod::Linear)
                .alias("p75"),
            value().max().alias("max"),
        ])
        .collect()?;

    let stat = |name: &str| -> Result<Option<f64>, AerostatError> {
        Ok(df.column(name)?.f64()?.get(0))
    };

    Ok(DistributionSummary {
        count: df.column("count")?.u32()?.get(0).unwrap_or(0),
        mean: stat("mean")?,
        std_dev: stat("std")?,
        min: stat("min")?,
        p25: stat("p25")?,
        median: stat("median")?,
        p75: stat("p75")?,
        max: stat("max")?,
    })
}
