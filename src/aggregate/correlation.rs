//! Pairwise Pearson correlation over the fixed numeric columns.

use crate::error::AerostatError;
use crate::types::schema::SchemaConfig;
use crate::types::summaries::CorrelationMatrix;
use polars::prelude::*;

/// Pearson correlation between every pair of {pollutant, wind speed,
/// temperature}, with missing values excluded pairwise.
///
/// The matrix is symmetric with 1.0 on the diagonal; a pair with fewer than
/// two complete observations, or with zero variance on either side, is `NaN`.
pub fn correlation_matrix(
    frame: LazyFrame,
    schema: &SchemaConfig,
) -> Result<CorrelationMatrix, AerostatError> {
    let columns = [
        schema.pollutant().to_string(),
        schema.wind_speed().to_string(),
        schema.temperature().to_string(),
    ];

    let df = frame
        .select(
            columns
                .iter()
                .map(|name| col(name.as_str()).cast(DataType::Float64))
                .collect::<Vec<_>>(),
        )
        .collect()?;

    let mut series: Vec<Vec<Option<f64>>> = Vec::with_capacity(columns.len());
    for name in &columns {
        series.push(df.column(name)?.f64()?.to_vec());
    }

    let n = columns.len();
    let mut values = vec![vec![f64::NAN; n]; n];
    for i in 0..n {
        values[i][i] = 1.0;
        for j in (i + 1)..n {
            let r = pairwise_pearson(&series[i], &series[j]);
            values[i][j] = r;
            values[j][i] = r;
        }
    }

    Ok(CorrelationMatrix::new(columns.to_vec(), values))
}

/// Pearson's r over the rows where both sides are present.
fn pairwise_pearson(a: &[Option<f64>], b: &[Option<f64>]) -> f64 {
    let pairs: Vec<(f64, f64)> = a
        .iter()
        .zip(b.iter())
        .filter_map(|(x, y)| Some(((*x)?, (*y)?)))
        .collect();
    if pairs.len() < 2 {
        return f64::NAN;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|(_, y)| y).sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (x, y) in &pairs {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    let denom = (var_x * var_y).sqrt();
    if denom == 0.0 {
        return f64::NAN;
    }
    cov / denom
}
