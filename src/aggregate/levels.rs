//! Per-station mean concentrations and their pollution-level categories.

use crate::error::AerostatError;
use crate::types::pollution_level::categorize;
use crate::types::schema::SchemaConfig;
use crate::types::summaries::StationLevel;
use polars::prelude::*;

/// Mean pollutant concentration per station with its derived category,
/// sorted by station identifier. Stations whose values are all missing have
/// no defined mean and are skipped rather than classified.
pub fn station_levels(
    frame: LazyFrame,
    schema: &SchemaConfig,
) -> Result<Vec<StationLevel>, AerostatError> {
    let df = frame
        .select([
            col(schema.station()),
            col(schema.pollutant()).cast(DataType::Float64).alias("value"),
        ])
        .group_by([col(schema.station())])
        .agg([col("value").mean().alias("mean")])
        .sort([schema.station()], SortMultipleOptions::default())
        .collect()?;

    let stations = df.column(schema.station())?.str()?;
    let means = df.column("mean")?.f64()?;

    let mut out = Vec::with_capacity(df.height());
    for i in 0..df.height() {
        if let (Some(station), Some(mean)) = (stations.get(i), means.get(i)) {
            out.push(StationLevel {
                station: station.to_string(),
                mean,
                level: categorize(mean)?,
            });
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::pollution_level::PollutionLevel;

    fn frame(rows: &[(&str, Option<f64>)]) -> LazyFrame {
        let stations: Vec<&str> = rows.iter().map(|r| r.0).collect();
        let values: Vec<Option<f64>> = rows.iter().map(|r| r.1).collect();
        DataFrame::new(vec![
            Column::new("station".into(), stations),
            Column::new("PM2.5".into(), values),
        ])
        .unwrap()
        .lazy()
    }

    #[test]
    fn stations_are_classified_by_their_mean() {
        let levels = station_levels(
            frame(&[
                ("Dingling", Some(40.0)),
                ("Dingling", Some(60.0)),
                ("Dongsi", Some(95.0)),
                ("Dongsi", Some(105.0)),
                ("Guanyuan", Some(80.0)),
            ]),
            &SchemaConfig::default(),
        )
        .unwrap();

        assert_eq!(levels.len(), 3);
        assert_eq!(levels[0].station, "Dingling");
        assert_eq!(levels[0].level, PollutionLevel::Low);
        assert_eq!(levels[1].station, "Dongsi");
        assert_eq!(levels[1].level, PollutionLevel::High);
        assert_eq!(levels[2].station, "Guanyuan");
        assert_eq!(levels[2].level, PollutionLevel::Medium);
    }

    #[test]
    fn stations_with_no_data_are_skipped() {
        let levels = station_levels(
            frame(&[("Dingling", None), ("Dongsi", Some(10.0))]),
            &SchemaConfig::default(),
        )
        .unwrap();
        assert_eq!(levels.len(), 1);
        assert_eq!(levels[0].station, "Dongsi");
    }

    #[test]
    fn empty_view_yields_no_levels() {
        let levels = station_levels(frame(&[]), &SchemaConfig::default()).unwrap();
        assert!(levels.is_empty());
    }
}
