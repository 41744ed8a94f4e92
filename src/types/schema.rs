//! Column bindings for an air-quality dataset.
//!
//! The default names match the Beijing multi-station PM2.5 export the crate
//! was built around. Every pipeline operation resolves columns through a
//! [`SchemaConfig`], so datasets with different headers only need a remapped
//! schema, not a rewritten pipeline.

use serde::{Deserialize, Serialize};

/// Default name of the station identifier column.
pub const DEFAULT_STATION_COLUMN: &str = "station";
/// Default name of the timestamp column.
pub const DEFAULT_DATETIME_COLUMN: &str = "datetime";
/// Default name of the pollutant concentration column.
pub const DEFAULT_POLLUTANT_COLUMN: &str = "PM2.5";
/// Default name of the categorical wind-direction column.
pub const DEFAULT_WIND_DIRECTION_COLUMN: &str = "wd";
/// Default name of the wind-speed column.
pub const DEFAULT_WIND_SPEED_COLUMN: &str = "WSPM";
/// Default name of the temperature column.
pub const DEFAULT_TEMPERATURE_COLUMN: &str = "TEMP";

/// Maps the logical columns of the pipeline onto concrete dataset headers.
///
/// # Examples
///
/// ```
/// use aerostat::SchemaConfig;
///
/// let schema = SchemaConfig::new().with_pollutant("PM10");
/// assert_eq!(schema.pollutant(), "PM10");
/// assert_eq!(schema.station(), "station");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SchemaConfig {
    station: String,
    datetime: String,
    pollutant: String,
    wind_direction: String,
    wind_speed: String,
    temperature: String,
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            station: DEFAULT_STATION_COLUMN.to_string(),
            datetime: DEFAULT_DATETIME_COLUMN.to_string(),
            pollutant: DEFAULT_POLLUTANT_COLUMN.to_string(),
            wind_direction: DEFAULT_WIND_DIRECTION_COLUMN.to_string(),
            wind_speed: DEFAULT_WIND_SPEED_COLUMN.to_string(),
            temperature: DEFAULT_TEMPERATURE_COLUMN.to_string(),
        }
    }
}

impl SchemaConfig {
    /// Creates a schema with the default column names.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebinds the station identifier column.
    pub fn with_station(mut self, name: impl Into<String>) -> Self {
        self.station = name.into();
        self
    }

    /// Rebinds the timestamp column.
    pub fn with_datetime(mut self, name: impl Into<String>) -> Self {
        self.datetime = name.into();
        self
    }

    /// Rebinds the pollutant concentration column.
    pub fn with_pollutant(mut self, name: impl Into<String>) -> Self {
        self.pollutant = name.into();
        self
    }

    /// Rebinds the categorical wind-direction column.
    pub fn with_wind_direction(mut self, name: impl Into<String>) -> Self {
        self.wind_direction = name.into();
        self
    }

    /// Rebinds the wind-speed column.
    pub fn with_wind_speed(mut self, name: impl Into<String>) -> Self {
        self.wind_speed = name.into();
        self
    }

    /// Rebinds the temperature column.
    pub fn with_temperature(mut self, name: impl Into<String>) -> Self {
        self.temperature = name.into();
        self
    }

    pub fn station(&self) -> &str {
        &self.station
    }

    pub fn datetime(&self) -> &str {
        &self.datetime
    }

    pub fn pollutant(&self) -> &str {
        &self.pollutant
    }

    pub fn wind_direction(&self) -> &str {
        &self.wind_direction
    }

    pub fn wind_speed(&self) -> &str {
        &self.wind_speed
    }

    pub fn temperature(&self) -> &str {
        &self.temperature
    }

    /// Columns that must be present for a dataset to load at all.
    /// The meteorological columns are optional until an aggregate needs them.
    pub(crate) fn required_columns(&self) -> [&str; 3] {
        [&self.station, &self.datetime, &self.pollutant]
    }
}
