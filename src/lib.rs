mod aerostat;
mod aggregate;
mod data;
mod dataset;
mod error;
mod filtering;
mod report;
mod types;
mod utils;
mod view;

pub use aerostat::Aerostat;
pub use error::AerostatError;

pub use data::error::LoadError;
pub use data::source::DataSource;

pub use dataset::Dataset;
pub use filtering::FilterCriteria;
pub use view::FilteredView;

pub use report::{render_report, Report, ViewSpec};

pub use types::pollution_level::{categorize, PollutionLevel, HIGH_THRESHOLD, LOW_THRESHOLD};
pub use types::schema::*;
pub use types::season::Season;
pub use types::summaries::*;
