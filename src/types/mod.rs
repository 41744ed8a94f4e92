pub mod pollution_level;
pub mod schema;
pub mod season;
pub mod summaries;
