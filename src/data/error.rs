use polars::error::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

/// Failures while obtaining the raw dataset: the source could not be read,
/// parsed, or cached. All of these are fatal for the render cycle that
/// triggered the load.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to create cache directory '{0}'")]
    CacheDirCreation(PathBuf, #[source] std::io::Error),

    #[error("I/O error writing parquet cache file '{0}'")]
    ParquetWriteIo(PathBuf, #[source] std::io::Error),

    #[error("Encoding error writing parquet cache file '{0}'")]
    ParquetWritePolars(PathBuf, #[source] PolarsError),

    #[error("Failed to scan parquet cache file '{0}'")]
    ParquetScan(PathBuf, #[source] PolarsError),

    #[error("Failed to read source file '{0}'")]
    SourceRead(PathBuf, #[source] std::io::Error),

    #[error("Network request failed for {0}")]
    NetworkRequest(String, #[source] reqwest::Error),

    #[error("HTTP request failed for {url} with status {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
        #[source]
        source: reqwest::Error,
    },

    #[error("Data download or decompression failed")]
    DownloadIo(#[from] std::io::Error),

    #[error("I/O error processing CSV data from '{source_ref}'")]
    CsvReadIo {
        source_ref: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Parsing error processing CSV data from '{source_ref}'")]
    CsvReadPolars {
        source_ref: String,
        #[source]
        source: PolarsError,
    },

    #[error("Background task failed to complete")]
    TaskJoin(#[from] tokio::task::JoinError),

    #[error("Required column '{column}' not found in '{source_ref}'")]
    MissingColumn { source_ref: String, column: String },

    #[error("Timestamp column '{column}' in '{source_ref}' did not parse as a datetime (got {dtype})")]
    TimestampParse {
        source_ref: String,
        column: String,
        dtype: String,
    },
}
