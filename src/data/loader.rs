use crate::data::error::LoadError;
use crate::data::source::DataSource;
use crate::types::schema::SchemaConfig;
use async_compression::tokio::bufread::GzipDecoder;
use futures_util::TryStreamExt;
use log::{info, warn};
use polars::frame::DataFrame;
use polars::prelude::*;
use reqwest::Client;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tokio::io::AsyncReadExt;
use tokio::{fs, task};
use tokio_util::io::StreamReader;

/// Reads a dataset source into a `LazyFrame`, caching the parsed table as
/// parquet so the same source is never fetched or parsed twice across
/// process runs.
pub struct DatasetLoader {
    cache_dir: PathBuf,
    download_client: Client,
}

impl DatasetLoader {
    pub fn new(cache_dir: &Path) -> DatasetLoader {
        let download_client = Client::new();
        DatasetLoader {
            cache_dir: cache_dir.to_path_buf(),
            download_client,
        }
    }

    /// Loads the table behind `source`, validating it against `schema`.
    ///
    /// On a cache miss the raw CSV is fetched, parsed on a blocking task and
    /// written to a parquet cache file; the returned frame always scans that
    /// cache file.
    pub async fn get_frame(
        &self,
        source: &DataSource,
        schema: &SchemaConfig,
    ) -> Result<LazyFrame, LoadError> {
        let cache_filename = format!("dataset-{}.parquet", source.cache_key());
        let parquet_path = self.cache_dir.join(&cache_filename);

        if fs::metadata(&parquet_path).await.is_ok() {
            info!("Cache hit for source {} at {:?}", source, parquet_path);
        } else {
            warn!("Cache miss for source {}. Reading and parsing.", source);

            let raw_bytes = self.read_source(source).await?;
            let df = Self::csv_to_dataframe(raw_bytes, source, schema).await?;

            fs::create_dir_all(&self.cache_dir)
                .await
                .map_err(|e| LoadError::CacheDirCreation(self.cache_dir.clone(), e))?;

            Self::cache_dataframe(df, &parquet_path).await?;
            info!("Cached source {} to {:?}", source, parquet_path);
        }

        let mut frame = LazyFrame::scan_parquet(&parquet_path, Default::default())
            .map_err(|e| LoadError::ParquetScan(parquet_path.clone(), e))?;

        // The parquet cache is keyed by source alone, so a cache hit still
        // has to be checked against the schema of this request.
        let frame_schema = frame
            .collect_schema()
            .map_err(|e| LoadError::ParquetScan(parquet_path.clone(), e))?;
        let source_ref = source.to_string();
        for column in schema.required_columns() {
            if !frame_schema.contains(column) {
                return Err(LoadError::MissingColumn {
                    source_ref,
                    column: column.to_string(),
                });
            }
        }
        match frame_schema.get(schema.datetime()) {
            Some(DataType::Datetime(_, _)) => Ok(frame),
            Some(dtype) => Err(LoadError::TimestampParse {
                source_ref,
                column: schema.datetime().to_string(),
                dtype: format!("{}", dtype),
            }),
            None => Err(LoadError::MissingColumn {
                source_ref,
                column: schema.datetime().to_string(),
            }),
        }
    }

    /// Obtains the raw CSV bytes, decompressing `.gz` sources on the fly.
    async fn read_source(&self, source: &DataSource) -> Result<Vec<u8>, LoadError> {
        match source {
            DataSource::Path(path) => {
                let bytes = fs::read(path)
                    .await
                    .map_err(|e| LoadError::SourceRead(path.clone(), e))?;
                if source.is_gzipped() {
                    let mut decoder = GzipDecoder::new(&bytes[..]);
                    let mut decompressed = Vec::new();
                    decoder.read_to_end(&mut decompressed).await?;
                    Ok(decompressed)
                } else {
                    Ok(bytes)
                }
            }
            DataSource::Url(url) => self.download(url, source.is_gzipped()).await,
        }
    }

    /// Downloads a remote source, streaming through a gzip decoder if needed.
    async fn download(&self, url: &str, gzipped: bool) -> Result<Vec<u8>, LoadError> {
        info!("Downloading data from {}", url);

        let response = self
            .download_client
            .get(url)
            .send()
            .await
            .map_err(|e| LoadError::NetworkRequest(url.to_string(), e))?;

        let response = match response.error_for_status() {
            Ok(resp) => resp,
            Err(e) => {
                warn!("HTTP error for {}: {:?}", url, e);
                return Err(if let Some(status) = e.status() {
                    LoadError::HttpStatus {
                        url: url.to_string(),
                        status,
                        source: e,
                    }
                } else {
                    LoadError::NetworkRequest(url.to_string(), e)
                });
            }
        };

        let stream = response
            .bytes_stream()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e));
        let stream_reader = StreamReader::new(stream);

        let mut body = Vec::new();
        if gzipped {
            let mut decoder = GzipDecoder::new(stream_reader);
            decoder.read_to_end(&mut body).await?;
        } else {
            let mut reader = stream_reader;
            reader.read_to_end(&mut body).await?;
        }
        info!("Downloaded {} bytes from {}", body.len(), url);
        Ok(body)
    }

    /// Parses raw CSV bytes (with header row) into a DataFrame on a blocking
    /// task, letting the reader infer the timestamp column as a datetime.
    /// Validates that the schema's required columns are present and that the
    /// timestamp column actually parsed.
    async fn csv_to_dataframe(
        bytes: Vec<u8>,
        source: &DataSource,
        schema: &SchemaConfig,
    ) -> Result<DataFrame, LoadError> {
        let source_ref = source.to_string();
        let schema = schema.clone();

        task::spawn_blocking(move || {
            let mut temp_file = NamedTempFile::new().map_err(|e| LoadError::CsvReadIo {
                source_ref: source_ref.clone(),
                source: e,
            })?;
            temp_file.write_all(&bytes).map_err(|e| LoadError::CsvReadIo {
                source_ref: source_ref.clone(),
                source: e,
            })?;
            temp_file.flush().map_err(|e| LoadError::CsvReadIo {
                source_ref: source_ref.clone(),
                source: e,
            })?;

            let df = CsvReadOptions::default()
                .with_has_header(true)
                .with_parse_options(CsvParseOptions::default().with_try_parse_dates(true))
                .try_into_reader_with_file_path(Some(temp_file.path().to_path_buf()))
                .map_err(|e| LoadError::CsvReadPolars {
                    source_ref: source_ref.clone(),
                    source: e,
                })?
                .finish()
                .map_err(|e| LoadError::CsvReadPolars {
                    source_ref: source_ref.clone(),
                    source: e,
                })?;

            for column in schema.required_columns() {
                if df.column(column).is_err() {
                    warn!("Column '{}' missing from source {}", column, source_ref);
                    return Err(LoadError::MissingColumn {
                        source_ref,
                        column: column.to_string(),
                    });
                }
            }

            let dt_dtype = df
                .column(schema.datetime())
                .map_err(|_| LoadError::MissingColumn {
                    source_ref: source_ref.clone(),
                    column: schema.datetime().to_string(),
                })?
                .dtype()
                .clone();
            if !matches!(dt_dtype, DataType::Datetime(_, _)) {
                return Err(LoadError::TimestampParse {
                    source_ref,
                    column: schema.datetime().to_string(),
                    dtype: format!("{}", dt_dtype),
                });
            }

            Ok(df)
        })
        .await?
    }

    /// Writes a DataFrame to a parquet file on a blocking task.
    async fn cache_dataframe(mut df: DataFrame, path: &Path) -> Result<(), LoadError> {
        let path_buf = path.to_path_buf();
        task::spawn_blocking(move || {
            let file = std::fs::File::create(&path_buf)
                .map_err(|e| LoadError::ParquetWriteIo(path_buf.clone(), e))?;
            ParquetWriter::new(file)
                .with_compression(ParquetCompression::Snappy)
                .finish(&mut df)
                .map_err(|e| LoadError::ParquetWritePolars(path_buf, e))?;
            Ok::<(), LoadError>(())
        })
        .await??;
        Ok(())
    }
}
