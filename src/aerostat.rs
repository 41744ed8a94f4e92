//! The main entry point for loading air-quality datasets.
//!
//! An [`Aerostat`] client owns the loader and its caches; datasets obtained
//! through it are loaded at most once per source for the life of the process
//! and are immutable afterwards, so they can be shared across render cycles
//! (or sessions) without locking.

use crate::data::fetcher::FrameCache;
use crate::data::source::DataSource;
use crate::dataset::Dataset;
use crate::error::AerostatError;
use crate::types::schema::SchemaConfig;
use crate::utils::{ensure_cache_dir_exists, get_cache_dir};
use bon::bon;
use std::path::PathBuf;

/// Client for loading station readings from a CSV file or URL.
///
/// Create one with [`Aerostat::new()`] (default cache directory) or
/// [`Aerostat::with_cache_folder()`], then load datasets through the
/// [`Aerostat::dataset`] builder.
///
/// # Examples
///
/// ```no_run
/// # use aerostat::{Aerostat, AerostatError, DataSource};
/// # async fn run() -> Result<(), AerostatError> {
/// let client = Aerostat::new().await?;
/// let dataset = client
///     .dataset()
///     .source(DataSource::path("dashboard/main_data.csv"))
///     .call()
///     .await?;
/// # Ok(())
/// # }
/// ```
pub struct Aerostat {
    cache: FrameCache,
}

#[bon]
impl Aerostat {
    /// Creates a client with a specific cache directory, creating the
    /// directory if needed.
    ///
    /// # Errors
    ///
    /// Returns [`AerostatError::CacheDirCreation`] if the directory cannot
    /// be created.
    pub async fn with_cache_folder(cache_folder: PathBuf) -> Result<Self, AerostatError> {
        ensure_cache_dir_exists(&cache_folder)
            .await
            .map_err(|e| AerostatError::CacheDirCreation(cache_folder.clone(), e))?;
        Ok(Self {
            cache: FrameCache::new(&cache_folder),
        })
    }

    /// Creates a client using the default per-user cache directory.
    ///
    /// # Errors
    ///
    /// Returns [`AerostatError::CacheDirResolution`] if the system cache
    /// directory cannot be determined, or [`AerostatError::CacheDirCreation`]
    /// if it cannot be created.
    pub async fn new() -> Result<Self, AerostatError> {
        let cache_folder = get_cache_dir().map_err(AerostatError::CacheDirResolution)?;
        Self::with_cache_folder(cache_folder).await
    }

    /// Loads (or re-uses) the dataset behind a source reference.
    ///
    /// This method uses a builder pattern:
    ///
    /// * `.source(DataSource)`: **Required.** Local path or remote URL of
    ///   the CSV (optionally gzipped).
    /// * `.schema(SchemaConfig)`: Optional. Column bindings; defaults to the
    ///   Beijing air-quality export layout.
    ///
    /// The same source always resolves to the identical cached table for
    /// the rest of the session; there is no invalidation path.
    ///
    /// # Errors
    ///
    /// Returns [`AerostatError::Load`] when the source cannot be read, the
    /// CSV cannot be parsed, required columns are missing, or the timestamp
    /// column does not parse as a datetime.
    #[builder]
    pub async fn dataset(
        &self,
        source: DataSource,
        schema: Option<SchemaConfig>,
    ) -> Result<Dataset, AerostatError> {
        let schema = schema.unwrap_or_default();
        let frame = self.cache.get(&source, &schema).await?;
        Ok(Dataset::new(frame, schema))
    }
}
