use crate::data::error::LoadError;
use crate::data::loader::DatasetLoader;
use crate::data::source::DataSource;
use crate::types::schema::SchemaConfig;
use polars::prelude::LazyFrame;
use std::collections::{hash_map::Entry, HashMap};
use std::path::Path;
use tokio::sync::Mutex;

/// Process-wide memo of loaded frames, keyed by source reference and the
/// schema the load was validated against.
///
/// The dataset is static reference data: once loaded, the same source always
/// yields the identical frame for the rest of the session with no
/// invalidation path. Keying on the schema as well keeps the column and
/// timestamp validation honest when the same source is requested with
/// different column bindings.
pub(crate) struct FrameCache {
    loader: DatasetLoader,
    frames: Mutex<HashMap<(DataSource, SchemaConfig), LazyFrame>>,
}

impl FrameCache {
    pub(crate) fn new(cache_dir: &Path) -> Self {
        Self {
            loader: DatasetLoader::new(cache_dir),
            frames: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the frame for `source`, loading it at most once.
    pub(crate) async fn get(
        &self,
        source: &DataSource,
        schema: &SchemaConfig,
    ) -> Result<LazyFrame, LoadError> {
        let key = (source.clone(), schema.clone());

        // Fast path: already loaded this session.
        {
            let frames = self.frames.lock().await;
            if let Some(frame) = frames.get(&key) {
                return Ok(frame.clone());
            }
            // Not loaded yet, release the lock before the slow load.
        }

        let loaded_frame = self.loader.get_frame(source, schema).await?;

        let mut frames = self.frames.lock().await;
        match frames.entry(key) {
            Entry::Occupied(entry) => {
                // A concurrent load won the race; keep its frame.
                Ok(entry.get().clone())
            }
            Entry::Vacant(entry) => {
                entry.insert(loaded_frame.clone());
                Ok(loaded_frame)
            }
        }
    }
}
