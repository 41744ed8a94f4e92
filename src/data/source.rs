//! References to a tabular data source: a local file or a remote URL.

use std::fmt;
use std::path::PathBuf;

/// Where the dataset CSV lives.
///
/// Sources ending in `.gz` are transparently decompressed while loading.
/// A `DataSource` is also the cache identity: loading the same source twice
/// within a process returns the identical cached frame.
///
/// # Examples
///
/// ```
/// use aerostat::DataSource;
///
/// let local = DataSource::path("dashboard/main_data.csv");
/// let remote = DataSource::url("https://example.com/air-quality.csv.gz");
/// assert!(!local.to_string().is_empty());
/// assert_ne!(local, remote);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DataSource {
    Path(PathBuf),
    Url(String),
}

impl DataSource {
    pub fn path(path: impl Into<PathBuf>) -> Self {
        DataSource::Path(path.into())
    }

    pub fn url(url: impl Into<String>) -> Self {
        DataSource::Url(url.into())
    }

    pub(crate) fn is_gzipped(&self) -> bool {
        match self {
            DataSource::Path(p) => p.extension().is_some_and(|ext| ext == "gz"),
            DataSource::Url(u) => u.ends_with(".gz"),
        }
    }

    /// Filesystem-safe identifier used to name the parquet cache file.
    pub(crate) fn cache_key(&self) -> String {
        let raw = self.to_string();
        raw.chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
            .collect()
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Path(p) => write!(f, "{}", p.display()),
            DataSource::Url(u) => write!(f, "{}", u),
        }
    }
}
