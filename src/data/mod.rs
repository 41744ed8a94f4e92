pub mod error;
pub(crate) mod fetcher;
pub mod loader;
pub mod source;
