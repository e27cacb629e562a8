//! Intermediate result caching.
//!
//! Each completed step's output can be snapshotted to
//! `<cache_dir>/<step name>_result.json`. The cache is write-mostly: the
//! engine never reads it back, it exists for inspection and debugging.

pub mod store;

pub use store::{CachedResult, ResultCache};
