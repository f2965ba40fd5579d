// Tue Aug 18 2026 - Alex

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("cache serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}
