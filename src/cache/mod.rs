// Tue Aug 18 2026 - Alex

pub mod error;
pub mod store;

pub use error::CacheError;
pub use store::{AnalysisCache, CacheEntry};
