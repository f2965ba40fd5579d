// Tue Aug 18 2026 - Alex

pub mod analyzer;
pub mod result;

pub use analyzer::{RootPathAnalyzer, MAX_CHAIN_DEPTH};
pub use result::{AnalysisResult, ChainLink, RootPath};
