// Thu Aug 20 2026 - Alex

pub mod analysis;
pub mod cache;
pub mod config;
pub mod graph;
pub mod heap;
pub mod report;
pub mod scanner;
pub mod ui;
pub mod utils;

pub use analysis::RootPathAnalyzer;
pub use cache::AnalysisCache;
pub use config::ScanConfig;
pub use graph::OverlayBuilder;
pub use heap::{HeapInspectionProvider, LiveCapture, SnapshotProvider};
pub use report::{SvgExporter, TextReportWriter};
pub use scanner::{HeapScanner, ScanSummary};
