// Wed Aug 19 2026 - Alex

pub mod classify;
pub mod scan;

pub use classify::CandidateClassifier;
pub use scan::{HeapScanner, ScanSummary};
