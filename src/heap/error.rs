// Mon Aug 17 2026 - Alex

use thiserror::Error;

#[derive(Error, Debug)]
pub enum HeapError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid object at address 0x{0:x}")]
    InvalidObject(u64),
    #[error("Cannot resolve type for address 0x{0:x}")]
    TypeResolution(u64),
    #[error("Snapshot parse error: {0}")]
    SnapshotParse(String),
    #[error("Snapshot version {found} is not supported (expected {expected})")]
    SnapshotVersion { found: u32, expected: u32 },
    #[error("Process not found: {0}")]
    ProcessNotFound(i32),
    #[error("Timed out waiting for a snapshot from process {0}")]
    CaptureTimeout(i32),
    #[error("Signal delivery to process {pid} failed (errno {errno})")]
    SignalFailed { pid: i32, errno: i32 },
    #[error("Not supported: {0}")]
    NotSupported(String),
}
