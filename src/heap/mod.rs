// Mon Aug 17 2026 - Alex

pub mod address;
pub mod error;
pub mod live;
pub mod provider;
pub mod root;
pub mod snapshot;

pub use address::ObjectAddress;
pub use error::HeapError;
pub use live::LiveCapture;
pub use provider::{CandidateObject, ChainWalk, HeapInspectionProvider, RawRootPath};
pub use root::{GcRoot, RootKind};
pub use snapshot::{HeapSnapshot, SnapshotObject, SnapshotProvider, SnapshotRoot, SNAPSHOT_VERSION};
