// Mon Aug 17 2026 - Alex

use crate::heap::{GcRoot, HeapError, ObjectAddress};

/// A finalizable heap object eligible for deep root-path analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateObject {
    pub address: ObjectAddress,
    pub type_name: String,
}

impl CandidateObject {
    pub fn new(address: ObjectAddress, type_name: impl Into<String>) -> Self {
        Self {
            address,
            type_name: type_name.into(),
        }
    }
}

/// Lazily-walkable chain of object addresses, root side first, advancing
/// toward the target. The producer may follow raw next-links, so the
/// sequence can repeat addresses or never end; consumers must bring their
/// own cycle/depth guards.
pub type ChainWalk = Box<dyn Iterator<Item = ObjectAddress> + Send>;

/// One root plus the raw reference chain from it toward a target object.
pub struct RawRootPath {
    pub root: GcRoot,
    pub chain: ChainWalk,
}

impl RawRootPath {
    pub fn new(root: GcRoot, chain: ChainWalk) -> Self {
        Self { root, chain }
    }

    pub fn from_addresses(root: GcRoot, addresses: Vec<ObjectAddress>) -> Self {
        Self {
            root,
            chain: Box::new(addresses.into_iter()),
        }
    }
}

/// Narrow introspection contract against the managed heap.
///
/// Everything runtime-specific (attaching, dump decoding, heap walking)
/// lives behind this trait; the analysis engine consumes only resolved
/// `(address, type-name)` facts and raw chains.
pub trait HeapInspectionProvider: Send + Sync {
    /// All finalizable objects in the inspected heap, with resolved types.
    fn enumerate_candidates(&self) -> Result<Vec<CandidateObject>, HeapError>;

    /// The GC roots keeping `target` alive, each with the raw reference
    /// chain from the root toward `target`.
    fn enumerate_root_paths(&self, target: ObjectAddress) -> Result<Vec<RawRootPath>, HeapError>;

    /// Resolved type name for an object address.
    fn resolve_type(&self, address: ObjectAddress) -> Result<String, HeapError>;
}
