// Tue Aug 18 2026 - Alex

use crate::heap::ObjectAddress;
use std::fmt;

/// One object (or GC root) in the overlay graph.
///
/// `depth` is the minimum observed distance from the analyzed target across
/// every merged chain; the target itself sits at 0. `reference_count` is how
/// many chain sightings touched this node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeakNode {
    address: ObjectAddress,
    label: String,
    is_root: bool,
    depth: usize,
    reference_count: usize,
}

impl LeakNode {
    pub fn new(
        address: ObjectAddress,
        label: impl Into<String>,
        is_root: bool,
        depth: usize,
    ) -> Self {
        Self {
            address,
            label: label.into(),
            is_root,
            depth,
            reference_count: 0,
        }
    }

    pub fn address(&self) -> ObjectAddress {
        self.address
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_root(&self) -> bool {
        self.is_root
    }

    pub fn is_target(&self) -> bool {
        self.depth == 0 && !self.is_root
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn reference_count(&self) -> usize {
        self.reference_count
    }

    pub fn mark_root(&mut self) {
        self.is_root = true;
    }

    /// Keep the smallest depth any merged chain observed for this node.
    pub fn observe_depth(&mut self, depth: usize) {
        if depth < self.depth {
            self.depth = depth;
        }
    }

    pub fn increment_references(&mut self) {
        self.reference_count += 1;
    }
}

impl fmt::Display for LeakNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} @ {} (depth {}, refs {})",
            self.label, self.address, self.depth, self.reference_count
        )
    }
}
