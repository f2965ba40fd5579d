// Tue Aug 18 2026 - Alex

pub mod edge;
pub mod layout;
pub mod node;
pub mod overlay;

pub use edge::LeakEdge;
pub use layout::{layout, NodePosition};
pub use node::LeakNode;
pub use overlay::{OverlayBuilder, VISUAL_DEPTH_LIMIT};

use crate::heap::ObjectAddress;
use indexmap::map::Entry;
use indexmap::{IndexMap, IndexSet};

/// Overlay graph accumulated from many independent analysis results.
///
/// Nodes and edges keep first-sighting order so layout and export are
/// deterministic for identical inputs.
#[derive(Debug, Clone, Default)]
pub struct LeakGraph {
    nodes: IndexMap<u64, LeakNode>,
    edges: IndexSet<LeakEdge>,
}

impl LeakGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get_node(&self, address: ObjectAddress) -> Option<&LeakNode> {
        self.nodes.get(&address.as_u64())
    }

    pub fn nodes(&self) -> impl Iterator<Item = &LeakNode> {
        self.nodes.values()
    }

    pub fn edges(&self) -> impl Iterator<Item = &LeakEdge> {
        self.edges.iter()
    }

    pub fn contains_edge(&self, parent: ObjectAddress, child: ObjectAddress) -> bool {
        self.edges.contains(&LeakEdge::new(parent, child))
    }

    pub fn max_depth(&self) -> usize {
        self.nodes.values().map(|n| n.depth()).max().unwrap_or(0)
    }

    /// Insert the node if unseen, otherwise lower its depth to the minimum
    /// observed and keep the first label. Does not change the reference
    /// count; sightings do that through `touch`.
    pub fn ensure_node(
        &mut self,
        address: ObjectAddress,
        label: &str,
        is_root: bool,
        depth: usize,
    ) {
        match self.nodes.entry(address.as_u64()) {
            Entry::Occupied(mut entry) => {
                let node = entry.get_mut();
                node.observe_depth(depth);
                if is_root {
                    node.mark_root();
                }
            }
            Entry::Vacant(entry) => {
                entry.insert(LeakNode::new(address, label, is_root, depth));
            }
        }
    }

    /// Count one chain sighting against an existing node.
    pub fn touch(&mut self, address: ObjectAddress) {
        if let Some(node) = self.nodes.get_mut(&address.as_u64()) {
            node.increment_references();
        }
    }

    /// Returns false when the edge was already present.
    pub fn add_edge(&mut self, parent: ObjectAddress, child: ObjectAddress) -> bool {
        self.edges.insert(LeakEdge::new(parent, child))
    }
}
