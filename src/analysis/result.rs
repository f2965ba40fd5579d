// Tue Aug 18 2026 - Alex

use crate::heap::{GcRoot, ObjectAddress, RootKind};
use crate::utils::time;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single resolved object along a root path
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainLink {
    /// Object address
    pub address: ObjectAddress,
    /// Resolved managed type name
    pub type_name: String,
    /// Distance from the root end of the chain, 0-based
    pub depth: usize,
}

impl ChainLink {
    pub fn new(address: ObjectAddress, type_name: impl Into<String>, depth: usize) -> Self {
        Self {
            address,
            type_name: type_name.into(),
            depth,
        }
    }
}

impl fmt::Display for ChainLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ {}", self.type_name, self.address)
    }
}

/// One reference chain holding the analyzed object alive, anchored at a GC root
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RootPath {
    /// 1-based position in the provider's enumeration order
    pub number: usize,
    /// Kind of GC root anchoring the chain
    pub root_kind: RootKind,
    /// Address of the root slot itself
    pub root_address: ObjectAddress,
    /// Links in root-to-object order
    pub links: Vec<ChainLink>,
    /// Walk stopped because an address repeated within this chain
    pub has_circular_dependency: bool,
    /// Walk stopped at the chain length bound
    pub max_depth_reached: bool,
}

impl RootPath {
    pub fn new(number: usize, root: GcRoot) -> Self {
        Self {
            number,
            root_kind: root.kind,
            root_address: root.address,
            links: Vec::new(),
            has_circular_dependency: false,
            max_depth_reached: false,
        }
    }

    pub fn add_link(&mut self, link: ChainLink) {
        self.links.push(link);
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    pub fn last_address(&self) -> Option<ObjectAddress> {
        self.links.last().map(|l| l.address)
    }

    /// Whether the walk ended on `target` instead of stopping early.
    pub fn reaches(&self, target: ObjectAddress) -> bool {
        self.last_address() == Some(target)
    }

    pub fn terminated_early(&self) -> bool {
        self.has_circular_dependency || self.max_depth_reached
    }
}

impl fmt::Display for RootPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {} @ {}", self.number, self.root_kind, self.root_address)?;
        for link in &self.links {
            write!(f, " -> {}", link.address)?;
        }
        if self.has_circular_dependency {
            write!(f, " [circular]")?;
        }
        if self.max_depth_reached {
            write!(f, " [depth limit]")?;
        }
        Ok(())
    }
}

/// Everything learned about one finalizable object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Resolved type name of the analyzed object
    pub type_name: String,
    /// Heap address of the analyzed object
    pub address: ObjectAddress,
    /// Unix seconds when the analysis ran
    pub analyzed_at: u64,
    /// Root paths in provider enumeration order
    pub root_paths: Vec<RootPath>,
}

impl AnalysisResult {
    pub fn new(type_name: impl Into<String>, address: ObjectAddress) -> Self {
        Self {
            type_name: type_name.into(),
            address,
            analyzed_at: time::unix_now(),
            root_paths: Vec::new(),
        }
    }

    pub fn add_path(&mut self, path: RootPath) {
        self.root_paths.push(path);
    }

    pub fn root_path_count(&self) -> usize {
        self.root_paths.len()
    }

    /// No chain from any GC root reaches this object; the finalizer simply
    /// has not run yet.
    pub fn is_orphaned(&self) -> bool {
        self.root_paths.is_empty()
    }

    pub fn has_truncated_path(&self) -> bool {
        self.root_paths.iter().any(|p| p.terminated_early())
    }

    pub fn longest_chain(&self) -> usize {
        self.root_paths.iter().map(|p| p.len()).max().unwrap_or(0)
    }

    /// Unique root kinds holding this object alive, in first-appearance order.
    pub fn root_kinds(&self) -> Vec<RootKind> {
        let mut kinds: Vec<RootKind> = Vec::new();
        for path in &self.root_paths {
            if !kinds.contains(&path.root_kind) {
                kinds.push(path.root_kind);
            }
        }
        kinds
    }
}
