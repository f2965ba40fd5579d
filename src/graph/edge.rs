// Tue Aug 18 2026 - Alex

use crate::heap::ObjectAddress;
use std::fmt;

/// Directed reference in the overlay graph, parent (closer to a root)
/// pointing at child (closer to the target).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LeakEdge {
    parent: ObjectAddress,
    child: ObjectAddress,
}

impl LeakEdge {
    pub fn new(parent: ObjectAddress, child: ObjectAddress) -> Self {
        Self { parent, child }
    }

    pub fn parent(&self) -> ObjectAddress {
        self.parent
    }

    pub fn child(&self) -> ObjectAddress {
        self.child
    }
}

impl fmt::Display for LeakEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.parent, self.child)
    }
}
