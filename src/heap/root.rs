// Mon Aug 17 2026 - Alex

use crate::heap::ObjectAddress;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of GC root keeping an object alive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RootKind {
    /// Local variable or argument slot on a managed stack frame.
    Stack,
    /// Entry on the finalizer queue awaiting its finalizer run.
    FinalizerQueue,
    /// Strong GC handle.
    StrongHandle,
    /// Pinned GC handle.
    PinnedHandle,
    /// Async-pinned GC handle (overlapped I/O).
    AsyncPinnedHandle,
    /// Reference-counted GC handle.
    RefCountHandle,
    /// Static field slot.
    StaticVar,
    /// Thread-static field slot.
    ThreadStaticVar,
    /// Anything the runtime reported that we do not model explicitly.
    Other,
}

impl RootKind {
    pub fn is_handle(&self) -> bool {
        matches!(
            self,
            RootKind::StrongHandle
                | RootKind::PinnedHandle
                | RootKind::AsyncPinnedHandle
                | RootKind::RefCountHandle
        )
    }

    pub fn is_pinning(&self) -> bool {
        matches!(self, RootKind::PinnedHandle | RootKind::AsyncPinnedHandle)
    }
}

impl fmt::Display for RootKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RootKind::Stack => "Stack",
            RootKind::FinalizerQueue => "FinalizerQueue",
            RootKind::StrongHandle => "StrongHandle",
            RootKind::PinnedHandle => "PinnedHandle",
            RootKind::AsyncPinnedHandle => "AsyncPinnedHandle",
            RootKind::RefCountHandle => "RefCountHandle",
            RootKind::StaticVar => "StaticVar",
            RootKind::ThreadStaticVar => "ThreadStaticVar",
            RootKind::Other => "Other",
        };
        write!(f, "{}", name)
    }
}

/// One GC root as reported by the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GcRoot {
    pub kind: RootKind,
    pub address: ObjectAddress,
}

impl GcRoot {
    pub fn new(kind: RootKind, address: ObjectAddress) -> Self {
        Self { kind, address }
    }
}

impl fmt::Display for GcRoot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ {}", self.kind, self.address)
    }
}
