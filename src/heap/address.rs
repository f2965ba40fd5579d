// Mon Aug 17 2026 - Alex

use serde::{Deserialize, Serialize};
use std::fmt;

/// Address of an object (or GC root slot) inside one inspection session.
///
/// Addresses are only meaningful within the session that produced them; a
/// later attach or a GC compaction may reuse the same numeric value for a
/// different object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectAddress {
    value: u64,
}

impl ObjectAddress {
    pub fn new(value: u64) -> Self {
        Self { value }
    }

    pub fn zero() -> Self {
        Self { value: 0 }
    }

    pub fn as_u64(&self) -> u64 {
        self.value
    }

    pub fn is_null(&self) -> bool {
        self.value == 0
    }
}

impl fmt::Display for ObjectAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:016x}", self.value)
    }
}

impl fmt::LowerHex for ObjectAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.value, f)
    }
}

impl fmt::UpperHex for ObjectAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::UpperHex::fmt(&self.value, f)
    }
}

impl From<u64> for ObjectAddress {
    fn from(value: u64) -> Self {
        Self::new(value)
    }
}

impl From<ObjectAddress> for u64 {
    fn from(addr: ObjectAddress) -> Self {
        addr.value
    }
}
