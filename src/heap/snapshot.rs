// Wed Aug 19 2026 - Alex

use crate::heap::{
    CandidateObject, GcRoot, HeapError, HeapInspectionProvider, ObjectAddress, RawRootPath,
    RootKind,
};
use ahash::{AHashMap, AHashSet};
use memmap2::Mmap;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fs::File;
use std::path::Path;

/// Snapshot format revision this build understands.
pub const SNAPSHOT_VERSION: u32 = 1;

/// One heap object in a snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotObject {
    pub address: u64,
    #[serde(rename = "type")]
    pub type_name: String,
}

/// One GC root in a snapshot. `target` is the object the root references.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SnapshotRoot {
    pub kind: RootKind,
    pub address: u64,
    pub target: u64,
}

/// Point-in-time heap capture produced by the in-process agent.
///
/// `references` holds directed parent→child object references;
/// `finalizable` lists the addresses currently on the finalization queue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeapSnapshot {
    pub version: u32,
    #[serde(default)]
    pub process: Option<String>,
    #[serde(default)]
    pub captured_at: u64,
    pub objects: Vec<SnapshotObject>,
    pub roots: Vec<SnapshotRoot>,
    #[serde(default)]
    pub references: Vec<(u64, u64)>,
    #[serde(default)]
    pub finalizable: Vec<u64>,
}

/// Heap inspection provider backed by an agent snapshot file.
pub struct SnapshotProvider {
    snapshot: HeapSnapshot,
    types: AHashMap<u64, String>,
    outgoing: AHashMap<u64, Vec<u64>>,
}

impl SnapshotProvider {
    /// Map the snapshot file read-only and parse it.
    pub fn load(path: &Path) -> Result<Self, HeapError> {
        let file = File::open(path)?;
        let mmap = unsafe { Mmap::map(&file)? };
        let snapshot: HeapSnapshot = serde_json::from_slice(&mmap)
            .map_err(|e| HeapError::SnapshotParse(e.to_string()))?;
        Self::from_snapshot(snapshot)
    }

    pub fn from_snapshot(snapshot: HeapSnapshot) -> Result<Self, HeapError> {
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(HeapError::SnapshotVersion {
                found: snapshot.version,
                expected: SNAPSHOT_VERSION,
            });
        }

        let mut types = AHashMap::with_capacity(snapshot.objects.len());
        for object in &snapshot.objects {
            types.insert(object.address, object.type_name.clone());
        }

        let mut outgoing: AHashMap<u64, Vec<u64>> = AHashMap::new();
        for &(parent, child) in &snapshot.references {
            outgoing.entry(parent).or_default().push(child);
        }

        Ok(Self {
            snapshot,
            types,
            outgoing,
        })
    }

    pub fn process_name(&self) -> Option<&str> {
        self.snapshot.process.as_deref()
    }

    pub fn captured_at(&self) -> u64 {
        self.snapshot.captured_at
    }

    pub fn object_count(&self) -> usize {
        self.snapshot.objects.len()
    }

    /// Shortest reference path from `start` to `goal` over the snapshot's
    /// object graph, both endpoints included.
    fn shortest_path(&self, start: u64, goal: u64) -> Option<Vec<u64>> {
        if start == goal {
            return Some(vec![goal]);
        }

        let mut queue = VecDeque::new();
        let mut visited = AHashSet::new();
        let mut parent: AHashMap<u64, u64> = AHashMap::new();

        queue.push_back(start);
        visited.insert(start);

        while let Some(current) = queue.pop_front() {
            let Some(children) = self.outgoing.get(&current) else {
                continue;
            };
            for &next in children {
                if !visited.insert(next) {
                    continue;
                }
                parent.insert(next, current);
                if next == goal {
                    let mut path = vec![goal];
                    let mut node = goal;
                    while let Some(&prev) = parent.get(&node) {
                        path.push(prev);
                        node = prev;
                    }
                    path.reverse();
                    return Some(path);
                }
                queue.push_back(next);
            }
        }

        None
    }
}

impl HeapInspectionProvider for SnapshotProvider {
    fn enumerate_candidates(&self) -> Result<Vec<CandidateObject>, HeapError> {
        let mut candidates = Vec::with_capacity(self.snapshot.finalizable.len());
        for &address in &self.snapshot.finalizable {
            match self.types.get(&address) {
                Some(type_name) => {
                    candidates.push(CandidateObject::new(ObjectAddress::new(address), type_name));
                }
                None => {
                    log::warn!(
                        "Finalizable address 0x{:x} missing from the object table, skipping",
                        address
                    );
                }
            }
        }
        Ok(candidates)
    }

    fn enumerate_root_paths(&self, target: ObjectAddress) -> Result<Vec<RawRootPath>, HeapError> {
        if !self.types.contains_key(&target.as_u64()) {
            return Err(HeapError::InvalidObject(target.as_u64()));
        }

        let mut paths = Vec::new();
        for root in &self.snapshot.roots {
            if let Some(path) = self.shortest_path(root.target, target.as_u64()) {
                let chain = path.into_iter().map(ObjectAddress::new).collect();
                paths.push(RawRootPath::from_addresses(
                    GcRoot::new(root.kind, ObjectAddress::new(root.address)),
                    chain,
                ));
            }
        }
        Ok(paths)
    }

    fn resolve_type(&self, address: ObjectAddress) -> Result<String, HeapError> {
        self.types
            .get(&address.as_u64())
            .cloned()
            .ok_or(HeapError::TypeResolution(address.as_u64()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_snapshot() -> HeapSnapshot {
        HeapSnapshot {
            version: SNAPSHOT_VERSION,
            process: Some("leaky-app".to_string()),
            captured_at: 1_755_000_000,
            objects: vec![
                SnapshotObject {
                    address: 0xAAA,
                    type_name: "App.SafeFileHandle".to_string(),
                },
                SnapshotObject {
                    address: 0xBBB,
                    type_name: "App.FileStream".to_string(),
                },
                SnapshotObject {
                    address: 0xCCC,
                    type_name: "App.Logger".to_string(),
                },
            ],
            roots: vec![SnapshotRoot {
                kind: RootKind::StrongHandle,
                address: 0x100,
                target: 0xCCC,
            }],
            references: vec![(0xCCC, 0xBBB), (0xBBB, 0xAAA)],
            finalizable: vec![0xAAA],
        }
    }

    #[test]
    fn test_candidates_join_types() {
        let provider = SnapshotProvider::from_snapshot(sample_snapshot()).unwrap();
        let candidates = provider.enumerate_candidates().unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].address, ObjectAddress::new(0xAAA));
        assert_eq!(candidates[0].type_name, "App.SafeFileHandle");
    }

    #[test]
    fn test_root_path_is_shortest() {
        let mut snapshot = sample_snapshot();
        // Second, longer route to the same target.
        snapshot.objects.push(SnapshotObject {
            address: 0xDDD,
            type_name: "App.Buffer".to_string(),
        });
        snapshot.references.push((0xCCC, 0xDDD));
        snapshot.references.push((0xDDD, 0xBBB));

        let provider = SnapshotProvider::from_snapshot(snapshot).unwrap();
        let paths = provider
            .enumerate_root_paths(ObjectAddress::new(0xAAA))
            .unwrap();
        assert_eq!(paths.len(), 1);

        let chain: Vec<u64> = paths
            .into_iter()
            .flat_map(|p| p.chain.map(|a| a.as_u64()).collect::<Vec<_>>())
            .collect();
        assert_eq!(chain, vec![0xCCC, 0xBBB, 0xAAA]);
    }

    #[test]
    fn test_unreachable_root_is_skipped() {
        let mut snapshot = sample_snapshot();
        snapshot.objects.push(SnapshotObject {
            address: 0xEEE,
            type_name: "App.Detached".to_string(),
        });
        snapshot.roots.push(SnapshotRoot {
            kind: RootKind::Stack,
            address: 0x200,
            target: 0xEEE,
        });

        let provider = SnapshotProvider::from_snapshot(snapshot).unwrap();
        let paths = provider
            .enumerate_root_paths(ObjectAddress::new(0xAAA))
            .unwrap();
        assert_eq!(paths.len(), 1, "root with no route must be skipped");
    }

    #[test]
    fn test_unknown_target_is_invalid() {
        let provider = SnapshotProvider::from_snapshot(sample_snapshot()).unwrap();
        let err = provider
            .enumerate_root_paths(ObjectAddress::new(0xF00))
            .err()
            .unwrap();
        assert!(matches!(err, HeapError::InvalidObject(0xF00)));
    }

    #[test]
    fn test_version_gate() {
        let mut snapshot = sample_snapshot();
        snapshot.version = 99;
        let err = SnapshotProvider::from_snapshot(snapshot).err().unwrap();
        assert!(matches!(
            err,
            HeapError::SnapshotVersion {
                found: 99,
                expected: SNAPSHOT_VERSION
            }
        ));
    }

    #[test]
    fn test_resolve_type() {
        let provider = SnapshotProvider::from_snapshot(sample_snapshot()).unwrap();
        assert_eq!(
            provider.resolve_type(ObjectAddress::new(0xBBB)).unwrap(),
            "App.FileStream"
        );
        assert!(provider.resolve_type(ObjectAddress::new(0x1)).is_err());
    }

    #[test]
    fn test_root_targeting_candidate_directly() {
        let mut snapshot = sample_snapshot();
        snapshot.roots.push(SnapshotRoot {
            kind: RootKind::FinalizerQueue,
            address: 0x300,
            target: 0xAAA,
        });

        let provider = SnapshotProvider::from_snapshot(snapshot).unwrap();
        let paths = provider
            .enumerate_root_paths(ObjectAddress::new(0xAAA))
            .unwrap();
        assert_eq!(paths.len(), 2);
    }
}
