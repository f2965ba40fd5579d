// Tue Aug 18 2026 - Alex

use crate::analysis::{AnalysisResult, ChainLink, RootPath};
use crate::heap::{HeapError, HeapInspectionProvider, ObjectAddress, RawRootPath};
use ahash::AHashSet;
use std::sync::Arc;

/// Hard bound on the number of links kept per chain.
pub const MAX_CHAIN_DEPTH: usize = 1000;

/// Walks provider-supplied reference chains and produces one immutable
/// `AnalysisResult` per target.
pub struct RootPathAnalyzer {
    provider: Arc<dyn HeapInspectionProvider>,
    max_chain_depth: usize,
}

impl RootPathAnalyzer {
    pub fn new(provider: Arc<dyn HeapInspectionProvider>) -> Self {
        Self {
            provider,
            max_chain_depth: MAX_CHAIN_DEPTH,
        }
    }

    pub fn with_max_depth(mut self, max: usize) -> Self {
        self.max_chain_depth = max;
        self
    }

    /// Trace every GC root path keeping `target` alive.
    ///
    /// Paths are numbered 1-based in the provider's enumeration order. Any
    /// provider failure, including a mid-chain type resolution failure,
    /// aborts the whole target; callers treat that as "no result".
    pub fn analyze(&self, target: ObjectAddress) -> Result<AnalysisResult, HeapError> {
        let type_name = self.provider.resolve_type(target)?;
        let raw_paths = self.provider.enumerate_root_paths(target)?;

        log::debug!(
            "Tracing {} root paths for {} @ {}",
            raw_paths.len(),
            type_name,
            target
        );

        let mut result = AnalysisResult::new(type_name, target);
        for (index, raw) in raw_paths.into_iter().enumerate() {
            let path = self.walk_chain(index + 1, raw)?;
            result.add_path(path);
        }
        Ok(result)
    }

    // Iterative walk with the cycle and depth guards. Guard order: a
    // repeated address is reported as circular even when the chain is also
    // at the length bound. The stopping node is never appended.
    fn walk_chain(&self, number: usize, raw: RawRootPath) -> Result<RootPath, HeapError> {
        let mut path = RootPath::new(number, raw.root);
        let mut visited: AHashSet<u64> = AHashSet::new();

        for address in raw.chain {
            if visited.contains(&address.as_u64()) {
                path.has_circular_dependency = true;
                break;
            }
            if path.len() >= self.max_chain_depth {
                path.max_depth_reached = true;
                break;
            }

            let type_name = self.provider.resolve_type(address)?;
            path.add_link(ChainLink::new(address, type_name, path.len()));
            visited.insert(address.as_u64());
        }

        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heap::{CandidateObject, GcRoot, RootKind};
    use ahash::AHashMap;

    enum ChainScript {
        Finite(Vec<u64>),
        Cycling(Vec<u64>),
    }

    struct ScriptedProvider {
        paths: Vec<(GcRoot, ChainScript)>,
        types: AHashMap<u64, String>,
        fallback_type: Option<String>,
    }

    impl ScriptedProvider {
        fn new() -> Self {
            Self {
                paths: Vec::new(),
                types: AHashMap::new(),
                fallback_type: Some("App.Node".to_string()),
            }
        }

        fn with_path(mut self, kind: RootKind, root_addr: u64, script: ChainScript) -> Self {
            self.paths
                .push((GcRoot::new(kind, ObjectAddress::new(root_addr)), script));
            self
        }

        fn with_type(mut self, addr: u64, name: &str) -> Self {
            self.types.insert(addr, name.to_string());
            self
        }

        fn without_fallback(mut self) -> Self {
            self.fallback_type = None;
            self
        }
    }

    impl HeapInspectionProvider for ScriptedProvider {
        fn enumerate_candidates(&self) -> Result<Vec<CandidateObject>, HeapError> {
            Ok(Vec::new())
        }

        fn enumerate_root_paths(
            &self,
            _target: ObjectAddress,
        ) -> Result<Vec<RawRootPath>, HeapError> {
            Ok(self
                .paths
                .iter()
                .map(|(root, script)| match script {
                    ChainScript::Finite(addrs) => RawRootPath::from_addresses(
                        *root,
                        addrs.iter().copied().map(ObjectAddress::new).collect(),
                    ),
                    ChainScript::Cycling(addrs) => RawRootPath::new(
                        *root,
                        Box::new(
                            addrs
                                .clone()
                                .into_iter()
                                .map(ObjectAddress::new)
                                .cycle(),
                        ),
                    ),
                })
                .collect())
        }

        fn resolve_type(&self, address: ObjectAddress) -> Result<String, HeapError> {
            self.types
                .get(&address.as_u64())
                .cloned()
                .or_else(|| self.fallback_type.clone())
                .ok_or(HeapError::TypeResolution(address.as_u64()))
        }
    }

    fn analyzer(provider: ScriptedProvider) -> RootPathAnalyzer {
        RootPathAnalyzer::new(Arc::new(provider))
    }

    #[test]
    fn test_cycle_terminates_infinite_chain() {
        let provider = ScriptedProvider::new().with_path(
            RootKind::StrongHandle,
            0x10,
            ChainScript::Cycling(vec![0xA, 0xB, 0xC]),
        );

        let result = analyzer(provider).analyze(ObjectAddress::new(0xC)).unwrap();
        let path = &result.root_paths[0];

        assert!(path.has_circular_dependency);
        assert!(!path.max_depth_reached);
        assert_eq!(path.len(), 3, "repeated address must not be appended");
        assert_eq!(
            path.links.iter().map(|l| l.address.as_u64()).collect::<Vec<_>>(),
            vec![0xA, 0xB, 0xC]
        );
    }

    #[test]
    fn test_depth_bound_keeps_exactly_one_thousand_links() {
        let chain: Vec<u64> = (0..1500u64).map(|i| 0x1000 + i).collect();
        let provider = ScriptedProvider::new().with_path(
            RootKind::Stack,
            0x10,
            ChainScript::Finite(chain),
        );

        let result = analyzer(provider)
            .analyze(ObjectAddress::new(0x1000))
            .unwrap();
        let path = &result.root_paths[0];

        assert!(path.max_depth_reached);
        assert!(!path.has_circular_dependency);
        assert_eq!(path.len(), MAX_CHAIN_DEPTH);
        assert_eq!(path.links.last().map(|l| l.depth), Some(999));
        assert_eq!(path.last_address(), Some(ObjectAddress::new(0x1000 + 999)));
    }

    #[test]
    fn test_repeat_at_bound_counts_as_circular() {
        // Fourth element repeats the first while the chain is also at the
        // configured bound; the cycle guard runs first.
        let provider = ScriptedProvider::new().with_path(
            RootKind::Stack,
            0x10,
            ChainScript::Finite(vec![0xA, 0xB, 0xC, 0xA]),
        );

        let result = analyzer(provider)
            .with_max_depth(3)
            .analyze(ObjectAddress::new(0xC))
            .unwrap();
        let path = &result.root_paths[0];

        assert!(path.has_circular_dependency);
        assert!(!path.max_depth_reached);
        assert_eq!(path.len(), 3);
    }

    #[test]
    fn test_configured_bound_truncates() {
        let provider = ScriptedProvider::new().with_path(
            RootKind::PinnedHandle,
            0x10,
            ChainScript::Finite(vec![0x1, 0x2, 0x3, 0x4, 0x5]),
        );

        let result = analyzer(provider)
            .with_max_depth(3)
            .analyze(ObjectAddress::new(0x5))
            .unwrap();
        let path = &result.root_paths[0];

        assert!(path.max_depth_reached);
        assert_eq!(path.len(), 3);
    }

    #[test]
    fn test_paths_numbered_in_provider_order() {
        let provider = ScriptedProvider::new()
            .with_type(0x30, "App.Leaked")
            .with_path(
                RootKind::StrongHandle,
                0x10,
                ChainScript::Finite(vec![0x20, 0x30]),
            )
            .with_path(RootKind::Stack, 0x11, ChainScript::Finite(vec![0x30]));

        let result = analyzer(provider).analyze(ObjectAddress::new(0x30)).unwrap();

        assert_eq!(result.type_name, "App.Leaked");
        assert_eq!(result.root_path_count(), 2);
        assert_eq!(result.root_paths[0].number, 1);
        assert_eq!(result.root_paths[1].number, 2);
        assert_eq!(result.root_paths[0].root_kind, RootKind::StrongHandle);
        assert!(result.root_paths[0].reaches(ObjectAddress::new(0x30)));
        assert!(result.root_paths[1].reaches(ObjectAddress::new(0x30)));
        assert!(result.analyzed_at > 0);
    }

    #[test]
    fn test_mid_chain_resolution_failure_aborts_target() {
        let provider = ScriptedProvider::new()
            .without_fallback()
            .with_type(0xA, "App.Holder")
            .with_type(0xC, "App.Leaked")
            .with_path(
                RootKind::Stack,
                0x10,
                ChainScript::Finite(vec![0xA, 0xB, 0xC]),
            );

        let err = analyzer(provider)
            .analyze(ObjectAddress::new(0xC))
            .unwrap_err();
        assert!(matches!(err, HeapError::TypeResolution(0xB)));
    }

    #[test]
    fn test_no_paths_yields_orphaned_result() {
        let provider = ScriptedProvider::new();
        let result = analyzer(provider).analyze(ObjectAddress::new(0x99)).unwrap();
        assert!(result.is_orphaned());
    }
}
