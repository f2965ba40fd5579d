// Wed Aug 19 2026 - Alex
//
// The scan loop: enumerate finalizable candidates, keep the handle
// wrappers, analyze each one, write its report, checkpoint the cache.
// Candidate enumeration is the only fatal step; everything per-object is
// logged and skipped.

use crate::analysis::{AnalysisResult, RootPathAnalyzer};
use crate::cache::AnalysisCache;
use crate::config::ScanConfig;
use crate::graph::OverlayBuilder;
use crate::heap::{CandidateObject, HeapInspectionProvider};
use crate::report::{ExportError, SvgExporter, TextReportWriter};
use crate::scanner::CandidateClassifier;
use crate::utils::{scoped_timer, strings};
use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// What one scan did, for the end-of-run summary.
#[derive(Debug, Clone, Default)]
pub struct ScanSummary {
    /// Finalizable objects the provider reported.
    pub candidates: usize,
    /// Candidates that matched the handle filter.
    pub matched: usize,
    pub analyzed: usize,
    pub skipped_cached: usize,
    pub failures: usize,
    pub reports_written: usize,
    pub graph_file: Option<PathBuf>,
    pub elapsed: Duration,
}

pub struct HeapScanner {
    provider: Arc<dyn HeapInspectionProvider>,
    config: ScanConfig,
}

impl HeapScanner {
    pub fn new(provider: Arc<dyn HeapInspectionProvider>, config: ScanConfig) -> Self {
        Self { provider, config }
    }

    /// Run the full scan. Each analyzed object is reported and
    /// checkpointed into the cache before the next one starts, so an
    /// interrupt loses at most the in-flight object.
    pub fn run(&self) -> Result<ScanSummary> {
        let _timer = scoped_timer("heap scan");
        let start = Instant::now();

        let classifier = CandidateClassifier::from_user_suffixes(&self.config.type_suffixes);
        log::debug!("handle filter holds {} type suffixes", classifier.suffix_count());
        let writer = TextReportWriter::new(&self.config.output_dir);
        let mut cache = AnalysisCache::load(&self.config.cache_file);
        let analyzer = RootPathAnalyzer::new(Arc::clone(&self.provider));

        if !cache.is_empty() {
            log::info!("loaded {} cached analyses from {}", cache.len(), cache.path().display());
        }

        let candidates = self
            .provider
            .enumerate_candidates()
            .context("candidate enumeration failed")?;

        let mut summary = ScanSummary {
            candidates: candidates.len(),
            ..ScanSummary::default()
        };

        let matched: Vec<CandidateObject> = candidates
            .into_iter()
            .filter(|c| classifier.is_handle_type(&c.type_name))
            .collect();
        summary.matched = matched.len();
        log::info!(
            "{} of {} finalizable objects match the handle filter",
            summary.matched,
            summary.candidates
        );

        let progress = self.make_progress(matched.len() as u64);
        let mut results: Vec<AnalysisResult> = Vec::new();

        for candidate in &matched {
            if let Some(ref pb) = progress {
                pb.set_message(strings::short_type_name(&candidate.type_name).to_string());
            }

            if cache.is_analyzed(candidate.address) && !self.config.refresh_exports {
                summary.skipped_cached += 1;
                log::debug!(
                    "skipping {} @ {}: already analyzed",
                    candidate.type_name,
                    candidate.address
                );
                if let Some(ref pb) = progress {
                    pb.inc(1);
                }
                continue;
            }

            match self.analyze_one(&analyzer, &writer, &mut cache, candidate) {
                Ok(result) => {
                    summary.analyzed += 1;
                    summary.reports_written += 1;
                    results.push(result);
                }
                Err(e) => {
                    summary.failures += 1;
                    if e.downcast_ref::<ExportError>().is_some() {
                        log::warn!(
                            "report export for {} @ {} failed: {}",
                            candidate.type_name,
                            candidate.address,
                            e
                        );
                    } else {
                        log::warn!(
                            "analysis of {} @ {} failed: {}",
                            candidate.type_name,
                            candidate.address,
                            e
                        );
                    }
                }
            }

            if let Some(ref pb) = progress {
                pb.inc(1);
            }
        }

        if let Some(pb) = progress {
            pb.finish_with_message("Complete!");
        }

        if self.config.export_graph {
            match self.export_graph(&results) {
                Ok(path) => summary.graph_file = Some(path),
                Err(e) => log::warn!("overlay graph export failed: {}", e),
            }
        }

        summary.elapsed = start.elapsed();
        Ok(summary)
    }

    /// One checkpoint: analyze, write the report, record, persist.
    fn analyze_one(
        &self,
        analyzer: &RootPathAnalyzer,
        writer: &TextReportWriter,
        cache: &mut AnalysisCache,
        candidate: &CandidateObject,
    ) -> Result<AnalysisResult> {
        let result = analyzer.analyze(candidate.address)?;
        let report_path = writer.write(&result)?;

        cache.record(
            candidate.address,
            &result.type_name,
            result.root_path_count(),
            vec![report_path],
        );
        if let Err(e) = cache.save(self.config.verbose > 0) {
            log::warn!("cache save failed: {}", e);
        }

        Ok(result)
    }

    fn export_graph(&self, results: &[AnalysisResult]) -> Result<PathBuf, ExportError> {
        let graph = OverlayBuilder::merge(results);
        log::debug!(
            "overlay graph has {} nodes and {} edges",
            graph.node_count(),
            graph.edge_count()
        );

        let path = self.config.output_dir.join("overlay.svg");
        SvgExporter::new().write_to_file(&graph, &path)?;
        Ok(path)
    }

    fn make_progress(&self, total: u64) -> Option<ProgressBar> {
        if !self.config.show_progress {
            return None;
        }
        let pb = ProgressBar::new(total);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap()
                .progress_chars("#>-"),
        );
        Some(pb)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heap::{GcRoot, HeapError, ObjectAddress, RawRootPath, RootKind};
    use ahash::AHashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::TempDir;

    struct CountingProvider {
        candidates: Vec<CandidateObject>,
        paths: AHashMap<u64, Vec<(GcRoot, Vec<ObjectAddress>)>>,
        types: AHashMap<u64, String>,
        fail_for: Option<ObjectAddress>,
        analyze_calls: AtomicUsize,
    }

    impl CountingProvider {
        fn calls(&self) -> usize {
            self.analyze_calls.load(Ordering::SeqCst)
        }
    }

    impl HeapInspectionProvider for CountingProvider {
        fn enumerate_candidates(&self) -> Result<Vec<CandidateObject>, HeapError> {
            Ok(self.candidates.clone())
        }

        fn enumerate_root_paths(
            &self,
            target: ObjectAddress,
        ) -> Result<Vec<RawRootPath>, HeapError> {
            self.analyze_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_for == Some(target) {
                return Err(HeapError::InvalidObject(target.as_u64()));
            }
            let paths = self
                .paths
                .get(&target.as_u64())
                .cloned()
                .unwrap_or_default();
            Ok(paths
                .into_iter()
                .map(|(root, chain)| RawRootPath::from_addresses(root, chain))
                .collect())
        }

        fn resolve_type(&self, address: ObjectAddress) -> Result<String, HeapError> {
            self.types
                .get(&address.as_u64())
                .cloned()
                .ok_or_else(|| HeapError::TypeResolution(address.as_u64()))
        }
    }

    /// Three finalizable objects: a rooted FileStream, an orphaned
    /// SafeFileHandle, and a String that the filter drops.
    fn fixture(fail_for: Option<ObjectAddress>) -> Arc<CountingProvider> {
        let mut types = AHashMap::new();
        types.insert(0x50, "App.Session".to_string());
        types.insert(0x100, "System.IO.FileStream".to_string());
        types.insert(0x200, "Microsoft.Win32.SafeHandles.SafeFileHandle".to_string());
        types.insert(0x300, "System.String".to_string());

        let mut paths = AHashMap::new();
        paths.insert(
            0x100_u64,
            vec![(
                GcRoot::new(RootKind::StrongHandle, ObjectAddress::new(0x10)),
                vec![ObjectAddress::new(0x50), ObjectAddress::new(0x100)],
            )],
        );

        let candidates = vec![
            CandidateObject::new(ObjectAddress::new(0x100), "System.IO.FileStream"),
            CandidateObject::new(
                ObjectAddress::new(0x200),
                "Microsoft.Win32.SafeHandles.SafeFileHandle",
            ),
            CandidateObject::new(ObjectAddress::new(0x300), "System.String"),
        ];

        Arc::new(CountingProvider {
            candidates,
            paths,
            types,
            fail_for,
            analyze_calls: AtomicUsize::new(0),
        })
    }

    fn test_config(dir: &TempDir) -> ScanConfig {
        ScanConfig {
            output_dir: dir.path().join("reports"),
            cache_file: dir.path().join("cache.json"),
            show_progress: false,
            ..ScanConfig::default()
        }
    }

    #[test]
    fn test_scan_filters_analyzes_and_reports() {
        let dir = TempDir::new().unwrap();
        let provider = fixture(None);
        let scanner = HeapScanner::new(provider.clone(), test_config(&dir));

        let summary = scanner.run().unwrap();
        assert_eq!(summary.candidates, 3);
        assert_eq!(summary.matched, 2);
        assert_eq!(summary.analyzed, 2);
        assert_eq!(summary.skipped_cached, 0);
        assert_eq!(summary.failures, 0);
        assert_eq!(summary.reports_written, 2);
        assert_eq!(provider.calls(), 2);

        let stream_report = dir
            .path()
            .join("reports/System.IO.FileStream/0x0000000000000100.txt");
        let content = std::fs::read_to_string(stream_report).unwrap();
        assert!(content.contains("ROOT PATH #1"));

        let orphan_report = dir
            .path()
            .join("reports/Microsoft.Win32.SafeHandles.SafeFileHandle/0x0000000000000200.txt");
        let content = std::fs::read_to_string(orphan_report).unwrap();
        assert!(content.contains("orphaned object"));

        let cache = AnalysisCache::load(dir.path().join("cache.json"));
        assert_eq!(cache.len(), 2);
        assert!(cache.is_analyzed(ObjectAddress::new(0x100)));
        assert!(cache.is_analyzed(ObjectAddress::new(0x200)));
    }

    #[test]
    fn test_second_run_skips_cached_addresses() {
        let dir = TempDir::new().unwrap();
        HeapScanner::new(fixture(None), test_config(&dir))
            .run()
            .unwrap();

        let provider = fixture(None);
        let summary = HeapScanner::new(provider.clone(), test_config(&dir))
            .run()
            .unwrap();

        assert_eq!(summary.analyzed, 0);
        assert_eq!(summary.skipped_cached, 2);
        assert_eq!(provider.calls(), 0, "cached addresses must not be re-walked");
    }

    #[test]
    fn test_refresh_exports_reanalyzes_without_duplicating() {
        let dir = TempDir::new().unwrap();
        HeapScanner::new(fixture(None), test_config(&dir))
            .run()
            .unwrap();

        let provider = fixture(None);
        let config = ScanConfig {
            refresh_exports: true,
            ..test_config(&dir)
        };
        let summary = HeapScanner::new(provider.clone(), config).run().unwrap();

        assert_eq!(summary.analyzed, 2);
        assert_eq!(summary.skipped_cached, 0);
        assert_eq!(provider.calls(), 2);

        let cache = AnalysisCache::load(dir.path().join("cache.json"));
        assert_eq!(cache.len(), 2, "refresh overwrites entries in place");
    }

    #[test]
    fn test_per_object_failure_is_recovered() {
        let dir = TempDir::new().unwrap();
        let provider = fixture(Some(ObjectAddress::new(0x100)));
        let summary = HeapScanner::new(provider, test_config(&dir))
            .run()
            .unwrap();

        assert_eq!(summary.failures, 1);
        assert_eq!(summary.analyzed, 1);

        let cache = AnalysisCache::load(dir.path().join("cache.json"));
        assert!(!cache.is_analyzed(ObjectAddress::new(0x100)));
        assert!(cache.is_analyzed(ObjectAddress::new(0x200)));
        assert!(!dir.path().join("reports/System.IO.FileStream").exists());
    }

    #[test]
    fn test_unwritable_cache_file_does_not_stop_scan() {
        let dir = TempDir::new().unwrap();
        // A plain file where the cache path expects a directory makes
        // every checkpoint save fail.
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "not a directory").unwrap();

        let config = ScanConfig {
            cache_file: blocker.join("cache.json"),
            ..test_config(&dir)
        };
        let summary = HeapScanner::new(fixture(None), config).run().unwrap();

        assert_eq!(summary.analyzed, 2);
        assert_eq!(summary.failures, 0);
        assert_eq!(summary.reports_written, 2);
        assert!(dir
            .path()
            .join("reports/System.IO.FileStream/0x0000000000000100.txt")
            .exists());
        assert!(!blocker.join("cache.json").exists());
        assert_eq!(std::fs::read_to_string(&blocker).unwrap(), "not a directory");
    }

    #[test]
    fn test_unwritable_output_dir_counts_failures() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "not a directory").unwrap();

        let config = ScanConfig {
            output_dir: blocker.join("reports"),
            ..test_config(&dir)
        };
        let summary = HeapScanner::new(fixture(None), config).run().unwrap();

        assert_eq!(summary.matched, 2);
        assert_eq!(summary.failures, 2);
        assert_eq!(summary.analyzed, 0);
        assert_eq!(summary.reports_written, 0);

        // Nothing was exported, so nothing may be recorded as done.
        let cache = AnalysisCache::load(dir.path().join("cache.json"));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_graph_export_written_when_requested() {
        let dir = TempDir::new().unwrap();
        let config = ScanConfig {
            export_graph: true,
            ..test_config(&dir)
        };
        let summary = HeapScanner::new(fixture(None), config).run().unwrap();

        let graph_file = summary.graph_file.expect("graph file path");
        assert!(graph_file.ends_with("reports/overlay.svg"));
        let content = std::fs::read_to_string(graph_file).unwrap();
        assert!(content.contains("</svg>"));
    }

    #[test]
    fn test_graph_export_skipped_when_nothing_analyzed() {
        let dir = TempDir::new().unwrap();
        HeapScanner::new(fixture(None), test_config(&dir))
            .run()
            .unwrap();

        // Everything is cached now; a second run merges zero results.
        let config = ScanConfig {
            export_graph: true,
            ..test_config(&dir)
        };
        let summary = HeapScanner::new(fixture(None), config).run().unwrap();

        assert!(summary.graph_file.is_none());
        assert!(!dir.path().join("reports/overlay.svg").exists());
    }
}
