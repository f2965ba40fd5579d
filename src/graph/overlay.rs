// Tue Aug 18 2026 - Alex

use crate::analysis::{AnalysisResult, RootPath};
use crate::graph::LeakGraph;

/// Deepest chain position kept in the overlay. Anything further from the
/// target than this is dropped from the picture, never from the analysis.
pub const VISUAL_DEPTH_LIMIT: usize = 20;

/// Merges independent per-object analysis results into one `LeakGraph`.
///
/// The merge is anchored at the target end of each chain: the analyzed
/// object is pinned at depth 0 and elements toward the root sit at 1, 2,
/// and so on. A chain that stopped early (cycle or depth guard) never gets
/// a fabricated hop to the target, so it may show up as a strand that is
/// not connected to the rest of the picture.
#[derive(Debug, Default)]
pub struct OverlayBuilder {
    graph: LeakGraph,
}

impl OverlayBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge a batch of results into a fresh graph.
    pub fn merge(results: &[AnalysisResult]) -> LeakGraph {
        let mut builder = Self::new();
        for result in results {
            builder.merge_result(result);
        }
        builder.finish()
    }

    pub fn merge_result(&mut self, result: &AnalysisResult) {
        // The analyzed object anchors the overlay even when nothing
        // reaches it.
        self.graph
            .ensure_node(result.address, &result.type_name, false, 0);

        for path in &result.root_paths {
            self.merge_path(result, path);
        }
    }

    pub fn graph(&self) -> &LeakGraph {
        &self.graph
    }

    pub fn finish(self) -> LeakGraph {
        self.graph
    }

    fn merge_path(&mut self, result: &AnalysisResult, path: &RootPath) {
        let complete = path.reaches(result.address);
        let offset = if complete { 0 } else { 1 };
        let link_count = path.links.len();

        let depth_of = |index: usize| (link_count - 1 - index) + offset;

        for (index, link) in path.links.iter().enumerate() {
            let depth = depth_of(index);
            if depth > VISUAL_DEPTH_LIMIT {
                continue;
            }
            self.graph
                .ensure_node(link.address, &link.type_name, false, depth);
            self.graph.touch(link.address);
        }

        let root_depth = link_count + offset;
        if root_depth <= VISUAL_DEPTH_LIMIT {
            self.graph.ensure_node(
                path.root_address,
                &path.root_kind.to_string(),
                true,
                root_depth,
            );
            self.graph.touch(path.root_address);

            if let Some(first) = path.links.first() {
                self.graph.add_edge(path.root_address, first.address);
            }
        }

        // Adjacent pairs only; the child is always one step shallower, so
        // checking the parent against the cap covers both ends.
        for (index, window) in path.links.windows(2).enumerate() {
            if depth_of(index) <= VISUAL_DEPTH_LIMIT {
                self.graph.add_edge(window[0].address, window[1].address);
            }
        }

        // A truncated chain still counts against the object it was traced
        // for.
        if !complete {
            self.graph.touch(result.address);
        }
    }
}
