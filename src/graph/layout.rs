// Tue Aug 18 2026 - Alex

use crate::graph::{LeakGraph, LeakNode};
use indexmap::IndexMap;
use itertools::Itertools;
use std::cmp::Reverse;

pub const NODE_WIDTH: f64 = 180.0;
pub const NODE_HEIGHT: f64 = 48.0;
pub const HORIZONTAL_SPACING: f64 = 24.0;
pub const VERTICAL_SPACING: f64 = 64.0;
pub const TOP_MARGIN: f64 = 40.0;
pub const MIN_MARGIN: f64 = 20.0;
pub const CANVAS_WIDTH: f64 = 1600.0;

/// Top-left corner of a node rectangle in SVG user units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodePosition {
    pub x: f64,
    pub y: f64,
}

impl NodePosition {
    pub fn center_x(&self) -> f64 {
        self.x + NODE_WIDTH / 2.0
    }

    pub fn center_y(&self) -> f64 {
        self.y + NODE_HEIGHT / 2.0
    }
}

/// Assign every node a position in horizontal depth rows.
///
/// Rows run from the deepest (root side) group at the top of the canvas
/// down to the target row at the bottom. Inside a row, nodes with more
/// sightings come first; ties keep first-sighting order. Rows that fit the
/// nominal canvas width are centered, wider rows start at the left margin
/// and overflow to the right.
pub fn layout(graph: &LeakGraph) -> IndexMap<u64, NodePosition> {
    let mut positions = IndexMap::with_capacity(graph.node_count());

    let depths: Vec<usize> = graph
        .nodes()
        .map(|n| n.depth())
        .unique()
        .sorted()
        .rev()
        .collect();

    for (row_index, &depth) in depths.iter().enumerate() {
        let mut row: Vec<&LeakNode> = graph.nodes().filter(|n| n.depth() == depth).collect();
        row.sort_by_key(|n| Reverse(n.reference_count()));

        let count = row.len() as f64;
        let row_width = count * NODE_WIDTH + (count - 1.0) * HORIZONTAL_SPACING;
        let start_x = if row_width <= CANVAS_WIDTH {
            (CANVAS_WIDTH - row_width) / 2.0
        } else {
            MIN_MARGIN
        };
        let y = TOP_MARGIN + row_index as f64 * (NODE_HEIGHT + VERTICAL_SPACING);

        for (slot, node) in row.iter().enumerate() {
            let x = start_x + slot as f64 * (NODE_WIDTH + HORIZONTAL_SPACING);
            positions.insert(node.address().as_u64(), NodePosition { x, y });
        }
    }

    positions
}
