// Wed Aug 19 2026 - Alex
//
// SVG rendering of the merged overlay graph. Pure string assembly, no
// drawing dependency; the output opens in any browser.

use crate::graph::layout::{
    self, NodePosition, CANVAS_WIDTH, MIN_MARGIN, NODE_HEIGHT, NODE_WIDTH, TOP_MARGIN,
};
use crate::graph::{LeakGraph, LeakNode};
use crate::report::ExportError;
use crate::utils::strings;
use indexmap::IndexMap;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Band above the top row reserved for the title and legend.
const HEADER_HEIGHT: f64 = 64.0;
const BOTTOM_MARGIN: f64 = 40.0;
const LABEL_MAX_CHARS: usize = 24;

#[derive(Debug, Clone)]
pub struct SvgOptions {
    pub title: String,
    pub show_legend: bool,
}

impl Default for SvgOptions {
    fn default() -> Self {
        Self {
            title: "Handle Leak Overlay".to_string(),
            show_legend: true,
        }
    }
}

pub struct SvgExporter {
    options: SvgOptions,
}

impl SvgExporter {
    pub fn new() -> Self {
        Self {
            options: SvgOptions::default(),
        }
    }

    pub fn with_options(options: SvgOptions) -> Self {
        Self { options }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.options.title = title.into();
        self
    }

    /// Render the graph as a standalone SVG document.
    pub fn render(&self, graph: &LeakGraph) -> Result<String, ExportError> {
        if graph.is_empty() {
            return Err(ExportError::EmptyGraph);
        }

        let positions = layout::layout(graph);
        let (width, height) = canvas_size(&positions);

        let mut svg = String::new();
        svg.push_str(&format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{:.0}\" height=\"{:.0}\" viewBox=\"0 0 {:.0} {:.0}\" font-family=\"monospace\">\n",
            width, height, width, height
        ));
        svg.push_str(style_block());
        svg.push_str(marker_defs());
        svg.push_str(&format!(
            "<rect class=\"backdrop\" width=\"{:.0}\" height=\"{:.0}\"/>\n",
            width, height
        ));
        svg.push_str(&self.header(width));
        svg.push_str(&format!("<g transform=\"translate(0 {:.0})\">\n", HEADER_HEIGHT));
        svg.push_str(&edges_group(graph, &positions));
        svg.push_str(&nodes_group(graph, &positions));
        svg.push_str("</g>\n");
        svg.push_str(copy_script());
        svg.push_str("</svg>\n");
        Ok(svg)
    }

    pub fn write_to_file(&self, graph: &LeakGraph, path: &Path) -> Result<(), ExportError> {
        let svg = self.render(graph)?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        writer.write_all(svg.as_bytes())?;
        writer.flush()?;

        log::debug!("wrote overlay graph {}", path.display());
        Ok(())
    }

    fn header(&self, width: f64) -> String {
        let mut header = String::new();
        header.push_str(&format!(
            "<text class=\"title\" x=\"{:.0}\" y=\"26\">{}</text>\n",
            width / 2.0,
            escape_xml(&self.options.title)
        ));
        if self.options.show_legend {
            header.push_str(&legend());
        }
        header
    }
}

impl Default for SvgExporter {
    fn default() -> Self {
        Self::new()
    }
}

fn canvas_size(positions: &IndexMap<u64, NodePosition>) -> (f64, f64) {
    let mut width = CANVAS_WIDTH;
    let mut max_y = TOP_MARGIN;
    for pos in positions.values() {
        width = width.max(pos.x + NODE_WIDTH + MIN_MARGIN);
        max_y = max_y.max(pos.y);
    }
    (width, HEADER_HEIGHT + max_y + NODE_HEIGHT + BOTTOM_MARGIN)
}

fn node_class(node: &LeakNode) -> &'static str {
    if node.is_root() {
        "node-root"
    } else if node.is_target() {
        "node-target"
    } else {
        "node-intermediate"
    }
}

fn edges_group(graph: &LeakGraph, positions: &IndexMap<u64, NodePosition>) -> String {
    let mut group = String::from("<g class=\"edges\">\n");
    for edge in graph.edges() {
        let parent = positions.get(&edge.parent().as_u64());
        let child = positions.get(&edge.child().as_u64());
        if let (Some(parent), Some(child)) = (parent, child) {
            let x1 = parent.center_x();
            let y1 = parent.y + NODE_HEIGHT;
            let x2 = child.center_x();
            let y2 = child.y;
            let bend = (y1 + y2) / 2.0;
            group.push_str(&format!(
                "<path class=\"edge\" d=\"M {:.1} {:.1} C {:.1} {:.1}, {:.1} {:.1}, {:.1} {:.1}\" marker-end=\"url(#arrow)\"/>\n",
                x1, y1, x1, bend, x2, bend, x2, y2
            ));
        }
    }
    group.push_str("</g>\n");
    group
}

fn nodes_group(graph: &LeakGraph, positions: &IndexMap<u64, NodePosition>) -> String {
    let mut group = String::from("<g class=\"nodes\">\n");
    for node in graph.nodes() {
        if let Some(pos) = positions.get(&node.address().as_u64()) {
            group.push_str(&node_group(node, pos));
        }
    }
    group.push_str("</g>\n");
    group
}

fn node_group(node: &LeakNode, pos: &NodePosition) -> String {
    let base = strings::sanitize_type_name(node.label());
    let label = strings::truncate(strings::short_type_name(&base), LABEL_MAX_CHARS);
    let copy_text = format!("{} {}", node.label(), node.address());
    let tooltip = format!(
        "{} @ {} ({} refs)",
        node.label(),
        node.address(),
        node.reference_count()
    );

    let mut group = format!(
        "<g class=\"node {}\" transform=\"translate({:.1} {:.1})\" data-copy=\"{}\">\n",
        node_class(node),
        pos.x,
        pos.y,
        escape_xml(&copy_text)
    );
    group.push_str(&format!(
        "<rect width=\"{:.0}\" height=\"{:.0}\" rx=\"6\"/>\n",
        NODE_WIDTH, NODE_HEIGHT
    ));
    group.push_str(&format!("<title>{}</title>\n", escape_xml(&tooltip)));
    group.push_str(&format!(
        "<text class=\"node-label\" x=\"{:.0}\" y=\"20\">{}</text>\n",
        NODE_WIDTH / 2.0,
        escape_xml(&label)
    ));
    group.push_str(&format!(
        "<text class=\"node-addr\" x=\"{:.0}\" y=\"38\">{}</text>\n",
        NODE_WIDTH / 2.0,
        node.address()
    ));
    if node.reference_count() > 1 {
        group.push_str(&format!(
            "<g class=\"badge\"><circle cx=\"{:.0}\" cy=\"4\" r=\"10\"/><text x=\"{:.0}\" y=\"8\">{}</text></g>\n",
            NODE_WIDTH - 6.0,
            NODE_WIDTH - 6.0,
            node.reference_count()
        ));
    }
    group.push_str("</g>\n");
    group
}

fn legend() -> String {
    let entries = [
        ("node-root", "GC root"),
        ("node-target", "leaked object"),
        ("node-intermediate", "referencing object"),
    ];

    let mut legend = format!(
        "<g class=\"legend\" transform=\"translate({:.0} 40)\">\n",
        MIN_MARGIN
    );
    let mut x = 0.0;
    for (class, text) in entries {
        legend.push_str(&format!(
            "<g class=\"{}\"><rect x=\"{:.0}\" y=\"0\" width=\"14\" height=\"14\" rx=\"3\"/></g>\n",
            class, x
        ));
        legend.push_str(&format!("<text x=\"{:.0}\" y=\"11\">{}</text>\n", x + 20.0, text));
        x += 160.0;
    }
    legend.push_str("</g>\n");
    legend
}

fn style_block() -> &'static str {
    "<style>\n\
     .backdrop { fill: #1a1a2e; }\n\
     .title { fill: #e0e0e0; font-size: 18px; text-anchor: middle; }\n\
     .legend text { fill: #9aa0b4; font-size: 12px; }\n\
     .edge { fill: none; stroke: #4a4a6a; stroke-width: 1.5; }\n\
     .node rect { stroke: #0f0f1e; }\n\
     .node-root rect { fill: #ffe66d; }\n\
     .node-target rect { fill: #ff6b6b; }\n\
     .node-intermediate rect { fill: #45b7d1; }\n\
     .node text { text-anchor: middle; }\n\
     .node-label { fill: #101020; font-size: 12px; font-weight: bold; }\n\
     .node-addr { fill: #1f2a3a; font-size: 10px; }\n\
     .badge circle { fill: #00d4ff; stroke: #1a1a2e; stroke-width: 2; }\n\
     .badge text { fill: #1a1a2e; font-size: 10px; font-weight: bold; }\n\
     </style>\n"
}

fn marker_defs() -> &'static str {
    "<defs>\n\
     <marker id=\"arrow\" viewBox=\"0 0 10 10\" refX=\"8\" refY=\"5\" markerWidth=\"7\" markerHeight=\"7\" orient=\"auto\">\n\
     <path d=\"M 0 1 L 9 5 L 0 9 z\" fill=\"#4a4a6a\"/>\n\
     </marker>\n\
     </defs>\n"
}

fn copy_script() -> &'static str {
    "<script type=\"text/javascript\"><![CDATA[\n\
     document.querySelectorAll('.node').forEach(function (node) {\n\
         node.addEventListener('dblclick', function () {\n\
             var text = node.getAttribute('data-copy');\n\
             if (text && navigator.clipboard) {\n\
                 navigator.clipboard.writeText(text);\n\
             }\n\
         });\n\
     });\n\
     ]]></script>\n"
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
