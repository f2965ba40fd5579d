// Wed Aug 19 2026 - Alex

pub mod error;
pub mod svg;
pub mod text;

pub use error::ExportError;
pub use svg::{SvgExporter, SvgOptions};
pub use text::TextReportWriter;
