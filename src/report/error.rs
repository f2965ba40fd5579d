// Wed Aug 19 2026 - Alex

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("report I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("nothing to draw: the overlay graph is empty")]
    EmptyGraph,
}
