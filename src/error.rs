//! Error types for voronoi layout generation

use thiserror::Error;

/// Errors that can occur while configuring or generating a layout
///
/// Geometric degeneracies (clipped-away cells, empty samples, polygons too
/// small for an inscribed circle) are not errors. They are reported through
/// validity flags and `Option` results instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    /// Configuration validation failed
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// A caller-supplied site cannot be used to build a cell
    #[error("invalid site {index}: {reason}")]
    InvalidSite {
        /// Index of the offending site in the input sequence
        index: usize,
        /// Human-readable reason
        reason: String,
    },
}

/// Result type alias for layout operations
pub type Result<T> = std::result::Result<T, LayoutError>;
