//! Error types for diagram generation

use std::fmt;

/// Errors that can occur during diagram generation
#[derive(Debug, Clone, PartialEq)]
pub enum VoronoiError {
    /// A generation argument was rejected before any geometry work began
    InvalidArgument(String),
    /// The input site set is degenerate (e.g. fully collinear) and no
    /// triangulation survives
    DegenerateGeometry(String),
}

impl fmt::Display for VoronoiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VoronoiError::InvalidArgument(msg) => write!(f, "invalid argument: {}", msg),
            VoronoiError::DegenerateGeometry(msg) => write!(f, "degenerate geometry: {}", msg),
        }
    }
}

impl std::error::Error for VoronoiError {}

/// Result type alias for voronoi operations
pub type Result<T> = std::result::Result<T, VoronoiError>;
