//! Bounded planar Voronoi subdivision
//!
//! A standalone library for generating Voronoi diagrams over a rectangular
//! domain, suitable as the spatial substrate for procedural maps (terrain,
//! climate, settlement layers) in any engine.
//!
//! The diagram is derived from the dual Delaunay triangulation: sites are
//! triangulated incrementally (Bowyer-Watson), each cell polygon is
//! assembled from triangle circumcenters, adjacency comes from shared
//! Delaunay edges, and every polygon is clipped against the domain
//! rectangle (Sutherland-Hodgman).
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use voronoi_map::*;
//!
//! // Generate a map
//! let config = MapConfigBuilder::new()
//!     .seed(42)
//!     .site_count(256).unwrap()
//!     .bounds(Rect::new(0.0, 0.0, 1024.0, 1024.0)).unwrap()
//!     .build().unwrap();
//!
//! let diagram = VoronoiDiagram::generate(&config).unwrap();
//! println!("Generated {} cells", diagram.cell_count());
//! ```
//!
//! # Features
//!
//! - `spatial-index` (default): O(log n) point-to-cell lookups using a KD-tree
//! - `serde`: serialization support for configuration, cells and edges

// Modules
pub mod error;
pub mod config;
pub mod geometry;
pub mod cell;
pub mod generation;
pub mod diagram;

#[cfg(feature = "spatial-index")]
pub mod spatial;

// Re-export core types for convenience
pub use error::{Result, VoronoiError};
pub use config::{MapConfig, MapConfigBuilder};
pub use geometry::{Edge, Rect, Triangle};
pub use cell::{VoronoiCell, VoronoiEdge};
pub use diagram::VoronoiDiagram;

#[cfg(feature = "spatial-index")]
pub use spatial::SpatialIndex;

// Re-export glam::DVec2 for convenience
pub use glam::DVec2;
