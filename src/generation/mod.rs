//! Core generation pipeline
//!
//! Data flows strictly forward: sites -> Delaunay triangulation -> cell
//! vertex collection -> angular ordering -> adjacency -> clipping. Each
//! stage builds fresh collections; nothing mutates the live diagram until
//! every stage has succeeded.

mod clip;
mod delaunay;
mod points;
mod voronoi;

pub use clip::{clip_polygon, clip_segment};
pub use delaunay::triangulate;
pub use points::generate_sites;
pub use voronoi::build_cells;

use glam::DVec2;

use crate::cell::{VoronoiCell, VoronoiEdge};
use crate::error::Result;
use crate::geometry::Rect;

/// Run the full pipeline over an explicit site set
///
/// Triangulates the sites and derives the clipped cells and edges.
/// Used by [`crate::VoronoiDiagram::from_sites`]; callers wanting the
/// individual stages can use [`triangulate`] and [`build_cells`] directly.
pub fn generate_parts(
    sites: &[DVec2],
    bounds: &Rect,
) -> Result<(Vec<VoronoiCell>, Vec<VoronoiEdge>)> {
    let triangles = triangulate(sites)?;
    build_cells(sites, &triangles, bounds)
}
