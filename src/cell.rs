//! Voronoi cell and edge structures
//!
//! The plain data types owned by the diagram: one polygonal cell per
//! surviving site and the Voronoi edges separating them.

use glam::DVec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A single Voronoi cell of the map
///
/// Each cell represents the region of the domain closer to its site than to
/// any other site, clipped to the map bounds.
///
/// # Design notes
///
/// Cells are identified by their integer `id`, and all cross-references
/// (neighbors, edge left/right) use those indices. Site positions are never
/// used as lookup keys; floating-point equality is fragile under
/// recomputation.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone)]
pub struct VoronoiCell {
    /// Stable cell index into the diagram's cell sequence
    pub id: usize,

    /// Index of this cell's site in the diagram's site sequence
    ///
    /// Not necessarily equal to `id`: sites without any surviving triangle
    /// incidence (exact duplicates, fully degenerate positions) contribute
    /// no cell.
    pub site_index: usize,

    /// Position of the site this cell is built around
    pub site: DVec2,

    /// The clipped boundary polygon, ordered by angle around its centroid
    ///
    /// A simple, non-self-intersecting polygon lying within the map bounds.
    /// Empty when the cell lies entirely outside the bounds or its geometry
    /// was too degenerate to close; consumers must treat an empty polygon
    /// as non-renderable, not as corrupt data.
    pub vertices: Vec<DVec2>,

    /// Ids of adjacent cells, sorted and deduplicated
    ///
    /// Two cells are neighbors when a Voronoi edge separates them.
    /// Adjacency is symmetric.
    pub neighbors: Vec<usize>,

    /// Indices of incident edges in the diagram's edge sequence
    pub edges: Vec<usize>,
}

impl VoronoiCell {
    /// Create a new cell; called during diagram construction
    pub fn new(
        id: usize,
        site_index: usize,
        site: DVec2,
        vertices: Vec<DVec2>,
        neighbors: Vec<usize>,
        edges: Vec<usize>,
    ) -> Self {
        Self {
            id,
            site_index,
            site,
            vertices,
            neighbors,
            edges,
        }
    }

    /// Number of adjacent cells
    #[inline]
    pub fn neighbor_count(&self) -> usize {
        self.neighbors.len()
    }

    /// Check adjacency against another cell id
    #[inline]
    pub fn is_neighbor_of(&self, other_cell_id: usize) -> bool {
        self.neighbors.contains(&other_cell_id)
    }

    /// Number of polygon vertices
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Mean of the polygon vertices
    ///
    /// Returns the site position for a cell with an empty polygon.
    pub fn centroid(&self) -> DVec2 {
        if self.vertices.is_empty() {
            return self.site;
        }
        self.vertices.iter().copied().sum::<DVec2>() / self.vertices.len() as f64
    }

    /// Polygon area via the shoelace formula
    ///
    /// Zero for cells with fewer than 3 vertices.
    pub fn area(&self) -> f64 {
        if self.vertices.len() < 3 {
            return 0.0;
        }

        let mut sum = 0.0;
        for i in 0..self.vertices.len() {
            let p = self.vertices[i];
            let q = self.vertices[(i + 1) % self.vertices.len()];
            sum += p.x * q.y - q.x * p.y;
        }
        sum.abs() * 0.5
    }
}

/// A single Voronoi edge of the map
///
/// Interior edges separate two cells; edges lying on the domain rectangle
/// border one cell only and carry `right == None`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoronoiEdge {
    /// Stable edge index into the diagram's edge sequence
    pub id: usize,

    /// First endpoint
    pub start: DVec2,

    /// Second endpoint
    pub end: DVec2,

    /// Id of the cell on one side of the edge
    pub left: usize,

    /// Id of the cell on the other side, or `None` for a domain-boundary
    /// edge with no second cell
    pub right: Option<usize>,
}

impl VoronoiEdge {
    /// Create a new edge; called during diagram construction
    pub fn new(id: usize, start: DVec2, end: DVec2, left: usize, right: Option<usize>) -> Self {
        Self {
            id,
            start,
            end,
            left,
            right,
        }
    }

    /// Whether this edge lies on the domain rectangle
    #[inline]
    pub fn is_boundary(&self) -> bool {
        self.right.is_none()
    }

    /// Edge length
    #[inline]
    pub fn length(&self) -> f64 {
        (self.end - self.start).length()
    }

    /// Edge midpoint
    #[inline]
    pub fn midpoint(&self) -> DVec2 {
        (self.start + self.end) * 0.5
    }

    /// Given one incident cell id, return the cell on the other side
    ///
    /// Returns `None` for boundary edges or if `cell_id` is not incident.
    pub fn other_cell(&self, cell_id: usize) -> Option<usize> {
        match self.right {
            Some(right) if self.left == cell_id => Some(right),
            Some(right) if right == cell_id => Some(self.left),
            _ => None,
        }
    }
}
