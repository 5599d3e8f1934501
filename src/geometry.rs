//! Geometry primitives for the planar subdivision
//!
//! Provides the axis-aligned domain rectangle, the unordered point-index
//! edge used during triangulation, and the triangle type with its memoized
//! circumcircle.

use glam::DVec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Determinant threshold below which a triangle is treated as collinear
const COLLINEAR_EPS: f64 = 1e-12;

/// An axis-aligned rectangle describing the map domain
///
/// All generated sites and every clipped cell polygon lie within this
/// rectangle. Construct with [`Rect::new`] from the four boundary
/// coordinates.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Minimum corner (x_min, y_min)
    pub min: DVec2,
    /// Maximum corner (x_max, y_max)
    pub max: DVec2,
}

impl Rect {
    /// Create a rectangle from its boundary coordinates
    ///
    /// No validation is performed here; generation entry points reject
    /// rectangles with non-positive width or height.
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min: DVec2::new(min_x, min_y),
            max: DVec2::new(max_x, max_y),
        }
    }

    /// Rectangle width (max.x - min.x)
    #[inline]
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    /// Rectangle height (max.y - min.y)
    #[inline]
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// Center point of the rectangle
    #[inline]
    pub fn center(&self) -> DVec2 {
        (self.min + self.max) * 0.5
    }

    /// Check whether a point lies within the rectangle (boundary inclusive)
    #[inline]
    pub fn contains(&self, p: DVec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// Like [`Rect::contains`] but with a tolerance for floating-point
    /// round-off on clipped coordinates
    #[inline]
    pub fn contains_eps(&self, p: DVec2, eps: f64) -> bool {
        p.x >= self.min.x - eps
            && p.x <= self.max.x + eps
            && p.y >= self.min.y - eps
            && p.y <= self.max.y + eps
    }
}

/// An undirected edge between two point indices
///
/// Normalized to (min, max) at construction so an edge equals its own
/// reversal. Used for hole-boundary bookkeeping during triangulation and
/// for Delaunay edge incidence while building cells; not retained in the
/// final diagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Edge(pub usize, pub usize);

impl Edge {
    /// Create a normalized undirected edge
    #[inline]
    pub fn new(a: usize, b: usize) -> Self {
        Self(a.min(b), a.max(b))
    }
}

/// A triangle over indexed points with a memoized circumcircle
///
/// The circumcenter and squared circumradius are computed once at
/// construction. A collinear vertex triple yields `circumcenter == None`;
/// such a degenerate triangle is excluded from every circumcircle test
/// instead of producing NaN or infinity.
#[derive(Debug, Clone, Copy)]
pub struct Triangle {
    /// First vertex index
    pub a: usize,
    /// Second vertex index
    pub b: usize,
    /// Third vertex index
    pub c: usize,
    /// Circumcenter, or `None` for a degenerate (collinear) triangle
    pub circumcenter: Option<DVec2>,
    /// Squared circumradius (0 for a degenerate triangle)
    pub circumradius_sq: f64,
}

impl Triangle {
    /// Create a triangle over three indices into `points`, computing its
    /// circumcircle up front
    pub fn new(a: usize, b: usize, c: usize, points: &[DVec2]) -> Self {
        let (circumcenter, circumradius_sq) = match circumcenter(points[a], points[b], points[c]) {
            Some(center) => (Some(center), (points[a] - center).length_squared()),
            None => (None, 0.0),
        };

        Self {
            a,
            b,
            c,
            circumcenter,
            circumradius_sq,
        }
    }

    /// The three vertex indices as an array
    #[inline]
    pub fn vertices(&self) -> [usize; 3] {
        [self.a, self.b, self.c]
    }

    /// The three undirected edges of this triangle
    #[inline]
    pub fn edges(&self) -> [Edge; 3] {
        [
            Edge::new(self.a, self.b),
            Edge::new(self.b, self.c),
            Edge::new(self.c, self.a),
        ]
    }

    /// Check whether the triangle uses the given vertex index
    #[inline]
    pub fn contains_vertex(&self, v: usize) -> bool {
        self.a == v || self.b == v || self.c == v
    }

    /// Whether the vertex triple was collinear
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.circumcenter.is_none()
    }

    /// Inclusive in-circumcircle test
    ///
    /// A point exactly on the circle counts as inside; this is the
    /// deterministic tie-break the triangulator relies on for cocircular
    /// configurations. Always `false` for a degenerate triangle.
    #[inline]
    pub fn circumcircle_contains(&self, p: DVec2) -> bool {
        match self.circumcenter {
            Some(center) => (p - center).length_squared() <= self.circumradius_sq,
            None => false,
        }
    }
}

/// Compute the circumcenter of three points
///
/// Solves the intersection of the perpendicular bisectors in determinant
/// form. Returns `None` when the points are collinear (the bisectors are
/// parallel and the determinant vanishes).
pub fn circumcenter(a: DVec2, b: DVec2, c: DVec2) -> Option<DVec2> {
    let d = 2.0 * (a.x * (b.y - c.y) + b.x * (c.y - a.y) + c.x * (a.y - b.y));

    if d.abs() < COLLINEAR_EPS {
        return None;
    }

    let a_sq = a.length_squared();
    let b_sq = b.length_squared();
    let c_sq = c.length_squared();

    let ux = (a_sq * (b.y - c.y) + b_sq * (c.y - a.y) + c_sq * (a.y - b.y)) / d;
    let uy = (a_sq * (c.x - b.x) + b_sq * (a.x - c.x) + c_sq * (b.x - a.x)) / d;

    Some(DVec2::new(ux, uy))
}
