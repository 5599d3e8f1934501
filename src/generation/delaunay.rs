//! Incremental Delaunay triangulation
//!
//! Bowyer-Watson insertion over the site list. Sites are inserted in input
//! order into a synthetic super-triangle; each insertion removes the
//! triangles whose circumcircle contains the new site and re-triangulates
//! the hole boundary. Triangles touching the super-triangle are discarded
//! at the end.

use glam::DVec2;
use std::collections::HashMap;

use crate::error::{Result, VoronoiError};
use crate::geometry::{Edge, Triangle};

/// Super-triangle inflation factor relative to the larger bounding-box
/// dimension
const SUPER_SCALE: f64 = 10.0;

/// Compute the Delaunay triangulation of a site set
///
/// Returns triangles whose vertex indices refer into `sites`. Exact
/// duplicate sites are skipped (they contribute no cell downstream), and
/// degenerate triangles are excluded from the result.
///
/// # Errors
///
/// Returns `InvalidArgument` for fewer than 3 sites and
/// `DegenerateGeometry` when no triangle survives (fully collinear input).
pub fn triangulate(sites: &[DVec2]) -> Result<Vec<Triangle>> {
    if sites.len() < 3 {
        return Err(VoronoiError::InvalidArgument(format!(
            "triangulation needs at least 3 sites (got {})",
            sites.len()
        )));
    }

    let n = sites.len();
    let mut points: Vec<DVec2> = sites.to_vec();
    points.extend_from_slice(&super_triangle(sites));

    let mut triangles = vec![Triangle::new(n, n + 1, n + 2, &points)];

    for i in 0..n {
        let site = points[i];

        // Exact duplicates would only ever produce degenerate triangles
        if sites[..i].contains(&site) {
            log::warn!("skipping duplicate site {} at {:?}", i, site);
            continue;
        }

        // Triangles whose circumcircle contains the new site
        let bad: Vec<usize> = triangles
            .iter()
            .enumerate()
            .filter(|(_, tri)| tri.circumcircle_contains(site))
            .map(|(ti, _)| ti)
            .collect();

        // Hole boundary: edges belonging to exactly one bad triangle.
        // An edge shared by two bad triangles is interior to the hole.
        let mut edge_counts: HashMap<Edge, usize> = HashMap::new();
        for &ti in &bad {
            for edge in triangles[ti].edges() {
                *edge_counts.entry(edge).or_insert(0) += 1;
            }
        }
        let mut hole: Vec<Edge> = Vec::new();
        for &ti in &bad {
            for edge in triangles[ti].edges() {
                if edge_counts[&edge] == 1 {
                    hole.push(edge);
                }
            }
        }

        // Remove bad triangles in reverse order to keep indices valid
        for &ti in bad.iter().rev() {
            triangles.swap_remove(ti);
        }

        // One new triangle per hole boundary edge, connected to the site
        for edge in hole {
            triangles.push(Triangle::new(edge.0, edge.1, i, &points));
        }
    }

    // Drop triangles referencing a super-triangle vertex, and any
    // degenerate triangle that slipped through on collinear input
    triangles.retain(|tri| {
        let real = tri.a < n && tri.b < n && tri.c < n;
        if real && tri.is_degenerate() {
            log::warn!(
                "excluding degenerate triangle ({}, {}, {})",
                tri.a,
                tri.b,
                tri.c
            );
            return false;
        }
        real
    });

    if triangles.is_empty() {
        return Err(VoronoiError::DegenerateGeometry(
            "no triangle survives; input sites are collinear or coincident".to_string(),
        ));
    }

    log::debug!("triangulated {} sites into {} triangles", n, triangles.len());

    Ok(triangles)
}

/// Build a triangle enclosing the bounding box of all sites, inflated by
/// [`SUPER_SCALE`] times the box's larger dimension
fn super_triangle(sites: &[DVec2]) -> [DVec2; 3] {
    let mut min = sites[0];
    let mut max = sites[0];
    for &p in sites {
        min = min.min(p);
        max = max.max(p);
    }

    let span = (max.x - min.x).max(max.y - min.y).max(1.0);
    let mid = (min + max) * 0.5;
    let d = SUPER_SCALE * span;

    [
        DVec2::new(mid.x - d, mid.y - span),
        DVec2::new(mid.x, mid.y + d),
        DVec2::new(mid.x + d, mid.y - span),
    ]
}
