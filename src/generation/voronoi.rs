//! Voronoi cell construction from the Delaunay triangulation
//!
//! Derives cell polygons from triangle circumcenters via Delaunay/Voronoi
//! duality, resolves adjacency between cells, and emits the diagram's edge
//! list. Hull cells are unbounded until the boundary clipper closes them;
//! the dual ray of each hull Delaunay edge contributes a far endpoint so
//! the clip produces the correct closed polygon.

use glam::DVec2;
use std::collections::{BTreeSet, HashMap};

use crate::cell::{VoronoiCell, VoronoiEdge};
use crate::error::Result;
use crate::generation::clip::{clip_polygon, clip_segment};
use crate::geometry::{Edge, Rect, Triangle};

/// Below this squared length a dual edge is treated as collapsed
/// (cocircular circumcenters) and dropped
const COLLAPSED_EDGE_SQ: f64 = 1e-18;

/// Vertices closer than this are merged before angular ordering
const VERTEX_MERGE_EPS: f64 = 1e-9;

/// Tolerance for detecting clipped vertices on a rectangle side
const BOUNDARY_EPS: f64 = 1e-9;

/// Build Voronoi cells and edges from a triangulated site set
///
/// One cell per site with at least one surviving triangle incidence; sites
/// without any (exact duplicates) contribute no cell, so the cell count may
/// be below the site count. Cell polygons are clipped to `bounds`.
///
/// # Arguments
///
/// * `sites` - The input sites, in diagram order
/// * `triangles` - Surviving Delaunay triangles over `sites`
/// * `bounds` - The domain rectangle
pub fn build_cells(
    sites: &[DVec2],
    triangles: &[Triangle],
    bounds: &Rect,
) -> Result<(Vec<VoronoiCell>, Vec<VoronoiEdge>)> {
    // Duality: each triangle circumcenter is a candidate vertex for the
    // cells of its three sites
    let mut candidates: Vec<Vec<DVec2>> = vec![Vec::new(); sites.len()];
    for tri in triangles {
        if let Some(center) = tri.circumcenter {
            for v in tri.vertices() {
                candidates[v].push(center);
            }
        }
    }

    // Assign cell ids in site order; only sites with triangle incidence
    // get a cell
    let mut cell_of: Vec<Option<usize>> = vec![None; sites.len()];
    let mut cell_count = 0;
    for (si, verts) in candidates.iter().enumerate() {
        if !verts.is_empty() {
            cell_of[si] = Some(cell_count);
            cell_count += 1;
        }
    }

    // Delaunay edge -> incident triangle indices
    let mut edge_triangles: HashMap<Edge, Vec<usize>> = HashMap::new();
    for (ti, tri) in triangles.iter().enumerate() {
        for edge in tri.edges() {
            edge_triangles.entry(edge).or_default().push(ti);
        }
    }

    // Sorted keys so edge ids and adjacency insertion order are
    // reproducible across runs
    let mut delaunay_edges: Vec<Edge> = edge_triangles.keys().copied().collect();
    delaunay_edges.sort();

    let mut edges: Vec<VoronoiEdge> = Vec::new();
    let mut neighbors: Vec<BTreeSet<usize>> = vec![BTreeSet::new(); cell_count];
    let mut incident: Vec<Vec<usize>> = vec![Vec::new(); cell_count];

    for edge in delaunay_edges {
        let (left_cell, right_cell) = match (cell_of[edge.0], cell_of[edge.1]) {
            (Some(l), Some(r)) => (l, r),
            _ => continue,
        };

        let incident_tris = &edge_triangles[&edge];
        let segment = match incident_tris.as_slice() {
            [t1, t2] => {
                // Interior Delaunay edge: the dual Voronoi edge joins the
                // two circumcenters
                match (triangles[*t1].circumcenter, triangles[*t2].circumcenter) {
                    (Some(c1), Some(c2)) => {
                        if (c1 - c2).length_squared() < COLLAPSED_EDGE_SQ {
                            // Cocircular sites: the dual edge collapses to
                            // a point and separates nothing
                            log::debug!(
                                "dropping collapsed dual edge between sites {} and {}",
                                edge.0,
                                edge.1
                            );
                            continue;
                        }
                        (c1, c2)
                    }
                    _ => continue,
                }
            }
            [t] => {
                // Hull edge: the dual is a ray along the perpendicular
                // bisector, pointing away from the triangle's third vertex
                let tri = &triangles[*t];
                let Some(center) = tri.circumcenter else {
                    continue;
                };
                let Some(far) = hull_ray_endpoint(sites, tri, edge, center, bounds) else {
                    continue;
                };
                // The far endpoint closes the open cells on both sides of
                // the ray once the polygons are clipped
                candidates[edge.0].push(far);
                candidates[edge.1].push(far);
                (center, far)
            }
            _ => continue,
        };

        let Some((start, end)) = clip_segment(bounds, segment.0, segment.1) else {
            continue;
        };
        if (end - start).length_squared() < COLLAPSED_EDGE_SQ {
            continue;
        }

        let id = edges.len();
        edges.push(VoronoiEdge::new(id, start, end, left_cell, Some(right_cell)));
        neighbors[left_cell].insert(right_cell);
        neighbors[right_cell].insert(left_cell);
        incident[left_cell].push(id);
        incident[right_cell].push(id);
    }

    // Order each cell's vertex set into a simple polygon and clip it, then
    // emit the boundary edges the clip introduced
    let mut cells: Vec<VoronoiCell> = Vec::with_capacity(cell_count);
    for (si, &site) in sites.iter().enumerate() {
        let Some(cell_id) = cell_of[si] else {
            continue;
        };

        let raw = order_cell_vertices(std::mem::take(&mut candidates[si]));
        let polygon = if raw.len() >= 3 {
            clip_polygon(bounds, &raw)
        } else {
            log::warn!(
                "cell {} for site {} has only {} vertices; polygon left empty",
                cell_id,
                si,
                raw.len()
            );
            Vec::new()
        };

        for (start, end) in boundary_runs(bounds, &polygon) {
            let id = edges.len();
            edges.push(VoronoiEdge::new(id, start, end, cell_id, None));
            incident[cell_id].push(id);
        }

        cells.push(VoronoiCell::new(
            cell_id,
            si,
            site,
            polygon,
            neighbors[cell_id].iter().copied().collect(),
            std::mem::take(&mut incident[cell_id]),
        ));
    }

    log::debug!(
        "built {} cells and {} edges from {} triangles",
        cells.len(),
        edges.len(),
        triangles.len()
    );

    Ok((cells, edges))
}

/// Far endpoint of the unbounded dual ray of a hull Delaunay edge
///
/// The ray runs along the perpendicular bisector of the edge, oriented away
/// from the triangle's third vertex, and is extended far enough to exit the
/// domain so clipping can truncate it.
fn hull_ray_endpoint(
    sites: &[DVec2],
    tri: &Triangle,
    edge: Edge,
    center: DVec2,
    bounds: &Rect,
) -> Option<DVec2> {
    let opposite = tri.vertices().into_iter().find(|&v| v != edge.0 && v != edge.1)?;

    let u = sites[edge.0];
    let v = sites[edge.1];
    let mid = (u + v) * 0.5;
    let outward = mid - sites[opposite];
    if outward.length_squared() < COLLAPSED_EDGE_SQ {
        return None;
    }

    let mut dir = DVec2::new(-(v - u).y, (v - u).x).normalize();
    if dir.dot(outward) < 0.0 {
        dir = -dir;
    }

    let reach = (center - bounds.center()).length() + 2.0 * (bounds.max - bounds.min).length();
    Some(center + dir * reach)
}

/// Merge near-identical vertices and order the rest by angle around their
/// mean, yielding a simple non-self-intersecting polygon
///
/// Skipping this ordering step leaves the raw circumcenter multiset in
/// triangle-discovery order, which renders as a self-intersecting mess.
fn order_cell_vertices(candidates: Vec<DVec2>) -> Vec<DVec2> {
    let mut unique: Vec<DVec2> = Vec::with_capacity(candidates.len());
    for c in candidates {
        if !unique.iter().any(|u| (*u - c).length() < VERTEX_MERGE_EPS) {
            unique.push(c);
        }
    }

    if unique.len() < 3 {
        return unique;
    }

    let centroid = unique.iter().copied().sum::<DVec2>() / unique.len() as f64;

    let mut with_angles: Vec<(DVec2, f64)> = unique
        .into_iter()
        .map(|v| {
            let d = v - centroid;
            (v, d.y.atan2(d.x))
        })
        .collect();

    with_angles.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));

    with_angles.into_iter().map(|(v, _)| v).collect()
}

/// Consecutive clipped-polygon vertex pairs lying on one rectangle side
///
/// These are the segments the clipper introduced along the domain border;
/// each becomes a boundary edge with no second cell.
fn boundary_runs(bounds: &Rect, polygon: &[DVec2]) -> Vec<(DVec2, DVec2)> {
    if polygon.len() < 2 {
        return Vec::new();
    }

    let mut runs = Vec::new();
    for i in 0..polygon.len() {
        let s = polygon[i];
        let e = polygon[(i + 1) % polygon.len()];
        if (e - s).length_squared() < COLLAPSED_EDGE_SQ {
            continue;
        }

        let on_same_side = ((s.x - bounds.min.x).abs() < BOUNDARY_EPS
            && (e.x - bounds.min.x).abs() < BOUNDARY_EPS)
            || ((s.x - bounds.max.x).abs() < BOUNDARY_EPS
                && (e.x - bounds.max.x).abs() < BOUNDARY_EPS)
            || ((s.y - bounds.min.y).abs() < BOUNDARY_EPS
                && (e.y - bounds.min.y).abs() < BOUNDARY_EPS)
            || ((s.y - bounds.max.y).abs() < BOUNDARY_EPS
                && (e.y - bounds.max.y).abs() < BOUNDARY_EPS);

        if on_same_side {
            runs.push((s, e));
        }
    }
    runs
}
