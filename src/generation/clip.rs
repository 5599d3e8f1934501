//! Clipping against the domain rectangle
//!
//! Sutherland-Hodgman polygon clipping (four half-plane passes) for cell
//! polygons and Liang-Barsky clipping for Voronoi edge segments.

use glam::DVec2;

use crate::geometry::Rect;

/// One half-plane of the domain rectangle
///
/// The payload is the boundary coordinate of that side.
#[derive(Debug, Clone, Copy)]
enum HalfPlane {
    /// x >= x_min
    Left(f64),
    /// y <= y_max
    Top(f64),
    /// x <= x_max
    Right(f64),
    /// y >= y_min
    Bottom(f64),
}

impl HalfPlane {
    #[inline]
    fn inside(&self, p: DVec2) -> bool {
        match *self {
            HalfPlane::Left(x) => p.x >= x,
            HalfPlane::Top(y) => p.y <= y,
            HalfPlane::Right(x) => p.x <= x,
            HalfPlane::Bottom(y) => p.y >= y,
        }
    }

    /// Intersection of segment (s, e) with the boundary line
    ///
    /// The clamped coordinate is assigned exactly so clipped vertices land
    /// precisely on the rectangle side.
    #[inline]
    fn intersect(&self, s: DVec2, e: DVec2) -> DVec2 {
        match *self {
            HalfPlane::Left(x) | HalfPlane::Right(x) => {
                let t = (x - s.x) / (e.x - s.x);
                DVec2::new(x, s.y + t * (e.y - s.y))
            }
            HalfPlane::Top(y) | HalfPlane::Bottom(y) => {
                let t = (y - s.y) / (e.y - s.y);
                DVec2::new(s.x + t * (e.x - s.x), y)
            }
        }
    }
}

/// Clip a polygon against the domain rectangle
///
/// Four sequential Sutherland-Hodgman passes, one per half-plane, in the
/// order left, top, right, bottom. Each pass consumes the previous pass's
/// output. A polygon entirely outside the bounds clips to an empty vertex
/// list; this is a legitimate result, not an error.
///
/// # Example
///
/// ```rust
/// use voronoi_map::generation::clip_polygon;
/// use voronoi_map::{DVec2, Rect};
///
/// let bounds = Rect::new(0.0, 0.0, 10.0, 10.0);
/// let polygon = vec![
///     DVec2::new(-5.0, 5.0),
///     DVec2::new(5.0, -5.0),
///     DVec2::new(5.0, 5.0),
/// ];
///
/// let clipped = clip_polygon(&bounds, &polygon);
/// assert!(clipped.iter().all(|v| bounds.contains(*v)));
/// ```
pub fn clip_polygon(bounds: &Rect, polygon: &[DVec2]) -> Vec<DVec2> {
    let passes = [
        HalfPlane::Left(bounds.min.x),
        HalfPlane::Top(bounds.max.y),
        HalfPlane::Right(bounds.max.x),
        HalfPlane::Bottom(bounds.min.y),
    ];

    let mut output = polygon.to_vec();
    for pass in passes {
        if output.is_empty() {
            break;
        }
        output = clip_half_plane(&output, pass);
    }
    output
}

/// One Sutherland-Hodgman pass over consecutive vertex pairs (S, E)
fn clip_half_plane(input: &[DVec2], plane: HalfPlane) -> Vec<DVec2> {
    let mut output = Vec::with_capacity(input.len() + 1);

    let mut s = input[input.len() - 1];
    for &e in input {
        if plane.inside(e) {
            if !plane.inside(s) {
                output.push(plane.intersect(s, e));
            }
            output.push(e);
        } else if plane.inside(s) {
            output.push(plane.intersect(s, e));
        }
        s = e;
    }

    output
}

/// Clip a segment to the domain rectangle (Liang-Barsky)
///
/// Returns `None` when the segment lies entirely outside the bounds.
pub fn clip_segment(bounds: &Rect, a: DVec2, b: DVec2) -> Option<(DVec2, DVec2)> {
    let d = b - a;
    let mut t0 = 0.0_f64;
    let mut t1 = 1.0_f64;

    let checks = [
        (-d.x, a.x - bounds.min.x),
        (d.x, bounds.max.x - a.x),
        (-d.y, a.y - bounds.min.y),
        (d.y, bounds.max.y - a.y),
    ];

    for (p, q) in checks {
        if p == 0.0 {
            // Parallel to this boundary; outside means no intersection
            if q < 0.0 {
                return None;
            }
        } else {
            let r = q / p;
            if p < 0.0 {
                if r > t1 {
                    return None;
                }
                if r > t0 {
                    t0 = r;
                }
            } else {
                if r < t0 {
                    return None;
                }
                if r < t1 {
                    t1 = r;
                }
            }
        }
    }

    Some((a + d * t0, a + d * t1))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds() -> Rect {
        Rect::new(0.0, 0.0, 100.0, 100.0)
    }

    #[test]
    fn test_clip_idempotent_for_inside_polygon() {
        let polygon = vec![
            DVec2::new(10.0, 10.0),
            DVec2::new(90.0, 10.0),
            DVec2::new(90.0, 90.0),
            DVec2::new(10.0, 90.0),
        ];

        let clipped = clip_polygon(&bounds(), &polygon);
        assert_eq!(clipped.len(), polygon.len());
        for (a, b) in polygon.iter().zip(clipped.iter()) {
            assert!((*a - *b).length() < 1e-9);
        }
    }

    #[test]
    fn test_clip_fully_outside_is_empty() {
        let polygon = vec![
            DVec2::new(200.0, 200.0),
            DVec2::new(300.0, 200.0),
            DVec2::new(250.0, 300.0),
        ];

        assert!(clip_polygon(&bounds(), &polygon).is_empty());
    }

    #[test]
    fn test_clip_empty_input() {
        assert!(clip_polygon(&bounds(), &[]).is_empty());
    }

    #[test]
    fn test_clip_crossing_polygon() {
        // Square straddling the left and bottom sides
        let polygon = vec![
            DVec2::new(-50.0, -50.0),
            DVec2::new(50.0, -50.0),
            DVec2::new(50.0, 50.0),
            DVec2::new(-50.0, 50.0),
        ];

        let clipped = clip_polygon(&bounds(), &polygon);
        assert!(!clipped.is_empty());
        for v in &clipped {
            assert!(bounds().contains_eps(*v, 1e-9));
        }

        // The intersection with the domain is the square [0,50] x [0,50]
        let area = {
            let mut sum = 0.0;
            for i in 0..clipped.len() {
                let p = clipped[i];
                let q = clipped[(i + 1) % clipped.len()];
                sum += p.x * q.y - q.x * p.y;
            }
            sum.abs() * 0.5
        };
        assert!((area - 2500.0).abs() < 1e-6);
    }

    #[test]
    fn test_clip_vertices_land_exactly_on_sides() {
        let polygon = vec![
            DVec2::new(-10.0, 50.0),
            DVec2::new(50.0, -10.0),
            DVec2::new(110.0, 50.0),
            DVec2::new(50.0, 110.0),
        ];

        let clipped = clip_polygon(&bounds(), &polygon);
        let on_side = clipped.iter().filter(|v| {
            v.x == 0.0 || v.x == 100.0 || v.y == 0.0 || v.y == 100.0
        });
        assert!(on_side.count() >= 4);
    }

    #[test]
    fn test_segment_inside_unchanged() {
        let a = DVec2::new(10.0, 10.0);
        let b = DVec2::new(90.0, 90.0);
        assert_eq!(clip_segment(&bounds(), a, b), Some((a, b)));
    }

    #[test]
    fn test_segment_outside_dropped() {
        let a = DVec2::new(150.0, 0.0);
        let b = DVec2::new(150.0, 100.0);
        assert_eq!(clip_segment(&bounds(), a, b), None);
    }

    #[test]
    fn test_segment_crossing_trimmed() {
        let a = DVec2::new(50.0, 50.0);
        let b = DVec2::new(50.0, -100.0);
        let (s, e) = clip_segment(&bounds(), a, b).unwrap();
        assert_eq!(s, DVec2::new(50.0, 50.0));
        assert!((e - DVec2::new(50.0, 0.0)).length() < 1e-9);
    }
}
