//! Spatial indexing for fast point-to-cell lookups
//!
//! This module is only available with the `spatial-index` feature.

#[cfg(feature = "spatial-index")]
use glam::DVec2;
#[cfg(feature = "spatial-index")]
use kiddo::immutable::float::kdtree::ImmutableKdTree;
#[cfg(feature = "spatial-index")]
use kiddo::SquaredEuclidean;

/// Wrapper around a KD-tree over the site positions
///
/// Provides O(log n) nearest-site lookups, which is how an arbitrary point
/// in the domain is mapped to the Voronoi cell containing it: the cell of
/// the nearest site is, by definition, the cell containing the point.
#[cfg(feature = "spatial-index")]
#[derive(Clone)]
pub struct SpatialIndex {
    tree: ImmutableKdTree<f64, usize, 2, 32>,
}

#[cfg(feature = "spatial-index")]
impl SpatialIndex {
    /// Build the index from site positions
    ///
    /// Called once at the end of diagram generation.
    pub fn new(sites: &[DVec2]) -> Self {
        let points: Vec<[f64; 2]> = sites.iter().map(|s| [s.x, s.y]).collect();

        Self {
            tree: ImmutableKdTree::new_from_slice(&points),
        }
    }

    /// Index of the site nearest to `position`
    pub fn find_nearest(&self, position: DVec2) -> usize {
        let query = [position.x, position.y];
        let result = self.tree.nearest_one::<SquaredEuclidean>(&query);
        result.item as usize
    }
}

#[cfg(test)]
#[cfg(feature = "spatial-index")]
mod tests {
    use super::*;

    #[test]
    fn test_spatial_index_basic() {
        let sites = vec![
            DVec2::new(10.0, 10.0),
            DVec2::new(90.0, 10.0),
            DVec2::new(90.0, 90.0),
            DVec2::new(10.0, 90.0),
        ];

        let index = SpatialIndex::new(&sites);

        assert_eq!(index.find_nearest(DVec2::new(15.0, 12.0)), 0);
        assert_eq!(index.find_nearest(DVec2::new(85.0, 5.0)), 1);
        assert_eq!(index.find_nearest(DVec2::new(99.0, 99.0)), 2);
        assert_eq!(index.find_nearest(DVec2::new(0.0, 80.0)), 3);
    }

    #[test]
    fn test_spatial_index_exact_match() {
        let sites = vec![DVec2::new(1.0, 2.0), DVec2::new(5.0, 5.0)];
        let index = SpatialIndex::new(&sites);

        assert_eq!(index.find_nearest(sites[0]), 0);
        assert_eq!(index.find_nearest(sites[1]), 1);
    }
}
