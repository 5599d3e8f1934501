//! Map configuration and builder
//!
//! Configuration types for deterministic Voronoi map generation.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Result, VoronoiError};
use crate::geometry::Rect;

/// Configuration for deterministic Voronoi map generation
///
/// The same configuration always produces the identical diagram: identical
/// sites, cells, edges and adjacency, modulo floating-point rounding.
///
/// # Example
///
/// ```rust
/// use voronoi_map::*;
///
/// let config = MapConfigBuilder::new()
///     .seed(42)
///     .site_count(64)
///     .unwrap()
///     .bounds(Rect::new(0.0, 0.0, 256.0, 256.0))
///     .unwrap()
///     .build()
///     .unwrap();
///
/// assert_eq!(config.seed, 42);
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapConfig {
    /// Random seed for site placement
    ///
    /// The same seed (with the same site_count and bounds) always draws the
    /// same site set.
    pub seed: u64,

    /// Number of sites to draw uniformly within the bounds
    ///
    /// Must be at least 3; a triangulation needs three non-collinear points.
    pub site_count: usize,

    /// The rectangular map domain
    ///
    /// Every cell polygon is clipped against this rectangle.
    pub bounds: Rect,
}

impl MapConfig {
    /// Validate the configuration
    ///
    /// Called by [`crate::VoronoiDiagram::generate`] before any geometry
    /// work; checked here as well so hand-built configurations are caught.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `site_count < 3` or the bounds have
    /// non-positive width or height.
    pub fn validate(&self) -> Result<()> {
        if self.site_count < 3 {
            return Err(VoronoiError::InvalidArgument(format!(
                "site count must be >= 3 (got {})",
                self.site_count
            )));
        }
        if self.bounds.width() <= 0.0 || self.bounds.height() <= 0.0 {
            return Err(VoronoiError::InvalidArgument(format!(
                "bounds must have positive width and height (got {} x {})",
                self.bounds.width(),
                self.bounds.height()
            )));
        }
        Ok(())
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        MapConfigBuilder::new().build().unwrap()
    }
}

/// Builder for creating a [`MapConfig`] with validation
///
/// # Example
///
/// ```rust
/// use voronoi_map::*;
///
/// // Use defaults (random seed, 256 sites, 1024x1024 domain)
/// let config = MapConfigBuilder::new().build().unwrap();
///
/// // Customize
/// let config = MapConfigBuilder::new()
///     .seed(12345)
///     .site_count(500)
///     .unwrap()
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct MapConfigBuilder {
    seed: Option<u64>,
    site_count: usize,
    bounds: Rect,
}

impl MapConfigBuilder {
    /// Create a new builder with default values
    ///
    /// Defaults:
    /// - seed: random (generated from thread_rng)
    /// - site_count: 256
    /// - bounds: (0, 0) to (1024, 1024)
    pub fn new() -> Self {
        Self {
            seed: None,
            site_count: 256,
            bounds: Rect::new(0.0, 0.0, 1024.0, 1024.0),
        }
    }

    /// Set the random seed for site placement
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the number of sites to generate
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `count < 3`
    pub fn site_count(mut self, count: usize) -> Result<Self> {
        if count < 3 {
            return Err(VoronoiError::InvalidArgument(format!(
                "site count must be >= 3 (got {})",
                count
            )));
        }
        self.site_count = count;
        Ok(self)
    }

    /// Set the rectangular map domain
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if the rectangle has non-positive width
    /// or height
    pub fn bounds(mut self, bounds: Rect) -> Result<Self> {
        if bounds.width() <= 0.0 || bounds.height() <= 0.0 {
            return Err(VoronoiError::InvalidArgument(format!(
                "bounds must have positive width and height (got {} x {})",
                bounds.width(),
                bounds.height()
            )));
        }
        self.bounds = bounds;
        Ok(self)
    }

    /// Build the configuration
    ///
    /// If no seed was provided, generates a random seed using thread_rng.
    pub fn build(self) -> Result<MapConfig> {
        let seed = self.seed.unwrap_or_else(rand::random);

        Ok(MapConfig {
            seed,
            site_count: self.site_count,
            bounds: self.bounds,
        })
    }
}

impl Default for MapConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let config = MapConfigBuilder::new().build().unwrap();
        assert_eq!(config.site_count, 256);
        assert_eq!(config.bounds, Rect::new(0.0, 0.0, 1024.0, 1024.0));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_custom() {
        let config = MapConfigBuilder::new()
            .seed(42)
            .site_count(100)
            .unwrap()
            .bounds(Rect::new(-50.0, -50.0, 50.0, 50.0))
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(config.seed, 42);
        assert_eq!(config.site_count, 100);
        assert_eq!(config.bounds.width(), 100.0);
    }

    #[test]
    fn test_builder_too_few_sites() {
        assert!(MapConfigBuilder::new().site_count(2).is_err());
        assert!(MapConfigBuilder::new().site_count(0).is_err());
        assert!(MapConfigBuilder::new().site_count(3).is_ok());
    }

    #[test]
    fn test_builder_invalid_bounds() {
        // Zero width
        let result = MapConfigBuilder::new().bounds(Rect::new(0.0, 0.0, 0.0, 10.0));
        assert!(result.is_err());

        // Inverted (negative height)
        let result = MapConfigBuilder::new().bounds(Rect::new(0.0, 10.0, 10.0, 0.0));
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_hand_built_config() {
        let config = MapConfig {
            seed: 1,
            site_count: 2,
            bounds: Rect::new(0.0, 0.0, 10.0, 10.0),
        };
        assert!(matches!(
            config.validate(),
            Err(VoronoiError::InvalidArgument(_))
        ));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_config_serialization() {
        let config = MapConfigBuilder::new()
            .seed(12345)
            .site_count(64)
            .unwrap()
            .build()
            .unwrap();

        let json = serde_json::to_string(&config).unwrap();
        let restored: MapConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(config, restored);
    }
}
