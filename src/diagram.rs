//! VoronoiDiagram aggregate
//!
//! Owns the ordered site, cell and edge sequences and exposes the
//! read-only query surface. Generation is a destructive full rebuild; the
//! pipeline assembles fresh collections and only then swaps them in, so no
//! partial diagram state is ever observable.

use glam::DVec2;
use std::cell::OnceCell;
use std::collections::HashMap;

use crate::cell::{VoronoiCell, VoronoiEdge};
use crate::config::MapConfig;
use crate::error::{Result, VoronoiError};
use crate::generation;
use crate::geometry::Rect;

#[cfg(feature = "spatial-index")]
use crate::spatial::SpatialIndex;

/// A complete bounded planar Voronoi subdivision
///
/// Cells carry their polygon, neighbors and incident edges; edges carry
/// their endpoints and the cells on either side. All cross-references are
/// integer indices into the diagram's own sequences.
///
/// # Examples
///
/// ```no_run
/// use voronoi_map::*;
///
/// let config = MapConfigBuilder::new()
///     .seed(42)
///     .site_count(128)
///     .unwrap()
///     .build()
///     .unwrap();
///
/// let diagram = VoronoiDiagram::generate(&config).unwrap();
/// println!("{} cells, {} edges", diagram.cell_count(), diagram.edge_count());
///
/// for cell in diagram.cells() {
///     // cell.vertices is the clipped polygon, cell.neighbors the adjacency
/// }
/// ```
#[derive(Clone)]
pub struct VoronoiDiagram {
    /// The domain rectangle every cell is clipped against
    bounds: Rect,

    /// Input sites, in generation order
    sites: Vec<DVec2>,

    /// Cells, indexed by cell id
    cells: Vec<VoronoiCell>,

    /// Edges, indexed by edge id
    edges: Vec<VoronoiEdge>,

    /// Set once generation has completed in full
    initialized: bool,

    /// Lazy site-index -> cell-id lookup; invalidated by every append
    site_cell_cache: OnceCell<HashMap<usize, usize>>,

    /// Lazy cell-pair -> edge-id lookup; invalidated by every append
    edge_pair_cache: OnceCell<HashMap<(usize, usize), usize>>,

    /// Nearest-site index over the sites (requires spatial-index feature)
    #[cfg(feature = "spatial-index")]
    spatial_index: Option<SpatialIndex>,
}

impl VoronoiDiagram {
    /// Create an empty, uninitialized diagram over `bounds`
    pub fn new(bounds: Rect) -> Self {
        Self {
            bounds,
            sites: Vec::new(),
            cells: Vec::new(),
            edges: Vec::new(),
            initialized: false,
            site_cell_cache: OnceCell::new(),
            edge_pair_cache: OnceCell::new(),
            #[cfg(feature = "spatial-index")]
            spatial_index: None,
        }
    }

    /// Generate a diagram from a configuration
    ///
    /// Draws `config.site_count` sites uniformly within `config.bounds`
    /// using the seeded RNG, then builds the subdivision. The same
    /// configuration always reproduces the same diagram.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if the configuration is rejected (no partial
    /// diagram is produced); `DegenerateGeometry` if the drawn site set
    /// admits no triangulation.
    pub fn generate(config: &MapConfig) -> Result<Self> {
        config.validate()?;

        let sites = generation::generate_sites(config.site_count, &config.bounds, config.seed);
        Self::from_sites(config.bounds, sites)
    }

    /// Build a diagram from an explicit site set
    ///
    /// # Errors
    ///
    /// `InvalidArgument` for fewer than 3 sites or non-positive bounds;
    /// `DegenerateGeometry` when the sites are fully collinear.
    pub fn from_sites(bounds: Rect, sites: Vec<DVec2>) -> Result<Self> {
        if sites.len() < 3 {
            return Err(VoronoiError::InvalidArgument(format!(
                "site count must be >= 3 (got {})",
                sites.len()
            )));
        }
        if bounds.width() <= 0.0 || bounds.height() <= 0.0 {
            return Err(VoronoiError::InvalidArgument(format!(
                "bounds must have positive width and height (got {} x {})",
                bounds.width(),
                bounds.height()
            )));
        }

        // Build into fresh collections first; the diagram is only touched
        // once every stage has succeeded
        let (cells, edges) = generation::generate_parts(&sites, &bounds)?;

        let mut diagram = Self::new(bounds);
        for site in sites {
            diagram.push_site(site);
        }
        for cell in cells {
            diagram.push_cell(cell);
        }
        for edge in edges {
            diagram.push_edge(edge);
        }

        #[cfg(feature = "spatial-index")]
        {
            diagram.spatial_index = Some(SpatialIndex::new(&diagram.sites));
        }

        diagram.initialized = true;
        Ok(diagram)
    }

    /// Destructively rebuild this diagram from a configuration
    ///
    /// Prior sites, cells and edges are discarded. On error the diagram is
    /// left cleared and uninitialized rather than half-rebuilt.
    pub fn regenerate(&mut self, config: &MapConfig) -> Result<()> {
        self.clear();
        *self = Self::generate(config)?;
        Ok(())
    }

    /// Empty all sequences and mark the diagram uninitialized
    pub fn clear(&mut self) {
        self.sites.clear();
        self.cells.clear();
        self.edges.clear();
        self.initialized = false;
        self.site_cell_cache = OnceCell::new();
        self.edge_pair_cache = OnceCell::new();
        #[cfg(feature = "spatial-index")]
        {
            self.spatial_index = None;
        }
    }

    /// Append a site during construction
    pub(crate) fn push_site(&mut self, site: DVec2) {
        self.sites.push(site);
        self.invalidate_caches();
    }

    /// Append a cell during construction
    pub(crate) fn push_cell(&mut self, cell: VoronoiCell) {
        self.cells.push(cell);
        self.invalidate_caches();
    }

    /// Append an edge during construction
    pub(crate) fn push_edge(&mut self, edge: VoronoiEdge) {
        self.edges.push(edge);
        self.invalidate_caches();
    }

    fn invalidate_caches(&mut self) {
        self.site_cell_cache.take();
        self.edge_pair_cache.take();
    }

    /// Whether a full generation has completed
    #[inline]
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// The domain rectangle
    #[inline]
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Number of sites
    #[inline]
    pub fn site_count(&self) -> usize {
        self.sites.len()
    }

    /// Number of cells (at most the site count)
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Number of edges
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// All sites, in generation order
    #[inline]
    pub fn sites(&self) -> &[DVec2] {
        &self.sites
    }

    /// All cells, indexed by cell id
    #[inline]
    pub fn cells(&self) -> &[VoronoiCell] {
        &self.cells
    }

    /// All edges, indexed by edge id
    #[inline]
    pub fn edges(&self) -> &[VoronoiEdge] {
        &self.edges
    }

    /// Get a cell by id
    #[inline]
    pub fn get_cell(&self, id: usize) -> Option<&VoronoiCell> {
        self.cells.get(id)
    }

    /// Get an edge by id
    #[inline]
    pub fn get_edge(&self, id: usize) -> Option<&VoronoiEdge> {
        self.edges.get(id)
    }

    /// Find the cell built around the given site index
    ///
    /// Site and cell sequences are not positionally aligned: sites without
    /// surviving triangle incidence have no cell. The lookup map is built
    /// lazily and discarded whenever the diagram is mutated.
    pub fn cell_for_site(&self, site_index: usize) -> Option<&VoronoiCell> {
        let map = self.site_cell_cache.get_or_init(|| {
            self.cells.iter().map(|c| (c.site_index, c.id)).collect()
        });
        map.get(&site_index).map(|&id| &self.cells[id])
    }

    /// Find the interior edge separating two cells, if they are adjacent
    ///
    /// Argument order does not matter.
    pub fn edge_between(&self, cell_a: usize, cell_b: usize) -> Option<&VoronoiEdge> {
        let map = self.edge_pair_cache.get_or_init(|| {
            self.edges
                .iter()
                .filter_map(|e| {
                    e.right
                        .map(|right| ((e.left.min(right), e.left.max(right)), e.id))
                })
                .collect()
        });
        map.get(&(cell_a.min(cell_b), cell_a.max(cell_b)))
            .map(|&id| &self.edges[id])
    }

    /// Neighbor ids of a cell
    ///
    /// Returns an empty slice for an unknown cell id.
    pub fn neighbors(&self, cell_id: usize) -> &[usize] {
        self.cells
            .get(cell_id)
            .map(|c| c.neighbors.as_slice())
            .unwrap_or(&[])
    }

    /// Find the cell containing a point (requires spatial-index feature)
    ///
    /// The containing cell is the cell of the nearest site. Returns `None`
    /// on an empty diagram or when the nearest site contributed no cell
    /// (exact duplicate).
    #[cfg(feature = "spatial-index")]
    pub fn find_cell_at(&self, position: DVec2) -> Option<&VoronoiCell> {
        let index = self.spatial_index.as_ref()?;
        self.cell_for_site(index.find_nearest(position))
    }
}
