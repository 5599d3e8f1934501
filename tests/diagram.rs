//! End-to-end diagram generation tests

use voronoi_map::*;

fn square_corner_diagram() -> VoronoiDiagram {
    let bounds = Rect::new(0.0, 0.0, 100.0, 100.0);
    let sites = vec![
        DVec2::new(10.0, 10.0),
        DVec2::new(10.0, 90.0),
        DVec2::new(90.0, 10.0),
        DVec2::new(90.0, 90.0),
    ];
    VoronoiDiagram::from_sites(bounds, sites).unwrap()
}

#[test]
fn four_corner_sites_yield_four_cells() {
    let diagram = square_corner_diagram();

    assert!(diagram.is_initialized());
    assert_eq!(diagram.cell_count(), 4);
}

#[test]
fn four_corner_sites_form_an_adjacency_cycle() {
    let diagram = square_corner_diagram();

    // Each quadrant cell borders exactly the two side-adjacent quadrants;
    // the diagonal pairs meet only at the center point, which is not an edge
    for cell in diagram.cells() {
        assert_eq!(
            cell.neighbor_count(),
            2,
            "cell {} has neighbors {:?}",
            cell.id,
            cell.neighbors
        );
        for &n in &cell.neighbors {
            assert!(diagram.cells()[n].is_neighbor_of(cell.id));
        }
    }

    let cell_of = |site_index: usize| diagram.cell_for_site(site_index).unwrap().id;
    // Diagonal pairs: (10,10)-(90,90) and (10,90)-(90,10)
    assert!(!diagram.cells()[cell_of(0)].is_neighbor_of(cell_of(3)));
    assert!(!diagram.cells()[cell_of(1)].is_neighbor_of(cell_of(2)));
}

#[test]
fn four_corner_cells_stay_within_bounds() {
    let diagram = square_corner_diagram();
    let bounds = diagram.bounds();

    for cell in diagram.cells() {
        assert!(cell.vertex_count() >= 3, "cell {} polygon is open", cell.id);
        for v in &cell.vertices {
            assert!(bounds.contains_eps(*v, 1e-6), "vertex {:?} out of bounds", v);
        }
        // Each quadrant cell covers a quarter of the domain
        assert!((cell.area() - 2500.0).abs() < 1e-6);
    }
}

#[test]
fn collinear_sites_are_rejected_without_nan() {
    let bounds = Rect::new(-10.0, -10.0, 110.0, 10.0);
    let sites = vec![
        DVec2::new(0.0, 0.0),
        DVec2::new(50.0, 0.0),
        DVec2::new(100.0, 0.0),
    ];

    match VoronoiDiagram::from_sites(bounds, sites) {
        Err(VoronoiError::DegenerateGeometry(_)) => {}
        other => panic!("expected DegenerateGeometry, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn undersized_site_counts_are_rejected_up_front() {
    let bounds = Rect::new(0.0, 0.0, 100.0, 100.0);

    for count in [0, 1, 2] {
        let config = MapConfig {
            seed: 1,
            site_count: count,
            bounds,
        };
        assert!(
            matches!(
                VoronoiDiagram::generate(&config),
                Err(VoronoiError::InvalidArgument(_))
            ),
            "site_count {} was not rejected",
            count
        );
    }

    // The builder refuses the same inputs even earlier
    assert!(MapConfigBuilder::new().site_count(2).is_err());
}

#[test]
fn generated_diagram_satisfies_structural_invariants() {
    let config = MapConfigBuilder::new()
        .seed(1337)
        .site_count(120)
        .unwrap()
        .bounds(Rect::new(0.0, 0.0, 512.0, 512.0))
        .unwrap()
        .build()
        .unwrap();

    let diagram = VoronoiDiagram::generate(&config).unwrap();
    let bounds = diagram.bounds();

    assert!(diagram.cell_count() <= diagram.site_count());

    for cell in diagram.cells() {
        // Polygon containment after clipping
        for v in &cell.vertices {
            assert!(bounds.contains_eps(*v, 1e-6));
            assert!(v.x.is_finite() && v.y.is_finite());
        }

        // Symmetric, deduplicated adjacency
        let mut seen = std::collections::HashSet::new();
        for &n in &cell.neighbors {
            assert!(seen.insert(n), "duplicate neighbor {}", n);
            assert_ne!(n, cell.id);
            assert!(diagram.cells()[n].is_neighbor_of(cell.id));
        }
    }

    for edge in diagram.edges() {
        assert!(edge.left < diagram.cell_count());
        if let Some(right) = edge.right {
            assert!(right < diagram.cell_count());
            assert_ne!(edge.left, right);
        }
        assert!(edge.start.is_finite() && edge.end.is_finite());
    }
}

#[test]
fn neighbors_always_share_an_edge() {
    let config = MapConfigBuilder::new()
        .seed(99)
        .site_count(60)
        .unwrap()
        .bounds(Rect::new(0.0, 0.0, 200.0, 200.0))
        .unwrap()
        .build()
        .unwrap();

    let diagram = VoronoiDiagram::generate(&config).unwrap();

    for cell in diagram.cells() {
        for &n in &cell.neighbors {
            let edge = diagram
                .edge_between(cell.id, n)
                .unwrap_or_else(|| panic!("cells {} and {} share no edge", cell.id, n));
            assert!(!edge.is_boundary());
        }
    }
}

#[test]
fn same_seed_reproduces_identical_structure() {
    let config = MapConfigBuilder::new()
        .seed(2024)
        .site_count(80)
        .unwrap()
        .build()
        .unwrap();

    let a = VoronoiDiagram::generate(&config).unwrap();
    let b = VoronoiDiagram::generate(&config).unwrap();

    assert_eq!(a.sites(), b.sites());
    assert_eq!(a.edge_count(), b.edge_count());
    for (ca, cb) in a.cells().iter().zip(b.cells()) {
        assert_eq!(ca.site_index, cb.site_index);
        assert_eq!(ca.neighbors, cb.neighbors);
        assert_eq!(ca.vertices, cb.vertices);
        assert_eq!(ca.edges, cb.edges);
    }
}

#[test]
fn site_outside_bounds_clips_to_empty_polygon() {
    // A far-away site still triangulates, but its cell lies entirely
    // outside the domain and must clip to nothing rather than fail
    let bounds = Rect::new(0.0, 0.0, 100.0, 100.0);
    let sites = vec![
        DVec2::new(20.0, 20.0),
        DVec2::new(80.0, 20.0),
        DVec2::new(50.0, 80.0),
        DVec2::new(5000.0, 5000.0),
    ];

    let diagram = VoronoiDiagram::from_sites(bounds, sites).unwrap();
    let far_cell = diagram.cell_for_site(3).unwrap();

    assert!(far_cell.vertices.is_empty());
    for v in &far_cell.vertices {
        assert!(bounds.contains_eps(*v, 1e-6));
    }
}

#[cfg(feature = "serde")]
#[test]
fn cells_and_edges_round_trip_through_serde() {
    let diagram = square_corner_diagram();

    let json = serde_json::to_string(diagram.cells()).unwrap();
    let cells: Vec<VoronoiCell> = serde_json::from_str(&json).unwrap();
    assert_eq!(cells.len(), diagram.cell_count());
    assert_eq!(cells[0].neighbors, diagram.cells()[0].neighbors);

    let json = serde_json::to_string(diagram.edges()).unwrap();
    let edges: Vec<VoronoiEdge> = serde_json::from_str(&json).unwrap();
    assert_eq!(edges.len(), diagram.edge_count());
}

#[cfg(feature = "spatial-index")]
#[test]
fn point_lookup_agrees_with_nearest_site() {
    let diagram = square_corner_diagram();

    let cell = diagram.find_cell_at(DVec2::new(5.0, 5.0)).unwrap();
    assert_eq!(cell.site, DVec2::new(10.0, 10.0));

    let cell = diagram.find_cell_at(DVec2::new(95.0, 80.0)).unwrap();
    assert_eq!(cell.site, DVec2::new(90.0, 90.0));
}
