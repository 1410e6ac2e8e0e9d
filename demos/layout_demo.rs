//! Demonstration of VoronoiDiagram generation and queries

use rust_voronoi_layout::*;

fn main() -> Result<()> {
    println!("=== rust_voronoi_layout Demo ===\n");

    // Step 1: Configure layout
    println!("Step 1: Configuring layout...");
    let config = LayoutConfigBuilder::new()
        .seed("TestSeed123")
        .bounds(Bounds::from_size(1000.0, 800.0))?
        .site_count(60)
        .strategy(SiteStrategy::Relaxed)
        .min_site_distance(40.0)
        .relaxation_iterations(5)
        .build()?;

    println!("  Seed: {}", config.seed);
    println!("  Strategy: {}", config.strategy.name());
    println!("  Bounds: {:?} -> {:?}", config.bounds.min, config.bounds.max);

    // Step 2: Generate diagram
    println!("\nStep 2: Generating diagram...");
    let diagram = VoronoiDiagram::generate(&config)?;
    println!(
        "  Generated {} cells ({} valid)",
        diagram.cell_count(),
        diagram.valid_cell_count()
    );

    // Step 3: Statistics
    println!("\nStep 3: Cell statistics:");
    let valid = diagram.valid_cell_count().max(1) as f64;
    let boundary = diagram.cells().iter().filter(|c| c.is_boundary).count();
    let avg_neighbors =
        diagram.valid_cells().map(|c| c.neighbor_count()).sum::<usize>() as f64 / valid;
    let avg_vertices =
        diagram.valid_cells().map(|c| c.vertex_count()).sum::<usize>() as f64 / valid;
    println!("  Boundary cells: {}", boundary);
    println!("  Average neighbors per cell: {:.2}", avg_neighbors);
    println!("  Average vertices per cell: {:.2}", avg_vertices);
    println!(
        "  Total area: {:.1} (bounds {:.1})",
        diagram.total_area(),
        diagram.bounds().area()
    );

    // Step 4: Point queries
    println!("\nStep 4: Point queries:");
    let probe = diagram.bounds().center();
    if let Some(cell_id) = diagram.find_cell_containing_point(probe) {
        let cell = diagram.get_cell(cell_id).expect("query returned a valid id");
        println!("  Position {:?} -> Cell {}", probe, cell_id);
        println!("  Cell has {} neighbors", cell.neighbor_count());

        if let Some(circle) = cell.max_inscribed_circle(0.5) {
            println!(
                "  Largest inscribed circle: center ({:.1}, {:.1}), radius {:.1}",
                circle.center.x, circle.center.y, circle.radius
            );
        }

        if let Some(&neighbor) = cell.neighbors.first() {
            if let Some((start, end)) = diagram.get_shared_edge(cell_id, neighbor) {
                println!("  Shared edge with {}: {:?} -> {:?}", neighbor, start, end);
            }
        }

        let nearby = diagram.find_cells_within_radius(cell_id, 2);
        println!("  Found {} cells within 2 hops", nearby.len());
    }

    if let Some(closest) = diagram.find_closest_cell_by_site(DVec2::new(-50.0, -50.0)) {
        println!("  Closest site to (-50, -50): cell {}", closest);
    }

    #[cfg(feature = "spatial-index")]
    {
        if let Some(cell_id) = diagram.find_cell_at(probe) {
            println!("  KD-tree lookup at {:?}: cell {}", probe, cell_id);
        }
    }

    println!("\n=== Demo Complete ===");
    Ok(())
}
