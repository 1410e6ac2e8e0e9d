//! Lloyd's Relaxation for even site spacing
//!
//! Lloyd's Relaxation iteratively moves each site to the centroid of its
//! Voronoi cell, approaching a centroidal Voronoi tessellation.

use glam::DVec2;
use std::time::Instant;
use tracing::debug;

use super::voronoi::compute_cell_geometry;
use crate::bounds::Bounds;

/// Options for Lloyd's relaxation algorithm
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LloydOptions {
    /// Maximum number of iterations to run
    pub max_iterations: usize,
    /// Convergence threshold as a fraction of the bounds diagonal - stop when
    /// the max displacement of a pass falls below it.
    /// Set to 0.0 to disable early termination
    pub convergence_threshold: f64,
}

impl Default for LloydOptions {
    fn default() -> Self {
        Self {
            max_iterations: 5,
            convergence_threshold: 0.0,
        }
    }
}

/// Apply Lloyd's Relaxation for a fixed number of passes
///
/// # Algorithm
///
/// For each iteration:
/// 1. Rebuild every cell from the current sites
/// 2. Move each valid cell's site to the cell centroid, clamped into bounds
/// 3. Leave sites of invalid cells where they are
///
/// The iteration count is a budget: the sites are not guaranteed to have
/// converged when it runs out.
pub fn lloyd_relaxation(sites: Vec<DVec2>, bounds: &Bounds, iterations: usize) -> Vec<DVec2> {
    let options = LloydOptions {
        max_iterations: iterations,
        ..Default::default()
    };
    lloyd_relaxation_with_options(sites, bounds, options)
}

/// Apply Lloyd's Relaxation with custom options
///
/// This variant adds early termination once a pass moves no site farther
/// than `convergence_threshold * bounds.diagonal()`.
pub fn lloyd_relaxation_with_options(
    mut sites: Vec<DVec2>,
    bounds: &Bounds,
    options: LloydOptions,
) -> Vec<DVec2> {
    let convergence_threshold = options.convergence_threshold * bounds.diagonal();
    let total_start = Instant::now();

    debug!(
        sites = sites.len(),
        max_iterations = options.max_iterations,
        threshold = convergence_threshold,
        "starting lloyd relaxation"
    );

    let mut iterations_run = 0;
    let mut converged = false;

    for iteration in 0..options.max_iterations {
        let iter_start = Instant::now();
        let max_displacement = relax_sites_once(&mut sites, bounds);
        iterations_run = iteration + 1;

        debug!(
            iteration = iteration + 1,
            max_displacement,
            elapsed = ?iter_start.elapsed(),
            "lloyd iteration"
        );

        // Early exit if converged
        if convergence_threshold > 0.0 && max_displacement < convergence_threshold {
            converged = true;
            break;
        }
    }

    debug!(
        iterations = iterations_run,
        converged,
        elapsed = ?total_start.elapsed(),
        "finished lloyd relaxation"
    );

    sites
}

/// Run one relaxation pass in place and return the largest site displacement
pub fn relax_sites_once(sites: &mut [DVec2], bounds: &Bounds) -> f64 {
    let cells = compute_cell_geometry(sites, bounds);
    let mut max_displacement: f64 = 0.0;

    for cell in cells.iter().filter(|c| c.is_valid) {
        let relaxed = bounds.clamp(cell.centroid());
        max_displacement = max_displacement.max(relaxed.distance(sites[cell.id]));
        sites[cell.id] = relaxed;
    }

    max_displacement
}
