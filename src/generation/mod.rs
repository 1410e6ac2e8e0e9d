//! Core Voronoi generation pipeline
//!
//! Sites are sampled inside the bounds, optionally relaxed with Lloyd's
//! algorithm, and turned into cells by half-plane clipping.

mod lloyd;
mod sites;
mod voronoi;

pub use lloyd::{lloyd_relaxation, lloyd_relaxation_with_options, relax_sites_once, LloydOptions};
pub use sites::{poisson_disc_sites, uniform_sites, PoissonDiscSampler, SiteSampler, UniformSampler};
pub use voronoi::{
    bisector, compute_cell_for_site, compute_cell_geometry, compute_cells, shared_vertices,
    BOUNDARY_TOLERANCE, SHARED_VERTEX_TOLERANCE,
};

use glam::DVec2;

use crate::config::{LayoutConfig, SiteStrategy};
use crate::seed::RandomStream;

/// Generate the sites a configuration asks for
///
/// Uniform sampling for [`SiteStrategy::Uniform`], Poisson-disc sampling for
/// the other strategies, followed by relaxation for [`SiteStrategy::Relaxed`].
pub fn generate_sites(config: &LayoutConfig, stream: &mut RandomStream) -> Vec<DVec2> {
    match config.strategy {
        SiteStrategy::Uniform => generate_sites_with_sampler(config, &UniformSampler, stream),
        SiteStrategy::PoissonDisc | SiteStrategy::Relaxed => generate_sites_with_sampler(
            config,
            &PoissonDiscSampler::new(config.min_site_distance),
            stream,
        ),
    }
}

/// Generate sites with a custom sampler
///
/// Relaxation still follows the configuration's strategy.
pub fn generate_sites_with_sampler<S>(
    config: &LayoutConfig,
    sampler: &S,
    stream: &mut RandomStream,
) -> Vec<DVec2>
where
    S: SiteSampler,
{
    // Step 1: Place sites
    let sites = sampler.sample(&config.bounds, config.site_count, stream.rng_mut());

    // Step 2: Apply Lloyd's relaxation with optional convergence detection
    if config.strategy == SiteStrategy::Relaxed && config.relaxation_iterations > 0 {
        let options = LloydOptions {
            max_iterations: config.relaxation_iterations,
            convergence_threshold: config.relaxation_convergence,
        };
        lloyd_relaxation_with_options(sites, &config.bounds, options)
    } else {
        sites
    }
}
