//! Site placement inside the bounding rectangle

use glam::DVec2;
use rand::Rng;
use tracing::warn;

use crate::bounds::Bounds;
use crate::config::clamp_min_site_distance;
use crate::geometry::poisson_disk_sampling;

/// Trait for placing sites inside a rectangle
///
/// Implementations must draw all randomness from `rng` so that the same
/// stream state reproduces the same sites.
pub trait SiteSampler {
    /// Place up to `count` sites inside `bounds`
    fn sample<R: Rng>(&self, bounds: &Bounds, count: usize, rng: &mut R) -> Vec<DVec2>;
}

/// Independent, uniformly distributed sites
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformSampler;

impl SiteSampler for UniformSampler {
    fn sample<R: Rng>(&self, bounds: &Bounds, count: usize, rng: &mut R) -> Vec<DVec2> {
        uniform_sites(bounds, count, rng)
    }
}

/// Sites at least `min_distance` apart (Bridson's Poisson-disc sampling)
#[derive(Debug, Clone, Copy)]
pub struct PoissonDiscSampler {
    min_distance: f64,
}

impl PoissonDiscSampler {
    /// Create a sampler; distances below 1 are raised to 1
    pub fn new(min_distance: f64) -> Self {
        Self {
            min_distance: clamp_min_site_distance(min_distance),
        }
    }

    #[inline]
    pub fn min_distance(&self) -> f64 {
        self.min_distance
    }
}

impl SiteSampler for PoissonDiscSampler {
    fn sample<R: Rng>(&self, bounds: &Bounds, count: usize, rng: &mut R) -> Vec<DVec2> {
        poisson_disc_sites(bounds, count, self.min_distance, rng)
    }
}

/// Draw `count` sites uniformly inside `bounds`
///
/// `bounds` must be valid (see [`Bounds::validate`]).
pub fn uniform_sites<R: Rng>(bounds: &Bounds, count: usize, rng: &mut R) -> Vec<DVec2> {
    (0..count)
        .map(|_| {
            DVec2::new(
                rng.gen_range(bounds.min.x..bounds.max.x),
                rng.gen_range(bounds.min.y..bounds.max.y),
            )
        })
        .collect()
}

/// Place up to `count` sites inside `bounds`, pairwise at least `min_distance` apart
///
/// Returns fewer sites than requested when the rectangle fills up first.
pub fn poisson_disc_sites<R: Rng>(
    bounds: &Bounds,
    count: usize,
    min_distance: f64,
    rng: &mut R,
) -> Vec<DVec2> {
    let sites = poisson_disk_sampling(&bounds.corners(), min_distance, count, rng);

    if sites.len() < count {
        warn!(
            requested = count,
            placed = sites.len(),
            min_distance,
            "Poisson-disc sampling ran out of room before reaching the requested site count"
        );
    }

    sites
}
