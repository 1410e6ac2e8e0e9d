//! Layout Configuration and Builder
//!
//! This module provides the immutable configuration used for deterministic
//! Voronoi layout generation.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::bounds::Bounds;
use crate::error::{LayoutError, Result};
use crate::seed::generate_seed_token;

/// Default minimum distance between Poisson-disc sites
pub const DEFAULT_MIN_SITE_DISTANCE: f64 = 10.0;

/// Smallest accepted minimum site distance
pub const MIN_SITE_DISTANCE_FLOOR: f64 = 1.0;

/// Smallest accepted grid size hint
pub const MIN_GRID_SIZE: u32 = 10;

/// How sites are placed before the cells are built
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SiteStrategy {
    /// Independent uniformly distributed sites
    #[default]
    Uniform,
    /// Sites at least `min_site_distance` apart
    PoissonDisc,
    /// Poisson-disc sites moved toward their cell centroids by Lloyd's relaxation
    Relaxed,
}

impl SiteStrategy {
    /// Get a human-readable name for this strategy
    pub fn name(self) -> &'static str {
        match self {
            SiteStrategy::Uniform => "Uniform",
            SiteStrategy::PoissonDisc => "PoissonDisc",
            SiteStrategy::Relaxed => "Relaxed",
        }
    }
}

/// Configuration for deterministic layout generation
///
/// The same configuration always produces the identical diagram.
///
/// # Example
///
/// ```rust
/// use rust_voronoi_layout::*;
///
/// let config = LayoutConfigBuilder::new()
///     .seed("castle-grounds")
///     .site_count(40)
///     .strategy(SiteStrategy::Relaxed)
///     .relaxation_iterations(3)
///     .build()
///     .unwrap();
///
/// assert_eq!(config.seed, "castle-grounds");
/// # #[cfg(feature = "serde")]
/// # {
/// let json = serde_json::to_string(&config).unwrap();
/// let restored: LayoutConfig = serde_json::from_str(&json).unwrap();
/// assert_eq!(config, restored);
/// # }
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    /// Rectangle every site and cell is confined to
    pub bounds: Bounds,

    /// Textual seed; never empty once built
    pub seed: String,

    /// Number of sites requested
    ///
    /// Poisson-disc strategies may place fewer when the area is full.
    pub site_count: usize,

    /// Site placement strategy
    pub strategy: SiteStrategy,

    /// Minimum distance between Poisson-disc sites (>= 1)
    pub min_site_distance: f64,

    /// Number of Lloyd's relaxation passes for [`SiteStrategy::Relaxed`]
    ///
    /// - 0: Poisson-disc sites are used as sampled
    /// - 2-3: Noticeably more even spacing
    /// - 10+: Diminishing returns; every pass rebuilds the whole diagram
    pub relaxation_iterations: usize,

    /// Early-exit threshold for relaxation, as a fraction of the bounds diagonal
    ///
    /// 0.0 runs every requested pass.
    pub relaxation_convergence: f64,

    /// Grid size hint for grid-based layout strategies (>= 10)
    ///
    /// Carried for callers that share one configuration between several
    /// layout generators; Voronoi generation ignores it.
    pub grid_size: u32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        LayoutConfigBuilder::new().build_unchecked()
    }
}

/// Builder for creating LayoutConfig with validation
///
/// # Example
///
/// ```rust
/// use rust_voronoi_layout::*;
///
/// let config = LayoutConfigBuilder::new()
///     .bounds(Bounds::from_size(200.0, 100.0))
///     .unwrap()
///     .site_count(25)
///     .strategy(SiteStrategy::PoissonDisc)
///     .min_site_distance(12.0)
///     .build()
///     .unwrap();
///
/// assert_eq!(config.site_count, 25);
/// ```
#[derive(Debug, Clone)]
pub struct LayoutConfigBuilder {
    bounds: Bounds,
    seed: String,
    site_count: usize,
    strategy: SiteStrategy,
    min_site_distance: f64,
    relaxation_iterations: usize,
    relaxation_convergence: f64,
    grid_size: u32,
}

impl LayoutConfigBuilder {
    /// Create a new builder with default values
    ///
    /// Defaults:
    /// - bounds: (-500, -500) to (500, 500)
    /// - seed: empty (a fresh token is generated on build)
    /// - site_count: 20
    /// - strategy: Uniform
    /// - min_site_distance: 10
    /// - relaxation_iterations: 0
    /// - relaxation_convergence: 0.0 (run every pass)
    /// - grid_size: 100
    pub fn new() -> Self {
        Self {
            bounds: Bounds::default(),
            seed: String::new(),
            site_count: 20,
            strategy: SiteStrategy::default(),
            min_site_distance: DEFAULT_MIN_SITE_DISTANCE,
            relaxation_iterations: 0,
            relaxation_convergence: 0.0,
            grid_size: 100,
        }
    }

    /// Set the generation area
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the bounds are not finite or empty on an axis
    pub fn bounds(mut self, bounds: Bounds) -> Result<Self> {
        bounds.validate()?;
        self.bounds = bounds;
        Ok(self)
    }

    /// Set the textual seed
    ///
    /// An empty seed asks for a freshly generated one.
    pub fn seed(mut self, seed: impl Into<String>) -> Self {
        self.seed = seed.into();
        self
    }

    pub fn site_count(mut self, count: usize) -> Self {
        self.site_count = count;
        self
    }

    pub fn strategy(mut self, strategy: SiteStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Set the minimum Poisson-disc site distance
    ///
    /// Values below 1 (and NaN) are raised to 1.
    pub fn min_site_distance(mut self, distance: f64) -> Self {
        self.min_site_distance = clamp_min_site_distance(distance);
        self
    }

    /// Set the number of Lloyd's relaxation passes
    ///
    /// Only used by [`SiteStrategy::Relaxed`]. The count is a budget, not a
    /// convergence guarantee.
    pub fn relaxation_iterations(mut self, iterations: usize) -> Self {
        self.relaxation_iterations = iterations;
        self
    }

    /// Set the early-exit threshold for Lloyd's relaxation
    ///
    /// The threshold is a fraction of the bounds diagonal. Relaxation stops
    /// once no site moves farther than `threshold * diagonal` in a pass.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if threshold is negative or not finite
    pub fn relaxation_convergence(mut self, threshold: f64) -> Result<Self> {
        if !threshold.is_finite() || threshold < 0.0 {
            return Err(LayoutError::InvalidConfig(format!(
                "relaxation convergence threshold must be finite and >= 0 (got {})",
                threshold
            )));
        }
        self.relaxation_convergence = threshold;
        Ok(self)
    }

    /// Set the grid size hint (raised to at least 10)
    pub fn grid_size(mut self, size: u32) -> Self {
        self.grid_size = size.max(MIN_GRID_SIZE);
        self
    }

    /// Build the configuration
    ///
    /// If the seed is empty, a fresh unique token is generated so the run can
    /// be reproduced from the returned configuration.
    pub fn build(self) -> Result<LayoutConfig> {
        self.bounds.validate()?;
        Ok(self.build_unchecked())
    }

    fn build_unchecked(self) -> LayoutConfig {
        let seed = if self.seed.is_empty() {
            generate_seed_token()
        } else {
            self.seed
        };

        LayoutConfig {
            bounds: self.bounds,
            seed,
            site_count: self.site_count,
            strategy: self.strategy,
            min_site_distance: self.min_site_distance,
            relaxation_iterations: self.relaxation_iterations,
            relaxation_convergence: self.relaxation_convergence,
            grid_size: self.grid_size,
        }
    }
}

impl Default for LayoutConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Raise a minimum site distance to the accepted floor
pub(crate) fn clamp_min_site_distance(distance: f64) -> f64 {
    if distance.is_nan() {
        MIN_SITE_DISTANCE_FLOOR
    } else {
        distance.max(MIN_SITE_DISTANCE_FLOOR)
    }
}
