//! Bounded 2D Voronoi layout generation
//!
//! A standalone library for partitioning a rectangle into Voronoi cells,
//! suitable for procedural level layout, territory maps, or any other
//! region-based placement.
//!
//! # Quick Start
//!
//! ```rust
//! use rust_voronoi_layout::*;
//!
//! // Generate a layout
//! let config = LayoutConfigBuilder::new()
//!     .seed("TestSeed123")
//!     .bounds(Bounds::from_size(800.0, 600.0)).unwrap()
//!     .site_count(40)
//!     .strategy(SiteStrategy::Relaxed)
//!     .min_site_distance(25.0)
//!     .relaxation_iterations(3)
//!     .build().unwrap();
//!
//! let diagram = VoronoiDiagram::generate(&config).unwrap();
//!
//! // Query it
//! let cell = diagram.find_cell_containing_point(DVec2::new(400.0, 300.0));
//! println!("Center is in cell {:?} of {}", cell, diagram.cell_count());
//! ```
//!
//! # Features
//!
//! - `spatial-index` (default): Enables O(log n) nearest-site lookups using KD-tree
//! - `serde`: Enables serialization support for configuration and cells

// Modules
pub mod error;
pub mod bounds;
pub mod config;
pub mod seed;
pub mod geometry;
pub mod cell;
pub mod generation;
pub mod diagram;

#[cfg(feature = "spatial-index")]
pub mod spatial;

// Re-export core types for convenience
pub use error::{LayoutError, Result};
pub use bounds::Bounds;
pub use config::{LayoutConfig, LayoutConfigBuilder, SiteStrategy};
pub use seed::{hash_seed, RandomStream};
pub use cell::VoronoiCell;
pub use diagram::VoronoiDiagram;
pub use geometry::InscribedCircle;
pub use generation::{LloydOptions, PoissonDiscSampler, SiteSampler, UniformSampler};

#[cfg(feature = "spatial-index")]
pub use spatial::SpatialIndex;

// Re-export glam::DVec2 for convenience
pub use glam::DVec2;
