//! Axis-aligned generation area

use glam::DVec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, Result};

/// Axis-aligned rectangle that constrains all sites and clip operations
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    /// Minimum corner
    pub min: DVec2,
    /// Maximum corner
    pub max: DVec2,
}

impl Bounds {
    /// Create bounds from two corners
    ///
    /// No validation happens here; see [`Bounds::validate`].
    pub const fn new(min: DVec2, max: DVec2) -> Self {
        Self { min, max }
    }

    /// Bounds spanning `(0, 0)` to `(width, height)`
    pub fn from_size(width: f64, height: f64) -> Self {
        Self::new(DVec2::ZERO, DVec2::new(width, height))
    }

    /// Check that both corners are finite and `min` is strictly below `max` on both axes
    pub fn validate(&self) -> Result<()> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(LayoutError::InvalidConfig(format!(
                "bounds must be finite (got {:?} - {:?})",
                self.min, self.max
            )));
        }
        if self.min.x >= self.max.x || self.min.y >= self.max.y {
            return Err(LayoutError::InvalidConfig(format!(
                "bounds min must be strictly less than max (got {:?} - {:?})",
                self.min, self.max
            )));
        }
        Ok(())
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    #[inline]
    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    #[inline]
    pub fn center(&self) -> DVec2 {
        (self.min + self.max) * 0.5
    }

    /// Length of the rectangle's diagonal
    #[inline]
    pub fn diagonal(&self) -> f64 {
        self.min.distance(self.max)
    }

    /// Inclusive containment test
    #[inline]
    pub fn contains(&self, point: DVec2) -> bool {
        point.x >= self.min.x && point.x <= self.max.x && point.y >= self.min.y && point.y <= self.max.y
    }

    /// Clamp a point into the rectangle
    #[inline]
    pub fn clamp(&self, point: DVec2) -> DVec2 {
        point.clamp(self.min, self.max)
    }

    /// The four corners, counter-clockwise in y-up coordinates starting at `min`
    ///
    /// This is the polygon every cell starts from before clipping, so its
    /// winding is the winding of every generated cell.
    pub fn corners(&self) -> [DVec2; 4] {
        [
            self.min,
            DVec2::new(self.max.x, self.min.y),
            self.max,
            DVec2::new(self.min.x, self.max.y),
        ]
    }

    /// True if `point` lies within `tolerance` of any of the four edge lines
    pub fn is_on_edge(&self, point: DVec2, tolerance: f64) -> bool {
        (point.x - self.min.x).abs() < tolerance
            || (point.x - self.max.x).abs() < tolerance
            || (point.y - self.min.y).abs() < tolerance
            || (point.y - self.max.y).abs() < tolerance
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::new(DVec2::splat(-500.0), DVec2::splat(500.0))
    }
}
