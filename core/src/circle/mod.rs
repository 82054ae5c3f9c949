use crate::error::{EngineError, Result};
use crate::geometry::{utils_2d, Point2};
use serde::{Deserialize, Serialize};
use std::fmt;

pub mod allocator;
pub use allocator::IndexAllocator;

/// Stable identity of a circle for its whole lifetime.
/// Assigned in creation order starting at 0 and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CircleIndex(pub u64);

impl fmt::Display for CircleIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A circle in the editor. Center and radius change while the user drags or
/// resizes it; the index does not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    index: CircleIndex,
    pub center: Point2,
    pub radius: f64,
}

impl Circle {
    /// Creates a circle, rejecting non-finite coordinates and non-positive radii.
    pub fn new(index: CircleIndex, center: Point2, radius: f64) -> Result<Self> {
        validate_center(&center)?;
        validate_radius(radius)?;
        Ok(Self { index, center, radius })
    }

    pub fn index(&self) -> CircleIndex {
        self.index
    }

    pub fn contains_point(&self, point: &Point2) -> bool {
        utils_2d::point_in_circle(point, &self.center, self.radius)
    }
}

pub(crate) fn validate_center(center: &Point2) -> Result<()> {
    if center.x.is_finite() && center.y.is_finite() {
        Ok(())
    } else {
        Err(EngineError::InvalidCenter(center.x, center.y))
    }
}

pub(crate) fn validate_radius(radius: f64) -> Result<()> {
    if radius.is_finite() && radius > 0.0 {
        Ok(())
    } else {
        Err(EngineError::InvalidRadius(radius))
    }
}
