//! Seams for the consumers of the relationship layer.
//!
//! The planar arrangement and the chord-crossing search are not part of the
//! engine; the session calls them through these traits after every pass and
//! stores whatever they return in the snapshot without interpreting it.

use crate::circle::{Circle, CircleIndex};
use crate::geometry::Point2;
use crate::radical::RadicalLineRegistry;
use serde::{Deserialize, Serialize};

pub mod chords;
pub use chords::PairwiseChordFinder;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegionKind {
    /// A circle no other circle crosses.
    Circle,
    /// Closed contour bounding a face from the inside.
    Interior,
    /// Outer contour of a group of overlapping circles.
    Exterior,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub kind: RegionKind,
    /// Circles contributing arcs to the boundary, in traversal order.
    pub boundary: Vec<CircleIndex>,
}

/// Builds the arrangement of faces bounded by circle arcs.
pub trait RegionArrangementBuilder: Send {
    fn build_regions(&self, circles: &[Circle]) -> Vec<Region>;
}

/// Finds the points where registered chords cross each other.
pub trait LineIntersectionFinder: Send {
    fn find_intersections(&self, registry: &RadicalLineRegistry) -> Vec<Point2>;
}
