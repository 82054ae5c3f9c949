//! Pairwise relationship between two circles.
//!
//! Classical circle-circle intersection: with `d` the distance between the
//! centers, the chord through both intersection points is perpendicular to
//! the line of centers at distance `a` from the first center, and has half
//! length `h`.

use crate::circle::Circle;
use crate::geometry::{utils_2d, Point2};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PairRelation {
    /// Centers farther apart than the sum of the radii.
    Disjoint,
    /// The first circle lies strictly inside the second, no boundary contact.
    AContainsB,
    /// The second circle lies strictly inside the first, no boundary contact.
    BContainsA,
    /// Boundaries meet. Tangent circles yield two equal points.
    Intersecting(Point2, Point2),
    /// Same center and radius; the whole boundary is shared.
    Coincident,
}

impl PairRelation {
    /// The relation as seen with the arguments swapped.
    pub fn reversed(self) -> Self {
        match self {
            PairRelation::AContainsB => PairRelation::BContainsA,
            PairRelation::BContainsA => PairRelation::AContainsB,
            other => other,
        }
    }
}

/// Compute the relationship of `a` to `b`.
///
/// Pure and deterministic. Callers iterating pairs pass the lower-indexed
/// circle first so every pair is evaluated once with a stable point order.
pub fn relate(a: &Circle, b: &Circle) -> PairRelation {
    let d = utils_2d::distance(&a.center, &b.center);

    if d > a.radius + b.radius {
        return PairRelation::Disjoint;
    }
    if d + a.radius < b.radius {
        return PairRelation::AContainsB;
    }
    if d + b.radius < a.radius {
        return PairRelation::BContainsA;
    }
    if d == 0.0 && a.radius == b.radius {
        return PairRelation::Coincident;
    }

    let r_a_sq = a.radius * a.radius;
    let along = (r_a_sq - b.radius * b.radius + d * d) / (2.0 * d);
    // Rounding near tangency can push the radicand slightly below zero.
    let half_chord = (r_a_sq - along * along).max(0.0).sqrt();

    let unit = (b.center - a.center) / d;
    let foot: Point2 = a.center + unit * along;
    let offset = utils_2d::perpendicular_cw(&unit) * half_chord;

    PairRelation::Intersecting(foot + offset, foot - offset)
}
