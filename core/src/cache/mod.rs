use crate::circle::{Circle, CircleIndex};
use crate::geometry::{utils_2d, Point2, EPSILON};
use crate::relation::{relate, PairRelation};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The two boundary crossings of an intersecting pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Chord {
    pub point1: Point2,
    pub point2: Point2,
}

impl Chord {
    pub fn new(point1: Point2, point2: Point2) -> Self {
        Self { point1, point2 }
    }

    pub fn length(&self) -> f64 {
        utils_2d::distance(&self.point1, &self.point2)
    }

    /// Tangent circles produce a chord of zero length.
    pub fn is_degenerate(&self) -> bool {
        self.length() < EPSILON
    }
}

/// Per-circle intersection lists for one recompute pass.
///
/// `rows[a][b]` exists iff circles `a` and `b` intersect, and `rows[b][a]`
/// then holds the same chord. Built from scratch by [`IntersectionCache::rebuild`];
/// there is no incremental update path.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct IntersectionCache {
    rows: BTreeMap<CircleIndex, BTreeMap<CircleIndex, Chord>>,
}

impl IntersectionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Relate every unordered pair of `circles` and record the intersecting ones.
    pub fn rebuild(circles: &[Circle]) -> Self {
        let mut rows: BTreeMap<CircleIndex, BTreeMap<CircleIndex, Chord>> = circles
            .iter()
            .map(|c| (c.index(), BTreeMap::new()))
            .collect();

        for (i, first) in circles.iter().enumerate() {
            for second in &circles[i + 1..] {
                // Canonical order: lower index first.
                let (lo, hi) = if first.index() < second.index() {
                    (first, second)
                } else {
                    (second, first)
                };

                if let PairRelation::Intersecting(p1, p2) = relate(lo, hi) {
                    let chord = Chord::new(p1, p2);
                    if let Some(row) = rows.get_mut(&lo.index()) {
                        row.insert(hi.index(), chord);
                    }
                    if let Some(row) = rows.get_mut(&hi.index()) {
                        row.insert(lo.index(), chord);
                    }
                }
            }
        }

        Self { rows }
    }

    /// Chord shared by `a` and `b`, if they intersect.
    pub fn get(&self, a: CircleIndex, b: CircleIndex) -> Option<&Chord> {
        self.rows.get(&a).and_then(|row| row.get(&b))
    }

    /// All circles intersecting `index`, with the shared chord.
    pub fn intersections_of(&self, index: CircleIndex) -> impl Iterator<Item = (CircleIndex, &Chord)> {
        self.rows
            .get(&index)
            .into_iter()
            .flat_map(|row| row.iter().map(|(other, chord)| (*other, chord)))
    }

    /// Every intersecting pair once, lower index first.
    pub fn pairs(&self) -> impl Iterator<Item = (CircleIndex, CircleIndex, &Chord)> {
        self.rows.iter().flat_map(|(a, row)| {
            row.range(CircleIndex(a.0.saturating_add(1))..)
                .map(move |(b, chord)| (*a, *b, chord))
        })
    }

    pub fn pair_count(&self) -> usize {
        self.pairs().count()
    }

    /// Number of circles with a row, intersecting or not.
    pub fn circle_count(&self) -> usize {
        self.rows.len()
    }

    /// True if no pair intersects.
    pub fn is_empty(&self) -> bool {
        self.rows.values().all(|row| row.is_empty())
    }
}
