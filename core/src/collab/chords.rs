use super::LineIntersectionFinder;
use crate::geometry::{utils_2d, Point2, EPSILON};
use crate::radical::RadicalLineRegistry;

/// Brute-force chord crossing search: every pair of chords is tested once.
///
/// Crossings closer than `merge_tolerance` are reported once, so three chords
/// through a radical center yield a single point. Zero-length chords from
/// tangent pairs are skipped.
#[derive(Debug, Clone)]
pub struct PairwiseChordFinder {
    pub merge_tolerance: f64,
}

impl Default for PairwiseChordFinder {
    fn default() -> Self {
        Self { merge_tolerance: EPSILON }
    }
}

impl PairwiseChordFinder {
    pub fn new() -> Self {
        Self::default()
    }

    fn push_unique(&self, found: &mut Vec<Point2>, p: Point2) {
        let duplicate = found
            .iter()
            .any(|q| utils_2d::distance(q, &p) < self.merge_tolerance);
        if !duplicate {
            found.push(p);
        }
    }
}

impl LineIntersectionFinder for PairwiseChordFinder {
    fn find_intersections(&self, registry: &RadicalLineRegistry) -> Vec<Point2> {
        let segments: Vec<(Point2, Point2)> = registry
            .segments()
            .filter(|(s, e)| utils_2d::distance(s, e) >= EPSILON)
            .collect();

        let mut found = Vec::new();
        for (i, (s1, e1)) in segments.iter().enumerate() {
            for (s2, e2) in &segments[i + 1..] {
                if let Some(p) = utils_2d::segment_intersect(s1, e1, s2, e2) {
                    self.push_unique(&mut found, p);
                }
            }
        }
        found
    }
}
