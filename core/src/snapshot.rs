use crate::cache::IntersectionCache;
use crate::circle::Circle;
use crate::collab::{LineIntersectionFinder, Region, RegionArrangementBuilder};
use crate::geometry::Point2;
use crate::radical::RadicalLineRegistry;
use serde::Serialize;
use tracing::debug;

/// Everything derived from the circle set in one recompute pass.
///
/// Built completely before it is published, then only read.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Snapshot {
    /// Pass counter; 0 is the empty snapshot of a fresh session.
    pub generation: u64,
    pub cache: IntersectionCache,
    pub registry: RadicalLineRegistry,
    pub radical_intersections: Vec<Point2>,
    pub regions: Vec<Region>,
}

impl Snapshot {
    pub fn build(
        generation: u64,
        circles: &[Circle],
        finder: Option<&dyn LineIntersectionFinder>,
        builder: Option<&dyn RegionArrangementBuilder>,
    ) -> Self {
        let cache = IntersectionCache::rebuild(circles);
        let registry = RadicalLineRegistry::rebuild(&cache);
        let radical_intersections = finder
            .map(|f| f.find_intersections(&registry))
            .unwrap_or_default();
        let regions = builder
            .map(|b| b.build_regions(circles))
            .unwrap_or_default();

        debug!(
            generation,
            circles = circles.len(),
            chords = registry.len(),
            radical_intersections = radical_intersections.len(),
            regions = regions.len(),
            "recompute pass complete"
        );

        Self {
            generation,
            cache,
            registry,
            radical_intersections,
            regions,
        }
    }
}
