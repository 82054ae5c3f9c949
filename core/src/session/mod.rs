//! Editor session: the single owner of the circle set and everything derived
//! from it.
//!
//! Mutations edit circles in place and arm the scheduler; nothing derived is
//! touched until the scheduler fires, at which point a fresh [`Snapshot`] is
//! built from the live circles and swapped in whole.

use crate::circle::{self, Circle, CircleIndex, IndexAllocator};
use crate::collab::{LineIntersectionFinder, PairwiseChordFinder, RegionArrangementBuilder};
use crate::config::{DisplayOptions, EngineConfig};
use crate::error::{EngineError, Result};
use crate::geometry::{Point2, Vector2};
use crate::scheduler::RecomputeScheduler;
use crate::snapshot::Snapshot;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

#[cfg(test)]
mod tests_session;

pub struct Session {
    config: EngineConfig,
    circles: Vec<Circle>,
    allocator: IndexAllocator,
    scheduler: RecomputeScheduler,
    snapshot: Arc<Snapshot>,
    line_finder: Option<Box<dyn LineIntersectionFinder>>,
    region_builder: Option<Box<dyn RegionArrangementBuilder>>,
}

impl Session {
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        let scheduler = RecomputeScheduler::new(config.recompute_delay());
        Ok(Self {
            config,
            circles: Vec::new(),
            allocator: IndexAllocator::new(),
            scheduler,
            snapshot: Arc::new(Snapshot::default()),
            line_finder: Some(Box::new(PairwiseChordFinder::new())),
            region_builder: None,
        })
    }

    pub fn with_line_finder(mut self, finder: Box<dyn LineIntersectionFinder>) -> Self {
        self.line_finder = Some(finder);
        self
    }

    pub fn without_line_finder(mut self) -> Self {
        self.line_finder = None;
        self
    }

    pub fn with_region_builder(mut self, builder: Box<dyn RegionArrangementBuilder>) -> Self {
        self.region_builder = Some(builder);
        self
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn display(&self) -> &DisplayOptions {
        &self.config.display
    }

    pub fn circles(&self) -> &[Circle] {
        &self.circles
    }

    pub fn circle(&self, index: CircleIndex) -> Option<&Circle> {
        self.circles.iter().find(|c| c.index() == index)
    }

    /// The last published snapshot. Cheap to clone and hold across mutations.
    pub fn snapshot(&self) -> &Arc<Snapshot> {
        &self.snapshot
    }

    pub fn scheduler(&self) -> &RecomputeScheduler {
        &self.scheduler
    }

    /// When the pending recompute is due, if one is pending.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.scheduler.deadline()
    }

    /// Circles whose disc contains `point`, in creation order.
    pub fn circles_at(&self, point: Point2) -> Vec<CircleIndex> {
        self.circles
            .iter()
            .filter(|c| c.contains_point(&point))
            .map(Circle::index)
            .collect()
    }

    // -------------------------------------------------------------------------
    // Mutations
    // -------------------------------------------------------------------------

    /// Create a circle with the configured default radius.
    pub fn create_circle(&mut self, center: Point2, now: Instant) -> Result<CircleIndex> {
        let radius = self.config.default_radius;
        self.create_circle_with_radius(center, radius, now)
    }

    pub fn create_circle_with_radius(
        &mut self,
        center: Point2,
        radius: f64,
        now: Instant,
    ) -> Result<CircleIndex> {
        circle::validate_center(&center)?;
        self.check_radius(radius)?;
        let index = self.allocator.next_index();
        self.circles.push(Circle::new(index, center, radius)?);
        debug!(%index, x = center.x, y = center.y, radius, "circle created");
        self.scheduler.arm(now);
        Ok(index)
    }

    pub fn move_circle(&mut self, index: CircleIndex, center: Point2, now: Instant) -> Result<()> {
        circle::validate_center(&center)?;
        self.circle_mut(index)?.center = center;
        self.scheduler.arm(now);
        Ok(())
    }

    /// Shift every listed circle by `delta`. Nothing moves if any index is unknown.
    pub fn translate(&mut self, indices: &[CircleIndex], delta: Vector2, now: Instant) -> Result<()> {
        for index in indices {
            let c = self.circle(*index).ok_or(EngineError::UnknownCircle(*index))?;
            circle::validate_center(&(c.center + delta))?;
        }
        for c in self.circles.iter_mut().filter(|c| indices.contains(&c.index())) {
            c.center += delta;
        }
        self.scheduler.arm(now);
        Ok(())
    }

    pub fn resize(&mut self, index: CircleIndex, radius: f64, now: Instant) -> Result<()> {
        self.check_radius(radius)?;
        self.circle_mut(index)?.radius = radius;
        self.scheduler.arm(now);
        Ok(())
    }

    /// Grow (or shrink, for negative `delta`) every listed circle, never going
    /// below the configured minimum radius.
    pub fn adjust_radius(&mut self, indices: &[CircleIndex], delta: f64, now: Instant) -> Result<()> {
        if !delta.is_finite() {
            return Err(EngineError::InvalidRadius(delta));
        }
        if let Some(missing) = indices.iter().find(|i| self.circle(**i).is_none()) {
            return Err(EngineError::UnknownCircle(*missing));
        }
        let min_radius = self.config.min_radius;
        for c in self.circles.iter_mut().filter(|c| indices.contains(&c.index())) {
            c.radius = (c.radius + delta).max(min_radius);
        }
        self.scheduler.arm(now);
        Ok(())
    }

    /// Remove every circle and publish an empty snapshot. Indices already
    /// handed out are not reused.
    pub fn reset(&mut self) {
        info!(circles = self.circles.len(), "session reset");
        self.circles.clear();
        self.scheduler.cancel();
        let generation = self.snapshot.generation + 1;
        self.snapshot = Arc::new(Snapshot {
            generation,
            ..Snapshot::default()
        });
    }

    // -------------------------------------------------------------------------
    // Recompute
    // -------------------------------------------------------------------------

    /// Advance the session clock. Runs the pending recompute if it is due and
    /// returns whether a new snapshot was published.
    pub fn tick(&mut self, now: Instant) -> bool {
        if !self.scheduler.poll(now) {
            return false;
        }
        self.publish();
        self.scheduler.finish();
        true
    }

    /// Recompute right away, dropping any pending request.
    pub fn recompute_now(&mut self) -> &Arc<Snapshot> {
        self.scheduler.cancel();
        self.publish();
        &self.snapshot
    }

    fn publish(&mut self) {
        let next = Snapshot::build(
            self.snapshot.generation + 1,
            &self.circles,
            self.line_finder.as_deref(),
            self.region_builder.as_deref(),
        );
        self.snapshot = Arc::new(next);
    }

    /// Radii set directly must respect the same floor `adjust_radius` clamps to.
    fn check_radius(&self, radius: f64) -> Result<()> {
        circle::validate_radius(radius)?;
        if radius < self.config.min_radius {
            return Err(EngineError::InvalidRadius(radius));
        }
        Ok(())
    }

    fn circle_mut(&mut self, index: CircleIndex) -> Result<&mut Circle> {
        self.circles
            .iter_mut()
            .find(|c| c.index() == index)
            .ok_or(EngineError::UnknownCircle(index))
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("circles", &self.circles.len())
            .field("generation", &self.snapshot.generation)
            .field("scheduler", &self.scheduler.state())
            .finish()
    }
}
