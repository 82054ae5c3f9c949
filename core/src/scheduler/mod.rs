//! Trailing-edge debounce for the full recompute pass.
//!
//! # Pattern
//!
//! - Every mutation calls [`RecomputeScheduler::arm`]; arming while a run is
//!   pending replaces the old deadline, so a burst collapses into one run.
//! - The owner calls [`RecomputeScheduler::run_if_due`] (or the `poll` /
//!   `finish` pair) whenever its clock advances.
//! - Time is passed in explicitly so the machine is testable without sleeping.

use serde::Serialize;
use std::time::{Duration, Instant};
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Idle,
    /// A recompute has been requested and will run at `deadline`.
    Pending { deadline: Instant },
    /// A recompute pass is in progress.
    Running,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SchedulerStats {
    /// Mutation events seen.
    pub armed: u64,
    /// Pending runs cancelled by a newer request.
    pub coalesced: u64,
    /// Recompute passes executed.
    pub runs: u64,
}

#[derive(Debug, Clone)]
pub struct RecomputeScheduler {
    delay: Duration,
    state: SchedulerState,
    stats: SchedulerStats,
}

impl RecomputeScheduler {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            state: SchedulerState::Idle,
            stats: SchedulerStats::default(),
        }
    }

    /// Zero delay: a request is due as soon as it is made.
    pub fn immediate() -> Self {
        Self::new(Duration::ZERO)
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn stats(&self) -> SchedulerStats {
        self.stats
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.state, SchedulerState::Pending { .. })
    }

    pub fn deadline(&self) -> Option<Instant> {
        match self.state {
            SchedulerState::Pending { deadline } => Some(deadline),
            _ => None,
        }
    }

    /// Request a recompute `delay` after `now`, cancelling any pending one.
    /// Returns the new deadline.
    pub fn arm(&mut self, now: Instant) -> Instant {
        let deadline = now + self.delay;
        self.stats.armed += 1;
        if self.is_pending() {
            self.stats.coalesced += 1;
            trace!("recompute rescheduled");
        } else {
            trace!("recompute scheduled");
        }
        // Arming mid-run leaves the request pending after `finish`.
        self.state = SchedulerState::Pending { deadline };
        deadline
    }

    /// Drop the pending request, if any.
    pub fn cancel(&mut self) {
        if self.is_pending() {
            trace!("pending recompute cancelled");
            self.state = SchedulerState::Idle;
        }
    }

    /// If the pending deadline has passed, enter `Running` and return true.
    /// The caller must run the pass and then call [`Self::finish`].
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.state {
            SchedulerState::Pending { deadline } if now >= deadline => {
                self.state = SchedulerState::Running;
                self.stats.runs += 1;
                true
            }
            _ => false,
        }
    }

    /// Leave `Running`. A request armed during the pass stays pending.
    pub fn finish(&mut self) {
        if self.state == SchedulerState::Running {
            self.state = SchedulerState::Idle;
        }
    }

    /// Run `pass` exactly once if a request is due. Returns whether it ran.
    pub fn run_if_due<F: FnOnce()>(&mut self, now: Instant, pass: F) -> bool {
        if !self.poll(now) {
            return false;
        }
        pass();
        self.finish();
        true
    }
}

impl Default for RecomputeScheduler {
    fn default() -> Self {
        Self::new(Duration::from_millis(20))
    }
}
