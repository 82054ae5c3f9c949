pub mod geometry;
pub mod circle;
pub mod relation;
pub mod cache;
pub mod radical;
pub mod scheduler;
pub mod collab;
pub mod snapshot;
pub mod session;
pub mod config;
pub mod error;

pub use cache::{Chord, IntersectionCache};
pub use circle::{Circle, CircleIndex};
pub use config::{DisplayOptions, EngineConfig};
pub use error::{EngineError, Result};
pub use radical::{PairKey, RadicalLineRegistry};
pub use relation::{relate, PairRelation};
pub use scheduler::{RecomputeScheduler, SchedulerState};
pub use session::Session;
pub use snapshot::Snapshot;
