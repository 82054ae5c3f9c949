//! Engine configuration.
//!
//! All fields have defaults matching the behaviour of the interactive
//! workbench, so an empty JSON object is a valid configuration.

use crate::error::{EngineError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Visualization toggles forwarded to the front end with every snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayOptions {
    pub show_circles: bool,
    pub show_intersections: bool,
    pub show_radical_lines: bool,
    pub show_radical_intersections: bool,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            show_circles: true,
            show_intersections: false,
            show_radical_lines: true,
            show_radical_intersections: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Trailing delay between the last mutation and the recompute pass.
    /// Zero recomputes on the next tick.
    pub recompute_delay_ms: u64,
    /// Radius given to circles created without an explicit one.
    pub default_radius: f64,
    /// Lower bound applied when a radius is adjusted incrementally.
    pub min_radius: f64,
    pub display: DisplayOptions,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            recompute_delay_ms: 20,
            default_radius: 100.0,
            min_radius: 1.0,
            display: DisplayOptions::default(),
        }
    }
}

impl EngineConfig {
    /// Parse and validate a JSON configuration document.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: EngineConfig =
            serde_json::from_str(json).map_err(|e| EngineError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.min_radius.is_finite() || self.min_radius <= 0.0 {
            return Err(EngineError::Config(format!(
                "min_radius must be positive, got {}",
                self.min_radius
            )));
        }
        if !self.default_radius.is_finite() || self.default_radius < self.min_radius {
            return Err(EngineError::Config(format!(
                "default_radius must be at least min_radius ({}), got {}",
                self.min_radius, self.default_radius
            )));
        }
        Ok(())
    }

    pub fn recompute_delay(&self) -> Duration {
        Duration::from_millis(self.recompute_delay_ms)
    }
}
