use crate::circle::CircleIndex;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("Invalid radius: {0} (must be finite and at least the minimum radius)")]
    InvalidRadius(f64),
    #[error("Invalid center: ({0}, {1}) (coordinates must be finite)")]
    InvalidCenter(f64, f64),
    #[error("Unknown circle: {0}")]
    UnknownCircle(CircleIndex),
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;
