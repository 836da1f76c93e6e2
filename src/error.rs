//! Error types for simulation setup.

use glam::Vec2;
use std::fmt;

/// Configuration errors surfaced at setup.
///
/// These abort startup with a diagnostic; nothing here is recoverable at
/// runtime because every variant means the host wired the simulation wrong.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// The frame loop would divide by zero sub-steps.
    ZeroIterations,
    /// A particle population was requested with no capacity.
    ZeroCapacity,
    /// Bounds rectangle with a non-positive dimension.
    InvalidBounds(Vec2),
    /// Elasticity outside the [0, 1] range.
    ElasticityOutOfRange(f32),
    /// Non-positive particle diameter.
    NonPositiveScale(f32),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ZeroIterations => {
                write!(f, "iterations per frame must be at least 1")
            }
            ConfigError::ZeroCapacity => {
                write!(f, "particle capacity must be at least 1")
            }
            ConfigError::InvalidBounds(size) => {
                write!(
                    f,
                    "bounds dimensions must be positive, got {}x{}",
                    size.x, size.y
                )
            }
            ConfigError::ElasticityOutOfRange(e) => {
                write!(f, "elasticity must be within [0, 1], got {}", e)
            }
            ConfigError::NonPositiveScale(s) => {
                write!(f, "particle scale must be positive, got {}", s)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
