//! Simulation and spawn configuration.
//!
//! [`SimulationConfig`] is the per-run parameter set the host hands to the
//! step driver every frame; [`SpawnConfig`] controls the one-time population
//! fill. Both validate up front so bad wiring fails at setup instead of
//! producing a silently broken run.

use crate::error::ConfigError;
use crate::particle::ParticleKind;
use glam::Vec2;

/// Global simulation parameters.
///
/// Validated once at setup via [`validate`](SimulationConfig::validate);
/// the step driver assumes a validated config.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    /// World bounds rectangle, centered on the origin.
    pub bounds_size: Vec2,
    /// Fixed particle capacity for the whole run.
    pub max_particles: usize,
    /// Background molecule count per unit of bounds area.
    pub molecules_per_cell: u32,
    /// Particle diameter in world units.
    pub scale: f32,
    /// Hard cap on particle speed, enforced by the physics stage.
    pub max_speed: f32,
    /// Collision energy retention, 0 (inelastic) to 1 (elastic).
    pub elasticity: f32,
    /// Sub-steps per displayed frame.
    pub iterations_per_frame: u32,
    /// When set, the host drives frames at a fixed time step and the frame
    /// time is forwarded to the physics stage as-is instead of being divided
    /// into sub-step slices.
    pub fixed_time_step: bool,
    /// Enable the per-sub-step total-speed drift diagnostic.
    pub log_total_speed: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            bounds_size: Vec2::new(16.0, 9.0),
            max_particles: 1000,
            molecules_per_cell: 10,
            scale: 1.0,
            max_speed: 10.0,
            elasticity: 1.0,
            iterations_per_frame: 4,
            fixed_time_step: false,
            log_total_speed: false,
        }
    }
}

impl SimulationConfig {
    /// Check every setup precondition, returning the first violation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.iterations_per_frame == 0 {
            return Err(ConfigError::ZeroIterations);
        }
        if self.max_particles == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if self.bounds_size.x <= 0.0 || self.bounds_size.y <= 0.0 {
            return Err(ConfigError::InvalidBounds(self.bounds_size));
        }
        if !(0.0..=1.0).contains(&self.elasticity) {
            return Err(ConfigError::ElasticityOutOfRange(self.elasticity));
        }
        if self.scale <= 0.0 {
            return Err(ConfigError::NonPositiveScale(self.scale));
        }
        Ok(())
    }
}

/// Controls for the one-time population fill.
///
/// Every randomized path draws from a single RNG seeded with `seed`, so two
/// spawns with equal seed and config produce bit-identical attribute arrays.
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnConfig {
    /// Lay particles out on a centered grid instead of uniformly at random.
    pub grid_positions: bool,
    /// Use the alternating-sign velocity pattern instead of random
    /// directions. Exists to set up reproducible collision scenarios.
    pub patterned_velocities: bool,
    /// When non-empty, kinds cycle through this sequence by particle index.
    pub uniform_kinds: Vec<ParticleKind>,
    /// When `uniform_kinds` is empty: kind = index mod kind count instead of
    /// uniform random.
    pub kinds_from_index: bool,
    /// Sample fresh valid parent molecules instead of cycling the default
    /// table.
    pub randomize_molecules: bool,
    /// Grid layout spacing along both axes.
    pub spacing: f32,
    /// Per-row vertical skew applied to the grid layout.
    pub vertical_offset: f32,
    /// Scale applied to initial velocities, patterned or random.
    pub initial_velocity_range: f32,
    /// Force particle 0 to the origin after layout, for reproducible
    /// debugging.
    pub center_first_particle: bool,
    /// Seed for the spawn RNG.
    pub seed: u64,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            grid_positions: false,
            patterned_velocities: false,
            uniform_kinds: Vec::new(),
            kinds_from_index: false,
            randomize_molecules: false,
            spacing: 1.1,
            vertical_offset: 0.0,
            initial_velocity_range: 1.0,
            center_first_particle: false,
            seed: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(SimulationConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_iterations_rejected() {
        let config = SimulationConfig {
            iterations_per_frame: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroIterations));
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let config = SimulationConfig {
            max_particles: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroCapacity));
    }

    #[test]
    fn test_bad_bounds_rejected() {
        let config = SimulationConfig {
            bounds_size: Vec2::new(16.0, 0.0),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidBounds(_))
        ));
    }

    #[test]
    fn test_elasticity_range_rejected() {
        let config = SimulationConfig {
            elasticity: 1.5,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ElasticityOutOfRange(_))
        ));
    }

    #[test]
    fn test_error_messages_are_descriptive() {
        let err = ConfigError::ZeroIterations.to_string();
        assert!(err.contains("iterations"));
    }
}
