//! Per-frame simulation stepping.
//!
//! [`StepDriver`] owns the frame loop contract with the external physics
//! stage: push the frame-global parameters exactly once, then run the fixed
//! kernel sequence once per sub-step. The stage itself is a black box behind
//! the [`ComputeStage`] trait; from here every kernel call is
//! dispatch-and-wait, whatever parallelism the stage hides internally.
//!
//! # Example
//!
//! ```
//! use protocell::{
//!     ComputeStage, ParticlePopulation, PointerInput, SimulationConfig, StepDriver,
//! };
//!
//! struct NullStage;
//! impl ComputeStage for NullStage {
//!     fn set_frame_params(&mut self, _: &protocell::FrameParams) {}
//!     fn check_collisions(&mut self, _: &mut ParticlePopulation) {}
//!     fn resolve_overlaps(&mut self, _: &mut ParticlePopulation) {}
//!     fn apply_repulsion(&mut self, _: &mut ParticlePopulation) {}
//!     fn integrate_positions(&mut self, _: &mut ParticlePopulation) {}
//! }
//!
//! let config = SimulationConfig::default();
//! let mut particles = ParticlePopulation::with_capacity(config.max_particles);
//! let mut driver = StepDriver::new();
//! driver
//!     .run_frame(
//!         &mut NullStage,
//!         &mut particles,
//!         &config,
//!         PointerInput::default(),
//!         1.0 / 60.0,
//!     )
//!     .unwrap();
//! ```

use crate::config::SimulationConfig;
use crate::error::ConfigError;
use crate::population::ParticlePopulation;
use glam::Vec2;

/// Frame-global parameters, handed to the physics stage once per frame.
///
/// Laid out for direct upload as a uniform block: `#[repr(C)]`, plain old
/// data, padded to a 16-byte multiple.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FrameParams {
    /// Number of live particle slots.
    pub particle_count: u32,
    /// Background molecule count per unit of bounds area.
    pub molecules_per_cell: u32,
    /// Simulated time per kernel invocation. The sub-step slice normally;
    /// the whole frame time when the host runs a fixed external time step.
    pub dt: f32,
    /// Particle diameter in world units.
    pub particle_diameter: f32,
    /// Collision energy retention in [0, 1].
    pub elasticity: f32,
    /// Hard cap on particle speed.
    pub max_speed: f32,
    /// World bounds rectangle, centered on the origin.
    pub bounds_size: Vec2,
    /// Cursor position in world space.
    pub pointer_position: Vec2,
    /// 1 while the pointer button is held, else 0.
    pub pointer_pressed: u32,
    pub _pad: u32,
}

/// Transient pointer state the host samples once per frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerInput {
    /// Cursor position in world space.
    pub position: Vec2,
    /// Whether the pointer button is held.
    pub pressed: bool,
}

/// The external physics stage.
///
/// Implementations receive the frame parameters once per frame, then the
/// four kernels in fixed order once per sub-step. Each kernel mutates the
/// population's position/velocity/bond arrays in place and returns only once
/// the work is complete. Determinism given identical inputs is the
/// implementation's contract to provide, not something the driver can
/// enforce.
pub trait ComputeStage {
    /// Receive the frame-global parameter block. Called once per frame,
    /// before any sub-step.
    fn set_frame_params(&mut self, params: &FrameParams);

    /// Detect particle pair collisions.
    fn check_collisions(&mut self, particles: &mut ParticlePopulation);

    /// Push overlapping particles apart, respecting bond links.
    fn resolve_overlaps(&mut self, particles: &mut ParticlePopulation);

    /// Accumulate repulsion forces into velocities.
    fn apply_repulsion(&mut self, particles: &mut ParticlePopulation);

    /// Advance positions by the current time slice.
    fn integrate_positions(&mut self, particles: &mut ParticlePopulation);
}

/// Orchestrates one simulation frame against a [`ComputeStage`].
///
/// Stateless apart from the running total-speed diagnostic.
#[derive(Debug, Default)]
pub struct StepDriver {
    last_total_speed: f32,
}

impl StepDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulated time per sub-step: the frame time divided into
    /// `iterations_per_frame` slices. Fails fast on a zero iteration count
    /// rather than producing an infinite slice.
    pub fn sub_step_duration(
        frame_time: f32,
        iterations_per_frame: u32,
    ) -> Result<f32, ConfigError> {
        if iterations_per_frame == 0 {
            return Err(ConfigError::ZeroIterations);
        }
        Ok(frame_time / iterations_per_frame as f32)
    }

    /// Run one frame: push [`FrameParams`] once, then the four-kernel
    /// sequence `iterations_per_frame` times.
    ///
    /// `config` is assumed to have passed
    /// [`validate`](SimulationConfig::validate) at setup; only the
    /// division-by-zero precondition is re-checked here.
    pub fn run_frame<S: ComputeStage>(
        &mut self,
        stage: &mut S,
        particles: &mut ParticlePopulation,
        config: &SimulationConfig,
        pointer: PointerInput,
        frame_time: f32,
    ) -> Result<(), ConfigError> {
        let sub_step = Self::sub_step_duration(frame_time, config.iterations_per_frame)?;
        let params = FrameParams {
            particle_count: particles.capacity() as u32,
            molecules_per_cell: config.molecules_per_cell,
            dt: if config.fixed_time_step {
                frame_time
            } else {
                sub_step
            },
            particle_diameter: config.scale,
            elasticity: config.elasticity,
            max_speed: config.max_speed,
            bounds_size: config.bounds_size,
            pointer_position: pointer.position,
            pointer_pressed: pointer.pressed as u32,
            _pad: 0,
        };
        stage.set_frame_params(&params);

        for _ in 0..config.iterations_per_frame {
            stage.check_collisions(particles);
            stage.resolve_overlaps(particles);
            stage.apply_repulsion(particles);
            stage.integrate_positions(particles);
            if config.log_total_speed {
                self.track_total_speed(particles);
            }
        }
        Ok(())
    }

    /// Sum of velocity magnitudes at the last logged diagnostic sub-step.
    #[inline]
    pub fn total_speed(&self) -> f32 {
        self.last_total_speed
    }

    // Energy-drift sanity check: log only when the total moved by more than
    // 0.001 per particle since the last logged value.
    fn track_total_speed(&mut self, particles: &ParticlePopulation) {
        let total: f32 = particles.velocities().iter().map(|v| v.length()).sum();
        let threshold = 0.001 * particles.capacity() as f32;
        if (total - self.last_total_speed).abs() > threshold {
            log::debug!(
                "total particle speed changed by {:.4}, now {:.4}",
                total - self.last_total_speed,
                total
            );
            self.last_total_speed = total;
        }
    }
}
