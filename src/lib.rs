//! # Protocell - molecule chemistry for a GPU particle simulation
//!
//! The CPU-side core of a 2D particle simulation whose physics runs in
//! external compute kernels: a packed molecule encoding with its
//! bonding-capacity rules, rejection samplers that only ever hand out valid
//! molecules, the particle population with its spawn layouts, a background
//! molecule grid, and the per-frame step driver that feeds the external
//! physics stage.
//!
//! ## Quick Start
//!
//! ```
//! use protocell::prelude::*;
//!
//! let config = SimulationConfig::default();
//! config.validate().unwrap();
//!
//! let mut particles = ParticlePopulation::with_capacity(config.max_particles);
//! particles.spawn(
//!     &SpawnConfig {
//!         grid_positions: true,
//!         patterned_velocities: true,
//!         seed: 42,
//!         ..Default::default()
//!     },
//!     config.bounds_size,
//! );
//!
//! // Each frame: hand the population to the external physics stage.
//! // driver.run_frame(&mut stage, &mut particles, &config, pointer, frame_time)?;
//! ```
//!
//! ## Core Concepts
//!
//! ### Molecules
//!
//! A [`Molecule`] packs seven element counters into 32 bits. Its
//! [`available_sites`](Molecule::available_sites) must stay non-negative;
//! [`repair`](Molecule::repair) forces an over-extended encoding back into a
//! valid state, and [`MoleculeSampler`] builds on that to draw random valid
//! molecules and to split a parent between two bonded particles.
//!
//! ### Populations
//!
//! [`ParticlePopulation`] owns the parallel attribute arrays (position,
//! velocity, kind, bond partner, molecule halves) the kernels operate on.
//! [`SpawnConfig`] selects between deterministic layouts for reproducible
//! collision scenarios and seeded random fills. [`MoleculeGrid`] is the
//! independent per-cell background population.
//!
//! ### Stepping
//!
//! [`StepDriver`] runs one frame against a [`ComputeStage`]: frame parameters
//! pushed once, then the fixed kernel sequence once per sub-step. The stage
//! itself (collision detection, overlap resolution, repulsion, integration)
//! is external and opaque.

pub mod config;
pub mod driver;
pub mod error;
pub mod grid;
pub mod molecule;
pub mod particle;
pub mod population;
pub mod sampler;

pub use bytemuck;
pub use config::{SimulationConfig, SpawnConfig};
pub use driver::{ComputeStage, FrameParams, PointerInput, StepDriver};
pub use error::ConfigError;
pub use glam::{Vec2, Vec3};
pub use grid::MoleculeGrid;
pub use molecule::{Molecule, DEFAULT_MOLECULES};
pub use particle::ParticleKind;
pub use population::ParticlePopulation;
pub use sampler::{MoleculeSampler, MAX_SAMPLE_ATTEMPTS};

/// Convenient re-exports for common usage.
///
/// # Usage
///
/// ```
/// use protocell::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::{SimulationConfig, SpawnConfig};
    pub use crate::driver::{ComputeStage, FrameParams, PointerInput, StepDriver};
    pub use crate::error::ConfigError;
    pub use crate::grid::MoleculeGrid;
    pub use crate::molecule::{Molecule, DEFAULT_MOLECULES};
    pub use crate::particle::ParticleKind;
    pub use crate::population::ParticlePopulation;
    pub use crate::sampler::MoleculeSampler;
    pub use crate::{Vec2, Vec3};
}
