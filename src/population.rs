//! Particle population storage and spawn layout.
//!
//! [`ParticlePopulation`] owns the parallel per-particle attribute arrays
//! the physics stage works on: position, velocity, kind, bond partner, and
//! the two molecule split halves. Arrays are allocated once per run and
//! filled exactly once by [`spawn`](ParticlePopulation::spawn); after that
//! only positions and velocities are mutated, by the external stage.
//!
//! # Example
//!
//! ```
//! use protocell::{ParticlePopulation, SpawnConfig};
//! use glam::Vec2;
//!
//! let mut particles = ParticlePopulation::with_capacity(100);
//! let config = SpawnConfig {
//!     grid_positions: true,
//!     seed: 1,
//!     ..Default::default()
//! };
//! particles.spawn(&config, Vec2::new(16.0, 9.0));
//! assert_eq!(particles.capacity(), 100);
//! ```

use crate::config::SpawnConfig;
use crate::molecule::{Molecule, DEFAULT_MOLECULES};
use crate::particle::ParticleKind;
use crate::sampler::MoleculeSampler;
use glam::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Parallel attribute arrays for a fixed-capacity particle population.
///
/// Slot indices are stable for the lifetime of a run. The bond-partner array
/// uses `capacity` itself as the "unbonded" sentinel, so a value equal to
/// [`capacity`](Self::capacity) never indexes a particle.
#[derive(Debug, Default)]
pub struct ParticlePopulation {
    positions: Vec<Vec2>,
    velocities: Vec<Vec2>,
    kinds: Vec<u32>,
    bonds: Vec<u32>,
    molecule_a: Vec<Molecule>,
    molecule_b: Vec<Molecule>,
}

impl ParticlePopulation {
    /// An empty population; call [`allocate`](Self::allocate) before use.
    pub fn new() -> Self {
        Self::default()
    }

    /// A population with its arrays already allocated to `capacity`.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut population = Self::new();
        population.allocate(capacity);
        population
    }

    /// (Re)allocate every attribute array to `capacity`, dropping previous
    /// storage. Safe to call repeatedly for re-spawns; `capacity == 0`
    /// leaves the population empty.
    pub fn allocate(&mut self, capacity: usize) {
        self.positions = vec![Vec2::ZERO; capacity];
        self.velocities = vec![Vec2::ZERO; capacity];
        self.kinds = vec![0; capacity];
        self.bonds = vec![capacity as u32; capacity];
        self.molecule_a = vec![Molecule::NONE; capacity];
        self.molecule_b = vec![Molecule::NONE; capacity];
        log::debug!("allocated attribute arrays for {} particles", capacity);
    }

    /// Number of particle slots.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.positions.len()
    }

    /// The bond-partner value meaning "unbonded".
    #[inline]
    pub fn unbonded(&self) -> u32 {
        self.capacity() as u32
    }

    /// Fill every slot according to `config`, inside the origin-centered
    /// `bounds_size` rectangle.
    ///
    /// All randomness flows from a single RNG seeded with `config.seed`:
    /// equal seed and config give bit-identical arrays. Molecule-bearing
    /// kinds get a parent molecule (cycled from the default table, or freshly
    /// sampled when `randomize_molecules` is set) split into the two
    /// molecule halves; the halves sum field-wise back to the parent.
    pub fn spawn(&mut self, config: &SpawnConfig, bounds_size: Vec2) {
        let capacity = self.capacity();
        if capacity == 0 {
            return;
        }
        let mut rng = StdRng::seed_from_u64(config.seed);
        let mut sampler = MoleculeSampler::new();
        let layout = SpawnBox::new(capacity, config.spacing, config.vertical_offset);
        let half = bounds_size * 0.5;

        log::debug!("spawning {} particles", capacity);
        for i in 0..capacity {
            self.positions[i] = if config.grid_positions {
                layout.position(i)
            } else {
                Vec2::new(
                    rng.gen_range(-half.x..half.x),
                    rng.gen_range(-half.y..half.y),
                )
            };

            self.velocities[i] = if config.patterned_velocities {
                layout.patterned_velocity(i) * config.initial_velocity_range
            } else {
                Vec2::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0))
                    * config.initial_velocity_range
            };

            let kind = if !config.uniform_kinds.is_empty() {
                config.uniform_kinds[i % config.uniform_kinds.len()]
            } else if config.kinds_from_index {
                ParticleKind::from_index(i as u32 % ParticleKind::COUNT)
            } else {
                ParticleKind::from_index(rng.gen_range(0..ParticleKind::COUNT))
            };
            self.kinds[i] = kind.into();

            if kind.is_molecule_bearing() {
                let parent = if config.randomize_molecules {
                    sampler.sample_valid(&mut rng)
                } else {
                    DEFAULT_MOLECULES[i % DEFAULT_MOLECULES.len()]
                };
                let (child, remainder) = sampler.sample_child(parent, &mut rng);
                self.molecule_a[i] = child;
                self.molecule_b[i] = remainder;
            } else {
                self.molecule_a[i] = Molecule::NONE;
                self.molecule_b[i] = Molecule::NONE;
            }

            self.bonds[i] = capacity as u32;
        }

        if config.center_first_particle {
            self.positions[0] = Vec2::ZERO;
        }
        if sampler.exhausted_draws() > 0 {
            log::warn!(
                "{} molecule draws fell back to defaults during spawn",
                sampler.exhausted_draws()
            );
        }
    }

    pub fn positions(&self) -> &[Vec2] {
        &self.positions
    }

    /// Mutated in place by the external physics stage.
    pub fn positions_mut(&mut self) -> &mut [Vec2] {
        &mut self.positions
    }

    pub fn velocities(&self) -> &[Vec2] {
        &self.velocities
    }

    /// Mutated in place by the external physics stage.
    pub fn velocities_mut(&mut self) -> &mut [Vec2] {
        &mut self.velocities
    }

    /// Raw kind values as stored in the type buffer.
    pub fn kinds(&self) -> &[u32] {
        &self.kinds
    }

    /// The kind of one particle.
    pub fn kind(&self, index: usize) -> ParticleKind {
        ParticleKind::from_index(self.kinds[index])
    }

    /// Bond-partner indices; [`unbonded`](Self::unbonded) marks free slots.
    pub fn bonds(&self) -> &[u32] {
        &self.bonds
    }

    /// Mutated in place by the external physics stage.
    pub fn bonds_mut(&mut self) -> &mut [u32] {
        &mut self.bonds
    }

    /// First halves of the molecule split pairs.
    pub fn molecule_a(&self) -> &[Molecule] {
        &self.molecule_a
    }

    /// Second halves of the molecule split pairs.
    pub fn molecule_b(&self) -> &[Molecule] {
        &self.molecule_b
    }
}

/// Deterministic spawn-box layout.
///
/// Particles are arranged into `floor(sqrt(capacity))` rows; the row width is
/// the integer quotient, so non-rectangular capacities leave the last row
/// partially filled. The block is centered about the origin on the x axis.
#[derive(Debug, Clone, Copy)]
struct SpawnBox {
    width: usize,
    spacing: f32,
    vertical_offset: f32,
    down_left: Vec2,
    even_width: bool,
}

impl SpawnBox {
    fn new(capacity: usize, spacing: f32, vertical_offset: f32) -> Self {
        let height = (capacity as f32).sqrt() as usize;
        let width = capacity / height;
        let down_left = 0.5
            * Vec2::new(
                -((width - 1) as f32 * spacing),
                height as f32 * vertical_offset - (height - 1) as f32 * spacing,
            );
        Self {
            width,
            spacing,
            vertical_offset,
            down_left,
            even_width: width % 2 == 0,
        }
    }

    fn position(&self, index: usize) -> Vec2 {
        self.down_left
            + Vec2::new(
                (index % self.width) as f32 * self.spacing,
                (index / self.width) as f32 * self.spacing
                    - index as f32 * self.vertical_offset,
            )
    }

    /// Alternating-sign x velocity. Even row widths alternate +1/-1 by index
    /// parity; odd widths cycle +1/0/-1 so neighboring rows still collide.
    fn patterned_velocity(&self, index: usize) -> Vec2 {
        if self.even_width {
            Vec2::new(-(((index % 2) as f32) * 2.0 - 1.0), 0.0)
        } else {
            Vec2::new(-((index % 3) as f32 - 1.0), 0.0)
        }
    }
}
