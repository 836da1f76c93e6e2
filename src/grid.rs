//! Background molecule grid.
//!
//! An independent population of one molecule per spatial cell, sampled with
//! the same machinery as the particle molecules. The grid shares nothing with
//! the particle arrays; the (currently disabled) molecule-interaction stage
//! is the only consumer that would ever relate the two.

use crate::molecule::{Molecule, DEFAULT_MOLECULES};
use crate::sampler::MoleculeSampler;
use glam::Vec2;
use rand::Rng;

/// One molecule value per spatial grid cell.
///
/// The cell count is `floor(width) * floor(height) * molecules_per_cell`, so
/// fractional bounds round down to whole cells.
#[derive(Debug, Default)]
pub struct MoleculeGrid {
    cells: Vec<Molecule>,
}

impl MoleculeGrid {
    /// A grid sized for the given bounds, all cells set to
    /// [`Molecule::NONE`] until [`populate`](Self::populate) runs.
    pub fn new(bounds_size: Vec2, molecules_per_cell: u32) -> Self {
        let cell_count =
            bounds_size.x as usize * bounds_size.y as usize * molecules_per_cell as usize;
        Self {
            cells: vec![Molecule::NONE; cell_count],
        }
    }

    /// Fill every cell, cycling the default table or drawing fresh valid
    /// molecules when `randomize` is set.
    pub fn populate<R: Rng>(
        &mut self,
        randomize: bool,
        sampler: &mut MoleculeSampler,
        rng: &mut R,
    ) {
        for (i, cell) in self.cells.iter_mut().enumerate() {
            *cell = if randomize {
                sampler.sample_valid(rng)
            } else {
                DEFAULT_MOLECULES[i % DEFAULT_MOLECULES.len()]
            };
        }
        log::debug!("populated {} molecule grid cells", self.cells.len());
    }

    /// The cell array.
    pub fn cells(&self) -> &[Molecule] {
        &self.cells
    }

    /// Number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
