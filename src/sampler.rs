//! Rejection sampling of valid molecules.
//!
//! Two generators built on the [`Molecule`](crate::Molecule) codec: a
//! uniformly random valid molecule, and a random valid child of a given
//! parent (with the field-wise remainder going to the bond partner).
//!
//! Both are bounded retry loops with a deterministic fallback, so a
//! pathological RNG can slow sampling down but never hang it. Fallbacks are
//! counted and logged because frequent exhaustion signals something is wrong
//! upstream.

use crate::molecule::{Molecule, DEFAULT_MOLECULES};
use rand::Rng;

/// Draw budget for one sampling call before falling back.
///
/// The field layout makes most raw draws repairable, so in practice the loop
/// exits within a handful of attempts.
pub const MAX_SAMPLE_ATTEMPTS: u32 = 64;

/// Bounded rejection sampler over the molecule encoding.
///
/// All randomness comes from the caller-supplied RNG, so seeding that RNG is
/// enough to make every draw reproducible. The sampler itself only tracks
/// its fallback cursor and an exhaustion counter.
#[derive(Debug, Default)]
pub struct MoleculeSampler {
    fallback_cursor: usize,
    exhausted_draws: u64,
}

impl MoleculeSampler {
    pub fn new() -> Self {
        Self::default()
    }

    /// A uniformly random valid molecule.
    ///
    /// Draws a raw 32-bit value and runs it through
    /// [`repair`](Molecule::repair), retrying while the repair gives up.
    /// After [`MAX_SAMPLE_ATTEMPTS`] failed draws the next entry of
    /// [`DEFAULT_MOLECULES`] is returned instead.
    pub fn sample_valid<R: Rng>(&mut self, rng: &mut R) -> Molecule {
        for _ in 0..MAX_SAMPLE_ATTEMPTS {
            let mol = Molecule::from_raw(rng.gen::<u32>()).repair();
            if mol != Molecule::NONE {
                return mol;
            }
        }
        let fallback = self.next_fallback();
        log::warn!(
            "molecule sampling exhausted after {} draws, using fallback {}",
            MAX_SAMPLE_ATTEMPTS,
            fallback
        );
        fallback
    }

    /// Split `parent` into a random valid child and its remainder.
    ///
    /// The child keeps each set bit of the parent with probability one half.
    /// A candidate is accepted only when it is non-empty, valid as drawn, and
    /// leaves a valid remainder; repair is a filter here, not a transformer,
    /// because a repaired child would no longer be a bit-subset of its
    /// parent. Accepted children are exact subsets, so the remainder is the
    /// bit complement within the parent and the two halves sum field-wise
    /// back to the parent with no cross-field borrow.
    ///
    /// Atomic parents ([`Molecule::is_atomic`]) are not split: the result is
    /// `(NONE, parent)`, and callers assign the whole value to one side.
    /// The same shape is returned if the draw budget runs out.
    pub fn sample_child<R: Rng>(&mut self, parent: Molecule, rng: &mut R) -> (Molecule, Molecule) {
        if parent.is_atomic() {
            return (Molecule::NONE, parent);
        }
        for _ in 0..MAX_SAMPLE_ATTEMPTS {
            let child = Molecule::from_raw(parent.raw() & rng.gen::<u32>());
            if child == Molecule::NONE || !child.is_valid() {
                continue;
            }
            let remainder = Molecule::from_raw(parent.raw() ^ child.raw());
            if remainder.is_valid() {
                return (child, remainder);
            }
        }
        self.exhausted_draws += 1;
        log::warn!(
            "no valid split of {} found in {} draws, keeping it whole",
            parent,
            MAX_SAMPLE_ATTEMPTS
        );
        (Molecule::NONE, parent)
    }

    /// How many sampling calls have fallen back to a deterministic default.
    #[inline]
    pub fn exhausted_draws(&self) -> u64 {
        self.exhausted_draws
    }

    fn next_fallback(&mut self) -> Molecule {
        self.exhausted_draws += 1;
        let mol = DEFAULT_MOLECULES[self.fallback_cursor % DEFAULT_MOLECULES.len()];
        self.fallback_cursor += 1;
        mol
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_sample_valid_is_always_valid() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut sampler = MoleculeSampler::new();
        for _ in 0..1000 {
            let mol = sampler.sample_valid(&mut rng);
            assert!(mol.is_valid());
            assert_ne!(mol, Molecule::NONE);
        }
        assert_eq!(sampler.exhausted_draws(), 0);
    }

    #[test]
    fn test_sample_child_partitions_parent() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut sampler = MoleculeSampler::new();
        for _ in 0..200 {
            let parent = sampler.sample_valid(&mut rng);
            if parent.is_atomic() {
                continue;
            }
            let (child, remainder) = sampler.sample_child(parent, &mut rng);
            if child == Molecule::NONE {
                // Draw budget ran out; the parent must survive whole.
                assert_eq!(remainder, parent);
                continue;
            }
            assert_eq!(child.raw() | remainder.raw(), parent.raw());
            assert_eq!(child.raw() & remainder.raw(), 0);
            assert!(child.is_valid());
            assert!(remainder.is_valid());
            // Bit-disjoint fields add without carry.
            assert_eq!(child.chlorine() + remainder.chlorine(), parent.chlorine());
            assert_eq!(child.carbon() + remainder.carbon(), parent.carbon());
            assert_eq!(child.oxygen() + remainder.oxygen(), parent.oxygen());
        }
    }

    #[test]
    fn test_sample_child_of_atomic_parent() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut sampler = MoleculeSampler::new();
        let nitrogen = Molecule::from_counts(0, 0, 0, 0, 2, 0, 0);
        assert!(nitrogen.is_atomic());
        let (child, remainder) = sampler.sample_child(nitrogen, &mut rng);
        assert_eq!(child, Molecule::NONE);
        assert_eq!(remainder, nitrogen);
    }

    #[test]
    fn test_sample_child_of_default_molecules() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut sampler = MoleculeSampler::new();
        for parent in DEFAULT_MOLECULES {
            let (child, remainder) = sampler.sample_child(parent, &mut rng);
            if child == Molecule::NONE {
                assert_eq!(remainder, parent);
            } else {
                assert!(child.is_valid());
                assert!(remainder.is_valid());
                assert_eq!(child.raw() | remainder.raw(), parent.raw());
            }
        }
    }

    #[test]
    fn test_fallback_cycles_default_table() {
        let mut sampler = MoleculeSampler::new();
        let first = sampler.next_fallback();
        let second = sampler.next_fallback();
        assert_eq!(first, DEFAULT_MOLECULES[0]);
        assert_eq!(second, DEFAULT_MOLECULES[1]);
        assert_eq!(sampler.exhausted_draws(), 2);
    }
}
