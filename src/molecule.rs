//! Packed molecule encoding and bonding-capacity rules.
//!
//! A [`Molecule`] is a 32-bit value holding seven element counters in fixed
//! bit fields. All packing and unpacking lives here; the rest of the crate
//! works through the named accessors and never touches raw shifts.
//!
//! Field layout (LSB first):
//!
//! | bits    | element    | sites per atom |
//! |---------|------------|----------------|
//! | [0,4)   | chlorine   | -1             |
//! | [4,8)   | fluorine   | -1             |
//! | [8,12)  | sulfur     | 0              |
//! | [12,16) | phosphorus | +1             |
//! | [16,21) | nitrogen   | +1             |
//! | [21,26) | oxygen     | 0              |
//! | [26,32) | carbon     | +2             |
//!
//! A molecule is valid when its [available sites](Molecule::available_sites)
//! are non-negative; the raw value `0` doubles as the "no molecule" sentinel
//! ([`Molecule::NONE`]).
//!
//! # Example
//!
//! ```
//! use protocell::Molecule;
//!
//! // CO2: one carbon (+2 sites), two oxygen (neutral).
//! let mol = Molecule::from_counts(0, 0, 0, 0, 0, 2, 1);
//! assert_eq!(mol.available_sites(), 2);
//! assert!(mol.is_valid());
//! ```

use std::fmt;

const CHLORINE_SHIFT: u32 = 0;
const FLUORINE_SHIFT: u32 = 4;
const SULFUR_SHIFT: u32 = 8;
const PHOSPHORUS_SHIFT: u32 = 12;
const NITROGEN_SHIFT: u32 = 16;
const OXYGEN_SHIFT: u32 = 21;
const CARBON_SHIFT: u32 = 26;

const NIBBLE_MASK: u32 = 0xF;
const FIVE_BIT_MASK: u32 = 0x1F;
const SIX_BIT_MASK: u32 = 0x3F;

/// A small molecule, packed into 32 bits as per-element atom counts.
///
/// Counters are independent; arithmetic on molecules must never carry between
/// fields. The all-zero value is the "no molecule" sentinel and is considered
/// valid (zero atoms, zero sites).
#[repr(transparent)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Molecule(u32);

impl Molecule {
    /// The "no molecule" sentinel. Also returned by [`repair`](Self::repair)
    /// for unrepairable encodings.
    pub const NONE: Molecule = Molecule(0);

    /// Wrap a raw 32-bit encoding without any validity check.
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Molecule(raw)
    }

    /// The raw 32-bit encoding.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Pack per-element atom counts into a molecule.
    ///
    /// Panics if a count exceeds its field width (4 bits for chlorine,
    /// fluorine, sulfur and phosphorus; 5 bits for nitrogen and oxygen;
    /// 6 bits for carbon).
    pub const fn from_counts(
        chlorine: u32,
        fluorine: u32,
        sulfur: u32,
        phosphorus: u32,
        nitrogen: u32,
        oxygen: u32,
        carbon: u32,
    ) -> Self {
        assert!(chlorine <= NIBBLE_MASK, "chlorine count exceeds 4 bits");
        assert!(fluorine <= NIBBLE_MASK, "fluorine count exceeds 4 bits");
        assert!(sulfur <= NIBBLE_MASK, "sulfur count exceeds 4 bits");
        assert!(phosphorus <= NIBBLE_MASK, "phosphorus count exceeds 4 bits");
        assert!(nitrogen <= FIVE_BIT_MASK, "nitrogen count exceeds 5 bits");
        assert!(oxygen <= FIVE_BIT_MASK, "oxygen count exceeds 5 bits");
        assert!(carbon <= SIX_BIT_MASK, "carbon count exceeds 6 bits");
        Molecule(
            chlorine
                | fluorine << FLUORINE_SHIFT
                | sulfur << SULFUR_SHIFT
                | phosphorus << PHOSPHORUS_SHIFT
                | nitrogen << NITROGEN_SHIFT
                | oxygen << OXYGEN_SHIFT
                | carbon << CARBON_SHIFT,
        )
    }

    /// Number of chlorine atoms.
    #[inline]
    pub const fn chlorine(self) -> u32 {
        self.0 >> CHLORINE_SHIFT & NIBBLE_MASK
    }

    /// Number of fluorine atoms.
    #[inline]
    pub const fn fluorine(self) -> u32 {
        self.0 >> FLUORINE_SHIFT & NIBBLE_MASK
    }

    /// Number of sulfur atoms.
    #[inline]
    pub const fn sulfur(self) -> u32 {
        self.0 >> SULFUR_SHIFT & NIBBLE_MASK
    }

    /// Number of phosphorus atoms.
    #[inline]
    pub const fn phosphorus(self) -> u32 {
        self.0 >> PHOSPHORUS_SHIFT & NIBBLE_MASK
    }

    /// Number of nitrogen atoms.
    #[inline]
    pub const fn nitrogen(self) -> u32 {
        self.0 >> NITROGEN_SHIFT & FIVE_BIT_MASK
    }

    /// Number of oxygen atoms.
    #[inline]
    pub const fn oxygen(self) -> u32 {
        self.0 >> OXYGEN_SHIFT & FIVE_BIT_MASK
    }

    /// Number of carbon atoms.
    #[inline]
    pub const fn carbon(self) -> u32 {
        self.0 >> CARBON_SHIFT
    }

    /// Open bonding sites: halogens consume one site each, phosphorus and
    /// nitrogen provide one, carbon provides two.
    ///
    /// Oxygen and sulfur are counted as composition but contribute nothing
    /// here. That is intentional carried-over behavior, kept under review
    /// rather than silently changed.
    pub const fn available_sites(self) -> i32 {
        -(self.chlorine() as i32) - self.fluorine() as i32
            + self.phosphorus() as i32
            + self.nitrogen() as i32
            + 2 * self.carbon() as i32
    }

    /// Whether this molecule satisfies the capacity invariant.
    #[inline]
    pub const fn is_valid(self) -> bool {
        self.available_sites() >= 0
    }

    /// Force an over-extended molecule back into a valid state by shedding
    /// halogens: fluorine first (up to half the deficit), then chlorine for
    /// the rest. Counters never go below zero and never increase.
    ///
    /// This is a best-effort heuristic, not a minimal repair. Returns
    /// [`Molecule::NONE`] when shedding halogens cannot close the deficit.
    /// Valid molecules are returned unchanged, which also makes the repair
    /// idempotent.
    pub fn repair(self) -> Molecule {
        let sites = self.available_sites();
        if sites >= 0 {
            return self;
        }
        let deficit = (-sites) as u32;
        let less_fluorine = (deficit / 2).min(self.fluorine());
        let less_chlorine = (deficit - less_fluorine).min(self.chlorine());
        let repaired =
            Molecule(self.0 - (less_fluorine << FLUORINE_SHIFT) - less_chlorine);
        if repaired.is_valid() {
            repaired
        } else {
            Molecule::NONE
        }
    }

    /// Number of set bits in the encoding, used as a cheap complexity proxy:
    /// anything at or below two bits is treated as atomic and never split.
    #[inline]
    pub const fn bit_count(self) -> u32 {
        self.0.count_ones()
    }

    /// Whether this molecule is too simple to split into child and remainder.
    #[inline]
    pub const fn is_atomic(self) -> bool {
        self.bit_count() <= 2
    }
}

impl fmt::Display for Molecule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == Molecule::NONE {
            return write!(f, "(none)");
        }
        let counts = [
            ("C", self.carbon()),
            ("N", self.nitrogen()),
            ("O", self.oxygen()),
            ("P", self.phosphorus()),
            ("S", self.sulfur()),
            ("F", self.fluorine()),
            ("Cl", self.chlorine()),
        ];
        let mut first = true;
        for (symbol, count) in counts {
            if count == 0 {
                continue;
            }
            if !first {
                write!(f, " ")?;
            }
            write!(f, "{}{}", symbol, count)?;
            first = false;
        }
        Ok(())
    }
}

/// Pre-validated fallback molecules, cycled whenever randomization is off or
/// sampling gives up. Every entry satisfies [`Molecule::is_valid`]; the
/// halogens appear as carbonyl halides so their entries balance out.
pub const DEFAULT_MOLECULES: [Molecule; 9] = [
    Molecule::from_counts(0, 0, 0, 0, 2, 0, 0), // nitrogen
    Molecule::from_counts(0, 0, 0, 0, 0, 2, 0), // oxygen
    Molecule::from_counts(0, 0, 0, 0, 0, 1, 0), // water
    Molecule::from_counts(0, 0, 0, 0, 1, 0, 0), // ammonia
    Molecule::from_counts(0, 0, 0, 1, 0, 4, 0), // phosphate
    Molecule::from_counts(0, 0, 1, 0, 0, 0, 0), // hydrogen sulfide
    Molecule::from_counts(0, 0, 0, 0, 0, 2, 1), // carbon dioxide
    Molecule::from_counts(0, 2, 0, 0, 0, 1, 1), // carbonyl fluoride
    Molecule::from_counts(2, 0, 0, 0, 0, 1, 1), // phosgene
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_counts() {
        let mol = Molecule::from_counts(3, 1, 2, 4, 17, 9, 33);
        assert_eq!(mol.chlorine(), 3);
        assert_eq!(mol.fluorine(), 1);
        assert_eq!(mol.sulfur(), 2);
        assert_eq!(mol.phosphorus(), 4);
        assert_eq!(mol.nitrogen(), 17);
        assert_eq!(mol.oxygen(), 9);
        assert_eq!(mol.carbon(), 33);
    }

    #[test]
    fn test_available_sites_formula() {
        let mol = Molecule::from_counts(1, 2, 5, 3, 4, 7, 2);
        // -1 - 2 + 3 + 4 + 2*2
        assert_eq!(mol.available_sites(), 8);
    }

    #[test]
    fn test_zero_composition_has_zero_sites() {
        assert_eq!(Molecule::NONE.available_sites(), 0);
        assert!(Molecule::NONE.is_valid());
    }

    #[test]
    fn test_sulfur_and_oxygen_do_not_affect_sites() {
        let bare = Molecule::from_counts(0, 0, 0, 1, 0, 0, 0);
        let loaded = Molecule::from_counts(0, 0, 9, 1, 0, 15, 0);
        assert_eq!(bare.available_sites(), loaded.available_sites());
    }

    #[test]
    fn test_repair_keeps_valid_molecules() {
        for mol in DEFAULT_MOLECULES {
            assert_eq!(mol.repair(), mol);
        }
    }

    #[test]
    fn test_repair_sheds_fluorine_then_chlorine() {
        // One carbon (+2) against three fluorine and three chlorine (-6):
        // deficit 4, so two fluorine go first, then two chlorine.
        let mol = Molecule::from_counts(3, 3, 0, 0, 0, 0, 1);
        let repaired = mol.repair();
        assert_eq!(repaired.fluorine(), 1);
        assert_eq!(repaired.chlorine(), 1);
        assert_eq!(repaired.carbon(), 1);
        assert_eq!(repaired.available_sites(), 0);
    }

    #[test]
    fn test_repair_unrepairable_returns_none() {
        // 15 fluorine, nothing else: deficit 15 only lets 7 fluorine go
        // (half the deficit) and there is no chlorine, so 8 remain at -8.
        let mol = Molecule::from_counts(0, 15, 0, 0, 0, 0, 0);
        assert_eq!(mol.repair(), Molecule::NONE);
    }

    #[test]
    fn test_repair_is_idempotent() {
        let samples = [
            Molecule::from_counts(3, 3, 0, 0, 0, 0, 1),
            Molecule::from_counts(0, 15, 0, 0, 0, 0, 0),
            Molecule::from_counts(4, 4, 2, 1, 1, 1, 0),
            Molecule::from_raw(0xDEAD_BEEF),
            Molecule::from_raw(u32::MAX),
            Molecule::NONE,
        ];
        for mol in samples {
            assert_eq!(mol.repair().repair(), mol.repair());
        }
    }

    #[test]
    fn test_default_molecules_are_valid() {
        for mol in DEFAULT_MOLECULES {
            assert!(mol.is_valid(), "{} has {} sites", mol, mol.available_sites());
        }
    }

    #[test]
    fn test_atomic_threshold() {
        assert!(Molecule::from_counts(0, 0, 0, 0, 2, 0, 0).is_atomic()); // one set bit
        assert!(Molecule::from_counts(0, 0, 0, 0, 3, 0, 0).is_atomic()); // two set bits
        assert!(!Molecule::from_counts(0, 0, 0, 1, 0, 4, 0).is_atomic()); // phosphate
    }

    #[test]
    fn test_display() {
        let co2 = Molecule::from_counts(0, 0, 0, 0, 0, 2, 1);
        assert_eq!(co2.to_string(), "C1 O2");
        assert_eq!(Molecule::NONE.to_string(), "(none)");
    }
}
