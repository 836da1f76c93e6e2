//! Particle type enumeration and its display colors.
//!
//! Kinds are stored in the type buffer as raw `u32` values; this enum gives
//! them names and owns the color table the renderer samples from.

use glam::Vec3;

/// The sixteen particle kinds.
///
/// Three of them carry a split molecule pair instead of being plain typed
/// particles: [`Synthase`](ParticleKind::Synthase),
/// [`Channel`](ParticleKind::Channel) and
/// [`Lysosome`](ParticleKind::Lysosome).
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParticleKind {
    Neutral = 0,
    Synthase,
    Ribosome,
    Polymerase,
    Latch,
    Conductor,
    Extender,
    Wall,
    Chlorophyll,
    PositiveIon,
    Channel,
    Lysosome,
    NegativeIon,
    PositiveTerminal,
    NegativeTerminal,
    Dna,
}

impl ParticleKind {
    /// Number of particle kinds.
    pub const COUNT: u32 = 16;

    /// Kind for a raw type-buffer value. Out-of-range values map to
    /// [`Neutral`](ParticleKind::Neutral).
    pub fn from_index(index: u32) -> Self {
        match index {
            0 => ParticleKind::Neutral,
            1 => ParticleKind::Synthase,
            2 => ParticleKind::Ribosome,
            3 => ParticleKind::Polymerase,
            4 => ParticleKind::Latch,
            5 => ParticleKind::Conductor,
            6 => ParticleKind::Extender,
            7 => ParticleKind::Wall,
            8 => ParticleKind::Chlorophyll,
            9 => ParticleKind::PositiveIon,
            10 => ParticleKind::Channel,
            11 => ParticleKind::Lysosome,
            12 => ParticleKind::NegativeIon,
            13 => ParticleKind::PositiveTerminal,
            14 => ParticleKind::NegativeTerminal,
            15 => ParticleKind::Dna,
            _ => ParticleKind::Neutral,
        }
    }

    /// Whether particles of this kind own a molecule split pair.
    #[inline]
    pub fn is_molecule_bearing(self) -> bool {
        matches!(
            self,
            ParticleKind::Synthase | ParticleKind::Channel | ParticleKind::Lysosome
        )
    }

    /// Display color for this kind (RGB, 0-1, pre-dimmed).
    pub fn color(self) -> Vec3 {
        let base = match self {
            ParticleKind::Neutral => Vec3::new(0.500, 0.500, 0.500), // middle gray
            ParticleKind::Synthase => Vec3::new(0.784, 0.568, 0.105), // yellow
            ParticleKind::Ribosome => Vec3::new(0.086, 0.352, 0.345), // dark turquoise
            ParticleKind::Polymerase => Vec3::new(0.074, 0.682, 0.662), // turquoise
            ParticleKind::Latch => Vec3::new(0.411, 0.000, 0.411),   // purple
            ParticleKind::Conductor => Vec3::new(0.831, 0.784, 0.542), // beige
            ParticleKind::Extender => Vec3::new(0.490, 0.070, 0.039), // dark red
            ParticleKind::Wall => Vec3::new(0.788, 0.788, 0.788),    // light gray
            ParticleKind::Chlorophyll => Vec3::new(0.066, 0.564, 0.066), // green
            ParticleKind::PositiveIon => Vec3::new(1.000, 0.000, 0.000), // red
            ParticleKind::Channel => Vec3::new(0.858, 0.694, 0.360), // light yellow
            ParticleKind::Lysosome => Vec3::new(0.262, 0.188, 0.031), // dark yellow
            ParticleKind::NegativeIon => Vec3::new(0.000, 0.000, 1.000), // blue
            ParticleKind::PositiveTerminal => Vec3::new(0.667, 0.125, 0.125), // medium red
            ParticleKind::NegativeTerminal => Vec3::new(0.125, 0.125, 0.667), // medium blue
            ParticleKind::Dna => Vec3::new(0.431, 0.800, 0.792),     // light turquoise
        };
        base * 0.9
    }
}

impl From<ParticleKind> for u32 {
    fn from(kind: ParticleKind) -> u32 {
        kind as u32
    }
}

impl From<u32> for ParticleKind {
    fn from(index: u32) -> Self {
        ParticleKind::from_index(index)
    }
}
