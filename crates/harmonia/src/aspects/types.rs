use serde::Serialize;

use crate::geometry::{calculate_strength, CIRCLE};
use crate::harmonics::{find_multiplier, prime_factors};

/// Qualitative precision of an aspect, graded by its depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PrecisionClass {
    None,
    Approximate,
    Confident,
    Deep,
    Accurate,
    Precise,
    Exact,
}

impl PrecisionClass {
    pub fn from_depth(depth: u32) -> Self {
        match depth {
            0 => PrecisionClass::None,
            1 => PrecisionClass::Approximate,
            2 => PrecisionClass::Confident,
            3..=5 => PrecisionClass::Deep,
            6..=12 => PrecisionClass::Accurate,
            13..=24 => PrecisionClass::Precise,
            _ => PrecisionClass::Exact,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PrecisionClass::None => "-",
            PrecisionClass::Approximate => "approximate",
            PrecisionClass::Confident => "confident",
            PrecisionClass::Deep => "deep",
            PrecisionClass::Accurate => "accurate",
            PrecisionClass::Precise => "deeply accurate",
            PrecisionClass::Exact => "exact",
        }
    }

    pub fn rating(self) -> &'static str {
        match self {
            PrecisionClass::None => "_",
            PrecisionClass::Approximate => "★",
            PrecisionClass::Confident => "★★",
            PrecisionClass::Deep => "★★★",
            PrecisionClass::Accurate => "★★★★",
            PrecisionClass::Precise => "★★★★★",
            PrecisionClass::Exact => "✰✰✰✰✰",
        }
    }
}

/// One harmonic relationship between two points.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Aspect {
    /// Harmonic at which the relation is detected.
    pub numeric: u32,
    /// Whole steps of `360 / numeric` spanned by the physical arc.
    pub multiplicity: u32,
    /// Distance from exact on the harmonic's circle, in degrees.
    pub clearance: f64,
    /// Percent; 100 is exact, negative once outside the orb.
    pub strength: f64,
    /// How many multiples of the harmonic the relation survives; 0 means no resonance.
    pub depth: u32,
}

impl Aspect {
    /// Aspect at harmonic `numeric` between two points `arc` degrees apart,
    /// whose gap on the harmonic's circle is `clearance`.
    pub fn new(numeric: u32, clearance: f64, arc: f64, orb: f64) -> Self {
        // float-to-int casts saturate: an exact hit (clearance 0) gets u32::MAX
        let depth = (orb / clearance).floor() as u32;
        Self {
            numeric,
            multiplicity: find_multiplier(numeric, arc),
            clearance,
            strength: calculate_strength(orb, clearance),
            depth,
        }
    }

    /// Whether the relation found at `numeric` still holds at `harmonic`:
    /// the harmonic must be a multiple of the numeric within the depth.
    pub fn has_resonance(&self, harmonic: u32) -> bool {
        self.depth > 0
            && self.numeric > 0
            && harmonic % self.numeric == 0
            && harmonic / self.numeric <= self.depth
    }

    pub fn precision(&self) -> PrecisionClass {
        PrecisionClass::from_depth(self.depth)
    }

    /// The exact arc this aspect approximates, `multiplicity * 360 / numeric`.
    pub fn exact_arc(&self) -> f64 {
        self.multiplicity as f64 * CIRCLE / self.numeric as f64
    }

    /// Prime factors of the numeric.
    pub fn multipliers(&self) -> Vec<u32> {
        prime_factors(self.numeric)
    }

    pub fn has_multiplier(&self, base: u32) -> bool {
        self.multipliers().contains(&base)
    }
}
