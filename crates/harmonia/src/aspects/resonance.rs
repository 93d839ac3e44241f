use serde::Serialize;
use thiserror::Error;

use crate::aspects::types::Aspect;
use crate::chart::{ChartId, Point};
use crate::geometry::{arc, arc_for_harmonic};
use crate::harmonics::is_lowest_terms;
use crate::settings::ResonanceSettings;

/// Errors for resonance lookups.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResonanceError {
    #[error("point '{0}' does not resonate with itself")]
    SelfPairing(String),
    #[error("point '{name}' (chart #{chart}) is not in the matrix")]
    PointNotFound { name: String, chart: u64 },
}

/// Every aspect one pair of points sustains across harmonics `1..=edge`.
///
/// Only base aspects are stored: a harmonic already explained as a multiple
/// of a stored aspect (within that aspect's depth) adds nothing new.
#[derive(Debug, Clone, Serialize)]
pub struct ResonanceBatch {
    a: Point,
    b: Point,
    arc: f64,
    orb: f64,
    edge_harmonic: u32,
    aspects: Vec<Aspect>,
}

impl ResonanceBatch {
    pub fn new(a: &Point, b: &Point, settings: &ResonanceSettings) -> Result<Self, ResonanceError> {
        if a.is_same(b) {
            return Err(ResonanceError::SelfPairing(a.name().to_string()));
        }
        Ok(Self::between(a, b, settings))
    }

    /// Same as [`ResonanceBatch::new`] for callers that already know the points differ.
    pub(crate) fn between(a: &Point, b: &Point, settings: &ResonanceSettings) -> Self {
        let arc = arc(a.position(), b.position());
        let orb = settings.orb_for(a.of_same_chart(b));

        let mut aspects: Vec<Aspect> = Vec::new();
        for harmonic in 1..=settings.edge_harmonic {
            let clearance = arc_for_harmonic(a.position(), b.position(), harmonic);
            if clearance > orb || aspects.iter().any(|x| x.has_resonance(harmonic)) {
                continue;
            }
            let aspect = Aspect::new(harmonic, clearance, arc, orb);
            if is_lowest_terms(aspect.multiplicity, aspect.numeric) {
                aspects.push(aspect);
            }
        }

        Self {
            a: a.clone(),
            b: b.clone(),
            arc,
            orb,
            edge_harmonic: settings.edge_harmonic,
            aspects,
        }
    }

    pub fn first(&self) -> &Point {
        &self.a
    }

    pub fn second(&self) -> &Point {
        &self.b
    }

    /// Physical arc between the pair, in [0, 180].
    pub fn arc(&self) -> f64 {
        self.arc
    }

    /// Orb the pair was measured against.
    pub fn orb(&self) -> f64 {
        self.orb
    }

    /// Stored base aspects, ascending by harmonic.
    pub fn aspects(&self) -> &[Aspect] {
        &self.aspects
    }

    pub fn has_resonances(&self) -> bool {
        !self.aspects.is_empty()
    }

    /// Aspect of the pair at any harmonic, stored or not; depth 0 means no resonance.
    pub fn aspect_at(&self, harmonic: u32) -> Aspect {
        let clearance = arc_for_harmonic(self.a.position(), self.b.position(), harmonic);
        Aspect::new(harmonic, clearance, self.arc, self.orb)
    }

    /// Whether the pair is within orb exactly at this harmonic.
    pub fn has_exact_harmonic(&self, harmonic: u32) -> bool {
        harmonic > 0 && self.aspect_at(harmonic).depth >= 1
    }

    /// Whether any stored aspect carries over to this harmonic.
    pub fn has_harmonic_resonance(&self, harmonic: u32) -> bool {
        self.aspects.iter().any(|aspect| aspect.has_resonance(harmonic))
    }

    /// The other side of the pair, or `None` if `point` is in neither side.
    pub fn counterpart(&self, point: &Point) -> Option<&Point> {
        if self.a.is_same(point) {
            Some(&self.b)
        } else if self.b.is_same(point) {
            Some(&self.a)
        } else {
            None
        }
    }

    pub fn involves(&self, point: &Point) -> bool {
        self.a.is_same(point) || self.b.is_same(point)
    }

    pub fn charts(&self) -> [ChartId; 2] {
        [self.a.chart(), self.b.chart()]
    }

    /// Whether the pair joins two different charts.
    pub fn is_synastric(&self) -> bool {
        !self.a.of_same_chart(&self.b)
    }

    pub fn edge_harmonic(&self) -> u32 {
        self.edge_harmonic
    }
}
