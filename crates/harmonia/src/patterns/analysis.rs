use serde::Serialize;
use std::collections::BTreeMap;

use crate::patterns::pattern::Pattern;

/// Patterns of one chart subset, grouped by harmonic in ascending order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PatternAnalysis {
    by_harmonic: BTreeMap<u32, Vec<Pattern>>,
}

impl PatternAnalysis {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_pattern(&mut self, pattern: Pattern) {
        self.by_harmonic
            .entry(pattern.harmonic())
            .or_default()
            .push(pattern);
    }

    /// Patterns at `harmonic`, in the order they were added.
    pub fn patterns_for(&self, harmonic: u32) -> &[Pattern] {
        self.by_harmonic
            .get(&harmonic)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Harmonics that have at least one pattern, ascending.
    pub fn harmonics(&self) -> impl Iterator<Item = u32> + '_ {
        self.by_harmonic.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, &[Pattern])> {
        self.by_harmonic.iter().map(|(h, p)| (*h, p.as_slice()))
    }

    /// Mean of the patterns' average strengths at `harmonic`, 0 if there are none.
    pub fn average_strength_for(&self, harmonic: u32) -> f64 {
        let patterns = self.patterns_for(harmonic);
        if patterns.is_empty() {
            return 0.0;
        }
        patterns.iter().map(Pattern::average_strength).sum::<f64>() / patterns.len() as f64
    }

    /// Total number of points across the patterns at `harmonic`.
    pub fn points_count_for(&self, harmonic: u32) -> usize {
        self.patterns_for(harmonic).iter().map(Pattern::size).sum()
    }

    /// Number of harmonics with patterns.
    pub fn len(&self) -> usize {
        self.by_harmonic.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_harmonic.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::{Chart, Point};
    use crate::settings::ResonanceSettings;

    fn pattern(harmonic: u32, chart: &Chart) -> Pattern {
        let mut pattern = Pattern::new(harmonic, ResonanceSettings::default());
        for (i, point) in chart.points().iter().enumerate() {
            pattern.add_point(i, point.clone());
        }
        pattern
    }

    #[test]
    fn test_grouped_by_ascending_harmonic() {
        let chart = Chart::with_points("c", [Point::new("a", 0.0), Point::new("b", 1.0)]);
        let mut analysis = PatternAnalysis::new();
        analysis.add_pattern(pattern(7, &chart));
        analysis.add_pattern(pattern(2, &chart));
        analysis.add_pattern(pattern(7, &chart));
        assert_eq!(analysis.harmonics().collect::<Vec<_>>(), vec![2, 7]);
        assert_eq!(analysis.patterns_for(7).len(), 2);
        assert_eq!(analysis.points_count_for(7), 4);
        assert!(analysis.patterns_for(3).is_empty());
        assert_eq!(analysis.average_strength_for(3), 0.0);
        assert_eq!(analysis.len(), 2);
    }

    #[test]
    fn test_average_strength_for() {
        let chart = Chart::with_points("c", [Point::new("a", 0.0), Point::new("b", 3.0)]);
        let mut analysis = PatternAnalysis::new();
        analysis.add_pattern(pattern(1, &chart));
        // clearance 3 under a 12° orb
        assert!((analysis.average_strength_for(1) - 75.0).abs() < 1e-9);
    }
}
