use log::{debug, warn};
use std::collections::HashMap;

use crate::aspects::AspectTable;
use crate::chart::{Chart, ChartId, ChartObject};
use crate::matrix::ResonanceMatrix;
use crate::patterns::PatternTable;
use crate::settings::ResonanceSettings;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct MatrixKey {
    charts: Vec<(ChartId, u64)>,
    settings: ResonanceSettings,
}

impl MatrixKey {
    fn new(charts: &[Chart], settings: &ResonanceSettings) -> Self {
        Self {
            charts: charts.iter().map(|c| (c.id(), c.revision())).collect(),
            settings: *settings,
        }
    }

    fn is_outdated_by(&self, chart: &Chart) -> bool {
        self.charts
            .iter()
            .any(|(id, revision)| *id == chart.id() && *revision != chart.revision())
    }
}

/// Builds matrices and reports, keeping each matrix for as long as its
/// charts stay at the same revision.
#[derive(Debug, Default)]
pub struct HarmonicService {
    settings: ResonanceSettings,
    matrices: HashMap<MatrixKey, ResonanceMatrix>,
}

impl HarmonicService {
    pub fn new(settings: ResonanceSettings) -> Self {
        Self {
            settings,
            matrices: HashMap::new(),
        }
    }

    pub fn settings(&self) -> &ResonanceSettings {
        &self.settings
    }

    /// Change the settings, dropping matrices built with any other settings.
    pub fn set_settings(&mut self, settings: ResonanceSettings) {
        let before = self.matrices.len();
        self.matrices.retain(|key, _| key.settings == settings);
        if self.matrices.len() < before {
            debug!("dropped {} matrices built with previous settings", before - self.matrices.len());
        }
        self.settings = settings;
    }

    /// Matrix for this tuple of charts, built on first request.
    pub fn matrix_for(&mut self, charts: &[Chart]) -> &ResonanceMatrix {
        let before = self.matrices.len();
        self.matrices
            .retain(|key, _| !charts.iter().any(|chart| key.is_outdated_by(chart)));
        if self.matrices.len() < before {
            warn!("dropped {} matrices built from older chart revisions", before - self.matrices.len());
        }

        let key = MatrixKey::new(charts, &self.settings);
        let settings = self.settings;
        self.matrices.entry(key).or_insert_with(|| {
            debug!("no cached matrix for {} charts, building", charts.len());
            ResonanceMatrix::new(charts, &settings)
        })
    }

    pub fn pattern_table(&mut self, object: &ChartObject) -> PatternTable {
        self.matrix_for(object.charts()).build_pattern_table()
    }

    pub fn aspect_table(&mut self, object: &ChartObject) -> AspectTable {
        self.matrix_for(object.charts()).build_aspect_table()
    }

    /// Forget every matrix that includes `chart`.
    pub fn invalidate(&mut self, chart: ChartId) {
        self.matrices
            .retain(|key, _| !key.charts.iter().any(|(id, _)| *id == chart));
    }

    pub fn clear(&mut self) {
        self.matrices.clear();
    }

    /// Number of cached matrices.
    pub fn cached(&self) -> usize {
        self.matrices.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::Point;

    fn chart(name: &str) -> Chart {
        Chart::with_points(name, [Point::new("sun", 0.0), Point::new("moon", 120.0)])
    }

    #[test]
    fn test_matrix_is_reused() {
        let mut service = HarmonicService::new(ResonanceSettings::default());
        let natal = chart("natal");
        service.matrix_for(std::slice::from_ref(&natal));
        service.matrix_for(std::slice::from_ref(&natal));
        assert_eq!(service.cached(), 1);
    }

    #[test]
    fn test_mutation_replaces_matrix() {
        let mut service = HarmonicService::new(ResonanceSettings::default());
        let mut natal = chart("natal");
        service.matrix_for(std::slice::from_ref(&natal));
        natal.set_position("moon", 90.0);
        let matrix = service.matrix_for(std::slice::from_ref(&natal));
        assert_eq!(matrix.points()[1].position(), 90.0);
        assert_eq!(service.cached(), 1);
    }

    #[test]
    fn test_new_settings_evict_matrices() {
        let mut service = HarmonicService::new(ResonanceSettings::default());
        let natal = chart("natal");
        service.matrix_for(std::slice::from_ref(&natal));
        service.set_settings(ResonanceSettings::default());
        assert_eq!(service.cached(), 1);

        service.set_settings(ResonanceSettings::new(12, 30, true));
        assert_eq!(service.cached(), 0);
        let matrix = service.matrix_for(std::slice::from_ref(&natal));
        assert_eq!(matrix.settings().edge_harmonic, 12);
        assert_eq!(service.cached(), 1);
    }

    #[test]
    fn test_invalidate() {
        let mut service = HarmonicService::new(ResonanceSettings::default());
        let a = chart("a");
        let b = chart("b");
        service.matrix_for(std::slice::from_ref(&a));
        service.matrix_for(&[a.clone(), b.clone()]);
        service.matrix_for(std::slice::from_ref(&b));
        service.invalidate(a.id());
        assert_eq!(service.cached(), 1);
        service.clear();
        assert_eq!(service.cached(), 0);
    }
}
