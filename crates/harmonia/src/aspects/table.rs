use log::debug;
use serde::Serialize;

use crate::aspects::resonance::ResonanceBatch;
use crate::chart::ChartId;
use crate::matrix::{ResonanceMatrix, SubsetMode};

/// Resonating pairs for one chart, or between two charts.
#[derive(Debug, Clone, Serialize)]
pub struct AspectTableEntry {
    pub charts: Vec<ChartId>,
    pub batches: Vec<ResonanceBatch>,
}

/// Aspect listing over single charts and chart pairs of a matrix.
///
/// A single-chart entry holds the pairs inside that chart; a two-chart
/// entry holds only pairs joining the two. Pairs without resonances are
/// left out.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AspectTable {
    entries: Vec<AspectTableEntry>,
}

impl AspectTable {
    pub fn build(matrix: &ResonanceMatrix) -> Self {
        let mut entries = Vec::new();
        for charts in matrix.chart_combinations(SubsetMode::Aspects) {
            let candidates = match charts.as_slice() {
                [single] => matrix.resonances_within(*single),
                [a, b] => matrix.resonances_between(*a, *b),
                _ => continue,
            };
            let batches: Vec<ResonanceBatch> = candidates
                .into_iter()
                .filter(|batch| batch.has_resonances())
                .cloned()
                .collect();
            entries.push(AspectTableEntry { charts, batches });
        }
        debug!("aspect table built over {} chart subsets", entries.len());
        Self { entries }
    }

    pub fn entries(&self) -> &[AspectTableEntry] {
        &self.entries
    }

    pub fn batches_for(&self, charts: &[ChartId]) -> Option<&[ResonanceBatch]> {
        self.entries
            .iter()
            .find(|entry| {
                entry.charts.len() == charts.len() && charts.iter().all(|c| entry.charts.contains(c))
            })
            .map(|entry| entry.batches.as_slice())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
