use log::debug;
use serde::Serialize;

use crate::chart::ChartId;
use crate::matrix::{ResonanceMatrix, SubsetMode};
use crate::patterns::analysis::PatternAnalysis;

/// Pattern analysis for one chart subset.
#[derive(Debug, Clone, Serialize)]
pub struct PatternTableEntry {
    pub charts: Vec<ChartId>,
    pub analysis: PatternAnalysis,
}

/// Pattern analyses for every non-empty subset of a matrix's charts,
/// smallest subsets first.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PatternTable {
    entries: Vec<PatternTableEntry>,
}

impl PatternTable {
    pub fn build(matrix: &ResonanceMatrix) -> Self {
        let entries: Vec<PatternTableEntry> = matrix
            .chart_combinations(SubsetMode::Patterns)
            .into_iter()
            .map(|charts| {
                let analysis = matrix.pattern_analysis(&charts);
                PatternTableEntry { charts, analysis }
            })
            .collect();
        debug!("pattern table built over {} chart subsets", entries.len());
        Self { entries }
    }

    pub fn entries(&self) -> &[PatternTableEntry] {
        &self.entries
    }

    /// Analysis for exactly this set of charts, in any order.
    pub fn analysis_for(&self, charts: &[ChartId]) -> Option<&PatternAnalysis> {
        self.entries
            .iter()
            .find(|entry| {
                entry.charts.len() == charts.len() && charts.iter().all(|c| entry.charts.contains(c))
            })
            .map(|entry| &entry.analysis)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
