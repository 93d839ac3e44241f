//! The resonance matrix: every pair of points drawn from a fixed tuple of
//! charts, computed once and queried for aspects and patterns.

use log::{debug, warn};
use std::collections::HashMap;
use std::time::Instant;

use crate::aspects::{AspectTable, ResonanceBatch, ResonanceError};
use crate::chart::{Chart, ChartId, ChartObject, Point};
use crate::patterns::{Pattern, PatternAnalysis, PatternTable};
use crate::settings::ResonanceSettings;

/// Which chart subsets a report covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubsetMode {
    /// Single charts and pairs only.
    Aspects,
    /// Every non-empty subset.
    Patterns,
}

/// Upper-triangular table of [`ResonanceBatch`]es over the flattened points
/// of one or several charts.
///
/// Point indices follow chart order, then point order, and stay fixed for
/// the life of the matrix. Changing any chart afterwards makes the matrix
/// stale; build a new one.
#[derive(Debug, Clone)]
pub struct ResonanceMatrix {
    charts: Vec<Chart>,
    points: Vec<Point>,
    index: HashMap<(ChartId, String), usize>,
    batches: Vec<ResonanceBatch>,
    settings: ResonanceSettings,
}

impl ResonanceMatrix {
    pub fn new(charts: &[Chart], settings: &ResonanceSettings) -> Self {
        let started = Instant::now();

        let mut heavens: Vec<Chart> = Vec::with_capacity(charts.len());
        for chart in charts {
            if heavens.iter().any(|c| c.id() == chart.id()) {
                warn!("chart '{}' given twice, using it once", chart.name());
                continue;
            }
            heavens.push(chart.clone());
        }

        let points: Vec<Point> = heavens
            .iter()
            .flat_map(|c| c.points().iter().cloned())
            .collect();
        let index = points
            .iter()
            .enumerate()
            .map(|(i, p)| ((p.chart(), p.name().to_string()), i))
            .collect();

        let n = points.len();
        let mut batches = Vec::with_capacity(n * n.saturating_sub(1) / 2);
        for i in 0..n {
            for j in (i + 1)..n {
                // names are unique per chart, so distinct indices are distinct points
                batches.push(ResonanceBatch::between(&points[i], &points[j], settings));
            }
        }

        debug!(
            "built resonance matrix for [{}]: {} points, {} pairs in {:?}",
            heavens.iter().map(|c| c.name()).collect::<Vec<_>>().join(", "),
            n,
            batches.len(),
            started.elapsed()
        );

        Self {
            charts: heavens,
            points,
            index,
            batches,
            settings: *settings,
        }
    }

    pub fn from_object(object: &ChartObject, settings: &ResonanceSettings) -> Self {
        Self::new(object.charts(), settings)
    }

    pub fn settings(&self) -> &ResonanceSettings {
        &self.settings
    }

    pub fn charts(&self) -> &[Chart] {
        &self.charts
    }

    pub fn chart(&self, id: ChartId) -> Option<&Chart> {
        self.charts.iter().find(|c| c.id() == id)
    }

    pub fn chart_ids(&self) -> Vec<ChartId> {
        self.charts.iter().map(|c| c.id()).collect()
    }

    /// Flattened points, in index order.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Flat index of a point.
    pub fn index_of(&self, point: &Point) -> Result<usize, ResonanceError> {
        self.index
            .get(&(point.chart(), point.name().to_string()))
            .copied()
            .ok_or_else(|| ResonanceError::PointNotFound {
                name: point.name().to_string(),
                chart: point.chart().value(),
            })
    }

    fn slot(&self, i: usize, j: usize) -> usize {
        let (i, j) = if i < j { (i, j) } else { (j, i) };
        let n = self.points.len();
        i * n - i * (i + 1) / 2 + (j - i - 1)
    }

    /// Batch for two distinct flat indices.
    pub(crate) fn batch_at(&self, i: usize, j: usize) -> &ResonanceBatch {
        &self.batches[self.slot(i, j)]
    }

    /// Resonances between two points.
    pub fn resonance_for(&self, a: &Point, b: &Point) -> Result<&ResonanceBatch, ResonanceError> {
        if a.is_same(b) {
            return Err(ResonanceError::SelfPairing(a.name().to_string()));
        }
        let i = self.index_of(a)?;
        let j = self.index_of(b)?;
        Ok(self.batch_at(i, j))
    }

    /// Whether two points are within orb exactly at `harmonic`.
    pub fn in_resonance(&self, a: &Point, b: &Point, harmonic: u32) -> Result<bool, ResonanceError> {
        Ok(self.resonance_for(a, b)?.has_exact_harmonic(harmonic))
    }

    /// All batches involving `point`, optionally limited to counterparts whose
    /// mask entry is set.
    pub fn resonances_for(
        &self,
        point: &Point,
        acceptable: Option<&[bool]>,
    ) -> Result<Vec<&ResonanceBatch>, ResonanceError> {
        let i = self.index_of(point)?;
        Ok((0..self.points.len())
            .filter(|&j| j != i)
            .filter(|&j| acceptable.map_or(true, |mask| mask.get(j).copied().unwrap_or(false)))
            .map(|j| self.batch_at(i, j))
            .collect())
    }

    /// Points linked to `point` by resonance at `harmonic`.
    pub fn connected_points(
        &self,
        point: &Point,
        harmonic: u32,
        acceptable: Option<&[bool]>,
    ) -> Result<Vec<&Point>, ResonanceError> {
        Ok(self
            .resonances_for(point, acceptable)?
            .into_iter()
            .filter(|batch| batch.has_harmonic_resonance(harmonic))
            .filter_map(|batch| batch.counterpart(point))
            .collect())
    }

    fn connected_indices(&self, i: usize, harmonic: u32, acceptable: &[bool]) -> Vec<usize> {
        (0..self.points.len())
            .filter(|&j| j != i && acceptable[j])
            .filter(|&j| self.batch_at(i, j).has_harmonic_resonance(harmonic))
            .collect()
    }

    /// Every batch, row by row.
    pub fn all_resonances(&self) -> impl Iterator<Item = &ResonanceBatch> {
        self.batches.iter()
    }

    /// Batches between two points of the same chart.
    pub fn resonances_within(&self, chart: ChartId) -> Vec<&ResonanceBatch> {
        self.batches
            .iter()
            .filter(|b| !b.is_synastric() && b.first().chart() == chart)
            .collect()
    }

    /// Batches joining a point of one chart to a point of the other.
    pub fn resonances_between(&self, a: ChartId, b: ChartId) -> Vec<&ResonanceBatch> {
        self.batches
            .iter()
            .filter(|batch| batch.is_synastric())
            .filter(|batch| {
                let [x, y] = batch.charts();
                (x == a && y == b) || (x == b && y == a)
            })
            .collect()
    }

    /// Non-empty subsets of the chart tuple, smallest first.
    ///
    /// Within one size, subsets keep the order of their bit masks over the
    /// chart tuple. Tuples too large for a 64-bit mask get only singles and
    /// pairs, even in patterns mode.
    pub fn chart_combinations(&self, mode: SubsetMode) -> Vec<Vec<ChartId>> {
        let count = self.charts.len();
        if mode == SubsetMode::Aspects {
            return self.singles_and_pairs();
        }
        let end = match u32::try_from(count).ok().and_then(|c| 1u64.checked_shl(c)) {
            Some(end) => end,
            None => {
                warn!("{} charts are too many for every subset, using singles and pairs", count);
                return self.singles_and_pairs();
            }
        };
        let mut combinations: Vec<Vec<ChartId>> = (1u64..end)
            .map(|mask| {
                (0..count)
                    .filter(|bit| mask & (1 << bit) != 0)
                    .map(|bit| self.charts[bit].id())
                    .collect::<Vec<_>>()
            })
            .collect();
        combinations.sort_by_key(|subset| subset.len());
        combinations
    }

    fn singles_and_pairs(&self) -> Vec<Vec<ChartId>> {
        let ids: Vec<ChartId> = self.charts.iter().map(|c| c.id()).collect();
        let mut combinations: Vec<Vec<ChartId>> = ids.iter().map(|id| vec![*id]).collect();
        for j in 1..ids.len() {
            for i in 0..j {
                combinations.push(vec![ids[i], ids[j]]);
            }
        }
        combinations
    }

    /// Per flat index, whether the point belongs to one of the given charts.
    pub fn acceptance_mask(&self, subset: &[ChartId]) -> Vec<bool> {
        self.points.iter().map(|p| subset.contains(&p.chart())).collect()
    }

    /// Connected groups of points of the given charts, linked by resonance
    /// at `harmonic`; strongest first.
    pub fn find_patterns(&self, harmonic: u32, subset: &[ChartId]) -> Vec<Pattern> {
        let acceptable = self.acceptance_mask(subset);
        let mut visited = vec![false; self.points.len()];
        let mut patterns = Vec::new();

        for start in 0..self.points.len() {
            if !acceptable[start] || visited[start] {
                continue;
            }
            let pattern = self.gather_resonants(start, harmonic, &mut visited, &acceptable);
            match pattern.is_valid(self) {
                Ok(true) => patterns.push(pattern),
                Ok(false) => {}
                // members come from this matrix's own points
                Err(e) => warn!("pattern at harmonic {} skipped: {}", harmonic, e),
            }
        }

        patterns.sort_by(|a, b| b.average_strength().total_cmp(&a.average_strength()));
        patterns
    }

    fn gather_resonants(
        &self,
        start: usize,
        harmonic: u32,
        visited: &mut [bool],
        acceptable: &[bool],
    ) -> Pattern {
        let mut pattern = Pattern::new(harmonic, self.settings);
        let mut stack = vec![start];
        visited[start] = true;

        while let Some(current) = stack.pop() {
            pattern.add_point(current, self.points[current].clone());
            // reversed so the lowest index is popped next
            for next in self.connected_indices(current, harmonic, acceptable).into_iter().rev() {
                if !visited[next] {
                    visited[next] = true;
                    stack.push(next);
                }
            }
        }
        pattern
    }

    /// Patterns at every harmonic up to the edge whose charts are exactly `subset`.
    pub fn pattern_analysis(&self, subset: &[ChartId]) -> PatternAnalysis {
        let mut analysis = PatternAnalysis::new();
        for harmonic in 1..=self.settings.edge_harmonic {
            self.find_patterns(harmonic, subset)
                .into_iter()
                .filter(|pattern| pattern.of_chart_set(subset))
                .for_each(|pattern| analysis.add_pattern(pattern));
        }
        analysis
    }

    pub fn build_pattern_table(&self) -> PatternTable {
        PatternTable::build(self)
    }

    pub fn build_aspect_table(&self) -> AspectTable {
        AspectTable::build(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chart(name: &str, points: &[(&str, f64)]) -> Chart {
        Chart::with_points(name, points.iter().map(|(n, p)| Point::new(*n, *p)))
    }

    #[test]
    fn test_slot_covers_upper_triangle() {
        let c = chart("c", &[("a", 0.0), ("b", 10.0), ("c", 20.0), ("d", 30.0)]);
        let matrix = ResonanceMatrix::new(&[c], &ResonanceSettings::default());
        let mut seen = Vec::new();
        for i in 0..4 {
            for j in (i + 1)..4 {
                seen.push(matrix.slot(i, j));
                assert_eq!(matrix.slot(i, j), matrix.slot(j, i));
            }
        }
        assert_eq!(seen, (0..6).collect::<Vec<_>>());
    }

    #[test]
    fn test_batch_lookup_matches_points() {
        let c = chart("c", &[("a", 0.0), ("b", 10.0), ("c", 20.0)]);
        let matrix = ResonanceMatrix::new(&[c.clone()], &ResonanceSettings::default());
        let a = c.point("a").unwrap();
        let b = c.point("c").unwrap();
        let batch = matrix.resonance_for(b, a).unwrap();
        assert!(batch.involves(a) && batch.involves(b));
    }

    #[test]
    fn test_duplicate_chart_is_used_once() {
        let c = chart("c", &[("a", 0.0), ("b", 10.0)]);
        let matrix = ResonanceMatrix::new(&[c.clone(), c], &ResonanceSettings::default());
        assert_eq!(matrix.charts().len(), 1);
        assert_eq!(matrix.len(), 2);
    }

    #[test]
    fn test_resonances_for_respects_mask() {
        let one = chart("one", &[("a", 0.0), ("b", 10.0)]);
        let two = chart("two", &[("c", 20.0)]);
        let matrix = ResonanceMatrix::new(&[one.clone(), two], &ResonanceSettings::default());
        let a = one.point("a").unwrap();
        assert_eq!(matrix.resonances_for(a, None).unwrap().len(), 2);
        let mask = matrix.acceptance_mask(&[one.id()]);
        assert_eq!(matrix.resonances_for(a, Some(&mask)).unwrap().len(), 1);
    }
}
