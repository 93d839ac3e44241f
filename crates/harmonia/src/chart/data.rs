use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::chart::point::Point;

static NEXT_CHART_ID: AtomicU64 = AtomicU64::new(1);

/// Identity handle of a chart, unique within the process.
///
/// Clones of a chart share its id; they are the same chart, possibly at a
/// different revision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ChartId(u64);

impl ChartId {
    /// Owner of points that have not been added to any chart.
    pub const DETACHED: ChartId = ChartId(0);

    fn next() -> Self {
        ChartId(NEXT_CHART_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

/// A named, ordered collection of uniquely named points.
#[derive(Debug, Clone, Serialize)]
pub struct Chart {
    id: ChartId,
    name: String,
    points: Vec<Point>,
    #[serde(skip)]
    revision: u64,
}

impl Chart {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: ChartId::next(),
            name: name.into(),
            points: Vec::new(),
            revision: 0,
        }
    }

    pub fn with_points(name: impl Into<String>, points: impl IntoIterator<Item = Point>) -> Self {
        let mut chart = Self::new(name);
        for point in points {
            chart.add_point(point);
        }
        chart
    }

    pub fn id(&self) -> ChartId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.revision += 1;
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Incremented on every mutation; matrices built from an older revision are stale.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Add a point, replacing in place any point with the same name.
    pub fn add_point(&mut self, mut point: Point) {
        point.attach_to(self.id);
        match self.points.iter_mut().find(|p| p.name() == point.name()) {
            Some(existing) => *existing = point,
            None => self.points.push(point),
        }
        self.revision += 1;
    }

    pub fn remove_point(&mut self, name: &str) -> Option<Point> {
        let index = self.points.iter().position(|p| p.name() == name)?;
        self.revision += 1;
        Some(self.points.remove(index))
    }

    pub fn point(&self, name: &str) -> Option<&Point> {
        self.points.iter().find(|p| p.name() == name)
    }

    /// Move a point to a new position.
    pub fn set_position(&mut self, name: &str, position: f64) -> bool {
        match self.points.iter_mut().find(|p| p.name() == name) {
            Some(point) => {
                point.set_position(position);
                self.revision += 1;
                true
            }
            None => false,
        }
    }

    /// Name cut down to `limit` characters, ending in `…` when shortened.
    pub fn shortened_name(&self, limit: usize) -> String {
        shorten(&self.name, limit)
    }
}

pub(crate) fn shorten(name: &str, limit: usize) -> String {
    if name.chars().count() <= limit {
        name.to_string()
    } else {
        let kept: String = name.chars().take(limit.saturating_sub(1)).collect();
        format!("{}…", kept)
    }
}

/// Several charts analysed together without merging their points.
#[derive(Debug, Clone, Serialize)]
pub struct MultiChart {
    name: String,
    moments: Vec<Chart>,
}

impl MultiChart {
    pub fn new(name: impl Into<String>, moments: Vec<Chart>) -> Self {
        Self {
            name: name.into(),
            moments,
        }
    }

    /// Multi-chart titled after its components: `"Synastry: A + B"`.
    pub fn synastry(moments: Vec<Chart>) -> Self {
        let title = moments
            .iter()
            .map(|c| c.name())
            .collect::<Vec<_>>()
            .join(" + ");
        Self::new(format!("Synastry: {}", title), moments)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn charts(&self) -> &[Chart] {
        &self.moments
    }

    pub fn dimension(&self) -> usize {
        self.moments.len()
    }

    /// Caption listing the components under their letters.
    pub fn caption(&self) -> String {
        let lines: Vec<String> = self
            .moments
            .iter()
            .enumerate()
            .map(|(i, chart)| format!("{}: {}", letter_for(i), chart.name()))
            .collect();
        format!("Multi-chart:\n{}", lines.join("\n"))
    }
}

/// Letter used to mark the `i`-th component of a multi-chart:
/// A..Z, then A1..Z1 and so on.
pub fn letter_for(i: usize) -> String {
    const LETTERS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
    let letter = LETTERS[i % LETTERS.len()] as char;
    let octave = i / LETTERS.len();
    if octave > 0 {
        format!("{}{}", letter, octave)
    } else {
        letter.to_string()
    }
}

/// Either a single chart or a multi-chart; analysis treats both as a tuple of charts.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ChartObject {
    Single(Chart),
    Multi(MultiChart),
}

impl ChartObject {
    pub fn name(&self) -> &str {
        match self {
            ChartObject::Single(chart) => chart.name(),
            ChartObject::Multi(multi) => multi.name(),
        }
    }

    /// Component charts, in order.
    pub fn charts(&self) -> &[Chart] {
        match self {
            ChartObject::Single(chart) => std::slice::from_ref(chart),
            ChartObject::Multi(multi) => multi.charts(),
        }
    }

    pub fn dimension(&self) -> usize {
        self.charts().len()
    }

    pub fn shortened_name(&self, limit: usize) -> String {
        shorten(self.name(), limit)
    }
}

impl From<Chart> for ChartObject {
    fn from(chart: Chart) -> Self {
        ChartObject::Single(chart)
    }
}

impl From<MultiChart> for ChartObject {
    fn from(multi: MultiChart) -> Self {
        ChartObject::Multi(multi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_point_replaces_in_place() {
        let mut chart = Chart::new("natal");
        chart.add_point(Point::new("sun", 10.0));
        chart.add_point(Point::new("moon", 20.0));
        chart.add_point(Point::new("sun", 30.0));
        let names: Vec<&str> = chart.points().iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["sun", "moon"]);
        assert_eq!(chart.point("sun").map(|p| p.position()), Some(30.0));
        assert!(chart.points().iter().all(|p| p.chart() == chart.id()));
    }

    #[test]
    fn test_revision_tracks_mutation() {
        let mut chart = Chart::new("natal");
        let start = chart.revision();
        chart.add_point(Point::new("sun", 10.0));
        assert!(chart.revision() > start);
        let before = chart.revision();
        assert!(!chart.set_position("pluto", 1.0));
        assert_eq!(chart.revision(), before);
        assert!(chart.set_position("sun", 11.0));
        assert!(chart.revision() > before);
    }

    #[test]
    fn test_ids_are_distinct() {
        let a = Chart::new("a");
        let b = Chart::new("a");
        assert_ne!(a.id(), b.id());
        assert_eq!(a.clone().id(), a.id());
    }

    #[test]
    fn test_shortened_name() {
        let chart = Chart::new("Anastasia");
        assert_eq!(chart.shortened_name(4), "Ana…");
        assert_eq!(chart.shortened_name(20), "Anastasia");
    }

    #[test]
    fn test_multichart() {
        let multi = MultiChart::synastry(vec![Chart::new("A"), Chart::new("B")]);
        assert_eq!(multi.name(), "Synastry: A + B");
        let object = ChartObject::from(multi);
        assert_eq!(object.dimension(), 2);
        assert_eq!(ChartObject::from(Chart::new("solo")).dimension(), 1);
    }

    #[test]
    fn test_letter_for() {
        assert_eq!(letter_for(0), "A");
        assert_eq!(letter_for(25), "Z");
        assert_eq!(letter_for(26), "A1");
    }
}
