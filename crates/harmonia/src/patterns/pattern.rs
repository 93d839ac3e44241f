use serde::Serialize;

use crate::aspects::ResonanceError;
use crate::chart::{ChartId, Point};
use crate::geometry::{arc, arc_for_harmonic, arrange_as_chain, calculate_strength, centroid, ZodiacPoint};
use crate::matrix::ResonanceMatrix;
use crate::settings::ResonanceSettings;

/// A point of a pattern together with its summed clearance to every other member.
#[derive(Debug, Clone, Serialize)]
pub struct PatternMember {
    /// Flat index of the point when found by a matrix search; not used for lookups.
    pub index: usize,
    pub point: Point,
    pub clearance: f64,
}

/// Points of one chart within a pattern that sit in conjunction with each
/// other; shown as a single group.
#[derive(Debug, Clone, Serialize)]
pub struct Cluster {
    points: Vec<Point>,
}

impl Cluster {
    fn new(point: Point) -> Self {
        Self { points: vec![point] }
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

    /// Chart of the cluster's points (all members share it).
    pub fn chart(&self) -> ChartId {
        self.points
            .first()
            .map(|p| p.chart())
            .unwrap_or(ChartId::DETACHED)
    }

    /// Mean position of the cluster, see [`centroid`].
    pub fn centroid(&self) -> f64 {
        centroid(&self.points).unwrap_or_default()
    }

    /// Members ordered along the zodiac, starting after the widest gap.
    pub fn points_in_celestial_order(&self) -> Vec<Point> {
        let mut ordered = self.points.clone();
        arrange_as_chain(&mut ordered);
        ordered
    }

    /// Whether `point` conjoins one of the members: same chart, within the primary orb.
    fn accepts(&self, point: &Point, settings: &ResonanceSettings) -> bool {
        self.points.iter().any(|member| {
            member.of_same_chart(point) && arc(member.position(), point.position()) <= settings.primal_orb()
        })
    }

    /// Whether a point of this cluster conjoins a point of another chart's
    /// cluster, under the cross-chart orb.
    pub fn conjuncts_with(&self, other: &Cluster, settings: &ResonanceSettings) -> bool {
        self.points.iter().any(|a| {
            other.points.iter().any(|b| {
                !a.of_same_chart(b) && arc(a.position(), b.position()) <= settings.orb_for(false)
            })
        })
    }
}

impl ZodiacPoint for Cluster {
    fn zodiac_position(&self) -> f64 {
        self.centroid()
    }
}

/// Points, from one or several charts, connected directly or through each
/// other by resonance at one harmonic.
#[derive(Debug, Clone, Serialize)]
pub struct Pattern {
    harmonic: u32,
    #[serde(skip)]
    settings: ResonanceSettings,
    members: Vec<PatternMember>,
    charts: Vec<ChartId>,
    total_clearance: f64,
    clusters: Vec<Cluster>,
}

impl Pattern {
    pub fn new(harmonic: u32, settings: ResonanceSettings) -> Self {
        Self {
            harmonic,
            settings,
            members: Vec::new(),
            charts: Vec::new(),
            total_clearance: 0.0,
            clusters: Vec::new(),
        }
    }

    /// Add a point found at flat index `index`; a point already present is ignored.
    pub fn add_point(&mut self, index: usize, point: Point) {
        if self.members.iter().any(|m| m.point.is_same(&point)) {
            return;
        }
        if !self.charts.contains(&point.chart()) {
            self.charts.push(point.chart());
        }

        let mut clearance_sum = 0.0;
        for member in &mut self.members {
            let clearance = arc_for_harmonic(point.position(), member.point.position(), self.harmonic);
            member.clearance += clearance;
            clearance_sum += clearance;
        }
        self.total_clearance += clearance_sum;

        match self
            .clusters
            .iter_mut()
            .find(|cluster| cluster.accepts(&point, &self.settings))
        {
            Some(cluster) => cluster.points.push(point.clone()),
            None => self.clusters.push(Cluster::new(point.clone())),
        }

        self.members.push(PatternMember {
            index,
            point,
            clearance: clearance_sum,
        });
    }

    pub fn harmonic(&self) -> u32 {
        self.harmonic
    }

    pub fn size(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Number of charts the pattern spans.
    pub fn dimension(&self) -> usize {
        self.charts.len()
    }

    pub fn charts(&self) -> &[ChartId] {
        &self.charts
    }

    /// Members in insertion order.
    pub fn members(&self) -> &[PatternMember] {
        &self.members
    }

    pub fn clusters(&self) -> &[Cluster] {
        &self.clusters
    }

    pub fn total_clearance(&self) -> f64 {
        self.total_clearance
    }

    /// Orb for the pattern as a whole: halved once it spans several charts.
    pub fn orb(&self) -> f64 {
        self.settings.orb_for(self.dimension() <= 1)
    }

    fn possible_pairs(&self) -> usize {
        self.size() * self.size().saturating_sub(1) / 2
    }

    /// Strength of the mean clearance over all pairs; 0 for fewer than two points.
    pub fn average_strength(&self) -> f64 {
        if self.size() < 2 {
            return 0.0;
        }
        calculate_strength(self.orb(), self.total_clearance / self.possible_pairs() as f64)
    }

    /// Strength of one member's mean clearance to the others.
    pub fn member_strength(&self, member: &PatternMember) -> f64 {
        if self.size() < 2 {
            return 0.0;
        }
        calculate_strength(self.orb(), member.clearance / (self.size() - 1) as f64)
    }

    /// Members from most to least connected (ascending summed clearance).
    pub fn members_by_connectivity(&self) -> Vec<&PatternMember> {
        let mut ordered: Vec<&PatternMember> = self.members.iter().collect();
        ordered.sort_by(|a, b| a.clearance.total_cmp(&b.clearance));
        ordered
    }

    /// Mean summed clearance of a cluster's points; lower is better connected.
    pub fn cluster_connectivity(&self, cluster: &Cluster) -> f64 {
        let sum: f64 = cluster
            .points
            .iter()
            .filter_map(|p| self.members.iter().find(|m| m.point.is_same(p)))
            .map(|m| m.clearance)
            .sum();
        sum / cluster.len().max(1) as f64
    }

    /// A pattern counts only if at least one pair of members resonates
    /// exactly at its harmonic; a lone point never does.
    ///
    /// Members are looked up in `matrix` by point, so a member the matrix
    /// does not hold is an error.
    pub fn is_valid(&self, matrix: &ResonanceMatrix) -> Result<bool, ResonanceError> {
        for (i, a) in self.members.iter().enumerate() {
            for b in &self.members[i + 1..] {
                if matrix.resonance_for(&a.point, &b.point)?.has_exact_harmonic(self.harmonic) {
                    return Ok(true);
                }
            }
        }
        Ok(false)
    }

    /// Whether the pattern spans exactly the given charts.
    pub fn of_chart_set(&self, charts: &[ChartId]) -> bool {
        self.dimension() == charts.len() && charts.iter().all(|c| self.charts.contains(c))
    }
}
