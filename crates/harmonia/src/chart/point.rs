use serde::Serialize;
use std::fmt;
use std::hash::{Hash, Hasher};
use thiserror::Error;

use crate::chart::data::ChartId;
use crate::geometry::{normalize, ZodiacPoint};
use crate::western::{symbol_for, zodiac_degree, ZodiacSign};

/// Errors raised while building points and charts from text.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChartError {
    #[error("no coordinates given for '{0}'")]
    NoCoordinates(String),
    #[error("too many coordinates for '{name}': {count} (at most 4)")]
    TooManyCoordinates { name: String, count: usize },
    #[error("sign number must be within 1..=12, got {0}")]
    SignOutOfRange(f64),
    #[error("cannot read point from '{line}': {message}")]
    InvalidLine { line: String, message: String },
}

/// A named position on the zodiac belonging to one chart.
///
/// The owning chart is referenced by [`ChartId`] only; charts own their
/// points. Two points are the same when their names and owning charts
/// match, whatever their positions.
#[derive(Debug, Clone, Serialize)]
pub struct Point {
    name: String,
    position: f64,
    chart: ChartId,
}

impl Point {
    /// New point, not yet placed in any chart.
    pub fn new(name: impl Into<String>, position: f64) -> Self {
        Self {
            name: name.into(),
            position: normalize(position),
            chart: ChartId::DETACHED,
        }
    }

    /// Build a point from one to four numbers: degrees; degrees and minutes;
    /// degrees, minutes and seconds; or sign number (1-12), degrees in sign,
    /// minutes and seconds.
    pub fn from_coordinates(name: impl Into<String>, coordinates: &[f64]) -> Result<Self, ChartError> {
        let name = name.into();
        let position = match *coordinates {
            [] => return Err(ChartError::NoCoordinates(name)),
            [degrees] => degrees,
            [degrees, minutes] => degrees + minutes / 60.0,
            [degrees, minutes, seconds] => degrees + minutes / 60.0 + seconds / 3600.0,
            [sign, degrees, minutes, seconds] => {
                if !(1.0..=12.0).contains(&sign) {
                    return Err(ChartError::SignOutOfRange(sign));
                }
                let sign_start = (sign as u32 - 1) as f64 * 30.0;
                sign_start + degrees + minutes / 60.0 + seconds / 3600.0
            }
            _ => {
                return Err(ChartError::TooManyCoordinates {
                    name,
                    count: coordinates.len(),
                })
            }
        };
        Ok(Self::new(name, position))
    }

    /// Parse a line of the form `"name degrees [minutes [seconds]]"` or
    /// `"name sign degrees minutes seconds"`.
    pub fn parse(line: &str) -> Result<Self, ChartError> {
        let mut parts = line.split_whitespace();
        let name = parts.next().ok_or_else(|| ChartError::InvalidLine {
            line: line.to_string(),
            message: "empty line".to_string(),
        })?;
        let coordinates = parts
            .map(|part| {
                part.parse::<f64>().map_err(|e| ChartError::InvalidLine {
                    line: line.to_string(),
                    message: format!("'{}': {}", part, e),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_coordinates(name, &coordinates)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn chart(&self) -> ChartId {
        self.chart
    }

    pub fn set_position(&mut self, position: f64) {
        self.position = normalize(position);
    }

    /// Shift the point along the zodiac by `change` degrees.
    pub fn advance_by(&mut self, change: f64) {
        self.set_position(self.position + change);
    }

    pub(crate) fn attach_to(&mut self, chart: ChartId) {
        self.chart = chart;
    }

    pub fn is_same(&self, other: &Point) -> bool {
        self.name == other.name && self.chart == other.chart
    }

    pub fn of_same_chart(&self, other: &Point) -> bool {
        self.chart == other.chart
    }

    pub fn symbol(&self) -> char {
        symbol_for(&self.name)
    }

    pub fn sign(&self) -> ZodiacSign {
        ZodiacSign::of(self.position)
    }

    pub fn zodiac_degree(&self) -> String {
        zodiac_degree(self.position)
    }

    /// `"name (15°♉)"`
    pub fn name_with_degree(&self) -> String {
        format!("{} ({})", self.name, self.zodiac_degree())
    }

    /// `"☉ (15°♉)"`
    pub fn symbol_with_degree(&self) -> String {
        format!("{} ({})", self.symbol(), self.zodiac_degree())
    }
}

impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        self.is_same(other)
    }
}

impl Eq for Point {}

impl Hash for Point {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.chart.hash(state);
    }
}

impl ZodiacPoint for Point {
    fn zodiac_position(&self) -> f64 {
        self.position
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.zodiac_degree())
    }
}
