//! Circular (mod 360°) geometry on the zodiac.
//!
//! All positions are ecliptic longitudes in degrees. Functions accept any
//! real value and normalize internally where it matters.

/// Full circle in degrees.
pub const CIRCLE: f64 = 360.0;
/// Half circle in degrees.
pub const HALF_CIRCLE: f64 = 180.0;

/// Anything that sits at a single position on the zodiac.
pub trait ZodiacPoint {
    fn zodiac_position(&self) -> f64;
}

impl ZodiacPoint for f64 {
    fn zodiac_position(&self) -> f64 {
        *self
    }
}

/// Normalize degrees to [0, 360).
pub fn normalize(value: f64) -> f64 {
    let normalized = value % CIRCLE;
    if normalized < 0.0 {
        // -1e-18 % 360 + 360 rounds to exactly 360.0
        let wrapped = normalized + CIRCLE;
        if wrapped >= CIRCLE {
            0.0
        } else {
            wrapped
        }
    } else {
        normalized
    }
}

/// Shortest undirected distance between two longitudes, in [0, 180].
pub fn arc(a: f64, b: f64) -> f64 {
    let diff = (normalize(a) - normalize(b)).abs();
    if diff > HALF_CIRCLE {
        CIRCLE - diff
    } else {
        diff
    }
}

/// Reduce an arbitrary angle to the undirected arc it spans, in [0, 180].
pub fn normalize_arc(value: f64) -> f64 {
    arc(normalize(value), 0.0)
}

/// Distance travelled forward (direction of the signs) from `a` to `b`, in [0, 360).
pub fn vector_arc(a: f64, b: f64) -> f64 {
    normalize(normalize(b) - normalize(a))
}

/// Gap between two longitudes as seen on the circle of the given harmonic.
///
/// The physical separation is multiplied by `harmonic` and folded back onto
/// [0, 180]; a small result means the pair lines up with one of the
/// harmonic's divisions of the circle.
pub fn arc_for_harmonic(a: f64, b: f64, harmonic: u32) -> f64 {
    normalize_arc(arc(a, b) * harmonic as f64)
}

/// Midpoint of the shorter arc between two longitudes.
pub fn find_median(a: f64, b: f64) -> f64 {
    let span = arc(a, b);
    let back = if (normalize(a + span) - normalize(b)).abs() < 1e-9 {
        a
    } else {
        b
    };
    normalize(back + span / 2.0)
}

/// Whether `to` lies less than half a circle ahead of `from`.
pub fn is_ahead(from: f64, to: f64) -> bool {
    let delta = to - from;
    (delta >= 0.0 && delta < HALF_CIRCLE) || delta < -HALF_CIRCLE
}

/// Sort points by position and rotate them so that the widest gap between
/// neighbours (wraparound included) falls between the last and the first.
pub fn arrange_as_chain<T: ZodiacPoint>(points: &mut [T]) {
    if points.len() < 2 {
        return;
    }
    points.sort_by(|a, b| {
        normalize(a.zodiac_position()).total_cmp(&normalize(b.zodiac_position()))
    });

    let last = points.len() - 1;
    let mut widest = vector_arc(points[last].zodiac_position(), points[0].zodiac_position());
    let mut widest_index = 0;
    for i in 1..points.len() {
        let gap = vector_arc(points[i - 1].zodiac_position(), points[i].zodiac_position());
        if gap > widest {
            widest = gap;
            widest_index = i;
        }
    }
    points.rotate_left(widest_index);
}

/// Mean position of a group of points, taken along their chain arrangement
/// so that groups straddling 0° average correctly.
///
/// Returns `None` for an empty slice.
pub fn centroid<T: ZodiacPoint>(points: &[T]) -> Option<f64> {
    let mut positions: Vec<f64> = points.iter().map(|p| normalize(p.zodiac_position())).collect();
    match positions.len() {
        0 => None,
        1 => Some(positions[0]),
        count => {
            arrange_as_chain(&mut positions);
            let first = positions[0];
            let sum: f64 = positions[1..].iter().map(|&p| vector_arc(first, p)).sum();
            Some(normalize(first + sum / count as f64))
        }
    }
}

/// Strength of a relation with the given clearance under the given orb, in percent.
///
/// 100 is exact, 0 sits on the orb boundary, and values outside the orb go
/// negative, approaching -100 at a 180° clearance.
pub fn calculate_strength(orb: f64, clearance: f64) -> f64 {
    let delta = orb - clearance;
    if delta >= 0.0 {
        delta / orb * 100.0
    } else {
        delta / (HALF_CIRCLE - orb) * 100.0
    }
}
