//! Zodiac signs and degree formatting.
//!
//! Each sign spans 30 degrees starting from 0° Aries.

use serde::{Deserialize, Serialize};

use crate::geometry::normalize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZodiacSign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

const SIGN_ORDER: [ZodiacSign; 12] = [
    ZodiacSign::Aries,
    ZodiacSign::Taurus,
    ZodiacSign::Gemini,
    ZodiacSign::Cancer,
    ZodiacSign::Leo,
    ZodiacSign::Virgo,
    ZodiacSign::Libra,
    ZodiacSign::Scorpio,
    ZodiacSign::Sagittarius,
    ZodiacSign::Capricorn,
    ZodiacSign::Aquarius,
    ZodiacSign::Pisces,
];

impl ZodiacSign {
    /// Sign containing the given longitude.
    pub fn of(longitude: f64) -> Self {
        let index = (normalize(longitude) / 30.0) as usize;
        SIGN_ORDER[index.min(11)]
    }

    /// Sign by its 1-based number (1 = Aries).
    pub fn from_number(number: u32) -> Option<Self> {
        if (1..=12).contains(&number) {
            Some(SIGN_ORDER[number as usize - 1])
        } else {
            None
        }
    }

    /// 0-based index (0 = Aries).
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn symbol(self) -> char {
        match self {
            ZodiacSign::Aries => '♈',
            ZodiacSign::Taurus => '♉',
            ZodiacSign::Gemini => '♊',
            ZodiacSign::Cancer => '♋',
            ZodiacSign::Leo => '♌',
            ZodiacSign::Virgo => '♍',
            ZodiacSign::Libra => '♎',
            ZodiacSign::Scorpio => '♏',
            ZodiacSign::Sagittarius => '♐',
            ZodiacSign::Capricorn => '♑',
            ZodiacSign::Aquarius => '♒',
            ZodiacSign::Pisces => '♓',
        }
    }
}

/// Short zodiacal form of a longitude, e.g. `"15°♉"` for 44.2°.
///
/// The degree counts the current (started) degree of the sign.
pub fn zodiac_degree(longitude: f64) -> String {
    let normalized = normalize(longitude);
    format!(
        "{}°{}",
        (normalized % 30.0).ceil() as u32,
        ZodiacSign::of(normalized).symbol()
    )
}

/// Split a longitude into whole degrees, minutes and seconds (rounded to the second).
pub fn degrees_to_coords(longitude: f64) -> (u32, u32, u32) {
    let in_seconds = (normalize(longitude) * 3600.0).round() as u32 % (360 * 3600);
    (in_seconds / 3600, in_seconds % 3600 / 60, in_seconds % 60)
}

/// Split a longitude into sign number (1-12), degrees within the sign, minutes and seconds.
pub fn degrees_to_sign_coords(longitude: f64) -> (u32, u32, u32, u32) {
    let (degrees, minutes, seconds) = degrees_to_coords(longitude);
    (degrees / 30 + 1, degrees % 30, minutes, seconds)
}

/// Arc length as `D°M'S"`, omitting leading zero units.
pub fn format_arc(arc: f64) -> String {
    let in_seconds = (arc.abs() * 3600.0).round() as u64;
    let (d, m, s) = (in_seconds / 3600, in_seconds % 3600 / 60, in_seconds % 60);
    if d > 0 {
        format!("{}°{:02}'{:02}\"", d, m, s)
    } else if m > 0 {
        format!("{}'{:02}\"", m, s)
    } else {
        format!("{}\"", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_of() {
        assert_eq!(ZodiacSign::of(0.0), ZodiacSign::Aries);
        assert_eq!(ZodiacSign::of(29.999), ZodiacSign::Aries);
        assert_eq!(ZodiacSign::of(30.0), ZodiacSign::Taurus);
        assert_eq!(ZodiacSign::of(359.9), ZodiacSign::Pisces);
        assert_eq!(ZodiacSign::of(-1.0), ZodiacSign::Pisces);
    }

    #[test]
    fn test_from_number() {
        assert_eq!(ZodiacSign::from_number(1), Some(ZodiacSign::Aries));
        assert_eq!(ZodiacSign::from_number(12), Some(ZodiacSign::Pisces));
        assert_eq!(ZodiacSign::from_number(0), None);
        assert_eq!(ZodiacSign::from_number(13), None);
    }

    #[test]
    fn test_zodiac_degree() {
        assert_eq!(zodiac_degree(44.2), "15°♉");
        assert_eq!(zodiac_degree(0.5), "1°♈");
    }

    #[test]
    fn test_coords() {
        assert_eq!(degrees_to_coords(123.5), (123, 30, 0));
        assert_eq!(degrees_to_coords(10.0 + 1.0 / 60.0 + 30.0 / 3600.0), (10, 1, 30));
        assert_eq!(degrees_to_sign_coords(123.5), (5, 3, 30, 0));
    }

    #[test]
    fn test_format_arc() {
        assert_eq!(format_arc(1.5), "1°30'00\"");
        assert_eq!(format_arc(0.25), "15'00\"");
        assert_eq!(format_arc(0.0), "0\"");
    }
}
