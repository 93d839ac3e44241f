//! Integer helpers for harmonic numbers.
//!
//! Harmonic numbers stay small (the edge harmonic is a few hundred at most),
//! so plain trial division is all the factorization needed.

/// Prime factors of `n` in ascending order, with repetition.
///
/// `prime_factors(12) == [2, 2, 3]`; 0 and 1 have no factors.
pub fn prime_factors(n: u32) -> Vec<u32> {
    let mut factors = Vec::new();
    if n < 2 {
        return factors;
    }
    let mut rest = n;
    let mut divisor = 2;
    while divisor * divisor <= rest {
        while rest % divisor == 0 {
            factors.push(divisor);
            rest /= divisor;
        }
        divisor += 1;
    }
    if rest > 1 {
        factors.push(rest);
    }
    factors
}

/// Greatest common divisor, computed from shared prime factors.
pub fn gcd(a: u32, b: u32) -> u32 {
    if a == 0 {
        return b;
    }
    if b == 0 {
        return a;
    }
    let mut other = prime_factors(b);
    let mut common = 1;
    for factor in prime_factors(a) {
        if let Some(pos) = other.iter().position(|&f| f == factor) {
            other.swap_remove(pos);
            common *= factor;
        }
    }
    common
}

/// Reduce the fraction `multiplicity / numeric` to lowest terms.
pub fn reduce(multiplicity: u32, numeric: u32) -> (u32, u32) {
    let common = gcd(multiplicity, numeric).max(1);
    (multiplicity / common, numeric / common)
}

/// Whether `multiplicity / numeric` is already in lowest terms.
pub fn is_lowest_terms(multiplicity: u32, numeric: u32) -> bool {
    gcd(multiplicity, numeric) <= 1
}

/// How many whole steps of the harmonic's division of the circle best
/// explain the physical arc between two points.
///
/// The arc is in [0, 180], so the answer lies in `0..=numeric / 2`; a zero
/// (conjunction) is reported as 1, the single turn of the fundamental.
pub fn find_multiplier(numeric: u32, arc: f64) -> u32 {
    if numeric == 0 {
        return 1;
    }
    let step = crate::geometry::CIRCLE / numeric as f64;
    let turns = (arc / step).round() as u32;
    turns.clamp(1, (numeric / 2).max(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prime_factors() {
        assert!(prime_factors(0).is_empty());
        assert!(prime_factors(1).is_empty());
        assert_eq!(prime_factors(2), vec![2]);
        assert_eq!(prime_factors(12), vec![2, 2, 3]);
        assert_eq!(prime_factors(97), vec![97]);
        assert_eq!(prime_factors(108), vec![2, 2, 3, 3, 3]);
    }

    #[test]
    fn test_gcd_and_reduce() {
        assert_eq!(gcd(8, 12), 4);
        assert_eq!(gcd(7, 12), 1);
        assert_eq!(gcd(0, 5), 5);
        assert_eq!(reduce(2, 8), (1, 4));
        assert_eq!(reduce(3, 7), (3, 7));
        assert!(is_lowest_terms(2, 7));
        assert!(!is_lowest_terms(2, 8));
    }

    #[test]
    fn test_find_multiplier() {
        // quintile and bi-quintile
        assert_eq!(find_multiplier(5, 72.0), 1);
        assert_eq!(find_multiplier(5, 145.0), 2);
        // trine on the third harmonic
        assert_eq!(find_multiplier(3, 119.0), 1);
        // conjunction
        assert_eq!(find_multiplier(1, 3.0), 1);
        // 3/7 of the circle
        assert_eq!(find_multiplier(7, 154.0), 3);
    }
}
