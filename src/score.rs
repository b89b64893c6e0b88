//! # Score scales
//! Numeric helpers shared by the graph model and the relaxation engine.
//!
//! Scores are exposed on the hundred-scale `[0, 100]` and composed on the
//! unit-scale `[0.0, 1.0]`. Conversion is a plain division/multiplication by 100.

/// Lowest storable score (no evidence).
pub const SCORE_MIN: f64 = 0.0;
/// Highest storable score; also the fixed self-confidence of every vertex.
pub const SCORE_MAX: f64 = 100.0;

/// Clamp a hundred-scale score into `[0, 100]`.
///
/// NaN carries no evidence and becomes 0.
pub fn clamp_score(score: f64) -> f64 {
    if score.is_nan() {
        SCORE_MIN
    } else {
        score.clamp(SCORE_MIN, SCORE_MAX)
    }
}

/// Hundred-scale → unit-scale.
pub fn to_unit(score: f64) -> f64 {
    score / 100.0
}

/// Unit-scale → hundred-scale.
pub fn to_hundred(unit: f64) -> f64 {
    unit * 100.0
}

/// Round to two decimals for display.
pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_both_ends() {
        assert_eq!(clamp_score(-5.0), 0.0);
        assert_eq!(clamp_score(150.0), 100.0);
        assert_eq!(clamp_score(42.5), 42.5);
        assert_eq!(clamp_score(f64::INFINITY), 100.0);
        assert_eq!(clamp_score(f64::NEG_INFINITY), 0.0);
    }

    #[test]
    fn nan_is_no_evidence() {
        assert_eq!(clamp_score(f64::NAN), 0.0);
    }

    #[test]
    fn scale_conversion_is_exact_for_percentages() {
        assert_eq!(to_unit(100.0), 1.0);
        assert_eq!(to_unit(50.0), 0.5);
        assert_eq!(to_hundred(1.0), 100.0);
        assert_eq!(to_hundred(0.25), 25.0);
    }

    #[test]
    fn round2_keeps_two_digits() {
        assert!((round2(37.857142) - 37.86).abs() < 1e-9);
        assert_eq!(round2(100.0), 100.0);
    }
}
