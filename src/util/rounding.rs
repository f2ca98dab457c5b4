//! Decimal rounding for share values.

/// Rounds `value` to `digits` decimal places.
///
/// Goes through decimal formatting so the result is decided on the exact
/// binary value instead of a scaled product, e.g. `round_to(2.0 / 3.0, 2)` is
/// `0.67` and `round_to(0.285, 2)` is `0.28` (0.285 is stored slightly below).
/// Exact ties round half to even: `round_to(0.125, 2)` is `0.12`.
pub(crate) fn round_to(value: f64, digits: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let precision = digits as usize;
    format!("{value:.precision$}").parse().unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_thirds() {
        assert!((round_to(2.0 / 3.0, 2) - 0.67).abs() < f64::EPSILON);
        assert!((round_to(1.0 / 3.0, 2) - 0.33).abs() < f64::EPSILON);
    }

    #[test]
    fn exact_ties_round_half_to_even() {
        // 1/8 and 5/8 are exact binary ties
        assert!((round_to(0.125, 2) - 0.12).abs() < f64::EPSILON);
        assert!((round_to(0.625, 2) - 0.62).abs() < f64::EPSILON);
        assert!((round_to(1.0 / 8.0, 2) - 0.12).abs() < f64::EPSILON);
    }

    #[test]
    fn decides_on_stored_value() {
        assert!((round_to(0.285, 2) - 0.28).abs() < f64::EPSILON);
        assert!((round_to(0.0449, 2) - 0.04).abs() < f64::EPSILON);
    }

    #[test]
    fn non_finite_passes_through() {
        assert!(round_to(f64::NAN, 2).is_nan());
    }
}
