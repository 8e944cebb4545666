//! Display formatting for converted values.
//!
//! Only the text is rounded; the numeric result kept in history is untouched.

/// Magnitudes at or above this switch to scientific notation
const SCIENTIFIC_UPPER: f64 = 1_000_000.0;
/// Nonzero magnitudes below this switch to scientific notation
const SCIENTIFIC_LOWER: f64 = 0.001;
const FIXED_DECIMALS: usize = 8;
const SCIENTIFIC_DECIMALS: usize = 6;

/// Format a value for display and history text.
///
/// Examples: `100.0 -> "100"`, `12.5 -> "12.5"`, `1.0 / 3.0 -> "0.33333333"`,
/// `2_500_000.0 -> "2.500000e6"`, `0.0005 -> "5.000000e-4"`.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value.is_sign_positive() { "∞".to_string() } else { "-∞".to_string() };
    }

    let magnitude = value.abs();
    if magnitude >= SCIENTIFIC_UPPER || (magnitude != 0.0 && magnitude < SCIENTIFIC_LOWER) {
        return format!("{:.*e}", SCIENTIFIC_DECIMALS, value);
    }

    let fixed = format!("{:.*}", FIXED_DECIMALS, value);
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');

    // -0.0 would otherwise print "-0"
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_trailing_zeros() {
        assert_eq!(format_number(100.0), "100");
        assert_eq!(format_number(12.5), "12.5");
        assert_eq!(format_number(-2.25), "-2.25");
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(-0.0), "0");
    }

    #[test]
    fn rounds_to_eight_decimals() {
        assert_eq!(format_number(1.0 / 3.0), "0.33333333");
        assert_eq!(format_number(2.0 / 3.0), "0.66666667");
        assert_eq!(format_number(273.15), "273.15");
    }

    #[test]
    fn upper_boundary() {
        assert_eq!(format_number(999_999.999999), "999999.999999");
        assert_eq!(format_number(1_000_000.0), "1.000000e6");
        assert_eq!(format_number(2_500_000.0), "2.500000e6");
        assert_eq!(format_number(-1_000_000.0), "-1.000000e6");
    }

    #[test]
    fn lower_boundary() {
        assert_eq!(format_number(0.001), "0.001");
        assert_eq!(format_number(0.0005), "5.000000e-4");
        assert_eq!(format_number(-0.0005), "-5.000000e-4");
    }

    #[test]
    fn non_finite_values() {
        assert_eq!(format_number(f64::NAN), "NaN");
        assert_eq!(format_number(f64::INFINITY), "∞");
        assert_eq!(format_number(f64::NEG_INFINITY), "-∞");
    }
}
