//! CLI argument validators.
//!
//! Shared validation functions for CLI argument parsing.

use crate::constants::feedback::{MAX_CONFIDENCE, MIN_CONFIDENCE};

/// Parse and validate a bounded float value.
///
/// # Arguments
///
/// * `s` - The string to parse
/// * `min` - Minimum allowed value (inclusive)
/// * `max` - Maximum allowed value (inclusive)
/// * `name` - Name of the parameter for error messages
pub fn parse_bounded_float(s: &str, min: f64, max: f64, name: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;

    if !(min..=max).contains(&value) {
        return Err(format!(
            "{name} must be between {min} and {max}, got {value}"
        ));
    }

    Ok(value)
}

/// Parse and validate latitude value (-90.0 to 90.0).
pub fn parse_latitude(s: &str) -> Result<f64, String> {
    parse_bounded_float(s, -90.0, 90.0, "latitude")
}

/// Parse and validate longitude value (-180.0 to 180.0).
pub fn parse_longitude(s: &str) -> Result<f64, String> {
    parse_bounded_float(s, -180.0, 180.0, "longitude")
}

/// Parse and validate a feedback confidence level (1 to 10).
pub fn parse_feedback_confidence(s: &str) -> Result<u8, String> {
    let value: u8 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a whole number between {MIN_CONFIDENCE} and {MAX_CONFIDENCE}"))?;

    if !(MIN_CONFIDENCE..=MAX_CONFIDENCE).contains(&value) {
        return Err(format!(
            "confidence must be between {MIN_CONFIDENCE} and {MAX_CONFIDENCE}, got {value}"
        ));
    }

    Ok(value)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bounded_float_valid() {
        assert_eq!(
            parse_bounded_float("50.0", -100.0, 100.0, "test").ok(),
            Some(50.0)
        );
        assert_eq!(
            parse_bounded_float("-100.0", -100.0, 100.0, "test").ok(),
            Some(-100.0)
        );
    }

    #[test]
    fn test_parse_bounded_float_error_names_parameter() {
        let err = parse_bounded_float("150", -100.0, 100.0, "altitude").unwrap_err();
        assert!(err.starts_with("altitude must be between"));
    }

    #[test]
    fn test_parse_latitude() {
        assert_eq!(parse_latitude("0").ok(), Some(0.0));
        assert_eq!(parse_latitude("14.0208").ok(), Some(14.0208));
        assert!(parse_latitude("-90.5").is_err());
        assert!(parse_latitude("north").is_err());
    }

    #[test]
    fn test_parse_longitude() {
        assert_eq!(parse_longitude("100.6087").ok(), Some(100.6087));
        assert!(parse_longitude("180.1").is_err());
    }

    #[test]
    fn test_parse_feedback_confidence() {
        assert_eq!(parse_feedback_confidence("1").ok(), Some(1));
        assert_eq!(parse_feedback_confidence("10").ok(), Some(10));
        assert!(parse_feedback_confidence("0").is_err());
        assert!(parse_feedback_confidence("11").is_err());
        assert!(parse_feedback_confidence("7.5").is_err());
    }
}
