//! Temperature scale conversion.

use serde::{Deserialize, Serialize};

/// Current temperature in three scales, each rounded to two decimals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TemperatureResult {
    pub celsius: f64,
    pub fahrenheit: f64,
    pub kelvin: f64,
}

impl TemperatureResult {
    /// Derive Fahrenheit (C × 1.8 + 32) and Kelvin (C + 273) from Celsius.
    pub fn from_celsius(celsius: f64) -> Self {
        Self {
            celsius: round_to_two(celsius),
            fahrenheit: round_to_two(celsius * 1.8 + 32.0),
            kelvin: round_to_two(celsius + 273.0),
        }
    }
}

/// Round to two decimal places, ties away from zero.
pub fn round_to_two(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_conversions() {
        let t = TemperatureResult::from_celsius(25.0);
        assert_eq!(t.fahrenheit, 77.0);
        assert_eq!(t.kelvin, 298.0);

        let t = TemperatureResult::from_celsius(0.0);
        assert_eq!(t.celsius, 0.0);
        assert_eq!(t.fahrenheit, 32.0);
        assert_eq!(t.kelvin, 273.0);
    }

    #[test]
    fn test_fractional_celsius() {
        let t = TemperatureResult::from_celsius(22.4);
        assert_eq!(t.celsius, 22.4);
        assert_eq!(t.fahrenheit, 72.32);
        assert_eq!(t.kelvin, 295.4);
    }

    #[test]
    fn test_negative_celsius() {
        let t = TemperatureResult::from_celsius(-40.0);
        assert_eq!(t.fahrenheit, -40.0);
        assert_eq!(t.kelvin, 233.0);
    }

    #[test]
    fn test_rounding() {
        assert_eq!(round_to_two(36.347), 36.35);
        assert_eq!(round_to_two(36.344), 36.34);
        assert_eq!(round_to_two(0.125), 0.13);
        assert_eq!(round_to_two(-0.125), -0.13);
    }

    #[test]
    fn test_serializes_with_scale_names() {
        let body = serde_json::to_string(&TemperatureResult::from_celsius(22.4)).unwrap();
        assert_eq!(body, r#"{"celsius":22.4,"fahrenheit":72.32,"kelvin":295.4}"#);
    }
}
