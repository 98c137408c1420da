//! Conversion engine
//!
//! `convert` is pure: it reads the registry, never logs, never mutates.
//! Linear categories normalise through the base unit
//! (`value × factor(from) / factor(to)`); temperature goes through Celsius.

use std::fmt;
use serde::{Deserialize, Serialize};
use gauge_core::{ConvertError, Decimals, RawValue, format_fixed, repr};
use crate::{CategoryKind, UnitRegistry};

/// Prefix of every display string that reports an error
pub const ERROR_MARKER: char = '❗';

/// Inputs for a single conversion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionRequest {
    pub value: RawValue,
    pub from_unit: String,
    pub to_unit: String,
    pub category: String,
    #[serde(default)]
    pub decimals: Decimals,
}

impl ConversionRequest {
    pub fn new(
        value: impl Into<RawValue>,
        from_unit: &str,
        to_unit: &str,
        category: &str,
        decimals: Decimals,
    ) -> Self {
        ConversionRequest {
            value: value.into(),
            from_unit: from_unit.to_string(),
            to_unit: to_unit.to_string(),
            category: category.to_string(),
            decimals,
        }
    }
}

/// A successful conversion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversion {
    /// The parsed input value
    pub value: f64,
    pub from_unit: String,
    /// The unrounded result
    pub result: f64,
    pub to_unit: String,
    pub decimals: Decimals,
}

impl Conversion {
    /// Result rounded to the requested decimal places
    pub fn formatted_result(&self) -> String {
        format_fixed(self.result, self.decimals)
    }
}

impl fmt::Display for Conversion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} = {} {}",
            repr(self.value),
            self.from_unit,
            self.formatted_result(),
            self.to_unit
        )
    }
}

/// Convert a value between two units of the same category
pub fn convert(registry: &UnitRegistry, request: &ConversionRequest) -> Result<Conversion, ConvertError> {
    let value = request.value.parse()?;
    let category = registry.category(&request.category)?;

    let result = match &category.kind {
        CategoryKind::Linear(_) => {
            let from = category.linear_factor(&request.from_unit)?;
            let to = category.linear_factor(&request.to_unit)?;
            let in_base = value * from;
            in_base / to
        }
        CategoryKind::Affine(_) => {
            let from = category.temperature_scale(&request.from_unit)?;
            let to = category.temperature_scale(&request.to_unit)?;
            from.convert(value, to)
        }
    };

    Ok(Conversion {
        value,
        from_unit: request.from_unit.clone(),
        result,
        to_unit: request.to_unit.clone(),
        decimals: request.decimals,
    })
}

/// Display string for a conversion outcome
///
/// Errors start with [`ERROR_MARKER`] so a caller can tell them apart
/// without inspecting the result type.
pub fn render(outcome: &Result<Conversion, ConvertError>) -> String {
    match outcome {
        Ok(conversion) => conversion.to_string(),
        Err(e) => format!("{} {}", ERROR_MARKER, e),
    }
}

/// Check whether a display string reports an error
pub fn is_error_display(display: &str) -> bool {
    display.starts_with(ERROR_MARKER)
}

impl UnitRegistry {
    /// Convert using this registry
    pub fn convert(&self, request: &ConversionRequest) -> Result<Conversion, ConvertError> {
        convert(self, request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::UNITS;
    use gauge_core::codes;

    fn d(places: u8) -> Decimals {
        Decimals::new(places).unwrap()
    }

    fn run(value: impl Into<RawValue>, from: &str, to: &str, category: &str, places: u8) -> Result<Conversion, ConvertError> {
        convert(&UNITS, &ConversionRequest::new(value, from, to, category, d(places)))
    }

    fn display(value: impl Into<RawValue>, from: &str, to: &str, category: &str, places: u8) -> String {
        render(&run(value, from, to, category, places))
    }

    fn linear_categories() -> Vec<&'static str> {
        UNITS.categories().into_iter()
            .filter(|c| !UNITS.is_temperature(c).unwrap())
            .collect()
    }

    fn assert_close(actual: f64, expected: f64) {
        let tolerance = 1e-9 * expected.abs().max(1.0);
        assert!((actual - expected).abs() <= tolerance, "expected {}, got {}", expected, actual);
    }

    #[test]
    fn test_meter_to_feet() {
        assert_eq!(display(1.0, "m", "ft", "Length", 4), "1.0 m = 3.2808 ft");
        assert_eq!(display("1", "m", "ft", "Length", 4), "1.0 m = 3.2808 ft");
    }

    #[test]
    fn test_temperature_fixed_points() {
        assert_eq!(run(0.0, "C", "F", "Temperature", 2).unwrap().formatted_result(), "32.00");
        assert_eq!(run(100.0, "C", "K", "Temperature", 2).unwrap().formatted_result(), "373.15");
        assert_eq!(run(32.0, "F", "C", "Temperature", 2).unwrap().formatted_result(), "0.00");
        assert_eq!(display(212.0, "F", "C", "Temperature", 1), "212.0 F = 100.0 C");
    }

    #[test]
    fn test_invalid_number() {
        let err = run("abc", "m", "ft", "Length", 4).unwrap_err();
        assert_eq!(err.code(), codes::INVALID_NUMBER);
        assert!(err.to_string().contains("'abc'"));
        assert_eq!(display("abc", "m", "ft", "Length", 4), "❗ Input 'abc' is not a number.");
    }

    #[test]
    fn test_invalid_number_reported_before_unit_checks() {
        let err = run("abc", "parsec", "ft", "Nowhere", 4).unwrap_err();
        assert!(err.is_user_error());
    }

    #[test]
    fn test_unknown_unit_and_category() {
        assert_eq!(run(1.0, "m", "lb", "Length", 2).unwrap_err().code(), codes::UNKNOWN_UNIT);
        assert_eq!(run(1.0, "X", "C", "Temperature", 2).unwrap_err().code(), codes::UNKNOWN_UNIT);
        assert_eq!(run(1.0, "m", "ft", "Speed", 2).unwrap_err().code(), codes::UNKNOWN_CATEGORY);
        // Category names are exact
        assert!(run(1.0, "m", "ft", "length", 2).is_err());
    }

    #[test]
    fn test_zero_decimals_has_no_point() {
        let shown = run(1.0, "m", "ft", "Length", 0).unwrap().formatted_result();
        assert_eq!(shown, "3");
        assert!(!shown.contains('.'));
    }

    #[test]
    fn test_max_decimals() {
        let conversion = run(1.0, "m", "ft", "Length", 10).unwrap();
        assert_eq!(conversion.formatted_result(), "3.2808398950");

        let huge = run(1e300, "km", "mm", "Length", 10).unwrap().formatted_result();
        assert!(huge.ends_with(".0000000000"));
        assert!(!huge.contains('e'));
    }

    #[test]
    fn test_echo_uses_parsed_value() {
        assert_eq!(display(" 2.50 ", "kg", "g", "Mass", 1), "2.5 kg = 2500.0 g");
        assert_eq!(display("1e-5", "km", "m", "Length", 3), "1e-05 km = 0.010 m");
        assert_eq!(display("-0", "C", "C", "Temperature", 0), "-0.0 C = -0 C");
    }

    #[test]
    fn test_identity_conversion() {
        for category in linear_categories() {
            for unit in UNITS.units_of(category).unwrap() {
                let conversion = run(12.345, unit, unit, category, 3).unwrap();
                assert_close(conversion.result, 12.345);
                assert_eq!(conversion.formatted_result(), "12.345", "{} in {}", unit, category);
            }
        }
    }

    #[test]
    fn test_transitivity() {
        let x = 7.25;
        for category in linear_categories() {
            let units = UNITS.units_of(category).unwrap();
            for u in &units {
                for v in &units {
                    for w in &units {
                        let via = run(x, u, v, category, 10).unwrap().result;
                        let chained = run(via, v, w, category, 10).unwrap().result;
                        let direct = run(x, u, w, category, 10).unwrap().result;
                        assert_close(chained, direct);
                    }
                }
            }
        }
    }

    #[test]
    fn test_round_trip() {
        for category in UNITS.categories() {
            let units = UNITS.units_of(category).unwrap();
            for u in &units {
                for v in &units {
                    let there = run(42.5, u, v, category, 10).unwrap().result;
                    let back = run(there, v, u, category, 10).unwrap().result;
                    assert_close(back, 42.5);
                }
            }
        }
    }

    #[test]
    fn test_known_values() {
        assert_eq!(run(1.0, "mile", "km", "Length", 6).unwrap().formatted_result(), "1.609344");
        assert_eq!(run(1.0, "lb", "g", "Mass", 5).unwrap().formatted_result(), "453.59237");
        assert_eq!(run(1.0, "gal", "L", "Volume", 3).unwrap().formatted_result(), "3.785");
        assert_eq!(run(1.0, "hectare", "acre", "Area", 4).unwrap().formatted_result(), "2.4711");
    }

    #[test]
    fn test_error_marker() {
        let ok = display(1.0, "m", "cm", "Length", 0);
        assert!(!is_error_display(&ok));
        let err = display("1..2", "m", "cm", "Length", 0);
        assert!(is_error_display(&err));
    }

    #[test]
    fn test_registry_method_matches_function() {
        let request = ConversionRequest::new(3.0, "ft", "in", "Length", d(2));
        assert_eq!(UNITS.convert(&request), convert(&UNITS, &request));
        assert_eq!(UNITS.convert(&request).unwrap().to_string(), "3.0 ft = 36.00 in");
    }
}
