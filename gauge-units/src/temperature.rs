//! Temperature scales
//!
//! Temperatures cannot be converted by a single factor, so every scale is
//! converted through Celsius: `to_celsius` on the source scale, then
//! `from_celsius` on the target scale.

use std::fmt;
use serde::{Deserialize, Serialize};

/// Offset between Celsius and Kelvin
pub const KELVIN_OFFSET: f64 = 273.15;

/// Freezing point of water in Fahrenheit
const FAHRENHEIT_OFFSET: f64 = 32.0;

/// A temperature scale with an affine mapping to Celsius
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TemperatureScale {
    Celsius,
    Fahrenheit,
    Kelvin,
}

impl TemperatureScale {
    /// Canonical unit symbol
    pub fn symbol(self) -> &'static str {
        match self {
            TemperatureScale::Celsius => "C",
            TemperatureScale::Fahrenheit => "F",
            TemperatureScale::Kelvin => "K",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            TemperatureScale::Celsius => "celsius",
            TemperatureScale::Fahrenheit => "fahrenheit",
            TemperatureScale::Kelvin => "kelvin",
        }
    }

    /// Convert a reading on this scale to Celsius
    pub fn to_celsius(self, value: f64) -> f64 {
        match self {
            TemperatureScale::Celsius => value,
            TemperatureScale::Fahrenheit => (value - FAHRENHEIT_OFFSET) * 5.0 / 9.0,
            TemperatureScale::Kelvin => value - KELVIN_OFFSET,
        }
    }

    /// Convert a Celsius reading to this scale
    pub fn from_celsius(self, celsius: f64) -> f64 {
        match self {
            TemperatureScale::Celsius => celsius,
            TemperatureScale::Fahrenheit => celsius * 9.0 / 5.0 + FAHRENHEIT_OFFSET,
            TemperatureScale::Kelvin => celsius + KELVIN_OFFSET,
        }
    }

    /// Convert a reading on this scale to another scale
    pub fn convert(self, value: f64, target: TemperatureScale) -> f64 {
        target.from_celsius(self.to_celsius(value))
    }
}

impl fmt::Display for TemperatureScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use TemperatureScale::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!((actual - expected).abs() < 1e-9, "expected {}, got {}", expected, actual);
    }

    #[test]
    fn test_water_fixed_points() {
        assert_close(Celsius.convert(0.0, Fahrenheit), 32.0);
        assert_close(Celsius.convert(100.0, Fahrenheit), 212.0);
        assert_close(Celsius.convert(100.0, Kelvin), 373.15);
        assert_close(Fahrenheit.convert(32.0, Celsius), 0.0);
        assert_close(Kelvin.convert(273.15, Celsius), 0.0);
    }

    #[test]
    fn test_scales_cross_at_minus_forty() {
        assert_close(Celsius.convert(-40.0, Fahrenheit), -40.0);
        assert_close(Fahrenheit.convert(-40.0, Celsius), -40.0);
    }

    #[test]
    fn test_absolute_zero() {
        assert_close(Kelvin.convert(0.0, Celsius), -273.15);
        assert_close(Kelvin.convert(0.0, Fahrenheit), -459.67);
    }

    #[test]
    fn test_identity() {
        for scale in [Celsius, Fahrenheit, Kelvin] {
            assert_close(scale.convert(21.5, scale), 21.5);
        }
    }
}
