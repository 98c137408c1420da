//! Unit definitions

use std::fmt;
use serde::{Deserialize, Serialize};
use crate::TemperatureScale;

/// A unit that converts by a constant factor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearUnit {
    /// The unit symbol (e.g., "m", "kg", "fl oz")
    pub symbol: String,
    /// The unit name (e.g., "meter", "kilogram")
    pub name: String,
    /// 1 unit = factor × base unit of the category
    pub factor: f64,
}

impl LinearUnit {
    pub fn new(symbol: &str, name: &str, factor: f64) -> Self {
        LinearUnit {
            symbol: symbol.to_string(),
            name: name.to_string(),
            factor,
        }
    }

    /// Check if this unit is the category's base
    pub fn is_base(&self) -> bool {
        self.factor == 1.0
    }
}

/// A temperature unit, converted through Celsius
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AffineUnit {
    pub symbol: String,
    pub name: String,
    pub scale: TemperatureScale,
}

impl AffineUnit {
    pub fn new(scale: TemperatureScale) -> Self {
        AffineUnit {
            symbol: scale.symbol().to_string(),
            name: scale.name().to_string(),
            scale,
        }
    }
}

/// Borrowed view of either kind of unit
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UnitRef<'a> {
    Linear(&'a LinearUnit),
    Affine(&'a AffineUnit),
}

impl<'a> UnitRef<'a> {
    pub fn symbol(&self) -> &'a str {
        match self {
            UnitRef::Linear(u) => &u.symbol,
            UnitRef::Affine(u) => &u.symbol,
        }
    }

    pub fn name(&self) -> &'a str {
        match self {
            UnitRef::Linear(u) => &u.name,
            UnitRef::Affine(u) => &u.name,
        }
    }

    /// Scale factor, or `None` for temperature units
    pub fn factor(&self) -> Option<f64> {
        match self {
            UnitRef::Linear(u) => Some(u.factor),
            UnitRef::Affine(_) => None,
        }
    }
}

impl fmt::Display for UnitRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
