//! Unit categories
//!
//! A category is either linear (every unit has a scale factor relative to a
//! shared base) or affine (temperature). The distinction lives in the type,
//! so scale-factor arithmetic can never reach a temperature unit.

use serde::{Deserialize, Serialize};
use gauge_core::ConvertError;
use crate::{LinearUnit, AffineUnit, UnitRef, TemperatureScale};

/// How the units of a category convert
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "units", rename_all = "lowercase")]
pub enum CategoryKind {
    Linear(Vec<LinearUnit>),
    Affine(Vec<AffineUnit>),
}

/// A named family of mutually convertible units
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub kind: CategoryKind,
}

impl Category {
    /// Create a linear category from (symbol, name, factor) triples
    pub fn linear(name: &str, units: &[(&str, &str, f64)]) -> Self {
        Category {
            name: name.to_string(),
            kind: CategoryKind::Linear(
                units.iter()
                    .map(|&(symbol, unit_name, factor)| LinearUnit::new(symbol, unit_name, factor))
                    .collect(),
            ),
        }
    }

    /// Create a temperature category
    pub fn temperature(name: &str, scales: &[TemperatureScale]) -> Self {
        Category {
            name: name.to_string(),
            kind: CategoryKind::Affine(scales.iter().copied().map(AffineUnit::new).collect()),
        }
    }

    pub fn is_temperature(&self) -> bool {
        matches!(self.kind, CategoryKind::Affine(_))
    }

    pub fn len(&self) -> usize {
        match &self.kind {
            CategoryKind::Linear(units) => units.len(),
            CategoryKind::Affine(units) => units.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Unit symbols in stored order
    pub fn symbols(&self) -> Vec<&str> {
        self.units().into_iter().map(|u| u.symbol()).collect()
    }

    /// All units in stored order
    pub fn units(&self) -> Vec<UnitRef<'_>> {
        match &self.kind {
            CategoryKind::Linear(units) => units.iter().map(UnitRef::Linear).collect(),
            CategoryKind::Affine(units) => units.iter().map(UnitRef::Affine).collect(),
        }
    }

    /// Look up a unit by exact symbol
    pub fn unit(&self, symbol: &str) -> Result<UnitRef<'_>, ConvertError> {
        self.units()
            .into_iter()
            .find(|u| u.symbol() == symbol)
            .ok_or_else(|| self.unknown_unit(symbol))
    }

    /// Scale factor of a linear unit
    pub fn linear_factor(&self, symbol: &str) -> Result<f64, ConvertError> {
        match &self.kind {
            CategoryKind::Linear(units) => units.iter()
                .find(|u| u.symbol == symbol)
                .map(|u| u.factor)
                .ok_or_else(|| self.unknown_unit(symbol)),
            CategoryKind::Affine(_) => Err(self.unknown_unit(symbol)),
        }
    }

    /// Temperature scale of an affine unit
    pub fn temperature_scale(&self, symbol: &str) -> Result<TemperatureScale, ConvertError> {
        match &self.kind {
            CategoryKind::Affine(units) => units.iter()
                .find(|u| u.symbol == symbol)
                .map(|u| u.scale)
                .ok_or_else(|| self.unknown_unit(symbol)),
            CategoryKind::Linear(_) => Err(self.unknown_unit(symbol)),
        }
    }

    /// Order units by symbol (byte order)
    pub(crate) fn sort_units(&mut self) {
        match &mut self.kind {
            CategoryKind::Linear(units) => units.sort_by(|a, b| a.symbol.cmp(&b.symbol)),
            CategoryKind::Affine(units) => units.sort_by(|a, b| a.symbol.cmp(&b.symbol)),
        }
    }

    fn unknown_unit(&self, symbol: &str) -> ConvertError {
        ConvertError::unknown_unit(symbol, &self.name, &self.symbols())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn length() -> Category {
        Category::linear("Length", &[
            ("m", "meter", 1.0),
            ("km", "kilometer", 1000.0),
            ("ft", "foot", 0.3048),
        ])
    }

    #[test]
    fn test_linear_lookup() {
        let cat = length();
        assert!(!cat.is_temperature());
        assert_eq!(cat.len(), 3);
        assert_eq!(cat.linear_factor("km").unwrap(), 1000.0);
        assert_eq!(cat.unit("ft").unwrap().name(), "foot");
    }

    #[test]
    fn test_unknown_unit_error() {
        let cat = length();
        let err = cat.linear_factor("mi").unwrap_err();
        assert_eq!(err, ConvertError::unknown_unit("mi", "Length", &["m", "km", "ft"]));
    }

    #[test]
    fn test_temperature_never_yields_factor() {
        let cat = Category::temperature("Temperature", &[TemperatureScale::Celsius, TemperatureScale::Kelvin]);
        assert!(cat.is_temperature());
        assert!(cat.linear_factor("C").is_err());
        assert_eq!(cat.temperature_scale("K").unwrap(), TemperatureScale::Kelvin);
        assert!(cat.temperature_scale("F").is_err());
        assert_eq!(cat.unit("C").unwrap().factor(), None);
    }

    #[test]
    fn test_sort_units() {
        let mut cat = length();
        cat.sort_units();
        assert_eq!(cat.symbols(), vec!["ft", "km", "m"]);
    }

    #[test]
    fn test_serialization_tags_kind() {
        let cat = Category::temperature("Temperature", &[TemperatureScale::Fahrenheit]);
        let json = serde_json::to_value(&cat).unwrap();
        assert_eq!(json["kind"]["kind"], "affine");
        assert_eq!(json["kind"]["units"][0]["symbol"], "F");
    }
}
