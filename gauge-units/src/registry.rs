//! Unit registry
//!
//! Read-only lookup structure built once. Units within each category are
//! kept sorted by symbol, so `units_of` always returns them in byte order;
//! categories keep the order they were declared in.

use std::collections::HashSet;
use std::sync::LazyLock;
use thiserror::Error;
use gauge_core::ConvertError;
use crate::{Category, CategoryKind, UnitRef};
use crate::units::builtin_categories;

/// Global registry of the built-in units
pub static UNITS: LazyLock<UnitRegistry> = LazyLock::new(UnitRegistry::builtin);

/// Problems found while validating a unit table
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RegistryError {
    #[error("category '{0}' has no units")]
    EmptyCategory(String),

    #[error("category '{0}' is defined twice")]
    DuplicateCategory(String),

    #[error("unit '{unit}' appears twice in category '{category}'")]
    DuplicateUnit { category: String, unit: String },

    #[error("unit '{unit}' in category '{category}' has invalid factor {factor}")]
    InvalidFactor { category: String, unit: String, factor: f64 },
}

/// Registry of categories and their units
#[derive(Debug, Clone)]
pub struct UnitRegistry {
    categories: Vec<Category>,
}

impl UnitRegistry {
    /// Build a registry from a custom table, validating it
    pub fn new(categories: Vec<Category>) -> Result<Self, RegistryError> {
        validate(&categories)?;
        Ok(Self::build(categories))
    }

    /// The built-in table (validated by tests)
    pub fn builtin() -> Self {
        Self::build(builtin_categories())
    }

    fn build(mut categories: Vec<Category>) -> Self {
        for cat in &mut categories {
            cat.sort_units();
        }
        tracing::debug!(categories = categories.len(), "unit registry built");
        UnitRegistry { categories }
    }

    /// Category names in declaration order
    pub fn categories(&self) -> Vec<&str> {
        self.categories.iter().map(|c| c.name.as_str()).collect()
    }

    /// Look up a category by exact name
    pub fn category(&self, name: &str) -> Result<&Category, ConvertError> {
        self.categories.iter()
            .find(|c| c.name == name)
            .ok_or_else(|| ConvertError::unknown_category(name, &self.categories()))
    }

    /// Unit symbols of a category, sorted by symbol
    pub fn units_of(&self, category: &str) -> Result<Vec<&str>, ConvertError> {
        Ok(self.category(category)?.symbols())
    }

    /// Look up a unit within a category
    pub fn unit(&self, category: &str, symbol: &str) -> Result<UnitRef<'_>, ConvertError> {
        self.category(category)?.unit(symbol)
    }

    /// Scale factor of a unit; `None` for temperature units
    pub fn scale_factor(&self, category: &str, symbol: &str) -> Result<Option<f64>, ConvertError> {
        Ok(self.unit(category, symbol)?.factor())
    }

    pub fn is_temperature(&self, category: &str) -> Result<bool, ConvertError> {
        Ok(self.category(category)?.is_temperature())
    }
}

impl Default for UnitRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

fn validate(categories: &[Category]) -> Result<(), RegistryError> {
    let mut names = HashSet::new();
    for cat in categories {
        if !names.insert(cat.name.as_str()) {
            return Err(RegistryError::DuplicateCategory(cat.name.clone()));
        }
        if cat.is_empty() {
            return Err(RegistryError::EmptyCategory(cat.name.clone()));
        }

        let mut symbols = HashSet::new();
        for unit in cat.units() {
            if !symbols.insert(unit.symbol()) {
                return Err(RegistryError::DuplicateUnit {
                    category: cat.name.clone(),
                    unit: unit.symbol().to_string(),
                });
            }
        }

        if let CategoryKind::Linear(units) = &cat.kind {
            if let Some(bad) = units.iter().find(|u| !(u.factor.is_finite() && u.factor > 0.0)) {
                return Err(RegistryError::InvalidFactor {
                    category: cat.name.clone(),
                    unit: bad.symbol.clone(),
                    factor: bad.factor,
                });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TemperatureScale;
    use gauge_core::codes;

    #[test]
    fn test_builtin_table_is_valid() {
        assert!(UnitRegistry::new(builtin_categories()).is_ok());
    }

    #[test]
    fn test_categories_in_declaration_order() {
        assert_eq!(UNITS.categories(), vec!["Length", "Mass", "Volume", "Area", "Temperature"]);
        assert_eq!(UNITS.categories(), UNITS.categories());
    }

    #[test]
    fn test_units_sorted_by_symbol() {
        assert_eq!(
            UNITS.units_of("Length").unwrap(),
            vec!["cm", "ft", "in", "km", "m", "mile", "mm", "nmi", "yd"]
        );
        assert_eq!(UNITS.units_of("Temperature").unwrap(), vec!["C", "F", "K"]);
        // Uppercase sorts before lowercase
        assert_eq!(UNITS.units_of("Volume").unwrap()[0], "L");
    }

    #[test]
    fn test_unknown_category() {
        let err = UNITS.units_of("Speed").unwrap_err();
        assert_eq!(err.code(), codes::UNKNOWN_CATEGORY);
        assert!(err.suggestion().unwrap().contains("Temperature"));
    }

    #[test]
    fn test_scale_factor() {
        assert_eq!(UNITS.scale_factor("Length", "ft").unwrap(), Some(0.3048));
        assert_eq!(UNITS.scale_factor("Mass", "kg").unwrap(), Some(1.0));
        assert_eq!(UNITS.scale_factor("Temperature", "K").unwrap(), None);
        assert_eq!(UNITS.scale_factor("Length", "kg").unwrap_err().code(), codes::UNKNOWN_UNIT);
    }

    #[test]
    fn test_is_temperature() {
        assert!(UNITS.is_temperature("Temperature").unwrap());
        assert!(!UNITS.is_temperature("Area").unwrap());
        assert!(UNITS.is_temperature("temperature").is_err());
    }

    #[test]
    fn test_rejects_empty_category() {
        let err = UnitRegistry::new(vec![Category::linear("Void", &[])]).unwrap_err();
        assert_eq!(err, RegistryError::EmptyCategory("Void".to_string()));
    }

    #[test]
    fn test_rejects_duplicate_unit() {
        let err = UnitRegistry::new(vec![
            Category::linear("Length", &[("m", "meter", 1.0), ("m", "metre", 1.0)]),
        ]).unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateUnit { ref unit, .. } if unit == "m"));
    }

    #[test]
    fn test_rejects_duplicate_category() {
        let err = UnitRegistry::new(vec![
            Category::temperature("Temperature", &[TemperatureScale::Celsius]),
            Category::temperature("Temperature", &[TemperatureScale::Kelvin]),
        ]).unwrap_err();
        assert_eq!(err, RegistryError::DuplicateCategory("Temperature".to_string()));
    }

    #[test]
    fn test_rejects_non_positive_factor() {
        for factor in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let result = UnitRegistry::new(vec![
                Category::linear("Length", &[("m", "meter", 1.0), ("x", "broken", factor)]),
            ]);
            assert!(matches!(result, Err(RegistryError::InvalidFactor { .. })), "factor {}", factor);
        }
    }
}
