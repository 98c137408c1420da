//! Unit selection helpers for form-style callers

use serde::{Deserialize, Serialize};
use gauge_core::ConvertError;
use crate::UnitRegistry;

/// Exchange two values
pub fn swap<T>(a: T, b: T) -> (T, T) {
    (b, a)
}

/// The currently selected source and target units
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitPair {
    pub from: String,
    pub to: String,
}

impl UnitPair {
    pub fn new(from: &str, to: &str) -> Self {
        UnitPair { from: from.to_string(), to: to.to_string() }
    }

    /// The same pair with source and target exchanged
    pub fn swapped(self) -> Self {
        let (from, to) = swap(self.from, self.to);
        UnitPair { from, to }
    }
}

/// Valid units for a category plus the default selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitChoices {
    pub category: String,
    pub options: Vec<String>,
    pub pair: UnitPair,
}

/// Recompute unit choices after a category change
///
/// The pair is reset to the first two options in registry order, or to
/// the only option twice when the category has a single unit.
pub fn refresh_units(registry: &UnitRegistry, category: &str) -> Result<UnitChoices, ConvertError> {
    let options = registry.units_of(category)?;
    let first = options[0];
    let second = options.get(1).copied().unwrap_or(first);

    Ok(UnitChoices {
        category: category.to_string(),
        pair: UnitPair::new(first, second),
        options: options.into_iter().map(str::to_string).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Category, TemperatureScale, UNITS};

    #[test]
    fn test_swap() {
        assert_eq!(swap("m", "ft"), ("ft", "m"));
        assert_eq!(swap(1, 1), (1, 1));
    }

    #[test]
    fn test_pair_swapped() {
        let pair = UnitPair::new("kg", "lb").swapped();
        assert_eq!(pair, UnitPair::new("lb", "kg"));
        assert_eq!(pair.swapped(), UnitPair::new("kg", "lb"));
    }

    #[test]
    fn test_refresh_picks_two_distinct_units() {
        for category in UNITS.categories() {
            let choices = refresh_units(&UNITS, category).unwrap();
            assert_ne!(choices.pair.from, choices.pair.to, "{}", category);
            assert_eq!(choices.pair.from, choices.options[0]);
            assert_eq!(choices.pair.to, choices.options[1]);
        }
    }

    #[test]
    fn test_refresh_temperature() {
        let choices = refresh_units(&UNITS, "Temperature").unwrap();
        assert_eq!(choices.options, vec!["C", "F", "K"]);
        assert_eq!(choices.pair, UnitPair::new("C", "F"));
    }

    #[test]
    fn test_refresh_single_unit_category() {
        let registry = UnitRegistry::new(vec![
            Category::linear("Length", &[("m", "meter", 1.0), ("ft", "foot", 0.3048)]),
            Category::temperature("Absolute", &[TemperatureScale::Kelvin]),
        ]).unwrap();

        let choices = refresh_units(&registry, "Absolute").unwrap();
        assert_eq!(choices.options, vec!["K"]);
        assert_eq!(choices.pair, UnitPair::new("K", "K"));
    }

    #[test]
    fn test_refresh_unknown_category() {
        assert!(refresh_units(&UNITS, "Speed").is_err());
    }
}
