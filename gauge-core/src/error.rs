//! Structured conversion errors
//!
//! Only one kind of error is expected during normal use: the user typed
//! something that is not a number. Unknown units and categories mean the
//! caller offered a choice the registry never returned, so they are reported
//! as contract violations with a hint listing the valid names.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Standard error codes (machine-readable)
pub mod codes {
    pub const INVALID_NUMBER: &str = "INVALID_NUMBER";
    pub const UNKNOWN_UNIT: &str = "UNKNOWN_UNIT";
    pub const UNKNOWN_CATEGORY: &str = "UNKNOWN_CATEGORY";
    pub const DECIMALS_OUT_OF_RANGE: &str = "DECIMALS_OUT_OF_RANGE";
}

/// Error produced by registry lookups and conversions
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConvertError {
    /// The raw value could not be read as a real number
    #[error("Input '{raw}' is not a number.")]
    InvalidNumber { raw: String },

    /// The unit symbol does not belong to the category
    #[error("Unknown unit '{unit}' in category '{category}'")]
    UnknownUnit {
        unit: String,
        category: String,
        valid: Vec<String>,
    },

    /// No category with that name exists
    #[error("Unknown category '{name}'")]
    UnknownCategory { name: String, valid: Vec<String> },

    /// Decimal places outside the supported range
    #[error("Decimal places {requested} out of range 0-{max}")]
    DecimalsOutOfRange { requested: i64, max: u8 },
}

impl ConvertError {
    pub fn invalid_number(raw: impl Into<String>) -> Self {
        ConvertError::InvalidNumber { raw: raw.into() }
    }

    pub fn unknown_unit(unit: &str, category: &str, valid: &[&str]) -> Self {
        ConvertError::UnknownUnit {
            unit: unit.to_string(),
            category: category.to_string(),
            valid: valid.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn unknown_category(name: &str, valid: &[&str]) -> Self {
        ConvertError::UnknownCategory {
            name: name.to_string(),
            valid: valid.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Machine-readable code for this error
    pub fn code(&self) -> &'static str {
        match self {
            ConvertError::InvalidNumber { .. } => codes::INVALID_NUMBER,
            ConvertError::UnknownUnit { .. } => codes::UNKNOWN_UNIT,
            ConvertError::UnknownCategory { .. } => codes::UNKNOWN_CATEGORY,
            ConvertError::DecimalsOutOfRange { .. } => codes::DECIMALS_OUT_OF_RANGE,
        }
    }

    /// Suggestion for fixing the error, if one can be given
    pub fn suggestion(&self) -> Option<String> {
        match self {
            ConvertError::InvalidNumber { .. } => {
                Some("Enter a decimal number such as 12.5 or 1e3".to_string())
            }
            ConvertError::UnknownUnit { category, valid, .. } => Some(format!(
                "Valid units for {}: {}",
                category,
                valid.join(", ")
            )),
            ConvertError::UnknownCategory { valid, .. } => {
                Some(format!("Valid categories: {}", valid.join(", ")))
            }
            ConvertError::DecimalsOutOfRange { max, .. } => {
                Some(format!("Use a whole number between 0 and {}", max))
            }
        }
    }

    /// True when the error comes from user input rather than a caller bug
    pub fn is_user_error(&self) -> bool {
        matches!(self, ConvertError::InvalidNumber { .. })
    }

    /// Flatten into a serialisable report
    pub fn report(&self) -> ErrorReport {
        ErrorReport {
            code: self.code().to_string(),
            message: self.to_string(),
            suggestion: self.suggestion(),
        }
    }
}

/// Serialisable view of a [`ConvertError`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorReport {
    /// Machine-readable error code
    pub code: String,

    /// Human-readable error message
    pub message: String,

    /// Suggestion for fixing the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_number_quotes_input() {
        let err = ConvertError::invalid_number("abc");
        assert_eq!(err.to_string(), "Input 'abc' is not a number.");
        assert_eq!(err.code(), codes::INVALID_NUMBER);
        assert!(err.is_user_error());
    }

    #[test]
    fn test_unknown_unit_lists_valid_units() {
        let err = ConvertError::unknown_unit("parsec", "Length", &["m", "ft"]);
        assert!(!err.is_user_error());
        assert_eq!(err.code(), codes::UNKNOWN_UNIT);
        assert_eq!(err.suggestion().unwrap(), "Valid units for Length: m, ft");
    }

    #[test]
    fn test_report_serialization() {
        let err = ConvertError::unknown_category("Speed", &["Length", "Mass"]);
        let json = serde_json::to_value(err.report()).unwrap();
        assert_eq!(json["code"], "UNKNOWN_CATEGORY");
        assert_eq!(json["message"], "Unknown category 'Speed'");
        assert_eq!(json["suggestion"], "Valid categories: Length, Mass");
    }
}
