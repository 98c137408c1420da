//! Gauge Core - Fundamental types
//!
//! This crate provides the types shared by the conversion engine and its
//! callers:
//! - `ConvertError`: structured errors with stable codes and suggestions
//! - `RawValue`: a value as typed into a form, before parsing
//! - `Decimals`: bounded decimal-place count
//! - `repr` / `format_fixed`: number display

mod error;
mod number;

pub use error::{ConvertError, ErrorReport, codes};
pub use number::{RawValue, Decimals, MAX_DECIMALS, parse_value, repr, format_fixed};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{ConvertError, RawValue, Decimals};
    pub use crate::error::codes;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_value_display_round_trip() {
        // Echoing a parsed value uses repr, not the raw text
        let raw = RawValue::from("  2 ");
        let value = raw.parse().unwrap();
        assert_eq!(repr(value), "2.0");
        assert_eq!(raw.to_string(), "  2 ");
    }

    #[test]
    fn test_invalid_number_keeps_numeric_input() {
        let err = RawValue::from(f64::NAN).parse().unwrap_err();
        assert_eq!(err.to_string(), "Input 'nan' is not a number.");
    }
}
