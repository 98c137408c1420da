//! Raw value parsing and number display
//!
//! Values arrive from a form as text or as an already-parsed number. Parsing
//! accepts the usual decimal and scientific notations (plus single
//! underscores between digits) and rejects anything that is not a finite
//! real number. Display follows the shortest round-trip representation,
//! always showing a fractional part or an exponent (`1.0`, `1e-05`,
//! `1.5e+20`) so that echoed inputs read as floating-point values.

use std::fmt;
use serde::{Deserialize, Serialize};
use crate::ConvertError;

/// Largest number of decimal places a result may be formatted with
pub const MAX_DECIMALS: u8 = 10;

/// A value as supplied by the caller, before parsing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Number(f64),
    Text(String),
}

impl RawValue {
    /// Parse into a finite real number
    pub fn parse(&self) -> Result<f64, ConvertError> {
        match self {
            RawValue::Number(n) if n.is_finite() => Ok(*n),
            RawValue::Number(_) => Err(ConvertError::invalid_number(self.to_string())),
            RawValue::Text(s) => parse_value(s),
        }
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawValue::Number(n) => write!(f, "{}", repr(*n)),
            RawValue::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<f64> for RawValue {
    fn from(n: f64) -> Self {
        RawValue::Number(n)
    }
}

impl From<i64> for RawValue {
    fn from(n: i64) -> Self {
        RawValue::Number(n as f64)
    }
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        RawValue::Text(s.to_string())
    }
}

impl From<String> for RawValue {
    fn from(s: String) -> Self {
        RawValue::Text(s)
    }
}

/// Parse text into a finite real number
///
/// Supports: "12", "-3.5", ".5", "5.", "1.5e10", "+2E-3", "1_000.25".
/// Surrounding whitespace is ignored. `nan` and `inf` are rejected, as is
/// anything that overflows to infinity.
pub fn parse_value(raw: &str) -> Result<f64, ConvertError> {
    let invalid = || ConvertError::invalid_number(raw);
    let s = raw.trim();

    let cleaned = strip_digit_separators(s).ok_or_else(invalid)?;
    let value: f64 = cleaned.parse().map_err(|_| invalid())?;

    if !value.is_finite() {
        return Err(invalid());
    }
    Ok(value)
}

/// Remove underscores that sit between two digits; any other underscore
/// makes the text invalid.
fn strip_digit_separators(s: &str) -> Option<String> {
    if !s.contains('_') {
        return Some(s.to_string());
    }

    let chars: Vec<char> = s.chars().collect();
    let mut out = String::with_capacity(s.len());
    for (i, &c) in chars.iter().enumerate() {
        if c == '_' {
            let before = i > 0 && chars[i - 1].is_ascii_digit();
            let after = chars.get(i + 1).map_or(false, |n| n.is_ascii_digit());
            if !(before && after) {
                return None;
            }
        } else {
            out.push(c);
        }
    }
    Some(out)
}

/// Shortest round-trip representation of a value.
///
/// Integral values keep a trailing `.0`; very large or very small
/// magnitudes switch to scientific notation with a signed, two-digit
/// minimum exponent.
pub fn repr(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf".to_string() } else { "-inf".to_string() };
    }

    // Debug already picks decimal form for 1e-4 <= |x| < 1e16
    let s = format!("{:?}", value);
    match s.split_once('e') {
        Some((mantissa, exp)) => {
            let (sign, digits) = match exp.strip_prefix('-') {
                Some(d) => ('-', d),
                None => ('+', exp),
            };
            format!("{}e{}{:0>2}", mantissa, sign, digits)
        }
        None => s,
    }
}

/// Fixed-point rendering with exactly `decimals` fractional digits
///
/// Rounds the exact binary value half-to-even; never uses scientific
/// notation. Zero decimals produce no decimal point.
pub fn format_fixed(value: f64, decimals: Decimals) -> String {
    format!("{:.*}", decimals.as_usize(), value)
}

/// Number of decimal places, bounded to `0..=MAX_DECIMALS`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Decimals(u8);

impl Decimals {
    pub const MAX: Decimals = Decimals(MAX_DECIMALS);

    pub fn new(places: u8) -> Result<Self, ConvertError> {
        Self::try_from(places as i64)
    }

    pub fn get(self) -> u8 {
        self.0
    }

    pub fn as_usize(self) -> usize {
        self.0 as usize
    }
}

impl Default for Decimals {
    fn default() -> Self {
        Decimals(4)
    }
}

impl TryFrom<i64> for Decimals {
    type Error = ConvertError;

    fn try_from(places: i64) -> Result<Self, Self::Error> {
        if (0..=MAX_DECIMALS as i64).contains(&places) {
            Ok(Decimals(places as u8))
        } else {
            Err(ConvertError::DecimalsOutOfRange { requested: places, max: MAX_DECIMALS })
        }
    }
}

impl From<Decimals> for u8 {
    fn from(d: Decimals) -> u8 {
        d.0
    }
}

impl fmt::Display for Decimals {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
