//! Gauge Units - Unit registry and conversion engine
//!
//! Converts a value between units of the same category. Linear categories
//! scale through a base unit; temperature is converted through Celsius.
//!
//! Categories:
//! - Length (m, cm, mm, km, in, ft, yd, mile, nmi)
//! - Mass (kg, g, mg, lb, oz, tonne, stone)
//! - Volume (L, mL, m^3, gal, qt, pt, cup, fl oz)
//! - Area (m², cm², mm², km², ft², in², yd², acre, hectare)
//! - Temperature (C, F, K)

mod temperature;
mod unit;
mod category;
mod registry;
mod convert;
mod selection;
pub mod units;

pub use temperature::{TemperatureScale, KELVIN_OFFSET};
pub use unit::{LinearUnit, AffineUnit, UnitRef};
pub use category::{Category, CategoryKind};
pub use registry::{UnitRegistry, RegistryError, UNITS};
pub use convert::{
    convert, render, is_error_display,
    Conversion, ConversionRequest, ERROR_MARKER,
};
pub use selection::{swap, refresh_units, UnitPair, UnitChoices};

pub use gauge_core::{ConvertError, Decimals, RawValue};
