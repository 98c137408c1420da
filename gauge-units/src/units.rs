//! Built-in unit table
//!
//! One canonical table. Linear factors express "1 unit = factor × base";
//! the base of each category has factor 1.

use crate::{Category, TemperatureScale};

pub const LENGTH: &str = "Length";
pub const MASS: &str = "Mass";
pub const VOLUME: &str = "Volume";
pub const AREA: &str = "Area";
pub const TEMPERATURE: &str = "Temperature";

/// All built-in categories, in display order
pub fn builtin_categories() -> Vec<Category> {
    vec![
        length_units(),
        mass_units(),
        volume_units(),
        area_units(),
        temperature_units(),
    ]
}

fn length_units() -> Category {
    // base: meter
    Category::linear(LENGTH, &[
        ("m", "meter", 1.0),
        ("cm", "centimeter", 0.01),
        ("mm", "millimeter", 0.001),
        ("km", "kilometer", 1000.0),
        ("in", "inch", 0.0254),
        ("ft", "foot", 0.3048),
        ("yd", "yard", 0.9144),
        ("mile", "mile", 1609.344),
        ("nmi", "nautical mile", 1852.0),
    ])
}

fn mass_units() -> Category {
    // base: kilogram
    Category::linear(MASS, &[
        ("kg", "kilogram", 1.0),
        ("g", "gram", 0.001),
        ("mg", "milligram", 1e-6),
        ("lb", "pound", 0.45359237),
        ("oz", "ounce", 0.028349523125),
        ("tonne", "tonne", 1000.0),
        ("stone", "stone", 6.35029318),
    ])
}

fn volume_units() -> Category {
    // base: liter; cup is the 240 mL metric-style cup
    Category::linear(VOLUME, &[
        ("L", "liter", 1.0),
        ("mL", "milliliter", 0.001),
        ("m^3", "cubic meter", 1000.0),
        ("gal", "US gallon", 3.785411784),
        ("qt", "US quart", 0.946352946),
        ("pt", "US pint", 0.473176473),
        ("cup", "cup", 0.24),
        ("fl oz", "US fluid ounce", 0.0295735295625),
    ])
}

fn area_units() -> Category {
    // base: square meter
    Category::linear(AREA, &[
        ("m²", "square meter", 1.0),
        ("cm²", "square centimeter", 0.0001),
        ("mm²", "square millimeter", 1e-6),
        ("km²", "square kilometer", 1_000_000.0),
        ("ft²", "square foot", 0.092903),
        ("in²", "square inch", 0.00064516),
        ("yd²", "square yard", 0.836127),
        ("acre", "acre", 4046.8564224),
        ("hectare", "hectare", 10_000.0),
    ])
}

fn temperature_units() -> Category {
    Category::temperature(TEMPERATURE, &[
        TemperatureScale::Celsius,
        TemperatureScale::Fahrenheit,
        TemperatureScale::Kelvin,
    ])
}
