//! Numeric normalisation shared by the recognizers

use std::ops::RangeInclusive;

/// Diameters outside this range are accidental matches (years, dimensions)
pub const DIAMETER_RANGE_MM: RangeInclusive<u32> = 6..=40;

/// Parse a decimal written with either `.` or `,` as separator
pub fn parse_decimal(text: &str) -> Option<f64> {
    let value: f64 = text.trim().replace(',', ".").parse().ok()?;
    (value.is_finite() && value >= 0.0).then_some(value)
}

/// Parse a decimal and round it to the nearest whole number.
///
/// Values beyond `u32::MAX` saturate, which keeps them out of every
/// plausible range instead of failing the parse.
pub fn parse_whole(text: &str) -> Option<u32> {
    parse_decimal(text).map(|v| v.round() as u32)
}

/// Whether a normalised diameter is plausible for a reinforcing bar
pub fn is_plausible_diameter(diameter_mm: u32) -> bool {
    DIAMETER_RANGE_MM.contains(&diameter_mm)
}

/// Unit written after a length value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthUnit {
    Millimetre,
    Centimetre,
    Metre,
}

impl LengthUnit {
    /// Parse a unit suffix; a missing suffix means centimetres
    pub fn from_suffix(suffix: Option<&str>) -> Option<Self> {
        match suffix.map(str::to_ascii_lowercase).as_deref() {
            None | Some("cm") => Some(Self::Centimetre),
            Some("mm") => Some(Self::Millimetre),
            Some("m") => Some(Self::Metre),
            Some(_) => None,
        }
    }

    fn centimetres_per_unit(self) -> f64 {
        match self {
            Self::Millimetre => 0.1,
            Self::Centimetre => 1.0,
            Self::Metre => 100.0,
        }
    }
}

/// Convert a length value with optional unit suffix to whole centimetres
pub fn parse_length_cm(value: &str, suffix: Option<&str>) -> Option<u32> {
    let unit = LengthUnit::from_suffix(suffix)?;
    parse_decimal(value).map(|v| (v * unit.centimetres_per_unit()).round() as u32)
}
