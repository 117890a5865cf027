//! Table dimensions for a wargame scenario
//!
//! Internal storage is whole millimeters. Input in other units goes through
//! centimeters (1 in = 2.5 cm, 1 ft = 30 cm), is rounded half-up to 0.1 cm
//! and then multiplied by ten. All arithmetic is done on integers so the
//! same input always yields the same millimeter value.

use serde::Serialize;

use crate::domain::errors::{DomainError, DomainResult};

/// Smallest allowed table side (60 cm)
pub const MIN_MM: u32 = 600;
/// Largest allowed table side (300 cm)
pub const MAX_MM: u32 = 3000;

/// Largest integer part accepted when parsing a dimension
const MAX_INTEGER_DIGITS: usize = 6;

/// Immutable table dimensions in millimeters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TableSize {
    width_mm: u32,
    height_mm: u32,
}

impl TableSize {
    /// Build a table from millimeter dimensions, enforcing the size limits
    pub fn new(width_mm: u32, height_mm: u32) -> DomainResult<Self> {
        check_limit("width", width_mm)?;
        check_limit("height", height_mm)?;
        Ok(Self {
            width_mm,
            height_mm,
        })
    }

    /// Standard 4x4 ft table (120x120 cm)
    pub fn standard() -> Self {
        Self {
            width_mm: 1200,
            height_mm: 1200,
        }
    }

    /// Massive 6x4 ft table (180x120 cm)
    pub fn massive() -> Self {
        Self {
            width_mm: 1800,
            height_mm: 1200,
        }
    }

    /// Build a table from decimal dimensions in the given unit.
    ///
    /// Inputs are decimal strings with a dot separator and at most two
    /// decimal places, e.g. `"120"`, `"47.25"`.
    pub fn from_dimensions(width: &str, height: &str, unit: LengthUnit) -> DomainResult<Self> {
        let width_mm = unit.to_mm(parse_hundredths("width", width)?);
        let height_mm = unit.to_mm(parse_hundredths("height", height)?);
        Self::new(width_mm, height_mm)
    }

    pub fn from_preset(preset: TablePreset) -> Option<Self> {
        match preset {
            TablePreset::Standard => Some(Self::standard()),
            TablePreset::Massive => Some(Self::massive()),
            TablePreset::Custom => None,
        }
    }

    pub fn width_mm(&self) -> u32 {
        self.width_mm
    }

    pub fn height_mm(&self) -> u32 {
        self.height_mm
    }

    /// Width in centimeters, formatted with one decimal
    pub fn width_cm(&self) -> String {
        format_tenths(self.width_mm)
    }

    /// Height in centimeters, formatted with one decimal
    pub fn height_cm(&self) -> String {
        format_tenths(self.height_mm)
    }
}

fn check_limit(field: &str, value_mm: u32) -> DomainResult<()> {
    if value_mm < MIN_MM {
        return Err(DomainError::validation(format!(
            "{} must be at least {} cm ({} mm), got {} cm ({} mm)",
            field,
            format_tenths(MIN_MM),
            MIN_MM,
            format_tenths(value_mm),
            value_mm
        )));
    }
    if value_mm > MAX_MM {
        return Err(DomainError::validation(format!(
            "{} must be at most {} cm ({} mm), got {} cm ({} mm)",
            field,
            format_tenths(MAX_MM),
            MAX_MM,
            format_tenths(value_mm),
            value_mm
        )));
    }
    Ok(())
}

fn format_tenths(value_mm: u32) -> String {
    format!("{}.{}", value_mm / 10, value_mm % 10)
}

/// Parse a positive decimal string into hundredths of its unit
fn parse_hundredths(field: &str, raw: &str) -> DomainResult<u64> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(DomainError::validation(format!("{} cannot be empty", field)));
    }
    if value.contains(',') {
        return Err(DomainError::validation(format!(
            "{} must use dot as decimal separator, not comma",
            field
        )));
    }
    if value.starts_with('-') {
        return Err(DomainError::validation(format!(
            "{} must be positive, got: {}",
            field, value
        )));
    }

    let (integer, fraction) = match value.split_once('.') {
        Some((i, f)) => (i, f),
        None => (value, ""),
    };
    let all_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());
    if integer.is_empty() && fraction.is_empty()
        || !all_digits(integer)
        || !all_digits(fraction)
    {
        return Err(DomainError::validation(format!(
            "{} is not a valid number: {}",
            field, value
        )));
    }
    if fraction.len() > 2 {
        return Err(DomainError::validation(format!(
            "{} cannot have more than 2 decimal places: {}",
            field, value
        )));
    }
    if integer.trim_start_matches('0').len() > MAX_INTEGER_DIGITS {
        return Err(DomainError::validation(format!(
            "{} is too large: {}",
            field, value
        )));
    }

    let whole: u64 = if integer.is_empty() {
        0
    } else {
        integer
            .parse()
            .map_err(|_| DomainError::validation(format!("{} is not a valid number: {}", field, value)))?
    };
    let cents: u64 = format!("{:0<2}", fraction)
        .parse()
        .map_err(|_| DomainError::validation(format!("{} is not a valid number: {}", field, value)))?;

    let hundredths = whole * 100 + cents;
    if hundredths == 0 {
        return Err(DomainError::validation(format!(
            "{} must be positive, got: {}",
            field, value
        )));
    }
    Ok(hundredths)
}

/// Unit a table dimension is expressed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthUnit {
    Mm,
    Cm,
    In,
    Ft,
}

impl LengthUnit {
    /// Convert a value in hundredths of this unit to whole millimeters.
    ///
    /// The value is first expressed in thousandths of a centimeter, which is
    /// exact for every unit, then rounded half-up to 0.1 cm (= 1 mm).
    fn to_mm(self, hundredths: u64) -> u32 {
        let cm_thousandths = match self {
            LengthUnit::Mm => hundredths,
            LengthUnit::Cm => hundredths * 10,
            LengthUnit::In => hundredths * 25,
            LengthUnit::Ft => hundredths * 300,
        };
        let mm = (cm_thousandths + 50) / 100;
        u32::try_from(mm).unwrap_or(u32::MAX)
    }
}

impl std::fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LengthUnit::Mm => write!(f, "mm"),
            LengthUnit::Cm => write!(f, "cm"),
            LengthUnit::In => write!(f, "in"),
            LengthUnit::Ft => write!(f, "ft"),
        }
    }
}

impl std::str::FromStr for LengthUnit {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mm" => Ok(LengthUnit::Mm),
            "cm" | "" => Ok(LengthUnit::Cm),
            "in" | "inch" | "inches" => Ok(LengthUnit::In),
            "ft" | "foot" | "feet" => Ok(LengthUnit::Ft),
            other => Err(DomainError::validation(format!(
                "unknown unit '{}', must be one of: cm, ft, in, mm",
                other
            ))),
        }
    }
}

/// Named table configurations offered to callers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TablePreset {
    Standard,
    Massive,
    Custom,
}

impl TablePreset {
    pub const ALL: [TablePreset; 3] = [TablePreset::Standard, TablePreset::Massive, TablePreset::Custom];
}

impl std::fmt::Display for TablePreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TablePreset::Standard => write!(f, "standard"),
            TablePreset::Massive => write!(f, "massive"),
            TablePreset::Custom => write!(f, "custom"),
        }
    }
}

impl std::str::FromStr for TablePreset {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "standard" => Ok(TablePreset::Standard),
            "massive" => Ok(TablePreset::Massive),
            "custom" => Ok(TablePreset::Custom),
            other => Err(DomainError::validation(format!(
                "unknown table preset '{}', must be one of: custom, massive, standard",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        assert_eq!(TableSize::standard().width_mm(), 1200);
        assert_eq!(TableSize::standard().height_mm(), 1200);
        assert_eq!(TableSize::massive().width_mm(), 1800);
        assert_eq!(TableSize::massive().height_mm(), 1200);
        assert_eq!(TableSize::from_preset(TablePreset::Custom), None);
        assert_eq!(
            TableSize::from_preset(TablePreset::Massive),
            Some(TableSize::massive())
        );
    }

    #[test]
    fn test_from_dimensions_cm() {
        let table = TableSize::from_dimensions("120", "120", LengthUnit::Cm).unwrap();
        assert_eq!(table.width_mm(), 1200);
        assert_eq!(table.height_mm(), 1200);
        assert_eq!(table, TableSize::standard());
    }

    #[test]
    fn test_from_dimensions_inches_uses_wargame_factor() {
        // 48 in x 2.5 cm/in = 120.0 cm
        let table = TableSize::from_dimensions("48", "72", LengthUnit::In).unwrap();
        assert_eq!(table.width_mm(), 1200);
        assert_eq!(table.height_mm(), 1800);
    }

    #[test]
    fn test_from_dimensions_feet() {
        let table = TableSize::from_dimensions("6", "4", LengthUnit::Ft).unwrap();
        assert_eq!(table, TableSize::massive());
    }

    #[test]
    fn test_rounding_is_half_up_to_tenth_of_cm() {
        // 47.25 in = 118.125 cm -> 118.1 cm
        let table = TableSize::from_dimensions("47.25", "100", LengthUnit::In).unwrap();
        assert_eq!(table.width_mm(), 1181);
        // 100.05 cm -> 100.1 cm
        let table = TableSize::from_dimensions("100.05", "100.04", LengthUnit::Cm).unwrap();
        assert_eq!(table.width_mm(), 1001);
        assert_eq!(table.height_mm(), 1000);
    }

    #[test]
    fn test_limits() {
        assert!(TableSize::new(600, 3000).is_ok());
        assert!(TableSize::new(599, 1200).is_err());
        assert!(TableSize::new(1200, 3001).is_err());
        assert!(TableSize::from_dimensions("59.9", "100", LengthUnit::Cm).is_err());
        assert!(TableSize::from_dimensions("300", "300", LengthUnit::Cm).is_ok());
        assert!(TableSize::from_dimensions("300.1", "300", LengthUnit::Cm).is_err());
    }

    #[test]
    fn test_rejects_malformed_input() {
        assert!(TableSize::from_dimensions("", "120", LengthUnit::Cm).is_err());
        assert!(TableSize::from_dimensions("120,5", "120", LengthUnit::Cm).is_err());
        assert!(TableSize::from_dimensions("120.123", "120", LengthUnit::Cm).is_err());
        assert!(TableSize::from_dimensions("-120", "120", LengthUnit::Cm).is_err());
        assert!(TableSize::from_dimensions("abc", "120", LengthUnit::Cm).is_err());
        assert!(TableSize::from_dimensions("0", "120", LengthUnit::Cm).is_err());
        assert!(TableSize::from_dimensions("99999999999", "120", LengthUnit::Cm).is_err());
    }

    #[test]
    fn test_unit_and_preset_parsing() {
        assert_eq!("CM".parse::<LengthUnit>().unwrap(), LengthUnit::Cm);
        assert_eq!("inches".parse::<LengthUnit>().unwrap(), LengthUnit::In);
        assert!("yards".parse::<LengthUnit>().is_err());
        assert_eq!(" Massive ".parse::<TablePreset>().unwrap(), TablePreset::Massive);
        assert!("huge".parse::<TablePreset>().is_err());
    }

    #[test]
    fn test_display_helpers() {
        let table = TableSize::new(1181, 600).unwrap();
        assert_eq!(table.width_cm(), "118.1");
        assert_eq!(table.height_cm(), "60.0");
    }
}
