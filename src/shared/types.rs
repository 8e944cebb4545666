use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::shared::errors::CommandError;

// ============================================================================
// Unit Categories
// ============================================================================

/// Unit categories for type-safe conversions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Length,
    Weight,
    Temperature,
    Volume,
}

impl Category {
    /// Every category, in display order
    pub const ALL: [Category; 4] = [
        Category::Length,
        Category::Weight,
        Category::Temperature,
        Category::Volume,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Length => "length",
            Category::Weight => "weight",
            Category::Temperature => "temperature",
            Category::Volume => "volume",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "length" => Ok(Category::Length),
            "weight" | "mass" => Ok(Category::Weight),
            "temperature" | "temp" => Ok(Category::Temperature),
            "volume" => Ok(Category::Volume),
            other => Err(CommandError::InvalidInput(format!("Unknown category: {}", other))),
        }
    }
}

// ============================================================================
// History Records
// ============================================================================

/// One completed conversion. Never mutated after creation.
///
/// The serialized shape is the persisted history format, so field names are
/// camelCase and unit keys are stored as `fromUnit` / `toUnit`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionRecord {
    pub id: u64,
    pub category: Category,
    pub from_value: f64,
    pub from_unit: String,
    pub to_value: f64,
    pub to_unit: String,
    pub from_unit_name: String,
    pub to_unit_name: String,
    pub timestamp: String,
}

impl ConversionRecord {
    /// Human readable capture time stored in `timestamp`
    pub fn format_timestamp(at: &DateTime<Local>) -> String {
        at.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

// ============================================================================
// Request / Response DTOs
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConvertUnitsResponse {
    pub result: f64,
    pub formatted_result: String,
    pub from_unit: String,
    pub to_unit: String,
}

/// Unit entry exposed to callers listing a category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitDTO {
    pub id: String,
    pub label: String,
    pub category: Category,
}

/// Result of lax free-text parsing, e.g. "12 km"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParseUnitResponse {
    pub amount: f64,
    pub unit: String,
    pub category: Category,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_parses_case_insensitively() {
        assert_eq!("Length".parse::<Category>().unwrap(), Category::Length);
        assert_eq!(" volume ".parse::<Category>().unwrap(), Category::Volume);
        assert_eq!("mass".parse::<Category>().unwrap(), Category::Weight);
        assert!(matches!(
            "speed".parse::<Category>(),
            Err(CommandError::InvalidInput(_))
        ));
    }

    #[test]
    fn record_uses_persisted_field_names() {
        let record = ConversionRecord {
            id: 1,
            category: Category::Length,
            from_value: 1.0,
            from_unit: "meter".to_string(),
            to_value: 100.0,
            to_unit: "centimeter".to_string(),
            from_unit_name: "Meter".to_string(),
            to_unit_name: "Centimeter".to_string(),
            timestamp: "2024-01-01 10:00:00".to_string(),
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["category"], "length");
        assert_eq!(json["fromValue"], 1.0);
        assert_eq!(json["fromUnit"], "meter");
        assert_eq!(json["toUnitName"], "Centimeter");
    }
}
