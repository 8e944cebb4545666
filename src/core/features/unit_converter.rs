//! Unit converter feature
//!
//! Conversion arithmetic over the static [`catalog`], plus the
//! [`ConversionEngine`] that records every successful conversion in history.

pub mod catalog;
pub mod format;
pub mod parsing;

use std::sync::Arc;

use chrono::{Local, Utc};
use tracing::{debug, warn};

pub use catalog::{TemperatureScale, UnitDef, UnitRule};
pub use format::format_number;
pub use parsing::{parse_quantity, parse_value, PROMPT_ENTER_VALUE};

use crate::core::history::{HistoryManager, KeyValueStore};
use crate::shared::errors::{CommandError, CommandResult};
use crate::shared::types::{Category, ConversionRecord, ConvertUnitsResponse, UnitDTO};

// ============================================================================
// Conversion Arithmetic
// ============================================================================

fn to_celsius(value: f64, scale: TemperatureScale) -> f64 {
    match scale {
        TemperatureScale::Celsius => value,
        TemperatureScale::Fahrenheit => (value - 32.0) * 5.0 / 9.0,
        TemperatureScale::Kelvin => value - 273.15,
    }
}

fn from_celsius(celsius: f64, scale: TemperatureScale) -> f64 {
    match scale {
        TemperatureScale::Celsius => celsius,
        TemperatureScale::Fahrenheit => (celsius * 9.0 / 5.0) + 32.0,
        TemperatureScale::Kelvin => celsius + 273.15,
    }
}

/// Convert `value` between two units of `category`.
///
/// Linear units go through the category base (`value * from / to`);
/// temperatures go through Celsius. Identical units return `value` unchanged.
pub fn convert_value(category: Category, value: f64, from_unit: &str, to_unit: &str) -> CommandResult<f64> {
    let from_def = catalog::lookup_unit(category, from_unit)?;
    let to_def = catalog::lookup_unit(category, to_unit)?;

    // Same unit, no conversion needed
    if from_unit == to_unit {
        return Ok(value);
    }

    match (from_def.rule, to_def.rule) {
        (UnitRule::Linear { factor: from_factor }, UnitRule::Linear { factor: to_factor }) => {
            Ok(value * from_factor / to_factor)
        }
        (UnitRule::Temperature(from_scale), UnitRule::Temperature(to_scale)) => {
            Ok(from_celsius(to_celsius(value, from_scale), to_scale))
        }
        _ => Err(CommandError::InvalidUnit(format!(
            "Cannot convert {} to {}",
            from_unit, to_unit
        ))),
    }
}

/// Exchange source and target units
pub fn swap<'a>(from_unit: &'a str, to_unit: &'a str) -> (&'a str, &'a str) {
    (to_unit, from_unit)
}

// ============================================================================
// Conversion Engine
// ============================================================================

/// A completed conversion
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    pub record: ConversionRecord,
    pub formatted_result: String,
    /// Whether the updated history reached durable storage
    pub persisted: bool,
}

impl Conversion {
    pub fn response(&self) -> ConvertUnitsResponse {
        ConvertUnitsResponse {
            result: self.record.to_value,
            formatted_result: self.formatted_result.clone(),
            from_unit: self.record.from_unit.clone(),
            to_unit: self.record.to_unit.clone(),
        }
    }
}

/// Converts values and owns the conversion history
pub struct ConversionEngine {
    history: HistoryManager,
    last_id: u64,
}

impl ConversionEngine {
    /// Create an engine, loading any history already in `store`
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        let history = HistoryManager::load(store);
        let last_id = history.records().iter().map(|r| r.id).max().unwrap_or(0);
        Self { history, last_id }
    }

    /// Creation time in milliseconds, bumped past the previous id on collision
    fn next_id(&mut self) -> u64 {
        let now = u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0);
        self.last_id = now.max(self.last_id.saturating_add(1));
        self.last_id
    }

    /// Convert a value and record it in history.
    ///
    /// Fails with `InvalidInput` for a non-finite value or result and
    /// `InvalidUnit` for unknown keys. Failed conversions leave history untouched.
    pub fn convert(
        &mut self,
        category: Category,
        value: f64,
        from_unit: &str,
        to_unit: &str,
    ) -> CommandResult<Conversion> {
        if !value.is_finite() {
            return Err(CommandError::InvalidInput(format!("{} is not a finite number", value)));
        }

        let result = convert_value(category, value, from_unit, to_unit)?;
        // JSON has no infinity; such a record would poison the persisted log
        if !result.is_finite() {
            return Err(CommandError::InvalidInput(format!(
                "{} {} is out of range in {}",
                value, from_unit, to_unit
            )));
        }

        let from_def = catalog::lookup_unit(category, from_unit)?;
        let to_def = catalog::lookup_unit(category, to_unit)?;

        let record = ConversionRecord {
            id: self.next_id(),
            category,
            from_value: value,
            from_unit: from_def.key.to_string(),
            to_value: result,
            to_unit: to_def.key.to_string(),
            from_unit_name: from_def.name.to_string(),
            to_unit_name: to_def.name.to_string(),
            timestamp: ConversionRecord::format_timestamp(&Local::now()),
        };

        debug!(
            "[convert] {} {} → {} {} ({})",
            value, from_unit, result, to_unit, category
        );

        let persisted = match self.history.append(record.clone()) {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "conversion recorded in memory only");
                false
            }
        };

        Ok(Conversion {
            formatted_result: format_number(result),
            record,
            persisted,
        })
    }

    /// Parse raw user input, then convert. Empty or non-numeric input is
    /// rejected before the engine runs, so history is unchanged.
    pub fn convert_text(
        &mut self,
        category: Category,
        input: &str,
        from_unit: &str,
        to_unit: &str,
    ) -> CommandResult<Conversion> {
        let value = parse_value(input)?;
        self.convert(category, value, from_unit, to_unit)
    }

    /// Convert free text such as "12 km" into `to_unit`
    pub fn convert_quick(&mut self, text: &str, to_unit: &str) -> CommandResult<Conversion> {
        let parsed = parse_quantity(text)?;
        let target = parsing::normalize_unit(to_unit).unwrap_or(to_unit);
        self.convert(parsed.category, parsed.amount, &parsed.unit, target)
    }

    pub fn swap<'a>(&self, from_unit: &'a str, to_unit: &'a str) -> (&'a str, &'a str) {
        swap(from_unit, to_unit)
    }

    /// Conversion history, newest first
    pub fn history(&self) -> &[ConversionRecord] {
        self.history.records()
    }

    pub fn clear_history(&mut self) -> CommandResult<()> {
        self.history.clear()
    }

    pub fn list_categories(&self) -> Vec<Category> {
        catalog::list_categories()
    }

    pub fn list_units(&self, category: Category) -> Vec<UnitDTO> {
        catalog::unit_dtos(category)
    }
}
