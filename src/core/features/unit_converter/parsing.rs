//! Input parsing: the strict numeric parser used before every conversion and
//! a lax "12 km" style parser for free text.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use super::catalog;
use crate::shared::errors::{CommandError, CommandResult};
use crate::shared::types::ParseUnitResponse;

pub const PROMPT_ENTER_VALUE: &str = "Enter a number to convert";
const ERR_CANNOT_PARSE_UNIT: &str = "Could not parse a value and unit from text";

// Number followed by a unit, with an optional second word ("12 km", "2 fl oz", "80°F")
static RE_VALUE_THEN_UNIT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([+-]?\d+(?:\.\d+)?)\s*(°?[A-Za-z][A-Za-z_\-]*)(?:\s+([A-Za-z]+))?")
        .expect("valid value-then-unit pattern")
});

// Unit followed by a number ("°C 21", "km 12")
static RE_UNIT_THEN_VALUE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(°?[A-Za-z][A-Za-z_\-]*)\s*([+-]?\d+(?:\.\d+)?)")
        .expect("valid unit-then-value pattern")
});

/// A lone comma is treated as the decimal separator ("3,5" -> "3.5")
fn normalize_decimal(text: &str) -> String {
    if !text.contains('.') && text.matches(',').count() == 1 {
        text.replace(',', ".")
    } else {
        text.to_string()
    }
}

/// Strictly parse a user-entered value.
///
/// Empty, non-numeric and non-finite input is `InvalidInput`; callers reset
/// their output to [`PROMPT_ENTER_VALUE`] and leave history untouched.
pub fn parse_value(text: &str) -> CommandResult<f64> {
    let text = text.trim();
    if text.is_empty() {
        return Err(CommandError::InvalidInput(PROMPT_ENTER_VALUE.to_string()));
    }

    let value: f64 = normalize_decimal(text)
        .parse()
        .map_err(|_| CommandError::InvalidInput(format!("'{}' is not a number", text)))?;

    if !value.is_finite() {
        return Err(CommandError::InvalidInput(format!("'{}' is not a finite number", text)));
    }
    Ok(value)
}

/// Map a unit alias onto its catalog key
pub fn normalize_unit(unit: &str) -> Option<&'static str> {
    let unit_lower = unit.trim().to_lowercase();
    let key = match unit_lower.as_str() {
        // Length
        "m" | "meter" | "meters" | "metre" | "metres" => "meter",
        "km" | "kilometer" | "kilometers" | "kilometre" | "kilometres" => "kilometer",
        "cm" | "centimeter" | "centimeters" | "centimetre" | "centimetres" => "centimeter",
        "mm" | "millimeter" | "millimeters" | "millimetre" | "millimetres" => "millimeter",
        "mi" | "mile" | "miles" => "mile",
        "yd" | "yard" | "yards" => "yard",
        "ft" | "foot" | "feet" => "foot",
        "in" | "inch" | "inches" => "inch",
        // Weight
        "kg" | "kilogram" | "kilograms" | "kilo" | "kilos" => "kilogram",
        "g" | "gram" | "grams" => "gram",
        "mg" | "milligram" | "milligrams" => "milligram",
        "t" | "ton" | "tons" | "tonne" | "tonnes" => "ton",
        "lb" | "lbs" | "pound" | "pounds" => "pound",
        "oz" | "ounce" | "ounces" => "ounce",
        // Temperature
        "c" | "°c" | "celsius" => "celsius",
        "f" | "°f" | "fahrenheit" => "fahrenheit",
        "k" | "kelvin" => "kelvin",
        // Volume
        "l" | "liter" | "liters" | "litre" | "litres" => "liter",
        "ml" | "milliliter" | "milliliters" | "millilitre" | "millilitres" => "milliliter",
        "gal" | "gallon" | "gallons" => "gallon",
        "qt" | "quart" | "quarts" => "quart",
        "pt" | "pint" | "pints" => "pint",
        "cup" | "cups" => "cup",
        "fl oz" | "fl-oz" | "floz" | "fluid_ounce" | "fluid ounce" | "fluid ounces" => "fluid_ounce",
        _ => return None,
    };
    Some(key)
}

fn quantity(amount: &str, unit: &'static str) -> Option<ParseUnitResponse> {
    let amount = amount.parse::<f64>().ok()?;
    let category = catalog::category_of(unit)?;
    Some(ParseUnitResponse { amount, unit: unit.to_string(), category })
}

/// Extract the first value/unit pair found anywhere in `text`.
///
/// Accepts "12 km", "3,5 miles", "80°F", "°C 21" and "2 fl oz to ml".
pub fn parse_quantity(text: &str) -> CommandResult<ParseUnitResponse> {
    let text = text.trim();
    if text.is_empty() {
        return Err(CommandError::InvalidInput(PROMPT_ENTER_VALUE.to_string()));
    }

    let normalized = normalize_decimal(text);

    for caps in RE_VALUE_THEN_UNIT.captures_iter(&normalized) {
        let two_words = caps
            .get(3)
            .and_then(|second| normalize_unit(&format!("{} {}", &caps[2], second.as_str())));
        let unit = two_words.or_else(|| normalize_unit(&caps[2]));

        if let Some(parsed) = unit.and_then(|unit| quantity(&caps[1], unit)) {
            debug!(amount = parsed.amount, unit = %parsed.unit, "parsed quantity from '{}'", text);
            return Ok(parsed);
        }
    }

    for caps in RE_UNIT_THEN_VALUE.captures_iter(&normalized) {
        if let Some(parsed) = normalize_unit(&caps[1]).and_then(|unit| quantity(&caps[2], unit)) {
            debug!(amount = parsed.amount, unit = %parsed.unit, "parsed quantity from '{}'", text);
            return Ok(parsed);
        }
    }

    debug!("failed to parse quantity from '{}'", text);
    Err(CommandError::InvalidInput(format!("{}: {}", ERR_CANNOT_PARSE_UNIT, text)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::types::Category;

    #[test]
    fn parse_value_accepts_numbers() {
        assert_eq!(parse_value("42").unwrap(), 42.0);
        assert_eq!(parse_value("  -3.5 ").unwrap(), -3.5);
        assert_eq!(parse_value("3,5").unwrap(), 3.5);
        assert_eq!(parse_value("1e3").unwrap(), 1000.0);
    }

    #[test]
    fn parse_value_rejects_empty_and_garbage() {
        assert_eq!(
            parse_value("   "),
            Err(CommandError::InvalidInput(PROMPT_ENTER_VALUE.to_string()))
        );
        assert!(matches!(parse_value("abc"), Err(CommandError::InvalidInput(_))));
        assert!(matches!(parse_value("12km"), Err(CommandError::InvalidInput(_))));
    }

    #[test]
    fn parse_value_rejects_non_finite() {
        assert!(matches!(parse_value("inf"), Err(CommandError::InvalidInput(_))));
        assert!(matches!(parse_value("NaN"), Err(CommandError::InvalidInput(_))));
    }

    #[test]
    fn normalize_unit_aliases() {
        assert_eq!(normalize_unit("KM"), Some("kilometer"));
        assert_eq!(normalize_unit("lbs"), Some("pound"));
        assert_eq!(normalize_unit("°C"), Some("celsius"));
        assert_eq!(normalize_unit("fl oz"), Some("fluid_ounce"));
        assert_eq!(normalize_unit("parsec"), None);
    }

    #[test]
    fn parse_quantity_value_then_unit() {
        let parsed = parse_quantity("12 km").unwrap();
        assert_eq!(parsed.amount, 12.0);
        assert_eq!(parsed.unit, "kilometer");
        assert_eq!(parsed.category, Category::Length);

        let parsed = parse_quantity("3,5 miles").unwrap();
        assert_eq!(parsed.amount, 3.5);
        assert_eq!(parsed.unit, "mile");
    }

    #[test]
    fn parse_quantity_handles_degrees_and_two_words() {
        let parsed = parse_quantity("80°F").unwrap();
        assert_eq!(parsed.amount, 80.0);
        assert_eq!(parsed.unit, "fahrenheit");
        assert_eq!(parsed.category, Category::Temperature);

        let parsed = parse_quantity("2 fl oz to ml").unwrap();
        assert_eq!(parsed.unit, "fluid_ounce");
        assert_eq!(parsed.category, Category::Volume);

        let parsed = parse_quantity("10 lbs to kg").unwrap();
        assert_eq!(parsed.unit, "pound");
    }

    #[test]
    fn parse_quantity_unit_then_value() {
        let parsed = parse_quantity("°C 21").unwrap();
        assert_eq!(parsed.amount, 21.0);
        assert_eq!(parsed.unit, "celsius");

        let parsed = parse_quantity("-40 °C").unwrap();
        assert_eq!(parsed.amount, -40.0);
    }

    #[test]
    fn parse_quantity_rejects_unknown() {
        assert!(matches!(parse_quantity("hello"), Err(CommandError::InvalidInput(_))));
        assert!(matches!(parse_quantity("12 parsecs"), Err(CommandError::InvalidInput(_))));
        assert!(matches!(parse_quantity(""), Err(CommandError::InvalidInput(_))));
    }
}
