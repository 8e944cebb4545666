//! Unit catalog: the fixed table of categories and their units.
//!
//! Each category lists its units in canonical order with the base unit first.
//! Linear units carry a factor to the base unit; temperature units carry the
//! scale used by the affine formulas in `convert`.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::shared::errors::{CommandError, CommandResult};
use crate::shared::types::{Category, UnitDTO};

/// Temperature scales handled by formula instead of factor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemperatureScale {
    Celsius,
    Fahrenheit,
    Kelvin,
}

/// How a unit relates to its category base
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UnitRule {
    /// Multiplier converting one of this unit into the base unit
    Linear { factor: f64 },
    Temperature(TemperatureScale),
}

/// Unit definition
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitDef {
    pub key: &'static str,
    pub name: &'static str,
    pub rule: UnitRule,
}

#[derive(Debug, Clone, Copy)]
pub struct CategoryDef {
    pub category: Category,
    pub base_unit: &'static str,
    pub units: &'static [UnitDef],
}

const fn linear(key: &'static str, name: &'static str, factor: f64) -> UnitDef {
    UnitDef { key, name, rule: UnitRule::Linear { factor } }
}

const fn temperature(key: &'static str, name: &'static str, scale: TemperatureScale) -> UnitDef {
    UnitDef { key, name, rule: UnitRule::Temperature(scale) }
}

// Length (base: meter)
static LENGTH_UNITS: [UnitDef; 8] = [
    linear("meter", "Meter", 1.0),
    linear("kilometer", "Kilometer", 1000.0),
    linear("centimeter", "Centimeter", 0.01),
    linear("millimeter", "Millimeter", 0.001),
    linear("mile", "Mile", 1609.344),
    linear("yard", "Yard", 0.9144),
    linear("foot", "Foot", 0.3048),
    linear("inch", "Inch", 0.0254),
];

// Weight (base: kilogram)
static WEIGHT_UNITS: [UnitDef; 6] = [
    linear("kilogram", "Kilogram", 1.0),
    linear("gram", "Gram", 0.001),
    linear("milligram", "Milligram", 0.000001),
    linear("ton", "Metric Ton", 1000.0),
    linear("pound", "Pound", 0.45359237),
    linear("ounce", "Ounce", 0.028349523125),
];

static TEMPERATURE_UNITS: [UnitDef; 3] = [
    temperature("celsius", "Celsius", TemperatureScale::Celsius),
    temperature("fahrenheit", "Fahrenheit", TemperatureScale::Fahrenheit),
    temperature("kelvin", "Kelvin", TemperatureScale::Kelvin),
];

// Volume (base: liter), US customary measures
static VOLUME_UNITS: [UnitDef; 7] = [
    linear("liter", "Liter", 1.0),
    linear("milliliter", "Milliliter", 0.001),
    linear("gallon", "Gallon", 3.785411784),
    linear("quart", "Quart", 0.946352946),
    linear("pint", "Pint", 0.473176473),
    linear("cup", "Cup", 0.2365882365),
    linear("fluid_ounce", "Fluid Ounce", 0.0295735295625),
];

static CATALOG: [CategoryDef; 4] = [
    CategoryDef { category: Category::Length, base_unit: "meter", units: &LENGTH_UNITS },
    CategoryDef { category: Category::Weight, base_unit: "kilogram", units: &WEIGHT_UNITS },
    CategoryDef { category: Category::Temperature, base_unit: "celsius", units: &TEMPERATURE_UNITS },
    CategoryDef { category: Category::Volume, base_unit: "liter", units: &VOLUME_UNITS },
];

/// Per-category unit key index built once on first lookup
static UNIT_INDEX: Lazy<HashMap<Category, HashMap<&'static str, &'static UnitDef>>> = Lazy::new(|| {
    CATALOG
        .iter()
        .map(|def| {
            let units = def.units.iter().map(|unit| (unit.key, unit)).collect::<HashMap<_, _>>();
            (def.category, units)
        })
        .collect()
});

pub fn list_categories() -> Vec<Category> {
    CATALOG.iter().map(|def| def.category).collect()
}

pub fn category_def(category: Category) -> &'static CategoryDef {
    // CATALOG holds exactly one entry per Category variant
    match category {
        Category::Length => &CATALOG[0],
        Category::Weight => &CATALOG[1],
        Category::Temperature => &CATALOG[2],
        Category::Volume => &CATALOG[3],
    }
}

/// Unit definitions of a category in canonical declared order
pub fn units(category: Category) -> &'static [UnitDef] {
    category_def(category).units
}

/// Unit keys of a category in canonical declared order
pub fn list_units(category: Category) -> Vec<&'static str> {
    units(category).iter().map(|unit| unit.key).collect()
}

pub fn unit_dtos(category: Category) -> Vec<UnitDTO> {
    units(category)
        .iter()
        .map(|unit| UnitDTO {
            id: unit.key.to_string(),
            label: unit.name.to_string(),
            category,
        })
        .collect()
}

pub fn find_unit(category: Category, key: &str) -> Option<&'static UnitDef> {
    UNIT_INDEX.get(&category).and_then(|units| units.get(key)).copied()
}

/// Look up a unit, reporting unknown keys as `InvalidUnit`
pub fn lookup_unit(category: Category, key: &str) -> CommandResult<&'static UnitDef> {
    find_unit(category, key).ok_or_else(|| {
        CommandError::InvalidUnit(format!("'{}' is not a {} unit", key, category))
    })
}

/// Which category a unit key belongs to, if any
pub fn category_of(key: &str) -> Option<Category> {
    CATALOG
        .iter()
        .find(|def| def.units.iter().any(|unit| unit.key == key))
        .map(|def| def.category)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_category_has_its_base_first() {
        for category in Category::ALL {
            let def = category_def(category);
            assert_eq!(def.category, category);
            assert_eq!(def.units[0].key, def.base_unit);
        }
    }

    #[test]
    fn linear_base_units_have_unit_factor() {
        for category in [Category::Length, Category::Weight, Category::Volume] {
            let base = lookup_unit(category, category_def(category).base_unit).unwrap();
            assert_eq!(base.rule, UnitRule::Linear { factor: 1.0 });
        }
    }

    #[test]
    fn factors_are_strictly_positive() {
        for category in Category::ALL {
            for unit in units(category) {
                if let UnitRule::Linear { factor } = unit.rule {
                    assert!(factor > 0.0, "{} has non-positive factor", unit.key);
                }
            }
        }
    }

    #[test]
    fn temperature_units_have_no_factor() {
        for unit in units(Category::Temperature) {
            assert!(matches!(unit.rule, UnitRule::Temperature(_)));
        }
    }

    #[test]
    fn unit_keys_are_unique_across_catalog() {
        for category in Category::ALL {
            assert_eq!(UNIT_INDEX[&category].len(), units(category).len());
        }
        for category in Category::ALL {
            for key in list_units(category) {
                assert_eq!(category_of(key), Some(category));
            }
        }
    }

    #[test]
    fn list_units_keeps_declared_order() {
        assert_eq!(
            list_units(Category::Temperature),
            vec!["celsius", "fahrenheit", "kelvin"]
        );
        assert_eq!(list_units(Category::Length)[..3], ["meter", "kilometer", "centimeter"]);
    }

    #[test]
    fn unknown_unit_is_invalid_unit() {
        assert!(matches!(
            lookup_unit(Category::Length, "kilogram"),
            Err(CommandError::InvalidUnit(_))
        ));
    }

    #[test]
    fn categories_listed_in_order() {
        assert_eq!(list_categories(), Category::ALL.to_vec());
    }
}
