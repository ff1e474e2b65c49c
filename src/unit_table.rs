//! # Unit Table
//!
//! This module is the single source of truth for measurement units: it maps
//! natural-language unit spellings onto canonical units and carries the
//! per-family factors used to convert quantities between compatible units.
//!
//! ## Families
//!
//! - **Weight**: base unit is the gram
//! - **Volume**: base unit is the milliliter
//! - **Count**: no numeric conversion; every count unit only converts to itself
//!
//! ## Usage
//!
//! ```rust
//! use pantry_reconcile::unit_table::{convert_unit, normalize_unit};
//!
//! assert_eq!(normalize_unit("Pounds"), Some("lb".to_string()));
//! assert_eq!(normalize_unit("handful"), Some("handful".to_string()));
//! assert_eq!(normalize_unit("   "), None);
//!
//! let grams = convert_unit(2.0, "kg", "g");
//! assert_eq!(grams, Some(2000.0));
//! assert_eq!(convert_unit(1.0, "kg", "cup"), None);
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;
use thiserror::Error;
use tracing::trace;

/// Group of units that share a base unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitFamily {
    /// Mass units, base unit gram
    Weight,
    /// Volume units, base unit milliliter
    Volume,
    /// Discrete counts (pieces, cans, cloves...)
    Count,
}

/// Static description of a canonical unit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitDefinition {
    /// Canonical key (e.g. "lb", "tbsp", "pcs")
    pub canonical_key: &'static str,
    /// Family the unit belongs to
    pub family: UnitFamily,
    /// Number of family base units in one of this unit (1.0 for counts)
    pub base_factor: f64,
}

/// Measurement unit after normalization
///
/// Every recognized spelling maps onto one of the named variants. Anything
/// else is kept verbatim (lower-cased, trimmed) in [`Unit::Other`] so it still
/// has a stable identity, but it never converts to another unit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Unit {
    // Weight units
    /// Milligrams
    Milligrams,
    /// Grams
    Grams,
    /// Kilograms
    Kilograms,
    /// Ounces (weight)
    Ounces,
    /// Pounds
    Pounds,

    // Volume units
    /// Milliliters
    Milliliters,
    /// Liters
    Liters,
    /// Teaspoons
    Teaspoons,
    /// Tablespoons
    Tablespoons,
    /// Fluid ounces
    FluidOunces,
    /// Cups
    Cups,
    /// Pints
    Pints,
    /// Quarts
    Quarts,
    /// Gallons
    Gallons,

    // Count units
    /// Individual pieces/items
    Pieces,
    /// Cans
    Cans,
    /// Bunches (herbs, greens)
    Bunches,
    /// Heads (lettuce, garlic)
    Heads,
    /// Cloves (garlic)
    Cloves,
    /// Dozen
    Dozen,
    /// Packages/packets
    Packages,
    /// Bottles
    Bottles,
    /// Slices
    Slices,
    /// Pinches
    Pinches,
    /// Dashes
    Dashes,

    /// Unrecognized unit text, lower-cased and trimmed
    Other(String),
}

/// Error returned when building a [`Unit`] from blank text
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unit text is empty")]
pub struct EmptyUnitError;

/// Spelling variants and their canonical units
static UNIT_MAPPINGS: LazyLock<HashMap<&'static str, Unit>> = LazyLock::new(|| {
    let mut map = HashMap::new();

    // Weight units
    map.insert("mg", Unit::Milligrams);
    map.insert("milligram", Unit::Milligrams);
    map.insert("milligrams", Unit::Milligrams);
    map.insert("g", Unit::Grams);
    map.insert("gr", Unit::Grams);
    map.insert("gram", Unit::Grams);
    map.insert("grams", Unit::Grams);
    map.insert("gramme", Unit::Grams);
    map.insert("grammes", Unit::Grams);
    map.insert("kg", Unit::Kilograms);
    map.insert("kgs", Unit::Kilograms);
    map.insert("kilo", Unit::Kilograms);
    map.insert("kilos", Unit::Kilograms);
    map.insert("kilogram", Unit::Kilograms);
    map.insert("kilograms", Unit::Kilograms);
    map.insert("kilogramme", Unit::Kilograms);
    map.insert("kilogrammes", Unit::Kilograms);
    map.insert("oz", Unit::Ounces);
    map.insert("ounce", Unit::Ounces);
    map.insert("ounces", Unit::Ounces);
    map.insert("lb", Unit::Pounds);
    map.insert("lbs", Unit::Pounds);
    map.insert("pound", Unit::Pounds);
    map.insert("pounds", Unit::Pounds);

    // Volume units
    map.insert("ml", Unit::Milliliters);
    map.insert("milliliter", Unit::Milliliters);
    map.insert("milliliters", Unit::Milliliters);
    map.insert("millilitre", Unit::Milliliters);
    map.insert("millilitres", Unit::Milliliters);
    map.insert("l", Unit::Liters);
    map.insert("liter", Unit::Liters);
    map.insert("liters", Unit::Liters);
    map.insert("litre", Unit::Liters);
    map.insert("litres", Unit::Liters);
    map.insert("tsp", Unit::Teaspoons);
    map.insert("teaspoon", Unit::Teaspoons);
    map.insert("teaspoons", Unit::Teaspoons);
    map.insert("tbsp", Unit::Tablespoons);
    map.insert("tbs", Unit::Tablespoons);
    map.insert("tablespoon", Unit::Tablespoons);
    map.insert("tablespoons", Unit::Tablespoons);
    map.insert("fl oz", Unit::FluidOunces);
    map.insert("floz", Unit::FluidOunces);
    map.insert("fluid ounce", Unit::FluidOunces);
    map.insert("fluid ounces", Unit::FluidOunces);
    map.insert("cup", Unit::Cups);
    map.insert("cups", Unit::Cups);
    map.insert("pint", Unit::Pints);
    map.insert("pints", Unit::Pints);
    map.insert("pt", Unit::Pints);
    map.insert("quart", Unit::Quarts);
    map.insert("quarts", Unit::Quarts);
    map.insert("qt", Unit::Quarts);
    map.insert("gallon", Unit::Gallons);
    map.insert("gallons", Unit::Gallons);
    map.insert("gal", Unit::Gallons);

    // Count units
    map.insert("pc", Unit::Pieces);
    map.insert("pcs", Unit::Pieces);
    map.insert("piece", Unit::Pieces);
    map.insert("pieces", Unit::Pieces);
    map.insert("unit", Unit::Pieces);
    map.insert("units", Unit::Pieces);
    map.insert("item", Unit::Pieces);
    map.insert("items", Unit::Pieces);
    map.insert("can", Unit::Cans);
    map.insert("cans", Unit::Cans);
    map.insert("bunch", Unit::Bunches);
    map.insert("bunches", Unit::Bunches);
    map.insert("head", Unit::Heads);
    map.insert("heads", Unit::Heads);
    map.insert("clove", Unit::Cloves);
    map.insert("cloves", Unit::Cloves);
    map.insert("dozen", Unit::Dozen);
    map.insert("doz", Unit::Dozen);
    map.insert("package", Unit::Packages);
    map.insert("packages", Unit::Packages);
    map.insert("pkg", Unit::Packages);
    map.insert("packet", Unit::Packages);
    map.insert("packets", Unit::Packages);
    map.insert("bottle", Unit::Bottles);
    map.insert("bottles", Unit::Bottles);
    map.insert("slice", Unit::Slices);
    map.insert("slices", Unit::Slices);
    map.insert("pinch", Unit::Pinches);
    map.insert("pinches", Unit::Pinches);
    map.insert("dash", Unit::Dashes);
    map.insert("dashes", Unit::Dashes);

    // French kitchen units
    map.insert("cuillère à soupe", Unit::Tablespoons);
    map.insert("cuillères à soupe", Unit::Tablespoons);
    map.insert("cas", Unit::Tablespoons);
    map.insert("cuillère à café", Unit::Teaspoons);
    map.insert("cuillères à café", Unit::Teaspoons);
    map.insert("cac", Unit::Teaspoons);
    map.insert("tasse", Unit::Cups);
    map.insert("tasses", Unit::Cups);
    map.insert("pièce", Unit::Pieces);
    map.insert("pièces", Unit::Pieces);
    map.insert("gousse", Unit::Cloves);
    map.insert("gousses", Unit::Cloves);
    map.insert("boîte", Unit::Cans);
    map.insert("boîtes", Unit::Cans);
    map.insert("bouteille", Unit::Bottles);
    map.insert("bouteilles", Unit::Bottles);

    map
});

impl Unit {
    /// Normalize free unit text into a [`Unit`]
    ///
    /// Returns `None` for blank text. Recognized spellings (case-insensitive,
    /// trailing abbreviation periods ignored) map to their canonical unit;
    /// anything else comes back as [`Unit::Other`].
    pub fn parse(text: &str) -> Option<Unit> {
        let cleaned = collapse_whitespace(&text.to_lowercase());
        if cleaned.is_empty() {
            return None;
        }

        match Unit::lookup(&cleaned) {
            Some(unit) => Some(unit),
            None => {
                trace!(unit = %cleaned, "Passing unrecognized unit through");
                Some(Unit::Other(cleaned))
            }
        }
    }

    /// Look up a spelling in the unit table, returning only recognized units
    pub fn lookup(text: &str) -> Option<Unit> {
        let key = text
            .split_whitespace()
            .map(|word| word.trim_end_matches('.'))
            .filter(|word| !word.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase();
        if key.is_empty() {
            return None;
        }

        if let Some(unit) = UNIT_MAPPINGS.get(key.as_str()) {
            return Some(unit.clone());
        }

        // Try without pluralization
        let singular = key.strip_suffix('s').filter(|s| !s.is_empty())?;
        UNIT_MAPPINGS.get(singular).cloned()
    }

    /// Static definition for recognized units, `None` for [`Unit::Other`]
    pub fn definition(&self) -> Option<UnitDefinition> {
        use UnitFamily::{Count, Volume, Weight};

        let (canonical_key, family, base_factor) = match self {
            Unit::Milligrams => ("mg", Weight, 0.001),
            Unit::Grams => ("g", Weight, 1.0),
            Unit::Kilograms => ("kg", Weight, 1000.0),
            Unit::Ounces => ("oz", Weight, 28.3495),
            Unit::Pounds => ("lb", Weight, 453.592),
            Unit::Milliliters => ("ml", Volume, 1.0),
            Unit::Liters => ("l", Volume, 1000.0),
            Unit::Teaspoons => ("tsp", Volume, 4.92892),
            Unit::Tablespoons => ("tbsp", Volume, 14.7868),
            Unit::FluidOunces => ("fl oz", Volume, 29.5735),
            Unit::Cups => ("cup", Volume, 236.588),
            Unit::Pints => ("pint", Volume, 473.176),
            Unit::Quarts => ("quart", Volume, 946.353),
            Unit::Gallons => ("gallon", Volume, 3785.41),
            Unit::Pieces => ("pcs", Count, 1.0),
            Unit::Cans => ("can", Count, 1.0),
            Unit::Bunches => ("bunch", Count, 1.0),
            Unit::Heads => ("head", Count, 1.0),
            Unit::Cloves => ("clove", Count, 1.0),
            Unit::Dozen => ("dozen", Count, 1.0),
            Unit::Packages => ("package", Count, 1.0),
            Unit::Bottles => ("bottle", Count, 1.0),
            Unit::Slices => ("slice", Count, 1.0),
            Unit::Pinches => ("pinch", Count, 1.0),
            Unit::Dashes => ("dash", Count, 1.0),
            Unit::Other(_) => return None,
        };

        Some(UnitDefinition {
            canonical_key,
            family,
            base_factor,
        })
    }

    /// Canonical key for this unit (the raw text for [`Unit::Other`])
    pub fn canonical_key(&self) -> &str {
        match self {
            Unit::Other(raw) => raw,
            known => known.definition().map_or("", |def| def.canonical_key),
        }
    }

    /// Family of a recognized unit
    pub fn family(&self) -> Option<UnitFamily> {
        self.definition().map(|def| def.family)
    }

    /// Whether the unit came from the spelling table
    pub fn is_known(&self) -> bool {
        !matches!(self, Unit::Other(_))
    }

    /// Every recognized canonical unit, weight first, then volume, then count
    pub fn known_units() -> [Unit; 25] {
        [
            Unit::Milligrams,
            Unit::Grams,
            Unit::Kilograms,
            Unit::Ounces,
            Unit::Pounds,
            Unit::Milliliters,
            Unit::Liters,
            Unit::Teaspoons,
            Unit::Tablespoons,
            Unit::FluidOunces,
            Unit::Cups,
            Unit::Pints,
            Unit::Quarts,
            Unit::Gallons,
            Unit::Pieces,
            Unit::Cans,
            Unit::Bunches,
            Unit::Heads,
            Unit::Cloves,
            Unit::Dozen,
            Unit::Packages,
            Unit::Bottles,
            Unit::Slices,
            Unit::Pinches,
            Unit::Dashes,
        ]
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.canonical_key())
    }
}

impl From<Unit> for String {
    fn from(unit: Unit) -> Self {
        unit.canonical_key().to_string()
    }
}

impl TryFrom<String> for Unit {
    type Error = EmptyUnitError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Unit::parse(&value).ok_or(EmptyUnitError)
    }
}

/// Normalize unit text to its canonical key
///
/// `"lbs"`, `"pound"` and `"pounds"` all give `"lb"`. Unknown non-empty text
/// passes through lower-cased and trimmed; blank text gives `None`.
pub fn normalize_unit(text: &str) -> Option<String> {
    Unit::parse(text).map(|unit| unit.canonical_key().to_string())
}

/// Convert a quantity between two already-normalized units
///
/// Identical units return `qty` untouched. Weight↔weight and volume↔volume go
/// through the family base unit. Everything else (cross-family pairs, two
/// different count units, unrecognized units) yields `None`.
pub fn convert_quantity(qty: f64, from: &Unit, to: &Unit) -> Option<f64> {
    if from == to {
        return Some(qty);
    }

    let from_def = from.definition()?;
    let to_def = to.definition()?;

    match (from_def.family, to_def.family) {
        (UnitFamily::Weight, UnitFamily::Weight) | (UnitFamily::Volume, UnitFamily::Volume) => {
            Some(qty * from_def.base_factor / to_def.base_factor)
        }
        _ => None,
    }
}

/// Convert a quantity between two unit spellings
///
/// Both spellings are normalized first; see [`convert_quantity`].
pub fn convert_unit(qty: f64, from_unit: &str, to_unit: &str) -> Option<f64> {
    let from = Unit::parse(from_unit)?;
    let to = Unit::parse(to_unit)?;
    convert_quantity(qty, &from, &to)
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
