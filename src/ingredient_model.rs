//! # Ingredient and Inventory Data Model
//!
//! This module defines the values that flow through a reconciliation call:
//! parsed recipe requirements, the caller's inventory records, and the
//! per-requirement outcomes handed back for auditing.
//!
//! ## Core Concepts
//!
//! - **ParsedIngredient**: a (quantity, unit, name) triple parsed from one requirement line
//! - **InventoryRecord**: one pantry row owned by the caller, mutated in place
//! - **DeductionOutcome**: what a single deduction did to its matched record
//! - **RequirementOutcome**: deducted or skipped, one per requirement line
//!
//! ## Usage
//!
//! ```rust
//! use pantry_reconcile::ingredient_model::{InventoryRecord, ParsedIngredient, ParseRule};
//! use pantry_reconcile::unit_table::Unit;
//!
//! let rice = InventoryRecord::new("Rice", 1.0, "kg");
//! let parsed = ParsedIngredient::new(2.0, Unit::Cups, "rice", ParseRule::Prefix);
//!
//! assert_eq!(parsed.as_triple(), (2.0, "cup", "rice"));
//! assert_eq!(rice.to_string(), "Rice: 1 kg");
//! ```

use crate::unit_table::Unit;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which parse rule produced a [`ParsedIngredient`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParseRule {
    /// Leading quantity and unit: "2 lbs chicken breast"
    Prefix,
    /// Quantity and unit in parentheses after the name: "Chicken (4 oz, sliced)"
    Parenthetical,
    /// First quantity found anywhere in the text: "Chicken Breast 4 oz cut"
    Inline,
    /// No quantity found: one piece of the whole text
    Bare,
}

/// Structured form of one free-text requirement line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedIngredient {
    /// Parsed amount, always finite and non-negative
    pub quantity: f64,

    /// Normalized unit (unknown units are kept as [`Unit::Other`])
    pub unit: Unit,

    /// Ingredient name, trimmed
    pub name: String,

    /// Parse rule that matched
    pub rule: ParseRule,
}

/// One pantry row as provided by the persistence layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryRecord {
    /// Item name as the user entered it (e.g. "Organic Bananas")
    pub name: String,

    /// Amount on hand, never negative after a deduction
    pub quantity: f64,

    /// Unit text as stored (e.g. "lbs", "kg", "pcs")
    #[serde(default)]
    pub unit: String,
}

/// Audit value for a single applied deduction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeductionOutcome {
    /// Amount subtracted, in the inventory record's unit (or fallback pieces)
    pub applied_amount: f64,

    /// Whether the fixed per-serving fallback was used instead of a conversion
    pub used_fallback: bool,

    /// Quantity left on the record after the deduction
    pub resulting_quantity: f64,
}

/// What happened to one requirement line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RequirementOutcome {
    /// No inventory record was a plausible match; nothing was touched
    Skipped {
        /// Requirement text as given
        requirement: String,
        /// Parse of the requirement
        parsed: ParsedIngredient,
    },

    /// One inventory record was matched and deducted
    Deducted {
        /// Requirement text as given
        requirement: String,
        /// Parse of the requirement
        parsed: ParsedIngredient,
        /// Name of the matched inventory record
        record_name: String,
        /// Similarity score of the match
        score: f64,
        /// Whether the names also pass the token-level `is_match` check
        name_match: bool,
        /// Deduction applied to the record
        outcome: DeductionOutcome,
    },
}

/// Counts of outcome kinds over one reconciliation call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionSummary {
    /// Deductions computed through a unit conversion
    pub converted: usize,
    /// Deductions that used the per-serving fallback
    pub fallback: usize,
    /// Requirements without a matching record
    pub skipped: usize,
}

impl ParsedIngredient {
    /// Create a parsed ingredient
    pub fn new(quantity: f64, unit: Unit, name: &str, rule: ParseRule) -> Self {
        Self {
            quantity,
            unit,
            name: name.trim().to_string(),
            rule,
        }
    }

    /// The default parse for text without a detectable quantity
    pub fn bare(text: &str) -> Self {
        Self::new(1.0, Unit::Pieces, text, ParseRule::Bare)
    }

    /// View as a `(quantity, canonical unit key, name)` triple
    pub fn as_triple(&self) -> (f64, &str, &str) {
        (self.quantity, self.unit.canonical_key(), &self.name)
    }
}

impl InventoryRecord {
    /// Create an inventory record
    pub fn new(name: &str, quantity: f64, unit: &str) -> Self {
        Self {
            name: name.to_string(),
            quantity,
            unit: unit.to_string(),
        }
    }
}

impl RequirementOutcome {
    /// Requirement text this outcome belongs to
    pub fn requirement(&self) -> &str {
        match self {
            RequirementOutcome::Skipped { requirement, .. }
            | RequirementOutcome::Deducted { requirement, .. } => requirement,
        }
    }

    /// Parse of the requirement
    pub fn parsed(&self) -> &ParsedIngredient {
        match self {
            RequirementOutcome::Skipped { parsed, .. }
            | RequirementOutcome::Deducted { parsed, .. } => parsed,
        }
    }

    /// The applied deduction, if any
    pub fn deduction(&self) -> Option<&DeductionOutcome> {
        match self {
            RequirementOutcome::Skipped { .. } => None,
            RequirementOutcome::Deducted { outcome, .. } => Some(outcome),
        }
    }

    /// Check if the requirement was skipped
    pub fn is_skipped(&self) -> bool {
        matches!(self, RequirementOutcome::Skipped { .. })
    }
}

impl DeductionSummary {
    /// Total number of requirements accounted for
    pub fn total(&self) -> usize {
        self.converted + self.fallback + self.skipped
    }

    /// Tally a single outcome
    pub fn record(&mut self, outcome: &RequirementOutcome) {
        match outcome.deduction() {
            None => self.skipped += 1,
            Some(deduction) if deduction.used_fallback => self.fallback += 1,
            Some(_) => self.converted += 1,
        }
    }
}

impl fmt::Display for ParsedIngredient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_amount(f, self.quantity)?;
        write!(f, " {} {}", self.unit, self.name)
    }
}

impl fmt::Display for InventoryRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ", self.name)?;
        write_amount(f, self.quantity)?;
        if !self.unit.trim().is_empty() {
            write!(f, " {}", self.unit.trim())?;
        }
        Ok(())
    }
}

impl fmt::Display for DeductionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} requirement(s): {} deducted by conversion, {} by fallback, {} skipped",
            self.total(),
            self.converted,
            self.fallback,
            self.skipped
        )
    }
}

fn write_amount(f: &mut fmt::Formatter<'_>, amount: f64) -> fmt::Result {
    if amount.fract() == 0.0 && amount.abs() < 1e15 {
        write!(f, "{}", amount as i64)
    } else {
        write!(f, "{}", amount)
    }
}
