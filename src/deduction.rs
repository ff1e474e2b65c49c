//! # Deduction Workflow
//!
//! This module reconciles a cooked recipe's ingredient requirements against
//! the caller's inventory snapshot and subtracts what was used.
//!
//! For every requirement, in list order:
//!
//! 1. parse it into (quantity, unit, name)
//! 2. pick the single best inventory record by name
//! 3. convert the quantity into the record's unit, or fall back to one
//!    unit per serving when the units are not compatible
//! 4. subtract `amount * servings`, never going below zero
//!
//! Each deducted outcome also reports whether the matched names pass
//! [`is_match`] at `MatchConfig::token_threshold`, so callers can flag
//! deductions that only cleared the looser `min_score`.
//!
//! A requirement without a plausible record is skipped, not an error. The
//! only failures are call-level contract violations, and those are detected
//! before any record is touched.
//!
//! Records are mutated in place as the list is walked, so a later requirement
//! that matches the same record sees the quantity left by the earlier one.
//! Callers that want a different ordering must order the requirement list
//! themselves.
//!
//! ## Usage
//!
//! ```rust
//! use pantry_reconcile::deduction::reconcile_and_deduct;
//! use pantry_reconcile::ingredient_model::InventoryRecord;
//!
//! let mut inventory = vec![InventoryRecord::new("Chicken Breast", 2.0, "lb")];
//! let outcomes = reconcile_and_deduct(&["2 lbs Chicken Breast"], &mut inventory, 1)?;
//!
//! let deduction = outcomes[0].deduction().unwrap();
//! assert_eq!(deduction.applied_amount, 2.0);
//! assert!(!deduction.used_fallback);
//! assert_eq!(inventory[0].quantity, 0.0);
//! # Ok::<(), pantry_reconcile::deduction_errors::DeductionError>(())
//! ```

use crate::config::MatchConfig;
use crate::deduction_errors::DeductionError;
use crate::fuzzy_matcher::{find_best_match, is_match};
use crate::ingredient_model::{
    DeductionOutcome, DeductionSummary, InventoryRecord, ParsedIngredient, RequirementOutcome,
};
use crate::ingredient_parser::parse_ingredient;
use crate::unit_table::{convert_quantity, Unit};
use tracing::{debug, info, warn};

/// Amount deducted per serving when no unit conversion is possible
pub const FALLBACK_UNITS_PER_SERVING: f64 = 1.0;

/// Reconcile requirements against the inventory with default thresholds
pub fn reconcile_and_deduct<S: AsRef<str>>(
    requirements: &[S],
    inventory: &mut [InventoryRecord],
    servings: u32,
) -> Result<Vec<RequirementOutcome>, DeductionError> {
    reconcile_and_deduct_with_config(requirements, inventory, servings, &MatchConfig::default())
}

/// Reconcile requirements against the inventory
///
/// Returns one outcome per requirement, in order. Fails without touching the
/// inventory when `servings` is zero, a threshold in `config` is out of
/// range, or a record carries a negative or non-finite quantity.
pub fn reconcile_and_deduct_with_config<S: AsRef<str>>(
    requirements: &[S],
    inventory: &mut [InventoryRecord],
    servings: u32,
    config: &MatchConfig,
) -> Result<Vec<RequirementOutcome>, DeductionError> {
    if let Err(e) = validate_call(inventory, servings, config) {
        warn!(error = %e, "Rejected reconciliation call");
        return Err(e);
    }

    info!(
        requirements = requirements.len(),
        records = inventory.len(),
        servings,
        "Reconciling recipe against inventory"
    );

    let outcomes: Vec<RequirementOutcome> = requirements
        .iter()
        .map(|requirement| deduct_requirement(requirement.as_ref(), inventory, servings, config))
        .collect();

    let summary = summarize(&outcomes);
    info!(
        converted = summary.converted,
        fallback = summary.fallback,
        skipped = summary.skipped,
        "Reconciliation finished"
    );

    Ok(outcomes)
}

/// Check the call-level contract without mutating anything
pub fn validate_call(
    inventory: &[InventoryRecord],
    servings: u32,
    config: &MatchConfig,
) -> Result<(), DeductionError> {
    if servings < 1 {
        return Err(DeductionError::InvalidServings(servings));
    }

    config.validate()?;

    if let Some(record) = inventory
        .iter()
        .find(|record| !record.quantity.is_finite() || record.quantity < 0.0)
    {
        return Err(DeductionError::InvalidInventoryQuantity {
            name: record.name.clone(),
            quantity: record.quantity,
        });
    }

    Ok(())
}

/// Process one requirement: parse, match, deduct
fn deduct_requirement(
    requirement: &str,
    inventory: &mut [InventoryRecord],
    servings: u32,
    config: &MatchConfig,
) -> RequirementOutcome {
    let parsed = parse_ingredient(requirement);

    if parsed.name.is_empty() {
        debug!(requirement, "Blank requirement, skipping");
        return RequirementOutcome::Skipped {
            requirement: requirement.to_string(),
            parsed,
        };
    }

    let best = find_best_match(inventory, &parsed.name, config.min_score);
    let (position, score) = match best.position {
        Some(position) => (position, best.score),
        None => {
            debug!(requirement, name = %parsed.name, "No inventory match, skipping");
            return RequirementOutcome::Skipped {
                requirement: requirement.to_string(),
                parsed,
            };
        }
    };

    let record = &mut inventory[position];
    let name_match = is_match(&record.name, &parsed.name, config.token_threshold);
    if !name_match {
        debug!(requirement, record = %record.name, "Match below token threshold");
    }
    let outcome = apply_deduction(record, &parsed, servings);

    info!(
        requirement,
        record = %record.name,
        score,
        name_match,
        applied = outcome.applied_amount,
        fallback = outcome.used_fallback,
        remaining = outcome.resulting_quantity,
        "Deducted requirement from inventory"
    );

    RequirementOutcome::Deducted {
        requirement: requirement.to_string(),
        parsed,
        record_name: record.name.clone(),
        score,
        name_match,
        outcome,
    }
}

/// Deduct one parsed requirement from its matched record
///
/// The parsed quantity is converted into the record's unit; when that is not
/// possible one unit per serving is deducted instead. The record quantity is
/// floored at zero.
pub fn apply_deduction(
    record: &mut InventoryRecord,
    parsed: &ParsedIngredient,
    servings: u32,
) -> DeductionOutcome {
    let servings = f64::from(servings);
    let converted = Unit::parse(&record.unit)
        .and_then(|record_unit| convert_quantity(parsed.quantity, &parsed.unit, &record_unit));

    let (applied_amount, used_fallback) = match converted {
        Some(quantity) => (quantity * servings, false),
        None => {
            debug!(
                from = %parsed.unit,
                to = %record.unit,
                "Units not convertible, using per-serving fallback"
            );
            (FALLBACK_UNITS_PER_SERVING * servings, true)
        }
    };

    let resulting_quantity = (record.quantity - applied_amount).max(0.0);
    record.quantity = resulting_quantity;

    DeductionOutcome {
        applied_amount,
        used_fallback,
        resulting_quantity,
    }
}

/// Count converted, fallback and skipped outcomes
pub fn summarize(outcomes: &[RequirementOutcome]) -> DeductionSummary {
    let mut summary = DeductionSummary::default();
    for outcome in outcomes {
        summary.record(outcome);
    }
    summary
}
