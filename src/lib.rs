//! # Pantry Reconcile
//!
//! Reconciles a recipe's free-text ingredient requirements against a pantry
//! inventory snapshot and deducts what a cooked meal used: unit
//! normalization and conversion, ingredient line parsing, fuzzy name
//! matching, and the deduction workflow that ties them together.

pub mod config;
pub mod deduction;
pub mod deduction_errors;
pub mod fuzzy_matcher;
pub mod ingredient_model;
pub mod ingredient_parser;
pub mod logging;
pub mod measurement_patterns;
pub mod snapshot;
pub mod unit_table;

pub use config::MatchConfig;
pub use deduction::{reconcile_and_deduct, reconcile_and_deduct_with_config};
pub use deduction_errors::DeductionError;
pub use fuzzy_matcher::{find_best_match, is_match, similarity, MatchResult};
pub use ingredient_model::{
    DeductionOutcome, DeductionSummary, InventoryRecord, ParseRule, ParsedIngredient,
    RequirementOutcome,
};
pub use ingredient_parser::{parse_ingredient, parse_ingredient_list};
pub use unit_table::{convert_unit, normalize_unit, Unit, UnitFamily};
