//! # Snapshot I/O
//!
//! File loading and saving for the command-line tool: the inventory snapshot
//! (a JSON array of [`InventoryRecord`]), the requirement list, and the JSON
//! report printed after a run.
//!
//! Requirement files are either a JSON array of strings or plain text with
//! one requirement per line. Plain-text files go through the same list
//! marker stripping as [`parse_ingredient_list`](crate::ingredient_parser::parse_ingredient_list),
//! so a pasted bullet list works as is.

use crate::deduction::summarize;
use crate::ingredient_model::{DeductionSummary, InventoryRecord, RequirementOutcome};
use crate::measurement_patterns::BULLET_REGEX;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Everything the tool reports about one run
#[derive(Debug, Clone, Serialize)]
pub struct ReconciliationReport {
    pub processed_at: DateTime<Utc>,
    pub servings: u32,
    pub summary: DeductionSummary,
    pub outcomes: Vec<RequirementOutcome>,
    /// Inventory after the deductions
    pub inventory: Vec<InventoryRecord>,
}

impl ReconciliationReport {
    pub fn new(
        servings: u32,
        outcomes: Vec<RequirementOutcome>,
        inventory: Vec<InventoryRecord>,
    ) -> Self {
        Self {
            processed_at: Utc::now(),
            servings,
            summary: summarize(&outcomes),
            outcomes,
            inventory,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize reconciliation report")
    }
}

/// Read an inventory snapshot
pub fn load_inventory(path: &Path) -> Result<Vec<InventoryRecord>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read inventory file {}", path.display()))?;
    let records: Vec<InventoryRecord> = serde_json::from_str(&content)
        .with_context(|| format!("Invalid inventory JSON in {}", path.display()))?;

    info!(path = %path.display(), records = records.len(), "Loaded inventory snapshot");
    Ok(records)
}

/// Write an inventory snapshot as pretty JSON
pub fn save_inventory(path: &Path, inventory: &[InventoryRecord]) -> Result<()> {
    let json =
        serde_json::to_string_pretty(inventory).context("Failed to serialize inventory")?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    fs::write(path, json)
        .with_context(|| format!("Failed to write inventory file {}", path.display()))?;

    info!(path = %path.display(), records = inventory.len(), "Saved inventory snapshot");
    Ok(())
}

/// Read a requirement list file
pub fn load_requirements(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read requirements file {}", path.display()))?;
    let requirements = parse_requirements(&content)
        .with_context(|| format!("Invalid requirements in {}", path.display()))?;

    info!(
        path = %path.display(),
        requirements = requirements.len(),
        "Loaded requirements"
    );
    Ok(requirements)
}

/// Split requirement file content into requirement strings
///
/// Content starting with `[` is read as a JSON array of strings and kept
/// verbatim. Anything else is one requirement per non-blank line.
pub fn parse_requirements(content: &str) -> Result<Vec<String>> {
    if content.trim_start().starts_with('[') {
        debug!("Reading requirements as JSON array");
        let requirements: Vec<String> =
            serde_json::from_str(content).context("Expected a JSON array of strings")?;
        return Ok(requirements);
    }

    Ok(content
        .lines()
        .map(|line| BULLET_REGEX.replace(line, "").trim().to_string())
        .filter(|line| !line.is_empty())
        .collect())
}
