//! # Pantry Reconciliation Example
//!
//! This example parses a small recipe, matches it against a pantry and
//! prints what each requirement deducted.

use pantry_reconcile::deduction::{reconcile_and_deduct, summarize};
use pantry_reconcile::ingredient_model::{InventoryRecord, RequirementOutcome};
use pantry_reconcile::ingredient_parser::parse_ingredient_list;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let recipe = r#"
- 2 lbs Chicken Breast
- 1 cup rice
- 2 tbsp olive oil
- Garlic (3 cloves, minced)
- 1 pinch saffron
"#;

    println!("🔍 Parsing recipe...\n");
    for parsed in parse_ingredient_list(recipe) {
        println!("  • {} ({:?})", parsed, parsed.rule);
    }

    let mut pantry = vec![
        InventoryRecord::new("Chicken Breast", 3.0, "lbs"),
        InventoryRecord::new("Basmati Rice", 1.0, "kg"),
        InventoryRecord::new("Extra Virgin Olive Oil", 500.0, "ml"),
        InventoryRecord::new("Garlic", 10.0, "cloves"),
    ];

    let requirements: Vec<&str> = recipe
        .lines()
        .map(|line| line.trim_start_matches(['-', ' ']))
        .filter(|line| !line.is_empty())
        .collect();

    println!("\n🍳 Cooking for 2 servings...\n");
    let outcomes = reconcile_and_deduct(&requirements, &mut pantry, 2)?;

    for outcome in &outcomes {
        match outcome {
            RequirementOutcome::Deducted {
                requirement,
                record_name,
                score,
                outcome,
                ..
            } => println!(
                "  ✅ '{}' → {} (score {:.2}): -{}{}",
                requirement,
                record_name,
                score,
                outcome.applied_amount,
                if outcome.used_fallback { " (fallback)" } else { "" }
            ),
            RequirementOutcome::Skipped { requirement, .. } => {
                println!("  ❌ '{}': no pantry match", requirement)
            }
        }
    }

    println!("\n📊 {}", summarize(&outcomes));
    println!("\n🧺 Pantry after cooking:");
    for record in &pantry {
        println!("  • {}", record);
    }

    Ok(())
}
