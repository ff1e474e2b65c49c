use anyhow::{Context, Result};
use clap::Parser;
use pantry_reconcile::config::{AppConfig, LogFormat};
use pantry_reconcile::deduction::reconcile_and_deduct_with_config;
use pantry_reconcile::logging::init_logger;
use pantry_reconcile::snapshot::{
    load_inventory, load_requirements, save_inventory, ReconciliationReport,
};
use std::path::PathBuf;
use tracing::{debug, info};

/// Deduct a cooked recipe's ingredients from a pantry inventory snapshot
#[derive(Debug, Parser)]
#[command(name = "pantry-reconcile", version, about)]
struct Cli {
    /// Inventory snapshot (JSON array of {name, quantity, unit})
    #[arg(short, long)]
    inventory: PathBuf,

    /// Requirement list (JSON array of strings, or one requirement per line)
    #[arg(short, long)]
    requirements: PathBuf,

    /// Servings cooked; defaults to PANTRY_DEFAULT_SERVINGS or 1
    #[arg(short, long)]
    servings: Option<u32>,

    /// Write the updated snapshot here instead of back to --inventory
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Report what would be deducted without writing any file
    #[arg(long)]
    dry_run: bool,

    /// Emit JSON log lines
    #[arg(long)]
    json_logs: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let cli = Cli::parse();
    let config = AppConfig::from_env().context("Invalid configuration")?;

    let log_format = if cli.json_logs {
        LogFormat::Json
    } else {
        config.log_format
    };
    init_logger(log_format, cli.verbose);

    info!("Starting pantry-reconcile");
    debug!(?cli, ?config, "Resolved settings");

    let mut inventory = load_inventory(&cli.inventory)?;
    let requirements = load_requirements(&cli.requirements)?;
    let servings = cli.servings.unwrap_or(config.default_servings);

    let outcomes =
        reconcile_and_deduct_with_config(&requirements, &mut inventory, servings, &config.matching)
            .context("Reconciliation rejected")?;

    let report = ReconciliationReport::new(servings, outcomes, inventory);
    info!(summary = %report.summary, "Reconciliation complete");
    println!("{}", report.to_json()?);

    if cli.dry_run {
        info!("Dry run, snapshot left untouched");
        return Ok(());
    }

    let target = cli.output.as_ref().unwrap_or(&cli.inventory);
    save_inventory(target, &report.inventory)?;

    Ok(())
}
