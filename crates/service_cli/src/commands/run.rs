//! Run command implementation
//!
//! Full pipeline: ETL (or master dataset reuse), quality checks, engine,
//! results file and console preview.

use adapter_loader::{load_raw_inputs, read_bank_table, write_bank_table, write_solvency_table};
use infra_config::SolvencyConfig;
use solvency_core::types::{BankTable, ReportingDate};
use solvency_engine::run_engine;
use solvency_etl::{clean_and_merge, quality_checks, QualityReport};
use tracing::{info, warn};

use crate::commands::preview;
use crate::config::{engine_settings, input_paths};
use crate::{CliError, Result};

/// What a run produced.
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Banks in the results
    pub banks: usize,
    /// Quality counts of the merged table
    pub quality: QualityReport,
    /// Whether the master dataset was read back instead of rebuilt
    pub reused_master: bool,
    /// Unit CVA charge, when applied
    pub unit_cva_charge: Option<f64>,
}

fn build_master(config: &SolvencyConfig) -> Result<BankTable> {
    let raw = load_raw_inputs(&input_paths(config))?;
    let target = ReportingDate::new(&config.target_date);
    let etl = clean_and_merge(raw.other, raw.credit, raw.market, &target);

    if etl.table.is_empty() {
        return Err(CliError::EmptyDataset(config.target_date.clone()));
    }

    write_bank_table(config.master_path(), &etl.table)?;
    Ok(etl.table)
}

/// Runs the pipeline and writes the results file.
pub fn execute(config: &SolvencyConfig) -> Result<RunSummary> {
    std::fs::create_dir_all(&config.output_dir)?;

    let master_path = config.master_path();
    let reused_master = config.reuse_master && master_path.exists();
    let table = if reused_master {
        info!(path = %master_path.display(), "Loading existing master dataset");
        read_bank_table(&master_path)?
    } else {
        info!("Building master dataset");
        build_master(config)?
    };

    let quality = quality_checks(&table);

    let output = run_engine(table, &engine_settings(config))?;
    if !output.diagnostics.is_empty() {
        warn!(count = output.diagnostics.len(), "Engine absorbed data anomalies");
    }

    let results_path = config.results_path();
    write_solvency_table(&results_path, &output.table)?;
    info!(path = %results_path.display(), "Results available");

    Ok(RunSummary {
        banks: output.table.len(),
        quality,
        reused_master,
        unit_cva_charge: output.unit_cva_charge,
    })
}

/// Run the run command
pub fn run(config: &SolvencyConfig, preview_rows: usize) -> Result<()> {
    let summary = execute(config)?;
    info!(
        banks = summary.banks,
        reused_master = summary.reused_master,
        "Calculations complete"
    );

    if preview_rows > 0 {
        println!("{}", config.results_path().display());
        print!("{}", preview::render(&config.results_path(), preview_rows)?);
    }
    Ok(())
}
