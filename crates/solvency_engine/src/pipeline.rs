//! Engine orchestration: proxies, RWA, CVA, ratios, Texas ratio.

use solvency_core::types::{BankTable, Diagnostic, SolvencyTable, Table};
use tracing::info;

use crate::cva::{apply_cva, CvaSettings};
use crate::error::CvaError;
use crate::proxies::calculate_proxies;
use crate::ratios::{compute_solvency_ratios, compute_texas_ratio};
use crate::rwa::compute_rwa;

/// Engine run options.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EngineSettings {
    /// CVA add-on; `None` disables it
    pub cva: Option<CvaSettings>,
}

impl EngineSettings {
    /// Settings with the CVA add-on disabled.
    pub fn without_cva() -> Self {
        Self { cva: None }
    }

    /// Settings with the given CVA add-on.
    pub fn with_cva(cva: CvaSettings) -> Self {
        Self { cva: Some(cva) }
    }
}

/// Result of [`run_engine`].
#[derive(Debug, Clone)]
pub struct EngineOutput {
    /// One solvency record per input bank, in input order
    pub table: SolvencyTable,
    /// Unit CVA charge when the add-on was applied
    pub unit_cva_charge: Option<f64>,
    /// Anomalies absorbed along the way
    pub diagnostics: Vec<Diagnostic>,
}

/// Runs the full engine over a merged bank table.
///
/// Ratios see `RWA_Final` after the CVA add-on. The Texas ratio judges
/// absent inputs against the columns of `table` as passed in. An empty table
/// yields an empty result without touching the CVA model.
///
/// # Errors
///
/// `CvaError` when CVA is enabled with invalid parameters.
pub fn run_engine(table: BankTable, settings: &EngineSettings) -> Result<EngineOutput, CvaError> {
    let mut diagnostics = Vec::new();

    if table.is_empty() {
        info!("Empty input, engine skipped");
        let (columns, _) = table.into_parts();
        return Ok(EngineOutput {
            table: Table::new(columns, Vec::new()),
            unit_cva_charge: None,
            diagnostics,
        });
    }

    let reported = table.columns().clone();
    let proxied = calculate_proxies(table, &mut diagnostics);
    let mut solvency = compute_rwa(proxied, &mut diagnostics);

    let unit_cva_charge = match &settings.cva {
        Some(cva) => apply_cva(&mut solvency, cva)?,
        None => None,
    };

    compute_solvency_ratios(&mut solvency);
    compute_texas_ratio(&mut solvency, &reported);

    info!(
        banks = solvency.len(),
        diagnostics = diagnostics.len(),
        "Engine run complete"
    );
    Ok(EngineOutput {
        table: solvency,
        unit_cva_charge,
        diagnostics,
    })
}
