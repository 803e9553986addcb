//! # solvency_etl: Disclosure Extract ETL
//!
//! Turns the three long-format extracts into a single wide table with one
//! [`BankRecord`](solvency_core::types::BankRecord) per bank at one reporting
//! date.
//!
//! ## Stages
//!
//! 1. [`reshape`]: header normalisation, code filtering, duplicate summing, pivot
//! 2. [`merge`]: other disclosures ⟕ credit risk, then market RWA if absent
//! 3. [`select`]: restrict to the target date or fall back to the latest one
//! 4. [`quality`]: sanity counts
//!
//! No stage aborts on bad data. Anomalies are returned as
//! [`Diagnostic`]s alongside the table.
//!
//! ## Example
//!
//! ```rust
//! use adapter_loader::RawDataset;
//! use solvency_core::types::{Field, ReportingDate};
//! use solvency_etl::clean_and_merge;
//!
//! let header = ["LEI_Code", "Period", "Item", "Amount"];
//! let other = RawDataset::from_strs("tr_oth", &header, &[
//!     &["E1", "20250630", "2520102", "10"],
//!     &["E1", "20250630", "2520138", "100"],
//! ]);
//! let credit = RawDataset::from_strs("tr_cre", &header, &[
//!     &["E1", "20250630", "2520603", "400"],
//! ]);
//! let market = RawDataset::from_strs("tr_mrk", &header, &[]);
//!
//! let out = clean_and_merge(other, credit, market, &ReportingDate::new("20250630"));
//! let bank = &out.table.rows()[0];
//! assert_eq!(bank.get(Field::Cet1Capital), Some(10.0));
//! assert_eq!(bank.get(Field::LoansGross), Some(400.0));
//! ```

pub mod merge;
pub mod quality;
pub mod reshape;
pub mod select;

use adapter_loader::RawDataset;
use solvency_core::types::{BankTable, Diagnostic, Field, ReportingDate};
use tracing::info;

pub use merge::{left_join, supplement_rwa_from_market};
pub use quality::{quality_checks, QualityReport};
pub use reshape::{pivot_observations, reshape_dataset, unpivot, ReshapeOutcome};
pub use select::{select_reporting_date, DateSelection};

/// Result of [`clean_and_merge`].
#[derive(Debug, Clone)]
pub struct EtlOutput {
    /// Merged table restricted to one reporting date
    pub table: BankTable,
    /// Which date was kept
    pub selection: DateSelection,
    /// Anomalies absorbed along the way, in stage order
    pub diagnostics: Vec<Diagnostic>,
}

/// Reshapes, merges and date-filters the three raw extracts.
pub fn clean_and_merge(
    other: RawDataset,
    credit: RawDataset,
    market: RawDataset,
    target_date: &ReportingDate,
) -> EtlOutput {
    let mut diagnostics = Vec::new();

    let other = reshape_dataset(other, &mut diagnostics).into_table_or_empty();
    let credit = reshape_dataset(credit, &mut diagnostics).into_table_or_empty();
    let mut merged = left_join(other, &credit);

    if !merged.has_column(Field::RwaTotal) {
        let market = reshape_dataset(market, &mut diagnostics).into_table_or_empty();
        merged = supplement_rwa_from_market(merged, &market);
    }

    let (table, selection) = select_reporting_date(merged, target_date, &mut diagnostics);
    info!(
        banks = table.len(),
        columns = table.columns().len(),
        diagnostics = diagnostics.len(),
        "ETL complete"
    );

    EtlOutput {
        table,
        selection,
        diagnostics,
    }
}
