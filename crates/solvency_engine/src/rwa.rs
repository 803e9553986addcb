//! Risk-weighted assets: reported figure first, model figure as fallback.

use solvency_core::types::{Diagnostic, Field, ProxiedRecord, ProxiedTable, SolvencyRecord, SolvencyTable};
use tracing::{info, warn};

/// Basel IRB scaling factor applied to the synthetic RWA.
pub const IRB_SCALING_FACTOR: f64 = 1.06;

/// `EAD × PD × LGD × 1.06`.
#[inline]
pub fn synthetic_rwa(record: &ProxiedRecord) -> f64 {
    record.ead_final * record.pd_proxy * record.lgd_proxy * IRB_SCALING_FACTOR
}

fn rwa_record(proxied: ProxiedRecord) -> SolvencyRecord {
    let synthetic = synthetic_rwa(&proxied);
    let final_rwa = proxied.get(Field::RwaTotal).unwrap_or(synthetic);
    SolvencyRecord::with_rwa(proxied, synthetic, final_rwa)
}

/// Computes `RWA_Synthetic` and `RWA_Final` for every bank.
///
/// When no `RWA_Total` column exists at all, it is materialised as
/// all-missing and a `SyntheticRwaOnly` diagnostic is recorded.
pub fn compute_rwa(mut table: ProxiedTable, diagnostics: &mut Vec<Diagnostic>) -> SolvencyTable {
    if !table.is_empty() && table.ensure_column(Field::RwaTotal) {
        warn!("{}", Diagnostic::SyntheticRwaOnly);
        diagnostics.push(Diagnostic::SyntheticRwaOnly);
    }

    let out = table.map_rows(rwa_record);
    let reported = out.iter().filter(|r| r.get(Field::RwaTotal).is_some()).count();
    info!(
        banks = out.len(),
        reported,
        synthetic = out.len() - reported,
        "RWA waterfall applied"
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use solvency_core::types::{BankRecord, EntityId, ReportingDate, Table};

    fn proxied(rwa_total: Option<f64>) -> ProxiedRecord {
        let mut record = BankRecord::new(EntityId::new("E1"), ReportingDate::new("20250630"));
        record.set_opt(Field::RwaTotal, rwa_total);
        ProxiedRecord {
            record,
            ead_final: 1000.0,
            npl_ratio: 0.02 / 1.2,
            pd_proxy: 0.02,
            lgd_proxy: 0.45,
        }
    }

    #[test]
    fn test_synthetic_when_reported_missing() {
        let table = Table::new([Field::RwaTotal], vec![proxied(None)]);
        let out = compute_rwa(table, &mut Vec::new());
        let r = &out.rows()[0];
        assert_relative_eq!(r.rwa_synthetic, 9.54, epsilon = 1e-9);
        assert_relative_eq!(r.rwa_final, 9.54, epsilon = 1e-9);
    }

    #[test]
    fn test_reported_rwa_wins() {
        let table = Table::new([Field::RwaTotal], vec![proxied(Some(100.0))]);
        let out = compute_rwa(table, &mut Vec::new());
        assert_eq!(out.rows()[0].rwa_final, 100.0);
        assert_relative_eq!(out.rows()[0].rwa_synthetic, 9.54, epsilon = 1e-9);
    }

    #[test]
    fn test_absent_column_is_synthetic_only() {
        let table = Table::new([], vec![proxied(None)]);
        let mut diags = Vec::new();
        let out = compute_rwa(table, &mut diags);
        assert!(out.has_column(Field::RwaTotal));
        assert_eq!(diags, vec![Diagnostic::SyntheticRwaOnly]);
    }
}
