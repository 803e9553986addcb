//! Basel III solvency ratios and the Texas ratio.
//!
//! Each formula resolves its inputs through a [`FillPolicy`]. The capital
//! ratios use [`FillPolicy::Undefined`]: a missing input makes the ratio
//! `NaN`. The Texas ratio uses [`FillPolicy::ZeroIfAbsent`]: an input whose
//! whole column is absent reads as zero, while a missing cell in an existing
//! column still makes the ratio `NaN`. Column presence is judged against the
//! columns the bank table was reported with, not the columns later stages
//! materialise. The two policies are kept apart so that either can be
//! changed per formula.

use std::collections::BTreeSet;

use solvency_core::types::{AsBankRecord, Field, SolvencyRecord, SolvencyTable};
use tracing::info;

/// How a formula input is read when it is not reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillPolicy {
    /// Missing stays missing; the result is undefined
    Undefined,
    /// A column absent from the table reads as zero; a missing cell stays missing
    ZeroIfAbsent,
}

impl FillPolicy {
    /// Resolves `field` for one row, given the columns the input was
    /// reported with.
    pub fn resolve<R: AsBankRecord>(
        self,
        reported: &BTreeSet<Field>,
        row: &R,
        field: Field,
    ) -> Option<f64> {
        match self {
            FillPolicy::ZeroIfAbsent if !reported.contains(&field) => Some(0.0),
            _ => row.bank_record().get(field),
        }
    }
}

/// Fields the capital ratios require as columns.
pub const CAPITAL_FIELDS: [Field; 4] = [
    Field::Cet1Capital,
    Field::TotalCapital,
    Field::Tier1Capital,
    Field::LeverageExposure,
];

/// Policy of the CET1, total capital and leverage ratio inputs.
pub const CAPITAL_RATIO_POLICY: FillPolicy = FillPolicy::Undefined;

/// Policy of the Texas ratio inputs.
pub const TEXAS_RATIO_POLICY: FillPolicy = FillPolicy::ZeroIfAbsent;

/// `numerator / denominator × 100`, or `NaN` when either side is missing or
/// the denominator is zero or `NaN`.
///
/// # Examples
/// ```
/// use solvency_engine::ratios::safe_ratio_pct;
///
/// assert_eq!(safe_ratio_pct(Some(10.0), Some(100.0)), 10.0);
/// assert!(safe_ratio_pct(Some(10.0), Some(0.0)).is_nan());
/// assert!(safe_ratio_pct(None, Some(100.0)).is_nan());
/// ```
pub fn safe_ratio_pct(numerator: Option<f64>, denominator: Option<f64>) -> f64 {
    match (numerator, denominator) {
        (Some(n), Some(d)) if d != 0.0 && !d.is_nan() => n / d * 100.0,
        _ => f64::NAN,
    }
}

/// Texas ratio: `NPL / (Tier 1 + provisions) × 100` when the denominator is
/// strictly positive, else `NaN`.
pub fn texas_ratio_pct(npl: Option<f64>, tier1: Option<f64>, provisions: Option<f64>) -> f64 {
    match (npl, tier1, provisions) {
        (Some(npl), Some(tier1), Some(prov)) if tier1 + prov > 0.0 => npl / (tier1 + prov) * 100.0,
        _ => f64::NAN,
    }
}

fn leverage_exposure(record: &SolvencyRecord) -> Option<f64> {
    record
        .get(Field::LeverageExposure)
        .or_else(|| record.get(Field::TotalAssets))
}

/// Computes CET1, total capital and leverage ratios.
///
/// A zero `RWA_Final` is replaced by `NaN` in the record itself, so that
/// neither the stored RWA nor any ratio built on it reads as a real figure.
pub fn compute_solvency_ratios(table: &mut SolvencyTable) {
    for field in CAPITAL_FIELDS {
        table.ensure_column(field);
    }

    let view: &SolvencyTable = table;
    let ratios: Vec<(f64, f64, f64)> = view
        .iter()
        .map(|row| {
            let rwa = Some(row.rwa_final).filter(|v| *v != 0.0);
            let resolve = |field| CAPITAL_RATIO_POLICY.resolve(view.columns(), row, field);
            (
                safe_ratio_pct(resolve(Field::Cet1Capital), rwa),
                safe_ratio_pct(resolve(Field::TotalCapital), rwa),
                safe_ratio_pct(resolve(Field::Tier1Capital), leverage_exposure(row)),
            )
        })
        .collect();

    for (row, (cet1, tcr, leverage)) in table.rows_mut().iter_mut().zip(ratios) {
        if row.rwa_final == 0.0 {
            row.rwa_final = f64::NAN;
        }
        row.cet1_ratio_pct = cet1;
        row.tcr_pct = tcr;
        row.leverage_ratio_pct = leverage;
    }

    let defined = table.iter().filter(|r| !r.cet1_ratio_pct.is_nan()).count();
    info!(banks = table.len(), cet1_defined = defined, "Solvency ratios computed");
}

/// Computes the Texas ratio for every bank.
///
/// `reported` is the column set of the bank table before any stage added
/// columns to it.
pub fn compute_texas_ratio(table: &mut SolvencyTable, reported: &BTreeSet<Field>) {
    let values: Vec<f64> = table
        .iter()
        .map(|row| {
            let resolve = |field| TEXAS_RATIO_POLICY.resolve(reported, row, field);
            texas_ratio_pct(
                resolve(Field::NplAmount),
                resolve(Field::Tier1Capital),
                resolve(Field::ProvisionsStock),
            )
        })
        .collect();

    for (row, texas) in table.rows_mut().iter_mut().zip(values) {
        row.texas_ratio_pct = texas;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use solvency_core::types::{BankRecord, EntityId, ProxiedRecord, ReportingDate, Table};

    fn texas(table: &mut SolvencyTable) {
        let reported = table.columns().clone();
        compute_texas_ratio(table, &reported);
    }

    fn row(values: &[(Field, f64)], rwa_final: f64) -> SolvencyRecord {
        let mut record = BankRecord::new(EntityId::new("E1"), ReportingDate::new("20250630"));
        for (f, v) in values {
            record.set(*f, *v);
        }
        let proxied = ProxiedRecord {
            record,
            ead_final: 0.0,
            npl_ratio: 0.0,
            pd_proxy: 0.0,
            lgd_proxy: 0.45,
        };
        SolvencyRecord::with_rwa(proxied, 0.0, rwa_final)
    }

    #[test]
    fn test_cet1_ratio() {
        let mut table = Table::new(
            [Field::Cet1Capital, Field::RwaTotal],
            vec![row(&[(Field::Cet1Capital, 10.0), (Field::RwaTotal, 100.0)], 100.0)],
        );
        compute_solvency_ratios(&mut table);
        assert_relative_eq!(table.rows()[0].cet1_ratio_pct, 10.0);
        assert!(table.rows()[0].tcr_pct.is_nan());
    }

    #[test]
    fn test_zero_rwa_gives_nan_not_infinity() {
        let mut table = Table::new(
            [Field::Cet1Capital, Field::TotalCapital],
            vec![row(&[(Field::Cet1Capital, 10.0), (Field::TotalCapital, 12.0)], 0.0)],
        );
        compute_solvency_ratios(&mut table);
        let r = &table.rows()[0];
        assert!(r.rwa_final.is_nan());
        assert!(r.cet1_ratio_pct.is_nan());
        assert!(r.tcr_pct.is_nan());
    }

    #[test]
    fn test_leverage_falls_back_to_total_assets() {
        let mut table = Table::new(
            [Field::Tier1Capital, Field::TotalAssets],
            vec![row(&[(Field::Tier1Capital, 5.0), (Field::TotalAssets, 200.0)], 50.0)],
        );
        compute_solvency_ratios(&mut table);
        assert_relative_eq!(table.rows()[0].leverage_ratio_pct, 2.5);
        assert!(table.has_column(Field::LeverageExposure));
    }

    #[test]
    fn test_zero_leverage_exposure_is_nan() {
        let mut table = Table::new(
            [Field::Tier1Capital, Field::LeverageExposure],
            vec![row(&[(Field::Tier1Capital, 5.0), (Field::LeverageExposure, 0.0)], 50.0)],
        );
        compute_solvency_ratios(&mut table);
        assert!(table.rows()[0].leverage_ratio_pct.is_nan());
    }

    #[test]
    fn test_texas_ratio() {
        let mut table = Table::new(
            [Field::NplAmount, Field::Tier1Capital, Field::ProvisionsStock],
            vec![row(
                &[
                    (Field::NplAmount, 30.0),
                    (Field::Tier1Capital, 40.0),
                    (Field::ProvisionsStock, 20.0),
                ],
                100.0,
            )],
        );
        texas(&mut table);
        assert_relative_eq!(table.rows()[0].texas_ratio_pct, 50.0);
    }

    #[test]
    fn test_texas_absent_columns_read_as_zero() {
        let mut table = Table::new(
            [Field::Tier1Capital],
            vec![row(&[(Field::Tier1Capital, 40.0)], 100.0)],
        );
        texas(&mut table);
        assert_eq!(table.rows()[0].texas_ratio_pct, 0.0);
    }

    #[test]
    fn test_texas_reads_reported_columns_not_materialised_ones() {
        let mut table = Table::new(
            [Field::Tier1Capital, Field::ProvisionsStock],
            vec![row(
                &[(Field::Tier1Capital, 40.0), (Field::ProvisionsStock, 20.0)],
                100.0,
            )],
        );
        let reported = table.columns().clone();
        table.ensure_column(Field::NplAmount);

        compute_texas_ratio(&mut table, &reported);
        assert_eq!(table.rows()[0].texas_ratio_pct, 0.0);
    }

    #[test]
    fn test_texas_missing_cell_is_nan() {
        let mut table = Table::new(
            [Field::NplAmount, Field::Tier1Capital, Field::ProvisionsStock],
            vec![row(&[(Field::NplAmount, 30.0), (Field::Tier1Capital, 40.0)], 100.0)],
        );
        texas(&mut table);
        assert!(table.rows()[0].texas_ratio_pct.is_nan());
    }

    #[test]
    fn test_texas_non_positive_denominator() {
        assert!(texas_ratio_pct(Some(1.0), Some(0.0), Some(0.0)).is_nan());
        assert!(texas_ratio_pct(Some(1.0), Some(-5.0), Some(2.0)).is_nan());
    }

    #[test]
    fn test_fill_policies_differ_on_absent_column() {
        let r = row(&[], 1.0);
        let reported = BTreeSet::new();
        assert_eq!(FillPolicy::Undefined.resolve(&reported, &r, Field::NplAmount), None);
        assert_eq!(FillPolicy::ZeroIfAbsent.resolve(&reported, &r, Field::NplAmount), Some(0.0));
    }
}
