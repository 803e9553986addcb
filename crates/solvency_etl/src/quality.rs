//! Sanity counts over the merged table. Nothing here alters data.

use std::fmt;

use solvency_core::types::{BankTable, Field};
use tracing::{info, warn};

/// Counts reported after the merge.
///
/// A count is `None` when its column does not exist in the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QualityReport {
    /// Banks in the table
    pub banks: usize,
    /// Banks with negative `Total_Assets`
    pub negative_total_assets: Option<usize>,
    /// Banks with a missing `RWA_Total`
    pub missing_rwa: Option<usize>,
}

impl QualityReport {
    /// True when no count flags a problem.
    pub fn is_clean(&self) -> bool {
        self.negative_total_assets.unwrap_or(0) == 0 && self.missing_rwa.unwrap_or(0) == 0
    }
}

impl fmt::Display for QualityReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let show = |count: Option<usize>| count.map_or_else(|| "n/a".to_string(), |c| c.to_string());
        write!(
            f,
            "{} banks, negative Total_Assets: {}, missing RWA_Total: {}",
            self.banks,
            show(self.negative_total_assets),
            show(self.missing_rwa)
        )
    }
}

/// Computes the quality counts and logs them.
pub fn quality_checks(table: &BankTable) -> QualityReport {
    let negative_total_assets = table.has_column(Field::TotalAssets).then(|| {
        table
            .iter()
            .filter(|r| r.get(Field::TotalAssets).is_some_and(|v| v < 0.0))
            .count()
    });
    let missing_rwa = table
        .has_column(Field::RwaTotal)
        .then(|| table.count_missing(Field::RwaTotal));

    let report = QualityReport {
        banks: table.len(),
        negative_total_assets,
        missing_rwa,
    };

    if report.is_clean() {
        info!(%report, "Quality checks passed");
    } else {
        warn!(%report, "Quality checks flagged rows");
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use solvency_core::types::{BankRecord, EntityId, ReportingDate, Table};

    #[test]
    fn test_counts() {
        let mut a = BankRecord::new(EntityId::new("A"), ReportingDate::new("20250630"));
        a.set(Field::TotalAssets, -1.0);
        let mut b = BankRecord::new(EntityId::new("B"), ReportingDate::new("20250630"));
        b.set(Field::TotalAssets, 10.0);
        b.set(Field::RwaTotal, 5.0);
        let table = Table::new([Field::TotalAssets, Field::RwaTotal], vec![a, b]);

        let report = quality_checks(&table);
        assert_eq!(report.banks, 2);
        assert_eq!(report.negative_total_assets, Some(1));
        assert_eq!(report.missing_rwa, Some(1));
        assert!(!report.is_clean());
    }

    #[test]
    fn test_absent_columns_are_not_applicable() {
        let table: BankTable = Table::empty();
        let report = quality_checks(&table);
        assert_eq!(report.negative_total_assets, None);
        assert_eq!(report.missing_rwa, None);
        assert!(report.is_clean());
        assert!(report.to_string().contains("n/a"));
    }
}
