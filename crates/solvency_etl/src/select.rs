//! Reporting date selection.

use solvency_core::types::{BankTable, Diagnostic, ReportingDate};
use tracing::{info, warn};

/// Which reporting date the merged table was restricted to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateSelection {
    /// The configured target date was present
    Target(ReportingDate),
    /// The target was absent; the latest available date was used
    Fallback {
        /// Configured target
        target: ReportingDate,
        /// Latest date present
        selected: ReportingDate,
    },
    /// The table had no dates
    NoDates,
}

impl DateSelection {
    /// The date rows were restricted to, if any.
    pub fn selected(&self) -> Option<&ReportingDate> {
        match self {
            DateSelection::Target(date) => Some(date),
            DateSelection::Fallback { selected, .. } => Some(selected),
            DateSelection::NoDates => None,
        }
    }
}

/// Restricts `table` to a single reporting date.
///
/// Dates compare lexicographically, which matches chronological order for
/// the `YYYYMMDD` form used by the extracts.
pub fn select_reporting_date(
    mut table: BankTable,
    target: &ReportingDate,
    diagnostics: &mut Vec<Diagnostic>,
) -> (BankTable, DateSelection) {
    let dates = table.distinct_dates();

    let selection = if dates.contains(target) {
        DateSelection::Target(target.clone())
    } else if let Some(latest) = dates.last() {
        let diagnostic = Diagnostic::DateFallback {
            target: target.clone(),
            selected: latest.clone(),
        };
        warn!("{}", diagnostic);
        diagnostics.push(diagnostic);
        DateSelection::Fallback {
            target: target.clone(),
            selected: latest.clone(),
        }
    } else {
        warn!("{}", Diagnostic::NoDates);
        diagnostics.push(Diagnostic::NoDates);
        DateSelection::NoDates
    };

    if let Some(date) = selection.selected() {
        table.retain_date(date);
        info!(date = %date, banks = table.len(), "Reporting date selected");
    }

    (table, selection)
}

#[cfg(test)]
mod tests {
    use super::*;
    use solvency_core::types::{BankRecord, EntityId, Field, Table};

    fn table(keys: &[(&str, &str)]) -> BankTable {
        Table::new(
            [Field::Cet1Capital],
            keys.iter()
                .map(|(e, d)| BankRecord::new(EntityId::new(*e), ReportingDate::new(*d)))
                .collect(),
        )
    }

    #[test]
    fn test_target_present() {
        let t = table(&[("A", "20250331"), ("A", "20250630"), ("B", "20250630")]);
        let mut diags = Vec::new();
        let (filtered, selection) =
            select_reporting_date(t, &ReportingDate::new("20250630"), &mut diags);
        assert_eq!(selection, DateSelection::Target(ReportingDate::new("20250630")));
        assert_eq!(filtered.len(), 2);
        assert!(diags.is_empty());
    }

    #[test]
    fn test_fallback_to_latest() {
        let t = table(&[("A", "20241231"), ("A", "20250331"), ("B", "20250331")]);
        let mut diags = Vec::new();
        let (filtered, selection) =
            select_reporting_date(t, &ReportingDate::new("20250630"), &mut diags);
        assert_eq!(selection.selected(), Some(&ReportingDate::new("20250331")));
        assert_eq!(filtered.len(), 2);
        assert!(filtered
            .iter()
            .all(|r| r.reporting_date.as_str() == "20250331"));
        assert!(matches!(diags[0], Diagnostic::DateFallback { .. }));
    }

    #[test]
    fn test_no_dates() {
        let mut diags = Vec::new();
        let (filtered, selection) =
            select_reporting_date(Table::empty(), &ReportingDate::new("20250630"), &mut diags);
        assert_eq!(selection, DateSelection::NoDates);
        assert!(filtered.is_empty());
        assert_eq!(diags, vec![Diagnostic::NoDates]);
    }
}
