//! Long-to-wide reshaping of disclosure extracts.
//!
//! ```text
//! LEI_Code | Period   | Item    | Amount          LEI | Date     | CET1_Capital | RWA_Total
//! ---------+----------+---------+-------   ──▶   ----+----------+--------------+----------
//! E1       | 20250630 | 2520102 | 10              E1  | 20250630 | 10           | 100
//! E1       | 20250630 | 2520138 | 60
//! E1       | 20250630 | 2520138 | 40
//! ```
//!
//! Duplicate (entity, date, code) facts are summed: several portfolios can
//! disclose the same code for one bank.

use std::collections::BTreeMap;

use adapter_loader::RawDataset;
use solvency_core::codes::{code_for_field, field_for_code};
use solvency_core::types::{BankRecord, BankTable, Diagnostic, RawObservation, RecordKey, Table};
use tracing::{debug, info, warn};

/// Canonical role of a raw column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnRole {
    /// Legal entity identifier
    EntityId = 0,
    /// Reporting period
    ReportingDate,
    /// Regulatory item code
    ItemCode,
    /// Reported amount
    Amount,
}

impl ColumnRole {
    /// Canonical column name.
    pub fn canonical_name(&self) -> &'static str {
        match self {
            ColumnRole::EntityId => "entity_id",
            ColumnRole::ReportingDate => "reporting_date",
            ColumnRole::ItemCode => "item_code",
            ColumnRole::Amount => "amount",
        }
    }

    /// Classifies a header by token presence, case-insensitively.
    ///
    /// Rules are tried in order and the first match wins, so a header such as
    /// `"Item date"` is a date column.
    pub fn classify(header: &str) -> Option<ColumnRole> {
        let h = header.trim().to_uppercase();
        if h.contains("LEI") && h.contains("CODE") {
            Some(ColumnRole::EntityId)
        } else if h.contains("PERIOD") || h.contains("DATE") {
            Some(ColumnRole::ReportingDate)
        } else if h.contains("ITEM") {
            Some(ColumnRole::ItemCode)
        } else if h.contains("AMOUNT") {
            Some(ColumnRole::Amount)
        } else {
            None
        }
    }
}

/// Positions of the canonical columns in a raw dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMapping {
    /// Entity identifier column
    pub entity_id: usize,
    /// Reporting date column
    pub reporting_date: usize,
    /// Item code column
    pub item_code: usize,
    /// Amount column
    pub amount: usize,
}

/// Maps headers onto canonical roles.
///
/// The first header classified into a role claims it. On failure returns the
/// canonical names of the roles that could not be identified.
pub fn normalize_columns<S: AsRef<str>>(headers: &[S]) -> Result<ColumnMapping, Vec<&'static str>> {
    let mut slots: [Option<usize>; 4] = [None; 4];
    let order = [
        ColumnRole::EntityId,
        ColumnRole::ReportingDate,
        ColumnRole::ItemCode,
        ColumnRole::Amount,
    ];

    for (i, header) in headers.iter().enumerate() {
        if let Some(role) = ColumnRole::classify(header.as_ref()) {
            let slot = &mut slots[role as usize];
            if slot.is_none() {
                *slot = Some(i);
            }
        }
    }

    match slots {
        [Some(entity_id), Some(reporting_date), Some(item_code), Some(amount)] => Ok(ColumnMapping {
            entity_id,
            reporting_date,
            item_code,
            amount,
        }),
        _ => Err(order
            .iter()
            .zip(slots.iter())
            .filter(|(_, slot)| slot.is_none())
            .map(|(role, _)| role.canonical_name())
            .collect()),
    }
}

/// Parses an item code. Integral float text such as `2520102.0` is accepted.
///
/// # Examples
/// ```
/// use solvency_etl::reshape::parse_item_code;
///
/// assert_eq!(parse_item_code(" 2520102 "), Some(2520102));
/// assert_eq!(parse_item_code("2520102.0"), Some(2520102));
/// assert_eq!(parse_item_code("2520102.5"), None);
/// assert_eq!(parse_item_code("n/a"), None);
/// ```
pub fn parse_item_code(cell: &str) -> Option<i64> {
    let cell = cell.trim();
    if let Ok(code) = cell.parse::<i64>() {
        return Some(code);
    }
    let value = cell.parse::<f64>().ok()?;
    if value.is_finite() && value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        Some(value as i64)
    } else {
        None
    }
}

fn parse_amount(cell: &str) -> Option<f64> {
    cell.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Row accounting for one reshaped dataset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReshapeStats {
    /// Data rows read
    pub rows_read: usize,
    /// Rows dropped for a non-numeric item code
    pub non_numeric_codes: usize,
    /// Rows dropped for a code outside the mapping
    pub unmapped_codes: usize,
    /// Rows dropped for an unparseable amount
    pub unparsed_amounts: usize,
    /// Observations kept
    pub observations: usize,
}

/// Extracts mapped observations from a dataset.
pub fn extract_observations(
    dataset: &RawDataset,
    mapping: &ColumnMapping,
) -> (Vec<RawObservation>, ReshapeStats) {
    let mut stats = ReshapeStats {
        rows_read: dataset.len(),
        ..Default::default()
    };
    let mut observations = Vec::with_capacity(dataset.len());

    for row in 0..dataset.len() {
        let Some(code) = parse_item_code(dataset.cell(row, mapping.item_code)) else {
            stats.non_numeric_codes += 1;
            continue;
        };
        if field_for_code(code).is_none() {
            stats.unmapped_codes += 1;
            continue;
        }
        let Some(amount) = parse_amount(dataset.cell(row, mapping.amount)) else {
            stats.unparsed_amounts += 1;
            continue;
        };
        observations.push(RawObservation::new(
            dataset.cell(row, mapping.entity_id).trim(),
            dataset.cell(row, mapping.reporting_date),
            code,
            amount,
        ));
    }

    stats.observations = observations.len();
    (observations, stats)
}

/// Groups observations by (entity, date, code) and sums amounts.
///
/// Output is ordered by entity, date, then code.
pub fn aggregate_observations(observations: &[RawObservation]) -> Vec<RawObservation> {
    let mut sums: BTreeMap<(RecordKey, i64), f64> = BTreeMap::new();
    for obs in observations {
        *sums.entry((obs.key(), obs.item_code)).or_insert(0.0) += obs.amount;
    }
    sums.into_iter()
        .map(|((key, code), amount)| RawObservation {
            entity_id: key.0,
            reporting_date: key.1,
            item_code: code,
            amount,
        })
        .collect()
}

/// Pivots observations into one record per (entity, date).
///
/// Amounts are aggregated by sum first; codes outside the mapping are
/// ignored. Rows are ordered by (entity, date).
pub fn pivot_observations(observations: &[RawObservation]) -> BankTable {
    let mut records: BTreeMap<RecordKey, BankRecord> = BTreeMap::new();
    let mut columns = Vec::new();

    for obs in aggregate_observations(observations) {
        let Some(field) = field_for_code(obs.item_code) else {
            continue;
        };
        columns.push(field);
        records
            .entry(obs.key())
            .or_insert_with_key(|key| BankRecord::from_key(key.clone()))
            .accumulate(field, obs.amount);
    }

    Table::new(columns, records.into_values().collect())
}

/// Inverse of [`pivot_observations`] for present cells.
pub fn unpivot(table: &BankTable) -> Vec<RawObservation> {
    table
        .iter()
        .flat_map(|record| {
            record.present_fields().filter_map(move |(field, amount)| {
                code_for_field(field).map(|code| RawObservation {
                    entity_id: record.entity_id.clone(),
                    reporting_date: record.reporting_date.clone(),
                    item_code: code,
                    amount,
                })
            })
        })
        .collect()
}

/// Result of reshaping one dataset.
#[derive(Debug, Clone)]
pub enum ReshapeOutcome {
    /// Successfully pivoted
    Wide {
        /// Wide table (possibly empty, key columns only)
        table: BankTable,
        /// Row accounting
        stats: ReshapeStats,
    },
    /// Key columns not identifiable; dataset returned unchanged
    NotReshapeable {
        /// The untouched dataset
        dataset: RawDataset,
        /// Canonical columns that were not found
        missing: Vec<&'static str>,
    },
}

impl ReshapeOutcome {
    /// True for [`ReshapeOutcome::Wide`].
    pub fn is_wide(&self) -> bool {
        matches!(self, ReshapeOutcome::Wide { .. })
    }

    /// The wide table, or an empty table for an unreshapeable dataset.
    pub fn into_table_or_empty(self) -> BankTable {
        match self {
            ReshapeOutcome::Wide { table, .. } => table,
            ReshapeOutcome::NotReshapeable { .. } => Table::empty(),
        }
    }
}

/// Reshapes a raw long-format dataset into a wide bank table.
///
/// Never fails: an unrecognised layout yields
/// [`ReshapeOutcome::NotReshapeable`] plus a `SchemaMismatch` diagnostic,
/// and a dataset without mapped codes yields an empty table plus a
/// `NoRelevantCodes` diagnostic.
pub fn reshape_dataset(dataset: RawDataset, diagnostics: &mut Vec<Diagnostic>) -> ReshapeOutcome {
    info!(source = %dataset.source, rows = dataset.len(), "Pivoting dataset");

    let mapping = match normalize_columns(dataset.headers.as_slice()) {
        Ok(mapping) => mapping,
        Err(missing) => {
            let diagnostic = Diagnostic::SchemaMismatch {
                source: dataset.source.clone(),
                missing: missing.clone(),
            };
            warn!("{}", diagnostic);
            diagnostics.push(diagnostic);
            return ReshapeOutcome::NotReshapeable { dataset, missing };
        }
    };

    let (observations, stats) = extract_observations(&dataset, &mapping);
    debug!(source = %dataset.source, ?stats, "Observations extracted");

    if observations.is_empty() {
        let diagnostic = Diagnostic::NoRelevantCodes {
            source: dataset.source.clone(),
        };
        warn!("{}", diagnostic);
        diagnostics.push(diagnostic);
        return ReshapeOutcome::Wide {
            table: Table::empty(),
            stats,
        };
    }

    let table = pivot_observations(&observations);
    info!(
        source = %dataset.source,
        banks = table.len(),
        columns = table.columns().len(),
        "Dataset pivoted"
    );
    ReshapeOutcome::Wide { table, stats }
}

#[cfg(test)]
mod tests {
    use super::*;
    use solvency_core::types::Field;

    fn long_dataset(rows: &[&[&str]]) -> RawDataset {
        RawDataset::from_strs("tr_oth", &["LEI_Code", "Period", "Item", "Amount"], rows)
    }

    #[test]
    fn test_classify_headers() {
        assert_eq!(ColumnRole::classify("LEI_Code"), Some(ColumnRole::EntityId));
        assert_eq!(ColumnRole::classify(" lei code "), Some(ColumnRole::EntityId));
        assert_eq!(ColumnRole::classify("Period"), Some(ColumnRole::ReportingDate));
        assert_eq!(ColumnRole::classify("Reference date"), Some(ColumnRole::ReportingDate));
        assert_eq!(ColumnRole::classify("Item"), Some(ColumnRole::ItemCode));
        assert_eq!(ColumnRole::classify("Carrying amount"), Some(ColumnRole::Amount));
        assert_eq!(ColumnRole::classify("LEI"), None);
        assert_eq!(ColumnRole::classify("Country"), None);
    }

    #[test]
    fn test_normalize_first_header_wins() {
        let mapping =
            normalize_columns(&["Country", "LEI_Code", "Period", "Date", "Item", "Amount"]).unwrap();
        assert_eq!(mapping.entity_id, 1);
        assert_eq!(mapping.reporting_date, 2);
        assert_eq!(mapping.item_code, 4);
        assert_eq!(mapping.amount, 5);
    }

    #[test]
    fn test_normalize_reports_missing_roles() {
        let missing = normalize_columns(&["LEI_Code", "Period", "Value"]).unwrap_err();
        assert_eq!(missing, vec!["item_code", "amount"]);
    }

    #[test]
    fn test_reshape_sums_duplicates_and_drops_unmapped() {
        let ds = long_dataset(&[
            &["E1", "20250630", "2520102", "10"],
            &["E1", "20250630", "2520138", "60"],
            &["E1", "20250630", "2520138", "40"],
            &["E1", "20250630", "9999999", "5"],
            &["E1", "20250630", "abc", "5"],
            &["E2", "20250630", "2520102", "n/a"],
        ]);
        let mut diags = Vec::new();
        let outcome = reshape_dataset(ds, &mut diags);
        assert!(diags.is_empty());

        let ReshapeOutcome::Wide { table, stats } = outcome else {
            panic!("expected wide table");
        };
        assert_eq!(stats.rows_read, 6);
        assert_eq!(stats.unmapped_codes, 1);
        assert_eq!(stats.non_numeric_codes, 1);
        assert_eq!(stats.unparsed_amounts, 1);
        assert_eq!(stats.observations, 3);

        assert_eq!(table.len(), 1);
        let record = &table.rows()[0];
        assert_eq!(record.get(Field::Cet1Capital), Some(10.0));
        assert_eq!(record.get(Field::RwaTotal), Some(100.0));
        assert_eq!(record.get(Field::TotalAssets), None);
        assert!(table.has_column(Field::RwaTotal));
        assert!(!table.has_column(Field::TotalAssets));
    }

    #[test]
    fn test_reshape_no_relevant_codes() {
        let ds = long_dataset(&[&["E1", "20250630", "1234567", "10"]]);
        let mut diags = Vec::new();
        let table = reshape_dataset(ds, &mut diags).into_table_or_empty();
        assert!(table.is_empty());
        assert!(table.columns().is_empty());
        assert_eq!(
            diags,
            vec![Diagnostic::NoRelevantCodes {
                source: "tr_oth".to_string()
            }]
        );
    }

    #[test]
    fn test_reshape_schema_mismatch_passes_through() {
        let ds = RawDataset::from_strs("tr_mrk", &["Bank", "Value"], &[&["E1", "1"]]);
        let mut diags = Vec::new();
        match reshape_dataset(ds.clone(), &mut diags) {
            ReshapeOutcome::NotReshapeable { dataset, missing } => {
                assert_eq!(dataset, ds);
                assert_eq!(missing.len(), 4);
            }
            other => panic!("expected passthrough, got {:?}", other),
        }
        assert!(matches!(diags[0], Diagnostic::SchemaMismatch { .. }));
    }

    #[test]
    fn test_dates_trimmed_and_ids_untouched() {
        let ds = long_dataset(&[&["0012", " 20250630 ", "2520102.0", "1e2"]]);
        let table = reshape_dataset(ds, &mut Vec::new()).into_table_or_empty();
        let record = &table.rows()[0];
        assert_eq!(record.entity_id.as_str(), "0012");
        assert_eq!(record.reporting_date.as_str(), "20250630");
        assert_eq!(record.get(Field::Cet1Capital), Some(100.0));
    }

    #[test]
    fn test_rows_ordered_by_key() {
        let obs = vec![
            RawObservation::new("B", "20250630", 2520102, 1.0),
            RawObservation::new("A", "20250630", 2520102, 2.0),
            RawObservation::new("A", "20250331", 2520102, 3.0),
        ];
        let table = pivot_observations(&obs);
        let keys: Vec<_> = table
            .iter()
            .map(|r| format!("{}/{}", r.entity_id, r.reporting_date))
            .collect();
        assert_eq!(keys, vec!["A/20250331", "A/20250630", "B/20250630"]);
    }

    #[test]
    fn test_unpivot_inverse() {
        let obs = vec![
            RawObservation::new("A", "20250630", 2520102, 1.0),
            RawObservation::new("A", "20250630", 2520710, 2.0),
        ];
        let mut back = unpivot(&pivot_observations(&obs));
        back.sort_by_key(|o| o.item_code);
        assert_eq!(back, aggregate_observations(&obs));
    }
}
