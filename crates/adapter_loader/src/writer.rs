//! Persistence of wide tables.
//!
//! Missing values and `NaN` are written as empty cells, so downstream tools
//! see "no value" rather than a misleading zero.

use std::path::Path;

use solvency_core::types::{
    BankRecord, BankTable, EntityId, Field, ReportingDate, SolvencyRecord, SolvencyTable, Table,
};
use tracing::{info, warn};

use crate::error::{LoaderError, Result};

/// Header of the entity identifier column.
pub const ENTITY_COLUMN: &str = "LEI";
/// Header of the reporting date column.
pub const DATE_COLUMN: &str = "Date";

/// Derived columns of the final results, in output order.
pub const DERIVED_COLUMNS: [&str; 12] = [
    "EAD_Final",
    "NPL_Ratio",
    "PD_Proxy",
    "LGD_Proxy",
    "RWA_Synthetic",
    "RWA_Final",
    "CVA_Charge",
    "RWA_CVA_Addon",
    "CET1_Ratio_Pct",
    "TCR_Pct",
    "Leverage_Ratio_Pct",
    "Texas_Ratio_Pct",
];

fn format_value(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => v.to_string(),
        _ => String::new(),
    }
}

fn ordered_columns<R>(table: &Table<R>) -> Vec<Field> {
    Field::ALL
        .iter()
        .copied()
        .filter(|f| table.has_column(*f))
        .collect()
}

fn key_and_fields(record: &BankRecord, columns: &[Field]) -> Vec<String> {
    let mut row = Vec::with_capacity(columns.len() + 2);
    row.push(record.entity_id.to_string());
    row.push(record.reporting_date.to_string());
    row.extend(columns.iter().map(|f| format_value(record.get(*f))));
    row
}

fn header(columns: &[Field]) -> Vec<&'static str> {
    let mut header = vec![ENTITY_COLUMN, DATE_COLUMN];
    header.extend(columns.iter().map(|f| f.column_name()));
    header
}

/// Writes a bank table (the master dataset) in wide format.
pub fn write_bank_table(path: impl AsRef<Path>, table: &BankTable) -> Result<()> {
    let path = path.as_ref();
    let columns = ordered_columns(table);
    let mut writer = csv::Writer::from_path(path)?;

    writer.write_record(header(&columns))?;
    for record in table {
        writer.write_record(key_and_fields(record, &columns))?;
    }
    writer.flush()?;

    info!(path = %path.display(), rows = table.len(), "Master dataset written");
    Ok(())
}

/// Reads a master dataset written by [`write_bank_table`].
///
/// Columns that are not field names are ignored. Empty or non-numeric cells
/// read as missing.
pub fn read_bank_table(path: impl AsRef<Path>) -> Result<BankTable> {
    let path = path.as_ref();
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)?;
    let headers = reader.headers()?.clone();

    let position = |name: &str| headers.iter().position(|h| h == name);
    let (entity_idx, date_idx) = match (position(ENTITY_COLUMN), position(DATE_COLUMN)) {
        (Some(e), Some(d)) => (e, d),
        _ => {
            return Err(LoaderError::InvalidTable {
                path: path.to_path_buf(),
                reason: format!("expected {} and {} columns", ENTITY_COLUMN, DATE_COLUMN),
            })
        }
    };

    let field_columns: Vec<(usize, Field)> = headers
        .iter()
        .enumerate()
        .filter_map(|(i, h)| h.parse::<Field>().ok().map(|f| (i, f)))
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let mut bank = BankRecord::new(
            EntityId::new(record.get(entity_idx).unwrap_or_default()),
            ReportingDate::new(record.get(date_idx).unwrap_or_default()),
        );
        for (i, field) in &field_columns {
            let value = record.get(*i).and_then(|cell| cell.parse::<f64>().ok());
            bank.set_opt(*field, value);
        }
        rows.push(bank);
    }

    if rows.is_empty() {
        warn!(path = %path.display(), "Master dataset has no rows");
    }

    Ok(Table::new(field_columns.into_iter().map(|(_, f)| f), rows))
}

fn derived_values(record: &SolvencyRecord) -> [Option<f64>; DERIVED_COLUMNS.len()] {
    let p = &record.proxied;
    [
        Some(p.ead_final),
        Some(p.npl_ratio),
        Some(p.pd_proxy),
        Some(p.lgd_proxy),
        Some(record.rwa_synthetic),
        Some(record.rwa_final),
        record.cva_charge,
        record.rwa_cva_addon,
        Some(record.cet1_ratio_pct),
        Some(record.tcr_pct),
        Some(record.leverage_ratio_pct),
        Some(record.texas_ratio_pct),
    ]
}

/// Writes the final results: key, reported fields, then derived fields.
pub fn write_solvency_table(path: impl AsRef<Path>, table: &SolvencyTable) -> Result<()> {
    let path = path.as_ref();
    let columns = ordered_columns(table);
    let mut writer = csv::Writer::from_path(path)?;

    let mut head = header(&columns);
    head.extend(DERIVED_COLUMNS);
    writer.write_record(&head)?;

    for record in table {
        let mut row = key_and_fields(record.record(), &columns);
        row.extend(derived_values(record).iter().map(|v| format_value(*v)));
        writer.write_record(&row)?;
    }
    writer.flush()?;

    info!(path = %path.display(), rows = table.len(), "Results written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use solvency_core::types::ProxiedRecord;

    fn sample_table() -> BankTable {
        let mut a = BankRecord::new(EntityId::new("00A"), ReportingDate::new("20250630"));
        a.set(Field::Cet1Capital, 10.5);
        a.set(Field::RwaTotal, 0.0);
        let mut b = BankRecord::new(EntityId::new("00B"), ReportingDate::new("20250630"));
        b.set(Field::Cet1Capital, 7.0);
        Table::new([Field::Cet1Capital, Field::RwaTotal], vec![a, b])
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(Some(1.5)), "1.5");
        assert_eq!(format_value(Some(f64::NAN)), "");
        assert_eq!(format_value(None), "");
    }

    #[test]
    fn test_master_round_trip_keeps_missing_and_zero() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("master_dataset.csv");
        let table = sample_table();

        write_bank_table(&path, &table).unwrap();
        let back = read_bank_table(&path).unwrap();

        assert_eq!(back, table);
        assert_eq!(back.rows()[0].get(Field::RwaTotal), Some(0.0));
        assert_eq!(back.rows()[1].get(Field::RwaTotal), None);
        assert_eq!(back.rows()[0].entity_id.as_str(), "00A");
    }

    #[test]
    fn test_read_rejects_missing_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.csv");
        std::fs::write(&path, "x,y\n1,2\n").unwrap();
        assert!(matches!(
            read_bank_table(&path),
            Err(LoaderError::InvalidTable { .. })
        ));
    }

    #[test]
    fn test_results_file_layout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("final.csv");
        let rows = sample_table()
            .map_rows(|record| {
                let proxied = ProxiedRecord {
                    record,
                    ead_final: 0.0,
                    npl_ratio: 0.0,
                    pd_proxy: 0.0,
                    lgd_proxy: 0.45,
                };
                SolvencyRecord::with_rwa(proxied, 0.0, f64::NAN)
            });

        write_solvency_table(&path, &rows).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        let mut lines = text.lines();
        let head = lines.next().unwrap();
        assert!(head.starts_with("LEI,Date,CET1_Capital,RWA_Total,EAD_Final"));
        assert!(head.ends_with("Texas_Ratio_Pct"));
        let first = lines.next().unwrap();
        assert!(first.starts_with("00A,20250630,10.5,0,0,0,0,0.45,0,,"));
    }
}
