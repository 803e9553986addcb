//! Column-aware tables of records.
//!
//! A [`Table`] pairs rows with the set of field columns that exist in it. A
//! column can exist with every cell missing; that is different from the column
//! being absent, and the Texas-ratio fill policy depends on the difference.

use std::collections::BTreeSet;

use super::field::Field;
use super::ids::ReportingDate;
use super::record::{BankRecord, ProxiedRecord, SolvencyRecord};

/// Access to the underlying reported fields of a stage record.
pub trait AsBankRecord {
    /// The wrapped bank record.
    fn bank_record(&self) -> &BankRecord;
}

impl AsBankRecord for BankRecord {
    fn bank_record(&self) -> &BankRecord {
        self
    }
}

impl AsBankRecord for ProxiedRecord {
    fn bank_record(&self) -> &BankRecord {
        &self.record
    }
}

impl AsBankRecord for SolvencyRecord {
    fn bank_record(&self) -> &BankRecord {
        &self.proxied.record
    }
}

/// Rows plus the set of present field columns.
#[derive(Clone, Debug, PartialEq)]
pub struct Table<R> {
    columns: BTreeSet<Field>,
    rows: Vec<R>,
}

/// Table of reshaped/merged bank records.
pub type BankTable = Table<BankRecord>;
/// Table after the proxy stage.
pub type ProxiedTable = Table<ProxiedRecord>;
/// Table after RWA, CVA and ratio computation.
pub type SolvencyTable = Table<SolvencyRecord>;

impl<R> Default for Table<R> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<R> Table<R> {
    /// Table with no rows and only the key columns.
    pub fn empty() -> Self {
        Self {
            columns: BTreeSet::new(),
            rows: Vec::new(),
        }
    }

    /// Creates a table from columns and rows.
    pub fn new(columns: impl IntoIterator<Item = Field>, rows: Vec<R>) -> Self {
        Self {
            columns: columns.into_iter().collect(),
            rows,
        }
    }

    /// Field columns present in the table.
    pub fn columns(&self) -> &BTreeSet<Field> {
        &self.columns
    }

    /// True if `field` exists as a column (cells may still be missing).
    #[inline]
    pub fn has_column(&self, field: Field) -> bool {
        self.columns.contains(&field)
    }

    /// Adds `field` as a column. Cells are not touched, so rows that lack the
    /// value read as missing. Returns true if the column was newly added.
    pub fn ensure_column(&mut self, field: Field) -> bool {
        self.columns.insert(field)
    }

    /// Row slice.
    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    /// Mutable row slice.
    pub fn rows_mut(&mut self) -> &mut [R] {
        &mut self.rows
    }

    /// Consumes the table, returning its rows.
    pub fn into_rows(self) -> Vec<R> {
        self.rows
    }

    /// Splits the table into columns and rows.
    pub fn into_parts(self) -> (BTreeSet<Field>, Vec<R>) {
        (self.columns, self.rows)
    }

    /// Number of rows.
    #[inline]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True if the table has no rows.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterator over rows.
    pub fn iter(&self) -> std::slice::Iter<'_, R> {
        self.rows.iter()
    }

    /// Maps every row into the next stage, keeping the column set.
    pub fn map_rows<S, F>(self, f: F) -> Table<S>
    where
        F: FnMut(R) -> S,
    {
        Table {
            columns: self.columns,
            rows: self.rows.into_iter().map(f).collect(),
        }
    }
}

impl<R: AsBankRecord> Table<R> {
    /// Sorted distinct reporting dates.
    pub fn distinct_dates(&self) -> Vec<ReportingDate> {
        self.rows
            .iter()
            .map(|r| r.bank_record().reporting_date.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Keeps only rows reported at `date`.
    pub fn retain_date(&mut self, date: &ReportingDate) {
        self.rows.retain(|r| &r.bank_record().reporting_date == date);
    }

    /// Number of rows whose `field` is missing.
    pub fn count_missing(&self, field: Field) -> usize {
        self.rows
            .iter()
            .filter(|r| r.bank_record().get(field).is_none())
            .count()
    }
}

impl<'a, R> IntoIterator for &'a Table<R> {
    type Item = &'a R;
    type IntoIter = std::slice::Iter<'a, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
