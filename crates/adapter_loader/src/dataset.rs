//! Untyped raw datasets as read from disk.

use std::fmt;

/// The three disclosure extracts consumed by the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatasetRole {
    /// Other disclosures template (capital, RWA, balance sheet, leverage)
    OtherDisclosures,
    /// Credit risk template (loans, provisions, non-performing exposures)
    CreditRisk,
    /// Market risk template
    MarketRisk,
}

impl DatasetRole {
    /// Short label used in diagnostics and logs.
    pub fn label(&self) -> &'static str {
        match self {
            DatasetRole::OtherDisclosures => "tr_oth",
            DatasetRole::CreditRisk => "tr_cre",
            DatasetRole::MarketRisk => "tr_mrk",
        }
    }

    /// Default file name of the extract.
    pub fn default_file_name(&self) -> &'static str {
        match self {
            DatasetRole::OtherDisclosures => "tr_oth.csv",
            DatasetRole::CreditRisk => "tr_cre.csv",
            DatasetRole::MarketRisk => "tr_mrk.csv",
        }
    }
}

impl fmt::Display for DatasetRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetRole::OtherDisclosures => write!(f, "other disclosures"),
            DatasetRole::CreditRisk => write!(f, "credit risk"),
            DatasetRole::MarketRisk => write!(f, "market risk"),
        }
    }
}

/// A tabular extract with string cells.
///
/// No cell is interpreted at load time. Type coercion happens in the
/// reshaper, column by column, so identifiers are never parsed as numbers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDataset {
    /// Label used in diagnostics
    pub source: String,
    /// Header row as read
    pub headers: Vec<String>,
    /// Data rows; short rows are padded with empty cells
    pub rows: Vec<Vec<String>>,
}

impl RawDataset {
    /// Creates a dataset, padding every row to the header width.
    pub fn new(source: impl Into<String>, headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let width = headers.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width.max(row.len()), String::new());
                row
            })
            .collect();
        Self {
            source: source.into(),
            headers,
            rows,
        }
    }

    /// Convenience constructor from string slices.
    pub fn from_strs(source: &str, headers: &[&str], rows: &[&[&str]]) -> Self {
        Self::new(
            source,
            headers.iter().map(|h| h.to_string()).collect(),
            rows.iter()
                .map(|r| r.iter().map(|c| c.to_string()).collect())
                .collect(),
        )
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True if there are no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cell at (`row`, `col`), empty string if out of range.
    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(String::as_str)
            .unwrap_or("")
    }
}

/// The three raw extracts of one pipeline run.
#[derive(Debug, Clone)]
pub struct RawInputs {
    /// Other disclosures extract
    pub other: RawDataset,
    /// Credit risk extract
    pub credit: RawDataset,
    /// Market risk extract
    pub market: RawDataset,
}
