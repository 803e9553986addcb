//! Non-fatal pipeline diagnostics.
//!
//! Stages never abort on data anomalies. They degrade (pass a dataset
//! through, materialise a missing column, fall back to another date) and
//! record what happened as a [`Diagnostic`], which the caller logs and can
//! surface in reports.

use std::fmt;

use super::field::Field;
use super::ids::ReportingDate;

/// A data anomaly absorbed by a pipeline stage.
///
/// # Examples
/// ```
/// use solvency_core::types::{Diagnostic, ReportingDate};
///
/// let d = Diagnostic::DateFallback {
///     target: ReportingDate::new("20250630"),
///     selected: ReportingDate::new("20250331"),
/// };
/// assert_eq!(
///     d.to_string(),
///     "Target date 20250630 not available, using latest date 20250331"
/// );
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Diagnostic {
    /// A dataset lacks recognisable key columns and was passed through unreshaped.
    SchemaMismatch {
        /// Dataset label
        source: String,
        /// Canonical columns that could not be identified
        missing: Vec<&'static str>,
    },

    /// A dataset had no rows with a mapped item code.
    NoRelevantCodes {
        /// Dataset label
        source: String,
    },

    /// A stage input column was absent and has been materialised.
    MissingField {
        /// Stage that materialised the column
        stage: &'static str,
        /// The absent field
        field: Field,
    },

    /// The target reporting date was absent; the latest date was used.
    DateFallback {
        /// Configured target date
        target: ReportingDate,
        /// Date actually selected
        selected: ReportingDate,
    },

    /// The merged table had no reporting dates at all.
    NoDates,

    /// No reported RWA column exists; RWA comes entirely from the model.
    SyntheticRwaOnly,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::SchemaMismatch { source, missing } => write!(
                f,
                "Dataset {} is not in long format (missing columns: {})",
                source,
                missing.join(", ")
            ),
            Diagnostic::NoRelevantCodes { source } => {
                write!(f, "No mapped item codes found in {}", source)
            }
            Diagnostic::MissingField { stage, field } => write!(
                f,
                "Column {} missing at {} stage, treated as all-missing",
                field, stage
            ),
            Diagnostic::DateFallback { target, selected } => write!(
                f,
                "Target date {} not available, using latest date {}",
                target, selected
            ),
            Diagnostic::NoDates => write!(f, "No reporting dates available"),
            Diagnostic::SyntheticRwaOnly => {
                write!(f, "RWA_Total missing, using synthetic RWA for every bank")
            }
        }
    }
}
