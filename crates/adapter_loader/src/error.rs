//! Loader error types.

use std::path::PathBuf;

use thiserror::Error;

use crate::dataset::DatasetRole;

/// Errors raised while reading or writing extract files.
#[derive(Debug, Error)]
pub enum LoaderError {
    /// A required raw input cannot be located.
    #[error("Missing {role} extract: {}", path.display())]
    MissingFile {
        /// Which dataset was expected
        role: DatasetRole,
        /// Path that was checked
        path: PathBuf,
    },

    /// The file exists but has no header line.
    #[error("Empty file: {}", .0.display())]
    EmptyFile(PathBuf),

    /// A persisted table lacks its key columns.
    #[error("Invalid table file {}: {reason}", path.display())]
    InvalidTable {
        /// File that was read
        path: PathBuf,
        /// What is wrong with it
        reason: String,
    },

    /// CSV parsing or writing failure.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Underlying I/O failure.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for loader operations.
pub type Result<T> = std::result::Result<T, LoaderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_names_role_and_path() {
        let err = LoaderError::MissingFile {
            role: DatasetRole::CreditRisk,
            path: PathBuf::from("data/raw/tr_cre.csv"),
        };
        assert_eq!(
            err.to_string(),
            "Missing credit risk extract: data/raw/tr_cre.csv"
        );
    }

    #[test]
    fn test_error_is_error_trait() {
        let err: Box<dyn std::error::Error> =
            Box::new(LoaderError::EmptyFile(PathBuf::from("x.csv")));
        assert!(err.to_string().contains("x.csv"));
    }
}
