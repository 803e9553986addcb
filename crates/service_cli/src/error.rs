//! CLI error types

use adapter_loader::LoaderError;
use infra_config::ConfigError;
use solvency_engine::CvaError;
use thiserror::Error;

/// CLI error type
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded or is invalid
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Raw extracts or a table could not be read or written
    #[error("Data error: {0}")]
    Loader(#[from] LoaderError),

    /// CVA parameters rejected by the engine
    #[error("CVA error: {0}")]
    Cva(#[from] CvaError),

    /// No bank survived the merge and date selection
    #[error("Dataset is empty after merge. Check the extracts and the target date {0}")]
    EmptyDataset(String),

    /// A file the command needs does not exist
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Malformed results file
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;
    use adapter_loader::DatasetRole;
    use std::path::PathBuf;

    #[test]
    fn test_missing_file_message_names_the_file() {
        let err: CliError = LoaderError::MissingFile {
            role: DatasetRole::CreditRisk,
            path: PathBuf::from("data/raw/tr_cre.csv"),
        }
        .into();
        assert!(err.to_string().contains("tr_cre.csv"));
    }

    #[test]
    fn test_empty_dataset_message() {
        let err = CliError::EmptyDataset("20250630".to_string());
        assert!(err.to_string().contains("20250630"));
    }
}
