//! Configuration error types.

use thiserror::Error;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("IO error reading {path}: {message}")]
    Io {
        /// File path
        path: String,
        /// Underlying error message
        message: String,
    },

    /// Config file is not valid TOML for this schema
    #[error("Parse error: {0}")]
    Parse(String),

    /// Target date is not a calendar date in YYYYMMDD form
    #[error("Invalid target date '{0}'. Expected YYYYMMDD")]
    InvalidTargetDate(String),

    /// One or more values failed validation
    #[error("Validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_display_joins() {
        let err = ConfigError::Validation(vec!["Error 1".to_string(), "Error 2".to_string()]);
        assert_eq!(err.to_string(), "Validation errors: Error 1; Error 2");
    }

    #[test]
    fn test_invalid_target_date_display() {
        let err = ConfigError::InvalidTargetDate("2025-06-30".to_string());
        assert!(err.to_string().contains("YYYYMMDD"));
    }
}
