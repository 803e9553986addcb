//! Run configuration management.
//!
//! Handles loading the run configuration from TOML files with environment
//! variable override support.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::ConfigError;

/// Reporting date of the exercise the mapping was built for.
pub const DEFAULT_TARGET_DATE: &str = "20250630";

const VALID_LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// File names of the three raw extracts inside `input_dir`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct InputFiles {
    /// Other disclosures extract
    pub other: String,
    /// Credit risk extract
    pub credit: String,
    /// Market risk extract
    pub market: String,
}

impl Default for InputFiles {
    fn default() -> Self {
        Self {
            other: "tr_oth.csv".to_string(),
            credit: "tr_cre.csv".to_string(),
            market: "tr_mrk.csv".to_string(),
        }
    }
}

/// Reference market parameters for the unit CVA charge and its scaling.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CvaConfig {
    /// Apply the CVA add-on to RWA
    pub enabled: bool,
    /// Underlying spot
    pub spot: f64,
    /// Option strike
    pub strike: f64,
    /// Maturity in years
    pub maturity: f64,
    /// Risk-free rate
    pub rate: f64,
    /// Volatility
    pub volatility: f64,
    /// Counterparty credit spread (constant hazard rate)
    pub credit_spread: f64,
    /// Loss given default of the counterparty
    pub lgd: f64,
    /// Time steps of the exposure integral
    pub n_steps: usize,
    /// Share of leverage exposure subject to CVA
    pub exposure_share: f64,
    /// Minimum capital ratio used to convert the charge into RWA
    pub min_capital_ratio: f64,
}

impl Default for CvaConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            spot: 100.0,
            strike: 100.0,
            maturity: 1.0,
            rate: 0.03,
            volatility: 0.20,
            credit_spread: 0.02,
            lgd: 0.45,
            n_steps: 50,
            exposure_share: 0.001,
            min_capital_ratio: 0.08,
        }
    }
}

/// Solvency engine configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SolvencyConfig {
    /// Directory holding the raw extracts
    pub input_dir: PathBuf,
    /// Directory for the master dataset and results
    pub output_dir: PathBuf,
    /// Target reporting date (YYYYMMDD)
    pub target_date: String,
    /// Reuse an existing master dataset instead of re-running the ETL
    pub reuse_master: bool,
    /// Log level
    pub log_level: String,
    /// Extract file names
    pub files: InputFiles,
    /// CVA parameters
    pub cva: CvaConfig,
}

impl Default for SolvencyConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("data/raw"),
            output_dir: PathBuf::from("data/processed"),
            target_date: DEFAULT_TARGET_DATE.to_string(),
            reuse_master: false,
            log_level: "info".to_string(),
            files: InputFiles::default(),
            cva: CvaConfig::default(),
        }
    }
}

impl SolvencyConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load from `path` if it exists, otherwise defaults
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Apply environment variable overrides
    pub fn with_env_override(mut self) -> Self {
        if let Ok(dir) = std::env::var("SOLVENCY_INPUT_DIR") {
            self.input_dir = PathBuf::from(dir);
        }

        if let Ok(dir) = std::env::var("SOLVENCY_OUTPUT_DIR") {
            self.output_dir = PathBuf::from(dir);
        }

        if let Ok(date) = std::env::var("SOLVENCY_TARGET_DATE") {
            self.target_date = date;
        }

        if let Ok(level) = std::env::var("SOLVENCY_LOG_LEVEL") {
            self.log_level = level;
        }

        self
    }

    /// Parse the target date as a calendar date
    pub fn target_naive_date(&self) -> Result<NaiveDate, ConfigError> {
        let trimmed = self.target_date.trim();
        if trimmed.len() != 8 {
            return Err(ConfigError::InvalidTargetDate(self.target_date.clone()));
        }
        NaiveDate::parse_from_str(trimmed, "%Y%m%d")
            .map_err(|_| ConfigError::InvalidTargetDate(self.target_date.clone()))
    }

    /// Validate the configuration, collecting every problem
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if let Err(e) = self.target_naive_date() {
            errors.push(e.to_string());
        }

        if !VALID_LOG_LEVELS.contains(&self.log_level.to_lowercase().as_str()) {
            errors.push(format!(
                "Invalid log_level '{}'. Valid values: {:?}",
                self.log_level, VALID_LOG_LEVELS
            ));
        }

        if self.input_dir.as_os_str().is_empty() {
            errors.push("input_dir cannot be empty".to_string());
        }

        if self.output_dir.as_os_str().is_empty() {
            errors.push("output_dir cannot be empty".to_string());
        }

        for (name, file) in [
            ("other", &self.files.other),
            ("credit", &self.files.credit),
            ("market", &self.files.market),
        ] {
            if file.trim().is_empty() {
                errors.push(format!("files.{} cannot be empty", name));
            }
        }

        let cva = &self.cva;
        if cva.n_steps == 0 {
            errors.push("cva.n_steps must be at least 1".to_string());
        }
        for (name, value) in [
            ("spot", cva.spot),
            ("strike", cva.strike),
            ("maturity", cva.maturity),
            ("volatility", cva.volatility),
            ("min_capital_ratio", cva.min_capital_ratio),
        ] {
            if !(value > 0.0) {
                errors.push(format!("cva.{} must be positive, got {}", name, value));
            }
        }
        if !(cva.credit_spread >= 0.0) {
            errors.push(format!(
                "cva.credit_spread must be non-negative, got {}",
                cva.credit_spread
            ));
        }
        if !(0.0..=1.0).contains(&cva.lgd) {
            errors.push(format!("cva.lgd must be in [0, 1], got {}", cva.lgd));
        }
        if !(cva.exposure_share >= 0.0) {
            errors.push(format!(
                "cva.exposure_share must be non-negative, got {}",
                cva.exposure_share
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Load from file with environment overrides and validate
    pub fn load_with_env_and_validate(path: &Path) -> Result<Self, ConfigError> {
        let config = Self::load_or_default(path)?.with_env_override();
        config.validate()?;
        Ok(config)
    }

    /// Path of the other disclosures extract
    pub fn other_path(&self) -> PathBuf {
        self.input_dir.join(&self.files.other)
    }

    /// Path of the credit risk extract
    pub fn credit_path(&self) -> PathBuf {
        self.input_dir.join(&self.files.credit)
    }

    /// Path of the market risk extract
    pub fn market_path(&self) -> PathBuf {
        self.input_dir.join(&self.files.market)
    }

    /// Path of the intermediate master dataset
    pub fn master_path(&self) -> PathBuf {
        self.output_dir.join("master_dataset.csv")
    }

    /// Path of the final results file
    pub fn results_path(&self) -> PathBuf {
        self.output_dir
            .join(format!("final_results_{}.csv", self.target_date.trim()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SolvencyConfig::default();
        assert_eq!(config.target_date, "20250630");
        assert!(config.cva.enabled);
        assert_eq!(config.cva.n_steps, 50);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_paths() {
        let config = SolvencyConfig::default();
        assert_eq!(config.other_path(), PathBuf::from("data/raw/tr_oth.csv"));
        assert_eq!(config.market_path(), PathBuf::from("data/raw/tr_mrk.csv"));
        assert_eq!(
            config.master_path(),
            PathBuf::from("data/processed/master_dataset.csv")
        );
        assert_eq!(
            config.results_path(),
            PathBuf::from("data/processed/final_results_20250630.csv")
        );
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = SolvencyConfig::from_toml_str(
            r#"
            target_date = "20250331"

            [cva]
            credit_spread = 0.05
            "#,
        )
        .unwrap();
        assert_eq!(config.target_date, "20250331");
        assert_eq!(config.cva.credit_spread, 0.05);
        assert_eq!(config.cva.spot, 100.0);
        assert_eq!(config.files.credit, "tr_cre.csv");
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(
            SolvencyConfig::from_toml_str("target_date = [1, 2]"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_target_date_validation() {
        let mut config = SolvencyConfig::default();
        for bad in ["2025-06-30", "20251340", "2025063", ""] {
            config.target_date = bad.to_string();
            assert!(config.target_naive_date().is_err(), "{} should be rejected", bad);
        }
        config.target_date = "20240229".to_string();
        assert!(config.target_naive_date().is_ok());
    }

    #[test]
    fn test_validate_collects_multiple_errors() {
        let mut config = SolvencyConfig::default();
        config.log_level = "loud".to_string();
        config.target_date = "bad".to_string();
        config.cva.n_steps = 0;
        config.cva.volatility = 0.0;
        config.cva.lgd = 1.5;

        match config.validate() {
            Err(ConfigError::Validation(errors)) => {
                assert!(errors.len() >= 5, "got {:?}", errors);
                assert!(errors.iter().any(|e| e.contains("log_level")));
                assert!(errors.iter().any(|e| e.contains("n_steps")));
                assert!(errors.iter().any(|e| e.contains("volatility")));
            }
            other => panic!("Expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_nan_spread() {
        let mut config = SolvencyConfig::default();
        config.cva.credit_spread = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_env_override() {
        std::env::set_var("SOLVENCY_TARGET_DATE", "20241231");
        let config = SolvencyConfig::default().with_env_override();
        std::env::remove_var("SOLVENCY_TARGET_DATE");
        assert_eq!(config.target_date, "20241231");
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = SolvencyConfig::load_or_default(&dir.path().join("none.toml")).unwrap();
        assert_eq!(config, SolvencyConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("solvency.toml");
        std::fs::write(&path, "output_dir = \"out\"\nreuse_master = true\n").unwrap();
        let config = SolvencyConfig::load(&path).unwrap();
        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert!(config.reuse_master);
    }
}
