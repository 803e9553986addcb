//! # infra_config: Solvency Engine Configuration
//!
//! Explicit configuration object for a pipeline run. All paths come from
//! here; nothing is derived from the install location of the binary.
//!
//! Loading order:
//! 1. defaults ([`SolvencyConfig::default`])
//! 2. TOML file ([`SolvencyConfig::load`])
//! 3. environment overrides ([`SolvencyConfig::with_env_override`])
//! 4. command-line flags (applied by the service layer)
//!
//! ```toml
//! input_dir = "data/raw"
//! output_dir = "data/processed"
//! target_date = "20250630"
//!
//! [files]
//! other = "tr_oth.csv"
//!
//! [cva]
//! credit_spread = 0.02
//! ```

mod config;
mod error;

pub use config::{CvaConfig, InputFiles, SolvencyConfig, DEFAULT_TARGET_DATE};
pub use error::ConfigError;
