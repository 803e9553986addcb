//! Command-line overrides and conversion of the run configuration into
//! engine settings.

use std::path::{Path, PathBuf};

use adapter_loader::InputPaths;
use clap::Args;
use infra_config::{CvaConfig, SolvencyConfig};
use solvency_engine::{CvaParams, CvaSettings, EngineSettings};

use crate::Result;

/// Flags that override the configuration file.
#[derive(Args, Debug, Clone, Default)]
pub struct Overrides {
    /// Target reporting date (YYYYMMDD)
    #[arg(short, long)]
    pub target_date: Option<String>,

    /// Directory holding tr_oth.csv, tr_cre.csv and tr_mrk.csv
    #[arg(short, long)]
    pub input_dir: Option<PathBuf>,

    /// Directory for master_dataset.csv and the results
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,
}

impl Overrides {
    /// Applies the flags that were given.
    pub fn apply(&self, mut config: SolvencyConfig) -> SolvencyConfig {
        if let Some(date) = &self.target_date {
            config.target_date = date.clone();
        }
        if let Some(dir) = &self.input_dir {
            config.input_dir = dir.clone();
        }
        if let Some(dir) = &self.output_dir {
            config.output_dir = dir.clone();
        }
        config
    }
}

/// Loads file, environment and flags in that order, then validates.
pub fn load(path: &Path, overrides: &Overrides) -> Result<SolvencyConfig> {
    let config = SolvencyConfig::load_or_default(path)?.with_env_override();
    let config = overrides.apply(config);
    config.validate()?;
    Ok(config)
}

/// Locations of the raw extracts.
pub fn input_paths(config: &SolvencyConfig) -> InputPaths {
    InputPaths {
        other: config.other_path(),
        credit: config.credit_path(),
        market: config.market_path(),
    }
}

fn cva_settings(cva: &CvaConfig) -> CvaSettings {
    CvaSettings {
        params: CvaParams {
            spot: cva.spot,
            strike: cva.strike,
            maturity: cva.maturity,
            rate: cva.rate,
            volatility: cva.volatility,
            credit_spread: cva.credit_spread,
            lgd: cva.lgd,
            n_steps: cva.n_steps,
        },
        exposure_share: cva.exposure_share,
        min_capital_ratio: cva.min_capital_ratio,
    }
}

/// Engine settings for a run.
pub fn engine_settings(config: &SolvencyConfig) -> EngineSettings {
    if config.cva.enabled {
        EngineSettings::with_cva(cva_settings(&config.cva))
    } else {
        EngineSettings::without_cva()
    }
}
