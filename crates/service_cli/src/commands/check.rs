//! Check command implementation
//!
//! Validates the configuration and verifies that every raw extract exists.

use adapter_loader::LoaderError;
use infra_config::SolvencyConfig;
use tracing::{info, warn};

use crate::config::input_paths;
use crate::Result;

/// Run the check command
pub fn run(config: &SolvencyConfig) -> Result<()> {
    info!("Checking configuration...");
    info!("  Input directory: {}", config.input_dir.display());
    info!("  Output directory: {}", config.output_dir.display());
    info!("  Target date: {}", config.target_date);
    info!("  CVA add-on: {}", if config.cva.enabled { "enabled" } else { "disabled" });

    let paths = input_paths(config);
    let missing = paths.missing();
    for role in &missing {
        warn!("  Missing {} extract: {}", role, paths.path(*role).display());
    }

    if let Some(role) = missing.first() {
        return Err(LoaderError::MissingFile {
            role: *role,
            path: paths.path(*role).to_path_buf(),
        }
        .into());
    }

    if config.reuse_master && config.master_path().exists() {
        info!("  Master dataset will be reused: {}", config.master_path().display());
    }

    info!("Configuration OK");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CliError;

    #[test]
    fn test_check_reports_missing_extract() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("tr_oth.csv"), "LEI_Code,Period,Item,Amount\n").unwrap();
        let config = SolvencyConfig {
            input_dir: dir.path().to_path_buf(),
            ..Default::default()
        };

        match run(&config) {
            Err(CliError::Loader(LoaderError::MissingFile { path, .. })) => {
                assert!(path.ends_with("tr_cre.csv"));
            }
            other => panic!("expected missing credit extract, got {:?}", other),
        }
    }

    #[test]
    fn test_check_passes_with_all_extracts() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["tr_oth.csv", "tr_cre.csv", "tr_mrk.csv"] {
            std::fs::write(dir.path().join(name), "LEI_Code,Period,Item,Amount\n").unwrap();
        }
        let config = SolvencyConfig {
            input_dir: dir.path().to_path_buf(),
            ..Default::default()
        };
        assert!(run(&config).is_ok());
    }
}
