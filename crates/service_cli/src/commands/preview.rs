//! Preview command implementation
//!
//! Prints the key columns of the first banks in a results file.

use std::fmt::Write as _;
use std::path::Path;

use infra_config::SolvencyConfig;
use tracing::info;

use crate::{CliError, Result};

/// Columns shown in a preview, when present in the file.
pub const PREVIEW_COLUMNS: [&str; 5] = [
    "LEI",
    "CET1_Ratio_Pct",
    "RWA_Final",
    "NPL_Amount",
    "CVA_Charge",
];

fn format_cell(column: &str, cell: &str) -> String {
    if cell.is_empty() {
        return "NaN".to_string();
    }
    match cell.parse::<f64>() {
        Ok(value) if column != "LEI" => format!("{:.4}", value),
        _ => cell.to_string(),
    }
}

/// Renders the first `rows` banks of a results file as an aligned text table.
pub fn render(path: &Path, rows: usize) -> Result<String> {
    let mut reader = csv::Reader::from_path(path)?;
    let headers = reader.headers()?.clone();

    let selected: Vec<(usize, &str)> = PREVIEW_COLUMNS
        .iter()
        .filter_map(|name| headers.iter().position(|h| h == *name).map(|i| (i, *name)))
        .collect();

    let mut lines: Vec<Vec<String>> = vec![selected.iter().map(|(_, n)| n.to_string()).collect()];
    for record in reader.records().take(rows) {
        let record = record?;
        lines.push(
            selected
                .iter()
                .map(|(i, name)| format_cell(name, record.get(*i).unwrap_or_default()))
                .collect(),
        );
    }

    let widths: Vec<usize> = (0..selected.len())
        .map(|col| lines.iter().map(|l| l[col].len()).max().unwrap_or(0))
        .collect();

    let mut out = String::new();
    for line in &lines {
        let cells: Vec<String> = line
            .iter()
            .zip(&widths)
            .enumerate()
            .map(|(col, (cell, width))| {
                if col == 0 {
                    format!("{:<width$}", cell, width = width)
                } else {
                    format!("{:>width$}", cell, width = width)
                }
            })
            .collect();
        let _ = writeln!(out, "{}", cells.join("  ").trim_end());
    }
    Ok(out)
}

/// Run the preview command
pub fn run(config: &SolvencyConfig, rows: usize) -> Result<()> {
    let path = config.results_path();
    if !path.exists() {
        return Err(CliError::FileNotFound(path.display().to_string()));
    }
    info!(path = %path.display(), rows, "Previewing results");
    print!("{}", render(&path, rows)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_selects_available_columns() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("final_results_20250630.csv");
        std::fs::write(
            &path,
            "LEI,Date,NPL_Amount,RWA_Final,CET1_Ratio_Pct\n\
             00A,20250630,5,100,10\n\
             00B,20250630,,9.54,\n\
             00C,20250630,1,1,1\n",
        )
        .unwrap();

        let text = render(&path, 2).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("LEI"));
        assert!(!lines[0].contains("CVA_Charge"));
        assert!(lines[1].starts_with("00A"));
        assert!(lines[1].contains("10.0000"));
        assert!(lines[2].contains("NaN"));
    }

    #[test]
    fn test_missing_results_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = SolvencyConfig {
            output_dir: dir.path().to_path_buf(),
            ..Default::default()
        };
        assert!(matches!(run(&config, 5), Err(CliError::FileNotFound(_))));
    }
}
