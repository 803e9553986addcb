//! Reading raw disclosure extracts.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::dataset::{DatasetRole, RawDataset, RawInputs};
use crate::error::{LoaderError, Result};
use crate::sniff::sniff_delimiter;

/// Locations of the three raw extracts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputPaths {
    /// Other disclosures extract
    pub other: PathBuf,
    /// Credit risk extract
    pub credit: PathBuf,
    /// Market risk extract
    pub market: PathBuf,
}

impl InputPaths {
    /// Default file names inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            other: dir.join(DatasetRole::OtherDisclosures.default_file_name()),
            credit: dir.join(DatasetRole::CreditRisk.default_file_name()),
            market: dir.join(DatasetRole::MarketRisk.default_file_name()),
        }
    }

    /// Path for a dataset role.
    pub fn path(&self, role: DatasetRole) -> &Path {
        match role {
            DatasetRole::OtherDisclosures => &self.other,
            DatasetRole::CreditRisk => &self.credit,
            DatasetRole::MarketRisk => &self.market,
        }
    }

    /// Roles whose file does not exist.
    pub fn missing(&self) -> Vec<DatasetRole> {
        [
            DatasetRole::OtherDisclosures,
            DatasetRole::CreditRisk,
            DatasetRole::MarketRisk,
        ]
        .into_iter()
        .filter(|role| !self.path(*role).exists())
        .collect()
    }
}

/// Loads all three extracts. Any missing file aborts the load.
pub fn load_raw_inputs(paths: &InputPaths) -> Result<RawInputs> {
    info!("Loading raw extracts");

    let other = load_role(paths, DatasetRole::OtherDisclosures)?;
    let credit = load_role(paths, DatasetRole::CreditRisk)?;
    let market = load_role(paths, DatasetRole::MarketRisk)?;

    info!(
        other_rows = other.len(),
        credit_rows = credit.len(),
        market_rows = market.len(),
        "Raw extracts loaded"
    );

    Ok(RawInputs {
        other,
        credit,
        market,
    })
}

fn load_role(paths: &InputPaths, role: DatasetRole) -> Result<RawDataset> {
    let path = paths.path(role);
    if !path.exists() {
        return Err(LoaderError::MissingFile {
            role,
            path: path.to_path_buf(),
        });
    }
    read_raw_dataset(path, role.label())
}

/// Reads one extract with a sniffed delimiter, keeping all cells as strings.
pub fn read_raw_dataset(path: impl AsRef<Path>, source: &str) -> Result<RawDataset> {
    let path = path.as_ref();
    let mut reader = BufReader::new(File::open(path)?);

    let mut header_line = String::new();
    reader.read_line(&mut header_line)?;
    let header_line = header_line.trim_start_matches('\u{feff}');
    if header_line.trim().is_empty() {
        return Err(LoaderError::EmptyFile(path.to_path_buf()));
    }

    let delimiter = sniff_delimiter(header_line);
    debug!(
        path = %path.display(),
        delimiter = %(delimiter as char).escape_default(),
        "Sniffed delimiter"
    );

    let mut rest = String::new();
    reader.read_to_string(&mut rest)?;
    let content = format!("{}{}", header_line, rest);

    parse_dataset(content.as_bytes(), delimiter, source)
}

/// Parses delimited text into a dataset.
pub fn parse_dataset<R: Read>(input: R, delimiter: u8, source: &str) -> Result<RawDataset> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(input);

    let headers: Vec<String> = csv_reader.headers()?.iter().map(str::to_string).collect();

    let mut rows = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        if record.iter().all(str::is_empty) {
            continue;
        }
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(RawDataset::new(source, headers, rows))
}
