//! # adapter_loader: Raw Extract Loading and Table Persistence
//!
//! Adapter layer of the solvency workspace. It owns every byte that crosses
//! the filesystem boundary:
//!
//! - `reader`: loads the three long-format disclosure extracts (other
//!   disclosures, credit risk, market risk) into [`RawDataset`]s, sniffing the
//!   delimiter and keeping every cell as a string
//! - `writer`: writes the intermediate master dataset and the final results,
//!   and reads a master dataset back
//!
//! A missing input file is the only fatal condition in the pipeline; it is
//! reported as [`LoaderError::MissingFile`] naming the dataset and path.

pub mod dataset;
pub mod error;
pub mod reader;
pub mod sniff;
pub mod writer;

pub use dataset::{DatasetRole, RawDataset, RawInputs};
pub use error::{LoaderError, Result};
pub use reader::{load_raw_inputs, read_raw_dataset, InputPaths};
pub use writer::{read_bank_table, write_bank_table, write_solvency_table};
