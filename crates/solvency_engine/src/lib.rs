//! # solvency_engine: Proxy, RWA, CVA and Ratio Engine
//!
//! Consumes the merged [`BankTable`](solvency_core::types::BankTable) and
//! produces one [`SolvencyRecord`](solvency_core::types::SolvencyRecord) per
//! bank.
//!
//! ## Stage Order
//!
//! 1. [`proxies`]: EAD, NPL ratio, PD and LGD proxies
//! 2. [`rwa`]: synthetic RWA and the reported/synthetic waterfall
//! 3. [`cva`]: CVA charge and its RWA add-on (optional)
//! 4. [`ratios`]: CET1, total capital, leverage and Texas ratios
//!
//! Division by zero never produces infinity: undefined ratios are `NaN`.
//!
//! ## Example
//!
//! ```rust
//! use solvency_core::types::{BankRecord, EntityId, Field, ReportingDate, Table};
//! use solvency_engine::{run_engine, EngineSettings};
//!
//! let mut bank = BankRecord::new(EntityId::new("E1"), ReportingDate::new("20250630"));
//! bank.set(Field::Cet1Capital, 10.0);
//! bank.set(Field::RwaTotal, 100.0);
//! let table = Table::new([Field::Cet1Capital, Field::RwaTotal], vec![bank]);
//!
//! let out = run_engine(table, &EngineSettings::without_cva()).unwrap();
//! assert_eq!(out.table.rows()[0].cet1_ratio_pct, 10.0);
//! ```

pub mod cva;
pub mod error;
pub mod pipeline;
pub mod proxies;
pub mod ratios;
pub mod rwa;

pub use cva::{apply_cva, compute_cva_long_call, CvaParams, CvaSettings};
pub use error::CvaError;
pub use pipeline::{run_engine, EngineOutput, EngineSettings};
pub use proxies::calculate_proxies;
pub use ratios::{compute_solvency_ratios, compute_texas_ratio, safe_ratio_pct, FillPolicy};
pub use rwa::compute_rwa;
