//! # solvency_core: Foundation Types for the Solvency Engine
//!
//! ## Layer Role
//!
//! solvency_core is the bottom layer of the workspace and provides:
//! - The closed field vocabulary (`types::Field`)
//! - The fixed regulatory item-code mapping (`codes`)
//! - Identifier newtypes: `EntityId`, `ReportingDate` (`types::ids`)
//! - Typed records and column-aware tables (`types::record`, `types::table`)
//! - Non-fatal pipeline diagnostics (`types::diagnostic`)
//! - Normal distribution and Black-Scholes helpers (`math`)
//!
//! ## Missing vs Zero
//!
//! Every reported financial field is an `Option<f64>`. A cell that was never
//! disclosed is `None`, a disclosed zero is `Some(0.0)`. Tables additionally
//! track which field columns exist at all, because one ratio formula treats an
//! absent column differently from a missing cell.
//!
//! ## Usage Examples
//!
//! ```rust
//! use solvency_core::codes::field_for_code;
//! use solvency_core::types::{BankRecord, EntityId, Field, ReportingDate};
//!
//! assert_eq!(field_for_code(2520102), Some(Field::Cet1Capital));
//! assert_eq!(field_for_code(1), None);
//!
//! let mut record = BankRecord::new(EntityId::new("E1"), ReportingDate::new("20250630"));
//! record.set(Field::Cet1Capital, 10.0);
//! assert_eq!(record.get(Field::Cet1Capital), Some(10.0));
//! assert_eq!(record.get(Field::RwaTotal), None);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod codes;
pub mod math;
pub mod types;

pub use codes::{code_for_field, field_for_code, is_mapped, ITEM_CODE_MAP};
pub use types::{
    AsBankRecord, BankRecord, BankTable, Diagnostic, EntityId, Field, ProxiedRecord, ProxiedTable,
    RawObservation, RecordKey, ReportingDate, SolvencyRecord, SolvencyTable, Table,
};
