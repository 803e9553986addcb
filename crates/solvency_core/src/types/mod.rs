//! Core types: identifiers, fields, records, tables and diagnostics.

pub mod diagnostic;
pub mod field;
pub mod ids;
pub mod record;
pub mod table;

pub use diagnostic::Diagnostic;
pub use field::Field;
pub use ids::{EntityId, RecordKey, ReportingDate};
pub use record::{BankRecord, ProxiedRecord, RawObservation, SolvencyRecord};
pub use table::{AsBankRecord, BankTable, ProxiedTable, SolvencyTable, Table};
