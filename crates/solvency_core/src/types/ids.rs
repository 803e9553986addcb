//! Identifier types for bank records.
//!
//! Entity identifiers (LEI codes) and reporting dates are kept as strings end
//! to end. Parsing an LEI as a number corrupts leading zeros and can turn long
//! codes into scientific notation, so neither type offers a numeric view.

use std::fmt;

/// Legal entity identifier of a reporting bank.
///
/// # Examples
///
/// ```
/// use solvency_core::types::EntityId;
///
/// let id = EntityId::new("0W2PZJM8XOY22M4GG883");
/// assert_eq!(id.as_str(), "0W2PZJM8XOY22M4GG883");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityId(String);

impl EntityId {
    /// Creates a new entity ID.
    #[inline]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the ID as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for EntityId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for EntityId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Reporting period of a disclosure, as a fixed-width `YYYYMMDD` string.
///
/// Ordering is lexicographic, which matches chronological order for
/// fixed-width dates. Surrounding whitespace is trimmed on construction.
///
/// # Examples
///
/// ```
/// use solvency_core::types::ReportingDate;
///
/// let q1 = ReportingDate::new(" 20250331 ");
/// let q2 = ReportingDate::new("20250630");
/// assert_eq!(q1.as_str(), "20250331");
/// assert!(q1 < q2);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReportingDate(String);

impl ReportingDate {
    /// Creates a reporting date from its string form.
    #[inline]
    pub fn new(date: impl AsRef<str>) -> Self {
        Self(date.as_ref().trim().to_string())
    }

    /// Returns the date as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReportingDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ReportingDate {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Composite key of a bank record: (entity, reporting date).
pub type RecordKey = (EntityId, ReportingDate);
