//! Named financial fields of a bank record.

use std::fmt;
use std::str::FromStr;

/// Closed vocabulary of reported financial fields.
///
/// The first ten variants are fed by regulatory item codes (see
/// [`crate::codes`]). `ExposureValue` and `HqlaAmount` are proxy inputs with
/// no mapped code; the proxy stage materialises them as missing columns.
///
/// # Examples
///
/// ```
/// use solvency_core::types::Field;
///
/// assert_eq!(Field::Cet1Capital.column_name(), "CET1_Capital");
/// assert_eq!("RWA_Total".parse::<Field>(), Ok(Field::RwaTotal));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Field {
    /// Common Equity Tier 1 capital
    Cet1Capital,
    /// Tier 1 capital
    Tier1Capital,
    /// Total own funds
    TotalCapital,
    /// Reported total risk exposure amount
    RwaTotal,
    /// Total assets
    TotalAssets,
    /// Net profit for the period
    NetIncome,
    /// Leverage ratio total exposure measure
    LeverageExposure,
    /// Gross carrying amount of loans and advances
    LoansGross,
    /// Stock of accumulated impairment provisions
    ProvisionsStock,
    /// Non-performing loans amount
    NplAmount,
    /// Credit exposure value (no mapped code)
    ExposureValue,
    /// High-quality liquid assets (no mapped code)
    HqlaAmount,
}

impl Field {
    /// Number of fields in the vocabulary.
    pub const COUNT: usize = 12;

    /// All fields in canonical column order.
    pub const ALL: [Field; Field::COUNT] = [
        Field::Cet1Capital,
        Field::Tier1Capital,
        Field::TotalCapital,
        Field::RwaTotal,
        Field::TotalAssets,
        Field::NetIncome,
        Field::LeverageExposure,
        Field::LoansGross,
        Field::ProvisionsStock,
        Field::NplAmount,
        Field::ExposureValue,
        Field::HqlaAmount,
    ];

    /// Dense index of the field, in `0..Field::COUNT`.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Column header used in wide tables and output files.
    pub fn column_name(self) -> &'static str {
        match self {
            Field::Cet1Capital => "CET1_Capital",
            Field::Tier1Capital => "Tier1_Capital",
            Field::TotalCapital => "Total_Capital",
            Field::RwaTotal => "RWA_Total",
            Field::TotalAssets => "Total_Assets",
            Field::NetIncome => "Net_Income",
            Field::LeverageExposure => "Leverage_Exposure",
            Field::LoansGross => "Loans_Gross",
            Field::ProvisionsStock => "Provisions_Stock",
            Field::NplAmount => "NPL_Amount",
            Field::ExposureValue => "Exposure_Value",
            Field::HqlaAmount => "HQLA_Amount",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

impl FromStr for Field {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Field::ALL
            .iter()
            .copied()
            .find(|field| field.column_name() == s)
            .ok_or_else(|| format!("Unknown field column: {}", s))
    }
}
