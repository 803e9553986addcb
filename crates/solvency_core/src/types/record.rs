//! Record types for each pipeline stage.
//!
//! ```text
//! RawObservation ──reshape──▶ BankRecord ──proxy──▶ ProxiedRecord ──rwa/cva/ratios──▶ SolvencyRecord
//! ```

use super::field::Field;
use super::ids::{EntityId, RecordKey, ReportingDate};

/// One disclosed fact in long format.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RawObservation {
    /// Reporting entity
    pub entity_id: EntityId,
    /// Reporting period
    pub reporting_date: ReportingDate,
    /// Regulatory item code
    pub item_code: i64,
    /// Reported amount
    pub amount: f64,
}

impl RawObservation {
    /// Creates a new observation.
    pub fn new(
        entity_id: impl Into<EntityId>,
        reporting_date: impl Into<ReportingDate>,
        item_code: i64,
        amount: f64,
    ) -> Self {
        Self {
            entity_id: entity_id.into(),
            reporting_date: reporting_date.into(),
            item_code,
            amount,
        }
    }

    /// Composite key of the bank record this observation belongs to.
    pub fn key(&self) -> RecordKey {
        (self.entity_id.clone(), self.reporting_date.clone())
    }
}

/// Wide record: one row per (entity, reporting date).
///
/// Each field is optional. `None` means the value was not disclosed, which is
/// distinct from a disclosed zero.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BankRecord {
    /// Reporting entity
    pub entity_id: EntityId,
    /// Reporting period
    pub reporting_date: ReportingDate,
    values: [Option<f64>; Field::COUNT],
}

impl BankRecord {
    /// Creates a record with every field missing.
    pub fn new(entity_id: EntityId, reporting_date: ReportingDate) -> Self {
        Self {
            entity_id,
            reporting_date,
            values: [None; Field::COUNT],
        }
    }

    /// Creates an empty record for a composite key.
    pub fn from_key(key: RecordKey) -> Self {
        Self::new(key.0, key.1)
    }

    /// Composite key of this record.
    pub fn key(&self) -> RecordKey {
        (self.entity_id.clone(), self.reporting_date.clone())
    }

    /// Value of `field`, `None` if missing.
    #[inline]
    pub fn get(&self, field: Field) -> Option<f64> {
        self.values[field.index()]
    }

    /// Sets `field` to a present value.
    #[inline]
    pub fn set(&mut self, field: Field, value: f64) {
        self.values[field.index()] = Some(value);
    }

    /// Sets `field` to an optional value.
    #[inline]
    pub fn set_opt(&mut self, field: Field, value: Option<f64>) {
        self.values[field.index()] = value;
    }

    /// Adds `amount` to `field`, treating a missing value as the start of the sum.
    #[inline]
    pub fn accumulate(&mut self, field: Field, amount: f64) {
        let slot = &mut self.values[field.index()];
        *slot = Some(slot.unwrap_or(0.0) + amount);
    }

    /// Fields with a present value, in canonical order.
    pub fn present_fields(&self) -> impl Iterator<Item = (Field, f64)> + '_ {
        Field::ALL
            .iter()
            .filter_map(move |&field| self.get(field).map(|v| (field, v)))
    }
}

/// Bank record with proxy risk inputs.
///
/// Every proxy field is always populated.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProxiedRecord {
    /// Underlying reported fields
    pub record: BankRecord,
    /// Exposure at default after the exposure/total-assets waterfall
    pub ead_final: f64,
    /// Non-performing loans over gross loans
    pub npl_ratio: f64,
    /// Probability-of-default proxy, in `[0, 1]`
    pub pd_proxy: f64,
    /// Loss-given-default proxy
    pub lgd_proxy: f64,
}

impl ProxiedRecord {
    /// Shortcut for `self.record.get(field)`.
    #[inline]
    pub fn get(&self, field: Field) -> Option<f64> {
        self.record.get(field)
    }
}

/// Final record with RWA and solvency ratios.
///
/// Ratios are `NaN` when undefined.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolvencyRecord {
    /// Proxied inputs
    pub proxied: ProxiedRecord,
    /// Model RWA: EAD × PD × LGD × 1.06
    pub rwa_synthetic: f64,
    /// Reported RWA if any, else synthetic; plus the CVA add-on; `NaN` if zero
    pub rwa_final: f64,
    /// CVA capital charge (absent without leverage exposure)
    pub cva_charge: Option<f64>,
    /// RWA-equivalent of the CVA charge
    pub rwa_cva_addon: Option<f64>,
    /// CET1 / RWA_Final × 100
    pub cet1_ratio_pct: f64,
    /// Total capital / RWA_Final × 100
    pub tcr_pct: f64,
    /// Tier 1 / leverage exposure × 100
    pub leverage_ratio_pct: f64,
    /// NPL / (Tier 1 + provisions) × 100
    pub texas_ratio_pct: f64,
}

impl SolvencyRecord {
    /// Creates a record carrying RWA figures; ratios start undefined.
    pub fn with_rwa(proxied: ProxiedRecord, rwa_synthetic: f64, rwa_final: f64) -> Self {
        Self {
            proxied,
            rwa_synthetic,
            rwa_final,
            cva_charge: None,
            rwa_cva_addon: None,
            cet1_ratio_pct: f64::NAN,
            tcr_pct: f64::NAN,
            leverage_ratio_pct: f64::NAN,
            texas_ratio_pct: f64::NAN,
        }
    }

    /// Shortcut for the underlying reported field.
    #[inline]
    pub fn get(&self, field: Field) -> Option<f64> {
        self.proxied.record.get(field)
    }

    /// Underlying bank record.
    #[inline]
    pub fn record(&self) -> &BankRecord {
        &self.proxied.record
    }
}
