//! Proxy risk parameters for banks without internal-model disclosures.
//!
//! # Formulas
//!
//! - EAD: `Exposure_Value` if present and non-zero, else `Total_Assets`, else 0
//! - NPL ratio: `NPL_Amount / Loans_Gross` when `Loans_Gross > 0`, else 0
//! - PD: `NPL ratio × 1.2`, clipped to `[0, 1]`
//! - LGD: 45% flat
//!
//! A reported `Exposure_Value` of exactly zero is treated as "not reported":
//! the extracts use zero as a no-data sentinel for that item.

use solvency_core::types::{BankRecord, BankTable, Diagnostic, Field, ProxiedRecord, ProxiedTable};
use tracing::{info, warn};

/// NPL-ratio multiplier producing the PD proxy.
pub const PD_MULTIPLIER: f64 = 1.2;

/// Flat LGD proxy.
pub const LGD_PROXY: f64 = 0.45;

/// Upstream fields the proxies read.
pub const PROXY_INPUTS: [Field; 5] = [
    Field::TotalAssets,
    Field::ExposureValue,
    Field::LoansGross,
    Field::NplAmount,
    Field::HqlaAmount,
];

/// Exposure at default after the exposure/total-assets waterfall.
///
/// # Examples
/// ```
/// use solvency_engine::proxies::ead_final;
///
/// assert_eq!(ead_final(Some(250.0), Some(500.0)), 250.0);
/// assert_eq!(ead_final(Some(0.0), Some(500.0)), 500.0);
/// assert_eq!(ead_final(None, None), 0.0);
/// ```
pub fn ead_final(exposure_value: Option<f64>, total_assets: Option<f64>) -> f64 {
    exposure_value
        .filter(|v| *v != 0.0)
        .or(total_assets)
        .unwrap_or(0.0)
}

/// Non-performing loan ratio. A missing NPL amount counts as zero.
pub fn npl_ratio(npl_amount: Option<f64>, loans_gross: Option<f64>) -> f64 {
    match loans_gross {
        Some(loans) if loans > 0.0 => npl_amount.unwrap_or(0.0) / loans,
        _ => 0.0,
    }
}

/// PD proxy, always within `[0, 1]`.
pub fn pd_proxy(npl_ratio: f64) -> f64 {
    let pd = npl_ratio * PD_MULTIPLIER;
    if pd.is_nan() {
        0.0
    } else {
        pd.clamp(0.0, 1.0)
    }
}

fn proxy_record(record: BankRecord) -> ProxiedRecord {
    let ead = ead_final(record.get(Field::ExposureValue), record.get(Field::TotalAssets));
    let ratio = npl_ratio(record.get(Field::NplAmount), record.get(Field::LoansGross));
    ProxiedRecord {
        record,
        ead_final: ead,
        npl_ratio: ratio,
        pd_proxy: pd_proxy(ratio),
        lgd_proxy: LGD_PROXY,
    }
}

/// Adds EAD, NPL ratio, PD and LGD proxies to every bank.
///
/// Absent input columns are materialised as all-missing (never zero) and
/// reported as `MissingField` diagnostics.
pub fn calculate_proxies(mut table: BankTable, diagnostics: &mut Vec<Diagnostic>) -> ProxiedTable {
    if table.is_empty() {
        return table.map_rows(proxy_record);
    }

    for field in PROXY_INPUTS {
        if table.ensure_column(field) {
            let diagnostic = Diagnostic::MissingField {
                stage: "proxies",
                field,
            };
            warn!("{}", diagnostic);
            diagnostics.push(diagnostic);
        }
    }

    let proxied = table.map_rows(proxy_record);
    info!(banks = proxied.len(), "Proxies computed");
    proxied
}
