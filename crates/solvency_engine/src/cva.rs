//! Credit Valuation Adjustment (CVA) add-on.
//!
//! CVA represents the expected loss due to counterparty default.
//!
//! # Formula
//!
//! CVA = LGD × Σᵢ EE(tᵢ) × DF(tᵢ) × PD(dt)
//!
//! Where:
//! - EE(t) = Black-Scholes value of the reference long call at horizon t
//! - DF(t) = e^(−r·t)
//! - PD(dt) = 1 − e^(−s·dt), the marginal default probability of one step
//!   under a flat hazard rate equal to the credit spread s
//!
//! The charge of one reference trade (the "unit charge") is scaled by each
//! bank's leverage exposure and converted into RWA at the minimum capital
//! ratio.

use solvency_core::math::BlackScholes;
use solvency_core::types::{Field, SolvencyTable};
use tracing::{debug, info};

use crate::error::CvaError;

/// Reference trade and counterparty parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CvaParams {
    /// Underlying spot
    pub spot: f64,
    /// Strike
    pub strike: f64,
    /// Maturity in years
    pub maturity: f64,
    /// Risk-free rate
    pub rate: f64,
    /// Volatility
    pub volatility: f64,
    /// Counterparty credit spread, used as hazard rate
    pub credit_spread: f64,
    /// Loss given default
    pub lgd: f64,
    /// Integration steps
    pub n_steps: usize,
}

impl Default for CvaParams {
    fn default() -> Self {
        Self {
            spot: 100.0,
            strike: 100.0,
            maturity: 1.0,
            rate: 0.03,
            volatility: 0.20,
            credit_spread: 0.02,
            lgd: 0.45,
            n_steps: 50,
        }
    }
}

fn positive(name: &'static str, value: f64) -> Result<(), CvaError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(CvaError::InvalidParameter {
            name,
            value,
            requirement: "Must be positive",
        })
    }
}

impl CvaParams {
    /// Checks every parameter, returning the first violation.
    pub fn validate(&self) -> Result<(), CvaError> {
        if self.n_steps == 0 {
            return Err(CvaError::InvalidSteps(self.n_steps));
        }
        positive("maturity", self.maturity)?;
        positive("spot", self.spot)?;
        positive("strike", self.strike)?;
        positive("volatility", self.volatility)?;
        if !(self.credit_spread >= 0.0 && self.credit_spread.is_finite()) {
            return Err(CvaError::InvalidParameter {
                name: "credit_spread",
                value: self.credit_spread,
                requirement: "Must be non-negative",
            });
        }
        if !(0.0..=1.0).contains(&self.lgd) {
            return Err(CvaError::InvalidParameter {
                name: "lgd",
                value: self.lgd,
                requirement: "Must be in [0, 1]",
            });
        }
        if !self.rate.is_finite() {
            return Err(CvaError::InvalidParameter {
                name: "rate",
                value: self.rate,
                requirement: "Must be finite",
            });
        }
        Ok(())
    }

    /// CVA of one reference trade.
    pub fn unit_charge(&self) -> Result<f64, CvaError> {
        compute_cva_long_call(
            self.spot,
            self.strike,
            self.maturity,
            self.rate,
            self.volatility,
            self.credit_spread,
            self.lgd,
            self.n_steps,
        )
    }
}

/// Computes the CVA of a long European call.
///
/// # Arguments
///
/// * `spot`, `strike`, `maturity`, `rate`, `volatility` - Reference trade
/// * `credit_spread` - Counterparty spread, used as a flat hazard rate
/// * `lgd` - Loss given default
/// * `n_steps` - Number of equal steps over `(0, maturity]`
///
/// # Errors
///
/// `CvaError` when `n_steps` is zero, when spot, strike, maturity or
/// volatility is not positive, when the spread is negative or when LGD is
/// outside `[0, 1]`.
///
/// # Examples
///
/// ```
/// use solvency_engine::cva::compute_cva_long_call;
///
/// let cva = compute_cva_long_call(100.0, 100.0, 1.0, 0.03, 0.2, 0.02, 0.45, 50).unwrap();
/// assert!(cva > 0.0 && cva < 0.1);
///
/// assert!(compute_cva_long_call(100.0, 100.0, 1.0, 0.03, 0.2, 0.02, 0.45, 0).is_err());
/// ```
#[allow(clippy::too_many_arguments)]
pub fn compute_cva_long_call(
    spot: f64,
    strike: f64,
    maturity: f64,
    rate: f64,
    volatility: f64,
    credit_spread: f64,
    lgd: f64,
    n_steps: usize,
) -> Result<f64, CvaError> {
    let params = CvaParams {
        spot,
        strike,
        maturity,
        rate,
        volatility,
        credit_spread,
        lgd,
        n_steps,
    };
    params.validate()?;

    let model = BlackScholes::new(spot, rate, volatility)?;
    let dt = maturity / n_steps as f64;
    let marginal_pd = 1.0 - (-credit_spread * dt).exp();

    let mut cva = 0.0;
    for i in 1..=n_steps {
        let t = i as f64 * dt;
        let exposure = model.price_call(strike, t).max(0.0);
        let discount = (-rate * t).exp();
        cva += lgd * exposure * discount * marginal_pd;
    }

    debug!(cva, n_steps, "Unit CVA computed");
    Ok(cva)
}

/// How the unit charge is applied to a bank table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CvaSettings {
    /// Reference trade
    pub params: CvaParams,
    /// Share of leverage exposure subject to CVA
    pub exposure_share: f64,
    /// Capital ratio converting a charge into RWA
    pub min_capital_ratio: f64,
}

impl Default for CvaSettings {
    fn default() -> Self {
        Self {
            params: CvaParams::default(),
            exposure_share: 0.001,
            min_capital_ratio: 0.08,
        }
    }
}

/// Adds the CVA charge and its RWA equivalent to every bank with a
/// `Leverage_Exposure`.
///
/// Returns the unit charge, or `None` when the table has no
/// `Leverage_Exposure` column and nothing was done. Banks without a value
/// keep `RWA_Final` unchanged and no charge.
pub fn apply_cva(table: &mut SolvencyTable, settings: &CvaSettings) -> Result<Option<f64>, CvaError> {
    if !table.has_column(Field::LeverageExposure) {
        info!("No Leverage_Exposure column, CVA add-on skipped");
        return Ok(None);
    }
    positive("min_capital_ratio", settings.min_capital_ratio)?;

    let unit = settings.params.unit_charge()?;
    let mut charged = 0usize;

    for row in table.rows_mut() {
        let Some(exposure) = row.get(Field::LeverageExposure) else {
            continue;
        };
        let charge = exposure * settings.exposure_share * unit;
        let addon = charge / settings.min_capital_ratio;
        row.cva_charge = Some(charge);
        row.rwa_cva_addon = Some(addon);
        row.rwa_final += addon;
        charged += 1;
    }

    info!(unit_charge = unit, banks = charged, "CVA add-on applied");
    Ok(Some(unit))
}
