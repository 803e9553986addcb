//! Black-Scholes value of a European call.
//!
//! **Call Price**: C = S·N(d₁) − K·e^(−rT)·N(d₂)
//!
//! Where:
//! - d₁ = (ln(S/K) + (r + σ²/2)T) / (σ√T)
//! - d₂ = d₁ − σ√T

use num_traits::Float;
use thiserror::Error;

use super::distributions::norm_cdf;

/// Invalid Black-Scholes inputs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalyticalError {
    /// Spot must be strictly positive.
    #[error("Invalid spot price: {spot}. Must be positive")]
    InvalidSpot {
        /// Offending spot
        spot: f64,
    },

    /// Volatility must be strictly positive.
    #[error("Invalid volatility: {volatility}. Must be positive")]
    InvalidVolatility {
        /// Offending volatility
        volatility: f64,
    },
}

/// Black-Scholes model for a single underlying.
///
/// # Examples
/// ```
/// use solvency_core::math::BlackScholes;
///
/// let bs = BlackScholes::new(100.0_f64, 0.03, 0.2).unwrap();
/// let call = bs.price_call(100.0, 1.0);
/// assert!((call - 9.4134).abs() < 1e-3);
///
/// assert!(BlackScholes::new(100.0_f64, 0.03, 0.0).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct BlackScholes<T: Float> {
    spot: T,
    rate: T,
    volatility: T,
}

impl<T: Float> BlackScholes<T> {
    /// Creates a model.
    ///
    /// # Errors
    /// - `AnalyticalError::InvalidSpot` if spot <= 0
    /// - `AnalyticalError::InvalidVolatility` if volatility <= 0
    pub fn new(spot: T, rate: T, volatility: T) -> Result<Self, AnalyticalError> {
        if spot <= T::zero() {
            return Err(AnalyticalError::InvalidSpot {
                spot: spot.to_f64().unwrap_or(0.0),
            });
        }
        if volatility <= T::zero() {
            return Err(AnalyticalError::InvalidVolatility {
                volatility: volatility.to_f64().unwrap_or(0.0),
            });
        }
        Ok(Self {
            spot,
            rate,
            volatility,
        })
    }

    /// Spot price.
    #[inline]
    pub fn spot(&self) -> T {
        self.spot
    }

    /// Risk-free rate.
    #[inline]
    pub fn rate(&self) -> T {
        self.rate
    }

    /// Volatility.
    #[inline]
    pub fn volatility(&self) -> T {
        self.volatility
    }

    /// d₁ term. Expiry must be strictly positive.
    #[inline]
    pub fn d1(&self, strike: T, expiry: T) -> T {
        let half = T::from(0.5).unwrap();
        let vol_sqrt_t = self.volatility * expiry.sqrt();
        let log_moneyness = (self.spot / strike).ln();
        let drift = (self.rate + half * self.volatility * self.volatility) * expiry;
        (log_moneyness + drift) / vol_sqrt_t
    }

    /// d₂ term. Expiry must be strictly positive.
    #[inline]
    pub fn d2(&self, strike: T, expiry: T) -> T {
        self.d1(strike, expiry) - self.volatility * expiry.sqrt()
    }

    /// European call value for `expiry` years.
    ///
    /// At `expiry <= 0` the intrinsic value max(S − K, 0) is returned, since
    /// d₁ is undefined there.
    #[inline]
    pub fn price_call(&self, strike: T, expiry: T) -> T {
        if expiry <= T::zero() {
            return (self.spot - strike).max(T::zero());
        }
        let discount = (-self.rate * expiry).exp();
        self.spot * norm_cdf(self.d1(strike, expiry))
            - strike * discount * norm_cdf(self.d2(strike, expiry))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_invalid_inputs() {
        assert!(matches!(
            BlackScholes::new(-1.0_f64, 0.03, 0.2),
            Err(AnalyticalError::InvalidSpot { .. })
        ));
        assert!(matches!(
            BlackScholes::new(100.0_f64, 0.03, -0.2),
            Err(AnalyticalError::InvalidVolatility { .. })
        ));
    }

    #[test]
    fn test_d1_d2_atm() {
        let bs = BlackScholes::new(100.0_f64, 0.03, 0.2).unwrap();
        assert_relative_eq!(bs.d1(100.0, 1.0), 0.25, epsilon = 1e-12);
        assert_relative_eq!(bs.d2(100.0, 1.0), 0.05, epsilon = 1e-12);
    }

    #[test]
    fn test_atm_call_reference() {
        let bs = BlackScholes::new(100.0_f64, 0.03, 0.2).unwrap();
        assert_relative_eq!(bs.price_call(100.0, 1.0), 9.4134, epsilon = 1e-3);
    }

    #[test]
    fn test_call_increases_with_expiry() {
        let bs = BlackScholes::new(100.0_f64, 0.03, 0.2).unwrap();
        let short = bs.price_call(100.0, 0.25);
        let long = bs.price_call(100.0, 1.0);
        assert!(long > short);
        assert!(short > 0.0);
    }

    #[test]
    fn test_zero_expiry_intrinsic() {
        let bs = BlackScholes::new(110.0_f64, 0.03, 0.2).unwrap();
        assert_eq!(bs.price_call(100.0, 0.0), 10.0);
        assert_eq!(bs.price_call(120.0, 0.0), 0.0);
    }

    #[test]
    fn test_deep_otm_call_near_zero() {
        let bs = BlackScholes::new(50.0_f64, 0.03, 0.2).unwrap();
        let price = bs.price_call(200.0, 0.1);
        assert!(price >= -1e-9 && price < 1e-6);
    }
}
