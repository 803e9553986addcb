//! Analytical helpers used by the CVA engine.
//!
//! - `distributions`: standard normal CDF
//! - `black_scholes`: European call value and d1/d2 terms

pub mod black_scholes;
pub mod distributions;

pub use black_scholes::{AnalyticalError, BlackScholes};
pub use distributions::norm_cdf;
