//! Engine error types.

use solvency_core::math::AnalyticalError;
use thiserror::Error;

/// Invalid CVA inputs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CvaError {
    /// The exposure integral needs at least one step.
    #[error("Invalid number of time steps: {0}. Must be at least 1")]
    InvalidSteps(usize),

    /// A market or credit parameter is out of range.
    #[error("Invalid {name}: {value}. {requirement}")]
    InvalidParameter {
        /// Parameter name
        name: &'static str,
        /// Offending value
        value: f64,
        /// Accepted range
        requirement: &'static str,
    },

    /// Rejected by the Black-Scholes model.
    #[error(transparent)]
    Analytical(#[from] AnalyticalError),
}
