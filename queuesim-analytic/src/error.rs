//! Error types for the closed-form queue models

use queuesim_core::ValidationError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalyticError {
    #[error("Invalid parameter '{name}': must be {constraint}")]
    InvalidParameter { name: String, constraint: String },

    /// Offered load meets or exceeds capacity, so no steady state exists.
    #[error("Unstable system: utilization {rho:.4} must be less than 1")]
    UnstableSystem { rho: f64 },

    /// Inputs were valid but a result did not fit in an `f64`.
    #[error("Non-finite result: {name} = {value}")]
    NonFinite { name: String, value: f64 },
}

impl AnalyticError {
    pub fn invalid(name: impl Into<String>, constraint: impl Into<String>) -> Self {
        AnalyticError::InvalidParameter {
            name: name.into(),
            constraint: constraint.into(),
        }
    }
}

impl From<ValidationError> for AnalyticError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::ConstraintViolation { field, constraint } => {
                AnalyticError::InvalidParameter { name: field, constraint }
            }
            ValidationError::InvalidValue { field, reason } => AnalyticError::InvalidParameter {
                name: field,
                constraint: format!("valid ({reason})"),
            },
        }
    }
}
