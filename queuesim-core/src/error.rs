//! Error types for the simulation core

use crate::validation::ValidationError;
use thiserror::Error;

/// Top-level error type for simulation operations
#[derive(Debug, Error)]
pub enum SimError {
    /// A parameter failed validation before any computation started.
    #[error("Invalid parameter '{name}': must be {constraint}")]
    InvalidParameter { name: String, constraint: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl SimError {
    pub fn invalid(name: impl Into<String>, constraint: impl Into<String>) -> Self {
        SimError::InvalidParameter {
            name: name.into(),
            constraint: constraint.into(),
        }
    }

    /// True for errors caused by caller input rather than by the simulator
    pub fn is_invalid_parameter(&self) -> bool {
        matches!(self, SimError::InvalidParameter { .. })
    }
}

impl From<ValidationError> for SimError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::ConstraintViolation { field, constraint } => {
                SimError::InvalidParameter { name: field, constraint }
            }
            ValidationError::InvalidValue { field, reason } => SimError::InvalidParameter {
                name: field,
                constraint: format!("valid ({reason})"),
            },
        }
    }
}
