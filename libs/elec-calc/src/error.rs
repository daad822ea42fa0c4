//! Error types for elec-calc

use thiserror::Error;

/// Calculation errors
///
/// Every calculation either returns a value or exactly one of these.
/// No calculation reports failure through a sentinel number.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalcError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Division by zero: {0}")]
    DivisionByZero(String),

    #[error("Insufficient input: {0}")]
    InsufficientInput(String),
}

/// Discriminant of [`CalcError`], for callers that only care about the kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidInput,
    DivisionByZero,
    InsufficientInput,
}

impl CalcError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn division_by_zero(msg: impl Into<String>) -> Self {
        Self::DivisionByZero(msg.into())
    }

    pub fn insufficient_input(msg: impl Into<String>) -> Self {
        Self::InsufficientInput(msg.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidInput(_) => ErrorKind::InvalidInput,
            Self::DivisionByZero(_) => ErrorKind::DivisionByZero,
            Self::InsufficientInput(_) => ErrorKind::InsufficientInput,
        }
    }
}

pub type Result<T> = std::result::Result<T, CalcError>;

/// Reject NaN and infinities before they reach a formula
pub(crate) fn ensure_finite(name: &str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CalcError::invalid_input(format!(
            "{} must be a finite number, got {}",
            name, value
        )))
    }
}

/// Reject a computed value that overflowed to infinity or became NaN
pub(crate) fn ensure_finite_result(name: &str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CalcError::invalid_input(format!(
            "{} is out of the representable range",
            name
        )))
    }
}

/// Reject negative (and non-finite) values
pub(crate) fn ensure_non_negative(name: &str, value: f64) -> Result<f64> {
    let value = ensure_finite(name, value)?;
    if value < 0.0 {
        return Err(CalcError::invalid_input(format!(
            "{} must not be negative, got {}",
            name, value
        )));
    }
    Ok(value)
}
