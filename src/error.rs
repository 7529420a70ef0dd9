//! Error types for the Fourier pricing engine.
//!
//! Every failure is raised synchronously at the call that detects it; pricing
//! routines validate their whole input before computing, so an error never
//! comes with partial results.

use thiserror::Error;

/// Convenience type alias for results in this crate.
pub type Result<T> = std::result::Result<T, MgfError>;

/// Errors raised by grid construction, quadrature and the slice pricers.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum MgfError {
    /// Transform variable tag that has no contour construction rule.
    #[error("unsupported transform variable kind: {0}")]
    UnsupportedVariableKind(String),

    /// Option-type code that is unknown or invalid for the active measure/pricer.
    #[error("unsupported option type {code} for {context}")]
    UnsupportedOptionType { code: String, context: String },

    /// Strike that is zero, negative or not finite.
    #[error("invalid strike {0}: strikes must be positive and finite")]
    InvalidStrike(f64),

    /// Contour or spatial grid too short, non-uniform, or misaligned with the log-MGF grid.
    #[error("malformed grid: {message}")]
    MalformedGrid { message: String },

    /// Scalar input outside its domain (maturity, forward, scale parameter, ...).
    #[error("invalid parameter {name}={value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },
}

impl MgfError {
    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedGrid {
            message: message.into(),
        }
    }

    pub(crate) fn unsupported_option(code: impl Into<String>, context: impl Into<String>) -> Self {
        Self::UnsupportedOptionType {
            code: code.into(),
            context: context.into(),
        }
    }
}

/// Checks that a scalar is finite and strictly positive.
pub(crate) fn ensure_positive(name: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(MgfError::InvalidParameter {
            name,
            value,
            reason: "must be positive and finite",
        })
    }
}
