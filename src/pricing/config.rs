use crate::pricing::types::QuadratureRule;

#[cfg(feature = "serde")]
use anyhow::Context;
#[cfg(feature = "serde")]
use serde::Deserialize;
#[cfg(feature = "serde")]
use std::path::Path;

/// Grid sizes, truncation bounds and numerical tolerances of the Fourier inversion.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
pub struct FourierConfig {
    /// Number of points on the log-return contour
    #[cfg_attr(feature = "serde", serde(default = "default_phi_points"))]
    pub phi_points: usize,

    /// Truncation constant: the log-return contour spans `[0, phi_truncation / vol_scaler]`
    #[cfg_attr(feature = "serde", serde(default = "default_phi_truncation"))]
    pub phi_truncation: f64,

    /// Number of points on the quadratic-variation contour
    #[cfg_attr(feature = "serde", serde(default = "default_psi_points"))]
    pub psi_points: usize,

    /// Upper bound of the quadratic-variation contour's imaginary part
    #[cfg_attr(feature = "serde", serde(default = "default_psi_upper"))]
    pub psi_upper: f64,

    /// Number of points on the volatility contour
    #[cfg_attr(feature = "serde", serde(default = "default_theta_points"))]
    pub theta_points: usize,

    /// Upper bound of the volatility contour's imaginary part
    #[cfg_attr(feature = "serde", serde(default = "default_theta_upper"))]
    pub theta_upper: f64,

    /// Scale `sigma_0 * sqrt(ttm)` used when the caller has no better estimate.
    /// 0.28 corresponds to a 100% vol option with one month to expiry.
    #[cfg_attr(feature = "serde", serde(default = "default_vol_scaler"))]
    pub vol_scaler: f64,

    #[cfg_attr(feature = "serde", serde(default))]
    pub rule: QuadratureRule,

    /// Tolerance on `|Re z| - 0.5` below which the closed-form kernel is used
    #[cfg_attr(feature = "serde", serde(default = "default_kernel_tolerance"))]
    pub kernel_tolerance: f64,

    /// Floor applied to quadratic-variation option prices
    #[cfg_attr(feature = "serde", serde(default = "default_qvar_floor"))]
    pub qvar_floor: f64,

    /// Price strikes / evaluate density points on the rayon pool
    #[cfg_attr(feature = "serde", serde(default = "default_parallel"))]
    pub parallel: bool,
}

impl Default for FourierConfig {
    fn default() -> Self {
        Self {
            phi_points: default_phi_points(),
            phi_truncation: default_phi_truncation(),
            psi_points: default_psi_points(),
            psi_upper: default_psi_upper(),
            theta_points: default_theta_points(),
            theta_upper: default_theta_upper(),
            vol_scaler: default_vol_scaler(),
            rule: QuadratureRule::default(),
            kernel_tolerance: default_kernel_tolerance(),
            qvar_floor: default_qvar_floor(),
            parallel: default_parallel(),
        }
    }
}

impl FourierConfig {
    /// Production grids: 1000-point log-return contour, QV contour up to 200.
    pub fn standard() -> Self {
        Self::default()
    }

    /// QV contour truncated at 100, as in the older copy of the pricer.
    pub fn legacy() -> Self {
        Self {
            psi_upper: 100.0,
            ..Self::default()
        }
    }

    /// Doubled grid density on every contour for reference computations
    pub fn high_resolution() -> Self {
        Self {
            phi_points: 2000,
            psi_points: 8000,
            theta_points: 8000,
            ..Self::default()
        }
    }

    /// Coarse grids for quick checks; sequential evaluation
    pub fn fast() -> Self {
        Self {
            phi_points: 500,
            psi_points: 2000,
            theta_points: 2000,
            parallel: false,
            ..Self::default()
        }
    }

    /// Builder-style override of the quadrature rule.
    pub fn with_rule(mut self, rule: QuadratureRule) -> Self {
        self.rule = rule;
        self
    }

    /// Parse a configuration from TOML; absent keys take their defaults.
    #[cfg(feature = "serde")]
    pub fn from_toml_str(text: &str) -> anyhow::Result<Self> {
        toml::from_str(text).context("failed to parse Fourier pricer configuration")
    }

    /// Load a TOML configuration file.
    #[cfg(feature = "serde")]
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_toml_str(&text).with_context(|| format!("invalid config in {}", path.display()))
    }
}

fn default_phi_points() -> usize {
    1000
}

fn default_phi_truncation() -> f64 {
    5.6
}

fn default_psi_points() -> usize {
    4000
}

fn default_psi_upper() -> f64 {
    200.0
}

fn default_theta_points() -> usize {
    4000
}

fn default_theta_upper() -> f64 {
    600.0
}

fn default_vol_scaler() -> f64 {
    0.28
}

fn default_kernel_tolerance() -> f64 {
    1e-10
}

fn default_qvar_floor() -> f64 {
    1e-10
}

fn default_parallel() -> bool {
    true
}
