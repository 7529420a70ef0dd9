//! # MGF-Pricer: Option Pricing by Fourier Inversion of Moment Generating Functions
//!
//! `mgf-pricer` recovers option prices, realized-variance option prices and
//! probability densities from a model's log moment generating function sampled
//! on a complex contour. The model itself is an external collaborator: it
//! receives the contours built here and returns its log-MGF on them.
//!
//! ## Core Features
//!
//! - **Grid Builder**: integration contours for the log-return, quadratic-variation
//!   and volatility transform variables under the spot or inverse measure
//! - **Quadrature**: Simpson and trapezoidal weights over the contour
//! - **Slice Pricers**: calls/puts (spot measure), inverse calls/puts (inverse
//!   measure) and calls on realized variance, one maturity at a time
//! - **Density Evaluator**: probability mass on a uniform spatial grid
//! - **Implied Volatility**: Black-76 inversion of the recovered prices
//!
//! ## Quick Start
//!
//! ```rust
//! use mgf_pricer::{
//!     price_slice_with_model, default_configs, BlackScholesMgf, Measure, OptionSlice,
//! };
//!
//! let model = BlackScholesMgf::new(0.2)?;
//! let slice = OptionSlice::from_codes(1.0, 100.0, 1.0, vec![90.0, 100.0, 110.0], &["P", "C", "C"])?;
//! let prices = price_slice_with_model(&model, &slice, Measure::Spot, &default_configs::standard())?;
//! assert!((prices[1] - 7.9656).abs() < 1e-3);
//! # Ok::<(), mgf_pricer::MgfError>(())
//! ```
//!
//! ## Working with an external model
//!
//! ```rust
//! use mgf_pricer::{
//!     slice_pricer_with_mgf_grid, transform_var_grid, FourierConfig, Measure, OptionSlice,
//!     OptionType, VariableType,
//! };
//! use num_complex::Complex64;
//!
//! let config = FourierConfig::default();
//! let grids = transform_var_grid(VariableType::LogReturn, Measure::Spot, 0.2, &config)?;
//! // A model solver evaluates its log-MGF at each point of `grids.phi`, in order.
//! let log_mgf: Vec<Complex64> = grids.phi.points().iter().map(|z| 0.02 * *z * (*z + 1.0)).collect();
//! let slice = OptionSlice::uniform(1.0, 100.0, 1.0, vec![100.0], OptionType::Call)?;
//! let prices = slice_pricer_with_mgf_grid(&log_mgf, &grids.phi, &slice, Measure::Spot, &config)?;
//! # assert!((prices[0] - 7.9656).abs() < 1e-3);
//! # Ok::<(), mgf_pricer::MgfError>(())
//! ```
//!
//! ## Configuration Presets
//!
//! - `standard()`: production grids (QV contour up to 200)
//! - `legacy()`: QV contour truncated at 100
//! - `high_resolution()`: doubled grid density for reference runs
//! - `fast()`: coarse grids, sequential evaluation

// ================================================================================================
// MODULES
// ================================================================================================

pub mod error;
pub mod models;
pub mod pricing;
pub mod transform;

// ================================================================================================
// PUBLIC RE-EXPORTS
// ================================================================================================

pub use error::{MgfError, Result};

// Grid construction and quadrature
pub use transform::{
    integration_weights, linspace, nan_sum, phi_grid, psi_grid, theta_grid, transform_var_grid,
    transform_var_grid_by_name, Contour, TransformGrids,
};

// Pricers, density and their inputs
pub use pricing::{
    implied_vol, implied_vols_from_prices, pdf_with_mgf_grid, slice_pricer_with_mgf_grid,
    slice_qvar_pricer_with_mgf_grid, FourierConfig, Measure, OptionSlice, OptionType,
    QuadratureRule, VariableType,
};

// Model seam and the log-normal reference model
pub use models::bs::{black_call_price, black_price, black_put_price, BlackScholesMgf};
pub use models::traits::LogMgfModel;

use models::utils::resolve_vol_scaler;

// ================================================================================================
// DEFAULT CONFIGURATIONS
// ================================================================================================

/// Pre-configured grid settings for common use cases.
///
/// # Available Configurations
///
/// - [`standard()`]: Production grids
/// - [`legacy()`]: Older QV truncation
/// - [`high_resolution()`]: Reference accuracy
/// - [`fast()`]: Quick checks
pub mod default_configs {
    use crate::pricing::config::FourierConfig;

    /// Production grids.
    ///
    /// **Characteristics:**
    /// - Log-return contour: 1,000 points on `[0, 5.6 / vol_scaler]`
    /// - QV contour: 4,000 points on `[0, 200]`
    /// - Volatility contour: 4,000 points on `[0, 600]`
    /// - Simpson weights, strikes priced in parallel
    ///
    /// # Example
    ///
    /// ```rust
    /// use mgf_pricer::default_configs;
    ///
    /// let config = default_configs::standard();
    /// assert_eq!(config.phi_points, 1000);
    /// ```
    pub fn standard() -> FourierConfig {
        FourierConfig::standard()
    }

    /// Same grids as [`standard()`] with the QV contour truncated at 100.
    ///
    /// Matches the older copy of the pricer; short-dated variance options
    /// converge more slowly on the shorter contour.
    pub fn legacy() -> FourierConfig {
        FourierConfig::legacy()
    }

    /// Twice the points on every contour. Use for validating production grids.
    pub fn high_resolution() -> FourierConfig {
        FourierConfig::high_resolution()
    }

    /// Half the points on every contour, evaluated sequentially.
    ///
    /// **Use Cases:**
    /// - Unit tests
    /// - Debugging a model solver's output
    pub fn fast() -> FourierConfig {
        FourierConfig::fast()
    }
}

// ================================================================================================
// MODEL-DRIVEN PRICING
// ================================================================================================

/// Price a slice of options on the underlying with a model's log-MGF.
///
/// Builds the log-return grids sized by the model's `vol_scaler(ttm)`, asks the
/// model for its log-MGF on them and runs [`slice_pricer_with_mgf_grid`].
///
/// # Errors
///
/// * [`MgfError::InvalidStrike`] for a non-positive strike
/// * [`MgfError::UnsupportedOptionType`] for codes invalid under `measure`
/// * [`MgfError::MalformedGrid`] if the model returns a misaligned grid
pub fn price_slice_with_model<M: LogMgfModel + ?Sized>(
    model: &M,
    slice: &OptionSlice,
    measure: Measure,
    config: &FourierConfig,
) -> Result<Vec<f64>> {
    slice.validate()?;
    let vol_scaler = resolve_vol_scaler(model, slice.ttm, config)?;
    let grids = transform_var_grid(VariableType::LogReturn, measure, vol_scaler, config)?;
    let log_mgf = model.log_mgf_grid(&grids, slice.ttm)?;
    tracing::debug!(model = model.model_name(), ttm = slice.ttm, "pricing slice with model");
    slice_pricer_with_mgf_grid(&log_mgf, &grids.phi, slice, measure, config)
}

/// Price a slice of calls on realized variance with a model's log-MGF.
///
/// Strikes are in variance units (annualized); prices are floored at
/// `config.qvar_floor`.
pub fn price_qvar_slice_with_model<M: LogMgfModel + ?Sized>(
    model: &M,
    slice: &OptionSlice,
    measure: Measure,
    config: &FourierConfig,
) -> Result<Vec<f64>> {
    slice.validate()?;
    let grids = transform_var_grid(VariableType::QVar, measure, config.vol_scaler, config)?;
    let log_mgf = model.log_mgf_grid(&grids, slice.ttm)?;
    tracing::debug!(
        model = model.model_name(),
        ttm = slice.ttm,
        "pricing quadratic variation slice with model"
    );
    slice_qvar_pricer_with_mgf_grid(&log_mgf, &grids.psi, slice, measure, config)
}

/// Density of the transform variable `variable` at maturity `ttm`, sampled on `space_grid`.
///
/// Returns probability mass per cell (density times grid spacing).
pub fn pdf_with_model<M: LogMgfModel + ?Sized>(
    model: &M,
    ttm: f64,
    variable: VariableType,
    measure: Measure,
    space_grid: &[f64],
    shift: f64,
    config: &FourierConfig,
) -> Result<Vec<f64>> {
    error::ensure_positive("ttm", ttm)?;
    let vol_scaler = resolve_vol_scaler(model, ttm, config)?;
    let grids = transform_var_grid(variable, measure, vol_scaler, config)?;
    let log_mgf = model.log_mgf_grid(&grids, ttm)?;
    pdf_with_mgf_grid(&log_mgf, grids.active(), space_grid, shift, config)
}
