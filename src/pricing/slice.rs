//! Slice pricers: European options on the underlying and on its quadratic
//! variation from a precomputed log-MGF grid.
//!
//! With `z = c + i*p` on the log-return contour and `x = ln(F/K)`, the spot
//! measure call price is
//!
//! ```text
//! C(K) = D * (F - K * S(x)),   S(x) = sum_k Re[ kernel_k * exp(-x * z_k + log_mgf_k) ]
//! ```
//!
//! where `kernel_k = -w_k / (pi * z_k * (z_k + 1))`. On the `c = -0.5` line this
//! equals `w_k / (pi * (p_k^2 + 0.25))`, which is evaluated directly to avoid
//! cancellation; the inverse measure uses the `(z - 1)` pole and `c = +0.5`.

use num_complex::Complex64;
use rayon::prelude::*;
use std::f64::consts::PI;

use crate::error::{MgfError, Result};
use crate::models::utils::log_moneyness;
use crate::pricing::config::FourierConfig;
use crate::pricing::types::{Measure, OptionSlice, OptionType};
use crate::transform::grid::Contour;
use crate::transform::quadrature::{integration_weights, nan_sum};

/// Price one maturity slice of options on the underlying.
///
/// `log_mgf_grid[k]` must be the model's log-MGF at `phi_grid.points()[k]`.
/// Under the spot measure the valid codes are `C` and `P`; under the inverse
/// measure `IC` and `IP`.
pub fn slice_pricer_with_mgf_grid(
    log_mgf_grid: &[Complex64],
    phi_grid: &Contour,
    slice: &OptionSlice,
    measure: Measure,
    config: &FourierConfig,
) -> Result<Vec<f64>> {
    check_alignment(log_mgf_grid, phi_grid)?;
    slice.validate()?;
    slice.check_strikes()?;
    for option_type in &slice.option_types {
        check_vanilla_type(*option_type, measure)?;
    }

    let weights = integration_weights(phi_grid, config.rule)?;
    let kernel = payoff_kernel(phi_grid, &weights, measure, config.kernel_tolerance);

    tracing::debug!(
        strikes = slice.len(),
        points = phi_grid.len(),
        measure = %measure,
        rule = ?config.rule,
        "pricing slice"
    );

    let forward = slice.forward;
    let discount = slice.discount_factor;
    let z = phi_grid.points();

    let price_one = |(&strike, &option_type): (&f64, &OptionType)| -> f64 {
        let x = log_moneyness(forward, strike);
        let capped = inversion_sum(&kernel, z, log_mgf_grid, -x);
        match option_type {
            OptionType::Call => discount * (forward - strike * capped),
            OptionType::Put => discount * (strike - strike * capped),
            OptionType::InverseCall => forward * discount * (1.0 - capped),
            OptionType::InversePut => forward * discount * ((-x).exp() - capped),
        }
    };

    Ok(map_strikes(slice, config.parallel, &price_one))
}

/// Price one maturity slice of calls on realized variance `I / ttm`.
///
/// `log_mgf_grid[k]` is the model's log-MGF at `psi_grid.points()[k]` (with
/// the placeholder `phi` of the grid triple encoding the measure). Prices are
/// floored at `config.qvar_floor`. Valid codes: `C` under the spot measure,
/// `IC` under the inverse measure.
pub fn slice_qvar_pricer_with_mgf_grid(
    log_mgf_grid: &[Complex64],
    psi_grid: &Contour,
    slice: &OptionSlice,
    measure: Measure,
    config: &FourierConfig,
) -> Result<Vec<f64>> {
    check_alignment(log_mgf_grid, psi_grid)?;
    slice.validate()?;
    slice.check_strikes()?;
    for option_type in &slice.option_types {
        check_qvar_type(*option_type, measure)?;
    }

    let weights = integration_weights(psi_grid, config.rule)?;
    let kernel: Vec<Complex64> = psi_grid
        .points()
        .iter()
        .zip(&weights)
        .map(|(z, w)| (w / PI) / (*z * *z))
        .collect();

    tracing::debug!(
        strikes = slice.len(),
        points = psi_grid.len(),
        measure = %measure,
        "pricing quadratic variation slice"
    );

    let ttm = slice.ttm;
    let discount = slice.discount_factor;
    let floor = config.qvar_floor;
    let z = psi_grid.points();

    let price_one = |(&strike, _): (&f64, &OptionType)| -> f64 {
        let raw = inversion_sum(&kernel, z, log_mgf_grid, strike * ttm);
        (discount * raw / ttm).max(floor)
    };

    Ok(map_strikes(slice, config.parallel, &price_one))
}

/// Payoff kernel of the vanilla pricer, including the quadrature weights.
pub(crate) fn payoff_kernel(
    contour: &Contour,
    weights: &[f64],
    measure: Measure,
    tolerance: f64,
) -> Vec<Complex64> {
    if contour.on_half_line(tolerance) {
        contour
            .points()
            .iter()
            .zip(weights)
            .map(|(z, w)| Complex64::new((w / PI) / (z.im * z.im + 0.25), 0.0))
            .collect()
    } else {
        let pole = match measure {
            Measure::Spot => 1.0,
            Measure::Inverse => -1.0,
        };
        contour
            .points()
            .iter()
            .zip(weights)
            .map(|(z, w)| -(w / PI) / ((*z + pole) * *z))
            .collect()
    }
}

/// `sum_k Re[kernel_k * exp(shift * z_k + log_mgf_k)]`, NaN terms dropped.
#[inline]
pub(crate) fn inversion_sum(
    kernel: &[Complex64],
    z: &[Complex64],
    log_mgf: &[Complex64],
    shift: f64,
) -> f64 {
    nan_sum(
        kernel
            .iter()
            .zip(z)
            .zip(log_mgf)
            .map(|((k, z), m)| (*k * (shift * *z + *m).exp()).re),
    )
}

pub(crate) fn check_alignment(log_mgf_grid: &[Complex64], contour: &Contour) -> Result<()> {
    if log_mgf_grid.len() != contour.len() {
        return Err(MgfError::malformed(format!(
            "log-mgf grid has {} points but the contour has {}",
            log_mgf_grid.len(),
            contour.len()
        )));
    }
    Ok(())
}

fn check_vanilla_type(option_type: OptionType, measure: Measure) -> Result<()> {
    match (measure, option_type) {
        (Measure::Spot, OptionType::Call | OptionType::Put)
        | (Measure::Inverse, OptionType::InverseCall | OptionType::InversePut) => Ok(()),
        _ => Err(MgfError::unsupported_option(
            option_type.code(),
            format!("vanilla pricer under {measure}"),
        )),
    }
}

fn check_qvar_type(option_type: OptionType, measure: Measure) -> Result<()> {
    match (measure, option_type) {
        (Measure::Spot, OptionType::Call) | (Measure::Inverse, OptionType::InverseCall) => Ok(()),
        _ => Err(MgfError::unsupported_option(
            option_type.code(),
            format!("quadratic variation pricer under {measure}"),
        )),
    }
}

fn map_strikes<F>(slice: &OptionSlice, parallel: bool, price_one: &F) -> Vec<f64>
where
    F: Fn((&f64, &OptionType)) -> f64 + Sync,
{
    if parallel {
        slice
            .strikes
            .par_iter()
            .zip(slice.option_types.par_iter())
            .map(price_one)
            .collect()
    } else {
        slice
            .strikes
            .iter()
            .zip(slice.option_types.iter())
            .map(price_one)
            .collect()
    }
}
