use num_complex::Complex64;
use rayon::prelude::*;
use std::f64::consts::PI;

use crate::error::{MgfError, Result};
use crate::pricing::config::FourierConfig;
use crate::pricing::slice::{check_alignment, inversion_sum};
use crate::transform::grid::{is_uniform, Contour};
use crate::transform::quadrature::integration_weights;

const SPACE_GRID_REL_TOL: f64 = 1e-6;

/// Probability mass of each cell of `space_grid`, recovered from the log-MGF.
///
/// `pdf[j] = dx * sum_k Re[ w_k / pi * exp((x_j - shift) * z_k + log_mgf_k) ]`
/// with `dx = x[1] - x[0]`, so the returned values already include the cell
/// width and sum to about one over a wide enough grid. The spatial grid must
/// be strictly increasing and uniformly spaced with at least two points.
pub fn pdf_with_mgf_grid(
    log_mgf_grid: &[Complex64],
    transform_var_grid: &Contour,
    space_grid: &[f64],
    shift: f64,
    config: &FourierConfig,
) -> Result<Vec<f64>> {
    check_alignment(log_mgf_grid, transform_var_grid)?;
    if space_grid.len() < 2 {
        return Err(MgfError::malformed(format!(
            "space grid needs at least 2 points, got {}",
            space_grid.len()
        )));
    }
    if space_grid.iter().any(|x| !x.is_finite()) {
        return Err(MgfError::malformed("space grid must be finite"));
    }
    let dx = space_grid[1] - space_grid[0];
    if dx <= 0.0 {
        return Err(MgfError::malformed("space grid must be strictly increasing"));
    }
    if !is_uniform(space_grid, SPACE_GRID_REL_TOL) {
        return Err(MgfError::malformed("space grid must be uniformly spaced"));
    }

    let kernel: Vec<Complex64> = integration_weights(transform_var_grid, config.rule)?
        .into_iter()
        .map(|w| Complex64::new(w / PI, 0.0))
        .collect();
    let z = transform_var_grid.points();

    tracing::debug!(
        points = space_grid.len(),
        contour = transform_var_grid.len(),
        dx,
        "evaluating density"
    );

    let density_at = |x: &f64| dx * inversion_sum(&kernel, z, log_mgf_grid, x - shift);

    Ok(if config.parallel {
        space_grid.par_iter().map(density_at).collect()
    } else {
        space_grid.iter().map(density_at).collect()
    })
}
