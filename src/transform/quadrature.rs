//! Quadrature weights over a contour's imaginary parts, and the NaN-skipping
//! reduction used by every inversion sum.

use crate::error::{MgfError, Result};
use crate::pricing::types::QuadratureRule;
use crate::transform::grid::{is_uniform, Contour};

const UNIFORM_REL_TOL: f64 = 1e-8;

/// Per-point integration weights for `contour` under `rule`.
///
/// Simpson: `[1, 4, 2, 4, ..., 2, 4, 1] * h / 3` with `h = p[1] - p[0]`. Every
/// odd index gets 4, including the last one when the point count is even (the
/// built-in grids have 1000 and 4000 points); the endpoint 1 is then
/// overwritten. Uniform spacing is assumed and not enforced.
///
/// Trapezoidal: `0.5 * (p[1] - p[0])` for the first point and `p[i] - p[i-1]`
/// afterwards, valid on non-uniform grids.
pub fn integration_weights(contour: &Contour, rule: QuadratureRule) -> Result<Vec<f64>> {
    if contour.len() < 2 {
        return Err(MgfError::malformed(format!(
            "quadrature needs at least 2 points, got {}",
            contour.len()
        )));
    }
    let p = contour.imag();
    Ok(match rule {
        QuadratureRule::Simpson => simpson_weights(&p),
        QuadratureRule::Trapezoidal => trapezoidal_weights(&p),
    })
}

fn simpson_weights(p: &[f64]) -> Vec<f64> {
    if !is_uniform(p, UNIFORM_REL_TOL) {
        tracing::warn!(
            points = p.len(),
            "simpson weights requested on a non-uniform grid; using the first spacing"
        );
    }
    let n = p.len();
    let scale = (p[1] - p[0]) / 3.0;
    (0..n)
        .map(|i| {
            let w = if i % 2 == 1 {
                4.0
            } else if i == 0 || i == n - 1 {
                1.0
            } else {
                2.0
            };
            scale * w
        })
        .collect()
}

fn trapezoidal_weights(p: &[f64]) -> Vec<f64> {
    std::iter::once(0.5 * (p[1] - p[0]))
        .chain(p.windows(2).map(|w| w[1] - w[0]))
        .collect()
}

/// Sum that drops NaN terms instead of propagating them.
///
/// NaNs come from the model solver underflowing in the far tail of the
/// contour; they carry no mass and are excluded from the integral.
pub fn nan_sum<I>(values: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    values.into_iter().filter(|v| !v.is_nan()).sum()
}
