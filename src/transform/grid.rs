//! Integration contours for the transform variables.
//!
//! Each transform variable is sampled on a vertical line `c + i*p`, `p >= 0`:
//!
//! - `phi` (log-return): `c = -0.5` under the spot measure, `+0.5` under the
//!   inverse measure, `p in [0, phi_truncation / vol_scaler]`
//! - `psi` (quadratic variation): `c = -0.5`, `p in [0, psi_upper]`
//! - `theta` (volatility): `c = -0.5`, `p in [0, theta_upper]`
//!
//! Only one contour is active per inversion; the other two are constant
//! placeholders of the same length so that model solvers can take all three
//! transform variables unconditionally.

use num_complex::Complex64;

use crate::error::{ensure_positive, MgfError, Result};
use crate::pricing::config::FourierConfig;
use crate::pricing::types::{Measure, VariableType};

/// Sampled integration contour in the complex transform plane.
#[derive(Debug, Clone, PartialEq)]
pub struct Contour {
    points: Vec<Complex64>,
}

impl Contour {
    /// Contour from arbitrary complex points. At least two points are required.
    pub fn from_points(points: Vec<Complex64>) -> Result<Self> {
        if points.len() < 2 {
            return Err(MgfError::malformed(format!(
                "contour needs at least 2 points, got {}",
                points.len()
            )));
        }
        if points.iter().any(|z| !(z.re.is_finite() && z.im.is_finite())) {
            return Err(MgfError::malformed("contour points must be finite"));
        }
        Ok(Self { points })
    }

    /// Vertical contour `real_part + i*p[k]`.
    pub fn vertical(real_part: f64, imag: &[f64]) -> Result<Self> {
        Self::from_points(imag.iter().map(|&p| Complex64::new(real_part, p)).collect())
    }

    /// Vertical contour with `n` uniformly spaced imaginary parts on `[0, upper]`.
    pub fn linspace(real_part: f64, upper: f64, n: usize) -> Result<Self> {
        ensure_positive("contour upper bound", upper)?;
        Self::vertical(real_part, &linspace(0.0, upper, n))
    }

    /// Constant placeholder contour, e.g. all zeros for an inactive variable.
    pub fn constant(value: f64, len: usize) -> Self {
        Self {
            points: vec![Complex64::new(value, 0.0); len],
        }
    }

    pub fn points(&self) -> &[Complex64] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Imaginary parts `p[k]`.
    pub fn imag(&self) -> Vec<f64> {
        self.points.iter().map(|z| z.im).collect()
    }

    /// True when every point lies on a vertical line with `|Re z| = 0.5`.
    pub fn on_half_line(&self, tolerance: f64) -> bool {
        self.points
            .iter()
            .all(|z| (z.re.abs() - 0.5).abs() < tolerance)
    }

    /// True when consecutive imaginary parts are equally spaced up to a relative tolerance.
    pub fn is_uniform(&self, rel_tolerance: f64) -> bool {
        is_uniform(&self.imag(), rel_tolerance)
    }
}

/// The three transform-variable contours handed to a model solver.
///
/// Exactly one of `phi`, `psi`, `theta` is the active contour selected by
/// `variable`; the others are constant placeholders of the same length.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformGrids {
    pub variable: VariableType,
    pub measure: Measure,
    /// Log-return transform variable
    pub phi: Contour,
    /// Quadratic-variation transform variable
    pub psi: Contour,
    /// Volatility transform variable
    pub theta: Contour,
}

impl TransformGrids {
    /// The contour the inversion integrates over.
    pub fn active(&self) -> &Contour {
        match self.variable {
            VariableType::LogReturn => &self.phi,
            VariableType::QVar => &self.psi,
            VariableType::Sigma => &self.theta,
        }
    }

    pub fn len(&self) -> usize {
        self.active().len()
    }

    pub fn is_empty(&self) -> bool {
        self.active().is_empty()
    }
}

/// `n` evenly spaced samples on `[start, stop]`, endpoints included.
pub fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n - 1) as f64;
            (0..n)
                .map(|i| if i == n - 1 { stop } else { start + step * i as f64 })
                .collect()
        }
    }
}

pub(crate) fn is_uniform(samples: &[f64], rel_tolerance: f64) -> bool {
    if samples.len() < 3 {
        return true;
    }
    let h = samples[1] - samples[0];
    let scale = h.abs().max(f64::MIN_POSITIVE);
    samples
        .windows(2)
        .all(|w| ((w[1] - w[0]) - h).abs() <= rel_tolerance * scale)
}

/// Log-return contour. `vol_scaler = sigma_0 * sqrt(ttm)`; smaller values need a longer contour.
pub fn phi_grid(measure: Measure, vol_scaler: f64, config: &FourierConfig) -> Result<Contour> {
    let vol_scaler = ensure_positive("vol_scaler", vol_scaler)?;
    Contour::linspace(
        measure.phi_real_part(),
        config.phi_truncation / vol_scaler,
        config.phi_points,
    )
}

/// Quadratic-variation contour.
pub fn psi_grid(config: &FourierConfig) -> Result<Contour> {
    Contour::linspace(-0.5, config.psi_upper, config.psi_points)
}

/// Volatility contour.
pub fn theta_grid(config: &FourierConfig) -> Result<Contour> {
    Contour::linspace(-0.5, config.theta_upper, config.theta_points)
}

/// Build the contour triple for a Fourier inversion over `variable`.
///
/// For the QV variable the placeholder `phi` is all zeros under the spot
/// measure and all ones under the inverse measure, which is the measure shift
/// the QV payoff kernel expects from the model solver.
pub fn transform_var_grid(
    variable: VariableType,
    measure: Measure,
    vol_scaler: f64,
    config: &FourierConfig,
) -> Result<TransformGrids> {
    let (phi, psi, theta) = match variable {
        VariableType::LogReturn => {
            let phi = phi_grid(measure, vol_scaler, config)?;
            let n = phi.len();
            (phi, Contour::constant(0.0, n), Contour::constant(0.0, n))
        }
        VariableType::QVar => {
            let psi = psi_grid(config)?;
            let n = psi.len();
            let phi = match measure {
                Measure::Spot => Contour::constant(0.0, n),
                Measure::Inverse => Contour::constant(1.0, n),
            };
            (phi, psi, Contour::constant(0.0, n))
        }
        VariableType::Sigma => {
            let theta = theta_grid(config)?;
            let n = theta.len();
            (Contour::constant(0.0, n), Contour::constant(0.0, n), theta)
        }
    };

    tracing::debug!(
        variable = %variable,
        measure = %measure,
        points = phi.len(),
        "built transform grids"
    );

    Ok(TransformGrids {
        variable,
        measure,
        phi,
        psi,
        theta,
    })
}

/// [`transform_var_grid`] for a variable given by name, e.g. `"q_var"`.
pub fn transform_var_grid_by_name(
    variable: &str,
    measure: Measure,
    vol_scaler: f64,
    config: &FourierConfig,
) -> Result<TransformGrids> {
    transform_var_grid(variable.parse()?, measure, vol_scaler, config)
}
