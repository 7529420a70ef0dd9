// Log-normal reference model: Black-76 prices on the forward, the log-return
// density, and the log-MGF grids consumed by the Fourier pricers. Used to
// cross-check inversions against closed forms.

use num_complex::Complex64;
use statrs::distribution::{Continuous, Normal};

use crate::error::{ensure_positive, MgfError, Result};
use crate::models::traits::LogMgfModel;
use crate::pricing::types::{Measure, OptionType};
use crate::transform::grid::TransformGrids;

fn norm_cdf(x: f64) -> f64 {
    // 0.5 * [1 + erf(x / sqrt(2))]
    0.5 * (1.0 + libm::erf(x / (2.0_f64).sqrt()))
}

/// Black-76 call price on the forward, `D * (F N(d1) - K N(d2))`.
pub fn black_call_price(forward: f64, strike: f64, discount: f64, ttm: f64, sigma: f64) -> f64 {
    if ttm <= 0.0 || sigma <= 0.0 {
        return discount * (forward - strike).max(0.0);
    }
    let total_vol = sigma * ttm.sqrt();
    let d1 = (forward / strike).ln() / total_vol + 0.5 * total_vol;
    let d2 = d1 - total_vol;
    discount * (forward * norm_cdf(d1) - strike * norm_cdf(d2))
}

/// Black-76 put price `D * (K N(-d2) - F N(-d1))`.
pub fn black_put_price(forward: f64, strike: f64, discount: f64, ttm: f64, sigma: f64) -> f64 {
    if ttm <= 0.0 || sigma <= 0.0 {
        return discount * (strike - forward).max(0.0);
    }
    let total_vol = sigma * ttm.sqrt();
    let d1 = (forward / strike).ln() / total_vol + 0.5 * total_vol;
    let d2 = d1 - total_vol;
    discount * (strike * norm_cdf(-d2) - forward * norm_cdf(-d1))
}

/// Black-76 price for any option code. Inverse options are quoted in the
/// same currency units as their vanilla counterparts by the Fourier pricer,
/// so `IC`/`IP` map to call/put.
pub fn black_price(
    option_type: OptionType,
    forward: f64,
    strike: f64,
    discount: f64,
    ttm: f64,
    sigma: f64,
) -> f64 {
    if option_type.is_call() {
        black_call_price(forward, strike, discount, ttm, sigma)
    } else {
        black_put_price(forward, strike, discount, ttm, sigma)
    }
}

/// Geometric Brownian motion with constant volatility.
///
/// With `v = sigma^2 * ttm` and `X = ln(S_T / F)`, the log-MGF handed to the
/// pricers is that of `-X` under the pricing measure, jointly with the
/// (deterministic) quadratic variation `I = v` and volatility `sigma`:
///
/// ```text
/// spot:    0.5 v phi (phi + 1) - psi v - theta sigma
/// inverse: 0.5 v phi (phi - 1) - psi v - theta sigma
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlackScholesMgf {
    pub sigma: f64,
}

impl BlackScholesMgf {
    pub fn new(sigma: f64) -> Result<Self> {
        ensure_positive("sigma", sigma)?;
        Ok(Self { sigma })
    }

    /// Joint log-MGF at one point of the grid triple.
    pub fn log_mgf(
        &self,
        phi: Complex64,
        psi: Complex64,
        theta: Complex64,
        ttm: f64,
        measure: Measure,
    ) -> Complex64 {
        let v = self.sigma * self.sigma * ttm;
        let drift = match measure {
            Measure::Spot => 1.0,
            Measure::Inverse => -1.0,
        };
        0.5 * v * phi * (phi + drift) - psi * v - theta * self.sigma
    }

    /// Density of `X = ln(S_T / F)` under the spot measure.
    pub fn log_return_density(&self, x: f64, ttm: f64) -> Result<f64> {
        let total_vol = self.sigma * ensure_positive("ttm", ttm)?.sqrt();
        let normal = Normal::new(-0.5 * total_vol * total_vol, total_vol).map_err(|_| {
            MgfError::InvalidParameter {
                name: "sigma",
                value: self.sigma,
                reason: "must give a valid normal law",
            }
        })?;
        Ok(normal.pdf(x))
    }
}

impl LogMgfModel for BlackScholesMgf {
    fn model_name(&self) -> &str {
        "black_scholes"
    }

    fn log_mgf_grid(&self, grids: &TransformGrids, ttm: f64) -> Result<Vec<Complex64>> {
        ensure_positive("ttm", ttm)?;
        Ok(grids
            .phi
            .points()
            .iter()
            .zip(grids.psi.points())
            .zip(grids.theta.points())
            .map(|((&phi, &psi), &theta)| self.log_mgf(phi, psi, theta, ttm, grids.measure))
            .collect())
    }

    fn vol_scaler(&self, ttm: f64) -> f64 {
        self.sigma * ttm.sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn atm_call_matches_reference_value() {
        // sigma = 0.2, T = 1, F = K = 100: 100 * (2 N(0.1) - 1)
        let price = black_call_price(100.0, 100.0, 1.0, 1.0, 0.2);
        assert_relative_eq!(price, 7.965567455405804, epsilon = 1e-7);
    }

    #[test]
    fn put_call_parity_holds_in_closed_form() {
        for strike in [60.0, 95.0, 100.0, 140.0] {
            let c = black_call_price(100.0, strike, 0.95, 0.5, 0.3);
            let p = black_put_price(100.0, strike, 0.95, 0.5, 0.3);
            assert_relative_eq!(c - p, 0.95 * (100.0 - strike), epsilon = 1e-6);
        }
    }

    #[test]
    fn log_mgf_is_a_martingale_normalisation() {
        let model = BlackScholesMgf::new(0.3).unwrap();
        let zero = Complex64::new(0.0, 0.0);
        // E[1] = 1 and, under the spot measure, E[exp(X)] = 1 at phi = -1
        let at_zero = model.log_mgf(zero, zero, zero, 2.0, Measure::Spot);
        let at_minus_one = model.log_mgf(Complex64::new(-1.0, 0.0), zero, zero, 2.0, Measure::Spot);
        assert_eq!(at_zero, zero);
        assert!(at_minus_one.norm() < 1e-15);
    }

    #[test]
    fn density_peaks_near_drift() {
        let model = BlackScholesMgf::new(0.2).unwrap();
        let at_mean = model.log_return_density(-0.02, 1.0).unwrap();
        assert_relative_eq!(
            at_mean,
            1.0 / (0.2 * (2.0 * std::f64::consts::PI).sqrt()),
            max_relative = 1e-12
        );
        assert!(model.log_return_density(0.5, 1.0).unwrap() < at_mean);
    }

    #[test]
    fn rejects_non_positive_sigma() {
        assert!(BlackScholesMgf::new(0.0).is_err());
    }
}
