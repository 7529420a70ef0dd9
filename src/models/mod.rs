pub mod bs;

/// Seams between the Fourier pricers and the models that feed them
pub mod traits {
    use num_complex::Complex64;

    use crate::error::Result;
    use crate::transform::grid::TransformGrids;

    /// A model that can evaluate its log-MGF on the transform grids.
    ///
    /// The returned vector is aligned index-for-index with `grids.active()`.
    /// Values that cannot be computed may be NaN; the pricers drop them.
    pub trait LogMgfModel: Send + Sync {
        /// Short identifier used in logs
        fn model_name(&self) -> &str;

        /// Log-MGF at every point of the grid triple for maturity `ttm`, under `grids.measure`.
        fn log_mgf_grid(&self, grids: &TransformGrids, ttm: f64) -> Result<Vec<Complex64>>;

        /// `sigma_0 * sqrt(ttm)`, used to size the log-return contour
        fn vol_scaler(&self, ttm: f64) -> f64;
    }
}

/// Utility functions shared by the pricing entry points
pub mod utils {
    use crate::error::{MgfError, Result};
    use crate::models::traits::LogMgfModel;
    use crate::pricing::config::FourierConfig;

    /// Calculate log-moneyness in the pricer's convention: ln(F/K)
    pub fn log_moneyness(forward: f64, strike: f64) -> f64 {
        (forward / strike).ln()
    }

    /// Contour scale for `model` at `ttm`, falling back to the configured default
    /// when the model reports a non-positive or non-finite scale.
    pub fn resolve_vol_scaler<M: LogMgfModel + ?Sized>(
        model: &M,
        ttm: f64,
        config: &FourierConfig,
    ) -> Result<f64> {
        let scale = model.vol_scaler(ttm);
        if scale.is_finite() && scale > 0.0 {
            return Ok(scale);
        }
        tracing::warn!(
            model = model.model_name(),
            scale,
            fallback = config.vol_scaler,
            "model vol scaler unusable, falling back to configured default"
        );
        if config.vol_scaler.is_finite() && config.vol_scaler > 0.0 {
            Ok(config.vol_scaler)
        } else {
            Err(MgfError::InvalidParameter {
                name: "vol_scaler",
                value: config.vol_scaler,
                reason: "must be positive and finite",
            })
        }
    }
}
