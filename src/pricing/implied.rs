//! Black-76 implied volatilities of Fourier prices.

use roots::find_root_brent;

use crate::error::{MgfError, Result};
use crate::models::bs::black_price;
use crate::pricing::types::{OptionSlice, OptionType};

const VOL_LOWER: f64 = 1e-6;
const VOL_UPPER: f64 = 10.0;
const VOL_TOL: f64 = 1e-12;

/// Implied volatility of a single price, `None` when the price is outside the
/// no-arbitrage band `(intrinsic, upper bound)` or the root search fails.
pub fn implied_vol(
    option_type: OptionType,
    price: f64,
    forward: f64,
    strike: f64,
    discount: f64,
    ttm: f64,
) -> Option<f64> {
    if !(price.is_finite() && forward > 0.0 && strike > 0.0 && ttm > 0.0 && discount > 0.0) {
        return None;
    }

    let (intrinsic, upper) = if option_type.is_call() {
        (discount * (forward - strike).max(0.0), discount * forward)
    } else {
        (discount * (strike - forward).max(0.0), discount * strike)
    };
    if price <= intrinsic || price >= upper {
        return None;
    }

    let objective =
        |sigma: f64| black_price(option_type, forward, strike, discount, ttm, sigma) - price;
    if objective(VOL_LOWER) * objective(VOL_UPPER) > 0.0 {
        return None;
    }

    find_root_brent(VOL_LOWER, VOL_UPPER, &objective, &mut VOL_TOL.clone()).ok()
}

/// Implied volatilities for a whole priced slice.
pub fn implied_vols_from_prices(slice: &OptionSlice, prices: &[f64]) -> Result<Vec<Option<f64>>> {
    if prices.len() != slice.len() {
        return Err(MgfError::InvalidParameter {
            name: "prices",
            value: prices.len() as f64,
            reason: "must have one price per strike",
        });
    }
    slice.validate()?;

    Ok(slice
        .strikes
        .iter()
        .zip(&slice.option_types)
        .zip(prices)
        .map(|((&strike, &option_type), &price)| {
            implied_vol(
                option_type,
                price,
                slice.forward,
                strike,
                slice.discount_factor,
                slice.ttm,
            )
        })
        .collect())
}
