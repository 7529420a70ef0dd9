// demos/pricing_demo.rs

//! Demonstration of Fourier pricing from a log-MGF grid
//!
//! This example shows how to:
//! 1. Build the log-return contour for a maturity
//! 2. Evaluate a model's log-MGF on it
//! 3. Price a strike ladder under the spot and inverse measures
//! 4. Compare prices and implied volatilities with Black-76

use anyhow::Result;
use mgf_pricer::{
    black_price, default_configs, implied_vols_from_prices, price_slice_with_model,
    BlackScholesMgf, Measure, OptionSlice,
};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    println!("Fourier Inversion Pricing Demo");
    println!("==============================");

    let (ttm, forward, discount, sigma) = (0.25, 100.0, 0.99, 0.45);
    let model = BlackScholesMgf::new(sigma)?;
    let config = default_configs::standard();

    let strikes: Vec<f64> = (0..9).map(|i| 70.0 + 7.5 * i as f64).collect();
    let codes: Vec<&str> = strikes
        .iter()
        .map(|k| if *k < forward { "P" } else { "C" })
        .collect();
    let slice = OptionSlice::from_codes(ttm, forward, discount, strikes.clone(), &codes)?;

    println!("\nStep 1: Pricing under the spot measure...");
    let prices = price_slice_with_model(&model, &slice, Measure::Spot, &config)?;
    let vols = implied_vols_from_prices(&slice, &prices)?;

    println!(
        "{:<6} {:<8} {:<14} {:<14} {:<10}",
        "Type", "Strike", "Fourier", "Black-76", "Impl. vol"
    );
    println!("{}", "-".repeat(56));
    for (i, strike) in strikes.iter().enumerate() {
        let option_type = slice.option_types[i];
        let closed = black_price(option_type, forward, *strike, discount, ttm, sigma);
        let vol = vols[i].map_or("n/a".to_string(), |v| format!("{:.4}%", v * 100.0));
        println!(
            "{:<6} {:<8.1} {:<14.8} {:<14.8} {:<10}",
            option_type.code(),
            strike,
            prices[i],
            closed,
            vol
        );
    }

    println!("\nStep 2: Same ladder as inverse options...");
    let inverse_codes: Vec<String> = codes.iter().map(|c| format!("I{c}")).collect();
    let inverse = OptionSlice::from_codes(ttm, forward, discount, strikes.clone(), &inverse_codes)?;
    let inverse_prices = price_slice_with_model(&model, &inverse, Measure::Inverse, &config)?;

    let max_gap = prices
        .iter()
        .zip(&inverse_prices)
        .map(|(a, b)| (a - b).abs())
        .fold(0.0, f64::max);
    println!("Max |spot - inverse| over the ladder: {:.2e}", max_gap);

    Ok(())
}
