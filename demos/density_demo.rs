// demos/density_demo.rs

//! Recovers the log-return density of a log-normal model from its log-MGF
//! and compares it with the normal law.

use anyhow::Result;
use mgf_pricer::{
    default_configs, linspace, pdf_with_model, BlackScholesMgf, Measure, VariableType,
};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let (ttm, sigma) = (0.5, 0.3);
    let model = BlackScholesMgf::new(sigma)?;
    let config = default_configs::standard();
    let xs = linspace(-1.5, 1.5, 301);
    let dx = xs[1] - xs[0];

    let spot = pdf_with_model(&model, ttm, VariableType::LogReturn, Measure::Spot, &xs, 0.0, &config)?;
    let inverse = pdf_with_model(
        &model,
        ttm,
        VariableType::LogReturn,
        Measure::Inverse,
        &xs,
        0.0,
        &config,
    )?;

    println!("Log-return density, sigma = {sigma}, T = {ttm}");
    println!("{:<8} {:<14} {:<14} {:<14}", "x", "spot", "normal", "inverse");
    println!("{}", "-".repeat(52));
    for j in (0..xs.len()).step_by(20) {
        println!(
            "{:<8.2} {:<14.8} {:<14.8} {:<14.8}",
            xs[j],
            spot[j] / dx,
            model.log_return_density(xs[j], ttm)?,
            inverse[j] / dx
        );
    }

    let mass: f64 = spot.iter().sum();
    let mean: f64 = xs.iter().zip(&spot).map(|(x, p)| x * p).sum();
    println!("\nTotal mass: {:.10}", mass);
    println!("Mean under spot measure: {:.6} (expected {:.6})", mean, -0.5 * sigma * sigma * ttm);

    Ok(())
}
