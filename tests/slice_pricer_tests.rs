
use approx::assert_relative_eq;
use mgf_pricer::{
    black_call_price, black_price, implied_vols_from_prices, phi_grid, price_slice_with_model,
    slice_pricer_with_mgf_grid, transform_var_grid, BlackScholesMgf, Measure, MgfError,
    OptionSlice, OptionType, QuadratureRule, VariableType,
};
use test_utils::{black_scholes_log_mgf, create_test_config};

/// ATM call under a log-normal model must match Black-Scholes.
/// sigma = 0.2, T = 1, F = 100, D = 1, K = 100 -> 7.9656
#[test]
fn test_black_scholes_atm_call() {
    let config = create_test_config();
    let grids = transform_var_grid(VariableType::LogReturn, Measure::Spot, 0.2, &config).unwrap();
    let log_mgf = black_scholes_log_mgf(grids.phi.points(), 0.2, 1.0);
    let slice = OptionSlice::from_codes(1.0, 100.0, 1.0, vec![100.0], &["C"]).unwrap();

    let prices =
        slice_pricer_with_mgf_grid(&log_mgf, &grids.phi, &slice, Measure::Spot, &config).unwrap();

    let expected = black_call_price(100.0, 100.0, 1.0, 1.0, 0.2);
    println!("Fourier ATM call = {:.10}, closed form = {:.10}", prices[0], expected);
    assert!((prices[0] - 7.9656).abs() < 1e-3);
    assert!((prices[0] - expected).abs() < 1e-6);
}

/// Whole strike ladder, both option types, discounted, both quadrature rules.
#[test]
fn test_strike_ladder_matches_closed_form() {
    let (forward, ttm, sigma, discount) = (100.0, 0.25, 0.5, 0.95);
    let model = BlackScholesMgf::new(sigma).unwrap();
    let strikes = vec![50.0, 70.0, 90.0, 100.0, 110.0, 130.0, 160.0, 200.0];

    for rule in [QuadratureRule::Simpson, QuadratureRule::Trapezoidal] {
        let config = create_test_config().with_rule(rule);
        for option_type in [OptionType::Call, OptionType::Put] {
            let slice =
                OptionSlice::uniform(ttm, forward, discount, strikes.clone(), option_type).unwrap();
            let prices = price_slice_with_model(&model, &slice, Measure::Spot, &config).unwrap();
            for (strike, price) in strikes.iter().zip(&prices) {
                let expected = black_price(option_type, forward, *strike, discount, ttm, sigma);
                assert!(
                    (price - expected).abs() < 1e-6,
                    "{:?} {} K={} fourier={} closed={}",
                    rule,
                    option_type,
                    strike,
                    price,
                    expected
                );
            }
        }
    }
}

/// Inverse-measure codes priced on the +0.5 contour agree with the spot prices.
#[test]
fn test_inverse_measure_matches_spot_prices() {
    let config = create_test_config();
    let model = BlackScholesMgf::new(0.5).unwrap();
    let strikes = vec![70.0, 100.0, 130.0];

    let spot = OptionSlice::from_codes(0.25, 100.0, 0.95, strikes.clone(), &["C", "P", "C"]).unwrap();
    let inverse =
        OptionSlice::from_codes(0.25, 100.0, 0.95, strikes, &["IC", "IP", "IC"]).unwrap();

    let spot_prices = price_slice_with_model(&model, &spot, Measure::Spot, &config).unwrap();
    let inverse_prices = price_slice_with_model(&model, &inverse, Measure::Inverse, &config).unwrap();

    for (s, i) in spot_prices.iter().zip(&inverse_prices) {
        assert_relative_eq!(*s, *i, epsilon = 1e-6);
    }
}

/// C - P = D (F - K) for any log-MGF grid, since both use the same inversion sum.
#[test]
fn test_put_call_parity() {
    let config = create_test_config();
    let contour = phi_grid(Measure::Spot, 0.3, &config).unwrap();
    // Not a martingale model on purpose: parity is a property of the pricer
    let log_mgf: Vec<_> = contour
        .points()
        .iter()
        .map(|z| 0.05 * *z * (*z + 1.0) + 0.01 * *z * *z * *z)
        .collect();

    let strikes = vec![80.0, 95.0, 100.0, 105.0, 120.0];
    let calls = OptionSlice::uniform(0.5, 100.0, 0.9, strikes.clone(), OptionType::Call).unwrap();
    let puts = OptionSlice::uniform(0.5, 100.0, 0.9, strikes.clone(), OptionType::Put).unwrap();

    let c = slice_pricer_with_mgf_grid(&log_mgf, &contour, &calls, Measure::Spot, &config).unwrap();
    let p = slice_pricer_with_mgf_grid(&log_mgf, &contour, &puts, Measure::Spot, &config).unwrap();

    for ((k, c), p) in strikes.iter().zip(&c).zip(&p) {
        assert_relative_eq!(c - p, 0.9 * (100.0 - k), epsilon = 1e-9, max_relative = 1e-9);
    }
}

/// Calls fall and puts rise with strike.
#[test]
fn test_monotonicity_in_strike() {
    let config = create_test_config();
    let model = BlackScholesMgf::new(0.35).unwrap();
    let strikes: Vec<f64> = (0..30).map(|i| 60.0 + 3.0 * i as f64).collect();

    let calls = OptionSlice::uniform(0.5, 100.0, 1.0, strikes.clone(), OptionType::Call).unwrap();
    let puts = OptionSlice::uniform(0.5, 100.0, 1.0, strikes, OptionType::Put).unwrap();
    let c = price_slice_with_model(&model, &calls, Measure::Spot, &config).unwrap();
    let p = price_slice_with_model(&model, &puts, Measure::Spot, &config).unwrap();

    assert!(c.windows(2).all(|w| w[1] <= w[0] + 1e-12));
    assert!(p.windows(2).all(|w| w[1] >= w[0] - 1e-12));
}

#[test]
fn test_negative_strike_is_rejected() {
    let config = create_test_config();
    let model = BlackScholesMgf::new(0.2).unwrap();
    let slice = OptionSlice::uniform(1.0, 100.0, 1.0, vec![100.0, -1.0], OptionType::Call).unwrap();
    let err = price_slice_with_model(&model, &slice, Measure::Spot, &config).unwrap_err();
    assert_eq!(err, MgfError::InvalidStrike(-1.0));
}

#[test]
fn test_unknown_option_code_is_rejected() {
    let err = OptionSlice::from_codes(1.0, 100.0, 1.0, vec![100.0], &["X"]).unwrap_err();
    assert!(matches!(err, MgfError::UnsupportedOptionType { ref code, .. } if code == "X"));
}

#[test]
fn test_vanilla_codes_rejected_under_inverse_measure() {
    let config = create_test_config();
    let model = BlackScholesMgf::new(0.2).unwrap();
    let slice = OptionSlice::from_codes(1.0, 100.0, 1.0, vec![100.0], &["P"]).unwrap();
    let err = price_slice_with_model(&model, &slice, Measure::Inverse, &config).unwrap_err();
    assert!(matches!(err, MgfError::UnsupportedOptionType { .. }));
}

#[test]
fn test_unknown_variable_kind_is_rejected() {
    let err = "stochastic_rate".parse::<VariableType>().unwrap_err();
    assert_eq!(
        err,
        MgfError::UnsupportedVariableKind("stochastic_rate".to_string())
    );
}

/// Fourier prices invert back to the model volatility.
#[test]
fn test_implied_vols_of_fourier_prices() {
    let config = create_test_config();
    let model = BlackScholesMgf::new(0.3).unwrap();
    let slice = OptionSlice::from_codes(
        0.5,
        100.0,
        0.97,
        vec![80.0, 90.0, 100.0, 110.0, 120.0],
        &["P", "P", "C", "C", "C"],
    )
    .unwrap();

    let prices = price_slice_with_model(&model, &slice, Measure::Spot, &config).unwrap();
    let vols = implied_vols_from_prices(&slice, &prices).unwrap();

    for vol in vols {
        let vol = vol.expect("price inside no-arbitrage bounds");
        assert_relative_eq!(vol, 0.3, epsilon = 1e-5);
    }
}
