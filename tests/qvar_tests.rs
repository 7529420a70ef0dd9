
use approx::assert_relative_eq;
use mgf_pricer::{
    default_configs, price_qvar_slice_with_model, slice_qvar_pricer_with_mgf_grid,
    transform_var_grid, Measure, MgfError, OptionSlice, OptionType, VariableType,
};
use test_utils::{create_test_config, gamma_qvar_call_reference, GammaQVarModel};

const GAMMA: GammaQVarModel = GammaQVarModel {
    shape: 4.0,
    scale: 0.01,
};

fn qvar_calls(ttm: f64, strikes: &[f64]) -> OptionSlice {
    OptionSlice::uniform(ttm, 1.0, 1.0, strikes.to_vec(), OptionType::Call).unwrap()
}

#[test]
fn test_gamma_variance_calls_one_year() {
    let config = create_test_config();
    let strikes = [0.02, 0.04, 0.06];
    let prices =
        price_qvar_slice_with_model(&GAMMA, &qvar_calls(1.0, &strikes), Measure::Spot, &config)
            .unwrap();

    for (strike, price) in strikes.iter().zip(&prices) {
        let expected = gamma_qvar_call_reference(GAMMA.shape, GAMMA.scale, 1.0, *strike);
        println!("K={strike}: fourier={price:.8} reference={expected:.8}");
        assert!((price - expected).abs() < 5e-5);
    }
}

#[test]
fn test_gamma_variance_calls_half_year() {
    let config = create_test_config();
    let strikes = [0.04, 0.08, 0.12];
    let prices =
        price_qvar_slice_with_model(&GAMMA, &qvar_calls(0.5, &strikes), Measure::Spot, &config)
            .unwrap();

    for (strike, price) in strikes.iter().zip(&prices) {
        let expected = gamma_qvar_call_reference(GAMMA.shape, GAMMA.scale, 0.5, *strike);
        assert!((price - expected).abs() < 1e-4);
    }
}

/// The longer QV contour of the standard preset never does worse than the legacy one.
#[test]
fn test_standard_contour_beats_legacy() {
    let standard = create_test_config();
    let legacy = default_configs::legacy();
    let strikes = [0.02, 0.04, 0.06];
    let slice = qvar_calls(1.0, &strikes);

    let std_prices = price_qvar_slice_with_model(&GAMMA, &slice, Measure::Spot, &standard).unwrap();
    let legacy_prices = price_qvar_slice_with_model(&GAMMA, &slice, Measure::Spot, &legacy).unwrap();

    for ((strike, s), l) in strikes.iter().zip(&std_prices).zip(&legacy_prices) {
        let expected = gamma_qvar_call_reference(GAMMA.shape, GAMMA.scale, 1.0, *strike);
        let std_err = (s - expected).abs();
        let legacy_err = (l - expected).abs();
        assert!(legacy_err < 5e-4, "legacy error {legacy_err} at K={strike}");
        assert!(std_err <= legacy_err, "K={strike}: {std_err} > {legacy_err}");
    }
}

#[test]
fn test_far_strikes_hit_the_floor() {
    let config = create_test_config();
    let prices =
        price_qvar_slice_with_model(&GAMMA, &qvar_calls(1.0, &[0.5, 1.0]), Measure::Spot, &config)
            .unwrap();

    assert_eq!(prices[0], config.qvar_floor);
    assert!(prices.iter().all(|p| *p >= config.qvar_floor && *p < 1e-6));
}

#[test]
fn test_discount_scales_prices() {
    let config = create_test_config();
    let undiscounted = qvar_calls(1.0, &[0.04]);
    let discounted =
        OptionSlice::uniform(1.0, 1.0, 0.9, vec![0.04], OptionType::Call).unwrap();

    let p1 = price_qvar_slice_with_model(&GAMMA, &undiscounted, Measure::Spot, &config).unwrap();
    let p09 = price_qvar_slice_with_model(&GAMMA, &discounted, Measure::Spot, &config).unwrap();
    assert_relative_eq!(p09[0], 0.9 * p1[0], max_relative = 1e-12);
}

/// A measure-independent QV law prices `IC` under the inverse measure like `C` under spot.
#[test]
fn test_inverse_call_matches_spot_call_for_measure_free_law() {
    let config = create_test_config();
    let strikes = vec![0.02, 0.04, 0.06];
    let spot = qvar_calls(1.0, &strikes);
    let inverse = OptionSlice::uniform(1.0, 1.0, 1.0, strikes, OptionType::InverseCall).unwrap();

    let spot_prices = price_qvar_slice_with_model(&GAMMA, &spot, Measure::Spot, &config).unwrap();
    let inverse_prices =
        price_qvar_slice_with_model(&GAMMA, &inverse, Measure::Inverse, &config).unwrap();

    for (s, i) in spot_prices.iter().zip(&inverse_prices) {
        assert_relative_eq!(*s, *i, max_relative = 1e-12);
    }
}

#[test]
fn test_qvar_rejects_puts_and_mismatched_codes() {
    let config = create_test_config();
    let puts = OptionSlice::uniform(1.0, 1.0, 1.0, vec![0.04], OptionType::Put).unwrap();
    let err = price_qvar_slice_with_model(&GAMMA, &puts, Measure::Spot, &config).unwrap_err();
    assert!(matches!(err, MgfError::UnsupportedOptionType { ref code, .. } if code == "P"));

    let calls = qvar_calls(1.0, &[0.04]);
    assert!(price_qvar_slice_with_model(&GAMMA, &calls, Measure::Inverse, &config).is_err());
}

#[test]
fn test_qvar_pricer_rejects_misaligned_grid() {
    let config = create_test_config();
    let grids = transform_var_grid(VariableType::QVar, Measure::Spot, 0.2, &config).unwrap();
    let mut log_mgf = vec![num_complex::Complex64::new(0.0, 0.0); grids.psi.len()];
    log_mgf.pop();

    let err = slice_qvar_pricer_with_mgf_grid(
        &log_mgf,
        &grids.psi,
        &qvar_calls(1.0, &[0.04]),
        Measure::Spot,
        &config,
    )
    .unwrap_err();
    assert!(matches!(err, MgfError::MalformedGrid { .. }));
}
