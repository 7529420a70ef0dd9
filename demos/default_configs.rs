use mgf_pricer::{default_configs, price_slice_with_model, BlackScholesMgf, Measure, OptionSlice};

fn main() {
    let model = BlackScholesMgf::new(0.2).expect("positive volatility");
    let slice = OptionSlice::from_codes(1.0, 100.0, 1.0, vec![80.0, 100.0, 120.0], &["P", "C", "C"])
        .expect("valid slice");

    println!("MGF-pricer Default Configuration Examples\n");

    // 1. Standard configuration
    println!("1. Standard Configuration (production grids):");
    let standard = default_configs::standard();
    println!("   Log-return points: {}", standard.phi_points);
    println!("   Log-return truncation: {} / vol_scaler", standard.phi_truncation);
    println!("   QV contour: {} points up to {}", standard.psi_points, standard.psi_upper);
    println!("   Vol contour: {} points up to {}", standard.theta_points, standard.theta_upper);
    println!("   Rule: {:?}, parallel: {}\n", standard.rule, standard.parallel);

    // 2. Legacy configuration
    println!("2. Legacy Configuration (older QV truncation):");
    let legacy = default_configs::legacy();
    println!("   QV contour: {} points up to {}\n", legacy.psi_points, legacy.psi_upper);

    // 3. High resolution configuration
    println!("3. High Resolution Configuration (reference runs):");
    let high = default_configs::high_resolution();
    println!("   Log-return points: {}", high.phi_points);
    println!("   QV points: {}\n", high.psi_points);

    // 4. Fast configuration
    println!("4. Fast Configuration (tests, debugging):");
    let fast = default_configs::fast();
    println!("   Log-return points: {}", fast.phi_points);
    println!("   Parallel: {}\n", fast.parallel);

    println!("ATM-region prices per configuration:");
    for (name, config) in [
        ("standard", standard),
        ("legacy", legacy),
        ("high_resolution", high),
        ("fast", fast),
    ] {
        match price_slice_with_model(&model, &slice, Measure::Spot, &config) {
            Ok(prices) => println!(
                "   {:<16} P(80)={:.8} C(100)={:.8} C(120)={:.8}",
                name, prices[0], prices[1], prices[2]
            ),
            Err(e) => println!("   {:<16} failed: {}", name, e),
        }
    }
}
