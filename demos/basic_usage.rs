//! Example usage of the rakott helpers
//!
//! Run with `RUST_LOG=rakott=debug cargo run --example basic_usage` to see the
//! library's tracing output.

use rakott::{
    bootstrap_interval, jeffreys_interval, savitzky_golay, today_stamp, BootstrapConfig,
    BoundaryMode, SavitzkyGolayFilter,
};
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== rakott examples ({}) ===\n", today_stamp());

    // Example 1: Jeffreys interval
    println!("1. Jeffreys 95% intervals:");
    for &(trials, successes) in &[(10u64, 0u64), (10, 5), (100, 50), (10, 10)] {
        let ci = jeffreys_interval(trials, successes, 0.05)?;
        let p = successes as f64 / trials as f64;
        println!(
            "   {successes:>3}/{trials:<3} p = {p:.2}  [{:.3}, {:.3}]",
            ci.lower(p),
            ci.upper(p)
        );
    }

    // Example 2: Bootstrap interval over several proportions
    println!("\n2. Bootstrap 95% intervals (n = 100, seeded):");
    let mut rng = rand::rngs::StdRng::seed_from_u64(2019);
    let proportions = [0.1, 0.5, 0.9];
    let intervals = bootstrap_interval(&proportions, 100, &BootstrapConfig::default(), &mut rng)?;
    for (p, ci) in proportions.iter().zip(&intervals) {
        println!("   p = {p:.2}  -{:.3} / +{:.3}", ci.low, ci.high);
    }

    // Create some noisy test data
    let clean_signal: Vec<f64> = (0..40)
        .map(|i| {
            let x = i as f64 * 0.05;
            (2.0 * std::f64::consts::PI * x).sin() + 0.5 * (4.0 * std::f64::consts::PI * x).cos()
        })
        .collect();
    let noisy_signal: Vec<f64> = clean_signal
        .iter()
        .enumerate()
        .map(|(i, v)| if i % 3 == 0 { v + 0.3 * (i as f64 % 2.0 - 0.5) } else { *v })
        .collect();

    println!("\n3. Original noisy signal:");
    print_signal(&noisy_signal);

    println!("\n4. Savitzky-Golay smoothing (window=7, order=3):");
    print_signal(&savitzky_golay(&noisy_signal, 7, 3, 0, 1.0)?);

    println!("\n5. Nearest boundary mode:");
    let mut nearest_filter =
        SavitzkyGolayFilter::new(7, 3)?.with_boundary_mode(BoundaryMode::Nearest);
    print_signal(&nearest_filter.apply(&noisy_signal)?);

    println!("\n6. First derivative (rate = 20 samples per unit):");
    print_signal(&nearest_filter.apply_derivative(&clean_signal, 1, 20.0)?);

    Ok(())
}

fn print_signal(signal: &[f64]) {
    for (i, &value) in signal.iter().enumerate() {
        print!("{:7.3}", value);
        if (i + 1) % 8 == 0 {
            println!();
        }
    }
    if signal.len() % 8 != 0 {
        println!();
    }
}
