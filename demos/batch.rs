//! Batch prediction example
//!
//! Sweeps time spent alone across its whole range and shows where the model
//! flips between introvert and extrovert.
//!
//! Run with:
//! ```bash
//! cargo run --example batch
//! ```
use persona::api::Predictor;
use persona::features::{FeatureVector, FormInput, TIME_ALONE};
use std::time::Instant;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Persona - Batch Prediction Example\n");

    let predictor = Predictor::new()?;
    println!("✓ Model loaded\n");

    let inputs: Vec<FormInput> = (TIME_ALONE.min..=TIME_ALONE.max)
        .map(|hours| FormInput {
            time_alone: hours,
            ..FormInput::default()
        })
        .collect();
    let vectors: Vec<FeatureVector> = inputs.iter().map(|i| predictor.encode(i)).collect();

    let start = Instant::now();
    let labels = predictor.predict_batch(&vectors);
    let elapsed = start.elapsed();

    println!("{}", "=".repeat(40));
    println!("{:>18} | {:<18}", "Hours alone", "Personality");
    println!("{}", "=".repeat(40));
    for (input, label) in inputs.iter().zip(labels.iter()) {
        println!("{:>18} | {:<18}", input.time_alone, label.display());
    }
    println!("{}", "=".repeat(40));

    println!("\n✓ Batch prediction complete");
    println!(
        "  Time: {}µs ({:.2}µs per input)",
        elapsed.as_micros(),
        elapsed.as_micros() as f64 / inputs.len() as f64
    );

    Ok(())
}
