//! Simple example of using the persona library
//!
//! Train a model first, then run:
//! ```bash
//! cargo run --example simple
//! ```
use persona::api::Predictor;
use persona::features::{Answer, FormInput};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Persona Introvert/Extrovert Classifier - Simple Example\n");

    println!("Loading model...");
    let predictor = Predictor::new()?;
    println!("✓ Model loaded\n{}\n", predictor.model_info());

    let examples = vec![
        (
            "Quiet evenings, a couple of close friends",
            FormInput {
                time_alone: 9,
                stage_fear: Answer::Yes,
                social_event_attendance: 1,
                going_outside: 2,
                drained_after_socializing: Answer::Yes,
                friend_circle_size: 3,
                post_frequency: 1,
            },
        ),
        (
            "Out most nights, big group chat",
            FormInput {
                time_alone: 1,
                stage_fear: Answer::No,
                social_event_attendance: 9,
                going_outside: 8,
                drained_after_socializing: Answer::No,
                friend_circle_size: 14,
                post_frequency: 9,
            },
        ),
        ("Lowest value everywhere", FormInput::minimum()),
        ("Highest value everywhere", FormInput::maximum()),
    ];

    println!("{}", "=".repeat(70));
    for (description, input) in examples {
        let label = predictor.predict_input(&input);
        println!("\n{}", description);
        println!("  Features: {:?}", predictor.encode(&input).as_slice());
        println!("  Your Personality : {}", label.display());
        println!("{}", "-".repeat(70));
    }

    println!("\n✓ Done!");

    Ok(())
}
