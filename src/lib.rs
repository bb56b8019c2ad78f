//! # Persona - Introvert/Extrovert Classifier
//!
//! Predicts whether someone is an introvert or an extrovert from seven
//! answers about their social habits, using a random forest trained on a
//! labeled CSV dataset.
//!
//! ## Features
//!
//! - **Trainer**: cleans the dataset, fits a seeded random forest, reports a
//!   confusion matrix and classification report on a 20% held-out split
//! - **Predictor**: loads the saved model once and answers any number of
//!   predictions
//! - **Interactive Form**: terminal form with bounded sliders and Yes/No choices
//! - **Pure Rust**: no native ML runtime required
//!
//! ## Quick Start
//!
//! ```bash
//! # Train (reads data/personality_data.csv, writes app/model.json)
//! ./target/release/persona train
//!
//! # Predict interactively
//! ./target/release/persona predict
//! ```
//!
//! ### Basic Usage
//!
//! ```no_run
//! use persona::api::Predictor;
//! use persona::features::{Answer, FormInput};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let predictor = Predictor::new()?;
//!
//!     let input = FormInput {
//!         time_alone: 9,
//!         stage_fear: Answer::Yes,
//!         social_event_attendance: 1,
//!         going_outside: 2,
//!         drained_after_socializing: Answer::Yes,
//!         friend_circle_size: 3,
//!         post_frequency: 1,
//!     };
//!
//!     let label = predictor.predict_input(&input);
//!     println!("Your Personality : {}", label.display());
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Order
//!
//! The model sees positions, not names:
//!
//! | # | Column | Range |
//! |---|--------|-------|
//! | 0 | `time_spent_alone` | 0-12 |
//! | 1 | `stage_fear` | Yes/No |
//! | 2 | `social_event_attendance` | 0-10 |
//! | 3 | `going_outside` | 0-10 |
//! | 4 | `drained_after_socializing` | Yes/No |
//! | 5 | `friends_circle_size` | 0-15 |
//! | 6 | `post_frequency` | 0-10 |
//!
//! ## Yes/No Encoding
//!
//! The trainer numbers Yes/No answers with encoders fitted on the data, while
//! the form sends Yes = 1, No = 0. For a dataset spelled exactly "Yes"/"No"
//! the two agree. When they do not, the predictor logs a warning at load time
//! and keeps the fixed convention unless `use_fitted_encoding` is set in
//! `config.toml`.
//!
//! ## Error Handling
//!
//! ```no_run
//! use persona::api::Predictor;
//! use persona::error::ArtifactError;
//!
//! match Predictor::new() {
//!     Ok(predictor) => println!("{}", predictor.model_info()),
//!     Err(ArtifactError::NotFound(path)) => {
//!         eprintln!("No model at {}. Run `persona train` first.", path.display());
//!     }
//!     Err(e) => eprintln!("Failed to load model: {}", e),
//! }
//! ```
//!
//! ## License
//!
//! GNU General Public License v3.0 (GPLv3)

// Public API modules
pub mod api;
pub mod model_loader;

// Core modules
pub mod config;
pub mod error;
pub mod features;
pub mod forest;
pub mod form;
pub mod trainer;

#[cfg(feature = "cli")]
pub mod cli;

// Re-export commonly used types for convenience
pub use api::Predictor;
pub use features::{Answer, FeatureVector, FormInput, Label};
pub use forest::{Classifier, RandomForest};
pub use trainer::data::{drop_incomplete, load_records};
