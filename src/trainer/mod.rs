//! Offline training of the introvert/extrovert classifier.
//!
//! The trainer is a straight-line batch job:
//!
//! - **Load**: read the CSV dataset; a missing file or column is fatal
//! - **Clean**: drop every row with a missing value (no imputation)
//! - **Encode**: fitted label encoders for the two Yes/No columns, a fixed
//!   dictionary for the personality label
//! - **Split**: 80% train / 20% held out, seeded
//! - **Fit**: random forest on the seven numeric features
//! - **Report**: confusion matrix and classification report on stdout
//! - **Save**: JSON artifact at the configured path, overwriting
//!
//! ## Usage
//!
//! ```bash
//! ./target/release/persona train
//! ```
//!
//! ### As a Library
//!
//! ```rust,no_run
//! use persona::trainer::train::train_model;
//!
//! let outcome = train_model().expect("Training failed");
//! println!("held-out accuracy: {:.2}", outcome.evaluation.report.accuracy);
//! ```
//!
//! ## Configuration
//!
//! ```toml
//! [data]
//! csv_path = "data/personality_data.csv"
//! test_split = 0.2
//! seed = 42
//!
//! [model]
//! n_trees = 100
//! min_samples_split = 2
//! min_samples_leaf = 1
//!
//! [output]
//! model_dir = "app"
//! model_file = "model.json"
//! ```
//!
//! ## Module Structure
//!
//! - [`data`] - CSV records, cleaning and the train/test split
//! - [`encoding`] - Label encoders
//! - [`train`] - Training pipeline
//! - [`evaluate`] - Confusion matrix and classification report
//! - [`save`] - Model persistence

pub mod data;
pub mod encoding;
pub mod evaluate;
pub mod save;
pub mod train;

pub use train::{train_model, train_with_config, TrainOutcome};
