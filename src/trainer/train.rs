//! Model training pipeline.

use super::data::{drop_incomplete, load_records, Dataset};
use super::encoding::YesNoEncoders;
use super::evaluate::{evaluate, print_results, Evaluation};
use super::save::save_model;
use crate::config::Config;
use crate::forest::RandomForest;
use crate::model_loader::ModelArtifact;
use std::error::Error;
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;

/// What a training run produced.
#[derive(Debug)]
pub struct TrainOutcome {
    /// The in-memory model, identical to what was written
    pub artifact: ModelArtifact,
    pub evaluation: Evaluation,
    pub artifact_path: PathBuf,
    pub train_size: usize,
    pub test_size: usize,
}

/// Train with `config.toml` (or defaults) from the working directory.
pub fn train_model() -> Result<TrainOutcome, Box<dyn Error>> {
    let config = Config::load_or_default();
    train_with_config(&config)
}

/// Train the introvert/extrovert classifier.
///
/// 1. Load the CSV dataset and drop incomplete rows
/// 2. Fit the Yes/No encoders and encode the label
/// 3. Split 80/20 with the configured seed
/// 4. Fit the random forest
/// 5. Print the held-out confusion matrix and report
/// 6. Save the artifact
///
/// Any failure before step 6 leaves the previous artifact untouched.
pub fn train_with_config(config: &Config) -> Result<TrainOutcome, Box<dyn Error>> {
    let start = Instant::now();
    info!(path = %config.data.csv_path, "loading dataset");
    let records = load_records(&config.data.csv_path)?;
    info!(records = records.len(), "dataset loaded");

    let clean = drop_incomplete(records);
    let encoders = YesNoEncoders::fit(&clean);
    if !encoders.agrees_with_fixed() {
        tracing::warn!(
            stage_fear = ?encoders.stage_fear.classes(),
            drained_after_socializing = ?encoders.drained_after_socializing.classes(),
            "fitted Yes/No encoding differs from Yes=1/No=0"
        );
    }
    let dataset = Dataset::from_records(&clean, &encoders)?;

    let (train, test) = dataset.train_test_split(config.data.test_split, config.data.seed)?;
    info!(train = train.len(), test = test.len(), "split dataset");

    let params = config.forest_params();
    info!(
        n_trees = params.n_trees,
        max_depth = ?params.max_depth,
        seed = params.seed,
        "fitting random forest"
    );
    let forest = RandomForest::fit(train.x.view(), &train.y, &params);

    let evaluation = evaluate(&forest, &test);
    print_results(&evaluation);

    let artifact = ModelArtifact::new(forest, encoders);
    let artifact_path = save_model(&artifact, &config.output)?;
    info!(
        elapsed_secs = start.elapsed().as_secs_f64(),
        accuracy = evaluation.report.accuracy,
        "training complete"
    );

    Ok(TrainOutcome {
        artifact,
        evaluation,
        artifact_path,
        train_size: train.len(),
        test_size: test.len(),
    })
}
