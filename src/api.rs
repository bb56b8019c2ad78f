//! High-level API for personality prediction
//!
//! A [`Predictor`] owns a loaded model artifact. It exists only once the
//! artifact has been read and validated, so holding one means the model is
//! ready; there is no way to unload it.
//!
//! # Quick Start
//!
//! ```no_run
//! use persona::api::Predictor;
//! use persona::features::FormInput;
//!
//! let predictor = Predictor::new()?;
//! let label = predictor.predict_input(&FormInput::default());
//! println!("Your Personality : {}", label.display());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Custom Artifact Location
//!
//! ```no_run
//! use persona::api::{Predictor, PredictorConfig};
//!
//! let config = PredictorConfig::new()
//!     .with_model_dir("/custom/path")
//!     .with_model_file("model.json");
//!
//! let predictor = Predictor::with_config(config)?;
//! # Ok::<(), persona::error::ArtifactError>(())
//! ```
//!
//! # Yes/No Encoding
//!
//! By default the form's Yes/No answers are encoded as Yes = 1, No = 0, which
//! is not necessarily how the trainer's fitted encoders numbered them.
//! `with_fitted_encoding(true)` uses the encoders stored in the artifact
//! instead.

use crate::error::ArtifactError;
use crate::features::{FeatureVector, FormInput, Label, DRAINED_INDEX, STAGE_FEAR_INDEX};
use crate::forest::Classifier;
use crate::model_loader::ModelArtifact;
use crate::trainer::encoding::YesNoEncoders;
use std::fmt;
use std::path::{Path, PathBuf};

pub use crate::model_loader::ModelLoaderConfig as PredictorConfig;

/// Loaded model, ready to answer predictions.
#[derive(Debug)]
pub struct Predictor {
    artifact: ModelArtifact,
    path: PathBuf,
    use_fitted_encoding: bool,
}

impl Predictor {
    /// Load the artifact from the default location (`app/model.json`).
    pub fn new() -> Result<Self, ArtifactError> {
        Self::with_config(PredictorConfig::default())
    }

    /// Load the artifact at `path` with the fixed Yes/No encoding.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ArtifactError> {
        Self::open(path.as_ref(), false)
    }

    pub fn with_config(config: PredictorConfig) -> Result<Self, ArtifactError> {
        Self::open(&config.artifact_path(), config.use_fitted_encoding)
    }

    fn open(path: &Path, use_fitted_encoding: bool) -> Result<Self, ArtifactError> {
        let artifact = ModelArtifact::load(path)?;

        if !artifact.encoders.agrees_with_fixed() {
            tracing::warn!(
                stage_fear = ?artifact.encoders.stage_fear.classes(),
                drained_after_socializing = ?artifact.encoders.drained_after_socializing.classes(),
                use_fitted_encoding,
                "model was trained with a Yes/No encoding other than Yes=1/No=0"
            );
        }
        tracing::info!(
            path = %path.display(),
            trees = artifact.forest.n_trees(),
            "model loaded"
        );

        Ok(Predictor {
            artifact,
            path: path.to_path_buf(),
            use_fitted_encoding,
        })
    }

    /// Predict the label of an assembled feature vector.
    pub fn predict(&self, features: &FeatureVector) -> Label {
        self.artifact.predict(features)
    }

    /// Predict from raw form values.
    pub fn predict_input(&self, input: &FormInput) -> Label {
        self.predict(&self.encode(input))
    }

    /// Predict several vectors.
    pub fn predict_batch(&self, features: &[FeatureVector]) -> Vec<Label> {
        features.iter().map(|f| self.predict(f)).collect()
    }

    /// Assemble the feature vector for a form submission.
    pub fn encode(&self, input: &FormInput) -> FeatureVector {
        let mut vector = FeatureVector::from(input);
        if self.use_fitted_encoding {
            let encoders = &self.artifact.encoders;
            vector.0[STAGE_FEAR_INDEX] =
                YesNoEncoders::encode_answer(&encoders.stage_fear, input.stage_fear);
            vector.0[DRAINED_INDEX] = YesNoEncoders::encode_answer(
                &encoders.drained_after_socializing,
                input.drained_after_socializing,
            );
        }
        vector
    }

    /// Information about the loaded model
    pub fn model_info(&self) -> ModelInfo {
        ModelInfo {
            path: self.path.clone(),
            n_trees: self.artifact.forest.n_trees(),
            feature_columns: self.artifact.feature_columns.clone(),
            use_fitted_encoding: self.use_fitted_encoding,
        }
    }
}

/// Information about the loaded model
#[derive(Debug, Clone)]
pub struct ModelInfo {
    pub path: PathBuf,
    pub n_trees: usize,
    pub feature_columns: Vec<String>,
    pub use_fitted_encoding: bool,
}

impl fmt::Display for ModelInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Model: {}", self.path.display())?;
        writeln!(f, "Trees: {}", self.n_trees)?;
        write!(f, "Features: {}", self.feature_columns.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::{Answer, NUM_FEATURES};
    use crate::forest::{ForestParams, RandomForest};
    use crate::trainer::encoding::LabelEncoder;
    use ndarray::Array2;

    /// Artifact trained on a grid covering the full form ranges.
    fn write_artifact(dir: &Path, encoders: YesNoEncoders) -> PathBuf {
        let mut rows = Vec::new();
        let mut labels = Vec::new();
        for alone in 0..=12u32 {
            for friends in [0u32, 5, 10, 15] {
                let flag = (alone > 6) as u32 as f64;
                rows.extend_from_slice(&[
                    alone as f64,
                    flag,
                    (10 - alone.min(10)) as f64,
                    5.0,
                    flag,
                    friends as f64,
                    (friends % 11) as f64,
                ]);
                labels.push(if alone > 6 { Label::Introvert } else { Label::Extrovert });
            }
        }
        let x = Array2::from_shape_vec((labels.len(), NUM_FEATURES), rows).unwrap();
        let params = ForestParams {
            n_trees: 10,
            ..ForestParams::default()
        };
        let forest = RandomForest::fit(x.view(), &labels, &params);
        let path = dir.join("model.json");
        ModelArtifact::new(forest, encoders).save(&path).unwrap();
        path
    }

    fn standard_encoders() -> YesNoEncoders {
        YesNoEncoders {
            stage_fear: LabelEncoder::fit(["No", "Yes"]),
            drained_after_socializing: LabelEncoder::fit(["No", "Yes"]),
        }
    }

    #[test]
    fn test_boundary_inputs_produce_labels() {
        let dir = tempfile::tempdir().unwrap();
        let predictor = Predictor::load(write_artifact(dir.path(), standard_encoders())).unwrap();

        for input in [FormInput::minimum(), FormInput::maximum()] {
            let label = predictor.predict_input(&input);
            assert!(Label::ALL.contains(&label));
        }
    }

    #[test]
    fn test_prediction_is_deterministic() {
        let dir = tempfile::tempdir().unwrap();
        let predictor = Predictor::load(write_artifact(dir.path(), standard_encoders())).unwrap();

        for alone in 0..=12 {
            let input = FormInput {
                time_alone: alone,
                ..FormInput::default()
            };
            assert_eq!(predictor.predict_input(&input), predictor.predict_input(&input));
        }
    }

    #[test]
    fn test_every_in_range_input_yields_a_label() {
        let dir = tempfile::tempdir().unwrap();
        let predictor = Predictor::load(write_artifact(dir.path(), standard_encoders())).unwrap();

        let mut vectors = Vec::new();
        for alone in 0..=12u8 {
            for answer in [Answer::Yes, Answer::No] {
                for friends in 0..=15u8 {
                    let input = FormInput {
                        time_alone: alone,
                        stage_fear: answer,
                        drained_after_socializing: answer,
                        friend_circle_size: friends,
                        ..FormInput::default()
                    };
                    vectors.push(predictor.encode(&input));
                }
            }
        }
        let labels = predictor.predict_batch(&vectors);
        assert_eq!(labels.len(), vectors.len());
        assert!(labels.iter().all(|l| l.index() <= 1));
    }

    #[test]
    fn test_fixed_encoding_ignores_fitted_encoders() {
        let dir = tempfile::tempdir().unwrap();
        // "no" sorts after "Yes": fitted codes are Yes = 0, no = 1.
        let flipped = YesNoEncoders {
            stage_fear: LabelEncoder::fit(["Yes", "no"]),
            drained_after_socializing: LabelEncoder::fit(["Yes", "no"]),
        };
        let path = write_artifact(dir.path(), flipped);
        let input = FormInput::maximum();

        let fixed = Predictor::load(&path).unwrap();
        let v = fixed.encode(&input);
        assert_eq!(v.0[STAGE_FEAR_INDEX], 1.0);
        assert_eq!(v.0[DRAINED_INDEX], 1.0);

        let config = PredictorConfig::new()
            .with_model_dir(dir.path().to_string_lossy())
            .with_fitted_encoding(true);
        let fitted = Predictor::with_config(config).unwrap();
        let v = fitted.encode(&input);
        assert_eq!(v.0[STAGE_FEAR_INDEX], 0.0);
        assert_eq!(v.0[DRAINED_INDEX], 0.0);
    }

    #[test]
    fn test_missing_artifact_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let err = Predictor::load(dir.path().join("model.json")).unwrap_err();
        assert!(matches!(err, ArtifactError::NotFound(_)));
    }

    #[test]
    fn test_model_info() {
        let dir = tempfile::tempdir().unwrap();
        let predictor = Predictor::load(write_artifact(dir.path(), standard_encoders())).unwrap();
        let info = predictor.model_info();
        assert_eq!(info.n_trees, 10);
        assert_eq!(info.feature_columns.len(), NUM_FEATURES);
        assert!(info.to_string().contains("time_spent_alone"));
    }
}
