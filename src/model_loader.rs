//! Model artifact persistence and location.
//!
//! The artifact is a single JSON file holding the fitted forest, the Yes/No
//! encoders fitted at training time and the feature column order. Training
//! overwrites it; prediction only reads it.
//!
//! # Examples
//!
//! ```no_run
//! use persona::model_loader::{ModelArtifact, ModelLoaderConfig};
//!
//! let config = ModelLoaderConfig::new().with_model_dir("app");
//! let artifact = ModelArtifact::load(config.artifact_path())?;
//! println!("{} trees", artifact.forest.n_trees());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use crate::config::Config;
use crate::error::ArtifactError;
use crate::features::{Label, FEATURE_COLUMNS, NUM_FEATURES};
use crate::forest::{Classifier, RandomForest};
use crate::trainer::encoding::YesNoEncoders;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

const DEFAULT_MODEL_DIR: &str = "app";
const DEFAULT_MODEL_FILE: &str = "model.json";

/// Everything the predictor needs from a training run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub feature_columns: Vec<String>,
    pub encoders: YesNoEncoders,
    pub forest: RandomForest,
}

impl ModelArtifact {
    pub fn new(forest: RandomForest, encoders: YesNoEncoders) -> Self {
        ModelArtifact {
            feature_columns: FEATURE_COLUMNS.iter().map(|c| c.to_string()).collect(),
            encoders,
            forest,
        }
    }

    /// Write the artifact, creating the parent directory and replacing any
    /// existing file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ArtifactError> {
        let path = path.as_ref();
        let io_err = |source| ArtifactError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let file = File::create(path).map_err(io_err)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, self)
            .map_err(std::io::Error::other)
            .map_err(io_err)?;
        writer.flush().map_err(io_err)?;
        Ok(())
    }

    /// Read and validate an artifact.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ArtifactError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| match source.kind() {
            ErrorKind::NotFound => ArtifactError::NotFound(path.to_path_buf()),
            _ => ArtifactError::Io {
                path: path.to_path_buf(),
                source,
            },
        })?;

        let artifact: ModelArtifact =
            serde_json::from_reader(BufReader::new(file)).map_err(|source| {
                if source.is_io() {
                    ArtifactError::Io {
                        path: path.to_path_buf(),
                        source: source.into(),
                    }
                } else {
                    ArtifactError::Corrupt {
                        path: path.to_path_buf(),
                        source,
                    }
                }
            })?;

        for got in [artifact.forest.n_features(), artifact.feature_columns.len()] {
            if got != NUM_FEATURES {
                return Err(ArtifactError::Shape {
                    expected: NUM_FEATURES,
                    got,
                });
            }
        }
        if !artifact.forest.is_well_formed() {
            return Err(ArtifactError::Malformed(path.to_path_buf()));
        }

        Ok(artifact)
    }
}

impl Classifier for ModelArtifact {
    fn predict_row(&self, row: &[f64]) -> Label {
        self.forest.predict_row(row)
    }
}

/// Where to find the artifact and how to encode form answers.
#[derive(Debug, Clone, Default)]
pub struct ModelLoaderConfig {
    pub model_dir: Option<String>,
    pub model_file: Option<String>,
    pub use_fitted_encoding: bool,
}

impl ModelLoaderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take paths and encoding mode from the application configuration.
    pub fn from_config(config: &Config) -> Self {
        Self {
            model_dir: Some(config.output.model_dir.clone()),
            model_file: Some(config.output.model_file.clone()),
            use_fitted_encoding: config.predictor.use_fitted_encoding,
        }
    }

    pub fn with_model_dir(mut self, dir: impl Into<String>) -> Self {
        self.model_dir = Some(dir.into());
        self
    }

    pub fn with_model_file(mut self, file: impl Into<String>) -> Self {
        self.model_file = Some(file.into());
        self
    }

    pub fn with_fitted_encoding(mut self, enable: bool) -> Self {
        self.use_fitted_encoding = enable;
        self
    }

    pub fn artifact_path(&self) -> PathBuf {
        PathBuf::from(self.model_dir.as_deref().unwrap_or(DEFAULT_MODEL_DIR))
            .join(self.model_file.as_deref().unwrap_or(DEFAULT_MODEL_FILE))
    }
}
