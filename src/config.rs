//! Configuration structures for training and prediction.
//!
//! Configuration is read from an optional `config.toml`. Every section and
//! field has a default, so a missing file or a partial file is valid.

use crate::forest::ForestParams;
use serde::Deserialize;
use std::error::Error;
use std::path::PathBuf;

/// Default configuration file, relative to the working directory.
pub const CONFIG_FILE: &str = "config.toml";

/// Main configuration structure loaded from `config.toml`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Dataset location and split
    pub data: DataConfig,
    /// Random forest hyperparameters
    pub model: ModelConfig,
    /// Artifact location
    pub output: OutputConfig,
    /// Predictor behavior
    pub predictor: PredictorSection,
}

/// Data loading configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Path to the CSV dataset file
    pub csv_path: String,
    /// Held-out fraction (0.2 = 20% test)
    pub test_split: f64,
    /// Seed for the split and for the forest
    pub seed: u64,
}

impl Default for DataConfig {
    fn default() -> Self {
        DataConfig {
            csv_path: "data/personality_data.csv".to_string(),
            test_split: 0.2,
            seed: 42,
        }
    }
}

/// Random forest configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub n_trees: usize,
    /// Unlimited when absent
    pub max_depth: Option<usize>,
    pub min_samples_split: usize,
    pub min_samples_leaf: usize,
}

impl Default for ModelConfig {
    fn default() -> Self {
        let params = ForestParams::default();
        ModelConfig {
            n_trees: params.n_trees,
            max_depth: params.max_depth,
            min_samples_split: params.min_samples_split,
            min_samples_leaf: params.min_samples_leaf,
        }
    }
}

/// Output paths configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory the artifact is written to
    pub model_dir: String,
    /// Artifact filename
    pub model_file: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            model_dir: "app".to_string(),
            model_file: "model.json".to_string(),
        }
    }
}

impl OutputConfig {
    pub fn artifact_path(&self) -> PathBuf {
        PathBuf::from(&self.model_dir).join(&self.model_file)
    }
}

/// Predictor configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PredictorSection {
    /// Encode Yes/No with the encoders fitted at training time instead of
    /// the fixed Yes = 1 / No = 0 convention.
    pub use_fitted_encoding: bool,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &str) -> Result<Self, Box<dyn Error>> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load `config.toml`, falling back to defaults when it is absent or invalid.
    pub fn load_or_default() -> Self {
        if !std::path::Path::new(CONFIG_FILE).exists() {
            return Config::default();
        }
        Config::load(CONFIG_FILE).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "could not load {}, using defaults", CONFIG_FILE);
            Config::default()
        })
    }

    /// Forest hyperparameters, seeded from the data section.
    pub fn forest_params(&self) -> ForestParams {
        ForestParams {
            n_trees: self.model.n_trees,
            max_depth: self.model.max_depth,
            min_samples_split: self.model.min_samples_split,
            min_samples_leaf: self.model.min_samples_leaf,
            seed: self.data.seed,
            ..ForestParams::default()
        }
    }
}
