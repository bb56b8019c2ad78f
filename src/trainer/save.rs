//! Model saving for trained forests.

use crate::config::OutputConfig;
use crate::model_loader::ModelArtifact;
use std::error::Error;
use std::path::PathBuf;

/// Save the artifact to the configured location, replacing any previous one.
///
/// Returns the path written.
pub fn save_model(artifact: &ModelArtifact, output: &OutputConfig) -> Result<PathBuf, Box<dyn Error>> {
    let path = output.artifact_path();
    tracing::info!(path = %path.display(), "saving model");

    artifact.save(&path)?;

    println!("✓ Model saved: {}", path.display());
    println!("To predict: ./target/release/persona predict");

    Ok(path)
}
