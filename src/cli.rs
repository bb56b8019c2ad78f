//! Command-line interface.

use crate::api::{Predictor, PredictorConfig};
use crate::config::Config;
use crate::form;
use crate::trainer::train_with_config;
use std::error::Error;

/// Print command-line usage information.
pub fn print_usage() {
    println!("Usage:");
    println!("  persona [COMMAND]\n");
    println!("Commands:");
    println!("  train              Train the classifier and save it (default)");
    println!("  predict            Open the interactive prediction form");
    println!("  help               Show this help\n");
    println!("Settings are read from config.toml when present.");
    println!("Set RUST_LOG=debug for verbose logging.\n");
    println!("Examples:");
    println!("  ./target/release/persona train");
    println!("  ./target/release/persona predict");
}

/// Subcommand named on the command line, `train` when there is none.
pub fn command_from_args(args: &[String]) -> &str {
    args.get(1).map(String::as_str).unwrap_or("train")
}

/// Main entry point for the CLI.
///
/// # Arguments
///
/// * `args` - Command-line arguments (including program name)
pub fn main_persona(args: Vec<String>) -> Result<(), Box<dyn Error>> {
    let command = command_from_args(&args);
    match command {
        "train" | "predict" => run_command(command, &Config::load_or_default()),
        _ => run_command(command, &Config::default()),
    }
}

/// Run one subcommand with the given configuration.
pub fn run_command(command: &str, config: &Config) -> Result<(), Box<dyn Error>> {
    match command {
        "train" => {
            train_with_config(config)?;
            Ok(())
        }
        "predict" => {
            let predictor = Predictor::with_config(PredictorConfig::from_config(config))?;
            form::run_stdio(&predictor)?;
            Ok(())
        }
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        _ => {
            println!("Unknown command: {}\n", command);
            print_usage();
            Err(format!("unknown command: {}", command).into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ArtifactError;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|a| a.to_string()).collect()
    }

    fn temp_config(dir: &std::path::Path) -> Config {
        let mut config = Config::default();
        config.data.csv_path = dir.join("missing.csv").to_string_lossy().into_owned();
        config.output.model_dir = dir.join("app").to_string_lossy().into_owned();
        config
    }

    #[test]
    fn test_no_subcommand_means_train() {
        assert_eq!(command_from_args(&args(&["persona"])), "train");
        assert_eq!(command_from_args(&args(&["persona", "predict"])), "predict");
    }

    #[test]
    fn test_unknown_command_fails() {
        assert!(main_persona(args(&["persona", "bogus"])).is_err());
    }

    #[test]
    fn test_help_succeeds() {
        assert!(main_persona(args(&["persona", "help"])).is_ok());
        assert!(main_persona(args(&["persona", "--help"])).is_ok());
    }

    #[test]
    fn test_train_with_missing_dataset_fails() {
        let dir = tempfile::tempdir().unwrap();
        let config = temp_config(dir.path());

        assert!(run_command("train", &config).is_err());
        assert!(!config.output.artifact_path().exists());
    }

    #[test]
    fn test_predict_without_model_fails() {
        let dir = tempfile::tempdir().unwrap();
        let config = temp_config(dir.path());

        let err = run_command("predict", &config).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ArtifactError>(),
            Some(ArtifactError::NotFound(_))
        ));
    }
}
