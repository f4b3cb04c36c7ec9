use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

/// error handling for the launcher
#[derive(Debug, Error)]
pub enum DenovoError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("working directory {0:?} already exists, use --force to overwrite it")]
    WorkingDirectoryExists(PathBuf),
    #[error("no configuration file found in project {0:?}")]
    MissingProjectConfig(PathBuf),
    #[error("could not parse configuration {path:?}: {source}")]
    Config {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("workflow exited with {0}")]
    LaunchFailed(ExitStatus),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
