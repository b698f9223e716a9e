//! Error types for the CLI runtime.

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

use safesplice::EditError;
use safesplice_config::ConfigError;

use crate::telemetry::TelemetryError;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("failed to load configuration: {0}")]
    LoadConfiguration(Arc<ortho_config::OrthoError>),
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(ConfigError),
    #[error("failed to initialise logging: {0}")]
    Telemetry(#[from] TelemetryError),
    #[error("failed to read text from {}: {source}", path.display())]
    ReadTextFile { path: PathBuf, source: io::Error },
    #[error("failed to read text from stdin: {0}")]
    ReadStdin(io::Error),
    #[error(transparent)]
    Edit(#[from] EditError),
    #[error("failed to serialise output: {0}")]
    Serialise(serde_json::Error),
    #[error("failed to write output: {0}")]
    WriteOutput(io::Error),
}

impl AppError {
    pub(crate) const fn is_fatal(&self) -> bool {
        match self {
            Self::Edit(error) => error.is_fatal(),
            _ => false,
        }
    }
}
