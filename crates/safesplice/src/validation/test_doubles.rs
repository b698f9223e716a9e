//! Validators with scripted outcomes for unit and behavioural tests.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::Validator;
use crate::error::ValidationError;

/// Accepts or rejects according to its construction and records each call.
#[derive(Debug, Default)]
pub(crate) struct ConfigurableValidator {
    rejection: Option<String>,
    seen: Mutex<Vec<(PathBuf, String)>>,
}

impl ConfigurableValidator {
    pub(crate) fn passing() -> Self {
        Self::default()
    }

    pub(crate) fn failing(message: impl Into<String>) -> Self {
        Self {
            rejection: Some(message.into()),
            seen: Mutex::default(),
        }
    }

    /// Candidates passed to `validate`, in call order.
    pub(crate) fn seen(&self) -> Vec<(PathBuf, String)> {
        self.seen.lock().map(|seen| seen.clone()).unwrap_or_default()
    }
}

impl Validator for ConfigurableValidator {
    fn validate(&self, path: &Path, candidate: &str) -> Result<(), ValidationError> {
        if let Ok(mut seen) = self.seen.lock() {
            seen.push((path.to_path_buf(), candidate.to_owned()));
        }
        self.rejection
            .as_ref()
            .map_or(Ok(()), |message| Err(ValidationError::new(message.clone())))
    }
}

/// Deletes a file during validation, then rejects.
///
/// Pointed at the backup, this makes the editor's restore step fail.
#[derive(Debug)]
pub(crate) struct SabotagingValidator {
    victim: PathBuf,
}

impl SabotagingValidator {
    pub(crate) fn deleting(victim: impl Into<PathBuf>) -> Self {
        Self {
            victim: victim.into(),
        }
    }
}

impl Validator for SabotagingValidator {
    fn validate(&self, _path: &Path, _candidate: &str) -> Result<(), ValidationError> {
        std::fs::remove_file(&self.victim)
            .map_err(|error| ValidationError::new(format!("sabotage failed: {error}")))?;
        Err(ValidationError::new("rejected after removing the backup"))
    }
}
