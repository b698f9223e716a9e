//! Tree-sitter backed validator.

use std::path::Path;

use safesplice_syntax::SyntaxChecker;

use super::Validator;
use crate::error::{ValidationError, ValidationFailure};

/// Rejects candidates that fail to parse in the language implied by the path.
///
/// Rust, Python, and TypeScript sources are parsed with Tree-sitter. Files
/// with any other extension are accepted unchecked.
#[derive(Debug, Default)]
pub struct SyntaxValidator {
    checker: SyntaxChecker,
}

impl SyntaxValidator {
    /// Creates a validator. Parsers are loaded on first use.
    #[must_use]
    pub fn new() -> Self {
        Self {
            checker: SyntaxChecker::new(),
        }
    }
}

impl Validator for SyntaxValidator {
    fn validate(&self, path: &Path, candidate: &str) -> Result<(), ValidationError> {
        let failures = self
            .checker
            .check(path, candidate)
            .map_err(|error| ValidationError::new(format!("syntax check unavailable: {error}")))?;
        if failures.is_empty() {
            return Ok(());
        }
        Err(ValidationError::from_failures(
            failures
                .into_iter()
                .map(|failure| {
                    ValidationFailure::new(failure.path, failure.message)
                        .at_location(failure.line, failure.column)
                })
                .collect(),
        ))
    }
}
