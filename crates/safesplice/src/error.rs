//! Error types for the safe editor.
//!
//! Operational failures surface as [`EditError`]. A validator rejecting the
//! candidate content is not an error: it is reported through
//! [`crate::EditResult::Rejected`] carrying a [`ValidationError`].

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Describes one problem a validator found in candidate content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationFailure {
    path: PathBuf,
    line: Option<u32>,
    column: Option<u32>,
    message: String,
}

impl ValidationFailure {
    /// Builds a failure without a location.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            line: None,
            column: None,
            message: message.into(),
        }
    }

    /// Attaches a one-based location.
    #[must_use]
    pub const fn at_location(mut self, line: u32, column: u32) -> Self {
        self.line = Some(line);
        self.column = Some(column);
        self
    }

    /// Path of the checked file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// One-based line, when known.
    #[must_use]
    pub const fn line(&self) -> Option<u32> {
        self.line
    }

    /// One-based column, when known.
    #[must_use]
    pub const fn column(&self) -> Option<u32> {
        self.column
    }

    /// Description of the problem.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())?;
        if let Some(line) = self.line {
            write!(f, ":{line}")?;
            if let Some(column) = self.column {
                write!(f, ":{column}")?;
            }
        }
        write!(f, ": {}", self.message)
    }
}

/// Diagnostic returned by a validator that rejected candidate content.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    message: String,
    failures: Vec<ValidationFailure>,
}

impl ValidationError {
    /// Builds a diagnostic with a summary message and no located failures.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            failures: Vec::new(),
        }
    }

    /// Builds a diagnostic whose summary is derived from `failures`.
    #[must_use]
    pub fn from_failures(failures: Vec<ValidationFailure>) -> Self {
        let message = match failures.as_slice() {
            [] => String::from("content rejected"),
            [only] => only.to_string(),
            [first, rest @ ..] => format!("{first} (and {} more)", rest.len()),
        };
        Self { message, failures }
    }

    /// Attaches located failures to this diagnostic.
    #[must_use]
    pub fn with_failures(mut self, failures: Vec<ValidationFailure>) -> Self {
        self.failures = failures;
        self
    }

    /// Summary message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Individual failures, possibly empty.
    #[must_use]
    pub fn failures(&self) -> &[ValidationFailure] {
        &self.failures
    }
}

/// Operational failures raised by [`crate::SafeFileEditor`].
#[derive(Debug, Error)]
pub enum EditError {
    /// The target file does not exist.
    #[error("file not found: {}", path.display())]
    NotFound {
        /// Requested path.
        path: PathBuf,
    },

    /// The target exists but could not be read as UTF-8 text.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        /// Requested path.
        path: PathBuf,
        /// Underlying cause.
        #[source]
        source: io::Error,
    },

    /// The line range does not fit the file.
    #[error(
        "line range {start_line}-{end_line} is invalid for {} ({line_count} lines)",
        path.display()
    )]
    Range {
        /// Requested path.
        path: PathBuf,
        /// Requested first line.
        start_line: usize,
        /// Requested last line.
        end_line: usize,
        /// Number of lines in the file.
        line_count: usize,
    },

    /// The backup could not be written; the target was not touched.
    #[error(
        "failed to back up {} to {}: {source}",
        path.display(),
        backup_path.display()
    )]
    Backup {
        /// Target path.
        path: PathBuf,
        /// Backup path that could not be written.
        backup_path: PathBuf,
        /// Underlying cause.
        #[source]
        source: io::Error,
    },

    /// Writing the accepted content to the target failed.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        /// Target path.
        path: PathBuf,
        /// Underlying cause.
        #[source]
        source: io::Error,
    },

    /// Restoring the target from its backup failed after a rejection.
    ///
    /// The target may no longer match its pre-edit content. The backup path
    /// is the only remaining copy of the original.
    #[error(
        "failed to restore {} from backup {}: {source}",
        path.display(),
        backup_path.display()
    )]
    Restore {
        /// Target path.
        path: PathBuf,
        /// Backup that should have been restored.
        backup_path: PathBuf,
        /// Underlying cause.
        #[source]
        source: io::Error,
    },

    /// A directory listing failed.
    #[error("failed to list {}: {source}", path.display())]
    List {
        /// Requested directory.
        path: PathBuf,
        /// Underlying cause.
        #[source]
        source: io::Error,
    },
}

impl EditError {
    /// Maps a read failure, separating a missing file from other I/O errors.
    pub(crate) fn from_read(path: &Path, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            Self::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            Self::Read {
                path: path.to_path_buf(),
                source,
            }
        }
    }

    /// Returns true when the target may have been left in an unknown state.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::Restore { .. })
    }

    /// Path the failed operation was acting on.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::NotFound { path }
            | Self::Read { path, .. }
            | Self::Range { path, .. }
            | Self::Backup { path, .. }
            | Self::Write { path, .. }
            | Self::Restore { path, .. }
            | Self::List { path, .. } => path,
        }
    }
}
