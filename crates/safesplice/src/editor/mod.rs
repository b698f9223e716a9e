//! The backup, splice, validate, and commit-or-restore pipeline.
//!
//! [`SafeFileEditor::apply`] runs one edit:
//!
//! 1. Read the target as UTF-8 and split it into lines.
//! 2. Check the line range and build the candidate content in memory.
//! 3. Copy the original bytes to the backup path.
//! 4. Ask the validator about the candidate.
//! 5. On acceptance, atomically replace the target. On rejection, make sure
//!    the target matches the backup byte for byte.
//!
//! Range and read failures happen before the backup exists, so nothing is
//! written for them. A failed restore is reported as
//! [`EditError::Restore`], the only fatal error kind.


use std::fs;
use std::path::Path;

use tracing::{debug, error, info, warn};

use crate::atomic::write_atomic;
use crate::backup::{self, BackupLocation, BackupRecord};
use crate::edit::EditRequest;
use crate::error::{EditError, ValidationError};
use crate::splice::splice;
use crate::validation::Validator;

const EDITOR_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::editor");

/// Behaviour switches for [`SafeFileEditor`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorConfig {
    backup_location: BackupLocation,
    retain_backup_on_success: bool,
}

impl EditorConfig {
    /// Sibling `.bak` backups that are kept after success.
    #[must_use]
    pub fn new() -> Self {
        Self {
            backup_location: BackupLocation::default(),
            retain_backup_on_success: true,
        }
    }

    /// Sets where backups go.
    #[must_use]
    pub fn with_backup_location(mut self, location: BackupLocation) -> Self {
        self.backup_location = location;
        self
    }

    /// Sets whether the backup survives a successful edit.
    #[must_use]
    pub const fn with_retain_backup_on_success(mut self, retain: bool) -> Self {
        self.retain_backup_on_success = retain;
        self
    }

    /// Where backups go.
    #[must_use]
    pub const fn backup_location(&self) -> &BackupLocation {
        &self.backup_location
    }

    /// Whether the backup survives a successful edit.
    #[must_use]
    pub const fn retain_backup_on_success(&self) -> bool {
        self.retain_backup_on_success
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// How an edit ended when no operational error occurred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditResult {
    /// The candidate was accepted and written.
    Applied {
        /// Backup still on disk, if any. `None` when the backup was discarded
        /// or when a new file was created.
        backup: Option<BackupRecord>,
    },
    /// The validator rejected the candidate; the target holds its original
    /// bytes.
    Rejected {
        /// Why the candidate was rejected.
        diagnostic: ValidationError,
        /// Backup of the original content, if one was taken.
        backup: Option<BackupRecord>,
    },
}

impl EditResult {
    /// Returns true for [`EditResult::Applied`].
    #[must_use]
    pub const fn is_applied(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }

    /// The backup left on disk, if any.
    #[must_use]
    pub const fn backup(&self) -> Option<&BackupRecord> {
        match self {
            Self::Applied { backup } | Self::Rejected { backup, .. } => backup.as_ref(),
        }
    }

    /// The rejection diagnostic, if the edit was rejected.
    #[must_use]
    pub const fn diagnostic(&self) -> Option<&ValidationError> {
        match self {
            Self::Applied { .. } => None,
            Self::Rejected { diagnostic, .. } => Some(diagnostic),
        }
    }
}

/// Applies validated, backed-up edits to files.
#[derive(Debug, Clone, Default)]
pub struct SafeFileEditor {
    config: EditorConfig,
}

impl SafeFileEditor {
    /// Creates an editor with the given configuration.
    #[must_use]
    pub const fn new(config: EditorConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Replaces a line range in an existing file if `validator` accepts the
    /// result.
    ///
    /// # Errors
    ///
    /// - [`EditError::NotFound`] or [`EditError::Read`] when the target cannot
    ///   be read as UTF-8 text.
    /// - [`EditError::Range`] when the range does not fit the file.
    /// - [`EditError::Backup`] when the backup cannot be written; the target
    ///   is untouched.
    /// - [`EditError::Write`] when the accepted content cannot be written.
    /// - [`EditError::Restore`] when the target cannot be made to match its
    ///   backup after a rejection. The target's state is then unknown.
    pub fn apply(
        &self,
        request: &EditRequest,
        validator: &dyn Validator,
    ) -> Result<EditResult, EditError> {
        let path = request.target_path();
        let range = request.range();
        debug!(
            target: EDITOR_TARGET,
            event = "edit_requested",
            file = %path.display(),
            start_line = range.start(),
            end_line = range.end(),
            "edit requested"
        );

        let original = read_text(path)?;
        let candidate =
            splice(&original, range, request.replacement()).map_err(|out| EditError::Range {
                path: path.to_path_buf(),
                start_line: range.start(),
                end_line: range.end(),
                line_count: out.line_count,
            })?;

        let record = self.back_up(path, original.as_bytes())?;

        if let Err(diagnostic) = validator.validate(path, &candidate) {
            restore_after_rejection(&record)?;
            warn!(
                target: EDITOR_TARGET,
                event = "edit_rejected",
                file = %path.display(),
                backup = %record.backup_path().display(),
                diagnostic = %diagnostic,
                "edit rejected, original content kept"
            );
            return Ok(EditResult::Rejected {
                diagnostic,
                backup: Some(record),
            });
        }

        write_atomic(path, candidate.as_bytes()).map_err(|source| EditError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        let backup = self.settle_backup(record);
        info!(
            target: EDITOR_TARGET,
            event = "edit_applied",
            file = %path.display(),
            start_line = range.start(),
            end_line = range.end(),
            "edit applied"
        );
        Ok(EditResult::Applied { backup })
    }

    /// Writes `content` to `path` if `validator` accepts it, creating the file
    /// and its parent directories as needed.
    ///
    /// Validation happens before anything touches the disk. An existing file
    /// is backed up before it is overwritten.
    ///
    /// # Errors
    ///
    /// - [`EditError::Read`] when an existing target cannot be read.
    /// - [`EditError::Backup`] when an existing target cannot be backed up.
    /// - [`EditError::Write`] when the content cannot be written.
    pub fn create(
        &self,
        path: &Path,
        content: &str,
        validator: &dyn Validator,
    ) -> Result<EditResult, EditError> {
        if let Err(diagnostic) = validator.validate(path, content) {
            warn!(
                target: EDITOR_TARGET,
                event = "create_rejected",
                file = %path.display(),
                diagnostic = %diagnostic,
                "file content rejected, nothing written"
            );
            return Ok(EditResult::Rejected {
                diagnostic,
                backup: None,
            });
        }

        let record = match fs::read(path) {
            Ok(existing) => Some(self.back_up(path, &existing)?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => None,
            Err(source) => {
                return Err(EditError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        write_atomic(path, content.as_bytes()).map_err(|source| EditError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        let backup = record.and_then(|saved| self.settle_backup(saved));
        info!(
            target: EDITOR_TARGET,
            event = "file_written",
            file = %path.display(),
            replaced = backup.is_some(),
            "file written"
        );
        Ok(EditResult::Applied { backup })
    }

    fn back_up(&self, path: &Path, bytes: &[u8]) -> Result<BackupRecord, EditError> {
        let record = BackupRecord::new(
            path,
            self.config.backup_location.backup_path(path),
        );
        backup::write_backup(&record, bytes).map_err(|source| EditError::Backup {
            path: path.to_path_buf(),
            backup_path: record.backup_path().to_path_buf(),
            source,
        })?;
        debug!(
            target: EDITOR_TARGET,
            event = "backup_written",
            file = %path.display(),
            backup = %record.backup_path().display(),
            "backup written"
        );
        Ok(record)
    }

    /// Applies the retention policy after a successful write.
    fn settle_backup(&self, record: BackupRecord) -> Option<BackupRecord> {
        if self.config.retain_backup_on_success {
            return Some(record);
        }
        match backup::discard(&record) {
            Ok(()) => None,
            Err(err) => {
                warn!(
                    target: EDITOR_TARGET,
                    event = "backup_discard_failed",
                    backup = %record.backup_path().display(),
                    error = %err,
                    "could not remove backup after successful edit"
                );
                Some(record)
            }
        }
    }
}

fn read_text(path: &Path) -> Result<String, EditError> {
    let bytes = fs::read(path).map_err(|source| EditError::from_read(path, source))?;
    String::from_utf8(bytes).map_err(|err| EditError::Read {
        path: path.to_path_buf(),
        source: std::io::Error::new(std::io::ErrorKind::InvalidData, err),
    })
}

fn restore_after_rejection(record: &BackupRecord) -> Result<(), EditError> {
    backup::restore(record).map_err(|source| {
        error!(
            target: EDITOR_TARGET,
            event = "restore_failed",
            file = %record.original_path().display(),
            backup = %record.backup_path().display(),
            error = %source,
            "restore from backup failed, target may be corrupted"
        );
        EditError::Restore {
            path: record.original_path().to_path_buf(),
            backup_path: record.backup_path().to_path_buf(),
            source,
        }
    })
}
