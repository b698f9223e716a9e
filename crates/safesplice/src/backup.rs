//! Backup placement, creation, and restoration.

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::atomic::{write_atomic, write_atomic_with_permissions};

/// Suffix used when no other is configured.
pub const DEFAULT_BACKUP_SUFFIX: &str = ".bak";

/// Where backups are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackupLocation {
    /// Next to the target: `<target><suffix>`.
    Sibling {
        /// Appended to the full target path.
        suffix: String,
    },
    /// Inside a dedicated directory: `<dir>/<target file name><suffix>`.
    ///
    /// The directory is created on first use.
    Directory {
        /// Directory holding the backups.
        dir: PathBuf,
        /// Appended to the target's file name.
        suffix: String,
    },
}

impl BackupLocation {
    /// Backups next to their targets with the given suffix.
    #[must_use]
    pub fn sibling(suffix: impl Into<String>) -> Self {
        Self::Sibling {
            suffix: suffix.into(),
        }
    }

    /// Backups collected in `dir` with the given suffix.
    #[must_use]
    pub fn directory(dir: impl Into<PathBuf>, suffix: impl Into<String>) -> Self {
        Self::Directory {
            dir: dir.into(),
            suffix: suffix.into(),
        }
    }

    /// Derives the backup path for `target`.
    #[must_use]
    pub fn backup_path(&self, target: &Path) -> PathBuf {
        match self {
            Self::Sibling { suffix } => {
                let mut name = target.as_os_str().to_owned();
                name.push(suffix);
                PathBuf::from(name)
            }
            Self::Directory { dir, suffix } => {
                let mut name = target
                    .file_name()
                    .map_or_else(|| OsString::from("backup"), ToOwned::to_owned);
                name.push(suffix);
                dir.join(name)
            }
        }
    }
}

impl Default for BackupLocation {
    fn default() -> Self {
        Self::sibling(DEFAULT_BACKUP_SUFFIX)
    }
}

/// Pairs a target with the backup holding its pre-edit bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupRecord {
    original_path: PathBuf,
    backup_path: PathBuf,
}

impl BackupRecord {
    /// Builds a record.
    #[must_use]
    pub fn new(original_path: impl Into<PathBuf>, backup_path: impl Into<PathBuf>) -> Self {
        Self {
            original_path: original_path.into(),
            backup_path: backup_path.into(),
        }
    }

    /// The edited file.
    #[must_use]
    pub fn original_path(&self) -> &Path {
        &self.original_path
    }

    /// The backup copy.
    #[must_use]
    pub fn backup_path(&self) -> &Path {
        &self.backup_path
    }
}

/// Writes `bytes` to the record's backup path, replacing any older backup.
///
/// The backup takes the target's permissions.
pub(crate) fn write_backup(record: &BackupRecord, bytes: &[u8]) -> io::Result<()> {
    if record.backup_path == record.original_path {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "backup path is the same as the target path",
        ));
    }
    let permissions = permissions_of(&record.original_path);
    write_atomic_with_permissions(&record.backup_path, bytes, permissions)
}

fn permissions_of(path: &Path) -> Option<fs::Permissions> {
    fs::metadata(path).ok().map(|metadata| metadata.permissions())
}

/// Makes the target byte-identical to its backup.
///
/// The target is only rewritten when its current bytes differ.
pub(crate) fn restore(record: &BackupRecord) -> io::Result<()> {
    let saved = fs::read(&record.backup_path)?;
    match fs::read(&record.original_path) {
        Ok(current) if current == saved => Ok(()),
        Ok(_) => write_atomic(&record.original_path, &saved),
        Err(err) if err.kind() == io::ErrorKind::NotFound => write_atomic_with_permissions(
            &record.original_path,
            &saved,
            permissions_of(&record.backup_path),
        ),
        Err(err) => Err(err),
    }
}

/// Deletes the backup file.
pub(crate) fn discard(record: &BackupRecord) -> io::Result<()> {
    fs::remove_file(&record.backup_path)
}
