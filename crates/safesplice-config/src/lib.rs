//! Shared configuration for the `safesplice` editor and its CLI.
//!
//! [`Config`] is assembled by `ortho_config` from, in increasing order of
//! precedence: built-in defaults, a TOML file (`--config-path` or the
//! discovered `.safesplice.toml`), `SAFESPLICE_*` environment variables, and
//! command-line flags. `retain_backup_on_success` has no generated flag, so an
//! absent switch never masks the file or environment value. Every field is
//! optional in the merged layers; the accessor methods fall back to the
//! `DEFAULT_*` constants.

mod defaults;
mod logging;

use camino::{Utf8Path, Utf8PathBuf};
use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use defaults::{DEFAULT_LOG_FILTER, DEFAULT_RETAIN_BACKUP_ON_SUCCESS, default_log_format};
pub use logging::LogFormat;
pub use safesplice::DEFAULT_BACKUP_SUFFIX;

/// Layered configuration for the safe editor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize, OrthoConfig)]
#[ortho_config(prefix = "SAFESPLICE")]
pub struct Config {
    /// `tracing` filter directive, for example `info` or `safesplice=debug`.
    pub log_filter: Option<String>,
    /// Output format for log events written to stderr.
    pub log_format: Option<LogFormat>,
    /// Suffix appended to the target path to derive the backup path.
    pub backup_suffix: Option<String>,
    /// Directory that receives backups instead of the target's own directory.
    pub backup_dir: Option<Utf8PathBuf>,
    /// Keeps the backup on disk after a successful edit.
    ///
    /// Set from the file and environment layers. The binary parses its own
    /// `--retain-backup-on-success <BOOL>` flag and overrides this field when
    /// the flag is given.
    #[ortho_config(skip_cli)]
    pub retain_backup_on_success: Option<bool>,
}

impl Config {
    /// Effective log filter.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        self.log_filter.as_deref().unwrap_or(DEFAULT_LOG_FILTER)
    }

    /// Effective log format.
    #[must_use]
    pub fn log_format(&self) -> LogFormat {
        self.log_format.unwrap_or_else(default_log_format)
    }

    /// Effective backup suffix.
    #[must_use]
    pub fn backup_suffix(&self) -> &str {
        self.backup_suffix
            .as_deref()
            .unwrap_or(DEFAULT_BACKUP_SUFFIX)
    }

    /// Directory holding backups, when one is configured.
    #[must_use]
    pub fn backup_dir(&self) -> Option<&Utf8Path> {
        self.backup_dir.as_deref()
    }

    /// Whether backups are kept after a successful edit.
    #[must_use]
    pub fn retain_backup_on_success(&self) -> bool {
        self.retain_backup_on_success
            .unwrap_or(DEFAULT_RETAIN_BACKUP_ON_SUCCESS)
    }

    /// Rejects combinations that would make a backup overwrite its target.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyBackupSuffix`] when backups are written
    /// next to their targets with an empty suffix, and
    /// [`ConfigError::SuffixWithSeparator`] when the suffix contains a path
    /// separator.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let suffix = self.backup_suffix();
        if suffix.contains(['/', '\\']) {
            return Err(ConfigError::SuffixWithSeparator {
                suffix: suffix.to_owned(),
            });
        }
        if suffix.is_empty() && self.backup_dir().is_none() {
            return Err(ConfigError::EmptyBackupSuffix);
        }
        Ok(())
    }
}

/// Errors raised by [`Config::validate`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Backups would be written over their own targets.
    #[error("backup suffix must not be empty unless a backup directory is configured")]
    EmptyBackupSuffix,
    /// The suffix would escape the backup's parent directory.
    #[error("backup suffix '{suffix}' must not contain a path separator")]
    SuffixWithSeparator {
        /// The rejected suffix.
        suffix: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_fields_are_unset() {
        let config = Config::default();
        assert_eq!(config.log_filter(), "info");
        assert_eq!(config.log_format(), LogFormat::Compact);
        assert_eq!(config.backup_suffix(), ".bak");
        assert!(config.backup_dir().is_none());
        assert!(config.retain_backup_on_success());
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn explicit_values_override_defaults() {
        let config = Config {
            log_filter: Some(String::from("debug")),
            log_format: Some(LogFormat::Json),
            backup_suffix: Some(String::from(".orig")),
            backup_dir: Some(Utf8PathBuf::from("/var/backups")),
            retain_backup_on_success: Some(false),
        };
        assert_eq!(config.log_filter(), "debug");
        assert_eq!(config.log_format(), LogFormat::Json);
        assert_eq!(config.backup_suffix(), ".orig");
        assert_eq!(config.backup_dir(), Some(Utf8Path::new("/var/backups")));
        assert!(!config.retain_backup_on_success());
    }

    #[test]
    fn empty_suffix_beside_target_is_rejected() {
        let config = Config {
            backup_suffix: Some(String::new()),
            ..Config::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::EmptyBackupSuffix));
    }

    #[test]
    fn empty_suffix_is_allowed_with_backup_dir() {
        let config = Config {
            backup_suffix: Some(String::new()),
            backup_dir: Some(Utf8PathBuf::from("backups")),
            ..Config::default()
        };
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn suffix_with_separator_is_rejected() {
        let config = Config {
            backup_suffix: Some(String::from("/../x")),
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::SuffixWithSeparator { .. })
        ));
    }
}
