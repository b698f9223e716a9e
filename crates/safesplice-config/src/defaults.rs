use crate::logging::LogFormat;

/// Default log filter expression used by the binary.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Whether backups survive a successful edit unless configured otherwise.
pub const DEFAULT_RETAIN_BACKUP_ON_SUCCESS: bool = true;

/// Default logging format for the binary.
#[must_use]
pub const fn default_log_format() -> LogFormat {
    LogFormat::Compact
}
