//! Configuration loading for the CLI.
//!
//! Leading configuration flags are split off and handed to `ortho_config`.
//! Leading global command flags and everything from the first other token
//! onwards are parsed by `clap`.

use std::ffi::{OsStr, OsString};

use ortho_config::OrthoConfig as _;
use safesplice::{BackupLocation, EditorConfig};
use safesplice_config::Config;

use crate::errors::AppError;

/// CLI flags recognised by the configuration loader.
///
/// Keep in sync with the fields of [`safesplice_config::Config`].
pub(crate) const CONFIG_CLI_FLAGS: &[&str] = &[
    "--config-path",
    "--log-filter",
    "--log-format",
    "--backup-suffix",
    "--backup-dir",
];

/// Global flags owned by `clap` that may be mixed with configuration flags.
pub(crate) const COMMAND_GLOBAL_FLAGS: &[&str] = &["--output", "--retain-backup-on-success"];

pub(crate) trait ConfigLoader {
    /// Loads configuration from the configuration flags.
    ///
    /// Configuration flags must appear before the subcommand. Later
    /// occurrences are left to `clap`, which rejects them.
    fn load(&self, args: &[OsString]) -> Result<Config, AppError>;
}

pub(crate) struct OrthoConfigLoader;

impl ConfigLoader for OrthoConfigLoader {
    fn load(&self, args: &[OsString]) -> Result<Config, AppError> {
        let config = Config::load_from_iter(args.iter().cloned())
            .map_err(AppError::LoadConfiguration)?;
        config.validate().map_err(AppError::InvalidConfiguration)?;
        Ok(config)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FlagAction {
    Configuration { needs_value: bool },
    Command { needs_value: bool },
    Stop,
}

fn classify(argument: &OsStr) -> FlagAction {
    let text = argument.to_string_lossy();
    let Some((flag, inline_value)) = text
        .strip_prefix("--")
        .map(|rest| rest.split_once('=').map_or((rest, false), |(name, _)| (name, true)))
    else {
        return FlagAction::Stop;
    };
    let matches = |candidate: &&str| candidate.strip_prefix("--") == Some(flag);
    let needs_value = !inline_value;
    if CONFIG_CLI_FLAGS.iter().any(matches) {
        FlagAction::Configuration { needs_value }
    } else if COMMAND_GLOBAL_FLAGS.iter().any(matches) {
        FlagAction::Command { needs_value }
    } else {
        FlagAction::Stop
    }
}

/// Arguments split into the loader's share and the command's share.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct ConfigArgumentSplit {
    /// Program name followed by the leading configuration flags.
    pub(crate) config_arguments: Vec<OsString>,
    /// Program name followed by the command tokens.
    pub(crate) command_arguments: Vec<OsString>,
}

pub(crate) fn split_config_arguments(args: &[OsString]) -> ConfigArgumentSplit {
    let Some((program, rest)) = args.split_first() else {
        return ConfigArgumentSplit {
            config_arguments: Vec::new(),
            command_arguments: Vec::new(),
        };
    };

    let mut config_arguments = vec![program.clone()];
    let mut remaining = rest.iter();
    let mut command_arguments = vec![program.clone()];
    while let Some(argument) = remaining.next() {
        match classify(argument) {
            FlagAction::Configuration { needs_value } => {
                config_arguments.push(argument.clone());
                if needs_value {
                    config_arguments.extend(remaining.next().cloned());
                }
            }
            FlagAction::Command { needs_value } => {
                command_arguments.push(argument.clone());
                if needs_value {
                    command_arguments.extend(remaining.next().cloned());
                }
            }
            FlagAction::Stop => {
                command_arguments.push(argument.clone());
                command_arguments.extend(remaining.by_ref().cloned());
                break;
            }
        }
    }

    ConfigArgumentSplit {
        config_arguments,
        command_arguments,
    }
}

/// Applies the command line's retention switch over the loaded value.
pub(crate) const fn with_retention_override(mut config: Config, retain: Option<bool>) -> Config {
    if retain.is_some() {
        config.retain_backup_on_success = retain;
    }
    config
}

/// Translates layered configuration into editor settings.
pub(crate) fn editor_config(config: &Config) -> EditorConfig {
    let suffix = config.backup_suffix().to_owned();
    let location = match config.backup_dir() {
        Some(dir) => BackupLocation::directory(dir.as_std_path(), suffix),
        None => BackupLocation::sibling(suffix),
    };
    EditorConfig::new()
        .with_backup_location(location)
        .with_retain_backup_on_success(config.retain_backup_on_success())
}
