//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

use crate::output::OutputFormat;

/// Validated line-range editing with automatic backups.
#[derive(Parser, Debug)]
#[command(
    name = "safesplice",
    version,
    disable_help_subcommand = true,
    subcommand_required = true,
    arg_required_else_help = false
)]
pub(crate) struct Cli {
    /// Controls how results are rendered.
    #[arg(long, value_enum, default_value_t = OutputFormat::Auto)]
    pub(crate) output: OutputFormat,
    /// Keeps (`true`) or removes (`false`) the backup after a successful
    /// edit. Overrides the configured value.
    #[arg(long, value_name = "BOOL", action = ArgAction::Set)]
    pub(crate) retain_backup_on_success: Option<bool>,
    /// The operation to perform.
    #[command(subcommand)]
    pub(crate) command: CliCommand,
}

/// Operations offered by the CLI.
#[derive(Subcommand, Debug)]
pub(crate) enum CliCommand {
    /// Replaces an inclusive, one-based line range in an existing file.
    Apply(ApplyArgs),
    /// Writes a whole file, creating it and its parent directories if needed.
    Create(CreateArgs),
    /// Prints a file with line numbers.
    View {
        /// File to print.
        file: PathBuf,
    },
    /// Lists the entries of a directory.
    List {
        /// Directory to list.
        #[arg(default_value = ".")]
        dir: PathBuf,
    },
}

/// Arguments for `apply`.
#[derive(Args, Debug)]
pub(crate) struct ApplyArgs {
    /// File to edit.
    pub(crate) file: PathBuf,
    /// First line to replace (one-based).
    #[arg(long)]
    pub(crate) start: usize,
    /// Last line to replace (inclusive).
    #[arg(long)]
    pub(crate) end: usize,
    #[command(flatten)]
    pub(crate) content: ContentArgs,
}

/// Arguments for `create`.
#[derive(Args, Debug)]
pub(crate) struct CreateArgs {
    /// File to write.
    pub(crate) file: PathBuf,
    #[command(flatten)]
    pub(crate) content: ContentArgs,
}

/// Where new text comes from, and whether it is checked.
#[derive(Args, Debug)]
pub(crate) struct ContentArgs {
    /// Text to write. Read from stdin when neither this nor `--text-file` is set.
    #[arg(long, conflicts_with = "text_file", allow_hyphen_values = true)]
    pub(crate) text: Option<String>,
    /// File holding the text to write.
    #[arg(long)]
    pub(crate) text_file: Option<PathBuf>,
    /// Accepts the result without a syntax check.
    #[arg(long)]
    pub(crate) no_validate: bool,
}
