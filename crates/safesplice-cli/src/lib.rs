//! Command-line runtime for the `safesplice` editor.
//!
//! The runtime owns argument parsing, configuration bootstrapping, logging
//! setup, and rendering. It runs from the binary entrypoint and from tests,
//! where configuration loading and IO streams can be substituted.

use std::ffi::OsString;
use std::fs;
use std::io::{self, IsTerminal, Read, Write};
use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use clap::error::ErrorKind;

use safesplice::{
    AcceptAll, EditRequest, EditResult, SafeFileEditor, SyntaxValidator, Validator,
};

mod cli;
mod config;
mod errors;
mod output;
mod telemetry;

use cli::{ApplyArgs, Cli, CliCommand, ContentArgs, CreateArgs};
use config::{
    ConfigLoader, OrthoConfigLoader, editor_config, split_config_arguments,
    with_retention_override,
};
use errors::AppError;
pub use output::{OutputFormat, ResolvedOutputFormat};
use output::{render_edit, render_entries, render_listing};

/// Exit status when a validator rejected the edit or a recoverable error
/// occurred.
pub const EXIT_FAILURE: u8 = 1;
/// Exit status for malformed command lines.
pub const EXIT_USAGE: u8 = 2;
/// Exit status when a rejected edit could not be rolled back.
pub const EXIT_FATAL: u8 = 3;

/// Bundles the IO streams provided to the CLI runtime.
pub(crate) struct IoStreams<'a, R: Read, W: Write, E: Write> {
    pub(crate) stdin: &'a mut R,
    pub(crate) stdout: &'a mut W,
    pub(crate) stderr: &'a mut E,
    stdout_is_terminal: bool,
}

impl<'a, R: Read, W: Write, E: Write> IoStreams<'a, R, W, E> {
    pub(crate) fn new(stdin: &'a mut R, stdout: &'a mut W, stderr: &'a mut E) -> Self {
        Self {
            stdin,
            stdout,
            stderr,
            stdout_is_terminal: io::stdout().is_terminal(),
        }
    }

    #[cfg(test)]
    pub(crate) const fn with_terminal_status(
        stdin: &'a mut R,
        stdout: &'a mut W,
        stderr: &'a mut E,
        stdout_is_terminal: bool,
    ) -> Self {
        Self {
            stdin,
            stdout,
            stderr,
            stdout_is_terminal,
        }
    }
}

/// Result of a command that ran to completion.
enum CommandStatus {
    Success,
    Rejected,
}

struct CliRunner<'a, 'io, R: Read, W: Write, E: Write, L: ConfigLoader> {
    io: &'a mut IoStreams<'io, R, W, E>,
    loader: &'a L,
}

impl<'a, 'io, R, W, E, L> CliRunner<'a, 'io, R, W, E, L>
where
    R: Read,
    W: Write,
    E: Write,
    L: ConfigLoader,
{
    const fn new(io: &'a mut IoStreams<'io, R, W, E>, loader: &'a L) -> Self {
        Self { io, loader }
    }

    fn run<I>(&mut self, args: I) -> ExitCode
    where
        I: IntoIterator<Item = OsString>,
    {
        let args: Vec<OsString> = args.into_iter().collect();
        let split = split_config_arguments(&args);

        let cli = match Cli::try_parse_from(&split.command_arguments) {
            Ok(cli) => cli,
            Err(error) => return self.report_usage(&error),
        };

        let retain_override = cli.retain_backup_on_success;
        let result = self
            .loader
            .load(&split.config_arguments)
            .and_then(|loaded| {
                let config = with_retention_override(loaded, retain_override);
                telemetry::initialise(&config)?;
                self.execute(cli, &SafeFileEditor::new(editor_config(&config)))
            });

        match result {
            Ok(CommandStatus::Success) => ExitCode::SUCCESS,
            Ok(CommandStatus::Rejected) => ExitCode::from(EXIT_FAILURE),
            Err(error) if error.is_fatal() => {
                self.report_error(&format!("FATAL: {error}"));
                ExitCode::from(EXIT_FATAL)
            }
            Err(error) => {
                self.report_error(&error.to_string());
                ExitCode::from(EXIT_FAILURE)
            }
        }
    }

    fn execute(&mut self, cli: Cli, editor: &SafeFileEditor) -> Result<CommandStatus, AppError> {
        let format = cli.output.resolve(self.io.stdout_is_terminal);
        match cli.command {
            CliCommand::Apply(ApplyArgs {
                file,
                start,
                end,
                content,
            }) => {
                let text = self.read_content(&content)?;
                let request = EditRequest::replace_lines(&file, start, end, text);
                let result = editor.apply(&request, validator_for(&content).as_ref())?;
                render_edit(self.io.stdout, format, &file, &result)?;
                Ok(status_of(&result))
            }
            CliCommand::Create(CreateArgs { file, content }) => {
                let text = self.read_content(&content)?;
                let result = editor.create(&file, &text, validator_for(&content).as_ref())?;
                render_edit(self.io.stdout, format, &file, &result)?;
                Ok(status_of(&result))
            }
            CliCommand::View { file } => {
                let listing = safesplice::view(&file)?;
                render_listing(self.io.stdout, format, &listing)?;
                Ok(CommandStatus::Success)
            }
            CliCommand::List { dir } => {
                let entries = safesplice::list(&dir)?;
                render_entries(self.io.stdout, format, &dir, &entries)?;
                Ok(CommandStatus::Success)
            }
        }
    }

    fn read_content(&mut self, content: &ContentArgs) -> Result<String, AppError> {
        if let Some(text) = &content.text {
            return Ok(text.clone());
        }
        if let Some(path) = &content.text_file {
            return read_text_file(path);
        }
        let mut text = String::new();
        self.io
            .stdin
            .read_to_string(&mut text)
            .map_err(AppError::ReadStdin)?;
        Ok(text)
    }

    fn report_usage(&mut self, error: &clap::Error) -> ExitCode {
        let rendered = error.render().to_string();
        match error.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                if self.io.stdout.write_all(rendered.as_bytes()).is_err() {
                    return ExitCode::from(EXIT_FAILURE);
                }
                ExitCode::SUCCESS
            }
            _ => {
                self.report_error(rendered.trim_end());
                ExitCode::from(EXIT_USAGE)
            }
        }
    }

    fn report_error(&mut self, message: &str) {
        if let Err(error) = writeln!(self.io.stderr, "{message}") {
            tracing::warn!(error = %error, "failed to write error report");
        }
    }
}

fn read_text_file(path: &Path) -> Result<String, AppError> {
    fs::read_to_string(path).map_err(|source| AppError::ReadTextFile {
        path: path.to_path_buf(),
        source,
    })
}

fn validator_for(content: &ContentArgs) -> Box<dyn Validator> {
    if content.no_validate {
        Box::new(AcceptAll)
    } else {
        Box::new(SyntaxValidator::new())
    }
}

const fn status_of(result: &EditResult) -> CommandStatus {
    match result {
        EditResult::Applied { .. } => CommandStatus::Success,
        EditResult::Rejected { .. } => CommandStatus::Rejected,
    }
}

/// Runs the CLI using the provided arguments and IO handles.
///
/// Exit statuses: `0` on success, [`EXIT_FAILURE`] when an edit was rejected
/// or failed, [`EXIT_USAGE`] for malformed arguments, and [`EXIT_FATAL`] when
/// a rejected edit could not be rolled back.
#[must_use]
pub fn run<I, R, W, E>(args: I, stdin: &mut R, stdout: &mut W, stderr: &mut E) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    R: Read,
    W: Write,
    E: Write,
{
    let mut io = IoStreams::new(stdin, stdout, stderr);
    run_with_loader(args, &mut io, &OrthoConfigLoader)
}

fn run_with_loader<I, R, W, E, L>(
    args: I,
    io: &mut IoStreams<'_, R, W, E>,
    loader: &L,
) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    R: Read,
    W: Write,
    E: Write,
    L: ConfigLoader,
{
    CliRunner::new(io, loader).run(args)
}
