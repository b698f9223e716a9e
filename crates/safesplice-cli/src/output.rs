//! Rendering of command results for humans and machines.

use std::io::Write;
use std::path::Path;

use clap::ValueEnum;
use serde::Serialize;

use safesplice::{DirectoryEntry, EditResult, EntryKind, NumberedListing, ValidationFailure};

use crate::errors::AppError;

/// Output format selection.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    /// Selects `human` for terminal output and `json` for redirected output.
    #[default]
    Auto,
    /// Always render human-readable output.
    Human,
    /// Always emit a JSON document.
    Json,
}

/// Output format after resolving `auto`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ResolvedOutputFormat {
    /// One-line summaries.
    Human,
    /// One JSON object per invocation.
    Json,
}

impl OutputFormat {
    /// Resolves the output format based on whether stdout is a terminal.
    #[must_use]
    pub const fn resolve(self, stdout_is_terminal: bool) -> ResolvedOutputFormat {
        match self {
            Self::Auto if stdout_is_terminal => ResolvedOutputFormat::Human,
            Self::Auto | Self::Json => ResolvedOutputFormat::Json,
            Self::Human => ResolvedOutputFormat::Human,
        }
    }
}

#[derive(Debug, Serialize)]
struct EditReport<'a> {
    status: &'static str,
    path: String,
    backup_path: Option<String>,
    diagnostic: Option<&'a str>,
    failures: Vec<FailureReport<'a>>,
}

#[derive(Debug, Serialize)]
struct FailureReport<'a> {
    path: String,
    line: Option<u32>,
    column: Option<u32>,
    message: &'a str,
}

impl<'a> From<&'a ValidationFailure> for FailureReport<'a> {
    fn from(failure: &'a ValidationFailure) -> Self {
        Self {
            path: failure.path().display().to_string(),
            line: failure.line(),
            column: failure.column(),
            message: failure.message(),
        }
    }
}

impl<'a> EditReport<'a> {
    fn new(path: &Path, result: &'a EditResult) -> Self {
        let (status, diagnostic, failures) = match result {
            EditResult::Applied { .. } => ("applied", None, Vec::new()),
            EditResult::Rejected { diagnostic, .. } => (
                "rejected",
                Some(diagnostic.message()),
                diagnostic.failures().iter().map(FailureReport::from).collect(),
            ),
        };
        Self {
            status,
            path: path.display().to_string(),
            backup_path: result
                .backup()
                .map(|backup| backup.backup_path().display().to_string()),
            diagnostic,
            failures,
        }
    }
}

/// Writes the outcome of an `apply` or `create` command.
pub(crate) fn render_edit<W: Write>(
    out: &mut W,
    format: ResolvedOutputFormat,
    path: &Path,
    result: &EditResult,
) -> Result<(), AppError> {
    let report = EditReport::new(path, result);
    match format {
        ResolvedOutputFormat::Json => write_json(out, &report),
        ResolvedOutputFormat::Human => {
            let mut text = format!("{} {}", report.status, report.path);
            if let Some(diagnostic) = report.diagnostic {
                text.push_str(": ");
                text.push_str(diagnostic);
            }
            text.push('\n');
            if let Some(backup) = &report.backup_path {
                text.push_str("backup: ");
                text.push_str(backup);
                text.push('\n');
            }
            if let EditResult::Rejected { diagnostic, .. } = result {
                for failure in diagnostic.failures().iter().skip(1) {
                    text.push_str("  ");
                    text.push_str(&failure.to_string());
                    text.push('\n');
                }
            }
            write_text(out, &text)
        }
    }
}

#[derive(Debug, Serialize)]
struct ListingReport<'a> {
    path: String,
    line_count: usize,
    listing: &'a str,
}

/// Writes a numbered listing.
pub(crate) fn render_listing<W: Write>(
    out: &mut W,
    format: ResolvedOutputFormat,
    listing: &NumberedListing,
) -> Result<(), AppError> {
    match format {
        ResolvedOutputFormat::Json => write_json(
            out,
            &ListingReport {
                path: listing.path().display().to_string(),
                line_count: listing.line_count(),
                listing: listing.as_str(),
            },
        ),
        ResolvedOutputFormat::Human => {
            let mut text = listing.to_string();
            if !text.is_empty() && !text.ends_with('\n') {
                text.push('\n');
            }
            write_text(out, &text)
        }
    }
}

#[derive(Debug, Serialize)]
struct EntryReport<'a> {
    name: &'a str,
    kind: &'static str,
}

#[derive(Debug, Serialize)]
struct DirectoryReport<'a> {
    path: String,
    entries: Vec<EntryReport<'a>>,
}

const fn kind_name(kind: EntryKind) -> &'static str {
    match kind {
        EntryKind::File => "file",
        EntryKind::Directory => "directory",
        EntryKind::Other => "other",
    }
}

/// Writes a directory listing.
pub(crate) fn render_entries<W: Write>(
    out: &mut W,
    format: ResolvedOutputFormat,
    dir: &Path,
    entries: &[DirectoryEntry],
) -> Result<(), AppError> {
    match format {
        ResolvedOutputFormat::Json => write_json(
            out,
            &DirectoryReport {
                path: dir.display().to_string(),
                entries: entries
                    .iter()
                    .map(|entry| EntryReport {
                        name: entry.name(),
                        kind: kind_name(entry.kind()),
                    })
                    .collect(),
            },
        ),
        ResolvedOutputFormat::Human => {
            let text: String = entries.iter().map(|entry| format!("{entry}\n")).collect();
            write_text(out, &text)
        }
    }
}

fn write_json<W: Write, T: Serialize>(out: &mut W, value: &T) -> Result<(), AppError> {
    let mut text = serde_json::to_string(value).map_err(AppError::Serialise)?;
    text.push('\n');
    write_text(out, &text)
}

fn write_text<W: Write>(out: &mut W, text: &str) -> Result<(), AppError> {
    out.write_all(text.as_bytes())
        .and_then(|()| out.flush())
        .map_err(AppError::WriteOutput)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use safesplice::{BackupRecord, ValidationError};

    #[rstest]
    #[case(OutputFormat::Auto, true, ResolvedOutputFormat::Human)]
    #[case(OutputFormat::Auto, false, ResolvedOutputFormat::Json)]
    #[case(OutputFormat::Human, false, ResolvedOutputFormat::Human)]
    #[case(OutputFormat::Json, true, ResolvedOutputFormat::Json)]
    fn resolves_auto_by_terminal(
        #[case] format: OutputFormat,
        #[case] terminal: bool,
        #[case] expected: ResolvedOutputFormat,
    ) {
        assert_eq!(format.resolve(terminal), expected);
    }

    fn rejected() -> EditResult {
        EditResult::Rejected {
            diagnostic: ValidationError::from_failures(vec![
                ValidationFailure::new("app.py", "missing )").at_location(2, 5),
            ]),
            backup: Some(BackupRecord::new("app.py", "app.py.bak")),
        }
    }

    #[test]
    fn json_report_carries_failures() {
        let mut out = Vec::new();
        render_edit(&mut out, ResolvedOutputFormat::Json, Path::new("app.py"), &rejected())
            .expect("render");

        let value: serde_json::Value = serde_json::from_slice(&out).expect("json");
        assert_eq!(value["status"], "rejected");
        assert_eq!(value["backup_path"], "app.py.bak");
        assert_eq!(value["failures"][0]["line"], 2);
        assert_eq!(value["diagnostic"], "app.py:2:5: missing )");
    }

    #[test]
    fn human_report_summarises_in_one_line() {
        let mut out = Vec::new();
        let applied = EditResult::Applied { backup: None };
        render_edit(&mut out, ResolvedOutputFormat::Human, Path::new("a.rs"), &applied)
            .expect("render");

        assert_eq!(String::from_utf8(out).expect("utf8"), "applied a.rs\n");
    }

    #[test]
    fn human_rejection_names_the_backup() {
        let mut out = Vec::new();
        render_edit(&mut out, ResolvedOutputFormat::Human, Path::new("app.py"), &rejected())
            .expect("render");

        assert_eq!(
            String::from_utf8(out).expect("utf8"),
            "rejected app.py: app.py:2:5: missing )\nbackup: app.py.bak\n"
        );
    }
}
