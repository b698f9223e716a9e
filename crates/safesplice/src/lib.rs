//! Validated, backed-up line-range edits to text files.
//!
//! [`SafeFileEditor::apply`] replaces an inclusive, one-based line range with
//! a block of text, but only after copying the original bytes to a backup and
//! asking a [`Validator`] whether the result is acceptable. A rejected edit
//! leaves the file byte-identical to its backup.
//!
//! ```ignore
//! use safesplice::{EditRequest, SafeFileEditor, SyntaxValidator};
//!
//! let editor = SafeFileEditor::default();
//! let request = EditRequest::replace_lines("src/app.py", 2, 3, "x = 1\ny = 2");
//! match editor.apply(&request, &SyntaxValidator::new())? {
//!     safesplice::EditResult::Applied { .. } => println!("written"),
//!     safesplice::EditResult::Rejected { diagnostic, .. } => println!("{diagnostic}"),
//! }
//! ```
//!
//! [`view`] and [`list`] help pick the file and lines to change, and
//! [`SafeFileEditor::create`] writes whole files under the same validation.

mod atomic;
mod backup;
mod edit;
mod editor;
mod error;
mod inspect;
mod splice;
mod validation;

pub use backup::{BackupLocation, BackupRecord, DEFAULT_BACKUP_SUFFIX};
pub use edit::{EditRequest, LineRange, ReplacementText};
pub use editor::{EditResult, EditorConfig, SafeFileEditor};
pub use error::{EditError, ValidationError, ValidationFailure};
pub use inspect::{DirectoryEntry, EntryKind, NumberedListing, list, view};
pub use validation::{AcceptAll, FnValidator, SyntaxValidator, Validator, from_fn};

#[cfg(test)]
mod tests;
