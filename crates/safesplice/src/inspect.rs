//! Read-only helpers for choosing what to edit.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::EditError;
use crate::splice::lines;

/// A file rendered with one-based line numbers, one `N:` prefix per line.
///
/// The numbering matches the line ranges accepted by
/// [`crate::SafeFileEditor::apply`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberedListing {
    path: PathBuf,
    rendered: String,
    line_count: usize,
}

impl NumberedListing {
    fn render(path: &Path, text: &str) -> Self {
        let mut rendered = String::with_capacity(text.len());
        let mut line_count = 0;
        for (index, line) in lines(text).enumerate() {
            line_count = index + 1;
            rendered.push_str(&line_count.to_string());
            rendered.push(':');
            rendered.push_str(line);
        }
        Self {
            path: path.to_path_buf(),
            rendered,
            line_count,
        }
    }

    /// File the listing was taken from.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of lines in the file.
    #[must_use]
    pub const fn line_count(&self) -> usize {
        self.line_count
    }

    /// The numbered text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.rendered
    }
}

impl fmt::Display for NumberedListing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.rendered)
    }
}

/// Renders `path` with line numbers.
///
/// # Errors
///
/// Returns [`EditError::NotFound`] or [`EditError::Read`] when the file cannot
/// be read as UTF-8 text.
pub fn view(path: &Path) -> Result<NumberedListing, EditError> {
    let text = fs::read_to_string(path).map_err(|source| EditError::from_read(path, source))?;
    Ok(NumberedListing::render(path, &text))
}

/// Kind of a directory entry. Symbolic links are reported as [`EntryKind::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// A regular file.
    File,
    /// A directory.
    Directory,
    /// Anything else.
    Other,
}

/// One entry of a directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    name: String,
    kind: EntryKind,
}

impl DirectoryEntry {
    /// File name, lossily converted to UTF-8.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// What the entry is.
    #[must_use]
    pub const fn kind(&self) -> EntryKind {
        self.kind
    }
}

impl fmt::Display for DirectoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            EntryKind::Directory => write!(f, "{}/", self.name),
            EntryKind::File | EntryKind::Other => f.write_str(&self.name),
        }
    }
}

/// Lists the immediate entries of `dir`, sorted by name.
///
/// # Errors
///
/// Returns [`EditError::NotFound`] when `dir` does not exist, and
/// [`EditError::List`] when the directory or one of its entries cannot be
/// read.
pub fn list(dir: &Path) -> Result<Vec<DirectoryEntry>, EditError> {
    let list_error = |source: io::Error| EditError::List {
        path: dir.to_path_buf(),
        source,
    };
    let listing = fs::read_dir(dir).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            EditError::NotFound {
                path: dir.to_path_buf(),
            }
        } else {
            list_error(source)
        }
    })?;
    let mut entries = Vec::new();
    for read in listing {
        let entry = read.map_err(list_error)?;
        let file_type = entry.file_type().map_err(list_error)?;
        let kind = if file_type.is_dir() {
            EntryKind::Directory
        } else if file_type.is_file() {
            EntryKind::File
        } else {
            EntryKind::Other
        };
        entries.push(DirectoryEntry {
            name: entry.file_name().to_string_lossy().into_owned(),
            kind,
        });
    }
    entries.sort_by(|left, right| left.name.cmp(&right.name));
    Ok(entries)
}
