//! Whole-file syntax checking keyed on file extension.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::SyntaxError;
use crate::language::SupportedLanguage;
use crate::parser::Parser;

/// Checks candidate file content for syntax errors.
///
/// The language is picked from the path's extension. Paths with an
/// unrecognised extension are not checked and always yield no failures.
///
/// Parsers are created on first use and cached per language. The cache sits
/// behind a mutex so one checker can be shared between threads.
pub struct SyntaxChecker {
    parsers: Mutex<HashMap<SupportedLanguage, Parser>>,
}

impl SyntaxChecker {
    /// Creates a checker with an empty parser cache.
    #[must_use]
    pub fn new() -> Self {
        Self {
            parsers: Mutex::new(HashMap::new()),
        }
    }

    /// Checks `content` as the language implied by `path`.
    ///
    /// An empty result means the content parsed cleanly (or was not
    /// checked because the extension is unknown).
    ///
    /// # Errors
    ///
    /// Returns an error when the grammar cannot be loaded, Tree-sitter yields
    /// no tree, or the parser cache lock is poisoned.
    pub fn check(&self, path: &Path, content: &str) -> Result<Vec<SyntaxFailure>, SyntaxError> {
        let Some(language) = SupportedLanguage::from_path(path) else {
            return Ok(Vec::new());
        };

        let mut parsers = self
            .parsers
            .lock()
            .map_err(|error| SyntaxError::cache_unavailable(error.to_string()))?;
        let parser = match parsers.entry(language) {
            std::collections::hash_map::Entry::Occupied(entry) => entry.into_mut(),
            std::collections::hash_map::Entry::Vacant(entry) => entry.insert(Parser::new(language)?),
        };

        let parsed = parser.parse(content)?;
        Ok(parsed
            .errors()
            .into_iter()
            .map(|info| SyntaxFailure {
                path: path.to_path_buf(),
                line: info.line,
                column: info.column,
                message: info.message,
            })
            .collect())
    }
}

impl Default for SyntaxChecker {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SyntaxChecker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyntaxChecker")
            .field("languages", &SupportedLanguage::all())
            .finish_non_exhaustive()
    }
}

/// A syntax problem in checked content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxFailure {
    /// Path the content belongs to.
    pub path: PathBuf,
    /// One-based line.
    pub line: u32,
    /// One-based column.
    pub column: u32,
    /// Description of the problem.
    pub message: String,
}

impl fmt::Display for SyntaxFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}: {}",
            self.path.display(),
            self.line,
            self.column,
            self.message
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("main.rs", "fn main() {}\n", true)]
    #[case("main.rs", "fn main() {\n", false)]
    #[case("app.py", "import os\nprint(os.name)\n", true)]
    #[case("app.py", "a\nX\nY\nbad(\ne\n", false)]
    #[case("app.ts", "let n: number = 2;\n", true)]
    #[case("app.ts", "function f( {\n", false)]
    #[case("notes.txt", "bad(", true)]
    #[case("Makefile", "all: (", true)]
    fn checks_by_extension(#[case] name: &str, #[case] content: &str, #[case] clean: bool) {
        let checker = SyntaxChecker::new();
        let failures = checker.check(Path::new(name), content).expect("check");
        assert_eq!(failures.is_empty(), clean, "{name}: {failures:?}");
    }

    #[test]
    fn failures_name_the_checked_path() {
        let checker = SyntaxChecker::new();
        let path = Path::new("pkg/broken.py");
        let failures = checker.check(path, "def broken(\n").expect("check");
        let first = failures.first().expect("a failure");
        assert_eq!(first.path, path);
        assert!(first.to_string().starts_with("pkg/broken.py:"));
    }

    #[test]
    fn reuses_cached_parsers_across_calls() {
        let checker = SyntaxChecker::new();
        for _ in 0..3 {
            let failures = checker
                .check(Path::new("lib.rs"), "pub fn f() {}\n")
                .expect("check");
            assert!(failures.is_empty());
        }
    }
}
