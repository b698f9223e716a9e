//! Mapping from file names to Tree-sitter grammars.

use std::fmt;
use std::path::Path;

/// Languages the syntax checker knows how to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SupportedLanguage {
    /// Rust source (`.rs`).
    Rust,
    /// Python source and stubs (`.py`, `.pyi`).
    Python,
    /// TypeScript, including TSX (`.ts`, `.tsx`, `.mts`, `.cts`).
    TypeScript,
}

impl SupportedLanguage {
    /// Looks up a language by file extension, ignoring ASCII case.
    ///
    /// ```
    /// use safesplice_syntax::SupportedLanguage;
    ///
    /// assert_eq!(SupportedLanguage::from_extension("PY"), Some(SupportedLanguage::Python));
    /// assert_eq!(SupportedLanguage::from_extension("toml"), None);
    /// ```
    #[must_use]
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "rs" => Some(Self::Rust),
            "py" | "pyi" => Some(Self::Python),
            "ts" | "tsx" | "mts" | "cts" => Some(Self::TypeScript),
            _ => None,
        }
    }

    /// Looks up a language from the extension of `path`.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|extension| extension.to_str())
            .and_then(Self::from_extension)
    }

    /// Tree-sitter grammar for this language.
    #[must_use]
    pub fn grammar(self) -> tree_sitter::Language {
        match self {
            Self::Rust => tree_sitter_rust::LANGUAGE.into(),
            Self::Python => tree_sitter_python::LANGUAGE.into(),
            // The TSX grammar is a superset and also accepts plain `.ts`.
            Self::TypeScript => tree_sitter_typescript::LANGUAGE_TSX.into(),
        }
    }

    /// Lower-case identifier used in messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Rust => "rust",
            Self::Python => "python",
            Self::TypeScript => "typescript",
        }
    }

    /// Every supported language.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Rust, Self::Python, Self::TypeScript]
    }
}

impl fmt::Display for SupportedLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("rs", SupportedLanguage::Rust)]
    #[case("py", SupportedLanguage::Python)]
    #[case("pyi", SupportedLanguage::Python)]
    #[case("ts", SupportedLanguage::TypeScript)]
    #[case("tsx", SupportedLanguage::TypeScript)]
    #[case("mts", SupportedLanguage::TypeScript)]
    #[case("cts", SupportedLanguage::TypeScript)]
    #[case("Py", SupportedLanguage::Python)]
    fn recognises_known_extensions(#[case] extension: &str, #[case] expected: SupportedLanguage) {
        assert_eq!(SupportedLanguage::from_extension(extension), Some(expected));
    }

    #[rstest]
    #[case("txt")]
    #[case("json")]
    #[case("")]
    fn ignores_unknown_extensions(#[case] extension: &str) {
        assert_eq!(SupportedLanguage::from_extension(extension), None);
    }

    #[rstest]
    #[case("gui/app.py", Some(SupportedLanguage::Python))]
    #[case("src/lib.rs", Some(SupportedLanguage::Rust))]
    #[case("Makefile", None)]
    #[case("notes.md", None)]
    fn detects_language_from_path(
        #[case] path: &str,
        #[case] expected: Option<SupportedLanguage>,
    ) {
        assert_eq!(SupportedLanguage::from_path(Path::new(path)), expected);
    }

    #[test]
    fn displays_lower_case_names() {
        assert_eq!(SupportedLanguage::TypeScript.to_string(), "typescript");
    }
}
