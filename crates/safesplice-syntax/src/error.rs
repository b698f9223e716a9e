//! Error types for syntax checking.
//!
//! A syntax error found in the checked content is not an error here: it is
//! reported as a [`crate::SyntaxFailure`]. These variants cover the cases
//! where the checker could not run at all.

use thiserror::Error;

use crate::language::SupportedLanguage;

/// Errors raised when the syntax checker itself cannot operate.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SyntaxError {
    /// The Tree-sitter parser rejected the grammar for a language.
    #[error("failed to initialise parser for {language}: {message}")]
    ParserInit {
        /// Language whose grammar could not be loaded.
        language: SupportedLanguage,
        /// Description of the failure.
        message: String,
    },

    /// Tree-sitter returned no tree for the given source.
    #[error("failed to parse {language}: {message}")]
    Parse {
        /// Language being parsed.
        language: SupportedLanguage,
        /// Description of the failure.
        message: String,
    },

    /// The parser cache lock was poisoned by a panicking thread.
    #[error("parser cache unavailable: {message}")]
    CacheUnavailable {
        /// Description of the failure.
        message: String,
    },
}

impl SyntaxError {
    /// Creates a parser initialisation error.
    #[must_use]
    pub fn parser_init(language: SupportedLanguage, message: impl Into<String>) -> Self {
        Self::ParserInit {
            language,
            message: message.into(),
        }
    }

    /// Creates a parse error.
    #[must_use]
    pub fn parse(language: SupportedLanguage, message: impl Into<String>) -> Self {
        Self::Parse {
            language,
            message: message.into(),
        }
    }

    /// Creates a cache error.
    #[must_use]
    pub fn cache_unavailable(message: impl Into<String>) -> Self {
        Self::CacheUnavailable {
            message: message.into(),
        }
    }
}
