//! Tree-sitter syntax checking for files edited by `safesplice`.
//!
//! The editor core is language agnostic: it hands candidate file content to
//! a validator and commits only when the validator accepts. This crate
//! provides the syntax-aware backend for that validator. It parses content
//! with the Tree-sitter grammar matching the file extension and reports each
//! `ERROR` or `MISSING` node as a located [`SyntaxFailure`].
//!
//! # Supported Languages
//!
//! - Rust (`.rs`)
//! - Python (`.py`, `.pyi`)
//! - TypeScript (`.ts`, `.tsx`, `.mts`, `.cts`)
//!
//! Files with any other extension are not checked.
//!
//! # Example
//!
//! ```
//! use std::path::Path;
//! use safesplice_syntax::SyntaxChecker;
//!
//! let checker = SyntaxChecker::new();
//!
//! let failures = checker.check(Path::new("app.py"), "def ok():\n    pass\n")?;
//! assert!(failures.is_empty());
//!
//! let failures = checker.check(Path::new("app.py"), "def broken(")?;
//! assert!(!failures.is_empty());
//! # Ok::<(), safesplice_syntax::SyntaxError>(())
//! ```

mod checker;
mod error;
mod language;
mod parser;
mod position;

pub use checker::{SyntaxChecker, SyntaxFailure};
pub use error::SyntaxError;
pub use language::SupportedLanguage;
pub use parser::{ParseResult, Parser, SyntaxErrorInfo};
