//! Thin wrapper over the Tree-sitter parser.
//!
//! Tree-sitter recovers from errors, so a parse nearly always yields a tree.
//! Problems show up as `ERROR` nodes (unparseable spans) or `MISSING` nodes
//! (tokens the parser inserted to recover). [`ParseResult::errors`] collects
//! both.

use crate::error::SyntaxError;
use crate::language::SupportedLanguage;
use crate::position::one_based;

/// Longest excerpt of offending source kept in a [`SyntaxErrorInfo`].
const EXCERPT_LIMIT: usize = 40;

/// A parsed document.
#[derive(Debug)]
pub struct ParseResult {
    tree: tree_sitter::Tree,
    source: String,
}

impl ParseResult {
    /// Collects every `ERROR` and `MISSING` node in document order.
    #[must_use]
    pub fn errors(&self) -> Vec<SyntaxErrorInfo> {
        let mut errors = Vec::new();
        let mut pending = vec![self.tree.root_node()];
        while let Some(node) = pending.pop() {
            if node.is_error() || node.is_missing() {
                errors.push(SyntaxErrorInfo::from_node(node, &self.source));
            }
            if !node.has_error() {
                continue;
            }
            let mut cursor = node.walk();
            let children: Vec<_> = node.children(&mut cursor).collect();
            pending.extend(children.into_iter().rev());
        }
        errors
    }
}

/// One syntax problem located in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxErrorInfo {
    /// One-based line of the node start.
    pub line: u32,
    /// One-based column of the node start.
    pub column: u32,
    /// Description of the problem, quoting a shortened excerpt of the
    /// offending source when there is one.
    pub message: String,
}

impl SyntaxErrorInfo {
    fn from_node(node: tree_sitter::Node<'_>, source: &str) -> Self {
        let excerpt = source
            .get(node.byte_range())
            .map(shorten)
            .unwrap_or_default();
        let message = if node.is_missing() {
            format!("missing {}", node.kind())
        } else if excerpt.trim().is_empty() {
            "syntax error".to_owned()
        } else {
            format!("syntax error near `{}`", excerpt.trim())
        };
        let (line, column) = one_based(node.start_position());

        Self {
            line,
            column,
            message,
        }
    }
}

fn shorten(text: &str) -> String {
    if text.chars().count() <= EXCERPT_LIMIT {
        return text.to_owned();
    }
    let head: String = text.chars().take(EXCERPT_LIMIT.saturating_sub(3)).collect();
    format!("{head}...")
}

/// A Tree-sitter parser bound to one language.
pub struct Parser {
    inner: tree_sitter::Parser,
    language: SupportedLanguage,
}

impl Parser {
    /// Builds a parser for `language`.
    ///
    /// # Errors
    ///
    /// Returns [`SyntaxError::ParserInit`] when Tree-sitter refuses the
    /// grammar, typically because of an ABI version mismatch.
    pub fn new(language: SupportedLanguage) -> Result<Self, SyntaxError> {
        let mut inner = tree_sitter::Parser::new();
        inner
            .set_language(&language.grammar())
            .map_err(|error| SyntaxError::parser_init(language, error.to_string()))?;
        Ok(Self { inner, language })
    }

    /// Parses `source` from scratch.
    ///
    /// # Errors
    ///
    /// Returns [`SyntaxError::Parse`] when Tree-sitter produces no tree.
    pub fn parse(&mut self, source: &str) -> Result<ParseResult, SyntaxError> {
        let tree = self
            .inner
            .parse(source, None)
            .ok_or_else(|| SyntaxError::parse(self.language, "parser returned no tree"))?;
        Ok(ParseResult {
            tree,
            source: source.to_owned(),
        })
    }
}

impl std::fmt::Debug for Parser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Parser")
            .field("language", &self.language)
            .finish_non_exhaustive()
    }
}
