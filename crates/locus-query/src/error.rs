//! Error types for query lexing and parsing.

use thiserror::Error;

/// Lexer error with position information.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("query syntax error: {message} (at byte {position})")]
pub struct LexError {
    /// Error message.
    pub message: String,
    /// Byte position in input where error occurred.
    pub position: usize,
    /// The original input string.
    pub input: String,
}

impl LexError {
    /// Creates a new lexer error.
    pub fn new(message: impl Into<String>, position: usize, input: &str) -> Self {
        Self {
            message: message.into(),
            position,
            input: input.to_string(),
        }
    }
}

/// Parse error with position information.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ParseError {
    /// Error message.
    pub message: String,
    /// Token index where error occurred (if applicable).
    pub token_index: Option<usize>,
}

impl ParseError {
    /// Creates a new parse error.
    pub fn new(message: impl Into<String>, token_index: Option<usize>) -> Self {
        Self {
            message: message.into(),
            token_index,
        }
    }
}

/// A query string that could not be turned into an expression.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// Tokenization failed.
    #[error(transparent)]
    Lex(#[from] LexError),

    /// The tokens did not form a valid query.
    #[error("query syntax error: {source} in {query:?}")]
    Parse {
        /// The parser's error.
        source: ParseError,
        /// The rejected query string.
        query: String,
    },
}

impl QueryError {
    /// Returns the error message without context.
    pub fn message(&self) -> &str {
        match self {
            Self::Lex(err) => &err.message,
            Self::Parse { source, .. } => &source.message,
        }
    }
}
