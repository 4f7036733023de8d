//! Builds exact and fuzzy queries from occurrence text.

use std::fmt;

use locus_query::{QueryError, QueryExpr, escape, parse};

/// How a query matches names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchStrategy {
    /// The whole text as a phrase ending the name.
    Exact,
    /// Every word within an edit distance.
    Fuzzy,
}

/// A parsed query ready to run against a session.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationQuery {
    /// The query string as written in the query language.
    source: String,
    /// Parsed expression; `None` when the text held nothing to search for.
    expr: Option<QueryExpr>,
    /// Strategy this query implements.
    strategy: MatchStrategy,
}

impl LocationQuery {
    /// The query string.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The parsed expression, if any.
    pub fn expr(&self) -> Option<&QueryExpr> {
        self.expr.as_ref()
    }

    /// The strategy this query implements.
    pub fn strategy(&self) -> MatchStrategy {
        self.strategy
    }
}

impl fmt::Display for LocationQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Builds queries from raw, unescaped occurrence text.
///
/// Text is escaped before it is embedded, so characters like `"` or `~` in a
/// place name are matched literally instead of being read as syntax.
#[derive(Debug, Clone, Copy)]
pub struct QueryBuilder {
    /// Edit distance written into fuzzy terms.
    fuzzy_distance: u8,
}

impl QueryBuilder {
    /// Creates a builder producing fuzzy terms with the given edit distance.
    pub fn new(fuzzy_distance: u8) -> Self {
        Self { fuzzy_distance }
    }

    /// Builds the exact query: the whole text as one quoted phrase.
    pub fn exact(&self, text: &str) -> Result<LocationQuery, QueryError> {
        let source = format!("\"{}\"", escape(text).to_lowercase());
        Self::finish(source, MatchStrategy::Exact)
    }

    /// Builds the fuzzy query: every word must match within the edit distance.
    pub fn fuzzy(&self, text: &str) -> Result<LocationQuery, QueryError> {
        let escaped = escape(text).to_lowercase();
        let source = escaped
            .split_whitespace()
            .map(|word| format!("{word}~{}", self.fuzzy_distance))
            .collect::<Vec<_>>()
            .join(" ");
        Self::finish(source, MatchStrategy::Fuzzy)
    }

    /// Parses a built query string.
    fn finish(source: String, strategy: MatchStrategy) -> Result<LocationQuery, QueryError> {
        let expr = parse(&source)?;
        Ok(LocationQuery {
            source,
            expr,
            strategy,
        })
    }
}
