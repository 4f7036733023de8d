//! Query parser.
//!
//! Parses a token stream into a query AST using recursive descent.
//!
//! # Grammar
//!
//! ```text
//! query   → primary+
//! primary → TERM FUZZY? | PHRASE
//! ```
//!
//! Adjacent primaries are ANDed.

use crate::{
    ast::QueryExpr,
    error::{ParseError, QueryError},
    lexer::{Token, tokenize},
};

/// Recursive descent parser for query expressions.
struct Parser {
    /// Token stream to parse.
    tokens: Vec<Token>,
    /// Current position in token stream.
    position: usize,
}

impl Parser {
    /// Creates a new parser from a token stream.
    fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            position: 0,
        }
    }

    /// Parses the token stream into a query expression.
    fn parse(mut self) -> Result<Option<QueryExpr>, ParseError> {
        if self.tokens.is_empty() {
            return Ok(None);
        }

        let mut exprs = Vec::new();
        while self.peek().is_some() {
            exprs.push(self.parse_primary()?);
        }

        Ok(Some(QueryExpr::and(exprs)))
    }

    /// Parses a TERM (with optional fuzzy suffix) or PHRASE token.
    fn parse_primary(&mut self) -> Result<QueryExpr, ParseError> {
        match self.peek().cloned() {
            Some(Token::Term(text)) => {
                self.advance();
                if let Some(Token::Fuzzy(distance)) = self.peek().cloned() {
                    self.advance();
                    Ok(QueryExpr::fuzzy(text, distance))
                } else {
                    Ok(QueryExpr::Term(text))
                }
            }
            Some(Token::Phrase(text)) => {
                self.advance();
                if matches!(self.peek(), Some(Token::Fuzzy(_))) {
                    return Err(ParseError::new(
                        "fuzzy matching applies to terms, not phrases",
                        Some(self.position),
                    ));
                }
                Ok(QueryExpr::Phrase(
                    text.split_whitespace().map(String::from).collect(),
                ))
            }
            Some(Token::Fuzzy(_)) => Err(ParseError::new(
                "unexpected '~' (needs a term before it)",
                Some(self.position),
            )),
            None => Err(ParseError::new("unexpected end of query", None)),
        }
    }

    /// Returns the current token without consuming it.
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.position)
    }

    /// Advances to the next token.
    fn advance(&mut self) {
        if self.position < self.tokens.len() {
            self.position += 1;
        }
    }
}

/// Parses a query string into an AST.
///
/// Returns `Ok(None)` for empty queries, `Ok(Some(expr))` for valid queries,
/// or `Err(QueryError)` for invalid syntax. Parse errors carry the input.
pub fn parse(input: &str) -> Result<Option<QueryExpr>, QueryError> {
    let tokens = tokenize(input)?;
    Parser::new(tokens)
        .parse()
        .map_err(|source| QueryError::Parse {
            source,
            query: input.to_string(),
        })
}
