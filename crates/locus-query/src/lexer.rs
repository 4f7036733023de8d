//! Query lexer (tokenizer).
//!
//! Converts a query string into a stream of tokens for the parser. A backslash
//! makes the following character literal, both in bare words and in phrases.

use std::{iter::Peekable, str::Chars};

use crate::error::LexError;

/// A token in the query language.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// A bare word (search term), with escapes resolved.
    Term(String),

    /// A quoted phrase (quotes stripped, escapes resolved).
    Phrase(String),

    /// Fuzzy suffix (`~` or `~N`) with an optional explicit edit distance.
    Fuzzy(Option<u8>),
}

/// Tokenizes a query string.
struct Lexer<'a> {
    /// The original input string.
    input: &'a str,
    /// Character iterator with one-character lookahead.
    chars: Peekable<Chars<'a>>,
    /// Current byte position in input.
    position: usize,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given input.
    fn new(input: &'a str) -> Self {
        Self {
            input,
            chars: input.chars().peekable(),
            position: 0,
        }
    }

    /// Creates an error at a specific position.
    fn error_at(&self, message: impl Into<String>, position: usize) -> LexError {
        LexError::new(message, position, self.input)
    }

    /// Tokenizes the entire input, returning all tokens or an error.
    fn tokenize(mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();

        while let Some(token) = self.next_token()? {
            tokens.push(token);
        }

        Ok(tokens)
    }

    /// Returns the next token, or None if at end of input.
    fn next_token(&mut self) -> Result<Option<Token>, LexError> {
        self.skip_whitespace();

        let Some(&ch) = self.chars.peek() else {
            return Ok(None);
        };

        match ch {
            '"' => self.read_phrase(),
            '~' => Ok(Some(self.read_fuzzy())),
            _ => self.read_term(),
        }
    }

    /// Consumes a backslash and returns the character it escapes.
    fn read_escaped(&mut self) -> Result<char, LexError> {
        let start_pos = self.position;
        self.advance(); // consume backslash
        match self.chars.peek().copied() {
            Some(ch) => {
                self.advance();
                Ok(ch)
            }
            None => Err(self.error_at("dangling escape at end of query", start_pos)),
        }
    }

    /// Reads a quoted phrase.
    fn read_phrase(&mut self) -> Result<Option<Token>, LexError> {
        let start_pos = self.position;
        self.advance(); // consume opening quote

        let mut content = String::new();

        loop {
            match self.chars.peek() {
                Some(&'"') => {
                    self.advance(); // consume closing quote
                    return Ok(Some(Token::Phrase(content)));
                }
                Some(&'\\') => {
                    let ch = self.read_escaped()?;
                    content.push(ch);
                }
                Some(&ch) => {
                    content.push(ch);
                    self.advance();
                }
                None => {
                    return Err(self.error_at("unclosed quote", start_pos));
                }
            }
        }
    }

    /// Reads a bare term.
    fn read_term(&mut self) -> Result<Option<Token>, LexError> {
        let mut word = String::new();

        while let Some(&ch) = self.chars.peek() {
            if ch.is_whitespace() || matches!(ch, '"' | '~') {
                break;
            }

            if ch == '\\' {
                word.push(self.read_escaped()?);
                continue;
            }

            word.push(ch);
            self.advance();
        }

        Ok(Some(Token::Term(word)))
    }

    /// Reads a fuzzy suffix (`~` optionally followed by a single digit).
    fn read_fuzzy(&mut self) -> Token {
        self.advance(); // consume '~'

        let distance = match self.chars.peek() {
            Some(&ch) if ch.is_ascii_digit() => {
                self.advance();
                ch.to_digit(10).map(|d| d as u8)
            }
            _ => None,
        };

        Token::Fuzzy(distance)
    }

    /// Skips whitespace characters.
    fn skip_whitespace(&mut self) {
        while let Some(&ch) = self.chars.peek() {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    /// Advances to the next character.
    fn advance(&mut self) {
        if let Some(ch) = self.chars.next() {
            self.position += ch.len_utf8();
        }
    }
}

/// Convenience function to tokenize a query string.
pub fn tokenize(input: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(input).tokenize()
}
