//! Query language for locus name lookups.
//!
//! Queries are generated from extracted place names rather than typed by hand,
//! so the language only has what the resolver emits:
//!
//! - **Terms**: `boston` - words that must appear
//! - **Phrases**: `"new york"` - exact token sequences
//! - **Fuzzy terms**: `bosten~` or `bosten~1` - edit-distance matching
//! - **Escaping**: `\"` - any character after a backslash is literal
//!
//! Adjacent terms are ANDed. Arbitrary text is made safe for embedding with
//! [`escape`].
//!
//! # Example
//!
//! ```
//! use locus_query::{QueryExpr, escape, parse};
//!
//! let text = escape(r#"Fort "Apache" ~ Post"#);
//! let expr = parse(&format!("\"{text}\"")).unwrap().unwrap();
//! assert!(matches!(expr, QueryExpr::Phrase(_)));
//! ```

#![warn(missing_docs)]

mod ast;
mod error;
mod escape;
mod lexer;
mod parser;

pub use ast::QueryExpr;
pub use error::{LexError, ParseError, QueryError};
pub use escape::{SYNTAX_CHARS, escape, is_syntax_char};
pub use lexer::{Token, tokenize};
pub use parser::parse;
