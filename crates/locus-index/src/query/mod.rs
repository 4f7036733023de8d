//! Query construction for name lookups.
//!
//! [`QueryBuilder`] turns raw occurrence text into parsed query expressions;
//! [`QueryCompiler`] lowers those expressions to Tantivy queries.

mod builder;
mod compile;

pub use builder::{LocationQuery, MatchStrategy, QueryBuilder};
pub use compile::QueryCompiler;
