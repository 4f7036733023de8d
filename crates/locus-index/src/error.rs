//! Error types for the locus-index crate.

use std::{io, path::PathBuf};

use locus_query::QueryError;
use thiserror::Error;

/// Errors that can occur when writing to or resolving against the name index.
#[derive(Debug, Error)]
pub enum IndexError {
    /// The built query expression was rejected by the query language.
    ///
    /// Never retried; the same input would fail again.
    #[error("failed to construct query: {0}")]
    QueryConstruction(QueryError),

    /// The index failed while executing a query.
    #[error("search failed: {0}")]
    SearchExecution(String),

    /// A read session could not be obtained. No query was attempted.
    #[error("failed to acquire index session: {0}")]
    ResourceAcquisition(String),

    /// Failed to open or create the index.
    #[error("failed to open index at {path}: {message}")]
    OpenIndex {
        /// Path to the index directory.
        path: PathBuf,
        /// Error message.
        message: String,
    },

    /// Failed to write to the index.
    #[error("failed to write to index: {0}")]
    Write(String),

    /// Failed to commit changes to the index.
    #[error("failed to commit index: {0}")]
    Commit(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A stored record could not be encoded or decoded.
    #[error("invalid location record: {0}")]
    InvalidRecord(String),
}

impl IndexError {
    /// Creates an `OpenIndex` error from a path and Tantivy error.
    pub(crate) fn open_index(path: PathBuf, source: &tantivy::TantivyError) -> Self {
        Self::OpenIndex {
            path,
            message: source.to_string(),
        }
    }

    /// Creates a `Write` error from a Tantivy error.
    pub(crate) fn write(source: &tantivy::TantivyError) -> Self {
        Self::Write(source.to_string())
    }

    /// Creates a `Commit` error from a Tantivy error.
    pub(crate) fn commit(source: &tantivy::TantivyError) -> Self {
        Self::Commit(source.to_string())
    }

    /// Creates a `SearchExecution` error from a Tantivy error.
    pub(crate) fn search_execution(source: &tantivy::TantivyError) -> Self {
        Self::SearchExecution(source.to_string())
    }

    /// Creates a `ResourceAcquisition` error from a Tantivy error.
    pub(crate) fn acquisition(source: &tantivy::TantivyError) -> Self {
        Self::ResourceAcquisition(source.to_string())
    }
}

impl From<QueryError> for IndexError {
    fn from(err: QueryError) -> Self {
        Self::QueryConstruction(err)
    }
}
