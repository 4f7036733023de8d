//! Read sessions over the name index.
//!
//! A resolver acquires one session per call and holds it across both match
//! phases. Dropping the session releases it, so every exit path, including
//! `?` on an error, gives the snapshot back.

use std::path::{Path, PathBuf};

use locus_config::{RankingPolicy, SearchSettings};
use tantivy::{
    DocAddress, Index, IndexReader, ReloadPolicy, Searcher, TantivyDocument,
    directory::MmapDirectory,
    schema::Value,
};
use tracing::{trace, warn};

use crate::{
    IndexError,
    analyzer::{LOCUS_TOKENIZER, build_analyzer},
    query::{LocationQuery, QueryCompiler},
    rank::search_ranked,
    record::LocationRecord,
    result::{LocationHit, SearchPage},
    schema::IndexSchema,
};

/// Hands out read sessions.
pub trait SessionProvider {
    /// Session type produced by this provider.
    type Session: IndexSession;

    /// Acquires a session. On failure no query may be attempted.
    fn acquire(&self) -> Result<Self::Session, IndexError>;
}

/// A read-only view of the index. Released on drop.
pub trait IndexSession {
    /// Runs `query`, returning at most `limit` hits ordered by `ranking` and the
    /// total number of matches.
    fn execute(
        &mut self,
        query: &LocationQuery,
        limit: usize,
        ranking: RankingPolicy,
    ) -> Result<SearchPage, IndexError>;
}

/// Provides sessions over an on-disk Tantivy index.
pub struct TantivySessionProvider {
    /// Index directory, for diagnostics.
    path: PathBuf,
    /// Shared reader; each session takes a searcher snapshot from it.
    reader: IndexReader,
    /// Schema with field handles.
    schema: IndexSchema,
    /// Compiler template cloned into each session.
    compiler: QueryCompiler,
}

impl TantivySessionProvider {
    /// Opens an existing index for reading.
    pub fn open(path: &Path, settings: &SearchSettings) -> Result<Self, IndexError> {
        if !path.exists() {
            return Err(IndexError::OpenIndex {
                path: path.to_path_buf(),
                message: "index directory does not exist".to_string(),
            });
        }

        let schema = IndexSchema::new();

        let dir = MmapDirectory::open(path).map_err(|e| {
            let err: tantivy::TantivyError = e.into();
            IndexError::open_index(path.to_path_buf(), &err)
        })?;

        let index = Index::open(dir).map_err(|e| IndexError::open_index(path.to_path_buf(), &e))?;
        check_schema(&index, &schema, path)?;

        let analyzer = build_analyzer();
        index
            .tokenizers()
            .register(LOCUS_TOKENIZER, analyzer.clone());

        let reader: IndexReader = index
            .reader_builder()
            .reload_policy(ReloadPolicy::OnCommitWithDelay)
            .try_into()
            .map_err(|e| IndexError::open_index(path.to_path_buf(), &e))?;

        let compiler = QueryCompiler::new(
            schema.clone(),
            analyzer,
            settings.fuzzy_distance,
            settings.transpositions,
        );

        Ok(Self {
            path: path.to_path_buf(),
            reader,
            schema,
            compiler,
        })
    }

    /// Returns the index directory.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Fails unless the index was built with `expected`, so field handles and the
/// population fast field line up.
fn check_schema(index: &Index, expected: &IndexSchema, path: &Path) -> Result<(), IndexError> {
    if index.schema() == *expected.schema() {
        Ok(())
    } else {
        Err(IndexError::OpenIndex {
            path: path.to_path_buf(),
            message: "index schema does not match the location schema".to_string(),
        })
    }
}

impl SessionProvider for TantivySessionProvider {
    type Session = TantivySession;

    fn acquire(&self) -> Result<TantivySession, IndexError> {
        let searcher = self.reader.searcher();
        // Fails once the index directory is gone.
        if let Err(e) = searcher.index().load_metas() {
            return Err(IndexError::acquisition(&e));
        }
        trace!(
            path = %self.path.display(),
            docs = searcher.num_docs(),
            "acquired index session"
        );
        Ok(TantivySession {
            searcher,
            schema: self.schema.clone(),
            compiler: self.compiler.clone(),
        })
    }
}

/// A point-in-time snapshot of the index.
pub struct TantivySession {
    /// Snapshot searcher.
    searcher: Searcher,
    /// Schema with field handles.
    schema: IndexSchema,
    /// Compiler for this session's queries.
    compiler: QueryCompiler,
}

impl TantivySession {
    /// Loads and decodes the stored record for a hit.
    fn load_hit(&self, address: DocAddress, score: f32) -> Result<LocationHit, IndexError> {
        let doc: TantivyDocument = self
            .searcher
            .doc(address)
            .map_err(|e| IndexError::search_execution(&e))?;

        let json = doc
            .get_first(self.schema.record)
            .and_then(|v| v.as_str())
            .ok_or_else(|| IndexError::InvalidRecord("document has no stored record".into()))?;

        let record: LocationRecord = serde_json::from_str(json).map_err(|e| {
            warn!(error = %e, ?address, "failed to decode stored record");
            IndexError::InvalidRecord(e.to_string())
        })?;

        Ok(LocationHit { record, score })
    }
}

impl IndexSession for TantivySession {
    fn execute(
        &mut self,
        query: &LocationQuery,
        limit: usize,
        ranking: RankingPolicy,
    ) -> Result<SearchPage, IndexError> {
        let Some(expr) = query.expr() else {
            return Ok(SearchPage::empty());
        };
        let Some(compiled) = self.compiler.compile(expr) else {
            return Ok(SearchPage::empty());
        };

        let (total, top) = search_ranked(&self.searcher, compiled.as_ref(), limit, ranking)
            .map_err(|e| IndexError::search_execution(&e))?;

        let hits = top
            .into_iter()
            .map(|(key, address)| self.load_hit(address, key.score))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(SearchPage { hits, total })
    }
}

impl Drop for TantivySession {
    fn drop(&mut self) {
        trace!("released index session");
    }
}
