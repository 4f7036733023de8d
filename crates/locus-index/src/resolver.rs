//! Resolution of occurrences to ranked candidates.

use std::path::{Path, PathBuf};

use locus_config::{Config, RankingPolicy, SearchSettings};
use tracing::debug;

use crate::{
    IndexError,
    fallback::Phase,
    mapper::map_hits,
    query::QueryBuilder,
    record::Occurrence,
    result::{Candidate, Resolution},
    session::{IndexSession, SessionProvider, TantivySessionProvider},
};

/// Resolves occurrences against a name index.
///
/// Each call runs the exact query first and falls back to the fuzzy query
/// only when the exact one matched nothing. The ranking policy and defaults
/// belong to the instance; resolvers with different policies can share an
/// index.
pub struct Resolver<P> {
    /// Source of read sessions.
    provider: P,
    /// Builds exact and fuzzy queries.
    builder: QueryBuilder,
    /// Limits, fuzzy defaults and ranking.
    settings: SearchSettings,
}

impl<P: SessionProvider> Resolver<P> {
    /// Creates a resolver over `provider`.
    pub fn new(provider: P, settings: SearchSettings) -> Self {
        Self {
            provider,
            builder: QueryBuilder::new(settings.fuzzy_distance),
            settings,
        }
    }

    /// Replaces the ranking policy.
    pub fn with_ranking(mut self, ranking: RankingPolicy) -> Self {
        self.settings.ranking = ranking;
        self
    }

    /// The active ranking policy.
    pub fn ranking(&self) -> RankingPolicy {
        self.settings.ranking
    }

    /// The resolver's settings.
    pub fn settings(&self) -> &SearchSettings {
        &self.settings
    }

    /// The session provider.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Searches with the configured limit and fuzzy default.
    pub fn lookup(&self, occurrence: &Occurrence) -> Result<Vec<Candidate>, IndexError> {
        self.search(occurrence, self.settings.fuzzy)
    }

    /// Searches with the configured default limit.
    pub fn search(
        &self,
        occurrence: &Occurrence,
        use_fuzzy: bool,
    ) -> Result<Vec<Candidate>, IndexError> {
        self.search_with_limit(occurrence, self.settings.default_limit, use_fuzzy)
    }

    /// Searches with an explicit limit.
    pub fn search_with_limit(
        &self,
        occurrence: &Occurrence,
        limit: usize,
        use_fuzzy: bool,
    ) -> Result<Vec<Candidate>, IndexError> {
        Ok(self.resolve(occurrence, limit, use_fuzzy)?.candidates)
    }

    /// Runs the exact phase and, if needed and allowed, the fuzzy phase.
    ///
    /// One session is held for the whole call and released before returning,
    /// on success and on error.
    pub fn resolve(
        &self,
        occurrence: &Occurrence,
        limit: usize,
        allow_fuzzy: bool,
    ) -> Result<Resolution, IndexError> {
        let ranking = self.settings.ranking;
        let exact = self.builder.exact(&occurrence.text)?;

        let mut session = self.provider.acquire()?;

        let mut page = session.execute(&exact, limit, ranking)?;
        debug!(
            query = %exact,
            total = page.total,
            returned = page.hits.len(),
            "exact phase"
        );

        let mut phase = Phase::ExactAttempted;
        let mut used_fuzzy = false;
        loop {
            phase = phase.advance(page.total, allow_fuzzy);
            if phase != Phase::FuzzyAttempted {
                break;
            }
            let fuzzy = self.builder.fuzzy(&occurrence.text)?;
            page = session.execute(&fuzzy, limit, ranking)?;
            used_fuzzy = true;
            debug!(
                query = %fuzzy,
                total = page.total,
                returned = page.hits.len(),
                "fuzzy phase"
            );
        }
        drop(session);

        Ok(Resolution {
            total: page.total,
            candidates: map_hits(occurrence, page.hits, used_fuzzy),
            used_fuzzy,
        })
    }
}

impl Resolver<TantivySessionProvider> {
    /// Opens a resolver over the index at `path` with the settings from `config`.
    pub fn open(path: &Path, config: &Config) -> Result<Self, IndexError> {
        let provider = TantivySessionProvider::open(path, &config.search)?;
        Ok(Self::new(provider, config.search.clone()))
    }
}

/// Opens a resolver over the index located by `config`.
pub fn open_resolver(config: &Config) -> Result<Resolver<TantivySessionProvider>, IndexError> {
    let index_dir = config
        .index_directory()
        .ok_or_else(|| IndexError::OpenIndex {
            path: PathBuf::new(),
            message: "no configuration found".to_string(),
        })?;
    Resolver::open(&index_dir, config)
}
