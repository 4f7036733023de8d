//! Ranked collection of hits.
//!
//! Hits are ordered while collecting: each match gets a [`RankKey`] built from
//! its population fast field and relevance score according to the active
//! [`RankingPolicy`], and the top-k keys win. The total match count comes from
//! the same pass.

use std::cmp::Ordering;

use locus_config::RankingPolicy;
use tantivy::{
    DocAddress, DocId, Score, Searcher, SegmentReader,
    collector::{Count, TopDocs},
    query::Query,
};
use tracing::warn;

use crate::schema::POPULATION_FIELD;

/// Sort key for a hit under a ranking policy. Larger keys rank first.
#[derive(Debug, Clone, Copy)]
pub struct RankKey {
    /// Primary and secondary sort values.
    key: (f64, f64),
    /// Relevance score, carried through to the hit.
    pub score: Score,
}

impl RankKey {
    /// Builds the key for a hit.
    pub fn new(policy: RankingPolicy, population: u64, score: Score) -> Self {
        Self {
            key: policy.sort_key(population, score),
            score,
        }
    }
}

impl PartialEq for RankKey {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl PartialOrd for RankKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.key.partial_cmp(&other.key)
    }
}

/// Runs `query`, returning the total match count and the best `limit` hits.
///
/// A zero limit only counts.
pub fn search_ranked(
    searcher: &Searcher,
    query: &dyn Query,
    limit: usize,
    policy: RankingPolicy,
) -> tantivy::Result<(usize, Vec<(RankKey, DocAddress)>)> {
    if limit == 0 {
        let total = searcher.search(query, &Count)?;
        return Ok((total, Vec::new()));
    }

    let top = TopDocs::with_limit(limit).tweak_score(move |segment_reader: &SegmentReader| {
        let population = match segment_reader.fast_fields().u64(POPULATION_FIELD) {
            Ok(column) => Some(column),
            Err(e) => {
                warn!(
                    error = %e,
                    segment = ?segment_reader.segment_id(),
                    "population column unreadable, segment ranks as population 0"
                );
                None
            }
        };
        move |doc: DocId, score: Score| {
            let population = population
                .as_ref()
                .and_then(|column| column.first(doc))
                .unwrap_or(0);
            RankKey::new(policy, population, score)
        }
    });

    searcher.search(query, &(Count, top))
}
