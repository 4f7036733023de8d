//! Search and resolution results.

use serde::Serialize;

use crate::record::{LocationRecord, Occurrence};

/// A single index hit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationHit {
    /// The matched record.
    pub record: LocationRecord,
    /// Relevance score from the index.
    pub score: f32,
}

/// One page of hits plus the true number of matches.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SearchPage {
    /// Hits in ranking order, at most the requested limit.
    pub hits: Vec<LocationHit>,
    /// Total number of matching documents, independent of the limit.
    pub total: usize,
}

impl SearchPage {
    /// A page with no matches.
    pub fn empty() -> Self {
        Self::default()
    }
}

/// A ranked match for an occurrence.
///
/// The candidate's rank is its position in the returned list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Candidate {
    /// The mention this candidate resolves.
    pub occurrence: Occurrence,
    /// The matched gazetteer record.
    pub record: LocationRecord,
    /// Relevance score from the index.
    pub score: f32,
    /// True when produced by the fuzzy fallback.
    pub fuzzy: bool,
}

/// Outcome of a two-phase resolution.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Resolution {
    /// Ranked candidates.
    pub candidates: Vec<Candidate>,
    /// Whether the fuzzy phase produced them.
    pub used_fuzzy: bool,
    /// Total matches of the phase that produced the candidates.
    pub total: usize,
}
