//! Maps index hits to candidates.

use crate::{
    record::Occurrence,
    result::{Candidate, LocationHit},
};

/// Turns hits into candidates for `occurrence`, one per hit, preserving order.
///
/// Every candidate is tagged with the strategy that produced the hits.
pub fn map_hits(occurrence: &Occurrence, hits: Vec<LocationHit>, fuzzy: bool) -> Vec<Candidate> {
    hits.into_iter()
        .map(|hit| Candidate {
            occurrence: occurrence.clone(),
            record: hit.record,
            score: hit.score,
            fuzzy,
        })
        .collect()
}
