//! Ranking policies for ordering candidates.

use serde::{Deserialize, Serialize};

/// Sort order applied to search hits.
///
/// Every policy sorts descending on a primary key and breaks ties on a
/// secondary key. The default favours populous places: a short, ambiguous
/// mention like "Boston" resolves to the largest matching place first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RankingPolicy {
    /// Population first, relevance score as tie-break.
    #[default]
    PopulationThenScore,
    /// Relevance score first, population as tie-break.
    ScoreThenPopulation,
    /// Relevance score only.
    Score,
}

impl RankingPolicy {
    /// Returns the `(primary, secondary)` sort key for a hit; larger sorts first.
    pub fn sort_key(self, population: u64, score: f32) -> (f64, f64) {
        let population = population as f64;
        let score = f64::from(score);
        match self {
            Self::PopulationThenScore => (population, score),
            Self::ScoreThenPopulation => (score, population),
            Self::Score => (score, 0.0),
        }
    }
}
