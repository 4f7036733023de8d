//! Phases of a two-phase resolution.
//!
//! ```text
//! ExactAttempted --(no exact hits, fuzzy allowed)--> FuzzyAttempted --> Done
//!        \--------------(otherwise)-----------------------------------/
//! ```

/// Where a resolution stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// The exact query has run.
    ExactAttempted,
    /// The fuzzy query has run.
    FuzzyAttempted,
    /// Nothing further will run.
    Done,
}

impl Phase {
    /// Returns the phase after observing `total` matches in this one.
    ///
    /// Only an exact phase with zero matches and fuzzy allowed moves on to the
    /// fuzzy phase; exact hits always stand.
    pub fn advance(self, total: usize, allow_fuzzy: bool) -> Self {
        match self {
            Self::ExactAttempted if total == 0 && allow_fuzzy => Self::FuzzyAttempted,
            Self::ExactAttempted | Self::FuzzyAttempted | Self::Done => Self::Done,
        }
    }
}
