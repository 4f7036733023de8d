//! Query abstract syntax tree.
//!
//! Represents parsed query expressions before compilation to search engine queries.

/// A parsed query expression.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryExpr {
    /// A single search term.
    Term(String),

    /// An exact phrase (sequence of words). Empty for `""`.
    Phrase(Vec<String>),

    /// A term matched by edit distance.
    Fuzzy {
        /// The term to approximate.
        term: String,
        /// Explicit maximum edit distance; the compiler default applies when absent.
        distance: Option<u8>,
    },

    /// Conjunction: all sub-expressions must match.
    And(Vec<Self>),
}

impl QueryExpr {
    /// Creates an And expression, flattening nested Ands.
    pub fn and(exprs: Vec<Self>) -> Self {
        let mut flattened: Vec<Self> = exprs
            .into_iter()
            .flat_map(|e| match e {
                Self::And(inner) => inner,
                other => vec![other],
            })
            .collect();

        match flattened.len() {
            1 => flattened.remove(0),
            _ => Self::And(flattened),
        }
    }

    /// Creates a fuzzy term expression.
    pub fn fuzzy(term: impl Into<String>, distance: Option<u8>) -> Self {
        Self::Fuzzy {
            term: term.into(),
            distance,
        }
    }

    /// Returns true if any fuzzy term appears in the expression.
    pub fn is_fuzzy(&self) -> bool {
        match self {
            Self::Fuzzy { .. } => true,
            Self::Term(_) | Self::Phrase(_) => false,
            Self::And(exprs) => exprs.iter().any(Self::is_fuzzy),
        }
    }
}
