//! Query compiler.
//!
//! Lowers a query AST into Tantivy queries over the `name` field. Phrases are
//! anchored to the end of the name: `"new york"` matches "City of New York"
//! but not "New York Heights".

use locus_config::MAX_FUZZY_DISTANCE;
use locus_query::QueryExpr;
use tantivy::{
    Term,
    query::{BooleanQuery, EmptyQuery, FuzzyTermQuery, Occur, PhraseQuery, Query, TermQuery},
    schema::IndexRecordOption,
    tokenizer::TextAnalyzer,
};

use crate::{
    analyzer::{NAME_END_MARKER, analyze, is_indexable},
    schema::IndexSchema,
};

/// Compiles query AST nodes into Tantivy queries.
#[derive(Clone)]
pub struct QueryCompiler {
    /// Index schema for field references.
    schema: IndexSchema,
    /// Analyzer matching the one names were indexed with.
    analyzer: TextAnalyzer,
    /// Edit distance for fuzzy terms that don't give one.
    fuzzy_distance: u8,
    /// Whether a transposition costs one edit.
    transpositions: bool,
}

impl QueryCompiler {
    /// Creates a new query compiler.
    pub fn new(
        schema: IndexSchema,
        analyzer: TextAnalyzer,
        fuzzy_distance: u8,
        transpositions: bool,
    ) -> Self {
        Self {
            schema,
            analyzer,
            fuzzy_distance: fuzzy_distance.min(MAX_FUZZY_DISTANCE),
            transpositions,
        }
    }

    /// Compiles a query expression into a Tantivy query.
    ///
    /// Returns `None` when nothing in the expression survives analysis, for
    /// example a phrase made only of punctuation. Text with a token too long
    /// to be indexed compiles to a query that matches nothing.
    pub fn compile(&mut self, expr: &QueryExpr) -> Option<Box<dyn Query>> {
        match expr {
            QueryExpr::Term(text) => self.compile_name_term(text),
            QueryExpr::Phrase(words) => self.compile_name_phrase(words),
            QueryExpr::Fuzzy { term, distance } => self.compile_fuzzy(term, *distance),
            QueryExpr::And(exprs) => self.compile_and(exprs),
        }
    }

    /// A bare term matches anywhere in a name. Terms the analyzer splits are
    /// matched as an unanchored phrase.
    fn compile_name_term(&mut self, text: &str) -> Option<Box<dyn Query>> {
        let Some(tokens) = self.analyze(text) else {
            return Some(Box::new(EmptyQuery));
        };
        match tokens.as_slice() {
            [] => None,
            [single] => Some(Box::new(TermQuery::new(
                Term::from_field_text(self.schema.name, single),
                IndexRecordOption::WithFreqs,
            ))),
            _ => Some(Box::new(PhraseQuery::new(self.name_terms(&tokens)))),
        }
    }

    /// A phrase must match the final tokens of a name.
    fn compile_name_phrase(&mut self, words: &[String]) -> Option<Box<dyn Query>> {
        let Some(mut tokens) = self.analyze(&words.join(" ")) else {
            return Some(Box::new(EmptyQuery));
        };
        if tokens.is_empty() {
            return None;
        }
        tokens.push(NAME_END_MARKER.to_string());
        Some(Box::new(PhraseQuery::new(self.name_terms(&tokens))))
    }

    /// Every analyzed token of a fuzzy term must match within the distance.
    fn compile_fuzzy(&mut self, term: &str, distance: Option<u8>) -> Option<Box<dyn Query>> {
        let distance = distance
            .unwrap_or(self.fuzzy_distance)
            .min(MAX_FUZZY_DISTANCE);
        let Some(tokens) = self.analyze(term) else {
            return Some(Box::new(EmptyQuery));
        };
        let mut clauses: Vec<(Occur, Box<dyn Query>)> = tokens
            .iter()
            .map(|token| {
                let term = Term::from_field_text(self.schema.name, token);
                let query: Box<dyn Query> =
                    Box::new(FuzzyTermQuery::new(term, distance, self.transpositions));
                (Occur::Must, query)
            })
            .collect();

        match clauses.len() {
            0 => None,
            1 => clauses.pop().map(|(_, q)| q),
            _ => Some(Box::new(BooleanQuery::new(clauses))),
        }
    }

    /// Compiles a conjunction; members with nothing to search are skipped.
    fn compile_and(&mut self, exprs: &[QueryExpr]) -> Option<Box<dyn Query>> {
        let mut clauses: Vec<(Occur, Box<dyn Query>)> = exprs
            .iter()
            .filter_map(|expr| self.compile(expr))
            .map(|q| (Occur::Must, q))
            .collect();

        match clauses.len() {
            0 => None,
            1 => clauses.pop().map(|(_, q)| q),
            _ => Some(Box::new(BooleanQuery::new(clauses))),
        }
    }

    /// Analyzes `text`. Returns `None` when a token could never have been
    /// indexed, so the text cannot match.
    fn analyze(&mut self, text: &str) -> Option<Vec<String>> {
        let tokens = analyze(&mut self.analyzer, text);
        tokens.iter().all(|t| is_indexable(t)).then_some(tokens)
    }

    /// Builds `name` field terms from analyzed tokens.
    fn name_terms(&self, tokens: &[String]) -> Vec<Term> {
        tokens
            .iter()
            .map(|t| Term::from_field_text(self.schema.name, t))
            .collect()
    }
}
