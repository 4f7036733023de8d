//! Text analysis for place names.
//!
//! The `locus_name` pipeline:
//! 1. `SimpleTokenizer` - splits on whitespace and punctuation
//! 2. `LowerCaser`
//! 3. `AsciiFoldingFilter` - folds diacritics, so "Zürich" matches "zurich"
//!
//! No stemming: "Springs" and "Spring" are different places. No token is
//! dropped by the pipeline itself; tokens longer than [`MAX_TOKEN_LENGTH`] are
//! left out of the index but keep their position, and queries containing one
//! match nothing.
//!
//! Names are indexed pre-tokenized, with [`NAME_END_MARKER`] appended after the
//! last analyzed token. Phrase queries end with the same marker, which anchors
//! them to the end of a name.

use tantivy::tokenizer::{
    AsciiFoldingFilter, LowerCaser, PreTokenizedString, SimpleTokenizer, TextAnalyzer, Token,
    TokenStream,
};

/// Name of the custom tokenizer registered with Tantivy.
pub const LOCUS_TOKENIZER: &str = "locus_name";

/// Token closing every indexed name.
///
/// The analyzer only emits alphanumeric tokens, and this marker is more than
/// two edits away from any of them, so neither exact nor fuzzy terms reach it.
pub const NAME_END_MARKER: &str = "$$name_end$$";

/// Longest token, in bytes, that is written to the index.
pub const MAX_TOKEN_LENGTH: usize = 255;

/// Builds the place-name analyzer.
pub fn build_analyzer() -> TextAnalyzer {
    TextAnalyzer::builder(SimpleTokenizer::default())
        .filter(LowerCaser)
        .filter(AsciiFoldingFilter)
        .build()
}

/// Runs `text` through the analyzer and returns the token texts.
pub fn analyze(analyzer: &mut TextAnalyzer, text: &str) -> Vec<String> {
    let mut stream = analyzer.token_stream(text);
    let mut tokens = Vec::new();
    while stream.advance() {
        tokens.push(stream.token().text.clone());
    }
    tokens
}

/// Returns true if `token` fits in the index.
pub fn is_indexable(token: &str) -> bool {
    token.len() <= MAX_TOKEN_LENGTH
}

/// Tokenizes a name for indexing, appending the end marker.
///
/// Tokens that are not [indexable](is_indexable) are skipped without closing
/// the gap, so no phrase can match across them.
pub fn tokenize_name(analyzer: &mut TextAnalyzer, name: &str) -> PreTokenizedString {
    let mut tokens: Vec<Token> = Vec::new();
    let mut end_position = 0;
    {
        let mut stream = analyzer.token_stream(name);
        while stream.advance() {
            let token = stream.token();
            end_position = token.position + 1;
            if is_indexable(&token.text) {
                tokens.push(token.clone());
            }
        }
    }

    tokens.push(Token {
        offset_from: name.len(),
        offset_to: name.len(),
        position: end_position,
        text: NAME_END_MARKER.to_string(),
        position_length: 1,
    });

    PreTokenizedString {
        text: name.to_string(),
        tokens,
    }
}
