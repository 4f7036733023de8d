//! Escaping of arbitrary text for safe embedding in queries.

/// Characters the lexer treats as syntax outside of an escape sequence.
pub const SYNTAX_CHARS: &[char] = &['\\', '"', '~'];

/// Returns true if `ch` has syntactic meaning in the query language.
pub fn is_syntax_char(ch: char) -> bool {
    SYNTAX_CHARS.contains(&ch)
}

/// Escapes `text` so that every character is read as a literal.
///
/// Each syntax character gets a backslash prefix, so the result always lexes
/// as plain terms. Whitespace is preserved as-is, which means the escaped
/// text can be wrapped in quotes to form a phrase or split on whitespace to
/// form individual terms.
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len() + 8);
    for ch in text.chars() {
        if is_syntax_char(ch) {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}
