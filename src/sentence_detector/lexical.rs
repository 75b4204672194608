// Lexical classifiers over a single token
// All checks are ASCII-only; anything else simply fails the predicate.

/// Closing bracket tokens, including the `-RBR-` placeholder of pre-tokenized corpora
pub const RIGHT_PARENS: &[&str] = &["}", ")", "-RBR-"];

/// Closing quote tokens recognised as a complete suffix
pub const RIGHT_QUOTES: &[&str] = &["'", "''", "'''", "\"", "'\""];

/// Prefixes that open a bracketed span
pub const LEFT_PAREN_PREFIXES: &[&str] = &["<", "[", "{", "(", "-LBR-"];

/// Prefixes that open a quotation
pub const LEFT_QUOTE_PREFIXES: &[&str] = &["`", "\"", "\"`"];

/// True when the first character is an ASCII uppercase letter
pub fn is_capitalized(word: &str) -> bool {
    word.as_bytes().first().is_some_and(u8::is_ascii_uppercase)
}

/// True when the word opens with any quote mark, straight or backtick
pub fn starts_with_quote(word: &str) -> bool {
    word.starts_with('\'') || word.starts_with('"') || word.starts_with('`')
}

pub fn starts_with_left_quote(word: &str) -> bool {
    LEFT_QUOTE_PREFIXES.iter().any(|quote| word.starts_with(quote))
}

pub fn starts_with_left_paren(word: &str) -> bool {
    LEFT_PAREN_PREFIXES.iter().any(|paren| word.starts_with(paren))
}

/// Exact match against a closing bracket token
pub fn is_right_paren(word: &str) -> bool {
    RIGHT_PARENS.contains(&word)
}

/// Exact match against a closing quote token
pub fn is_right_quote(word: &str) -> bool {
    RIGHT_QUOTES.contains(&word)
}

pub fn ends_in_quote(word: &str) -> bool {
    word.ends_with('\'') || word.ends_with('"')
}

/// Text after a mark that closes a bracket or quotation
pub fn is_right_end(suffix: &str) -> bool {
    is_right_paren(suffix) || is_right_quote(suffix)
}

/// Word that can open a new sentence after a closing bracket or quote
pub fn is_left_start(word: &str) -> bool {
    starts_with_left_quote(word) || starts_with_left_paren(word) || is_capitalized(word)
}

/// Prefix of a time-of-day abbreviation such as "p.m." or "A.M."
pub fn is_meridiem(prefix: &str) -> bool {
    prefix.eq_ignore_ascii_case("p.m") || prefix.eq_ignore_ascii_case("a.m")
}
