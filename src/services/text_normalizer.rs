use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("WHITESPACE_REGEX is a valid regex pattern"));

static NON_ANSWER_CHARS_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[^\w\s-]").expect("NON_ANSWER_CHARS_REGEX is a valid regex pattern")
});

fn is_enclosing_quote(c: char) -> bool {
    matches!(c, '"' | '\u{201C}' | '\u{201D}')
}

/// Strip formatting noise from free text: backslashes, enclosing quotes and
/// redundant whitespace.
///
/// Idempotent: `normalize(&normalize(x)) == normalize(x)`.
pub fn normalize(text: &str) -> String {
    let unescaped = text.replace('\\', "");
    let collapsed = WHITESPACE_REGEX.replace_all(&unescaped, " ");
    collapsed
        .trim_matches(|c: char| is_enclosing_quote(c) || c.is_whitespace())
        .to_string()
}

/// Canonical form used to compare answers: punctuation other than hyphens
/// removed, whitespace collapsed, lowercased.
pub fn normalize_answer(text: &str) -> String {
    let stripped = NON_ANSWER_CHARS_REGEX.replace_all(text, "");
    WHITESPACE_REGEX
        .replace_all(&stripped, " ")
        .trim()
        .to_lowercase()
}
