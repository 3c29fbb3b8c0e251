//! Small string helpers used by the request parser.

/// Characters stripped by [`trim`]: space, tab, newline, carriage return,
/// form feed and vertical tab.
const WHITESPACE: &[char] = &[' ', '\t', '\n', '\r', '\x0c', '\x0b'];

pub fn trim(s: &str) -> &str {
    s.trim_matches(WHITESPACE)
}

/// Splits `src` on every `delim`.
///
/// Behaves like reading delimited records from a stream: a trailing delimiter
/// does not produce a final empty piece, but empty pieces in the middle are kept.
pub fn split(src: &str, delim: char) -> Vec<&str> {
    let mut pieces: Vec<&str> = src.split(delim).collect();
    if pieces.last().is_some_and(|last| last.is_empty()) {
        pieces.pop();
    }
    pieces
}

/// Splits on the first `delim` only. The remainder keeps any later delimiters.
pub fn split_first(src: &str, delim: char) -> Option<(&str, &str)> {
    src.split_once(delim)
}

/// Returns the last `n` characters of `s`, or all of `s` when it is shorter.
pub fn tail_chars(s: &str, n: usize) -> &str {
    match s.char_indices().rev().nth(n.saturating_sub(1)) {
        Some((idx, _)) if n > 0 => &s[idx..],
        Some(_) => "",
        None => s,
    }
}
