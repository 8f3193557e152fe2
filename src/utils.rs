//! Text helpers applied before extraction.

/// Strip control characters, keeping newlines and tabs
///
/// Carriage returns are dropped, so CRLF mail bodies read the same as LF ones.
pub fn sanitize_user_input(input: &str) -> String {
    input
        .chars()
        .filter(|&c| !c.is_control() || c == '\n' || c == '\t')
        .collect::<String>()
}

/// True when the text has nothing but whitespace in it
pub fn is_blank(input: &str) -> bool {
    input.trim().is_empty()
}
