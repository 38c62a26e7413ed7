use snafu::Snafu;

/// A parse failure, rendered as the input line followed by a caret
/// pointing at the offending span and a short explanation.
#[derive(Debug, Snafu, Clone, PartialEq, Eq)]
#[snafu(display("{}", render(input, *start, *end, message)))]
pub struct ParseError {
    pub(crate) input: String,
    pub(crate) start: usize,
    pub(crate) end: usize,
    pub(crate) message: String,
}

impl ParseError {
    pub(crate) fn new(input: &str, start: usize, end: usize, message: impl Into<String>) -> Self {
        ParseError {
            input: input.to_string(),
            start,
            end: end.max(start + 1),
            message: message.into(),
        }
    }
}

fn render(input: &str, start: usize, end: usize, message: &str) -> String {
    let caret_len = end.saturating_sub(start).max(1);
    let mut caret_line = " ".repeat(start);
    caret_line.push_str(&"^".repeat(caret_len));
    format!("{input}\n{caret_line} {message}")
}
