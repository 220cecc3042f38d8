use crate::types::Span;

/// Words of context kept before a mention.
pub const WORDS_BEFORE: usize = 100;
/// Words of context kept after a mention.
pub const WORDS_AFTER: usize = 101;

/// Text surrounding a mention: up to [`WORDS_BEFORE`] whitespace-separated
/// words ending at `span.start` and up to [`WORDS_AFTER`] starting at
/// `span.end`.
///
/// The two halves are concatenated as-is, so the last word before the
/// mention runs straight into the first word after it.
pub fn context_window(text: &str, span: Span) -> String {
    let before: Vec<&str> = text[..span.start].split_whitespace().collect();
    let before = &before[before.len().saturating_sub(WORDS_BEFORE)..];
    let after: Vec<&str> = text[span.end..].split_whitespace().take(WORDS_AFTER).collect();

    before.join(" ") + &after.join(" ")
}
