//! Word tokenization and stopword filtering.
//!
//! The filtered text produced here is the coordinate system for every span
//! computed further down the pipeline.

use std::sync::LazyLock;

use regex::Regex;

use crate::stopwords::is_stopword;

/// Words (with inner hyphens/apostrophes), a detached possessive, or a
/// single punctuation mark.
static WORD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\w+(?:[-'’]\w+)*|['’]s\b|[^\w\s]").expect("word regex")
});

static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace regex"));

/// Split text into word and punctuation tokens.
///
/// A trailing possessive is split off into its own token
/// ("Smith's" → "Smith", "'s") so that names tag cleanly.
pub fn tokenize(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    for m in WORD_RE.find_iter(text) {
        let word = m.as_str();
        match word
            .strip_suffix("'s")
            .or_else(|| word.strip_suffix("’s"))
        {
            Some(stem) if !stem.is_empty() => {
                tokens.push(stem.to_string());
                tokens.push(word[stem.len()..].to_string());
            }
            _ => tokens.push(word.to_string()),
        }
    }
    tokens
}

/// Drop stopwords and rejoin the remaining tokens with single spaces.
pub fn remove_stopwords(text: &str) -> String {
    tokenize(text)
        .into_iter()
        .filter(|w| !is_stopword(w))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Clean up scraped page text before filtering.
///
/// Drops non-ASCII characters, turns possessive `'s` into a space and
/// collapses whitespace runs (including CRLF) into single spaces.
pub fn normalize_text(raw: &str) -> String {
    let ascii: String = raw.chars().filter(|c| c.is_ascii()).collect();
    let ascii = ascii.replace("\r\n", " ").replace("'s", " ");
    WHITESPACE_RE.replace_all(&ascii, " ").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn punctuation_is_its_own_token() {
        assert_eq!(
            tokenize("John Smith visited Paris."),
            vec!["John", "Smith", "visited", "Paris", "."]
        );
    }

    #[test]
    fn keeps_hyphenated_and_contracted_words() {
        assert_eq!(
            tokenize("Jean-Luc didn't go"),
            vec!["Jean-Luc", "didn't", "go"]
        );
    }

    #[test]
    fn splits_possessive() {
        assert_eq!(tokenize("Smith's house"), vec!["Smith", "'s", "house"]);
    }

    #[test]
    fn filters_stopwords_case_insensitively() {
        assert_eq!(
            remove_stopwords("The President of France met Angela Merkel in Berlin."),
            "President France met Angela Merkel Berlin ."
        );
    }

    #[test]
    fn all_stopwords_gives_empty_text() {
        assert_eq!(remove_stopwords("and the of it was"), "");
        assert_eq!(remove_stopwords(""), "");
    }

    #[test]
    fn filtered_text_retokenizes_to_same_tokens() {
        let filtered = remove_stopwords("Marie Curie's lab in Paris, France, was famous.");
        let tokens = tokenize(&filtered);
        assert_eq!(tokens.join(" "), filtered);
    }

    #[test]
    fn normalize_strips_non_ascii_and_collapses_whitespace() {
        assert_eq!(
            normalize_text("Caf\u{e9}  owner\r\nBob's\t\tshop"),
            "Caf owner Bob shop"
        );
    }
}
