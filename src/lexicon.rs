use std::collections::HashSet;
use std::path::Path;

use regex::Regex;
use tracing::debug;

use crate::error::{ConfigError, TagError};
use crate::tagger::{SpanTagger, TokenTagger};
use crate::types::{Entity, Label, Token};

/// Label given to tokens the lexicon knows nothing about.
const OUTSIDE: &str = "O";

/// Gazetteer tagger backed by a `LABEL<TAB>entry` file.
///
/// ```text
/// # people
/// PERSON	Angela Merkel
/// PERSON	Macron
/// # places
/// GPE	Berlin
/// GPE	New York
/// ```
///
/// Person entries are split into words and matched per token. Place
/// entries are matched as whole phrases inside a text span.
pub struct LexiconTagger {
    person_words: HashSet<String>,
    place_words: HashSet<String>,
    /// Every place entry, longest first. None when there are no places.
    place_re: Option<Regex>,
}

impl LexiconTagger {
    pub fn new<P, G>(people: P, places: G) -> Result<Self, regex::Error>
    where
        P: IntoIterator,
        P::Item: AsRef<str>,
        G: IntoIterator,
        G::Item: AsRef<str>,
    {
        let person_words = people
            .into_iter()
            .flat_map(|p| {
                p.as_ref()
                    .split_whitespace()
                    .map(str::to_string)
                    .collect::<Vec<_>>()
            })
            .collect();

        let mut place_list: Vec<String> = places
            .into_iter()
            .map(|g| g.as_ref().trim().to_string())
            .filter(|g| !g.is_empty())
            .collect();
        let place_words = place_list.iter().cloned().collect();

        // Longest first so "New York City" wins over "New York"
        place_list.sort_by_key(|b| std::cmp::Reverse(b.chars().count()));
        place_list.dedup();
        let place_re = if place_list.is_empty() {
            None
        } else {
            let alts: Vec<String> = place_list.iter().map(|p| bounded(p)).collect();
            Some(Regex::new(&format!("(?:{})", alts.join("|")))?)
        };

        Ok(LexiconTagger {
            person_words,
            place_words,
            place_re,
        })
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let mut people = Vec::new();
        let mut places = Vec::new();
        for (i, line) in raw.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let (label, entry) = match line.split_once('\t') {
                Some((l, e)) if !e.trim().is_empty() => (l, e.trim()),
                _ => {
                    return Err(ConfigError::Lexicon {
                        path: path.to_path_buf(),
                        line: i + 1,
                        text: line.to_string(),
                    });
                }
            };
            match Label::parse(label) {
                Label::Person => people.push(entry.to_string()),
                Label::Place => places.push(entry.to_string()),
                Label::Other(other) => debug!(label = %other, entry, "ignoring lexicon entry"),
            }
        }

        debug!(
            path = %path.display(),
            people = people.len(),
            places = places.len(),
            "loaded lexicon"
        );
        Ok(Self::new(people, places)?)
    }
}

/// Escape a phrase and anchor it on word boundaries where it starts or
/// ends with a word character.
fn bounded(phrase: &str) -> String {
    let is_word = |c: char| c.is_alphanumeric() || c == '_';
    let lead = if phrase.starts_with(is_word) { r"\b" } else { "" };
    let tail = if phrase.ends_with(is_word) { r"\b" } else { "" };
    format!("{lead}{}{tail}", regex::escape(phrase))
}

impl TokenTagger for LexiconTagger {
    fn tag(&self, tokens: &[String]) -> Result<Vec<Token>, TagError> {
        Ok(tokens
            .iter()
            .map(|w| {
                let label = if self.person_words.contains(w) {
                    Label::Person
                } else if self.place_words.contains(w) {
                    Label::Place
                } else {
                    Label::Other(OUTSIDE.to_string())
                };
                Token::new(w.as_str(), label)
            })
            .collect())
    }
}

impl SpanTagger for LexiconTagger {
    fn tag(&self, text: &str) -> Result<Vec<Entity>, TagError> {
        let Some(re) = &self.place_re else {
            return Ok(Vec::new());
        };
        Ok(re
            .find_iter(text)
            .map(|m| Entity {
                text: m.as_str().to_string(),
                label: Label::Place,
            })
            .collect())
    }
}
