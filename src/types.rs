use std::collections::HashMap;
use std::fmt;

// ── Entity labels ──────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Label {
    /// PERSON
    Person,
    /// GPE – geo-political entity
    Place,
    /// Anything else a tagger emits (O, ORG, LOCATION, …)
    Other(String),
}

impl Label {
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "PERSON" => Self::Person,
            "GPE" => Self::Place,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Person => "PERSON",
            Self::Place => "GPE",
            Self::Other(s) => s,
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Tagger output ──────────────────────────────────────────────────

/// A word as labelled by the person tagger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub word: String,
    pub label: Label,
}

impl Token {
    pub fn new(word: impl Into<String>, label: Label) -> Self {
        Token {
            word: word.into(),
            label,
        }
    }
}

/// An entity found by the place tagger inside a text span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    pub text: String,
    pub label: Label,
}

// ── Span in the filtered text ──────────────────────────────────────

/// Half-open byte range into the filtered text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start < end, "empty span {start}..{end}");
        Span { start, end }
    }

    /// Number of bytes between the end of `self` and the start of `next`,
    /// or None if `next` starts before `self` ends.
    pub fn gap_to(&self, next: &Span) -> Option<usize> {
        next.start.checked_sub(self.end)
    }
}

// ── Mentions ───────────────────────────────────────────────────────

/// One occurrence of a name: a single tagged token, or a merged full name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mention {
    pub name: String,
    pub position: Span,
}

// ── Place tally ────────────────────────────────────────────────────

/// Place → count, remembering the order places were first seen in so that
/// equal counts always come out in the same order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaceTally {
    index: HashMap<String, usize>,
    entries: Vec<(String, usize)>,
}

impl PlaceTally {
    pub fn increment(&mut self, place: &str) {
        match self.index.get(place) {
            Some(&i) => self.entries[i].1 += 1,
            None => {
                self.index.insert(place.to_string(), self.entries.len());
                self.entries.push((place.to_string(), 1));
            }
        }
    }

    /// Entries in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries.iter().map(|(p, c)| (p.as_str(), *c))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
impl PlaceTally {
    pub fn get(&self, place: &str) -> Option<usize> {
        self.index.get(place).map(|&i| self.entries[i].1)
    }
}

// ── Aggregated person ──────────────────────────────────────────────

/// Everything known about one distinct full-name string in a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonRecord {
    pub name: String,
    pub count: usize,
    /// Every span this name occupies, in document order
    pub positions: Vec<Span>,
    pub associated_places: PlaceTally,
}

impl PersonRecord {
    pub fn new(name: impl Into<String>) -> Self {
        PersonRecord {
            name: name.into(),
            count: 0,
            positions: Vec::new(),
            associated_places: PlaceTally::default(),
        }
    }

    pub fn record(&mut self, span: Span) {
        self.count += 1;
        self.positions.push(span);
    }
}
