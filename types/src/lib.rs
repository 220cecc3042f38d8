use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// ── Place co-occurrence ──────────────────────────────────────────────────

/// A place name seen near a person, with how many of that person's
/// context windows mentioned it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceCount {
    pub name: String,
    pub count: usize,
}

// ── Person entry ─────────────────────────────────────────────────────────

/// One distinct full name in the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonEntry {
    pub name: String,
    pub count: usize,
    /// Sorted by count descending.
    pub associated_places: Vec<PlaceCount>,
}

/// People ordered by mention count descending.
pub type Report = Vec<PersonEntry>;

// ── Response envelope ────────────────────────────────────────────────────

/// `{url, ...metadata, people}` as handed back to whoever asked for the page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageReport {
    pub url: String,
    /// Passthrough metadata, flattened next to `url`.
    #[serde(flatten)]
    pub metadata: BTreeMap<String, String>,
    pub people: Report,
}

impl PageReport {
    pub fn new(url: impl Into<String>, people: Report) -> Self {
        PageReport {
            url: url.into(),
            metadata: BTreeMap::new(),
            people,
        }
    }

    pub fn with_metadata(mut self, metadata: impl IntoIterator<Item = (String, String)>) -> Self {
        // `url` and `people` are owned by the envelope itself
        self.metadata.extend(
            metadata
                .into_iter()
                .filter(|(k, _)| k != "url" && k != "people"),
        );
        self
    }

    /// Total mentions across every person.
    pub fn total_mentions(&self) -> usize {
        self.people.iter().map(|p| p.count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metadata_is_flattened_next_to_url() {
        let report = PageReport::new(
            "https://example.com/a",
            vec![PersonEntry {
                name: "Ada Lovelace".into(),
                count: 2,
                associated_places: vec![PlaceCount {
                    name: "London".into(),
                    count: 2,
                }],
            }],
        )
        .with_metadata([("source".to_string(), "crawl-7".to_string())]);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["url"], "https://example.com/a");
        assert_eq!(json["source"], "crawl-7");
        assert_eq!(json["people"][0]["name"], "Ada Lovelace");
        assert_eq!(json["people"][0]["associated_places"][0]["count"], 2);
    }

    #[test]
    fn reserved_keys_are_not_overwritten() {
        let report = PageReport::new("u", Vec::new()).with_metadata([
            ("url".to_string(), "other".to_string()),
            ("people".to_string(), "x".to_string()),
        ]);
        assert!(report.metadata.is_empty());
        assert_eq!(report.total_mentions(), 0);
    }
}
