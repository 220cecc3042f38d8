use std::collections::HashMap;

use crate::types::{Mention, PersonRecord};

/// Group full-name mentions by exact name and count them.
///
/// Sorted by count descending; equal counts keep the order in which the
/// names were first encountered.
pub fn count_occurrences(mentions: &[Mention]) -> Vec<PersonRecord> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut records: Vec<PersonRecord> = Vec::new();

    for mention in mentions {
        let i = *index.entry(mention.name.as_str()).or_insert_with(|| {
            records.push(PersonRecord::new(mention.name.as_str()));
            records.len() - 1
        });
        records[i].record(mention.position);
    }

    // stable: ties stay in first-encounter order
    records.sort_by(|a, b| b.count.cmp(&a.count));
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Span;

    fn m(name: &str, start: usize) -> Mention {
        Mention {
            name: name.into(),
            position: Span::new(start, start + name.len()),
        }
    }

    #[test]
    fn counts_and_positions() {
        let mentions = vec![m("Ada", 0), m("Bo", 10), m("Ada", 20)];
        let records = count_occurrences(&mentions);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "Ada");
        assert_eq!(records[0].count, 2);
        assert_eq!(records[0].positions, vec![Span::new(0, 3), Span::new(20, 23)]);
        assert_eq!(records[1].name, "Bo");
        assert_eq!(records[1].count, 1);
    }

    #[test]
    fn higher_count_first() {
        let mentions = vec![m("Bo", 0), m("Ada", 5), m("Ada", 10), m("Ada", 15)];
        let names: Vec<String> = count_occurrences(&mentions)
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(names, vec!["Ada", "Bo"]);
    }

    #[test]
    fn ties_keep_first_encounter_order() {
        let mentions = vec![m("Cy", 0), m("Ada", 5), m("Bo", 10), m("Ada", 15), m("Cy", 20)];
        let names: Vec<String> = count_occurrences(&mentions)
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(names, vec!["Cy", "Ada", "Bo"]);
    }

    #[test]
    fn case_sensitive_names_are_distinct() {
        let records = count_occurrences(&[m("ada", 0), m("Ada", 5)]);
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn count_is_conserved() {
        let mentions = vec![m("A", 0), m("B", 2), m("A", 4), m("C", 6), m("B", 8)];
        let total: usize = count_occurrences(&mentions).iter().map(|r| r.count).sum();
        assert_eq!(total, mentions.len());
    }
}
