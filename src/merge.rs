use crate::types::{Mention, Span};

/// Coalesce person tokens separated by exactly one byte (a single space)
/// into full names.
///
/// Only offsets are consulted: two different people whose names end up one
/// space apart are merged into one name.
pub fn merge_full_names(mentions: Vec<Mention>) -> Vec<Mention> {
    let mut merged: Vec<Mention> = Vec::new();
    let mut current: Option<Mention> = None;

    for next in mentions {
        current = Some(match current.take() {
            Some(mut cur) if cur.position.gap_to(&next.position) == Some(1) => {
                cur.name.push(' ');
                cur.name.push_str(&next.name);
                cur.position = Span::new(cur.position.start, next.position.end);
                cur
            }
            Some(cur) => {
                merged.push(cur);
                next
            }
            None => next,
        });
    }
    merged.extend(current);

    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m(name: &str, start: usize, end: usize) -> Mention {
        Mention {
            name: name.into(),
            position: Span::new(start, end),
        }
    }

    #[test]
    fn adjacent_tokens_merge() {
        let merged = merge_full_names(vec![m("John", 0, 4), m("Smith", 5, 10)]);
        assert_eq!(merged, vec![m("John Smith", 0, 10)]);
    }

    #[test]
    fn three_part_name() {
        let merged = merge_full_names(vec![
            m("Martin", 3, 9),
            m("Luther", 10, 16),
            m("King", 17, 21),
        ]);
        assert_eq!(merged, vec![m("Martin Luther King", 3, 21)]);
    }

    #[test]
    fn gap_of_zero_or_two_never_merges() {
        let merged = merge_full_names(vec![m("Ann", 0, 3), m("Lee", 3, 6)]);
        assert_eq!(merged.len(), 2);

        let merged = merge_full_names(vec![m("Ann", 0, 3), m("Lee", 5, 8)]);
        assert_eq!(merged, vec![m("Ann", 0, 3), m("Lee", 5, 8)]);
    }

    #[test]
    fn separate_people_stay_separate() {
        // "John Smith visited Paris . John Smith"
        let merged = merge_full_names(vec![
            m("John", 0, 4),
            m("Smith", 5, 10),
            m("John", 27, 31),
            m("Smith", 32, 37),
        ]);
        assert_eq!(
            merged,
            vec![m("John Smith", 0, 10), m("John Smith", 27, 37)]
        );
    }

    #[test]
    fn unrelated_names_one_space_apart_merge() {
        // "Alice Bob" where both are separate people still becomes one name
        let merged = merge_full_names(vec![m("Alice", 0, 5), m("Bob", 6, 9)]);
        assert_eq!(merged, vec![m("Alice Bob", 0, 9)]);
    }

    #[test]
    fn empty_input() {
        assert!(merge_full_names(Vec::new()).is_empty());
    }
}
