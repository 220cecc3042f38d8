use tracing::warn;

use crate::types::{Label, Mention, Span, Token};

/// Locate every PERSON token inside the filtered text.
///
/// Searches forward from a cursor that only ever advances, so repeated
/// words ("John" ... "John") map to successive occurrences instead of all
/// landing on the first one. A token that can't be found from the cursor
/// onward is skipped and the cursor stays put.
pub fn resolve_positions(tokens: &[Token], text: &str) -> Vec<Mention> {
    let mut mentions = Vec::new();
    let mut cursor = 0;

    for token in tokens {
        if token.label != Label::Person || token.word.is_empty() {
            continue;
        }

        let found = text
            .get(cursor..)
            .and_then(|rest| rest.find(token.word.as_str()));
        let start = match found {
            Some(offset) => cursor + offset,
            None => {
                warn!(word = %token.word, cursor, "person token not found after cursor, skipping");
                continue;
            }
        };
        let end = start + token.word.len();

        mentions.push(Mention {
            name: token.word.clone(),
            position: Span::new(start, end),
        });
        cursor = end;
    }

    mentions
}
