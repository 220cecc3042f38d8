use tracing::trace;

use crate::error::TagError;
use crate::tagger::SpanTagger;
use crate::types::{Label, PersonRecord};
use crate::window::context_window;

/// Tally the places found around every mention of `record`.
///
/// Windows are tagged in document order and counts accumulate across all
/// of the person's mentions.
pub fn aggregate_places<T: SpanTagger + ?Sized>(
    record: &mut PersonRecord,
    text: &str,
    tagger: &T,
) -> Result<(), TagError> {
    for &span in &record.positions {
        let window = context_window(text, span);
        for entity in tagger.tag(&window)? {
            if entity.label == Label::Place {
                record.associated_places.increment(&entity.text);
            }
        }
    }
    trace!(
        person = %record.name,
        places = record.associated_places.len(),
        "aggregated places"
    );
    Ok(())
}
