//! The full text → report pipeline.
//!
//! Every stage works against the filtered text: person spans, merged
//! names and context windows all index into that one string.

use mention_types::Report;
use tracing::debug;

use crate::count::count_occurrences;
use crate::error::{PipelineError, TagError};
use crate::merge::merge_full_names;
use crate::places::aggregate_places;
use crate::rank::format_report;
use crate::resolve::resolve_positions;
use crate::tagger::{SpanTagger, TokenTagger};
use crate::tokenize::{normalize_text, remove_stopwords, tokenize};

/// The text every span in a run is measured against.
pub fn filter_text(raw: &str, normalize: bool) -> String {
    if normalize {
        remove_stopwords(&normalize_text(raw))
    } else {
        remove_stopwords(raw)
    }
}

pub struct Pipeline<P, G> {
    person_tagger: P,
    place_tagger: G,
    normalize: bool,
}

impl<P: TokenTagger, G: SpanTagger> Pipeline<P, G> {
    pub fn new(person_tagger: P, place_tagger: G) -> Self {
        Pipeline {
            person_tagger,
            place_tagger,
            normalize: false,
        }
    }

    pub fn normalizing(mut self, normalize: bool) -> Self {
        self.normalize = normalize;
        self
    }

    pub fn run(&self, raw: &str) -> Result<Report, PipelineError> {
        let text = filter_text(raw, self.normalize);
        if text.is_empty() {
            debug!("nothing left after stopword removal");
            return Ok(Report::new());
        }

        let tokens = tokenize(&text);
        let tagged = self
            .person_tagger
            .tag(&tokens)
            .map_err(PipelineError::PersonTagger)?;
        if tagged.len() != tokens.len() {
            return Err(PipelineError::PersonTagger(TagError::Cardinality {
                expected: tokens.len(),
                got: tagged.len(),
            }));
        }

        let person_tokens = resolve_positions(&tagged, &text);
        let full_names = merge_full_names(person_tokens);
        let mut records = count_occurrences(&full_names);
        debug!(
            tokens = tokens.len(),
            mentions = full_names.len(),
            people = records.len(),
            "counted person mentions"
        );

        for record in &mut records {
            aggregate_places(record, &text, &self.place_tagger)
                .map_err(PipelineError::PlaceTagger)?;
        }

        Ok(format_report(&records))
    }
}
