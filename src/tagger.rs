//! Tagging capabilities consumed by the pipeline.
//!
//! The pipeline never knows which tagging backend it talks to; it only
//! sees these two traits. Backends are built once from configuration and
//! injected.

use crate::command::CommandTagger;
use crate::config::{TaggerConfig, TaggerKind};
use crate::error::{ConfigError, TagError};
use crate::lexicon::LexiconTagger;
use crate::types::{Entity, Token};

/// Labels a sequence of tokens, one label per token, in order.
pub trait TokenTagger {
    fn tag(&self, tokens: &[String]) -> Result<Vec<Token>, TagError>;
}

/// Finds entities inside a span of text.
pub trait SpanTagger {
    fn tag(&self, text: &str) -> Result<Vec<Entity>, TagError>;
}

impl<T: TokenTagger + ?Sized> TokenTagger for Box<T> {
    fn tag(&self, tokens: &[String]) -> Result<Vec<Token>, TagError> {
        (**self).tag(tokens)
    }
}

impl<T: SpanTagger + ?Sized> SpanTagger for Box<T> {
    fn tag(&self, text: &str) -> Result<Vec<Entity>, TagError> {
        (**self).tag(text)
    }
}

/// Build the person tagger described by `config`.
pub fn person_tagger(config: &TaggerConfig) -> Result<Box<dyn TokenTagger>, ConfigError> {
    let tagger: Box<dyn TokenTagger> = match config.kind {
        TaggerKind::Lexicon => Box::new(LexiconTagger::load(&config.model_path)?),
        TaggerKind::Command => Box::new(CommandTagger::from_config(config, "person")?),
    };
    Ok(tagger)
}

/// Build the place tagger described by `config`.
pub fn place_tagger(config: &TaggerConfig) -> Result<Box<dyn SpanTagger>, ConfigError> {
    let tagger: Box<dyn SpanTagger> = match config.kind {
        TaggerKind::Lexicon => Box::new(LexiconTagger::load(&config.model_path)?),
        TaggerKind::Command => Box::new(CommandTagger::from_config(config, "place")?),
    };
    Ok(tagger)
}
