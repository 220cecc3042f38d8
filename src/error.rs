use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

/// Anything that goes wrong inside a tagger.
#[derive(Debug, Error)]
pub enum TagError {
    #[error("cannot start tagger runtime {path}: {source}")]
    Spawn {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("tagger exited with {status}: {stderr}")]
    Exited { status: ExitStatus, stderr: String },

    #[error("tagger returned {got} labels for {expected} tokens")]
    Cardinality { expected: usize, got: usize },

    #[error("malformed tagger output on line {line}: {text:?}")]
    Malformed { line: usize, text: String },

    #[error("tagger I/O: {0}")]
    Io(#[from] io::Error),
}

/// Problems loading configuration or tagger models at start-up.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("{which} tagger is a command tagger but has no runtime_path")]
    MissingRuntime { which: &'static str },

    #[error("lexicon {path} line {line}: expected LABEL<TAB>entry, got {text:?}")]
    Lexicon {
        path: PathBuf,
        line: usize,
        text: String,
    },

    #[error("cannot build place pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Failure of a whole pipeline run. Only tagging can fail; everything else
/// is a pure transformation.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("person tagging failed: {0}")]
    PersonTagger(#[source] TagError),

    #[error("place tagging failed: {0}")]
    PlaceTagger(#[source] TagError),
}
