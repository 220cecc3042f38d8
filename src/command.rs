//! Tagger backed by an external process.
//!
//! The process is started as `runtime_path model_path [args...]` for every
//! call. Token mode writes one token per line and expects exactly one
//! `word<TAB>LABEL` line back per token. Span mode writes the raw text and
//! expects one `entity<TAB>LABEL` line per entity found.

use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::thread;

use tracing::debug;

use crate::config::TaggerConfig;
use crate::error::{ConfigError, TagError};
use crate::tagger::{SpanTagger, TokenTagger};
use crate::types::{Entity, Label, Token};

pub struct CommandTagger {
    runtime: PathBuf,
    model: PathBuf,
    args: Vec<String>,
}

impl CommandTagger {
    pub fn new(runtime: impl Into<PathBuf>, model: impl Into<PathBuf>) -> Self {
        CommandTagger {
            runtime: runtime.into(),
            model: model.into(),
            args: Vec::new(),
        }
    }

    pub fn from_config(config: &TaggerConfig, which: &'static str) -> Result<Self, ConfigError> {
        let runtime = config
            .runtime_path
            .clone()
            .ok_or(ConfigError::MissingRuntime { which })?;
        let mut tagger = CommandTagger::new(runtime, &config.model_path);
        tagger.args = config.args.clone();
        Ok(tagger)
    }

    /// Feed `input` to a fresh process and collect its stdout.
    fn run(&self, input: String) -> Result<String, TagError> {
        let mut child = Command::new(&self.runtime)
            .arg(&self.model)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| TagError::Spawn {
                path: self.runtime.clone(),
                source,
            })?;

        // Write from another thread so a chatty child can't deadlock on a full pipe
        let mut stdin = child.stdin.take().ok_or_else(|| {
            TagError::Io(std::io::Error::other("child stdin was not captured"))
        })?;
        let writer = thread::spawn(move || stdin.write_all(input.as_bytes()));

        let output = child.wait_with_output()?;
        let written = writer
            .join()
            .unwrap_or_else(|_| Err(std::io::Error::other("stdin writer panicked")));

        if !output.status.success() {
            return Err(TagError::Exited {
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        // a tagger may exit successfully without reading all of its input
        match written {
            Err(e) if e.kind() != std::io::ErrorKind::BrokenPipe => return Err(e.into()),
            _ => {}
        }

        debug!(
            runtime = %self.runtime.display(),
            bytes = output.stdout.len(),
            "tagger process finished"
        );
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Split `text<TAB>LABEL` output into pairs, skipping blank lines.
fn parse_lines(stdout: &str) -> Result<Vec<(String, Label)>, TagError> {
    stdout
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| match line.rsplit_once('\t') {
            Some((text, label)) => Ok((text.to_string(), Label::parse(label))),
            None => Err(TagError::Malformed {
                line: i + 1,
                text: line.to_string(),
            }),
        })
        .collect()
}

impl TokenTagger for CommandTagger {
    fn tag(&self, tokens: &[String]) -> Result<Vec<Token>, TagError> {
        if tokens.is_empty() {
            return Ok(Vec::new());
        }
        let mut input = tokens.join("\n");
        input.push('\n');

        let pairs = parse_lines(&self.run(input)?)?;
        if pairs.len() != tokens.len() {
            return Err(TagError::Cardinality {
                expected: tokens.len(),
                got: pairs.len(),
            });
        }
        Ok(pairs
            .into_iter()
            .map(|(word, label)| Token { word, label })
            .collect())
    }
}

impl SpanTagger for CommandTagger {
    fn tag(&self, text: &str) -> Result<Vec<Entity>, TagError> {
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(parse_lines(&self.run(text.to_string())?)?
            .into_iter()
            .map(|(text, label)| Entity { text, label })
            .collect())
    }
}
