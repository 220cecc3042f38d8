use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigError;

/// Environment variable consulted when no `--config` flag is given.
pub const CONFIG_ENV: &str = "MENTION_REPORT_CONFIG";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaggerKind {
    /// In-process lookup over a `LABEL<TAB>entry` file
    Lexicon,
    /// External process speaking a line protocol over stdin/stdout
    Command,
}

/// Where a tagger's model lives and what runs it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TaggerConfig {
    pub kind: TaggerKind,
    pub model_path: PathBuf,
    #[serde(default)]
    pub runtime_path: Option<PathBuf>,
    /// Extra arguments passed after `model_path`
    #[serde(default)]
    pub args: Vec<String>,
}

impl TaggerConfig {
    pub fn lexicon(model_path: impl Into<PathBuf>) -> Self {
        TaggerConfig {
            kind: TaggerKind::Lexicon,
            model_path: model_path.into(),
            runtime_path: None,
            args: Vec::new(),
        }
    }
}

/// Process-wide settings, read once at start-up and then only borrowed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Config {
    pub person_tagger: TaggerConfig,
    pub place_tagger: TaggerConfig,
    /// Run the raw text through `normalize_text` before filtering
    #[serde(default)]
    pub normalize: bool,
}

impl Config {
    /// Both taggers backed by the same lexicon file.
    pub fn from_lexicon(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Config {
            person_tagger: TaggerConfig::lexicon(path.clone()),
            place_tagger: TaggerConfig::lexicon(path),
            normalize: false,
        }
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::parse(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    fn parse(raw: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(raw)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for (which, tagger) in [("person", &self.person_tagger), ("place", &self.place_tagger)] {
            if tagger.kind == TaggerKind::Command && tagger.runtime_path.is_none() {
                return Err(ConfigError::MissingRuntime { which });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parses_mixed_taggers() {
        let yaml = "\
person_tagger:
  kind: lexicon
  model_path: names.tsv
place_tagger:
  kind: command
  model_path: places.py
  runtime_path: /usr/bin/python3
  args: [--gpe-only]
normalize: true
";
        let config = Config::parse(yaml).unwrap();
        assert_eq!(config.person_tagger, TaggerConfig::lexicon("names.tsv"));
        assert_eq!(config.place_tagger.kind, TaggerKind::Command);
        assert_eq!(
            config.place_tagger.runtime_path.as_deref(),
            Some(Path::new("/usr/bin/python3"))
        );
        assert_eq!(config.place_tagger.args, vec!["--gpe-only"]);
        assert!(config.normalize);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn command_without_runtime_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "person_tagger:\n  kind: command\n  model_path: ner.jar\nplace_tagger:\n  kind: lexicon\n  model_path: x.tsv\n"
        )
        .unwrap();
        let err = Config::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::MissingRuntime { which: "person" }));
    }

    #[test]
    fn unknown_kind_is_a_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "person_tagger:\n  kind: bert\n  model_path: m\nplace_tagger:\n  kind: lexicon\n  model_path: m\n"
        )
        .unwrap();
        assert!(matches!(
            Config::load(file.path()),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        assert!(matches!(
            Config::load(Path::new("/nonexistent/mention_report.yaml")),
            Err(ConfigError::Read { .. })
        ));
    }

    #[test]
    fn lexicon_shortcut_uses_one_file_for_both() {
        let config = Config::from_lexicon("lex.tsv");
        assert_eq!(config.person_tagger, config.place_tagger);
        assert!(!config.normalize);
    }
}
