mod command;
mod config;
mod count;
mod error;
mod lexicon;
mod merge;
mod pipeline;
mod places;
mod rank;
mod resolve;
mod scanner;
mod stopwords;
mod tagger;
mod tokenize;
mod types;
mod window;

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use mention_types::PageReport;
use tracing::{debug, info, warn};

use config::{CONFIG_ENV, Config};
use pipeline::Pipeline;
use tagger::{SpanTagger, TokenTagger};

type DynPipeline = Pipeline<Box<dyn TokenTagger>, Box<dyn SpanTagger>>;

const OUTPUT_DIR: &str = "output";

#[derive(Parser)]
#[command(
    name = "mention_report",
    about = "Count people mentioned in page text and the places seen near them"
)]
struct Cli {
    /// YAML config describing both taggers (falls back to $MENTION_REPORT_CONFIG)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Use one LABEL<TAB>entry lexicon for both taggers instead of a config file
    #[arg(long, global = true, conflicts_with = "config")]
    lexicon: Option<PathBuf>,
    /// Strip non-ASCII, possessives and extra whitespace before filtering
    #[arg(long, global = true)]
    normalize: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Analyze one page and print its report as JSON
    Analyze {
        /// Page text file; stdin when absent or "-"
        input: Option<PathBuf>,
        /// Page URL echoed in the report (defaults to the input path)
        #[arg(long)]
        url: Option<String>,
        /// Extra KEY=VALUE pairs echoed next to the URL
        #[arg(long = "meta", value_parser = parse_key_value)]
        metadata: Vec<(String, String)>,
        /// Write the report here instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Analyze every *.txt under a directory → <out-dir>/<relative path>.json
    Batch {
        root: PathBuf,
        #[arg(long, default_value = OUTPUT_DIR)]
        out_dir: PathBuf,
    },
    /// Print the stopword-filtered text that spans are measured against
    Filter {
        input: Option<PathBuf>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = load_config(&cli)?;

    match cli.command {
        Command::Analyze {
            input,
            url,
            metadata,
            out,
        } => run_analyze(&config, input.as_deref(), url, metadata, out.as_deref()),
        Command::Batch { root, out_dir } => run_batch(&config, &root, &out_dir),
        Command::Filter { input } => {
            println!("{}", run_filter(&config, input.as_deref())?);
            Ok(())
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
//  CONFIG + TAGGERS
// ═══════════════════════════════════════════════════════════════════════

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = if let Some(lexicon) = &cli.lexicon {
        debug!("Using lexicon for both taggers: {}", lexicon.display());
        Config::from_lexicon(lexicon)
    } else {
        let path = match &cli.config {
            Some(p) => p.clone(),
            None => match std::env::var_os(CONFIG_ENV) {
                Some(p) => PathBuf::from(p),
                None => bail!("no tagger configuration: pass --config, --lexicon, or set {CONFIG_ENV}"),
            },
        };
        debug!("Using config file: {}", path.display());
        Config::load(&path)?
    };

    config.normalize |= cli.normalize;
    Ok(config)
}

fn build_pipeline(config: &Config) -> Result<DynPipeline> {
    let person = tagger::person_tagger(&config.person_tagger).context("loading person tagger")?;
    let place = tagger::place_tagger(&config.place_tagger).context("loading place tagger")?;
    Ok(Pipeline::new(person, place).normalizing(config.normalize))
}

// ═══════════════════════════════════════════════════════════════════════
//  INPUT / OUTPUT HELPERS
// ═══════════════════════════════════════════════════════════════════════

fn read_input(input: Option<&Path>) -> Result<String> {
    match input {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("cannot read {}", path.display())),
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("cannot read stdin")?;
            Ok(buf)
        }
    }
}

fn write_json<T: serde::Serialize>(path: &Path, data: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(data)?;
    std::fs::write(path, &json).with_context(|| format!("cannot write {}", path.display()))?;
    debug!("{} ({} bytes)", path.display(), json.len());
    Ok(())
}

fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((k, v)) if !k.trim().is_empty() => Ok((k.trim().to_string(), v.to_string())),
        _ => Err(format!("expected KEY=VALUE, got {raw:?}")),
    }
}

// ═══════════════════════════════════════════════════════════════════════
//  FILTER MODE: no taggers are loaded
// ═══════════════════════════════════════════════════════════════════════

fn run_filter(config: &Config, input: Option<&Path>) -> Result<String> {
    let raw = read_input(input)?;
    Ok(pipeline::filter_text(&raw, config.normalize))
}

// ═══════════════════════════════════════════════════════════════════════
//  ANALYZE MODE: one page → one report
// ═══════════════════════════════════════════════════════════════════════

fn run_analyze(
    config: &Config,
    input: Option<&Path>,
    url: Option<String>,
    metadata: Vec<(String, String)>,
    out: Option<&Path>,
) -> Result<()> {
    let raw = read_input(input)?;
    let pipeline = build_pipeline(config)?;
    let people = pipeline.run(&raw)?;

    let url = url.unwrap_or_else(|| match input {
        Some(p) => p.display().to_string(),
        None => "-".to_string(),
    });
    let report = PageReport::new(url, people).with_metadata(metadata);
    info!(
        "{}: {} people, {} mentions",
        report.url,
        report.people.len(),
        report.total_mentions()
    );

    match out {
        Some(path) => write_json(path, &report),
        None => {
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(())
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
//  BATCH MODE: every page under a directory
// ═══════════════════════════════════════════════════════════════════════

fn run_batch(config: &Config, root: &Path, out_dir: &Path) -> Result<()> {
    info!("Scanning pages at: {}", root.display());
    let pages = scanner::scan_pages(root);
    if pages.is_empty() {
        warn!("No *.txt pages found under {}", root.display());
        return Ok(());
    }
    info!("Found {} page files", pages.len());

    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("cannot create {}", out_dir.display()))?;
    let pipeline = build_pipeline(config)?;

    let mut failed = Vec::new();
    let mut total_people = 0usize;
    for page in &pages {
        let raw = match std::fs::read_to_string(&page.path) {
            Ok(c) => c,
            Err(e) => {
                warn!("Cannot read {}: {e}", page.path.display());
                failed.push(page.path.display().to_string());
                continue;
            }
        };
        let people = match pipeline.run(&raw) {
            Ok(p) => p,
            Err(e) => {
                warn!("Skipping {}: {e}", page.path.display());
                failed.push(page.path.display().to_string());
                continue;
            }
        };
        total_people += people.len();

        let report = PageReport::new(page.path.display().to_string(), people);
        let out = out_dir.join(&page.relative).with_extension("json");
        if let Some(parent) = out.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("cannot create {}", parent.display()))?;
        }
        write_json(&out, &report)?;
    }

    info!(
        "Analyzed {} pages ({} failed), {} people in total → {}",
        pages.len() - failed.len(),
        failed.len(),
        total_people,
        out_dir.display()
    );
    for f in failed.iter().take(30) {
        warn!("  failed: {f}");
    }
    if failed.len() > 30 {
        warn!("  ... and {} more", failed.len() - 30);
    }
    Ok(())
}
