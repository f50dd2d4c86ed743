mod config;
mod render;

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use clap::{ArgAction, Parser, ValueEnum};
use confdiff::html::{side_by_side_html, unified_html};
use confdiff::{
    DiffAlgorithm, DiffEngine, DiffScript, DiffStats, DisplayLine, SideBySide, SimilarDiffer,
    render_unified,
};
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt as _, util::SubscriberInitExt as _};

use crate::config::Config;

#[derive(Parser, Debug)]
#[command(name = "confdiff", version)]
#[command(about = "Compare two revisions of a configuration")]
struct Cli {
    /// Previous content, or `-` when the config is new.
    #[arg(required_unless_present = "script")]
    old: Option<PathBuf>,
    /// Edited content, or `-` when the config was deleted.
    #[arg(required_unless_present = "script")]
    new: Option<PathBuf>,
    /// Render a precomputed JSON diff script instead of diffing files.
    #[arg(long, conflicts_with_all = ["old", "new", "no_differ"])]
    script: Option<PathBuf>,
    #[arg(long, value_enum)]
    view: Option<View>,
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,
    #[arg(long, value_enum)]
    algorithm: Option<AlgorithmArg>,
    #[arg(long)]
    timeout_ms: Option<u64>,
    /// Skip line diffing and show both contents verbatim.
    #[arg(long, default_value_t = false)]
    no_differ: bool,
    /// Column width of the side-by-side text layout.
    #[arg(long)]
    width: Option<usize>,
    #[arg(long)]
    config: Option<PathBuf>,
    /// Print a change summary.
    #[arg(long, default_value_t = false)]
    stat: bool,
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum View {
    Unified,
    SideBySide,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    Text,
    Html,
    Json,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum AlgorithmArg {
    Myers,
    Patience,
    Lcs,
}

impl From<AlgorithmArg> for DiffAlgorithm {
    fn from(value: AlgorithmArg) -> Self {
        match value {
            AlgorithmArg::Myers => DiffAlgorithm::Myers,
            AlgorithmArg::Patience => DiffAlgorithm::Patience,
            AlgorithmArg::Lcs => DiffAlgorithm::Lcs,
        }
    }
}

enum Rendering {
    Unified(Vec<DisplayLine>),
    SideBySide(SideBySide),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = resolve_config(&cli)?;
    debug!(?config, "resolved settings");

    let (rendering, stats) = match &cli.script {
        Some(path) => render_script(&load_script(path)?, config.view),
        None => {
            let old = read_input(cli.old.as_deref())?;
            let new = read_input(cli.new.as_deref())?;
            let differ = SimilarDiffer::new(config.diff);
            let engine = if cli.no_differ {
                DiffEngine::without_differ()
            } else {
                DiffEngine::with_differ(&differ)
            };
            render_inputs(&engine, old.as_deref(), new.as_deref(), config.view)
        }
    };

    let output = format_output(&rendering, stats.filter(|_| cli.stat), &config)?;
    print!("{output}");
    Ok(())
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn resolve_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(view) = cli.view {
        config.view = view;
    }
    if let Some(format) = cli.format {
        config.format = format;
    }
    if let Some(algorithm) = cli.algorithm {
        config.diff.algorithm = algorithm.into();
    }
    if cli.timeout_ms.is_some() {
        config.diff.timeout_ms = cli.timeout_ms;
    }
    if let Some(width) = cli.width {
        config.width = width;
    }
    Ok(config)
}

/// `-` stands for an absent side, e.g. a config that did not exist yet.
fn read_input(path: Option<&Path>) -> Result<Option<String>> {
    match path {
        None => Ok(None),
        Some(path) if path == Path::new("-") => Ok(None),
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            info!(path = %path.display(), bytes = text.len(), "read input");
            Ok(Some(text))
        }
    }
}

fn load_script(path: &Path) -> Result<DiffScript> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read script {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("invalid diff script {}", path.display()))
}

fn render_script(script: &DiffScript, view: View) -> (Rendering, Option<DiffStats>) {
    let rendering = match view {
        View::Unified => Rendering::Unified(render_unified(script)),
        View::SideBySide => Rendering::SideBySide(confdiff::side_by_side(script)),
    };
    (rendering, Some(script.stats()))
}

fn render_inputs(
    engine: &DiffEngine<'_>,
    old: Option<&str>,
    new: Option<&str>,
    view: View,
) -> (Rendering, Option<DiffStats>) {
    match engine.script(old, new) {
        Some(script) => render_script(&script, view),
        None => {
            let rendering = match view {
                View::Unified => Rendering::Unified(engine.unified(old, new)),
                View::SideBySide => Rendering::SideBySide(engine.side_by_side(old, new)),
            };
            (rendering, None)
        }
    }
}

fn format_output(
    rendering: &Rendering,
    stats: Option<DiffStats>,
    config: &Config,
) -> Result<String> {
    let mut out = match (config.format, rendering) {
        (OutputFormat::Json, Rendering::Unified(lines)) => {
            return pretty(json!({ "stats": stats, "lines": lines }));
        }
        (OutputFormat::Json, Rendering::SideBySide(view)) => {
            return pretty(json!({ "stats": stats, "view": view }));
        }
        (OutputFormat::Html, Rendering::Unified(lines)) => unified_html(lines) + "\n",
        (OutputFormat::Html, Rendering::SideBySide(view)) => side_by_side_html(view) + "\n",
        (OutputFormat::Text, Rendering::Unified(lines)) => render::unified_text(lines),
        (OutputFormat::Text, Rendering::SideBySide(view)) => {
            render::side_by_side_text(view, config.width)
        }
    };
    if let Some(stats) = stats {
        out.push_str(&render::stats_line(&stats));
        out.push('\n');
    }
    Ok(out)
}

fn pretty(value: serde_json::Value) -> Result<String> {
    let mut out = serde_json::to_string_pretty(&value).context("failed to encode output")?;
    out.push('\n');
    Ok(out)
}
