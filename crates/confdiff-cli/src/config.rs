use std::path::Path;

use anyhow::{Context as _, Result};
use confdiff::DiffOptions;
use serde::Deserialize;

use crate::{OutputFormat, View};

pub const DEFAULT_WIDTH: usize = 60;

/// Settings read from `--config`; command-line flags take precedence.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    #[serde(flatten)]
    pub diff: DiffOptions,
    pub view: View,
    pub format: OutputFormat,
    pub width: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            diff: DiffOptions::default(),
            view: View::Unified,
            format: OutputFormat::Text,
            width: DEFAULT_WIDTH,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse config {}", path.display()))
    }
}
