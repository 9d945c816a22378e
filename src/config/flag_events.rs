use crate::filter::{FilterParams, RunContext};
use crate::geometry::{SyntheticDetector, SyntheticLayout};
use crate::types::CellId;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Both,
}

impl OutputFormat {
    pub fn includes_text(self) -> bool {
        matches!(self, OutputFormat::Text | OutputFormat::Both)
    }

    pub fn includes_json(self) -> bool {
        matches!(self, OutputFormat::Json | OutputFormat::Both)
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub json_out: Option<PathBuf>,
    pub format: OutputFormat,
    /// Include per-event stage traces in the JSON report.
    pub per_event: bool,
}

/// A cell entry of the synthetic status table.
#[derive(Clone, Copy, Debug, Deserialize)]
pub struct MaskedCellEntry {
    pub cell: CellId,
    pub status: i32,
}

/// Synthetic detector standing in for the conditions databases.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    pub layout: SyntheticLayout,
    /// Status of cells without an entry; `None` leaves them absent.
    pub default_status: Option<i32>,
    pub masked_cells: Vec<MaskedCellEntry>,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            layout: SyntheticLayout::default(),
            default_status: Some(0),
            masked_cells: Vec::new(),
        }
    }
}

impl DetectorConfig {
    pub fn build(&self) -> SyntheticDetector {
        let mut detector =
            SyntheticDetector::new(self.layout.clone()).with_default_status(self.default_status);
        for entry in &self.masked_cells {
            detector.set_status(entry.cell, entry.status);
        }
        detector
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct RuntimeConfig {
    /// JSON array of events.
    pub events: PathBuf,
    #[serde(default)]
    pub run: RunContext,
    #[serde(default)]
    pub filter: FilterParams,
    #[serde(default)]
    pub detector: DetectorConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

pub fn load_config(path: &Path) -> Result<RuntimeConfig, String> {
    let contents = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    let mut config: RuntimeConfig = serde_json::from_str(&contents)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))?;
    if config.events.is_relative() {
        if let Some(dir) = path.parent() {
            config.events = dir.join(&config.events);
        }
    }
    Ok(config)
}

/// Reads the config path from the first argument.
pub fn parse_cli(program: &str) -> Result<RuntimeConfig, String> {
    let path = env::args()
        .nth(1)
        .ok_or_else(|| format!("Usage: {program} <config.json>"))?;
    load_config(Path::new(&path))
}
