use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Deserialize;

use format_csv::CsvFormatConfig;
use storage_memory::CatalogConfig;

use crate::error::HubError;

pub const DEFAULT_CONFIG: &str = "csv-share-hub.toml";

// ═══════════════════════════════════════════════════════════════
//  CLI args
// ═══════════════════════════════════════════════════════════════

#[derive(Parser, Debug)]
#[command(name = "csv-share-hub", version, about = "Upload, list and view CSV files as sortable tables")]
pub struct Cli {
    /// Path to the TOML config file
    #[arg(long, global = true, default_value = DEFAULT_CONFIG, env = "CSV_SHARE_HUB_CONFIG")]
    pub config: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print a CSV file as a table
    View(ViewArgs),
    /// Interactive upload / list / show / sort loop on stdin
    Session(SessionArgs),
}

#[derive(Args, Clone, Debug)]
pub struct ViewArgs {
    /// CSV file to show
    pub path: PathBuf,

    /// Sort by column; repeat the same column to flip the direction
    #[arg(long = "sort", value_name = "COLUMN")]
    pub sort: Vec<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Field delimiter, overrides [csv].delimiter
    #[arg(long)]
    pub delimiter: Option<String>,
}

#[derive(Args, Clone, Debug)]
pub struct SessionArgs {
    /// Uploads kept in memory, overrides [catalog].max_files
    #[arg(long)]
    pub max_files: Option<usize>,

    /// Field delimiter, overrides [csv].delimiter
    #[arg(long)]
    pub delimiter: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Csv,
}

// ═══════════════════════════════════════════════════════════════
//  Config file (TOML)
// ═══════════════════════════════════════════════════════════════

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HubConfig {
    pub csv: CsvFormatConfig,
    pub catalog: CatalogConfig,
}

impl HubConfig {
    pub fn load(path: &str) -> Result<Self, HubError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| HubError::Config { context: "read", detail: format!("'{path}': {e}") })?;
        toml::from_str(&content)
            .map_err(|e| HubError::Config { context: "parse", detail: format!("'{path}': {e}") })
    }

    /// Load `path`, falling back to defaults only when the file does not exist.
    pub fn resolve(path: &str) -> Result<Self, HubError> {
        match Self::load(path) {
            Ok(cfg) => {
                tracing::debug!(config = %path, "loaded config");
                Ok(cfg)
            }
            Err(e) => {
                if std::path::Path::new(path).exists() {
                    return Err(e);
                }
                tracing::debug!(config = %path, "no config file, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Apply CLI overrides on top of the file (config file < CLI).
    pub fn with_overrides(mut self, delimiter: Option<String>, max_files: Option<usize>) -> Self {
        if let Some(d) = delimiter {
            self.csv.delimiter = d;
        }
        if let Some(n) = max_files {
            self.catalog.max_files = n;
        }
        self
    }
}
