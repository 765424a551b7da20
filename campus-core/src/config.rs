//! Configuration loading.
//!
//! Settings come from two layers: an optional YAML file at
//! `<home>/.campus/config.yaml` and environment variables, with the
//! environment taking precedence. Credentials (spreadsheet token,
//! enrichment API key) have no defaults; everything else does.
//!
//! # API pattern
//!
//! Loading has two forms:
//! - `Config::load_at(home, vars)` — explicit home and variable map; used in tests
//! - `Config::load()` — derives home from `dirs::home_dir()` and vars from the
//!   process environment, delegates to `load_at`
//!
//! Tests must NEVER call `load()`; always use `load_at`.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigError;

// ---------------------------------------------------------------------------
// Defaults and variable names
// ---------------------------------------------------------------------------

pub const DEFAULT_SHEETS_BASE_URL: &str = "https://sheets.googleapis.com/v4";
pub const DEFAULT_SOURCE_RANGE: &str = "Sheet1";
pub const DEFAULT_DEST_RANGE: &str = "Sheet2";
pub const DEFAULT_ENRICH_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_ENRICH_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_ENRICH_TEMPERATURE: f32 = 0.3;

pub const VAR_SHEETS_TOKEN: &str = "CAMPUS_SHEETS_TOKEN";
pub const VAR_SHEETS_BASE_URL: &str = "CAMPUS_SHEETS_BASE_URL";
pub const VAR_SOURCE_SPREADSHEET: &str = "CAMPUS_SOURCE_SPREADSHEET";
pub const VAR_SOURCE_RANGE: &str = "CAMPUS_SOURCE_RANGE";
pub const VAR_DEST_SPREADSHEET: &str = "CAMPUS_DEST_SPREADSHEET";
pub const VAR_DEST_RANGE: &str = "CAMPUS_DEST_RANGE";
pub const VAR_ENRICH_API_KEY: &str = "OPENAI_API_KEY";
pub const VAR_ENRICH_BASE_URL: &str = "CAMPUS_ENRICH_BASE_URL";
pub const VAR_ENRICH_MODEL: &str = "CAMPUS_ENRICH_MODEL";
pub const VAR_ENRICH_TEMPERATURE: &str = "CAMPUS_ENRICH_TEMPERATURE";
pub const VAR_CHECKPOINT_PATH: &str = "CAMPUS_CHECKPOINT_PATH";

// ---------------------------------------------------------------------------
// Resolved configuration
// ---------------------------------------------------------------------------

/// Spreadsheet backend settings.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetsConfig {
    /// Bearer token for the spreadsheet API.
    pub token: String,
    pub base_url: String,
    pub source_spreadsheet: String,
    pub source_range: String,
    pub dest_spreadsheet: String,
    pub dest_range: String,
}

/// Enrichment backend settings.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichmentConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
}

/// Fully resolved configuration for one sync run.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub sheets: SheetsConfig,
    pub enrichment: EnrichmentConfig,
    /// Override for the checkpoint log location; `None` means the default
    /// under `<home>/.campus/`.
    pub checkpoint_path: Option<PathBuf>,
}

// ---------------------------------------------------------------------------
// File layer
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    #[serde(default)]
    sheets: FileSheets,
    #[serde(default)]
    enrichment: FileEnrichment,
    checkpoint_path: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileSheets {
    token: Option<String>,
    base_url: Option<String>,
    source_spreadsheet: Option<String>,
    source_range: Option<String>,
    dest_spreadsheet: Option<String>,
    dest_range: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileEnrichment {
    api_key: Option<String>,
    base_url: Option<String>,
    model: Option<String>,
    temperature: Option<f32>,
}

/// `<home>/.campus/config.yaml` — pure, no I/O.
pub fn config_path_at(home: &Path) -> PathBuf {
    home.join(".campus").join("config.yaml")
}

fn load_file(home: &Path) -> Result<FileConfig, ConfigError> {
    let path = config_path_at(home);
    if !path.exists() {
        return Ok(FileConfig::default());
    }
    let contents = std::fs::read_to_string(&path)?;
    serde_yaml::from_str(&contents).map_err(|e| ConfigError::Parse { path, source: e })
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

fn lookup(vars: &HashMap<String, String>, name: &'static str) -> Option<String> {
    vars.get(name).filter(|v| !v.is_empty()).cloned()
}

fn resolve(
    vars: &HashMap<String, String>,
    name: &'static str,
    file_value: Option<String>,
    default: &str,
) -> String {
    lookup(vars, name)
        .or(file_value)
        .unwrap_or_else(|| default.to_owned())
}

fn require(
    vars: &HashMap<String, String>,
    name: &'static str,
    file_value: Option<String>,
) -> Result<String, ConfigError> {
    lookup(vars, name)
        .or(file_value)
        .ok_or(ConfigError::MissingVar { name })
}

impl Config {
    /// Load configuration from the file layer under `home` plus the given
    /// variable map (environment wins).
    pub fn load_at(home: &Path, vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let file = load_file(home)?;

        let temperature = match lookup(vars, VAR_ENRICH_TEMPERATURE) {
            Some(raw) => raw.parse::<f32>().map_err(|_| ConfigError::InvalidValue {
                name: VAR_ENRICH_TEMPERATURE,
                value: raw,
            })?,
            None => file
                .enrichment
                .temperature
                .unwrap_or(DEFAULT_ENRICH_TEMPERATURE),
        };

        let checkpoint_path = lookup(vars, VAR_CHECKPOINT_PATH)
            .map(PathBuf::from)
            .or(file.checkpoint_path);

        Ok(Config {
            sheets: SheetsConfig {
                token: require(vars, VAR_SHEETS_TOKEN, file.sheets.token)?,
                base_url: resolve(
                    vars,
                    VAR_SHEETS_BASE_URL,
                    file.sheets.base_url,
                    DEFAULT_SHEETS_BASE_URL,
                ),
                source_spreadsheet: require(
                    vars,
                    VAR_SOURCE_SPREADSHEET,
                    file.sheets.source_spreadsheet,
                )?,
                source_range: resolve(
                    vars,
                    VAR_SOURCE_RANGE,
                    file.sheets.source_range,
                    DEFAULT_SOURCE_RANGE,
                ),
                dest_spreadsheet: require(
                    vars,
                    VAR_DEST_SPREADSHEET,
                    file.sheets.dest_spreadsheet,
                )?,
                dest_range: resolve(
                    vars,
                    VAR_DEST_RANGE,
                    file.sheets.dest_range,
                    DEFAULT_DEST_RANGE,
                ),
            },
            enrichment: EnrichmentConfig {
                api_key: require(vars, VAR_ENRICH_API_KEY, file.enrichment.api_key)?,
                base_url: resolve(
                    vars,
                    VAR_ENRICH_BASE_URL,
                    file.enrichment.base_url,
                    DEFAULT_ENRICH_BASE_URL,
                ),
                model: resolve(
                    vars,
                    VAR_ENRICH_MODEL,
                    file.enrichment.model,
                    DEFAULT_ENRICH_MODEL,
                ),
                temperature,
            },
            checkpoint_path,
        })
    }

    /// `load_at` convenience wrapper over the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        let home = dirs::home_dir().ok_or(ConfigError::HomeNotFound)?;
        let vars: HashMap<String, String> = std::env::vars().collect();
        Self::load_at(&home, &vars)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
