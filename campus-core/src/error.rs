//! Error types for campus-core.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Underlying I/O failure reading the config file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parse error on load — includes file path and line context from serde_yaml.
    #[error("failed to parse config at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// A required setting was absent from both the environment and the config file.
    #[error("missing required configuration: set {name}")]
    MissingVar { name: &'static str },

    /// A setting was present but could not be parsed.
    #[error("invalid value for {name}: {value:?}")]
    InvalidValue { name: &'static str, value: String },

    /// `dirs::home_dir()` returned `None` — cannot locate `~/.campus/`.
    #[error("cannot determine home directory; set $HOME or equivalent")]
    HomeNotFound,
}
