use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default upper bound on JSON content handed to the shape classifier (16 MiB).
pub const DEFAULT_MAX_JSON_BYTES: u64 = 16 * 1024 * 1024;

/// Error type for loading classifier configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config JSON at {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to parse config YAML at {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// Only `.json`, `.yaml` and `.yml` config files are understood.
    #[error("Unsupported config format '{extension}' for {path}; expected json, yaml or yml")]
    UnsupportedFormat { path: PathBuf, extension: String },
}

/// Convenience result type for config operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Settings for the upload-side classification helpers.
///
/// The classifiers themselves take no configuration; these settings only
/// govern how files are read and how media types are filled in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Largest JSON file (in bytes) that will be read for shape inference.
    pub max_json_bytes: u64,
    /// Guess a media type from the file name when none is declared.
    pub guess_media_type: bool,
    /// Skip dot-files and dot-directories when scanning.
    pub skip_hidden: bool,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self { max_json_bytes: DEFAULT_MAX_JSON_BYTES, guess_media_type: false, skip_hidden: true }
    }
}

impl ClassifierConfig {
    /// Load a config file, choosing the parser by extension (json, yaml, yml).
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let extension =
            path.extension().and_then(|e| e.to_str()).unwrap_or_default().to_ascii_lowercase();

        if !matches!(extension.as_str(), "json" | "yaml" | "yml") {
            return Err(ConfigError::UnsupportedFormat { path: path.to_path_buf(), extension });
        }

        let body = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;

        if extension == "json" {
            serde_json::from_str(&body)
                .map_err(|source| ConfigError::Json { path: path.to_path_buf(), source })
        } else {
            serde_yaml::from_str(&body)
                .map_err(|source| ConfigError::Yaml { path: path.to_path_buf(), source })
        }
    }
}
