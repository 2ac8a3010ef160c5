//! Blog configuration (blog.config.json)

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the configuration file at the root of a blog project
pub const CONFIG_FILE: &str = "blog.config.json";

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("blog.config.json not found at `{0}`. Run `alxblg init` first.")]
    NotFound(PathBuf),

    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] io::Error),

    #[error("failed to parse `{0}`")]
    Parse(PathBuf, #[source] serde_json::Error),
}

/// Site-wide settings, loaded once per build
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogConfig {
    pub title: String,
    pub description: String,
    pub author: String,
    /// Absolute URL the site is deployed under
    pub base_url: String,
    /// Exposed to templates; the index page itself is not split
    pub posts_per_page: NonZeroUsize,
}

impl Default for BlogConfig {
    fn default() -> Self {
        Self {
            title: "My Blog".to_string(),
            description: "A simple blog generated with alxblg".to_string(),
            author: "Your Name".to_string(),
            base_url: "http://localhost:3000".to_string(),
            posts_per_page: NonZeroUsize::new(10).unwrap_or(NonZeroUsize::MIN),
        }
    }
}

impl BlogConfig {
    /// Load configuration from a file.
    ///
    /// A missing file is reported as [`ConfigError::NotFound`]; the build
    /// never falls back to defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(ConfigError::NotFound(path.to_path_buf()))
            }
            Err(e) => return Err(ConfigError::Io(path.to_path_buf(), e)),
        };

        let config = Self::from_json(&content)
            .map_err(|e| ConfigError::Parse(path.to_path_buf(), e))?;

        if !config.base_url.contains("://") {
            tracing::warn!(
                "baseUrl {:?} in {:?} is not an absolute URL",
                config.base_url,
                path
            );
        }

        Ok(config)
    }

    /// Parse configuration from JSON text
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Pretty-printed JSON, as written by `init`
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
