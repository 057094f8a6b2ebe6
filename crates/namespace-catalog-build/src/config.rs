//! TOML configuration parser for catalog.toml.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Behavior when a subtree reference cannot be resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OnUnresolved {
    /// Keep the namespace empty and remember its reference (default)
    #[default]
    Keep,
    /// Fail the load
    Error,
}

/// What `generate` writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Normalized `var NAME = [...];` artifact (default)
    #[default]
    Artifact,
    /// Pretty-printed JSON snapshot of the catalog
    Json,
}

/// Parsed catalog configuration. Relative paths are resolved against the
/// directory holding the config file.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Navtree artifact to parse
    pub artifact: PathBuf,
    /// Directory of `<token>.js` subtree artifacts
    pub subtree_dir: Option<PathBuf>,
    pub on_unresolved: OnUnresolved,
    pub output_format: OutputFormat,
}

/// Raw TOML structure.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawCatalogConfig {
    artifact: String,
    subtree_dir: Option<String>,
    /// "keep" (default) or "error"
    on_unresolved: Option<String>,
    /// "artifact" (default) or "json"
    output_format: Option<String>,
}

impl CatalogConfig {
    /// Parse from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_str(&content)?;
        Ok(match path.parent() {
            Some(base) => config.relative_to(base),
            None => config,
        })
    }

    /// Parse from a TOML string. Paths are kept as written.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let raw: RawCatalogConfig = toml::from_str(content)?;

        if raw.artifact.trim().is_empty() {
            return Err(ConfigError::Validation("artifact path must not be empty".into()));
        }

        let on_unresolved = match raw.on_unresolved.as_deref() {
            None | Some("keep") => OnUnresolved::Keep,
            Some("error") => OnUnresolved::Error,
            Some(other) => {
                return Err(ConfigError::Validation(format!(
                    "Invalid on_unresolved value '{}': expected 'keep' or 'error'",
                    other
                )));
            }
        };

        let output_format = match raw.output_format.as_deref() {
            None | Some("artifact") => OutputFormat::Artifact,
            Some("json") => OutputFormat::Json,
            Some(other) => {
                return Err(ConfigError::Validation(format!(
                    "Invalid output_format value '{}': expected 'artifact' or 'json'",
                    other
                )));
            }
        };

        Ok(Self {
            artifact: PathBuf::from(raw.artifact),
            subtree_dir: raw.subtree_dir.map(PathBuf::from),
            on_unresolved,
            output_format,
        })
    }

    fn relative_to(mut self, base: &Path) -> Self {
        self.artifact = base.join(&self.artifact);
        self.subtree_dir = self.subtree_dir.map(|dir| base.join(dir));
        self
    }
}

/// Errors during config parsing.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Validation error: {0}")]
    Validation(String),
}
