//! Build-time utilities for namespace-catalog.
//!
//! This crate provides tools for:
//! - Parsing `catalog.toml` configuration files
//! - Loading a navtree artifact and its subtree files from disk
//! - Writing a normalized artifact or a JSON snapshot of the catalog
//!
//! # Usage in build.rs
//!
//! ```ignore
//! // build.rs
//! fn main() {
//!     println!("cargo:rerun-if-changed=catalog.toml");
//!     namespace_catalog_build::generate("catalog.toml", "docs/namespaces.json")
//!         .expect("Failed to generate namespace catalog");
//! }
//! ```
//!
//! # Configuration
//!
//! ```toml
//! artifact = "docs/html/namespaces_dup.js"
//! subtree_dir = "docs/html"      # optional
//! on_unresolved = "keep"         # or "error"
//! output_format = "artifact"     # or "json"
//! ```

mod config;

pub use config::{CatalogConfig, ConfigError, OnUnresolved, OutputFormat};

use std::path::Path;

use namespace_catalog::{
    Catalog, CatalogError, CatalogParser, DirectoryResolver, NoSubtrees, Order, SubtreeResolver,
    render_artifact,
};
use thiserror::Error;
use tracing::{info, warn};

/// Load the catalog described by a `catalog.toml` file.
pub fn load(config_path: impl AsRef<Path>) -> Result<Catalog, GenerateError> {
    let config = CatalogConfig::from_file(config_path)?;
    load_with_config(&config)
}

/// Load the catalog described by an already parsed config.
pub fn load_with_config(config: &CatalogConfig) -> Result<Catalog, GenerateError> {
    let src = std::fs::read_to_string(&config.artifact).map_err(|source| {
        CatalogError::Io {
            path: config.artifact.clone(),
            source,
        }
    })?;
    let require = config.on_unresolved == OnUnresolved::Error;

    let catalog = match &config.subtree_dir {
        Some(dir) => {
            let catalog = parse(DirectoryResolver::new(dir), require, &src)?;
            for visit in catalog.iter(Order::PreOrder) {
                if let Some(reference) = visit
                    .node
                    .as_namespace()
                    .and_then(|ns| ns.subtree_ref.as_deref())
                {
                    warn!(
                        namespace = %visit.path,
                        reference,
                        dir = %dir.display(),
                        "no subtree artifact found"
                    );
                }
            }
            catalog
        }
        None => parse(NoSubtrees, require, &src)?,
    };
    Ok(catalog)
}

fn parse<R: SubtreeResolver>(
    resolver: R,
    require: bool,
    src: &str,
) -> Result<Catalog, CatalogError> {
    CatalogParser::with_resolver(resolver)
        .require_resolved(require)
        .parse_str(src)
}

/// Main entry point for build.rs integration.
///
/// Reads `catalog.toml`, loads the artifact it points to, and writes the
/// catalog in the configured output format.
///
/// # Errors
///
/// Returns an error if:
/// - `catalog.toml` cannot be read or parsed
/// - the artifact is malformed, or a subtree is missing with `on_unresolved = "error"`
/// - the output file cannot be written
pub fn generate(
    config_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
) -> Result<(), GenerateError> {
    let config = CatalogConfig::from_file(config_path)?;
    let catalog = load_with_config(&config)?;
    let output_path = output_path.as_ref();

    let content = render(&catalog, config.output_format)?;
    std::fs::write(output_path, content)?;

    info!(
        output = %output_path.display(),
        entries = catalog.len(),
        format = ?config.output_format,
        "wrote namespace catalog"
    );
    Ok(())
}

/// Serialize a catalog in the given format.
pub fn render(catalog: &Catalog, format: OutputFormat) -> Result<String, GenerateError> {
    Ok(match format {
        OutputFormat::Artifact => render_artifact(catalog),
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(catalog)?;
            json.push('\n');
            json
        }
    })
}

/// Errors that can occur during generation.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// Failed to parse catalog.toml
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    /// Failed to parse the artifact or a subtree
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
