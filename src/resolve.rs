//! Subtree resolution for bare reference tokens.
//!
//! A payload such as `"namespace_backlog"` names a separate artifact
//! (`namespace_backlog.js`) holding that namespace's children.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, warn};

use crate::artifact::read_artifact;
use crate::error::CatalogError;

/// Looks up the children literal of a reference token.
///
/// `Ok(None)` means the token is unknown; the parser then leaves the
/// namespace empty (or fails, when resolution is required).
pub trait SubtreeResolver {
    fn resolve(&self, reference: &str) -> Result<Option<Value>, CatalogError>;
}

impl<R: SubtreeResolver + ?Sized> SubtreeResolver for &R {
    fn resolve(&self, reference: &str) -> Result<Option<Value>, CatalogError> {
        (**self).resolve(reference)
    }
}

impl<R: SubtreeResolver + ?Sized> SubtreeResolver for Box<R> {
    fn resolve(&self, reference: &str) -> Result<Option<Value>, CatalogError> {
        (**self).resolve(reference)
    }
}

/// Resolves nothing; every token stays a reference.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoSubtrees;

impl SubtreeResolver for NoSubtrees {
    fn resolve(&self, _reference: &str) -> Result<Option<Value>, CatalogError> {
        Ok(None)
    }
}

impl SubtreeResolver for HashMap<String, Value> {
    fn resolve(&self, reference: &str) -> Result<Option<Value>, CatalogError> {
        Ok(self.get(reference).cloned())
    }
}

/// Reads `<dir>/<token>.js` artifacts, as laid out by the HTML output
/// directory of the documentation generator.
#[derive(Clone, Debug)]
pub struct DirectoryResolver {
    dir: PathBuf,
}

impl DirectoryResolver {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, reference: &str) -> Option<PathBuf> {
        let safe = !reference.contains(['/', '\\']) && !reference.contains("..");
        safe.then(|| self.dir.join(format!("{reference}.js")))
    }
}

impl SubtreeResolver for DirectoryResolver {
    fn resolve(&self, reference: &str) -> Result<Option<Value>, CatalogError> {
        let Some(path) = self.path_for(reference) else {
            warn!(reference, "subtree reference is not a plain file name, skipping");
            return Ok(None);
        };
        if !path.is_file() {
            return Ok(None);
        }

        let src = std::fs::read_to_string(&path).map_err(|e| CatalogError::io(&path, e))?;
        let (variable, value) = read_artifact(&src)?;
        if variable != reference {
            warn!(
                reference,
                variable = %variable,
                path = %path.display(),
                "subtree artifact declares a different variable"
            );
        }
        debug!(reference, path = %path.display(), "loaded subtree artifact");
        Ok(Some(value))
    }
}
