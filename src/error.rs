//! Errors raised while reading an artifact and building a catalog.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Every failure the parser can report. None of them are retried.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Shape violation: wrong arity, wrong element type, mixed children.
    #[error("malformed entry at {location}: {reason}")]
    MalformedEntry { location: String, reason: String },

    /// Two siblings share a name.
    #[error("duplicate sibling '{name}' under {location}")]
    DuplicateSibling { location: String, name: String },

    /// Empty name, document reference, anchor or subtree token.
    #[error("empty {field} at {location}")]
    EmptyIdentifier {
        location: String,
        field: &'static str,
    },

    /// Subtree token with no resolvable artifact while resolution is required.
    #[error("unresolved subtree reference '{reference}' at {location}")]
    UnresolvedReference { location: String, reference: String },

    /// The `var NAME = ...;` wrapper is not well formed.
    #[error("artifact syntax error: {0}")]
    Syntax(String),

    #[error("artifact literal is not valid: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl CatalogError {
    pub(crate) fn malformed(location: &Location<'_>, reason: impl Into<String>) -> Self {
        Self::MalformedEntry {
            location: location.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn empty(location: &Location<'_>, field: &'static str) -> Self {
        Self::EmptyIdentifier {
            location: location.to_string(),
            field,
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Position of a tuple in the artifact: the qualified name of its parent
/// plus its index among siblings.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Location<'a> {
    pub parent: Option<&'a str>,
    pub index: Option<usize>,
}

impl Location<'static> {
    pub const ROOT: Self = Location {
        parent: None,
        index: None,
    };
}

impl<'a> Location<'a> {
    pub fn child(parent: Option<&'a str>, index: usize) -> Self {
        Self {
            parent,
            index: Some(index),
        }
    }
}

impl std::fmt::Display for Location<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.parent.unwrap_or("<root>"))?;
        if let Some(index) = self.index {
            write!(f, "[{index}]")?;
        }
        Ok(())
    }
}
