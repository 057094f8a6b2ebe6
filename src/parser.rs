//! Catalog parser: list-of-tuples literal to typed namespace tree.

use std::collections::HashSet;

use serde_json::Value;
use tracing::debug;

use crate::artifact::read_artifact;
use crate::catalog::{Catalog, Children, MemberEntry, NamespaceEntry, SEPARATOR};
use crate::error::{CatalogError, Location};
use crate::resolve::{NoSubtrees, SubtreeResolver};

/// Builds a [`Catalog`] from artifact text or a decoded literal.
///
/// Every tuple is `(name, doc_ref, payload)`. The payload is
/// - a reference token, resolved through the [`SubtreeResolver`];
/// - a list of `(name, anchor_ref, null)` member tuples;
/// - a list of nested namespace tuples;
/// - `null` or `[]` for no children.
#[derive(Clone, Debug, Default)]
pub struct CatalogParser<R = NoSubtrees> {
    resolver: R,
    require_resolved: bool,
}

impl CatalogParser<NoSubtrees> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<R: SubtreeResolver> CatalogParser<R> {
    pub fn with_resolver(resolver: R) -> Self {
        Self {
            resolver,
            require_resolved: false,
        }
    }

    /// Fail with [`CatalogError::UnresolvedReference`] instead of keeping
    /// an empty namespace when a token cannot be resolved.
    pub fn require_resolved(mut self, require: bool) -> Self {
        self.require_resolved = require;
        self
    }

    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    /// Parse artifact text (`var NAME = [...];` or a bare literal).
    pub fn parse_str(&self, src: &str) -> Result<Catalog, CatalogError> {
        let (variable, value) = read_artifact(src)?;
        self.parse_value(variable, &value)
    }

    /// Parse an already decoded literal.
    pub fn parse_value(
        &self,
        variable: impl Into<String>,
        value: &Value,
    ) -> Result<Catalog, CatalogError> {
        let variable = variable.into();
        let Value::Array(items) = value else {
            return Err(CatalogError::malformed(
                &Location::ROOT,
                format!("expected a list of entries, found {}", kind(value)),
            ));
        };

        let mut resolving = Vec::new();
        let mut seen = HashSet::new();
        let mut roots = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            let location = Location::child(None, index);
            let tuple = as_tuple(item, &location)?;
            let entry = self.parse_namespace(tuple, None, &location, &mut resolving)?;
            if !seen.insert(entry.name.clone()) {
                return Err(duplicate(&Location::ROOT, &entry.name));
            }
            roots.push(entry);
        }

        let catalog = Catalog::new(variable, roots);
        debug!(
            variable = catalog.variable(),
            roots = catalog.roots().len(),
            entries = catalog.len(),
            "parsed namespace catalog"
        );
        Ok(catalog)
    }

    fn parse_namespace(
        &self,
        [name, doc_ref, payload]: &[Value; 3],
        parent: Option<&str>,
        location: &Location<'_>,
        resolving: &mut Vec<String>,
    ) -> Result<NamespaceEntry, CatalogError> {
        let name = identifier(name, "name", location)?;
        if name.contains(SEPARATOR) {
            return Err(CatalogError::malformed(
                location,
                format!("name '{name}' contains the separator '{SEPARATOR}'"),
            ));
        }
        let doc_ref = identifier(doc_ref, "doc_ref", location)?;
        let path = match parent {
            Some(parent) => format!("{parent}{SEPARATOR}{name}"),
            None => name.to_string(),
        };

        let mut subtree_ref = None;
        let children = match payload {
            Value::Null => Children::Empty,
            Value::Array(items) => self.parse_children(items, &path, resolving)?,
            Value::String(token) => {
                if token.is_empty() {
                    return Err(CatalogError::empty(location, "subtree reference"));
                }
                if resolving.contains(token) {
                    return Err(CatalogError::malformed(
                        location,
                        format!("cyclic subtree reference '{token}'"),
                    ));
                }
                match self.resolver.resolve(token)? {
                    Some(Value::Array(items)) => {
                        debug!(namespace = %path, reference = %token, "resolved subtree");
                        resolving.push(token.clone());
                        let children = self.parse_children(&items, &path, resolving);
                        resolving.pop();
                        children?
                    }
                    Some(other) => {
                        return Err(CatalogError::malformed(
                            location,
                            format!("subtree '{token}' is {}, expected a list", kind(&other)),
                        ));
                    }
                    None if self.require_resolved => {
                        return Err(CatalogError::UnresolvedReference {
                            location: location.to_string(),
                            reference: token.clone(),
                        });
                    }
                    None => {
                        debug!(namespace = %path, reference = %token, "subtree left unresolved");
                        subtree_ref = Some(token.clone());
                        Children::Empty
                    }
                }
            }
            other => {
                return Err(CatalogError::malformed(
                    location,
                    format!("payload must be a reference, a list or null, found {}", kind(other)),
                ));
            }
        };

        Ok(NamespaceEntry {
            name: name.to_string(),
            doc_ref: doc_ref.to_string(),
            children,
            subtree_ref,
        })
    }

    /// A list is members when every third slot is `null`, namespaces when
    /// none is; anything else is a mix.
    fn parse_children(
        &self,
        items: &[Value],
        path: &str,
        resolving: &mut Vec<String>,
    ) -> Result<Children, CatalogError> {
        let mut tuples = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            tuples.push(as_tuple(item, &Location::child(Some(path), index))?);
        }
        let Some(&first) = tuples.first() else {
            return Ok(Children::Empty);
        };

        let is_member = |t: &[Value; 3]| t[2].is_null();
        let members = is_member(first);
        if let Some(index) = tuples.iter().position(|t| is_member(t) != members) {
            return Err(CatalogError::malformed(
                &Location::child(Some(path), index),
                "list mixes members and nested namespaces",
            ));
        }

        let parent = Location {
            parent: Some(path),
            index: None,
        };

        if members {
            let mut seen = HashSet::new();
            let mut out = Vec::with_capacity(tuples.len());
            for (index, [name, anchor_ref, _]) in tuples.into_iter().enumerate() {
                let location = Location::child(Some(path), index);
                let name = identifier(name, "name", &location)?;
                if name.contains(SEPARATOR) {
                    return Err(CatalogError::malformed(
                        &location,
                        format!("name '{name}' contains the separator '{SEPARATOR}'"),
                    ));
                }
                let anchor_ref = identifier(anchor_ref, "anchor_ref", &location)?;
                if !seen.insert(name) {
                    return Err(duplicate(&parent, name));
                }
                out.push(MemberEntry {
                    name: name.to_string(),
                    anchor_ref: anchor_ref.to_string(),
                });
            }
            Ok(Children::Members(out))
        } else {
            let mut seen = HashSet::new();
            let mut out = Vec::with_capacity(tuples.len());
            for (index, tuple) in tuples.into_iter().enumerate() {
                let location = Location::child(Some(path), index);
                let entry = self.parse_namespace(tuple, Some(path), &location, resolving)?;
                if !seen.insert(entry.name.clone()) {
                    return Err(duplicate(&parent, &entry.name));
                }
                out.push(entry);
            }
            Ok(Children::Namespaces(out))
        }
    }
}

fn as_tuple<'v>(value: &'v Value, location: &Location<'_>) -> Result<&'v [Value; 3], CatalogError> {
    let Value::Array(items) = value else {
        return Err(CatalogError::malformed(
            location,
            format!("expected a 3-element list, found {}", kind(value)),
        ));
    };
    items.as_slice().try_into().map_err(|_| {
        CatalogError::malformed(
            location,
            format!("expected a 3-element list, found {} elements", items.len()),
        )
    })
}

fn identifier<'v>(
    value: &'v Value,
    field: &'static str,
    location: &Location<'_>,
) -> Result<&'v str, CatalogError> {
    match value {
        Value::String(s) if s.is_empty() => Err(CatalogError::empty(location, field)),
        Value::String(s) => Ok(s),
        other => Err(CatalogError::malformed(
            location,
            format!("{field} must be a string, found {}", kind(other)),
        )),
    }
}

fn duplicate(parent: &Location<'_>, name: &str) -> CatalogError {
    CatalogError::DuplicateSibling {
        location: parent.to_string(),
        name: name.to_string(),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
