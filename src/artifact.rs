//! Artifact text: the `var NAME = [ ... ];` navtree files.
//!
//! The literal inside the wrapper only uses double-quoted strings, `null`
//! and arrays, so it is decoded as JSON.
//!
//! ```text
//! var namespaces_dup =
//! [
//!     [ "Backlog", "namespace_backlog.html", "namespace_backlog" ],
//!     [ "main", "namespacemain.html", [
//!       [ "app", "namespacemain.html#a5fa…", null ]
//!     ] ]
//! ];
//! ```

use std::fmt::Write as _;

use serde_json::Value;

use crate::catalog::{Catalog, Children, DEFAULT_VARIABLE, MemberEntry, NamespaceEntry};
use crate::error::CatalogError;

/// Split an artifact into its variable name and decoded literal.
///
/// A bare literal (no `var` wrapper) is accepted and named
/// [`DEFAULT_VARIABLE`].
pub fn read_artifact(src: &str) -> Result<(String, Value), CatalogError> {
    let src = src.trim();
    let (variable, literal) = match src.strip_prefix("var") {
        Some(rest) if rest.starts_with(char::is_whitespace) => {
            let (name, literal) = rest.split_once('=').ok_or_else(|| {
                CatalogError::Syntax("expected '=' after the variable name".into())
            })?;
            let name = name.trim();
            if !is_identifier(name) {
                return Err(CatalogError::Syntax(format!(
                    "invalid variable name '{name}'"
                )));
            }
            (name.to_string(), literal)
        }
        _ => (DEFAULT_VARIABLE.to_string(), src),
    };

    let literal = literal.trim();
    let literal = literal.strip_suffix(';').unwrap_or(literal);
    let value = serde_json::from_str(literal)?;
    Ok((variable, value))
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' || first == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}

/// Render a catalog as artifact text; parsing the result yields an equal
/// catalog.
pub fn render_artifact(catalog: &Catalog) -> String {
    let mut out = format!("var {} =\n[\n", catalog.variable());
    let roots = catalog.roots();
    for (i, entry) in roots.iter().enumerate() {
        render_namespace(&mut out, entry, 1);
        out.push_str(if i + 1 < roots.len() { ",\n" } else { "\n" });
    }
    out.push_str("];\n");
    out
}

fn render_namespace(out: &mut String, entry: &NamespaceEntry, level: usize) {
    let _ = write!(
        out,
        "{}[ {}, {}, ",
        indent(level),
        quote(&entry.name),
        quote(&entry.doc_ref)
    );
    match &entry.children {
        Children::Empty => match &entry.subtree_ref {
            Some(token) => out.push_str(&quote(token)),
            None => out.push_str("[]"),
        },
        Children::Namespaces(namespaces) => {
            out.push_str("[\n");
            for (i, child) in namespaces.iter().enumerate() {
                render_namespace(out, child, level + 1);
                out.push_str(if i + 1 < namespaces.len() { ",\n" } else { "\n" });
            }
            out.push_str(&indent(level));
            out.push(']');
        }
        Children::Members(members) => {
            out.push_str("[\n");
            for (i, member) in members.iter().enumerate() {
                render_member(out, member, level + 1);
                out.push_str(if i + 1 < members.len() { ",\n" } else { "\n" });
            }
            out.push_str(&indent(level));
            out.push(']');
        }
    }
    out.push_str(" ]");
}

fn render_member(out: &mut String, member: &MemberEntry, level: usize) {
    let _ = write!(
        out,
        "{}[ {}, {}, null ]",
        indent(level),
        quote(&member.name),
        quote(&member.anchor_ref)
    );
}

/// Top level is indented by four spaces, nested levels by two more each.
fn indent(level: usize) -> String {
    " ".repeat(2 + 2 * level)
}

fn quote(s: &str) -> String {
    Value::String(s.to_string()).to_string()
}
