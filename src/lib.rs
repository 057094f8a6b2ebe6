//! # Namespace catalog
//!
//! Typed model of a hierarchical documentation namespace index, as emitted
//! by documentation generators in navtree artifacts (`namespaces_dup.js`).
//!
//! ## Design
//!
//! The artifact is a nested list of 3-tuples:
//!
//! ```text
//! [ name, doc_ref, payload ]
//!
//! payload = "namespace_token"              → subtree, resolved by token
//!         | [ [ name, anchor_ref, null ] ] → member list
//!         | [ [ name, doc_ref, payload ] ] → nested namespaces
//!         | null | []                      → no children
//! ```
//!
//! Parsing produces an immutable [`Catalog`] that preserves source order at
//! every level. Qualified names join levels with `.`:
//!
//! ```
//! use namespace_catalog::{Catalog, Order};
//!
//! let catalog: Catalog = r#"var namespaces_dup =
//! [
//!     [ "Backlog", "namespace_backlog.html", "namespace_backlog" ],
//!     [ "main", "namespacemain.html", [
//!       [ "app", "namespacemain.html#a5fa94f0581009434c7a63791944d6ff4", null ]
//!     ] ]
//! ];"#
//!     .parse()
//!     .unwrap();
//!
//! let app = catalog.lookup("main.app").unwrap();
//! assert_eq!(app.target(), "namespacemain.html#a5fa94f0581009434c7a63791944d6ff4");
//!
//! let names: Vec<_> = catalog.iter(Order::PreOrder).map(|v| v.path).collect();
//! assert_eq!(names, ["Backlog", "main", "main.app"]);
//! ```

pub mod artifact;
pub mod catalog;
pub mod error;
pub mod parser;
pub mod resolve;
pub mod traverse;

pub use artifact::{read_artifact, render_artifact};
pub use catalog::{
    Catalog, Children, DEFAULT_VARIABLE, MemberEntry, NamespaceEntry, Node, SEPARATOR, parent_of,
};
pub use error::CatalogError;
pub use parser::CatalogParser;
pub use resolve::{DirectoryResolver, NoSubtrees, SubtreeResolver};
pub use traverse::{Iter, Order, Visit};
