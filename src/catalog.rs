//! Immutable namespace tree with qualified-name lookup.

use std::str::FromStr;

use serde::Serialize;

use crate::error::CatalogError;
use crate::parser::CatalogParser;
use crate::traverse::{Iter, Order};

/// Separator between segments of a qualified name (`"main.app"`).
pub const SEPARATOR: char = '.';

/// Variable name used when the artifact is a bare literal.
pub const DEFAULT_VARIABLE: &str = "namespaces";

/// Named symbol within a namespace, addressed by an anchor in a document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MemberEntry {
    pub name: String,
    pub anchor_ref: String,
}

/// Children of a namespace: never a mix of members and nested namespaces.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "entries", rename_all = "snake_case")]
pub enum Children {
    #[default]
    Empty,
    Namespaces(Vec<NamespaceEntry>),
    Members(Vec<MemberEntry>),
}

impl Children {
    pub fn len(&self) -> usize {
        match self {
            Self::Empty => 0,
            Self::Namespaces(v) => v.len(),
            Self::Members(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A namespace node of the catalog.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NamespaceEntry {
    pub name: String,
    pub doc_ref: String,
    pub children: Children,
    /// Token of a subtree that was not resolved at parse time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtree_ref: Option<String>,
}

impl NamespaceEntry {
    /// Member list of this namespace, empty unless it holds members.
    pub fn members(&self) -> &[MemberEntry] {
        match &self.children {
            Children::Members(members) => members,
            _ => &[],
        }
    }

    /// Nested namespaces, empty unless it holds namespaces.
    pub fn namespaces(&self) -> &[NamespaceEntry] {
        match &self.children {
            Children::Namespaces(namespaces) => namespaces,
            _ => &[],
        }
    }
}

/// Borrowed view of either kind of catalog entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Node<'a> {
    Namespace(&'a NamespaceEntry),
    Member(&'a MemberEntry),
}

impl<'a> Node<'a> {
    pub fn name(&self) -> &'a str {
        match self {
            Self::Namespace(ns) => &ns.name,
            Self::Member(m) => &m.name,
        }
    }

    /// `doc_ref` of a namespace or `anchor_ref` of a member.
    pub fn target(&self) -> &'a str {
        match self {
            Self::Namespace(ns) => &ns.doc_ref,
            Self::Member(m) => &m.anchor_ref,
        }
    }

    pub fn as_namespace(&self) -> Option<&'a NamespaceEntry> {
        match self {
            Self::Namespace(ns) => Some(ns),
            Self::Member(_) => None,
        }
    }

    pub fn as_member(&self) -> Option<&'a MemberEntry> {
        match self {
            Self::Member(m) => Some(m),
            Self::Namespace(_) => None,
        }
    }

    pub(crate) fn children(&self) -> Nodes<'a> {
        match self {
            Self::Namespace(ns) => Nodes::of(&ns.children),
            Self::Member(_) => Nodes::Empty,
        }
    }

    /// Direct child by name.
    fn child(&self, name: &str) -> Option<Node<'a>> {
        self.children().find(|n| n.name() == name)
    }
}

/// Iterator over one level of siblings.
#[derive(Clone, Debug)]
pub(crate) enum Nodes<'a> {
    Empty,
    One(Option<Node<'a>>),
    Namespaces(std::slice::Iter<'a, NamespaceEntry>),
    Members(std::slice::Iter<'a, MemberEntry>),
}

impl<'a> Nodes<'a> {
    pub(crate) fn of(children: &'a Children) -> Self {
        match children {
            Children::Empty => Self::Empty,
            Children::Namespaces(v) => Self::Namespaces(v.iter()),
            Children::Members(v) => Self::Members(v.iter()),
        }
    }

    pub(crate) fn roots(roots: &'a [NamespaceEntry]) -> Self {
        Self::Namespaces(roots.iter())
    }
}

impl<'a> Iterator for Nodes<'a> {
    type Item = Node<'a>;

    fn next(&mut self) -> Option<Node<'a>> {
        match self {
            Self::Empty => None,
            Self::One(node) => node.take(),
            Self::Namespaces(it) => it.next().map(Node::Namespace),
            Self::Members(it) => it.next().map(Node::Member),
        }
    }
}

/// Ordered, immutable tree of namespaces.
///
/// Built once by [`CatalogParser`]; every accessor borrows.
///
/// ```text
/// catalog.lookup("main.app")          → Some(Node::Member(..))
/// catalog.members_of("main")          → [app, controller]
/// catalog.iter(Order::PreOrder)       → Backlog, CustomPopup, …, tests
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Catalog {
    variable: String,
    roots: Vec<NamespaceEntry>,
    #[serde(skip)]
    len: usize,
    #[serde(skip)]
    depth: usize,
}

impl Catalog {
    pub(crate) fn new(variable: String, roots: Vec<NamespaceEntry>) -> Self {
        let mut len = 0;
        let mut depth = 0;
        for visit in Iter::new(Nodes::roots(&roots), None, Order::PreOrder) {
            len += 1;
            depth = depth.max(visit.depth + 1);
        }
        Self {
            variable,
            roots,
            len,
            depth,
        }
    }

    /// Parse an artifact without subtree resolution.
    pub fn parse(src: &str) -> Result<Self, CatalogError> {
        CatalogParser::new().parse_str(src)
    }

    /// Variable name declared by the artifact.
    #[inline]
    pub fn variable(&self) -> &str {
        &self.variable
    }

    /// Top-level namespaces in source order.
    #[inline]
    pub fn roots(&self) -> &[NamespaceEntry] {
        &self.roots
    }

    /// Total number of entries, members included.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Number of levels (0 = empty, 1 = only top-level entries).
    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Resolve a dot-separated qualified name, walking siblings by name at
    /// each level. `None` means not found.
    pub fn lookup(&self, qualified_name: &str) -> Option<Node<'_>> {
        let mut segments = qualified_name.split(SEPARATOR);
        let first = segments.next()?;
        let mut node = self
            .roots
            .iter()
            .find(|ns| ns.name == first)
            .map(Node::Namespace)?;
        for segment in segments {
            node = node.child(segment)?;
        }
        Some(node)
    }

    /// Namespace lookup; members resolve to `None`.
    pub fn namespace(&self, qualified_name: &str) -> Option<&NamespaceEntry> {
        self.lookup(qualified_name)?.as_namespace()
    }

    #[inline]
    pub fn contains(&self, qualified_name: &str) -> bool {
        self.lookup(qualified_name).is_some()
    }

    /// Members of a namespace in source order.
    ///
    /// Empty when the namespace holds nested namespaces, has no payload, or
    /// does not exist.
    pub fn members_of(&self, namespace_name: &str) -> &[MemberEntry] {
        self.namespace(namespace_name)
            .map(NamespaceEntry::members)
            .unwrap_or(&[])
    }

    /// Lazy traversal of the whole catalog.
    pub fn iter(&self, order: Order) -> Iter<'_> {
        Iter::new(Nodes::roots(&self.roots), None, order)
    }

    /// Traversal of one subtree, the entry itself included.
    ///
    /// Returns `None` if `qualified_name` is not in the catalog.
    pub fn descendants_of(&self, qualified_name: &str, order: Order) -> Option<Iter<'_>> {
        let node = self.lookup(qualified_name)?;
        Some(Iter::single(node, qualified_name, order))
    }

    /// Check if `candidate` is a descendant of (or equal to) `ancestor`.
    ///
    /// Returns `None` if either name is not found.
    ///
    /// ```text
    /// catalog.is_descendant_of_path("main.app", "main") → Some(true)
    /// catalog.is_descendant_of_path("Backlog", "main")  → Some(false)
    /// catalog.is_descendant_of_path("Unknown", "main")  → None
    /// ```
    pub fn is_descendant_of_path(&self, candidate: &str, ancestor: &str) -> Option<bool> {
        self.lookup(candidate)?;
        self.lookup(ancestor)?;
        Some(
            candidate == ancestor
                || candidate
                    .strip_prefix(ancestor)
                    .is_some_and(|rest| rest.starts_with(SEPARATOR)),
        )
    }
}

impl FromStr for Catalog {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = crate::traverse::Visit<'a>;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter(Order::PreOrder)
    }
}

/// Parent part of a qualified name: `"main.app"` → `Some("main")`.
pub fn parent_of(qualified_name: &str) -> Option<&str> {
    qualified_name
        .rfind(SEPARATOR)
        .map(|pos| &qualified_name[..pos])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ns(name: &str, children: Children) -> NamespaceEntry {
        NamespaceEntry {
            name: name.into(),
            doc_ref: format!("namespace_{}.html", name.to_lowercase()),
            children,
            subtree_ref: None,
        }
    }

    fn member(name: &str) -> MemberEntry {
        MemberEntry {
            name: name.into(),
            anchor_ref: format!("members.html#{name}"),
        }
    }

    fn sample() -> Catalog {
        Catalog::new(
            DEFAULT_VARIABLE.into(),
            vec![
                ns(
                    "Movement",
                    Children::Namespaces(vec![
                        ns("Idle", Children::Empty),
                        ns("Running", Children::Members(vec![member("speed")])),
                    ]),
                ),
                ns("Combat", Children::Members(vec![member("attack"), member("block")])),
            ],
        )
    }

    #[test]
    fn counts_entries_and_depth() {
        let catalog = sample();
        assert_eq!(catalog.len(), 7);
        assert_eq!(catalog.depth(), 3);
        assert!(!catalog.is_empty());

        let empty = Catalog::new(DEFAULT_VARIABLE.into(), Vec::new());
        assert!(empty.is_empty());
        assert_eq!(empty.len(), 0);
        assert_eq!(empty.depth(), 0);
    }

    #[test]
    fn lookup_walks_levels() {
        let catalog = sample();

        let running = catalog.lookup("Movement.Running").unwrap();
        assert_eq!(running.name(), "Running");
        assert_eq!(running.target(), "namespace_running.html");

        let speed = catalog.lookup("Movement.Running.speed").unwrap();
        assert_eq!(speed.as_member().unwrap().anchor_ref, "members.html#speed");

        assert!(catalog.lookup("Combat.attack").unwrap().as_member().is_some());
    }

    #[test]
    fn lookup_not_found() {
        let catalog = sample();
        assert_eq!(catalog.lookup("Unknown"), None);
        assert_eq!(catalog.lookup(""), None);
        assert_eq!(catalog.lookup("Movement."), None);
        assert_eq!(catalog.lookup(".Movement"), None);
        assert_eq!(catalog.lookup("Movement.Idle.Deeper"), None);
        // Members have no children
        assert_eq!(catalog.lookup("Combat.attack.x"), None);
        // Names are case sensitive
        assert_eq!(catalog.lookup("movement"), None);
    }

    #[test]
    fn members_of_only_returns_member_lists() {
        let catalog = sample();
        let names: Vec<_> = catalog.members_of("Combat").iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["attack", "block"]);

        assert!(catalog.members_of("Movement").is_empty());
        assert!(catalog.members_of("Movement.Idle").is_empty());
        assert!(catalog.members_of("Unknown").is_empty());
        assert!(catalog.members_of("Combat.attack").is_empty());
    }

    #[test]
    fn descendant_checks() {
        let catalog = sample();
        assert_eq!(catalog.is_descendant_of_path("Movement.Idle", "Movement"), Some(true));
        assert_eq!(catalog.is_descendant_of_path("Movement.Running.speed", "Movement"), Some(true));
        assert_eq!(catalog.is_descendant_of_path("Movement", "Movement"), Some(true));
        assert_eq!(catalog.is_descendant_of_path("Combat.attack", "Movement"), Some(false));
        assert_eq!(catalog.is_descendant_of_path("Movement", "Movement.Idle"), Some(false));
        assert_eq!(catalog.is_descendant_of_path("Unknown", "Movement"), None);
    }

    #[test]
    fn parent_of_splits_last_segment() {
        assert_eq!(parent_of("main.app"), Some("main"));
        assert_eq!(parent_of("a.b.c"), Some("a.b"));
        assert_eq!(parent_of("main"), None);
    }

    #[test]
    fn serializes_to_json() {
        let catalog = Catalog::new(
            "ns".into(),
            vec![ns("Combat", Children::Members(vec![member("attack")]))],
        );
        let json = serde_json::to_value(&catalog).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "variable": "ns",
                "roots": [{
                    "name": "Combat",
                    "doc_ref": "namespace_combat.html",
                    "children": {
                        "kind": "members",
                        "entries": [{ "name": "attack", "anchor_ref": "members.html#attack" }]
                    }
                }]
            })
        );
    }
}
