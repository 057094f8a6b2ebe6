//! Properties that must hold for any parsed catalog.

use std::fs;

use namespace_catalog::{
    Catalog, CatalogError, CatalogParser, DirectoryResolver, Order, render_artifact,
};
use tempfile::TempDir;

const ARTIFACT: &str = include_str!("fixtures/namespaces_dup.js");

const NESTED: &str = r#"var nav =
[
    [ "Game", "namespace_game.html", [
      [ "Rules", "namespace_rules.html", [
        [ "score", "namespace_rules.html#a1", null ],
        [ "reveal", "namespace_rules.html#a2", null ]
      ] ],
      [ "Session", "namespace_session.html", "namespace_session" ]
    ] ],
    [ "Setup", "namespace_setup.html", [] ]
];"#;

fn samples() -> Vec<Catalog> {
    vec![ARTIFACT.parse().unwrap(), NESTED.parse().unwrap()]
}

#[test]
fn every_visit_resolves_by_its_path() {
    for catalog in samples() {
        for order in [Order::PreOrder, Order::PostOrder] {
            for visit in catalog.iter(order) {
                assert_eq!(catalog.lookup(&visit.path), Some(visit.node), "{}", visit.path);
            }
        }
    }
}

#[test]
fn pre_order_keeps_sibling_order_at_every_depth() {
    let catalog: Catalog = NESTED.parse().unwrap();
    let names: Vec<_> = catalog.iter(Order::PreOrder).map(|v| v.path).collect();
    assert_eq!(
        names,
        [
            "Game",
            "Game.Rules",
            "Game.Rules.score",
            "Game.Rules.reveal",
            "Game.Session",
            "Setup",
        ]
    );
}

#[test]
fn render_then_parse_is_identity() {
    for catalog in samples() {
        let rendered = render_artifact(&catalog);
        let reparsed: Catalog = rendered.parse().unwrap();
        assert_eq!(reparsed, catalog);
        // Rendering is stable too
        assert_eq!(render_artifact(&reparsed), rendered);
    }
}

#[test]
fn rendering_the_fixture_reproduces_it() {
    let catalog: Catalog = ARTIFACT.parse().unwrap();
    assert_eq!(render_artifact(&catalog).trim_end(), ARTIFACT.trim_end());
}

#[test]
fn directory_subtrees_are_resolved() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("namespace_backlog.js"),
        r#"var namespace_backlog =
[
    [ "add_feature", "namespace_backlog.html#a1", null ],
    [ "remove_feature", "namespace_backlog.html#a2", null ]
];"#,
    )
    .unwrap();

    let parser = CatalogParser::with_resolver(DirectoryResolver::new(dir.path()));
    let catalog = parser.parse_str(ARTIFACT).unwrap();

    let backlog = catalog.namespace("Backlog").unwrap();
    assert_eq!(backlog.subtree_ref, None);
    let names: Vec<_> = catalog
        .members_of("Backlog")
        .iter()
        .map(|m| m.name.as_str())
        .collect();
    assert_eq!(names, ["add_feature", "remove_feature"]);
    assert_eq!(
        catalog.lookup("Backlog.remove_feature").unwrap().target(),
        "namespace_backlog.html#a2"
    );

    // Unresolved tokens stay references
    assert_eq!(
        catalog.namespace("Player").unwrap().subtree_ref.as_deref(),
        Some("namespace_player")
    );

    // Resolved catalogs render inline and survive a plain re-parse
    let reparsed: Catalog = render_artifact(&catalog).parse().unwrap();
    assert_eq!(reparsed, catalog);
}

#[test]
fn strict_resolution_reports_first_missing_subtree() {
    let dir = TempDir::new().unwrap();
    let parser =
        CatalogParser::with_resolver(DirectoryResolver::new(dir.path())).require_resolved(true);

    match parser.parse_str(ARTIFACT) {
        Err(CatalogError::UnresolvedReference { location, reference }) => {
            assert_eq!(reference, "namespace_backlog");
            assert_eq!(location, "<root>[0]");
        }
        other => panic!("expected UnresolvedReference, got {other:?}"),
    }
}

#[test]
fn descendants_and_ancestry() {
    let catalog: Catalog = NESTED.parse().unwrap();

    let subtree: Vec<_> = catalog
        .descendants_of("Game.Rules", Order::PreOrder)
        .unwrap()
        .map(|v| v.path)
        .collect();
    assert_eq!(subtree, ["Game.Rules", "Game.Rules.score", "Game.Rules.reveal"]);

    assert_eq!(catalog.is_descendant_of_path("Game.Rules.score", "Game"), Some(true));
    assert_eq!(catalog.is_descendant_of_path("Setup", "Game"), Some(false));
    // Prefix of a name is not an ancestor
    assert_eq!(catalog.is_descendant_of_path("Game.Session", "Game.Se"), None);
}
