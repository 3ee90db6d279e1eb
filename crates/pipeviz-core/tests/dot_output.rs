use pipeviz_core::diagrams::{CicdOptions, cicd_cycle};
use pipeviz_core::{Catalog, Decoration, Renderer, Toggles, parse_pipeline_dot, to_dot, to_dot_graph};
use graphviz_rust::dot_structures::{Graph as DotGraph, Stmt};

#[test]
fn to_dot_simple_etl_expected_parseable_digraph_with_same_shape() {
    let catalog = Catalog::builtin();
    let graph = Renderer::new(&catalog)
        .render("Simple ETL", &Toggles::all())
        .expect("render should succeed");

    let dot = to_dot(&graph);
    assert!(dot.starts_with("digraph"));

    let reparsed = parse_pipeline_dot(&dot).expect("emitted DOT should parse");
    assert_eq!(reparsed.name, "Simple ETL");
    assert_eq!(reparsed.steps.len(), graph.nodes.len());
    assert_eq!(reparsed.edges.len(), graph.edges.len());
    assert!(
        reparsed
            .edges
            .contains(&("Validate".to_string(), Decoration::Quality.node_id().to_string()))
    );
}

#[test]
fn to_dot_annotated_label_expected_escaped_newline() {
    let catalog = Catalog::builtin();
    let graph = Renderer::new(&catalog)
        .render("Simple ETL", &Toggles::new().annotated(true))
        .expect("render should succeed");

    let dot = to_dot(&graph);
    assert!(dot.contains(r#""Extract\n(CustomJob)""#), "{dot}");
    assert!(dot.contains(r#""Simple ETL""#));
}

#[test]
fn to_dot_graph_statements_expected_defaults_then_nodes_then_edges() {
    let catalog = Catalog::builtin();
    let graph = Renderer::new(&catalog)
        .render("Backfill", &Toggles::new().with(Decoration::Metrics))
        .expect("render should succeed");

    let DotGraph::DiGraph { strict, stmts, .. } = to_dot_graph(&graph) else {
        panic!("expected a digraph");
    };
    assert!(!strict);
    assert!(matches!(stmts.first(), Some(Stmt::GAttribute(_))));

    let nodes = stmts.iter().filter(|stmt| matches!(stmt, Stmt::Node(_))).count();
    let edges = stmts.iter().filter(|stmt| matches!(stmt, Stmt::Edge(_))).count();
    assert_eq!(nodes, 6);
    assert_eq!(edges, 5);
}

#[test]
fn to_dot_decoration_edge_expected_dashed_style() {
    let catalog = Catalog::builtin();
    let graph = Renderer::new(&catalog)
        .render("CDC Merge", &Toggles::new().with(Decoration::Metadata))
        .expect("render should succeed");

    let dot = to_dot(&graph);
    assert!(dot.contains("dashed"));
    assert!(dot.contains("note"));
}

#[test]
fn to_dot_cicd_cycle_expected_circo_layout() {
    let dot = to_dot(&cicd_cycle(CicdOptions::default()));
    assert!(dot.contains("circo"));
    assert!(dot.contains("next change"));
}
