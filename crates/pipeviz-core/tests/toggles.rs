use pipeviz_core::{
    Catalog, Decoration, EdgeStyle, NodeShape, PipelineDefinition, RenderedGraph, Renderer, Step,
    Toggles, render_definition,
};

fn render(name: &str, toggles: &Toggles) -> RenderedGraph {
    let catalog = Catalog::builtin();
    Renderer::new(&catalog)
        .render(name, toggles)
        .expect("render should succeed")
}

#[test]
fn decoration_toggle_off_expected_exactly_one_node_and_edge_removed() {
    for decoration in Decoration::ALL {
        let with = render("Incremental Load", &Toggles::all());
        let without = render("Incremental Load", &Toggles::all().without(decoration));

        assert_eq!(with.nodes.len(), without.nodes.len() + 1);
        assert_eq!(with.edges.len(), without.edges.len() + 1);

        let remaining_nodes: Vec<_> = with
            .nodes
            .iter()
            .filter(|node| node.id != decoration.node_id())
            .cloned()
            .collect();
        let remaining_edges: Vec<_> = with
            .edges
            .iter()
            .filter(|edge| edge.to != decoration.node_id())
            .cloned()
            .collect();
        assert_eq!(remaining_nodes, without.nodes, "{decoration}");
        assert_eq!(remaining_edges, without.edges, "{decoration}");
    }
}

#[test]
fn quality_decoration_expected_note_leaf_with_dashed_edge_from_anchor() {
    let graph = render("Backfill", &Toggles::new().with(Decoration::Quality));

    let node = graph
        .node(Decoration::Quality.node_id())
        .expect("quality node should exist");
    assert_eq!(node.label, "Data quality checks");
    assert_eq!(node.style.shape, Some(NodeShape::Note));

    let attached: Vec<_> = graph.incoming_edges(Decoration::Quality.node_id()).collect();
    assert_eq!(attached.len(), 1);
    assert_eq!(attached[0].from, "Transform");
    assert_eq!(attached[0].style, EdgeStyle::Dashed);
    assert_eq!(graph.outgoing_edges(Decoration::Quality.node_id()).count(), 0);
}

#[test]
fn decoration_labels_expected_fixed_text() {
    let graph = render("CDC Merge", &Toggles::all());
    let label = |decoration: Decoration| {
        graph
            .node(decoration.node_id())
            .map(|node| node.label.clone())
            .expect("decoration node should exist")
    };

    assert_eq!(label(Decoration::Metrics), "Metrics + alerts");
    assert_eq!(label(Decoration::Metadata), "Lineage/metadata");
    assert_eq!(label(Decoration::ArtifactRegistry), "Artifact Registry\n(images)");
    assert_eq!(label(Decoration::ManualApproval), "Manual approval");
}

#[test]
fn decoration_without_anchor_expected_skipped() {
    let definition = PipelineDefinition::new("Bare")
        .with_step(Step::new("only", ""))
        .with_anchor(Decoration::Metrics, "missing");

    let graph = render_definition(
        &definition,
        &Toggles::new()
            .with(Decoration::Quality)
            .with(Decoration::Metrics),
    );

    assert_eq!(graph.nodes.len(), 1);
    assert!(graph.edges.is_empty());
}

#[test]
fn decoration_from_str_aliases_expected_parsed() {
    assert_eq!("dq".parse::<Decoration>(), Ok(Decoration::Quality));
    assert_eq!("artifact_registry".parse::<Decoration>(), Ok(Decoration::ArtifactRegistry));
    assert_eq!("Manual-Approval".parse::<Decoration>(), Ok(Decoration::ManualApproval));
    assert!("sparkles".parse::<Decoration>().is_err());
}
