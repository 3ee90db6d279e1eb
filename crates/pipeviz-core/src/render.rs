//! Pattern rendering: catalog entry plus display toggles in, [`RenderedGraph`] out.
//!
//! Rendering is total over any [`PipelineDefinition`]. Edges and anchors that
//! reference ids outside the declared steps are dropped rather than reported,
//! so a malformed pattern still produces a partial diagram.

use crate::{
    Catalog, Decoration, NodeStyle, PipelineDefinition, PipevizError, RankDir, RenderedGraph, Step,
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Toggles {
    pub annotated: bool,
    pub decorations: BTreeSet<Decoration>,
}

impl Toggles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn all() -> Self {
        Self {
            annotated: true,
            decorations: Decoration::ALL.into_iter().collect(),
        }
    }

    pub fn annotated(mut self, annotated: bool) -> Self {
        self.annotated = annotated;
        self
    }

    pub fn with(mut self, decoration: Decoration) -> Self {
        self.decorations.insert(decoration);
        self
    }

    pub fn without(mut self, decoration: Decoration) -> Self {
        self.decorations.remove(&decoration);
        self
    }

    pub fn is_enabled(&self, decoration: Decoration) -> bool {
        self.decorations.contains(&decoration)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RenderSpec {
    pub pattern: String,
    pub toggles: Toggles,
}

impl RenderSpec {
    pub fn new(pattern: impl Into<String>, toggles: Toggles) -> Self {
        Self {
            pattern: pattern.into(),
            toggles,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Renderer<'a> {
    catalog: &'a Catalog,
}

impl<'a> Renderer<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    pub fn list_names(&self) -> Vec<&'a str> {
        self.catalog.list_names()
    }

    pub fn render(&self, name: &str, toggles: &Toggles) -> Result<RenderedGraph, PipevizError> {
        let definition = self.catalog.get(name)?;
        Ok(render_definition(definition, toggles))
    }

    pub fn render_spec(&self, spec: &RenderSpec) -> Result<RenderedGraph, PipevizError> {
        self.render(&spec.pattern, &spec.toggles)
    }
}

pub fn render_definition(definition: &PipelineDefinition, toggles: &Toggles) -> RenderedGraph {
    let mut graph = RenderedGraph::new(definition.name.clone()).with_rank_dir(RankDir::LeftToRight);

    for step in &definition.steps {
        graph.add_node(step.id.clone(), step_label(step, toggles.annotated), NodeStyle::boxed());
    }

    let emitted: HashSet<&str> = definition.steps.iter().map(|step| step.id.as_str()).collect();
    let edges = retain_resolved_edges(&definition.edges, &emitted);
    let dropped = definition.edges.len() - edges.len();
    for (from, to) in edges {
        graph.add_edge(from.clone(), to.clone());
    }

    for decoration in &toggles.decorations {
        let Some(anchor) = definition.anchor(*decoration) else {
            continue;
        };
        if !emitted.contains(anchor) {
            continue;
        }
        graph.add_node(decoration.node_id(), decoration.label(), NodeStyle::note());
        graph.add_dashed_edge(anchor.to_string(), decoration.node_id());
    }

    tracing::debug!(
        pattern = %definition.name,
        nodes = graph.nodes.len(),
        edges = graph.edges.len(),
        dropped_edges = dropped,
        annotated = toggles.annotated,
        "rendered pattern"
    );
    graph
}

/// Keeps only edges whose endpoints are both in `emitted`, preserving order.
pub fn retain_resolved_edges<'e>(
    edges: &'e [(String, String)],
    emitted: &HashSet<&str>,
) -> Vec<&'e (String, String)> {
    edges
        .iter()
        .filter(|(from, to)| emitted.contains(from.as_str()) && emitted.contains(to.as_str()))
        .collect()
}

pub fn step_label(step: &Step, annotated: bool) -> String {
    match (annotated, step.annotation_text()) {
        (true, Some(annotation)) => format!("{}\n({annotation})", step.id),
        _ => step.id.clone(),
    }
}
