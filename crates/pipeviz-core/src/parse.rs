//! Loads a [`PipelineDefinition`] from a Graphviz `digraph`.
//!
//! ```text
//! digraph "Nightly Export" {
//!     summary="Export then publish"
//!     anchor_quality="Check"
//!     node [annotation="CustomJob"]
//!     Export [description="Dump tables"]
//!     Check  [description="Row counts", annotation="SQL"]
//!     Export -> Check
//! }
//! ```
//!
//! Nodes declared by a node statement become steps in declaration order.
//! Ids that only appear in edges are not steps, so those edges stay dangling.

use crate::{Decoration, PatternNotes, PipelineDefinition, PipevizError, Step};
use graphviz_rust::dot_structures::{
    Attribute, Edge as DotEdge, EdgeTy, Graph as DotGraph, GraphAttributes, Id, Node as DotNode,
    NodeId, Stmt, Vertex,
};
use std::collections::BTreeMap;

type Attrs = BTreeMap<String, String>;

#[derive(Clone, Debug, Default)]
struct Scope {
    node_defaults: Attrs,
}

#[derive(Debug, Default)]
struct ParseState {
    graph_attrs: Attrs,
    steps: Vec<(String, Attrs)>,
    edges: Vec<(String, String)>,
}

pub fn parse_pipeline_dot(source: &str) -> Result<PipelineDefinition, PipevizError> {
    if has_undirected_edge_token(source) {
        return Err(PipevizError::InvalidDefinition(
            "undirected edge token '--' is not supported".to_string(),
        ));
    }

    let dot_graph = graphviz_rust::parse(source).map_err(PipevizError::DotParse)?;
    convert_graph(dot_graph)
}

fn convert_graph(graph: DotGraph) -> Result<PipelineDefinition, PipevizError> {
    let (graph_id, strict, stmts) = match graph {
        DotGraph::DiGraph { id, strict, stmts } => (graph_id_to_string(&id)?, strict, stmts),
        DotGraph::Graph { .. } => {
            return Err(PipevizError::InvalidDefinition(
                "only 'digraph' is supported".to_string(),
            ));
        }
    };
    if strict {
        return Err(PipevizError::InvalidDefinition(
            "'strict' graphs are not supported".to_string(),
        ));
    }

    let mut state = ParseState::default();
    process_statements(&mut state, &stmts, &Scope::default(), true)?;
    into_definition(state, graph_id)
}

fn into_definition(state: ParseState, graph_id: Option<String>) -> Result<PipelineDefinition, PipevizError> {
    let attrs = state.graph_attrs;
    let name = attrs
        .get("label")
        .or(attrs.get("name"))
        .cloned()
        .or(graph_id)
        .filter(|name| !name.trim().is_empty())
        .ok_or_else(|| {
            PipevizError::InvalidDefinition(
                "pattern needs a graph id or a 'label' graph attribute".to_string(),
            )
        })?;

    let mut definition = PipelineDefinition::new(name);
    if let Some(summary) = attrs.get("summary") {
        definition = definition.with_summary(summary.clone());
    }

    let notes = PatternNotes {
        when_to_use: attrs.get("when_to_use").cloned().unwrap_or_default(),
        design_focus: attrs.get("design_focus").cloned().unwrap_or_default(),
        watch_outs: attrs.get("watch_outs").cloned().unwrap_or_default(),
    };
    if notes != PatternNotes::default() {
        definition = definition.with_notes(notes);
    }

    for decoration in Decoration::ALL {
        if let Some(anchor) = attrs.get(decoration.anchor_attr()) {
            definition = definition.with_anchor(decoration, anchor.clone());
        }
    }

    for (id, node_attrs) in state.steps {
        let description = node_attrs.get("description").cloned().unwrap_or_default();
        let mut step = Step::new(id, description);
        if let Some(annotation) = node_attrs.get("annotation") {
            step = step.annotated(annotation.clone());
        }
        definition = definition.with_step(step);
    }
    definition.edges = state.edges;

    tracing::debug!(
        pattern = %definition.name,
        steps = definition.steps.len(),
        edges = definition.edges.len(),
        "parsed pipeline definition"
    );
    Ok(definition)
}

fn process_statements(
    state: &mut ParseState,
    stmts: &[Stmt],
    parent_scope: &Scope,
    top_level: bool,
) -> Result<(), PipevizError> {
    let mut scope = parent_scope.clone();

    for stmt in stmts {
        match stmt {
            Stmt::GAttribute(graph_attrs) => match graph_attrs {
                GraphAttributes::Node(attrs) => scope.node_defaults.extend(parse_attributes(attrs)?),
                // Edge styling is derived at render time.
                GraphAttributes::Edge(_) => {}
                GraphAttributes::Graph(attrs) => {
                    if top_level {
                        state.graph_attrs.extend(parse_attributes(attrs)?);
                    }
                }
            },
            Stmt::Attribute(attr) => {
                if top_level {
                    let (key, value) = parse_attribute(attr)?;
                    state.graph_attrs.insert(key, value);
                }
            }
            Stmt::Node(node) => process_node_stmt(state, node, &scope)?,
            Stmt::Edge(edge) => process_edge_stmt(state, edge)?,
            Stmt::Subgraph(subgraph) => {
                process_statements(state, &subgraph.stmts, &scope, false)?
            }
        }
    }

    Ok(())
}

fn process_node_stmt(state: &mut ParseState, node: &DotNode, scope: &Scope) -> Result<(), PipevizError> {
    let node_id = parse_node_id(&node.id)?;
    let explicit = parse_attributes(&node.attributes)?;

    match state.steps.iter_mut().find(|(id, _)| *id == node_id) {
        Some((_, attrs)) => attrs.extend(explicit),
        None => {
            let mut attrs = scope.node_defaults.clone();
            attrs.extend(explicit);
            state.steps.push((node_id, attrs));
        }
    }
    Ok(())
}

fn process_edge_stmt(state: &mut ParseState, edge: &DotEdge) -> Result<(), PipevizError> {
    let vertices = match &edge.ty {
        EdgeTy::Pair(from, to) => vec![parse_vertex(from)?, parse_vertex(to)?],
        EdgeTy::Chain(chain) => chain
            .iter()
            .map(parse_vertex)
            .collect::<Result<Vec<_>, _>>()?,
    };

    if vertices.len() < 2 {
        return Err(PipevizError::InvalidDefinition(
            "edge chain must contain at least two vertices".to_string(),
        ));
    }

    for pair in vertices.windows(2) {
        state.edges.push((pair[0].clone(), pair[1].clone()));
    }
    Ok(())
}

fn parse_vertex(vertex: &Vertex) -> Result<String, PipevizError> {
    match vertex {
        Vertex::N(node_id) => parse_node_id(node_id),
        Vertex::S(_) => Err(PipevizError::InvalidDefinition(
            "subgraph vertices in edge statements are not supported".to_string(),
        )),
    }
}

fn parse_node_id(node_id: &NodeId) -> Result<String, PipevizError> {
    if node_id.1.is_some() {
        return Err(PipevizError::InvalidDefinition(
            "ports in node identifiers are not supported".to_string(),
        ));
    }
    id_to_string(&node_id.0)
}

fn parse_attributes(attrs: &[Attribute]) -> Result<Attrs, PipevizError> {
    attrs.iter().map(parse_attribute).collect()
}

fn parse_attribute(attr: &Attribute) -> Result<(String, String), PipevizError> {
    Ok((id_to_string(&attr.0)?, id_to_string(&attr.1)?))
}

fn graph_id_to_string(id: &Id) -> Result<Option<String>, PipevizError> {
    match id {
        Id::Anonymous(_) => Ok(None),
        other => id_to_string(other).map(Some),
    }
}

fn id_to_string(id: &Id) -> Result<String, PipevizError> {
    match id {
        Id::Plain(text) | Id::Anonymous(text) => Ok(text.clone()),
        Id::Escaped(quoted) => quoted
            .strip_prefix('"')
            .and_then(|inner| inner.strip_suffix('"'))
            .map(unescape_dot_string)
            .ok_or_else(|| {
                PipevizError::InvalidDefinition(format!("quoted id {quoted} is not terminated"))
            }),
        Id::Html(_) => Err(PipevizError::InvalidDefinition(
            "HTML ids and labels are not supported".to_string(),
        )),
    }
}

/// Decodes `\n` and `\t`; any other escaped character stands for itself.
fn unescape_dot_string(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    let mut pending_escape = false;

    for ch in input.chars() {
        if !pending_escape && ch == '\\' {
            pending_escape = true;
            continue;
        }
        output.push(match (pending_escape, ch) {
            (true, 'n') => '\n',
            (true, 't') => '\t',
            _ => ch,
        });
        pending_escape = false;
    }
    if pending_escape {
        output.push('\\');
    }
    output
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Lexeme {
    Code,
    Quoted,
    LineComment,
    BlockComment,
}

/// True when `--` occurs in code, outside quoted ids and `//`, `#` or `/* */` comments.
fn has_undirected_edge_token(source: &str) -> bool {
    let mut lexeme = Lexeme::Code;
    let mut chars = source.chars().peekable();

    while let Some(ch) = chars.next() {
        lexeme = match (lexeme, ch) {
            (Lexeme::Code, '-') if chars.peek() == Some(&'-') => return true,
            (Lexeme::Code, '"') => Lexeme::Quoted,
            (Lexeme::Code, '#') => Lexeme::LineComment,
            (Lexeme::Code, '/') if chars.next_if_eq(&'/').is_some() => Lexeme::LineComment,
            (Lexeme::Code, '/') if chars.next_if_eq(&'*').is_some() => Lexeme::BlockComment,
            (Lexeme::Quoted, '\\') => {
                chars.next();
                Lexeme::Quoted
            }
            (Lexeme::Quoted, '"') | (Lexeme::LineComment, '\n') => Lexeme::Code,
            (Lexeme::BlockComment, '*') if chars.next_if_eq(&'/').is_some() => Lexeme::Code,
            (unchanged, _) => unchanged,
        };
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn undirected_token_in_strings_and_comments_expected_ignored() {
        assert!(!has_undirected_edge_token(r#"digraph G { a [label="a -- b"] }"#));
        assert!(!has_undirected_edge_token("digraph G { // a -- b\n a }"));
        assert!(!has_undirected_edge_token("digraph G { /* a -- b */ a }"));
        assert!(!has_undirected_edge_token("# exported -- v2\ndigraph G { a }"));
        assert!(has_undirected_edge_token("# header\ngraph G { a -- b }"));
        assert!(has_undirected_edge_token("graph G { a -- b }"));
    }

    #[test]
    fn unescape_dot_string_newline_and_quote_expected_decoded() {
        assert_eq!(unescape_dot_string(r#"Load\n(\"BQ\")"#), "Load\n(\"BQ\")");
        assert_eq!(unescape_dot_string(r"trailing\"), "trailing\\");
    }

    #[test]
    fn parse_node_defaults_apply_only_to_later_nodes_expected_scoped() {
        let definition = parse_pipeline_dot(
            r#"
            digraph P {
                first
                node [annotation="CustomJob"]
                second
                first -> second
            }
            "#,
        )
        .expect("graph should parse");

        assert_eq!(definition.steps[0].annotation, None);
        assert_eq!(definition.steps[1].annotation.as_deref(), Some("CustomJob"));
    }
}
