use crate::{EdgeStyle, RenderedEdge, RenderedGraph, RenderedNode};
use graphviz_rust::dot_structures::{
    Attribute, Edge as DotEdge, EdgeTy, Graph as DotGraph, GraphAttributes, Id, Node as DotNode,
    NodeId, Stmt, Vertex,
};
use graphviz_rust::printer::{DotPrinter, PrinterContext};
use std::collections::BTreeMap;

/// Prints `graph` as a Graphviz `digraph`.
pub fn to_dot(graph: &RenderedGraph) -> String {
    to_dot_graph(graph).print(&mut PrinterContext::default())
}

pub fn to_dot_graph(graph: &RenderedGraph) -> DotGraph {
    let mut stmts = Vec::with_capacity(graph.nodes.len() + graph.edges.len() + 3);

    let mut graph_attrs = vec![attr("layout", graph.layout.as_str())];
    if let Some(rank_dir) = graph.rank_dir {
        graph_attrs.push(attr("rankdir", rank_dir.as_str()));
    }
    graph_attrs.extend(attr_list(&graph.attrs.graph));
    stmts.push(Stmt::GAttribute(GraphAttributes::Graph(graph_attrs)));

    if !graph.attrs.node.is_empty() {
        stmts.push(Stmt::GAttribute(GraphAttributes::Node(attr_list(
            &graph.attrs.node,
        ))));
    }
    if !graph.attrs.edge.is_empty() {
        stmts.push(Stmt::GAttribute(GraphAttributes::Edge(attr_list(
            &graph.attrs.edge,
        ))));
    }

    stmts.extend(graph.nodes.iter().map(node_stmt));
    stmts.extend(graph.edges.iter().map(edge_stmt));

    DotGraph::DiGraph {
        id: quoted(&graph.id),
        strict: false,
        stmts,
    }
}

fn node_stmt(node: &RenderedNode) -> Stmt {
    let mut attributes = vec![attr("label", &node.label)];
    if let Some(shape) = node.style.shape {
        attributes.push(attr("shape", shape.as_str()));
    }
    if let Some(color) = &node.style.fill_color {
        attributes.push(attr("fillcolor", color));
    }

    Stmt::Node(DotNode {
        id: NodeId(quoted(&node.id), None),
        attributes,
    })
}

fn edge_stmt(edge: &RenderedEdge) -> Stmt {
    let mut attributes = Vec::new();
    if let Some(label) = &edge.label {
        attributes.push(attr("label", label));
    }
    if edge.style == EdgeStyle::Dashed {
        attributes.push(attr("style", "dashed"));
    }

    Stmt::Edge(DotEdge {
        ty: EdgeTy::Pair(
            Vertex::N(NodeId(quoted(&edge.from), None)),
            Vertex::N(NodeId(quoted(&edge.to), None)),
        ),
        attributes,
    })
}

fn attr_list(values: &BTreeMap<String, String>) -> Vec<Attribute> {
    values.iter().map(|(key, value)| attr(key, value)).collect()
}

fn attr(key: &str, value: &str) -> Attribute {
    Attribute(Id::Plain(key.to_string()), quoted(value))
}

fn quoted(value: &str) -> Id {
    Id::Escaped(format!("\"{}\"", escape_dot_string(value)))
}

fn escape_dot_string(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '"' => output.push_str("\\\""),
            '\\' => output.push_str("\\\\"),
            '\n' => output.push_str("\\n"),
            '\r' => {}
            other => output.push(other),
        }
    }
    output
}
