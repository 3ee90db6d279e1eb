use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    #[default]
    Dot,
    Circo,
}

impl Layout {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dot => "dot",
            Self::Circo => "circo",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RankDir {
    #[serde(rename = "LR")]
    LeftToRight,
    #[serde(rename = "TB")]
    TopToBottom,
}

impl RankDir {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::LeftToRight => "LR",
            Self::TopToBottom => "TB",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeShape {
    Box,
    Note,
}

impl NodeShape {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Box => "box",
            Self::Note => "note",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeStyle {
    pub shape: Option<NodeShape>,
    pub fill_color: Option<String>,
}

impl NodeStyle {
    pub fn boxed() -> Self {
        Self {
            shape: Some(NodeShape::Box),
            fill_color: None,
        }
    }

    pub fn note() -> Self {
        Self {
            shape: Some(NodeShape::Note),
            fill_color: None,
        }
    }

    pub fn filled(mut self, color: impl Into<String>) -> Self {
        self.fill_color = Some(color.into());
        self
    }
}

/// Solid edges carry the core flow; dashed edges attach decorations.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeStyle {
    #[default]
    Solid,
    Dashed,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedNode {
    pub id: String,
    pub label: String,
    pub style: NodeStyle,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedEdge {
    pub from: String,
    pub to: String,
    pub label: Option<String>,
    pub style: EdgeStyle,
}

impl RenderedEdge {
    pub fn endpoints(&self) -> (&str, &str) {
        (&self.from, &self.to)
    }
}

/// Graph-wide defaults passed straight through to the drawing engine.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphAttrs {
    pub graph: BTreeMap<String, String>,
    pub node: BTreeMap<String, String>,
    pub edge: BTreeMap<String, String>,
}

impl GraphAttrs {
    pub fn is_empty(&self) -> bool {
        self.graph.is_empty() && self.node.is_empty() && self.edge.is_empty()
    }
}

/// Directed graph ready for display. Node and edge order is emission order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedGraph {
    pub id: String,
    pub layout: Layout,
    pub rank_dir: Option<RankDir>,
    pub attrs: GraphAttrs,
    pub nodes: Vec<RenderedNode>,
    pub edges: Vec<RenderedEdge>,
}

impl RenderedGraph {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            layout: Layout::Dot,
            rank_dir: None,
            attrs: GraphAttrs::default(),
            nodes: Vec::new(),
            edges: Vec::new(),
        }
    }

    pub fn with_rank_dir(mut self, rank_dir: RankDir) -> Self {
        self.rank_dir = Some(rank_dir);
        self
    }

    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    pub fn add_node(&mut self, id: impl Into<String>, label: impl Into<String>, style: NodeStyle) {
        self.nodes.push(RenderedNode {
            id: id.into(),
            label: label.into(),
            style,
        });
    }

    pub fn add_edge(&mut self, from: impl Into<String>, to: impl Into<String>) {
        self.push_edge(from.into(), to.into(), None, EdgeStyle::Solid);
    }

    pub fn add_labeled_edge(
        &mut self,
        from: impl Into<String>,
        to: impl Into<String>,
        label: impl Into<String>,
    ) {
        self.push_edge(from.into(), to.into(), Some(label.into()), EdgeStyle::Solid);
    }

    pub fn add_dashed_edge(&mut self, from: impl Into<String>, to: impl Into<String>) {
        self.push_edge(from.into(), to.into(), None, EdgeStyle::Dashed);
    }

    fn push_edge(&mut self, from: String, to: String, label: Option<String>, style: EdgeStyle) {
        self.edges.push(RenderedEdge {
            from,
            to,
            label,
            style,
        });
    }

    pub fn node(&self, id: &str) -> Option<&RenderedNode> {
        self.nodes.iter().find(|node| node.id == id)
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.node(id).is_some()
    }

    pub fn contains_edge(&self, from: &str, to: &str) -> bool {
        self.edges
            .iter()
            .any(|edge| edge.from == from && edge.to == to)
    }

    pub fn outgoing_edges<'a>(&'a self, node_id: &'a str) -> impl Iterator<Item = &'a RenderedEdge> + 'a {
        self.edges.iter().filter(move |edge| edge.from == node_id)
    }

    pub fn incoming_edges<'a>(&'a self, node_id: &'a str) -> impl Iterator<Item = &'a RenderedEdge> + 'a {
        self.edges.iter().filter(move |edge| edge.to == node_id)
    }
}
