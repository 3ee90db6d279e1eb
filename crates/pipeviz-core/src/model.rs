use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// One node of a pipeline pattern.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub id: String,
    pub description: String,
    /// Execution-environment hint such as a runtime or managed service name.
    pub annotation: Option<String>,
}

impl Step {
    pub fn new(id: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            annotation: None,
        }
    }

    pub fn annotated(mut self, annotation: impl Into<String>) -> Self {
        self.annotation = Some(annotation.into());
        self
    }

    /// Annotation text, treating an empty string the same as no annotation.
    pub fn annotation_text(&self) -> Option<&str> {
        self.annotation
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternNotes {
    pub when_to_use: String,
    pub design_focus: String,
    pub watch_outs: String,
}

/// Optional, non-executable node that illustrates a concern next to a pattern.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Decoration {
    Quality,
    Metrics,
    Metadata,
    ArtifactRegistry,
    ManualApproval,
}

impl Decoration {
    pub const ALL: [Decoration; 5] = [
        Decoration::Quality,
        Decoration::Metrics,
        Decoration::Metadata,
        Decoration::ArtifactRegistry,
        Decoration::ManualApproval,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Quality => "quality",
            Self::Metrics => "metrics",
            Self::Metadata => "metadata",
            Self::ArtifactRegistry => "artifact-registry",
            Self::ManualApproval => "manual-approval",
        }
    }

    /// Node id of the decorative node. Namespaced so it never collides with step ids.
    pub fn node_id(self) -> &'static str {
        match self {
            Self::Quality => "decoration.dq",
            Self::Metrics => "decoration.metrics",
            Self::Metadata => "decoration.metadata",
            Self::ArtifactRegistry => "decoration.registry",
            Self::ManualApproval => "decoration.approval",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Quality => "Data quality checks",
            Self::Metrics => "Metrics + alerts",
            Self::Metadata => "Lineage/metadata",
            Self::ArtifactRegistry => "Artifact Registry\n(images)",
            Self::ManualApproval => "Manual approval",
        }
    }

    /// Graph attribute that names this decoration's anchor in DOT pattern files.
    pub fn anchor_attr(self) -> &'static str {
        match self {
            Self::Quality => "anchor_quality",
            Self::Metrics => "anchor_metrics",
            Self::Metadata => "anchor_metadata",
            Self::ArtifactRegistry => "anchor_artifact_registry",
            Self::ManualApproval => "anchor_manual_approval",
        }
    }
}

impl fmt::Display for Decoration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Decoration {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase().replace('_', "-");
        match normalized.as_str() {
            "quality" | "dq" => Ok(Self::Quality),
            "metrics" => Ok(Self::Metrics),
            "metadata" | "lineage" => Ok(Self::Metadata),
            "artifact-registry" | "registry" => Ok(Self::ArtifactRegistry),
            "manual-approval" | "approval" => Ok(Self::ManualApproval),
            _ => Err(format!(
                "unknown decoration '{value}'; expected one of: {}",
                Decoration::ALL.map(Decoration::name).join(", ")
            )),
        }
    }
}

/// A named pipeline shape. Edges are `(from, to)` step ids; endpoints are
/// expected to name declared steps but nothing enforces it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineDefinition {
    pub name: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub notes: Option<PatternNotes>,
    pub steps: Vec<Step>,
    pub edges: Vec<(String, String)>,
    #[serde(default)]
    pub anchors: BTreeMap<Decoration, String>,
}

impl PipelineDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            summary: String::new(),
            notes: None,
            steps: Vec::new(),
            edges: Vec::new(),
            anchors: BTreeMap::new(),
        }
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }

    pub fn with_notes(mut self, notes: PatternNotes) -> Self {
        self.notes = Some(notes);
        self
    }

    pub fn with_step(mut self, step: Step) -> Self {
        self.steps.push(step);
        self
    }

    pub fn with_edge(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.edges.push((from.into(), to.into()));
        self
    }

    pub fn with_anchor(mut self, decoration: Decoration, step_id: impl Into<String>) -> Self {
        self.anchors.insert(decoration, step_id.into());
        self
    }

    pub fn step(&self, id: &str) -> Option<&Step> {
        self.steps.iter().find(|step| step.id == id)
    }

    pub fn anchor(&self, decoration: Decoration) -> Option<&str> {
        self.anchors.get(&decoration).map(String::as_str)
    }
}
