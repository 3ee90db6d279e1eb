//! Standalone explanatory diagrams that are not catalog patterns but share the
//! same graph shape: system architecture, the CI/CD loop, the container image
//! flow and environment promotion.

use crate::{Layout, NodeStyle, RankDir, RenderedGraph};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Diagram {
    Architecture,
    CicdCycle,
    DockerFlow,
    EnvPromotion,
}

impl Diagram {
    pub fn all() -> [Diagram; 4] {
        [
            Diagram::Architecture,
            Diagram::CicdCycle,
            Diagram::DockerFlow,
            Diagram::EnvPromotion,
        ]
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Architecture => "architecture",
            Self::CicdCycle => "cicd",
            Self::DockerFlow => "docker",
            Self::EnvPromotion => "promotion",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Architecture => "Architecture",
            Self::CicdCycle => "CI/CD Flow",
            Self::DockerFlow => "Container image flow",
            Self::EnvPromotion => "Environment promotion",
        }
    }
}

impl fmt::Display for Diagram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Diagram {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Diagram::all()
            .into_iter()
            .find(|diagram| diagram.name() == value.trim().to_ascii_lowercase())
            .ok_or_else(|| {
                format!(
                    "unknown diagram '{value}'; expected one of: {}",
                    Diagram::all().map(Diagram::name).join(", ")
                )
            })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchitectureOptions {
    pub include_artifact_registry: bool,
}

impl Default for ArchitectureOptions {
    fn default() -> Self {
        Self {
            include_artifact_registry: true,
        }
    }
}

pub fn architecture(options: ArchitectureOptions) -> RenderedGraph {
    let mut graph = RenderedGraph::new(Diagram::Architecture.title())
        .with_rank_dir(RankDir::TopToBottom);
    apply_architecture_theme(&mut graph);

    graph.add_node("GitHub", "GitHub\n(dev/test/prod)", NodeStyle::boxed().filled("#e8f5e9"));
    graph.add_node("CB", "Cloud Build\n(CI/CD)", NodeStyle::boxed().filled("#e3f2fd"));
    graph.add_node("GCS", "GCS Buckets\n(artifacts)", NodeStyle::boxed().filled("#fff8e1"));
    graph.add_node(
        "Vertex",
        "Vertex Pipelines\n(KFP Components with ETL/ELT Steps)",
        NodeStyle::boxed().filled("#ede7f6"),
    );
    graph.add_node("Sched", "Scheduler", NodeStyle::boxed().filled("#fce4ec"));
    graph.add_node("Obs", "Monitoring\n(alerts)", NodeStyle::boxed().filled("#f3e5f5"));

    graph.add_labeled_edge("GitHub", "CB", "push/merge");
    graph.add_labeled_edge("CB", "GCS", "upload artifacts");
    graph.add_labeled_edge("CB", "Vertex", "deploy/update");
    graph.add_labeled_edge("Sched", "Vertex", "runs on schedule");
    graph.add_labeled_edge("Vertex", "Obs", "logs/metrics");

    if options.include_artifact_registry {
        graph.add_node("AR", "Artifact Registry\n(images)", NodeStyle::boxed().filled("#e0f7fa"));
        graph.add_labeled_edge("CB", "AR", "optional: build/push");
        graph.add_labeled_edge("Vertex", "AR", "pull images");
    }

    graph
}

fn apply_architecture_theme(graph: &mut RenderedGraph) {
    let attrs = &mut graph.attrs;
    for (key, value) in [
        ("bgcolor", "#f8fafc"),
        ("nodesep", "0.2"),
        ("ranksep", "0.25"),
        ("pad", "0.08"),
        ("ratio", "compress"),
        ("size", "5.5,6.5!"),
        ("dpi", "65"),
    ] {
        attrs.graph.insert(key.to_string(), value.to_string());
    }
    for (key, value) in [
        ("style", "filled"),
        ("fontname", "Helvetica"),
        ("color", "#0f5fa8"),
        ("fontcolor", "#0b1f44"),
        ("fillcolor", "#e6f0fb"),
        ("penwidth", "1.4"),
        ("fontsize", "15"),
        ("margin", "0.06,0.04"),
    ] {
        attrs.node.insert(key.to_string(), value.to_string());
    }
    for (key, value) in [("color", "#5b7bc6"), ("penwidth", "1.0"), ("fontsize", "15")] {
        attrs.edge.insert(key.to_string(), value.to_string());
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CicdOptions {
    pub docker_lane: bool,
    pub quality_gates: bool,
    pub observability: bool,
}

impl Default for CicdOptions {
    fn default() -> Self {
        Self {
            docker_lane: true,
            quality_gates: true,
            observability: true,
        }
    }
}

/// The CI/CD loop drawn as a cycle; each optional lane detours between two
/// loop stages with dashed edges.
pub fn cicd_cycle(options: CicdOptions) -> RenderedGraph {
    let mut graph = RenderedGraph::new(Diagram::CicdCycle.title()).with_layout(Layout::Circo);
    graph
        .attrs
        .graph
        .insert("overlap".to_string(), "false".to_string());

    let stages = [
        ("1", "1) GitHub\npush to branch"),
        ("2", "2) Cloud Build\ntrigger fires"),
        ("3", "3) Cloud Build\nruns cloudbuild.yaml"),
        ("4", "4) Deploy Vertex\npipeline template/job"),
        ("5", "5) Schedule\n(run cadence)"),
        ("6", "6) Iterate\nchange code/config"),
    ];
    for (id, label) in stages {
        graph.add_node(id, label, NodeStyle::boxed());
    }
    for pair in stages.windows(2) {
        graph.add_edge(pair[0].0, pair[1].0);
    }
    graph.add_labeled_edge("6", "1", "next change");

    if options.quality_gates {
        add_lane(&mut graph, "G", "Quality gates\n(lint/test/validate)", "2", "3");
    }
    if options.docker_lane {
        add_lane(&mut graph, "D", "Optional Docker lane\nbuild/push images", "3", "4");
    }
    if options.observability {
        add_lane(&mut graph, "O", "Ops loop\nmonitor + alert + rollback", "4", "6");
    }

    graph
}

fn add_lane(graph: &mut RenderedGraph, id: &str, label: &str, from: &str, to: &str) {
    graph.add_node(id, label, NodeStyle::note());
    graph.add_dashed_edge(from, id);
    graph.add_dashed_edge(id, to);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DockerOptions {
    pub base_image: bool,
    pub build_cache: bool,
}

impl Default for DockerOptions {
    fn default() -> Self {
        Self {
            base_image: true,
            build_cache: true,
        }
    }
}

pub fn docker_flow(options: DockerOptions) -> RenderedGraph {
    let mut graph = RenderedGraph::new(Diagram::DockerFlow.title()).with_rank_dir(RankDir::LeftToRight);

    graph.add_node("repo", "Repo (components + Dockerfile)", NodeStyle::boxed());
    graph.add_node("build", "Cloud Build\nbuild image", NodeStyle::boxed());
    graph.add_node("ar", "Artifact Registry\nimage tag", NodeStyle::boxed());
    graph.add_node("template", "Pipeline template\n(image refs)", NodeStyle::boxed());
    graph.add_node("vertex", "Vertex Pipeline Job\n(run container)", NodeStyle::boxed());

    graph.add_edge("repo", "build");
    graph.add_edge("build", "ar");
    graph.add_edge("ar", "template");
    graph.add_edge("template", "vertex");

    if options.base_image {
        graph.add_node("base", "Base image\n(Python/OS)", NodeStyle::note());
        graph.add_dashed_edge("base", "repo");
    }
    if options.build_cache {
        graph.add_node("cache", "Build cache", NodeStyle::note());
        graph.add_dashed_edge("cache", "build");
    }

    graph
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromotionOptions {
    pub manual_approval: bool,
    pub project_split: bool,
    pub rebuild_per_env: bool,
}

impl Default for PromotionOptions {
    fn default() -> Self {
        Self {
            manual_approval: true,
            project_split: true,
            rebuild_per_env: false,
        }
    }
}

/// Dev to test to prod. With `rebuild_per_env` each environment rebuilds from
/// the versioned artifacts instead of promoting the same build.
pub fn env_promotion(options: PromotionOptions) -> RenderedGraph {
    let mut graph =
        RenderedGraph::new(Diagram::EnvPromotion.title()).with_rank_dir(RankDir::LeftToRight);

    graph.add_node("dev", "Dev\n(branch + bucket)", NodeStyle::boxed());
    graph.add_node("test", "Test\n(branch + bucket)", NodeStyle::boxed());
    graph.add_node("prod", "Prod\n(branch + bucket)", NodeStyle::boxed());
    graph.add_node("artifact", "Versioned artifacts\n(SHA + template)", NodeStyle::boxed());
    graph.add_edge("dev", "artifact");

    if options.rebuild_per_env {
        graph.add_node("build_test", "Rebuild in test", NodeStyle::boxed());
        graph.add_node("build_prod", "Rebuild in prod", NodeStyle::boxed());
        graph.add_edge("artifact", "build_test");
        graph.add_edge("build_test", "test");
        graph.add_edge("test", "build_prod");
        graph.add_edge("build_prod", "prod");
    } else {
        graph.add_edge("artifact", "test");
        graph.add_edge("test", "prod");
    }

    if options.manual_approval {
        add_lane(&mut graph, "approve", "Manual approval", "test", "prod");
    }
    if options.project_split {
        graph.add_node("projects", "Separate projects\n(optional)", NodeStyle::note());
        graph.add_dashed_edge("dev", "projects");
    }

    graph
}
