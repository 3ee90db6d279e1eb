use crate::{Diagnostic, PipelineDefinition, Severity, ValidationError};
use std::collections::{BTreeMap, BTreeSet, HashSet};

pub trait LintRule {
    fn name(&self) -> &str;
    fn apply(&self, definition: &PipelineDefinition) -> Vec<Diagnostic>;
}

/// Reports problems in a pattern definition. Rendering never consults this;
/// dangling references are warnings because the renderer tolerates them.
pub fn validate(definition: &PipelineDefinition, extra_rules: &[&dyn LintRule]) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    diagnostics.extend(rule_unique_step_ids(definition));
    diagnostics.extend(rule_edge_endpoints_exist(definition));
    diagnostics.extend(rule_self_loop(definition));
    diagnostics.extend(rule_acyclic(definition));
    diagnostics.extend(rule_anchor_exists(definition));

    for rule in extra_rules {
        diagnostics.extend(rule.apply(definition));
    }

    diagnostics
}

pub fn validate_or_raise(
    definition: &PipelineDefinition,
    extra_rules: &[&dyn LintRule],
) -> Result<Vec<Diagnostic>, ValidationError> {
    let diagnostics = validate(definition, extra_rules);
    if diagnostics.iter().any(Diagnostic::is_error) {
        return Err(ValidationError::new(diagnostics));
    }
    Ok(diagnostics)
}

fn declared_ids(definition: &PipelineDefinition) -> HashSet<&str> {
    definition.steps.iter().map(|step| step.id.as_str()).collect()
}

fn rule_unique_step_ids(definition: &PipelineDefinition) -> Vec<Diagnostic> {
    let mut seen = HashSet::new();
    let mut reported = BTreeSet::new();
    let mut diagnostics = Vec::new();

    for step in &definition.steps {
        if !seen.insert(step.id.as_str()) && reported.insert(step.id.as_str()) {
            diagnostics.push(
                Diagnostic::new(
                    "unique_step_ids",
                    Severity::Error,
                    format!("step id '{}' is declared more than once", step.id),
                )
                .with_node_id(step.id.clone()),
            );
        }
    }
    diagnostics
}

fn rule_edge_endpoints_exist(definition: &PipelineDefinition) -> Vec<Diagnostic> {
    let ids = declared_ids(definition);
    let mut diagnostics = Vec::new();

    for (from, to) in &definition.edges {
        for endpoint in [from, to] {
            if !ids.contains(endpoint.as_str()) {
                diagnostics.push(
                    Diagnostic::new(
                        "edge_endpoints_exist",
                        Severity::Warning,
                        format!("edge endpoint '{endpoint}' is not a declared step; the edge will not be drawn"),
                    )
                    .with_edge(from.clone(), to.clone()),
                );
            }
        }
    }
    diagnostics
}

fn rule_self_loop(definition: &PipelineDefinition) -> Vec<Diagnostic> {
    definition
        .edges
        .iter()
        .filter(|(from, to)| from == to)
        .map(|(from, to)| {
            Diagnostic::new("self_loop", Severity::Error, "step depends on itself")
                .with_edge(from.clone(), to.clone())
        })
        .collect()
}

/// Kahn's algorithm over resolved, non-self edges; steps that never reach
/// in-degree zero are on a cycle or downstream of one.
fn rule_acyclic(definition: &PipelineDefinition) -> Vec<Diagnostic> {
    let ids = declared_ids(definition);
    let mut in_degree: BTreeMap<&str, usize> = ids.iter().map(|id| (*id, 0)).collect();
    let mut successors: BTreeMap<&str, Vec<&str>> = BTreeMap::new();

    for (from, to) in &definition.edges {
        if from == to || !ids.contains(from.as_str()) || !ids.contains(to.as_str()) {
            continue;
        }
        successors.entry(from.as_str()).or_default().push(to.as_str());
        if let Some(degree) = in_degree.get_mut(to.as_str()) {
            *degree += 1;
        }
    }

    let mut ready: Vec<&str> = in_degree
        .iter()
        .filter(|(_, degree)| **degree == 0)
        .map(|(id, _)| *id)
        .collect();
    while let Some(id) = ready.pop() {
        for &next in successors.get(id).into_iter().flatten() {
            if let Some(degree) = in_degree.get_mut(next) {
                *degree -= 1;
                if *degree == 0 {
                    ready.push(next);
                }
            }
        }
    }

    in_degree
        .into_iter()
        .filter(|(_, degree)| *degree > 0)
        .map(|(id, _)| {
            Diagnostic::new("acyclic", Severity::Error, "step is on or behind a dependency cycle")
                .with_node_id(id)
        })
        .collect()
}

fn rule_anchor_exists(definition: &PipelineDefinition) -> Vec<Diagnostic> {
    let ids = declared_ids(definition);
    definition
        .anchors
        .iter()
        .filter(|(_, anchor)| !ids.contains(anchor.as_str()))
        .map(|(decoration, anchor)| {
            Diagnostic::new(
                "anchor_exists",
                Severity::Warning,
                format!("{decoration} anchor '{anchor}' is not a declared step; the decoration will not be drawn"),
            )
            .with_node_id(anchor.clone())
        })
        .collect()
}
