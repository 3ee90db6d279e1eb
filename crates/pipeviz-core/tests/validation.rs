use pipeviz_core::{
    Catalog, Decoration, Diagnostic, LintRule, PipelineDefinition, Severity, Step, validate,
    validate_or_raise,
};

fn chain(ids: &[&str]) -> PipelineDefinition {
    let mut definition = PipelineDefinition::new("Test");
    for id in ids {
        definition = definition.with_step(Step::new(*id, ""));
    }
    for pair in ids.windows(2) {
        definition = definition.with_edge(pair[0], pair[1]);
    }
    definition
}

#[test]
fn validate_builtin_catalog_expected_no_diagnostics() {
    let catalog = Catalog::builtin();
    for definition in catalog.definitions() {
        assert_eq!(validate(definition, &[]), Vec::new(), "{}", definition.name);
    }
}

#[test]
fn validate_dangling_edge_expected_warning_only() {
    let definition = chain(&["a", "b"]).with_edge("b", "ghost");

    let diagnostics = validate_or_raise(&definition, &[]).expect("warnings should not raise");
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].rule, "edge_endpoints_exist");
    assert_eq!(diagnostics[0].severity, Severity::Warning);
    assert_eq!(
        diagnostics[0].edge,
        Some(("b".to_string(), "ghost".to_string()))
    );
}

#[test]
fn validate_duplicate_step_expected_error() {
    let definition = chain(&["a", "b"]).with_step(Step::new("a", "again"));

    let error = validate_or_raise(&definition, &[]).expect_err("duplicate ids should raise");
    assert_eq!(error.errors_count, 1);
    assert_eq!(error.diagnostics[0].rule, "unique_step_ids");
}

#[test]
fn validate_cycle_expected_error_on_cycle_members() {
    let definition = chain(&["a", "b", "c"]).with_edge("c", "b");

    let diagnostics = validate(&definition, &[]);
    let flagged: Vec<&str> = diagnostics
        .iter()
        .filter(|d| d.rule == "acyclic")
        .filter_map(|d| d.node_id.as_deref())
        .collect();
    assert_eq!(flagged, vec!["b", "c"]);
}

#[test]
fn validate_self_loop_expected_error() {
    let definition = chain(&["a"]).with_edge("a", "a");
    let diagnostics = validate(&definition, &[]);
    assert!(
        diagnostics
            .iter()
            .any(|d| d.rule == "self_loop" && d.is_error())
    );
    assert!(!diagnostics.iter().any(|d| d.rule == "acyclic"));
}

#[test]
fn validate_missing_anchor_expected_warning() {
    let definition = chain(&["a"]).with_anchor(Decoration::Metadata, "z");
    let diagnostics = validate(&definition, &[]);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].rule, "anchor_exists");
    assert!(diagnostics[0].message.contains("metadata"));
}

struct RequireSummary;

impl LintRule for RequireSummary {
    fn name(&self) -> &str {
        "require_summary"
    }

    fn apply(&self, definition: &PipelineDefinition) -> Vec<Diagnostic> {
        if definition.summary.is_empty() {
            vec![Diagnostic::new(self.name(), Severity::Warning, "pattern has no summary")]
        } else {
            Vec::new()
        }
    }
}

#[test]
fn validate_extra_rule_expected_included() {
    let diagnostics = validate(&chain(&["a"]), &[&RequireSummary]);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].rule, "require_summary");
    assert_eq!(
        diagnostics[0].to_string(),
        "warning [require_summary] pattern has no summary"
    );
}
