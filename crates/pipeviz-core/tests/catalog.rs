use pipeviz_core::builtin::{BACKFILL, CDC_MERGE, INCREMENTAL_LOAD, SIMPLE_ETL, SNAPSHOT_DIFF};
use pipeviz_core::{Catalog, Decoration, PipelineDefinition, PipevizError, Step};

#[test]
fn builtin_list_names_expected_insertion_order() {
    let catalog = Catalog::builtin();
    assert_eq!(
        catalog.list_names(),
        vec![SIMPLE_ETL, INCREMENTAL_LOAD, BACKFILL, CDC_MERGE, SNAPSHOT_DIFF]
    );
}

#[test]
fn builtin_simple_etl_expected_original_steps_and_annotations() {
    let catalog = Catalog::builtin();
    let etl = catalog.get("Simple ETL").expect("Simple ETL should exist");

    let ids: Vec<&str> = etl.steps.iter().map(|step| step.id.as_str()).collect();
    assert_eq!(ids, vec!["Extract", "Validate", "Transform", "Load"]);

    let annotations: Vec<Option<&str>> = etl
        .steps
        .iter()
        .map(|step| step.annotation.as_deref())
        .collect();
    assert_eq!(
        annotations,
        vec![
            Some("CustomJob"),
            Some("Pipeline component"),
            Some("Dataflow / CustomJob"),
            Some("BigQuery / GCS"),
        ]
    );
    assert_eq!(
        etl.edges,
        vec![
            ("Extract".to_string(), "Validate".to_string()),
            ("Validate".to_string(), "Transform".to_string()),
            ("Transform".to_string(), "Load".to_string()),
        ]
    );
}

#[test]
fn builtin_patterns_expected_chain_of_four_or_five_steps_with_every_anchor() {
    let catalog = Catalog::builtin();
    for definition in catalog.definitions() {
        assert!(
            (4..=5).contains(&definition.steps.len()),
            "{} has {} steps",
            definition.name,
            definition.steps.len()
        );
        assert_eq!(definition.edges.len(), definition.steps.len() - 1);
        assert!(!definition.summary.is_empty());
        assert!(definition.notes.is_some());
        for decoration in Decoration::ALL {
            let anchor = definition
                .anchor(decoration)
                .unwrap_or_else(|| panic!("{} lacks a {decoration} anchor", definition.name));
            assert!(definition.step(anchor).is_some());
        }
    }
}

#[test]
fn get_unknown_name_expected_not_found() {
    let catalog = Catalog::builtin();
    let error = catalog
        .get("unknown-pattern-xyz")
        .expect_err("lookup should fail");
    assert!(matches!(error, PipevizError::NotFound { ref name } if name == "unknown-pattern-xyz"));
    assert!(error.to_string().contains("unknown-pattern-xyz"));
}

#[test]
fn from_definitions_duplicate_name_expected_invalid_definition() {
    let error = Catalog::from_definitions([
        PipelineDefinition::new("Twice"),
        PipelineDefinition::new("Twice"),
    ])
    .expect_err("duplicate names should be rejected");
    assert!(matches!(error, PipevizError::InvalidDefinition(_)));
}

#[test]
fn extend_builtin_expected_appended_and_original_untouched() {
    let builtin = Catalog::builtin();
    let custom = PipelineDefinition::new("Nightly Export")
        .with_step(Step::new("Export", "Dump tables"))
        .with_step(Step::new("Publish", "Copy to bucket"))
        .with_edge("Export", "Publish");

    let extended = builtin.extend([custom]).expect("extend should succeed");

    assert_eq!(extended.len(), builtin.len() + 1);
    assert_eq!(extended.list_names().last(), Some(&"Nightly Export"));
    assert!(!builtin.contains("Nightly Export"));
}

#[test]
fn extend_with_builtin_name_expected_rejected() {
    let builtin = Catalog::builtin();
    let error = builtin
        .extend([PipelineDefinition::new(SIMPLE_ETL)])
        .expect_err("shadowing a built-in pattern should fail");
    assert!(error.to_string().contains("duplicate pattern name"));
}

#[test]
fn definition_json_expected_kebab_case_anchor_keys() {
    let catalog = Catalog::builtin();
    let definition = catalog.get(BACKFILL).expect("Backfill should exist");

    let value = serde_json::to_value(definition).expect("definition should serialize");
    assert_eq!(
        value["anchors"]["artifact-registry"].as_str(),
        Some("Extract")
    );
    assert_eq!(value["steps"][4]["annotation"].as_str(), Some("BQ / Logging"));

    let decoded: PipelineDefinition =
        serde_json::from_value(value).expect("definition should deserialize");
    assert_eq!(&decoded, definition);
}
