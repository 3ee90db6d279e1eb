use pipeviz_core::{Catalog, PatternSheet, PipelineDefinition, Step};

#[test]
fn pattern_sheet_simple_etl_expected_rows_and_edge_lines() {
    let catalog = Catalog::builtin();
    let sheet = PatternSheet::from_definition(catalog.get("Simple ETL").expect("pattern exists"));

    assert_eq!(sheet.steps.len(), 4);
    assert_eq!(sheet.steps[0].step, "Extract");
    assert_eq!(sheet.steps[0].description, "Pull data from source");
    assert_eq!(sheet.steps[0].annotation, "CustomJob");
    assert_eq!(
        sheet.edges,
        vec!["Extract -> Validate", "Validate -> Transform", "Transform -> Load"]
    );
}

#[test]
fn pattern_sheet_missing_annotation_and_dangling_edge_expected_listed() {
    let definition = PipelineDefinition::new("Loose")
        .with_step(Step::new("a", "first"))
        .with_edge("a", "ghost");

    let sheet = PatternSheet::from_definition(&definition);
    assert_eq!(sheet.steps[0].annotation, "");
    assert_eq!(sheet.edges, vec!["a -> ghost"]);
}

#[test]
fn pattern_sheet_to_text_expected_aligned_columns() {
    let catalog = Catalog::builtin();
    let sheet = PatternSheet::from_definition(catalog.get("CDC Merge").expect("pattern exists"));
    let text = sheet.to_text();

    assert!(text.starts_with("CDC Merge\n"));
    assert!(text.contains("Change feed plus de-duplication before merge."));
    assert!(text.contains("  Read Change Feed -> Deduplicate\n"));
    assert!(text.contains("watch-outs: Out-of-order events and schema drift."));

    let header = text
        .lines()
        .find(|line| line.starts_with("step"))
        .expect("header line should exist");
    let row = text
        .lines()
        .find(|line| line.starts_with("Deduplicate"))
        .expect("row should exist");
    assert_eq!(header.find("description"), row.find("Resolve"));
}
