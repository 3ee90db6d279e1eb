use crate::{Decoration, PatternNotes, PipelineDefinition, Step};

pub const SIMPLE_ETL: &str = "Simple ETL";
pub const INCREMENTAL_LOAD: &str = "Incremental Load";
pub const BACKFILL: &str = "Backfill";
pub const CDC_MERGE: &str = "CDC Merge";
pub const SNAPSHOT_DIFF: &str = "Snapshot Diff";

pub(crate) fn patterns() -> Vec<PipelineDefinition> {
    vec![
        simple_etl(),
        incremental_load(),
        backfill(),
        cdc_merge(),
        snapshot_diff(),
    ]
}

fn notes(when_to_use: &str, design_focus: &str, watch_outs: &str) -> PatternNotes {
    PatternNotes {
        when_to_use: when_to_use.to_string(),
        design_focus: design_focus.to_string(),
        watch_outs: watch_outs.to_string(),
    }
}

fn chain(mut definition: PipelineDefinition) -> PipelineDefinition {
    let ids: Vec<String> = definition.steps.iter().map(|step| step.id.clone()).collect();
    for pair in ids.windows(2) {
        definition = definition.with_edge(pair[0].clone(), pair[1].clone());
    }
    definition
}

fn simple_etl() -> PipelineDefinition {
    let definition = PipelineDefinition::new(SIMPLE_ETL)
        .with_summary("Baseline extract → validate → transform → load flow.")
        .with_notes(notes(
            "Batch loads where each run reprocesses a bounded input.",
            "Keep each step a single component with clear inputs and outputs.",
            "Validation that only logs, and loads that are not idempotent.",
        ))
        .with_step(Step::new("Extract", "Pull data from source").annotated("CustomJob"))
        .with_step(Step::new("Validate", "Run data quality checks").annotated("Pipeline component"))
        .with_step(Step::new("Transform", "Transform / enrich data").annotated("Dataflow / CustomJob"))
        .with_step(Step::new("Load", "Write to BigQuery / GCS").annotated("BigQuery / GCS"));

    chain(definition)
        .with_anchor(Decoration::Quality, "Validate")
        .with_anchor(Decoration::Metrics, "Load")
        .with_anchor(Decoration::Metadata, "Extract")
        .with_anchor(Decoration::ArtifactRegistry, "Transform")
        .with_anchor(Decoration::ManualApproval, "Load")
}

fn incremental_load() -> PipelineDefinition {
    let definition = PipelineDefinition::new(INCREMENTAL_LOAD)
        .with_summary("Watermark-driven delta processing with idempotent merges.")
        .with_notes(notes(
            "High-frequency updates where late-arriving data is expected.",
            "Track a watermark and keep merges idempotent.",
            "Watermark drift, duplicates, and partial retries.",
        ))
        .with_step(
            Step::new("Get Watermark", "Read last processed checkpoint")
                .annotated("BigQuery / Metadata"),
        )
        .with_step(Step::new("Extract Delta", "Pull only changed records").annotated("CustomJob"))
        .with_step(Step::new("Validate", "Run DQ checks").annotated("Pipeline component"))
        .with_step(Step::new("Upsert", "Merge into target table").annotated("BigQuery MERGE"))
        .with_step(
            Step::new("Update Watermark", "Write new checkpoint").annotated("BigQuery / Metadata"),
        );

    chain(definition)
        .with_anchor(Decoration::Quality, "Validate")
        .with_anchor(Decoration::Metrics, "Upsert")
        .with_anchor(Decoration::Metadata, "Update Watermark")
        .with_anchor(Decoration::ArtifactRegistry, "Extract Delta")
        .with_anchor(Decoration::ManualApproval, "Upsert")
}

fn backfill() -> PipelineDefinition {
    let definition = PipelineDefinition::new(BACKFILL)
        .with_summary("Partitioned reprocessing with metrics at the end.")
        .with_notes(notes(
            "Reprocess historical partitions or rebuild a table.",
            "Partition planning and concurrency controls.",
            "Cost spikes and partial failures by partition.",
        ))
        .with_step(
            Step::new("Plan Partitions", "Generate date partitions to process")
                .annotated("CustomJob"),
        )
        .with_step(Step::new("Extract", "Pull partitioned raw data").annotated("CustomJob"))
        .with_step(Step::new("Transform", "Partition-wise transform").annotated("Dataflow / CustomJob"))
        .with_step(Step::new("Load", "Write partition outputs").annotated("BigQuery / GCS"))
        .with_step(Step::new("Publish Metrics", "Counts, failures, latency").annotated("BQ / Logging"));

    chain(definition)
        .with_anchor(Decoration::Quality, "Transform")
        .with_anchor(Decoration::Metrics, "Publish Metrics")
        .with_anchor(Decoration::Metadata, "Plan Partitions")
        .with_anchor(Decoration::ArtifactRegistry, "Extract")
        .with_anchor(Decoration::ManualApproval, "Load")
}

fn cdc_merge() -> PipelineDefinition {
    let definition = PipelineDefinition::new(CDC_MERGE)
        .with_summary("Change feed plus de-duplication before merge.")
        .with_notes(notes(
            "Streaming change data capture feeds a serving table.",
            "De-duplication and merge correctness.",
            "Out-of-order events and schema drift.",
        ))
        .with_step(Step::new("Read Change Feed", "Ingest CDC stream").annotated("Datastream / BQ"))
        .with_step(
            Step::new("Deduplicate", "Resolve late and duplicate events")
                .annotated("SQL / CustomJob"),
        )
        .with_step(Step::new("Merge Upsert", "Apply changes to target").annotated("BigQuery MERGE"))
        .with_step(Step::new("Audit Log", "Write audit rows").annotated("BQ / Logging"));

    chain(definition)
        .with_anchor(Decoration::Quality, "Deduplicate")
        .with_anchor(Decoration::Metrics, "Audit Log")
        .with_anchor(Decoration::Metadata, "Merge Upsert")
        .with_anchor(Decoration::ArtifactRegistry, "Deduplicate")
        .with_anchor(Decoration::ManualApproval, "Merge Upsert")
}

fn snapshot_diff() -> PipelineDefinition {
    let definition = PipelineDefinition::new(SNAPSHOT_DIFF)
        .with_summary("Full snapshot compare with applied deltas.")
        .with_notes(notes(
            "Upstream only provides full snapshots.",
            "Diff computation and efficient delta writes.",
            "Large diffs and late snapshot arrivals.",
        ))
        .with_step(Step::new("Extract Snapshot", "Full snapshot extract").annotated("CustomJob"))
        .with_step(Step::new("Compare Snapshots", "Detect changes").annotated("SQL / Dataflow"))
        .with_step(Step::new("Apply Deltas", "Update targets").annotated("BigQuery / GCS"))
        .with_step(Step::new("Publish Metrics", "Counts, drift, failures").annotated("BQ / Logging"));

    chain(definition)
        .with_anchor(Decoration::Quality, "Compare Snapshots")
        .with_anchor(Decoration::Metrics, "Publish Metrics")
        .with_anchor(Decoration::Metadata, "Extract Snapshot")
        .with_anchor(Decoration::ArtifactRegistry, "Compare Snapshots")
        .with_anchor(Decoration::ManualApproval, "Apply Deltas")
}
