use crate::{PatternNotes, PipelineDefinition};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepRow {
    pub step: String,
    pub description: String,
    /// Blank when the step has no annotation.
    pub annotation: String,
}

/// Tabular companion to a rendered pattern: every step, then every declared
/// edge as `from -> to` (unresolved edges included).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternSheet {
    pub name: String,
    pub summary: String,
    pub notes: Option<PatternNotes>,
    pub steps: Vec<StepRow>,
    pub edges: Vec<String>,
}

impl PatternSheet {
    pub fn from_definition(definition: &PipelineDefinition) -> Self {
        let steps = definition
            .steps
            .iter()
            .map(|step| StepRow {
                step: step.id.clone(),
                description: step.description.clone(),
                annotation: step.annotation.clone().unwrap_or_default(),
            })
            .collect();
        let edges = definition
            .edges
            .iter()
            .map(|(from, to)| format!("{from} -> {to}"))
            .collect();

        Self {
            name: definition.name.clone(),
            summary: definition.summary.clone(),
            notes: definition.notes.clone(),
            steps,
            edges,
        }
    }

    /// Plain-text table sized to the widest cell in each column.
    pub fn to_text(&self) -> String {
        let headers = ["step", "description", "annotation"];
        let mut widths = headers.map(str::len);
        for row in &self.steps {
            widths[0] = widths[0].max(row.step.chars().count());
            widths[1] = widths[1].max(row.description.chars().count());
            widths[2] = widths[2].max(row.annotation.chars().count());
        }

        let mut out = format!("{}\n", self.name);
        if !self.summary.is_empty() {
            out.push_str(&format!("{}\n", self.summary));
        }
        out.push('\n');
        out.push_str(&table_line(&headers, &widths));
        let rule = widths.map(|width| "-".repeat(width));
        out.push_str(&table_line(
            &[rule[0].as_str(), rule[1].as_str(), rule[2].as_str()],
            &widths,
        ));
        for row in &self.steps {
            out.push_str(&table_line(
                &[row.step.as_str(), row.description.as_str(), row.annotation.as_str()],
                &widths,
            ));
        }

        out.push_str("\nedges\n");
        for edge in &self.edges {
            out.push_str(&format!("  {edge}\n"));
        }

        if let Some(notes) = &self.notes {
            out.push_str(&format!("\nwhen to use: {}\n", notes.when_to_use));
            out.push_str(&format!("design focus: {}\n", notes.design_focus));
            out.push_str(&format!("watch-outs: {}\n", notes.watch_outs));
        }
        out
    }
}

fn table_line(cells: &[&str; 3], widths: &[usize; 3]) -> String {
    let mut line = String::new();
    for (index, cell) in cells.iter().enumerate() {
        if index > 0 {
            line.push_str("  ");
        }
        line.push_str(cell);
        if index + 1 < cells.len() {
            let padding = widths[index].saturating_sub(cell.chars().count());
            line.push_str(&" ".repeat(padding));
        }
    }
    line.push('\n');
    line
}
