use crate::{PipelineDefinition, PipevizError, builtin};
use std::collections::BTreeMap;

/// Immutable, insertion-ordered table of pipeline patterns keyed by name.
///
/// Built once at startup and handed to renderers by reference.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    definitions: Vec<PipelineDefinition>,
    index: BTreeMap<String, usize>,
}

impl Catalog {
    pub fn from_definitions(
        definitions: impl IntoIterator<Item = PipelineDefinition>,
    ) -> Result<Self, PipevizError> {
        let mut catalog = Self::default();
        for definition in definitions {
            catalog.insert(definition)?;
        }
        tracing::debug!(patterns = catalog.len(), "catalog constructed");
        Ok(catalog)
    }

    /// The shipped patterns: Simple ETL, Incremental Load, Backfill, CDC Merge, Snapshot Diff.
    pub fn builtin() -> Self {
        let mut catalog = Self::default();
        for definition in builtin::patterns() {
            let position = catalog.definitions.len();
            catalog.index.insert(definition.name.clone(), position);
            catalog.definitions.push(definition);
        }
        catalog
    }

    /// Returns a new catalog with `definitions` appended after the existing ones.
    pub fn extend(
        &self,
        definitions: impl IntoIterator<Item = PipelineDefinition>,
    ) -> Result<Self, PipevizError> {
        let mut catalog = self.clone();
        for definition in definitions {
            catalog.insert(definition)?;
        }
        Ok(catalog)
    }

    pub fn get(&self, name: &str) -> Result<&PipelineDefinition, PipevizError> {
        self.index
            .get(name)
            .map(|position| &self.definitions[*position])
            .ok_or_else(|| PipevizError::not_found(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn list_names(&self) -> Vec<&str> {
        self.definitions
            .iter()
            .map(|definition| definition.name.as_str())
            .collect()
    }

    pub fn definitions(&self) -> impl Iterator<Item = &PipelineDefinition> {
        self.definitions.iter()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    fn insert(&mut self, definition: PipelineDefinition) -> Result<(), PipevizError> {
        if definition.name.trim().is_empty() {
            return Err(PipevizError::InvalidDefinition(
                "pattern name must not be empty".to_string(),
            ));
        }
        if self.index.contains_key(&definition.name) {
            return Err(PipevizError::InvalidDefinition(format!(
                "duplicate pattern name '{}'",
                definition.name
            )));
        }
        self.index
            .insert(definition.name.clone(), self.definitions.len());
        self.definitions.push(definition);
        Ok(())
    }
}
