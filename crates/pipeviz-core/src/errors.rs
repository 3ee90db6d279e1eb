use crate::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipevizError {
    #[error("pattern '{name}' not found in catalog")]
    NotFound { name: String },
    #[error("invalid pipeline definition: {0}")]
    InvalidDefinition(String),
    #[error("DOT parse error: {0}")]
    DotParse(String),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl PipevizError {
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound { name: name.into() }
    }
}

#[derive(Debug, Error, Clone)]
#[error("validation failed with {errors_count} error(s)")]
pub struct ValidationError {
    pub diagnostics: Vec<Diagnostic>,
    pub errors_count: usize,
}

impl ValidationError {
    pub fn new(diagnostics: Vec<Diagnostic>) -> Self {
        let errors_count = diagnostics.iter().filter(|d| d.is_error()).count();
        Self {
            diagnostics,
            errors_count,
        }
    }
}
