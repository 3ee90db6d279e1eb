//! Startup configuration: where extra patterns come from and how logging is set up.

use pipeviz_core::{Catalog, parse_pipeline_dot};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "PIPEVIZ_LOG";
const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Directory whose `*.dot` files are appended to the built-in catalog.
    pub pattern_dir: Option<PathBuf>,
}

impl Config {
    pub fn load_catalog(&self) -> Result<Catalog, String> {
        let builtin = Catalog::builtin();
        let Some(dir) = self.pattern_dir.as_deref() else {
            return Ok(builtin);
        };

        let mut definitions = Vec::new();
        for path in dot_files(dir)? {
            let source = std::fs::read_to_string(&path)
                .map_err(|e| format!("failed reading DOT file '{}': {e}", path.display()))?;
            let definition = parse_pipeline_dot(&source)
                .map_err(|e| format!("{}: {e}", path.display()))?;
            tracing::info!(
                path = %path.display(),
                pattern = %definition.name,
                "loaded pattern"
            );
            definitions.push(definition);
        }

        builtin.extend(definitions).map_err(|e| e.to_string())
    }
}

fn dot_files(dir: &Path) -> Result<Vec<PathBuf>, String> {
    if !dir.is_dir() {
        return Err(format!("pattern directory '{}' does not exist", dir.display()));
    }

    let dir_str = dir
        .to_str()
        .ok_or_else(|| format!("pattern directory '{}' is not valid UTF-8", dir.display()))?;
    // Brackets and wildcards in the directory itself must match literally.
    let pattern = format!("{}/*.dot", glob::Pattern::escape(dir_str.trim_end_matches('/')));
    let mut files = glob::glob(&pattern)
        .map_err(|e| format!("invalid pattern directory glob: {e}"))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| format!("failed listing pattern directory: {e}"))?;
    files.sort();
    Ok(files)
}

/// Logs go to stderr so stdout carries only DOT, JSON or tables.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
