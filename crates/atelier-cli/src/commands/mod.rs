//! CLI command implementations

pub mod config;
pub mod kelvin;
pub mod kinds;
pub mod run;

use anyhow::{Context, Result};
use atelier_viewport::EditorConfig;
use std::path::Path;

/// Resolve config from an explicit file, or from the layered defaults
pub fn load_config(path: Option<&str>) -> Result<EditorConfig> {
    match path {
        Some(path) => EditorConfig::load_from_file(Path::new(path))
            .with_context(|| format!("Failed to load config: {}", path)),
        None => EditorConfig::load().context("Failed to load config"),
    }
}
