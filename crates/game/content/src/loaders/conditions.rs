//! Condition catalog loader.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use survival_core::catalog::{CatalogBuild, ConditionCatalog, RawCondition, Severity};

use crate::loaders::{LoadResult, read_file};

/// Condition catalog structure for RON files.
///
/// Conditions are a list rather than a map so that catalog order, which
/// breaks priority ties during conflict resolution, survives the file
/// format. `severity_levels` carries the presentation-layer display color
/// per severity and nothing else.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConditionCatalogFile {
    #[serde(default)]
    pub severity_levels: BTreeMap<Severity, String>,
    pub conditions: Vec<RawCondition>,
}

/// Loader for condition catalogs from RON files.
pub struct ConditionLoader;

impl ConditionLoader {
    /// Load and validate a condition catalog from a RON file.
    ///
    /// The returned [`CatalogBuild`] contains every definition that
    /// validated plus a diagnostic per rejected record; rejections are
    /// deliberately not errors.
    pub fn load(path: &Path) -> LoadResult<CatalogBuild> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse and validate catalog RON from a string.
    pub fn parse(content: &str) -> LoadResult<CatalogBuild> {
        let file: ConditionCatalogFile = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse condition catalog RON: {}", e))?;

        let mut build = ConditionCatalog::build(file.conditions);
        build.catalog = build.catalog.with_severity_colors(file.severity_levels);
        Ok(build)
    }
}
