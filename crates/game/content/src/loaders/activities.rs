//! Activity catalog loader.

use std::path::Path;

use serde::{Deserialize, Serialize};
use survival_core::catalog::{ActivityCatalog, ActivityDefinition};

use crate::loaders::{LoadResult, read_file};

/// Activity catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityCatalogFile {
    pub activities: Vec<ActivityDefinition>,
}

/// Loader for activity catalogs from RON files.
pub struct ActivityLoader;

impl ActivityLoader {
    /// Load an activity catalog from a RON file.
    pub fn load(path: &Path) -> LoadResult<ActivityCatalog> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse activity catalog RON from a string.
    pub fn parse(content: &str) -> LoadResult<ActivityCatalog> {
        let file: ActivityCatalogFile = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse activity catalog RON: {}", e))?;
        Ok(ActivityCatalog::new(file.activities))
    }
}
