//! Content factory for building catalogs from a data directory.

use std::path::{Path, PathBuf};

use survival_core::catalog::{ActivityCatalog, CatalogBuild};

use crate::loaders::{ActivityLoader, ConditionLoader, LoadResult};

/// Default condition catalog shipped with the crate.
const DEFAULT_CONDITIONS: &str = include_str!("../../data/conditions.ron");

/// Default activity catalog shipped with the crate.
const DEFAULT_ACTIVITIES: &str = include_str!("../../data/activities.ron");

/// Content factory that loads catalogs from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── conditions.ron
/// └── activities.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load the condition catalog from `conditions.ron`.
    pub fn load_conditions(&self) -> LoadResult<CatalogBuild> {
        let path = self.data_dir.join("conditions.ron");
        ConditionLoader::load(&path)
    }

    /// Load the activity catalog from `activities.ron`.
    pub fn load_activities(&self) -> LoadResult<ActivityCatalog> {
        let path = self.data_dir.join("activities.ron");
        ActivityLoader::load(&path)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

/// The bundled default condition catalog.
pub fn default_conditions() -> LoadResult<CatalogBuild> {
    ConditionLoader::parse(DEFAULT_CONDITIONS)
}

/// The bundled default activity catalog.
pub fn default_activities() -> LoadResult<ActivityCatalog> {
    ActivityLoader::parse(DEFAULT_ACTIVITIES)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }

    #[test]
    fn bundled_conditions_all_validate() {
        let build = default_conditions().unwrap();
        assert!(
            build.rejected.is_empty(),
            "shipped catalog must be clean: {:?}",
            build.rejected
        );
        assert!(build.catalog.len() >= 20);
        assert!(build.catalog.get(&"freezing".into()).is_some());
        assert!(build.catalog.get(&"lit_fire".into()).is_some());
    }

    #[test]
    fn bundled_activities_cover_the_standard_set() {
        let catalog = default_activities().unwrap();
        for name in ["travel", "forage", "rest", "sleep", "cook", "build_shelter"] {
            assert!(catalog.get(name).is_some(), "missing activity {name}");
        }
    }

    #[test]
    fn factory_loads_from_a_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("conditions.ron"),
            super::DEFAULT_CONDITIONS,
        )
        .unwrap();
        std::fs::write(
            dir.path().join("activities.ron"),
            super::DEFAULT_ACTIVITIES,
        )
        .unwrap();

        let factory = ContentFactory::new(dir.path());
        assert!(factory.load_conditions().unwrap().rejected.is_empty());
        assert!(!factory.load_activities().unwrap().is_empty());
    }
}
