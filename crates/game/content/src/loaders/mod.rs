//! Loaders for reading catalog data from files.
//!
//! All loaders parse RON into the raw record types `survival-core`
//! defines, then hand validation to the core catalog builders.

pub mod activities;
pub mod conditions;
pub mod factory;

pub use activities::ActivityLoader;
pub use conditions::ConditionLoader;
pub use factory::{ContentFactory, default_activities, default_conditions};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
