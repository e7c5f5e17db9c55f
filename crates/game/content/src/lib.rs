//! Content loading for the survival engine.
//!
//! Turns RON catalog files into validated `survival-core` catalog objects.
//! Loading is fail-safe: records that do not validate are reported per id
//! and skipped, so one bad condition never takes the catalog down. The
//! crate also ships working default content under `data/`.
#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    ActivityLoader, ConditionLoader, ContentFactory, default_activities, default_conditions,
};
