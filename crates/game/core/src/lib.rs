//! Deterministic survival simulation and condition-resolution rules.
//!
//! `survival-core` defines the canonical mechanics: survival meters and
//! their classification, the sandboxed trigger-expression evaluator, the
//! condition/activity catalogs, priority-based conflict resolution with
//! effect aggregation, and the time & activity scheduler. It exposes
//! pure APIs with no I/O, logging, or global state. All state mutation
//! flows through [`engine::SurvivalEngine`]; external collaborators
//! (location, weather, randomness) arrive as read-only oracles through
//! [`env::SurvivalEnv`].
pub mod catalog;
pub mod config;
pub mod engine;
pub mod env;
pub mod expr;
pub mod resolve;
pub mod state;

pub use catalog::{
    Ability, ActivityCatalog, ActivityDefinition, CatalogBuild, CatalogDiagnostic, CatalogError,
    ConditionCatalog, ConditionDefinition, ConditionEffects, DamageOverTime, DamageType,
    DurationClass, EffectPatch, ExertionLevel, Interval, RawCondition, RawInteraction, Severity,
    Trigger,
};
pub use config::EngineConfig;
pub use engine::{
    ActivityParams, SurvivalEngine, SurvivalEvent, TickError, TickOutcome, TickResult,
};
pub use env::{
    DrawContext, LocationOracle, PcgRng, RngOracle, ShelterFlags, SurvivalEnv, WeatherOracle,
    WeatherSnapshot, compute_seed,
};
pub use resolve::{EffectBundle, Resolution, ResolveDiagnostic, TriggeredCondition, resolve};
pub use state::{
    ActiveConditionSet, CharacterState, ConditionId, Level, SurvivalState, TemperatureStatus,
    VitalityMeter, WetnessLevel,
};
