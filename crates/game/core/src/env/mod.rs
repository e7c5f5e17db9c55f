//! Traits describing read-only collaborator data.
//!
//! Oracles expose the external systems this engine consumes but never
//! owns: the location's shelter qualities, the ambient weather, and the
//! deterministic RNG. [`SurvivalEnv`] bundles them with the two read-only
//! catalogs so the scheduler can reach everything it needs without hard
//! coupling to concrete implementations, and without any process-wide
//! mutable state.

mod location;
mod rng;
mod weather;

pub use location::{LocationOracle, ShelterFlags};
pub use rng::{DrawContext, PcgRng, RngOracle, compute_seed};
pub use weather::{WeatherOracle, WeatherSnapshot};

use crate::catalog::{ActivityCatalog, ConditionCatalog};

/// Everything one tick reads besides the character state itself.
///
/// All references are required: a tick cannot run without catalogs,
/// location, weather, and randomness. The session seed rides along so
/// draw seeds can be mixed per tick.
#[derive(Clone, Copy)]
pub struct SurvivalEnv<'a> {
    conditions: &'a ConditionCatalog,
    activities: &'a ActivityCatalog,
    location: &'a dyn LocationOracle,
    weather: &'a dyn WeatherOracle,
    rng: &'a dyn RngOracle,
    session_seed: u64,
}

impl<'a> SurvivalEnv<'a> {
    pub fn new(
        conditions: &'a ConditionCatalog,
        activities: &'a ActivityCatalog,
        location: &'a dyn LocationOracle,
        weather: &'a dyn WeatherOracle,
        rng: &'a dyn RngOracle,
        session_seed: u64,
    ) -> Self {
        Self {
            conditions,
            activities,
            location,
            weather,
            rng,
            session_seed,
        }
    }

    pub fn conditions(&self) -> &'a ConditionCatalog {
        self.conditions
    }

    pub fn activities(&self) -> &'a ActivityCatalog {
        self.activities
    }

    pub fn location(&self) -> &'a dyn LocationOracle {
        self.location
    }

    pub fn weather(&self) -> &'a dyn WeatherOracle {
        self.weather
    }

    pub fn rng(&self) -> &'a dyn RngOracle {
        self.rng
    }

    pub fn session_seed(&self) -> u64 {
        self.session_seed
    }
}
