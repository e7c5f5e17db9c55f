//! Session orchestration: one character, its catalogs, its collaborators.
//!
//! [`GameSession`] is the embedding point for the host game: it owns the
//! character state, holds the read-only catalogs, and wires the location/
//! weather/RNG collaborators into each tick. Catalogs are explicitly
//! constructed and injected; there is no global manager to reach for.

use survival_core::{
    ActivityCatalog, ActivityParams, CharacterState, ConditionCatalog, LocationOracle, PcgRng,
    Resolution, ResolveDiagnostic, RngOracle, SurvivalEngine, SurvivalEnv, TickResult,
    WeatherOracle, resolve,
};

use crate::error::{Result, RuntimeError};
use crate::event::NotificationSink;
use crate::repository::SessionSnapshot;

/// Builder for [`GameSession`].
///
/// Location and weather collaborators are mandatory; catalogs default to
/// the content shipped with `survival-content`, the RNG defaults to the
/// deterministic PCG, and the seed defaults to a fresh random one.
pub struct SessionBuilder {
    conditions: Option<ConditionCatalog>,
    activities: Option<ActivityCatalog>,
    location: Option<Box<dyn LocationOracle>>,
    weather: Option<Box<dyn WeatherOracle>>,
    rng: Box<dyn RngOracle>,
    seed: Option<u64>,
    character: CharacterState,
    sinks: Vec<Box<dyn NotificationSink>>,
}

impl SessionBuilder {
    pub fn new() -> Self {
        Self {
            conditions: None,
            activities: None,
            location: None,
            weather: None,
            rng: Box::new(PcgRng),
            seed: None,
            character: CharacterState::default(),
            sinks: Vec::new(),
        }
    }

    pub fn conditions(mut self, catalog: ConditionCatalog) -> Self {
        self.conditions = Some(catalog);
        self
    }

    pub fn activities(mut self, catalog: ActivityCatalog) -> Self {
        self.activities = Some(catalog);
        self
    }

    pub fn location(mut self, oracle: impl LocationOracle + 'static) -> Self {
        self.location = Some(Box::new(oracle));
        self
    }

    pub fn weather(mut self, oracle: impl WeatherOracle + 'static) -> Self {
        self.weather = Some(Box::new(oracle));
        self
    }

    pub fn rng(mut self, oracle: impl RngOracle + 'static) -> Self {
        self.rng = Box::new(oracle);
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn character(mut self, character: CharacterState) -> Self {
        self.character = character;
        self
    }

    pub fn sink(mut self, sink: impl NotificationSink + 'static) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }

    /// Resume from a saved snapshot: character state and seed together, so
    /// subsequent ticks replay identically.
    pub fn restore(self, snapshot: SessionSnapshot) -> Self {
        self.character(snapshot.character).seed(snapshot.seed)
    }

    pub fn build(self) -> Result<GameSession> {
        let conditions = match self.conditions {
            Some(catalog) => catalog,
            None => {
                let build = survival_content::default_conditions()
                    .map_err(|e| RuntimeError::Content(e.to_string()))?;
                for diagnostic in &build.rejected {
                    tracing::warn!(
                        condition = %diagnostic.id,
                        error = %diagnostic.error,
                        "condition definition rejected at load"
                    );
                }
                build.catalog
            }
        };
        let activities = match self.activities {
            Some(catalog) => catalog,
            None => survival_content::default_activities()
                .map_err(|e| RuntimeError::Content(e.to_string()))?,
        };
        let location = self
            .location
            .ok_or(RuntimeError::MissingCollaborator("location"))?;
        let weather = self
            .weather
            .ok_or(RuntimeError::MissingCollaborator("weather"))?;
        let seed = self.seed.unwrap_or_else(rand::random);

        Ok(GameSession {
            seed,
            character: self.character,
            conditions,
            activities,
            location,
            weather,
            rng: self.rng,
            sinks: self.sinks,
        })
    }
}

impl Default for SessionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A running survival session for one character.
pub struct GameSession {
    seed: u64,
    character: CharacterState,
    conditions: ConditionCatalog,
    activities: ActivityCatalog,
    location: Box<dyn LocationOracle>,
    weather: Box<dyn WeatherOracle>,
    rng: Box<dyn RngOracle>,
    sinks: Vec<Box<dyn NotificationSink>>,
}

impl GameSession {
    pub fn builder() -> SessionBuilder {
        SessionBuilder::new()
    }

    /// Run one tick of the named activity, log diagnostics, and fan the
    /// resulting events out to every notification sink.
    pub fn advance(&mut self, activity: &str, params: &ActivityParams) -> Result<TickResult> {
        let env = SurvivalEnv::new(
            &self.conditions,
            &self.activities,
            self.location.as_ref(),
            self.weather.as_ref(),
            self.rng.as_ref(),
            self.seed,
        );
        let result = SurvivalEngine::new(&mut self.character).advance(&env, activity, params)?;

        for diagnostic in &result.diagnostics {
            match diagnostic {
                ResolveDiagnostic::TriggerFailed { id, error } => {
                    tracing::warn!(condition = %id, %error, "trigger failed to evaluate");
                }
                ResolveDiagnostic::ActiveSetOverflow { id } => {
                    tracing::warn!(condition = %id, "active condition set overflow");
                }
            }
        }
        for event in &result.events {
            for sink in &mut self.sinks {
                sink.notify(event);
            }
        }

        Ok(result)
    }

    /// Re-resolve conditions against current state without advancing time.
    ///
    /// Resolution is pure, so display layers may call this as often as
    /// they like between ticks.
    pub fn resolve_now(&self) -> Resolution {
        resolve(
            &self.character.survival,
            &self.conditions,
            self.location.as_ref(),
            &self.character.active_conditions,
        )
    }

    pub fn eat(&mut self, amount: i32) {
        self.character.survival.eat(amount);
    }

    pub fn drink(&mut self, amount: i32) {
        self.character.survival.drink(amount);
    }

    pub fn character(&self) -> &CharacterState {
        &self.character
    }

    pub fn conditions(&self) -> &ConditionCatalog {
        &self.conditions
    }

    pub fn activities(&self) -> &ActivityCatalog {
        &self.activities
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Capture everything persistence needs to resume this session.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot::capture(self)
    }
}
