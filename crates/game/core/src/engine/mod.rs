//! The time & activity scheduler.
//!
//! [`SurvivalEngine`] is the authoritative reducer for [`CharacterState`]:
//! one call to [`SurvivalEngine::advance`] is one atomic tick. Within a
//! tick the ordering is fixed (state advancement, then condition
//! re-resolution, then damage-over-time and the fainting check) because
//! each later step reads what the earlier ones wrote. A tick never
//! suspends and never performs I/O; it either completes or the caller's
//! process was already doomed.

mod duration;
mod events;
mod integrate;

pub use duration::{
    ActivityParams, effective_duration, fatigue_duration_modifier, weather_duration_modifier,
};
pub use events::SurvivalEvent;
pub use integrate::integrate;

use crate::catalog::ActivityDefinition;
use crate::config::EngineConfig;
use crate::env::{DrawContext, SurvivalEnv, compute_seed};
use crate::resolve::{ResolveDiagnostic, TriggeredCondition, resolve};
use crate::state::CharacterState;

// ============================================================================
// Results
// ============================================================================

/// Scheduling failures. These are reported, not thrown: the tick consumed
/// no time and mutated nothing.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TickError {
    #[error("unknown activity {0:?}")]
    UnknownActivity(String),
}

/// How a tick ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    Completed,
    /// The character's vitality is at or below zero; no time was consumed.
    Incapacitated,
}

/// Externally observable result of one tick.
#[derive(Clone, Debug, PartialEq)]
pub struct TickResult {
    pub outcome: TickOutcome,
    pub hours_elapsed: f32,
    /// Conditions that became active this tick, with their catalog
    /// messages, for the notification collaborator.
    pub triggered: Vec<TriggeredCondition>,
    /// Everything that happened, in order.
    pub events: Vec<SurvivalEvent>,
    /// Non-fatal evaluation problems, for the logging collaborator.
    pub diagnostics: Vec<ResolveDiagnostic>,
}

impl TickResult {
    fn incapacitated() -> Self {
        Self {
            outcome: TickOutcome::Incapacitated,
            hours_elapsed: 0.0,
            triggered: Vec::new(),
            events: Vec::new(),
            diagnostics: Vec::new(),
        }
    }
}

// ============================================================================
// Engine
// ============================================================================

/// Scheduler over one character's state.
///
/// All mutation flows through [`SurvivalEngine::advance`]; catalogs and
/// collaborators arrive read-only through [`SurvivalEnv`].
pub struct SurvivalEngine<'a> {
    state: &'a mut CharacterState,
}

impl<'a> SurvivalEngine<'a> {
    pub fn new(state: &'a mut CharacterState) -> Self {
        Self { state }
    }

    /// Run one tick of the named activity.
    ///
    /// An incapacitated character consumes no time and gets a terminal
    /// result; an unknown activity is a reported error with zero time
    /// elapsed and no state change.
    pub fn advance(
        &mut self,
        env: &SurvivalEnv<'_>,
        activity: &str,
        params: &ActivityParams,
    ) -> Result<TickResult, TickError> {
        if self.state.vitality.is_depleted() {
            return Ok(TickResult::incapacitated());
        }
        let definition = env
            .activities()
            .get(activity)
            .cloned()
            .ok_or_else(|| TickError::UnknownActivity(activity.to_string()))?;
        Ok(self.run_tick(env, &definition, params, true))
    }

    fn run_tick(
        &mut self,
        env: &SurvivalEnv<'_>,
        definition: &ActivityDefinition,
        params: &ActivityParams,
        allow_faint: bool,
    ) -> TickResult {
        let nonce = self.state.nonce;
        self.state.nonce += 1;

        let weather = env.weather().current();
        let hours = effective_duration(definition, params, &weather, &self.state.survival);

        integrate(
            &mut self.state.survival,
            hours,
            definition.exertion,
            &weather,
            env.location(),
        );

        let resolution = resolve(
            &self.state.survival,
            env.conditions(),
            env.location(),
            &self.state.active_conditions,
        );

        let mut events: Vec<SurvivalEvent> = resolution
            .newly_triggered
            .iter()
            .map(|t| SurvivalEvent::ConditionTriggered {
                id: t.id.clone(),
                message: t.message.clone(),
            })
            .collect();
        events.extend(
            resolution
                .expired
                .iter()
                .map(|id| SurvivalEvent::ConditionExpired { id: id.clone() }),
        );

        self.apply_damage_over_time(env, &resolution, hours, &mut events);
        self.state.active_conditions = resolution.active.clone();

        let mut result = TickResult {
            outcome: TickOutcome::Completed,
            hours_elapsed: hours,
            triggered: resolution.newly_triggered.clone(),
            events,
            diagnostics: resolution.diagnostics.clone(),
        };

        if allow_faint && resolution.faint_chance > 0.0 && !self.state.vitality.is_depleted() {
            let check_seed = compute_seed(env.session_seed(), nonce, DrawContext::FaintCheck);
            if env.rng().unit_f32(check_seed) < resolution.faint_chance {
                let duration_seed =
                    compute_seed(env.session_seed(), nonce, DrawContext::FaintDuration);
                let minutes = env.rng().range_u32(
                    duration_seed,
                    EngineConfig::FAINT_MIN_MINUTES,
                    EngineConfig::FAINT_MAX_MINUTES,
                );
                result.events.push(SurvivalEvent::Fainted { minutes });

                // forced unconscious advance; the nested tick never
                // re-checks fainting
                let unconscious = ActivityDefinition::unconscious(minutes as f32 / 60.0);
                let nested = self.run_tick(env, &unconscious, &ActivityParams::default(), false);
                result.hours_elapsed += nested.hours_elapsed;
                result.triggered.extend(nested.triggered);
                result.events.extend(nested.events);
                result.diagnostics.extend(nested.diagnostics);
            }
        }

        result
    }

    /// Apply `floor(hours / interval)` damage (or healing) applications
    /// for every active condition carrying a damage-over-time effect.
    fn apply_damage_over_time(
        &mut self,
        env: &SurvivalEnv<'_>,
        resolution: &crate::resolve::Resolution,
        hours: f32,
        events: &mut Vec<SurvivalEvent>,
    ) {
        'conditions: for id in resolution.active.iter() {
            let Some(definition) = env.conditions().get(id) else {
                continue;
            };
            let Some(dot) = definition.effects.damage_over_time else {
                continue;
            };

            let applications = ((hours * 60.0) / dot.interval.minutes() as f32).floor() as u32;
            for _ in 0..applications {
                let old_value = self.state.vitality.current();
                if dot.amount >= 0 {
                    let new_value = self.state.vitality.damage(dot.amount);
                    events.push(SurvivalEvent::Damage {
                        amount: dot.amount,
                        damage_type: dot.damage_type,
                        source: definition.id.clone(),
                        old_value,
                        new_value,
                    });
                    if self.state.vitality.is_depleted() {
                        events.push(SurvivalEvent::Incapacitated);
                        break 'conditions;
                    }
                } else {
                    let new_value = self.state.vitality.heal(-dot.amount);
                    events.push(SurvivalEvent::Healing {
                        amount: -dot.amount,
                        source: definition.id.clone(),
                        old_value,
                        new_value,
                    });
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{
        ActivityCatalog, ActivityDefinition, ConditionCatalog, ConditionEffects, DamageOverTime,
        DamageType, DurationClass, ExertionLevel, RawCondition, Severity,
    };
    use crate::env::{
        LocationOracle, PcgRng, RngOracle, ShelterFlags, WeatherOracle, WeatherSnapshot,
    };

    struct StubLocation {
        shelter: ShelterFlags,
        warmth: bool,
    }

    impl StubLocation {
        fn exposed() -> Self {
            Self {
                shelter: ShelterFlags::empty(),
                warmth: false,
            }
        }
    }

    impl LocationOracle for StubLocation {
        fn shelter(&self) -> ShelterFlags {
            self.shelter
        }

        fn has_warmth_source(&self) -> bool {
            self.warmth
        }
    }

    struct StubWeather(WeatherSnapshot);

    impl WeatherOracle for StubWeather {
        fn current(&self) -> WeatherSnapshot {
            self.0
        }
    }

    /// RNG that answers every draw with the same raw value.
    struct ConstRng(u32);

    impl RngOracle for ConstRng {
        fn next_u32(&self, _seed: u64) -> u32 {
            self.0
        }
    }

    fn activity(name: &str, hours: f32, exertion: ExertionLevel) -> ActivityDefinition {
        ActivityDefinition {
            name: name.to_string(),
            duration_class: DurationClass::Short,
            base_duration_hours: hours,
            exertion,
            weather_affected: false,
            skill_can_reduce: false,
            equipment_can_reduce: false,
            uses_travel_speed: false,
        }
    }

    fn activities() -> ActivityCatalog {
        ActivityCatalog::new(vec![
            activity("wait", 1.0, ExertionLevel::Normal),
            activity("rest", 1.0, ExertionLevel::Resting),
            activity("march", 1.0, ExertionLevel::Strenuous),
        ])
    }

    fn raw(id: &str, trigger: &str) -> RawCondition {
        RawCondition {
            id: id.to_string(),
            trigger: trigger.to_string(),
            severity: Severity::Moderate,
            category: "test".to_string(),
            hierarchy: None,
            exclusion_group: None,
            priority: 0,
            trigger_message: format!("{id} set in"),
            effects: ConditionEffects::default(),
            interactions: Vec::new(),
        }
    }

    fn catalog(raws: Vec<RawCondition>) -> ConditionCatalog {
        let build = ConditionCatalog::build(raws);
        assert!(build.rejected.is_empty(), "{:?}", build.rejected);
        build.catalog
    }

    fn mild_weather() -> StubWeather {
        StubWeather(WeatherSnapshot::mild())
    }

    #[test]
    fn fatigue_direction_depends_on_exertion() {
        let conditions = ConditionCatalog::default();
        let activities = activities();
        let location = StubLocation::exposed();
        let weather = mild_weather();
        let rng = PcgRng;

        let env = SurvivalEnv::new(&conditions, &activities, &location, &weather, &rng, 7);

        let mut rested = CharacterState::default();
        SurvivalEngine::new(&mut rested)
            .advance(&env, "rest", &ActivityParams::default())
            .unwrap();
        assert!(rested.survival.fatigue() > 500);

        let mut worked = CharacterState::default();
        SurvivalEngine::new(&mut worked)
            .advance(&env, "march", &ActivityParams::default())
            .unwrap();
        assert!(worked.survival.fatigue() < 500);
    }

    #[test]
    fn cold_exposure_applies_exactly_six_damage_ticks() {
        let mut icy = raw("icy", "body_temperature <= 150");
        icy.effects.damage_over_time = Some(DamageOverTime {
            interval: "10_minutes".parse().unwrap(),
            amount: 1,
            damage_type: DamageType::Cold,
        });
        let conditions = catalog(vec![icy]);
        let activities = activities();
        let location = StubLocation::exposed();
        // ambient matches the body: temperature holds at 80 all hour
        let weather = StubWeather(WeatherSnapshot {
            ambient_temperature: 80,
            wind: 0,
            precipitation: 0.0,
        });
        let rng = PcgRng;
        let env = SurvivalEnv::new(&conditions, &activities, &location, &weather, &rng, 7);

        let mut character = CharacterState::default();
        character.survival.set_body_temperature(80);

        let result = SurvivalEngine::new(&mut character)
            .advance(&env, "wait", &ActivityParams::default())
            .unwrap();

        let damage_events: Vec<_> = result
            .events
            .iter()
            .filter_map(|event| match event {
                SurvivalEvent::Damage {
                    amount,
                    damage_type,
                    old_value,
                    new_value,
                    ..
                } => Some((*amount, *damage_type, *old_value, *new_value)),
                _ => None,
            })
            .collect();

        assert_eq!(damage_events.len(), 6);
        assert!(damage_events
            .iter()
            .all(|(amount, damage_type, _, _)| *amount == 1
                && *damage_type == DamageType::Cold));
        // consecutive applications walk vitality down one point each
        assert_eq!(damage_events.first().unwrap().2, 100);
        assert_eq!(damage_events.last().unwrap().3, 94);
        assert_eq!(character.vitality.current(), 94);
    }

    #[test]
    fn excellent_shelter_stabilizes_body_temperature() {
        let conditions = ConditionCatalog::default();
        let activities = activities();
        let weather = mild_weather();
        let rng = PcgRng;

        let advance = |location: StubLocation| {
            let env =
                SurvivalEnv::new(&conditions, &activities, &location, &weather, &rng, 7);
            let mut character = CharacterState::default();
            character.survival.set_body_temperature(100);
            SurvivalEngine::new(&mut character)
                .advance(&env, "wait", &ActivityParams::default())
                .unwrap();
            character.survival.body_temperature() - 100
        };

        let open_delta = advance(StubLocation::exposed());
        let sheltered_delta = advance(StubLocation {
            shelter: ShelterFlags::EXCELLENT,
            warmth: false,
        });

        assert!(sheltered_delta as f32 <= open_delta as f32 * 0.15 + 1.0);
    }

    #[test]
    fn hierarchy_conflict_resolves_to_the_higher_priority() {
        let mut low = raw("shivering", "body_temperature <= 400");
        low.hierarchy = Some("temperature_extreme".to_string());
        low.priority = 5;
        let mut high = raw("hypothermic", "body_temperature <= 150");
        high.hierarchy = Some("temperature_extreme".to_string());
        high.priority = 8;

        let conditions = catalog(vec![low, high]);
        let activities = activities();
        let location = StubLocation::exposed();
        let weather = StubWeather(WeatherSnapshot {
            ambient_temperature: 80,
            wind: 0,
            precipitation: 0.0,
        });
        let rng = PcgRng;
        let env = SurvivalEnv::new(&conditions, &activities, &location, &weather, &rng, 7);

        let mut character = CharacterState::default();
        character.survival.set_body_temperature(80);

        let result = SurvivalEngine::new(&mut character)
            .advance(&env, "wait", &ActivityParams::default())
            .unwrap();

        assert_eq!(result.triggered.len(), 1);
        assert_eq!(result.triggered[0].id.as_str(), "hypothermic");
        assert!(character.active_conditions.contains(&"hypothermic".into()));
        assert!(!character.active_conditions.contains(&"shivering".into()));
    }

    #[test]
    fn unknown_activity_reports_without_consuming_time() {
        let conditions = ConditionCatalog::default();
        let activities = activities();
        let location = StubLocation::exposed();
        let weather = mild_weather();
        let rng = PcgRng;
        let env = SurvivalEnv::new(&conditions, &activities, &location, &weather, &rng, 7);

        let mut character = CharacterState::default();
        let before = character.clone();

        let error = SurvivalEngine::new(&mut character)
            .advance(&env, "moonwalk", &ActivityParams::default())
            .unwrap_err();

        assert_eq!(error, TickError::UnknownActivity("moonwalk".to_string()));
        assert_eq!(character, before);
    }

    #[test]
    fn incapacitated_character_cannot_act() {
        let conditions = ConditionCatalog::default();
        let activities = activities();
        let location = StubLocation::exposed();
        let weather = mild_weather();
        let rng = PcgRng;
        let env = SurvivalEnv::new(&conditions, &activities, &location, &weather, &rng, 7);

        let mut character = CharacterState::default();
        character.vitality.damage(100);

        let result = SurvivalEngine::new(&mut character)
            .advance(&env, "wait", &ActivityParams::default())
            .unwrap();

        assert_eq!(result.outcome, TickOutcome::Incapacitated);
        assert_eq!(result.hours_elapsed, 0.0);
        assert!(result.events.is_empty());
    }

    #[test]
    fn fainting_forces_one_unconscious_advance() {
        let mut woozy = raw("woozy", "fatigue <= 600");
        woozy.effects.faint_chance = 0.5;
        let conditions = catalog(vec![woozy]);
        let activities = activities();
        let location = StubLocation::exposed();
        let weather = mild_weather();
        // raw zero: the faint draw is 0.0 < 0.5, and the duration draw
        // lands on the 30-minute minimum
        let rng = ConstRng(0);
        let env = SurvivalEnv::new(&conditions, &activities, &location, &weather, &rng, 7);

        let mut character = CharacterState::default();
        let result = SurvivalEngine::new(&mut character)
            .advance(&env, "wait", &ActivityParams::default())
            .unwrap();

        let faints: Vec<_> = result
            .events
            .iter()
            .filter(|event| matches!(event, SurvivalEvent::Fainted { .. }))
            .collect();
        assert_eq!(faints.len(), 1, "nested tick must not re-check fainting");
        assert_eq!(faints[0], &SurvivalEvent::Fainted { minutes: 30 });
        // 1 hour of waiting plus 30 unconscious minutes
        assert!((result.hours_elapsed - 1.5).abs() < 1e-4);
        // the nested advance consumed a second nonce
        assert_eq!(character.nonce, 2);
    }

    #[test]
    fn high_draw_never_faints() {
        let mut woozy = raw("woozy", "fatigue <= 600");
        woozy.effects.faint_chance = 0.5;
        let conditions = catalog(vec![woozy]);
        let activities = activities();
        let location = StubLocation::exposed();
        let weather = mild_weather();
        let rng = ConstRng(u32::MAX);
        let env = SurvivalEnv::new(&conditions, &activities, &location, &weather, &rng, 7);

        let mut character = CharacterState::default();
        let result = SurvivalEngine::new(&mut character)
            .advance(&env, "wait", &ActivityParams::default())
            .unwrap();

        assert!(result
            .events
            .iter()
            .all(|event| !matches!(event, SurvivalEvent::Fainted { .. })));
        assert!((result.hours_elapsed - 1.0).abs() < 1e-4);
    }

    #[test]
    fn lethal_damage_over_time_stops_at_incapacitation() {
        let mut icy = raw("icy", "body_temperature <= 150");
        icy.effects.damage_over_time = Some(DamageOverTime {
            interval: "10_minutes".parse().unwrap(),
            amount: 30,
            damage_type: DamageType::Cold,
        });
        let conditions = catalog(vec![icy]);
        let activities = activities();
        let location = StubLocation::exposed();
        let weather = StubWeather(WeatherSnapshot {
            ambient_temperature: 80,
            wind: 0,
            precipitation: 0.0,
        });
        let rng = PcgRng;
        let env = SurvivalEnv::new(&conditions, &activities, &location, &weather, &rng, 7);

        let mut character = CharacterState::default();
        character.survival.set_body_temperature(80);

        let result = SurvivalEngine::new(&mut character)
            .advance(&env, "wait", &ActivityParams::default())
            .unwrap();

        let damage_count = result
            .events
            .iter()
            .filter(|event| matches!(event, SurvivalEvent::Damage { .. }))
            .count();
        // 30 + 30 + 30 + 10-capped fourth application, then it stops
        assert_eq!(damage_count, 4);
        assert!(result
            .events
            .iter()
            .any(|event| matches!(event, SurvivalEvent::Incapacitated)));
        assert!(character.vitality.is_depleted());
    }

    #[test]
    fn healing_over_time_emits_healing_events() {
        let mut restful = raw("warm_glow", "has_warmth_source_in_location");
        restful.effects.damage_over_time = Some(DamageOverTime {
            interval: "30_minutes".parse().unwrap(),
            amount: -2,
            damage_type: DamageType::Fire,
        });
        let conditions = catalog(vec![restful]);
        let activities = activities();
        let location = StubLocation {
            shelter: ShelterFlags::empty(),
            warmth: true,
        };
        let weather = mild_weather();
        let rng = PcgRng;
        let env = SurvivalEnv::new(&conditions, &activities, &location, &weather, &rng, 7);

        let mut character = CharacterState::default();
        character.vitality.damage(10);

        let result = SurvivalEngine::new(&mut character)
            .advance(&env, "rest", &ActivityParams::default())
            .unwrap();

        let healed: i32 = result
            .events
            .iter()
            .filter_map(|event| match event {
                SurvivalEvent::Healing { amount, .. } => Some(*amount),
                _ => None,
            })
            .sum();
        assert_eq!(healed, 4);
        assert_eq!(character.vitality.current(), 94);
    }
}
