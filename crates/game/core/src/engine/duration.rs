//! Effective activity duration.
//!
//! `base_duration_hours` is multiplied by one factor per concern; a factor
//! only applies when the activity's corresponding flag allows it, except
//! the fatigue factor, which always applies: tiredness slows everything.

use crate::catalog::ActivityDefinition;
use crate::config::EngineConfig;
use crate::env::WeatherSnapshot;
use crate::state::{Level, SurvivalState};

/// Externally supplied duration modifiers for one tick.
///
/// Skill and equipment live outside this subsystem; their systems hand in
/// plain multipliers (1.0 = no effect, 0.8 = 20% faster). The travel speed
/// modifier only applies to activities flagged `uses_travel_speed`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ActivityParams {
    pub skill_modifier: f32,
    pub equipment_modifier: f32,
    pub travel_speed_modifier: f32,
}

impl Default for ActivityParams {
    fn default() -> Self {
        Self {
            skill_modifier: 1.0,
            equipment_modifier: 1.0,
            travel_speed_modifier: 1.0,
        }
    }
}

/// Duration multiplier from the current weather: precipitation and wind
/// both slow flagged activities, up to 1.5x combined.
pub fn weather_duration_modifier(weather: &WeatherSnapshot) -> f32 {
    let precipitation = weather.precipitation.clamp(0.0, 1.0);
    let wind = (weather.wind as f32 / EngineConfig::WIND_CHILL_MAX as f32).clamp(0.0, 1.0);
    1.0 + 0.3 * precipitation + 0.2 * wind
}

/// Duration multiplier from tiredness.
pub fn fatigue_duration_modifier(level: Level) -> f32 {
    match level {
        Level::Poor => 1.15,
        Level::Bad => 1.35,
        Level::Critical => 1.6,
        Level::Normal | Level::Good | Level::Excellent => 1.0,
    }
}

/// Compute the hours one run of this activity consumes.
pub fn effective_duration(
    definition: &ActivityDefinition,
    params: &ActivityParams,
    weather: &WeatherSnapshot,
    state: &SurvivalState,
) -> f32 {
    let mut hours = definition.base_duration_hours;

    if definition.skill_can_reduce {
        hours *= params.skill_modifier;
    }
    if definition.equipment_can_reduce {
        hours *= params.equipment_modifier;
    }
    if definition.weather_affected {
        hours *= weather_duration_modifier(weather);
    }
    hours *= fatigue_duration_modifier(state.fatigue_level());
    if definition.uses_travel_speed {
        hours *= params.travel_speed_modifier;
    }

    hours.max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{DurationClass, ExertionLevel};

    fn activity() -> ActivityDefinition {
        ActivityDefinition {
            name: "travel".to_string(),
            duration_class: DurationClass::Long,
            base_duration_hours: 4.0,
            exertion: ExertionLevel::Active,
            weather_affected: false,
            skill_can_reduce: false,
            equipment_can_reduce: false,
            uses_travel_speed: false,
        }
    }

    #[test]
    fn unflagged_activity_ignores_external_modifiers() {
        let params = ActivityParams {
            skill_modifier: 0.5,
            equipment_modifier: 0.5,
            travel_speed_modifier: 0.5,
        };
        let hours = effective_duration(
            &activity(),
            &params,
            &WeatherSnapshot::mild(),
            &SurvivalState::new(),
        );
        assert_eq!(hours, 4.0);
    }

    #[test]
    fn flags_enable_their_modifiers() {
        let mut definition = activity();
        definition.skill_can_reduce = true;
        definition.uses_travel_speed = true;
        let params = ActivityParams {
            skill_modifier: 0.5,
            equipment_modifier: 0.5,
            travel_speed_modifier: 0.5,
        };
        let hours = effective_duration(
            &definition,
            &params,
            &WeatherSnapshot::mild(),
            &SurvivalState::new(),
        );
        // 4.0 * 0.5 (skill) * 0.5 (travel speed); equipment flag stays off
        assert_eq!(hours, 1.0);
    }

    #[test]
    fn foul_weather_slows_flagged_activities() {
        let mut definition = activity();
        definition.weather_affected = true;
        let storm = WeatherSnapshot {
            ambient_temperature: 300,
            wind: 200,
            precipitation: 1.0,
        };
        let hours = effective_duration(
            &definition,
            &ActivityParams::default(),
            &storm,
            &SurvivalState::new(),
        );
        assert!((hours - 6.0).abs() < 1e-4);
    }

    #[test]
    fn tiredness_always_slows() {
        let mut state = SurvivalState::new();
        state.set_fatigue(300); // POOR
        let hours = effective_duration(
            &activity(),
            &ActivityParams::default(),
            &WeatherSnapshot::mild(),
            &state,
        );
        assert!((hours - 4.6).abs() < 1e-4);

        state.set_fatigue(20); // CRITICAL
        let hours = effective_duration(
            &activity(),
            &ActivityParams::default(),
            &WeatherSnapshot::mild(),
            &state,
        );
        assert!((hours - 6.4).abs() < 1e-4);
    }
}
