//! Per-field advancement of the survival meters over elapsed hours.
//!
//! Update order is fixed and load-bearing: metabolic burn, fatigue,
//! wetness, wind chill, then body temperature, so the temperature step
//! reads freshly updated wetness and wind chill for its superimposed
//! cooling terms. All writes go through the clamping setters, so no field ever
//! leaves its declared range.

use crate::catalog::ExertionLevel;
use crate::config::EngineConfig;
use crate::env::{LocationOracle, WeatherSnapshot};
use crate::state::SurvivalState;

/// Advance all six meters by `hours` of the given exertion.
pub fn integrate(
    state: &mut SurvivalState,
    hours: f32,
    exertion: ExertionLevel,
    weather: &WeatherSnapshot,
    location: &dyn LocationOracle,
) {
    debug_assert!(hours.is_finite() && hours >= 0.0, "bad elapsed hours: {hours}");

    let shelter = location.shelter();
    let fire = location.has_warmth_source();

    // metabolic burn, scaled by exertion
    let burn = exertion.metabolic_factor() * hours;
    state.set_hunger(state.hunger() - round(EngineConfig::HUNGER_BURN_PER_HOUR * burn));
    state.set_thirst(state.thirst() - round(EngineConfig::THIRST_BURN_PER_HOUR * burn));

    // fatigue: recovery while resting or unconscious, drain otherwise
    state.set_fatigue(state.fatigue() + round(exertion.fatigue_delta_per_hour() * hours));

    // wetness: rain soaks (shelter keeps some off), dry air and fire dry
    if weather.is_precipitating() {
        let gain = EngineConfig::WETNESS_GAIN_PER_HOUR
            * weather.precipitation.clamp(0.0, 1.0)
            * (1.0 - shelter.rain_block())
            * hours;
        state.set_wetness(state.wetness() + round(gain));
    } else {
        let drying = if fire {
            EngineConfig::FIRE_DRYING_MULTIPLIER
        } else {
            1.0
        };
        state.set_wetness(
            state.wetness() - round(EngineConfig::WETNESS_DECAY_PER_HOUR * drying * hours),
        );
    }

    // wind chill tracks the shelter-attenuated ambient wind
    let exposure = weather.wind as f32 * (1.0 - shelter.wind_block());
    let wind_gap = exposure - state.wind_chill() as f32;
    let wind_step = toward(
        wind_gap * EngineConfig::WIND_CHILL_TRACK_RATE_PER_HOUR * hours,
        wind_gap,
    );
    state.set_wind_chill(state.wind_chill() + round(wind_step));

    // body temperature: relax toward the ambient-derived target at a rate
    // the shelter stabilizes, then superimpose evaporative cooling, wind
    // chill, and fire warming
    let mut target = weather.ambient_temperature as f32
        + (state.warmth() - EngineConfig::STAT_NEUTRAL) as f32
            * EngineConfig::INSULATION_TARGET_WEIGHT;
    if fire {
        target += EngineConfig::FIRE_TARGET_BONUS;
    }
    let gap = target - state.body_temperature() as f32;
    let relax = toward(
        gap * EngineConfig::TEMP_RELAX_RATE_PER_HOUR * shelter.stabilization_factor() * hours,
        gap,
    );
    let evaporative = EngineConfig::EVAPORATIVE_COOLING_PER_HOUR
        * (state.wetness() as f32 / EngineConfig::WETNESS_MAX as f32)
        * hours;
    let wind_cooling = EngineConfig::WIND_CHILL_COOLING_PER_HOUR
        * (state.wind_chill() as f32 / EngineConfig::WIND_CHILL_MAX as f32)
        * hours;
    let fire_warming = if fire {
        EngineConfig::FIRE_WARMING_PER_HOUR * hours
    } else {
        0.0
    };
    state.set_body_temperature(
        state.body_temperature() + round(relax - evaporative - wind_cooling + fire_warming),
    );
}

/// Clamp a relaxation step so it never overshoots the remaining gap.
fn toward(step: f32, gap: f32) -> f32 {
    if gap >= 0.0 {
        step.clamp(0.0, gap)
    } else {
        step.clamp(gap, 0.0)
    }
}

fn round(delta: f32) -> i32 {
    delta.round() as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::ShelterFlags;

    struct StubLocation {
        shelter: ShelterFlags,
        warmth: bool,
    }

    impl LocationOracle for StubLocation {
        fn shelter(&self) -> ShelterFlags {
            self.shelter
        }

        fn has_warmth_source(&self) -> bool {
            self.warmth
        }
    }

    fn exposed() -> StubLocation {
        StubLocation {
            shelter: ShelterFlags::empty(),
            warmth: false,
        }
    }

    #[test]
    fn metabolic_burn_scales_with_exertion() {
        let mut resting = SurvivalState::new();
        integrate(
            &mut resting,
            1.0,
            ExertionLevel::Resting,
            &WeatherSnapshot::mild(),
            &exposed(),
        );
        let mut strenuous = SurvivalState::new();
        integrate(
            &mut strenuous,
            1.0,
            ExertionLevel::Strenuous,
            &WeatherSnapshot::mild(),
            &exposed(),
        );
        assert!(strenuous.hunger() < resting.hunger());
        assert!(strenuous.thirst() < resting.thirst());
        assert!(resting.hunger() < 500);
    }

    #[test]
    fn fatigue_recovers_resting_and_drains_working() {
        let mut state = SurvivalState::new();
        integrate(
            &mut state,
            1.0,
            ExertionLevel::Resting,
            &WeatherSnapshot::mild(),
            &exposed(),
        );
        assert!(state.fatigue() > 500);

        let mut state = SurvivalState::new();
        integrate(
            &mut state,
            1.0,
            ExertionLevel::Strenuous,
            &WeatherSnapshot::mild(),
            &exposed(),
        );
        assert!(state.fatigue() < 500);
    }

    #[test]
    fn rain_soaks_and_shelter_keeps_it_off() {
        let rain = WeatherSnapshot {
            ambient_temperature: 400,
            wind: 0,
            precipitation: 1.0,
        };

        let mut soaked = SurvivalState::new();
        integrate(&mut soaked, 1.0, ExertionLevel::Normal, &rain, &exposed());
        assert_eq!(soaked.wetness(), 120);

        let mut covered = SurvivalState::new();
        integrate(
            &mut covered,
            1.0,
            ExertionLevel::Normal,
            &rain,
            &StubLocation {
                shelter: ShelterFlags::EXCELLENT,
                warmth: false,
            },
        );
        assert_eq!(covered.wetness(), 12);
    }

    #[test]
    fn dry_air_dries_and_fire_dries_faster() {
        let mut state = SurvivalState::new();
        state.set_wetness(300);
        integrate(
            &mut state,
            1.0,
            ExertionLevel::Normal,
            &WeatherSnapshot::mild(),
            &exposed(),
        );
        assert_eq!(state.wetness(), 260);

        let mut by_fire = SurvivalState::new();
        by_fire.set_wetness(300);
        integrate(
            &mut by_fire,
            1.0,
            ExertionLevel::Normal,
            &WeatherSnapshot::mild(),
            &StubLocation {
                shelter: ShelterFlags::empty(),
                warmth: true,
            },
        );
        assert_eq!(by_fire.wetness(), 180);
    }

    #[test]
    fn wind_chill_tracks_attenuated_wind() {
        let gale = WeatherSnapshot {
            ambient_temperature: 500,
            wind: 200,
            precipitation: 0.0,
        };
        let mut state = SurvivalState::new();
        integrate(&mut state, 1.0, ExertionLevel::Normal, &gale, &exposed());
        assert_eq!(state.wind_chill(), 160);

        // excellent shelter blocks 85% of the wind
        let mut covered = SurvivalState::new();
        integrate(
            &mut covered,
            1.0,
            ExertionLevel::Normal,
            &gale,
            &StubLocation {
                shelter: ShelterFlags::EXCELLENT,
                warmth: false,
            },
        );
        assert_eq!(covered.wind_chill(), 24);
    }

    #[test]
    fn temperature_relaxes_toward_ambient_without_overshoot() {
        let mut state = SurvivalState::new();
        state.set_body_temperature(100);
        integrate(
            &mut state,
            1.0,
            ExertionLevel::Normal,
            &WeatherSnapshot::mild(),
            &exposed(),
        );
        // gap 400, rate 0.45/h fully exposed
        assert_eq!(state.body_temperature(), 280);

        // a very long advance closes the gap but never overshoots
        let mut state = SurvivalState::new();
        state.set_body_temperature(100);
        integrate(
            &mut state,
            48.0,
            ExertionLevel::Normal,
            &WeatherSnapshot::mild(),
            &exposed(),
        );
        assert_eq!(state.body_temperature(), 500);
    }

    #[test]
    fn shelter_stabilizes_temperature_drift() {
        let mut open = SurvivalState::new();
        open.set_body_temperature(100);
        integrate(
            &mut open,
            1.0,
            ExertionLevel::Normal,
            &WeatherSnapshot::mild(),
            &exposed(),
        );
        let open_delta = open.body_temperature() - 100;

        let mut sheltered = SurvivalState::new();
        sheltered.set_body_temperature(100);
        integrate(
            &mut sheltered,
            1.0,
            ExertionLevel::Normal,
            &WeatherSnapshot::mild(),
            &StubLocation {
                shelter: ShelterFlags::EXCELLENT,
                warmth: false,
            },
        );
        let sheltered_delta = sheltered.body_temperature() - 100;

        // stabilization factor 0.15: the sheltered drift is at most 15%
        // of the exposed drift (rounding gives it one degree of slack)
        assert!(sheltered_delta as f32 <= open_delta as f32 * 0.15 + 1.0);
        assert_eq!(open_delta, 180);
        assert_eq!(sheltered_delta, 27);
    }

    #[test]
    fn wetness_and_wind_cool_the_body() {
        let mut dry = SurvivalState::new();
        integrate(
            &mut dry,
            1.0,
            ExertionLevel::Normal,
            &WeatherSnapshot::mild(),
            &exposed(),
        );
        assert_eq!(dry.body_temperature(), 500);

        let mut soaked = SurvivalState::new();
        soaked.set_wetness(400);
        integrate(
            &mut soaked,
            1.0,
            ExertionLevel::Normal,
            &WeatherSnapshot::mild(),
            &exposed(),
        );
        // full-wetness evaporative cooling at 60/h; wetness dried to 360
        // before the temperature update reads it
        assert_eq!(soaked.body_temperature(), 446);
    }

    #[test]
    fn fire_warms_toward_a_raised_target() {
        let mut state = SurvivalState::new();
        state.set_body_temperature(200);
        integrate(
            &mut state,
            1.0,
            ExertionLevel::Normal,
            &WeatherSnapshot::mild(),
            &StubLocation {
                shelter: ShelterFlags::empty(),
                warmth: true,
            },
        );
        // target 650, gap 450 -> relax ~202; fire warming adds 80
        assert_eq!(state.body_temperature(), 482);
    }
}
