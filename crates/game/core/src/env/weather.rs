//! Weather collaborator: the ambient snapshot consumed each tick.

use crate::config::EngineConfig;

/// Ambient weather at the character's position, sampled once per tick.
///
/// Produced by the world/weather generator; this engine only reads it.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeatherSnapshot {
    /// Ambient temperature on the body-temperature scale: 0 lethal cold,
    /// 500 comfortable, 1000 lethal heat.
    pub ambient_temperature: i32,
    /// Wind strength on the wind-chill scale [0, 200].
    pub wind: i32,
    /// Precipitation intensity in [0, 1]; 0 means dry.
    pub precipitation: f32,
}

impl WeatherSnapshot {
    /// Calm, comfortable weather.
    pub fn mild() -> Self {
        Self {
            ambient_temperature: EngineConfig::STAT_NEUTRAL,
            wind: 0,
            precipitation: 0.0,
        }
    }

    pub fn is_precipitating(&self) -> bool {
        self.precipitation > 0.0
    }
}

impl Default for WeatherSnapshot {
    fn default() -> Self {
        Self::mild()
    }
}

/// Read-only source of the current weather.
pub trait WeatherOracle: Send + Sync {
    fn current(&self) -> WeatherSnapshot;
}
