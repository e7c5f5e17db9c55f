//! Mutable survival state for a single character.
//!
//! [`SurvivalState`] holds the continuous meters the scheduler integrates;
//! [`CharacterState`] wraps them together with vitality and the previous
//! tick's active-condition set, which is carried only so newly triggered
//! conditions can be reported across ticks (and across save/load).
//!
//! Every mutator clamps back into the declared ranges. Out-of-range values
//! are programmer errors: debug builds assert, release builds clamp
//! silently rather than crash a running session.

pub mod levels;

pub use levels::{Level, TemperatureStatus, WetnessLevel};

use arrayvec::ArrayVec;

use crate::config::EngineConfig;

// ============================================================================
// Condition Identity
// ============================================================================

/// Unique key of a condition definition in the catalog.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ConditionId(String);

impl ConditionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for ConditionId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ConditionId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ConditionId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl AsRef<str> for ConditionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// ============================================================================
// Active Condition Set
// ============================================================================

/// Condition ids active after conflict resolution, in catalog order.
///
/// Recomputed from scratch every tick; the copy stored on
/// [`CharacterState`] is last tick's result and exists only for
/// notification diffing. Bounded so a runaway catalog cannot grow state
/// without limit; overflow is reported as a resolution diagnostic.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActiveConditionSet {
    ids: ArrayVec<ConditionId, { EngineConfig::MAX_ACTIVE_CONDITIONS }>,
}

impl ActiveConditionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an id; returns false (without adding) when the set is full.
    pub fn push(&mut self, id: ConditionId) -> bool {
        if self.ids.is_full() {
            return false;
        }
        self.ids.push(id);
        true
    }

    pub fn contains(&self, id: &ConditionId) -> bool {
        self.ids.iter().any(|active| active == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ConditionId> {
        self.ids.iter()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl FromIterator<ConditionId> for ActiveConditionSet {
    fn from_iter<T: IntoIterator<Item = ConditionId>>(iter: T) -> Self {
        let mut set = Self::new();
        for id in iter {
            if !set.push(id) {
                break;
            }
        }
        set
    }
}

// ============================================================================
// Survival Meters
// ============================================================================

/// The continuous survival meters, mutated in place by the scheduler.
///
/// Ranges: hunger/thirst/fatigue/body_temperature/warmth in [0, 1000]
/// (500 neutral), wetness in [0, 400], wind_chill in [0, 200]. For
/// hunger/thirst 0 means depleted; for fatigue 0 means exhausted and 1000
/// fully rested.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SurvivalState {
    hunger: i32,
    thirst: i32,
    fatigue: i32,
    body_temperature: i32,
    warmth: i32,
    wetness: i32,
    wind_chill: i32,
}

impl Default for SurvivalState {
    fn default() -> Self {
        Self::new()
    }
}

impl SurvivalState {
    /// A character in neutral shape: every meter at its comfortable value.
    pub fn new() -> Self {
        Self {
            hunger: EngineConfig::STAT_NEUTRAL,
            thirst: EngineConfig::STAT_NEUTRAL,
            fatigue: EngineConfig::STAT_NEUTRAL,
            body_temperature: EngineConfig::STAT_NEUTRAL,
            warmth: EngineConfig::STAT_NEUTRAL,
            wetness: 0,
            wind_chill: 0,
        }
    }

    // ===== raw accessors =====

    pub fn hunger(&self) -> i32 {
        self.hunger
    }

    pub fn thirst(&self) -> i32 {
        self.thirst
    }

    pub fn fatigue(&self) -> i32 {
        self.fatigue
    }

    pub fn body_temperature(&self) -> i32 {
        self.body_temperature
    }

    pub fn warmth(&self) -> i32 {
        self.warmth
    }

    pub fn wetness(&self) -> i32 {
        self.wetness
    }

    pub fn wind_chill(&self) -> i32 {
        self.wind_chill
    }

    // ===== derived classification (pure) =====

    pub fn hunger_level(&self) -> Level {
        Level::classify(self.hunger)
    }

    pub fn thirst_level(&self) -> Level {
        Level::classify(self.thirst)
    }

    pub fn fatigue_level(&self) -> Level {
        Level::classify(self.fatigue)
    }

    pub fn temperature_status(&self) -> TemperatureStatus {
        TemperatureStatus::classify(self.body_temperature)
    }

    pub fn wetness_level(&self) -> WetnessLevel {
        WetnessLevel::classify(self.wetness)
    }

    // ===== player-facing operations =====

    /// Eating adds to the hunger meter (toward 1000 = sated).
    pub fn eat(&mut self, amount: i32) {
        self.set_hunger(self.hunger + amount);
    }

    /// Drinking adds to the thirst meter (toward 1000 = quenched).
    pub fn drink(&mut self, amount: i32) {
        self.set_thirst(self.thirst + amount);
    }

    // ===== clamping setters =====

    pub fn set_hunger(&mut self, value: i32) {
        self.hunger = clamp_stat(value, EngineConfig::STAT_MAX);
    }

    pub fn set_thirst(&mut self, value: i32) {
        self.thirst = clamp_stat(value, EngineConfig::STAT_MAX);
    }

    pub fn set_fatigue(&mut self, value: i32) {
        self.fatigue = clamp_stat(value, EngineConfig::STAT_MAX);
    }

    pub fn set_body_temperature(&mut self, value: i32) {
        self.body_temperature = clamp_stat(value, EngineConfig::STAT_MAX);
    }

    /// Insulation from clothing, written by the equipment layer.
    pub fn set_warmth(&mut self, value: i32) {
        self.warmth = clamp_stat(value, EngineConfig::STAT_MAX);
    }

    pub fn set_wetness(&mut self, value: i32) {
        self.wetness = clamp_stat(value, EngineConfig::WETNESS_MAX);
    }

    pub fn set_wind_chill(&mut self, value: i32) {
        self.wind_chill = clamp_stat(value, EngineConfig::WIND_CHILL_MAX);
    }
}

/// Clamp a meter into [0, max]. Long advances legitimately produce large
/// raw deltas, so out-of-range inputs are expected here; the declared
/// range holds after every mutation because every write lands here.
fn clamp_stat(value: i32, max: i32) -> i32 {
    value.clamp(0, max)
}

// ============================================================================
// Vitality
// ============================================================================

/// Hit-point style meter that condition damage-over-time drains.
///
/// Combat is out of scope here; this is only the target the scheduler
/// applies periodic condition damage and healing to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VitalityMeter {
    current: i32,
    maximum: i32,
}

impl VitalityMeter {
    pub fn new(maximum: i32) -> Self {
        Self {
            current: maximum,
            maximum,
        }
    }

    pub fn current(&self) -> i32 {
        self.current
    }

    pub fn maximum(&self) -> i32 {
        self.maximum
    }

    pub fn is_depleted(&self) -> bool {
        self.current <= 0
    }

    /// Applies damage, clamping at zero. Returns the new value.
    pub fn damage(&mut self, amount: i32) -> i32 {
        debug_assert!(amount >= 0, "damage amount must be non-negative");
        self.current = (self.current - amount.max(0)).max(0);
        self.current
    }

    /// Heals up to the maximum. Returns the new value.
    pub fn heal(&mut self, amount: i32) -> i32 {
        debug_assert!(amount >= 0, "heal amount must be non-negative");
        self.current = (self.current + amount.max(0)).min(self.maximum);
        self.current
    }
}

// ============================================================================
// Character State
// ============================================================================

/// Everything the scheduler mutates for one character, and exactly what
/// persistence writes: the survival meters, vitality, the previous tick's
/// active-condition ids (notification diffing survives save/load), and the
/// tick nonce that seeds the deterministic RNG draws.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharacterState {
    pub survival: SurvivalState,
    pub vitality: VitalityMeter,
    pub active_conditions: ActiveConditionSet,
    pub nonce: u64,
}

impl CharacterState {
    pub fn new(vitality_maximum: i32) -> Self {
        Self {
            survival: SurvivalState::new(),
            vitality: VitalityMeter::new(vitality_maximum),
            active_conditions: ActiveConditionSet::new(),
            nonce: 0,
        }
    }
}

impl Default for CharacterState {
    fn default() -> Self {
        Self::new(100)
    }
}
